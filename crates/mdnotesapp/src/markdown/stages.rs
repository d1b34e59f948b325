//! The individual renderer stages, in pipeline order.

use super::{RenderContext, BLOCK_OPEN};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static FENCED_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(\w+)?\n(.*?)```").expect("valid regex"));
static TABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\|.*\|)\n(\|[-:| ]*-[-:| ]*\|)\n((?:\|.*\|(?:\n|$))+)").expect("valid regex")
});
// Placeholder characters are excluded so a span never swallows a stashed block.
static INLINE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`\x{E000}-\x{E002}]+)`").expect("valid regex"));
static H3_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^### (.*)$").expect("valid regex"));
static H2_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^## (.*)$").expect("valid regex"));
static H1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# (.*)$").expect("valid regex"));
static RULE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(?:-{3,}|\*{3,}|_{3,})[ \t]*$").expect("valid regex"));

// Group 1 matches a link target and is passed through untouched, so URLs never
// gain emphasis markup. Group 2 is the emphasized text.
static STRONG_STAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\]\([^)]*\))|\*\*(.*?)\*\*").expect("valid regex"));
static STRONG_UNDERSCORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\]\([^)]*\))|__(.*?)__").expect("valid regex"));
static EM_STAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\]\([^)]*\))|\*(\S(?:[^*\n]*?\S)?)\*").expect("valid regex")
});
static EM_UNDERSCORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\]\([^)]*\))|_(\S(?:[^_\n]*?\S)?)_").expect("valid regex"));

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex"));
static BLANK_LINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").expect("valid regex"));
static PARAGRAPH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<p>(.*?)</p>").expect("valid regex"));
static LIST_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*+] +(.+)$").expect("valid regex"));
static ADJACENT_LISTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"</ul>\s*<ul style="[^"]*">"#).expect("valid regex"));
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("[\u{E000}\u{E002}]([0-9]+)\u{E001}").expect("valid regex"));

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub(crate) fn escape_attr(text: &str) -> String {
    escape_html(text)
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// ```` ```lang\n...``` ```` to an escaped `<pre><code>`, stashed as a block token.
pub(crate) fn fenced_code(input: &str, ctx: &mut RenderContext<'_>) -> String {
    FENCED_CODE_RE
        .replace_all(input, |caps: &Captures| {
            let lang = caps.get(1).map_or("text", |m| m.as_str());
            let html = format!(
                "<pre style=\"background:{};color:{};padding:15px;border-radius:5px;\
                 overflow-x:auto;margin:10px 0;word-wrap:break-word;white-space:pre-wrap;\
                 border:1px solid {};\"><code class=\"language-{}\">{}</code></pre>",
                ctx.tone("#0d0d0d", "#f5f5f5"),
                ctx.tone("#e8e8e8", "#1a1a1a"),
                ctx.palette.border,
                lang,
                escape_html(&caps[2]),
            );
            ctx.stash_block(html)
        })
        .into_owned()
}

fn table_cells(row: &str) -> Vec<&str> {
    row.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect()
}

/// Header row, dash separator and body rows to a single-line `<table>`.
pub(crate) fn tables(input: &str, ctx: &mut RenderContext<'_>) -> String {
    let border = ctx.palette.border;
    let header_bg = ctx.tone("#1a4d7f", "#e3f2fd");
    let header_color = ctx.tone("#ffffff", "#0d47a1");
    let row_bg = ctx.tone("#252525", "#fafafa");
    let row_color = ctx.tone("#ffffff", "#333333");

    TABLE_RE
        .replace_all(input, |caps: &Captures| {
            let mut table = format!(
                "<table style=\"border-collapse:collapse;width:100%;margin:15px 0;\
                 border:2px solid {};font-size:0.95em;\"><thead><tr style=\"background:{};\">",
                border, header_bg
            );
            for cell in table_cells(&caps[1]) {
                table.push_str(&format!(
                    "<th style=\"border:1px solid {};padding:12px;font-weight:700;\
                     text-align:left;color:{};\">{}</th>",
                    border, header_color, cell
                ));
            }
            table.push_str("</tr></thead><tbody>");

            for (idx, line) in caps[3].lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let background = if idx % 2 == 0 { row_bg } else { "transparent" };
                table.push_str(&format!("<tr style=\"background:{};\">", background));
                for cell in table_cells(line) {
                    table.push_str(&format!(
                        "<td style=\"border:1px solid {};padding:10px 12px;\
                         word-break:break-word;color:{};\">{}</td>",
                        border, row_color, cell
                    ));
                }
                table.push_str("</tr>");
            }
            table.push_str("</tbody></table>");

            if caps[0].ends_with('\n') {
                table.push('\n');
            }
            table
        })
        .into_owned()
}

/// `` `x` `` to `<code>`, stashed as an inline token. The content is not escaped.
pub(crate) fn inline_code(input: &str, ctx: &mut RenderContext<'_>) -> String {
    let background = ctx.tone("#2a2a2a", "#f0f0f0");
    let color = ctx.tone("#e8e8e8", "#333");
    let border = ctx.palette.border;

    INLINE_CODE_RE
        .replace_all(input, |caps: &Captures| {
            let html = format!(
                "<code style=\"background:{};color:{};padding:4px 8px;border-radius:3px;\
                 font-family:monospace;font-size:0.9em;word-break:break-word;\
                 border:1px solid {};\">{}</code>",
                background, color, border, &caps[1]
            );
            ctx.stash_inline(html)
        })
        .into_owned()
}

pub(crate) fn headings(input: &str, ctx: &mut RenderContext<'_>) -> String {
    let p = ctx.palette;
    let h3 = format!(
        "<h3 style=\"margin:15px 0 10px 0;font-size:18px;color:{};font-weight:600;\">$1</h3>",
        p.text
    );
    let h2 = format!(
        "<h2 style=\"margin:20px 0 10px 0;font-size:24px;color:{};font-weight:600;\
         border-bottom:2px solid {};padding-bottom:8px;\">$1</h2>",
        p.text, p.border
    );
    let h1 = format!(
        "<h1 style=\"margin:25px 0 15px 0;font-size:32px;color:{};font-weight:700;\
         border-bottom:3px solid {};padding-bottom:12px;\">$1</h1>",
        p.text, p.primary
    );

    let html = H3_RE.replace_all(input, h3.as_str());
    let html = H2_RE.replace_all(&html, h2.as_str());
    H1_RE.replace_all(&html, h1.as_str()).into_owned()
}

pub(crate) fn rules(input: &str, ctx: &mut RenderContext<'_>) -> String {
    let hr = format!(
        "<hr style=\"border:none;border-top:1px solid {};margin:20px 0;\">",
        ctx.palette.border
    );
    RULE_RE.replace_all(input, hr.as_str()).into_owned()
}

fn wrap_unless_link_target(re: &Regex, input: &str, open: &str, close: &str) -> String {
    re.replace_all(input, |caps: &Captures| {
        if caps.get(1).is_some() {
            caps[0].to_string()
        } else {
            format!("{}{}{}", open, &caps[2], close)
        }
    })
    .into_owned()
}

pub(crate) fn emphasis(input: &str, ctx: &mut RenderContext<'_>) -> String {
    let text = ctx.palette.text;
    let strong = format!("<strong style=\"color:{};font-weight:700;\">", text);
    let em = format!("<em style=\"color:{};\">", text);

    let html = wrap_unless_link_target(&STRONG_STAR_RE, input, &strong, "</strong>");
    let html = wrap_unless_link_target(&STRONG_UNDERSCORE_RE, &html, &strong, "</strong>");
    let html = wrap_unless_link_target(&EM_STAR_RE, &html, &em, "</em>");
    wrap_unless_link_target(&EM_UNDERSCORE_RE, &html, &em, "</em>")
}

/// `[text](url)` to a clickable span. The view decides what a click does, see
/// [`super::links::classify_link`].
pub(crate) fn links(input: &str, ctx: &mut RenderContext<'_>) -> String {
    let color = ctx.tone("#64B5F6", "#2196F3");
    LINK_RE
        .replace_all(input, |caps: &Captures| {
            format!(
                "<span class=\"md-link\" data-href=\"{}\" style=\"color:{};cursor:pointer;\
                 text-decoration:none;font-weight:500;word-break:break-word;\">{}</span>",
                escape_attr(&caps[2]),
                color,
                &caps[1]
            )
        })
        .into_owned()
}

fn is_block_line(line: &str) -> bool {
    const BLOCK_TAGS: [&str; 6] = ["<h1", "<h2", "<h3", "<table", "<hr", "<pre"];
    line.starts_with(BLOCK_OPEN) || BLOCK_TAGS.iter().any(|tag| line.starts_with(tag))
}

fn push_paragraph(segments: &mut Vec<String>, run: &mut Vec<&str>) {
    if run.iter().any(|line| !line.trim().is_empty()) {
        segments.push(format!("<p>{}</p>", run.join("\n")));
    }
    run.clear();
}

/// Wraps text runs in `<p>`; block-level lines stay bare.
pub(crate) fn paragraphs(input: &str, _ctx: &mut RenderContext<'_>) -> String {
    let mut blocks = Vec::new();
    for block in BLANK_LINES_RE.split(input) {
        let mut segments = Vec::new();
        let mut run = Vec::new();
        for line in block.lines() {
            if is_block_line(line) {
                push_paragraph(&mut segments, &mut run);
                segments.push(line.to_string());
            } else {
                run.push(line);
            }
        }
        push_paragraph(&mut segments, &mut run);

        if !segments.is_empty() {
            blocks.push(segments.join("\n"));
        }
    }
    blocks.join("\n")
}

/// Turns runs of `- x` lines inside a paragraph into a `<ul>`.
pub(crate) fn lists(input: &str, ctx: &mut RenderContext<'_>) -> String {
    let text = ctx.palette.text;
    let ul_open = format!(
        "<ul style=\"margin:10px 0;padding-left:20px;color:{};\">",
        text
    );
    let li_open = format!("<li style=\"color:{};\">", text);

    let html = PARAGRAPH_RE.replace_all(input, |caps: &Captures| {
        let mut segments: Vec<String> = Vec::new();
        let mut text_run: Vec<&str> = Vec::new();
        let mut items: Vec<&str> = Vec::new();

        for line in caps[1].split('\n') {
            match LIST_ITEM_RE.captures(line) {
                Some(item) => {
                    if !text_run.is_empty() {
                        segments.push(format!("<p>{}</p>", text_run.join("\n")));
                        text_run.clear();
                    }
                    items.push(item.get(1).map_or("", |m| m.as_str()));
                }
                None => {
                    if !items.is_empty() {
                        segments.push(list_html(&ul_open, &li_open, &items));
                        items.clear();
                    }
                    text_run.push(line);
                }
            }
        }
        if !text_run.is_empty() {
            segments.push(format!("<p>{}</p>", text_run.join("\n")));
        }
        if !items.is_empty() {
            segments.push(list_html(&ul_open, &li_open, &items));
        }
        segments.join("\n")
    });

    ADJACENT_LISTS_RE.replace_all(&html, "").into_owned()
}

fn list_html(ul_open: &str, li_open: &str, items: &[&str]) -> String {
    let mut html = ul_open.to_string();
    for item in items {
        html.push_str(li_open);
        html.push_str(item);
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}

/// Substitutes stashed code fragments back for their tokens.
pub(crate) fn restore(input: &str, ctx: &mut RenderContext<'_>) -> String {
    TOKEN_RE
        .replace_all(input, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| ctx.fragment(index))
                .unwrap_or_default()
                .to_string()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{INLINE_OPEN, TOKEN_CLOSE};
    use crate::theme::{ThemeName, DARK, LIGHT};

    fn light() -> RenderContext<'static> {
        RenderContext::new(&LIGHT, ThemeName::Light)
    }

    fn dark() -> RenderContext<'static> {
        RenderContext::new(&DARK, ThemeName::Dark)
    }

    #[test]
    fn test_fenced_code_escapes_and_stashes() {
        let mut ctx = light();
        let out = fenced_code("before\n```rust\nlet a = 1 < 2 && b;\n```\nafter", &mut ctx);

        assert_eq!(out, format!("before\n{}0{}\nafter", BLOCK_OPEN, TOKEN_CLOSE));
        let html = ctx.fragment(0).unwrap();
        assert!(html.contains("<code class=\"language-rust\">let a = 1 &lt; 2 &amp;&amp; b;\n</code>"));
        assert!(html.contains("background:#f5f5f5"));
    }

    #[test]
    fn test_fenced_code_defaults_to_text() {
        let mut ctx = dark();
        fenced_code("```\n<b>\n```", &mut ctx);
        let html = ctx.fragment(0).unwrap();
        assert!(html.contains("class=\"language-text\">&lt;b&gt;\n</code>"));
        assert!(html.contains("background:#0d0d0d"));
    }

    #[test]
    fn test_unterminated_fence_is_left_alone() {
        let mut ctx = light();
        let out = fenced_code("```rust\nfn main() {}", &mut ctx);
        assert_eq!(out, "```rust\nfn main() {}");
        assert!(ctx.fragment(0).is_none());
    }

    #[test]
    fn test_table_zebra_rows() {
        let mut ctx = light();
        let out = tables("| H |\n|---|\n| a |\n| b |\n| c |\n", &mut ctx);

        assert!(out.starts_with("<table "));
        assert!(out.ends_with("</table>\n"));
        let rows: Vec<&str> = out.split("<tr style=\"background:").skip(2).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("#fafafa"));
        assert!(rows[1].starts_with("transparent"));
        assert!(rows[2].starts_with("#fafafa"));
    }

    #[test]
    fn test_table_header_colors_follow_theme() {
        let mut ctx = dark();
        let out = tables("| H |\n|---|\n| a |", &mut ctx);
        assert!(out.contains("<tr style=\"background:#1a4d7f;\">"));
        assert!(out.contains("color:#ffffff;\">H</th>"));
    }

    #[test]
    fn test_table_without_dash_separator_stays_literal() {
        let mut ctx = light();
        let source = "| A | B |\n| x | y |\n| 1 | 2 |";
        assert_eq!(tables(source, &mut ctx), source);

        let colons_only = "| A |\n|:|\n| 1 |";
        assert_eq!(tables(colons_only, &mut ctx), colons_only);
    }

    #[test]
    fn test_table_drops_empty_cells() {
        let mut ctx = light();
        let out = tables("| A | B |\n|---|---|\n|  | 2 |", &mut ctx);
        assert_eq!(out.matches("<td").count(), 1);
        assert!(out.contains(">2</td>"));
    }

    #[test]
    fn test_table_alignment_separator() {
        let mut ctx = light();
        let out = tables("| A | B |\n| :--- | ---: |\n| 1 | 2 |", &mut ctx);
        assert_eq!(out.matches("<table").count(), 1);
    }

    #[test]
    fn test_inline_code_is_not_escaped() {
        let mut ctx = light();
        let out = inline_code("run `a<b` now", &mut ctx);
        assert_eq!(out, format!("run {}0{} now", INLINE_OPEN, TOKEN_CLOSE));
        assert!(ctx.fragment(0).unwrap().ends_with(">a<b</code>"));
    }

    #[test]
    fn test_inline_code_does_not_span_stashed_blocks() {
        let mut ctx = light();
        let fenced = fenced_code("Press the ` key\n\n```\nlet x = 1;\n```\n\nthen ` again", &mut ctx);
        let out = inline_code(&fenced, &mut ctx);

        assert_eq!(out, fenced);
        assert!(ctx.fragment(0).unwrap().contains("let x = 1;"));
        assert!(ctx.fragment(1).is_none());
    }

    #[test]
    fn test_headings_levels() {
        let mut ctx = light();
        let out = headings("# One\n## Two\n### Three\n#### Four\n#NoSpace", &mut ctx);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("<h1 ") && lines[0].contains("border-bottom:3px solid #2196F3"));
        assert!(lines[1].starts_with("<h2 ") && lines[1].contains("border-bottom:2px solid #e0e0e0"));
        assert!(lines[2].starts_with("<h3 ") && !lines[2].contains("border-bottom"));
        assert_eq!(lines[3], "#### Four");
        assert_eq!(lines[4], "#NoSpace");
    }

    #[test]
    fn test_heading_must_start_line() {
        let mut ctx = light();
        assert_eq!(headings("not # a heading", &mut ctx), "not # a heading");
    }

    #[test]
    fn test_rules() {
        let mut ctx = light();
        let out = rules("a\n---\n***\n___  \n--", &mut ctx);
        assert_eq!(out.matches("<hr ").count(), 3);
        assert!(out.ends_with("\n--"));
    }

    #[test]
    fn test_emphasis_variants() {
        let mut ctx = light();
        let out = emphasis("**a** __b__ *c* _d_", &mut ctx);
        assert_eq!(out.matches("<strong").count(), 2);
        assert_eq!(out.matches("<em").count(), 2);
        assert!(out.contains(">a</strong>"));
        assert!(out.contains(">d</em>"));
    }

    #[test]
    fn test_list_markers_are_not_emphasis() {
        let mut ctx = light();
        let source = "* one\n* two";
        assert_eq!(emphasis(source, &mut ctx), source);
    }

    #[test]
    fn test_emphasis_skips_link_targets() {
        let mut ctx = light();
        let source = "[x](http://a.com/some_path_here)";
        assert_eq!(emphasis(source, &mut ctx), source);
    }

    #[test]
    fn test_links_become_spans() {
        let mut ctx = light();
        let out = links("see [the \"docs\"](https://x.com/?a=1&b=\"2\")", &mut ctx);
        assert!(out.starts_with("see <span class=\"md-link\" "));
        assert!(out.contains("data-href=\"https://x.com/?a=1&amp;b=&quot;2&quot;\""));
        assert!(out.contains("color:#2196F3"));
        assert!(out.ends_with(">the \"docs\"</span>"));
        assert!(!out.contains("<a "));
    }

    #[test]
    fn test_paragraphs_split_blocks() {
        let mut ctx = light();
        let input = "<h1>T</h1>\ntext under\n\n\n\nnext";
        assert_eq!(
            paragraphs(input, &mut ctx),
            "<h1>T</h1>\n<p>text under</p>\n<p>next</p>"
        );
    }

    #[test]
    fn test_paragraphs_leave_block_tokens_bare() {
        let mut ctx = light();
        let block = format!("{}0{}", BLOCK_OPEN, TOKEN_CLOSE);
        let inline = format!("{}1{} is inline", INLINE_OPEN, TOKEN_CLOSE);
        let input = format!("{}\n\n{}", block, inline);

        assert_eq!(
            paragraphs(&input, &mut ctx),
            format!("{}\n<p>{}</p>", block, inline)
        );
    }

    #[test]
    fn test_lists_group_and_coalesce() {
        let mut ctx = light();
        let out = lists("<p>- a\n+ b\nmiddle\n* c</p>", &mut ctx);
        let segments: Vec<&str> = out.split('\n').collect();

        assert_eq!(segments.len(), 3);
        assert!(segments[0].starts_with("<ul "));
        assert_eq!(segments[0].matches("<li ").count(), 2);
        assert_eq!(segments[1], "<p>middle</p>");
        assert!(segments[2].starts_with("<ul "));
    }

    #[test]
    fn test_lists_coalesce_adjacent_paragraph_lists() {
        let mut ctx = light();
        let out = lists("<p>- a</p>\n<p>- b</p>", &mut ctx);
        assert_eq!(out.matches("<ul").count(), 1);
        assert_eq!(out.matches("<li ").count(), 2);
    }

    #[test]
    fn test_restore_substitutes_fragments() {
        let mut ctx = light();
        let token = ctx.stash_inline("<code>x</code>".to_string());
        let out = restore(&format!("<p>{} and {}</p>", token, token), &mut ctx);
        assert_eq!(out, "<p><code>x</code> and <code>x</code></p>");
    }

    #[test]
    fn test_restore_unknown_token_is_dropped() {
        let mut ctx = light();
        let out = restore(&format!("a{}9{}b", INLINE_OPEN, TOKEN_CLOSE), &mut ctx);
        assert_eq!(out, "ab");
    }
}
