//! # Markdown Preview Renderer
//!
//! Converts note content to themed HTML with inline styles, for display in a
//! preview pane. It is a small regex-driven renderer, not a CommonMark
//! implementation.
//!
//! ## Pipeline
//!
//! Rendering runs the stages of [`PIPELINE`] in order, each taking the whole
//! document text and returning the rewritten text:
//!
//! | # | Stage | Input | Output |
//! |---|-------|-------|--------|
//! | 1 | `fenced_code` | ```` ```lang ```` blocks | escaped `<pre><code>`, stashed |
//! | 2 | `tables` | header, dash separator, body rows | one-line `<table>` |
//! | 3 | `inline_code` | `` `x` `` | `<code>`, stashed, not escaped |
//! | 4 | `headings` | `#`, `##`, `###` lines | `<h1>`..`<h3>` |
//! | 5 | `rules` | `---`, `***`, `___` lines | `<hr>` |
//! | 6 | `emphasis` | `**x**`, `__x__`, `*x*`, `_x_` | `<strong>`, `<em>` |
//! | 7 | `links` | `[text](url)` | `<span class="md-link" data-href>` |
//! | 8 | `paragraphs` | blank-line separated blocks | `<p>` around text runs |
//! | 9 | `lists` | `- x`, `* x`, `+ x` runs inside `<p>` | `<ul><li>` |
//! | 10 | `restore` | placeholders | stashed code fragments |
//!
//! ## Placeholders
//!
//! Code is rendered first and then stashed in the [`RenderContext`]: its text is
//! replaced by a token built from private-use characters, so later stages cannot
//! match markdown syntax inside code. Those characters are stripped from the
//! input before the pipeline starts. Block tokens (fenced code) and inline tokens
//! use different opening characters so the paragraph stage can tell them apart.
//!
//! ## Caveats
//!
//! - Raw HTML in the input passes through unescaped outside code.
//! - Inline code content is not escaped.
//! - Nested or overlapping emphasis markers produce whatever the leftmost match
//!   yields; `***x***` is not special-cased.
//! - Empty table cells are dropped, which shifts later cells left.

use crate::theme::{palette, Palette, ThemeName};

pub mod links;
mod stages;

pub(crate) const BLOCK_OPEN: char = '\u{E000}';
pub(crate) const INLINE_OPEN: char = '\u{E002}';
pub(crate) const TOKEN_CLOSE: char = '\u{E001}';

/// State shared by the stages of one render call.
pub struct RenderContext<'a> {
    pub palette: &'a Palette,
    pub theme: ThemeName,
    fragments: Vec<String>,
}

impl<'a> RenderContext<'a> {
    pub fn new(palette: &'a Palette, theme: ThemeName) -> Self {
        Self {
            palette,
            theme,
            fragments: Vec::new(),
        }
    }

    /// Picks the dark or light variant of a color that has no palette entry.
    pub(crate) fn tone(&self, dark: &'static str, light: &'static str) -> &'static str {
        if self.theme.is_dark() {
            dark
        } else {
            light
        }
    }

    fn stash(&mut self, open: char, html: String) -> String {
        let token = format!("{}{}{}", open, self.fragments.len(), TOKEN_CLOSE);
        self.fragments.push(html);
        token
    }

    pub(crate) fn stash_block(&mut self, html: String) -> String {
        self.stash(BLOCK_OPEN, html)
    }

    pub(crate) fn stash_inline(&mut self, html: String) -> String {
        self.stash(INLINE_OPEN, html)
    }

    pub(crate) fn fragment(&self, index: usize) -> Option<&str> {
        self.fragments.get(index).map(String::as_str)
    }
}

/// A named step of the renderer.
pub struct Stage {
    pub name: &'static str,
    pub apply: fn(&str, &mut RenderContext<'_>) -> String,
}

pub const PIPELINE: &[Stage] = &[
    Stage {
        name: "fenced_code",
        apply: stages::fenced_code,
    },
    Stage {
        name: "tables",
        apply: stages::tables,
    },
    Stage {
        name: "inline_code",
        apply: stages::inline_code,
    },
    Stage {
        name: "headings",
        apply: stages::headings,
    },
    Stage {
        name: "rules",
        apply: stages::rules,
    },
    Stage {
        name: "emphasis",
        apply: stages::emphasis,
    },
    Stage {
        name: "links",
        apply: stages::links,
    },
    Stage {
        name: "paragraphs",
        apply: stages::paragraphs,
    },
    Stage {
        name: "lists",
        apply: stages::lists,
    },
    Stage {
        name: "restore",
        apply: stages::restore,
    },
];

/// Renders `markdown` to styled HTML. Pure: the same input always gives the
/// same output.
pub fn render(markdown: &str, palette: &Palette, theme: ThemeName) -> String {
    let mut ctx = RenderContext::new(palette, theme);
    let mut html: String = markdown
        .replace("\r\n", "\n")
        .replace(|c: char| matches!(c, BLOCK_OPEN | INLINE_OPEN | TOKEN_CLOSE), "");

    for stage in PIPELINE {
        html = (stage.apply)(&html, &mut ctx);
    }
    html
}

/// [`render`] with the built-in palette of `theme`.
pub fn render_with_theme(markdown: &str, theme: ThemeName) -> String {
    render(markdown, palette(theme), theme)
}
