//! Terminal formatting for command results.
//!
//! Every function here returns a `String` so the dispatch layer decides where
//! it goes; nothing in this module touches stdout.

use chrono::{DateTime, Utc};
use console::Style;
use mdnotesapp::api::{DocumentStats, VersionComparison};
use mdnotesapp::model::{Document, DocumentVersion, Folder};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const ID_WIDTH: usize = 8;
const FAVORITE_MARK: &str = "★";

fn dim() -> Style {
    Style::new().dim()
}

fn title_style() -> Style {
    Style::new().bold()
}

fn accent() -> Style {
    Style::new().cyan()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

fn short_id(id: &str) -> &str {
    id.get(..ID_WIDTH).unwrap_or(id)
}

/// One line per document: short id, favorite mark, title, folder name and age.
pub fn document_list(
    documents: &[Document],
    favorites: &[String],
    folders: &[Folder],
    now: DateTime<Utc>,
) -> String {
    if documents.is_empty() {
        return format!("{}\n", dim().apply_to("No documents yet."));
    }

    let mut output = String::new();
    for doc in documents {
        let mark = if favorites.contains(&doc.id) {
            FAVORITE_MARK
        } else {
            " "
        };
        let folder = doc
            .folder_id
            .as_deref()
            .and_then(|id| folders.iter().find(|f| f.id == id))
            .map(|f| format!("[{}] ", f.name))
            .unwrap_or_default();

        let fixed = ID_WIDTH + 1 + 2 + folder.width() + TIME_WIDTH + 1;
        let title_width = LINE_WIDTH.saturating_sub(fixed);
        let title = pad_to_width(&truncate_to_width(&doc.title, title_width), title_width);

        output.push_str(&format!(
            "{} {} {}{} {}\n",
            dim().apply_to(short_id(&doc.id)),
            accent().apply_to(mark),
            accent().apply_to(folder),
            title_style().apply_to(title),
            dim().apply_to(format_time_ago(doc.updated_at, now)),
        ));
    }
    output
}

/// Folders with their document counts.
pub fn folder_list(folders: &[(Folder, usize)]) -> String {
    if folders.is_empty() {
        return format!("{}\n", dim().apply_to("No folders yet."));
    }

    folders
        .iter()
        .map(|(folder, count)| {
            let noun = if *count == 1 { "document" } else { "documents" };
            format!(
                "{} {} {}\n",
                dim().apply_to(short_id(&folder.id)),
                title_style().apply_to(&folder.name),
                dim().apply_to(format!("({} {})", count, noun)),
            )
        })
        .collect()
}

/// Versions as given (callers pass them newest first).
pub fn version_list(versions: &[DocumentVersion], now: DateTime<Utc>) -> String {
    if versions.is_empty() {
        return format!("{}\n", dim().apply_to("No versions recorded."));
    }

    let mut output = String::new();
    for version in versions {
        let changelog = version.changelog.as_deref().unwrap_or("");
        output.push_str(&format!(
            "{} {} {} {} {}\n",
            accent().apply_to(format!("v{:<3}", version.version_number)),
            dim().apply_to(&version.id),
            dim().apply_to(format_time_ago(version.created_at, now)),
            title_style().apply_to(&version.title),
            changelog,
        ));
    }
    output
}

pub fn stats(stats: &DocumentStats) -> String {
    let mut output = format!(
        "{} {}\n",
        title_style().apply_to("Versions:"),
        stats.total_versions
    );
    if let Some(last) = stats.last_modified {
        output.push_str(&format!(
            "{} {}\n",
            title_style().apply_to("Last version:"),
            last.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    for summary in &stats.version_history {
        output.push_str(&format!(
            "  {} {} {}{}\n",
            accent().apply_to(format!("v{}", summary.number)),
            dim().apply_to(summary.date.format("%Y-%m-%d %H:%M")),
            summary.title,
            summary
                .changelog
                .as_deref()
                .map(|c| format!(" ({})", c))
                .unwrap_or_default(),
        ));
    }
    output
}

/// Both contents one after the other under version headers.
pub fn comparison(comparison: &VersionComparison) -> String {
    let header = |version: &DocumentVersion| {
        format!(
            "{}\n",
            accent().apply_to(format!(
                "--- v{} \"{}\" ({})",
                version.version_number,
                version.title,
                version.created_at.format("%Y-%m-%d %H:%M")
            ))
        )
    };

    let mut output = header(&comparison.version1);
    output.push_str(&comparison.content_diff.from);
    output.push('\n');
    output.push_str(&header(&comparison.version2));
    output.push_str(&comparison.content_diff.to);
    output.push('\n');
    output
}

pub fn success(message: &str) -> String {
    format!("{}\n", Style::new().green().apply_to(message))
}
