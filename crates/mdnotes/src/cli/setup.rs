use clap::{Parser, Subcommand, ValueEnum};
use mdnotesapp::theme::ThemeName;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mdnotes", bin_name = "mdnotes", version, disable_help_subcommand = true)]
#[command(about = "Markdown notes with folders, favorites and version history", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the notes data (overrides config and MDNOTES_DATA_DIR)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Config file to load instead of the default location
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for ThemeName {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => ThemeName::Light,
            ThemeArg::Dark => ThemeName::Dark,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Light,
    Dark,
    Toggle,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new document
    #[command(alias = "n", display_order = 1)]
    New {
        /// Folder id or name to file the document in
        #[arg(long)]
        folder: Option<String>,

        /// Cover image reference (e.g. a data URI)
        #[arg(long)]
        cover: Option<String>,

        /// Title words (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// List documents, most recently edited first
    #[command(alias = "ls", display_order = 2)]
    List {
        /// Only documents in this folder (id or name)
        #[arg(long, conflicts_with_all = ["root", "favorites"])]
        folder: Option<String>,

        /// Only documents outside any folder
        #[arg(long, conflicts_with = "favorites")]
        root: bool,

        /// Only favorite documents
        #[arg(long)]
        favorites: bool,
    },

    /// Print a document's markdown
    #[command(alias = "v", display_order = 3)]
    Show {
        /// Document id or title slug
        reference: String,
    },

    /// Print a document as themed HTML
    #[command(display_order = 4)]
    Render {
        /// Document id or title slug
        reference: String,

        /// Theme to render with (defaults to the saved preference)
        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,
    },

    /// Replace a document's content from FILE or stdin and record a version
    #[command(display_order = 5)]
    Save {
        /// Document id or title slug
        reference: String,

        /// Read content from this file instead of stdin
        file: Option<PathBuf>,
    },

    /// Change a document's title
    #[command(display_order = 6)]
    Rename {
        /// Document id or title slug
        reference: String,

        /// New title words
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Delete a document and its version history
    #[command(alias = "rm", display_order = 7)]
    Delete {
        /// Document id or title slug
        reference: String,
    },

    /// Move a document into a folder, or back to the root when FOLDER is omitted
    #[command(alias = "mv", display_order = 8)]
    Move {
        /// Document id or title slug
        reference: String,

        /// Folder id or name
        folder: Option<String>,
    },

    /// Toggle a document's favorite flag
    #[command(display_order = 9)]
    Fav {
        /// Document id or title slug
        reference: String,
    },

    /// Manage folders
    #[command(display_order = 10)]
    Folder {
        #[command(subcommand)]
        action: FolderCommands,
    },

    /// List a document's versions, newest first
    #[command(display_order = 20)]
    Versions {
        /// Document id or title slug
        reference: String,
    },

    /// Restore a version onto its document
    #[command(display_order = 21)]
    Restore {
        /// Version id
        version_id: String,
    },

    /// Delete all but the newest versions of a document
    #[command(display_order = 22)]
    Prune {
        /// Document id or title slug
        reference: String,

        /// How many versions to keep (defaults to version_keep_count)
        #[arg(long)]
        keep: Option<usize>,
    },

    /// Export a document's version history as JSON
    #[command(display_order = 23)]
    History {
        /// Document id or title slug
        reference: String,
    },

    /// Show version statistics for a document
    #[command(display_order = 24)]
    Stats {
        /// Document id or title slug
        reference: String,
    },

    /// Show two versions side by side
    #[command(display_order = 25)]
    Diff {
        /// Older version id
        from: String,

        /// Newer version id
        to: String,
    },

    /// Show or change the theme preference
    #[command(display_order = 30)]
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },

    /// Print the URL slug for a title
    #[command(display_order = 31)]
    Slug {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FolderCommands {
    /// Create a folder
    New {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// List folders with their document counts
    #[command(alias = "ls")]
    List,

    /// Rename a folder
    Rename {
        /// Folder id or name
        folder: String,

        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Delete a folder; its documents move to the root
    #[command(alias = "rm")]
    Delete {
        /// Folder id or name
        folder: String,
    },
}
