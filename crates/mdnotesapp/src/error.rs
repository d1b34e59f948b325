use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotesError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Version not found: {0}")]
    VersionNotFound(String),

    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Invalid theme '{0}' (expected 'light' or 'dark')")]
    InvalidTheme(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, NotesError>;
