//! # mdnotes Architecture
//!
//! mdnotes is a **UI-agnostic markdown notes library**: documents, flat folders,
//! favorites, a per-document version log, and a themed HTML preview renderer.
//! The `mdnotes` binary is one client of it; nothing in here knows about a terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (the mdnotes CLI, or any other UI)                  │
//! │  - Parses input, formats output, owns the event loop        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs, autosave.rs)                            │
//! │  - Thin facade over commands, reads the clock               │
//! │  - Notifies subscribers after document/folder mutations     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic over a DataStore                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait over a raw key/value StorageBackend      │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Beside the layers sit pure helpers with no storage at all: [`markdown`]
//! (content to HTML), [`slug`] (URL fragments) and [`theme`] (palettes).
//!
//! ## Threading
//!
//! Everything is single-threaded and synchronous. Version numbers are allocated
//! by reading the log and writing it back, so one store must have one writer.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: thorough unit tests against `InMemoryStore`.
//! 2. **API**: dispatch, notification and composed-flow tests.
//! 3. **Renderer**: one fixture per pipeline stage plus end-to-end cases.
//! 4. **Integration** (`tests/`): the file store on a temp dir, and the CLI binary.

pub mod api;
pub mod autosave;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod markdown;
pub mod model;
pub mod slug;
pub mod store;
pub mod theme;
