//! # Command Layer
//!
//! This module contains the **core business logic** of mdnotes. Each area lives in
//! its own submodule and implements plain Rust functions over a [`DataStore`].
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Implement the actual logic for each operation
//! - Operate on `Document`, `Folder`, `DocumentVersion` and the favorites set
//! - Return domain values (`Option` for lookups that may miss)
//! - Are completely UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O** beyond the store: no stdout, no terminal concerns
//! - **Change notification**: the API façade decides who hears about a write
//! - **Reading the clock**: operations that stamp times take `now` explicitly,
//!   which keeps them deterministic under test
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests use
//! `InMemoryStore` and cover every branch, including missing ids.
//!
//! ## Command Modules
//!
//! - [`documents`]: Create, save, delete and file documents
//! - [`folders`]: Flat folders and the folder-deletion cascade
//! - [`versions`]: The append-only version log
//! - [`favorites`]: The favorites id set
//! - [`preferences`]: Persisted theme preference
//!
//! [`DataStore`]: crate::store::DataStore

pub mod documents;
pub mod favorites;
pub mod folders;
pub mod preferences;
pub mod versions;
