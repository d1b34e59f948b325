//! # CLI Layer
//!
//! This module is **one possible UI client** for mdnotes, not the application itself.
//!
//! The CLI layer is the **only** place that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Handles argument parsing
//! - Installs the tracing subscriber
//! - Formats output for human consumption

mod commands;
mod render;
mod setup;

pub use commands::run;
