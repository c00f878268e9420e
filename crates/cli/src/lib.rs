//! Library interface for the copyqn CLI
//!
//! This module exposes the copy action and clipboard providers for
//! integration testing while keeping argument handling in main.rs.

pub mod action;
pub mod clipboard;

// Re-export commonly needed types for tests
pub use action::{copy_qualified_name, list_declarations, resolve_path, Outcome};
pub use anyhow::Result;
pub use clipboard::{open_clipboard, Clipboard, CommandClipboard, StdoutClipboard};
pub use copyqn_core::config::Config;
