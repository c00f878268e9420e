//! Core types for copyqn
//!
//! This crate provides the host-independent pieces of the copy qualified
//! name command:
//!
//! - **Elements**: the closed set of program elements a front-end can report
//! - **Resolver**: turns an element, or a file's declarations, into a name
//! - **Caret**: editor positions and their byte offsets
//! - **Configuration**: clipboard and output settings
//! - **Error handling**: Unified error types

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod caret;
pub mod config;
pub mod element;
pub mod error;
pub mod resolver;

// Re-export main types for convenience
pub use caret::Caret;
pub use config::{ClipboardConfig, Config, OutputConfig};
pub use element::{CandidateDeclaration, ElementKind, SourceElement, TypeRef};
pub use error::{Error, Result, ResultExt};
pub use resolver::{
    resolve, resolve_for_element, resolve_for_file, Resolution, ResolutionOrigin,
};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
