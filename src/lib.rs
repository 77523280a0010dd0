//! # wc-translate
//!
//! Streaming working-copy translation layer: EOL normalization, keyword
//! substitution, special-file (symlink) detranslation, and atomic file
//! installation.
//!
//! ## Module structure
//!
//! ```text
//! translate → streaming engine (component E) and its string wrappers (I)
//!   ↓
//! keyword   → value rendering (A), alias table (B), token rewriter (C),
//!             equality (H)
//!   ↓
//! eol       → EOL detection and consistency state (D)
//!
//! special   → symlink detranslation/recreation (F), built on install
//! install   → atomic stage-then-rename file installer (G)
//! encoding  → the `Encoding` hook used by translate::string (I)
//! listing   → external directory-listing callback interface (§6)
//! error     → the crate's single `TranslateError` type
//! ```
//!
//! CLI parsing and localization are out of scope for this crate; it is a
//! library meant to sit underneath a working-copy client.

/// The crate's single error type and `Result` alias.
pub mod error;

/// EOL detection and cross-call consistency tracking.
pub mod eol;

/// Keyword value rendering, alias table, token rewriting, and equality.
pub mod keyword;

/// Text/binary encoding hook used by the string-level translate wrappers.
pub mod encoding;

/// The streaming translation engine and its in-memory wrappers.
pub mod translate;

/// Symbolic-link special-file detranslation and recreation.
pub mod special;

/// Atomic stage-then-rename file installer.
pub mod install;

/// External directory-listing callback interface.
pub mod listing;

pub use error::{Result, TranslateError};
pub use eol::{Eol, EolState};
pub use translate::{detranslate_string, translate, translate_cstring, translate_string_to_canonical, TranslateOptions};
