//! HTML token stream and text extraction for domql.
//!
//! # Scope
//!
//! This crate implements:
//! - **Token stream** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - A forward-only view over [`html5gum`] tokens, reduced to the kinds
//!     text extraction cares about
//!   - Raw text handling for `script`, `style`, `title` and friends
//!
//! - **Text extraction**
//!   - Visible text of a fragment, one unescaped and trimmed line per text
//!     token
//!   - Script bodies skipped by tracking the last opened tag; self-closing
//!     tags are not remembered
//!
//! # Not Implemented
//!
//! - Tree construction (see `domql-dom`, which delegates to `scraper`)
//! - Nesting-aware script filtering: only the most recent start tag is
//!   remembered, so text after a nested non-script start tag inside a
//!   `script` element counts as visible

/// Visible-text extraction over a token stream.
pub mod text;
/// Token stream over an HTML fragment.
pub mod tokenizer;

pub use text::{ScanState, TextExtractor, extract_text};
pub use tokenizer::{Token, tokenize, unescape};
