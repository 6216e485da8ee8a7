//! Parsed HTML documents and the selection algebra for domql.
//!
//! A [`Document`] owns one parsed tree. Every [`Selection`] taken from it
//! shares that tree and holds only node ids, so selections are cheap to
//! clone and can be refined recursively:
//!
//! ```
//! use domql_dom::Document;
//!
//! let doc = Document::parse(r#"<ul><li><a href="/a">A</a></li><li>B</li></ul>"#);
//! let items = doc.select("li").unwrap();
//! assert_eq!(items.len(), 2);
//! assert_eq!(items.scope("a").unwrap().attr("href").as_deref(), Some("/a"));
//! ```
//!
//! # Design
//!
//! Parsing and selector matching are delegated to [`scraper`]. The parsed
//! tree is `Send` but not `Sync`, so it lives behind a mutex; each
//! operation locks it for one synchronous pass and returns owned data.
//!
//! Selection semantics follow the jQuery family:
//! - `find` searches descendants only, never the nodes themselves
//! - value accessors (`attr`, `inner_html`, `text`) read the first node
//! - an empty selection yields empty values, not errors

mod document;
mod error;
mod selection;

pub use document::Document;
pub use error::{SelectorError, parse_selector};
pub use selection::Selection;
