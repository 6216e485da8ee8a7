//! GraphQL schema for domql.
//!
//! # Scope
//!
//! The schema maps the selection algebra of `domql-dom` onto GraphQL:
//!
//! ```graphql
//! {
//!   get(url: "https://blog.golang.org/index") {
//!     statusCode
//!     document {
//!       title
//!       select(selector: ".blogtitle") {
//!         elements {
//!           title: text(selector: "a")
//!           link: attr(selector: "a", key: "href")
//!         }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! - **Query** - `get` fetches a document, `version` reports the service
//! - **Response** - status line, content type and the parsed document
//! - **Document** - `location`, `title`, and `select` into elements
//! - **Elements** / **Element** - `attr`, `html`, `text`, `select`, and
//!   (on `Elements`) `elements` to iterate the selection
//!
//! # Errors and nulls
//!
//! Fetch failures, invalid selectors and a missing `attr` key are field
//! errors: the field resolves to `null` and the message is reported in the
//! response's `errors`. Empty selections are not errors; their values are
//! empty strings.

mod document;
mod elements;
mod query;
mod response;

pub use document::DocumentNode;
pub use elements::{ElementNode, ElementsNode};
pub use query::Query;
pub use response::ResponseNode;

use async_graphql::{EmptyMutation, EmptySubscription, Schema};
use domql_common::Fetcher;

/// The executable domql schema.
pub type DomqlSchema = Schema<Query, EmptyMutation, EmptySubscription>;

/// Inputs for [`build_schema`].
#[derive(Debug, Clone)]
pub struct SchemaConfig {
    /// Reported by the `version` field.
    pub version: String,
    /// Used by `get` to load documents.
    pub fetcher: Fetcher,
}

/// Build the schema.
#[must_use]
pub fn build_schema(config: SchemaConfig) -> DomqlSchema {
    Schema::build(
        Query::new(config.version),
        EmptyMutation,
        EmptySubscription,
    )
    .data(config.fetcher)
    .finish()
}
