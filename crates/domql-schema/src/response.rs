use async_graphql::Object;
use domql_common::FetchedPage;
use domql_dom::Document;

use crate::document::DocumentNode;

/// A fetched page: response metadata plus the parsed document.
pub struct ResponseNode {
    status_code: u16,
    status_message: String,
    content_type: String,
    document: DocumentNode,
}

impl ResponseNode {
    /// Parse the page body and wrap it with the metadata of its response.
    #[must_use]
    pub fn new(location: String, page: FetchedPage) -> Self {
        Self {
            status_code: page.status_code,
            status_message: page.status_message,
            content_type: page.content_type,
            document: DocumentNode::new(Document::parse(&page.body), location),
        }
    }
}

/// HTTP response.
#[Object(name = "Response")]
impl ResponseNode {
    /// HTTP status code.
    async fn status_code(&self) -> i32 {
        i32::from(self.status_code)
    }

    /// HTTP status message.
    async fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Content type.
    async fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Get the DOM for selections.
    async fn document(&self) -> Option<&DocumentNode> {
        Some(&self.document)
    }
}
