use async_graphql::{Object, Result};
use domql_dom::Document;

use crate::elements::ElementsNode;

/// A parsed document and the URL it was loaded from.
pub struct DocumentNode {
    document: Document,
    location: String,
}

impl DocumentNode {
    /// Wrap a parsed document.
    #[must_use]
    pub const fn new(document: Document, location: String) -> Self {
        Self { document, location }
    }
}

/// HTML document as the root for selections.
#[Object(name = "Document")]
impl DocumentNode {
    /// URL of this Document.
    async fn location(&self) -> &str {
        &self.location
    }

    /// Text of the DOM title element.
    async fn title(&self) -> String {
        self.document.title()
    }

    /// Select elements.
    async fn select(
        &self,
        #[graphql(
            desc = "CSS selector, see: https://developer.mozilla.org/en-US/docs/Web/CSS/CSS_selectors"
        )]
        selector: String,
    ) -> Result<Option<ElementsNode>> {
        Ok(Some(self.document.select(&selector)?.into()))
    }
}
