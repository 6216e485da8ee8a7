use async_graphql::{Context, Object, Result};
use domql_common::Fetcher;

use crate::response::ResponseNode;

/// Root query type.
pub struct Query {
    version: String,
}

impl Query {
    /// Create the root with the version string it reports.
    #[must_use]
    pub const fn new(version: String) -> Self {
        Self { version }
    }
}

/// A GraphQL based HTML binding for arbitrary DOM selections.
#[Object]
impl Query {
    /// Connect a URL to fetch the root Document.
    async fn get(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "The URL to connect to.")] url: String,
    ) -> Result<Option<ResponseNode>> {
        let fetcher = ctx.data::<Fetcher>()?;
        let page = fetcher.fetch(&url).await?;
        tracing::debug!(url = %url, status = page.status_code, "resolved document");

        Ok(Some(ResponseNode::new(url, page)))
    }

    /// The version of this service.
    async fn version(&self) -> &str {
        &self.version
    }
}
