use async_graphql::{Object, Result};
use domql_dom::Selection;

/// Every selected element as a group.
pub struct ElementsNode {
    selection: Selection,
}

/// One element of an [`ElementsNode`].
pub struct ElementNode {
    selection: Selection,
}

impl From<Selection> for ElementsNode {
    fn from(selection: Selection) -> Self {
        Self { selection }
    }
}

impl From<Selection> for ElementNode {
    fn from(selection: Selection) -> Self {
        Self { selection }
    }
}

/// HTML elements.
#[Object(name = "Elements")]
impl ElementsNode {
    /// Attribute value of the selection.
    async fn attr(
        &self,
        #[graphql(
            desc = "CSS selector, see: https://developer.mozilla.org/en-US/docs/Web/CSS/CSS_selectors"
        )]
        selector: Option<String>,
        #[graphql(desc = "Key of the attribute value.")] key: Option<String>,
    ) -> Result<String> {
        attr(&self.selection, selector.as_deref(), key.as_deref())
    }

    /// Inner HTML of the selection as text.
    async fn html(
        &self,
        #[graphql(
            desc = "CSS selector, see: https://developer.mozilla.org/en-US/docs/Web/CSS/CSS_selectors"
        )]
        selector: Option<String>,
    ) -> Result<String> {
        html(&self.selection, selector.as_deref())
    }

    /// Concatenated text.
    async fn text(
        &self,
        #[graphql(
            desc = "CSS selector, see: https://developer.mozilla.org/en-US/docs/Web/CSS/CSS_selectors"
        )]
        selector: Option<String>,
    ) -> Result<String> {
        text(&self.selection, selector.as_deref())
    }

    /// Select elements.
    async fn select(
        &self,
        #[graphql(
            desc = "CSS selector, see: https://developer.mozilla.org/en-US/docs/Web/CSS/CSS_selectors"
        )]
        selector: String,
    ) -> Result<Option<ElementsNode>> {
        select(&self.selection, &selector)
    }

    /// List all selected elements.
    async fn elements(
        &self,
        #[graphql(
            desc = "CSS selector, see: https://developer.mozilla.org/en-US/docs/Web/CSS/CSS_selectors"
        )]
        selector: Option<String>,
    ) -> Result<Option<Vec<ElementNode>>> {
        let elements = self
            .selection
            .elements(selector.as_deref().unwrap_or_default())?;
        Ok(Some(elements.into_iter().map(ElementNode::from).collect()))
    }
}

/// HTML element.
#[Object(name = "Element")]
impl ElementNode {
    /// Attribute value of the selection.
    async fn attr(
        &self,
        #[graphql(
            desc = "CSS selector, see: https://developer.mozilla.org/en-US/docs/Web/CSS/CSS_selectors"
        )]
        selector: Option<String>,
        #[graphql(desc = "Key of the attribute value.")] key: Option<String>,
    ) -> Result<String> {
        attr(&self.selection, selector.as_deref(), key.as_deref())
    }

    /// Inner HTML of the selection as text.
    async fn html(
        &self,
        #[graphql(
            desc = "CSS selector, see: https://developer.mozilla.org/en-US/docs/Web/CSS/CSS_selectors"
        )]
        selector: Option<String>,
    ) -> Result<String> {
        html(&self.selection, selector.as_deref())
    }

    /// Concatenated text.
    async fn text(
        &self,
        #[graphql(
            desc = "CSS selector, see: https://developer.mozilla.org/en-US/docs/Web/CSS/CSS_selectors"
        )]
        selector: Option<String>,
    ) -> Result<String> {
        text(&self.selection, selector.as_deref())
    }

    /// Select elements.
    async fn select(
        &self,
        #[graphql(
            desc = "CSS selector, see: https://developer.mozilla.org/en-US/docs/Web/CSS/CSS_selectors"
        )]
        selector: String,
    ) -> Result<Option<ElementsNode>> {
        select(&self.selection, &selector)
    }
}

// Field bodies shared by `Elements` and `Element`. An absent selector
// means the selection itself.

fn attr(selection: &Selection, selector: Option<&str>, key: Option<&str>) -> Result<String> {
    let key = key.ok_or("missing key param")?;
    let scoped = selection.scope(selector.unwrap_or_default())?;
    Ok(scoped.attr(key).unwrap_or_default())
}

fn html(selection: &Selection, selector: Option<&str>) -> Result<String> {
    Ok(selection.scope(selector.unwrap_or_default())?.inner_html())
}

fn text(selection: &Selection, selector: Option<&str>) -> Result<String> {
    Ok(selection.scope(selector.unwrap_or_default())?.text())
}

fn select(selection: &Selection, selector: &str) -> Result<Option<ElementsNode>> {
    Ok(Some(selection.find(selector)?.into()))
}
