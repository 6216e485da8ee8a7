use std::fmt;
use std::sync::{Arc, Mutex};

use scraper::Html;

use crate::error::{SelectorError, parse_selector};
use crate::selection::{Selection, with_html};

/// Selector for the document title.
///
/// [§ 4.2.2 The title element](https://html.spec.whatwg.org/multipage/semantics.html#the-title-element)
const TITLE_SELECTOR: &str = "head title";

/// A parsed HTML document, the root for selections.
#[derive(Clone)]
pub struct Document {
    tree: Arc<Mutex<Html>>,
}

impl Document {
    /// Parse markup as a full HTML document.
    ///
    /// Parsing never fails: malformed markup is recovered the way browsers
    /// do, and missing `html`/`head`/`body` elements are synthesized.
    #[must_use]
    pub fn parse(markup: &str) -> Self {
        Self {
            tree: Arc::new(Mutex::new(Html::parse_document(markup))),
        }
    }

    /// Text of the `<title>` inside `<head>`, trimmed.
    ///
    /// When several match, their texts are concatenated before trimming.
    #[must_use]
    pub fn title(&self) -> String {
        let Ok(selector) = parse_selector(TITLE_SELECTOR) else {
            return String::new();
        };

        with_html(&self.tree, |html| {
            html.select(&selector)
                .flat_map(|title| title.text())
                .collect::<String>()
                .trim()
                .to_string()
        })
    }

    /// Select every element in the document matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] if `selector` does not parse.
    pub fn select(&self, selector: &str) -> Result<Selection, SelectorError> {
        self.root().find(selector)
    }

    /// Selection holding only the document node.
    fn root(&self) -> Selection {
        let root = with_html(&self.tree, |html| html.tree.root().id());
        Selection::new(Arc::clone(&self.tree), vec![root])
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}
