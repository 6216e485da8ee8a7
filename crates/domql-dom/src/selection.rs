use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use domql_html::extract_text;
use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

use crate::error::{SelectorError, parse_selector};

/// Run `f` against the locked tree.
///
/// The tree is never mutated after parsing, so a poisoned lock still guards
/// a consistent value and is recovered rather than reported.
pub(crate) fn with_html<R>(tree: &Mutex<Html>, f: impl FnOnce(&Html) -> R) -> R {
    let html = tree.lock().unwrap_or_else(PoisonError::into_inner);
    f(&html)
}

/// An ordered, duplicate-free set of nodes in one parsed document.
#[derive(Clone)]
pub struct Selection {
    tree: Arc<Mutex<Html>>,
    nodes: Vec<NodeId>,
}

impl Selection {
    pub(crate) const fn new(tree: Arc<Mutex<Html>>, nodes: Vec<NodeId>) -> Self {
        Self { tree, nodes }
    }

    /// Number of selected nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Descendants of the selected nodes matching `selector`.
    ///
    /// Results are deduplicated and kept in first-seen order: all matches
    /// under the first node in document order, then new matches under the
    /// second, and so on. The selected nodes themselves are never included.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] if `selector` does not parse.
    pub fn find(&self, selector: &str) -> Result<Self, SelectorError> {
        let selector = parse_selector(selector)?;
        let nodes = with_html(&self.tree, |html| {
            let mut seen = HashSet::new();
            let mut found = Vec::new();
            for element in self.descendants(html) {
                if selector.matches(&element) && seen.insert(element.id()) {
                    found.push(element.id());
                }
            }
            found
        });

        Ok(Self::new(Arc::clone(&self.tree), nodes))
    }

    /// The selection itself when `selector` is empty, otherwise
    /// [`find`](Self::find).
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] if a non-empty `selector` does not parse.
    pub fn scope(&self, selector: &str) -> Result<Self, SelectorError> {
        if selector.is_empty() {
            Ok(self.clone())
        } else {
            self.find(selector)
        }
    }

    /// Value of attribute `key` on the first selected element.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<String> {
        with_html(&self.tree, |html| {
            self.first_element(html)
                .and_then(|element| element.value().attr(key))
                .map(str::to_string)
        })
    }

    /// Inner markup of the first selected element, trimmed.
    ///
    /// Empty for an empty selection.
    #[must_use]
    pub fn inner_html(&self) -> String {
        self.raw_inner_html().trim().to_string()
    }

    /// Visible text of the first selected element.
    ///
    /// See [`domql_html::extract_text`] for how text is collected.
    #[must_use]
    pub fn text(&self) -> String {
        extract_text(&self.raw_inner_html())
    }

    /// Whether any selected element matches `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] if `selector` does not parse.
    pub fn is(&self, selector: &str) -> Result<bool, SelectorError> {
        let selector = parse_selector(selector)?;
        Ok(with_html(&self.tree, |html| {
            self.elements_in(html)
                .any(|element| selector.matches(&element))
        }))
    }

    /// Whether any selected node has a descendant matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] if `selector` does not parse.
    pub fn has(&self, selector: &str) -> Result<bool, SelectorError> {
        let selector = parse_selector(selector)?;
        Ok(with_html(&self.tree, |html| {
            self.descendants(html)
                .any(|element| selector.matches(&element))
        }))
    }

    /// Split into single-node selections, one per selected node.
    ///
    /// With a non-empty `filter`, only nodes that match it or contain a
    /// matching descendant are kept.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] if a non-empty `filter` does not parse.
    pub fn elements(&self, filter: &str) -> Result<Vec<Self>, SelectorError> {
        let filter = if filter.is_empty() {
            None
        } else {
            Some(parse_selector(filter)?)
        };

        let kept = with_html(&self.tree, |html| {
            self.nodes
                .iter()
                .copied()
                .filter(|&id| {
                    filter
                        .as_ref()
                        .is_none_or(|selector| node_matches_or_contains(html, id, selector))
                })
                .collect::<Vec<_>>()
        });

        Ok(kept
            .into_iter()
            .map(|id| Self::new(Arc::clone(&self.tree), vec![id]))
            .collect())
    }

    fn raw_inner_html(&self) -> String {
        with_html(&self.tree, |html| {
            self.first_element(html)
                .map(|element| element.inner_html())
                .unwrap_or_default()
        })
    }

    fn first_element<'a>(&'a self, html: &'a Html) -> Option<ElementRef<'a>> {
        self.elements_in(html).next()
    }

    /// Selected nodes that are elements, in selection order.
    fn elements_in<'a>(&'a self, html: &'a Html) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.nodes
            .iter()
            .filter_map(|&id| html.tree.get(id))
            .filter_map(ElementRef::wrap)
    }

    /// Element descendants of every selected node, each node excluded.
    fn descendants<'a>(&'a self, html: &'a Html) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.nodes
            .iter()
            .filter_map(|&id| html.tree.get(id))
            .flat_map(|node| node.descendants().skip(1))
            .filter_map(ElementRef::wrap)
    }
}

fn node_matches_or_contains(html: &Html, id: NodeId, selector: &Selector) -> bool {
    let Some(node) = html.tree.get(id) else {
        return false;
    };
    node.descendants()
        .filter_map(ElementRef::wrap)
        .any(|element| selector.matches(&element))
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("len", &self.nodes.len())
            .finish_non_exhaustive()
    }
}
