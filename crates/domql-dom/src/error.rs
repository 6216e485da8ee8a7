use scraper::Selector;

/// A CSS selector that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid selector `{selector}`: {message}")]
pub struct SelectorError {
    /// The selector text as given.
    pub selector: String,
    /// Parser diagnostic.
    pub message: String,
}

/// Parse a CSS selector list.
///
/// # Errors
///
/// Returns [`SelectorError`] if `selector` is not valid selector syntax
/// (the empty string included).
pub fn parse_selector(selector: &str) -> Result<Selector, SelectorError> {
    Selector::parse(selector).map_err(|e| SelectorError {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}
