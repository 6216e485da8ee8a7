//! Deduplicated warnings.
//!
//! A long-running server sees the same odd condition (an unexpected content
//! type, say) over and over. [`warn_once`] logs each distinct message a
//! single time through `tracing`.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already logged (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Log a warning once per unique `component`/`message` pair.
///
/// # Example
/// ```ignore
/// warn_once("fetch", "content type 'application/json' is not HTML");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if first_sighting(component, message) {
        tracing::warn!(component, "{message}");
    }
}

/// Record the pair, returning `true` the first time it is seen.
fn first_sighting(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(format!("[{component}] {message}"))
}
