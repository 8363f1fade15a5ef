//! Busy indicator for buttons and containers.
//!
//! [`begin`] swaps an element's content for a spinner and hands back a
//! [`LoadingToken`] holding the original markup; [`end`] consumes the token
//! and puts the markup back exactly. Tokens nest: each `begin` snapshots what
//! is there at the time, so ending in reverse order restores every layer. A
//! depth counter on the element keeps the `loading` class until the last
//! token ends.
//!
//! Tokens may also end out of order, e.g. two requests sharing a button where
//! the first one started finishes first. The element's pre-loading markup is
//! kept in an attribute by the first `begin`, and whichever token ends last
//! restores it. A token that ends while a newer one is still active leaves
//! the newer indicator in place.

#[cfg(test)]
#[path = "loading_test.rs"]
mod loading_test;

use crate::dom::Element;
use crate::util::html::escape_html;

pub const DEFAULT_LOADING_LABEL: &str = "Loading...";

const LOADING_CLASS: &str = "loading";
const DEPTH_ATTR: &str = "data-loading-depth";
const ORIGINAL_ATTR: &str = "data-loading-original";
const SPINNER: &str =
    r#"<span class="spinner-border spinner-border-sm me-2" role="status"></span>"#;

/// Snapshot of an element's content taken by [`begin`].
#[must_use = "the element stays in its loading state until the token is passed to `end`"]
#[derive(Debug)]
pub struct LoadingToken<E> {
    element: E,
    snapshot: String,
    depth: u32,
}

impl<E> LoadingToken<E> {
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Markup that `end` will restore.
    pub fn snapshot(&self) -> &str {
        &self.snapshot
    }
}

/// Put `element` into its loading state with `label` beside a spinner.
pub fn begin<E: Element>(element: &E, label: &str) -> LoadingToken<E> {
    let snapshot = element.inner_html();
    let depth = depth_of(element) + 1;
    if depth == 1 {
        element.set_attribute(ORIGINAL_ATTR, &snapshot);
    }
    element.set_attribute(DEPTH_ATTR, &depth.to_string());
    element.add_class(LOADING_CLASS);
    element.set_inner_html(&format!("{SPINNER}{}", escape_html(label)));
    LoadingToken { element: element.clone(), snapshot, depth }
}

/// Restore the content captured by `token`.
///
/// The last token to end restores the markup from before the first `begin`.
pub fn end<E: Element>(token: LoadingToken<E>) {
    let LoadingToken { element, snapshot, depth } = token;
    let current = depth_of(&element);
    let remaining = current.saturating_sub(1);
    if remaining == 0 {
        let original = element.attribute(ORIGINAL_ATTR).unwrap_or(snapshot);
        element.set_inner_html(&original);
        element.remove_attribute(ORIGINAL_ATTR);
        element.remove_attribute(DEPTH_ATTR);
        element.remove_class(LOADING_CLASS);
        return;
    }
    element.set_attribute(DEPTH_ATTR, &remaining.to_string());
    if depth == current {
        element.set_inner_html(&snapshot);
    } else {
        log::warn!("loading state ended out of order (depth {current}, token {depth})");
    }
}

/// Whether `element` is currently in a loading state.
pub fn is_loading<E: Element>(element: &E) -> bool {
    depth_of(element) > 0
}

fn depth_of<E: Element>(element: &E) -> u32 {
    match element.attribute(DEPTH_ATTR).map(|raw| raw.parse::<u32>()) {
        Some(Ok(depth)) => depth,
        _ => 0,
    }
}
