//! Small traversal helpers over the parsed document tree.

use scraper::{ElementRef, Html, Selector};

use crate::ScrapeError;

/// Parses a CSS selector string, returning a [`ScrapeError`] on failure.
pub fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css)
        .map_err(|e| ScrapeError::parse(format!("invalid CSS selector '{css}': {e}")))
}

/// Returns the first element matching `css`, or a parse error naming `what`.
pub fn require<'a>(document: &'a Html, css: &str, what: &str) -> Result<ElementRef<'a>, ScrapeError> {
    let sel = selector(css)?;
    document
        .select(&sel)
        .next()
        .ok_or_else(|| ScrapeError::parse(format!("could not find {what} ('{css}')")))
}

/// Returns the first descendant of `element` matching `css`.
pub fn find<'a>(element: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>, ScrapeError> {
    let sel = selector(css)?;
    Ok(element.select(&sel).next())
}

/// All text beneath `element`, concatenated.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text of the first child node: the node's own text when it is a text
/// node, or all text beneath it when it is an element.
pub fn first_child_text(element: ElementRef<'_>) -> Option<String> {
    let first = element.children().next()?;
    if let Some(text) = first.value().as_text() {
        return Some(text.to_string());
    }
    ElementRef::wrap(first).map(text_of)
}

/// Direct element children of `element`, skipping text and comment nodes.
pub fn element_children<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

/// The next sibling of `element` that is itself an element.
pub fn next_element_sibling<'a>(element: ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

fn is_heading(element: ElementRef<'_>) -> bool {
    matches!(element.value().name(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Finds the table belonging to a section header inside `block`.
///
/// Sections are laid out as a heading followed by their table, both direct
/// children of the block. The first heading whose text contains `header`
/// wins and the next element after it is returned.
pub fn table_after_header<'a>(block: ElementRef<'a>, header: &str) -> Option<ElementRef<'a>> {
    element_children(block)
        .find(|child| is_heading(*child) && text_of(*child).contains(header))
        .and_then(next_element_sibling)
}
