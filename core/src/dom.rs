//! Element lookup through an injected document.
//!
//! # Design
//! The host owns the document. `DocumentAccessor` is the only view the
//! library has of it: lookup by id, and the current location's search text
//! for `query_from_location`. `StaticDocument` is a map-backed accessor for
//! tests and for hosts that render pages without a live DOM.

use std::collections::HashMap;

use crate::error::QueryError;
use crate::query::{parse_search, QueryMap};

/// Read access to a page document.
pub trait DocumentAccessor {
    /// Handle returned for a found element.
    type Node;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// The location's search component, including its leading `?` when the
    /// page has one. Empty when there is no query.
    fn location_search(&self) -> String;
}

/// Look up the element with identifier `id`.
pub fn by_id<D: DocumentAccessor + ?Sized>(doc: &D, id: &str) -> Option<D::Node> {
    doc.element_by_id(id)
}

/// Parse the query parameters of the document's current location.
pub fn query_from_location<D: DocumentAccessor + ?Sized>(doc: &D) -> Result<QueryMap, QueryError> {
    parse_search(&doc.location_search())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: String,
    pub tag: String,
    pub text: String,
}

/// In-memory document keyed by element id.
#[derive(Debug, Clone, Default)]
pub struct StaticDocument {
    elements: HashMap<String, Element>,
    search: String,
}

impl StaticDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element. Like `getElementById`, lookup returns the first
    /// element added under an id; later duplicates are ignored.
    pub fn with_element(mut self, id: &str, tag: &str, text: &str) -> Self {
        self.elements
            .entry(id.to_string())
            .or_insert_with(|| Element {
                id: id.to_string(),
                tag: tag.to_string(),
                text: text.to_string(),
            });
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_string();
        self
    }
}

impl DocumentAccessor for StaticDocument {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.elements.get(id).cloned()
    }

    fn location_search(&self) -> String {
        self.search.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> StaticDocument {
        StaticDocument::new()
            .with_element("ip", "input", "192.168.0.10")
            .with_element("status", "span", "idle")
            .with_search("?channel=2&name=Front%20door")
    }

    #[test]
    fn finds_element_by_id() {
        let doc = page();
        let node = by_id(&doc, "status").unwrap();
        assert_eq!(node.tag, "span");
        assert_eq!(node.text, "idle");
    }

    #[test]
    fn missing_id_is_none() {
        let doc = page();
        assert!(by_id(&doc, "nope").is_none());
        assert!(by_id(&doc, "").is_none());
    }

    #[test]
    fn first_element_with_same_id_wins() {
        let doc = StaticDocument::new()
            .with_element("x", "div", "first")
            .with_element("x", "p", "second");
        let node = by_id(&doc, "x").unwrap();
        assert_eq!(node.tag, "div");
        assert_eq!(node.text, "first");
    }

    #[test]
    fn query_from_location_strips_question_mark() {
        let doc = page();
        let query = query_from_location(&doc).unwrap();
        assert_eq!(query.get("channel"), Some("2"));
        assert_eq!(query.get("name"), Some("Front door"));
    }

    #[test]
    fn query_from_empty_location() {
        let doc = StaticDocument::new();
        let query = query_from_location(&doc).unwrap();
        assert_eq!(query.get(""), Some(""));
    }
}
