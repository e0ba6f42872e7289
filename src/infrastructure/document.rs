//! Document Model Adapter
//!
//! Wraps a parsed `scraper::Html` tree behind a small query surface so the
//! extraction strategies never touch parser types directly. Missing elements
//! are never errors: queries just come back empty.

use scraper::{ElementRef, Html, Node as DomNode, Selector};
use tracing::{debug, warn};

use super::{ExtractionError, ExtractionResult};

/// A parsed HTML document
pub struct Document {
    html: Html,
    byte_len: usize,
}

impl Document {
    /// Parse markup, tolerating malformed HTML.
    ///
    /// Fails only when there is nothing that could be a document at all:
    /// blank input, input with no tags, binary garbage, or a tree with no
    /// content once parsed.
    pub fn parse(markup: &str) -> ExtractionResult<Self> {
        let trimmed = markup.trim();
        if trimmed.is_empty() || !trimmed.contains('<') || trimmed.contains('\0') {
            return Err(ExtractionError::document_parse(markup));
        }

        let html = Html::parse_document(markup);
        if !html.errors.is_empty() {
            debug!("Parser recovered from {} markup errors", html.errors.len());
        }

        let has_content = html
            .root_element()
            .descendants()
            .any(|node| match node.value() {
                DomNode::Text(text) => !text.trim().is_empty(),
                DomNode::Element(el) => !matches!(el.name(), "html" | "head" | "body"),
                _ => false,
            });
        if !has_content {
            return Err(ExtractionError::document_parse(markup));
        }

        Ok(Self {
            html,
            byte_len: markup.len(),
        })
    }

    pub const fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn root(&self) -> Node<'_> {
        Node {
            element: self.html.root_element(),
        }
    }

    /// All nodes matching `selector`, in document order
    pub fn query(&self, selector: &Selector) -> Vec<Node<'_>> {
        self.html.select(selector).map(Node::from).collect()
    }

    /// Query with an uncompiled selector; an invalid selector matches nothing
    pub fn query_str(&self, selector: &str) -> Vec<Node<'_>> {
        match Selector::parse(selector) {
            Ok(compiled) => self.query(&compiled),
            Err(e) => {
                warn!("Ignoring invalid selector '{}': {}", selector, e);
                Vec::new()
            }
        }
    }

    /// Nodes of the first selector in the list that matches anything
    pub fn query_any(&self, selectors: &[Selector]) -> Vec<Node<'_>> {
        selectors
            .iter()
            .map(|selector| self.query(selector))
            .find(|nodes| !nodes.is_empty())
            .unwrap_or_default()
    }

    /// First node with non-empty text, trying selectors in order
    pub fn query_first(&self, selectors: &[Selector]) -> Option<Node<'_>> {
        self.root().query_first(selectors)
    }
}

/// A borrowed element of a [`Document`]
#[derive(Clone, Copy)]
pub struct Node<'a> {
    element: ElementRef<'a>,
}

impl<'a> From<ElementRef<'a>> for Node<'a> {
    fn from(element: ElementRef<'a>) -> Self {
        Self { element }
    }
}

impl<'a> Node<'a> {
    /// Tag name, lowercase
    pub fn name(&self) -> &'a str {
        self.element.value().name()
    }

    /// All descendant text, whitespace collapsed and trimmed
    pub fn text(&self) -> String {
        collapse_whitespace(&self.element.text().collect::<String>())
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.element.value().attr(name).map(str::to_string)
    }

    /// Non-blank direct children, text runs and elements alike, in order.
    ///
    /// Timing cells interleave bare text and inline elements ("06:12 AM
    /// <span>07:45 AM</span>"), so the start and end times are told apart by
    /// position rather than by a textual separator.
    pub fn child_parts(&self) -> Vec<ChildPart<'a>> {
        self.element
            .children()
            .filter_map(|child| match child.value() {
                DomNode::Text(text) => Some(ChildPart::Text(collapse_whitespace(text))),
                DomNode::Element(_) => ElementRef::wrap(child).map(|el| ChildPart::Element(Node::from(el))),
                _ => None,
            })
            .filter(|part| !part.text().is_empty())
            .collect()
    }

    /// First non-blank text node that is a direct child of this element
    pub fn first_text_node(&self) -> Option<String> {
        self.child_parts().into_iter().find_map(|part| match part {
            ChildPart::Text(text) => Some(text),
            ChildPart::Element(_) => None,
        })
    }

    /// Whether both handles refer to the same element of one document
    pub fn is_same(&self, other: &Node<'_>) -> bool {
        self.element.id() == other.element.id()
    }

    /// Element children, in order
    pub fn element_children(&self) -> Vec<Node<'a>> {
        self.element
            .children()
            .filter_map(ElementRef::wrap)
            .map(Node::from)
            .collect()
    }

    /// Descendants matching `selector`
    pub fn query(&self, selector: &Selector) -> Vec<Node<'a>> {
        self.element.select(selector).map(Node::from).collect()
    }

    /// First descendant with non-empty text, trying selectors in order
    pub fn query_first(&self, selectors: &[Selector]) -> Option<Node<'a>> {
        selectors.iter().find_map(|selector| {
            self.element
                .select(selector)
                .map(Node::from)
                .find(|node| !node.text().is_empty())
        })
    }
}

/// One direct child of a [`Node`]
#[derive(Clone)]
pub enum ChildPart<'a> {
    Text(String),
    Element(Node<'a>),
}

impl<'a> ChildPart<'a> {
    /// Collapsed text of the part
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Element(node) => node.text(),
        }
    }

    pub fn node(&self) -> Option<Node<'a>> {
        match self {
            Self::Text(_) => None,
            Self::Element(node) => Some(*node),
        }
    }
}

/// Collapse whitespace runs (including NBSP and newlines) to single spaces and trim
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(s: &str) -> Selector {
        Selector::parse(s).unwrap()
    }

    #[test]
    fn test_parse_tolerates_unclosed_tags() {
        let doc = Document::parse("<div class='a'><p>one<p>two</div>").unwrap();
        assert_eq!(doc.query(&selector("p")).len(), 2);
    }

    #[test]
    fn test_parse_rejects_blank_and_garbage() {
        for markup in ["", "   \n", "plain text with no tags", "<\0\0\0>"] {
            let err = Document::parse(markup).err().unwrap();
            assert!(matches!(err, ExtractionError::DocumentParse { .. }), "{markup:?}");
        }
        assert!(Document::parse("<html><body></body></html>").is_err());
    }

    #[test]
    fn test_missing_elements_are_empty_not_errors() {
        let doc = Document::parse("<div>hello</div>").unwrap();
        assert!(doc.query(&selector("table tr")).is_empty());
        assert!(doc.query_str("td:::").is_empty());
        assert!(doc.query_first(&[selector(".nothing")]).is_none());
    }

    #[test]
    fn test_child_parts_keep_text_and_elements_in_order() {
        let doc = Document::parse(
            r#"<span class="t">
                 06:12 AM <span class="dpInlineBlock">07:45 AM</span>
               </span>
               <p class="w"><b>10:38 AM</b> to <b></b><b>12:05 PM</b></p>"#,
        )
        .unwrap();
        let cell = doc.query(&selector(".t"))[0];
        let parts: Vec<_> = cell.child_parts().iter().map(ChildPart::text).collect();
        assert_eq!(parts, vec!["06:12 AM", "07:45 AM"]);
        assert_eq!(cell.first_text_node().as_deref(), Some("06:12 AM"));
        assert_eq!(cell.text(), "06:12 AM 07:45 AM");

        let wrapped = doc.query(&selector(".w"))[0].child_parts();
        let parts: Vec<_> = wrapped.iter().map(ChildPart::text).collect();
        assert_eq!(parts, vec!["10:38 AM", "to", "12:05 PM"]);
        assert!(wrapped[0].node().is_some());
        assert!(wrapped[1].node().is_none());
        assert_eq!(doc.query(&selector(".w"))[0].first_text_node().as_deref(), Some("to"));
    }

    #[test]
    fn test_is_same_compares_identity_not_content() {
        let doc = Document::parse("<b>12:05 PM</b><b>12:05 PM</b>").unwrap();
        let nodes = doc.query(&selector("b"));
        assert!(nodes[0].is_same(&nodes[0]));
        assert!(!nodes[0].is_same(&nodes[1]));
    }

    #[test]
    fn test_attribute_and_children() {
        let doc = Document::parse(r#"<div id="x" data-k="v"><b>1</b>text<i>2</i></div>"#).unwrap();
        let node = doc.query(&selector("#x"))[0];
        assert_eq!(node.attribute("data-k").as_deref(), Some("v"));
        assert_eq!(node.attribute("missing"), None);
        let names: Vec<_> = node.element_children().iter().map(Node::name).collect();
        assert_eq!(names, vec!["b", "i"]);
    }

    #[test]
    fn test_query_any_uses_first_matching_selector() {
        let doc = Document::parse("<ul><li>a</li></ul><ol><li>b</li><li>c</li></ol>").unwrap();
        let nodes = doc.query_any(&[selector("table"), selector("ol li"), selector("li")]);
        assert_eq!(nodes.len(), 2);
    }
}
