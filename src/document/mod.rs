//! Read-only view of a parsed entry page.
//!
//! The extractor never touches the HTML parser directly. It walks nodes
//! through the [`DocumentNode`] capability and the pure helpers in this
//! module, so the extraction rules can be expressed (and tested) without
//! depending on how a backend stores its tree.
//!
//! Helpers never mutate the document. Where a CSS-style "remove this subtree
//! then take the text" step is needed, [`text_excluding`] computes the text as
//! if the excluded subtrees were absent.
//!
//! # Example
//!
//! ```rust,no_run
//! use kamoes::document::{DocumentNode, HtmlDocument, find_first, text};
//!
//! let doc = HtmlDocument::parse("<h2>ru.mah</h2>");
//! let heading = find_first(&doc.root(), |n| n.tag() == "h2");
//! assert_eq!(heading.map(|h| text(&h)), Some("ru.mah".to_string()));
//! ```

mod html;

pub use html::{HtmlDocument, HtmlNode};

/// A child of an element: either another element or a run of text.
#[derive(Debug, Clone)]
pub enum NodeChild<N> {
    /// Nested element
    Element(N),
    /// Text content
    Text(String),
}

/// Minimal navigation capability the extractor needs from a document backend.
pub trait DocumentNode: Clone {
    /// Lowercase tag name.
    fn tag(&self) -> &str;

    /// Attribute value by name.
    fn attr(&self, name: &str) -> Option<&str>;

    /// Direct children in document order.
    fn children(&self) -> Vec<NodeChild<Self>>;

    /// Element siblings that follow this node, in document order.
    fn following_siblings(&self) -> Vec<Self>;

    /// Whether the whitespace-separated `class` attribute contains `class`.
    fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Whether this is a `tag` element whose `name` attribute equals `value`.
    fn is(&self, tag: &str, name: &str, value: &str) -> bool {
        self.tag() == tag && self.attr(name) == Some(value)
    }
}

/// Concatenated text of all descendants.
pub fn text<N: DocumentNode>(node: &N) -> String {
    text_excluding(node, |_| false)
}

/// Concatenated text of all descendants, skipping every subtree whose root
/// matches `exclude`.
///
/// The node itself is never excluded.
pub fn text_excluding<N, F>(node: &N, exclude: F) -> String
where
    N: DocumentNode,
    F: Fn(&N) -> bool,
{
    let mut out = String::new();
    collect_text(node, &exclude, &mut out);
    out
}

fn collect_text<N, F>(node: &N, exclude: &F, out: &mut String)
where
    N: DocumentNode,
    F: Fn(&N) -> bool,
{
    for child in node.children() {
        match child {
            NodeChild::Text(t) => out.push_str(&t),
            NodeChild::Element(el) if !exclude(&el) => collect_text(&el, exclude, out),
            NodeChild::Element(_) => {}
        }
    }
}

/// Element children in document order.
pub fn element_children<N: DocumentNode>(node: &N) -> Vec<N> {
    node.children()
        .into_iter()
        .filter_map(|child| match child {
            NodeChild::Element(el) => Some(el),
            NodeChild::Text(_) => None,
        })
        .collect()
}

/// All descendant elements in pre-order, not including `node`.
pub fn descendants<N: DocumentNode>(node: &N) -> Vec<N> {
    let mut out = Vec::new();
    let mut stack: Vec<N> = element_children(node).into_iter().rev().collect();
    while let Some(next) = stack.pop() {
        stack.extend(element_children(&next).into_iter().rev());
        out.push(next);
    }
    out
}

/// First descendant (pre-order) matching `pred`.
pub fn find_first<N, F>(node: &N, pred: F) -> Option<N>
where
    N: DocumentNode,
    F: Fn(&N) -> bool,
{
    descendants(node).into_iter().find(|n| pred(n))
}

/// All descendants (pre-order) matching `pred`.
pub fn find_all<N, F>(node: &N, pred: F) -> Vec<N>
where
    N: DocumentNode,
    F: Fn(&N) -> bool,
{
    descendants(node).into_iter().filter(|n| pred(n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> HtmlDocument {
        HtmlDocument::parse(html)
    }

    #[test]
    fn test_text_concatenates_descendants() {
        let d = doc("<div id=\"x\">a<b>b<i>c</i></b>d</div>");
        let div = find_first(&d.root(), |n| n.tag() == "div").unwrap();
        assert_eq!(text(&div), "abcd");
    }

    #[test]
    fn test_text_excluding_skips_subtrees() {
        let d = doc("<li>rumah <font color=\"red\">n</font>bangunan<font>x</font>:</li>");
        let li = find_first(&d.root(), |n| n.tag() == "li").unwrap();
        assert_eq!(text_excluding(&li, |n| n.tag() == "font"), "rumah bangunan:");
    }

    #[test]
    fn test_descendants_preorder() {
        let d = doc("<div><p><a>1</a></p><span>2</span></div>");
        let div = find_first(&d.root(), |n| n.tag() == "div").unwrap();
        let tags: Vec<String> = descendants(&div).iter().map(|n| n.tag().to_string()).collect();
        assert_eq!(tags, ["p", "a", "span"]);
    }

    #[test]
    fn test_following_siblings_are_elements_only() {
        let d = doc("<div><h2>a</h2>text<ul></ul><ol></ol></div>");
        let h2 = find_first(&d.root(), |n| n.tag() == "h2").unwrap();
        let tags: Vec<String> =
            h2.following_siblings().iter().map(|n| n.tag().to_string()).collect();
        assert_eq!(tags, ["ul", "ol"]);
    }

    #[test]
    fn test_has_class_and_is() {
        let d = doc("<ul class=\"adjusted-par other\"><li><font color=\"red\">x</font></li></ul>");
        let ul = find_first(&d.root(), |n| n.tag() == "ul").unwrap();
        assert!(ul.has_class("adjusted-par"));
        assert!(!ul.has_class("adjusted"));
        assert!(find_first(&ul, |n| n.is("font", "color", "red")).is_some());
        assert!(find_first(&ul, |n| n.is("font", "color", "grey")).is_none());
    }
}
