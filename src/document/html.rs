//! `scraper` backend for [`DocumentNode`].
//!
//! `scraper::Html` is not `Send`; callers parse and extract inside one
//! synchronous scope and keep only owned results across `.await` points.

use scraper::{ElementRef, Html};

use super::{DocumentNode, NodeChild};

/// A parsed HTML entry page.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse a full HTML document. Malformed markup is repaired, never rejected.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// The `<html>` root element.
    #[must_use]
    pub fn root(&self) -> HtmlNode<'_> {
        HtmlNode(self.html.root_element())
    }
}

impl std::fmt::Debug for HtmlDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlDocument").finish_non_exhaustive()
    }
}

/// Element handle borrowed from an [`HtmlDocument`].
#[derive(Debug, Clone, Copy)]
pub struct HtmlNode<'a>(ElementRef<'a>);

impl DocumentNode for HtmlNode<'_> {
    fn tag(&self) -> &str {
        self.0.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.0.value().attr(name)
    }

    fn children(&self) -> Vec<NodeChild<Self>> {
        self.0
            .children()
            .filter_map(|child| {
                if let Some(el) = ElementRef::wrap(child) {
                    Some(NodeChild::Element(HtmlNode(el)))
                } else {
                    child.value().as_text().map(|t| NodeChild::Text(t.to_string()))
                }
            })
            .collect()
    }

    fn following_siblings(&self) -> Vec<Self> {
        self.0.next_siblings().filter_map(ElementRef::wrap).map(HtmlNode).collect()
    }
}
