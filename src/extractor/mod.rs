//! Sense extraction from KBBI entry pages.
//!
//! An entry page lists one heading block per homograph. Each block is an
//! `<h2 style="margin-bottom:3px">` followed, as siblings, by either a sense
//! list (`ul.adjusted-par` or `ol`) or a precategorial marker
//! (`font[color=darkgreen]`). A block whose first list item contains `→` is
//! a pointer from a non-canonical spelling to its canonical headword.
//!
//! Extraction is total: the markup has no stable schema, so every missing
//! piece degrades to `None` or an empty list instead of an error.
//!
//! The extractor is synchronous and returns owned [`EntryBlock`]s; the
//! resolver decides what to do with cross-references.

pub mod annotation;

use tracing::debug;

use crate::document::{
    DocumentNode, HtmlDocument, descendants, element_children, find_all, find_first, text,
    text_excluding,
};
use crate::models::{Definition, ReferenceSense, Sense, SenseEntry};
use annotation::{cleanup, cleanup_opt, parse_annotation, parse_attribution};

/// Marker separating a root word from a derived headword.
const ROOT_MARKER: char = '»';

/// Marker of a cross-reference list item.
const REFERENCE_MARKER: char = '→';

/// Headword fields shared by both kinds of block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Headword {
    /// Headword label with syllable dots, e.g. `ru.mah`
    pub syllabification: Option<String>,
    /// Root of a derived headword
    pub root_word: Option<String>,
    /// Phonetic spelling, defaulting to the label without dots
    pub pronunciation_spelling: Option<String>,
}

/// One heading block of an entry page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryBlock {
    /// A canonical entry with its own senses.
    Entry(Definition),
    /// A non-canonical form pointing at its canonical headword.
    CrossReference {
        /// Headword of the non-canonical form
        head: Headword,
        /// Word to resolve for the senses
        target: String,
        /// Canonical form as displayed on the page
        display: String,
    },
}

impl EntryBlock {
    /// Build the non-canonical definition for a cross-reference once its
    /// target's senses are known.
    #[must_use]
    pub fn redirected(head: Headword, display: String, senses: Vec<SenseEntry>) -> Definition {
        Definition {
            syllabification: head.syllabification,
            root_word: head.root_word,
            pronunciation_spelling: head.pronunciation_spelling,
            is_canonical: false,
            alternate_form: Some(display),
            senses,
        }
    }
}

/// Parse an entry page and extract every heading block in document order.
///
/// A page without heading blocks (not found, empty body) yields an empty list.
pub fn extract_document(html: &str) -> Vec<EntryBlock> {
    let doc = HtmlDocument::parse(html);
    let blocks: Vec<EntryBlock> =
        find_all(&doc.root(), is_heading).iter().map(extract_block).collect();
    debug!("Extracted {} heading block(s)", blocks.len());
    blocks
}

/// Extract one heading block.
pub fn extract_block<N: DocumentNode>(heading: &N) -> EntryBlock {
    let (head, alternate_form) = extract_headword(heading);
    let block = block_siblings(heading);

    let list = block
        .iter()
        .find(|n| (n.tag() == "ul" && n.has_class("adjusted-par")) || n.tag() == "ol");

    let Some(list) = list else {
        let senses = precategorial_sense(&block).into_iter().collect();
        return canonical(head, alternate_form, senses);
    };

    let items = find_all(list, |n| n.tag() == "li");

    if let Some(first) = items.first().filter(|li| text(*li).contains(REFERENCE_MARKER)) {
        let (target, display) = reference_target(first);
        return EntryBlock::CrossReference {
            head,
            target,
            display,
        };
    }

    let senses = items.iter().map(|item| extract_sense(item).into()).collect();
    canonical(head, alternate_form, senses)
}

fn canonical(head: Headword, alternate_form: Option<String>, senses: Vec<SenseEntry>) -> EntryBlock {
    EntryBlock::Entry(Definition {
        syllabification: head.syllabification,
        root_word: head.root_word,
        pronunciation_spelling: head.pronunciation_spelling,
        is_canonical: true,
        alternate_form,
        senses,
    })
}

fn is_heading<N: DocumentNode>(node: &N) -> bool {
    node.is("h2", "style", "margin-bottom:3px")
}

fn is_syllable<N: DocumentNode>(node: &N) -> bool {
    node.tag() == "span" && node.has_class("syllable")
}

/// Siblings following a heading up to the next heading.
fn block_siblings<N: DocumentNode>(heading: &N) -> Vec<N> {
    heading.following_siblings().into_iter().take_while(|n| !is_heading(n)).collect()
}

/// Headword fields plus the non-canonical label found in `small b`.
fn extract_headword<N: DocumentNode>(heading: &N) -> (Headword, Option<String>) {
    let pronunciation: String =
        find_all(heading, is_syllable).iter().map(|n| text(n)).collect();

    let alternate: String = find_all(heading, |n| n.tag() == "small")
        .iter()
        .flat_map(|small| find_all(small, |n| n.tag() == "b"))
        .map(|b| text(&b))
        .collect();

    let label = cleanup(&text_excluding(heading, |n| n.tag() == "small" || is_syllable(n)));
    let (root_word, label) = match label.split_once(ROOT_MARKER) {
        Some((root, rest)) => (Some(root.trim().to_string()), rest.trim().to_string()),
        None => (None, label),
    };

    let syllabification = (!label.is_empty()).then_some(label);
    let pronunciation_spelling = cleanup_opt(&pronunciation)
        .or_else(|| syllabification.as_ref().map(|s| s.replace('.', "")));

    (
        Headword {
            syllabification,
            root_word,
            pronunciation_spelling,
        },
        cleanup_opt(&alternate),
    )
}

/// Target word and display text of a `→` list item.
fn reference_target<N: DocumentNode>(item: &N) -> (String, String) {
    match find_first(item, |n| n.tag() == "a") {
        Some(anchor) => {
            let display = cleanup(&text(&anchor));
            let target = anchor.attr("href").map_or_else(|| display.clone(), last_segment);
            (target, display)
        }
        None => {
            let raw = text(item);
            let after = raw.split_once(REFERENCE_MARKER).map_or("", |(_, rest)| rest);
            let display = cleanup(after);
            (display.clone(), display)
        }
    }
}

/// Last path segment of an `href`, percent-decoded.
fn last_segment(href: &str) -> String {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    let segment = path.rsplit('/').next().unwrap_or_default();
    urlencoding::decode(segment).map_or_else(|_| segment.to_string(), |s| s.into_owned())
}

fn extract_sense<N: DocumentNode>(item: &N) -> Sense {
    let spans = find_first(item, |n| n.is("font", "color", "red"))
        .map(|red| find_all(&red, |n| n.tag() == "span"))
        .unwrap_or_default();

    let (part_of_speech, part_of_speech_label) = spans
        .first()
        .map_or((None, None), |span| parse_annotation(span.attr("title")));

    let attributions = spans
        .iter()
        .skip(1)
        .filter_map(|span| parse_attribution(span.attr("title")))
        .collect();

    let example = usage_example(item);

    let gloss = text_excluding(item, |n| n.tag() == "font");
    let gloss = gloss.trim();
    let gloss = gloss.strip_suffix(':').unwrap_or(gloss).to_string();

    Sense {
        part_of_speech,
        part_of_speech_label,
        gloss,
        example,
        attributions,
    }
}

/// Text of every grey `font` that is the third element child of its parent.
fn usage_example<N: DocumentNode>(item: &N) -> Option<String> {
    let mut parents = vec![item.clone()];
    parents.extend(descendants(item));

    let example: String = parents
        .iter()
        .filter_map(|parent| element_children(parent).into_iter().nth(2))
        .filter(|n| n.is("font", "color", "grey"))
        .map(|n| text(&n))
        .collect();

    let example = example.trim();
    (!example.is_empty()).then(|| example.to_string())
}

/// The darkgreen marker of a precategorial entry and its grey target list.
fn precategorial_sense<N: DocumentNode>(block: &[N]) -> Option<SenseEntry> {
    let (index, marker) =
        block.iter().enumerate().find(|(_, n)| n.is("font", "color", "darkgreen"))?;
    let (part_of_speech, part_of_speech_label) = parse_annotation(marker.attr("title"));

    let targets = block[index + 1..]
        .iter()
        .find(|n| n.is("font", "color", "grey"))
        .map(|grey| {
            text(grey)
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(
        ReferenceSense {
            part_of_speech,
            part_of_speech_label,
            targets,
        }
        .into(),
    )
}
