//! Dictionary data models shared by the extractor, resolver, cache and HTTP layer.
//!
//! These types define the persisted artifact format: a cached word is stored as
//! a pretty-printed JSON array of [`Definition`] values, and the HTTP layer
//! returns the same array verbatim. Field names are serialized in camelCase.
//!
//! # Example artifact
//!
//! ```json
//! [
//!   {
//!     "syllabification": "ru.mah",
//!     "rootWord": null,
//!     "pronunciationSpelling": "rumah",
//!     "isCanonical": true,
//!     "alternateForm": null,
//!     "senses": [
//!       {
//!         "partOfSpeech": "n",
//!         "partOfSpeechLabel": "nomina",
//!         "gloss": "bangunan untuk tempat tinggal",
//!         "example": null,
//!         "attributions": []
//!       }
//!     ]
//!   }
//! ]
//! ```

use serde::{Deserialize, Serialize};

/// One resolved entry for a word form.
///
/// A word may resolve to several definitions (homographs each get their own
/// heading block on the entry page). A non-canonical definition carries the
/// senses of the canonical form it redirects to, copied by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    /// Headword label with syllable separators, e.g. `ru.mah`.
    pub syllabification: Option<String>,

    /// Root word for derived headwords (the part before `»`).
    pub root_word: Option<String>,

    /// Phonetic spelling; falls back to the syllabification without dots.
    pub pronunciation_spelling: Option<String>,

    /// Whether this block is the standard (baku) form.
    pub is_canonical: bool,

    /// The paired form: the non-standard label of a canonical entry, or the
    /// canonical label of a non-standard entry.
    pub alternate_form: Option<String>,

    /// Ordered senses. Never absent; may be empty.
    #[serde(default)]
    pub senses: Vec<SenseEntry>,
}

/// A sense is either a glossed meaning or a pointer to other headwords.
///
/// The JSON representation is untagged: objects with a `gloss` key decode as
/// [`Sense`], objects with a `targets` key decode as [`ReferenceSense`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SenseEntry {
    /// A meaning with its own gloss.
    Sense(Sense),
    /// A "see also" meaning.
    Reference(ReferenceSense),
}

impl SenseEntry {
    /// Part-of-speech tag of either variant.
    #[must_use]
    pub fn part_of_speech(&self) -> Option<&str> {
        match self {
            Self::Sense(sense) => sense.part_of_speech.as_deref(),
            Self::Reference(reference) => reference.part_of_speech.as_deref(),
        }
    }
}

impl From<Sense> for SenseEntry {
    fn from(sense: Sense) -> Self {
        Self::Sense(sense)
    }
}

impl From<ReferenceSense> for SenseEntry {
    fn from(reference: ReferenceSense) -> Self {
        Self::Reference(reference)
    }
}

/// One meaning of a headword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sense {
    /// Short part-of-speech tag, e.g. `n`.
    pub part_of_speech: Option<String>,

    /// Human-readable gloss of the tag, e.g. `nomina`.
    pub part_of_speech_label: Option<String>,

    /// Definition text, trailing colon stripped.
    pub gloss: String,

    /// Usage example. `None` rather than an empty string.
    pub example: Option<String>,

    /// Register or source markers attached to this sense.
    #[serde(default)]
    pub attributions: Vec<Attribution>,
}

/// A meaning expressed as references to other headwords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceSense {
    /// Short part-of-speech tag.
    pub part_of_speech: Option<String>,

    /// Human-readable gloss of the tag.
    pub part_of_speech_label: Option<String>,

    /// Headwords this sense points to, in page order.
    pub targets: Vec<String>,
}

/// Lexical or register source of a sense (e.g. `ki: kiasan`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribution {
    /// Short source tag.
    pub source_tag: String,

    /// Readable label; `None` when the page shows a placeholder dash.
    pub source_label: Option<String>,
}
