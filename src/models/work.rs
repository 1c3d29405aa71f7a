use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::OpenAlexError;
use crate::models::{Authorship, Citation, FromJson, JsonFields, Location, Topic};

/// A scholarly document: article, book, dataset, thesis and so on.
///
/// # Example
///
/// ```rust
/// use openalex::models::{FromJson, Work};
/// use serde_json::json;
///
/// let work = Work::from_json(&json!({
///     "id": "https://openalex.org/W1",
///     "display_name": "Attention Is All You Need",
///     "publication_year": 2017,
///     "abstract_inverted_index": {"Attention": [0], "matters.": [1]}
/// })).unwrap();
///
/// assert_eq!(work.abstract_text().as_deref(), Some("Attention matters."));
/// assert!(work.authorships.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Work {
    pub id: String,
    pub doi: Option<String>,
    pub display_name: String,
    pub publication_year: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub cited_by_count: u64,
    pub authorships: Vec<Authorship>,
    pub primary_location: Option<Location>,
    pub topics: Vec<Topic>,
    pub referenced_works: Vec<String>,
    /// Word to zero-based positions. `abstract` is reserved in Rust.
    pub abstract_inverted_index: Option<BTreeMap<String, Vec<usize>>>,
}

impl Work {
    /// Rebuilds the abstract from its inverted index.
    ///
    /// Positions `0..=max` are filled in order; positions no word claims
    /// become empty tokens, so gaps show up as doubled spaces. Returns
    /// `None` for an index too sparse to be an abstract.
    #[must_use]
    pub fn abstract_text(&self) -> Option<String> {
        let index = self.abstract_inverted_index.as_ref()?;
        let len = abstract_len(index)?;

        let mut words = vec![""; len];
        for (word, positions) in index {
            for &position in positions {
                words[position] = word.as_str();
            }
        }
        Some(words.join(" "))
    }

    /// Citation fields for this work.
    #[must_use]
    pub fn citation(&self) -> Citation {
        let authors: Vec<&str> = self
            .authorships
            .iter()
            .map(|authorship| authorship.author.display_name.as_str())
            .collect();

        let surname = authors
            .first()
            .and_then(|name| name.split_whitespace().last())
            .unwrap_or("Unknown");

        let journal = self
            .primary_location
            .as_ref()
            .and_then(|location| location.source.as_ref())
            .map_or("Unknown Journal", |source| source.display_name.as_str());

        Citation {
            key: format!("{surname}{}", self.publication_year),
            author: authors.join(" and "),
            title: self.display_name.clone(),
            journal: journal.to_string(),
            year: self.publication_year.to_string(),
            doi: self
                .doi
                .as_deref()
                .map(|doi| doi.strip_prefix(DOI_PREFIX).unwrap_or(doi).to_string()),
        }
    }

    /// Renders this work as a BibTeX `@article` entry.
    #[must_use]
    pub fn to_bibtex(&self) -> String {
        self.citation().to_bibtex()
    }
}

const DOI_PREFIX: &str = "https://doi.org/";

/// Reconstructed abstracts may hold at most this many slots per position.
const MAX_ABSTRACT_SPREAD: usize = 4;

/// Token count of the abstract behind `index`, or `None` if it is empty
/// or its highest position exceeds the spread bound.
fn abstract_len(index: &BTreeMap<String, Vec<usize>>) -> Option<usize> {
    let positions: usize = index.values().map(Vec::len).sum();
    let len = index.values().flatten().copied().max()?.checked_add(1)?;
    (len <= positions.saturating_mul(MAX_ABSTRACT_SPREAD)).then_some(len)
}

fn parse_abstract_index(
    value: &Value,
) -> Result<BTreeMap<String, Vec<usize>>, OpenAlexError> {
    let mapping_error = |reason: String| OpenAlexError::Mapping {
        entity: Work::NAME,
        field: "abstract_inverted_index".to_string(),
        reason,
    };

    let index: BTreeMap<String, Vec<usize>> =
        serde_json::from_value(value.clone()).map_err(|e| mapping_error(e.to_string()))?;

    let has_positions = index.values().any(|positions| !positions.is_empty());
    if has_positions && abstract_len(&index).is_none() {
        return Err(mapping_error("word position out of range".to_string()));
    }
    Ok(index)
}

impl FromJson for Work {
    const NAME: &'static str = "Work";

    fn from_json(value: &Value) -> Result<Self, OpenAlexError> {
        let fields = JsonFields::new(Self::NAME, value)?;

        let abstract_inverted_index = fields
            .lookup("abstract_inverted_index")
            .map(parse_abstract_index)
            .transpose()?;

        Ok(Self {
            id: fields.str("id")?,
            doi: fields.first_str(&["doi", "ids.doi"])?,
            display_name: fields.str("display_name")?,
            publication_year: fields.i32("publication_year")?,
            kind: fields.opt_str("type")?.unwrap_or_default(),
            cited_by_count: fields.count("cited_by_count")?,
            authorships: fields.list("authorships")?,
            primary_location: fields.opt_nested("primary_location")?,
            topics: fields.list("topics")?,
            referenced_works: fields.str_list("referenced_works")?,
            abstract_inverted_index,
        })
    }
}
