use serde::Serialize;
use serde_json::Value;

use crate::error::OpenAlexError;
use crate::models::{Author, FromJson, Institution, Source, Topic, Work};

/// A record type a query builder can produce from one JSON result.
pub trait FromResponse: Sized + Send {
    /// Maps one result object returned from the `entity_type` collection.
    ///
    /// # Errors
    ///
    /// Returns [`OpenAlexError::Mapping`] if a typed record cannot be built.
    fn from_response(entity_type: &str, value: Value) -> Result<Self, OpenAlexError>;
}

/// A typed record with a fixed top-level collection.
pub trait Entity: FromResponse {
    /// Collection path segment, e.g. `works`.
    const COLLECTION: &'static str;
}

macro_rules! typed_entity {
    ($ty:ty, $collection:literal) => {
        impl FromResponse for $ty {
            fn from_response(_entity_type: &str, value: Value) -> Result<Self, OpenAlexError> {
                <$ty as FromJson>::from_json(&value)
            }
        }

        impl Entity for $ty {
            const COLLECTION: &'static str = $collection;
        }
    };
}

typed_entity!(Work, "works");
typed_entity!(Author, "authors");
typed_entity!(Source, "sources");
typed_entity!(Institution, "institutions");
typed_entity!(Topic, "topics");

/// A result from any collection.
///
/// Collections with a typed record map onto it; everything else (concepts,
/// funders, publishers...) is kept as the raw JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Work(Work),
    Author(Author),
    Source(Source),
    Institution(Institution),
    Topic(Topic),
    Raw(Value),
}

impl Record {
    /// The record's OpenAlex id, if it has one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Work(work) => Some(&work.id),
            Self::Author(author) => Some(&author.id),
            Self::Source(source) => Some(&source.id),
            Self::Institution(institution) => Some(&institution.id),
            Self::Topic(topic) => Some(&topic.id),
            Self::Raw(value) => value.get("id").and_then(Value::as_str),
        }
    }

    /// Returns the raw JSON if no typed record exists for the collection.
    #[must_use]
    pub const fn as_raw(&self) -> Option<&Value> {
        match self {
            Self::Raw(value) => Some(value),
            _ => None,
        }
    }
}

impl FromResponse for Record {
    fn from_response(entity_type: &str, value: Value) -> Result<Self, OpenAlexError> {
        Ok(match entity_type {
            "works" => Self::Work(Work::from_json(&value)?),
            "authors" => Self::Author(Author::from_json(&value)?),
            "sources" => Self::Source(Source::from_json(&value)?),
            "institutions" => Self::Institution(Institution::from_json(&value)?),
            "topics" => Self::Topic(Topic::from_json(&value)?),
            _ => Self::Raw(value),
        })
    }
}
