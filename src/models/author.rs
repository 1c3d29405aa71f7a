use serde::Serialize;
use serde_json::Value;

use crate::error::OpenAlexError;
use crate::models::{FromJson, Institution, JsonFields};

/// A person who has authored works.
///
/// The counters are `None` when the author is embedded in an
/// [`Authorship`], where OpenAlex only sends id, name and ORCID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub id: String,
    pub orcid: Option<String>,
    pub display_name: String,
    pub works_count: Option<u64>,
    pub cited_by_count: Option<u64>,
    pub h_index: Option<u64>,
    pub last_known_institution: Option<Institution>,
}

impl FromJson for Author {
    const NAME: &'static str = "Author";

    fn from_json(value: &Value) -> Result<Self, OpenAlexError> {
        let fields = JsonFields::new(Self::NAME, value)?;

        // Newer payloads replace the single institution with a list.
        let last_known_institution = match fields.opt_nested("last_known_institution")? {
            Some(institution) => Some(institution),
            None => fields
                .list::<Institution>("last_known_institutions")?
                .into_iter()
                .next(),
        };

        Ok(Self {
            id: fields.str("id")?,
            orcid: fields.first_str(&["ids.orcid", "orcid"])?,
            display_name: fields.str("display_name")?,
            works_count: fields.opt_u64("works_count")?,
            cited_by_count: fields.opt_u64("cited_by_count")?,
            h_index: fields.opt_u64("summary_stats.h_index")?,
            last_known_institution,
        })
    }
}

/// One author's contribution to a work, with their affiliations at the
/// time of publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Authorship {
    pub author: Author,
    pub institutions: Vec<Institution>,
}

impl FromJson for Authorship {
    const NAME: &'static str = "Authorship";

    fn from_json(value: &Value) -> Result<Self, OpenAlexError> {
        let fields = JsonFields::new(Self::NAME, value)?;
        Ok(Self {
            author: fields.nested("author")?,
            institutions: fields.list("institutions")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_author() {
        let author = Author::from_json(&json!({
            "id": "https://openalex.org/A5023888391",
            "ids": {"orcid": "https://orcid.org/0000-0001-6187-6610"},
            "display_name": "Jason Priem",
            "works_count": 53,
            "cited_by_count": 1700,
            "summary_stats": {"h_index": 14},
            "last_known_institution": {
                "id": "https://openalex.org/I4200000001",
                "display_name": "OurResearch",
                "country_code": "CA",
                "type": "nonprofit"
            }
        }))
        .unwrap();

        assert_eq!(
            author.orcid.as_deref(),
            Some("https://orcid.org/0000-0001-6187-6610")
        );
        assert_eq!(author.works_count, Some(53));
        assert_eq!(author.h_index, Some(14));
        assert_eq!(
            author.last_known_institution.unwrap().display_name,
            "OurResearch"
        );
    }

    #[test]
    fn test_author_without_summary_stats() {
        let author = Author::from_json(&json!({
            "id": "A1",
            "display_name": "John Doe",
            "orcid": null
        }))
        .unwrap();

        assert!(author.orcid.is_none());
        assert!(author.h_index.is_none());
        assert!(author.works_count.is_none());
        assert!(author.last_known_institution.is_none());
    }

    #[test]
    fn test_last_known_institutions_list() {
        let author = Author::from_json(&json!({
            "id": "A1",
            "display_name": "John Doe",
            "last_known_institutions": [
                {"id": "I1", "display_name": "First"},
                {"id": "I2", "display_name": "Second"}
            ]
        }))
        .unwrap();

        assert_eq!(author.last_known_institution.unwrap().id, "I1");
    }

    #[test]
    fn test_authorship_requires_author() {
        let result = Authorship::from_json(&json!({"institutions": []}));
        assert!(matches!(
            result,
            Err(OpenAlexError::Mapping { entity: "Authorship", .. })
        ));
    }

    #[test]
    fn test_authorship_with_institutions() {
        let authorship = Authorship::from_json(&json!({
            "author": {"id": "A1", "display_name": "Jane Smith"},
            "institutions": [{"id": "I1", "display_name": "Test University"}]
        }))
        .unwrap();

        assert_eq!(authorship.author.display_name, "Jane Smith");
        assert_eq!(authorship.institutions.len(), 1);
    }
}
