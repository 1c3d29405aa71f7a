use serde::Serialize;
use serde_json::Value;

use crate::error::OpenAlexError;
use crate::models::{FromJson, JsonFields};

/// A university, company, or other research organization.
///
/// Institutions embedded in an authorship carry only a subset of fields;
/// absent counters read as 0 and absent `country_code`/`type` as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Institution {
    pub id: String,
    /// Research Organization Registry identifier.
    pub ror: Option<String>,
    pub display_name: String,
    pub country_code: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub works_count: u64,
    pub cited_by_count: u64,
}

impl FromJson for Institution {
    const NAME: &'static str = "Institution";

    fn from_json(value: &Value) -> Result<Self, OpenAlexError> {
        let fields = JsonFields::new(Self::NAME, value)?;
        Ok(Self {
            id: fields.str("id")?,
            ror: fields.first_str(&["ids.ror", "ror"])?,
            display_name: fields.str("display_name")?,
            country_code: fields.opt_str("country_code")?,
            kind: fields.opt_str("type")?,
            works_count: fields.count("works_count")?,
            cited_by_count: fields.count("cited_by_count")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_institution() {
        let institution = Institution::from_json(&json!({
            "id": "https://openalex.org/I136199984",
            "ids": {"ror": "https://ror.org/03vek6s52"},
            "display_name": "Harvard University",
            "country_code": "US",
            "type": "education",
            "works_count": 500_000,
            "cited_by_count": 20_000_000
        }))
        .unwrap();

        assert_eq!(institution.ror.as_deref(), Some("https://ror.org/03vek6s52"));
        assert_eq!(institution.kind.as_deref(), Some("education"));
        assert_eq!(institution.works_count, 500_000);
    }

    #[test]
    fn test_dehydrated_institution_from_authorship() {
        let institution = Institution::from_json(&json!({
            "id": "https://openalex.org/I1",
            "display_name": "Test University",
            "ror": "https://ror.org/0000"
        }))
        .unwrap();

        assert_eq!(institution.ror.as_deref(), Some("https://ror.org/0000"));
        assert_eq!(institution.works_count, 0);
        assert!(institution.country_code.is_none());
    }
}
