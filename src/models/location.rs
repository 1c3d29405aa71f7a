use serde::Serialize;
use serde_json::Value;

use crate::error::OpenAlexError;
use crate::models::{FromJson, JsonFields, Source};

/// Where a work is hosted, and whether that copy is open access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub is_oa: bool,
    pub landing_page_url: Option<String>,
    pub pdf_url: Option<String>,
    pub license: Option<String>,
    /// `submittedVersion`, `acceptedVersion` or `publishedVersion`.
    pub version: Option<String>,
    pub source: Option<Source>,
}

impl FromJson for Location {
    const NAME: &'static str = "Location";

    fn from_json(value: &Value) -> Result<Self, OpenAlexError> {
        let fields = JsonFields::new(Self::NAME, value)?;
        Ok(Self {
            is_oa: fields.opt_bool("is_oa")?.unwrap_or(false),
            landing_page_url: fields.opt_str("landing_page_url")?,
            pdf_url: fields.opt_str("pdf_url")?,
            license: fields.opt_str("license")?,
            version: fields.opt_str("version")?,
            source: fields.opt_nested("source")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_location_without_source() {
        let location = Location::from_json(&json!({
            "is_oa": true,
            "landing_page_url": "https://arxiv.org/abs/1",
            "pdf_url": "https://arxiv.org/pdf/1",
            "source": null
        }))
        .unwrap();

        assert!(location.is_oa);
        assert!(location.source.is_none());
        assert!(location.license.is_none());
    }

    #[test]
    fn test_location_missing_flag_is_closed() {
        let location = Location::from_json(&json!({})).unwrap();
        assert!(!location.is_oa);
    }
}
