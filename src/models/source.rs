use serde::Serialize;
use serde_json::Value;

use crate::error::OpenAlexError;
use crate::models::{FromJson, JsonFields};

/// A journal, repository, conference, or other venue that hosts works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    pub id: String,
    /// Linking ISSN.
    pub issn_l: Option<String>,
    pub display_name: String,
    pub publisher: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub homepage_url: Option<String>,
    pub works_count: u64,
    pub cited_by_count: u64,
}

impl FromJson for Source {
    const NAME: &'static str = "Source";

    fn from_json(value: &Value) -> Result<Self, OpenAlexError> {
        let fields = JsonFields::new(Self::NAME, value)?;
        Ok(Self {
            id: fields.str("id")?,
            issn_l: fields.first_str(&["ids.issn_l", "issn_l"])?,
            display_name: fields.str("display_name")?,
            publisher: fields.first_str(&["publisher", "host_organization_name"])?,
            kind: fields.opt_str("type")?,
            homepage_url: fields.opt_str("homepage_url")?,
            works_count: fields.count("works_count")?,
            cited_by_count: fields.count("cited_by_count")?,
        })
    }
}
