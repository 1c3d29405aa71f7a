use serde::Serialize;
use serde_json::Value;

use crate::error::OpenAlexError;
use crate::models::{FromJson, JsonFields};

macro_rules! topic_level {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        pub struct $name {
            pub id: String,
            pub display_name: String,
        }

        impl FromJson for $name {
            const NAME: &'static str = stringify!($name);

            fn from_json(value: &Value) -> Result<Self, OpenAlexError> {
                let fields = JsonFields::new(Self::NAME, value)?;
                Ok(Self {
                    id: fields.str("id")?,
                    display_name: fields.str("display_name")?,
                })
            }
        }
    };
}

topic_level!(
    /// Top level of the topic hierarchy (e.g. "Physical Sciences").
    Domain
);
topic_level!(
    /// Second level of the topic hierarchy (e.g. "Computer Science").
    Field
);
topic_level!(
    /// Third level of the topic hierarchy (e.g. "Artificial Intelligence").
    Subfield
);

/// A research topic and its place in the domain/field/subfield hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    pub id: String,
    pub display_name: String,
    pub domain: Domain,
    pub field: Field,
    pub subfield: Option<Subfield>,
}

impl FromJson for Topic {
    const NAME: &'static str = "Topic";

    fn from_json(value: &Value) -> Result<Self, OpenAlexError> {
        let fields = JsonFields::new(Self::NAME, value)?;
        Ok(Self {
            id: fields.str("id")?,
            display_name: fields.str("display_name")?,
            domain: fields.nested("domain")?,
            field: fields.nested("field")?,
            subfield: fields.opt_nested("subfield")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_topic_hierarchy() {
        let topic = Topic::from_json(&json!({
            "id": "https://openalex.org/T10017",
            "display_name": "Geological and Geochemical Analysis",
            "subfield": {"id": "https://openalex.org/subfields/1908", "display_name": "Geophysics"},
            "field": {"id": "https://openalex.org/fields/19", "display_name": "Earth and Planetary Sciences"},
            "domain": {"id": "https://openalex.org/domains/3", "display_name": "Physical Sciences"},
            "score": 0.99
        }))
        .unwrap();

        assert_eq!(topic.domain.display_name, "Physical Sciences");
        assert_eq!(topic.field.display_name, "Earth and Planetary Sciences");
        assert_eq!(topic.subfield.unwrap().display_name, "Geophysics");
    }

    #[test]
    fn test_topic_requires_domain() {
        let result = Topic::from_json(&json!({
            "id": "T1",
            "display_name": "Topic",
            "field": {"id": "F1", "display_name": "Field"}
        }));

        assert!(matches!(
            result,
            Err(OpenAlexError::Mapping { entity: "Topic", ref field, .. }) if field == "domain"
        ));
    }

    #[test]
    fn test_level_errors_name_their_type() {
        let result = Subfield::from_json(&json!({"id": "X"}));
        assert!(matches!(
            result,
            Err(OpenAlexError::Mapping { entity: "Subfield", .. })
        ));
    }
}
