//! Mapping raw JSON objects onto typed records.
//!
//! Every record implements [`FromJson`] by reading its fields through a
//! [`JsonFields`] view. Field paths may use dotted notation
//! (`ids.orcid`, `summary_stats.h_index`); each segment is looked up in
//! the nested object, and a missing or `null` segment yields `None`.
//! Unknown keys are ignored.

use serde_json::Value;

use crate::error::OpenAlexError;

/// A record that can be built from a JSON object.
pub trait FromJson: Sized {
    /// Record name used in mapping errors (e.g. "Work").
    const NAME: &'static str;

    /// Builds the record from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`OpenAlexError::Mapping`] if the value is not an object, a
    /// required field is missing, or a field has the wrong JSON type.
    fn from_json(value: &Value) -> Result<Self, OpenAlexError>;
}

/// A read-only view over one JSON object, scoped to a record type.
///
/// # Example
///
/// ```rust
/// use openalex::models::JsonFields;
/// use serde_json::json;
///
/// let value = json!({"ids": {"orcid": "https://orcid.org/0000"}, "summary_stats": null});
/// let fields = JsonFields::new("Author", &value).unwrap();
///
/// assert_eq!(fields.opt_str("ids.orcid").unwrap().as_deref(), Some("https://orcid.org/0000"));
/// assert_eq!(fields.opt_u64("summary_stats.h_index").unwrap(), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct JsonFields<'a> {
    entity: &'static str,
    object: &'a serde_json::Map<String, Value>,
}

impl<'a> JsonFields<'a> {
    /// Wraps a JSON value that must be an object.
    ///
    /// # Errors
    ///
    /// Returns [`OpenAlexError::Mapping`] if `value` is not an object.
    pub fn new(entity: &'static str, value: &'a Value) -> Result<Self, OpenAlexError> {
        value
            .as_object()
            .map(|object| Self { entity, object })
            .ok_or_else(|| OpenAlexError::Mapping {
                entity,
                field: "<root>".to_string(),
                reason: format!("expected an object, found {}", type_name(value)),
            })
    }

    /// Resolves a (possibly dotted) path. `null` counts as absent.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&'a Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.object.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        (!current.is_null()).then_some(current)
    }

    /// Reads a required string field.
    ///
    /// # Errors
    ///
    /// Returns a mapping error if the field is absent, `null`, or not a string.
    pub fn str(&self, path: &str) -> Result<String, OpenAlexError> {
        self.opt_str(path)?
            .ok_or_else(|| OpenAlexError::missing_field(self.entity, path))
    }

    /// Reads an optional string field.
    ///
    /// # Errors
    ///
    /// Returns a mapping error if the field is present but not a string.
    pub fn opt_str(&self, path: &str) -> Result<Option<String>, OpenAlexError> {
        self.lookup(path)
            .map(|value| {
                value
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.wrong_type(path, "a string", value))
            })
            .transpose()
    }

    /// Reads the first present string among several candidate paths.
    ///
    /// # Errors
    ///
    /// Returns a mapping error if a present candidate is not a string.
    pub fn first_str(&self, paths: &[&str]) -> Result<Option<String>, OpenAlexError> {
        for path in paths {
            if let Some(value) = self.opt_str(path)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Reads an optional non-negative integer field.
    ///
    /// # Errors
    ///
    /// Returns a mapping error if the field is present but not a non-negative integer.
    pub fn opt_u64(&self, path: &str) -> Result<Option<u64>, OpenAlexError> {
        self.lookup(path)
            .map(|value| {
                value
                    .as_u64()
                    .ok_or_else(|| self.wrong_type(path, "a non-negative integer", value))
            })
            .transpose()
    }

    /// Reads a counter, defaulting to 0 when absent.
    ///
    /// # Errors
    ///
    /// Returns a mapping error if the field is present but not a non-negative integer.
    pub fn count(&self, path: &str) -> Result<u64, OpenAlexError> {
        Ok(self.opt_u64(path)?.unwrap_or_default())
    }

    /// Reads a required signed integer that fits in an `i32`.
    ///
    /// # Errors
    ///
    /// Returns a mapping error if the field is absent or not an `i32`.
    pub fn i32(&self, path: &str) -> Result<i32, OpenAlexError> {
        let value = self
            .lookup(path)
            .ok_or_else(|| OpenAlexError::missing_field(self.entity, path))?;
        value
            .as_i64()
            .and_then(|number| i32::try_from(number).ok())
            .ok_or_else(|| self.wrong_type(path, "a 32-bit integer", value))
    }

    /// Reads an optional boolean field.
    ///
    /// # Errors
    ///
    /// Returns a mapping error if the field is present but not a boolean.
    pub fn opt_bool(&self, path: &str) -> Result<Option<bool>, OpenAlexError> {
        self.lookup(path)
            .map(|value| {
                value
                    .as_bool()
                    .ok_or_else(|| self.wrong_type(path, "a boolean", value))
            })
            .transpose()
    }

    /// Maps a required nested object.
    ///
    /// # Errors
    ///
    /// Returns a mapping error if the field is absent or the nested record fails.
    pub fn nested<T: FromJson>(&self, path: &str) -> Result<T, OpenAlexError> {
        self.opt_nested(path)?
            .ok_or_else(|| OpenAlexError::missing_field(self.entity, path))
    }

    /// Maps an optional nested object.
    ///
    /// # Errors
    ///
    /// Returns a mapping error if the nested record fails.
    pub fn opt_nested<T: FromJson>(&self, path: &str) -> Result<Option<T>, OpenAlexError> {
        self.lookup(path).map(T::from_json).transpose()
    }

    /// Maps a list of nested objects. An absent list is empty.
    ///
    /// # Errors
    ///
    /// Returns a mapping error if the field is not an array or an element fails.
    pub fn list<T: FromJson>(&self, path: &str) -> Result<Vec<T>, OpenAlexError> {
        self.array(path)?.iter().map(T::from_json).collect()
    }

    /// Reads a list of strings. An absent list is empty.
    ///
    /// # Errors
    ///
    /// Returns a mapping error if the field is not an array of strings.
    pub fn str_list(&self, path: &str) -> Result<Vec<String>, OpenAlexError> {
        self.array(path)?
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.wrong_type(path, "an array of strings", item))
            })
            .collect()
    }

    fn array(&self, path: &str) -> Result<&'a [Value], OpenAlexError> {
        match self.lookup(path) {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(self.wrong_type(path, "an array", other)),
        }
    }

    fn wrong_type(&self, path: &str, expected: &str, found: &Value) -> OpenAlexError {
        OpenAlexError::Mapping {
            entity: self.entity,
            field: path.to_string(),
            reason: format!("expected {expected}, found {}", type_name(found)),
        }
    }
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
