//! Response model of the dictionary service.
//!
//! An entry is kept as raw JSON and only the fields the lookup reads are
//! inspected: `meanings[0].definitions[0].definition` and
//! `phonetics[0].audio`. Anything else in the entry, or in later entries,
//! may have any shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::LookupError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entry(Value);

impl Entry {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// First definition of the first meaning.
    ///
    /// `Ok(None)` when `meanings` or `definitions` is an empty array. A
    /// missing or mistyped field on that path is malformed.
    pub fn first_definition(&self) -> Result<Option<&str>, LookupError> {
        let meanings = array_field(&self.0, "meanings")?;
        let Some(meaning) = meanings.first() else {
            return Ok(None);
        };

        let definitions = array_field(meaning, "definitions")?;
        let Some(definition) = definitions.first() else {
            return Ok(None);
        };

        definition
            .get("definition")
            .and_then(Value::as_str)
            .map(Some)
            .ok_or_else(|| LookupError::Malformed("definition is not a string".to_string()))
    }

    /// `phonetics[0].audio`; absent, null or non-string all read as `None`
    pub fn first_audio(&self) -> Option<&str> {
        self.0
            .get("phonetics")
            .and_then(Value::as_array)
            .and_then(|phonetics| phonetics.first())
            .and_then(|phonetic| phonetic.get("audio"))
            .and_then(Value::as_str)
    }
}

fn array_field<'a>(value: &'a Value, field: &str) -> Result<&'a Vec<Value>, LookupError> {
    value
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| LookupError::Malformed(format!("{field} is not an array")))
}
