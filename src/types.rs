//! Core record types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A person record as fetched, stored and reported
///
/// Every field is optional; a record with nothing set is still valid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Full name, conventionally "First Last"
    pub name: Option<String>,
    /// Language label
    pub language: Option<String>,
    /// Source identifier (not unique)
    pub id: Option<String>,
    /// Free-text biography
    pub bio: Option<String>,
    /// Version number
    pub version: Option<f64>,
}

impl Person {
    /// Build a person from a JSON object, treating fields of the wrong type as absent
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(String::from);

        Person {
            name: text("name"),
            language: text("language"),
            id: text("id"),
            bio: text("bio"),
            version: object.get("version").and_then(Value::as_f64),
        }
    }

    /// Split the full name for storage
    pub fn name_parts(&self) -> NameParts {
        NameParts::split(self.name.as_deref())
    }
}

/// First and last name as stored in separate columns
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameParts {
    /// Everything before the first space
    pub first: Option<String>,
    /// Everything after the first space
    pub last: Option<String>,
}

impl NameParts {
    /// Split on the first space only
    ///
    /// `"Mary Ann Smith"` becomes `("Mary", "Ann Smith")`; a single token has no last name.
    pub fn split(name: Option<&str>) -> Self {
        match name {
            None => NameParts::default(),
            Some(name) => match name.split_once(' ') {
                Some((first, last)) => NameParts {
                    first: Some(first.to_string()),
                    last: Some(last.to_string()),
                },
                None => NameParts {
                    first: Some(name.to_string()),
                    last: None,
                },
            },
        }
    }

    /// Rebuild the full name, joining present parts with a single space
    pub fn join(&self) -> Option<String> {
        match (&self.first, &self.last) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        }
    }
}
