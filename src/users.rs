//! User identity attached to agent requests

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// User on whose behalf requests are processed
///
/// Single-user applications configure one `User` at build time; it is passed
/// to every agent invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct User {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form attributes agents may consult (location, locale, ...)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
}

impl User {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Builder method to set the display name
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder method to add an attribute
    pub fn with_attribute<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_builder() {
        let user = User::new("u-1")
            .with_name("Ada")
            .with_attribute("city", "Baltimore");

        assert_eq!(user.id, "u-1");
        assert_eq!(user.name.as_deref(), Some("Ada"));
        assert_eq!(user.attribute("city"), Some("Baltimore"));
        assert_eq!(user.attribute("zip"), None);
    }
}
