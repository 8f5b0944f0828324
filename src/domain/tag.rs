//! Free-form tag label with case-insensitive identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A label attached to a note.
///
/// Tags keep the spelling they were created with for display, but compare
/// and hash case-insensitively, so `Work` and `work` are the same tag.
/// A leading `#` (the search shorthand) is stripped.
///
/// # Validation Rules
/// - Non-empty after trimming and stripping `#`
/// - Inner whitespace is kept (`machine learning` is one tag)
///
/// # Examples
///
/// ```
/// use garden::domain::Tag;
///
/// let tag = Tag::new("#Work").unwrap();
/// assert_eq!(tag.as_str(), "Work");
/// assert_eq!(tag, Tag::new("work").unwrap());
/// ```
#[derive(Clone)]
pub struct Tag {
    display: String,
    key: String,
}

/// Error returned when parsing an invalid tag.
#[derive(Debug, Clone)]
pub struct ParseTagError(String);

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseTagError {}

impl Tag {
    /// Creates a tag from user input.
    ///
    /// # Errors
    ///
    /// Returns `ParseTagError` if the tag is empty after trimming.
    pub fn new(s: &str) -> Result<Self, ParseTagError> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('#').unwrap_or(trimmed).trim_start();

        if trimmed.is_empty() {
            return Err(ParseTagError("tag cannot be empty".to_string()));
        }

        Ok(Self {
            display: trimmed.to_string(),
            key: trimmed.to_lowercase(),
        })
    }

    /// Returns the tag as originally written.
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// Returns true if `other` names this tag, ignoring case and a leading `#`.
    pub fn matches(&self, other: &str) -> bool {
        let other = other.trim();
        let other = other.strip_prefix('#').unwrap_or(other).trim_start();
        self.key == other.to_lowercase()
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{}\")", self.display)
    }
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.display)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn keeps_original_spelling() {
        let tag = Tag::new("  Rust ").unwrap();
        assert_eq!(tag.as_str(), "Rust");
        assert_eq!(tag.to_string(), "Rust");
    }

    #[test]
    fn strips_hash_prefix() {
        assert_eq!(Tag::new("#daily").unwrap().as_str(), "daily");
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(Tag::new("").is_err());
        assert!(Tag::new("   ").is_err());
        assert!(Tag::new("#").is_err());
    }

    #[test]
    fn keeps_inner_whitespace() {
        let tag = Tag::new(" #Machine Learning ").unwrap();
        assert_eq!(tag.as_str(), "Machine Learning");
        assert!(tag.matches("machine learning"));

        let parsed: Tag = serde_json::from_str("\"machine learning\"").unwrap();
        assert_eq!(parsed, tag);
    }

    #[test]
    fn equality_and_hash_ignore_case() {
        let mut set = HashSet::new();
        set.insert(Tag::new("Work").unwrap());
        set.insert(Tag::new("WORK").unwrap());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn matches_ignores_case_and_hash() {
        let tag = Tag::new("Urgent").unwrap();
        assert!(tag.matches("urgent"));
        assert!(tag.matches("#URGENT"));
        assert!(!tag.matches("urg"));
    }

    #[test]
    fn deserialize_validates() {
        let ok: Tag = serde_json::from_str("\"journal\"").unwrap();
        assert_eq!(ok.as_str(), "journal");
        assert!(serde_json::from_str::<Tag>("\"\"").is_err());
    }
}
