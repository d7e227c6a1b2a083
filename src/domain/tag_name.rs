//! Tag Names
//!
//! A `TagName` is always held in comparable (lower-cased) form. The only way
//! to build one is through `comparable_name`, so every tag that reaches the
//! store is already normalized.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DomainError, DomainResult};

/// Lower-case `s`. Defines the equality class for every tag lookup.
pub fn comparable_name(s: &str) -> String {
    s.to_lowercase()
}

/// Normalized, non-blank tag name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagName(String);

impl TagName {
    /// Normalize `raw`, rejecting names that are empty or only whitespace.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let name = comparable_name(raw);
        if name.trim().is_empty() {
            return Err(DomainError::Validation("name can't be blank".to_string()));
        }
        Ok(Self(name))
    }

    /// Wrap a value read back from the `tags` table.
    pub(crate) fn from_stored(stored: String) -> Self {
        Self(comparable_name(&stored))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for TagName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TagName> for String {
    fn from(name: TagName) -> Self {
        name.0
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TagName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TagName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("Ruby", "ruby")]
    #[case("RUBY", "ruby")]
    #[case("ruby on Rails", "ruby on rails")]
    #[case("ÜBER", "über")]
    #[case("  Spaced  ", "  spaced  ")]
    fn test_comparable_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(comparable_name(input), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_parse_rejects_blank(#[case] input: &str) {
        let err = TagName::parse(input).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_parse_normalizes() {
        let name = TagName::parse("Rails").unwrap();
        assert_eq!(name, "rails");
        assert_eq!(name.to_string(), "rails");
    }

    #[test]
    fn test_deserialize_normalizes_and_validates() {
        let name: TagName = serde_json::from_str("\"PyThOn\"").unwrap();
        assert_eq!(name.as_str(), "python");
        assert!(serde_json::from_str::<TagName>("\" \"").is_err());
    }

    proptest! {
        #[test]
        fn comparable_name_is_idempotent(s in "\\PC*") {
            let once = comparable_name(&s);
            prop_assert_eq!(comparable_name(&once), once);
        }

        #[test]
        fn case_variants_share_a_name(s in "[a-zA-Z][a-zA-Z0-9 ]{0,20}") {
            let upper = TagName::parse(&s.to_uppercase()).unwrap();
            let lower = TagName::parse(&s.to_lowercase()).unwrap();
            prop_assert_eq!(upper, lower);
        }
    }
}
