//! Validated table names.
//!
//! Table names come from configuration and are interpolated into SQL, so
//! only plain unquoted PostgreSQL identifiers are accepted.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use vitalwatch_core::error::CoreError;

/// Letters, digits and underscores; must not start with a digit; at most 63
/// bytes (PostgreSQL's identifier limit).
static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("valid regex"));

/// A table name that is safe to splice into a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        if IDENTIFIER.is_match(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(CoreError::Validation(format!(
                "'{name}' is not a valid table name"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn accepts_plain_identifiers() {
        for name in ["vital_readings", "Alerts", "_t1", "a"] {
            assert_eq!(TableName::parse(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn rejects_anything_that_needs_quoting() {
        for name in ["", "1readings", "vital-readings", "readings; DROP TABLE x", "a.b", "naïve"] {
            assert_matches!(TableName::parse(name), Err(CoreError::Validation(_)), "{name}");
        }
    }

    #[test]
    fn rejects_names_over_63_bytes() {
        assert!(TableName::parse(&"a".repeat(63)).is_ok());
        assert!(TableName::parse(&"a".repeat(64)).is_err());
    }
}
