//! Store engine capability
//!
//! Which relational engine sits behind a connection. Only the pattern-match
//! operator depends on it.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreEngine {
    #[default]
    Sqlite,
    Postgres,
    Mysql,
}

impl StoreEngine {
    /// Case-insensitive pattern-match operator for this engine
    pub fn like_operator(self) -> &'static str {
        match self {
            StoreEngine::Postgres => "ILIKE",
            StoreEngine::Sqlite | StoreEngine::Mysql => "LIKE",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreEngine::Sqlite => "sqlite",
            StoreEngine::Postgres => "postgres",
            StoreEngine::Mysql => "mysql",
        }
    }
}

impl fmt::Display for StoreEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StoreEngine::Postgres, "ILIKE")]
    #[case(StoreEngine::Sqlite, "LIKE")]
    #[case(StoreEngine::Mysql, "LIKE")]
    fn test_like_operator(#[case] engine: StoreEngine, #[case] expected: &str) {
        assert_eq!(engine.like_operator(), expected);
    }

    #[test]
    fn test_serde_names() {
        let engine: StoreEngine = serde_json::from_str("\"postgres\"").unwrap();
        assert_eq!(engine, StoreEngine::Postgres);
        assert_eq!(serde_json::to_string(&StoreEngine::Sqlite).unwrap(), "\"sqlite\"");
    }
}
