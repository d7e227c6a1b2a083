//! Name match queries
//!
//! Builds the `WHERE` clause for tag lookups: a disjunction of exact and
//! substring predicates over the normalized `name` column. Every value goes
//! through `comparable_name` and is bound as a parameter.

use super::engine::StoreEngine;
use crate::domain::comparable_name;

const NAME_COLUMN: &str = "t.name";

/// Upper bound on predicates rendered into one statement
pub const MAX_PREDICATES_PER_STATEMENT: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePredicate {
    /// Normalized name equals the value
    Equals(String),
    /// Normalized name contains the value
    Contains(String),
}

/// Disjunction of name predicates, rendered for one engine
#[derive(Debug, Clone)]
pub struct NameQuery {
    engine: StoreEngine,
    predicates: Vec<NamePredicate>,
}

impl NameQuery {
    pub fn new(engine: StoreEngine) -> Self {
        Self {
            engine,
            predicates: Vec::new(),
        }
    }

    pub fn or_equals(mut self, name: &str) -> Self {
        self.predicates.push(NamePredicate::Equals(comparable_name(name)));
        self
    }

    pub fn or_contains(mut self, fragment: &str) -> Self {
        self.predicates.push(NamePredicate::Contains(comparable_name(fragment)));
        self
    }

    pub fn any_equal<S: AsRef<str>>(engine: StoreEngine, names: &[S]) -> Self {
        names
            .iter()
            .fold(Self::new(engine), |query, name| query.or_equals(name.as_ref()))
    }

    pub fn any_containing<S: AsRef<str>>(engine: StoreEngine, fragments: &[S]) -> Self {
        fragments
            .iter()
            .fold(Self::new(engine), |query, f| query.or_contains(f.as_ref()))
    }

    pub fn predicates(&self) -> &[NamePredicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// SQL conditions and their positional parameters, one per statement.
    ///
    /// Exact predicates collapse into a single `IN (...)` list and substring
    /// predicates are OR-ed. At most `MAX_PREDICATES_PER_STATEMENT`
    /// predicates go into one condition, which keeps each statement under
    /// SQLite's expression depth and variable limits. An empty query renders
    /// no condition at all; callers must not run it, since an absent
    /// condition would match every row.
    pub fn where_clauses(&self) -> Vec<(String, Vec<String>)> {
        self.predicates
            .chunks(MAX_PREDICATES_PER_STATEMENT)
            .map(|chunk| self.render(chunk))
            .collect()
    }

    fn render(&self, predicates: &[NamePredicate]) -> (String, Vec<String>) {
        let operator = self.engine.like_operator();
        let mut exact = Vec::new();
        let mut patterns = Vec::new();

        for predicate in predicates {
            match predicate {
                NamePredicate::Equals(name) => exact.push(name.clone()),
                NamePredicate::Contains(fragment) => {
                    patterns.push(format!("%{}%", escape_like(fragment)))
                }
            }
        }

        let mut clauses = Vec::with_capacity(patterns.len() + 1);
        if !exact.is_empty() {
            let placeholders = vec!["?"; exact.len()].join(", ");
            clauses.push(format!("{} IN ({})", NAME_COLUMN, placeholders));
        }
        for _ in &patterns {
            clauses.push(format!("{} {} ? ESCAPE '\\'", NAME_COLUMN, operator));
        }

        exact.extend(patterns);
        (clauses.join(" OR "), exact)
    }
}

/// Escape LIKE wildcards so `fragment` matches literally.
pub fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn single(query: &NameQuery) -> (String, Vec<String>) {
        let mut clauses = query.where_clauses();
        assert_eq!(clauses.len(), 1);
        clauses.remove(0)
    }

    #[test]
    fn test_empty_query_has_no_clause() {
        let query = NameQuery::any_equal::<&str>(StoreEngine::Sqlite, &[]);
        assert!(query.is_empty());
        assert!(query.where_clauses().is_empty());
    }

    #[test]
    fn test_exact_names_render_as_in_list() {
        let (sql, params) = single(&NameQuery::any_equal(StoreEngine::Sqlite, &["Ruby", "RAILS"]));
        assert_eq!(sql, "t.name IN (?, ?)");
        assert_eq!(params, vec!["ruby", "rails"]);
    }

    #[rstest]
    #[case(StoreEngine::Sqlite, "t.name LIKE ? ESCAPE '\\'")]
    #[case(StoreEngine::Mysql, "t.name LIKE ? ESCAPE '\\'")]
    #[case(StoreEngine::Postgres, "t.name ILIKE ? ESCAPE '\\'")]
    fn test_contains_uses_engine_operator(#[case] engine: StoreEngine, #[case] expected: &str) {
        let (sql, params) = single(&NameQuery::new(engine).or_contains("Rub"));
        assert_eq!(sql, expected);
        assert_eq!(params, vec!["%rub%"]);
    }

    #[test]
    fn test_mixed_predicates() {
        let query = NameQuery::new(StoreEngine::Postgres)
            .or_contains("py")
            .or_equals("Go")
            .or_contains("rs");
        assert_eq!(
            query.predicates(),
            &[
                NamePredicate::Contains("py".to_string()),
                NamePredicate::Equals("go".to_string()),
                NamePredicate::Contains("rs".to_string()),
            ]
        );

        let (sql, params) = single(&query);
        assert_eq!(
            sql,
            "t.name IN (?) OR t.name ILIKE ? ESCAPE '\\' OR t.name ILIKE ? ESCAPE '\\'"
        );
        assert_eq!(params, vec!["go", "%py%", "%rs%"]);
    }

    #[test]
    fn test_large_queries_are_split_into_statements() {
        let names: Vec<String> = (0..1200).map(|i| format!("tag{}", i)).collect();

        let clauses = NameQuery::any_equal(StoreEngine::Sqlite, &names).where_clauses();
        let sizes: Vec<usize> = clauses.iter().map(|(_, params)| params.len()).collect();
        assert_eq!(sizes, vec![500, 500, 200]);
        assert!(clauses.iter().all(|(sql, _)| !sql.contains(" OR ")));

        let clauses = NameQuery::any_containing(StoreEngine::Sqlite, &names).where_clauses();
        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[0].0.matches(" OR ").count(), MAX_PREDICATES_PER_STATEMENT - 1);
        assert_eq!(clauses[2].1.first().map(String::as_str), Some("%tag1000%"));
    }

    #[rstest]
    #[case("50%", "50\\%")]
    #[case("snake_case", "snake\\_case")]
    #[case("back\\slash", "back\\\\slash")]
    #[case("plain", "plain")]
    fn test_escape_like(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_like(input), expected);
    }
}
