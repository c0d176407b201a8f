//! Free-text school search query construction.
//!
//! User input is normalised into alphanumeric tokens; every token must match
//! the school name (case-insensitive containment), restricted to the current
//! school year. The generated statement and its bind parameters are exposed
//! separately so tests can assert on the exact query shape without a live
//! warehouse.

use crate::error::{DataError, Result};

/// Maximum number of rows a free-text search returns.
pub const SEARCH_RESULT_CAP: usize = 10;

/// A validated, tokenised search term.
///
/// Tokens are the maximal runs of ASCII alphanumeric characters in the raw
/// input; everything else acts as a separator. Parsing fails when no tokens
/// remain, so a `SearchTerm` always carries at least one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    tokens: Vec<String>,
}

impl SearchTerm {
    /// Tokenise raw user input.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::EmptySearchTerm`] when the input contains no
    /// alphanumeric characters.
    pub fn parse(raw: &str) -> Result<Self> {
        let tokens: Vec<String> = raw
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();
        if tokens.is_empty() {
            return Err(DataError::EmptySearchTerm);
        }
        Ok(Self { tokens })
    }

    /// The normalised tokens, in input order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// One bind parameter of a generated search statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParameter {
    /// Positional name of the parameter (`token0`, `token1`, ...).
    pub name: String,
    /// Containment pattern bound for the token (`%token%`).
    pub pattern: String,
}

/// A fully-built free-text search statement with its bind parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    statement: String,
    parameters: Vec<SearchParameter>,
}

impl SearchQuery {
    /// Build the search statement for a validated term.
    ///
    /// Each token becomes one case-insensitive containment predicate on the
    /// school name; predicates are ANDed together alongside the current-year
    /// restriction. Tokens are purely alphanumeric, so the generated `ILIKE`
    /// patterns never need escaping.
    #[must_use]
    pub fn for_term(term: &SearchTerm) -> Self {
        let mut statement = String::from(
            "SELECT ncessch, sch_name, school_year FROM directory WHERE school_year_no = 1",
        );
        let mut parameters = Vec::with_capacity(term.tokens().len());
        for (index, token) in term.tokens().iter().enumerate() {
            statement.push_str(&format!(" AND sch_name ILIKE ${}", index + 1));
            parameters.push(SearchParameter {
                name: format!("token{index}"),
                pattern: format!("%{token}%"),
            });
        }
        statement.push_str(&format!(
            " ORDER BY school_year DESC LIMIT {SEARCH_RESULT_CAP}"
        ));
        Self {
            statement,
            parameters,
        }
    }

    /// The generated SQL text.
    #[must_use]
    pub fn statement(&self) -> &str {
        &self.statement
    }

    /// The bind parameters, one per token, in token order.
    #[must_use]
    pub fn parameters(&self) -> &[SearchParameter] {
        &self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_and_whitespace_separate_tokens() {
        let term = SearchTerm::parse("  Lincoln   Elementary!! ").unwrap();
        assert_eq!(term.tokens(), ["Lincoln", "Elementary"]);
    }

    #[test]
    fn mixed_separators_collapse() {
        let term = SearchTerm::parse("st. mary's--school #12").unwrap();
        assert_eq!(term.tokens(), ["st", "mary", "s", "school", "12"]);
    }

    #[test]
    fn input_without_alphanumerics_is_rejected() {
        assert!(matches!(
            SearchTerm::parse("!!! --- ???"),
            Err(DataError::EmptySearchTerm)
        ));
        assert!(matches!(
            SearchTerm::parse(""),
            Err(DataError::EmptySearchTerm)
        ));
    }

    #[test]
    fn query_carries_one_predicate_per_token() {
        let term = SearchTerm::parse("Lincoln Elementary").unwrap();
        let query = SearchQuery::for_term(&term);
        assert_eq!(
            query.statement(),
            "SELECT ncessch, sch_name, school_year FROM directory \
             WHERE school_year_no = 1 \
             AND sch_name ILIKE $1 AND sch_name ILIKE $2 \
             ORDER BY school_year DESC LIMIT 10"
        );
        assert_eq!(
            query.parameters(),
            [
                SearchParameter {
                    name: "token0".to_string(),
                    pattern: "%Lincoln%".to_string(),
                },
                SearchParameter {
                    name: "token1".to_string(),
                    pattern: "%Elementary%".to_string(),
                },
            ]
        );
    }

    #[test]
    fn single_token_query_has_single_predicate() {
        let term = SearchTerm::parse("Roosevelt").unwrap();
        let query = SearchQuery::for_term(&term);
        assert_eq!(query.parameters().len(), 1);
        assert!(query.statement().contains("ILIKE $1"));
        assert!(!query.statement().contains("$2"));
    }

    #[test]
    fn result_cap_is_always_applied() {
        let term = SearchTerm::parse("a b c d e").unwrap();
        let query = SearchQuery::for_term(&term);
        assert!(query.statement().ends_with("LIMIT 10"));
    }
}
