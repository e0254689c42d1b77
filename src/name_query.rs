use crate::errors::AppError;
use std::fmt;
use std::str::FromStr;

/// How names with a token count other than two are mapped to search fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamePolicy {
    /// Send only the first token as `first_name`; remaining tokens are dropped.
    #[default]
    FirstToken,
    /// Three or more tokens search on the first and the last token, so
    /// `"Mary Ann Smith"` becomes `first_name=Mary&last_name=Smith`.
    FirstLast,
}

impl FromStr for NamePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first_token" => Ok(NamePolicy::FirstToken),
            "first_last" => Ok(NamePolicy::FirstLast),
            other => Err(format!(
                "unknown name policy '{}', expected first_token or first_last",
                other
            )),
        }
    }
}

/// Query parameters for a CCB `individual_search` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub first_name: String,
    pub last_name: Option<String>,
}

impl SearchQuery {
    /// Builds a search from a free-text name.
    ///
    /// Tokens are split on whitespace and passed through untouched; URL
    /// encoding happens when the request is built.
    ///
    /// # Errors
    ///
    /// * `AppError::EmptyInput` - the name is empty or whitespace only.
    pub fn parse(name: &str, policy: NamePolicy) -> Result<Self, AppError> {
        let tokens: Vec<&str> = name.split_whitespace().collect();

        match (tokens.as_slice(), policy) {
            ([], _) => Err(AppError::EmptyInput),
            ([first, last], _) => Ok(Self::full(first, last)),
            ([first, .., last], NamePolicy::FirstLast) => Ok(Self::full(first, last)),
            ([first, ..], _) => Ok(Self {
                first_name: first.to_string(),
                last_name: None,
            }),
        }
    }

    fn full(first: &str, last: &str) -> Self {
        Self {
            first_name: first.to_string(),
            last_name: Some(last.to_string()),
        }
    }

    /// Parameters in the order CCB receives them.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("first_name", self.first_name.as_str())];
        if let Some(ref last) = self.last_name {
            pairs.push(("last_name", last.as_str()));
        }
        pairs
    }

    /// Form-urlencoded rendering of [`SearchQuery::query_pairs`].
    pub fn query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last_name {
            Some(ref last) => write!(f, "{} {}", self.first_name, last),
            None => write!(f, "{}", self.first_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_rejected() {
        for input in ["", " ", "\t\n", "   \u{3000}"] {
            assert_eq!(
                SearchQuery::parse(input, NamePolicy::FirstToken),
                Err(AppError::EmptyInput),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_two_tokens() {
        let query = SearchQuery::parse("Jane Doe", NamePolicy::FirstToken).unwrap();
        assert_eq!(query.first_name, "Jane");
        assert_eq!(query.last_name.as_deref(), Some("Doe"));
        assert_eq!(query.query_string(), "first_name=Jane&last_name=Doe");
    }

    #[test]
    fn test_extra_whitespace_ignored() {
        let query = SearchQuery::parse("  Jane \t  Doe \n", NamePolicy::FirstToken).unwrap();
        assert_eq!(query.query_string(), "first_name=Jane&last_name=Doe");
    }

    #[test]
    fn test_single_token() {
        let query = SearchQuery::parse("Jane", NamePolicy::FirstToken).unwrap();
        assert_eq!(query.last_name, None);
        assert_eq!(query.query_string(), "first_name=Jane");
    }

    #[test]
    fn test_three_tokens_keep_first_only_by_default() {
        let query = SearchQuery::parse("Mary Ann Smith", NamePolicy::FirstToken).unwrap();
        assert_eq!(query.query_string(), "first_name=Mary");
    }

    #[test]
    fn test_first_last_policy() {
        let query = SearchQuery::parse("Mary Ann Smith Jr", NamePolicy::FirstLast).unwrap();
        assert_eq!(query.query_string(), "first_name=Mary&last_name=Jr");

        // One token behaves the same under both policies.
        let query = SearchQuery::parse("Mary", NamePolicy::FirstLast).unwrap();
        assert_eq!(query.query_string(), "first_name=Mary");
    }

    #[test]
    fn test_tokens_are_encoded_not_validated() {
        let query = SearchQuery::parse("O'Brien&Co José", NamePolicy::FirstToken).unwrap();
        assert_eq!(query.first_name, "O'Brien&Co");
        assert_eq!(query.last_name.as_deref(), Some("José"));
        assert_eq!(
            query.query_string(),
            "first_name=O%27Brien%26Co&last_name=Jos%C3%A9"
        );
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("first_token".parse::<NamePolicy>(), Ok(NamePolicy::FirstToken));
        assert_eq!(" FIRST_LAST ".parse::<NamePolicy>(), Ok(NamePolicy::FirstLast));
        assert!("middle".parse::<NamePolicy>().is_err());
    }
}
