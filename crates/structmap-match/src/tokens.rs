use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered token sequence derived from one name. Original case is retained;
/// comparisons are ASCII case-insensitive per token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tokens(Vec<String>);

impl Tokens {
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Case-insensitive token equality.
    pub fn eq_token(a: &str, b: &str) -> bool {
        a.eq_ignore_ascii_case(b)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.iter().any(|t| Self::eq_token(t, token))
    }

    /// Whether any token appears, case-insensitively, in `other`.
    pub fn shares_any(&self, other: &Tokens) -> bool {
        self.iter().any(|t| other.contains(t))
    }
}

impl fmt::Display for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl<'a> IntoIterator for &'a Tokens {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_ignores_case() {
        let tokens = Tokens::new(vec!["Customer".to_string(), "ID".to_string()]);
        assert!(tokens.contains("customer"));
        assert!(tokens.contains("id"));
        assert!(!tokens.contains("ident"));
    }

    #[test]
    fn shares_any_finds_overlap() {
        let a = Tokens::new(vec!["order".to_string(), "total".to_string()]);
        let b = Tokens::new(vec!["Total".to_string()]);
        assert!(a.shares_any(&b));
        assert!(!a.shares_any(&Tokens::new(vec!["price".to_string()])));
    }
}
