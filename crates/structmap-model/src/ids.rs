use std::fmt;

use crate::ConfigError;

/// Simple name of a type participating in matching.
///
/// Only the simple (unqualified) name matters for token derivation, so this
/// is what descriptors, registries and cache keys carry.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidTypeName(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_names() {
        assert!(TypeName::new("  ").is_err());
        assert!(TypeName::new("").is_err());
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let name = TypeName::new(" Order ").unwrap();
        assert_eq!(name.as_str(), "Order");
    }
}
