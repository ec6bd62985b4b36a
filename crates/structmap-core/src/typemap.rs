//! Finalized mapping configuration for one (source, destination) type pair.

use serde::{Deserialize, Serialize};
use structmap_model::{
    ConfigError, MatchDiagnostic, MatchOptions, MemberAccessConfig, Result, TypeName, TypeRef,
    TypeRegistry,
};

/// Validated dotted accessor expression naming a readable source property,
/// used for explicit mappings (`"customer.address.street"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceExpression(String);

impl SourceExpression {
    /// Parses and validates `expression` against the readable members of
    /// `root`. Validation walks as far as types are registered; an opaque
    /// type along the chain ends validation rather than failing it.
    pub fn parse(
        expression: &str,
        registry: &TypeRegistry,
        root: &TypeName,
        options: &MatchOptions,
    ) -> Result<Self> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Err(ConfigError::InvalidSourceExpression {
                expression: expression.to_string(),
                reason: "expression is empty".to_string(),
            });
        }

        let access = MemberAccessConfig::from(options);
        let mut current = TypeRef::concrete(root.clone());
        for part in expression.split('.') {
            if part.is_empty() {
                return Err(ConfigError::InvalidSourceExpression {
                    expression: expression.to_string(),
                    reason: "empty path segment".to_string(),
                });
            }
            let TypeRef::Concrete { name, .. } = &current else {
                break;
            };
            if !registry.contains(name) {
                break;
            }
            let view = registry
                .members_of(name, access)
                .into_iter()
                .find(|view| view.member.name == part && view.member.readable);
            match view {
                Some(view) => current = view.member.ty.clone(),
                None => {
                    return Err(ConfigError::InvalidSourceExpression {
                        expression: expression.to_string(),
                        reason: format!("no readable property '{part}' on {name}"),
                    });
                }
            }
        }
        Ok(Self(expression.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Where a destination path draws its value from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MappingSource {
    /// Implicitly matched source property path, one member name per step.
    Path(Vec<String>),
    /// Explicitly configured accessor expression.
    Expression(String),
    /// No source; the destination keeps its default value.
    Unmapped,
}

/// One destination property and its resolved source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub destination: String,
    pub source: MappingSource,
    /// Present when the destination could not be mapped cleanly.
    pub diagnostic: Option<MatchDiagnostic>,
}

impl Mapping {
    pub fn is_mapped(&self) -> bool {
        !matches!(self.source, MappingSource::Unmapped)
    }
}

/// Immutable mapping configuration for one type pair. Built once by
/// [`crate::TypeMapBuilder`]; safe to share and read concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMap {
    pub(crate) source: TypeName,
    pub(crate) destination: TypeName,
    pub(crate) name: Option<String>,
    pub(crate) options: MatchOptions,
    pub(crate) mappings: Vec<Mapping>,
    pub(crate) converter: Option<String>,
    pub(crate) provider: Option<String>,
    pub(crate) condition: Option<String>,
}

impl TypeMap {
    pub fn source(&self) -> &TypeName {
        &self.source
    }

    pub fn destination(&self) -> &TypeName {
        &self.destination
    }

    /// Distinguishing name when several maps exist for the same type pair.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Mappings in destination discovery order.
    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    pub fn mapping_for(&self, destination: &str) -> Option<&Mapping> {
        self.mappings.iter().find(|m| m.destination == destination)
    }

    /// Destination paths left without a source.
    pub fn unmapped_destinations(&self) -> Vec<&str> {
        self.mappings
            .iter()
            .filter(|m| !m.is_mapped())
            .map(|m| m.destination.as_str())
            .collect()
    }

    pub fn converter(&self) -> Option<&str> {
        self.converter.as_deref()
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    /// Serializable view of this map for persistence.
    pub fn snapshot(&self) -> TypeMapSnapshot {
        TypeMapSnapshot {
            source: self.source.to_string(),
            destination: self.destination.to_string(),
            name: self.name.clone(),
            mappings: self.mappings.clone(),
            converter: self.converter.clone(),
            provider: self.provider.clone(),
            condition: self.condition.clone(),
        }
    }
}

/// Persistable view of a [`TypeMap`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeMapSnapshot {
    pub source: String,
    pub destination: String,
    pub name: Option<String>,
    pub mappings: Vec<Mapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}
