use std::fmt;

/// Configuration-level contradictions the caller must fix before a type pair
/// is usable. "No match found" is never an error; matching APIs return empty
/// results instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    AmbiguousMatch {
        destination: String,
        candidates: Vec<String>,
    },
    ConflictingBindings {
        owner: String,
        variable: String,
        bindings: Vec<String>,
    },
    InvalidSourceExpression {
        expression: String,
        reason: String,
    },
    DuplicateTypeMap {
        source: String,
        destination: String,
        name: Option<String>,
    },
    UnknownType(String),
    InvalidTypeName(String),
}

// Hand-written rather than derived via thiserror: the `source` field of
// `DuplicateTypeMap` is a plain String, which thiserror would otherwise
// infer as the error source.
impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousMatch {
                destination,
                candidates,
            } => write!(
                f,
                "ambiguous match for destination '{destination}': candidates {candidates:?}"
            ),
            Self::ConflictingBindings {
                owner,
                variable,
                bindings,
            } => write!(
                f,
                "conflicting bindings for type variable '{variable}' of {owner}: {bindings:?}"
            ),
            Self::InvalidSourceExpression { expression, reason } => {
                write!(f, "invalid source expression '{expression}': {reason}")
            }
            Self::DuplicateTypeMap {
                source,
                destination,
                name,
            } => write!(
                f,
                "type map already registered for {source} -> {destination} (name {name:?})"
            ),
            Self::UnknownType(name) => write!(f, "unknown type: {name}"),
            Self::InvalidTypeName(name) => write!(f, "invalid type name: {name:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

pub type Result<T> = std::result::Result<T, ConfigError>;
