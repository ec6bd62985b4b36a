//! Configuration surface consumed by the matcher.

use serde::{Deserialize, Serialize};

use crate::AccessLevel;

/// How member and type names are split into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TokenizerStyle {
    /// Split on lower-to-upper case transitions and letter/digit boundaries.
    #[default]
    CamelCase,
    /// Split on a fixed delimiter character.
    Delimiter(char),
}

impl TokenizerStyle {
    /// The conventional underscore delimiter tokenizer.
    pub fn underscore() -> Self {
        Self::Delimiter('_')
    }
}

/// Optional whole-name transformation applied before tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NameTransform {
    #[default]
    None,
    /// Strip a fixed prefix, case-insensitively. Kept as-is when stripping
    /// would leave an empty name.
    StripPrefix(String),
    /// Strip a fixed suffix, case-insensitively. Kept as-is when stripping
    /// would leave an empty name.
    StripSuffix(String),
}

/// Matching policy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Exact: every destination token consumed in order, dangling source
    /// segments rejected.
    #[default]
    Standard,
    /// Permissive: last destination and last source segments must match.
    Loose,
}

/// What to do when several source paths satisfy one destination path with
/// equal evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AmbiguityPolicy {
    /// Raise a configuration error naming all candidates.
    #[default]
    Error,
    /// Leave the destination path unmapped, recording a diagnostic.
    Ignore,
}

/// Which half of a type pair a hierarchy is built for. Source enumerates
/// readable members, destination enumerates writable ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Source,
    Destination,
}

/// Options controlling tokenization, traversal and matching for one type
/// pair. Hash/Eq so the options participate in hierarchy cache keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchOptions {
    pub source_tokenizer: TokenizerStyle,
    pub destination_tokenizer: TokenizerStyle,
    pub source_transform: NameTransform,
    pub destination_transform: NameTransform,
    pub strategy: StrategyKind,
    /// Maximum number of path segments per property path.
    pub max_depth: usize,
    /// Visibility threshold for accessor members.
    pub method_access: AccessLevel,
    /// Visibility threshold for field members.
    pub field_access: AccessLevel,
    pub include_fields: bool,
    pub ambiguity: AmbiguityPolicy,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            source_tokenizer: TokenizerStyle::CamelCase,
            destination_tokenizer: TokenizerStyle::CamelCase,
            source_transform: NameTransform::None,
            destination_transform: NameTransform::None,
            strategy: StrategyKind::Standard,
            max_depth: 5,
            method_access: AccessLevel::Public,
            field_access: AccessLevel::Public,
            include_fields: true,
            ambiguity: AmbiguityPolicy::Error,
        }
    }
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_source_tokenizer(mut self, tokenizer: TokenizerStyle) -> Self {
        self.source_tokenizer = tokenizer;
        self
    }

    pub fn with_destination_tokenizer(mut self, tokenizer: TokenizerStyle) -> Self {
        self.destination_tokenizer = tokenizer;
        self
    }

    pub fn with_source_transform(mut self, transform: NameTransform) -> Self {
        self.source_transform = transform;
        self
    }

    pub fn with_destination_transform(mut self, transform: NameTransform) -> Self {
        self.destination_transform = transform;
        self
    }

    pub fn with_ambiguity(mut self, ambiguity: AmbiguityPolicy) -> Self {
        self.ambiguity = ambiguity;
        self
    }

    pub fn with_field_access(mut self, level: AccessLevel) -> Self {
        self.field_access = level;
        self
    }

    pub fn with_method_access(mut self, level: AccessLevel) -> Self {
        self.method_access = level;
        self
    }

    pub fn without_fields(mut self) -> Self {
        self.include_fields = false;
        self
    }

    /// Tokenizer for the given side.
    pub fn tokenizer(&self, side: Side) -> &TokenizerStyle {
        match side {
            Side::Source => &self.source_tokenizer,
            Side::Destination => &self.destination_tokenizer,
        }
    }

    /// Name transform for the given side.
    pub fn transform(&self, side: Side) -> &NameTransform {
        match side {
            Side::Source => &self.source_transform,
            Side::Destination => &self.destination_transform,
        }
    }
}
