//! Implicit mapping builder.
//!
//! Builds a [`TypeMap`] for one type pair: explicit mappings and skips are
//! applied first, then every remaining destination path is matched against
//! the source hierarchy under the configured strategy. Destinations are
//! visited in the hierarchy builder's breadth-first order, and children of
//! an already-mapped path are left untouched.

use std::collections::{BTreeMap, BTreeSet};

use structmap_match::{
    Disambiguation, HierarchyCache, MatchContext, PropertyPath, disambiguate, matches,
};
use structmap_model::{
    AmbiguityPolicy, ConfigError, MatchDegree, MatchDiagnostic, MatchOptions, Result, Side,
    TypeName, TypeRegistry,
};

use crate::typemap::{Mapping, MappingSource, SourceExpression, TypeMap};

/// Configures and assembles one [`TypeMap`].
#[derive(Debug, Clone)]
pub struct TypeMapBuilder {
    source: TypeName,
    destination: TypeName,
    name: Option<String>,
    options: MatchOptions,
    explicit: BTreeMap<String, String>,
    skipped: BTreeSet<String>,
    converter: Option<String>,
    provider: Option<String>,
    condition: Option<String>,
}

impl TypeMapBuilder {
    pub fn new(source: TypeName, destination: TypeName) -> Self {
        Self {
            source,
            destination,
            name: None,
            options: MatchOptions::default(),
            explicit: BTreeMap::new(),
            skipped: BTreeSet::new(),
            converter: None,
            provider: None,
            condition: None,
        }
    }

    /// Distinguishing name; several maps may exist per type pair.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Explicit mapping from a destination path to a source accessor
    /// expression. Shadows implicit matching for that path and everything
    /// below it.
    pub fn map(mut self, destination: impl Into<String>, expression: impl Into<String>) -> Self {
        self.explicit.insert(destination.into(), expression.into());
        self
    }

    /// Excludes a destination path (and its children) from mapping.
    pub fn skip(mut self, destination: impl Into<String>) -> Self {
        self.skipped.insert(destination.into());
        self
    }

    pub fn with_converter(mut self, converter: impl Into<String>) -> Self {
        self.converter = Some(converter.into());
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Assembles the map. Fails on unknown root types, invalid explicit
    /// expressions, and (under [`AmbiguityPolicy::Error`]) ambiguous
    /// matches. "No match found" is never an error.
    pub fn build(self, registry: &TypeRegistry, cache: &HierarchyCache) -> Result<TypeMap> {
        if !registry.contains(&self.source) {
            return Err(ConfigError::UnknownType(self.source.to_string()));
        }
        if !registry.contains(&self.destination) {
            return Err(ConfigError::UnknownType(self.destination.to_string()));
        }

        let mut explicit = BTreeMap::new();
        for (destination, expression) in &self.explicit {
            let parsed =
                SourceExpression::parse(expression, registry, &self.source, &self.options)?;
            explicit.insert(destination.clone(), parsed);
        }

        let source_info = cache.get_or_build(registry, &self.source, Side::Source, &self.options);
        let dest_info =
            cache.get_or_build(registry, &self.destination, Side::Destination, &self.options);

        let mut mappings: Vec<Mapping> = Vec::new();
        let mut claimed: Vec<&PropertyPath> = Vec::new();
        let mut emitted_explicit: BTreeSet<&str> = BTreeSet::new();

        for dest in &dest_info.paths {
            if claimed.iter().any(|mapped| dest.starts_with(mapped)) {
                continue;
            }
            let dotted = dest.dotted();

            if self.skipped.contains(&dotted) {
                mappings.push(Mapping {
                    destination: dotted,
                    source: MappingSource::Unmapped,
                    diagnostic: Some(MatchDiagnostic {
                        degree: MatchDegree::None,
                        rejected: Vec::new(),
                        reason: "explicitly skipped".to_string(),
                    }),
                });
                claimed.push(dest);
                continue;
            }

            if let Some((key, expression)) = explicit.get_key_value(&dotted) {
                mappings.push(Mapping {
                    destination: dotted,
                    source: MappingSource::Expression(expression.as_str().to_string()),
                    diagnostic: None,
                });
                emitted_explicit.insert(key);
                claimed.push(dest);
                continue;
            }

            let candidates: Vec<PropertyPath> = source_info
                .paths
                .iter()
                .filter(|candidate| {
                    let ctx = MatchContext::new(&source_info, candidate, dest);
                    matches(self.options.strategy, &ctx)
                })
                .cloned()
                .collect();

            if candidates.is_empty() {
                // Only terminal paths are reported unmapped; an object-typed
                // intermediate is covered by its children.
                if is_terminal(dest, &dest_info.paths) {
                    mappings.push(Mapping {
                        destination: dotted,
                        source: MappingSource::Unmapped,
                        diagnostic: None,
                    });
                }
                continue;
            }

            match disambiguate(dest, &candidates) {
                Disambiguation::Resolved(index) => {
                    mappings.push(Mapping {
                        destination: dotted,
                        source: MappingSource::Path(
                            candidates[index]
                                .segments
                                .iter()
                                .map(|s| s.member.clone())
                                .collect(),
                        ),
                        diagnostic: None,
                    });
                    claimed.push(dest);
                }
                Disambiguation::Ambiguous { candidates } => match self.options.ambiguity {
                    AmbiguityPolicy::Error => {
                        return Err(ConfigError::AmbiguousMatch {
                            destination: dotted,
                            candidates,
                        });
                    }
                    AmbiguityPolicy::Ignore => {
                        tracing::warn!(
                            destination = %dotted,
                            candidates = ?candidates,
                            "ambiguous match left unmapped"
                        );
                        mappings.push(Mapping {
                            destination: dotted,
                            source: MappingSource::Unmapped,
                            diagnostic: Some(MatchDiagnostic::ambiguous(candidates)),
                        });
                        claimed.push(dest);
                    }
                },
            }
        }

        // Explicit destinations outside the enumerated hierarchy (beyond the
        // depth bound or on opaque types) are still honored.
        for (destination, expression) in &explicit {
            if !emitted_explicit.contains(destination.as_str()) {
                mappings.push(Mapping {
                    destination: destination.clone(),
                    source: MappingSource::Expression(expression.as_str().to_string()),
                    diagnostic: None,
                });
            }
        }

        tracing::debug!(
            source = %self.source,
            destination = %self.destination,
            mapped = mappings.iter().filter(|m| m.is_mapped()).count(),
            unmapped = mappings.iter().filter(|m| !m.is_mapped()).count(),
            "type map assembled"
        );

        Ok(TypeMap {
            source: self.source,
            destination: self.destination,
            name: self.name,
            options: self.options,
            mappings,
            converter: self.converter,
            provider: self.provider,
            condition: self.condition,
        })
    }
}

fn is_terminal(path: &PropertyPath, all: &[PropertyPath]) -> bool {
    !all.iter().any(|other| other.starts_with(path))
}
