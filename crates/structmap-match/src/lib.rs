//! Property matching engine: tokenization, hierarchy enumeration, matching
//! strategies, and candidate disambiguation.
//!
//! Given a [`structmap_model::TypeRegistry`] and a pair of root types, this
//! crate enumerates each side's reachable property paths, compares them
//! token-by-token under a configured strategy, and ranks competing source
//! candidates for each destination.

#![deny(unsafe_code)]

pub mod convention;
pub mod disambiguate;
pub mod hierarchy;
pub mod strategy;
pub mod tokens;

pub use convention::tokenize;
pub use disambiguate::{Disambiguation, disambiguate};
pub use hierarchy::{
    HierarchyCache, PathSegment, PropertyNameInfo, PropertyPath, build_property_paths,
};
pub use strategy::{LooseStrategy, MatchContext, MatchingStrategy, StandardStrategy, matches};
pub use tokens::Tokens;
