//! TypeMap assembly and storage.
//!
//! Builds mapping configurations for (source, destination) type pairs from
//! the matching engine in `structmap-match`, stores finalized maps for
//! concurrent reuse, and persists snapshots as JSON.

#![deny(unsafe_code)]

pub mod builder;
pub mod repository;
pub mod store;
pub mod typemap;

pub use builder::TypeMapBuilder;
pub use repository::{SnapshotMetadata, TypeMapRepository};
pub use store::{TypeMapStore, TypePair};
pub use typemap::{Mapping, MappingSource, SourceExpression, TypeMap, TypeMapSnapshot};
