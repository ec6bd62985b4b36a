#![deny(unsafe_code)]

pub mod error;
pub mod ids;
pub mod mapping;
pub mod options;
pub mod registry;
pub mod resolve;
pub mod types;

pub use error::{ConfigError, Result};
pub use ids::TypeName;
pub use mapping::{MatchDegree, MatchDiagnostic};
pub use options::{
    AmbiguityPolicy, MatchOptions, NameTransform, Side, StrategyKind, TokenizerStyle,
};
pub use registry::{MemberAccessConfig, MemberView, TypeRegistry};
pub use resolve::{Resolution, resolve_member_type, resolve_variable};
pub use types::{
    AccessLevel, MemberDescriptor, MemberKind, SupertypeRef, TypeDescriptor, TypeRef,
};
