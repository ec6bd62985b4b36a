//! Type and member descriptors.
//!
//! Descriptors stand in for runtime reflection: whatever enumerates members
//! (hand-written fixtures, a derive macro, a format adapter) produces these
//! plain structs, and everything downstream is agnostic to where they came
//! from.

use serde::{Deserialize, Serialize};

use crate::TypeName;

/// Declared type of a member or supertype argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    /// A named type, possibly with type arguments.
    Concrete { name: TypeName, args: Vec<TypeRef> },
    /// A type parameter of the declaring type, e.g. `T`.
    Variable(String),
}

impl TypeRef {
    pub fn concrete(name: TypeName) -> Self {
        Self::Concrete {
            name,
            args: Vec::new(),
        }
    }

    pub fn generic(name: TypeName, args: Vec<TypeRef>) -> Self {
        Self::Concrete { name, args }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Simple name used for type-token derivation. For a variable this is
    /// the variable's own name; callers resolve variables first when a
    /// concrete leaf type is known.
    pub fn simple_name(&self) -> &str {
        match self {
            Self::Concrete { name, .. } => name.as_str(),
            Self::Variable(v) => v.as_str(),
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }

    pub fn args(&self) -> &[TypeRef] {
        match self {
            Self::Concrete { args, .. } => args,
            Self::Variable(_) => &[],
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variable(v) => f.write_str(v),
            Self::Concrete { name, args } => {
                f.write_str(name.as_str())?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
        }
    }
}

/// One inheritance edge: a supertype together with the type arguments the
/// subtype supplies for it. Declaration order of a descriptor's supertype
/// list is the deterministic tie-break for equal-depth member declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupertypeRef {
    pub name: TypeName,
    pub args: Vec<TypeRef>,
}

/// Whether a member is accessed through an accessor/mutator pair or a bare
/// field. Accessors order before fields at equal depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    Accessor,
    Field,
}

/// Member visibility, most visible first. A configured threshold admits
/// members that are at least as visible as the threshold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum AccessLevel {
    #[default]
    Public,
    Protected,
    PackagePrivate,
    Private,
}

impl AccessLevel {
    /// Returns true if a member at `member` visibility is admitted by this
    /// threshold.
    pub fn admits(self, member: AccessLevel) -> bool {
        member <= self
    }
}

/// One accessible member of a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDescriptor {
    pub name: String,
    pub ty: TypeRef,
    pub kind: MemberKind,
    pub access: AccessLevel,
    pub readable: bool,
    pub writable: bool,
}

impl MemberDescriptor {
    /// A public read/write accessor pair.
    pub fn accessor(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            kind: MemberKind::Accessor,
            access: AccessLevel::Public,
            readable: true,
            writable: true,
        }
    }

    /// A public read/write field.
    pub fn field(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            kind: MemberKind::Field,
            ..Self::accessor(name, ty)
        }
    }

    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }

    pub fn with_access(mut self, access: AccessLevel) -> Self {
        self.access = access;
        self
    }
}

/// Full description of one type: its declared type parameters, inheritance
/// edges and directly declared members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: TypeName,
    pub params: Vec<String>,
    pub supertypes: Vec<SupertypeRef>,
    pub members: Vec<MemberDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: TypeName) -> Self {
        Self {
            name,
            params: Vec::new(),
            supertypes: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn extends(mut self, name: TypeName, args: Vec<TypeRef>) -> Self {
        self.supertypes.push(SupertypeRef { name, args });
        self
    }

    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    /// Shorthand for a public read/write accessor member.
    pub fn property(self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.with_member(MemberDescriptor::accessor(name, ty))
    }
}
