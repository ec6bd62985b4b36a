//! Type registry: the injected member-enumeration capability.
//!
//! The registry owns descriptors keyed by type name and flattens the
//! inheritance lattice when members are enumerated. Most-derived
//! declarations win over inherited ones of the same name; at equal depth the
//! first supertype in declaration order wins.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::{
    AccessLevel, MatchOptions, MemberDescriptor, MemberKind, TypeDescriptor, TypeName,
};

/// Visibility thresholds applied during member enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberAccessConfig {
    pub method_access: AccessLevel,
    pub field_access: AccessLevel,
    pub include_fields: bool,
}

impl Default for MemberAccessConfig {
    fn default() -> Self {
        Self {
            method_access: AccessLevel::Public,
            field_access: AccessLevel::Public,
            include_fields: true,
        }
    }
}

impl From<&MatchOptions> for MemberAccessConfig {
    fn from(options: &MatchOptions) -> Self {
        Self {
            method_access: options.method_access,
            field_access: options.field_access,
            include_fields: options.include_fields,
        }
    }
}

/// One enumerated member, with the type that declared it and its depth in
/// the inheritance lattice (0 = declared directly).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberView {
    pub member: MemberDescriptor,
    pub declared_in: TypeName,
    pub depth: usize,
}

/// Store of type descriptors. Enumeration is a pure function of the
/// registered descriptors, so a shared registry is safe to read
/// concurrently once populated.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<TypeName, TypeDescriptor>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor, replacing any previous descriptor for the
    /// same name.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> &mut Self {
        self.types.insert(descriptor.name.clone(), descriptor);
        self
    }

    pub fn descriptor(&self, name: &TypeName) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &TypeName) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Enumerates accessible members of `name`, walking the inheritance
    /// lattice breadth-first. An unregistered type yields nothing: matching
    /// fails open per property, never per type pair.
    ///
    /// Output order: by declaration depth, accessors before fields at equal
    /// depth, then declaration order.
    pub fn members_of(&self, name: &TypeName, access: MemberAccessConfig) -> Vec<MemberView> {
        let mut queue: Vec<(TypeName, usize)> = vec![(name.clone(), 0)];
        let mut visited: BTreeSet<TypeName> = BTreeSet::new();
        let mut claimed: BTreeSet<String> = BTreeSet::new();
        let mut collected: Vec<(usize, MemberKind, usize, MemberView)> = Vec::new();
        let mut seq = 0usize;
        let mut head = 0usize;

        while head < queue.len() {
            let (current, depth) = queue[head].clone();
            head += 1;
            if !visited.insert(current.clone()) {
                continue;
            }
            let Some(descriptor) = self.types.get(&current) else {
                continue;
            };

            for member in &descriptor.members {
                if !Self::admitted(member, access) {
                    continue;
                }
                // Most-derived declaration wins; BFS order makes the first
                // claim the shallowest, and sibling order follows supertype
                // declaration order.
                if !claimed.insert(member.name.clone()) {
                    continue;
                }
                collected.push((
                    depth,
                    member.kind,
                    seq,
                    MemberView {
                        member: member.clone(),
                        declared_in: current.clone(),
                        depth,
                    },
                ));
                seq += 1;
            }

            for supertype in &descriptor.supertypes {
                queue.push((supertype.name.clone(), depth + 1));
            }
        }

        collected.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));
        collected.into_iter().map(|(_, _, _, view)| view).collect()
    }

    fn admitted(member: &MemberDescriptor, access: MemberAccessConfig) -> bool {
        match member.kind {
            MemberKind::Accessor => access.method_access.admits(member.access),
            MemberKind::Field => {
                access.include_fields && access.field_access.admits(member.access)
            }
        }
    }
}
