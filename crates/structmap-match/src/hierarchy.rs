//! Property hierarchy builder.
//!
//! Enumerates every reachable member path from a root type, breadth-first,
//! up to the configured depth. A branch stops at an unregistered (opaque)
//! type, at a type with no accessible members, or when it would revisit a
//! type already on the current branch; the same type may still recur on a
//! sibling branch. Building never fails: an unmappable branch simply yields
//! nothing.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use structmap_model::{
    MatchOptions, MemberAccessConfig, MemberView, NameTransform, Resolution, Side, TypeName, TypeRef,
    TypeRegistry, resolve_member_type,
};

use crate::convention::tokenize;
use crate::tokens::Tokens;

/// One step along a property path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    pub member: String,
    /// Tokens from the member's own name.
    pub name_tokens: Tokens,
    /// Tokens from the member's declared (resolved) type's simple name.
    pub type_tokens: Tokens,
    pub ty: TypeRef,
}

/// Ordered member accesses from the root type to one reachable member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyPath {
    pub segments: Vec<PathSegment>,
}

impl PropertyPath {
    pub fn dotted(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.member.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn leaf(&self) -> &PathSegment {
        self.segments
            .last()
            .expect("property path has at least one segment")
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Whether `other` is a strict prefix of this path.
    pub fn starts_with(&self, other: &PropertyPath) -> bool {
        other.segments.len() < self.segments.len()
            && self.segments[..other.segments.len()]
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.member == b.member)
    }
}

/// All reachable property paths for one side of a type pair, with the root
/// type's own tokens recorded once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyNameInfo {
    pub root: TypeName,
    pub root_tokens: Tokens,
    pub paths: Vec<PropertyPath>,
}

/// Builds the reachable property paths for `root` on the given side.
/// Source enumerates readable members, destination writable ones.
pub fn build_property_paths(
    registry: &TypeRegistry,
    root: &TypeName,
    side: Side,
    options: &MatchOptions,
) -> PropertyNameInfo {
    let access = MemberAccessConfig::from(options);
    let tokenizer = options.tokenizer(side);
    let transform = options.transform(side);

    let mut paths = Vec::new();
    let mut queue: Vec<(Vec<PathSegment>, TypeRef, BTreeSet<TypeName>)> = Vec::new();
    let mut visited = BTreeSet::new();
    visited.insert(root.clone());
    queue.push((Vec::new(), TypeRef::concrete(root.clone()), visited));

    let mut head = 0usize;
    while head < queue.len() {
        let (prefix, node, branch) = queue[head].clone();
        head += 1;
        let TypeRef::Concrete {
            name: node_name,
            args: node_args,
        } = &node
        else {
            continue;
        };

        let bindings = node_bindings(registry, node_name, node_args);
        for view in registry.members_of(node_name, access) {
            let wanted = match side {
                Side::Source => view.member.readable,
                Side::Destination => view.member.writable,
            };
            if !wanted {
                continue;
            }

            let ty = member_type(registry, node_name, &bindings, &view);
            let segment = PathSegment {
                name_tokens: tokenize(&view.member.name, tokenizer, transform),
                type_tokens: tokenize(ty.simple_name(), tokenizer, &NameTransform::None),
                member: view.member.name.clone(),
                ty: ty.clone(),
            };
            let mut segments = prefix.clone();
            segments.push(segment);
            let depth = segments.len();
            paths.push(PropertyPath {
                segments: segments.clone(),
            });

            if depth >= options.max_depth {
                continue;
            }
            if let TypeRef::Concrete { name, .. } = &ty {
                // Per-branch cycle guard: a type may recur on a sibling
                // branch, never on its own.
                if registry.contains(name) && !branch.contains(name) {
                    let mut next_branch = branch.clone();
                    next_branch.insert(name.clone());
                    queue.push((segments, ty, next_branch));
                }
            }
        }
    }

    tracing::debug!(
        root = %root,
        side = ?side,
        paths = paths.len(),
        "built property hierarchy"
    );

    PropertyNameInfo {
        root: root.clone(),
        root_tokens: tokenize(root.as_str(), tokenizer, &NameTransform::None),
        paths,
    }
}

/// Bindings supplied by a node's own type arguments.
fn node_bindings(
    registry: &TypeRegistry,
    node: &TypeName,
    args: &[TypeRef],
) -> BTreeMap<String, TypeRef> {
    let Some(descriptor) = registry.descriptor(node) else {
        return BTreeMap::new();
    };
    descriptor
        .params
        .iter()
        .zip(args)
        .map(|(param, arg)| (param.clone(), arg.clone()))
        .collect()
}

/// Resolves a member's declared type at this node: first up the declaring
/// chain (inherited generic members), then against the node's own type
/// arguments. Resolution conflicts truncate the branch instead of failing
/// the build.
fn member_type(
    registry: &TypeRegistry,
    node: &TypeName,
    bindings: &BTreeMap<String, TypeRef>,
    view: &MemberView,
) -> TypeRef {
    let resolved = match resolve_member_type(registry, node, &view.declared_in, &view.member.ty) {
        Ok(Resolution::Resolved(ty)) => ty,
        Ok(Resolution::Unresolved) => view.member.ty.clone(),
        Err(err) => {
            tracing::warn!(
                member = %view.member.name,
                declared_in = %view.declared_in,
                %err,
                "type resolution failed; keeping declared type"
            );
            view.member.ty.clone()
        }
    };
    apply_bindings(&resolved, bindings)
}

fn apply_bindings(ty: &TypeRef, bindings: &BTreeMap<String, TypeRef>) -> TypeRef {
    match ty {
        TypeRef::Variable(v) => bindings.get(v).cloned().unwrap_or_else(|| ty.clone()),
        TypeRef::Concrete { name, args } => TypeRef::Concrete {
            name: name.clone(),
            args: args.iter().map(|a| apply_bindings(a, bindings)).collect(),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct HierarchyKey {
    root: TypeName,
    side: Side,
    options: MatchOptions,
}

/// Cache of built hierarchies keyed by (root type, side, options).
///
/// Duplicate computation under a read/write race is acceptable: building is
/// deterministic, so racing writers insert identical values.
#[derive(Debug, Default)]
pub struct HierarchyCache {
    inner: RwLock<HashMap<HierarchyKey, Arc<PropertyNameInfo>>>,
}

impl HierarchyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(
        &self,
        registry: &TypeRegistry,
        root: &TypeName,
        side: Side,
        options: &MatchOptions,
    ) -> Arc<PropertyNameInfo> {
        let key = HierarchyKey {
            root: root.clone(),
            side,
            options: options.clone(),
        };
        if let Ok(cache) = self.inner.read()
            && let Some(info) = cache.get(&key)
        {
            tracing::trace!(root = %root, side = ?side, "hierarchy cache hit");
            return Arc::clone(info);
        }

        let built = Arc::new(build_property_paths(registry, root, side, options));
        let mut cache = self.inner.write().unwrap_or_else(|e| e.into_inner());
        Arc::clone(cache.entry(key).or_insert(built))
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut cache) = self.inner.write() {
            cache.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use structmap_model::{MemberDescriptor, TypeDescriptor};

    fn name(s: &str) -> TypeName {
        TypeName::new(s).unwrap()
    }

    fn string_ty() -> TypeRef {
        TypeRef::concrete(name("String"))
    }

    fn order_registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register(
            TypeDescriptor::new(name("Order"))
                .property("customer", TypeRef::concrete(name("Customer"))),
        );
        registry.register(
            TypeDescriptor::new(name("Customer"))
                .property("address", TypeRef::concrete(name("Address"))),
        );
        registry.register(TypeDescriptor::new(name("Address")).property("street", string_ty()));
        registry
    }

    #[test]
    fn enumerates_nested_paths_breadth_first() {
        let registry = order_registry();
        let info = build_property_paths(
            &registry,
            &name("Order"),
            Side::Source,
            &MatchOptions::default(),
        );
        let dotted: Vec<String> = info.paths.iter().map(PropertyPath::dotted).collect();
        assert_eq!(
            dotted,
            vec!["customer", "customer.address", "customer.address.street"]
        );
    }

    #[test]
    fn max_depth_truncates_branches() {
        let registry = order_registry();
        let options = MatchOptions::default().with_max_depth(2);
        let info = build_property_paths(&registry, &name("Order"), Side::Source, &options);
        let dotted: Vec<String> = info.paths.iter().map(PropertyPath::dotted).collect();
        assert_eq!(dotted, vec!["customer", "customer.address"]);
    }

    #[test]
    fn cycle_guard_stops_recursive_branch() {
        let mut registry = TypeRegistry::new();
        registry.register(
            TypeDescriptor::new(name("Node"))
                .property("value", string_ty())
                .property("next", TypeRef::concrete(name("Node"))),
        );

        let info = build_property_paths(
            &registry,
            &name("Node"),
            Side::Source,
            &MatchOptions::default(),
        );
        let dotted: Vec<String> = info.paths.iter().map(PropertyPath::dotted).collect();
        // "next" is recorded as a path, but never descended into.
        assert_eq!(dotted, vec!["value", "next"]);
    }

    #[test]
    fn same_type_may_recur_on_sibling_branches() {
        let mut registry = TypeRegistry::new();
        registry.register(
            TypeDescriptor::new(name("Shipment"))
                .property("origin", TypeRef::concrete(name("Address")))
                .property("target", TypeRef::concrete(name("Address"))),
        );
        registry.register(TypeDescriptor::new(name("Address")).property("street", string_ty()));

        let info = build_property_paths(
            &registry,
            &name("Shipment"),
            Side::Source,
            &MatchOptions::default(),
        );
        let dotted: Vec<String> = info.paths.iter().map(PropertyPath::dotted).collect();
        assert!(dotted.contains(&"origin.street".to_string()));
        assert!(dotted.contains(&"target.street".to_string()));
    }

    #[test]
    fn destination_side_requires_writable_members() {
        let mut registry = TypeRegistry::new();
        registry.register(
            TypeDescriptor::new(name("View"))
                .with_member(MemberDescriptor::accessor("editable", string_ty()))
                .with_member(MemberDescriptor::accessor("computed", string_ty()).read_only()),
        );

        let info = build_property_paths(
            &registry,
            &name("View"),
            Side::Destination,
            &MatchOptions::default(),
        );
        let dotted: Vec<String> = info.paths.iter().map(PropertyPath::dotted).collect();
        assert_eq!(dotted, vec!["editable"]);
    }

    #[test]
    fn generic_member_types_resolve_through_instantiation() {
        let mut registry = TypeRegistry::new();
        registry.register(
            TypeDescriptor::new(name("Holder"))
                .with_param("T")
                .property("value", TypeRef::variable("T")),
        );
        registry.register(
            TypeDescriptor::new(name("Profile")).extends(
                name("Holder"),
                vec![TypeRef::concrete(name("Address"))],
            ),
        );
        registry.register(TypeDescriptor::new(name("Address")).property("street", string_ty()));

        let info = build_property_paths(
            &registry,
            &name("Profile"),
            Side::Source,
            &MatchOptions::default(),
        );
        let value = info.paths.iter().find(|p| p.dotted() == "value").unwrap();
        assert_eq!(value.leaf().ty, TypeRef::concrete(name("Address")));
        // The resolved type's members are reachable below the generic member.
        assert!(info.paths.iter().any(|p| p.dotted() == "value.street"));
    }

    #[test]
    fn property_info_round_trips_through_json() {
        let registry = order_registry();
        let info = build_property_paths(
            &registry,
            &name("Order"),
            Side::Source,
            &MatchOptions::default(),
        );
        let json = serde_json::to_string(&info).expect("serialize info");
        let round: PropertyNameInfo = serde_json::from_str(&json).expect("deserialize info");
        assert_eq!(round, info);
    }

    #[test]
    fn cache_returns_shared_instance() {
        let registry = order_registry();
        let cache = HierarchyCache::new();
        let options = MatchOptions::default();
        let first = cache.get_or_build(&registry, &name("Order"), Side::Source, &options);
        let second = cache.get_or_build(&registry, &name("Order"), Side::Source, &options);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }
}
