//! Generic type resolution.
//!
//! Computes the concrete type bound to a type variable by walking every
//! declaration chain from a concrete leaf type up through the inheritance
//! lattice to the declaration that owns the variable, composing one
//! substitution frame per edge. A variable never narrowed anywhere resolves
//! to [`Resolution::Unresolved`], never to a guessed fallback type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Result, SupertypeRef, TypeName, TypeRef, TypeRegistry};

/// Outcome of resolving a type variable. `Unresolved` is a first-class
/// result callers must branch on, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Resolved(TypeRef),
    Unresolved,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn resolved(&self) -> Option<&TypeRef> {
        match self {
            Self::Resolved(ty) => Some(ty),
            Self::Unresolved => None,
        }
    }
}

/// Substitution environment for one type in a declaration chain: what each
/// of its type parameters is bound to, viewed from the concrete leaf.
type BindingFrame = BTreeMap<String, Resolution>;

/// Resolves the type bound to `param` of `owner` when reached from the
/// concrete `leaf` type.
///
/// Every chain from `leaf` to `owner` is resolved independently; chains
/// that bind the variable must agree, otherwise the lattice carries
/// contradictory declarations and a [`ConfigError::ConflictingBindings`] is
/// raised. Chains that never narrow the variable contribute nothing.
pub fn resolve_variable(
    registry: &TypeRegistry,
    leaf: &TypeName,
    owner: &TypeName,
    param: &str,
) -> Result<Resolution> {
    let mut chains = Vec::new();
    let mut current = Vec::new();
    collect_chains(registry, leaf, owner, &mut current, &mut chains);

    let mut bound: Option<TypeRef> = None;
    let mut conflicts: Vec<String> = Vec::new();
    for chain in &chains {
        let frame = compose_frames(registry, leaf, chain);
        match frame.get(param) {
            Some(Resolution::Resolved(ty)) => match &bound {
                None => bound = Some(ty.clone()),
                Some(existing) if existing == ty => {}
                Some(existing) => {
                    if conflicts.is_empty() {
                        conflicts.push(existing.to_string());
                    }
                    conflicts.push(ty.to_string());
                }
            },
            _ => {}
        }
    }

    if !conflicts.is_empty() {
        return Err(ConfigError::ConflictingBindings {
            owner: owner.to_string(),
            variable: param.to_string(),
            bindings: conflicts,
        });
    }

    Ok(match bound {
        Some(ty) => Resolution::Resolved(ty),
        None => Resolution::Unresolved,
    })
}

/// Resolves a member's declared type at a concrete `leaf` type, where the
/// member was declared by `declaring` (possibly a generic supertype).
///
/// Generic arguments are resolved recursively; arguments whose variables
/// cannot be narrowed stay in place as variables, while a member whose
/// entire type is an unnarrowed variable resolves to `Unresolved`.
pub fn resolve_member_type(
    registry: &TypeRegistry,
    leaf: &TypeName,
    declaring: &TypeName,
    ty: &TypeRef,
) -> Result<Resolution> {
    match ty {
        TypeRef::Variable(v) => resolve_variable(registry, leaf, declaring, v),
        TypeRef::Concrete { name, args } => {
            let mut resolved_args = Vec::with_capacity(args.len());
            for arg in args {
                let resolved = resolve_member_type(registry, leaf, declaring, arg)?;
                resolved_args.push(match resolved {
                    Resolution::Resolved(t) => t,
                    Resolution::Unresolved => arg.clone(),
                });
            }
            Ok(Resolution::Resolved(TypeRef::Concrete {
                name: name.clone(),
                args: resolved_args,
            }))
        }
    }
}

/// Depth-first enumeration of every edge chain from `current` to `owner`.
fn collect_chains<'r>(
    registry: &'r TypeRegistry,
    current: &TypeName,
    owner: &TypeName,
    path: &mut Vec<&'r SupertypeRef>,
    chains: &mut Vec<Vec<&'r SupertypeRef>>,
) {
    if current == owner {
        chains.push(path.clone());
        return;
    }
    let Some(descriptor) = registry.descriptor(current) else {
        return;
    };
    for supertype in &descriptor.supertypes {
        // Inheritance lattices are acyclic; guard anyway so malformed
        // descriptors cannot hang resolution.
        if path.iter().any(|edge| edge.name == supertype.name) {
            continue;
        }
        path.push(supertype);
        collect_chains(registry, &supertype.name, owner, path, chains);
        path.pop();
    }
}

/// Composes substitution frames leaf-to-root along one chain, returning the
/// binding frame in effect at the chain's final type.
fn compose_frames(
    registry: &TypeRegistry,
    leaf: &TypeName,
    chain: &[&SupertypeRef],
) -> BindingFrame {
    // The concrete leaf is used raw: its own parameters start unbound.
    let mut frame: BindingFrame = registry
        .descriptor(leaf)
        .map(|d| {
            d.params
                .iter()
                .map(|p| (p.clone(), Resolution::Unresolved))
                .collect()
        })
        .unwrap_or_default();

    for edge in chain {
        let mut next = BindingFrame::new();
        if let Some(parent) = registry.descriptor(&edge.name) {
            for (i, param) in parent.params.iter().enumerate() {
                let bound = match edge.args.get(i) {
                    Some(arg) => substitute(arg, &frame),
                    // Raw extension of a generic supertype narrows nothing.
                    None => Resolution::Unresolved,
                };
                next.insert(param.clone(), bound);
            }
        }
        frame = next;
    }
    frame
}

/// Applies a child's binding frame to one supplied type argument.
fn substitute(arg: &TypeRef, frame: &BindingFrame) -> Resolution {
    match arg {
        TypeRef::Variable(v) => frame
            .get(v)
            .cloned()
            .unwrap_or(Resolution::Unresolved),
        TypeRef::Concrete { name, args } => {
            let substituted = args
                .iter()
                .map(|a| match substitute(a, frame) {
                    Resolution::Resolved(t) => t,
                    Resolution::Unresolved => a.clone(),
                })
                .collect();
            Resolution::Resolved(TypeRef::Concrete {
                name: name.clone(),
                args: substituted,
            })
        }
    }
}
