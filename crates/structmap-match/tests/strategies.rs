//! Integration tests for the matching strategies over built hierarchies.
//!
//! These exercise the full pipeline: register descriptors, enumerate both
//! sides' property paths, and compare every (source, destination) pair
//! under a strategy.

use structmap_match::{MatchContext, PropertyNameInfo, build_property_paths, matches};
use structmap_model::{
    MatchOptions, MemberDescriptor, Side, StrategyKind, TypeDescriptor, TypeName, TypeRef,
    TypeRegistry,
};

fn name(s: &str) -> TypeName {
    TypeName::new(s).unwrap()
}

fn string_ty() -> TypeRef {
    TypeRef::concrete(name("String"))
}

/// Source dotted paths matching the given destination path.
fn matching_sources(
    source: &PropertyNameInfo,
    destination: &PropertyNameInfo,
    dest_path: &str,
    kind: StrategyKind,
) -> Vec<String> {
    let dest = destination
        .paths
        .iter()
        .find(|p| p.dotted() == dest_path)
        .unwrap_or_else(|| panic!("destination path {dest_path} not enumerated"));
    source
        .paths
        .iter()
        .filter(|candidate| {
            let ctx = MatchContext::new(source, candidate, dest);
            matches(kind, &ctx)
        })
        .map(|p| p.dotted())
        .collect()
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
    registry.register(
        TypeDescriptor::new(name("OrderDTO")).property("customerAddressStreet", string_ty()),
    );
    registry
}

fn sides(
    registry: &TypeRegistry,
    source_root: &str,
    dest_root: &str,
) -> (PropertyNameInfo, PropertyNameInfo) {
    let options = MatchOptions::default();
    (
        build_property_paths(registry, &name(source_root), Side::Source, &options),
        build_property_paths(registry, &name(dest_root), Side::Destination, &options),
    )
}

#[test]
fn standard_flattens_nested_path() {
    let registry = order_registry();
    let (source, destination) = sides(&registry, "Order", "OrderDTO");

    let found = matching_sources(
        &source,
        &destination,
        "customerAddressStreet",
        StrategyKind::Standard,
    );
    assert_eq!(found, vec!["customer.address.street"]);
}

#[test]
fn loose_accepts_everything_standard_does() {
    let registry = order_registry();
    let (source, destination) = sides(&registry, "Order", "OrderDTO");

    let found = matching_sources(
        &source,
        &destination,
        "customerAddressStreet",
        StrategyKind::Loose,
    );
    assert!(found.contains(&"customer.address.street".to_string()));
}

#[test]
fn standard_rejects_dangling_source_segment() {
    let mut registry = TypeRegistry::new();
    registry.register(
        TypeDescriptor::new(name("Order"))
            .property("id", string_ty())
            .property("customer", TypeRef::concrete(name("Customer"))),
    );
    registry.register(TypeDescriptor::new(name("Customer")).property("id", string_ty()));
    registry.register(TypeDescriptor::new(name("Summary")).property("id", string_ty()));

    let (source, destination) = sides(&registry, "Order", "Summary");

    // `customer.id` satisfies the `id` tokens but leaves `customer`
    // unaccounted for; only the direct property qualifies.
    let found = matching_sources(&source, &destination, "id", StrategyKind::Standard);
    assert_eq!(found, vec!["id"]);
}

#[test]
fn loose_keeps_dangling_source_segment() {
    let mut registry = TypeRegistry::new();
    registry.register(
        TypeDescriptor::new(name("Order"))
            .property("customer", TypeRef::concrete(name("Customer"))),
    );
    registry.register(TypeDescriptor::new(name("Customer")).property("id", string_ty()));
    registry.register(TypeDescriptor::new(name("Summary")).property("id", string_ty()));

    let (source, destination) = sides(&registry, "Order", "Summary");

    assert!(matching_sources(&source, &destination, "id", StrategyKind::Standard).is_empty());
    assert_eq!(
        matching_sources(&source, &destination, "id", StrategyKind::Loose),
        vec!["customer.id"]
    );
}

#[test]
fn loose_matches_unequal_nesting_depth() {
    let mut registry = TypeRegistry::new();
    registry.register(TypeDescriptor::new(name("Root")).property("a", TypeRef::concrete(name("A"))));
    registry.register(TypeDescriptor::new(name("A")).property("b", TypeRef::concrete(name("B"))));
    registry.register(TypeDescriptor::new(name("B")).property("c", TypeRef::concrete(name("C"))));
    registry.register(TypeDescriptor::new(name("C")).property("value", string_ty()));

    registry.register(
        TypeDescriptor::new(name("RootView")).property("aa", TypeRef::concrete(name("AaView"))),
    );
    registry.register(
        TypeDescriptor::new(name("AaView")).property("bb", TypeRef::concrete(name("BbView"))),
    );
    registry.register(TypeDescriptor::new(name("BbView")).property("value", string_ty()));

    let (source, destination) = sides(&registry, "Root", "RootView");

    let loose = matching_sources(&source, &destination, "aa.bb.value", StrategyKind::Loose);
    assert_eq!(loose, vec!["a.b.c.value"]);

    let standard = matching_sources(&source, &destination, "aa.bb.value", StrategyKind::Standard);
    assert!(standard.is_empty());
}

#[test]
fn standard_consumes_root_class_tokens() {
    let mut registry = TypeRegistry::new();
    registry.register(
        TypeDescriptor::new(name("Order"))
            .property("customer", TypeRef::concrete(name("Customer"))),
    );
    registry.register(TypeDescriptor::new(name("Customer")).property("id", string_ty()));
    registry.register(
        TypeDescriptor::new(name("Flat")).property("orderCustomer", TypeRef::concrete(name("Customer"))),
    );

    let (source, destination) = sides(&registry, "Order", "Flat");

    // `order` is consumed by the source root type's name, `customer` by the
    // member itself.
    let found = matching_sources(&source, &destination, "orderCustomer", StrategyKind::Standard);
    assert_eq!(found, vec!["customer"]);
}

#[test]
fn standard_consumes_member_type_tokens() {
    let mut registry = TypeRegistry::new();
    registry.register(
        TypeDescriptor::new(name("Person"))
            .property("residence", TypeRef::concrete(name("Address"))),
    );
    registry.register(TypeDescriptor::new(name("Address")).property("street", string_ty()));
    registry.register(
        TypeDescriptor::new(name("PersonView"))
            .property("residenceAddress", TypeRef::concrete(name("Address"))),
    );

    let (source, destination) = sides(&registry, "Person", "PersonView");

    let found = matching_sources(
        &source,
        &destination,
        "residenceAddress",
        StrategyKind::Standard,
    );
    assert_eq!(found, vec!["residence"]);
}

#[test]
fn standard_combines_tokens_across_granularity() {
    let mut registry = TypeRegistry::new();
    registry.register(
        TypeDescriptor::new(name("Invoice"))
            .with_member(MemberDescriptor::field("billing_address", string_ty())),
    );
    registry.register(
        TypeDescriptor::new(name("InvoiceDto")).property("billingAddress", string_ty()),
    );

    let options = MatchOptions::default()
        .with_source_tokenizer(structmap_model::TokenizerStyle::underscore());
    let source = build_property_paths(&registry, &name("Invoice"), Side::Source, &options);
    let destination =
        build_property_paths(&registry, &name("InvoiceDto"), Side::Destination, &options);

    let found = matching_sources(&source, &destination, "billingAddress", StrategyKind::Standard);
    assert_eq!(found, vec!["billing_address"]);
}
