//! Property-based tests for pairing, the term identity map and remapping.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};
use termsync_core::assets::{Asset, AssetElement, TermReference};
use termsync_core::remap::{pair_assets, plan_remap};
use termsync_core::taxonomies::{FlatTerm, TaxonomyGroup, TaxonomyTerm, TermIdentityMap};

// =============================================================================
// Generators
// =============================================================================

/// Generates assets with unique codenames and ids `{prefix}{n}`.
fn arb_assets(prefix: &'static str) -> impl Strategy<Value = Vec<Asset>> {
    proptest::collection::hash_set("[a-f]{1,2}", 0..12).prop_map(move |codenames| {
        let mut codenames: Vec<String> = codenames.into_iter().collect();
        codenames.sort();
        codenames
            .into_iter()
            .enumerate()
            .map(|(i, codename)| Asset::new(format!("{prefix}{i}"), codename))
            .collect()
    })
}

/// Generates an asset list together with a shuffled copy of it.
fn arb_assets_and_shuffle(prefix: &'static str) -> impl Strategy<Value = (Vec<Asset>, Vec<Asset>)> {
    arb_assets(prefix).prop_flat_map(|assets| (Just(assets.clone()), Just(assets).prop_shuffle()))
}

/// Generates flattened terms; codenames may repeat.
fn arb_terms(prefix: &'static str) -> impl Strategy<Value = Vec<FlatTerm>> {
    proptest::collection::vec("[a-d]{1,2}", 0..16).prop_map(move |codenames| {
        codenames
            .into_iter()
            .enumerate()
            .map(|(i, codename)| FlatTerm {
                id: format!("{prefix}{i}"),
                name: codename.to_uppercase(),
                codename,
            })
            .collect()
    })
}

fn as_group(id: &str, terms: &[FlatTerm]) -> TaxonomyGroup {
    TaxonomyGroup {
        id: id.to_string(),
        codename: id.to_string(),
        name: id.to_string(),
        terms: terms
            .iter()
            .map(|t| TaxonomyTerm::leaf(&t.id, &t.codename, &t.name))
            .collect(),
    }
}

fn pair_ids(source: &[Asset], target: &[Asset]) -> BTreeSet<(String, String)> {
    pair_assets(source, target)
        .pairs
        .iter()
        .map(|p| (p.source.id.clone(), p.target.id.clone()))
        .collect()
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Assets pair iff their codenames are equal, regardless of list order.
    #[test]
    fn prop_pairing_is_exact_and_order_independent(
        (source, shuffled_source) in arb_assets_and_shuffle("s"),
        (target, shuffled_target) in arb_assets_and_shuffle("t"),
    ) {
        prop_assert_eq!(
            pair_ids(&source, &target),
            pair_ids(&shuffled_source, &shuffled_target)
        );

        let pairing = pair_assets(&source, &target);
        for pair in &pairing.pairs {
            prop_assert_eq!(&pair.source.codename, &pair.target.codename);
        }

        let target_codenames: HashSet<Option<String>> =
            target.iter().map(|a| a.codename.clone()).collect();
        let expected = source
            .iter()
            .filter(|a| target_codenames.contains(&a.codename))
            .count();
        prop_assert_eq!(pairing.pairs.len(), expected);
    }

    /// Building the identity map twice from the same inputs yields the same map,
    /// and every entry links terms with equal codenames.
    #[test]
    fn prop_identity_map_is_pure(
        source in arb_terms("s"),
        target in arb_terms("t"),
    ) {
        let first = TermIdentityMap::build(&source, &target);
        let second = TermIdentityMap::build(&source, &target);
        prop_assert_eq!(&first, &second);

        for term in &source {
            let first_target = target.iter().find(|t| t.codename == term.codename);
            prop_assert_eq!(first.get(&term.id), first_target.map(|t| t.id.as_str()));
        }
    }

    /// Remapped values only ever contain mapped target ids.
    #[test]
    fn prop_unmapped_values_are_dropped_never_fabricated(
        source_terms in arb_terms("s"),
        target_terms in arb_terms("t"),
        value_indexes in proptest::collection::vec(0usize..20, 0..8),
    ) {
        let value_ids: Vec<String> = value_indexes.iter().map(|i| format!("s{i}")).collect();
        let value_refs: Vec<&str> = value_ids.iter().map(String::as_str).collect();

        let source_assets = vec![Asset::new("sa", "photo").with_element(AssetElement::new("e1", &value_refs))];
        let target_assets = vec![Asset::new("ta", "photo").with_element(AssetElement::new("e1", &[]))];

        let outcome = plan_remap(
            &source_assets,
            &[as_group("sg", &source_terms)],
            &target_assets,
            &[as_group("tg", &target_terms)],
        );

        let identity = TermIdentityMap::build(&source_terms, &target_terms);
        let allowed: HashSet<&str> = value_ids
            .iter()
            .filter_map(|id| identity.get(id))
            .collect();

        match outcome.rows.first() {
            Some(row) => {
                let value: &[TermReference] = &row.payload.elements[0].value;
                prop_assert!(!value.is_empty());
                for term in value {
                    prop_assert!(!term.id.is_empty());
                    prop_assert!(allowed.contains(term.id.as_str()));
                }
            }
            None => prop_assert!(allowed.is_empty()),
        }
    }
}
