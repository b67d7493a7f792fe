//! Asset pairing and per-asset term remapping.

use std::collections::{HashMap, HashSet};

use log::{debug, info};

use super::{
    AssetPair, AssetPairing, AssetSummary, ElementDiff, RemapOutcome, RemapStats, RemapWarning,
    ReportRow,
};
use crate::assets::{Asset, AssetElement, TermReference};
use crate::config::EnvironmentRole;
use crate::elements::ElementMapping;
use crate::taxonomies::{TaxonomyGroup, TermIdentityMap, TermIndex};

/// Pair source assets with target assets by exact codename.
///
/// Pairs follow source order. When several target assets share a codename
/// the first one in target order is used.
pub fn pair_assets<'a>(source: &'a [Asset], target: &'a [Asset]) -> AssetPairing<'a> {
    let mut warnings = Vec::new();

    let mut by_codename: HashMap<&str, &Asset> = HashMap::with_capacity(target.len());
    let mut duplicates: Vec<(&str, Vec<String>)> = Vec::new();
    for asset in target {
        let Some(codename) = asset.codename.as_deref() else {
            continue;
        };
        match by_codename.get(codename) {
            None => {
                by_codename.insert(codename, asset);
            }
            Some(first) => match duplicates.iter_mut().find(|(c, _)| *c == codename) {
                Some((_, ids)) => ids.push(asset.id.clone()),
                None => duplicates.push((codename, vec![first.id.clone(), asset.id.clone()])),
            },
        }
    }
    for (codename, asset_ids) in duplicates {
        warnings.push(RemapWarning::DuplicateAssetCodename {
            asset_codename: codename.to_string(),
            asset_ids,
        });
    }

    let mut pairs = Vec::new();
    for asset in source {
        let Some(codename) = asset.codename.as_deref() else {
            warnings.push(RemapWarning::MissingAssetCodename {
                asset_id: asset.id.clone(),
            });
            continue;
        };
        match by_codename.get(codename) {
            Some(&target) => pairs.push(AssetPair {
                source: asset,
                target,
            }),
            None => warnings.push(RemapWarning::UnmatchedAsset {
                asset_codename: codename.to_string(),
            }),
        }
    }

    AssetPairing { pairs, warnings }
}

/// Computes remapped element values and report rows for asset pairs.
pub struct Remapper<'a> {
    identity: &'a TermIdentityMap,
    source_terms: &'a TermIndex,
    target_terms: &'a TermIndex,
    elements: &'a ElementMapping,
}

impl<'a> Remapper<'a> {
    pub fn new(
        identity: &'a TermIdentityMap,
        source_terms: &'a TermIndex,
        target_terms: &'a TermIndex,
        elements: &'a ElementMapping,
    ) -> Self {
        Self {
            identity,
            source_terms,
            target_terms,
            elements,
        }
    }

    /// Remap every pair. Pairs with nothing to change produce no row.
    pub fn remap_all(&self, pairs: &[AssetPair<'_>]) -> (Vec<ReportRow>, Vec<RemapWarning>) {
        let mut warnings = Vec::new();
        let rows = pairs
            .iter()
            .filter_map(|pair| self.remap_pair(pair, &mut warnings))
            .collect();
        (rows, warnings)
    }

    /// Remap a single pair.
    ///
    /// Returns `None` when no element of the target asset would change.
    pub fn remap_pair(
        &self,
        pair: &AssetPair<'_>,
        warnings: &mut Vec<RemapWarning>,
    ) -> Option<ReportRow> {
        let asset_codename = pair.source.codename_or_empty();
        let mut remapped: Vec<(&str, Vec<TermReference>)> = Vec::new();
        let mut diffs = Vec::new();

        for source_element in &pair.source.elements {
            let Some(target_element_id) = self.elements.target_for(source_element.id()) else {
                continue;
            };
            if remapped.iter().any(|(id, _)| *id == target_element_id) {
                continue;
            }
            let Some(target_element) = pair.target.element(target_element_id) else {
                warnings.push(RemapWarning::ElementMissingOnTarget {
                    asset_codename: asset_codename.to_string(),
                    element_id: target_element_id.to_string(),
                });
                continue;
            };

            let value = self.remap_value(asset_codename, source_element, warnings);
            if value.is_empty() {
                continue;
            }
            if same_terms(&value, &target_element.value) {
                debug!(
                    "[Remapper] Element {} on '{}' already in sync",
                    target_element_id, asset_codename
                );
                continue;
            }

            diffs.push(ElementDiff {
                element_id: target_element_id.to_string(),
                source_terms: self.names(self.source_terms, &source_element.value),
                current_target_terms: self.names(self.target_terms, &target_element.value),
                pending_terms: self.names(self.target_terms, &value),
            });
            remapped.push((target_element_id, value));
        }

        if remapped.is_empty() {
            return None;
        }

        // Untouched target elements are carried over so the replacement
        // never clears a field by omission.
        let elements = pair
            .target
            .elements
            .iter()
            .map(|element| {
                match remapped.iter().find(|(id, _)| *id == element.id()) {
                    Some((_, value)) => AssetElement {
                        element: element.element.clone(),
                        value: value.clone(),
                    },
                    None => element.clone(),
                }
            })
            .collect();

        Some(ReportRow {
            source: AssetSummary::from(pair.source),
            target: AssetSummary::from(pair.target),
            diffs,
            payload: pair.target.with_elements(elements),
        })
    }

    /// Translate a source element's term references into target ids.
    ///
    /// Unmapped ids are dropped and reported; duplicates collapse to one.
    fn remap_value(
        &self,
        asset_codename: &str,
        source_element: &AssetElement,
        warnings: &mut Vec<RemapWarning>,
    ) -> Vec<TermReference> {
        let mut seen = HashSet::new();
        let mut value = Vec::with_capacity(source_element.value.len());
        for term in &source_element.value {
            match self.identity.get(&term.id) {
                Some(target_id) => {
                    if seen.insert(target_id) {
                        value.push(TermReference::new(target_id));
                    }
                }
                None => warnings.push(RemapWarning::UnmappedTerm {
                    asset_codename: asset_codename.to_string(),
                    element_id: source_element.id().to_string(),
                    term_id: term.id.clone(),
                }),
            }
        }
        value
    }

    fn names(&self, index: &TermIndex, value: &[TermReference]) -> Vec<String> {
        value.iter().map(|t| index.name_of(&t.id)).collect()
    }
}

/// Term order carries no meaning, so values are compared as sets.
fn same_terms(left: &[TermReference], right: &[TermReference]) -> bool {
    let left: HashSet<&str> = left.iter().map(|t| t.id.as_str()).collect();
    let right: HashSet<&str> = right.iter().map(|t| t.id.as_str()).collect();
    left == right
}

/// Full remap pass over both environments' fetched state.
///
/// Builds the term indexes and identity map, pairs assets, derives the
/// element mapping, then remaps every pair. Every anomaly ends up as a
/// warning in the outcome.
pub fn plan_remap(
    source_assets: &[Asset],
    source_groups: &[TaxonomyGroup],
    target_assets: &[Asset],
    target_groups: &[TaxonomyGroup],
) -> RemapOutcome {
    let source_terms = TermIndex::from_groups(source_groups);
    let target_terms = TermIndex::from_groups(target_groups);

    let mut warnings: Vec<RemapWarning> = Vec::new();
    for (role, index) in [
        (EnvironmentRole::Source, &source_terms),
        (EnvironmentRole::Target, &target_terms),
    ] {
        warnings.extend(index.duplicate_codenames().into_iter().map(|dup| {
            RemapWarning::DuplicateTermCodename {
                role,
                codename: dup.codename,
                term_ids: dup.term_ids,
            }
        }));
    }

    let identity = TermIdentityMap::build(source_terms.terms(), target_terms.terms());
    info!(
        "[Remapper] Mapped {} of {} source terms to target terms",
        identity.len(),
        source_terms.len()
    );

    let pairing = pair_assets(source_assets, target_assets);
    let elements = ElementMapping::derive(pairing.sources(), pairing.targets());
    warnings.extend(pairing.warnings.iter().cloned());
    warnings.extend(
        elements
            .outside_target_schema()
            .iter()
            .map(|element_id| RemapWarning::ElementNotInTargetSchema {
                element_id: element_id.clone(),
            }),
    );

    let remapper = Remapper::new(&identity, &source_terms, &target_terms, &elements);
    let (rows, remap_warnings) = remapper.remap_all(&pairing.pairs);
    warnings.extend(remap_warnings);

    let stats = RemapStats {
        source_assets: source_assets.len(),
        target_assets: target_assets.len(),
        paired_assets: pairing.pairs.len(),
        source_terms: source_terms.len(),
        target_terms: target_terms.len(),
        mapped_terms: identity.len(),
        assets_to_update: rows.len(),
    };

    RemapOutcome {
        rows,
        warnings,
        stats,
    }
}
