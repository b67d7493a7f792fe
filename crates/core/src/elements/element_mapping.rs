//! Explicit source -> target element mapping.
//!
//! A bulk restore keeps element ids but drops term bindings, so elements are
//! matched by id. The mapping is derived from the assets actually observed on
//! both sides before any remapping happens.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::assets::Asset;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementMapping {
    map: BTreeMap<String, String>,
    outside_target_schema: Vec<String>,
}

impl ElementMapping {
    /// Derive the mapping from paired source and target assets.
    ///
    /// The element ids seen on the target assets form the target schema.
    /// Source elements that carry a value but fall outside that schema are
    /// left unmapped and listed by [`ElementMapping::outside_target_schema`].
    pub fn derive<'a, S, T>(source_assets: S, target_assets: T) -> Self
    where
        S: IntoIterator<Item = &'a Asset>,
        T: IntoIterator<Item = &'a Asset>,
    {
        let target_schema: BTreeSet<&str> = target_assets
            .into_iter()
            .flat_map(|asset| asset.elements.iter().map(|e| e.id()))
            .collect();

        let mut map = BTreeMap::new();
        let mut outside = BTreeSet::new();
        for element in source_assets.into_iter().flat_map(|asset| &asset.elements) {
            let id = element.id();
            if target_schema.contains(id) {
                map.insert(id.to_string(), id.to_string());
            } else if !element.value.is_empty() {
                outside.insert(id);
            }
        }

        debug!(
            "[ElementMapping] Derived {} element mapping(s), {} outside the target schema",
            map.len(),
            outside.len()
        );

        Self {
            map,
            outside_target_schema: outside.into_iter().map(str::to_string).collect(),
        }
    }

    /// Source element ids with values that no paired target asset has, sorted.
    pub fn outside_target_schema(&self) -> &[String] {
        &self.outside_target_schema
    }

    /// Target element id for a source element id.
    pub fn target_for(&self, source_element_id: &str) -> Option<&str> {
        self.map.get(source_element_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }
}
