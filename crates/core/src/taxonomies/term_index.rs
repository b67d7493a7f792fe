//! Term index and cross-environment term identity map.

use std::collections::HashMap;

use super::{FlatTerm, TaxonomyGroup, TaxonomyTerm};

/// Flatten every term of every group into one sequence.
///
/// Depth-first pre-order: groups in input order, each term before its
/// children. Group nodes themselves are not included.
pub fn flatten_terms(groups: &[TaxonomyGroup]) -> Vec<FlatTerm> {
    let mut result = Vec::new();
    for group in groups {
        collect_terms(&group.terms, &mut result);
    }
    result
}

fn collect_terms(terms: &[TaxonomyTerm], out: &mut Vec<FlatTerm>) {
    for term in terms {
        out.push(FlatTerm::from(term));

        // Recurse for children
        if !term.terms.is_empty() {
            collect_terms(&term.terms, out);
        }
    }
}

/// A codename shared by more than one term in the same environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateCodename {
    pub codename: String,
    /// Term ids in flattened order; the first one is used for matching.
    pub term_ids: Vec<String>,
}

/// Flattened terms of one environment, addressable by id.
#[derive(Debug, Clone, Default)]
pub struct TermIndex {
    terms: Vec<FlatTerm>,
    by_id: HashMap<String, usize>,
}

impl TermIndex {
    pub fn from_groups(groups: &[TaxonomyGroup]) -> Self {
        Self::from_terms(flatten_terms(groups))
    }

    pub fn from_terms(terms: Vec<FlatTerm>) -> Self {
        let mut by_id = HashMap::with_capacity(terms.len());
        for (idx, term) in terms.iter().enumerate() {
            by_id.entry(term.id.clone()).or_insert(idx);
        }
        Self { terms, by_id }
    }

    pub fn terms(&self) -> &[FlatTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FlatTerm> {
        self.by_id.get(id).map(|&idx| &self.terms[idx])
    }

    /// Display name for a term id; the raw id when the term is unknown.
    pub fn name_of(&self, id: &str) -> String {
        self.get(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Codenames carried by more than one term, in first-occurrence order.
    pub fn duplicate_codenames(&self) -> Vec<DuplicateCodename> {
        let mut order: Vec<&str> = Vec::new();
        let mut ids: HashMap<&str, Vec<String>> = HashMap::new();
        for term in &self.terms {
            let entry = ids.entry(term.codename.as_str()).or_default();
            if entry.is_empty() {
                order.push(term.codename.as_str());
            }
            entry.push(term.id.clone());
        }

        order
            .into_iter()
            .filter_map(|codename| {
                let term_ids = ids.remove(codename)?;
                (term_ids.len() > 1).then(|| DuplicateCodename {
                    codename: codename.to_string(),
                    term_ids,
                })
            })
            .collect()
    }
}

/// Source term id -> target term id, matched by exact codename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermIdentityMap {
    map: HashMap<String, String>,
}

impl TermIdentityMap {
    /// Build the map from two flattened term sets.
    ///
    /// Matching is case-sensitive and the first target term with a given
    /// codename wins. Source terms without a counterpart are simply absent.
    pub fn build(source: &[FlatTerm], target: &[FlatTerm]) -> Self {
        let mut target_by_codename: HashMap<&str, &str> = HashMap::with_capacity(target.len());
        for term in target {
            target_by_codename
                .entry(term.codename.as_str())
                .or_insert(term.id.as_str());
        }

        let mut map = HashMap::new();
        for term in source {
            if let Some(target_id) = target_by_codename.get(term.codename.as_str()) {
                map.entry(term.id.clone())
                    .or_insert_with(|| (*target_id).to_string());
            }
        }

        Self { map }
    }

    pub fn get(&self, source_id: &str) -> Option<&str> {
        self.map.get(source_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
