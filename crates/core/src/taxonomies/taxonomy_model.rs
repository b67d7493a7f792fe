//! Domain models for taxonomies.

use serde::{Deserialize, Serialize};

/// A taxonomy group: the root of one term tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyGroup {
    pub id: String,
    pub codename: String,
    pub name: String,
    #[serde(default)]
    pub terms: Vec<TaxonomyTerm>,
}

/// A term within a taxonomy group (recursive)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyTerm {
    pub id: String,
    pub codename: String,
    pub name: String,
    #[serde(default)]
    pub terms: Vec<TaxonomyTerm>,
}

impl TaxonomyTerm {
    pub fn leaf(id: &str, codename: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            codename: codename.to_string(),
            name: name.to_string(),
            terms: Vec::new(),
        }
    }
}

/// A term with its position in the tree discarded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlatTerm {
    pub id: String,
    pub codename: String,
    pub name: String,
}

impl FlatTerm {
    pub fn new(id: &str, codename: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            codename: codename.to_string(),
            name: name.to_string(),
        }
    }
}

impl From<&TaxonomyTerm> for FlatTerm {
    fn from(term: &TaxonomyTerm) -> Self {
        Self {
            id: term.id.clone(),
            codename: term.codename.clone(),
            name: term.name.clone(),
        }
    }
}
