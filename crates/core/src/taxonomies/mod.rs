//! Taxonomies module - term trees, the flattened term index, and the
//! cross-environment term identity map.

mod taxonomy_model;
mod term_index;

pub use taxonomy_model::{FlatTerm, TaxonomyGroup, TaxonomyTerm};
pub use term_index::{flatten_terms, DuplicateCodename, TermIdentityMap, TermIndex};
