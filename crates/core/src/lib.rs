//! termsync core - domain models and the remapping pipeline.
//!
//! This crate contains everything that does not touch the network: asset and
//! taxonomy models, configuration, the term index, the element mapping, the
//! remapper that produces report rows, and HTML report rendering.

pub mod assets;
pub mod config;
pub mod constants;
pub mod elements;
pub mod errors;
pub mod remap;
pub mod report;
pub mod taxonomies;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
