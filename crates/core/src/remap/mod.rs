//! Remap module - asset pairing, term remapping and report row generation.

mod remap_model;
mod remap_service;


pub use remap_model::{
    AssetPair, AssetPairing, AssetSummary, ElementDiff, RemapOutcome, RemapStats, RemapWarning,
    ReportRow,
};
pub use remap_service::{pair_assets, plan_remap, Remapper};
