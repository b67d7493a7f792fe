//! Models produced by pairing and remapping.

use std::fmt;

use serde::Serialize;

use crate::assets::Asset;
use crate::config::EnvironmentRole;

/// A source asset and its target counterpart (same codename).
#[derive(Debug, Clone, Copy)]
pub struct AssetPair<'a> {
    pub source: &'a Asset,
    pub target: &'a Asset,
}

/// Result of pairing source assets with target assets.
#[derive(Debug, Default)]
pub struct AssetPairing<'a> {
    /// Pairs in source asset order
    pub pairs: Vec<AssetPair<'a>>,
    pub warnings: Vec<RemapWarning>,
}

impl<'a> AssetPairing<'a> {
    pub fn sources(&self) -> impl Iterator<Item = &'a Asset> + '_ {
        self.pairs.iter().map(|p| p.source)
    }

    pub fn targets(&self) -> impl Iterator<Item = &'a Asset> + '_ {
        self.pairs.iter().map(|p| p.target)
    }
}

/// Identity of an asset as shown in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSummary {
    pub id: String,
    pub codename: String,
    pub name: String,
    pub url: Option<String>,
}

impl From<&Asset> for AssetSummary {
    fn from(asset: &Asset) -> Self {
        Self {
            id: asset.id.clone(),
            codename: asset.codename_or_empty().to_string(),
            name: asset.display_name().to_string(),
            url: asset.url.clone(),
        }
    }
}

/// Before/after term names for one element of one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDiff {
    pub element_id: String,
    /// Terms assigned on the source asset
    pub source_terms: Vec<String>,
    /// Terms currently assigned on the target asset
    pub current_target_terms: Vec<String>,
    /// Terms the target asset will carry after commit
    pub pending_terms: Vec<String>,
}

/// One previewed mutation: the asset pair, its diffs, and the exact payload
/// that will be sent on commit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub source: AssetSummary,
    pub target: AssetSummary,
    pub diffs: Vec<ElementDiff>,
    pub payload: Asset,
}

/// Per-item anomaly. Logged, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemapWarning {
    /// Source asset has no target asset with the same codename
    UnmatchedAsset { asset_codename: String },
    /// Source asset carries no codename and cannot be paired
    MissingAssetCodename { asset_id: String },
    /// More than one target asset shares a codename; the first is used
    DuplicateAssetCodename {
        asset_codename: String,
        asset_ids: Vec<String>,
    },
    /// No paired target asset has this element, so its values are not carried over
    ElementNotInTargetSchema { element_id: String },
    /// The element exists in the target schema but not on this target asset
    ElementMissingOnTarget {
        asset_codename: String,
        element_id: String,
    },
    /// Source term has no codename match in the target environment
    UnmappedTerm {
        asset_codename: String,
        element_id: String,
        term_id: String,
    },
    /// More than one term in an environment shares a codename
    DuplicateTermCodename {
        role: EnvironmentRole,
        codename: String,
        term_ids: Vec<String>,
    },
}

impl fmt::Display for RemapWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemapWarning::UnmatchedAsset { asset_codename } => write!(
                f,
                "Asset '{}' has no counterpart in the target environment, skipping",
                asset_codename
            ),
            RemapWarning::MissingAssetCodename { asset_id } => write!(
                f,
                "Asset {} has no codename and cannot be paired, skipping",
                asset_id
            ),
            RemapWarning::DuplicateAssetCodename {
                asset_codename,
                asset_ids,
            } => write!(
                f,
                "Target assets {} share codename '{}', using the first",
                asset_ids.join(", "),
                asset_codename
            ),
            RemapWarning::ElementNotInTargetSchema { element_id } => write!(
                f,
                "Element {} is not present on any paired target asset, skipping element",
                element_id
            ),
            RemapWarning::ElementMissingOnTarget {
                asset_codename,
                element_id,
            } => write!(
                f,
                "Element {} is not present on target asset '{}', skipping element",
                element_id, asset_codename
            ),
            RemapWarning::UnmappedTerm {
                asset_codename,
                element_id,
                term_id,
            } => write!(
                f,
                "Term {} on asset '{}' (element {}) has no match in the target environment, dropping",
                term_id, asset_codename, element_id
            ),
            RemapWarning::DuplicateTermCodename {
                role,
                codename,
                term_ids,
            } => write!(
                f,
                "Terms {} in the {} environment share codename '{}', the first one is used",
                term_ids.join(", "),
                role,
                codename
            ),
        }
    }
}

/// Rows to preview and commit plus every warning raised on the way.
#[derive(Debug, Clone, Default)]
pub struct RemapOutcome {
    pub rows: Vec<ReportRow>,
    pub warnings: Vec<RemapWarning>,
    pub stats: RemapStats,
}

/// Counters for the run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemapStats {
    pub source_assets: usize,
    pub target_assets: usize,
    pub paired_assets: usize,
    pub source_terms: usize,
    pub target_terms: usize,
    pub mapped_terms: usize,
    pub assets_to_update: usize,
}
