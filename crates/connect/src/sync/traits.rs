//! Traits defining the seams of a sync run.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::models::{Decision, SyncPlan};
use termsync_core::assets::Asset;
use termsync_core::errors::Result;
use termsync_core::taxonomies::TaxonomyGroup;

/// Trait for reading and writing one environment through the management API
#[async_trait]
pub trait ContentApiClient: Send + Sync {
    /// Identifier of the environment this client is bound to
    fn environment_id(&self) -> &str;

    /// Fetch every asset, including element values
    async fn list_assets(&self) -> Result<Vec<Asset>>;

    /// Fetch every taxonomy group with its nested term tree
    async fn list_taxonomies(&self) -> Result<Vec<TaxonomyGroup>>;

    /// Replace an asset with the given representation
    async fn upsert_asset(&self, asset: &Asset) -> Result<Asset>;
}

/// Makes the preview of a plan available to the operator.
pub trait ReportPublisher: Send + Sync {
    /// Publish the report and return the path it was written to.
    fn publish(&self, plan: &SyncPlan) -> Result<PathBuf>;
}

/// The single yes/no decision between preview and commit.
pub trait ConfirmationGate: Send + Sync {
    fn confirm(&self, plan: &SyncPlan, report_path: &Path) -> Result<Decision>;
}
