//! HTTP client for the content management API.
//!
//! One client is bound to one environment and its credential. Source and
//! target always get separate instances, so a request can never carry the
//! other environment's key.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::time::Duration;

use termsync_core::assets::Asset;
use termsync_core::config::EnvironmentConfig;
use termsync_core::errors::{Error, Result};
use termsync_core::taxonomies::TaxonomyGroup;

use crate::sync::ContentApiClient;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of pages fetched per listing (safety limit).
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// Header carrying the continuation token of the next page.
const CONTINUATION_HEADER: &str = "x-continuation";

// ─────────────────────────────────────────────────────────────────────────────
// API Response Types (internal, for parsing management API responses)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, serde::Deserialize)]
struct ApiPagination {
    #[serde(default)]
    continuation_token: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ApiAssetsPage {
    #[serde(default)]
    assets: Vec<Asset>,
    #[serde(default)]
    pagination: Option<ApiPagination>,
}

#[derive(Debug, serde::Deserialize)]
struct ApiTaxonomiesPage {
    #[serde(default)]
    taxonomies: Vec<TaxonomyGroup>,
    #[serde(default)]
    pagination: Option<ApiPagination>,
}

#[derive(Debug, serde::Deserialize)]
struct ApiValidationError {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    validation_errors: Vec<ApiValidationError>,
}

/// A listing page: its items and the token of the next page, if any.
trait ListPage: DeserializeOwned {
    type Item;

    fn into_parts(self) -> (Vec<Self::Item>, Option<String>);
}

impl ListPage for ApiAssetsPage {
    type Item = Asset;

    fn into_parts(self) -> (Vec<Asset>, Option<String>) {
        (
            self.assets,
            self.pagination.and_then(|p| p.continuation_token),
        )
    }
}

impl ListPage for ApiTaxonomiesPage {
    type Item = TaxonomyGroup;

    fn into_parts(self) -> (Vec<TaxonomyGroup>, Option<String>) {
        (
            self.taxonomies,
            self.pagination.and_then(|p| p.continuation_token),
        )
    }
}

/// Decide which continuation token to request next.
///
/// Returns `Ok(None)` when there are no more pages, and fails when the API
/// hands back the token that was just used.
fn next_continuation(current: Option<&str>, next: Option<String>) -> Result<Option<String>> {
    match next.filter(|token| !token.is_empty()) {
        None => Ok(None),
        Some(token) if current == Some(token.as_str()) => Err(Error::Pagination(
            "Pagination appears stuck (same continuation token returned twice).".to_string(),
        )),
        Some(token) => Ok(Some(token)),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Management API Client
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP client for one environment of the content management API.
///
/// # Example
///
/// ```ignore
/// let client = ManagementApiClient::new("https://manage.kontent.ai/v2", &config.source)?;
/// let assets = client.list_assets().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ManagementApiClient {
    client: reqwest::Client,
    base_url: String,
    environment_id: String,
    auth_header: HeaderValue,
    max_pages: usize,
}

impl ManagementApiClient {
    /// Create a client bound to one environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key cannot be used as a header value or
    /// the HTTP client cannot be initialized.
    pub fn new(base_url: &str, environment: &EnvironmentConfig) -> Result<Self> {
        let mut auth_header = HeaderValue::from_str(&format!("Bearer {}", environment.api_key))
            .map_err(|e| Error::InvalidConfigValue(format!("Invalid API key format: {}", e)))?;
        auth_header.set_sensitive(true);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Http(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            environment_id: environment.environment_id.clone(),
            auth_header,
            max_pages: DEFAULT_MAX_PAGES,
        })
    }

    /// Override the pagination safety limit.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// URL of an environment-scoped endpoint.
    fn environment_url(&self, path: &str) -> String {
        format!(
            "{}/projects/{}{}",
            self.base_url,
            urlencoding::encode(&self.environment_id),
            path
        )
    }

    /// Create default headers for API requests.
    fn headers(&self, continuation: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        if let Some(token) = continuation {
            let value = HeaderValue::from_str(token)
                .map_err(|e| Error::Pagination(format!("Invalid continuation token: {}", e)))?;
            headers.insert(CONTINUATION_HEADER, value);
        }
        Ok(headers)
    }

    /// Make a GET request and parse the response.
    async fn get<T: DeserializeOwned>(&self, url: &str, continuation: Option<&str>) -> Result<T> {
        debug!("[ManagementApi] GET {}", url);

        let response = self
            .client
            .get(url)
            .headers(self.headers(continuation)?)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

        Self::parse_response(response).await
    }

    /// Fetch every page of a listing endpoint.
    async fn get_all<P: ListPage>(&self, path: &str) -> Result<Vec<P::Item>> {
        let url = self.environment_url(path);
        let mut items = Vec::new();
        let mut continuation: Option<String> = None;
        let mut pages_fetched: usize = 0;

        loop {
            if pages_fetched >= self.max_pages {
                return Err(Error::Pagination(format!(
                    "{} exceeded max pages ({}). Aborting.",
                    path, self.max_pages
                )));
            }

            let page: P = self.get(&url, continuation.as_deref()).await?;
            pages_fetched += 1;

            let (mut batch, next) = page.into_parts();
            debug!(
                "[ManagementApi] Page {} of {}: {} item(s)",
                pages_fetched,
                path,
                batch.len()
            );
            items.append(&mut batch);

            match next_continuation(continuation.as_deref(), next)? {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }

        Ok(items)
    }

    /// Parse an HTTP response, handling errors appropriately.
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            // Try to parse error response for a better message
            if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                let mut msg = err.message.unwrap_or_else(|| format!("HTTP {}", status));
                let details: Vec<String> = err
                    .validation_errors
                    .into_iter()
                    .filter_map(|v| v.message)
                    .collect();
                if !details.is_empty() {
                    msg = format!("{} ({})", msg, details.join("; "));
                }
                return Err(Error::api(status.as_u16(), msg));
            }
            return Err(Error::api(
                status.as_u16(),
                body.chars().take(200).collect::<String>(),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            Error::Parse(format!(
                "{} - {}",
                e,
                body.chars().take(200).collect::<String>()
            ))
        })
    }
}

#[async_trait]
impl ContentApiClient for ManagementApiClient {
    fn environment_id(&self) -> &str {
        &self.environment_id
    }

    async fn list_assets(&self) -> Result<Vec<Asset>> {
        let assets = self.get_all::<ApiAssetsPage>("/assets").await?;
        info!(
            "[ManagementApi] Fetched {} assets from {}",
            assets.len(),
            self.environment_id
        );
        Ok(assets)
    }

    async fn list_taxonomies(&self) -> Result<Vec<TaxonomyGroup>> {
        let groups = self.get_all::<ApiTaxonomiesPage>("/taxonomies").await?;
        info!(
            "[ManagementApi] Fetched {} taxonomy groups from {}",
            groups.len(),
            self.environment_id
        );
        Ok(groups)
    }

    async fn upsert_asset(&self, asset: &Asset) -> Result<Asset> {
        let url = self.environment_url(&format!("/assets/{}", urlencoding::encode(&asset.id)));
        debug!("[ManagementApi] PUT {}", url);

        let response = self
            .client
            .put(&url)
            .headers(self.headers(None)?)
            .json(asset)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to update asset: {}", e)))?;

        Self::parse_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment() -> EnvironmentConfig {
        EnvironmentConfig::new("env-1", "secret-key")
    }

    #[test]
    fn test_client_creation() {
        let client = ManagementApiClient::new("https://manage.kontent.ai/v2", &environment());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_url_normalization() {
        let client =
            ManagementApiClient::new("https://manage.kontent.ai/v2/", &environment()).unwrap();
        assert_eq!(client.base_url, "https://manage.kontent.ai/v2");
        assert_eq!(
            client.environment_url("/assets"),
            "https://manage.kontent.ai/v2/projects/env-1/assets"
        );
    }

    #[test]
    fn test_environment_id_is_encoded() {
        let env = EnvironmentConfig::new("a b/c", "key");
        let client = ManagementApiClient::new("https://api.example.com", &env).unwrap();
        assert_eq!(
            client.environment_url("/taxonomies"),
            "https://api.example.com/projects/a%20b%2Fc/taxonomies"
        );
    }

    #[test]
    fn test_invalid_api_key_is_rejected() {
        let env = EnvironmentConfig::new("env-1", "bad\nkey");
        let err = ManagementApiClient::new("https://api.example.com", &env).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue(_)));
    }

    #[test]
    fn test_headers_carry_credential_and_continuation() {
        let client = ManagementApiClient::new("https://api.example.com", &environment()).unwrap();
        let headers = client.headers(Some("token-2")).unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer secret-key");
        assert_eq!(headers[CONTINUATION_HEADER], "token-2");
        assert!(client.headers(None).unwrap().get(CONTINUATION_HEADER).is_none());
    }

    #[test]
    fn test_next_continuation() {
        assert_eq!(next_continuation(None, None).unwrap(), None);
        assert_eq!(next_continuation(Some("a"), Some(String::new())).unwrap(), None);
        assert_eq!(
            next_continuation(Some("a"), Some("b".to_string())).unwrap(),
            Some("b".to_string())
        );
        assert!(matches!(
            next_continuation(Some("a"), Some("a".to_string())),
            Err(Error::Pagination(_))
        ));
    }

    #[test]
    fn test_page_parsing() {
        let page: ApiAssetsPage = serde_json::from_str(
            r#"{
                "assets": [{ "id": "a1", "codename": "photo", "elements": [] }],
                "pagination": { "continuation_token": "next", "next_page": "https://..." }
            }"#,
        )
        .unwrap();
        let (assets, next) = page.into_parts();
        assert_eq!(assets.len(), 1);
        assert_eq!(next.as_deref(), Some("next"));

        let page: ApiTaxonomiesPage = serde_json::from_str(
            r#"{ "taxonomies": [], "pagination": { "continuation_token": null } }"#,
        )
        .unwrap();
        let (groups, next) = page.into_parts();
        assert!(groups.is_empty());
        assert!(next.is_none());
    }
}
