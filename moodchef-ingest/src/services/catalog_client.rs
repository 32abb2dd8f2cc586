//! Recipe catalog API client
//!
//! Thin reqwest wrapper over the catalog's `recipes/list` search endpoint.
//! The [`CatalogSource`] trait is the seam the fetcher depends on, so the
//! pipeline can run against fakes in tests.

use crate::models::raw_recipe::null_as_default;
use crate::models::RawRecipe;
use async_trait::async_trait;
use moodchef_common::config::CatalogConfig;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("MoodChef/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Catalog client errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Source of raw recipes for a search query
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<RawRecipe>, CatalogError>;
}

/// One page of search results
///
/// Records stay untyped here so one malformed record cannot sink the page.
#[derive(Debug, Deserialize)]
struct CatalogPage {
    #[serde(default)]
    count: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    results: Vec<serde_json::Value>,
}

impl CatalogPage {
    /// Typed records; entries that do not decode are dropped and logged
    fn into_recipes(self) -> Vec<RawRecipe> {
        self.results
            .into_iter()
            .enumerate()
            .filter_map(|(position, value)| {
                match serde_json::from_value::<RawRecipe>(value) {
                    Ok(recipe) => Some(recipe),
                    Err(e) => {
                        tracing::debug!(position, error = %e, "Dropping malformed catalog record");
                        None
                    }
                }
            })
            .collect()
    }
}

/// HTTP catalog client
pub struct CatalogClient {
    http_client: reqwest::Client,
    base_url: String,
    host: String,
    api_key: String,
    page_size: u32,
}

impl CatalogClient {
    pub fn new(
        base_url: impl Into<String>,
        host: impl Into<String>,
        api_key: impl Into<String>,
        page_size: u32,
    ) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| CatalogError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            host: host.into(),
            api_key: api_key.into(),
            page_size,
        })
    }

    /// Client for the configured catalog with an already-resolved API key
    pub fn from_config(config: &CatalogConfig, api_key: String) -> Result<Self, CatalogError> {
        Self::new(&config.base_url, &config.host, api_key, config.page_size)
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn search(&self, query: &str) -> Result<Vec<RawRecipe>, CatalogError> {
        let url = format!("{}/recipes/list", self.base_url);
        let size = self.page_size.to_string();

        tracing::debug!(query = %query, url = %url, "Querying recipe catalog");

        let response = self
            .http_client
            .get(&url)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.host)
            .query(&[("from", "0"), ("size", size.as_str()), ("q", query)])
            .send()
            .await
            .map_err(|e| CatalogError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError(status.as_u16(), error_text));
        }

        let page: CatalogPage = response
            .json()
            .await
            .map_err(|e| CatalogError::ParseError(e.to_string()))?;

        let available = page.count.unwrap_or_default();
        let returned = page.results.len();
        let recipes = page.into_recipes();

        tracing::info!(
            query = %query,
            returned,
            decoded = recipes.len(),
            available,
            "Retrieved recipes from catalog"
        );

        Ok(recipes)
    }
}
