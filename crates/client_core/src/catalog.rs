//! Read-only client for the remote popular-movies listing.

use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::MovieResponse, error::ServiceErrorBody};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::CatalogError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";

#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn get_popular_movies(
        &self,
        api_key: &str,
        page: u32,
    ) -> Result<MovieResponse, CatalogError>;
}

/// One GET per call against `{base}/movie/popular`. No retry and no timeout
/// beyond reqwest's defaults.
#[derive(Clone)]
pub struct HttpCatalog {
    http: Client,
    base_url: Url,
}

impl HttpCatalog {
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, CatalogError> {
        let mut parsed = Url::parse(base_url).map_err(|source| CatalogError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        // Url::join replaces the last segment unless the path ends in '/'
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }
        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn popular_url(&self, api_key: &str, page: u32) -> Result<Url, CatalogError> {
        let mut url =
            self.base_url
                .join("movie/popular")
                .map_err(|source| CatalogError::InvalidBaseUrl {
                    url: self.base_url.to_string(),
                    source,
                })?;
        url.query_pairs_mut()
            .append_pair("api_key", api_key)
            .append_pair("page", &page.to_string());
        Ok(url)
    }
}

#[async_trait]
impl MovieCatalog for HttpCatalog {
    async fn get_popular_movies(
        &self,
        api_key: &str,
        page: u32,
    ) -> Result<MovieResponse, CatalogError> {
        if api_key.trim().is_empty() {
            return Err(CatalogError::MissingApiKey);
        }

        let url = self.popular_url(api_key, page)?;
        debug!(host = ?url.host_str(), page, "requesting popular movies");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = ServiceErrorBody::parse(&body)
                .map(|b| b.status_message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string()
                });
            warn!(status = status.as_u16(), %message, "catalog request rejected");
            return Err(CatalogError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: MovieResponse = serde_json::from_str(&body).map_err(|err| {
            warn!(%err, "catalog response did not parse");
            CatalogError::from(err)
        })?;
        info!(page, count = parsed.results.len(), "fetched popular movies");
        Ok(parsed)
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
