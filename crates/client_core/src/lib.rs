use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::domain::{MovieResponse, UserProfile};
use storage::{Storage, UserStore};
use tracing::info;

pub mod catalog;
pub mod config;
pub mod error;

pub use catalog::{HttpCatalog, MovieCatalog, DEFAULT_API_BASE_URL};
pub use config::{load_settings, AppPaths, Settings, SettingsOverrides};
pub use error::CatalogError;

/// What the front ends drive: the catalog read plus the singleton profile.
#[async_trait]
pub trait ClientHandle: Send + Sync {
    async fn popular_movies(&self, page: u32) -> Result<MovieResponse>;
    async fn load_profile(&self) -> Result<Option<UserProfile>>;
    async fn save_profile(&self, profile: &UserProfile) -> Result<()>;
}

pub struct PopularClient {
    catalog: Arc<dyn MovieCatalog>,
    profiles: Arc<dyn UserStore>,
    api_key: Option<String>,
}

impl PopularClient {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        profiles: Arc<dyn UserStore>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            catalog,
            profiles,
            api_key,
        }
    }

    /// Opens the profile database and the HTTP catalog described by `settings`.
    pub async fn connect(settings: &Settings) -> Result<Self> {
        let database_url = settings.resolved_database_url()?;
        let storage = Storage::new(&database_url)
            .await
            .with_context(|| format!("failed to open profile store at '{database_url}'"))?;
        let catalog = HttpCatalog::new(&settings.api_base_url)?;
        info!(
            database_url = %database_url,
            api_base_url = %catalog.base_url(),
            has_api_key = settings.api_key.is_some(),
            "client ready"
        );

        Ok(Self::new(
            Arc::new(catalog),
            Arc::new(storage),
            settings.api_key.clone(),
        ))
    }
}

#[async_trait]
impl ClientHandle for PopularClient {
    async fn popular_movies(&self, page: u32) -> Result<MovieResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CatalogError::MissingApiKey)?;
        let response = self.catalog.get_popular_movies(api_key, page).await?;
        Ok(response)
    }

    async fn load_profile(&self) -> Result<Option<UserProfile>> {
        self.profiles.get_user().await
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.profiles.insert_user(profile).await?;
        info!(profile_id = profile.id.0, "profile saved");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
