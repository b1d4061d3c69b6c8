use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::domain::UserProfile;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use tokio::sync::Mutex;

/// Fixed key the singleton profile record lives under.
pub const PROFILE_KEY: &str = "profile/user";

/// Byte-oriented key/value persistence. `put_value` replaces whatever was stored
/// under the key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_value(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn put_value(&self, key: &str, value: &[u8]) -> Result<()>;
}

/// The single locally stored user profile.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self) -> Result<Option<UserProfile>>;
    async fn insert_user(&self, user: &UserProfile) -> Result<()>;
}

#[async_trait]
impl<S> UserStore for S
where
    S: KeyValueStore + ?Sized,
{
    async fn get_user(&self) -> Result<Option<UserProfile>> {
        let Some(raw) = self.get_value(PROFILE_KEY).await? else {
            return Ok(None);
        };
        let user = serde_json::from_slice(&raw)
            .with_context(|| format!("stored value under '{PROFILE_KEY}' is not a profile"))?;
        Ok(Some(user))
    }

    async fn insert_user(&self, user: &UserProfile) -> Result<()> {
        let raw = serde_json::to_vec(user).context("failed to encode profile")?;
        self.put_value(PROFILE_KEY, &raw).await
    }
}

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid sqlite url '{database_url}'"))?
            .create_if_missing(true);
        // An in-memory database lives only as long as one of its connections.
        let min_connections = if is_in_memory(database_url) { 1 } else { 0 };
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .min_connections(min_connections)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open sqlite database '{database_url}'"))?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to apply storage migrations")?;
        tracing::debug!(database_url, "storage ready");
        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// When the value under `key` was last written, if it exists.
    pub async fn last_updated(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let row = sqlx::query("SELECT updated_at FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to read timestamp for '{key}'"))?;
        row.map(|r| r.try_get::<DateTime<Utc>, _>("updated_at"))
            .transpose()
            .map_err(Into::into)
    }
}

#[async_trait]
impl KeyValueStore for Storage {
    async fn get_value(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to read '{key}'"))?;
        row.map(|r| r.try_get::<Vec<u8>, _>("value"))
            .transpose()
            .map_err(Into::into)
    }

    async fn put_value(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("failed to begin write transaction")?;

        // delete + insert keeps at most one row per key without ON CONFLICT
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("failed to clear '{key}'"))?;
        sqlx::query("INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(key)
            .bind(value)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .with_context(|| format!("failed to write '{key}'"))?;

        tx.commit()
            .await
            .with_context(|| format!("failed to commit write of '{key}'"))?;
        Ok(())
    }
}

/// Process-lifetime store with the same replace semantics as [`Storage`].
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_value(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn put_value(&self, key: &str, value: &[u8]) -> Result<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory")
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if is_in_memory(database_url) || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
