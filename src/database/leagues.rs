use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::{Context, Result};
use log::info;

use super::connection::{create_pool, DbPool};
use super::setup::init_schema;
use crate::errors::LeagueError;

/// One SQLite database per league, opened lazily and cached.
///
/// The store is handed to whoever needs database access instead of keeping a
/// process-wide "current league" connection that gets swapped per request.
pub struct LeagueStore {
    data_dir: PathBuf,
    pools: RwLock<HashMap<String, DbPool>>,
}

impl LeagueStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            pools: RwLock::new(HashMap::new()),
        }
    }

    /// Create (or reopen) a league database and initialize its schema.
    /// Returns the league's canonical slug.
    pub fn create_league(&self, name: &str) -> Result<String> {
        let slug = league_slug(name);
        std::fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("Failed to create data directory {:?}", self.data_dir))?;

        let pool = create_pool(self.db_path(&slug).to_string_lossy().as_ref())?;
        let conn = pool.get()?;
        init_schema(&conn)?;
        self.cache_pool(&slug, pool);

        info!("League '{slug}' ready");
        Ok(slug)
    }

    /// Connection pool for an existing league
    pub fn pool(&self, league: &str) -> Result<DbPool> {
        let slug = league_slug(league);
        if let Some(pool) = self.cached_pool(&slug) {
            return Ok(pool);
        }

        if !self.db_path(&slug).exists() {
            return Err(LeagueError::LeagueNotFound { league: slug }.into());
        }

        let pool = create_pool(self.db_path(&slug).to_string_lossy().as_ref())?;
        self.cache_pool(&slug, pool.clone());
        Ok(pool)
    }

    /// All league slugs present in the data directory
    pub fn list_leagues(&self) -> Result<Vec<String>> {
        if !self.data_dir.exists() {
            return Ok(Vec::new());
        }

        let mut leagues = Vec::new();
        for entry in std::fs::read_dir(&self.data_dir)
            .with_context(|| format!("Failed to read data directory {:?}", self.data_dir))?
        {
            let path = entry?.path();
            if let Some(slug) = league_from_path(&path) {
                leagues.push(slug);
            }
        }
        leagues.sort();
        Ok(leagues)
    }

    fn db_path(&self, slug: &str) -> PathBuf {
        self.data_dir.join(format!("{slug}.db"))
    }

    fn cached_pool(&self, slug: &str) -> Option<DbPool> {
        self.pools.read().ok()?.get(slug).cloned()
    }

    fn cache_pool(&self, slug: &str, pool: DbPool) {
        if let Ok(mut pools) = self.pools.write() {
            pools.insert(slug.to_string(), pool);
        }
    }
}

/// Canonical league identifier: lowercased, trimmed, spaces collapsed to
/// underscores
pub fn league_slug(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

fn league_from_path(path: &Path) -> Option<String> {
    if path.extension()? != "db" {
        return None;
    }
    Some(path.file_stem()?.to_string_lossy().into_owned())
}

/// Data directory override, mirroring the deployment convention of the
/// DATABASE_PATH variable
pub fn data_dir_from_env(default: &str) -> String {
    std::env::var("DATA_DIR").unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_normalizes_names() {
        assert_eq!(league_slug("  Thursday Night TT "), "thursday_night_tt");
        assert_eq!(league_slug("bttc"), "bttc");
    }

    #[test]
    fn unknown_league_is_reported() {
        let store = LeagueStore::new("/nonexistent/league-data");
        let err = store.pool("nowhere").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LeagueError>(),
            Some(LeagueError::LeagueNotFound { .. })
        ));
    }
}
