//! An in-process [`ScoreStore`] used by tests across the workspace.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use super::ScoreStore;
use crate::error::{Result, StorageError};
use crate::models::{ScoreEntry, WeekWindow};

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<ScoreEntry>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: impl IntoIterator<Item = ScoreEntry>) -> Self {
        Self {
            rows: RwLock::new(entries.into_iter().collect()),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn insert(&self, entry: ScoreEntry) {
        self.rows
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    /// While set, every query fails the way an unreachable database does.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn rows(&self) -> Result<Vec<ScoreEntry>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self
            .rows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}

#[async_trait::async_trait]
impl ScoreStore for MemoryStore {
    async fn distinct_countries(&self, window: &WeekWindow) -> Result<Vec<String>> {
        let countries: BTreeSet<String> = self
            .rows()?
            .into_iter()
            .filter(|row| window.contains(&row.time_stamp))
            .map(|row| row.country)
            .collect();

        Ok(countries.into_iter().collect())
    }

    async fn distinct_user_ids(&self) -> Result<Vec<String>> {
        let uids: BTreeSet<String> = self.rows()?.into_iter().map(|row| row.uid).collect();

        Ok(uids.into_iter().collect())
    }

    async fn top_scores(
        &self,
        window: &WeekWindow,
        country: Option<&str>,
        limit: i64,
    ) -> Result<Vec<ScoreEntry>> {
        let mut entries: Vec<ScoreEntry> = self
            .rows()?
            .into_iter()
            .filter(|row| window.contains(&row.time_stamp))
            .filter(|row| country.is_none_or(|country| row.country == country))
            .collect();

        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(usize::try_from(limit).unwrap_or(0));

        Ok(entries)
    }

    async fn best_score(&self, uid: &str) -> Result<Option<i64>> {
        Ok(self
            .rows()?
            .iter()
            .filter(|row| row.uid == uid)
            .map(|row| row.score)
            .max())
    }

    async fn count_scores_above(&self, score: i64) -> Result<i64> {
        let count = self.rows()?.iter().filter(|row| row.score > score).count();

        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}
