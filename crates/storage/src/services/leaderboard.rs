use std::sync::Arc;

use crate::clock::Clock;
use crate::dto::leaderboard::UserRankResponse;
use crate::error::{Result, StorageError};
use crate::models::{ScoreEntry, WeekWindow};
use crate::repository::ScoreStore;

/// Fixed cutoff for the weekly top lists.
pub const MAX_TOP_LIMIT: u32 = 200;

/// Leaderboard views computed fresh against the store on every call.
///
/// "Current" and "last" week are always taken from the clock, never from the
/// newest row in the store.
#[derive(Clone)]
pub struct Leaderboard {
    store: Arc<dyn ScoreStore>,
    clock: Arc<dyn Clock>,
}

impl Leaderboard {
    pub fn new(store: Arc<dyn ScoreStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn current_week(&self) -> WeekWindow {
        WeekWindow::containing(self.clock.today())
    }

    pub fn last_week(&self) -> WeekWindow {
        self.current_week().previous()
    }

    /// Countries with at least one submission last week.
    pub async fn last_week_countries(&self) -> Result<Vec<String>> {
        let window = self.last_week();
        let countries = self.store.distinct_countries(&window).await?;
        tracing::debug!(week = %window, count = countries.len(), "Listed last week countries");
        Ok(countries)
    }

    pub async fn all_user_ids(&self) -> Result<Vec<String>> {
        self.store.distinct_user_ids().await
    }

    /// Best rows of the current week. A user with several qualifying rows
    /// appears once per row.
    pub async fn current_week_top(&self, limit: u32) -> Result<Vec<ScoreEntry>> {
        let limit = checked_limit(limit)?;
        self.store
            .top_scores(&self.current_week(), None, limit)
            .await
    }

    /// Best rows of last week for one country. An empty week is reported as
    /// [`StorageError::NotFound`] rather than an empty list.
    pub async fn last_week_top_by_country(
        &self,
        country: &str,
        limit: u32,
    ) -> Result<Vec<ScoreEntry>> {
        let limit = checked_limit(limit)?;
        let window = self.last_week();
        let entries = self
            .store
            .top_scores(&window, Some(country), limit)
            .await?;

        if entries.is_empty() {
            tracing::debug!(country, week = %window, "No entries for country");
            return Err(StorageError::NotFound(
                "No data found for this country for last week".to_string(),
            ));
        }

        Ok(entries)
    }

    pub async fn user_rank(&self, user_id: &str) -> Result<UserRankResponse> {
        if user_id.is_empty() {
            return Err(StorageError::InvalidInput("User ID is required".to_string()));
        }

        // An unknown user has no best score; comparing against it would rank them first.
        let Some(best) = self.store.best_score(user_id).await? else {
            tracing::debug!(user_id, "Rank requested for unknown user");
            return Err(StorageError::NotFound("User not found".to_string()));
        };

        let above = self.store.count_scores_above(best).await?;

        Ok(UserRankResponse {
            user_id: user_id.to_string(),
            rank: above + 1,
        })
    }
}

fn checked_limit(limit: u32) -> Result<i64> {
    if limit == 0 {
        return Err(StorageError::InvalidInput(
            "limit must be at least 1".to_string(),
        ));
    }
    Ok(i64::from(limit.min(MAX_TOP_LIMIT)))
}
