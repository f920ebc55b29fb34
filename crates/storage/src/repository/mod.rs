use crate::error::Result;
use crate::models::{ScoreEntry, WeekWindow};

pub mod leaderboard;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;

/// Read access to the table of score submissions.
///
/// Every method is a single query; callers compose them.
#[async_trait::async_trait]
pub trait ScoreStore: Send + Sync {
    /// Distinct country codes among rows submitted inside `window`, ascending.
    async fn distinct_countries(&self, window: &WeekWindow) -> Result<Vec<String>>;

    /// Distinct user ids across the whole table, ascending.
    async fn distinct_user_ids(&self) -> Result<Vec<String>>;

    /// Rows inside `window`, optionally restricted to one country, highest
    /// score first, at most `limit` of them.
    async fn top_scores(
        &self,
        window: &WeekWindow,
        country: Option<&str>,
        limit: i64,
    ) -> Result<Vec<ScoreEntry>>;

    /// `MAX(score)` over the user's rows, `None` when the user has none.
    async fn best_score(&self, uid: &str) -> Result<Option<i64>>;

    /// Number of rows (not users) whose score is strictly greater than `score`.
    async fn count_scores_above(&self, score: i64) -> Result<i64>;
}
