use sqlx::{PgPool, Postgres, QueryBuilder};

use super::ScoreStore;
use crate::error::Result;
use crate::models::{ScoreEntry, WeekWindow};

/// PostgreSQL-backed [`ScoreStore`] over the `leaderboard` table.
#[derive(Clone)]
pub struct LeaderboardRepository {
    pool: PgPool,
}

impl LeaderboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ScoreStore for LeaderboardRepository {
    async fn distinct_countries(&self, window: &WeekWindow) -> Result<Vec<String>> {
        let countries = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT country
            FROM leaderboard
            WHERE time_stamp >= $1 AND time_stamp < $2
            ORDER BY country
            "#,
        )
        .bind(window.start())
        .bind(window.end())
        .fetch_all(&self.pool)
        .await?;

        Ok(countries)
    }

    async fn distinct_user_ids(&self) -> Result<Vec<String>> {
        let uids = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT uid
            FROM leaderboard
            ORDER BY uid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(uids)
    }

    async fn top_scores(
        &self,
        window: &WeekWindow,
        country: Option<&str>,
        limit: i64,
    ) -> Result<Vec<ScoreEntry>> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT uid, name, score, country, time_stamp
            FROM leaderboard
            WHERE time_stamp >= "#,
        );
        query.push_bind(window.start());
        query.push(" AND time_stamp < ");
        query.push_bind(window.end());

        if let Some(country) = country {
            query.push(" AND country = ");
            query.push_bind(country);
        }

        query.push(" ORDER BY score DESC LIMIT ");
        query.push_bind(limit);

        let entries: Vec<ScoreEntry> = query.build_query_as().fetch_all(&self.pool).await?;

        Ok(entries)
    }

    async fn best_score(&self, uid: &str) -> Result<Option<i64>> {
        let best = sqlx::query_scalar::<_, Option<i64>>(
            r#"
            SELECT MAX(score)
            FROM leaderboard
            WHERE uid = $1
            "#,
        )
        .bind(uid)
        .fetch_one(&self.pool)
        .await?;

        Ok(best)
    }

    async fn count_scores_above(&self, score: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM leaderboard
            WHERE score > $1
            "#,
        )
        .bind(score)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
