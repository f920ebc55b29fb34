use axum::{Router, routing::get};
use storage::services::leaderboard::Leaderboard;

use super::handlers::{
    all_user_ids, current_week_top, last_week_country_codes, last_week_top_by_country, user_rank,
    user_rank_missing_id,
};

pub fn routes() -> Router<Leaderboard> {
    Router::new()
        .route("/lastweek/countrycodes", get(last_week_country_codes))
        .route("/lastweek/:country", get(last_week_top_by_country))
        .route("/alluids", get(all_user_ids))
        .route("/currentweek", get(current_week_top))
        .route("/userrank", get(user_rank_missing_id))
        .route("/userrank/", get(user_rank_missing_id))
        .route("/userrank/:user_id", get(user_rank))
}
