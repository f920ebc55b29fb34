use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    dto::leaderboard::UserRankResponse,
    models::ScoreEntry,
    services::leaderboard::{Leaderboard, MAX_TOP_LIMIT},
};

use crate::error::WebResult;

#[utoipa::path(
    get,
    path = "/api/lastweek/countrycodes",
    responses(
        (status = 200, description = "Distinct country codes with submissions last week", body = Vec<String>),
        (status = 500, description = "Store error")
    ),
    tag = "leaderboard"
)]
pub async fn last_week_country_codes(State(leaderboard): State<Leaderboard>) -> WebResult<Response> {
    let countries = leaderboard.last_week_countries().await?;

    Ok(Json(countries).into_response())
}

#[utoipa::path(
    get,
    path = "/api/alluids",
    responses(
        (status = 200, description = "Every distinct user id", body = Vec<String>),
        (status = 500, description = "Store error")
    ),
    tag = "leaderboard"
)]
pub async fn all_user_ids(State(leaderboard): State<Leaderboard>) -> WebResult<Response> {
    let uids = leaderboard.all_user_ids().await?;

    Ok(Json(uids).into_response())
}

#[utoipa::path(
    get,
    path = "/api/currentweek",
    responses(
        (status = 200, description = "Top 200 scores of the current ISO week", body = Vec<ScoreEntry>),
        (status = 500, description = "Store error")
    ),
    tag = "leaderboard"
)]
pub async fn current_week_top(State(leaderboard): State<Leaderboard>) -> WebResult<Response> {
    let entries = leaderboard.current_week_top(MAX_TOP_LIMIT).await?;

    Ok(Json(entries).into_response())
}

#[utoipa::path(
    get,
    path = "/api/lastweek/{country}",
    params(
        ("country" = String, Path, description = "Country code")
    ),
    responses(
        (status = 200, description = "Top 200 scores of last ISO week for the country", body = Vec<ScoreEntry>),
        (status = 404, description = "No submissions for this country last week"),
        (status = 500, description = "Store error")
    ),
    tag = "leaderboard"
)]
pub async fn last_week_top_by_country(
    State(leaderboard): State<Leaderboard>,
    Path(country): Path<String>,
) -> WebResult<Response> {
    let entries = leaderboard
        .last_week_top_by_country(&country, MAX_TOP_LIMIT)
        .await?;

    Ok(Json(entries).into_response())
}

#[utoipa::path(
    get,
    path = "/api/userrank/{user_id}",
    params(
        ("user_id" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Global rank of the user's best score", body = UserRankResponse),
        (status = 400, description = "User id missing"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Store error")
    ),
    tag = "leaderboard"
)]
pub async fn user_rank(
    State(leaderboard): State<Leaderboard>,
    Path(user_id): Path<String>,
) -> WebResult<Response> {
    let rank = leaderboard.user_rank(&user_id).await?;

    Ok(Json(rank).into_response())
}

/// `/api/userrank` without an id segment.
pub async fn user_rank_missing_id(State(leaderboard): State<Leaderboard>) -> WebResult<Response> {
    let rank = leaderboard.user_rank("").await?;

    Ok(Json(rank).into_response())
}
