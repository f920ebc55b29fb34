use utoipa::OpenApi;

use crate::features::leaderboard::handlers;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::last_week_country_codes,
        handlers::all_user_ids,
        handlers::current_week_top,
        handlers::last_week_top_by_country,
        handlers::user_rank,
    ),
    components(
        schemas(
            storage::models::ScoreEntry,
            storage::dto::leaderboard::UserRankResponse,
        )
    ),
    tags(
        (name = "leaderboard", description = "Public leaderboard endpoints"),
    )
)]
pub struct ApiDoc;
