use axum::{Json, Router, routing::get};
use serde::Serialize;
use storage::services::leaderboard::Leaderboard;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::cors::CorsPolicy;
use crate::error::WebError;
use crate::features;
use crate::openapi::ApiDoc;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn build_router(leaderboard: Leaderboard, cors: &CorsPolicy) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", features::leaderboard::routes::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(cors.layer())
        .layer(TraceLayer::new_for_http())
        .with_state(leaderboard)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn not_found() -> WebError {
    WebError::NotFound
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use serde_json::{Value, json};
    use storage::{clock::FixedClock, models::ScoreEntry, repository::memory::MemoryStore};
    use tower::ServiceExt;

    use super::*;

    // Wednesday of 2024-W20
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, d, h, 0, 0).unwrap()
    }

    fn entry(uid: &str, score: i64, country: &str, time_stamp: DateTime<Utc>) -> ScoreEntry {
        ScoreEntry {
            uid: uid.to_string(),
            name: format!("player {uid}"),
            score,
            country: country.to_string(),
            time_stamp,
        }
    }

    fn seeded_store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::with_entries([
            entry("A", 50, "FR", at(7, 9)),
            entry("B", 80, "FR", at(8, 10)),
            entry("C", 80, "DE", at(14, 11)),
            entry("D", 20, "DE", at(15, 12)),
        ]))
    }

    fn router(store: Arc<MemoryStore>, cors: &CorsPolicy) -> Router {
        build_router(Leaderboard::new(store, Arc::new(FixedClock(today()))), cors)
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_last_week_country_codes() {
        let (status, body) = get(
            router(seeded_store(), &CorsPolicy::Open),
            "/api/lastweek/countrycodes",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["FR"]));
    }

    #[tokio::test]
    async fn test_last_week_country_codes_empty() {
        let (status, body) = get(
            router(Arc::new(MemoryStore::new()), &CorsPolicy::Open),
            "/api/lastweek/countrycodes",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_all_uids() {
        let (status, body) = get(router(seeded_store(), &CorsPolicy::Open), "/api/alluids").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["A", "B", "C", "D"]));
    }

    #[tokio::test]
    async fn test_current_week_payload_shape() {
        let (status, body) =
            get(router(seeded_store(), &CorsPolicy::Open), "/api/currentweek").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {"UID": "C", "Name": "player C", "Score": 80, "Country": "DE", "TimeStamp": "2024-05-14T11:00:00.000Z"},
                {"UID": "D", "Name": "player D", "Score": 20, "Country": "DE", "TimeStamp": "2024-05-15T12:00:00.000Z"},
            ])
        );
    }

    #[tokio::test]
    async fn test_last_week_by_country() {
        let (status, body) =
            get(router(seeded_store(), &CorsPolicy::Open), "/api/lastweek/FR").await;
        assert_eq!(status, StatusCode::OK);
        let uids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["UID"].as_str().unwrap())
            .collect();
        assert_eq!(uids, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_last_week_by_country_without_rows_is_404() {
        let (status, body) =
            get(router(seeded_store(), &CorsPolicy::Open), "/api/lastweek/ZZ").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "error": "No data found for this country for last week" })
        );
    }

    #[tokio::test]
    async fn test_user_rank() {
        let (status, body) =
            get(router(seeded_store(), &CorsPolicy::Open), "/api/userrank/A").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "userId": "A", "rank": 3 }));

        let (_, body) = get(router(seeded_store(), &CorsPolicy::Open), "/api/userrank/C").await;
        assert_eq!(body, json!({ "userId": "C", "rank": 1 }));
    }

    #[tokio::test]
    async fn test_user_rank_unknown_user() {
        let (status, body) =
            get(router(seeded_store(), &CorsPolicy::Open), "/api/userrank/nobody").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "User not found" }));
    }

    #[tokio::test]
    async fn test_user_rank_missing_id() {
        for uri in ["/api/userrank", "/api/userrank/"] {
            let (status, body) = get(router(seeded_store(), &CorsPolicy::Open), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body, json!({ "error": "User ID is required" }));
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_generic_500() {
        let store = seeded_store();
        store.set_unavailable(true);

        for uri in [
            "/api/lastweek/countrycodes",
            "/api/alluids",
            "/api/currentweek",
            "/api/lastweek/FR",
            "/api/userrank/A",
        ] {
            let (status, body) = get(router(store.clone(), &CorsPolicy::Open), uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
            assert_eq!(body, json!({ "error": "An internal error occurred" }));
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = get(router(seeded_store(), &CorsPolicy::Open), "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Resource not found" }));
    }

    #[tokio::test]
    async fn test_health() {
        let store = seeded_store();
        store.set_unavailable(true);
        let (status, body) = get(router(store, &CorsPolicy::Open), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_openapi_document_lists_endpoints() {
        let (status, body) =
            get(router(seeded_store(), &CorsPolicy::Open), "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        let paths = body["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/lastweek/{country}"));
        assert!(paths.contains_key("/api/userrank/{user_id}"));
    }

    async fn allow_origin(cors: &CorsPolicy, origin: &str) -> Option<String> {
        let response = router(seeded_store(), cors)
            .oneshot(
                Request::builder()
                    .uri("/api/alluids")
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|value| value.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_open_cors_allows_any_origin() {
        let allowed = allow_origin(&CorsPolicy::Open, "https://anywhere.example").await;
        assert_eq!(allowed.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn test_single_origin_cors_rejects_other_origins() {
        let cors = CorsPolicy::SingleOrigin {
            origins: vec!["https://game.example".to_string()],
        };
        assert_eq!(
            allow_origin(&cors, "https://game.example").await.as_deref(),
            Some("https://game.example")
        );
        assert_eq!(allow_origin(&cors, "https://evil.example").await, None);
    }
}
