use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRankResponse {
    pub user_id: String,
    /// 1-based; rows scoring strictly higher than the user's best, plus one
    pub rank: i64,
}
