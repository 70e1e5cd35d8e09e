//! # 통계 핸들러
//!
//! - `GET /api/statistics` → `{ totalSessions, completedToday, currentStreak, bestStreak }`

use super::AppState;
use crate::models::Statistics;
use axum::{extract::State, Json};

/// 원장이 들고 있는 카운터의 스냅샷을 그대로 돌려줍니다.
pub async fn get_statistics(State(state): State<AppState>) -> Json<Statistics> {
    Json(state.store.statistics())
}
