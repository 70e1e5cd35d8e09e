//! # 진단용 핸들러
//!
//! - `GET /debug/sessions` → `{ "total_sessions": n, "sessions": [...] }`
//!
//! 경과/남은 시간은 조회 시점 기준으로 계산한 값이며, 원장은 바뀌지 않습니다.

use super::AppState;
use crate::models::DebugSessions;
use axum::{extract::State, Json};

pub async fn debug_sessions(State(state): State<AppState>) -> Json<DebugSessions> {
    Json(state.store.debug_dump())
}
