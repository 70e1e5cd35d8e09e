//! # 설정 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/settings | `get_settings` | 현재 설정 |
//! | POST, PUT | /api/settings | `replace_settings` | 설정 전체 교체 (빠진 필드는 기본값) |
//! | POST | /api/settings/reset | `reset_settings` | 기본값으로 초기화 |
//! | GET | /api/settings/timer-config | `get_timer_config` | 타이머 화면용 설정 |
//! | POST | /api/settings/timer-config | `update_timer_config` | 타이머 설정 부분 수정 |
//!
//! 범위를 벗어난 값은 400 `bad_request`이며, 이때 설정은 바뀌지 않습니다.

use super::{parse_optional_json, AppState};
use crate::{error::AppError, models::*};
use axum::{body::Bytes, extract::State, Json};

pub async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(state.store.settings())
}

/// `POST /api/settings` + `{ "workDurationMinutes": 50, ... }`
///
/// 빈 본문은 기본값 전체를 보낸 것과 같습니다.
pub async fn replace_settings(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Settings>, AppError> {
    let settings: Settings = parse_optional_json(&body)?;
    Ok(Json(state.store.replace_settings(settings)?))
}

pub async fn reset_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(state.store.reset_settings())
}

pub async fn get_timer_config(State(state): State<AppState>) -> Json<TimerConfig> {
    Json(state.store.timer_config())
}

/// `POST /api/settings/timer-config` + `{ "workDuration": 45 }`
///
/// 보낸 필드만 바꾸고, 바뀐 타이머 설정 전체를 돌려줍니다.
pub async fn update_timer_config(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TimerConfig>, AppError> {
    let update: TimerConfigUpdate = parse_optional_json(&body)?;
    Ok(Json(state.store.update_timer_config(update)?))
}
