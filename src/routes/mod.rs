//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! 핸들러는 얇은 운반 계층일 뿐이고, 실제 규칙은 모두 `ledger`에 있습니다.
//!
//! 각 하위 모듈:
//! - `sessions`: 세션 시작/일시정지/재개/완료/건너뛰기/취소와 조회
//! - `statistics`: 완료 통계
//! - `settings`: 타이머 설정
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `debug`: 전체 세션 진단 덤프

pub mod debug;
pub mod health;
pub mod sessions;
pub mod settings;
pub mod statistics;

#[cfg(test)]
mod tests;

pub use debug::*;
pub use health::*;
pub use sessions::*;
pub use settings::*;
pub use statistics::*;

use crate::{error::AppError, ledger::SessionStore};
use axum::{
    body::Bytes,
    http::{header::InvalidHeaderValue, HeaderValue},
    routing::{delete, get, post},
    Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// `SessionStore`는 내부적으로 `Arc`를 쓰므로 clone해도 같은 원장을 가리킵니다.
#[derive(Clone, Default)]
pub struct AppState {
    pub store: SessionStore,
}

/// 전체 라우터를 조립합니다.
///
/// - `/api/sessions/...`, `/api/statistics`, `/api/settings/...`: 클라이언트 API
/// - `/health`, `/debug/sessions`: 운영용
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api_routes = Router::new()
        .route("/sessions/start", post(start_session))
        .route("/sessions/pause/{id}", post(pause_session))
        .route("/sessions/resume/{id}", post(resume_session))
        .route("/sessions/complete/{id}", post(complete_session))
        .route("/sessions/skip/{id}", post(skip_session))
        .route("/sessions/cancel/{id}", delete(cancel_session))
        // 고정 경로는 `{id}`보다 우선 매칭됩니다.
        .route("/sessions/active", get(get_active_session))
        .route("/sessions/recent", get(get_recent_sessions))
        .route("/sessions/today", get(get_today_sessions))
        .route("/sessions/{id}", get(get_session).delete(delete_session))
        .route("/statistics", get(get_statistics))
        .route(
            "/settings",
            get(get_settings).post(replace_settings).put(replace_settings),
        )
        .route("/settings/reset", post(reset_settings))
        .route(
            "/settings/timer-config",
            get(get_timer_config).post(update_timer_config),
        );

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .route("/debug/sessions", get(debug_sessions))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// CORS 레이어. `*`이면 모든 출처를, 아니면 지정한 출처 하나만 허용합니다.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin.trim() == "*" {
        return Ok(layer.allow_origin(Any));
    }
    Ok(layer.allow_origin(HeaderValue::from_str(origin.trim())?))
}

/// 선택적 JSON 본문을 파싱합니다.
///
/// 본문이 비어 있으면 `T::default()`를 쓰고, 깨진 JSON이나 잘못된 필드 값은
/// 400 `BadRequest`로 돌려줍니다. axum의 `Json` 추출기는 이 경우 415/422를 주므로 직접 처리합니다.
pub(crate) fn parse_optional_json<T>(body: &Bytes) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))
}
