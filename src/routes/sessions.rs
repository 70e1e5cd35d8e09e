//! # 세션 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /api/sessions/start | `start_session` | 새 세션 시작 |
//! | POST | /api/sessions/pause/{id} | `pause_session` | 일시정지 |
//! | POST | /api/sessions/resume/{id} | `resume_session` | 재개 |
//! | POST | /api/sessions/complete/{id} | `complete_session` | 완료 |
//! | POST | /api/sessions/skip/{id} | `skip_session` | 건너뛰기 (완료로 기록) |
//! | DELETE | /api/sessions/cancel/{id} | `cancel_session` | 취소 |
//! | DELETE | /api/sessions/{id} | `delete_session` | 취소와 동일 (레코드는 남음) |
//! | GET | /api/sessions/active | `get_active_session` | 현재 세션 (시간 초과 시 자동 완료) |
//! | GET | /api/sessions/{id} | `get_session` | 단건 조회 |
//! | GET | /api/sessions/recent?count=N | `get_recent_sessions` | 최근 완료 세션 |
//! | GET | /api/sessions/today | `get_today_sessions` | 오늘 완료된 세션 |
//!
//! ## 클라이언트 사용 흐름
//! ```text
//! 1. 타이머 시작 → POST /sessions/start
//! 2. 화면 갱신 → GET /sessions/active 를 주기적으로 호출 (시간이 다 되면 여기서 자동 완료)
//! 3. 중간에 멈춤/재개 → POST /sessions/pause/{id}, /sessions/resume/{id}
//! 4. 끝 → POST /sessions/complete/{id} 또는 /sessions/skip/{id}
//! ```

use super::{parse_optional_json, AppState};
use crate::{error::AppError, models::*};
use axum::{
    body::Bytes,
    extract::{FromRequestParts, Path, Query, State},
    Json,
};
use serde::Deserialize;

const DEFAULT_RECENT_COUNT: usize = 10;

/// 경로의 세션 ID
///
/// 숫자가 아니면 `From<PathRejection> for AppError`를 거쳐 400 `bad_request` JSON이 됩니다.
#[derive(Debug, Deserialize, FromRequestParts)]
#[serde(transparent)]
#[from_request(via(Path), rejection(AppError))]
pub struct SessionId(pub u64);

/// `GET /sessions/recent`의 쿼리 파라미터
///
/// 문자열로 받아 직접 파싱합니다. 없거나 숫자가 아니면 10개.
#[derive(Debug, Default, Deserialize)]
pub struct RecentQuery {
    pub count: Option<String>,
}

impl RecentQuery {
    pub fn limit(&self) -> usize {
        self.count
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_RECENT_COUNT)
    }
}

/// 새 세션을 시작합니다.
///
/// `POST /api/sessions/start` + `{ "type": 0, "durationMinutes": 25, "notes": "" }`
///
/// 본문 전체와 각 필드가 선택 항목입니다. 이미 Active/Paused 세션이 있으면 400.
pub async fn start_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SessionDetail>, AppError> {
    let req: StartSessionRequest = parse_optional_json(&body)?;
    Ok(Json(state.store.start(req)?))
}

pub async fn pause_session(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<SessionDetail>, AppError> {
    Ok(Json(state.store.pause(id)?))
}

pub async fn resume_session(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<SessionDetail>, AppError> {
    Ok(Json(state.store.resume(id)?))
}

/// 세션을 완료합니다.
///
/// `POST /api/sessions/complete/{id}` + 선택적 `{ "notes": "...", "completedAt": "..." }`
///
/// Work 세션이면 통계 카운터가 1 증가합니다.
pub async fn complete_session(
    State(state): State<AppState>,
    SessionId(id): SessionId,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let req: CompleteSessionRequest = parse_optional_json(&body)?;
    state.store.complete(id, req)?;
    Ok(Json(MessageResponse::new("Session completed successfully")))
}

pub async fn skip_session(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<MessageResponse>, AppError> {
    state.store.skip(id)?;
    Ok(Json(MessageResponse::new("Session skipped successfully")))
}

pub async fn cancel_session(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<MessageResponse>, AppError> {
    state.store.cancel(id)?;
    Ok(Json(MessageResponse::new("Session cancelled successfully")))
}

pub async fn delete_session(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<MessageResponse>, AppError> {
    state.store.delete(id)?;
    Ok(Json(MessageResponse::new("Session deleted successfully")))
}

/// 현재 세션을 조회합니다.
///
/// `GET /api/sessions/active`
///
/// 실패하지 않는 핸들러입니다. 세션이 없으면 `hasActiveSession: false`와 메시지를 돌려주고,
/// 시간이 다 된 Active 세션은 이 호출에서 완료 처리됩니다.
pub async fn get_active_session(State(state): State<AppState>) -> Json<ActiveSessionResponse> {
    Json(state.store.active())
}

pub async fn get_session(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<SessionSummary>, AppError> {
    Ok(Json(state.store.summary(id)?))
}

/// `GET /api/sessions/recent?count=5` → 종료 시각 최신순 완료 세션 배열
pub async fn get_recent_sessions(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Json<Vec<SessionSummary>> {
    Json(state.store.recent(query.limit()))
}

pub async fn get_today_sessions(State(state): State<AppState>) -> Json<Vec<SessionSummary>> {
    Json(state.store.today())
}
