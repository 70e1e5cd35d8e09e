//! # 에러 처리 모듈
//!
//! 세션 원장(ledger)과 HTTP 계층에서 발생할 수 있는 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! 도메인 에러는 `NotFound`와 `InvalidState` 두 가지뿐이며,
//! `BadRequest`는 원장에 닿기 전의 입력 검증 실패에만 사용합니다.

use axum::{
    extract::rejection::PathRejection,  // 경로 파라미터 추출 실패
    http::StatusCode,                   // HTTP 상태 코드 (200, 400, 404 등)
    response::{IntoResponse, Response}, // Axum의 응답 변환 트레이트
    Json,                               // JSON 응답 래퍼
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    /// 요청한 세션이 없음 (HTTP 404)
    #[error("{0}")]
    NotFound(String),

    /// 현재 상태에서 허용되지 않는 전이 (HTTP 400)
    /// 예: Paused 세션을 다시 pause, 이미 완료된 세션을 complete
    #[error("{0}")]
    InvalidState(String),

    /// 잘못된 입력 (HTTP 400)
    /// 예: durationMinutes가 0 이하, 알 수 없는 type 코드, 깨진 JSON
    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    /// 세션 ID로 404 에러를 만듭니다. 메시지 형식은 클라이언트가 그대로 표시합니다.
    pub fn session_not_found(id: u64) -> Self {
        AppError::NotFound(format!("Session with ID {} not found", id))
    }

    /// 에러 본문의 `code` 필드 값
    fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::InvalidState(_) => "invalid_state",
            AppError::BadRequest(_) => "bad_request",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidState(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// `/sessions/abc`처럼 경로의 ID가 숫자가 아니면
/// axum 기본 평문 응답 대신 같은 JSON 에러 형식으로 돌려줍니다.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 결과: `{ "error": "Session with ID 7 not found", "code": "not_found" }`
    ///
    /// `error` 필드는 클라이언트가 읽는 평문 메시지 그대로 두고,
    /// 기계가 분기할 수 있도록 `code`를 함께 보냅니다.
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = status.as_u16(), "Request rejected: {}", self);

        let body = Json(json!({
            "error": self.to_string(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}
