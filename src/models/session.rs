//! # 뽀모도로 세션 모델 정의
//!
//! 집중(Work)·짧은 휴식·긴 휴식 한 번이 하나의 세션입니다.
//!
//! ## 세션 상태 흐름
//! ```text
//! start ─▶ Active ⇄ Paused
//!            │        │
//!            ├────────┴─▶ Completed  (complete / skip / 시간 초과 자동 완료)
//!            └────────┬─▶ Cancelled  (cancel / delete)
//! ```
//! `Completed`와 `Cancelled`는 종착 상태이며 이후 어떤 전이도 허용되지 않습니다.
//!
//! 이 파일에는 원장 내부에서 쓰는 `Session`과,
//! 클라이언트와 주고받는 요청/응답 구조체(와이어 형식)가 함께 있습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 세션 종류. 와이어에서는 숫자 코드(0, 1, 2)로 주고받습니다.
///
/// `#[serde(try_from = "u8", into = "u8")]`: serde가 숫자를 거쳐 변환하므로
/// 범위를 벗어난 코드는 역직렬화 단계에서 거부됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SessionKind {
    #[default]
    Work,
    ShortBreak,
    LongBreak,
}

impl From<SessionKind> for u8 {
    fn from(kind: SessionKind) -> Self {
        match kind {
            SessionKind::Work => 0,
            SessionKind::ShortBreak => 1,
            SessionKind::LongBreak => 2,
        }
    }
}

impl TryFrom<u8> for SessionKind {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(SessionKind::Work),
            1 => Ok(SessionKind::ShortBreak),
            2 => Ok(SessionKind::LongBreak),
            other => Err(format!("unknown session type code {}", other)),
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionKind::Work => "Work",
            SessionKind::ShortBreak => "ShortBreak",
            SessionKind::LongBreak => "LongBreak",
        };
        f.write_str(name)
    }
}

/// 세션 상태. 와이어에서는 variant 이름 그대로의 문자열입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Active,
    Paused,
    Completed,
    Cancelled,
}

impl SessionStatus {
    /// Active 또는 Paused: "단일 활성 세션" 불변식이 세는 상태
    pub fn is_open(self) -> bool {
        matches!(self, SessionStatus::Active | SessionStatus::Paused)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionStatus::Active => "Active",
            SessionStatus::Paused => "Paused",
            SessionStatus::Completed => "Completed",
            SessionStatus::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

/// 원장에 저장되는 세션 레코드.
///
/// 레코드는 한 번 만들어지면 원장에서 물리적으로 지워지지 않습니다.
/// cancel/delete도 상태만 `Cancelled`로 바꿉니다.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// 1부터 순서대로 부여되는 ID
    pub id: u64,
    pub kind: SessionKind,
    pub duration_minutes: u32,
    pub status: SessionStatus,
    /// `Completed`에 도달하면 true. "이미 완료됨" 검사는 이 플래그로 합니다.
    pub is_completed: bool,
    /// 지금까지 확정(fold)된 활동 시간(초)
    pub elapsed_seconds: u64,
    /// 추가 경과 시간을 재기 시작한 시점. `status == Active`일 때만 Some
    pub last_updated: Option<DateTime<Utc>>,
    pub start_time: DateTime<Utc>,
    /// 완료/취소 시각. 그 전까지는 None
    pub end_time: Option<DateTime<Utc>>,
    /// 가장 최근에 일시정지한 시각
    pub paused_at: Option<DateTime<Utc>>,
    pub notes: String,
}

impl Session {
    /// 세션 총 길이(초)
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.duration_minutes) * 60
    }
}

// ── 요청 본문 ──

/// 세션 시작 요청: `POST /api/sessions/start`의 본문
///
/// 모든 필드가 선택입니다. `durationMinutes`가 없으면 현재 설정에서
/// 종류별 길이(기본 25/5/15분)를 가져옵니다.
/// i64로 받는 이유: 0이나 음수를 역직렬화 에러가 아닌
/// 검증 에러 메시지로 돌려주기 위해서입니다.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    #[serde(rename = "type", default)]
    pub kind: SessionKind,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// 세션 완료 요청: `POST /api/sessions/complete/{id}`의 선택적 본문
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSessionRequest {
    /// 비어 있지 않으면 세션 메모를 덮어씁니다.
    #[serde(default)]
    pub notes: Option<String>,
    /// 완료 시각 재지정. `Z`와 `+00:00` 모두 허용
    #[serde(default)]
    pub completed_at: Option<String>,
}

// ── 응답 본문 ──

/// 상세 뷰: start/pause/resume/active 응답에서 공통으로 사용
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetail {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: SessionKind,
    pub status: SessionStatus,
    pub duration_minutes: u32,
    pub remaining_seconds: u64,
    pub elapsed_seconds: u64,
    pub estimated_end_time: Option<String>,
    pub progress_percentage: f64,
    pub start_time: String,
    pub last_updated: Option<String>,
    pub notes: String,
}

/// 이력 뷰: get-by-id / recent / today 응답
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: SessionKind,
    pub duration: u32,
    /// 종료 시각. 아직 끝나지 않은 세션은 시작 시각
    pub completed_at: String,
    pub is_completed: bool,
    pub notes: String,
    pub status: SessionStatus,
    pub remaining_seconds: u64,
    pub elapsed_seconds: u64,
    pub estimated_end_time: Option<String>,
    pub progress_percentage: f64,
    pub last_updated: Option<String>,
}

/// `GET /api/sessions/active` 응답
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSessionResponse {
    pub has_active_session: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_session: Option<SessionDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActiveSessionResponse {
    pub fn active(detail: SessionDetail) -> Self {
        Self {
            has_active_session: true,
            active_session: Some(detail),
            message: None,
        }
    }

    pub fn inactive(message: &str) -> Self {
        Self {
            has_active_session: false,
            active_session: None,
            message: Some(message.to_string()),
        }
    }
}

/// complete/skip/cancel/delete의 확인 응답: `{ "message": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// 진단용 덤프: `GET /debug/sessions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugSessions {
    pub total_sessions: usize,
    pub sessions: Vec<DebugSessionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugSessionEntry {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: SessionKind,
    pub status: SessionStatus,
    pub is_completed: bool,
    pub remaining_seconds: u64,
    pub elapsed_seconds: u64,
}
