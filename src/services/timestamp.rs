//! # UTC 시각 포맷팅/파싱 서비스
//!
//! 세션의 모든 시각은 내부적으로 `DateTime<Utc>`로 보관하고,
//! JSON으로 내보낼 때만 고정된 ISO 8601 문자열로 변환합니다.
//!
//! - 출력 형식: `2026-10-18T09:30:00.123456Z` (마이크로초, 리터럴 `Z`)
//! - 입력 형식: RFC 3339 전체 (`Z` 접미사와 `+00:00` 오프셋 모두 허용)

use chrono::{DateTime, SecondsFormat, Utc};

/// UTC 시각을 와이어 형식 문자열로 변환합니다.
///
/// `to_rfc3339_opts(.., true)`의 두 번째 인자가 `+00:00` 대신 `Z`를 쓰게 합니다.
pub fn format_utc(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// `Option<DateTime<Utc>>`용 편의 함수. `None`은 JSON `null`이 됩니다.
pub fn format_opt(instant: Option<DateTime<Utc>>) -> Option<String> {
    instant.map(format_utc)
}

/// 클라이언트가 보낸 시각 문자열을 UTC로 정규화합니다.
///
/// 다른 오프셋(예: `+09:00`)도 받아들이며, 계산 전에 반드시 UTC로 바꿉니다.
pub fn parse_utc(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw.trim()).map(|dt| dt.with_timezone(&Utc))
}
