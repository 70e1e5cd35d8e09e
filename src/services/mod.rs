//! # 서비스 모듈
//!
//! 원장과 HTTP 계층이 함께 쓰는 보조 기능들입니다.
//! - `timestamp`: UTC 시각의 ISO 8601 포맷팅/파싱
//! - `sweeper`: 시간이 다 된 세션을 주기적으로 완료 처리하는 선택적 백그라운드 태스크

pub mod sweeper;
pub mod timestamp;
