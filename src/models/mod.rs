//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `session`: 세션 레코드, 종류/상태 열거형, 요청/응답 구조체
//! - `statistics`: 완료 통계 카운터
//! - `settings`: 타이머 설정과 범위 검증
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Session`처럼 짧게 쓸 수 있습니다.

pub mod session;
pub mod settings;
pub mod statistics;

pub use session::*;
pub use settings::*;
pub use statistics::*;
