//! # 헬스체크(Health Check) 핸들러
//!
//! 서버가 정상적으로 동작하는지 확인하는 엔드포인트입니다.
//!
//! ## 엔드포인트
//! - `GET /health` → `Tomatick API is running!` (text/plain)

/// `GET /health`: 서버 상태를 확인합니다.
///
/// State도 Extractor도 없는 가장 단순한 핸들러입니다.
/// `&'static str`을 반환하면 Axum이 `text/plain; charset=utf-8`로 응답합니다.
pub async fn health_check() -> &'static str {
    "Tomatick API is running!"
}
