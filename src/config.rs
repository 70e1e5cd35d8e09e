//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목 (모두 선택, 기본값 있음):
//! - `HOST`: 서버 바인딩 주소 (기본값 `0.0.0.0`)
//! - `PORT`: 서버 포트 번호 (기본값 `5116`)
//! - `CORS_ORIGIN`: 브라우저 클라이언트 출처 (기본값 `http://localhost:4200`, `*`이면 모두 허용)
//! - `SWEEP_INTERVAL_SECS`: 백그라운드 스위퍼 주기(초). 0이면 끔 (기본값 `0`)

use std::env;
use std::time::Duration;

const DEFAULT_PORT: u16 = 5116;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 데이터베이스가 없으므로 필수 항목도 없습니다.
/// 잘못된 숫자 값은 에러 대신 기본값으로 대체됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub sweep_interval_secs: u64,
}

impl Config {
    /// 프로세스 환경변수에서 설정을 읽습니다.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 조회 함수로 설정을 만듭니다. 테스트에서 환경변수를 건드리지 않기 위해 분리했습니다.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            cors_origin: lookup("CORS_ORIGIN")
                .unwrap_or_else(|| "http://localhost:4200".to_string()),
            sweep_interval_secs: lookup("SWEEP_INTERVAL_SECS")
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(0),
        }
    }

    /// 스위퍼 주기. 꺼져 있으면 None
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0).then(|| Duration::from_secs(self.sweep_interval_secs))
    }
}
