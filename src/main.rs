//! # Tomatick 웹 서버 진입점
//!
//! 뽀모도로 집중/휴식 세션을 추적하는 단일 사용자용 REST 백엔드입니다.
//! 상태는 프로세스 메모리에만 있으며, 재시작하면 사라집니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 설정 로딩
//! 4. 빈 세션 원장 생성
//! 5. (선택) 백그라운드 스위퍼 시작
//! 6. API 라우터와 CORS 설정
//! 7. HTTP 서버 시작

mod config;
mod error;
mod ledger;
mod models;
mod routes;
mod services;

use anyhow::Result;
use config::Config;
use ledger::SessionStore;
use routes::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 tomatick, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tomatick=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env();
    tracing::info!("Starting Tomatick server on {}:{}", config.host, config.port);

    // ── 4단계: 세션 원장 생성 ──
    // 데이터베이스 대신 Mutex로 보호되는 메모리 원장 하나를 모든 핸들러가 공유합니다.
    let store = SessionStore::new();

    // ── 5단계: 백그라운드 스위퍼 ──
    // 기본값은 꺼짐. 켜도 GET active의 조회 시점 자동 완료는 그대로 동작합니다.
    match config.sweep_interval() {
        Some(period) => {
            tracing::info!("Sweeping overdue sessions every {:?}", period);
            let _sweeper = services::sweeper::spawn(store.clone(), period);
        }
        None => tracing::debug!("Background sweeper disabled, relying on lazy completion"),
    }

    // ── 6단계: 라우터와 CORS 설정 ──
    let cors = routes::cors_layer(&config.cors_origin)?;
    tracing::info!("Allowing CORS origin {}", config.cors_origin);
    let app = routes::build_router(AppState { store }, cors);

    // ── 7단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
