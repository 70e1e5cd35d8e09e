//! # 세션 원장 (Session Ledger)
//!
//! 세션 저장소, 상태 기계, 시간 계산 엔진을 겸하는 핵심 모듈입니다.
//!
//! 각 하위 모듈:
//! - `accrual`: 경과/남은 시간, 진행률, 예상 종료 시각 계산
//! - `transitions`: `Ledger` 구조체와 상태 전이 연산
//! - `queries`: 조회 연산과 응답 뷰 변환
//! - `settings`: 타이머 설정 조회/변경
//!
//! HTTP 핸들러는 `Ledger`를 직접 만지지 않고 `SessionStore`를 통해 접근합니다.

pub mod accrual;
pub mod queries;
pub mod settings;
pub mod transitions;

pub use transitions::Ledger;

use crate::{error::AppError, models::*};
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;

/// 핸들러들이 공유하는 원장 핸들
///
/// 원장 전체(세션 목록 + 통계)를 Mutex 하나로 보호합니다.
/// 모든 메서드는 락을 한 번만 잡고 그 안에서 검사와 변경을 끝내므로,
/// 동시에 들어온 두 `start` 요청이 모두 통과하거나 통계가 두 번 오르는 일이 없습니다.
///
/// `Arc`로 감싸져 있어 clone해도 같은 원장을 가리킵니다.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<Ledger>>,
}

impl SessionStore {
    /// 빈 원장으로 시작합니다. 상태는 프로세스가 끝나면 사라집니다.
    pub fn new() -> Self {
        Self::from_ledger(Ledger::new())
    }

    pub fn from_ledger(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    pub fn start(&self, req: StartSessionRequest) -> Result<SessionDetail, AppError> {
        self.inner.lock().start(req, Utc::now())
    }

    pub fn pause(&self, id: u64) -> Result<SessionDetail, AppError> {
        self.inner.lock().pause(id, Utc::now())
    }

    pub fn resume(&self, id: u64) -> Result<SessionDetail, AppError> {
        self.inner.lock().resume(id, Utc::now())
    }

    pub fn complete(&self, id: u64, req: CompleteSessionRequest) -> Result<Session, AppError> {
        self.inner.lock().complete(id, req, Utc::now()).cloned()
    }

    pub fn skip(&self, id: u64) -> Result<Session, AppError> {
        self.inner.lock().skip(id, Utc::now()).cloned()
    }

    pub fn cancel(&self, id: u64) -> Result<Session, AppError> {
        self.inner.lock().cancel(id, Utc::now()).cloned()
    }

    pub fn delete(&self, id: u64) -> Result<Session, AppError> {
        self.inner.lock().delete(id, Utc::now()).cloned()
    }

    pub fn active(&self) -> ActiveSessionResponse {
        self.inner.lock().active(Utc::now())
    }

    pub fn summary(&self, id: u64) -> Result<SessionSummary, AppError> {
        self.inner.lock().summary(id, Utc::now())
    }

    pub fn recent(&self, count: usize) -> Vec<SessionSummary> {
        self.inner.lock().recent(count)
    }

    pub fn today(&self) -> Vec<SessionSummary> {
        self.inner.lock().today(Utc::now())
    }

    pub fn statistics(&self) -> Statistics {
        self.inner.lock().statistics()
    }

    pub fn debug_dump(&self) -> DebugSessions {
        self.inner.lock().debug_dump(Utc::now())
    }

    pub fn settings(&self) -> Settings {
        self.inner.lock().settings().clone()
    }

    pub fn replace_settings(&self, settings: Settings) -> Result<Settings, AppError> {
        self.inner.lock().replace_settings(settings).cloned()
    }

    pub fn reset_settings(&self) -> Settings {
        self.inner.lock().reset_settings().clone()
    }

    pub fn timer_config(&self) -> TimerConfig {
        self.inner.lock().timer_config()
    }

    pub fn update_timer_config(&self, update: TimerConfigUpdate) -> Result<TimerConfig, AppError> {
        self.inner.lock().update_timer_config(update)
    }

    /// 시간이 다 된 세션을 완료 처리합니다. 스위퍼가 주기적으로 호출합니다.
    pub fn sweep(&self) -> Option<u64> {
        self.inner.lock().complete_if_overdue(Utc::now())
    }
}
