//! # 백그라운드 스위퍼
//!
//! 기본 동작은 "조회 시점 자동 완료"입니다. 클라이언트가 `GET active`를 부르지 않으면
//! 시간이 다 된 세션도 Active로 남아 있습니다.
//!
//! `SWEEP_INTERVAL_SECS`가 0보다 크면 이 태스크가 주기적으로 같은 자동 완료를 수행합니다.
//! 조회 시점 검사는 그대로 남아 있으므로, 스위퍼가 있든 없든 `GET active`는
//! 항상 정리된 상태를 돌려줍니다.

use crate::ledger::SessionStore;
use std::time::Duration;
use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

/// 스위퍼 태스크를 띄웁니다. 반환된 핸들을 abort하면 멈춥니다.
pub fn spawn(store: SessionStore, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(period);
        // 서버가 잠시 멈췄다가 깨어나도 밀린 틱을 몰아서 실행하지 않음
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            if let Some(id) = store.sweep() {
                tracing::debug!("Sweeper finalized overdue session {}", id);
            }
        }
    })
}
