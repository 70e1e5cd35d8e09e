//! # 시간 누적(accrual) 계산
//!
//! Active 세션의 경과 시간은 저장소에서 계속 갱신되지 않습니다.
//! 대신 `last_updated`가 마지막 체크포인트를 가리키고, 필요할 때마다
//!
//! ```text
//! elapsed = elapsed_seconds + max(0, now - last_updated)
//! ```
//!
//! 로 계산합니다. 조회는 이 값을 계산만 하고(`live_elapsed`),
//! Active 상태를 떠나는 전이(pause, complete, skip, 자동 완료)는
//! 이 값을 `elapsed_seconds`에 확정합니다(`fold`).
//! 백그라운드 시계가 없어도 전이 때마다 체크포인트를 남기면 정확합니다.

use crate::models::{Session, SessionStatus};
use chrono::{DateTime, Duration, Utc};

/// 두 시각 사이의 경과 초. 소수점 이하는 버리고, 시계가 거꾸로 가면 0입니다.
fn whole_seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    u64::try_from((to - from).num_seconds()).unwrap_or(0)
}

impl Session {
    /// 상태를 바꾸지 않고 계산한 현재 경과 시간(초)
    pub fn live_elapsed(&self, now: DateTime<Utc>) -> u64 {
        match (self.status, self.last_updated) {
            (SessionStatus::Active, Some(anchor)) => self
                .elapsed_seconds
                .saturating_add(whole_seconds_between(anchor, now)),
            _ => self.elapsed_seconds,
        }
    }

    /// 지금까지의 경과 시간을 `elapsed_seconds`에 확정합니다.
    ///
    /// Active 세션이면 체크포인트를 `now`로 옮깁니다.
    /// Active를 떠나는 전이는 호출 직후 `last_updated`를 비워야 합니다.
    pub fn fold(&mut self, now: DateTime<Utc>) {
        self.elapsed_seconds = self.live_elapsed(now);
        if self.status == SessionStatus::Active {
            self.last_updated = Some(now);
        }
    }

    /// 남은 시간(초). 0 미만으로 내려가지 않으며, 완료된 세션은 항상 0
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> u64 {
        if self.status == SessionStatus::Completed {
            return 0;
        }
        self.total_seconds().saturating_sub(self.live_elapsed(now))
    }

    /// 저장된(확정된) 경과 시간 기준 진행률. 초과 경과 시 100을 넘을 수 있습니다.
    pub fn progress_percentage(&self) -> f64 {
        let total = self.total_seconds();
        if total == 0 {
            return 0.0;
        }
        self.elapsed_seconds as f64 / total as f64 * 100.0
    }

    /// 예상 종료 시각 `now + remaining`. 남은 시간이 0이면 None
    ///
    /// Paused 세션은 "지금 재개하면 끝날 시각"이 됩니다.
    pub fn estimated_end_time(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.remaining_seconds(now) {
            0 => None,
            remaining => Some(now + Duration::seconds(remaining as i64)),
        }
    }

    /// Active인데 남은 시간이 없는 세션: 조회 시점에 자동 완료 대상
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == SessionStatus::Active && self.remaining_seconds(now) == 0
    }
}
