//! # 조회 연산과 응답 뷰 변환
//!
//! 읽기 전용 조회는 경과 시간을 계산만 하고 저장하지 않습니다.
//! 예외는 `active()` 하나로, 시간이 다 된 세션을 먼저 완료 처리한 뒤 응답합니다.

use super::Ledger;
use crate::{
    error::AppError,
    models::*,
    services::timestamp::{format_opt, format_utc},
};
use chrono::{DateTime, Utc};

impl Session {
    /// 상세 뷰. 남은 시간은 `now` 기준으로 새로 계산하고,
    /// 진행률은 확정된 경과 시간 기준입니다.
    pub fn detail(&self, now: DateTime<Utc>) -> SessionDetail {
        SessionDetail {
            id: self.id,
            kind: self.kind,
            status: self.status,
            duration_minutes: self.duration_minutes,
            remaining_seconds: self.remaining_seconds(now),
            elapsed_seconds: self.elapsed_seconds,
            estimated_end_time: format_opt(self.estimated_end_time(now)),
            progress_percentage: self.progress_percentage(),
            start_time: format_utc(self.start_time),
            last_updated: format_opt(self.last_updated),
            notes: self.notes.clone(),
        }
    }

    /// 단건 조회용 이력 뷰 (남은 시간을 실시간 계산)
    pub fn summary(&self, now: DateTime<Utc>) -> SessionSummary {
        SessionSummary {
            id: self.id,
            kind: self.kind,
            duration: self.duration_minutes,
            completed_at: format_utc(self.end_time.unwrap_or(self.start_time)),
            is_completed: self.is_completed,
            notes: self.notes.clone(),
            status: self.status,
            remaining_seconds: self.remaining_seconds(now),
            elapsed_seconds: self.elapsed_seconds,
            estimated_end_time: format_opt(self.estimated_end_time(now)),
            progress_percentage: self.progress_percentage(),
            last_updated: format_opt(self.last_updated),
        }
    }

    /// 목록(recent/today)용 뷰. 완료된 세션만 들어오므로 남은 시간 0, 진행률 100 고정
    fn history_entry(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            kind: self.kind,
            duration: self.duration_minutes,
            completed_at: format_utc(self.end_time.unwrap_or(self.start_time)),
            is_completed: self.is_completed,
            notes: self.notes.clone(),
            status: self.status,
            remaining_seconds: 0,
            elapsed_seconds: self.elapsed_seconds,
            estimated_end_time: None,
            progress_percentage: 100.0,
            last_updated: format_opt(self.last_updated),
        }
    }
}

impl Ledger {
    /// `GET active`: 열린 세션을 돌려주되, 시간이 다 됐으면 먼저 완료 처리합니다.
    pub fn active(&mut self, now: DateTime<Utc>) -> ActiveSessionResponse {
        if self.complete_if_overdue(now).is_some() {
            return ActiveSessionResponse::inactive("Session automatically completed");
        }

        match self.open_session() {
            Some(session) => ActiveSessionResponse::active(session.detail(now)),
            None => ActiveSessionResponse::inactive("No active session"),
        }
    }

    pub fn summary(&self, id: u64, now: DateTime<Utc>) -> Result<SessionSummary, AppError> {
        self.session(id).map(|session| session.summary(now))
    }

    /// 완료된 세션 최대 `count`개를 종료 시각 내림차순으로.
    /// 종료 시각이 같으면 나중에 만들어진 세션이 앞에 옵니다.
    pub fn recent(&self, count: usize) -> Vec<SessionSummary> {
        let mut completed: Vec<&Session> =
            self.sessions.iter().filter(|s| s.is_completed).collect();
        completed.sort_by(|a, b| b.end_time.cmp(&a.end_time).then(b.id.cmp(&a.id)));

        completed
            .into_iter()
            .take(count)
            .map(Session::history_entry)
            .collect()
    }

    /// 오늘(UTC 달력 기준) 완료된 세션, 종료 시각 오름차순
    pub fn today(&self, now: DateTime<Utc>) -> Vec<SessionSummary> {
        let today = now.date_naive();
        let mut finished: Vec<&Session> = self
            .sessions
            .iter()
            .filter(|s| s.is_completed)
            .filter(|s| s.end_time.is_some_and(|end| end.date_naive() == today))
            .collect();
        finished.sort_by_key(|s| (s.end_time, s.id));

        finished.into_iter().map(Session::history_entry).collect()
    }

    /// 모든 세션의 진단용 덤프. 경과/남은 시간은 실시간 계산값입니다.
    pub fn debug_dump(&self, now: DateTime<Utc>) -> DebugSessions {
        DebugSessions {
            total_sessions: self.sessions.len(),
            sessions: self
                .sessions
                .iter()
                .map(|s| DebugSessionEntry {
                    id: s.id,
                    kind: s.kind,
                    status: s.status,
                    is_completed: s.is_completed,
                    remaining_seconds: s.remaining_seconds(now),
                    elapsed_seconds: s.live_elapsed(now),
                })
                .collect(),
        }
    }
}
