//! # 세션 원장과 상태 전이
//!
//! `Ledger`는 세션 목록, 통계 카운터, 타이머 설정을 함께 소유하는 순수 동기 구조체입니다.
//! 모든 연산은 현재 시각 `now`를 인자로 받습니다. 실제 서버에서는
//! `SessionStore`가 `Utc::now()`를 넘기고, 테스트에서는 임의의 시각으로 시간을 흉내 냅니다.
//!
//! | 연산 | 전제 조건 | 실패 |
//! |------|-----------|------|
//! | start | Active/Paused 세션이 없음 | InvalidState |
//! | pause | Active | NotFound / InvalidState |
//! | resume | Paused | NotFound / InvalidState |
//! | complete, skip | 아직 끝나지 않음 | NotFound / InvalidState |
//! | cancel, delete | 아직 끝나지 않음 | NotFound / InvalidState |
//!
//! 실패한 연산은 원장을 전혀 바꾸지 않습니다.

use crate::{
    error::AppError,
    models::*,
    services::timestamp,
};
use chrono::{DateTime, Utc};

/// skip 시 메모를 덮어쓰는 고정 문자열
pub const SKIPPED_NOTE: &str = "Session skipped by user";

/// 프로세스 메모리에만 존재하는 세션 원장
#[derive(Debug, Clone)]
pub struct Ledger {
    pub(super) sessions: Vec<Session>,
    next_id: u64,
    pub(super) statistics: Statistics,
    pub(super) settings: Settings,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// 빈 원장. 첫 세션의 ID는 1입니다.
    pub fn new() -> Self {
        Self {
            sessions: Vec::new(),
            next_id: 1,
            statistics: Statistics::default(),
            settings: Settings::default(),
        }
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    /// Active 또는 Paused인 세션. 불변식상 최대 하나입니다.
    pub fn open_session(&self) -> Option<&Session> {
        self.sessions.iter().find(|s| s.status.is_open())
    }

    pub fn session(&self, id: u64) -> Result<&Session, AppError> {
        self.sessions
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::session_not_found(id))
    }

    fn session_mut(&mut self, id: u64) -> Result<&mut Session, AppError> {
        self.sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::session_not_found(id))
    }

    /// 새 세션을 Active 상태로 시작합니다.
    /// 길이를 주지 않으면 현재 설정의 종류별 길이를 씁니다.
    pub fn start(
        &mut self,
        req: StartSessionRequest,
        now: DateTime<Utc>,
    ) -> Result<SessionDetail, AppError> {
        let duration_minutes = match req.duration_minutes {
            None => self.settings.duration_for(req.kind),
            Some(raw) => u32::try_from(raw)
                .ok()
                .filter(|minutes| *minutes > 0)
                .ok_or_else(|| {
                    AppError::BadRequest(format!(
                        "durationMinutes must be a positive number of minutes, got {}",
                        raw
                    ))
                })?,
        };

        if self.open_session().is_some() {
            return Err(AppError::InvalidState(
                "There is already an active session".to_string(),
            ));
        }

        let session = Session {
            id: self.next_id,
            kind: req.kind,
            duration_minutes,
            status: SessionStatus::Active,
            is_completed: false,
            elapsed_seconds: 0,
            last_updated: Some(now),
            start_time: now,
            end_time: None,
            paused_at: None,
            notes: req.notes.unwrap_or_default(),
        };
        self.next_id += 1;

        tracing::info!(
            "Started {} session {} ({} minutes)",
            session.kind,
            session.id,
            session.duration_minutes
        );

        let detail = session.detail(now);
        self.sessions.push(session);
        Ok(detail)
    }

    /// Active 세션을 일시정지합니다. 지금까지의 경과 시간을 확정합니다.
    pub fn pause(&mut self, id: u64, now: DateTime<Utc>) -> Result<SessionDetail, AppError> {
        let session = self.session_mut(id)?;
        if session.status != SessionStatus::Active {
            return Err(AppError::InvalidState(format!(
                "Session is not currently active. Current status: {}",
                session.status
            )));
        }

        session.fold(now);
        session.status = SessionStatus::Paused;
        session.paused_at = Some(now);
        session.last_updated = None;

        tracing::info!("Paused session {} at {}s elapsed", id, session.elapsed_seconds);

        // 멈춘 직후 응답에는 예상 종료 시각을 싣지 않습니다.
        let mut detail = session.detail(now);
        detail.estimated_end_time = None;
        Ok(detail)
    }

    /// Paused 세션을 다시 Active로 돌립니다. 체크포인트는 `now`부터 시작합니다.
    pub fn resume(&mut self, id: u64, now: DateTime<Utc>) -> Result<SessionDetail, AppError> {
        let session = self.session_mut(id)?;
        if session.status != SessionStatus::Paused {
            return Err(AppError::InvalidState(format!(
                "Session is not currently paused. Current status: {}",
                session.status
            )));
        }

        session.status = SessionStatus::Active;
        session.last_updated = Some(now);
        session.paused_at = None;

        tracing::info!("Resumed session {}", id);
        Ok(session.detail(now))
    }

    /// 세션을 완료합니다.
    ///
    /// 본문의 `notes`가 비어 있지 않으면 메모를 덮어쓰고,
    /// `completedAt`이 있으면 종료 시각으로 사용합니다.
    /// 경과 시간은 항상 실제 현재 시각(`now`)까지 확정됩니다.
    pub fn complete(
        &mut self,
        id: u64,
        req: CompleteSessionRequest,
        now: DateTime<Utc>,
    ) -> Result<&Session, AppError> {
        self.session(id)?;
        let end_time = match req.completed_at.as_deref() {
            Some(raw) => timestamp::parse_utc(raw).map_err(|e| {
                AppError::BadRequest(format!("completedAt is not a valid timestamp: {}", e))
            })?,
            None => now,
        };

        self.finish(id, now, end_time, "completed")?;
        let session = self.session_mut(id)?;
        if let Some(notes) = req.notes.filter(|n| !n.is_empty()) {
            session.notes = notes;
        }
        Ok(&*session)
    }

    /// complete와 같지만 메모를 고정 문자열로 덮어씁니다. 통계도 똑같이 증가합니다.
    pub fn skip(&mut self, id: u64, now: DateTime<Utc>) -> Result<&Session, AppError> {
        self.finish(id, now, now, "skipped")?;
        let session = self.session_mut(id)?;
        session.notes = SKIPPED_NOTE.to_string();
        Ok(&*session)
    }

    /// 세션을 취소합니다. 레코드는 지워지지 않고 `Cancelled`로 남습니다.
    pub fn cancel(&mut self, id: u64, now: DateTime<Utc>) -> Result<&Session, AppError> {
        self.discard(id, now, "cancel")
    }

    /// `DELETE /api/sessions/{id}`. cancel과 동작이 같고 에러 문구만 다릅니다.
    pub fn delete(&mut self, id: u64, now: DateTime<Utc>) -> Result<&Session, AppError> {
        self.discard(id, now, "delete")
    }

    /// 시간이 다 된 Active 세션을 완료 처리합니다.
    ///
    /// `GET active` 조회와 백그라운드 스위퍼가 함께 사용합니다.
    /// 완료 처리한 세션의 ID를 돌려줍니다.
    pub fn complete_if_overdue(&mut self, now: DateTime<Utc>) -> Option<u64> {
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.status.is_open())
            .filter(|s| s.is_overdue(now))?;

        let id = session.id;
        let kind = session.kind;
        Self::finalize(session, now, now);
        self.statistics.record_completion(kind);

        tracing::info!("Session {} automatically completed", id);
        Some(id)
    }

    /// complete/skip 공통 경로: 종착 상태 검사 → 경과 시간 확정 → 통계 반영
    fn finish(
        &mut self,
        id: u64,
        now: DateTime<Utc>,
        end_time: DateTime<Utc>,
        verb: &str,
    ) -> Result<(), AppError> {
        let session = self.session_mut(id)?;
        if session.is_completed {
            return Err(AppError::InvalidState(
                "Session is already completed".to_string(),
            ));
        }
        if session.status == SessionStatus::Cancelled {
            return Err(AppError::InvalidState(
                "Session is already cancelled".to_string(),
            ));
        }

        let kind = session.kind;
        Self::finalize(session, now, end_time);
        self.statistics.record_completion(kind);

        tracing::info!("Session {} {} ({})", id, verb, kind);
        Ok(())
    }

    fn finalize(session: &mut Session, now: DateTime<Utc>, end_time: DateTime<Utc>) {
        if session.status == SessionStatus::Active {
            session.fold(now);
        }
        session.is_completed = true;
        session.status = SessionStatus::Completed;
        session.end_time = Some(end_time);
        session.last_updated = None;
    }

    fn discard(&mut self, id: u64, now: DateTime<Utc>, verb: &str) -> Result<&Session, AppError> {
        let session = self.session_mut(id)?;
        if session.is_completed {
            return Err(AppError::InvalidState(format!(
                "Cannot {} a completed session",
                verb
            )));
        }
        if session.status == SessionStatus::Cancelled {
            return Err(AppError::InvalidState(
                "Session is already cancelled".to_string(),
            ));
        }

        session.status = SessionStatus::Cancelled;
        session.last_updated = None;
        session.end_time = Some(now);

        tracing::info!("Cancelled session {} ({})", id, verb);
        Ok(&*session)
    }
}
