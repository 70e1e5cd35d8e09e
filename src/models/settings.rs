//! # 타이머 설정 모델
//!
//! 단일 사용자용 설정 한 벌입니다. 세션 원장과 같은 락 아래에 있으며,
//! 프로세스가 재시작되면 기본값으로 돌아갑니다.
//!
//! - `Settings`: `GET/POST/PUT /api/settings`의 본문이자 원장이 들고 있는 값
//! - `TimerConfig`: `GET /api/settings/timer-config`의 응답 (타이머 화면에 필요한 부분만)
//! - `TimerConfigUpdate`: `POST /api/settings/timer-config`의 부분 수정 본문

use super::SessionKind;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// 각 숫자 설정의 허용 범위
pub mod limits {
    use std::ops::RangeInclusive;

    pub const WORK_MINUTES: RangeInclusive<u32> = 1..=60;
    pub const SHORT_BREAK_MINUTES: RangeInclusive<u32> = 1..=30;
    pub const LONG_BREAK_MINUTES: RangeInclusive<u32> = 1..=60;
    pub const SESSIONS_UNTIL_LONG_BREAK: RangeInclusive<u32> = 2..=10;
    pub const DAILY_GOAL: RangeInclusive<u32> = 1..=200;
    pub const WEEKLY_GOAL: RangeInclusive<u32> = 1..=100;
}

/// 사용자 설정 전체
///
/// `#[serde(default)]`: 요청 본문에서 빠진 필드는 기본값으로 채워집니다.
/// 즉 `POST /api/settings`는 부분 수정이 아니라 전체 교체입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub work_duration_minutes: u32,
    pub short_break_duration_minutes: u32,
    pub long_break_duration_minutes: u32,
    /// 긴 휴식 전까지의 Work 세션 수
    pub sessions_until_long_break: u32,
    pub auto_start_breaks: bool,
    pub auto_start_work: bool,
    pub play_notification_sounds: bool,
    pub show_desktop_notifications: bool,
    pub daily_goal_sessions: u32,
    pub weekly_goal_sessions: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_duration_minutes: 25,
            short_break_duration_minutes: 5,
            long_break_duration_minutes: 15,
            sessions_until_long_break: 4,
            auto_start_breaks: false,
            auto_start_work: false,
            play_notification_sounds: true,
            show_desktop_notifications: true,
            daily_goal_sessions: 8,
            weekly_goal_sessions: 40,
        }
    }
}

fn check_range(
    errors: &mut Vec<String>,
    value: u32,
    range: RangeInclusive<u32>,
    message: impl FnOnce(u32, u32) -> String,
) {
    if !range.contains(&value) {
        errors.push(message(*range.start(), *range.end()));
    }
}

impl Settings {
    /// 범위를 벗어난 값을 모두 모아 하나의 `BadRequest`로 돌려줍니다.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();

        check_range(&mut errors, self.work_duration_minutes, limits::WORK_MINUTES, |lo, hi| {
            format!("Work duration must be between {} and {} minutes", lo, hi)
        });
        check_range(
            &mut errors,
            self.short_break_duration_minutes,
            limits::SHORT_BREAK_MINUTES,
            |lo, hi| format!("Short break duration must be between {} and {} minutes", lo, hi),
        );
        check_range(
            &mut errors,
            self.long_break_duration_minutes,
            limits::LONG_BREAK_MINUTES,
            |lo, hi| format!("Long break duration must be between {} and {} minutes", lo, hi),
        );
        check_range(
            &mut errors,
            self.sessions_until_long_break,
            limits::SESSIONS_UNTIL_LONG_BREAK,
            |lo, hi| format!("Sessions until long break must be between {} and {}", lo, hi),
        );
        check_range(&mut errors, self.daily_goal_sessions, limits::DAILY_GOAL, |lo, hi| {
            format!("Daily goal must be between {} and {} sessions", lo, hi)
        });
        check_range(&mut errors, self.weekly_goal_sessions, limits::WEEKLY_GOAL, |lo, hi| {
            format!("Weekly goal must be between {} and {} sessions", lo, hi)
        });

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::BadRequest(errors.join("; ")))
        }
    }

    /// `durationMinutes` 없이 시작한 세션의 길이
    pub fn duration_for(&self, kind: SessionKind) -> u32 {
        match kind {
            SessionKind::Work => self.work_duration_minutes,
            SessionKind::ShortBreak => self.short_break_duration_minutes,
            SessionKind::LongBreak => self.long_break_duration_minutes,
        }
    }

    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig {
            work_duration: self.work_duration_minutes,
            short_break_duration: self.short_break_duration_minutes,
            long_break_duration: self.long_break_duration_minutes,
            sessions_until_long_break: self.sessions_until_long_break,
            auto_start_breaks: self.auto_start_breaks,
            auto_start_work: self.auto_start_work,
            play_notification_sounds: self.play_notification_sounds,
            show_desktop_notifications: self.show_desktop_notifications,
        }
    }

    /// 부분 수정을 적용한 새 설정. 검증은 호출하는 쪽에서 합니다.
    pub fn with_timer_config(&self, update: TimerConfigUpdate) -> Self {
        Self {
            work_duration_minutes: update.work_duration.unwrap_or(self.work_duration_minutes),
            short_break_duration_minutes: update
                .short_break_duration
                .unwrap_or(self.short_break_duration_minutes),
            long_break_duration_minutes: update
                .long_break_duration
                .unwrap_or(self.long_break_duration_minutes),
            sessions_until_long_break: update
                .sessions_until_long_break
                .unwrap_or(self.sessions_until_long_break),
            auto_start_breaks: update.auto_start_breaks.unwrap_or(self.auto_start_breaks),
            auto_start_work: update.auto_start_work.unwrap_or(self.auto_start_work),
            play_notification_sounds: update
                .play_notification_sounds
                .unwrap_or(self.play_notification_sounds),
            show_desktop_notifications: update
                .show_desktop_notifications
                .unwrap_or(self.show_desktop_notifications),
            ..self.clone()
        }
    }
}

/// 타이머 화면용 설정 뷰
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerConfig {
    pub work_duration: u32,
    pub short_break_duration: u32,
    pub long_break_duration: u32,
    pub sessions_until_long_break: u32,
    pub auto_start_breaks: bool,
    pub auto_start_work: bool,
    pub play_notification_sounds: bool,
    pub show_desktop_notifications: bool,
}

/// 타이머 설정 부분 수정. 보낸 필드만 바뀝니다.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerConfigUpdate {
    pub work_duration: Option<u32>,
    pub short_break_duration: Option<u32>,
    pub long_break_duration: Option<u32>,
    pub sessions_until_long_break: Option<u32>,
    pub auto_start_breaks: Option<bool>,
    pub auto_start_work: Option<bool>,
    pub play_notification_sounds: Option<bool>,
    pub show_desktop_notifications: Option<bool>,
}
