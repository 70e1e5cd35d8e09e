//! # 설정 연산
//!
//! 설정은 세션 원장과 같은 락 아래에 있으므로, 설정 변경과 세션 시작이
//! 엇갈려도 `start`는 항상 한 시점의 설정만 봅니다.
//! 변경은 검증을 통과한 경우에만 반영됩니다.

use super::Ledger;
use crate::{error::AppError, models::*};

impl Ledger {
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// 설정 전체를 교체합니다.
    pub fn replace_settings(&mut self, settings: Settings) -> Result<&Settings, AppError> {
        settings.validate()?;
        self.settings = settings;
        tracing::info!("Updated settings");
        Ok(&self.settings)
    }

    /// 기본값(25/5/15분, 긴 휴식 주기 4)으로 되돌립니다.
    pub fn reset_settings(&mut self) -> &Settings {
        self.settings = Settings::default();
        tracing::info!("Reset settings to defaults");
        &self.settings
    }

    pub fn timer_config(&self) -> TimerConfig {
        self.settings.timer_config()
    }

    /// 타이머 설정 일부만 바꿉니다. 바꾼 결과가 범위를 벗어나면 아무것도 바뀌지 않습니다.
    pub fn update_timer_config(&mut self, update: TimerConfigUpdate) -> Result<TimerConfig, AppError> {
        let updated = self.settings.with_timer_config(update);
        updated.validate()?;
        self.settings = updated;
        tracing::info!("Updated timer configuration");
        Ok(self.settings.timer_config())
    }
}
