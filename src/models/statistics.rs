//! # 통계 카운터 모델
//!
//! 프로세스 전체에서 하나만 존재하는 집계 값입니다.
//! Work 세션이 완료(또는 건너뛰기)될 때만 증가합니다.

use super::SessionKind;
use serde::Serialize;

/// `GET /api/statistics` 응답이자 원장이 들고 있는 카운터 그 자체
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// 지금까지 완료/건너뛴 Work 세션 수
    pub total_sessions: u64,
    /// 위와 같은 값. 날짜가 바뀌어도 자동으로 초기화되지 않습니다.
    pub completed_today: u64,
    /// 갱신 규칙 없음. 응답 형태 호환을 위해서만 유지
    pub current_streak: u64,
    pub best_streak: u64,
}

impl Statistics {
    /// 세션 완료를 기록합니다. 휴식 세션은 무시됩니다.
    pub fn record_completion(&mut self, kind: SessionKind) {
        if kind != SessionKind::Work {
            return;
        }
        self.total_sessions += 1;
        self.completed_today += 1;
    }
}
