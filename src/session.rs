//! 계산 → 채점 → 통계 기록의 한 번의 채점 흐름.
//!
//! 계산이나 채점이 실패하면 통계 저장소는 건드리지 않는다.

use thiserror::Error;

use crate::error::HydraulicsError;
use crate::grading::{grade, GradeOutcome};
use crate::network::{compute_system_losses, ExerciseConfig, LossResult};
use crate::stats::{AttemptStats, AttemptTracker, ExerciseFingerprint, KeyValueStore, StatsError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Hydraulics(#[from] HydraulicsError),
    #[error(transparent)]
    Stats(#[from] StatsError),
}

/// 채점 한 번의 결과 묶음.
#[derive(Debug, Clone)]
pub struct AttemptReport {
    pub losses: LossResult,
    pub outcome: GradeOutcome,
    /// 이번 시도를 반영한 누적 통계
    pub stats: AttemptStats,
    pub fingerprint: ExerciseFingerprint,
}

#[derive(Debug)]
pub struct GradingSession<S> {
    tracker: AttemptTracker<S>,
}

impl<S: KeyValueStore> GradingSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            tracker: AttemptTracker::new(store),
        }
    }

    pub fn tracker(&self) -> &AttemptTracker<S> {
        &self.tracker
    }

    /// 답을 채점하고 시도를 기록한다.
    pub fn submit(
        &mut self,
        config: &ExerciseConfig,
        answer: Option<f64>,
    ) -> Result<AttemptReport, SessionError> {
        let losses = compute_system_losses(config)?;
        let outcome = grade(answer, losses.total_loss_m)?;
        let fingerprint = ExerciseFingerprint::of(config)?;
        let stats = self.tracker.record_attempt(&fingerprint, outcome.tier)?;
        Ok(AttemptReport {
            losses,
            outcome,
            stats,
            fingerprint,
        })
    }

    pub fn summary(&self, config: &ExerciseConfig) -> Result<AttemptStats, SessionError> {
        let fingerprint = ExerciseFingerprint::of(config)?;
        Ok(self.tracker.summary(&fingerprint))
    }
}
