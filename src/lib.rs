//! 직렬 배관망 손실수두 계산과 채점 로직을 라이브러리로 분리하여 CLI 외의 입력 화면에서도 재사용한다.

pub mod app;
pub mod config;
pub mod error;
pub mod grading;
pub mod i18n;
pub mod network;
pub mod piping;
pub mod session;
pub mod stats;
pub mod ui_cli;

pub use error::{HydraulicsError, HydraulicsResult};
pub use grading::{grade, GradeOutcome, Tier};
pub use network::{compute_system_losses, ExerciseConfig, FittingSpec, LossResult, SegmentSpec};
pub use session::{AttemptReport, GradingSession, SessionError};
pub use stats::{
    AttemptStats, AttemptTracker, ExerciseFingerprint, JsonFileStore, KeyValueStore, MemoryStore,
};
