use thiserror::Error;

use crate::piping::Schedule;

pub type HydraulicsResult<T> = Result<T, HydraulicsError>;

/// 손실수두 계산/채점 과정에서 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HydraulicsError {
    /// 사용자가 입력한 값이 없거나 형식이 잘못되었거나 0 이하인 경우
    #[error("입력 오류: {0}")]
    InvalidInput(String),
    /// 요청 자체는 올바르지만 해당 NPS/schedule 조합의 내경 데이터가 없는 경우
    #[error(
        "NPS {nominal_size}\" 에 대한 {schedule} 내경 데이터가 없습니다. \
         다른 schedule(40 또는 80)을 사용하거나 \"직접 내경\" 모드로 전환하세요."
    )]
    MissingScheduleEntry {
        schedule: Schedule,
        nominal_size: String,
    },
    /// 내부 수치 계산 결과가 정의되지 않았거나 0 이하인 경우
    #[error("계산 실패: {0}")]
    ComputationFailure(String),
}

impl HydraulicsError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        HydraulicsError::InvalidInput(msg.into())
    }

    pub(crate) fn computation(msg: impl Into<String>) -> Self {
        HydraulicsError::ComputationFailure(msg.into())
    }

    /// 메시지 앞에 1부터 시작하는 구간 번호를 붙인다. 스케줄 누락 오류는 그대로 둔다.
    pub(crate) fn at_segment(self, position: usize) -> Self {
        match self {
            HydraulicsError::InvalidInput(msg) => {
                HydraulicsError::InvalidInput(format!("구간 {position}: {msg}"))
            }
            HydraulicsError::ComputationFailure(msg) => {
                HydraulicsError::ComputationFailure(format!("구간 {position}: {msg}"))
            }
            other => other,
        }
    }
}
