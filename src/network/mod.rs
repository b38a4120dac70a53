//! 직렬 배관망 연습문제 구성과 손실수두 집계.
//!
//! 모든 구간은 같은 체적 유량 Q 를 흘리는 직렬 배치이며 분기는 없다.
//! 구성 값은 계산 시점에 한 번 만들어진 뒤 변경되지 않는다.

pub mod input;
pub mod losses;

use serde::{Deserialize, Serialize};

use crate::piping::{DiameterMode, FittingType, Material};

pub use input::{parse_answer, RawExercise, RawFitting, RawSegment};
pub use losses::{compute_system_losses, LossResult, MinorLoss, ResolvedSegment, GRAVITY};

/// 연습문제 한 개의 전체 입력 구성. 지문(fingerprint)도 이 값에서 만든다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseConfig {
    /// 유체 밀도 [kg/m3]. 현재 손실식에는 쓰이지 않지만 검증은 한다.
    pub density_kg_per_m3: f64,
    /// 동점성계수 ν [m2/s]
    pub kinematic_viscosity_m2_per_s: f64,
    /// 체적 유량 Q [m3/s]
    pub flow_rate_m3_per_s: f64,
    #[serde(default)]
    pub segments: Vec<SegmentSpec>,
    #[serde(default)]
    pub fittings: Vec<FittingSpec>,
}

/// 배관 구간 한 개.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSpec {
    pub material: Material,
    #[serde(rename = "mode")]
    pub diameter_mode: DiameterMode,
    /// 직접 입력 모드의 내경 [m]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_diameter_m: Option<f64>,
    /// schedule 모드의 NPS (예: "2")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nominal_size: Option<String>,
    pub length_m: f64,
}

/// 구간에 연결된 부속. `segment` 는 0부터 시작하는 구간 인덱스이며 소유 관계가 아니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingSpec {
    #[serde(rename = "type")]
    pub fitting: FittingType,
    pub count: u32,
    pub segment: usize,
}
