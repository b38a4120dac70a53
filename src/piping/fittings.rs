/// 부속(피팅/밸브)의 대표 손실계수 K.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HydraulicsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FittingType {
    Elbow90,
    Elbow45,
    TeeRun,
    TeeBranch,
    GlobeValve,
    GateValve,
    SuddenContraction,
    SuddenExpansion,
}

impl FittingType {
    pub const ALL: [FittingType; 8] = [
        FittingType::Elbow90,
        FittingType::Elbow45,
        FittingType::TeeRun,
        FittingType::TeeBranch,
        FittingType::GlobeValve,
        FittingType::GateValve,
        FittingType::SuddenContraction,
        FittingType::SuddenExpansion,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FittingType::Elbow90 => "elbow90",
            FittingType::Elbow45 => "elbow45",
            FittingType::TeeRun => "tee_run",
            FittingType::TeeBranch => "tee_branch",
            FittingType::GlobeValve => "globe_valve",
            FittingType::GateValve => "gate_valve",
            FittingType::SuddenContraction => "sudden_contraction",
            FittingType::SuddenExpansion => "sudden_expansion",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FittingType::Elbow90 => "Standard 90° elbow",
            FittingType::Elbow45 => "45° elbow",
            FittingType::TeeRun => "Tee (flow through run)",
            FittingType::TeeBranch => "Tee (flow through branch)",
            FittingType::GlobeValve => "Globe valve (open)",
            FittingType::GateValve => "Gate valve (open)",
            FittingType::SuddenContraction => "Sudden contraction",
            FittingType::SuddenExpansion => "Sudden expansion",
        }
    }

    /// 무차원 손실계수 K
    pub fn k(self) -> f64 {
        match self {
            FittingType::Elbow90 => 0.95,
            FittingType::Elbow45 => 0.4,
            FittingType::TeeRun => 0.6,
            FittingType::TeeBranch => 1.8,
            FittingType::GlobeValve => 10.0,
            FittingType::GateValve => 0.2,
            FittingType::SuddenContraction => 0.5,
            FittingType::SuddenExpansion => 1.0,
        }
    }
}

impl fmt::Display for FittingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FittingType {
    type Err = HydraulicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        FittingType::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| HydraulicsError::invalid(format!("알 수 없는 부속: {s}")))
    }
}
