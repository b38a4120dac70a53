//! 사용자 답과 계산된 총 손실수두를 비교해 등급(초록/노랑/빨강)을 매긴다.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{HydraulicsError, HydraulicsResult};
use crate::i18n::{keys, Translator};
use crate::network::LossResult;

/// 이 값 이하의 상대오차[%]는 초록
pub const GREEN_LIMIT_PERCENT: f64 = 5.0;
/// 이 값 이하의 상대오차[%]는 노랑, 초과하면 빨강
pub const YELLOW_LIMIT_PERCENT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Green,
    Yellow,
    Red,
}

impl Tier {
    /// 동률일 때의 우선순위 순서이기도 하다.
    pub const ALL: [Tier; 3] = [Tier::Green, Tier::Yellow, Tier::Red];

    /// 경계값은 낮은(좋은) 등급에 포함된다.
    pub fn from_relative_error(relative_error_percent: f64) -> Tier {
        if relative_error_percent <= GREEN_LIMIT_PERCENT {
            Tier::Green
        } else if relative_error_percent <= YELLOW_LIMIT_PERCENT {
            Tier::Yellow
        } else {
            Tier::Red
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Tier::Green => "green",
            Tier::Yellow => "yellow",
            Tier::Red => "red",
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Tier::Green => keys::TIER_GREEN,
            Tier::Yellow => keys::TIER_YELLOW,
            Tier::Red => keys::TIER_RED,
        }
    }

    pub fn description_key(self) -> &'static str {
        match self {
            Tier::Green => keys::TIER_GREEN_DESCRIPTION,
            Tier::Yellow => keys::TIER_YELLOW_DESCRIPTION,
            Tier::Red => keys::TIER_RED_DESCRIPTION,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 채점 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeOutcome {
    pub tier: Tier,
    pub relative_error_percent: f64,
}

impl GradeOutcome {
    /// 등급, 오차, 등급 설명, 손실 내역을 사람이 읽을 수 있는 문장으로 만든다.
    pub fn rationale(&self, tr: &Translator, losses: &LossResult) -> String {
        let lines = [
            format!(
                "{} · {} {:.2} %",
                tr.t(self.tier.label_key()),
                tr.t(keys::RESULT_ERROR),
                self.relative_error_percent
            ),
            tr.t(self.tier.description_key()).to_string(),
            format!(
                "{} {:.4} m",
                tr.t(keys::RESULT_MAJOR_LOSS),
                losses.major_loss_total_m
            ),
            format!(
                "{} {:.4} m",
                tr.t(keys::RESULT_MINOR_LOSS),
                losses.minor_loss_total_m
            ),
            format!("{} {:.4} m", tr.t(keys::RESULT_TOTAL_LOSS), losses.total_loss_m),
        ];
        lines.join("\n")
    }
}

/// 사용자 답을 기준값과 비교한다.
///
/// `user_value` 가 `None` 이면 답이 입력되지 않은 것이다. `Some(0.0)` 은 유효한 답이다.
pub fn grade(user_value: Option<f64>, reference: f64) -> HydraulicsResult<GradeOutcome> {
    let user = user_value.ok_or_else(|| {
        HydraulicsError::invalid("채점하기 전에 총 손실수두 h_L 답을 입력해야 합니다.")
    })?;
    if !user.is_finite() {
        return Err(HydraulicsError::invalid(
            "총 손실수두 답은 유한한 숫자여야 합니다.",
        ));
    }
    if !(reference.is_finite() && reference > 0.0) {
        return Err(HydraulicsError::computation(format!(
            "기준 손실수두가 0 이하이거나 정의되지 않아 상대오차를 계산할 수 없습니다. ({reference})"
        )));
    }
    let relative_error_percent = (user - reference).abs() / reference * 100.0;
    Ok(GradeOutcome {
        tier: Tier::from_relative_error(relative_error_percent),
        relative_error_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(Tier::from_relative_error(0.0), Tier::Green);
        assert_eq!(Tier::from_relative_error(5.0), Tier::Green);
        assert_eq!(Tier::from_relative_error(5.0001), Tier::Yellow);
        assert_eq!(Tier::from_relative_error(10.0), Tier::Yellow);
        assert_eq!(Tier::from_relative_error(10.0001), Tier::Red);
    }

    #[test]
    fn grade_exact_boundaries() {
        assert_eq!(grade(Some(105.0), 100.0).unwrap().tier, Tier::Green);
        assert_eq!(grade(Some(95.0), 100.0).unwrap().tier, Tier::Green);
        assert_eq!(grade(Some(110.0), 100.0).unwrap().tier, Tier::Yellow);
        assert_eq!(grade(Some(90.0), 100.0).unwrap().tier, Tier::Yellow);
        assert_eq!(grade(Some(110.01), 100.0).unwrap().tier, Tier::Red);
    }

    #[test]
    fn zero_is_an_answer_not_missing() {
        let out = grade(Some(0.0), 2.0).unwrap();
        assert_eq!(out.tier, Tier::Red);
        assert!((out.relative_error_percent - 100.0).abs() < 1e-12);
    }

    #[test]
    fn missing_or_non_finite_answer_is_invalid() {
        assert!(matches!(grade(None, 2.0), Err(HydraulicsError::InvalidInput(_))));
        assert!(matches!(
            grade(Some(f64::INFINITY), 2.0),
            Err(HydraulicsError::InvalidInput(_))
        ));
    }

    #[test]
    fn zero_reference_is_a_computation_failure() {
        assert!(matches!(
            grade(Some(1.0), 0.0),
            Err(HydraulicsError::ComputationFailure(_))
        ));
    }

    #[test]
    fn rationale_lists_breakdown() {
        let losses = LossResult {
            segments: vec![],
            minor_losses: vec![],
            major_loss_total_m: 1.5,
            minor_loss_total_m: 0.25,
            total_loss_m: 1.75,
        };
        let out = grade(Some(1.75), 1.75).unwrap();
        let text = out.rationale(&Translator::new("en"), &losses);
        assert!(text.starts_with("Green"), "{text}");
        assert!(text.contains("1.5000 m") && text.contains("0.2500 m") && text.contains("1.7500 m"));
    }
}
