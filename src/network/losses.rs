use serde::Serialize;
use tracing::debug;

use super::{ExerciseConfig, SegmentSpec};
use crate::error::{HydraulicsError, HydraulicsResult};
use crate::piping::{friction_factor, resolve_diameter, reynolds, FittingType};

/// 표준 중력가속도 [m/s2]
pub const GRAVITY: f64 = 9.81;

/// 계산이 끝난 구간.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSegment {
    /// 0부터 시작하는 구간 인덱스
    pub index: usize,
    pub length_m: f64,
    pub inner_diameter_m: f64,
    pub area_m2: f64,
    pub velocity_m_per_s: f64,
    pub reynolds: f64,
    pub friction_factor: f64,
    /// 마찰(주) 손실수두 h_f [m]
    pub major_loss_m: f64,
}

/// 부속 한 줄의 부차 손실수두.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinorLoss {
    /// 0부터 시작하는 부속 행 인덱스
    pub fitting_index: usize,
    pub fitting: FittingType,
    pub count: u32,
    pub segment: usize,
    pub loss_m: f64,
}

/// 손실수두 계산 결과. 채점할 때마다 새로 계산하며 캐시하지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LossResult {
    pub segments: Vec<ResolvedSegment>,
    pub minor_losses: Vec<MinorLoss>,
    pub major_loss_total_m: f64,
    pub minor_loss_total_m: f64,
    pub total_loss_m: f64,
}

/// 배관망 전체의 주 손실/부차 손실/총 손실수두를 계산한다.
///
/// 한 구간이라도 실패하면 전체 계산이 실패하며 부분 결과는 없다.
pub fn compute_system_losses(config: &ExerciseConfig) -> HydraulicsResult<LossResult> {
    require_positive("유체 밀도 ρ", config.density_kg_per_m3)?;
    require_positive("동점성계수 ν", config.kinematic_viscosity_m2_per_s)?;
    require_positive("체적 유량 Q", config.flow_rate_m3_per_s)?;
    if config.segments.is_empty() {
        return Err(HydraulicsError::invalid(
            "배관 구간을 최소 하나 이상 추가해야 합니다.",
        ));
    }

    let segments = config
        .segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            resolve_segment(
                index,
                segment,
                config.flow_rate_m3_per_s,
                config.kinematic_viscosity_m2_per_s,
            )
            .map_err(|e| e.at_segment(index + 1))
        })
        .collect::<HydraulicsResult<Vec<_>>>()?;

    let mut minor_losses = Vec::new();
    for (fitting_index, spec) in config.fittings.iter().enumerate() {
        if spec.count == 0 {
            continue;
        }
        let segment = segments.get(spec.segment).ok_or_else(|| {
            HydraulicsError::invalid(format!(
                "부속 {}이(가) 존재하지 않는 구간 {}에 연결되어 있습니다.",
                fitting_index + 1,
                spec.segment.saturating_add(1)
            ))
        })?;
        // h_m = n·K·V²/(2g)
        let loss_m =
            f64::from(spec.count) * spec.fitting.k() * velocity_head(segment.velocity_m_per_s);
        minor_losses.push(MinorLoss {
            fitting_index,
            fitting: spec.fitting,
            count: spec.count,
            segment: spec.segment,
            loss_m,
        });
    }

    let major_loss_total_m: f64 = segments.iter().map(|s| s.major_loss_m).sum();
    let minor_loss_total_m: f64 = minor_losses.iter().map(|m| m.loss_m).sum();
    let total_loss_m = major_loss_total_m + minor_loss_total_m;
    debug!(
        segments = segments.len(),
        fittings = minor_losses.len(),
        major_loss_total_m,
        minor_loss_total_m,
        total_loss_m,
        "system losses computed"
    );

    Ok(LossResult {
        segments,
        minor_losses,
        major_loss_total_m,
        minor_loss_total_m,
        total_loss_m,
    })
}

fn resolve_segment(
    index: usize,
    segment: &SegmentSpec,
    flow_m3_s: f64,
    nu: f64,
) -> HydraulicsResult<ResolvedSegment> {
    let length = segment.length_m;
    if !(length.is_finite() && length > 0.0) {
        return Err(HydraulicsError::invalid("길이는 0보다 커야 합니다."));
    }
    let diameter = resolve_diameter(segment)?;
    let area = std::f64::consts::PI * diameter * diameter / 4.0;
    let velocity = flow_m3_s / area;
    let re = reynolds(velocity, diameter, nu);
    let f = friction_factor(re, segment.material.roughness_m(), diameter)
        .filter(|f| f.is_finite() && *f > 0.0)
        .ok_or_else(|| {
            HydraulicsError::computation(format!("마찰계수 f 를 계산할 수 없습니다. (Re={re})"))
        })?;

    // h_f = f·(L/D)·V²/(2g)
    let major_loss_m = f * (length / diameter) * velocity_head(velocity);
    debug!(
        segment = index + 1,
        diameter_m = diameter,
        velocity_m_per_s = velocity,
        reynolds = re,
        friction_factor = f,
        major_loss_m,
        "segment resolved"
    );

    Ok(ResolvedSegment {
        index,
        length_m: length,
        inner_diameter_m: diameter,
        area_m2: area,
        velocity_m_per_s: velocity,
        reynolds: re,
        friction_factor: f,
        major_loss_m,
    })
}

fn velocity_head(velocity_m_per_s: f64) -> f64 {
    velocity_m_per_s * velocity_m_per_s / (2.0 * GRAVITY)
}

fn require_positive(field: &str, value: f64) -> HydraulicsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(HydraulicsError::invalid(format!(
            "{field} 값이 없거나 0 이하입니다. 양수를 입력하세요."
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::FittingSpec;
    use crate::piping::{DiameterMode, Material, Schedule};

    fn sch40(nps: &str, length_m: f64) -> SegmentSpec {
        SegmentSpec {
            material: Material::Steel,
            diameter_mode: DiameterMode::Schedule(Schedule::Schedule40),
            declared_diameter_m: None,
            nominal_size: Some(nps.into()),
            length_m,
        }
    }

    fn config(segments: Vec<SegmentSpec>, fittings: Vec<FittingSpec>) -> ExerciseConfig {
        ExerciseConfig {
            density_kg_per_m3: 1000.0,
            kinematic_viscosity_m2_per_s: 1e-6,
            flow_rate_m3_per_s: 0.01,
            segments,
            fittings,
        }
    }

    #[test]
    fn single_segment_breakdown() {
        let res = compute_system_losses(&config(vec![sch40("2", 10.0)], vec![])).unwrap();
        let s = &res.segments[0];
        assert!((s.area_m2 - 0.002_165).abs() < 1e-6);
        assert!((s.velocity_m_per_s - 4.619).abs() < 1e-3);
        assert!((s.reynolds - 242_513.5).abs() < 1.0);
        assert!((s.major_loss_m - 4.2179).abs() < 1e-3, "h_f={}", s.major_loss_m);
        assert_eq!(res.minor_loss_total_m, 0.0);
        assert_eq!(res.total_loss_m, res.major_loss_total_m);
    }

    #[test]
    fn minor_loss_uses_segment_velocity() {
        let fittings = vec![
            FittingSpec {
                fitting: FittingType::Elbow90,
                count: 2,
                segment: 1,
            },
            FittingSpec {
                fitting: FittingType::GlobeValve,
                count: 0,
                segment: 0,
            },
        ];
        let res =
            compute_system_losses(&config(vec![sch40("2", 10.0), sch40("4", 5.0)], fittings)).unwrap();
        let v = res.segments[1].velocity_m_per_s;
        let expected = 2.0 * 0.95 * v * v / (2.0 * GRAVITY);
        assert_eq!(res.minor_losses.len(), 1);
        assert!((res.minor_loss_total_m - expected).abs() < 1e-12);
        assert!(
            (res.total_loss_m - (res.major_loss_total_m + res.minor_loss_total_m)).abs() < 1e-12
        );
    }

    #[test]
    fn laminar_segment() {
        let mut cfg = config(vec![sch40("2", 10.0)], vec![]);
        cfg.flow_rate_m3_per_s = 1e-6;
        let res = compute_system_losses(&cfg).unwrap();
        let s = &res.segments[0];
        assert!(s.reynolds < 2300.0);
        assert_eq!(s.friction_factor, 64.0 / s.reynolds);
    }

    #[test]
    fn global_inputs_must_be_positive() {
        let mut cfg = config(vec![sch40("2", 10.0)], vec![]);
        cfg.kinematic_viscosity_m2_per_s = 0.0;
        let err = compute_system_losses(&cfg).unwrap_err();
        assert!(matches!(&err, HydraulicsError::InvalidInput(m) if m.contains("ν")), "{err}");

        let mut cfg = config(vec![sch40("2", 10.0)], vec![]);
        cfg.density_kg_per_m3 = f64::NAN;
        assert!(matches!(
            compute_system_losses(&cfg),
            Err(HydraulicsError::InvalidInput(_))
        ));
    }

    #[test]
    fn empty_network_is_rejected() {
        let err = compute_system_losses(&config(vec![], vec![])).unwrap_err();
        assert!(matches!(err, HydraulicsError::InvalidInput(_)));
    }

    #[test]
    fn bad_segment_is_named_by_position() {
        let err = compute_system_losses(&config(vec![sch40("2", 10.0), sch40("2", -1.0)], vec![]))
            .unwrap_err();
        assert!(matches!(&err, HydraulicsError::InvalidInput(m) if m.starts_with("구간 2")), "{err}");
    }

    #[test]
    fn fitting_on_missing_segment_fails() {
        let fittings = vec![FittingSpec {
            fitting: FittingType::TeeBranch,
            count: 1,
            segment: 5,
        }];
        let err = compute_system_losses(&config(vec![sch40("2", 1.0), sch40("3", 1.0)], fittings))
            .unwrap_err();
        assert!(matches!(err, HydraulicsError::InvalidInput(_)));
    }

    #[test]
    fn identical_config_gives_identical_result() {
        let fittings = vec![FittingSpec {
            fitting: FittingType::GateValve,
            count: 3,
            segment: 0,
        }];
        let cfg = config(vec![sch40("1.5", 7.5), sch40("3", 2.0)], fittings);
        let a = compute_system_losses(&cfg).unwrap();
        let b = compute_system_losses(&cfg.clone()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.total_loss_m.to_bits(), b.total_loss_m.to_bits());
    }
}
