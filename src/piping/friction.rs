//! 레이놀즈수와 Darcy 마찰계수.
//!
//! 난류 영역은 Colebrook 식을 반복 계산하지 않고 Swamee-Jain 명시식으로 근사한다.
//! 천이 영역(2300 ≤ Re < 약 4000)도 난류식으로 처리하며 보간하지 않는다.

/// 층류/난류 경계 레이놀즈수
pub const LAMINAR_LIMIT: f64 = 2300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRegime {
    Laminar,
    Turbulent,
}

/// Re = V·D/ν
pub fn reynolds(
    velocity_m_per_s: f64,
    diameter_m: f64,
    kinematic_viscosity_m2_per_s: f64,
) -> f64 {
    velocity_m_per_s * diameter_m / kinematic_viscosity_m2_per_s
}

pub fn flow_regime(reynolds: f64) -> FlowRegime {
    if reynolds < LAMINAR_LIMIT {
        FlowRegime::Laminar
    } else {
        FlowRegime::Turbulent
    }
}

/// Darcy 마찰계수를 계산한다. Re 가 0 이하(또는 NaN)이면 정의되지 않으므로 `None`.
///
/// - 층류: f = 64/Re
/// - 난류: f = 0.25 / [log10((ε/D)/3.7 + 5.74/Re^0.9)]²
pub fn friction_factor(reynolds: f64, roughness_m: f64, diameter_m: f64) -> Option<f64> {
    if reynolds.is_nan() || reynolds <= 0.0 {
        return None;
    }
    if reynolds < LAMINAR_LIMIT {
        return Some(64.0 / reynolds);
    }
    let term = (roughness_m / diameter_m) / 3.7 + 5.74 / reynolds.powf(0.9);
    let log_term = term.log10();
    Some(0.25 / (log_term * log_term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_reynolds_is_undefined() {
        assert_eq!(friction_factor(0.0, 4.5e-5, 0.05), None);
        assert_eq!(friction_factor(-10.0, 4.5e-5, 0.05), None);
        assert_eq!(friction_factor(f64::NAN, 4.5e-5, 0.05), None);
    }

    #[test]
    fn laminar_is_exact() {
        for re in [1.0, 100.0, 1234.5, 2299.999] {
            assert_eq!(friction_factor(re, 4.5e-5, 0.05), Some(64.0 / re));
            assert_eq!(flow_regime(re), FlowRegime::Laminar);
        }
    }

    #[test]
    fn transition_zone_uses_turbulent_branch() {
        let f = friction_factor(LAMINAR_LIMIT, 0.0, 0.05).unwrap();
        assert_ne!(f, 64.0 / LAMINAR_LIMIT);
        assert_eq!(flow_regime(3000.0), FlowRegime::Turbulent);
    }

    #[test]
    fn swamee_jain_reference_value() {
        // 상용강, 2" sch40, Re ≈ 2.43e5
        let f = friction_factor(242_513.5, 0.000045, 0.0525018).unwrap();
        assert!((f - 0.020_363).abs() < 1e-5, "f={f}");
    }

    #[test]
    fn reynolds_definition() {
        assert!((reynolds(2.0, 0.1, 1e-6) - 200_000.0).abs() < 1e-6);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn laminar_matches_64_over_re(
            re in 1e-3_f64..LAMINAR_LIMIT,
            eps in 0.0_f64..1e-3,
            d in 1e-3_f64..1.0
        ) {
            prop_assert_eq!(friction_factor(re, eps, d), Some(64.0 / re));
        }

        #[test]
        fn turbulent_decreases_with_reynolds(
            re in LAMINAR_LIMIT..1e8,
            step in 0.01_f64..10.0,
            rel_roughness in 0.0_f64..0.05
        ) {
            let d = 0.1;
            let eps = rel_roughness * d;
            let f1 = friction_factor(re, eps, d).unwrap();
            let f2 = friction_factor(re * (1.0 + step), eps, d).unwrap();
            prop_assert!(f2 < f1, "re={} f1={} f2={}", re, f1, f2);
        }
    }
}
