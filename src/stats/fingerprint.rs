use std::fmt;

use super::StatsResult;
use crate::network::ExerciseConfig;

/// 통계 저장 키의 접두어
pub const STATS_KEY_PREFIX: &str = "hidraseries_stats_";

/// 연습문제 구성 전체를 순서대로 직렬화한 식별자.
///
/// 구간/부속 순서까지 같아야 같은 연습문제로 본다. 바이트 단위로 같을 때만 같은 지문이다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExerciseFingerprint(String);

impl ExerciseFingerprint {
    pub fn of(config: &ExerciseConfig) -> StatsResult<Self> {
        Ok(Self(serde_json::to_string(config)?))
    }

    #[cfg(test)]
    pub(crate) fn from_raw(raw: &str) -> Self {
        Self(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn storage_key(&self) -> String {
        format!("{STATS_KEY_PREFIX}{}", self.0)
    }
}

impl fmt::Display for ExerciseFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{FittingSpec, SegmentSpec};
    use crate::piping::{DiameterMode, FittingType, Material, Schedule};

    fn config() -> ExerciseConfig {
        ExerciseConfig {
            density_kg_per_m3: 1000.0,
            kinematic_viscosity_m2_per_s: 1e-6,
            flow_rate_m3_per_s: 0.01,
            segments: vec![
                SegmentSpec {
                    material: Material::Steel,
                    diameter_mode: DiameterMode::Schedule(Schedule::Schedule40),
                    declared_diameter_m: None,
                    nominal_size: Some("2".into()),
                    length_m: 10.0,
                },
                SegmentSpec {
                    material: Material::Copper,
                    diameter_mode: DiameterMode::Direct,
                    declared_diameter_m: Some(0.03),
                    nominal_size: None,
                    length_m: 3.0,
                },
            ],
            fittings: vec![FittingSpec {
                fitting: FittingType::Elbow45,
                count: 2,
                segment: 1,
            }],
        }
    }

    #[test]
    fn identical_configs_share_fingerprint() {
        let a = ExerciseFingerprint::of(&config()).unwrap();
        let b = ExerciseFingerprint::of(&config()).unwrap();
        assert_eq!(a, b);
        assert!(a.storage_key().starts_with(STATS_KEY_PREFIX));
    }

    #[test]
    fn any_single_field_change_alters_fingerprint() {
        let base = ExerciseFingerprint::of(&config()).unwrap();
        let mutations: Vec<Box<dyn Fn(&mut ExerciseConfig)>> = vec![
            Box::new(|c| c.density_kg_per_m3 = 998.0),
            Box::new(|c| c.kinematic_viscosity_m2_per_s = 1.1e-6),
            Box::new(|c| c.flow_rate_m3_per_s = 0.02),
            Box::new(|c| c.segments[0].length_m = 10.5),
            Box::new(|c| c.segments[0].material = Material::Stainless),
            Box::new(|c| c.segments[0].nominal_size = Some("3".into())),
            Box::new(|c| c.segments[0].diameter_mode = DiameterMode::Schedule(Schedule::Schedule80)),
            Box::new(|c| c.segments[1].declared_diameter_m = Some(0.031)),
            Box::new(|c| c.fittings[0].count = 3),
            Box::new(|c| c.fittings[0].segment = 0),
            Box::new(|c| c.fittings[0].fitting = FittingType::Elbow90),
            Box::new(|c| c.segments.swap(0, 1)),
        ];
        for (i, mutate) in mutations.iter().enumerate() {
            let mut cfg = config();
            mutate(&mut cfg);
            let fp = ExerciseFingerprint::of(&cfg).unwrap();
            assert_ne!(fp, base, "mutation {i} kept the fingerprint");
        }
    }
}
