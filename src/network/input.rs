//! 입력 화면에서 넘어온 문자열 값을 `ExerciseConfig` 로 변환한다.
//!
//! 빈 숫자 칸은 0 으로 취급해 이후 양수 검증에서 해당 항목 이름으로 보고되게 한다.
//! 정답 칸만은 예외로, 비어 있음(None)과 0 을 구분한다.

use super::{ExerciseConfig, FittingSpec, SegmentSpec};
use crate::error::{HydraulicsError, HydraulicsResult};
use crate::piping::{DiameterMode, FittingType, Material};

/// 입력 화면의 원시 문자열 상태.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawExercise {
    pub density: String,
    pub viscosity: String,
    pub flow_rate: String,
    pub segments: Vec<RawSegment>,
    pub fittings: Vec<RawFitting>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawSegment {
    pub material: String,
    /// "direct" 또는 schedule 키
    pub mode: String,
    pub nominal_size: String,
    pub diameter: String,
    pub length: String,
}

impl Default for RawSegment {
    fn default() -> Self {
        Self {
            material: Material::Steel.key().to_string(),
            mode: "schedule40".to_string(),
            nominal_size: "2".to_string(),
            diameter: String::new(),
            length: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawFitting {
    pub fitting: String,
    pub count: String,
    /// 0부터 시작하는 구간 인덱스 문자열
    pub segment: String,
}

impl Default for RawFitting {
    fn default() -> Self {
        Self {
            fitting: FittingType::Elbow90.key().to_string(),
            count: "1".to_string(),
            segment: "0".to_string(),
        }
    }
}

impl RawExercise {
    pub fn parse(&self) -> HydraulicsResult<ExerciseConfig> {
        Ok(ExerciseConfig {
            density_kg_per_m3: parse_number("유체 밀도 ρ", &self.density)?,
            kinematic_viscosity_m2_per_s: parse_number("동점성계수 ν", &self.viscosity)?,
            flow_rate_m3_per_s: parse_number("체적 유량 Q", &self.flow_rate)?,
            segments: self
                .segments
                .iter()
                .enumerate()
                .map(|(i, s)| s.parse(i + 1))
                .collect::<HydraulicsResult<_>>()?,
            fittings: self
                .fittings
                .iter()
                .enumerate()
                .map(|(i, f)| f.parse(i + 1))
                .collect::<HydraulicsResult<_>>()?,
        })
    }

    /// 구간을 삭제하고, 범위를 벗어난 부속 연결은 첫 번째 구간으로 되돌린다.
    pub fn remove_segment(&mut self, index: usize) -> Option<RawSegment> {
        if index >= self.segments.len() {
            return None;
        }
        let removed = self.segments.remove(index);
        self.relink_dangling_fittings();
        Some(removed)
    }

    /// 기존 구간을 지우고 `template` 을 복제해 `count` 개의 구간을 만든다.
    /// 총 길이가 주어지면 각 구간에 같은 길이(소수 둘째 자리)로 나눠 넣는다.
    pub fn split_into_segments(
        &mut self,
        count: usize,
        total_length_m: Option<f64>,
        template: &RawSegment,
    ) -> HydraulicsResult<()> {
        if count == 0 {
            return Err(HydraulicsError::invalid(
                "구간 수는 1 이상의 정수여야 합니다.",
            ));
        }
        let mut segment = template.clone();
        if let Some(total) = total_length_m.filter(|l| l.is_finite() && *l > 0.0) {
            segment.length = format!("{:.2}", total / count as f64);
        }
        self.segments = vec![segment; count];
        self.relink_dangling_fittings();
        Ok(())
    }

    /// 현재 입력된 구간 길이의 합 [m]. 숫자가 아닌 칸은 건너뛴다.
    pub fn total_length_hint(&self) -> f64 {
        self.segments
            .iter()
            .filter_map(|s| s.length.trim().parse::<f64>().ok())
            .filter(|l| l.is_finite())
            .sum()
    }

    fn relink_dangling_fittings(&mut self) {
        let len = self.segments.len();
        for fitting in &mut self.fittings {
            if !fitting.segment.trim().parse::<usize>().is_ok_and(|i| i < len) {
                fitting.segment = "0".to_string();
            }
        }
    }
}

impl RawSegment {
    /// `position` 은 1부터 시작하는 구간 번호(오류 메시지용).
    pub fn parse(&self, position: usize) -> HydraulicsResult<SegmentSpec> {
        let material = self.material.parse::<Material>().map_err(|_| {
            HydraulicsError::invalid(format!("구간 {position}의 재질이 올바르지 않습니다."))
        })?;
        let diameter_mode = self.mode.parse::<DiameterMode>().map_err(|_| {
            HydraulicsError::invalid(format!("구간 {position}의 내경 입력 방식이 올바르지 않습니다."))
        })?;
        let field = format!("구간 {position} 내경");
        let declared_diameter_m = parse_optional_number(&field, &self.diameter)?;
        let nominal_size = Some(self.nominal_size.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let length_m = parse_number(&format!("구간 {position} 길이"), &self.length)?;
        Ok(SegmentSpec {
            material,
            diameter_mode,
            declared_diameter_m,
            nominal_size,
            length_m,
        })
    }
}

impl RawFitting {
    pub fn parse(&self, position: usize) -> HydraulicsResult<FittingSpec> {
        let fitting = self.fitting.parse::<FittingType>().map_err(|_| {
            HydraulicsError::invalid(format!("부속 {position}행의 종류가 올바르지 않습니다."))
        })?;
        let count = parse_count(position, &self.count)?;
        let segment = match self.segment.trim() {
            "" => 0,
            s => s.parse::<usize>().map_err(|_| {
                HydraulicsError::invalid(format!("부속 {position}행의 연결 구간이 올바르지 않습니다."))
            })?,
        };
        Ok(FittingSpec {
            fitting,
            count,
            segment,
        })
    }
}

/// 사용자의 정답 입력을 해석한다. 빈 칸은 `None`, "0" 은 `Some(0.0)`.
pub fn parse_answer(raw: &str) -> HydraulicsResult<Option<f64>> {
    parse_optional_number("총 손실수두 정답", raw)
}

fn parse_number(field: &str, raw: &str) -> HydraulicsResult<f64> {
    Ok(parse_optional_number(field, raw)?.unwrap_or(0.0))
}

fn parse_optional_number(field: &str, raw: &str) -> HydraulicsResult<Option<f64>> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(None);
    }
    s.parse::<f64>()
        .map(Some)
        .map_err(|_| HydraulicsError::invalid(format!("{field}: 숫자가 아닙니다. ({s})")))
}

// 음수 개수는 0으로 보고 건너뛴다.
fn parse_count(position: usize, raw: &str) -> HydraulicsResult<u32> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(0);
    }
    let n = s.parse::<i64>().map_err(|_| {
        HydraulicsError::invalid(format!("부속 {position}행의 개수는 정수여야 합니다. ({s})"))
    })?;
    u32::try_from(n.max(0)).map_err(|_| {
        HydraulicsError::invalid(format!("부속 {position}행의 개수가 너무 큽니다. ({s})"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piping::Schedule;

    fn raw_exercise() -> RawExercise {
        RawExercise {
            density: "1000".into(),
            viscosity: "1e-6".into(),
            flow_rate: " 0.01 ".into(),
            segments: vec![
                RawSegment {
                    length: "10".into(),
                    ..RawSegment::default()
                },
                RawSegment {
                    material: "pvc".into(),
                    mode: "direct".into(),
                    nominal_size: "".into(),
                    diameter: "0.05".into(),
                    length: "4.5".into(),
                },
            ],
            fittings: vec![RawFitting {
                fitting: "tee_branch".into(),
                count: "-2".into(),
                segment: "1".into(),
            }],
        }
    }

    #[test]
    fn parses_full_form() {
        let cfg = raw_exercise().parse().unwrap();
        assert_eq!(cfg.flow_rate_m3_per_s, 0.01);
        assert_eq!(
            cfg.segments[0].diameter_mode,
            DiameterMode::Schedule(Schedule::Schedule40)
        );
        assert_eq!(cfg.segments[0].nominal_size.as_deref(), Some("2"));
        assert_eq!(cfg.segments[1].declared_diameter_m, Some(0.05));
        assert_eq!(cfg.segments[1].nominal_size, None);
        // 음수 개수는 0 으로 처리
        assert_eq!(cfg.fittings[0].count, 0);
        assert_eq!(cfg.fittings[0].segment, 1);
    }

    #[test]
    fn blank_numbers_become_zero() {
        let mut raw = raw_exercise();
        raw.density = "  ".into();
        let cfg = raw.parse().unwrap();
        assert_eq!(cfg.density_kg_per_m3, 0.0);
    }

    #[test]
    fn garbage_is_reported_with_field() {
        let mut raw = raw_exercise();
        raw.segments[1].length = "abc".into();
        let err = raw.parse().unwrap_err();
        assert!(matches!(&err, HydraulicsError::InvalidInput(m) if m.contains("구간 2")), "{err}");

        let mut raw = raw_exercise();
        raw.segments[0].material = "wood".into();
        assert!(raw.parse().is_err());

        let mut raw = raw_exercise();
        raw.fittings[0].count = "1.5".into();
        assert!(raw.parse().is_err());
    }

    #[test]
    fn answer_distinguishes_blank_from_zero() {
        assert_eq!(parse_answer("").unwrap(), None);
        assert_eq!(parse_answer("   ").unwrap(), None);
        assert_eq!(parse_answer("0").unwrap(), Some(0.0));
        assert_eq!(parse_answer(" 2.15 ").unwrap(), Some(2.15));
        assert!(parse_answer("two").is_err());
    }

    #[test]
    fn removing_segment_relinks_dangling_fittings() {
        let mut raw = raw_exercise();
        raw.fittings.push(RawFitting::default());
        let removed = raw.remove_segment(0).unwrap();
        assert_eq!(removed.length, "10");
        assert_eq!(raw.segments.len(), 1);
        assert_eq!(raw.fittings[0].segment, "0");
        assert_eq!(raw.fittings[1].segment, "0");
        assert!(raw.remove_segment(3).is_none());
    }

    #[test]
    fn split_divides_total_length() {
        let mut raw = raw_exercise();
        raw.split_into_segments(3, Some(10.0), &RawSegment::default())
            .unwrap();
        assert_eq!(raw.segments.len(), 3);
        assert!(raw.segments.iter().all(|s| s.length == "3.33"));
        assert!((raw.total_length_hint() - 9.99).abs() < 1e-9);
        assert!(raw.split_into_segments(0, None, &RawSegment::default()).is_err());
    }
}
