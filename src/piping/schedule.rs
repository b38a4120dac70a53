/// 강관 schedule 40/60/80 의 NPS 별 내경 테이블과 구간 내경 결정 로직.
/// 테이블에 없는 NPS/schedule 조합은 정상적인 상태이며 `MissingScheduleEntry` 로 보고한다.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{HydraulicsError, HydraulicsResult};
use crate::network::SegmentSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schedule {
    Schedule40,
    Schedule60,
    Schedule80,
}

impl Schedule {
    pub const ALL: [Schedule; 3] = [
        Schedule::Schedule40,
        Schedule::Schedule60,
        Schedule::Schedule80,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Schedule::Schedule40 => "schedule40",
            Schedule::Schedule60 => "schedule60",
            Schedule::Schedule80 => "schedule80",
        }
    }

    fn table(self) -> &'static [ScheduleEntry] {
        match self {
            Schedule::Schedule40 => SCHEDULE_40,
            Schedule::Schedule60 => SCHEDULE_60,
            Schedule::Schedule80 => SCHEDULE_80,
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Schedule {
    type Err = HydraulicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "schedule40" | "sch40" | "40" => Ok(Schedule::Schedule40),
            "schedule60" | "sch60" | "60" => Ok(Schedule::Schedule60),
            "schedule80" | "sch80" | "80" => Ok(Schedule::Schedule80),
            _ => Err(HydraulicsError::invalid(format!("알 수 없는 schedule: {s}"))),
        }
    }
}

/// 구간 내경을 정하는 방식. 직접 입력하거나 schedule 테이블에서 찾는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DiameterMode {
    Direct,
    Schedule(Schedule),
}

impl fmt::Display for DiameterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiameterMode::Direct => f.write_str("direct"),
            DiameterMode::Schedule(s) => f.write_str(s.key()),
        }
    }
}

impl FromStr for DiameterMode {
    type Err = HydraulicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("direct") {
            return Ok(DiameterMode::Direct);
        }
        s.parse::<Schedule>().map(DiameterMode::Schedule).map_err(|_| {
            HydraulicsError::invalid(format!("알 수 없는 내경 입력 방식: {}", s.trim()))
        })
    }
}

impl TryFrom<String> for DiameterMode {
    type Error = HydraulicsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DiameterMode> for String {
    fn from(value: DiameterMode) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduleEntry {
    /// NPS 식별자 (예: "0.75", "2")
    pub nominal_size: &'static str,
    /// 표시용 인치 표기 (예: 3/4")
    pub label: &'static str,
    pub inner_diameter_m: f64,
}

const fn se(
    nominal_size: &'static str,
    label: &'static str,
    inner_diameter_m: f64,
) -> ScheduleEntry {
    ScheduleEntry {
        nominal_size,
        label,
        inner_diameter_m,
    }
}

const SCHEDULE_40: &[ScheduleEntry] = &[
    se("0.125", "1/8\"", 0.0068326),
    se("0.25", "1/4\"", 0.0092456),
    se("0.375", "3/8\"", 0.0125222),
    se("0.5", "1/2\"", 0.0157988),
    se("0.75", "3/4\"", 0.0209296),
    se("1", "1\"", 0.0266446),
    se("1.25", "1 1/4\"", 0.0350520),
    se("1.5", "1 1/2\"", 0.0408940),
    se("2", "2\"", 0.0525018),
    se("2.5", "2 1/2\"", 0.0627126),
    se("3", "3\"", 0.0779272),
    se("4", "4\"", 0.1022604),
    se("5", "5\"", 0.1281938),
    se("6", "6\"", 0.1540510),
    se("8", "8\"", 0.2027174),
    se("10", "10\"", 0.2545080),
    se("12", "12\"", 0.3048000),
];

// schedule 60 은 8" 이상만 보유
const SCHEDULE_60: &[ScheduleEntry] = &[
    se("8", "8\"", 0.1984502),
    se("10", "10\"", 0.2476500),
    se("12", "12\"", 0.2953004),
];

const SCHEDULE_80: &[ScheduleEntry] = &[
    se("0.125", "1/8\"", 0.0054610),
    se("0.25", "1/4\"", 0.0076708),
    se("0.375", "3/8\"", 0.0107442),
    se("0.5", "1/2\"", 0.0138684),
    se("0.75", "3/4\"", 0.0188468),
    se("1", "1\"", 0.0243078),
    se("1.25", "1 1/4\"", 0.0324612),
    se("1.5", "1 1/2\"", 0.0381000),
    se("2", "2\"", 0.0492506),
    se("2.5", "2 1/2\"", 0.0590042),
    se("3", "3\"", 0.0736600),
    se("4", "4\"", 0.0971804),
    se("5", "5\"", 0.1222502),
    se("6", "6\"", 0.1463294),
    se("8", "8\"", 0.1936750),
    se("10", "10\"", 0.2476500),
    se("12", "12\"", 0.2984500),
];

/// schedule 이 보유한 NPS 목록을 테이블 순서대로 반환한다.
pub fn nominal_sizes(schedule: Schedule) -> &'static [ScheduleEntry] {
    schedule.table()
}

pub fn schedule_inner_diameter(schedule: Schedule, nominal_size: &str) -> Option<f64> {
    let nps = nominal_size.trim();
    schedule
        .table()
        .iter()
        .find(|e| e.nominal_size == nps)
        .map(|e| e.inner_diameter_m)
}

/// 구간의 내경 [m]을 결정한다.
///
/// - `Direct`: 입력한 내경(이미 m 단위)을 그대로 사용한다.
/// - `Schedule`: (schedule, NPS) 조합을 테이블에서 찾는다.
pub fn resolve_diameter(segment: &SegmentSpec) -> HydraulicsResult<f64> {
    match segment.diameter_mode {
        DiameterMode::Direct => match segment.declared_diameter_m {
            Some(d) if d.is_finite() && d > 0.0 => Ok(d),
            _ => Err(HydraulicsError::invalid("직접 입력한 내경은 0보다 커야 합니다.")),
        },
        DiameterMode::Schedule(schedule) => {
            let nps = segment
                .nominal_size
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| {
                    HydraulicsError::invalid(format!("{schedule} 모드에서는 NPS를 선택해야 합니다."))
                })?;
            let d = schedule_inner_diameter(schedule, nps).ok_or_else(|| {
                HydraulicsError::MissingScheduleEntry {
                    schedule,
                    nominal_size: nps.to_string(),
                }
            })?;
            if !(d.is_finite() && d > 0.0) {
                return Err(HydraulicsError::invalid(format!(
                    "NPS {nps}\" {schedule} 의 내경 값이 올바르지 않습니다."
                )));
            }
            Ok(d)
        }
    }
}
