/// 신품 배관의 절대 거칠기 ε 테이블.
/// 값은 일반적인 거칠기 표에서 가져온 참고치이며 단위는 m 이다.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HydraulicsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    /// 상용강(탄소강)
    Steel,
    Stainless,
    Pvc,
    Cpvc,
    /// 폴리에틸렌
    Pe,
    Copper,
    /// 주철(신품, 라이닝)
    CastIron,
    Aluminum,
}

#[derive(Debug)]
struct MaterialData {
    material: Material,
    key: &'static str,
    name: &'static str,
    roughness_m: f64,
}

const MATERIALS: &[MaterialData] = &[
    md(Material::Steel, "steel", "Commercial steel (carbon steel)", 0.000045),
    md(Material::Stainless, "stainless", "Stainless steel", 0.000015),
    md(Material::Pvc, "pvc", "Smooth PVC", 0.0000015),
    md(Material::Cpvc, "cpvc", "CPVC", 0.0000015),
    md(Material::Pe, "pe", "Polyethylene (PE)", 0.000007),
    md(Material::Copper, "copper", "Copper", 0.0000015),
    md(Material::CastIron, "castiron", "Cast iron (new, lined)", 0.00012),
    md(Material::Aluminum, "aluminum", "Aluminum", 0.0000015),
];

const fn md(
    material: Material,
    key: &'static str,
    name: &'static str,
    roughness_m: f64,
) -> MaterialData {
    MaterialData {
        material,
        key,
        name,
        roughness_m,
    }
}

impl Material {
    pub const ALL: [Material; 8] = [
        Material::Steel,
        Material::Stainless,
        Material::Pvc,
        Material::Cpvc,
        Material::Pe,
        Material::Copper,
        Material::CastIron,
        Material::Aluminum,
    ];

    fn data(self) -> &'static MaterialData {
        // MATERIALS 는 ALL 과 같은 순서로 정의되어 있다.
        &MATERIALS[self as usize]
    }

    /// 설정/연습문제 파일에서 쓰는 식별자.
    pub fn key(self) -> &'static str {
        self.data().key
    }

    pub fn name(self) -> &'static str {
        self.data().name
    }

    /// 절대 거칠기 ε [m]
    pub fn roughness_m(self) -> f64 {
        self.data().roughness_m
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Material {
    type Err = HydraulicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        MATERIALS
            .iter()
            .find(|m| m.key.eq_ignore_ascii_case(s) || m.name.eq_ignore_ascii_case(s))
            .map(|m| m.material)
            .ok_or_else(|| HydraulicsError::invalid(format!("알 수 없는 재질: {s}")))
    }
}
