//! 배관 참조 데이터(재질 거칠기, schedule 내경, 부속 K값)와 마찰 계산.

pub mod fittings;
pub mod friction;
pub mod materials;
pub mod schedule;

pub use fittings::FittingType;
pub use friction::{flow_regime, friction_factor, reynolds, FlowRegime, LAMINAR_LIMIT};
pub use materials::Material;
pub use schedule::{
    nominal_sizes, resolve_diameter, schedule_inner_diameter, DiameterMode, Schedule,
    ScheduleEntry,
};
