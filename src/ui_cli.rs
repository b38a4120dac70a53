use std::io::{self, Write};
use std::path::Path;

use crate::app::{self, AppError};
use crate::config::Config;
use crate::grading::Tier;
use crate::i18n::{keys, Translator};
use crate::network::{parse_answer, LossResult, RawExercise, RawFitting, RawSegment};
use crate::piping::{flow_regime, nominal_sizes, FittingType, FlowRegime, Material, Schedule};
use crate::session::{AttemptReport, GradingSession};
use crate::stats::{AttemptStats, KeyValueStore};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Fluid,
    AddSegment,
    ConfigureSegments,
    RemoveSegment,
    AddFitting,
    RemoveFitting,
    Show,
    Grade,
    Tables,
    Save,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_FLUID,
        keys::MAIN_MENU_ADD_SEGMENT,
        keys::MAIN_MENU_CONFIGURE_SEGMENTS,
        keys::MAIN_MENU_REMOVE_SEGMENT,
        keys::MAIN_MENU_ADD_FITTING,
        keys::MAIN_MENU_REMOVE_FITTING,
        keys::MAIN_MENU_SHOW,
        keys::MAIN_MENU_GRADE,
        keys::MAIN_MENU_TABLES,
        keys::MAIN_MENU_SAVE,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Fluid),
            "2" => return Ok(MenuChoice::AddSegment),
            "3" => return Ok(MenuChoice::ConfigureSegments),
            "4" => return Ok(MenuChoice::RemoveSegment),
            "5" => return Ok(MenuChoice::AddFitting),
            "6" => return Ok(MenuChoice::RemoveFitting),
            "7" => return Ok(MenuChoice::Show),
            "8" => return Ok(MenuChoice::Grade),
            "9" => return Ok(MenuChoice::Tables),
            "10" => return Ok(MenuChoice::Save),
            "11" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 유체 물성과 유량을 입력받는다. 빈 입력은 현재 값을 유지한다.
pub fn handle_fluid(tr: &Translator, raw: &mut RawExercise) -> Result<(), AppError> {
    println!("{}", tr.t(keys::FLUID_HEADING));
    println!("{}", tr.t(keys::HINT_KEEP_CURRENT));
    raw.density = read_field(tr.t(keys::PROMPT_DENSITY), &raw.density)?;
    raw.viscosity = read_field(tr.t(keys::PROMPT_VISCOSITY), &raw.viscosity)?;
    raw.flow_rate = read_field(tr.t(keys::PROMPT_FLOW_RATE), &raw.flow_rate)?;
    Ok(())
}

pub fn handle_add_segment(tr: &Translator, raw: &mut RawExercise) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SEGMENT_HEADING));
    let segment = read_segment(tr, &RawSegment::default())?;
    raw.segments.push(segment);
    println!("{}", tr.t(keys::SEGMENT_ADDED));
    Ok(())
}

/// 구간 수와 총 길이를 받아 같은 구성의 구간들로 다시 만든다.
pub fn handle_configure_segments(tr: &Translator, raw: &mut RawExercise) -> Result<(), AppError> {
    println!("{}", tr.t(keys::CONFIGURE_HEADING));
    let count = read_count(tr.t(keys::PROMPT_SEGMENT_COUNT), tr)?;
    let total = read_line(&format!("{}: ", tr.t(keys::PROMPT_TOTAL_LENGTH)))?;
    let total_length = match total.trim() {
        "" => None,
        s => match s.parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => Some(v),
            _ => {
                println!("{}", tr.t(keys::WARN_TOTAL_LENGTH_IGNORED));
                None
            }
        },
    };
    let mut template = raw.segments.first().cloned().unwrap_or_default();
    if total_length.is_none() {
        template.length.clear();
    }
    let template = read_segment_shape(tr, &template)?;
    raw.split_into_segments(count, total_length, &template)?;
    print_segments(tr, raw);
    Ok(())
}

pub fn handle_remove_segment(tr: &Translator, raw: &mut RawExercise) -> Result<(), AppError> {
    println!("{}", tr.t(keys::REMOVE_HEADING));
    if raw.segments.is_empty() {
        println!("{}", tr.t(keys::NOTHING_TO_REMOVE));
        return Ok(());
    }
    print_segments(tr, raw);
    let n = read_index(tr.t(keys::PROMPT_REMOVE_NUMBER), raw.segments.len(), tr)?;
    raw.remove_segment(n);
    println!("{}", tr.t(keys::REMOVED));
    Ok(())
}

pub fn handle_add_fitting(tr: &Translator, raw: &mut RawExercise) -> Result<(), AppError> {
    println!("{}", tr.t(keys::FITTING_HEADING));
    if raw.segments.is_empty() {
        println!("{}", tr.t(keys::FITTING_NEEDS_SEGMENT));
        return Ok(());
    }
    for (i, fitting) in FittingType::ALL.iter().enumerate() {
        println!("{}) {} (K = {})", i + 1, fitting.label(), fitting.k());
    }
    let kind = read_index(tr.t(keys::PROMPT_FITTING_TYPE), FittingType::ALL.len(), tr)?;
    let count = read_field(tr.t(keys::PROMPT_FITTING_COUNT), "1")?;
    let segment = read_index(tr.t(keys::PROMPT_FITTING_SEGMENT), raw.segments.len(), tr)?;
    raw.fittings.push(RawFitting {
        fitting: FittingType::ALL[kind].key().to_string(),
        count,
        segment: segment.to_string(),
    });
    println!("{}", tr.t(keys::FITTING_ADDED));
    Ok(())
}

pub fn handle_remove_fitting(tr: &Translator, raw: &mut RawExercise) -> Result<(), AppError> {
    println!("{}", tr.t(keys::REMOVE_HEADING));
    if raw.fittings.is_empty() {
        println!("{}", tr.t(keys::NOTHING_TO_REMOVE));
        return Ok(());
    }
    print_fittings(tr, raw);
    let n = read_index(tr.t(keys::PROMPT_REMOVE_NUMBER), raw.fittings.len(), tr)?;
    raw.fittings.remove(n);
    println!("{}", tr.t(keys::REMOVED));
    Ok(())
}

/// 현재 입력 상태와, 구성이 유효하면 그 구성의 누적 통계를 보여준다.
pub fn handle_show<S: KeyValueStore>(
    tr: &Translator,
    raw: &RawExercise,
    session: &GradingSession<S>,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SHOW_HEADING));
    println!(
        "{} {} / {} / {}",
        tr.t(keys::SHOW_FLUID),
        or_empty(tr, &raw.density),
        or_empty(tr, &raw.viscosity),
        or_empty(tr, &raw.flow_rate)
    );
    print_segments(tr, raw);
    print_fittings(tr, raw);
    println!("{} {:.2} m", tr.t(keys::SHOW_LENGTH_HINT), raw.total_length_hint());
    let config = raw.parse()?;
    let stats = session.summary(&config)?;
    print_stats(tr, &stats);
    Ok(())
}

/// 답을 입력받아 채점하고 기록한다.
pub fn handle_grade<S: KeyValueStore>(
    tr: &Translator,
    raw: &RawExercise,
    session: &mut GradingSession<S>,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::GRADE_HEADING));
    let config = raw.parse()?;
    let answer = read_line(&format!("{}: ", tr.t(keys::PROMPT_ANSWER)))?;
    let answer = parse_answer(&answer)?;
    let report = session.submit(&config, answer)?;
    print_report(tr, &report);
    Ok(())
}

pub fn handle_save(tr: &Translator, raw: &RawExercise) -> Result<(), AppError> {
    let config = raw.parse()?;
    let path = read_field(tr.t(keys::PROMPT_SAVE_PATH), "exercise.toml")?;
    app::save_exercise_file(Path::new(&path), &config)?;
    println!("{} {path}", tr.t(keys::SAVED_TO));
    Ok(())
}

/// 설정 메뉴를 처리한다. 언어가 바뀌었으면 `true`.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let language = match sel.trim() {
        "" => return Ok(false),
        "1" => "auto",
        "2" => "ko",
        "3" => "en",
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(false);
        }
    };
    cfg.language = language.to_string();
    println!("{} {}", tr.t(keys::SETTINGS_SAVED), cfg.language);
    Ok(true)
}

/// 채점 결과(등급 설명, 구간별 내역, 누적 통계)를 출력한다.
pub fn print_report(tr: &Translator, report: &AttemptReport) {
    println!("{}", report.outcome.rationale(tr, &report.losses));
    print_segment_breakdown(tr, &report.losses);
    print_stats(tr, &report.stats);
}

/// 손실 내역과 합계를 출력한다.
pub fn print_losses(tr: &Translator, losses: &LossResult) {
    print_segment_breakdown(tr, losses);
    for minor in &losses.minor_losses {
        println!(
            "  {} {}: {} × {} ({} {}) h_m = {:.4} m",
            tr.t(keys::FITTING_LABEL),
            minor.fitting_index + 1,
            minor.fitting.label(),
            minor.count,
            tr.t(keys::SEGMENT_LABEL),
            minor.segment + 1,
            minor.loss_m
        );
    }
    println!("{} {:.4} m", tr.t(keys::RESULT_MAJOR_LOSS), losses.major_loss_total_m);
    println!("{} {:.4} m", tr.t(keys::RESULT_MINOR_LOSS), losses.minor_loss_total_m);
    println!("{} {:.4} m", tr.t(keys::RESULT_TOTAL_LOSS), losses.total_loss_m);
}

pub fn print_stats(tr: &Translator, stats: &AttemptStats) {
    println!("{}", tr.t(keys::STATS_HEADING));
    let Some(dominant) = stats.dominant_tier() else {
        println!("{}", tr.t(keys::STATS_NONE));
        return;
    };
    println!("{} {}", tr.t(keys::STATS_ATTEMPTS), stats.attempts);
    let counts: Vec<String> = Tier::ALL
        .iter()
        .map(|tier| format!("{} {}", tr.t(tier.label_key()), stats.count(*tier)))
        .collect();
    println!("{}", counts.join(" · "));
    println!("{} {}", tr.t(keys::STATS_DOMINANT), tr.t(dominant.label_key()));
}

/// 재질, schedule, 부속 참조 테이블을 출력한다.
pub fn print_tables(tr: &Translator) {
    println!("{}", tr.t(keys::TABLES_HEADING));
    println!("{}", tr.t(keys::TABLES_MATERIALS));
    for material in Material::ALL {
        println!(
            "  {:<10} {:<24} ε = {:e}",
            material.key(),
            material.name(),
            material.roughness_m()
        );
    }
    println!("{}", tr.t(keys::TABLES_SCHEDULES));
    for schedule in Schedule::ALL {
        let row: Vec<String> = nominal_sizes(schedule)
            .iter()
            .map(|e| format!("{}={:.5}", e.label, e.inner_diameter_m))
            .collect();
        println!("  {:<11} {}", schedule.key(), row.join("  "));
    }
    println!("{}", tr.t(keys::TABLES_FITTINGS));
    for fitting in FittingType::ALL {
        println!("  {:<18} {:<22} K = {}", fitting.key(), fitting.label(), fitting.k());
    }
}

fn print_segment_breakdown(tr: &Translator, losses: &LossResult) {
    println!("{}", tr.t(keys::RESULT_SEGMENTS));
    for seg in &losses.segments {
        let regime = match flow_regime(seg.reynolds) {
            FlowRegime::Laminar => tr.t(keys::REGIME_LAMINAR),
            FlowRegime::Turbulent => tr.t(keys::REGIME_TURBULENT),
        };
        println!(
            "  {} {}: D = {:.5} m, A = {:.6} m2, V = {:.3} m/s, Re = {:.0} ({regime}), f = {:.5}, h_f = {:.4} m",
            tr.t(keys::SEGMENT_LABEL),
            seg.index + 1,
            seg.inner_diameter_m,
            seg.area_m2,
            seg.velocity_m_per_s,
            seg.reynolds,
            seg.friction_factor,
            seg.major_loss_m
        );
    }
}

fn print_segments(tr: &Translator, raw: &RawExercise) {
    println!("{}", tr.t(keys::SHOW_SEGMENTS));
    if raw.segments.is_empty() {
        println!("  {}", tr.t(keys::EMPTY));
    }
    for (i, s) in raw.segments.iter().enumerate() {
        let size = if s.mode.trim() == "direct" {
            format!("D {} m", or_empty(tr, &s.diameter))
        } else {
            format!("NPS {}", or_empty(tr, &s.nominal_size))
        };
        println!(
            "  {}) {} / {} / {} / L {} m",
            i + 1,
            s.material,
            s.mode,
            size,
            or_empty(tr, &s.length)
        );
    }
}

fn print_fittings(tr: &Translator, raw: &RawExercise) {
    println!("{}", tr.t(keys::SHOW_FITTINGS));
    if raw.fittings.is_empty() {
        println!("  {}", tr.t(keys::EMPTY));
    }
    for (i, f) in raw.fittings.iter().enumerate() {
        // 구간 번호는 화면에서 1부터 센다.
        let segment = f
            .segment
            .trim()
            .parse::<usize>()
            .map(|s| (s + 1).to_string())
            .unwrap_or_else(|_| f.segment.clone());
        println!(
            "  {}) {} × {} → {} {}",
            i + 1,
            f.fitting,
            or_empty(tr, &f.count),
            tr.t(keys::SEGMENT_LABEL),
            segment
        );
    }
}

fn or_empty<'a>(tr: &'a Translator, value: &'a str) -> &'a str {
    if value.trim().is_empty() {
        tr.t(keys::EMPTY)
    } else {
        value
    }
}

fn read_segment(tr: &Translator, template: &RawSegment) -> Result<RawSegment, AppError> {
    let mut segment = read_segment_shape(tr, template)?;
    segment.length = read_field(tr.t(keys::PROMPT_LENGTH), &template.length)?;
    Ok(segment)
}

/// 재질과 내경(직접 입력 또는 schedule/NPS)을 입력받는다. 길이는 건드리지 않는다.
fn read_segment_shape(tr: &Translator, template: &RawSegment) -> Result<RawSegment, AppError> {
    let mut segment = template.clone();
    for (i, material) in Material::ALL.iter().enumerate() {
        println!("{}) {}", i + 1, material.name());
    }
    let m = read_index(tr.t(keys::PROMPT_MATERIAL), Material::ALL.len(), tr)?;
    segment.material = Material::ALL[m].key().to_string();

    let mode = loop {
        let sel = read_line(&format!("{}: ", tr.t(keys::PROMPT_DIAMETER_MODE)))?;
        match sel.trim() {
            "0" => break None,
            "1" => break Some(Schedule::Schedule40),
            "2" => break Some(Schedule::Schedule60),
            "3" => break Some(Schedule::Schedule80),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    };
    match mode {
        None => {
            segment.mode = "direct".to_string();
            segment.nominal_size.clear();
            segment.diameter = read_field(tr.t(keys::PROMPT_DIAMETER), &template.diameter)?;
        }
        Some(schedule) => {
            segment.mode = schedule.key().to_string();
            let sizes: Vec<&str> = nominal_sizes(schedule)
                .iter()
                .map(|e| e.nominal_size)
                .collect();
            println!("NPS: {}", sizes.join(", "));
            segment.nominal_size = read_field(tr.t(keys::PROMPT_NPS), &template.nominal_size)?;
            segment.diameter.clear();
        }
    }
    Ok(segment)
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(AppError::InputClosed);
    }
    Ok(buf)
}

/// `label [current]: ` 형식으로 묻고, 빈 입력이면 현재 값을 돌려준다.
fn read_field(label: &str, current: &str) -> Result<String, AppError> {
    let s = read_line(&format!("{label} [{current}]: "))?;
    let s = s.trim();
    Ok(if s.is_empty() {
        current.to_string()
    } else {
        s.to_string()
    })
}

/// 1부터 `len` 까지의 번호를 받아 0부터 시작하는 인덱스로 돌려준다.
fn read_index(label: &str, len: usize, tr: &Translator) -> Result<usize, AppError> {
    loop {
        let s = read_line(&format!("{label} (1-{len}): "))?;
        match s.trim().parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => return Ok(n - 1),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn read_count(label: &str, tr: &Translator) -> Result<usize, AppError> {
    loop {
        let s = read_line(&format!("{label}: "))?;
        match s.trim().parse::<usize>() {
            Ok(n) if n >= 1 => return Ok(n),
            _ => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
