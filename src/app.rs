use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::{Config, ConfigError};
use crate::error::HydraulicsError;
use crate::i18n::{self, Translator};
use crate::network::{compute_system_losses, ExerciseConfig, RawExercise};
use crate::session::{AttemptReport, GradingSession, SessionError};
use crate::stats::{AttemptStats, KeyValueStore, StatsError};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 표준 입력이 닫힘
    #[error("입력이 종료되었습니다.")]
    InputClosed,
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Hydraulics(#[from] HydraulicsError),
    #[error("통계 오류: {0}")]
    Stats(#[from] StatsError),
    #[error("연습문제 파일 {} 을(를) 읽거나 쓸 수 없습니다: {source}", path.display())]
    ExerciseFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("연습문제 파일 파싱 오류: {0}")]
    ExerciseParse(#[from] toml::de::Error),
    #[error("연습문제 파일 직렬화 오류: {0}")]
    ExerciseSerialize(#[from] toml::ser::Error),
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        match value {
            SessionError::Hydraulics(e) => AppError::Hydraulics(e),
            SessionError::Stats(e) => AppError::Stats(e),
        }
    }
}

impl AppError {
    /// 대화형 세션에서 메시지만 보여주고 계속 진행할 수 있는 오류인지.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            AppError::Io(_) | AppError::InputClosed | AppError::Config(_)
        )
    }
}

/// TOML 연습문제 파일을 읽는다.
pub fn load_exercise_file(path: &Path) -> Result<ExerciseConfig, AppError> {
    let content = fs::read_to_string(path).map_err(|source| AppError::ExerciseFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// 연습문제 구성을 TOML 파일로 저장한다.
pub fn save_exercise_file(path: &Path, exercise: &ExerciseConfig) -> Result<(), AppError> {
    let content = toml::to_string_pretty(exercise)?;
    fs::write(path, content).map_err(|source| AppError::ExerciseFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// CLI 인자와 설정에서 번역기를 만든다.
pub fn translator_for(cli_lang: &str, config: &Config) -> Translator {
    let code = i18n::resolve_language(cli_lang, Some(&config.language));
    Translator::new_with_pack(&code, config.language_pack_dir.as_deref())
}

/// 설정의 기본 유체 물성을 채운 빈 입력 화면.
pub fn initial_exercise(config: &Config) -> RawExercise {
    RawExercise {
        density: config.default_fluid.density_kg_per_m3.to_string(),
        viscosity: config.default_fluid.kinematic_viscosity_m2_per_s.to_string(),
        ..RawExercise::default()
    }
}

/// 파일의 연습문제를 채점하고 결과를 출력한다.
pub fn grade_file<S: KeyValueStore>(
    tr: &Translator,
    session: &mut GradingSession<S>,
    path: &Path,
    answer: Option<f64>,
) -> Result<AttemptReport, AppError> {
    let exercise = load_exercise_file(path)?;
    debug!(path = %path.display(), ?answer, "grading exercise file");
    let report = session.submit(&exercise, answer)?;
    ui_cli::print_report(tr, &report);
    Ok(report)
}

/// 파일의 연습문제 손실 내역만 출력한다. 채점과 기록은 하지 않는다.
pub fn losses_for_file(tr: &Translator, path: &Path) -> Result<(), AppError> {
    let exercise = load_exercise_file(path)?;
    let losses = compute_system_losses(&exercise)?;
    ui_cli::print_losses(tr, &losses);
    Ok(())
}

pub fn stats_for_file<S: KeyValueStore>(
    tr: &Translator,
    session: &GradingSession<S>,
    path: &Path,
) -> Result<AttemptStats, AppError> {
    let exercise = load_exercise_file(path)?;
    let stats = session.summary(&exercise)?;
    ui_cli::print_stats(tr, &stats);
    Ok(stats)
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 계산/입력 오류는 메시지만 출력하고 메뉴로 돌아간다.
pub fn run<S: KeyValueStore>(
    config: &mut Config,
    config_path: &Path,
    cli_lang: &str,
    session: &mut GradingSession<S>,
) -> Result<(), AppError> {
    let mut tr = translator_for(cli_lang, config);
    let mut exercise = initial_exercise(config);
    loop {
        let choice = ui_cli::main_menu(&tr)?;
        let result = match choice {
            MenuChoice::Fluid => ui_cli::handle_fluid(&tr, &mut exercise),
            MenuChoice::AddSegment => ui_cli::handle_add_segment(&tr, &mut exercise),
            MenuChoice::ConfigureSegments => {
                ui_cli::handle_configure_segments(&tr, &mut exercise)
            }
            MenuChoice::RemoveSegment => ui_cli::handle_remove_segment(&tr, &mut exercise),
            MenuChoice::AddFitting => ui_cli::handle_add_fitting(&tr, &mut exercise),
            MenuChoice::RemoveFitting => ui_cli::handle_remove_fitting(&tr, &mut exercise),
            MenuChoice::Show => ui_cli::handle_show(&tr, &exercise, session),
            MenuChoice::Grade => ui_cli::handle_grade(&tr, &exercise, session),
            MenuChoice::Tables => {
                ui_cli::print_tables(&tr);
                Ok(())
            }
            MenuChoice::Save => ui_cli::handle_save(&tr, &exercise),
            MenuChoice::Settings => {
                let changed = ui_cli::handle_settings(&tr, config);
                if matches!(changed, Ok(true)) {
                    config.save(config_path)?;
                    // 메뉴에서 고른 언어가 CLI 인자보다 우선한다.
                    tr = translator_for("auto", config);
                }
                changed.map(|_| ())
            }
            MenuChoice::Exit => {
                config.save(config_path)?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        match result {
            Ok(()) => {}
            Err(err) if err.is_recoverable() => {
                println!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}
