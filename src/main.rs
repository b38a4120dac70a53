use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;

use hidraseries::app::{self, AppError};
use hidraseries::config::{self, Config};
use hidraseries::i18n::{self, keys, Translator};
use hidraseries::session::GradingSession;
use hidraseries::stats::JsonFileStore;
use hidraseries::ui_cli;

#[derive(Parser)]
#[command(name = "hidraseries", version)]
#[command(about = "직렬 배관망 손실수두 채점기 / series pipe head-loss grader", long_about = None)]
struct Cli {
    /// 화면 언어 (auto, ko, en)
    #[arg(long, global = true, default_value = "auto")]
    lang: String,
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// 시도 통계 파일 경로 (설정의 stats_path 대신 사용)
    #[arg(long, global = true)]
    stats: Option<PathBuf>,
    /// 디버그 로그를 stderr 로 출력
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 대화형 메뉴 (기본값)
    Interactive,
    /// 연습문제 파일을 채점하고 시도를 기록
    Grade {
        /// 연습문제 TOML 파일
        exercise: PathBuf,
        /// 총 손실수두 답 [m]
        #[arg(long, allow_negative_numbers = true)]
        answer: Option<f64>,
    },
    /// 구간별 손실 내역만 출력 (채점/기록 없음)
    Losses {
        /// 연습문제 TOML 파일
        exercise: PathBuf,
    },
    /// 연습문제 구성의 누적 시도 통계
    Stats {
        /// 연습문제 TOML 파일
        exercise: PathBuf,
    },
    /// 재질, schedule, 부속 참조 테이블
    Tables,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 선택된 명령을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match try_run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let tr = Translator::new(&i18n::resolve_language(&cli.lang, None));
            eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn try_run(cli: &Cli) -> Result<(), AppError> {
    let mut cfg = config::load_or_default(&cli.config)?;
    let tr = app::translator_for(&cli.lang, &cfg);
    let mut session = GradingSession::new(stats_store(cli, &cfg));
    match &cli.command {
        None | Some(Commands::Interactive) => {
            app::run(&mut cfg, &cli.config, &cli.lang, &mut session)?;
        }
        Some(Commands::Grade { exercise, answer }) => {
            app::grade_file(&tr, &mut session, exercise, *answer)?;
        }
        Some(Commands::Losses { exercise }) => app::losses_for_file(&tr, exercise)?,
        Some(Commands::Stats { exercise }) => {
            app::stats_for_file(&tr, &session, exercise)?;
        }
        Some(Commands::Tables) => ui_cli::print_tables(&tr),
    }
    Ok(())
}

fn stats_store(cli: &Cli, cfg: &Config) -> JsonFileStore {
    let path = cli
        .stats
        .as_deref()
        .unwrap_or_else(|| Path::new(&cfg.stats_path));
    JsonFileStore::new(path)
}
