//! # retime
//!
//! 스피드런 리타임 CLI 진입점.
//! 시작/종료 프레임과 로드 구간으로 경과 시간을 계산하고 세션 파일을 열고 저장한다.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use retime_app::input::{clean_framerate, debug_info_to_frame, parse_load_arg};
use retime_app::{LoadCheck, RetimeSession};
use retime_core::config::AppConfig;
use retime_core::config_manager::ConfigManager;
use retime_core::models::LoadInterval;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 프레임 기반 스피드런 리타임 도구
#[derive(Parser, Debug)]
#[command(name = "retime")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 프레임레이트 (기본: 설정값)
    #[arg(long, visible_alias = "fps", global = true)]
    framerate: Option<String>,

    /// 표시 정밀도 (소수점 이하 자릿수, 기본: 설정값)
    #[arg(long, global = true)]
    precision: Option<u32>,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 settings.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 구간을 계산해 출력
    Calc {
        /// 시작 프레임 (숫자 또는 디버그 정보)
        #[arg(long)]
        start: String,
        /// 종료 프레임 (숫자 또는 디버그 정보)
        #[arg(long)]
        end: String,
        /// 로드 구간 `START:END` (여러 번 지정 가능)
        #[arg(long = "load", value_parser = parse_load_arg)]
        loads: Vec<LoadInterval>,
        /// 평균보다 지나치게 긴 로드도 추가
        #[arg(long)]
        force: bool,
    },
    /// 세션 파일을 열어 출력
    Show {
        file: PathBuf,
    },
    /// 구간을 계산해 세션 파일로 저장
    Save {
        file: PathBuf,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long = "load", value_parser = parse_load_arg)]
        loads: Vec<LoadInterval>,
        #[arg(long)]
        force: bool,
    },
    /// 디버그 정보를 프레임으로 변환
    Frame {
        #[arg(long)]
        debug_info: String,
    },
    /// 설정 파일 출력 (또는 기본값 복원)
    Settings {
        #[arg(long)]
        reset: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 로깅 초기화 (stdout은 결과 출력 전용)
    let log_filter = format!(
        "retime={lvl},retime_app={lvl},retime_core={lvl},retime_storage={lvl}",
        lvl = args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_manager = match &args.config {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };

    let mut config = match &config_manager {
        Ok(manager) => {
            info!("설정 파일: {}", manager.config_path().display());
            manager.get()
        }
        Err(e) => {
            warn!("설정 로드 실패, 기본 설정 사용: {e}");
            AppConfig::default_config()
        }
    };
    if let Some(precision) = args.precision {
        config.retime.precision = precision;
    }
    if let Some(framerate) = &args.framerate {
        config.retime.default_framerate = clean_framerate(framerate);
    }

    let mut session = RetimeSession::new(config);

    match args.command {
        Command::Calc {
            start,
            end,
            loads,
            force,
        } => {
            fill_session(&mut session, &start, &end, &loads, force)?;
            print_report(&session);
        }
        Command::Show { file } => {
            session.open(&file)?;
            print_report(&session);
        }
        Command::Save {
            file,
            start,
            end,
            loads,
            force,
        } => {
            fill_session(&mut session, &start, &end, &loads, force)?;
            session.save_as(&file)?;
            print_report(&session);
            println!("Saved: {}", file.display());
        }
        Command::Frame { debug_info } => {
            let frame = debug_info_to_frame(&debug_info, session.time().framerate())?;
            println!("{frame}");
        }
        Command::Settings { reset } => {
            let manager = config_manager.context("설정 파일을 열 수 없습니다")?;
            let config = if reset {
                manager.restore_defaults()?
            } else {
                manager.get()
            };
            println!("{}", manager.config_path().display());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// 명령줄 값으로 구간과 로드 입력
fn fill_session(
    session: &mut RetimeSession,
    start: &str,
    end: &str,
    loads: &[LoadInterval],
    force: bool,
) -> Result<()> {
    session.set_end(end)?;
    session.set_start(start)?;

    for (n, load) in loads.iter().enumerate() {
        match session.add_load(load.start_frame, load.end_frame, force)? {
            LoadCheck::Added => {}
            LoadCheck::SuspiciouslyLong { length, average } => bail!(
                "Load {} is concerningly long ({} frames, average {}). Pass --force to add it anyway.",
                n + 1,
                length,
                average
            ),
        }
    }
    Ok(())
}

fn print_report(session: &RetimeSession) {
    let time = session.time();
    let (with_loads, without_loads) = session.displays();

    println!("Without Loads: {} ({})", without_loads, time.src_format(true));
    println!("With Loads:    {} ({})", with_loads, time.src_format(false));
    println!(
        "Frames:        {}..{} @ {} FPS",
        time.start_frame(),
        time.end_frame(),
        time.framerate()
    );

    let loads = session.load_list();
    if !loads.is_empty() {
        println!("Loads:");
        for line in loads {
            println!("  {line}");
        }
    }

    println!();
    println!("{}", session.mod_note());
}
