use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{ApiConfig, Clock, EffectRunner, HttpTutorApi, ServiceInfo, TutorApi};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tutor_core::model::Subject;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
    InvalidStudentLevel { raw: String },
    NotForCommand { flag: &'static str, command: Command },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
            ArgsError::InvalidStudentLevel { raw } => {
                write!(f, "invalid --student-level value: {raw:?}")
            }
            ArgsError::NotForCommand { flag, command } => {
                write!(f, "{flag} is not accepted by `{}`", command.name())
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    api: Arc<dyn TutorApi>,
    student_level: String,
}

impl UiApp for DesktopApp {
    fn runner(&self) -> EffectRunner {
        EffectRunner::new(Arc::clone(&self.api), self.student_level.clone())
    }

    fn clock(&self) -> Clock {
        Clock::System
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--api-url <url>] [--student-level <level>]");
    eprintln!("  cargo run -p app -- check [--api-url <url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {}", services::config::DEFAULT_API_URL);
    eprintln!("  --student-level {}", tutor_core::model::DEFAULT_STUDENT_LEVEL);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TUTOR_API_URL, TUTOR_STUDENT_LEVEL, TUTOR_TIMEOUT_SECS, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "check" => Some(Self::Check),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Ui => "ui",
            Self::Check => "check",
        }
    }
}

/// Applies command-line overrides on top of the environment configuration.
fn parse_config(
    args: &mut impl Iterator<Item = String>,
    cmd: Command,
    mut config: ApiConfig,
) -> Result<ApiConfig, ArgsError> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--api-url" => {
                let value = require_value(args, "--api-url")?;
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(ArgsError::InvalidApiUrl { raw: value });
                }
                config.base_url = value;
            }
            "--student-level" => {
                if cmd == Command::Check {
                    return Err(ArgsError::NotForCommand {
                        flag: "--student-level",
                        command: cmd,
                    });
                }
                let value = require_value(args, "--student-level")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidStudentLevel { raw: value });
                }
                config.student_level = value;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    Ok(config)
}

fn log_service_info(info: &ServiceInfo) {
    let unknown: Vec<&str> = info
        .subjects
        .iter()
        .map(String::as_str)
        .filter(|raw| raw.parse::<Subject>().is_err())
        .collect();
    info!(
        message = %info.message,
        version = %info.version,
        subjects = info.subjects.len(),
        "tutoring api reachable"
    );
    if !unknown.is_empty() {
        warn!(?unknown, "api offers subjects this client does not show");
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };
    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let config = parse_config(&mut argv.into_iter(), cmd, ApiConfig::from_env()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    info!(base_url = %config.base_url, student_level = %config.student_level, "configuration loaded");

    let api = HttpTutorApi::new(&config)?;

    // The probe runs on its own short-lived runtime; the desktop launcher
    // brings its own.
    let probe = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?
        .block_on(api.service_info());

    match cmd {
        Command::Check => {
            let info = probe?;
            log_service_info(&info);
            println!("{} (version {})", info.message, info.version);
            Ok(())
        }
        Command::Ui => {
            match &probe {
                Ok(info) => log_service_info(info),
                Err(err) => warn!(%err, "tutoring api unreachable at startup; continuing"),
            }

            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                api: Arc::new(api),
                student_level: config.student_level,
            });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Tuteur Éducatif")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
