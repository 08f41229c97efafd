use log::LevelFilter;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::{Path, PathBuf};

use super::devlog::TRACE_TARGET;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const ROLL_SIZE: u64 = 10 * 1024 * 1024;

/// Initializes logging from `log4rs.yaml` in the working directory.
///
/// # Errors
/// Returns an error if the file is missing or invalid.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    init_path(Path::new("log4rs.yaml"))
}

/// # Errors
/// Returns an error if the file is missing or invalid.
pub fn init_path(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    log4rs::init_file(path, log4rs::config::Deserializers::default())?;
    Ok(())
}

/// Maps `error|warn|info|debug|trace` to a filter; anything else is `Info`.
#[must_use]
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    match level.unwrap_or("info").to_ascii_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

fn rolling(
    base: &Path,
    name: &str,
    keep: u32,
) -> Result<RollingFileAppender, Box<dyn std::error::Error>> {
    let roller = FixedWindowRoller::builder()
        .build(&format!("{}", base.join(format!("{name}.{{}}.log")).display()), keep)?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
    Ok(RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(base.join(format!("{name}.log")), Box::new(policy))?)
}

/// Configures process-wide logging into `{dir}/docfilter.log`.
///
/// - `dir`: base directory; the current directory when `None`.
/// - `level`: see [`parse_level`].
/// - `retention`: rolled files to keep (default 7).
/// - `enable_trace`: also persist developer traces (`dev6!`) to `{dir}/trace.log`.
///
/// # Errors
/// Returns an error if the directory or appenders cannot be created, or a logger is already set.
pub fn configure_logging(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<u32>,
    enable_trace: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let base = dir.map_or_else(
        || std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        PathBuf::from,
    );
    std::fs::create_dir_all(&base)?;
    let keep = retention.unwrap_or(7);
    let lvl = parse_level(level);

    let mut builder = Config::builder()
        .appender(Appender::builder().build("app", Box::new(rolling(&base, "docfilter", keep)?)));
    if enable_trace {
        builder = builder
            .appender(Appender::builder().build("trace", Box::new(rolling(&base, "trace", keep)?)))
            .logger(
                Logger::builder()
                    .appender("trace")
                    .additive(false)
                    .build(TRACE_TARGET, LevelFilter::Trace),
            );
    } else {
        builder = builder.logger(Logger::builder().additive(false).build(TRACE_TARGET, LevelFilter::Off));
    }
    let config = builder.build(Root::builder().appender("app").build(lvl))?;
    log4rs::init_config(config)?;
    Ok(())
}

/// Configures logging from the environment:
/// - `DOCFILTER_LOG_DIR`
/// - `DOCFILTER_LOG_LEVEL`
/// - `DOCFILTER_LOG_RETENTION`
/// - `DOCFILTER_DEV6` (`1|true|yes` persists developer traces)
///
/// # Errors
/// See [`configure_logging`].
pub fn configure_from_env() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::var("DOCFILTER_LOG_DIR").ok().map(PathBuf::from);
    let level = std::env::var("DOCFILTER_LOG_LEVEL").ok();
    let retention =
        std::env::var("DOCFILTER_LOG_RETENTION").ok().and_then(|s| s.parse::<u32>().ok());
    let trace = std::env::var("DOCFILTER_DEV6")
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);
    configure_logging(dir.as_deref(), level.as_deref(), retention, trace)
}
