/// Initializes logging from the default `log4rs.yaml` in the working
/// directory, when one exists. Prefer `configure_logging` for programmatic
/// control.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let _ = log4rs::init_file("log4rs.yaml", log4rs::config::Deserializers::default());
    Ok(())
}

/// Configure logging globally for the process: a rolling `crmlite.log` in
/// `dir` (current directory if `None`), at the given level, keeping
/// `retention` rolled files (default 7). If log4rs is already initialized
/// this call is a no-op.
pub fn configure_logging(
    dir: Option<&std::path::Path>,
    level: Option<&str>,
    retention: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    use log::LevelFilter;
    use log4rs::append::rolling_file::RollingFileAppender;
    use log4rs::append::rolling_file::policy::compound::{
        CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
    };
    use log4rs::config::{Appender, Config, Root};
    use log4rs::encode::pattern::PatternEncoder;
    use std::path::PathBuf;

    let base = dir
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    std::fs::create_dir_all(&base)?;
    let keep = retention.unwrap_or(7) as u32;
    let lvl = match level.unwrap_or("info").to_ascii_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    let roller = FixedWindowRoller::builder()
        .build(&format!("{}", base.join("crmlite.{}.log").display()), keep)?;
    let policy =
        CompoundPolicy::new(Box::new(SizeTrigger::new(10 * 1024 * 1024)), Box::new(roller));
    let appender = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}")))
        .build(base.join("crmlite.log"), Box::new(policy))?;
    let config = Config::builder()
        .appender(Appender::builder().build("app", Box::new(appender)))
        .build(Root::builder().appender("app").build(lvl))?;
    let _ = log4rs::init_config(config);
    Ok(())
}

/// Configure logging from environment variables if present:
/// - `CRMLITE_LOG_DIR`
/// - `CRMLITE_LOG_LEVEL`
/// - `CRMLITE_LOG_RETENTION`
pub fn configure_from_env() {
    let dir = std::env::var("CRMLITE_LOG_DIR").ok().map(std::path::PathBuf::from);
    let level = std::env::var("CRMLITE_LOG_LEVEL").ok();
    let retention =
        std::env::var("CRMLITE_LOG_RETENTION").ok().and_then(|s| s.parse::<usize>().ok());
    let _ = configure_logging(dir.as_deref(), level.as_deref(), retention);
}
