use crate::error::{Result as ServerErrorResult, ServerError};

use pr_config::LoggingConfig;

use std::collections::BTreeMap;
use std::fmt::{Arguments, Display};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record, info};

/// HTTP client internals that flood debug output with connection chatter
const QUIET_TARGETS: [&str; 4] = ["hyper", "hyper_util", "reqwest", "rustls"];

/// Initialize the global logger from the `[logging]` section.
///
/// Relative log directories resolve against `config_dir`.
pub fn initialize(logging: &LoggingConfig, config_dir: &Path) -> ServerErrorResult<()> {
    let log_file = log_file_path(logging, config_dir)?;

    let mut base_dispatch = Dispatch::new().level(*logging.level);
    for (target, level) in target_levels(logging) {
        base_dispatch = base_dispatch.level_for(target, level);
    }

    let dispatch = match (&log_file, logging.colored) {
        (Some(path), _) => {
            let file = fern::log_file(path).map_err(|e| ServerError::Logger {
                message: format!("Failed to open log file {}: {}", path.display(), e),
            })?;

            Dispatch::new()
                .format(|out, message, record| write_line(out, message, record, record.level()))
                .chain(file)
        }
        (None, true) => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);

            Dispatch::new()
                .format(move |out, message, record| {
                    write_line(out, message, record, colors.color(record.level()))
                })
                .chain(std::io::stdout())
        }
        // systemd / docker
        (None, false) => Dispatch::new()
            .format(|out, message, record| write_line(out, message, record, record.level()))
            .chain(std::io::stdout()),
    };

    base_dispatch
        .chain(dispatch)
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    match log_file {
        Some(ref path) => info!(
            "Logger initialized: level={}, file={}",
            *logging.level,
            path.display()
        ),
        None => info!("Logger initialized: level={}, stdout", *logging.level),
    }
    if !logging.modules.is_empty() {
        info!("Log level overrides: {:?}", logging.modules);
    }

    // Bridge tracing events from dependencies into log
    tracing_log::LogTracer::init().ok();

    Ok(())
}

/// Where file logging goes, creating the log directory. `None` means stdout.
pub fn log_file_path(
    logging: &LoggingConfig,
    config_dir: &Path,
) -> ServerErrorResult<Option<PathBuf>> {
    let Some(ref file_name) = logging.file else {
        return Ok(None);
    };

    let log_dir = config_dir.join(&logging.dir);
    std::fs::create_dir_all(&log_dir).map_err(|e| ServerError::Logger {
        message: format!("Failed to create log directory {}: {}", log_dir.display(), e),
    })?;

    Ok(Some(log_dir.join(file_name)))
}

/// Per-target filters: HTTP client internals capped at `warn` unless the
/// config names them, plus every configured override.
pub fn target_levels(logging: &LoggingConfig) -> BTreeMap<String, LevelFilter> {
    let mut levels: BTreeMap<String, LevelFilter> = QUIET_TARGETS
        .iter()
        .map(|target| (target.to_string(), LevelFilter::Warn))
        .collect();

    for (target, level) in &logging.modules {
        levels.insert(target.clone(), level.0);
    }

    levels
}

fn write_line(out: FormatCallback, message: &Arguments, record: &Record, level: impl Display) {
    out.finish(format_args!(
        "[{date} - {level}] {message} [{target}]",
        date = humantime::format_rfc3339(SystemTime::now()),
        target = record.target(),
    ))
}
