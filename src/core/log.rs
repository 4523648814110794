// Define a new module for logging initialization
use super::config::AppConfig;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Default log file, `<config dir>/logs/ubci_YYYYMMDD.log`.
pub fn default_log_path() -> Option<PathBuf> {
    let dir = AppConfig::log_dir().ok()?;
    Some(dir.join(format!(
        "ubci_{}.log",
        chrono::Local::now().format("%Y%m%d")
    )))
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    File::options().create(true).append(true).open(path)
}

/// Installs the global subscriber.
///
/// Without a level nothing is logged. With one, events go to stderr and to
/// `file` (or [`default_log_path`]). `RUST_LOG` takes precedence over the
/// level for the env filter.
pub fn init_logging(level: Option<LevelFilter>, file: Option<&Path>) {
    let level_filter = level.unwrap_or(LevelFilter::OFF);
    let app_filter = Targets::new().with_target("ubci", level_filter);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_filter.to_string().to_lowercase()));

    let file_layer = level
        .filter(|l| *l != LevelFilter::OFF)
        .and_then(|_| file.map(Path::to_path_buf).or_else(default_log_path))
        .and_then(|path| match open_log_file(&path) {
            Ok(file) => Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .boxed(),
            ),
            Err(e) => {
                eprintln!("Failed to open log file {}: {}", path.display(), e);
                None
            }
        });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(app_filter)
        .with(env_filter)
        .init();
}
