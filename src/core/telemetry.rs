use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::settings::Config;

/// Install a daily rolling file logger under `config.log_dir`.
/// `RUST_LOG` wins over `config.log_level`. Keep the guard alive for the
/// lifetime of the process or buffered lines are lost.
pub fn init_file_logging(config: &Config, file_name: &str) -> anyhow::Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))?;
    Ok(guard)
}
