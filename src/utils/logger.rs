use anyhow::Result;
use std::path::Path;
use std::fs;
use chrono::Local;
use tracing::info;
use tracing_subscriber::{FmtSubscriber, EnvFilter};

/// Installs the global tracing subscriber
///
/// With a `log_dir` every run writes to its own timestamped file there,
/// otherwise output goes to stderr. Verbosity follows `RUST_LOG`.
pub fn init_logger(log_dir: Option<&str>) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    match log_dir {
        Some(log_dir) => {
            if !Path::new(log_dir).exists() {
                fs::create_dir_all(log_dir)?;
            }

            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            let log_file = format!("{}/ru_supplier_link_{}.log", log_dir, timestamp);

            let subscriber = builder
                .with_ansi(false)
                .with_writer(fs::File::create(&log_file)?)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            info!("Logger initialized, writing to {}", log_file);
        }
        None => {
            let subscriber = builder.with_writer(std::io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(())
}
