use tracing_subscriber::EnvFilter;

use crate::settings::{AppConfig, LogFormat};

/// Installs the global tracing subscriber. `RUST_LOG` overrides the
/// default `info` level.
pub fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
