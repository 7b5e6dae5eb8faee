use tracing_subscriber::EnvFilter;

use super::config::{LogConfig, LogFormat};

/// Configure tracing once at startup for the entire process.
///
/// `RUST_LOG` overrides the configured level:
/// ```bash
/// RUST_LOG=shop_store=debug shop_store carts create
/// ```
pub fn setup_tracing(config: &LogConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match config.format {
        LogFormat::Compact => builder
            .with_timer(tracing_subscriber::fmt::time::uptime())
            .compact()
            .init(),
        LogFormat::Json => builder.json().init(),
    }
}
