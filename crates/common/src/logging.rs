use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::error::{EvalError, Result};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `level` when set. Log lines go to stderr so that
/// report text printed on stdout can be piped untouched.
pub fn init_tracing(level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| EvalError::Config(format!("failed to install tracing subscriber: {e}")))?;

    info!("Tracing initialized with level: {}", level);
    Ok(())
}
