//! Log subscriber setup.
//!
//! Logs always go to stderr so stdout carries only results. The filter comes
//! from `RUST_LOG` and defaults to `warn`.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::args::LogFormat;

pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}
