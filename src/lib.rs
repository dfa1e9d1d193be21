pub mod config;
pub mod error;
pub mod invoker;
pub mod measure;
pub mod parser;
pub mod regression;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{LogFormat, LogSettings};

pub use crate::error::MeasureError;
pub use crate::invoker::{DfxInstaller, Installer};
pub use crate::measure::{Measurer, OutputFormat, Report, Sample};
pub use crate::parser::{Cycles, CyclesFormat};
pub use crate::regression::{linear_regression, Fit};

/// Initialize tracing/logging
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so stdout carries only measurement output.
pub fn init_tracing(settings: &LogSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let registry = tracing_subscriber::registry().with(filter);
    match settings.format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}
