//! Sitegen CLI Library
//!
//! Command implementations for the `sitegen` binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, redirect)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use sitegen::cmd;
//!
//! cmd::build::run(Path::new("www"), Some("example.com"), None, true).unwrap();
//! ```

pub mod cmd;

pub use sitegen_core::Config;
pub use sitegen_generator::{BuildStats, Builder};

/// Initialize tracing with the specified verbosity level.
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
///
/// `RUST_LOG` directives are honored on top of the level.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
