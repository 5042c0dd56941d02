//! Diagnostic logging setup

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Pick the filter directive from CLI flags
pub fn level_directive(verbose: bool, log_level: Option<&str>) -> String {
    match (verbose, log_level) {
        (_, Some(level)) if level.contains('=') => level.to_string(),
        (_, Some(level)) => format!("jdigest={}", level),
        (true, None) => "jdigest=debug".to_string(),
        (false, None) => "jdigest=warn".to_string(),
    }
}

/// Initialize structured logging on stderr.
///
/// `RUST_LOG` or `JDIGEST_LOG` take precedence over the CLI flags.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("JDIGEST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(level_directive(verbose, log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}
