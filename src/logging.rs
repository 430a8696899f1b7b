use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs a stderr subscriber for the binaries.
///
/// `FRONTIER_PATHS_LOG` takes precedence over `RUST_LOG`. Without either the
/// level is `info`, or `debug` with `verbose`.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let default_level = if verbose { "debug" } else { "info" };

    let filter = EnvFilter::try_from_env("FRONTIER_PATHS_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}
