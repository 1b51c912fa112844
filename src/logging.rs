use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Verbosity flag count to a default level; `RUST_LOG` still wins.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Human-readable events on stderr so they never mix with table output.
pub fn init_logging(verbosity: u8) {
    let level = level_for(verbosity);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    // a subscriber may already be installed (tests)
    let _ = tracing::subscriber::set_global_default(subscriber);
}
