use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::args::parse_bool_env;

/// Installs the global subscriber. `OCRBENCH_LOG` wins over `RUST_LOG`; an
/// unparsable filter falls back to `info`.
pub fn init_logging(verbose: bool, no_color: bool) {
    let filter = std::env::var("OCRBENCH_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| {
                if verbose {
                    EnvFilter::new("debug")
                } else {
                    EnvFilter::new("info")
                }
            },
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        );

    let no_color = no_color
        || std::env::var("NO_COLOR")
            .ok()
            .and_then(|value| parse_bool_env(&value))
            .unwrap_or(false);

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}
