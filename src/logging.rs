// 📝 Logging bootstrap
//
// Logs go to stderr so stdout carries only command output. `RUST_LOG`
// overrides the configured level.

use anyhow::{anyhow, Result};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(level: &str) -> Result<()> {
    let level = level.to_ascii_lowercase();
    if !LEVELS.contains(&level.as_str()) {
        return Err(anyhow!(
            "invalid log level `{}`; expected one of {}",
            level,
            LEVELS.join(", ")
        ));
    }

    let directive: Directive = level
        .parse()
        .map_err(|e| anyhow!("invalid log level `{}`: {}", level, e))?;
    let filter = EnvFilter::builder()
        .with_default_directive(directive)
        .parse_lossy(std::env::var("RUST_LOG").unwrap_or_default());

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unknown_level() {
        let err = init_logging("loud").unwrap_err();
        assert!(err.to_string().contains("invalid log level `loud`"));
    }
}
