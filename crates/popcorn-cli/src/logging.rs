use anyhow::Result;
use std::io;
use std::io::IsTerminal;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter for a `-v` count; `RUST_LOG` wins whenever it is set
fn build_filter(verbose_level: u8, quiet: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }
    let default = match verbose_level {
        0 => "info",
        // -v: debug, minus the per-connection hyper chatter
        1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn wants_json() -> bool {
    std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stdout().is_terminal())
}

/// Log to stderr, for one-shot commands
pub fn init_logging(verbose_level: u8, quiet: bool) -> Result<()> {
    let registry = Registry::default().with(build_filter(verbose_level, quiet));

    if wants_json() {
        registry
            .with(fmt::layer().json().with_timer(ChronoUtc::rfc_3339()).with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_timer(ChronoUtc::rfc_3339()).with_writer(io::stderr))
            .init();
    }
    Ok(())
}

/// Log to a daily-rotated file, for the terminal UI which owns the screen.
///
/// `popcorn.log` becomes `popcorn.<date>` files next to it. Always plain
/// text, since nobody tails the UI log with a JSON collector.
pub fn init_file_logging(verbose_level: u8, quiet: bool, log_file: &Path) -> Result<()> {
    let log_dir = log_file
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
    std::fs::create_dir_all(log_dir)?;

    let prefix = rotation_prefix(log_file)?;
    let appender = RollingFileAppender::new(Rotation::DAILY, log_dir, prefix);

    Registry::default()
        .with(build_filter(verbose_level, quiet))
        .with(
            fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false)
                .with_writer(appender),
        )
        .init();
    Ok(())
}

/// "popcorn.log" -> "popcorn"
fn rotation_prefix(log_file: &Path) -> Result<&str> {
    let name = log_file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;
    Ok(name.rsplit_once('.').map_or(name, |(stem, _)| stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_prefix_strips_extension() {
        assert_eq!(rotation_prefix(Path::new("/tmp/logs/popcorn.log")).unwrap(), "popcorn");
        assert_eq!(rotation_prefix(Path::new("/tmp/logs/popcorn")).unwrap(), "popcorn");
    }

    #[test]
    fn test_rotation_prefix_rejects_bare_root() {
        assert!(rotation_prefix(Path::new("/")).is_err());
    }
}
