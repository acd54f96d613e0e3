//! File-backed tracing setup
//!
//! The terminal belongs to the TUI, so logs only go somewhere when a log file
//! is requested. `RUST_LOG` overrides the default `info` filter.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init(log_file: Option<&Path>) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = open_log(path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()
        .map_err(io::Error::other)
}

fn open_log(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_log_file_is_noop() {
        assert!(init(None).is_ok());
    }

    #[test]
    fn test_open_log_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("champdex.log");
        std::fs::write(&path, "existing\n").unwrap();

        open_log(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing\n");
    }
}
