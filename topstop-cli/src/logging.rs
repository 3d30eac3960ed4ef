use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

/// Sends log records to `path`, appending, filtered by `RUST_LOG` (default
/// `info`).
pub fn init_file_logging(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))
}

/// Whole hours, minutes and rounded seconds, e.g. `1 minutes 3 seconds`.
pub fn human_time(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60 + u64::from(elapsed.subsec_millis() >= 500);

    if hours == 0 && minutes == 0 && seconds == 0 {
        return "less than a second".to_string();
    }

    let mut text = String::new();
    if hours > 0 {
        text.push_str(&format!("{hours} hours "));
    }
    if minutes > 0 {
        text.push_str(&format!("{minutes} minutes "));
    }
    text.push_str(&format!("{seconds} seconds"));
    text
}
