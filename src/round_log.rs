use crate::app_dirs::AppDirs;
use chrono::Local;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Append-only CSV history of finished rounds, one line per round.
#[derive(Debug, Clone)]
pub struct RoundLog {
    path: PathBuf,
}

impl RoundLog {
    /// Log under the state directory; `None` when no directory resolves.
    pub fn new() -> Option<Self> {
        AppDirs::round_log_path().map(|path| Self { path })
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, score: u32, misses: u32, multiplier: f64) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // If the log doesn't exist yet, we need to emit a header
        let needs_header = !self.path.exists();

        let mut log_file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        if needs_header {
            writeln!(log_file, "date,score,misses,multiplier")?;
        }

        writeln!(
            log_file,
            "{},{},{},{:.2}",
            Local::now().format("%c"),
            score,
            misses,
            multiplier,
        )
    }
}
