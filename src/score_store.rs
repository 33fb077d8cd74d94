use crate::app_dirs::AppDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The persisted scoreboard never holds more than this many entries.
pub const SCOREBOARD_CAPACITY: usize = 10;

/// Recursive three-way partition sort, descending.
///
/// Pivot is the middle element of the slice; the slice is split into
/// greater-than, equal and less-than partitions, the outer two are sorted
/// recursively and the result is concatenated greater + equal + lesser.
/// Equal keys are grouped together, so ties keep no particular order.
pub fn partition_sort(scores: &[u32]) -> Vec<u32> {
    if scores.len() <= 1 {
        return scores.to_vec();
    }

    let pivot = scores[scores.len() / 2];
    let greater: Vec<u32> = scores.iter().copied().filter(|&s| s > pivot).collect();
    let equal: Vec<u32> = scores.iter().copied().filter(|&s| s == pivot).collect();
    let lesser: Vec<u32> = scores.iter().copied().filter(|&s| s < pivot).collect();

    let mut sorted = partition_sort(&greater);
    sorted.extend(equal);
    sorted.extend(partition_sort(&lesser));
    sorted
}

/// Persistent ranked high-score store backed by a flat text file,
/// one non-negative decimal integer per line, highest first.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::scores_path().unwrap_or_else(|| PathBuf::from("highscores.txt"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every persisted score, sorted descending. A missing or
    /// unreadable file is an empty history, not an error. Lines that do
    /// not parse as a non-negative integer are skipped with a warning
    /// rather than aborting the whole load.
    pub fn load(&self) -> Vec<u32> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return Vec::new(),
        };

        let mut scores = Vec::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.parse::<u32>() {
                Ok(score) => scores.push(score),
                Err(_) => log::warn!(
                    "skipping unparsable score line {:?} in {}",
                    line,
                    self.path.display()
                ),
            }
        }

        partition_sort(&scores)
    }

    /// The ranked board truncated to at most `n` entries, for display.
    pub fn top_n(&self, n: usize) -> Vec<u32> {
        let mut ranked = self.load();
        ranked.truncate(n);
        ranked
    }

    /// Full read-modify-write: merge the new score into the persisted
    /// history, keep the `SCOREBOARD_CAPACITY` largest, write everything
    /// back and return the new ranking. A write failure leaves the file
    /// in its previous state.
    pub fn record(&self, score: u32) -> io::Result<Vec<u32>> {
        let mut scores = self.load();
        scores.push(score);

        let mut ranked = partition_sort(&scores);
        ranked.truncate(SCOREBOARD_CAPACITY);

        self.write_all(&ranked)?;
        Ok(ranked)
    }

    /// Remove the backing file. Absence is not an error.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    fn write_all(&self, ranked: &[u32]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out = String::with_capacity(ranked.len() * 4);
        for score in ranked {
            out.push_str(&score.to_string());
            out.push('\n');
        }

        // Write a sibling temp file and rename it into place so a failed
        // write can never leave a half-written scoreboard behind.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, out)?;
        fs::rename(&tmp, &self.path)
    }
}
