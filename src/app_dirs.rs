use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// State directory under $HOME/.local/state/astra, with a
    /// platform-specific fallback when HOME is not set.
    fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("astra"),
            )
        } else {
            ProjectDirs::from("", "", "astra")
                .map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }

    pub fn scores_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("highscores.txt"))
    }

    pub fn round_log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("rounds.csv"))
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "astra").map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
    }
}
