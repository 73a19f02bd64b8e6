pub mod config;
pub mod file;
pub mod session;
pub mod traits;

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

// Re-export
pub use config::FileConfigRepository;
pub use file::FileLogRepository;
pub use session::FileSessionRepository;
pub use traits::LogRepository;

const DEFAULT_DIR_NAME: &str = ".burndown";

/// Resolves (and creates) the data directory: the given one, or `~/.burndown`.
pub fn data_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    let path = match base_dir {
        Some(dir) => dir,
        None => {
            let home_dir = dirs::home_dir()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?;
            home_dir.join(DEFAULT_DIR_NAME)
        }
    };
    fs::create_dir_all(&path)?;
    Ok(path)
}
