use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::repository::data_dir;

const SESSION_FILE_NAME: &str = "session.json";

#[derive(Serialize, Deserialize, Debug, Default)]
struct SessionState {
    authenticated: bool,
}

/// Persists the access-gate state across runs until an explicit logout.
#[derive(Clone)]
pub struct FileSessionRepository {
    file_path: PathBuf,
}

impl FileSessionRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = data_dir(base_dir)?.join(SESSION_FILE_NAME);
        Ok(Self { file_path: path })
    }

    /// Unreadable or missing state counts as logged out.
    pub fn is_authenticated(&self) -> bool {
        fs::read_to_string(&self.file_path)
            .ok()
            .and_then(|content| serde_json::from_str::<SessionState>(&content).ok())
            .map(|s| s.authenticated)
            .unwrap_or(false)
    }

    pub fn store(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&SessionState { authenticated: true })?;
        fs::write(&self.file_path, content)?;
        Ok(())
    }

    pub fn remove(&self) -> Result<()> {
        if self.file_path.exists() {
            fs::remove_file(&self.file_path)?;
        }
        Ok(())
    }
}
