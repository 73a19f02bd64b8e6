use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::warn;

use crate::model::config::{BurndownConfig, DEFAULT_INITIAL_BUDGET};
use crate::repository::data_dir;

const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Clone)]
pub struct FileConfigRepository {
    file_path: PathBuf,
}

impl FileConfigRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = data_dir(base_dir)?.join(CONFIG_FILE_NAME);
        Ok(Self { file_path: path })
    }

    /// Missing file means defaults. A non-positive budget falls back to the default.
    pub fn load(&self) -> Result<BurndownConfig> {
        if !self.file_path.exists() {
            return Ok(BurndownConfig::default());
        }
        let content = fs::read_to_string(&self.file_path)?;
        let mut config: BurndownConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", self.file_path.display()))?;
        if !config.has_valid_budget() {
            warn!(
                "event=config_load module=config status=invalid_budget budget={} fallback={}",
                config.initial_budget, DEFAULT_INITIAL_BUDGET
            );
            config.initial_budget = DEFAULT_INITIAL_BUDGET;
        }
        Ok(config)
    }

    pub fn save(&self, config: &BurndownConfig) -> Result<()> {
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.file_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_then_roundtrip() {
        let dir = TempDir::new().unwrap();
        let repo = FileConfigRepository::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(repo.load().unwrap(), BurndownConfig::default());

        let config = BurndownConfig::new(
            "Sprint 7",
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
            120.0,
        );
        repo.save(&config).unwrap();
        assert_eq!(repo.load().unwrap(), config);
    }

    #[test]
    fn test_invalid_budget_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let repo = FileConfigRepository::new(Some(dir.path().to_path_buf())).unwrap();

        for budget in ["0", "-40", "0.0"] {
            let json = format!(
                r#"{{"project_name":"Hand edited","start_date":"2025-02-01","end_date":"2025-02-28","initial_budget":{}}}"#,
                budget
            );
            fs::write(dir.path().join(CONFIG_FILE_NAME), json).unwrap();

            let config = repo.load().unwrap();
            assert_eq!(config.project_name, "Hand edited");
            assert_eq!(config.initial_budget, DEFAULT_INITIAL_BUDGET);
        }
    }
}
