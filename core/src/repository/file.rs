use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::debug;

use crate::model::daily_log::{LogRow, LogStore};
use crate::model::member::TeamMember;
use crate::repository::data_dir;
use crate::repository::traits::LogRepository;

const DEFAULT_FILE_NAME: &str = "burndown_logs.json";

#[derive(Clone)]
pub struct FileLogRepository {
    file_path: PathBuf,
}

impl FileLogRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = data_dir(base_dir)?;
        path.push(DEFAULT_FILE_NAME);

        // Ensure the file itself exists with an empty JSON array
        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &Vec::<LogRow>::new())?;
            writer.flush()?;
        }

        Ok(FileLogRepository { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_rows(&self) -> Result<Vec<LogRow>> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("failed to open {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let rows = serde_json::from_reader(reader)
            .with_context(|| format!("failed to parse {}", self.file_path.display()))?;
        Ok(rows)
    }

    fn write_rows(&self, rows: &[LogRow]) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, rows)?;
        writer.flush()?;
        Ok(())
    }
}

impl LogRepository for FileLogRepository {
    fn load(&self) -> Result<LogStore> {
        let rows = self.read_rows()?;
        debug!("event=logs_load module=repository rows={}", rows.len());
        Ok(LogStore::from_rows(rows))
    }

    fn upsert(&self, date: NaiveDate, member: TeamMember, hours: f64) -> Result<()> {
        let mut rows = self.read_rows()?;
        if let Some(pos) = rows.iter().position(|r| r.date == date && r.member == member) {
            rows[pos].hours = hours;
        } else {
            rows.push(LogRow { date, member, hours });
        }
        self.write_rows(&rows)
    }

    fn clear(&self) -> Result<()> {
        self.write_rows(&[])
    }

    fn revision(&self) -> Option<SystemTime> {
        fs::metadata(&self.file_path).and_then(|m| m.modified()).ok()
    }
}
