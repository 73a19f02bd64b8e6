use std::time::SystemTime;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use log::{error, info};

use crate::input::parse_hours;
use crate::model::config::BurndownConfig;
use crate::model::daily_log::LogStore;
use crate::model::member::TeamMember;
use crate::model::series::{BurndownSummary, DerivedDayRecord};
use crate::repository::LogRepository;
use crate::usecase::burndown::{derive_series, summarize};

/// Everything the presentation and export layers read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub config: BurndownConfig,
    pub logs: LogStore,
}

pub type Listener = Box<dyn FnMut(&Snapshot)>;

/// Holds the current config and log snapshot in front of a repository.
///
/// Writes are applied locally first and then sent to the repository. A failed
/// write is logged and returned, but the local value is kept. Remote changes are
/// picked up by re-fetching the whole store; there is no incremental patching.
pub struct StateStore<R: LogRepository> {
    repo: R,
    snapshot: Snapshot,
    last_revision: Option<SystemTime>,
    listeners: Vec<Listener>,
}

impl<R: LogRepository> StateStore<R> {
    pub fn new(repo: R, config: BurndownConfig) -> Self {
        Self {
            repo,
            snapshot: Snapshot {
                config,
                logs: LogStore::new(),
            },
            last_revision: None,
            listeners: Vec::new(),
        }
    }

    /// Creates the store and performs the initial fetch.
    pub fn load(repo: R, config: BurndownConfig) -> Result<Self> {
        let mut store = Self::new(repo, config);
        store.refresh()?;
        Ok(store)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn config(&self) -> &BurndownConfig {
        &self.snapshot.config
    }

    pub fn logs(&self) -> &LogStore {
        &self.snapshot.logs
    }

    pub fn series(&self) -> Vec<DerivedDayRecord> {
        derive_series(&self.snapshot.config, &self.snapshot.logs)
    }

    pub fn summary(&self) -> BurndownSummary {
        summarize(&self.snapshot.config, &self.series())
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&Snapshot) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Re-fetches the full log snapshot. On failure the previous snapshot stays.
    pub fn refresh(&mut self) -> Result<()> {
        let revision = self.repo.revision();
        match self.repo.load() {
            Ok(logs) => {
                self.snapshot.logs = logs;
                self.last_revision = revision;
                self.notify();
                Ok(())
            }
            Err(err) => {
                error!("event=logs_fetch module=state status=error error={:#}", err);
                Err(err)
            }
        }
    }

    /// Re-fetches when the repository reports a change since the last fetch.
    pub fn poll_changes(&mut self) -> Result<bool> {
        let revision = self.repo.revision();
        if revision.is_none() || revision == self.last_revision {
            return Ok(false);
        }
        self.refresh()?;
        Ok(true)
    }

    pub fn update_log(&mut self, date: NaiveDate, member: TeamMember, hours: f64) -> Result<()> {
        self.snapshot.logs.set(date, member, hours);
        self.notify();

        if let Err(err) = self.repo.upsert(date, member, hours) {
            error!(
                "event=log_upsert module=state status=error date={} member={} error={:#}",
                date, member, err
            );
            return Err(err);
        }
        info!("event=log_upsert module=state status=ok date={} member={} hours={}", date, member, hours);
        Ok(())
    }

    /// Like [`update_log`](Self::update_log) for raw text input. Malformed
    /// input is dropped without touching the store; returns whether it was applied.
    pub fn submit_input(&mut self, date: NaiveDate, member: TeamMember, raw: &str) -> Result<bool> {
        match parse_hours(raw) {
            Some(hours) => {
                self.update_log(date, member, hours)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drops every entry. Local state is only cleared once the repository agrees.
    pub fn reset(&mut self) -> Result<()> {
        if let Err(err) = self.repo.clear() {
            error!("event=logs_reset module=state status=error error={:#}", err);
            return Err(err);
        }
        self.snapshot.logs.clear();
        info!("event=logs_reset module=state status=ok");
        self.notify();
        Ok(())
    }

    pub fn set_config(&mut self, config: BurndownConfig) -> Result<()> {
        if !config.has_valid_budget() {
            return Err(anyhow!("Initial budget must be a positive number"));
        }
        self.snapshot.config = config;
        self.notify();
        Ok(())
    }

    fn notify(&mut self) {
        let snapshot = &self.snapshot;
        for listener in self.listeners.iter_mut() {
            listener(snapshot);
        }
    }
}
