use std::cell::Cell;
use std::rc::Rc;

use burndown_core::service::auth_service::PIN_LENGTH;
use anyhow::{anyhow, Result};
use burndown_core::{
    expand_key, export_to_dir, is_weekend, parse_args, parse_human_date, summarize, AuthService,
    BurndownConfig, BurndownSummary, DerivedDayRecord, ExportValue, FileConfigRepository,
    FileLogRepository, StateStore, TeamMember,
};
use chrono::NaiveDate;
use log::error;
use ratatui::widgets::TableState;

pub enum InputMode {
    Login,
    Normal,
    Editing,
    Configuring,
    ConfirmReset,
}

pub struct App {
    pub auth: AuthService,
    pub config_repo: FileConfigRepository,
    pub state: StateStore<FileLogRepository>,
    pub series: Vec<DerivedDayRecord>,
    pub summary: BurndownSummary,
    pub table_state: TableState,
    /// Index into `visible_members()`.
    pub selected_member: usize,
    pub member_filter: Option<TeamMember>,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub status: Option<String>,
    pub login_failed: bool,
    dirty: Rc<Cell<bool>>,
}

impl App {
    pub fn new(auth: AuthService, config_repo: FileConfigRepository, mut state: StateStore<FileLogRepository>) -> App {
        let dirty = Rc::new(Cell::new(true));
        let flag = dirty.clone();
        state.subscribe(move |_| flag.set(true));

        let input_mode = if auth.is_authenticated() { InputMode::Normal } else { InputMode::Login };
        let summary = summarize(state.config(), &[]);

        let mut app = App {
            auth,
            config_repo,
            state,
            series: Vec::new(),
            summary,
            table_state: TableState::default(),
            selected_member: 0,
            member_filter: None,
            input: String::new(),
            input_mode,
            cursor_position: 0,
            status: None,
            login_failed: false,
            dirty,
        };
        app.recompute();
        app
    }

    /// Picks up remote changes and re-derives the series when anything changed.
    pub fn on_tick(&mut self) {
        if let Err(e) = self.state.poll_changes() {
            self.status = Some(format!("Reload failed: {:#}", e));
        }
        if self.dirty.get() {
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        self.dirty.set(false);
        self.series = self.state.series();
        self.summary = summarize(self.state.config(), &self.series);

        if self.series.is_empty() {
            self.table_state.select(None);
        } else {
            let i = self.table_state.selected().unwrap_or_else(|| self.today_row());
            self.table_state.select(Some(i.min(self.series.len() - 1)));
        }
    }

    /// Row of today's date, or the first row when today is out of range.
    fn today_row(&self) -> usize {
        let today = chrono::Local::now().date_naive();
        self.series.iter().position(|r| r.date == today).unwrap_or(0)
    }

    pub fn visible_members(&self) -> Vec<TeamMember> {
        match self.member_filter {
            Some(member) => vec![member],
            None => TeamMember::ALL.to_vec(),
        }
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.table_state.selected().and_then(|i| self.series.get(i)).map(|r| r.date)
    }

    pub fn current_member(&self) -> TeamMember {
        let members = self.visible_members();
        members[self.selected_member.min(members.len() - 1)]
    }

    pub fn next(&mut self) {
        if self.series.is_empty() { return; }

        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= self.series.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.series.is_empty() { return; }

        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.series.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn next_member(&mut self) {
        let count = self.visible_members().len();
        self.selected_member = (self.selected_member + 1) % count;
    }

    pub fn previous_member(&mut self) {
        let count = self.visible_members().len();
        self.selected_member = (self.selected_member + count - 1) % count;
    }

    /// None -> Joanna -> ... -> Anastasia -> None
    pub fn cycle_filter(&mut self) {
        self.member_filter = match self.member_filter {
            None => Some(TeamMember::ALL[0]),
            Some(member) => TeamMember::ALL.get(member.index() + 1).copied(),
        };
        self.selected_member = 0;
    }

    pub fn enter_edit_mode(&mut self) {
        let Some(date) = self.selected_date() else { return };
        if is_weekend(date) {
            self.status = Some("Weekends are read-only.".to_string());
            return;
        }
        let current = self.state.logs().get(date, self.current_member());
        self.input = current.map(|h| h.to_string()).unwrap_or_default();
        self.cursor_position = self.input.chars().count();
        self.input_mode = InputMode::Editing;
    }

    pub fn enter_config_mode(&mut self) {
        let config = self.state.config();
        self.input = format!(
            "project:{} start:{} end:{} budget:{}",
            config.project_name, config.start_date, config.end_date, config.initial_budget
        );
        self.cursor_position = self.input.chars().count();
        self.input_mode = InputMode::Configuring;
    }

    pub fn enter_reset_mode(&mut self) {
        self.input_mode = InputMode::ConfirmReset;
    }

    pub fn exit_input_mode(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        if let InputMode::Login = self.input_mode {
            if !c.is_ascii_digit() || self.input.len() >= PIN_LENGTH {
                return;
            }
        }
        let byte_index = self.input.chars().take(self.cursor_position).map(|c| c.len_utf8()).sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self.input.chars().take(self.cursor_position - 1).map(|c| c.len_utf8()).sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit_command(&mut self) {
        match self.input_mode {
            InputMode::Login => {
                self.submit_login();
                return;
            }
            InputMode::Editing => self.submit_edit(),
            InputMode::Configuring => self.submit_config(),
            InputMode::Normal | InputMode::ConfirmReset => {}
        }
        self.exit_input_mode();
    }

    fn submit_login(&mut self) {
        match self.auth.login(&self.input) {
            Ok(true) => {
                self.login_failed = false;
                self.exit_input_mode();
            }
            Ok(false) => self.login_failed = true,
            Err(e) => self.status = Some(format!("Login failed: {:#}", e)),
        }
        self.input.clear();
        self.cursor_position = 0;
    }

    fn submit_edit(&mut self) {
        let Some(date) = self.selected_date() else { return };
        let member = self.current_member();
        match self.state.submit_input(date, member, &self.input) {
            Ok(true) => self.status = None,
            Ok(false) => self.status = Some(format!("Ignored '{}': not a valid number of hours.", self.input.trim())),
            Err(e) => self.status = Some(format!("Save failed: {:#}", e)),
        }
    }

    fn submit_config(&mut self) {
        let config = match apply_config_input(self.state.config(), &self.input) {
            Ok(config) => config,
            Err(e) => {
                self.status = Some(e.to_string());
                return;
            }
        };

        if let Err(e) = self.state.set_config(config) {
            self.status = Some(e.to_string());
            return;
        }
        match self.config_repo.save(self.state.config()) {
            Ok(()) => self.status = Some("Configuration saved.".to_string()),
            Err(e) => {
                error!("event=config_save module=tui status=error error={:#}", e);
                self.status = Some(format!("Configuration not saved: {:#}", e));
            }
        }
    }

    pub fn confirm_reset(&mut self) {
        match self.state.reset() {
            Ok(()) => self.status = Some("All entries deleted.".to_string()),
            Err(e) => self.status = Some(format!("Reset failed: {:#}", e)),
        }
        self.exit_input_mode();
    }

    pub fn export(&mut self, value: ExportValue) {
        let result = std::env::current_dir()
            .map_err(anyhow::Error::from)
            .and_then(|dir| export_to_dir(self.state.config(), &self.series, value, &dir));
        self.status = Some(match result {
            Ok(path) => format!("Exported to {}", path.display()),
            Err(e) => format!("Export failed: {:#}", e),
        });
    }

    pub fn reload(&mut self) {
        match self.state.refresh() {
            Ok(()) => self.status = Some("Reloaded.".to_string()),
            Err(e) => self.status = Some(format!("Reload failed: {:#}", e)),
        }
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.auth.logout() {
            self.status = Some(format!("Logout failed: {:#}", e));
            return;
        }
        self.exit_input_mode();
        self.input_mode = InputMode::Login;
    }
}

/// Applies a config line such as `project:Team:Alpha start:2025-09-09 budget:120`.
/// The `project` value and any free words together form the project name.
pub fn apply_config_input(current: &BurndownConfig, input: &str) -> Result<BurndownConfig> {
    let args: Vec<String> = input.split_whitespace().map(|s| s.to_string()).collect();
    let parsed = parse_args(&args);
    let known_keys = vec!["project", "start", "end", "budget"];

    let mut config = current.clone();
    let mut name_parts = Vec::new();

    for (key, value) in parsed.metadata {
        match expand_key(&key, &known_keys)?.as_str() {
            "project" => name_parts.push(value),
            "start" => config.start_date = parse_human_date(&value)?,
            "end" => config.end_date = parse_human_date(&value)?,
            "budget" => {
                config.initial_budget = value
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| anyhow!("Invalid budget: '{}'", value))?;
            }
            _ => {}
        }
    }

    if !parsed.words.is_empty() {
        name_parts.push(parsed.words);
    }
    let name = name_parts.join(" ");
    if !name.trim().is_empty() {
        config.project_name = name;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> BurndownConfig {
        BurndownConfig::new(
            "Projekt JATL",
            NaiveDate::from_ymd_opt(2025, 9, 9).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            250.0,
        )
    }

    #[test]
    fn test_config_line_accepts_colon_in_project_name() {
        let config = apply_config_input(&current(), "project:Team:Alpha budget:120").unwrap();

        assert_eq!(config.project_name, "Team:Alpha");
        assert_eq!(config.initial_budget, 120.0);
        assert_eq!(config.start_date, current().start_date);
    }

    #[test]
    fn test_config_line_prefill_round_trips() {
        let line = "project:Projekt JATL start:2025-10-01 end:2025-12-31 budget:80";
        let config = apply_config_input(&current(), line).unwrap();

        assert_eq!(config.project_name, "Projekt JATL");
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
        assert_eq!(config.end_date, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert_eq!(config.initial_budget, 80.0);
    }

    #[test]
    fn test_config_line_free_words_rename_project() {
        let config = apply_config_input(&current(), "Sprint 7 b:100").unwrap();
        assert_eq!(config.project_name, "Sprint 7");
        assert_eq!(config.initial_budget, 100.0);
    }

    #[test]
    fn test_config_line_rejects_bad_values() {
        assert!(apply_config_input(&current(), "Team:Alpha").is_err());
        assert!(apply_config_input(&current(), "budget:lots").is_err());
        assert!(apply_config_input(&current(), "start:+99999999d").is_err());
    }
}
