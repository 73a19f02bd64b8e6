use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROJECT_NAME: &str = "Projekt JATL";
pub const DEFAULT_INITIAL_BUDGET: f64 = 250.0;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BurndownConfig {
    pub project_name: String,
    pub start_date: NaiveDate,
    /// Inclusive.
    pub end_date: NaiveDate,
    /// Starting value for every member's own running total.
    #[serde(default = "default_budget")]
    pub initial_budget: f64,
}

fn default_budget() -> f64 {
    DEFAULT_INITIAL_BUDGET
}

impl Default for BurndownConfig {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 9).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap_or_default(),
            initial_budget: DEFAULT_INITIAL_BUDGET,
        }
    }
}

impl BurndownConfig {
    pub fn new(project_name: &str, start_date: NaiveDate, end_date: NaiveDate, initial_budget: f64) -> Self {
        Self {
            project_name: project_name.to_string(),
            start_date,
            end_date,
            initial_budget,
        }
    }

    /// The budget must be a positive, finite number of hours.
    pub fn has_valid_budget(&self) -> bool {
        self.initial_budget.is_finite() && self.initial_budget > 0.0
    }

    pub fn has_valid_range(&self) -> bool {
        self.start_date <= self.end_date
    }

    /// Number of calendar days in the inclusive range, 0 when reversed.
    pub fn day_count(&self) -> usize {
        if !self.has_valid_range() {
            return 0;
        }
        self.end_date.signed_duration_since(self.start_date).num_days() as usize + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// `Projekt  JATL 2` -> `Projekt_JATL_2_Burndown_Export.xlsx`
    pub fn export_file_name(&self) -> String {
        let mut stem = String::with_capacity(self.project_name.len());
        let mut in_space = false;
        for c in self.project_name.chars() {
            if c.is_whitespace() {
                if !in_space {
                    stem.push('_');
                }
                in_space = true;
            } else {
                stem.push(c);
                in_space = false;
            }
        }
        format!("{}_Burndown_Export.xlsx", stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = BurndownConfig::default();
        assert_eq!(config.project_name, "Projekt JATL");
        assert_eq!(config.start_date, d("2025-09-09"));
        assert_eq!(config.end_date, d("2026-01-15"));
        assert_eq!(config.initial_budget, 250.0);
        assert!(config.has_valid_range());
    }

    #[test]
    fn test_day_count() {
        let one = BurndownConfig::new("p", d("2025-01-01"), d("2025-01-01"), 10.0);
        assert_eq!(one.day_count(), 1);

        let leap = BurndownConfig::new("p", d("2024-02-28"), d("2024-03-01"), 10.0);
        assert_eq!(leap.day_count(), 3);

        let reversed = BurndownConfig::new("p", d("2025-01-02"), d("2025-01-01"), 10.0);
        assert!(!reversed.has_valid_range());
        assert_eq!(reversed.day_count(), 0);
    }

    #[test]
    fn test_export_file_name_collapses_whitespace() {
        let mut config = BurndownConfig::default();
        assert_eq!(config.export_file_name(), "Projekt_JATL_Burndown_Export.xlsx");

        config.project_name = "Q3  Team\tPlan".to_string();
        assert_eq!(config.export_file_name(), "Q3_Team_Plan_Burndown_Export.xlsx");
    }

    #[test]
    fn test_missing_budget_uses_default() {
        let json = r#"{"project_name":"X","start_date":"2025-01-01","end_date":"2025-01-31"}"#;
        let config: BurndownConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.initial_budget, DEFAULT_INITIAL_BUDGET);
    }

    #[test]
    fn test_budget_must_be_positive() {
        let mut config = BurndownConfig::default();
        assert!(config.has_valid_budget());

        for budget in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            config.initial_budget = budget;
            assert!(!config.has_valid_budget());
        }
    }
}
