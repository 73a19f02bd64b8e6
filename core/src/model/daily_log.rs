use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::member::TeamMember;

/// Hours logged by every member on one day. A missing member means "no entry",
/// which is not the same as an entry of zero.
pub type DayEntries = BTreeMap<TeamMember, f64>;

/// One persisted row, keyed by `(date, member)`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LogRow {
    pub date: NaiveDate,
    pub member: TeamMember,
    pub hours: f64,
}

/// Snapshot of all logged effort, indexed by day then member.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LogStore {
    days: BTreeMap<NaiveDate, DayEntries>,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows<I: IntoIterator<Item = LogRow>>(rows: I) -> Self {
        let mut store = Self::new();
        for row in rows {
            store.set(row.date, row.member, row.hours);
        }
        store
    }

    pub fn get(&self, date: NaiveDate, member: TeamMember) -> Option<f64> {
        self.days.get(&date).and_then(|d| d.get(&member)).copied()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayEntries> {
        self.days.get(&date)
    }

    /// Upsert: creates the day if absent and overwrites the member's prior value.
    pub fn set(&mut self, date: NaiveDate, member: TeamMember, hours: f64) {
        self.days.entry(date).or_default().insert(member, hours);
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(|d| d.is_empty())
    }

    pub fn len(&self) -> usize {
        self.days.values().map(|d| d.len()).sum()
    }

    pub fn rows(&self) -> Vec<LogRow> {
        self.days
            .iter()
            .flat_map(|(date, entries)| {
                entries.iter().map(move |(member, hours)| LogRow {
                    date: *date,
                    member: *member,
                    hours: *hours,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_set_overwrites_prior_value() {
        let mut store = LogStore::new();
        store.set(d("2025-01-01"), TeamMember::Joanna, 30.0);
        store.set(d("2025-01-01"), TeamMember::Joanna, 50.0);
        store.set(d("2025-01-01"), TeamMember::Leman, 4.0);

        assert_eq!(store.get(d("2025-01-01"), TeamMember::Joanna), Some(50.0));
        assert_eq!(store.get(d("2025-01-01"), TeamMember::Leman), Some(4.0));
        assert_eq!(store.get(d("2025-01-01"), TeamMember::Tatiana), None);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_zero_is_an_entry() {
        let mut store = LogStore::new();
        store.set(d("2025-01-02"), TeamMember::Anastasia, 0.0);
        assert_eq!(store.get(d("2025-01-02"), TeamMember::Anastasia), Some(0.0));
        assert!(!store.is_empty());
    }

    #[test]
    fn test_rows_are_date_ordered() {
        let store = LogStore::from_rows(vec![
            LogRow { date: d("2025-01-03"), member: TeamMember::Tatiana, hours: 2.0 },
            LogRow { date: d("2025-01-01"), member: TeamMember::Joanna, hours: 1.0 },
        ]);
        let rows = store.rows();
        assert_eq!(rows[0].date, d("2025-01-01"));
        assert_eq!(rows[1].date, d("2025-01-03"));
    }

    #[test]
    fn test_clear() {
        let mut store = LogStore::new();
        store.set(d("2025-01-01"), TeamMember::Joanna, 8.0);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.day(d("2025-01-01")), None);
    }
}
