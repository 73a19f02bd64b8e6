use std::time::SystemTime;

use anyhow::Result;
use chrono::NaiveDate;

use crate::model::daily_log::LogStore;
use crate::model::member::TeamMember;

/// Keyed storage for logged effort, addressed by `(date, member)`.
pub trait LogRepository {
    /// Bulk read of every entry.
    fn load(&self) -> Result<LogStore>;
    /// Last write wins on the same `(date, member)`.
    fn upsert(&self, date: NaiveDate, member: TeamMember, hours: f64) -> Result<()>;
    fn clear(&self) -> Result<()>;

    /// Token that changes whenever the stored data changes, if the backend can
    /// tell. Callers compare tokens to decide when to re-fetch.
    fn revision(&self) -> Option<SystemTime> {
        None
    }
}
