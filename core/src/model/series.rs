use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::member::TeamMember;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MemberDay {
    pub member: TeamMember,
    /// Hours logged that day, 0 when there is no entry.
    pub burned: f64,
    /// Budget left after this day, floored at 0.
    pub remaining: f64,
    /// Whether an entry exists for this (day, member).
    pub logged: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DerivedDayRecord {
    pub date: NaiveDate,
    /// Short axis label, `dd.MM`.
    pub label: String,
    /// One entry per member, in `TeamMember::ALL` order.
    pub members: Vec<MemberDay>,
}

impl DerivedDayRecord {
    pub fn member(&self, member: TeamMember) -> &MemberDay {
        &self.members[member.index()]
    }

    pub fn total_burned(&self) -> f64 {
        self.members.iter().map(|m| m.burned).sum()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MemberSummary {
    pub member: TeamMember,
    pub total_burned: f64,
    pub remaining: f64,
    pub days_logged: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BurndownSummary {
    pub budget_per_member: f64,
    pub members: Vec<MemberSummary>,
}

impl BurndownSummary {
    pub fn member(&self, member: TeamMember) -> &MemberSummary {
        &self.members[member.index()]
    }

    pub fn team_budget(&self) -> f64 {
        self.budget_per_member * self.members.len() as f64
    }

    pub fn team_burned(&self) -> f64 {
        self.members.iter().map(|m| m.total_burned).sum()
    }

    pub fn team_remaining(&self) -> f64 {
        self.members.iter().map(|m| m.remaining).sum()
    }

    /// Share of the team budget already consumed, in `[0, 1]`.
    pub fn consumed_ratio(&self) -> f64 {
        let budget = self.team_budget();
        if budget <= 0.0 {
            return 0.0;
        }
        (1.0 - self.team_remaining() / budget).clamp(0.0, 1.0)
    }
}
