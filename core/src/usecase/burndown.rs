use crate::model::config::BurndownConfig;
use crate::model::daily_log::LogStore;
use crate::model::member::TeamMember;
use crate::model::series::{BurndownSummary, DerivedDayRecord, MemberDay, MemberSummary};

/// Turns a sparse log snapshot into one record per calendar day of the
/// configured range, oldest first.
///
/// Every member starts from the full `initial_budget` and burns down
/// independently. `remaining` is always recomputed from the complete prefix of
/// the log, so editing a past day shifts every later value for that member.
/// A reversed range yields an empty series.
pub fn derive_series(config: &BurndownConfig, logs: &LogStore) -> Vec<DerivedDayRecord> {
    if !config.has_valid_range() {
        return Vec::new();
    }

    let mut running = [0.0_f64; TeamMember::COUNT];
    let mut series = Vec::with_capacity(config.day_count());

    for date in config.start_date.iter_days().take_while(|d| *d <= config.end_date) {
        let entries = logs.day(date);

        let members = TeamMember::ALL
            .iter()
            .map(|&member| {
                let logged = entries.and_then(|e| e.get(&member)).copied();
                let burned = logged.unwrap_or(0.0);
                running[member.index()] += burned;

                MemberDay {
                    member,
                    burned,
                    remaining: (config.initial_budget - running[member.index()]).max(0.0),
                    logged: logged.is_some(),
                }
            })
            .collect();

        series.push(DerivedDayRecord {
            date,
            label: date.format("%d.%m").to_string(),
            members,
        });
    }

    series
}

/// Per-member totals over a derived series.
pub fn summarize(config: &BurndownConfig, series: &[DerivedDayRecord]) -> BurndownSummary {
    let members = TeamMember::ALL
        .iter()
        .map(|&member| {
            let days = series.iter().map(|r| r.member(member));
            let (total_burned, days_logged) = days.fold((0.0, 0), |(sum, count), day| {
                (sum + day.burned, count + usize::from(day.logged))
            });
            let remaining = series
                .last()
                .map(|r| r.member(member).remaining)
                .unwrap_or(config.initial_budget);

            MemberSummary {
                member,
                total_burned,
                remaining,
                days_logged,
            }
        })
        .collect();

    BurndownSummary {
        budget_per_member: config.initial_budget,
        members,
    }
}
