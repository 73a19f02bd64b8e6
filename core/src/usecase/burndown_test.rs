
#[cfg(test)]
mod tests {
    use crate::model::config::BurndownConfig;
    use crate::model::daily_log::LogStore;
    use crate::model::member::TeamMember;
    use crate::usecase::burndown::{derive_series, summarize};
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn config(start: &str, end: &str, budget: f64) -> BurndownConfig {
        BurndownConfig::new("Test Project", d(start), d(end), budget)
    }

    #[test]
    fn test_single_day_without_logs() {
        let series = derive_series(&config("2025-01-01", "2025-01-01", 250.0), &LogStore::new());

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, d("2025-01-01"));
        assert_eq!(series[0].label, "01.01");
        for member in TeamMember::ALL {
            let day = series[0].member(member);
            assert_eq!(day.burned, 0.0);
            assert_eq!(day.remaining, 250.0);
            assert!(!day.logged);
        }
    }

    #[test]
    fn test_remaining_carries_forward_over_gaps() {
        let mut logs = LogStore::new();
        logs.set(d("2025-01-01"), TeamMember::Joanna, 10.0);

        let series = derive_series(&config("2025-01-01", "2025-01-02", 100.0), &logs);

        assert_eq!(series.len(), 2);
        let day1 = series[0].member(TeamMember::Joanna);
        assert_eq!((day1.burned, day1.remaining), (10.0, 90.0));
        let day2 = series[1].member(TeamMember::Joanna);
        assert_eq!((day2.burned, day2.remaining), (0.0, 90.0));
        assert!(!day2.logged);
    }

    #[test]
    fn test_editing_past_day_shifts_downstream_only_for_that_member() {
        let cfg = config("2025-01-01", "2025-01-05", 250.0);
        let mut logs = LogStore::new();
        logs.set(d("2025-01-01"), TeamMember::Tatiana, 30.0);
        logs.set(d("2025-01-03"), TeamMember::Tatiana, 5.0);
        logs.set(d("2025-01-02"), TeamMember::Leman, 8.0);

        let before = derive_series(&cfg, &logs);
        logs.set(d("2025-01-01"), TeamMember::Tatiana, 50.0);
        let after = derive_series(&cfg, &logs);

        for (b, a) in before.iter().zip(after.iter()) {
            let shift = a.member(TeamMember::Tatiana).remaining - b.member(TeamMember::Tatiana).remaining;
            assert_eq!(shift, -20.0);
            for member in [TeamMember::Joanna, TeamMember::Leman, TeamMember::Anastasia] {
                assert_eq!(a.member(member), b.member(member));
            }
        }
        assert_eq!(after[0].member(TeamMember::Tatiana).burned, 50.0);
        assert_eq!(after[4].member(TeamMember::Tatiana).remaining, 195.0);
    }

    #[test]
    fn test_overspend_floors_at_zero() {
        let mut logs = LogStore::new();
        logs.set(d("2025-01-01"), TeamMember::Anastasia, 200.0);
        logs.set(d("2025-01-02"), TeamMember::Anastasia, 100.0);
        logs.set(d("2025-01-03"), TeamMember::Anastasia, 10.0);

        let series = derive_series(&config("2025-01-01", "2025-01-03", 250.0), &logs);

        assert_eq!(series[0].member(TeamMember::Anastasia).remaining, 50.0);
        assert_eq!(series[1].member(TeamMember::Anastasia).remaining, 0.0);
        assert_eq!(series[2].member(TeamMember::Anastasia).remaining, 0.0);
        assert_eq!(series[2].member(TeamMember::Anastasia).burned, 10.0);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let mut logs = LogStore::new();
        logs.set(d("2025-01-01"), TeamMember::Joanna, 4.0);

        let series = derive_series(&config("2025-01-10", "2025-01-01", 250.0), &logs);
        assert!(series.is_empty());
    }

    #[test]
    fn test_length_and_monotonic_properties() {
        let cfg = config("2024-12-20", "2025-02-10", 120.0);
        let mut logs = LogStore::new();
        let mut date = cfg.start_date;
        let mut i = 0;
        while date <= cfg.end_date {
            let member = TeamMember::ALL[i % TeamMember::COUNT];
            logs.set(date, member, (i % 9) as f64);
            date = date.succ_opt().unwrap();
            i += 1;
        }
        // Entries outside the range never count.
        logs.set(d("2024-12-01"), TeamMember::Joanna, 99.0);

        let series = derive_series(&cfg, &logs);
        assert_eq!(series.len(), cfg.day_count());
        assert_eq!(series.len(), 53);

        for member in TeamMember::ALL {
            let mut prev = cfg.initial_budget;
            for record in &series {
                let day = record.member(member);
                assert!(day.remaining <= prev);
                assert!(day.remaining >= 0.0);
                assert_eq!(day.burned, logs.get(record.date, member).unwrap_or(0.0));
                prev = day.remaining;
            }
        }
    }

    #[test]
    fn test_days_outside_store_are_tolerated() {
        let mut logs = LogStore::new();
        logs.set(d("2030-06-01"), TeamMember::Leman, 3.0);

        let series = derive_series(&config("2025-03-01", "2025-03-03", 40.0), &logs);
        assert!(series.iter().all(|r| r.total_burned() == 0.0));
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let cfg = config("2025-01-01", "2025-01-10", 80.0);
        let mut logs = LogStore::new();
        logs.set(d("2025-01-04"), TeamMember::Joanna, 6.5);
        logs.set(d("2025-01-04"), TeamMember::Anastasia, 2.0);

        assert_eq!(derive_series(&cfg, &logs), derive_series(&cfg, &logs));
    }

    #[test]
    fn test_summarize() {
        let cfg = config("2025-01-01", "2025-01-03", 100.0);
        let mut logs = LogStore::new();
        logs.set(d("2025-01-01"), TeamMember::Joanna, 10.0);
        logs.set(d("2025-01-03"), TeamMember::Joanna, 15.0);
        logs.set(d("2025-01-02"), TeamMember::Leman, 0.0);

        let series = derive_series(&cfg, &logs);
        let summary = summarize(&cfg, &series);

        let joanna = summary.member(TeamMember::Joanna);
        assert_eq!(joanna.total_burned, 25.0);
        assert_eq!(joanna.remaining, 75.0);
        assert_eq!(joanna.days_logged, 2);
        assert_eq!(summary.member(TeamMember::Leman).days_logged, 1);

        assert_eq!(summary.team_budget(), 400.0);
        assert_eq!(summary.team_burned(), 25.0);
        assert_eq!(summary.team_remaining(), 375.0);
        assert!((summary.consumed_ratio() - 0.0625).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_empty_series() {
        let cfg = config("2025-01-05", "2025-01-01", 100.0);
        let summary = summarize(&cfg, &[]);
        assert_eq!(summary.team_remaining(), 400.0);
        assert_eq!(summary.consumed_ratio(), 0.0);
    }
}
