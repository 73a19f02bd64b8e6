use burndown_core::{is_weekend, BurndownSummary, DerivedDayRecord, TeamMember};
use tabled::builder::Builder;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Style};

/// One row per day; member cells read `logged / remaining`.
pub fn render_series(series: &[DerivedDayRecord]) -> String {
    let mut builder = Builder::default();

    let mut header = vec!["Date".to_string(), "Day".to_string()];
    header.extend(TeamMember::ALL.iter().map(|m| format!("{} (log / rem)", m)));
    builder.push_record(header);

    for record in series {
        let mut row = vec![
            record.date.format("%Y-%m-%d").to_string(),
            record.date.format("%a").to_string(),
        ];
        for member in TeamMember::ALL {
            let day = record.member(member);
            let logged = if day.logged { format!("{:.1}", day.burned) } else { "-".to_string() };
            row.push(format!("{} / {:.1}", logged, day.remaining));
        }
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::modern());
    table.modify(Rows::first(), Color::FG_CYAN);

    // Dim weekend rows, they are normally empty.
    for (i, record) in series.iter().enumerate() {
        if is_weekend(record.date) {
            table.modify(Rows::one(i + 1), Color::FG_BRIGHT_BLACK);
        }
    }

    table.to_string()
}

pub fn render_summary(summary: &BurndownSummary) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Member", "Name", "Days logged", "Burned (h)", "Remaining (h)"]);

    for member in TeamMember::ALL {
        let s = summary.member(member);
        builder.push_record([
            member.name().to_string(),
            member.display_name().to_string(),
            s.days_logged.to_string(),
            format!("{:.1}", s.total_burned),
            format!("{:.1}", s.remaining),
        ]);
    }
    builder.push_record([
        "Team".to_string(),
        String::new(),
        String::new(),
        format!("{:.1}", summary.team_burned()),
        format!("{:.1} / {:.1}", summary.team_remaining(), summary.team_budget()),
    ]);

    let mut table = builder.build();
    table.with(Style::modern());
    table.modify(Rows::first(), Color::FG_CYAN);
    table.to_string()
}
