use burndown_core::service::auth_service::PIN_LENGTH;
use burndown_core::{is_weekend, TeamMember};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Block, BorderType, Borders, Cell, Chart, Dataset, Gauge, GraphType, Paragraph, Row,
        Table, Wrap,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode};

const MUTED: Color = Color::DarkGray;
const PRIMARY: Color = Color::Cyan;
const EMPTY_RANGE: &str = "Please choose a valid date range.";

fn member_color(member: TeamMember) -> Color {
    match member {
        TeamMember::Joanna => Color::Blue,
        TeamMember::Tatiana => Color::Green,
        TeamMember::Leman => Color::Magenta,
        TeamMember::Anastasia => Color::Red,
    }
}

fn rounded(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(MUTED))
}

pub fn draw(f: &mut Frame, app: &mut App) {
    if let InputMode::Login = app.input_mode {
        draw_login(f, app);
        return;
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Header
            Constraint::Percentage(45), // Chart + Summary
            Constraint::Min(6),         // Grid
            Constraint::Length(3),      // Input / Status
            Constraint::Length(1),      // Footer
        ])
        .split(f.area());

    draw_header(f, app, main_chunks[0]);

    let top_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(main_chunks[1]);

    draw_chart(f, app, top_chunks[0]);
    draw_summary(f, app, top_chunks[1]);
    draw_grid(f, app, main_chunks[2]);
    draw_input(f, app, main_chunks[3]);

    let help = match app.input_mode {
        InputMode::Normal => "j/k: Day | h/l: Member | Enter: Edit | f: Filter | c: Config | x/X: Export | r: Reload | D: Reset | L: Logout | q: Quit",
        InputMode::Editing => "Enter: Save | Esc: Cancel",
        InputMode::Configuring => "project:<name> start:<date> end:<date> budget:<hours> | Enter: Save | Esc: Cancel",
        InputMode::ConfirmReset => "y: Delete everything | any other key: Cancel",
        InputMode::Login => "",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(MUTED))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[4]);
}

fn draw_login(f: &mut Frame, app: &App) {
    let area = centered(f.area(), 40, 9);

    let masked: String = "●".repeat(app.input.chars().count())
        + &"·".repeat(PIN_LENGTH.saturating_sub(app.input.chars().count()));
    let mut lines = vec![
        Line::from(Span::styled("Welcome", Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled("Enter the team PIN", Style::default().fg(MUTED))),
        Line::from(Span::styled(masked, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
    ];
    if app.login_failed {
        lines.push(Line::from(Span::styled("Wrong PIN, try again.", Style::default().fg(Color::Red))));
    } else if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(status.as_str(), Style::default().fg(Color::Red))));
    }

    let login = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(rounded(" Burndown "));
    f.render_widget(login, area);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let config = app.state.config();
    let filter = app
        .member_filter
        .map(|m| format!("  [{}]", m))
        .unwrap_or_default();

    let header = Paragraph::new(Line::from(vec![
        Span::styled(config.project_name.clone(), Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(
                "  {} .. {}  budget {:.0}h per member",
                config.start_date.format("%d.%m.%Y"),
                config.end_date.format("%d.%m.%Y"),
                config.initial_budget
            ),
            Style::default().fg(MUTED),
        ),
        Span::styled(filter, Style::default().fg(Color::Yellow)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, area);
}

fn draw_chart(f: &mut Frame, app: &App, area: Rect) {
    let block = rounded(" Remaining hours ");
    if app.series.is_empty() {
        f.render_widget(
            Paragraph::new(EMPTY_RANGE).alignment(Alignment::Center).block(block),
            area,
        );
        return;
    }

    let members = app.visible_members();
    let points: Vec<Vec<(f64, f64)>> = members
        .iter()
        .map(|&m| {
            app.series
                .iter()
                .enumerate()
                .map(|(i, r)| (i as f64, r.member(m).remaining))
                .collect()
        })
        .collect();

    let cursor: Vec<(f64, f64)> = app
        .table_state
        .selected()
        .and_then(|i| app.series.get(i).map(|r| (i as f64, r.member(app.current_member()).remaining)))
        .into_iter()
        .collect();

    let mut datasets: Vec<Dataset> = members
        .iter()
        .zip(points.iter())
        .map(|(&m, data)| {
            Dataset::default()
                .name(m.name())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(member_color(m)))
                .data(data)
        })
        .collect();
    datasets.push(
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .data(&cursor),
    );

    let last = app.series.len() - 1;
    let x_labels = vec![
        Span::raw(app.series[0].label.clone()),
        Span::raw(app.series[last / 2].label.clone()),
        Span::raw(app.series[last].label.clone()),
    ];
    let budget = app.state.config().initial_budget.max(1.0);
    let y_labels = vec![
        Span::raw("0"),
        Span::raw(format!("{:.0}", budget / 2.0)),
        Span::raw(format!("{:.0}", budget)),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(MUTED))
                .bounds([0.0, (last as f64).max(1.0)])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(MUTED))
                .bounds([0.0, budget])
                .labels(y_labels),
        );
    f.render_widget(chart, area);
}

fn draw_summary(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3)])
        .split(area);

    let summary = &app.summary;
    let mut lines = vec![Line::from(Span::styled("Overview", Style::default().add_modifier(Modifier::BOLD)))];
    for member in app.visible_members() {
        let s = summary.member(member);
        lines.push(Line::from(vec![
            Span::styled(format!("{:<10}", member.name()), Style::default().fg(member_color(member))),
            Span::styled(format!("{:>6.1}h", s.remaining), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  -{:.1}h", s.total_burned), Style::default().fg(MUTED)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Team      ", Style::default().fg(MUTED)),
        Span::raw(format!("{:.1} / {:.1}h", summary.team_remaining(), summary.team_budget())),
    ]));

    let info = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(rounded(" Summary "));
    f.render_widget(info, chunks[0]);

    let ratio = summary.consumed_ratio();
    let gauge = Gauge::default()
        .block(rounded(" Budget used "))
        .gauge_style(Style::default().fg(if ratio > 0.9 { Color::Red } else { Color::Green }))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    f.render_widget(gauge, chunks[1]);
}

fn draw_grid(f: &mut Frame, app: &mut App, area: Rect) {
    if app.series.is_empty() {
        f.render_widget(
            Paragraph::new(EMPTY_RANGE).alignment(Alignment::Center).block(rounded(" Hours ")),
            area,
        );
        return;
    }

    let members = app.visible_members();
    let selected_row = app.table_state.selected();
    let current = app.current_member();
    let today = chrono::Local::now().date_naive();

    let rows: Vec<Row> = app
        .series
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let weekend = is_weekend(record.date);
            let date_style = if weekend {
                Style::default().fg(MUTED)
            } else if record.date == today {
                Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let mut cells = vec![Cell::from(Span::styled(
                format!("{} {}", record.date.format("%d. %b"), record.date.format("%a")),
                date_style,
            ))];
            for &m in &members {
                let day = record.member(m);
                let text = if day.logged { format!("{:.1}", day.burned) } else { "-".to_string() };
                let mut style = if weekend { Style::default().fg(MUTED) } else { Style::default() };
                if selected_row == Some(i) && m == current {
                    style = style.fg(Color::Black).bg(member_color(m));
                }
                cells.push(Cell::from(Span::styled(text, style)));
            }
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(12)];
    widths.extend(members.iter().map(|_| Constraint::Length(11)));

    let mut header = vec![Cell::from("Date")];
    header.extend(members.iter().map(|&m| {
        Cell::from(Span::styled(m.name(), Style::default().fg(member_color(m))))
    }));

    let title = if app.member_filter.is_some() { " Entry " } else { " Hours logged " };
    let table = Table::new(rows, widths)
        .header(Row::new(header).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(rounded(title))
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, text) = match app.input_mode {
        InputMode::Editing => {
            let target = app
                .selected_date()
                .map(|d| format!(" {} on {} (hours) ", app.current_member(), d.format("%d.%m.%Y")))
                .unwrap_or_default();
            (target, app.input.clone())
        }
        InputMode::Configuring => (" Configuration ".to_string(), app.input.clone()),
        InputMode::ConfirmReset => (
            " Reset ".to_string(),
            "Delete ALL entries for everyone? (y/N)".to_string(),
        ),
        InputMode::Normal | InputMode::Login => {
            (" Status ".to_string(), app.status.clone().unwrap_or_default())
        }
    };

    let style = match app.input_mode {
        InputMode::ConfirmReset => Style::default().fg(Color::Red),
        InputMode::Editing | InputMode::Configuring => Style::default().fg(Color::Yellow),
        _ => Style::default().fg(MUTED),
    };
    let input = Paragraph::new(text).style(style).block(rounded(&title));
    f.render_widget(input, area);

    if let InputMode::Editing | InputMode::Configuring = app.input_mode {
        let prefix: String = app.input.chars().take(app.cursor_position).collect();
        let x = area.x + 1 + prefix.width() as u16;
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
