use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use log::info;
use rust_xlsxwriter::{Chart, ChartType, Format, Workbook};

use crate::model::config::BurndownConfig;
use crate::model::member::TeamMember;
use crate::model::series::DerivedDayRecord;

pub const SHEET_NAME: &str = "Burndown Data";
const DATE_COLUMN_WIDTH: f64 = 12.0;
const MEMBER_COLUMN_WIDTH: f64 = 10.0;

/// Which figure goes into the member columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportValue {
    /// The logged hours, empty cell when nothing was logged.
    #[default]
    Logged,
    /// The derived remaining budget.
    Remaining,
}

/// One worksheet row: the `dd.mm.yyyy` date and a cell per member, in
/// [`TeamMember::ALL`] order. `None` leaves the cell empty.
pub type ExportRow = (String, [Option<f64>; TeamMember::COUNT]);

/// Header row of the data sheet.
pub fn export_header() -> Vec<&'static str> {
    let mut header = vec!["Date"];
    header.extend(TeamMember::ALL.iter().map(|member| member.name()));
    header
}

/// Cell values of the data sheet, one row per day of the series.
pub fn export_rows(series: &[DerivedDayRecord], value: ExportValue) -> Vec<ExportRow> {
    series
        .iter()
        .map(|record| {
            let mut cells = [None; TeamMember::COUNT];
            for member in TeamMember::ALL {
                let day = record.member(member);
                cells[member.index()] = match value {
                    ExportValue::Logged if day.logged => Some(day.burned),
                    ExportValue::Logged => None,
                    ExportValue::Remaining => Some(day.remaining),
                };
            }
            (record.date.format("%d.%m.%Y").to_string(), cells)
        })
        .collect()
}

/// Builds the workbook in memory: one header row, one row per day and a chart
/// of the exported columns next to the table.
pub fn build_workbook(
    config: &BurndownConfig,
    series: &[DerivedDayRecord],
    value: ExportValue,
) -> Result<Vec<u8>> {
    if series.is_empty() {
        return Err(anyhow!("Nothing to export: please choose a valid date range"));
    }

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let last_row = series.len() as u32;

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, title) in export_header().into_iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, title, &header)?;
        let width = if col == 0 { DATE_COLUMN_WIDTH } else { MEMBER_COLUMN_WIDTH };
        worksheet.set_column_width(col, width)?;
    }

    for (i, (date, cells)) in export_rows(series, value).into_iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.write_string(row, 0, date)?;

        for member in TeamMember::ALL {
            if let Some(hours) = cells[member.index()] {
                worksheet.write_number(row, member_column(member), hours)?;
            }
        }
    }

    let mut chart = match value {
        ExportValue::Logged => Chart::new(ChartType::ColumnStacked),
        ExportValue::Remaining => Chart::new(ChartType::Line),
    };
    for member in TeamMember::ALL {
        let col = member_column(member);
        chart
            .add_series()
            .set_name(member.name())
            .set_categories((SHEET_NAME, 1, 0, last_row, 0))
            .set_values((SHEET_NAME, 1, col, last_row, col));
    }
    chart.title().set_name(config.project_name.as_str());
    chart.x_axis().set_name("Date");
    chart.y_axis().set_name(match value {
        ExportValue::Logged => "Logged hours (h)",
        ExportValue::Remaining => "Remaining hours (h)",
    });
    worksheet.insert_chart(1, member_column(TeamMember::Anastasia) + 2, &chart)?;

    let buffer = workbook.save_to_buffer()?;
    Ok(buffer)
}

/// Writes the export into `out_dir` under the project's export file name.
pub fn export_to_dir(
    config: &BurndownConfig,
    series: &[DerivedDayRecord],
    value: ExportValue,
    out_dir: &Path,
) -> Result<PathBuf> {
    let buffer = build_workbook(config, series, value)?;
    let path = out_dir.join(config.export_file_name());
    std::fs::write(&path, buffer)?;
    info!(
        "event=export module=export status=ok rows={} path={}",
        series.len(),
        path.display()
    );
    Ok(path)
}

fn member_column(member: TeamMember) -> u16 {
    member.index() as u16 + 1
}
