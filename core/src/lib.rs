pub mod input;
pub mod logging;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use input::{expand_key, parse_args, parse_hours, parse_log_entries, LogEntries, ParsedInput};
pub use model::config::BurndownConfig;
pub use model::daily_log::{LogRow, LogStore};
pub use model::member::TeamMember;
pub use model::series::{BurndownSummary, DerivedDayRecord, MemberDay, MemberSummary};
pub use repository::{FileConfigRepository, FileLogRepository, FileSessionRepository, LogRepository};
pub use service::auth_service::AuthService;
pub use service::export_service::{build_workbook, export_header, export_rows, export_to_dir, ExportRow, ExportValue};
pub use service::state::{Snapshot, StateStore};
pub use time::{is_weekend, parse_human_date, parse_human_date_from};
pub use usecase::burndown::{derive_series, summarize};
