pub mod config;
pub mod daily_log;
pub mod member;
pub mod series;
