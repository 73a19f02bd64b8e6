mod table;
mod tui;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use burndown_core::{
    export_to_dir, logging, parse_human_date, parse_log_entries, repository, AuthService,
    ExportValue, FileConfigRepository, FileLogRepository, FileSessionRepository, StateStore,
};
use clap::Parser;
use log::warn;

#[derive(Parser)]
#[command(name = "burndown")]
#[command(about = "Team capacity burndown tracker", long_about = None)]
struct Cli {
    /// Data directory (defaults to ~/.burndown)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Unlock the dashboard with the team PIN
    Login { pin: String },
    /// Lock the dashboard again
    Logout,
    /// Show or change the project configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Log hours (usage: log yesterday jo:8 tat:6.5)
    Log {
        /// Day to log (today, yesterday, -2d, fri, 2025-01-31, 31.01.2025)
        date: String,
        /// Entries as member:hours, members may be abbreviated
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        entries: Vec<String>,
    },
    /// Print the burndown series
    Show {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print per-member totals
    Summary,
    /// Export the series as an .xlsx workbook
    Export {
        /// Export remaining hours instead of logged hours
        #[arg(long)]
        remaining: bool,
        /// Output directory (defaults to the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Delete ALL logged hours
    Reset {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Open the Terminal User Interface
    Tui,
}

#[derive(clap::Subcommand)]
enum ConfigAction {
    Show,
    Set {
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        budget: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = repository::data_dir(cli.data_dir)?;

    if let Err(e) = logging::init_logging(&logging::level_from_env(), &data_dir.join("logs")) {
        eprintln!("Warning: file logging disabled: {:#}", e);
    }

    let auth = AuthService::from_env(FileSessionRepository::new(Some(data_dir.clone()))?)?;
    let config_repo = FileConfigRepository::new(Some(data_dir.clone()))?;
    let log_repo = FileLogRepository::new(Some(data_dir))?;

    let command = match cli.command {
        Some(Commands::Login { pin }) => {
            if auth.login(&pin)? {
                println!("Logged in.");
            } else {
                println!("Wrong PIN.");
            }
            return Ok(());
        }
        Some(Commands::Tui) | None => {
            // The TUI shows its own PIN prompt.
            return tui::run(auth, config_repo, log_repo);
        }
        Some(command) => command,
    };

    if !auth.is_authenticated() {
        println!("Locked. Run `burndown login <PIN>` first.");
        return Ok(());
    }

    let mut state = StateStore::load(log_repo, config_repo.load()?)?;

    match command {
        Commands::Logout => {
            auth.logout()?;
            println!("Logged out.");
        }
        Commands::Config { action: ConfigAction::Show } => {
            let config = state.config();
            println!("Project:  {}", config.project_name);
            println!("Start:    {}", config.start_date);
            println!("End:      {}", config.end_date);
            println!("Budget:   {:.1}h per member", config.initial_budget);
            println!("Export:   {}", config.export_file_name());
        }
        Commands::Config { action: ConfigAction::Set { project, start, end, budget } } => {
            let mut config = state.config().clone();
            if let Some(p) = project {
                config.project_name = p;
            }
            if let Some(s) = start {
                config.start_date = parse_human_date(&s)?;
            }
            if let Some(e) = end {
                config.end_date = parse_human_date(&e)?;
            }
            if let Some(b) = budget {
                config.initial_budget = b;
            }
            state.set_config(config)?;
            config_repo.save(state.config())?;
            println!("Configuration saved.");
            if !state.config().has_valid_range() {
                println!("Warning: the end date is before the start date, nothing will be shown.");
            }
        }
        Commands::Log { date, entries } => {
            let date = parse_human_date(&date)?;
            if entries.is_empty() {
                return Err(anyhow!("Nothing to log. Usage: log <date> member:hours ..."));
            }
            if !state.config().contains(date) {
                println!("Warning: {} is outside the configured range.", date);
            }

            let parsed = parse_log_entries(&entries);
            if !parsed.ignored.is_empty() {
                println!("Warning: ignoring '{}'", parsed.ignored);
            }
            for message in &parsed.rejected {
                warn!("event=log_input module=cli status=rejected reason={:?}", message);
                println!("Warning: {}", message);
            }
            for (member, hours) in parsed.entries {
                state.update_log(date, member, hours)?;
                println!("Logged {:.1}h for {} on {}", hours, member, date);
            }
        }
        Commands::Show { json } => {
            let series = state.series();
            if json {
                println!("{}", serde_json::to_string_pretty(&series)?);
            } else if series.is_empty() {
                println!("Please choose a valid date range.");
            } else {
                println!("{}", table::render_series(&series));
            }
        }
        Commands::Summary => {
            let config = state.config();
            println!(
                "{} ({} .. {}), {:.1}h per member",
                config.project_name, config.start_date, config.end_date, config.initial_budget
            );
            println!("{}", table::render_summary(&state.summary()));
        }
        Commands::Export { remaining, out } => {
            let value = if remaining { ExportValue::Remaining } else { ExportValue::Logged };
            let out_dir = match out {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let path = export_to_dir(state.config(), &state.series(), value, &out_dir)?;
            println!("Exported to {}", path.display());
        }
        Commands::Reset { yes } => {
            if !yes {
                println!("This deletes ALL logged hours for everyone. Re-run with --yes to confirm.");
                return Ok(());
            }
            state.reset()?;
            println!("All entries deleted.");
        }
        Commands::Login { .. } | Commands::Tui => {}
    }
    Ok(())
}
