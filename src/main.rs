//! ClassBank - maintenance tool for the ClassBank ledger workbook.
//!
//! With no subcommand the interactive menu opens; each subcommand runs one
//! operation and prints its report.

mod logging;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use classbank_core::config::{self, Settings};
use classbank_core::menu::{Menu, on_open};
use classbank_core::ops::{Operation, ReportSink, run_operation};
use classbank_core::schema::HeaderPalette;
use classbank_core::storage;
use logging::LogTarget;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "classbank")]
#[command(about = "Verify, report on and provision ClassBank workbook sheets")]
#[command(version)]
struct Cli {
    /// Workbook id (directory name under the data directory)
    #[arg(long, short = 'w', env = "CLASSBANK_WORKBOOK", global = true)]
    workbook: Option<String>,

    /// Directory holding workbooks
    #[arg(long, env = "CLASSBANK_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default: platform config dir/classbank/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Check every expected sheet exists with the expected header row
    Verify,
    /// Count Deposit/Withdraw/other Type values on the Transactions sheet
    Scan,
    /// Count data rows on each record-bearing sheet
    Report,
    /// Create missing sheets with a styled header row
    Provision,
    /// Create an empty workbook
    Init,
    /// List the menu installed when a workbook is opened
    Menu,
}

impl Command {
    fn operation(self) -> Option<Operation> {
        match self {
            Command::Verify => Some(Operation::VerifyStructure),
            Command::Scan => Some(Operation::ScanMixedData),
            Command::Report => Some(Operation::ReportData),
            Command::Provision => Some(Operation::CreateMissingSheets),
            Command::Init | Command::Menu => None,
        }
    }
}

/// Prints reports to stdout.
struct StdoutSink;

impl ReportSink for StdoutSink {
    fn alert(&mut self, _title: &str, text: &str) {
        println!("{}", text);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = config::load_settings(cli.config.as_deref())
        .context("failed to load configuration")?;
    let workbook_id = settings.workbook_id(cli.workbook.as_deref())?;
    let data_dir = settings.data_dir(cli.data_dir.as_deref())?;
    let palette = settings.header_palette()?;
    let filter = log_filter(&cli, &settings);

    let Some(command) = cli.command else {
        return run_menu(&data_dir, &workbook_id, palette, filter);
    };

    logging::init(filter, LogTarget::Stderr)?;

    if let Some(op) = command.operation() {
        return run_command(op, &data_dir, &workbook_id, &palette);
    }

    match command {
        Command::Init => {
            storage::init_workbook(&data_dir, &workbook_id)?;
            let dir = storage::workbook_dir(&data_dir, &workbook_id)?;
            println!("Created workbook '{}' at {}", workbook_id, dir.display());
        }
        Command::Menu => {
            let mut menus: Vec<Menu> = Vec::new();
            on_open(&mut menus);
            for menu in &menus {
                println!("{}", menu.title);
                for (idx, item) in menu.items.iter().enumerate() {
                    println!("  {}. {}  ({})", idx + 1, item.label, item.function_name);
                }
            }
        }
        _ => {}
    }
    Ok(())
}

fn log_filter<'a>(cli: &Cli, settings: &'a Settings) -> &'a str {
    if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        settings.log_level()
    }
}

/// Open the workbook, run one operation and save if it changed anything.
fn run_command(
    op: Operation,
    data_dir: &Path,
    workbook_id: &str,
    palette: &HeaderPalette,
) -> anyhow::Result<()> {
    let mut workbook = storage::open_workbook(data_dir, workbook_id)
        .with_context(|| format!("failed to open workbook '{}'", workbook_id))?;

    let outcome = run_operation(op, &mut workbook, palette, &mut StdoutSink)?;
    if outcome.changed {
        let dir = storage::save_workbook(data_dir, &workbook)
            .with_context(|| format!("failed to save workbook '{}'", workbook_id))?;
        tracing::info!(path = %dir.display(), "saved workbook");
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn run_menu(
    data_dir: &Path,
    workbook_id: &str,
    palette: HeaderPalette,
    filter: &str,
) -> anyhow::Result<()> {
    logging::init(filter, LogTarget::File(data_dir.join(logging::LOG_FILE)))?;
    let result = tui::App::open(data_dir.to_path_buf(), workbook_id, palette)
        .with_context(|| format!("failed to open workbook '{}'", workbook_id))
        .and_then(|mut app| tui::run(&mut app).context("terminal UI failed"));
    // stderr only gets the final message; keep the log file complete.
    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    result
}

#[cfg(not(feature = "tui"))]
fn run_menu(
    _data_dir: &Path,
    _workbook_id: &str,
    _palette: HeaderPalette,
    _filter: &str,
) -> anyhow::Result<()> {
    anyhow::bail!("the interactive menu needs the `tui` feature; run a subcommand instead (see --help)")
}
