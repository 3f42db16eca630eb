use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use go_dutch::cli::{
    handle_expense_command, handle_export_command, handle_ledger_command, ExpenseCommands,
    ExportArgs, LedgerCommands,
};
use go_dutch::config::{paths::DutchPaths, settings::Settings};
use go_dutch::services::SplitMode;
use go_dutch::storage::Storage;

/// Environment variable holding the log filter (e.g. `debug`, `go_dutch=info`)
const LOG_ENV: &str = "GO_DUTCH_LOG";

#[derive(Parser)]
#[command(
    name = "godutch",
    version,
    about = "Family expense sharing and debt settlement",
    long_about = "Go Dutch records who paid for what, works out how far each \
                  family member is from an equal share, and suggests the \
                  payments that settle everyone up."
)]
struct Cli {
    /// How fair shares are measured (overrides the configured mode)
    #[arg(long, global = true, value_enum)]
    split: Option<SplitMode>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    #[command(flatten)]
    Ledger(LedgerCommands),

    /// Export the family expense report
    Export(ExportArgs),

    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = DutchPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let split_mode = cli.split.unwrap_or(settings.split_mode);

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, split_mode, cmd)?;
        }
        Some(Commands::Ledger(cmd)) => {
            handle_ledger_command(&storage, &settings, split_mode, cmd)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, &settings, split_mode, args)?;
        }
        Some(Commands::Init) => {
            println!("Initializing Go Dutch at: {}", paths.base_dir().display());
            if !paths.is_initialized() {
                settings.save(&paths)?;
            }
            if !paths.expenses_file().exists() {
                storage.save_all()?;
            }
            println!("Initialization complete!");
            println!();
            println!("Run 'godutch members' to see the family roster.");
            println!("Run 'godutch add 450 Groceries --paid-by Im' to log an expense.");
        }
        Some(Commands::Config) => {
            println!("Go Dutch Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Expense log:      {}", paths.expenses_file().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Report date format: {}", settings.report_date_format);
            println!("  Split mode:         {:?}", split_mode);
            println!("  Report format:      {:?}", settings.report_format);
        }
        None => {
            println!("Go Dutch - family expense sharing");
            println!();
            println!("Run 'godutch --help' for usage information.");
            println!("Run 'godutch summary' to see who owes what.");
        }
    }

    Ok(())
}
