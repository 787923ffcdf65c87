use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxconv::core::Currency;
use fxconv::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxconv::AppCommand {
    fn from(cmd: Commands) -> fxconv::AppCommand {
        match cmd {
            Commands::Watch => fxconv::AppCommand::Watch,
            Commands::Board { ticks, json } => fxconv::AppCommand::Board { ticks, json },
            Commands::Convert { from, to, amount } => {
                fxconv::AppCommand::Convert { from, to, amount }
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Live markets table with an interactive converter
    Watch,
    /// Print the markets table as prices refresh
    Board {
        /// Number of refreshes to print after the seed prices
        #[arg(short, long, default_value_t = 5)]
        ticks: u32,
        /// Emit one JSON object per snapshot
        #[arg(long)]
        json: bool,
    },
    /// Convert an amount at the seed prices
    Convert {
        /// Source currency (USD, EUR, INR, AUD)
        from: Currency,
        /// Target currency (USD, EUR, INR, AUD)
        to: Currency,
        /// Amount in the source currency
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxconv::cli::setup::setup(),
        Some(cmd) => fxconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
