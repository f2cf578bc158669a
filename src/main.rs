use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxconv::cli::convert::ConvertRequest;
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
            Commands::List { search } => fxconv::AppCommand::List { search },
            Commands::Convert {
                amount,
                from,
                to,
                swap,
            } => fxconv::AppCommand::Convert(ConvertRequest {
                amount,
                from,
                to,
                swap,
            }),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List available currencies
    List {
        /// Only show currencies whose code or name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert
        #[arg(default_value = "1", allow_hyphen_values = true)]
        amount: String,
        /// Currency to convert from [default: from config, USD]
        #[arg(short, long)]
        from: Option<String>,
        /// Currency to convert to [default: from config, NGN]
        #[arg(short, long)]
        to: Option<String>,
        /// Swap the from and to currencies
        #[arg(long)]
        swap: bool,
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
