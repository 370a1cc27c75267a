//! promptkit CLI — fill in prompt templates and hand the result to an AI platform.
//!
//! Commands: `init`, `list`, `show`, `validate`, `generate`, `save`, `history`,
//! `platforms`, and `lint`.
//!
//! Template logic lives in [`promptkit_core`]; this crate only collects values,
//! prints results, and drives the launcher and prompt store.

mod commands;
mod output;
mod values;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use values::ValueArgs;

#[derive(Parser)]
#[command(
    name = "promptkit",
    about = "Prompt template generator — fill in a template, copy it, send it to ChatGPT, Claude, Gemini and more",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to promptkit.config.json (default: ./promptkit.config.json)
    #[arg(long, global = true, default_value = "promptkit.config.json")]
    config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Network used to gate saves
        #[arg(long, default_value = "mainnet")]
        network: NetworkChoice,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// List templates
    List {
        /// Only show templates in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show a template's variables and tips
    Show {
        /// Template id
        id: String,
    },

    /// Check that all required variables are filled in
    Validate {
        /// Template id
        id: String,

        #[command(flatten)]
        values: ValueArgs,
    },

    /// Generate a prompt from a template
    Generate {
        /// Template id
        id: String,

        #[command(flatten)]
        values: ValueArgs,

        /// Generate even if required variables are missing
        #[arg(long)]
        preview: bool,

        /// Print only the generated prompt
        #[arg(long)]
        raw: bool,

        /// Copy the prompt to the clipboard
        #[arg(long)]
        copy: bool,

        /// Copy the prompt and open an AI platform (default from config)
        #[arg(long, value_name = "PLATFORM")]
        open: Option<Option<String>>,

        /// Write the prompt to a file
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Generate a prompt and save it to the wallet's history
    Save {
        /// Template id
        id: String,

        #[command(flatten)]
        values: ValueArgs,

        /// Wallet address (0x…)
        #[arg(long, env = "PROMPTKIT_WALLET")]
        wallet: Option<String>,

        /// Chain id the wallet is connected to (default: configured network)
        #[arg(long)]
        chain_id: Option<u64>,
    },

    /// List prompts saved by a wallet
    History {
        /// Wallet address (0x…)
        #[arg(long, env = "PROMPTKIT_WALLET")]
        wallet: String,

        /// Also export the history as Markdown to this file
        #[arg(long, value_name = "FILE")]
        markdown: Option<PathBuf>,
    },

    /// List AI platforms a prompt can be opened in
    Platforms,

    /// Check the catalog for malformed templates
    Lint {
        /// Also show informational notes (undeclared placeholders, unused variables)
        #[arg(long)]
        all: bool,
    },
}

#[derive(ValueEnum, Clone, Debug)]
pub enum NetworkChoice {
    Mainnet,
    Testnet,
}

impl NetworkChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { network, force } => {
            commands::init::run(&cli.config, &network, force)?;
        }
        Commands::List { category } => {
            commands::list::run(&cli.config, category.as_deref())?;
        }
        Commands::Show { id } => {
            commands::show::run(&cli.config, &id)?;
        }
        Commands::Validate { id, values } => {
            commands::validate::run(&cli.config, &id, &values)?;
        }
        Commands::Generate {
            id,
            values,
            preview,
            raw,
            copy,
            open,
            output,
        } => {
            let opts = commands::generate::GenerateOptions {
                preview,
                raw,
                copy,
                open,
                output,
            };
            commands::generate::run(&cli.config, &id, &values, &opts)?;
        }
        Commands::Save {
            id,
            values,
            wallet,
            chain_id,
        } => {
            commands::save::run(&cli.config, &id, &values, wallet.as_deref(), chain_id).await?;
        }
        Commands::History { wallet, markdown } => {
            commands::history::run(&cli.config, &wallet, markdown.as_deref()).await?;
        }
        Commands::Platforms => {
            commands::platforms::run();
        }
        Commands::Lint { all } => {
            commands::lint::run(&cli.config, all)?;
        }
    }

    Ok(())
}
