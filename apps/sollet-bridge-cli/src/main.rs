use clap::{Parser, Subcommand};
use solana_sdk::pubkey::Pubkey;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;

use commands::Session;
use error::CliResult;

#[derive(Parser)]
#[command(name = "sollet-bridge")]
#[command(
    about = "Wallet to Solana RPC bridge - balances, token accounts and tracked transactions"
)]
#[command(version)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Solana RPC URL (overrides the configuration file)
    #[arg(short, long, global = true)]
    rpc_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List SPL token balances for an owner
    Balances {
        /// Wallet address whose token accounts are listed
        owner: Pubkey,

        /// Don't fetch token names from the registry
        #[arg(long)]
        skip_registry: bool,
    },

    /// Show the cluster clock sysvar
    Clock,

    /// Create the associated token account for a mint if it's missing
    EnsureTokenAccount {
        /// Token mint
        #[arg(short, long)]
        mint: Pubkey,

        /// Wallet keypair file
        #[arg(short, long)]
        keypair: PathBuf,
    },

    /// Wrap SOL into a temporary native token account
    WrapSol {
        /// Amount in lamports
        #[arg(short, long)]
        amount: u64,

        /// Wallet keypair file
        #[arg(short, long)]
        keypair: PathBuf,

        /// Keep the wrapped account instead of closing it in the same transaction
        #[arg(long)]
        keep: bool,
    },

    /// Create a rent-exempt account owned by a program
    CreateAccount {
        /// Program that will own the account
        #[arg(short, long)]
        owner: Pubkey,

        /// Wallet keypair file
        #[arg(short, long)]
        keypair: PathBuf,
    },
}

#[tokio::main]
async fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref(), cli.rpc_url)?;
    let session = Session::open(config)?;

    match cli.command {
        Commands::Balances {
            owner,
            skip_registry,
        } => commands::balances::execute(&session, owner, skip_registry).await,

        Commands::Clock => commands::clock::execute(&session).await,

        Commands::EnsureTokenAccount { mint, keypair } => {
            commands::ensure_token_account::execute(&session, keypair, mint).await
        }

        Commands::WrapSol {
            amount,
            keypair,
            keep,
        } => commands::wrap_sol::execute(&session, keypair, amount, keep).await,

        Commands::CreateAccount { owner, keypair } => {
            commands::create_account::execute(&session, keypair, owner).await
        }
    }
}
