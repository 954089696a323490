//! Fordefi custody CLI - create vaults, move ERC20 tokens, wrap ETH
//!
//! # WARNING
//! - Transactions submitted through this tool move real funds once approved
//!   by the platform's policy engine.
//! - The private key on disk authorizes API requests; guard it like any
//!   other credential (chmod 600).

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

// Use the library crate
use fordefi_cli::cli::commands;
use fordefi_cli::config::Config;

/// Fordefi custody CLI - vaults, token transfers, WETH wrapping
#[derive(Parser)]
#[command(name = "fordefi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Vault management commands
    Vault {
        #[command(subcommand)]
        action: VaultAction,
    },

    /// Send ERC20 tokens from a vault
    SendToken {
        /// UUID of the vault to send from
        vault_id: String,

        /// Recipient address (0x...)
        recipient: String,

        /// Amount in the token's smallest unit (e.g. 1000000 for 1 USDC)
        amount: String,

        /// ERC20 token contract address
        token_address: String,

        /// EVM chain id
        #[arg(long, default_value = "130")]
        chain_id: String,

        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,

        /// Build and sign the request but don't submit it
        #[arg(long)]
        dry_run: bool,
    },

    /// Wrap native ETH into WETH via the contract's deposit() function
    WrapEth {
        /// UUID of the vault to wrap from
        vault_id: String,

        /// Amount in wei (1 ETH = 1000000000000000000 wei)
        amount_wei: String,

        /// WETH contract address (default: Sepolia WETH)
        #[arg(long)]
        weth_address: Option<String>,

        /// EVM chain id (default: Sepolia)
        #[arg(long)]
        chain_id: Option<String>,

        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,

        /// Build and sign the request but don't submit it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show current configuration (secrets masked)
    Config,

    /// List known network presets
    Networks,
}

#[derive(Subcommand)]
enum VaultAction {
    /// Create a new vault
    Create {
        /// Human-readable vault name (prompted when omitted)
        name: Option<String>,

        /// Vault type
        #[arg(long, default_value = "evm")]
        vault_type: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fordefi_cli=info".parse().unwrap()),
        )
        .with_target(true)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Vault { action } => match action {
            VaultAction::Create { name, vault_type } => {
                commands::create_vault(&config, name, &vault_type).await
            }
        },
        Commands::SendToken {
            vault_id,
            recipient,
            amount,
            token_address,
            chain_id,
            yes,
            dry_run,
        } => {
            commands::send_token(
                &config,
                &vault_id,
                &recipient,
                &amount,
                &token_address,
                &chain_id,
                yes,
                dry_run,
            )
            .await
        }
        Commands::WrapEth {
            vault_id,
            amount_wei,
            weth_address,
            chain_id,
            yes,
            dry_run,
        } => {
            commands::wrap_eth(
                &config,
                &vault_id,
                &amount_wei,
                weth_address,
                chain_id,
                yes,
                dry_run,
            )
            .await
        }
        Commands::Config => commands::show_config(&config),
        Commands::Networks => commands::networks(&config),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
