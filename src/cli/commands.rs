//! CLI command implementations

use anyhow::Result;
use dialoguer::{Confirm, Input};
use std::path::Path;
use tracing::{info, warn};

use crate::api::client::FordefiClient;
use crate::api::types::{CreateVaultRequest, TransactionDetails, TransactionRequest};
use crate::auth::RequestSigner;
use crate::config::Config;
use crate::evm;

/// Create a new vault
///
/// EVM vaults work across all EVM chains with a single address; the chain is
/// specified per-transaction, not per-vault.
pub async fn create_vault(config: &Config, name: Option<String>, vault_type: &str) -> Result<()> {
    config.validate()?;

    // Prompt for a name when none was given on the command line
    let name = match name {
        Some(name) => name,
        None => Input::<String>::new()
            .with_prompt("Vault name")
            .interact_text()?,
    };

    if name.trim().is_empty() {
        anyhow::bail!("Vault name must not be empty");
    }

    let client = build_client(config)?;
    let request = CreateVaultRequest {
        name,
        vault_type: vault_type.to_string(),
    };

    let vault = client.create_vault(&request).await?;

    println!("Vault created: {}", vault.name);
    println!("   ID: {}", vault.id);
    println!("   Address: {}", vault.address.as_deref().unwrap_or("N/A"));

    Ok(())
}

/// Send ERC20 tokens using the evm_transfer transaction type
#[allow(clippy::too_many_arguments)]
pub async fn send_token(
    config: &Config,
    vault_id: &str,
    recipient: &str,
    amount: &str,
    token_address: &str,
    chain_id: &str,
    yes: bool,
    dry_run: bool,
) -> Result<()> {
    config.validate()?;
    config.validate_signing()?;

    evm::validate_vault_id(vault_id)?;
    evm::validate_address(recipient)?;
    evm::validate_address(token_address)?;
    let amount_wei = evm::parse_amount(amount)?;

    info!(
        "Sending {} token units to {} on chain {}",
        amount_wei, recipient, chain_id
    );

    let details = TransactionDetails::erc20_transfer(
        recipient.to_string(),
        amount_wei,
        token_address.to_string(),
        chain_id,
    );
    let request = TransactionRequest::evm(
        vault_id.to_string(),
        details,
        "Token transfer via API".to_string(),
    );

    submit_transaction(config, &request, yes, dry_run, || {
        format!("Send {} units of {} to {}?", amount_wei, token_address, recipient)
    })
    .await
}

/// Wrap ETH into WETH by calling the contract's deposit() function
///
/// Raw transaction carrying the amount as value and the deposit() selector as
/// calldata; the contract mints WETH back to the sender.
pub async fn wrap_eth(
    config: &Config,
    vault_id: &str,
    amount_wei: &str,
    weth_address: Option<String>,
    chain_id: Option<String>,
    yes: bool,
    dry_run: bool,
) -> Result<()> {
    config.validate()?;
    config.validate_signing()?;

    // Fall back to the Sepolia preset when not specified
    let sepolia = config.network("sepolia");
    let weth_address = weth_address
        .or_else(|| sepolia.and_then(|n| n.weth_address.clone()))
        .ok_or_else(|| anyhow::anyhow!("No WETH address given and no preset available"))?;
    let chain_id = chain_id
        .or_else(|| sepolia.map(|n| n.chain_id.clone()))
        .ok_or_else(|| anyhow::anyhow!("No chain id given and no preset available"))?;

    evm::validate_vault_id(vault_id)?;
    evm::validate_address(&weth_address)?;
    let amount = evm::parse_amount(amount_wei)?;

    println!(
        "Wrapping {} wei ({:.6} ETH) to WETH",
        amount,
        evm::wei_to_eth(amount)
    );
    println!("WETH Contract: {}", weth_address);
    println!("Chain ID: {}", chain_id);

    let details = TransactionDetails::contract_call(
        weth_address.clone(),
        amount,
        evm::WETH_DEPOSIT_SELECTOR.to_string(),
        &chain_id,
    );
    let request = TransactionRequest::evm(
        vault_id.to_string(),
        details,
        "Wrap ETH to WETH via API".to_string(),
    );

    submit_transaction(config, &request, yes, dry_run, || {
        format!("Wrap {:.6} ETH into {}?", evm::wei_to_eth(amount), weth_address)
    })
    .await
}

/// Show current configuration (secrets masked)
pub fn show_config(config: &Config) -> Result<()> {
    println!("{}", config.masked_display());
    Ok(())
}

/// List the built-in network presets
pub fn networks(config: &Config) -> Result<()> {
    println!("Known networks:");
    for (name, network) in &config.networks {
        println!("  {} (chain {})", name, network.chain_id);
        if let Some(usdc) = &network.usdc_address {
            println!("    USDC: {}", usdc);
        }
        if let Some(weth) = &network.weth_address {
            println!("    WETH: {}", weth);
        }
        if let Some(vault) = &network.default_vault_id {
            println!("    default vault: {}", vault);
        }
    }
    Ok(())
}

/// Confirm, sign and submit a transaction request, then print the result
async fn submit_transaction<F>(
    config: &Config,
    request: &TransactionRequest,
    yes: bool,
    dry_run: bool,
    prompt: F,
) -> Result<()>
where
    F: FnOnce() -> String,
{
    // Confirmation prompt (unless --yes or --dry-run)
    if !yes && !dry_run {
        let confirmed = Confirm::new()
            .with_prompt(format!("{} This cannot be undone.", prompt()))
            .default(false)
            .interact()?;

        if !confirmed {
            info!("Cancelled by user");
            return Ok(());
        }
    }

    let signer = RequestSigner::from_pem_file(Path::new(&config.signing.private_key_path))?;
    let client = build_client(config)?.with_signer(signer);

    if dry_run {
        warn!("DRY-RUN: transaction will not be submitted");
        let payload = client.sign_transaction(request)?;
        println!("POST {}", payload.path);
        println!("x-timestamp: {}", payload.timestamp);
        println!("x-signature: {}", payload.signature);
        println!("{}", payload.body);
        return Ok(());
    }

    let transaction = client.create_transaction(request).await?;

    println!("Transaction: {}", transaction.id);
    println!("   Hash: {}", transaction.hash.as_deref().unwrap_or("pending"));
    println!(
        "   Explorer: {}",
        transaction.explorer_url.as_deref().unwrap_or("N/A")
    );

    Ok(())
}

fn build_client(config: &Config) -> Result<FordefiClient> {
    Ok(FordefiClient::new(
        config.api.url.clone(),
        config.api.access_token.clone(),
        config.api.timeout_secs,
    )?)
}
