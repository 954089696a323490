//! EVM helpers: address validation, chain references, WETH calldata
//!
//! Fordefi EVM vaults share one address across every EVM chain; the chain is
//! selected per-transaction with an `evm_<chain_id>` reference string.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};

/// WETH `deposit()` function selector: first 4 bytes of keccak256("deposit()")
pub const WETH_DEPOSIT_SELECTOR: &str = "0xd0e30db0";

lazy_static! {
    static ref ADDRESS_RE: Regex = Regex::new(r"^0x[0-9a-fA-F]{40}$").unwrap();
}

/// Validate a 0x-prefixed 20-byte EVM address
pub fn validate_address(address: &str) -> Result<()> {
    if ADDRESS_RE.is_match(address) {
        Ok(())
    } else {
        Err(Error::InvalidAddress(address.to_string()))
    }
}

/// Validate a vault id (the platform issues UUIDs)
pub fn validate_vault_id(vault_id: &str) -> Result<()> {
    uuid::Uuid::parse_str(vault_id)
        .map(|_| ())
        .map_err(|_| Error::InvalidVaultId(vault_id.to_string()))
}

/// Parse a decimal amount in the token's smallest unit
///
/// u128 because large-supply ERC20 amounts overflow u64.
pub fn parse_amount(amount: &str) -> Result<u128> {
    amount
        .parse::<u128>()
        .map_err(|_| Error::InvalidAmount(format!("not a decimal integer: {}", amount)))
}

/// Chain reference string the transactions endpoint expects
pub fn chain_ref(chain_id: &str) -> String {
    format!("evm_{}", chain_id)
}

/// Render a wei amount as ETH for human-readable output
pub fn wei_to_eth(wei: u128) -> f64 {
    wei as f64 / 1e18
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_validation() {
        assert!(validate_address("0x078D782b760474a361dDA0AF3839290b0EF57AD6").is_ok());
        assert!(validate_address("0xfFf9976782d46CC05630D1f6eBAb18b2324d6B14").is_ok());

        // Missing prefix
        assert!(validate_address("078D782b760474a361dDA0AF3839290b0EF57AD6").is_err());
        // Too short
        assert!(validate_address("0x078D782b").is_err());
        // Non-hex characters
        assert!(validate_address("0xZZ8D782b760474a361dDA0AF3839290b0EF57AD6").is_err());
        assert!(validate_address("").is_err());
    }

    #[test]
    fn test_vault_id_validation() {
        assert!(validate_vault_id("17332797-9d4e-4a97-8977-502863b7bc8c").is_ok());
        assert!(validate_vault_id("not-a-uuid").is_err());
        assert!(validate_vault_id("").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1000000").unwrap(), 1_000_000);
        // 1 ETH in wei fits comfortably
        assert_eq!(parse_amount("1000000000000000000").unwrap(), 10u128.pow(18));
        assert!(parse_amount("1.5").is_err());
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn test_chain_ref() {
        assert_eq!(chain_ref("130"), "evm_130");
        assert_eq!(chain_ref("11155111"), "evm_11155111");
    }

    #[test]
    fn test_wei_to_eth() {
        assert!((wei_to_eth(10u128.pow(18)) - 1.0).abs() < f64::EPSILON);
        assert!((wei_to_eth(100_000_000_000_000_000) - 0.1).abs() < 1e-12);
    }
}
