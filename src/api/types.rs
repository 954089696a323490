//! Wire types for the Fordefi REST API
//!
//! The JSON shapes here are dictated by the platform and must be reproduced
//! exactly: the transactions endpoint verifies the request signature over the
//! serialized body, so field names and nesting are not negotiable.

use serde::{Deserialize, Serialize};

use crate::evm;

/// Request body for `POST /api/v1/vaults`
#[derive(Debug, Clone, Serialize)]
pub struct CreateVaultRequest {
    /// Human-readable vault name
    pub name: String,
    /// Vault type; "evm" vaults share one address across all EVM chains
    #[serde(rename = "type")]
    pub vault_type: String,
}

/// Vault object returned by the vaults endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Vault {
    pub id: String,
    pub name: String,
    /// Absent until the address has been derived
    pub address: Option<String>,
}

/// Envelope for `POST /api/v1/transactions`
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRequest {
    /// UUID of the vault to act from
    pub vault_id: String,
    /// Always "api_signer": the MPC signer paired with this API key
    pub signer_type: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub details: TransactionDetails,
    pub note: String,
}

impl TransactionRequest {
    pub fn evm(vault_id: String, details: TransactionDetails, note: String) -> Self {
        Self {
            vault_id,
            signer_type: "api_signer".to_string(),
            transaction_type: "evm_transaction".to_string(),
            details,
            note,
        }
    }
}

/// The two transaction detail variants the platform accepts from this tool
///
/// `evm_transfer` is the typed asset-transfer form (the platform builds the
/// ERC20 calldata); `evm_raw_transaction` is a direct contract call. Note the
/// shape differences: transfer carries `value` as an object and the chain
/// inside `asset_identifier`, raw carries `value` as a plain string and a
/// top-level `chain` field.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionDetails {
    EvmTransfer {
        to: String,
        value: TransferValue,
        asset_identifier: AssetIdentifier,
    },
    EvmRawTransaction {
        to: String,
        value: String,
        data: CallData,
        chain: String,
    },
}

impl TransactionDetails {
    /// Typed ERC20 transfer
    pub fn erc20_transfer(
        recipient: String,
        amount_wei: u128,
        token_address: String,
        chain_id: &str,
    ) -> Self {
        Self::EvmTransfer {
            to: recipient,
            value: TransferValue::new(amount_wei),
            asset_identifier: AssetIdentifier::erc20(token_address, chain_id),
        }
    }

    /// Raw contract call carrying native value and calldata
    pub fn contract_call(
        contract: String,
        value_wei: u128,
        hex_data: String,
        chain_id: &str,
    ) -> Self {
        Self::EvmRawTransaction {
            to: contract,
            value: value_wei.to_string(),
            data: CallData::hex(hex_data),
            chain: evm::chain_ref(chain_id),
        }
    }
}

/// Amount object used by the `evm_transfer` variant
#[derive(Debug, Clone, Serialize)]
pub struct TransferValue {
    #[serde(rename = "type")]
    pub value_type: String,
    pub value: String,
}

impl TransferValue {
    pub fn new(amount_wei: u128) -> Self {
        Self {
            value_type: "value".to_string(),
            value: amount_wei.to_string(),
        }
    }
}

/// Identifies which asset an `evm_transfer` moves
#[derive(Debug, Clone, Serialize)]
pub struct AssetIdentifier {
    #[serde(rename = "type")]
    pub asset_type: String,
    pub details: AssetDetails,
}

impl AssetIdentifier {
    pub fn erc20(token_address: String, chain_id: &str) -> Self {
        Self {
            asset_type: "evm".to_string(),
            details: AssetDetails {
                detail_type: "erc20".to_string(),
                token: TokenReference {
                    chain: evm::chain_ref(chain_id),
                    chain_id: chain_id.to_string(),
                    hex_repr: token_address,
                },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetDetails {
    #[serde(rename = "type")]
    pub detail_type: String,
    pub token: TokenReference,
}

/// Token contract reference: chain string, numeric chain id, contract address
#[derive(Debug, Clone, Serialize)]
pub struct TokenReference {
    pub chain: String,
    pub chain_id: String,
    pub hex_repr: String,
}

/// Calldata object used by the `evm_raw_transaction` variant
#[derive(Debug, Clone, Serialize)]
pub struct CallData {
    #[serde(rename = "type")]
    pub data_type: String,
    pub hex_data: String,
}

impl CallData {
    pub fn hex(hex_data: String) -> Self {
        Self {
            data_type: "hex".to_string(),
            hex_data,
        }
    }
}

/// Transaction object returned by the transactions endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionResponse {
    pub id: String,
    /// On-chain hash; absent until broadcast
    pub hash: Option<String>,
    pub explorer_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erc20_transfer_body_shape() {
        let request = TransactionRequest::evm(
            "17332797-9d4e-4a97-8977-502863b7bc8c".to_string(),
            TransactionDetails::erc20_transfer(
                "0x8BFCF9e2764BC84DE4BBd0a0f5AAF19F47027A73".to_string(),
                1_000_000,
                "0x078D782b760474a361dDA0AF3839290b0EF57AD6".to_string(),
                "130",
            ),
            "Token transfer via API".to_string(),
        );

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"vault_id":"17332797-9d4e-4a97-8977-502863b7bc8c","#,
                r#""signer_type":"api_signer","type":"evm_transaction","#,
                r#""details":{"type":"evm_transfer","#,
                r#""to":"0x8BFCF9e2764BC84DE4BBd0a0f5AAF19F47027A73","#,
                r#""value":{"type":"value","value":"1000000"},"#,
                r#""asset_identifier":{"type":"evm","details":{"type":"erc20","#,
                r#""token":{"chain":"evm_130","chain_id":"130","#,
                r#""hex_repr":"0x078D782b760474a361dDA0AF3839290b0EF57AD6"}}}},"#,
                r#""note":"Token transfer via API"}"#,
            )
        );
    }

    #[test]
    fn test_raw_transaction_body_shape() {
        let request = TransactionRequest::evm(
            "646c57e4-bbb4-434f-855f-e0141a88265d".to_string(),
            TransactionDetails::contract_call(
                "0xfFf9976782d46CC05630D1f6eBAb18b2324d6B14".to_string(),
                100_000_000_000_000_000,
                "0xd0e30db0".to_string(),
                "11155111",
            ),
            "Wrap ETH to WETH via API".to_string(),
        );

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"vault_id":"646c57e4-bbb4-434f-855f-e0141a88265d","#,
                r#""signer_type":"api_signer","type":"evm_transaction","#,
                r#""details":{"type":"evm_raw_transaction","#,
                r#""to":"0xfFf9976782d46CC05630D1f6eBAb18b2324d6B14","#,
                r#""value":"100000000000000000","#,
                r#""data":{"type":"hex","hex_data":"0xd0e30db0"},"#,
                r#""chain":"evm_11155111"},"#,
                r#""note":"Wrap ETH to WETH via API"}"#,
            )
        );
    }

    #[test]
    fn test_create_vault_request_shape() {
        let request = CreateVaultRequest {
            name: "treasury".to_string(),
            vault_type: "evm".to_string(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"name":"treasury","type":"evm"}"#);
    }

    #[test]
    fn test_vault_response_with_missing_address() {
        let vault: Vault =
            serde_json::from_str(r#"{"id":"abc","name":"treasury"}"#).unwrap();
        assert_eq!(vault.id, "abc");
        assert!(vault.address.is_none());
    }

    #[test]
    fn test_transaction_response_optional_fields() {
        let tx: TransactionResponse = serde_json::from_str(
            r#"{"id":"tx-1","hash":null,"explorer_url":null,"state":"pending"}"#,
        )
        .unwrap();
        assert_eq!(tx.id, "tx-1");
        assert!(tx.hash.is_none());
        assert!(tx.explorer_url.is_none());
    }
}
