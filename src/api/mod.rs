//! Fordefi API client and wire types

pub mod client;
pub mod types;

pub use client::{FordefiClient, SignedPayload, TRANSACTIONS_PATH, VAULTS_PATH};
pub use types::{
    CreateVaultRequest, TransactionDetails, TransactionRequest, TransactionResponse, Vault,
};
