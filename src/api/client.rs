//! Fordefi HTTP API client
//!
//! The vaults endpoint takes bearer auth only. The transactions endpoint
//! additionally requires an ECDSA request signature over the exact bytes of
//! the body, shipped in the `x-signature`/`x-timestamp` headers, so the body
//! is serialized once and sent verbatim.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::auth::signer::{timestamp_ms, RequestSigner};
use crate::error::{Error, Result};

use super::types::{CreateVaultRequest, TransactionRequest, TransactionResponse, Vault};

/// Vault creation endpoint
pub const VAULTS_PATH: &str = "/api/v1/vaults";

/// Transaction creation endpoint (signed)
pub const TRANSACTIONS_PATH: &str = "/api/v1/transactions";

/// A transaction body together with the signature headers it was signed under
#[derive(Debug, Clone)]
pub struct SignedPayload {
    pub path: String,
    pub timestamp: String,
    pub body: String,
    pub signature: String,
}

/// Fordefi API client
pub struct FordefiClient {
    client: Client,
    base_url: String,
    access_token: String,
    signer: Option<RequestSigner>,
}

impl FordefiClient {
    /// Create a client for unsigned endpoints (vault management)
    pub fn new(base_url: String, access_token: String, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            access_token,
            signer: None,
        })
    }

    /// Attach the request signer needed for the transactions endpoint
    pub fn with_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Create a new vault
    pub async fn create_vault(&self, request: &CreateVaultRequest) -> Result<Vault> {
        info!("Creating {} vault '{}'", request.vault_type, request.name);

        let response = self
            .client
            .post(format!("{}{}", self.base_url, VAULTS_PATH))
            .bearer_auth(&self.access_token)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Vault request failed: {}", e)))?;

        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| Error::Deserialization(format!("Failed to parse vault response: {}", e)))
    }

    /// Build and sign a transaction body without sending it
    ///
    /// The returned bytes are exactly what `create_transaction` would put on
    /// the wire; used for `--dry-run` output.
    pub fn sign_transaction(&self, request: &TransactionRequest) -> Result<SignedPayload> {
        let signer = self
            .signer
            .as_ref()
            .ok_or_else(|| Error::Signing("No signing key configured".to_string()))?;

        // Compact serialization; the platform verifies the signature over
        // these exact bytes
        let body = serde_json::to_string(request)?;
        let timestamp = timestamp_ms();
        let signature = signer.sign(TRANSACTIONS_PATH, &timestamp, &body);

        Ok(SignedPayload {
            path: TRANSACTIONS_PATH.to_string(),
            timestamp,
            body,
            signature,
        })
    }

    /// Sign and submit a transaction
    pub async fn create_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<TransactionResponse> {
        let payload = self.sign_transaction(request)?;

        debug!("Submitting signed transaction body: {}", payload.body);

        let response = self
            .client
            .post(format!("{}{}", self.base_url, payload.path))
            .bearer_auth(&self.access_token)
            .header("Content-Type", "application/json")
            .header("x-signature", &payload.signature)
            .header("x-timestamp", &payload.timestamp)
            .body(payload.body)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Transaction request failed: {}", e)))?;

        let response = Self::check_status(response).await?;

        response.json().await.map_err(|e| {
            Error::Deserialization(format!("Failed to parse transaction response: {}", e))
        })
    }

    /// Surface non-2xx responses as API errors carrying the response text
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());

        Err(Error::Api {
            status: status.as_u16(),
            body,
        })
    }
}
