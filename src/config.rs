//! Configuration loading and validation

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub signing: SigningConfig,
    /// Named network presets, keyed by a short name like "unichain" or "sepolia"
    #[serde(default = "default_networks")]
    pub networks: BTreeMap<String, NetworkConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,
    /// Bearer token from the Fordefi console
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            access_token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SigningConfig {
    /// Path to the ECDSA P-256 private key registered with the API signer
    #[serde(default = "default_private_key_path")]
    pub private_key_path: String,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            private_key_path: default_private_key_path(),
        }
    }
}

/// A known EVM network with its deployed token addresses
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    pub chain_id: String,
    #[serde(default)]
    pub usdc_address: Option<String>,
    #[serde(default)]
    pub weth_address: Option<String>,
    /// Vault to use by default when sending on this network
    #[serde(default)]
    pub default_vault_id: Option<String>,
}

fn default_api_url() -> String {
    "https://api.fordefi.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_private_key_path() -> String {
    "./private.pem".to_string()
}

/// Unichain mainnet chain id
pub const UNICHAIN_CHAIN_ID: &str = "130";
/// USDC contract on Unichain
pub const UNICHAIN_USDC_ADDRESS: &str = "0x078D782b760474a361dDA0AF3839290b0EF57AD6";
/// Ethereum Sepolia chain id
pub const SEPOLIA_CHAIN_ID: &str = "11155111";
/// Canonical WETH contract on Sepolia
pub const SEPOLIA_WETH_ADDRESS: &str = "0xfFf9976782d46CC05630D1f6eBAb18b2324d6B14";

fn default_networks() -> BTreeMap<String, NetworkConfig> {
    let mut networks = BTreeMap::new();
    networks.insert(
        "unichain".to_string(),
        NetworkConfig {
            chain_id: UNICHAIN_CHAIN_ID.to_string(),
            usdc_address: Some(UNICHAIN_USDC_ADDRESS.to_string()),
            weth_address: None,
            default_vault_id: std::env::var("UNICHAIN_VAULT_ID").ok().filter(|v| !v.is_empty()),
        },
    );
    networks.insert(
        "sepolia".to_string(),
        NetworkConfig {
            chain_id: SEPOLIA_CHAIN_ID.to_string(),
            usdc_address: None,
            weth_address: Some(SEPOLIA_WETH_ADDRESS.to_string()),
            default_vault_id: std::env::var("SEPOLIA_VAULT_ID").ok().filter(|v| !v.is_empty()),
        },
    );
    networks
}

impl Config {
    /// Load configuration from file and environment variables
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let settings = config::Config::builder()
            // Start with defaults
            .set_default("api.url", default_api_url())?
            .set_default("api.timeout_secs", default_timeout_secs() as i64)?
            .set_default("signing.private_key_path", default_private_key_path())?
            // Load from file if exists
            .add_source(config::File::from(path).required(false))
            // Override with environment variables (prefix FORDEFI_,
            // e.g. FORDEFI_API__ACCESS_TOKEN)
            .add_source(
                config::Environment::with_prefix("FORDEFI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let mut config: Config = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        // Flat env vars from the Fordefi console docs take effect when the
        // config file carries no value of its own
        if config.api.access_token.is_empty() {
            if let Ok(token) = std::env::var("FORDEFI_ACCESS_TOKEN") {
                config.api.access_token = token;
            }
        }
        if let Ok(key_path) = std::env::var("FORDEFI_PRIVATE_KEY_PATH") {
            if !key_path.is_empty() {
                config.signing.private_key_path = key_path;
            }
        }

        // Built-in presets stay available alongside user-defined networks
        for (name, preset) in default_networks() {
            config.networks.entry(name).or_insert(preset);
        }

        Ok(config)
    }

    /// Validate that everything an API call needs is present
    ///
    /// Called by commands before any network I/O, so a missing token fails
    /// fast instead of surfacing as a 401 from the platform.
    pub fn validate(&self) -> Result<()> {
        if self.api.access_token.is_empty() {
            anyhow::bail!(
                "access token not set (FORDEFI_ACCESS_TOKEN or [api] access_token in config file)"
            );
        }

        if self.api.url.is_empty() {
            anyhow::bail!("api.url must not be empty");
        }

        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be positive");
        }

        for (name, network) in &self.networks {
            if network.chain_id.is_empty() || network.chain_id.parse::<u64>().is_err() {
                anyhow::bail!("network '{}' has invalid chain_id", name);
            }
        }

        Ok(())
    }

    /// Validate that the signing key file exists (signed endpoints only)
    pub fn validate_signing(&self) -> Result<()> {
        let key_path = Path::new(&self.signing.private_key_path);
        if !key_path.exists() {
            anyhow::bail!("Private key not found: {}", self.signing.private_key_path);
        }
        Ok(())
    }

    /// Look up a network preset by name
    pub fn network(&self, name: &str) -> Option<&NetworkConfig> {
        self.networks.get(name)
    }

    /// Get masked configuration for display (hide secrets)
    pub fn masked_display(&self) -> String {
        let mut out = format!(
            r#"Configuration:
  API:
    url: {}
    access_token: {}
    timeout: {}s
  Signing:
    private_key_path: {}
  Networks:
"#,
            self.api.url,
            mask_secret(&self.api.access_token),
            self.api.timeout_secs,
            self.signing.private_key_path,
        );

        for (name, network) in &self.networks {
            out.push_str(&format!(
                "    {}: chain_id={} usdc={} weth={} default_vault={}\n",
                name,
                network.chain_id,
                network.usdc_address.as_deref().unwrap_or("-"),
                network.weth_address.as_deref().unwrap_or("-"),
                network.default_vault_id.as_deref().unwrap_or("-"),
            ));
        }

        out
    }
}

/// Mask a secret for display, keeping the first and last 4 characters
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "<not set>".to_string();
    }
    // Counted in chars, not bytes: a pasted token may carry multi-byte
    // characters and slicing mid-character panics
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 12 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_apply_without_file() {
        let config = Config::load("nonexistent-config.toml").unwrap();
        assert_eq!(config.api.url, "https://api.fordefi.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.signing.private_key_path, "./private.pem");
        assert!(config.networks.contains_key("unichain"));
        assert!(config.networks.contains_key("sepolia"));
    }

    #[test]
    fn test_builtin_network_presets() {
        let networks = default_networks();
        assert_eq!(networks["unichain"].chain_id, "130");
        assert_eq!(
            networks["unichain"].usdc_address.as_deref(),
            Some(UNICHAIN_USDC_ADDRESS)
        );
        assert_eq!(networks["sepolia"].chain_id, "11155111");
        assert_eq!(
            networks["sepolia"].weth_address.as_deref(),
            Some(SEPOLIA_WETH_ADDRESS)
        );
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[api]
url = "https://api.example.test"
access_token = "abc123"

[signing]
private_key_path = "/tmp/key.pem"
"#
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.url, "https://api.example.test");
        assert_eq!(config.api.access_token, "abc123");
        assert_eq!(config.signing.private_key_path, "/tmp/key.pem");
        // Untouched sections keep their defaults
        assert_eq!(config.api.timeout_secs, 30);

        // Environment wins over the file; no other test touches this var
        std::env::set_var("FORDEFI_API__ACCESS_TOKEN", "env-token");
        let config = Config::load(&path).unwrap();
        std::env::remove_var("FORDEFI_API__ACCESS_TOKEN");
        assert_eq!(config.api.access_token, "env-token");
    }

    #[test]
    fn test_validate_rejects_missing_token() {
        let mut config = Config::load("nonexistent-config.toml").unwrap();
        config.api.access_token.clear();
        // Only meaningful when the env var is not set in the test environment
        if std::env::var("FORDEFI_ACCESS_TOKEN").is_err() {
            assert!(config.validate().is_err());
        }

        config.api.access_token = "token".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_chain_id() {
        let mut config = Config::load("nonexistent-config.toml").unwrap();
        config.api.access_token = "token".to_string();
        config.networks.insert(
            "broken".to_string(),
            NetworkConfig {
                chain_id: "not-a-number".to_string(),
                usdc_address: None,
                weth_address: None,
                default_vault_id: None,
            },
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(""), "<not set>");
        assert_eq!(mask_secret("short"), "****");
        assert_eq!(mask_secret("abcdefghijklmnop"), "abcd...mnop");
    }

    #[test]
    fn test_mask_secret_multibyte_token() {
        // Multi-byte characters at both boundaries must not panic
        assert_eq!(mask_secret("ééééabcdefghöööö"), "éééé...öööö");
        assert_eq!(mask_secret("ñññ"), "****");
    }
}
