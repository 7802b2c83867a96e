use serde::Deserialize;

/// Main configuration structure for coffre
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub account: AccountConfig,
    #[serde(default)]
    pub vault: VaultConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// Vault account credentials
#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    /// Email address used to sign in on the vendor site
    pub email: String,

    /// Account password. Also re-submitted when exchanging the privileged
    /// health token.
    pub password: String,
}

/// Vault endpoint configuration
///
/// The two base URLs default to the real vendor endpoints; they are
/// overridable so tests can point the agent at a mock server. The HTTP
/// surface below them (paths, query parameters) is fixed.
#[derive(Debug, Clone, Deserialize)]
pub struct VaultConfig {
    /// Base URL of the vendor's secure area
    #[serde(rename = "secure-base-url", default = "default_secure_base_url")]
    pub secure_base_url: String,

    /// Login URL of the external identity provider. Landing back here after
    /// the form submission means the credentials were rejected.
    #[serde(rename = "provider-login-url", default = "default_provider_login_url")]
    pub provider_login_url: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Root of the destination hierarchy the folder tree is mirrored into
    #[serde(rename = "destination-path")]
    pub destination_path: String,
}

/// Run budget configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Hard wall-clock budget for the whole run, in seconds
    #[serde(rename = "overall-budget-secs", default = "default_overall_budget_secs")]
    pub overall_budget_secs: u64,
}

fn default_secure_base_url() -> String {
    "https://secure.digiposte.fr/".to_string()
}

fn default_provider_login_url() -> String {
    "https://compte.laposte.fr/fo/v1/login".to_string()
}

fn default_overall_budget_secs() -> u64 {
    240
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            secure_base_url: default_secure_base_url(),
            provider_login_url: default_provider_login_url(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            overall_budget_secs: default_overall_budget_secs(),
        }
    }
}
