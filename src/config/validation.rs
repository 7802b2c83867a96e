use crate::config::types::{AccountConfig, Config, OutputConfig, RunConfig, VaultConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_account_config(&config.account)?;
    validate_vault_config(&config.vault)?;
    validate_output_config(&config.output)?;
    validate_run_config(&config.run)?;
    Ok(())
}

/// Validates account credentials
fn validate_account_config(config: &AccountConfig) -> Result<(), ConfigError> {
    if !config.email.contains('@') {
        return Err(ConfigError::Validation(format!(
            "account email does not look like an email address: {}",
            config.email
        )));
    }

    if config.password.is_empty() {
        return Err(ConfigError::Validation(
            "account password must not be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the vault endpoint URLs
fn validate_vault_config(config: &VaultConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("secure-base-url", &config.secure_base_url),
        ("provider-login-url", &config.provider_login_url),
    ] {
        let url = Url::parse(value)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {} ({})", name, value, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "{} must be an HTTP(S) URL, got scheme {}",
                name,
                url.scheme()
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.destination_path.is_empty() {
        return Err(ConfigError::Validation(
            "destination-path must not be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the run budget
fn validate_run_config(config: &RunConfig) -> Result<(), ConfigError> {
    if config.overall_budget_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "overall-budget-secs must be >= 1, got {}",
            config.overall_budget_secs
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> Config {
        Config {
            account: AccountConfig {
                email: "user@example.org".to_string(),
                password: "hunter2".to_string(),
            },
            vault: VaultConfig::default(),
            output: OutputConfig {
                destination_path: "/tmp/mirror".to_string(),
            },
            run: RunConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = create_test_config();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_email_without_at_sign() {
        let mut config = create_test_config();
        config.account.email = "not-an-email".to_string();

        let result = validate(&config);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_empty_password() {
        let mut config = create_test_config();
        config.account.password = String::new();

        let result = validate(&config);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = create_test_config();
        config.vault.secure_base_url = "not a url".to_string();

        let result = validate(&config);
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_non_http_base_url() {
        let mut config = create_test_config();
        config.vault.secure_base_url = "ftp://secure.digiposte.fr/".to_string();

        let result = validate(&config);
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_empty_destination() {
        let mut config = create_test_config();
        config.output.destination_path = String::new();

        let result = validate(&config);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_zero_budget() {
        let mut config = create_test_config();
        config.run.overall_budget_secs = 0;

        let result = validate(&config);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
