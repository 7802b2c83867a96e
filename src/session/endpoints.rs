use crate::config::VaultConfig;
use crate::ConfigResult;
use crate::ConfigError;
use url::Url;

/// Resolved URL set for the vendor's HTTP surface
///
/// The two base URLs come from the configuration (defaulting to the real
/// vendor endpoints); every path below them is fixed. All URLs are resolved
/// once at session construction so later calls cannot fail on URL joining.
#[derive(Debug, Clone)]
pub struct VaultEndpoints {
    secure_base: Url,
    secure_home: Url,
    provider_login: Url,
    login_page: Url,
    security_question: Url,
    security_tokens: Url,
    health_token: Url,
    folders_safe: Url,
    document_search: Url,
    document_content: Url,
}

impl VaultEndpoints {
    /// Resolves the full endpoint set from the vault configuration
    pub fn from_config(config: &VaultConfig) -> ConfigResult<Self> {
        let mut secure_base = Url::parse(&config.secure_base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{} ({})", config.secure_base_url, e)))?;

        // Joins below are relative to the base path, which must end in a slash
        if !secure_base.path().ends_with('/') {
            let path = format!("{}/", secure_base.path());
            secure_base.set_path(&path);
        }

        let provider_login = Url::parse(&config.provider_login_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{} ({})", config.provider_login_url, e)))?;

        let join = |base: &Url, path: &str| -> ConfigResult<Url> {
            base.join(path)
                .map_err(|e| ConfigError::InvalidUrl(format!("{}{} ({})", base, path, e)))
        };

        let mut secure_home = secure_base.clone();
        secure_home.set_path("/");

        Ok(Self {
            secure_home,
            provider_login,
            login_page: join(&secure_base, "identification-plus")?,
            security_question: join(&secure_base, "question-secret")?,
            security_tokens: join(&secure_base, "rest/security/tokens")?,
            health_token: join(&secure_base, "rest/security/health-token")?,
            folders_safe: join(&secure_base, "api/v3/folders/safe")?,
            document_search: join(&secure_base, "api/v3/documents/search")?,
            document_content: join(&secure_base, "rest/content/document")?,
            secure_base,
        })
    }

    /// Base URL of the secure area; the cookie jar is read at this URL
    pub fn secure_base(&self) -> &Url {
        &self.secure_base
    }

    /// Landing URL that signals a successful login
    pub fn secure_home(&self) -> &Url {
        &self.secure_home
    }

    /// The identity provider's own login page; landing back here means the
    /// credentials were rejected
    pub fn provider_login(&self) -> &Url {
        &self.provider_login
    }

    /// Page carrying the vendor login form
    pub fn login_page(&self) -> &Url {
        &self.login_page
    }

    /// Security-question interstitial requiring one-time manual setup
    pub fn security_question(&self) -> &Url {
        &self.security_question
    }

    /// Access-token exchange endpoint (CSRF-header-authenticated)
    pub fn security_tokens(&self) -> &Url {
        &self.security_tokens
    }

    /// Health-token exchange endpoint (bearer + password body)
    pub fn health_token(&self) -> &Url {
        &self.health_token
    }

    /// Folder listing endpoint (bearer-authenticated)
    pub fn folders_safe(&self) -> &Url {
        &self.folders_safe
    }

    /// Document search endpoint (health-token-authenticated)
    pub fn document_search(&self) -> &Url {
        &self.document_search
    }

    /// Content download endpoint, parameterized by the xsrf query token
    pub fn document_content(&self) -> &Url {
        &self.document_content
    }
}
