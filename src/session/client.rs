//! HTTP session context
//!
//! This module builds the shared HTTP client (one cookie jar for the whole
//! run) and wraps it, together with the resolved endpoints and the session
//! tokens, into the [`VaultSession`] context that every other component works
//! through. The tokens live here and nowhere else; the authenticator and the
//! token chain are the only writers.

use crate::config::VaultConfig;
use crate::session::endpoints::VaultEndpoints;
use crate::session::tokens::SessionTokens;
use crate::{CoffreError, Result};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::redirect::Policy;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Cookie the vendor rotates on authenticated responses
pub const XSRF_COOKIE: &str = "XSRF-TOKEN";

/// Header carrying the current xsrf token on API calls
pub const XSRF_HEADER: &str = "X-XSRF-TOKEN";

/// Builds the HTTP client bound to the given cookie jar
///
/// Redirects are followed (the login flow relies on landing-URL inspection,
/// and reqwest exposes the final URL after following them).
///
/// # Arguments
///
/// * `jar` - The shared cookie jar for the whole session
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(jar: Arc<Jar>) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("coffre/", env!("CARGO_PKG_VERSION")))
        .cookie_provider(jar)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Process-wide session context
///
/// Owns the HTTP client, the cookie jar it is bound to, the resolved endpoint
/// set and the current [`SessionTokens`]. Passing this context by reference is
/// the only way to reach the tokens, so a caller can never hold a stale copy
/// across a rotation.
pub struct VaultSession {
    client: Client,
    jar: Arc<Jar>,
    endpoints: VaultEndpoints,
    tokens: SessionTokens,
}

impl VaultSession {
    /// Creates a new session for the configured vault endpoints
    pub fn new(config: &VaultConfig) -> Result<Self> {
        let endpoints = VaultEndpoints::from_config(config)?;
        let jar = Arc::new(Jar::default());
        let client = build_http_client(jar.clone())?;

        Ok(Self {
            client,
            jar,
            endpoints,
            tokens: SessionTokens::default(),
        })
    }

    /// The shared HTTP client. Clones share the same cookie jar.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// The resolved endpoint set
    pub fn endpoints(&self) -> &VaultEndpoints {
        &self.endpoints
    }

    /// Current token state
    pub fn tokens(&self) -> &SessionTokens {
        &self.tokens
    }

    /// Mutable token state, for the authenticator and token chain only
    pub(crate) fn tokens_mut(&mut self) -> &mut SessionTokens {
        &mut self.tokens
    }

    /// Reads the current xsrf cookie value from the jar, if present
    pub fn xsrf_cookie(&self) -> Option<String> {
        let header = self.jar.cookies(self.endpoints.secure_base())?;
        let raw = header.to_str().ok()?;

        raw.split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == XSRF_COOKIE)
            .map(|(_, value)| value.to_string())
    }

    /// Re-reads the xsrf cookie from the jar into the token state
    ///
    /// Must be called after any request that may rotate cookies, before the
    /// token is next used in a header or URL.
    pub fn refresh_xsrf_token(&mut self) -> Result<()> {
        tracing::debug!("Reading the xsrf token from the cookie jar");

        let value = self.xsrf_cookie().ok_or_else(|| {
            tracing::error!("{} cookie is missing from the session jar", XSRF_COOKIE);
            CoffreError::vendor_down("xsrf cookie missing from the session")
        })?;

        self.tokens.set_xsrf(value);
        Ok(())
    }
}
