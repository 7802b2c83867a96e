//! Session token state and the token acquisition chain
//!
//! After a successful login the session holds one cookie-issued xsrf token
//! and, once [`acquire_tokens`] has run, two bearer credentials:
//! - the access token, authorizing folder-listing calls
//! - the health token, a password-reconfirmed credential required for
//!   document search and content retrieval
//!
//! The xsrf token is invalidated whenever the server rewrites the cookie jar,
//! so it is re-read after every call that may rotate cookies.

use crate::session::client::{VaultSession, XSRF_HEADER};
use crate::{CoffreError, Result};
use serde::{Deserialize, Serialize};

/// Mutable token state scoped to one [`VaultSession`]
#[derive(Debug, Clone, Default)]
pub struct SessionTokens {
    xsrf_token: Option<String>,
    access_token: Option<String>,
    health_token: Option<String>,
}

impl SessionTokens {
    /// Current xsrf token, or `ServiceUnavailable` when none has been read yet
    pub fn xsrf(&self) -> Result<&str> {
        self.xsrf_token
            .as_deref()
            .ok_or_else(|| CoffreError::vendor_down("no xsrf token in the session"))
    }

    /// Access token for folder-listing calls
    pub fn access(&self) -> Result<&str> {
        self.access_token
            .as_deref()
            .ok_or_else(|| CoffreError::vendor_down("no access token in the session"))
    }

    /// Health token for document search and content retrieval
    pub fn health(&self) -> Result<&str> {
        self.health_token
            .as_deref()
            .ok_or_else(|| CoffreError::vendor_down("no health token in the session"))
    }

    pub(crate) fn set_xsrf(&mut self, value: String) {
        self.xsrf_token = Some(value);
    }

    pub(crate) fn set_access(&mut self, value: String) {
        self.access_token = Some(value);
    }

    pub(crate) fn set_health(&mut self, value: String) {
        self.health_token = Some(value);
    }
}

/// Token-exchange response body; both exchanges use the same shape
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthTokenRequest<'a> {
    password: &'a str,
}

/// Acquires the full token chain for a freshly logged-in session
///
/// Sequence, each step fatal on failure:
/// 1. Read the xsrf cookie left by the login flow
/// 2. Exchange it for the access token (`X-XSRF-TOKEN` header)
/// 3. Exchange the access token plus the re-submitted password for the
///    health token; a response without a token fails here rather than
///    surfacing later as authorization failures on document fetches
/// 4. Re-read the xsrf cookie, since the exchanges may rotate it
///
/// # Arguments
///
/// * `session` - The session to mutate; must have completed login
/// * `password` - The account password, re-confirmed for the health token
pub async fn acquire_tokens(session: &mut VaultSession, password: &str) -> Result<()> {
    session.refresh_xsrf_token()?;

    tracing::info!("Getting the app access token");
    let response = session
        .client()
        .post(session.endpoints().security_tokens().clone())
        .header(XSRF_HEADER, session.tokens().xsrf()?)
        .send()
        .await?
        .error_for_status()?;

    let body: TokenResponse = response.json().await?;
    let access = body
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::error!("Problem fetching the access token");
            CoffreError::vendor_down("token endpoint returned no access_token")
        })?;
    session.tokens_mut().set_access(access);

    tracing::info!("Getting the health token");
    let response = session
        .client()
        .post(session.endpoints().health_token().clone())
        .bearer_auth(session.tokens().access()?)
        .header(reqwest::header::ACCEPT, "application/json, text/plain, */*")
        .json(&HealthTokenRequest { password })
        .send()
        .await?
        .error_for_status()?;

    let body: TokenResponse = response.json().await?;
    let health = body
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::error!("Problem fetching the health token");
            CoffreError::vendor_down("health-token endpoint returned no access_token")
        })?;
    session.tokens_mut().set_health(health);

    // The exchanges above may have rotated the cookie
    session.refresh_xsrf_token()?;

    Ok(())
}
