use crate::session::VaultEndpoints;
use url::Url;

/// Outcome of a login attempt, decided from the final landing URL
///
/// The vendor signals the result of the form submission through where the
/// redirect chain ends, not through status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Landed on the secure-area home: the session is authenticated
    Success,

    /// Landed back on the identity provider's own login page: the provider
    /// never handed control back, the email/password pair was rejected
    InvalidCredentials,

    /// Landed on the security-question interstitial: the account needs a
    /// one-time manual setup on the vendor site, not retryable by the agent
    UserActionRequired,

    /// Landed anywhere else: treated as a vendor-side failure
    ServiceUnavailable,
}

/// Classifies the final landing URL of the login redirect chain
///
/// Pure decision table, decoupled from the HTTP call so the branching can be
/// tested without a server.
///
/// # Arguments
///
/// * `landed` - The URL the redirect chain settled on
/// * `endpoints` - The resolved endpoint set to compare against
pub fn classify_landing(landed: &Url, endpoints: &VaultEndpoints) -> LoginOutcome {
    if landed == endpoints.secure_home() {
        LoginOutcome::Success
    } else if landed == endpoints.provider_login() {
        LoginOutcome::InvalidCredentials
    } else if landed == endpoints.security_question() {
        LoginOutcome::UserActionRequired
    } else {
        LoginOutcome::ServiceUnavailable
    }
}
