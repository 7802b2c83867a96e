//! Vendor login flow
//!
//! Fetches the vendor's login page, fills its form with the account
//! credentials and submits it through the shared session, following
//! redirects. The outcome is decided from the final landing URL by
//! [`classify_landing`].

use crate::auth::outcome::{classify_landing, LoginOutcome};
use crate::session::VaultSession;
use crate::{CoffreError, Result};
use scraper::{Html, Selector};
use url::Url;

/// Form field the vendor expects the email under
const USERNAME_FIELD: &str = "_username";

/// Form field the vendor expects the password under
const PASSWORD_FIELD: &str = "_password";

/// Account credentials, borrowed from the configuration for the login call
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// The vendor login form as found on the login page
#[derive(Debug, Clone)]
struct LoginForm {
    /// Submission URL, resolved against the page the form was served on
    action: Url,

    /// Hidden fields to echo back with the submission
    fields: Vec<(String, String)>,
}

/// Logs the account in through the vendor's web flow
///
/// Side effect on success: the session's cookie jar holds a fresh xsrf
/// cookie, ready for the token chain.
///
/// # Arguments
///
/// * `session` - The session whose client and cookie jar carry the flow
/// * `credentials` - The account email and password
///
/// # Returns
///
/// * `Ok(())` - Landed on the secure-area home
/// * `Err(CoffreError::InvalidCredentials)` - The provider rejected the pair
/// * `Err(CoffreError::UserActionRequired)` - Security-question interstitial
/// * `Err(CoffreError::ServiceUnavailable)` - Unexpected landing URL
pub async fn login(session: &VaultSession, credentials: &Credentials<'_>) -> Result<()> {
    tracing::info!("Fetching the vendor login page");
    let response = session
        .client()
        .get(session.endpoints().login_page().clone())
        .send()
        .await?
        .error_for_status()?;

    let page_url = response.url().clone();
    let html = response.text().await?;
    let form = parse_login_form(&html, &page_url)?;

    let mut fields = form.fields;
    fields.push((USERNAME_FIELD.to_string(), credentials.email.to_string()));
    fields.push((PASSWORD_FIELD.to_string(), credentials.password.to_string()));

    tracing::info!("Submitting the login form");
    let response = session
        .client()
        .post(form.action)
        .form(&fields)
        .send()
        .await?;
    let landed = response.url().clone();

    match classify_landing(&landed, session.endpoints()) {
        LoginOutcome::Success => {
            tracing::info!("Login succeeded");
            Ok(())
        }
        LoginOutcome::InvalidCredentials => Err(CoffreError::InvalidCredentials),
        LoginOutcome::UserActionRequired => Err(CoffreError::UserActionRequired),
        LoginOutcome::ServiceUnavailable => {
            tracing::error!("Unexpected landing URL after login: {}", landed);
            Err(CoffreError::vendor_down(format!(
                "unexpected landing URL after login: {}",
                landed
            )))
        }
    }
}

/// Extracts the first form on the login page: action URL and hidden fields
fn parse_login_form(html: &str, page_url: &Url) -> Result<LoginForm> {
    let document = Html::parse_document(html);
    let form_selector = Selector::parse("form").unwrap();
    let hidden_selector = Selector::parse(r#"input[type="hidden"]"#).unwrap();

    let form = document.select(&form_selector).next().ok_or_else(|| {
        CoffreError::LoginForm("no <form> element on the login page".to_string())
    })?;

    // A missing or empty action submits back to the page itself
    let action = match form.value().attr("action") {
        Some(action) if !action.is_empty() => page_url.join(action)?,
        _ => page_url.clone(),
    };

    let mut fields = Vec::new();
    for input in form.select(&hidden_selector) {
        if let Some(name) = input.value().attr("name") {
            let value = input.value().attr("value").unwrap_or("");
            fields.push((name.to_string(), value.to_string()));
        }
    }

    Ok(LoginForm { action, fields })
}
