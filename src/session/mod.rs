//! HTTP session, endpoint resolution and token state
//!
//! This module contains everything tied to the lifetime of one authenticated
//! run against the vault:
//! - Building the HTTP client bound to a single cookie jar
//! - The [`VaultSession`] context carrying client, endpoints and tokens
//! - The token acquisition chain (xsrf cookie → access token → health token)

mod client;
mod endpoints;
mod tokens;

pub use client::{build_http_client, VaultSession, XSRF_COOKIE, XSRF_HEADER};
pub use endpoints::VaultEndpoints;
pub use tokens::{acquire_tokens, SessionTokens};
