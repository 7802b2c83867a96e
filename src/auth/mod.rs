//! Authentication against the vendor's web login flow
//!
//! This module drives the login form submission and decides the outcome from
//! the final landing URL:
//! - Form fetch, fill and submission through the shared session
//! - The pure landing-URL decision table

mod login;
mod outcome;

pub use login::{login, Credentials};
pub use outcome::{classify_landing, LoginOutcome};
