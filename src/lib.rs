//! # authform
//!
//! `authform` implements the sign-in and sign-up forms of an auth front end:
//! local validation, payload construction, the sign-up country policy, and the
//! translation of server failures into per-field errors.
//!
//! ## Flow
//!
//! - **Sign-in:** the active tab (email or mobile) selects the rule set. A
//!   mobile identifier is the country's dial prefix followed by the digits.
//! - **Sign-up:** the full record is validated, then the country deny-list is
//!   checked. Both happen before any request is made.
//! - **Errors:** local and server errors share one shape, a map from field
//!   path to message with `_global` for banner messages.
//!
//! The [`client`] module talks to `POST /auth/login` and
//! `POST /auth/register`; the [`cli`] module drives both forms from the
//! command line.

pub mod cli;
pub mod client;
pub mod forms;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
