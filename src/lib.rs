//! # Siswa (Student Management System client)
//!
//! `siswa` is the administrative client for the Siswa Manager REST service. It
//! manages students ("siswa"), their hobbies and phone numbers, system users and
//! the operator's own profile.
//!
//! ## Layers
//!
//! - **Transport (`api`):** one configured HTTP client, bearer-token headers,
//!   timeouts and decoding of the two envelope shapes the service emits
//!   (`{success, data, message, errors}` and `{status, data, message}`).
//! - **Resources (`features`):** thin wrappers per remote resource. Each owns its
//!   request/response types, payload formatting and form validation.
//! - **Session (`session`):** the API token is a single string persisted between
//!   invocations. It is read, written and removed; nothing else.
//! - **Views (`views`):** filtering, client-side pagination and table rendering
//!   for the dashboard sections.
//!
//! The server owns every record; the client only holds transient copies.

pub mod api;
pub mod cli;
pub mod features;
pub mod format;
pub mod session;
pub mod validation;
pub mod views;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
