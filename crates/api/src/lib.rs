//! REST backend integration for heliodesk.
//!
//! This crate owns the network boundary:
//! - **Client** (`client`) - typed wrapper over every backend endpoint
//! - **Errors** (`error`) - the failure taxonomy callers can branch on
//! - **Session** (`session`) - persisted operator session and bearer token
//!
//! All response bodies decode through `heliodesk_core::envelope`, so shape
//! detection lives in exactly one place. Failures stay typed up to the
//! caller; rendering them as user-facing notifications is the CLI's job.

pub mod client;
pub mod error;
pub mod session;

pub use client::ApiClient;
pub use error::ApiError;
pub use session::{Session, SessionError, SessionStore};
