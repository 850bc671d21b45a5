//! # API Module
//!
//! HTTP endpoints of the short-lived listener that captures OAuth
//! authorization codes.
//!
//! - [`callback`] - Receives the consent redirect of Deezer or Spotify and
//!   hands the authorization code to the waiting authenticator.
//! - [`health`] - Returns status and version, handy to check that the
//!   redirect URI actually reaches this process.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use migratify::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
