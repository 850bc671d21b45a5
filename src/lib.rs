//! Deezer to Spotify Library Migration Library
//!
//! This library provides the building blocks for moving a music library from
//! Deezer to Spotify: an authenticated, paginating HTTP client for both
//! services, the source enumerator, the reconciliation engine that maps Deezer
//! entities onto Spotify identifiers, and the applier that replays the result
//! against the destination account.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback listener
//! - `cli` - Command-line interface implementations
//! - `client` - Authenticated paginated client, session state and transport
//! - `config` - Configuration management and environment variables
//! - `deezer` - Source service: authentication and library enumeration
//! - `error` - Crate error type
//! - `management` - Persisted snapshots, token files and pipeline state
//! - `reconcile` - Query building, candidate resolution and work-set building
//! - `server` - Local HTTP server capturing OAuth authorization codes
//! - `spotify` - Destination service: authentication, search and mutations
//! - `sync` - Search stage and sync applier
//! - `types` - Data structures shared by all stages
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```no_run
//! use migratify::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> migratify::Res<()> {
//!     config::load_env().await?;
//!     cli::status().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod deezer;
pub mod error;
pub mod management;
pub mod reconcile;
pub mod server;
pub mod spotify;
pub mod sync;
pub mod types;
pub mod utils;

pub use error::SyncError;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in the crate reports a [`SyncError`], so callers
/// can tell fatal authentication and transport failures apart from
/// persistence problems without string matching.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, SyncError>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```ignore
/// info!("Searching {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```ignore
/// success!("Followed {} artists", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Only the binary uses it, after a
/// fatal [`SyncError`] has propagated all the way up.
///
/// # Example
///
/// ```ignore
/// error!("Search stage aborted: {}", err);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues: a rejected token that is about to be
/// re-issued, a gateway timeout that is about to be retried, an entity that
/// needs manual review.
///
/// # Example
///
/// ```ignore
/// warning!("No result found for {}", query);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
