//! # CLI Module
//!
//! One function per command of the `migratify` binary. Each stage command
//! checks that the previous stage left its snapshot on disk, does its work
//! through the service clients and the reconciliation engine, and writes its
//! own snapshot for the next command.
//!
//! ## Command Sequence
//!
//! ```bash
//! migratify auth source            # Authorize Deezer
//! migratify auth destination       # Authorize Spotify
//! migratify enumerate              # Snapshot the Deezer library
//! migratify search                 # Search Spotify, resumable
//! migratify resolve                # Build the work set
//! migratify manual tracks          # Review what could not be matched
//! migratify apply                  # Write the library to Spotify
//! migratify status                 # Show which stages are done
//! ```
//!
//! Every command is re-runnable. `search` skips entities that already have
//! a record and `apply` only adds playlist tracks that are missing.
//!
//! Errors are returned to the binary, which reports them and exits with a
//! non-zero status.

mod apply;
mod auth;
mod enumerate;
mod manual;
mod resolve;
mod search;
mod status;

pub use apply::apply;
pub use auth::{ServiceRole, auth};
pub use enumerate::enumerate;
pub use manual::{ManualSection, manual};
pub use resolve::resolve;
pub use search::search;
pub use status::status;
