//! Porcelain commands (user-facing Gitlet operations)
//!
//! Porcelain commands provide the high-level user interface for version control.
//! They compose plumbing commands and internal operations into workflows that
//! match typical Git usage patterns.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`, `rm`: Stage and unstage files
//! - `commit`: Create a new commit
//! - `status`, `diff`, `log`: Inspect the working copy and history
//! - `branch`, `checkout`: Create, list and switch branches
//! - `merge`: Join another branch into the current one
//! - `remote`, `fetch`, `pull`, `push`, `clone`: Exchange commits with other repositories

pub mod add;
pub mod branch;
pub mod checkout;
pub mod clone;
pub mod commit;
pub mod diff;
pub mod fetch;
pub mod init;
pub mod log;
pub mod merge;
pub mod pull;
pub mod push;
pub mod remote;
pub mod rm;
pub mod status;
