//! Gitlet command implementations
//!
//! Every command is an `impl Repository` block, organized into two categories
//! following Git's architecture:
//!
//! - `plumbing`: Low-level commands for direct object, index and ref manipulation
//! - `porcelain`: User-facing commands for version control workflows (add, commit, merge, etc.)
//!
//! Plumbing commands provide building blocks, while porcelain commands compose
//! them into higher-level operations.

pub mod plumbing;
pub mod porcelain;
