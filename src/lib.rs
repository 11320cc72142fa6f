//! Gitlet: a small Git-compatible version control core
//!
//! - `areas`: the on-disk parts of a repository (objects, index, refs, config, working copy)
//! - `artifacts`: pure data types and algorithms (objects, diffs, merges, config grammar, errors)
//! - `commands`: one `impl Repository` block per user command

pub mod areas;
pub mod artifacts;
pub mod commands;

pub use areas::repository::Repository;
pub use artifacts::errors::GitletError;
