//! Gitlet data structures and algorithms
//!
//! This module contains the pure types and algorithms the repository areas are
//! built from:
//!
//! - `config`: Repository config model and its text grammar
//! - `diff`: Table-of-contents diffing (two-way and three-way)
//! - `errors`: User-facing failure categories
//! - `index`: Index entries and conflict stages
//! - `merge`: Ancestry queries and merge planning
//! - `objects`: Gitlet object types (blob, tree, commit)
//! - `status`: Working tree status inspection

pub mod config;
pub mod diff;
pub mod errors;
pub mod index;
pub mod merge;
pub mod objects;
pub mod status;
