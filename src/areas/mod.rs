//! Core repository components
//!
//! This module contains the stateful building blocks of a Gitlet repository:
//!
//! - `config`: The repository config file
//! - `database`: Object database for storing blobs, trees, and commits
//! - `index`: Staging area, including unresolved merge conflicts
//! - `refs`: Reference management (branches, HEAD, pseudo-refs)
//! - `remote`: Access to other repositories for fetch, push and clone
//! - `repository`: High-level repository operations and coordination
//! - `workspace`: Working directory file system operations

pub mod config;
pub mod database;
pub mod index;
pub mod refs;
pub mod remote;
pub mod repository;
pub mod workspace;
