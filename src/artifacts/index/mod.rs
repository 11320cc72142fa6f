//! Gitlet index file format
//!
//! The index (also called staging area) records what the next commit will
//! contain, and doubles as the record of unresolved merge conflicts.
//!
//! ## File Format
//!
//! One line per `(path, stage)` pair, sorted by path then stage:
//!
//! ```text
//! <path> <stage> <hash>
//! ```
//!
//! Stage 0 is normal staged content. Stages 1, 2 and 3 hold the base, receiver
//! and giver versions of a path in conflict.

pub mod index_entry;
