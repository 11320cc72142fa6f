//! Table-of-contents diffing
//!
//! Diffs here are whole-file: a path is classified by comparing the blob hashes
//! recorded for it on each side, never by comparing lines.

pub mod toc_diff;
