//! Plumbing commands (low-level Gitlet operations)
//!
//! Plumbing commands provide direct access to Gitlet's internal data structures
//! and operations. They're primarily used for scripting and as building blocks
//! for porcelain commands.
//!
//! ## Commands
//!
//! - `hash-object`: Compute object ID and optionally store in database
//! - `cat-file`: Print a stored object
//! - `write-tree`: Store the index as a tree
//! - `update-index`: Stage or unstage a single file
//! - `update-ref`: Point a ref at a commit

pub mod cat_file;
pub mod hash_object;
pub mod update_index;
pub mod update_ref;
pub mod write_tree;
