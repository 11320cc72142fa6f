//! Working tree status inspection
//!
//! This module compares HEAD, the index and the working copy.
//!
//! ## Components
//!
//! - `inspector`: Diff queries between commits, the index and the working copy
//! - `status_info`: Status information aggregation and display

pub mod inspector;
pub mod status_info;
