//! Gitlet object types and operations
//!
//! Gitlet stores all content as objects identified by SHA-1 hashes of their
//! serialized text. There are three kinds:
//!
//! - **Blob**: File content, stored verbatim
//! - **Tree**: Directory listing, one `blob <hash> <name>` or `tree <hash> <name>` per line
//! - **Commit**: Snapshot pointer with tree, parents, timestamp and message
//!
//! Objects carry no stored type tag. The type is recovered by sniffing the first
//! token of the content (see [`object_type::ObjectType::sniff`]) and is attached
//! once, when an object is parsed into an [`object::ObjectBox`].

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
