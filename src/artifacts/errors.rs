//! User-facing failure categories
//!
//! Commands raise these through `anyhow::bail!`, so they travel inside an
//! `anyhow::Error` like any other failure. Callers that need the category back
//! use `error.downcast_ref::<GitletError>()`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GitletError {
    #[error("not a Gitlet repository")]
    NotInRepository,

    #[error("this operation must be run in a work tree")]
    BareRepositoryViolation,

    #[error("{0} did not match any files")]
    NoMatchingFiles(String),

    #[error("{0}")]
    UnsupportedOperation(String),

    /// Local modifications that the operation would overwrite or discard
    #[error("{reason}\n{}\n", .paths.join("\n"))]
    DirtyWorkingCopy {
        reason: &'static str,
        paths: Vec<String>,
    },

    #[error("# On {head}\nnothing to commit, working directory clean")]
    NothingToCommit { head: String },

    #[error(
        "{}\ncannot commit because you have unmerged files\n",
        .paths.iter().map(|path| format!("U {path}")).collect::<Vec<_>>().join("\n")
    )]
    UnresolvedConflicts { paths: Vec<String> },

    #[error("{0}")]
    InvalidRef(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0} does not appear to be a git repository")]
    UnknownRemote(String),

    #[error("{0}")]
    UnknownRevision(String),

    #[error("failed to push some refs to {url}")]
    PushRejected { url: String },

    #[error("corrupt index: {0}")]
    CorruptIndex(String),
}

impl GitletError {
    pub fn unsupported() -> Self {
        GitletError::UnsupportedOperation("unsupported".to_string())
    }
}
