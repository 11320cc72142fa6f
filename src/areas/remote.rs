//! Access to another repository
//!
//! Fetch, push and clone talk to remotes only through [`RemoteRepository`]. The
//! one transport is [`LocalRemote`], which opens a second repository handle on
//! a filesystem path; the local repository is never re-pointed.

use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::path::Path;

pub trait RemoteRepository {
    /// Location as recorded in the config
    fn url(&self) -> &str;

    /// Commit a branch name or ref points at on the remote
    fn ref_hash(&self, name: &str) -> anyhow::Result<Option<ObjectId>>;

    fn local_branches(&self) -> anyhow::Result<Vec<String>>;

    fn all_objects(&self) -> anyhow::Result<Vec<Bytes>>;

    fn write_object(&self, content: &[u8]) -> anyhow::Result<ObjectId>;

    fn update_ref(&self, name: &str, oid: &ObjectId) -> anyhow::Result<()>;

    fn is_checked_out(&self, branch: &str) -> anyhow::Result<bool>;
}

pub struct LocalRemote {
    url: String,
    repository: Repository,
}

impl LocalRemote {
    /// Open the repository at `url`, resolved against `base` when relative
    pub fn open(url: &str, base: &Path) -> anyhow::Result<Self> {
        let path = base.join(url);

        let repository = Repository::open(&path, Box::new(std::io::sink())).map_err(|error| {
            match error.downcast_ref::<GitletError>() {
                Some(GitletError::NotInRepository) => {
                    GitletError::UnknownRemote(url.to_string()).into()
                }
                _ => error,
            }
        })?;

        Ok(LocalRemote {
            url: url.to_string(),
            repository,
        })
    }
}

impl RemoteRepository for LocalRemote {
    fn url(&self) -> &str {
        &self.url
    }

    fn ref_hash(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        self.repository
            .refs()
            .hash(name, self.repository.database())
    }

    fn local_branches(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.repository.refs().local_heads()?.into_keys().collect())
    }

    fn all_objects(&self) -> anyhow::Result<Vec<Bytes>> {
        self.repository.database().all_objects()
    }

    fn write_object(&self, content: &[u8]) -> anyhow::Result<ObjectId> {
        self.repository.database().write(content)
    }

    fn update_ref(&self, name: &str, oid: &ObjectId) -> anyhow::Result<()> {
        self.repository.update_ref(name, oid.as_ref())
    }

    fn is_checked_out(&self, branch: &str) -> anyhow::Result<bool> {
        self.repository.is_checked_out(branch)
    }
}
