use crate::areas::refs::{FetchRecord, Refs};
use crate::areas::remote::{LocalRemote, RemoteRepository};
use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;
use std::io::Write;

/// One remote branch brought in by a fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBranch {
    pub branch: String,
    pub remote: String,
    /// The remote-tracking ref moved to a commit that does not descend from its old value
    pub forced: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub url: String,
    pub object_count: usize,
    pub branches: Vec<FetchedBranch>,
}

impl std::fmt::Display for FetchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "From {}\nCount {}", self.url, self.object_count)?;

        for fetched in &self.branches {
            write!(f, "\n{} -> {}/{}", fetched.branch, fetched.remote, fetched.branch)?;
            if fetched.forced {
                write!(f, " (forced)")?;
            }
        }

        Ok(())
    }
}

impl Repository {
    pub fn fetch(&self, remote: &str, branch: Option<&str>) -> anyhow::Result<()> {
        let report = self.fetch_from(remote, branch)?;
        writeln!(self.writer(), "{}", report)?;

        Ok(())
    }

    /// Open a configured remote by name
    pub(crate) fn open_remote(&self, name: &str) -> anyhow::Result<LocalRemote> {
        let config = self.config().read()?;
        let remote_config = config
            .remote(name)
            .ok_or_else(|| GitletError::UnknownRemote(name.to_string()))?;

        LocalRemote::open(&remote_config.url, self.root())
    }

    /// Copy the remote's objects and move `refs/remotes/<remote>/<branch>` for
    /// `branch`, or for every remote branch when none is given
    pub(crate) fn fetch_from(&self, remote: &str, branch: Option<&str>) -> anyhow::Result<FetchReport> {
        let remote_repository = self.open_remote(remote)?;
        let database = self.database();

        let branches = match branch {
            Some(branch) => vec![branch.to_string()],
            None => remote_repository.local_branches()?,
        };

        let mut new_hashes = Vec::with_capacity(branches.len());
        for branch in &branches {
            let Some(new_hash) = remote_repository.ref_hash(&Refs::to_local_ref(branch))? else {
                anyhow::bail!(GitletError::UnknownRevision(format!(
                    "couldn't find remote ref {branch}"
                )));
            };
            new_hashes.push((branch.clone(), new_hash));
        }

        let remote_objects = remote_repository.all_objects()?;
        for object in &remote_objects {
            database.write(object)?;
        }
        tracing::info!(remote, objects = remote_objects.len(), "fetched objects");

        let mut fetched = Vec::with_capacity(new_hashes.len());
        let mut records = Vec::with_capacity(new_hashes.len());
        for (branch, new_hash) in new_hashes {
            let remote_ref = Refs::to_remote_ref(remote, &branch);
            let old_hash = self.refs().hash(&remote_ref, database)?;
            let forced = database.is_a_force_fetch(old_hash.as_ref(), &new_hash)?;

            self.update_ref(&remote_ref, new_hash.as_ref())?;

            records.push(FetchRecord {
                oid: new_hash,
                branch: branch.clone(),
                url: remote_repository.url().to_string(),
            });
            fetched.push(FetchedBranch {
                branch,
                remote: remote.to_string(),
                forced,
            });
        }

        if !records.is_empty() {
            self.refs().write_fetch_records(&records)?;
        }

        Ok(FetchReport {
            url: remote_repository.url().to_string(),
            object_count: remote_objects.len(),
            branches: fetched,
        })
    }
}
