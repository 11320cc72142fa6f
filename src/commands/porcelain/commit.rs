use crate::areas::refs::{HEAD, MERGE_HEAD};
use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;
use anyhow::Context;
use std::io::Write;

impl Repository {
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        self.assert_not_bare()?;

        let summary = self.write_index_commit(message)?;
        writeln!(self.writer(), "{}", summary)?;

        Ok(())
    }

    /// Commit the index and return the line reported to the user
    ///
    /// While a merge is in progress the message comes from `MERGE_MSG` and the
    /// commit gets `MERGE_HEAD` as its second parent.
    pub(crate) fn write_index_commit(&self, message: &str) -> anyhow::Result<String> {
        let database = self.database();
        let refs = self.refs();
        let index = self.load_index()?;

        let head_desc = refs
            .head_branch_name()?
            .unwrap_or_else(|| "detached HEAD".to_string());
        let is_merge_in_progress = refs.is_merge_in_progress(database)?;

        let conflicted_paths = index.conflicted_paths();
        if !conflicted_paths.is_empty() {
            anyhow::bail!(GitletError::UnresolvedConflicts {
                paths: conflicted_paths
            });
        }

        let tree_oid = self.store_index_tree(&index)?;
        if let Some(head) = refs.hash(HEAD, database)?
            && !is_merge_in_progress
            && database.tree_hash(&head)? == tree_oid
        {
            anyhow::bail!(GitletError::NothingToCommit { head: head_desc });
        }

        let message = if is_merge_in_progress {
            std::fs::read_to_string(self.merge_msg_path()).context("Unable to read MERGE_MSG")?
        } else {
            message.to_string()
        };

        let parents = refs.commit_parent_hashes(database)?;
        let commit_oid = database.write_commit(tree_oid, message.clone(), parents)?;
        self.update_ref(HEAD, commit_oid.as_ref())?;

        if is_merge_in_progress {
            std::fs::remove_file(self.merge_msg_path()).context("Unable to remove MERGE_MSG")?;
            refs.rm(MERGE_HEAD)?;
            return Ok("Merge made by the three-way strategy".to_string());
        }

        Ok(format!("[{head_desc} {commit_oid}] {message}"))
    }
}
