use crate::areas::refs::{HEAD, MERGE_HEAD, Refs};
use crate::areas::repository::Repository;
use crate::artifacts::diff::toc_diff::toc_diff;
use crate::artifacts::errors::GitletError;
use crate::artifacts::merge::{has_conflicts, merge_message, merged_index_entries};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

impl Repository {
    pub fn merge(&self, reference: &str) -> anyhow::Result<()> {
        let summary = self.merge_ref(reference)?;
        writeln!(self.writer(), "{}", summary)?;

        Ok(())
    }

    /// Merge the commit `reference` resolves to into the current branch
    ///
    /// Every check runs before the index, working copy or refs are touched.
    pub(crate) fn merge_ref(&self, reference: &str) -> anyhow::Result<String> {
        self.assert_not_bare()?;

        let database = self.database();
        let refs = self.refs();

        if refs.is_head_detached()? {
            anyhow::bail!(GitletError::unsupported());
        }

        let receiver = refs.hash(HEAD, database)?;
        let giver = match refs.hash(reference, database)? {
            Some(oid) if database.is_commit(&oid)? => oid,
            _ => anyhow::bail!(GitletError::InvalidRef(format!(
                "{reference}: expected commit type"
            ))),
        };

        if database.is_up_to_date(receiver.as_ref(), &giver)? {
            tracing::info!(%giver, "merge is up to date");
            return Ok("Already up-to-date".to_string());
        }

        let index = self.load_index()?;
        let paths = self
            .inspector()
            .changed_files_commit_would_overwrite(&index, &giver)?;
        if !paths.is_empty() {
            anyhow::bail!(GitletError::DirtyWorkingCopy {
                reason: "local changes would be lost",
                paths,
            });
        }

        match receiver {
            Some(receiver) if !database.can_fast_forward(Some(&receiver), &giver)? => {
                let is_conflicted = self.write_non_fast_forward_merge(&receiver, &giver, reference)?;

                if is_conflicted {
                    tracing::info!(%receiver, %giver, "merge stopped on conflicts");
                    return Ok(
                        "Automatic merge failed. Fix conflicts and commit the result.".to_string(),
                    );
                }

                tracing::info!(%receiver, %giver, "three-way merge");
                self.write_index_commit("")
            }
            receiver => {
                tracing::info!(%giver, "fast-forward merge");
                self.write_fast_forward_merge(receiver.as_ref(), &giver)?;
                Ok("Fast-forward".to_string())
            }
        }
    }

    /// Move the current branch to `giver` and bring the index and working copy along
    pub(crate) fn write_fast_forward_merge(
        &self,
        receiver: Option<&ObjectId>,
        giver: &ObjectId,
    ) -> anyhow::Result<()> {
        let database = self.database();
        let branch = self
            .refs()
            .head_branch_name()?
            .ok_or_else(GitletError::unsupported)?;

        self.refs().write(&Refs::to_local_ref(&branch), giver.as_ref())?;

        let giver_toc = database.commit_toc(Some(giver))?;
        let mut index = self.load_index()?;
        index.toc_to_index(&giver_toc);
        index.write_updates()?;

        if !self.is_bare() {
            let receiver_toc = database.commit_toc(receiver)?;
            let diff = toc_diff(&receiver_toc, &giver_toc, None)?;
            self.workspace()?.apply_diff(&diff, database)?;
        }

        Ok(())
    }

    /// Record a three-way merge in `MERGE_HEAD`, `MERGE_MSG`, the index and the working copy
    ///
    /// Returns whether any path ended up in conflict.
    fn write_non_fast_forward_merge(
        &self,
        receiver: &ObjectId,
        giver: &ObjectId,
        giver_ref: &str,
    ) -> anyhow::Result<bool> {
        let database = self.database();
        let branch = self
            .refs()
            .head_branch_name()?
            .ok_or_else(GitletError::unsupported)?;

        self.refs().write(MERGE_HEAD, giver.as_ref())?;

        let base = database.common_ancestor(receiver, giver)?;
        let merge_diff = toc_diff(
            &database.commit_toc(Some(receiver))?,
            &database.commit_toc(Some(giver))?,
            Some(&database.commit_toc(base.as_ref())?),
        )?;

        std::fs::write(
            self.merge_msg_path(),
            merge_message(giver_ref, &branch, &merge_diff),
        )
        .context("Unable to write MERGE_MSG")?;

        let mut index = self.load_index()?;
        index.replace(merged_index_entries(&merge_diff)?);
        index.write_updates()?;

        self.workspace()?.apply_diff(&merge_diff, database)?;

        Ok(has_conflicts(&merge_diff))
    }
}
