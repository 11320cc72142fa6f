use crate::areas::refs::HEAD;
use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;
use std::io::Write;

impl Repository {
    /// Switch the working copy, index and HEAD to a branch or a commit
    ///
    /// Checking out a local branch attaches HEAD to it; anything else detaches HEAD.
    pub fn checkout(&self, reference: &str) -> anyhow::Result<()> {
        self.assert_not_bare()?;

        let database = self.database();
        let refs = self.refs();

        let Some(to_oid) = refs
            .hash(reference, database)?
            .filter(|oid| database.exists(oid))
        else {
            anyhow::bail!(GitletError::UnknownRevision(format!(
                "{reference} did not match any file(s) known to Gitlet"
            )));
        };

        if !database.is_commit(&to_oid)? {
            anyhow::bail!(GitletError::InvalidRef(format!(
                "reference is not a tree: {reference}"
            )));
        }

        let target_branch = refs.local_branch_name(reference)?;
        let head_branch = refs.head_branch_name()?;
        let head = refs.hash(HEAD, database)?;

        if let Some(branch) = target_branch
            .as_ref()
            .filter(|branch| head_branch.as_ref() == Some(*branch))
        {
            writeln!(self.writer(), "Already on {branch}")?;
            return Ok(());
        }
        let is_detached_on_target = head_branch.is_none() && head.as_ref() == Some(&to_oid);
        if is_detached_on_target && reference == to_oid.as_ref() {
            writeln!(self.writer(), "Already on {reference}")?;
            return Ok(());
        }

        let mut index = self.load_index()?;
        let paths = self
            .inspector()
            .changed_files_commit_would_overwrite(&index, &to_oid)?;
        if !paths.is_empty() {
            anyhow::bail!(GitletError::DirtyWorkingCopy {
                reason: "local changes would be lost",
                paths,
            });
        }

        let diff = self.inspector().diff(&index, head.as_ref(), Some(&to_oid))?;
        self.workspace()?.apply_diff(&diff, database)?;

        match &target_branch {
            Some(branch) => refs.set_head_branch(branch)?,
            None => refs.detach_head(&to_oid)?,
        }

        index.toc_to_index(&database.commit_toc(Some(&to_oid))?);
        index.write_updates()?;

        match target_branch {
            Some(branch) => writeln!(self.writer(), "Switched to branch {branch}")?,
            None => writeln!(
                self.writer(),
                "Note: checking out {to_oid}\nYou are in detached HEAD state."
            )?,
        }

        Ok(())
    }
}
