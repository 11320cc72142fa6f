use crate::areas::index::Index;
use crate::areas::refs::HEAD;
use crate::areas::repository::Repository;
use crate::artifacts::diff::toc_diff::{Diff, FileStatus, name_status, toc_diff};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Toc;
use derive_new::new;
use std::collections::BTreeSet;

#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl<'r> Inspector<'r> {
    fn head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.repository
            .refs()
            .hash(HEAD, self.repository.database())
    }

    fn head_toc(&self) -> anyhow::Result<Toc> {
        self.repository
            .database()
            .commit_toc(self.head()?.as_ref())
    }

    fn working_copy_toc(&self, index: &Index) -> anyhow::Result<Toc> {
        index.working_copy_toc(self.repository.workspace()?)
    }

    /// Two-way diff between two snapshots
    ///
    /// The left side is the commit `from`, or the index when absent. The right
    /// side is the commit `to`, or the working copy when absent.
    pub fn diff(
        &self,
        index: &Index,
        from: Option<&ObjectId>,
        to: Option<&ObjectId>,
    ) -> anyhow::Result<Diff> {
        let database = self.repository.database();

        let receiver = match from {
            Some(from) => database.commit_toc(Some(from))?,
            None => index.toc(),
        };
        let giver = match to {
            Some(to) => database.commit_toc(Some(to))?,
            None => self.working_copy_toc(index)?,
        };

        toc_diff(&receiver, &giver, None)
    }

    /// Paths that differ between HEAD and the index
    pub fn to_be_committed(&self, index: &Index) -> anyhow::Result<Diff> {
        toc_diff(&self.head_toc()?, &index.toc(), None)
    }

    /// Paths changed between HEAD and the working copy, deletions left out
    pub fn added_or_modified_files(&self, index: &Index) -> anyhow::Result<Vec<String>> {
        let diff = toc_diff(&self.head_toc()?, &self.working_copy_toc(index)?, None)?;

        Ok(name_status(&diff)
            .into_iter()
            .filter(|(_, status)| *status != FileStatus::Delete)
            .map(|(path, _)| path)
            .collect())
    }

    /// Locally changed paths that moving to `target` would also change
    ///
    /// Local changes are the paths where the index or the working copy differs
    /// from HEAD, so staged work is protected even when the file on disk has
    /// been put back. They are intersected with the paths changed between HEAD
    /// and `target`.
    pub fn changed_files_commit_would_overwrite(
        &self,
        index: &Index,
        target: &ObjectId,
    ) -> anyhow::Result<Vec<String>> {
        let head_toc = self.head_toc()?;

        let staged_changes = name_status(&toc_diff(&head_toc, &index.toc(), None)?);
        let unstaged_changes =
            name_status(&toc_diff(&head_toc, &self.working_copy_toc(index)?, None)?);
        let target_changes = name_status(&toc_diff(
            &head_toc,
            &self.repository.database().commit_toc(Some(target))?,
            None,
        )?);

        let local_changes = staged_changes
            .into_keys()
            .chain(unstaged_changes.into_keys())
            .collect::<BTreeSet<_>>();
        Ok(target_changes
            .into_keys()
            .filter(|path| local_changes.contains(path))
            .collect())
    }
}
