use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;
use crate::commands::plumbing::update_index::UpdateIndexFlags;

impl Repository {
    pub fn rm(&self, path: &str, recursive: bool, force: bool) -> anyhow::Result<()> {
        self.assert_not_bare()?;

        let file_path = self.relative_path(path)?;
        let mut index = self.load_index()?;
        let files_to_rm = index.matching_files(&file_path);

        if force {
            anyhow::bail!(GitletError::unsupported());
        }
        if files_to_rm.is_empty() {
            anyhow::bail!(GitletError::NoMatchingFiles(file_path));
        }

        let workspace = self.workspace()?;
        if workspace.is_dir(&file_path) && !recursive {
            anyhow::bail!(GitletError::UnsupportedOperation(format!(
                "not removing {file_path} recursively without -r"
            )));
        }

        let changes_to_rm = self
            .inspector()
            .added_or_modified_files(&index)?
            .into_iter()
            .filter(|changed| files_to_rm.contains(changed))
            .collect::<Vec<_>>();
        if !changes_to_rm.is_empty() {
            anyhow::bail!(GitletError::DirtyWorkingCopy {
                reason: "these files have changes:",
                paths: changes_to_rm,
            });
        }

        for file in &files_to_rm {
            workspace.remove_file(file)?;
            self.update_index_entry(&mut index, file, UpdateIndexFlags::REMOVE)?;
        }
        index.write_updates()?;

        Ok(())
    }
}
