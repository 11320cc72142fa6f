use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;
use crate::commands::plumbing::update_index::UpdateIndexFlags;

impl Repository {
    pub fn add(&self, path: &str) -> anyhow::Result<()> {
        self.assert_not_bare()?;

        let file_path = self.relative_path(path)?;
        let added_files = self.workspace()?.list_files(&file_path)?;

        if added_files.is_empty() {
            anyhow::bail!(GitletError::NoMatchingFiles(file_path));
        }

        let mut index = self.load_index()?;
        for added_file in &added_files {
            self.update_index_entry(&mut index, added_file, UpdateIndexFlags::ADD)?;
        }
        index.write_updates()?;

        Ok(())
    }
}
