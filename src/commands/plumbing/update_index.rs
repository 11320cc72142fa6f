use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;
use bitflags::bitflags;

bitflags! {
    /// What `update-index` may do to a path besides refreshing a tracked file
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct UpdateIndexFlags: u8 {
        /// Start tracking a file not yet in the index
        const ADD = 0b01;
        /// Stop tracking a file missing from the working copy
        const REMOVE = 0b10;
    }
}

impl Repository {
    pub fn update_index(&self, path: &str, flags: UpdateIndexFlags) -> anyhow::Result<()> {
        self.assert_not_bare()?;

        let file_path = self.relative_path(path)?;
        let mut index = self.load_index()?;

        self.update_index_entry(&mut index, &file_path, flags)?;
        index.write_updates()?;

        Ok(())
    }

    /// Apply `update-index` rules for one repository-relative path to an index in memory
    pub(crate) fn update_index_entry(
        &self,
        index: &mut Index,
        file_path: &str,
        flags: UpdateIndexFlags,
    ) -> anyhow::Result<()> {
        let workspace = self.workspace()?;
        let is_on_disk = workspace.exists(file_path);
        let is_in_index = index.entry(file_path).is_some();

        if is_on_disk && workspace.is_dir(file_path) {
            anyhow::bail!(GitletError::UnsupportedOperation(format!(
                "{file_path} is a directory - add files inside"
            )));
        }

        match (is_on_disk, is_in_index) {
            (false, true) if flags.contains(UpdateIndexFlags::REMOVE) => {
                if index.is_file_in_conflict(file_path) {
                    anyhow::bail!(GitletError::unsupported());
                }
                index.write_rm(file_path);
            }
            (false, false) if flags.contains(UpdateIndexFlags::REMOVE) => {}
            (false, _) => anyhow::bail!(GitletError::UnsupportedOperation(format!(
                "{file_path} does not exist and --remove not passed"
            ))),
            (true, false) if !flags.contains(UpdateIndexFlags::ADD) => {
                anyhow::bail!(GitletError::UnsupportedOperation(format!(
                    "cannot add {file_path} to index - use --add option"
                )))
            }
            (true, _) => {
                let oid = self.database().write(&workspace.read_file(file_path)?)?;
                index.write_non_conflict(file_path, oid);
            }
        }

        Ok(())
    }
}
