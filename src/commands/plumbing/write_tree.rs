use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Directory;
use std::io::Write;

impl Repository {
    pub fn write_tree(&self) -> anyhow::Result<()> {
        let index = self.load_index()?;
        let tree_oid = self.store_index_tree(&index)?;

        writeln!(self.writer(), "{}", tree_oid)?;

        Ok(())
    }

    /// Store the index as nested trees and return the root tree's hash
    pub(crate) fn store_index_tree(&self, index: &Index) -> anyhow::Result<ObjectId> {
        self.database().write_tree(&Directory::nest(&index.toc()))
    }
}
