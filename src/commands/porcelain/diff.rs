use crate::areas::repository::Repository;
use crate::artifacts::diff::toc_diff::name_status;
use crate::artifacts::errors::GitletError;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Print `<code> <path>` for every path that differs between two snapshots
    ///
    /// Without refs the index is compared to the working copy; with one ref that
    /// commit is compared to the working copy.
    pub fn diff(
        &self,
        ref1: Option<&str>,
        ref2: Option<&str>,
        name_status_only: bool,
    ) -> anyhow::Result<()> {
        if !name_status_only {
            anyhow::bail!(GitletError::unsupported());
        }

        let from = self.resolve_revision(ref1)?;
        let to = self.resolve_revision(ref2)?;

        let index = self.load_index()?;
        let diff = self.inspector().diff(&index, from.as_ref(), to.as_ref())?;

        for (path, status) in name_status(&diff) {
            writeln!(self.writer(), "{} {}", status, path)?;
        }

        Ok(())
    }

    fn resolve_revision(&self, reference: Option<&str>) -> anyhow::Result<Option<ObjectId>> {
        let Some(reference) = reference else {
            return Ok(None);
        };

        match self.refs().hash(reference, self.database())? {
            Some(oid) => Ok(Some(oid)),
            None => anyhow::bail!(GitletError::UnknownRevision(format!(
                "ambiguous argument {reference}: unknown revision"
            ))),
        }
    }
}
