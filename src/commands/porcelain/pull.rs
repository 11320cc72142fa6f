use crate::areas::refs::FETCH_HEAD;
use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Fetch `branch` from `remote` and merge it into the current branch
    pub fn pull(&self, remote: &str, branch: &str) -> anyhow::Result<()> {
        self.assert_not_bare()?;

        let report = self.fetch_from(remote, Some(branch))?;
        writeln!(self.writer(), "{}", report)?;

        let summary = self.merge_ref(FETCH_HEAD)?;
        writeln!(self.writer(), "{}", summary)?;

        Ok(())
    }
}
