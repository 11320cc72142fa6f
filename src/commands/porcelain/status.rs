use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        self.assert_not_bare()?;

        let index = self.load_index()?;
        let status = self.status_report().initialize(&index)?;

        writeln!(self.writer(), "{}", status.render())?;

        Ok(())
    }
}
