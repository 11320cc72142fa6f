use crate::areas::refs::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use crate::artifacts::config::Config;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        if self.is_initialized()? {
            return Ok(());
        }

        self.create_layout()?;

        writeln!(
            self.writer(),
            "Initialized empty Gitlet repository in {}",
            self.git_dir().display()
        )?;

        Ok(())
    }

    /// Write the files and directories of an empty repository
    pub(crate) fn create_layout(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create refs/heads directory")?;

        self.refs()
            .set_head_branch(DEFAULT_BRANCH)
            .context("Failed to create initial HEAD reference")?;

        self.config()
            .write(&Config::new(self.is_bare()))
            .context("Failed to write config")?;

        tracing::info!(git_dir = %self.git_dir().display(), bare = self.is_bare(), "initialized repository");
        Ok(())
    }
}
