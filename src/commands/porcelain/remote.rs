use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;

impl Repository {
    /// Manage configured remotes; only `add` is supported
    pub fn remote(&self, command: &str, name: &str, url: &str) -> anyhow::Result<()> {
        if command != "add" {
            anyhow::bail!(GitletError::unsupported());
        }

        self.remote_add(name, url)
    }

    pub(crate) fn remote_add(&self, name: &str, url: &str) -> anyhow::Result<()> {
        let mut config = self.config().read()?;

        if config.remote(name).is_some() {
            anyhow::bail!(GitletError::AlreadyExists(format!(
                "remote {name} already exists"
            )));
        }

        config.add_remote(name, url);
        self.config().write(&config)?;

        tracing::debug!(name, url, "added remote");
        Ok(())
    }
}
