use crate::areas::refs::{DEFAULT_BRANCH, Refs};
use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;
use std::io::Write;
use std::path::Path;

const ORIGIN: &str = "origin";

impl Repository {
    /// Create a repository at `target` holding a copy of the one at `source`
    ///
    /// Both paths are taken relative to `cwd`. The new repository gets an
    /// `origin` remote and, when the source has a `master` branch, a checkout
    /// of it.
    pub fn clone_repository(
        cwd: &Path,
        source: &str,
        target: &str,
        bare: bool,
        writer: Box<dyn Write>,
    ) -> anyhow::Result<()> {
        let source_path = cwd.join(source);
        let source_repository = Repository::open(&source_path, Box::new(std::io::sink()))
            .map_err(|_| GitletError::UnknownRemote(source.to_string()))?;

        let target_path = cwd.join(target);
        if target_path.exists() && !is_empty_dir(&target_path)? {
            anyhow::bail!(GitletError::AlreadyExists(format!(
                "{target} already exists and is not empty"
            )));
        }

        let repository = Repository::new(&target_path, bare, writer)?;
        repository.create_layout()?;

        let source_url = source_repository.root().display().to_string();
        repository.remote_add(ORIGIN, &source_url)?;

        let source_head = source_repository
            .refs()
            .hash(&Refs::to_local_ref(DEFAULT_BRANCH), source_repository.database())?;
        if let Some(source_head) = source_head {
            repository.fetch_from(ORIGIN, Some(DEFAULT_BRANCH))?;
            repository.write_fast_forward_merge(None, &source_head)?;
        }

        tracing::info!(source = %source_url, target = %repository.root().display(), bare, "cloned repository");
        writeln!(repository.writer(), "Cloning into {target}")?;

        Ok(())
    }
}

fn is_empty_dir(path: &Path) -> anyhow::Result<bool> {
    Ok(path.is_dir() && path.read_dir()?.next().is_none())
}
