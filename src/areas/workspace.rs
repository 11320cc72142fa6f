//! Working copy access
//!
//! Paths handed to and returned from the workspace are repository-relative and
//! use `/` as separator. The `.gitlet` directory is never listed.

use crate::areas::database::Database;
use crate::artifacts::diff::toc_diff::{Diff, FileStatus};
use crate::artifacts::merge::conflict_markers;
use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const GITLET_DIR: &str = ".gitlet";

const IGNORED_PATHS: [&str; 3] = [GITLET_DIR, ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn absolute(&self, file_path: &str) -> PathBuf {
        if file_path.is_empty() {
            self.path.to_path_buf()
        } else {
            self.path.join(file_path)
        }
    }

    pub fn exists(&self, file_path: &str) -> bool {
        self.absolute(file_path).exists()
    }

    pub fn is_file(&self, file_path: &str) -> bool {
        self.absolute(file_path).is_file()
    }

    pub fn is_dir(&self, file_path: &str) -> bool {
        self.absolute(file_path).is_dir()
    }

    pub fn read_file(&self, file_path: &str) -> anyhow::Result<Bytes> {
        let content = std::fs::read(self.absolute(file_path))
            .with_context(|| format!("Unable to read file {file_path}"))?;

        Ok(Bytes::from(content))
    }

    pub fn parse_blob(&self, file_path: &str) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(file_path)?))
    }

    /// Every file at or under `file_path`
    ///
    /// A missing path yields nothing, a file yields itself and a directory yields
    /// every file beneath it.
    pub fn list_files(&self, file_path: &str) -> anyhow::Result<Vec<String>> {
        let root = self.absolute(file_path);

        if !root.exists() {
            return Ok(vec![]);
        }

        if root.is_file() {
            return Ok(vec![file_path.to_string()]);
        }

        let mut files = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored(entry.path(), &self.path))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| self.relative(entry.path()))
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    /// Names directly inside the working copy root, directories marked with a trailing `/`
    pub fn list_top_level(&self) -> anyhow::Result<Vec<String>> {
        let mut names = std::fs::read_dir(&self.path)
            .with_context(|| format!("Unable to list {}", self.path.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| !Self::is_ignored(&entry.path(), &self.path))
            .map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                if entry.path().is_dir() {
                    format!("{name}/")
                } else {
                    name
                }
            })
            .collect::<Vec<_>>();
        names.sort();

        Ok(names)
    }

    fn is_ignored(path: &Path, root: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(root) else {
            return false;
        };

        relative.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                IGNORED_PATHS.contains(&name.to_string_lossy().as_ref())
            } else {
                false
            }
        })
    }

    fn relative(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(self.path.as_ref()).ok()?;
        let components = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy().to_string())
            .collect::<Vec<_>>();

        Some(components.join("/"))
    }

    pub fn write_file(&self, file_path: &str, content: &[u8]) -> anyhow::Result<()> {
        let path = self.absolute(file_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create parent directories for {file_path}"))?;
        }

        std::fs::write(&path, content).with_context(|| format!("Failed to write {file_path}"))?;
        Ok(())
    }

    /// Delete a file and any directories it leaves empty
    pub fn remove_file(&self, file_path: &str) -> anyhow::Result<()> {
        let path = self.absolute(file_path);

        if path.is_file() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove file {file_path}"))?;
        }
        self.prune_empty_parent_dirs(&path)?;

        Ok(())
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.starts_with(self.path.as_ref())
            && parent.is_dir()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("Failed to remove empty directory {}", parent.display())
            })?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    /// Bring the working copy in line with a diff
    ///
    /// Added and modified paths receive their resolved content, conflicted paths
    /// receive both versions between conflict markers and deleted paths are
    /// removed.
    pub fn apply_diff(&self, diff: &Diff, database: &Database) -> anyhow::Result<()> {
        for (file_path, entry) in diff {
            match entry.status {
                FileStatus::Add | FileStatus::Modify => {
                    let oid = entry
                        .resolved_oid()
                        .with_context(|| format!("No content to write for {file_path}"))?;
                    let content = database.read_blob(oid)?;
                    self.write_file(file_path, &content)?;
                }
                FileStatus::Conflict => {
                    let (Some(receiver), Some(giver)) = (&entry.receiver, &entry.giver) else {
                        anyhow::bail!("Conflict on {file_path} is missing a side");
                    };
                    let content = conflict_markers(
                        &database.read_blob(receiver)?,
                        &database.read_blob(giver)?,
                    );
                    self.write_file(file_path, &content)?;
                }
                FileStatus::Delete => self.remove_file(file_path)?,
                FileStatus::Same => {}
            }
        }

        Ok(())
    }
}
