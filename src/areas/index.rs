//! Gitlet index (staging area)
//!
//! The index records what the next commit will contain and, during a merge,
//! which paths are still in conflict.
//!
//! ## Index File Format
//!
//! Plain text, one `<path> <stage> <hash>` line per stage of each path, sorted
//! by path then stage. Paths may contain spaces; the stage and hash are always
//! the last two fields.
//!
//! ## Persistence
//!
//! Mutations only touch the in-memory table. `write_updates` replaces the whole
//! file at once by writing a temp file and renaming it over the index.

use crate::areas::workspace::Workspace;
use crate::artifacts::errors::GitletError;
use crate::artifacts::index::index_entry::{IndexEntry, Stage};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Toc;
use anyhow::Context;
use fake::rand;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.gitlet/index`)
    path: Box<Path>,
    /// Tracked paths, each either staged or in conflict
    entries: BTreeMap<String, IndexEntry>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index from disk; a missing file is an empty index
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Unable to read index {}", self.path.display()))?;

        let mut rows = BTreeMap::<String, BTreeMap<Stage, ObjectId>>::new();
        for line in content.lines().filter(|line| !line.is_empty()) {
            let (file_path, stage, oid) = Self::parse_line(line)?;
            rows.entry(file_path).or_default().insert(stage, oid);
        }

        for (file_path, stages) in rows {
            let entry = IndexEntry::from_stages(&file_path, stages)?;
            self.entries.insert(file_path, entry);
        }

        Ok(())
    }

    fn parse_line(line: &str) -> anyhow::Result<(String, Stage, ObjectId)> {
        let mut fields = line.rsplitn(3, ' ');

        let (Some(oid), Some(stage), Some(file_path)) = (fields.next(), fields.next(), fields.next())
        else {
            anyhow::bail!(GitletError::CorruptIndex(format!("malformed line {line:?}")));
        };

        Ok((
            file_path.to_string(),
            Stage::try_from(stage)?,
            ObjectId::try_parse(oid.to_string())?,
        ))
    }

    /// Persist the table if anything changed since it was loaded
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let content = self
            .stages()
            .into_iter()
            .map(|(file_path, stage, oid)| format!("{file_path} {stage} {oid}\n"))
            .collect::<String>();

        let temp_path = self
            .path
            .with_file_name(format!("index-{}.tmp", rand::random::<u32>()));
        std::fs::write(&temp_path, content)
            .with_context(|| format!("Unable to write index {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Unable to replace index {}", self.path.display()))?;

        tracing::debug!(entries = self.entries.len(), "rewrote index");
        self.changed = false;

        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &IndexEntry)> {
        self.entries.iter()
    }

    pub fn entry(&self, file_path: &str) -> Option<&IndexEntry> {
        self.entries.get(file_path)
    }

    /// Flat `(path, stage, hash)` rows, sorted by path then stage
    pub fn stages(&self) -> Vec<(String, Stage, ObjectId)> {
        self.entries
            .iter()
            .flat_map(|(file_path, entry)| {
                entry
                    .stages()
                    .into_iter()
                    .map(move |(stage, oid)| (file_path.clone(), stage, oid))
            })
            .collect()
    }

    /// Path to hash, ignoring stages
    ///
    /// Conflicted paths show their receiver version.
    pub fn toc(&self) -> Toc {
        self.entries
            .iter()
            .map(|(file_path, entry)| (file_path.clone(), entry.oid().clone()))
            .collect()
    }

    /// Hash of the current on-disk content of every indexed path that still exists
    pub fn working_copy_toc(&self, workspace: &Workspace) -> anyhow::Result<Toc> {
        self.entries
            .keys()
            .filter(|file_path| workspace.is_file(file_path))
            .map(|file_path| {
                let content = workspace.read_file(file_path)?;
                Ok((file_path.clone(), ObjectId::from_content(&content)))
            })
            .collect()
    }

    pub fn has_file(&self, file_path: &str, stage: Stage) -> bool {
        self.entries
            .get(file_path)
            .is_some_and(|entry| entry.has_stage(stage))
    }

    pub fn is_file_in_conflict(&self, file_path: &str) -> bool {
        self.entries
            .get(file_path)
            .is_some_and(IndexEntry::is_conflicted)
    }

    pub fn conflicted_paths(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_conflicted())
            .map(|(file_path, _)| file_path.clone())
            .collect()
    }

    /// Indexed paths starting with `path_spec` (plain prefix, no globbing)
    pub fn matching_files(&self, path_spec: &str) -> Vec<String> {
        self.entries
            .keys()
            .filter(|file_path| file_path.starts_with(path_spec))
            .cloned()
            .collect()
    }

    /// Stage `oid` as the content of `file_path`, resolving any conflict on it
    pub fn write_add(&mut self, file_path: &str, oid: ObjectId) {
        self.write_entry(file_path, IndexEntry::Staged(oid));
    }

    pub fn write_rm(&mut self, file_path: &str) {
        if self.entries.remove(file_path).is_some() {
            self.changed = true;
        }
    }

    pub fn write_entry(&mut self, file_path: &str, entry: IndexEntry) {
        self.entries.insert(file_path.to_string(), entry);
        self.changed = true;
    }

    pub fn write_non_conflict(&mut self, file_path: &str, oid: ObjectId) {
        self.write_add(file_path, oid);
    }

    pub fn write_conflict(
        &mut self,
        file_path: &str,
        receiver: ObjectId,
        giver: ObjectId,
        base: Option<ObjectId>,
    ) {
        self.write_entry(
            file_path,
            IndexEntry::Conflicted {
                base,
                receiver,
                giver,
            },
        );
    }

    /// Replace the whole table
    pub fn replace(&mut self, entries: BTreeMap<String, IndexEntry>) {
        self.entries = entries;
        self.changed = true;
    }

    /// Replace the whole table with a snapshot staged at stage 0
    pub fn toc_to_index(&mut self, toc: &Toc) {
        self.replace(
            toc.iter()
                .map(|(file_path, oid)| (file_path.clone(), IndexEntry::Staged(oid.clone())))
                .collect(),
        );
    }
}
