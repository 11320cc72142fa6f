//! Gitlet references (branches, HEAD, pseudo-refs)
//!
//! References are human-readable names pointing to commits:
//! - HEAD: the current branch (`ref: refs/heads/<branch>`) or, when detached, a commit hash
//! - Branches: `refs/heads/<branch>` pointing to branch tip commits
//! - Remote-tracking branches: `refs/remotes/<remote>/<branch>`
//! - `MERGE_HEAD`: the giver of a merge in progress
//! - `FETCH_HEAD`: what the last fetch brought in, one line per branch:
//!   `<hash> branch <branch> of <url>`
//!
//! Every ref is a file under the gitlet directory whose relative path is the
//! ref's name. Writes are refused for names outside that grammar.

use crate::areas::database::Database;
use crate::artifacts::errors::GitletError;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use fake::rand;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (refs/heads/.+)$";

/// Regex pattern for local branch refs
const LOCAL_REF_REGEX: &str = r"^refs/heads/[A-Za-z0-9_-]+$";

/// Regex pattern for remote-tracking refs
const REMOTE_REF_REGEX: &str = r"^refs/remotes/[A-Za-z0-9_-]+/[A-Za-z0-9_-]+$";

/// Regex pattern for a `FETCH_HEAD` record
const FETCH_HEAD_REGEX: &str = r"^(\S+) branch (\S+) of (.+)$";

pub const HEAD: &str = "HEAD";
pub const FETCH_HEAD: &str = "FETCH_HEAD";
pub const MERGE_HEAD: &str = "MERGE_HEAD";
pub const DEFAULT_BRANCH: &str = "master";

const PSEUDO_REFS: [&str; 3] = [HEAD, FETCH_HEAD, MERGE_HEAD];
const LOCAL_PREFIX: &str = "refs/heads/";

/// One branch recorded in `FETCH_HEAD`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRecord {
    pub oid: ObjectId,
    pub branch: String,
    pub url: String,
}

impl FetchRecord {
    fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let Some(captures) = Regex::new(FETCH_HEAD_REGEX)?.captures(line) else {
            return Ok(None);
        };

        Ok(Some(FetchRecord {
            oid: ObjectId::try_parse(captures[1].to_string())?,
            branch: captures[2].to_string(),
            url: captures[3].to_string(),
        }))
    }
}

impl std::fmt::Display for FetchRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} branch {} of {}", self.oid, self.branch, self.url)
    }
}

#[derive(Debug)]
pub struct Refs {
    /// Path to the gitlet directory (`.gitlet`, or the repository itself when bare)
    path: Box<Path>,
}

impl Refs {
    pub fn new(path: Box<Path>) -> Self {
        Refs { path }
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    /// Whether `name` is a writable ref name
    pub fn is_ref(name: &str) -> bool {
        PSEUDO_REFS.contains(&name)
            || Regex::new(LOCAL_REF_REGEX).is_ok_and(|regex| regex.is_match(name))
            || Regex::new(REMOTE_REF_REGEX).is_ok_and(|regex| regex.is_match(name))
    }

    pub fn to_local_ref(name: &str) -> String {
        format!("{LOCAL_PREFIX}{name}")
    }

    pub fn to_remote_ref(remote: &str, name: &str) -> String {
        format!("refs/remotes/{remote}/{name}")
    }

    fn read_raw(&self, name: &str) -> anyhow::Result<Option<String>> {
        let path = self.path.join(name);

        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        Ok(Some(content))
    }

    /// The branch ref HEAD points at, or `None` when detached
    fn head_target(&self) -> anyhow::Result<Option<String>> {
        let Some(content) = self.read_raw(HEAD)? else {
            return Ok(None);
        };

        Ok(Regex::new(SYMREF_REGEX)?
            .captures(content.trim())
            .map(|captures| captures[1].to_string()))
    }

    pub fn is_head_detached(&self) -> anyhow::Result<bool> {
        Ok(self.head_target()?.is_none())
    }

    pub fn head_branch_name(&self) -> anyhow::Result<Option<String>> {
        Ok(self
            .head_target()?
            .and_then(|target| target.strip_prefix(LOCAL_PREFIX).map(str::to_string)))
    }

    /// Canonical ref a name stands for
    ///
    /// HEAD resolves to its branch when attached, qualified refs pass through and
    /// bare names become local branch refs.
    pub fn terminal_ref(&self, name: &str) -> anyhow::Result<String> {
        if name == HEAD {
            if let Some(target) = self.head_target()? {
                return Ok(target);
            }
            return Ok(HEAD.to_string());
        }

        if Self::is_ref(name) {
            Ok(name.to_string())
        } else {
            Ok(Self::to_local_ref(name))
        }
    }

    /// Commit hash a ref or hash stands for
    ///
    /// A hash of a stored object is returned as is. Anything that does not
    /// resolve gives `None`.
    pub fn hash(&self, ref_or_hash: &str, database: &Database) -> anyhow::Result<Option<ObjectId>> {
        if ObjectId::is_valid(ref_or_hash) {
            let oid = ObjectId::try_parse(ref_or_hash.to_string())?;
            if database.exists(&oid) {
                return Ok(Some(oid));
            }
        }

        let terminal_ref = self.terminal_ref(ref_or_hash)?;
        if terminal_ref == FETCH_HEAD {
            return self.fetch_head_branch_to_merge();
        }

        match self.read_raw(&terminal_ref)? {
            Some(content) if ObjectId::is_valid(content.trim()) => {
                Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
            }
            _ => Ok(None),
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        Self::is_ref(name) && self.path.join(name).is_file()
    }

    /// Overwrite a ref file; names outside the ref grammar are refused
    pub fn write(&self, name: &str, content: &str) -> anyhow::Result<()> {
        if !Self::is_ref(name) {
            anyhow::bail!(GitletError::InvalidRef(format!("cannot lock the ref {name}")));
        }

        let path = self.path.join(name);
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!("failed to create parent directories for ref file at {:?}", path)
        })?)?;

        let temp_path = path.with_extension(format!("{}.lock", rand::random::<u32>()));
        std::fs::write(&temp_path, format!("{content}\n"))
            .with_context(|| format!("failed to write ref file at {:?}", temp_path))?;
        std::fs::rename(&temp_path, &path)
            .with_context(|| format!("failed to update ref file at {:?}", path))?;

        tracing::debug!(name, content, "updated ref");
        Ok(())
    }

    pub fn rm(&self, name: &str) -> anyhow::Result<()> {
        if !Self::is_ref(name) {
            anyhow::bail!(GitletError::InvalidRef(format!("cannot lock the ref {name}")));
        }

        let path = self.path.join(name);
        if path.is_file() {
            std::fs::remove_file(&path)
                .with_context(|| format!("failed to delete ref file at {:?}", path))?;
        }

        Ok(())
    }

    /// Branch an argument names, whether given bare (`feature`) or qualified
    /// (`refs/heads/feature`); `None` unless that local branch exists
    pub fn local_branch_name(&self, name: &str) -> anyhow::Result<Option<String>> {
        let terminal_ref = self.terminal_ref(name)?;

        Ok(terminal_ref
            .strip_prefix(LOCAL_PREFIX)
            .filter(|_| self.exists(&terminal_ref))
            .map(str::to_string))
    }

    pub fn set_head_branch(&self, branch: &str) -> anyhow::Result<()> {
        self.write(HEAD, &format!("ref: {}", Self::to_local_ref(branch)))
    }

    pub fn detach_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.write(HEAD, oid.as_ref())
    }

    /// Local branches and the commits they point at
    pub fn local_heads(&self) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        let heads_path = self.heads_path();
        if !heads_path.is_dir() {
            return Ok(BTreeMap::new());
        }

        let mut heads = BTreeMap::new();
        for entry in std::fs::read_dir(&heads_path)?.filter_map(|entry| entry.ok()) {
            let name = entry.file_name().to_string_lossy().to_string();
            let local_ref = Self::to_local_ref(&name);

            if !Self::is_ref(&local_ref) {
                continue;
            }
            if let Some(content) = self.read_raw(&local_ref)?
                && ObjectId::is_valid(content.trim())
            {
                heads.insert(name, ObjectId::try_parse(content.trim().to_string())?);
            }
        }

        Ok(heads)
    }

    pub fn fetch_records(&self) -> anyhow::Result<Vec<FetchRecord>> {
        let Some(content) = self.read_raw(FETCH_HEAD)? else {
            return Ok(vec![]);
        };

        let mut records = Vec::new();
        for line in content.lines() {
            if let Some(record) = FetchRecord::parse(line.trim())? {
                records.push(record);
            }
        }

        Ok(records)
    }

    pub fn write_fetch_records(&self, records: &[FetchRecord]) -> anyhow::Result<()> {
        let content = records
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");

        self.write(FETCH_HEAD, &content)
    }

    /// Hash `FETCH_HEAD` offers for merging
    ///
    /// The record for the checked-out branch wins; otherwise the first record.
    fn fetch_head_branch_to_merge(&self) -> anyhow::Result<Option<ObjectId>> {
        let records = self.fetch_records()?;
        let head_branch = self.head_branch_name()?;

        let record = records
            .iter()
            .find(|record| Some(&record.branch) == head_branch.as_ref())
            .or(records.first());

        Ok(record.map(|record| record.oid.clone()))
    }

    /// Parents the next commit gets: none, HEAD, or HEAD and `MERGE_HEAD`
    pub fn commit_parent_hashes(&self, database: &Database) -> anyhow::Result<Vec<ObjectId>> {
        let head = self.hash(HEAD, database)?;
        let merge_head = self.hash(MERGE_HEAD, database)?;

        Ok(head.into_iter().chain(merge_head).collect())
    }

    pub fn is_merge_in_progress(&self, database: &Database) -> anyhow::Result<bool> {
        Ok(self.hash(MERGE_HEAD, database)?.is_some())
    }
}
