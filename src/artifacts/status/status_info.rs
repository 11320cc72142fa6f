use crate::areas::index::Index;
use crate::areas::refs::HEAD;
use crate::areas::repository::Repository;
use crate::artifacts::diff::toc_diff::{FileStatus, name_status};
use colored::Colorize;
use derive_new::new;
use std::collections::BTreeMap;

pub type ChangeSet = BTreeMap<String, FileStatus>;

/// What HEAD currently points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadState {
    Branch(String),
    Detached(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub head: HeadState,
    /// Top-level working copy entries nothing in the index lives under
    pub untracked: Vec<String>,
    pub unmerged: Vec<String>,
    /// HEAD against the index
    pub to_be_committed: ChangeSet,
    /// Index against the working copy
    pub not_staged: ChangeSet,
}

impl StatusInfo {
    pub fn render(&self) -> String {
        let mut lines = vec![match &self.head {
            HeadState::Branch(branch) => format!("On branch {branch}"),
            HeadState::Detached(short_oid) => format!("HEAD detached at {short_oid}"),
        }];

        Self::listing(
            &mut lines,
            "Untracked files:",
            self.untracked.iter().map(|path| path.red().to_string()),
        );
        Self::listing(
            &mut lines,
            "Unmerged paths:",
            self.unmerged.iter().map(|path| path.red().to_string()),
        );
        Self::listing(
            &mut lines,
            "Changes to be committed:",
            self.to_be_committed
                .iter()
                .map(|(path, status)| format!("{} {path}", status.code().green())),
        );
        Self::listing(
            &mut lines,
            "Changes not staged for commit:",
            self.not_staged
                .iter()
                .map(|(path, status)| format!("{} {path}", status.code().red())),
        );

        lines.join("\n")
    }

    fn listing(lines: &mut Vec<String>, heading: &str, entries: impl Iterator<Item = String>) {
        let entries = entries.collect::<Vec<_>>();

        if !entries.is_empty() {
            lines.push(heading.to_string());
            lines.extend(entries);
        }
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self, index: &Index) -> anyhow::Result<StatusInfo> {
        let refs = self.repository.refs();
        let inspector = self.repository.inspector();

        let head = match refs.head_branch_name()? {
            Some(branch) => HeadState::Branch(branch),
            None => {
                let oid = refs.hash(HEAD, self.repository.database())?;
                HeadState::Detached(oid.map(|oid| oid.to_short_oid()).unwrap_or_default())
            }
        };

        Ok(StatusInfo {
            head,
            untracked: self.untracked(index)?,
            unmerged: index.conflicted_paths(),
            to_be_committed: name_status(&inspector.to_be_committed(index)?),
            not_staged: name_status(&inspector.diff(index, None, None)?),
        })
    }

    fn untracked(&self, index: &Index) -> anyhow::Result<Vec<String>> {
        let tracked = index.toc();

        Ok(self
            .repository
            .workspace()?
            .list_top_level()?
            .into_iter()
            .filter(|name| {
                let is_tracked = match name.strip_suffix('/') {
                    Some(dir) => tracked
                        .keys()
                        .any(|path| path.starts_with(&format!("{dir}/"))),
                    None => tracked.contains_key(name),
                };
                !is_tracked
            })
            .collect())
    }
}
