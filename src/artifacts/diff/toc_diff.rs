use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Toc;
use bitflags::bitflags;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

bitflags! {
    /// Which of the three snapshots hold a version of a path
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct Presence: u8 {
        const RECEIVER = 0b001;
        const BASE = 0b010;
        const GIVER = 0b100;
    }
}

impl Presence {
    fn of(receiver: Option<&ObjectId>, base: Option<&ObjectId>, giver: Option<&ObjectId>) -> Self {
        let mut presence = Presence::empty();
        presence.set(Presence::RECEIVER, receiver.is_some());
        presence.set(Presence::BASE, base.is_some());
        presence.set(Presence::GIVER, giver.is_some());
        presence
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileStatus {
    Add,
    Modify,
    Delete,
    Same,
    Conflict,
}

impl FileStatus {
    pub fn code(&self) -> &'static str {
        match self {
            FileStatus::Add => "A",
            FileStatus::Modify => "M",
            FileStatus::Delete => "D",
            FileStatus::Same => "SAME",
            FileStatus::Conflict => "CONFLICT",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Classification of one path across receiver, giver and base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub status: FileStatus,
    pub receiver: Option<ObjectId>,
    pub giver: Option<ObjectId>,
    pub base: Option<ObjectId>,
}

impl DiffEntry {
    /// Hash a path resolves to once the diff is applied without conflict
    ///
    /// A modification keeps whichever side moved away from the base, so a change
    /// made only on the receiver's side survives.
    pub fn resolved_oid(&self) -> Option<&ObjectId> {
        match self.status {
            FileStatus::Modify => {
                if self.giver != self.base {
                    self.giver.as_ref()
                } else {
                    self.receiver.as_ref()
                }
            }
            FileStatus::Add | FileStatus::Same => self.receiver.as_ref().or(self.giver.as_ref()),
            FileStatus::Delete | FileStatus::Conflict => None,
        }
    }
}

pub type Diff = BTreeMap<String, DiffEntry>;

fn file_status(
    path: &str,
    receiver: Option<&ObjectId>,
    giver: Option<&ObjectId>,
    base: Option<&ObjectId>,
) -> anyhow::Result<FileStatus> {
    let presence = Presence::of(receiver, base, giver);

    match (receiver, giver) {
        (Some(receiver), Some(giver)) if receiver != giver => {
            if Some(receiver) != base && Some(giver) != base {
                Ok(FileStatus::Conflict)
            } else {
                Ok(FileStatus::Modify)
            }
        }
        _ if receiver == giver => Ok(FileStatus::Same),
        _ if presence == Presence::GIVER || presence == Presence::RECEIVER => Ok(FileStatus::Add),
        _ if presence == Presence::RECEIVER | Presence::BASE
            || presence == Presence::BASE | Presence::GIVER =>
        {
            Ok(FileStatus::Delete)
        }
        _ => anyhow::bail!("unclassifiable change for {path}: {presence:?}"),
    }
}

/// Classify every path of `receiver`, `giver` and `base`
///
/// Without a base the receiver acts as its own base, which turns the result into
/// a plain two-way comparison.
pub fn toc_diff(receiver: &Toc, giver: &Toc, base: Option<&Toc>) -> anyhow::Result<Diff> {
    let base = base.unwrap_or(receiver);

    let paths = receiver
        .keys()
        .chain(base.keys())
        .chain(giver.keys())
        .collect::<BTreeSet<_>>();

    paths
        .into_iter()
        .map(|path| {
            let (r, g, b) = (receiver.get(path), giver.get(path), base.get(path));
            let entry = DiffEntry {
                status: file_status(path, r, g, b)?,
                receiver: r.cloned(),
                giver: g.cloned(),
                base: b.cloned(),
            };
            Ok((path.clone(), entry))
        })
        .collect()
}

/// Path to status, leaving out paths that did not change
pub fn name_status(diff: &Diff) -> BTreeMap<String, FileStatus> {
    diff.iter()
        .filter(|(_, entry)| entry.status != FileStatus::Same)
        .map(|(path, entry)| (path.clone(), entry.status))
        .collect()
}
