//! Index entry representation
//!
//! A path is either staged at stage 0, or in conflict with a receiver and a giver
//! version (plus a base version when the path existed in the merge base). The
//! two shapes are one enum so that a path can never carry stage 0 and conflict
//! stages at the same time.

use crate::artifacts::errors::GitletError;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;
use std::fmt;

/// Index slot of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Merged = 0,
    Base = 1,
    Receiver = 2,
    Giver = 3,
}

impl Stage {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<&str> for Stage {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "0" => Ok(Stage::Merged),
            "1" => Ok(Stage::Base),
            "2" => Ok(Stage::Receiver),
            "3" => Ok(Stage::Giver),
            _ => anyhow::bail!(GitletError::CorruptIndex(format!("invalid stage {value}"))),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexEntry {
    Staged(ObjectId),
    Conflicted {
        base: Option<ObjectId>,
        receiver: ObjectId,
        giver: ObjectId,
    },
}

impl IndexEntry {
    pub fn is_conflicted(&self) -> bool {
        matches!(self, IndexEntry::Conflicted { .. })
    }

    /// Hash used when the entry is projected onto a single version
    ///
    /// Conflicted paths project to the receiver's version.
    pub fn oid(&self) -> &ObjectId {
        match self {
            IndexEntry::Staged(oid) => oid,
            IndexEntry::Conflicted { receiver, .. } => receiver,
        }
    }

    /// Flat `(stage, hash)` rows as persisted in the index file
    pub fn stages(&self) -> Vec<(Stage, ObjectId)> {
        match self {
            IndexEntry::Staged(oid) => vec![(Stage::Merged, oid.clone())],
            IndexEntry::Conflicted {
                base,
                receiver,
                giver,
            } => base
                .iter()
                .map(|base| (Stage::Base, base.clone()))
                .chain([
                    (Stage::Receiver, receiver.clone()),
                    (Stage::Giver, giver.clone()),
                ])
                .collect(),
        }
    }

    pub fn has_stage(&self, stage: Stage) -> bool {
        self.stages().iter().any(|(s, _)| *s == stage)
    }

    /// Rebuild a path's entry from its persisted rows
    ///
    /// Stage 0 may not be mixed with conflict stages, and a conflict needs both a
    /// receiver and a giver version.
    pub fn from_stages(path: &str, stages: BTreeMap<Stage, ObjectId>) -> anyhow::Result<Self> {
        let mut stages = stages;

        if let Some(oid) = stages.remove(&Stage::Merged) {
            if !stages.is_empty() {
                anyhow::bail!(GitletError::CorruptIndex(format!(
                    "{path} is both staged and in conflict"
                )));
            }
            return Ok(IndexEntry::Staged(oid));
        }

        match (
            stages.remove(&Stage::Receiver),
            stages.remove(&Stage::Giver),
        ) {
            (Some(receiver), Some(giver)) => Ok(IndexEntry::Conflicted {
                base: stages.remove(&Stage::Base),
                receiver,
                giver,
            }),
            _ => anyhow::bail!(GitletError::CorruptIndex(format!(
                "{path} has an incomplete conflict"
            ))),
        }
    }
}
