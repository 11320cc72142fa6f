//! Merge planning
//!
//! A three-way merge diffs the receiver (current HEAD) and the giver (merge
//! target) against their common ancestor. This module turns that diff into what
//! the repository writes: index entries, conflicted paths and the merge message.
//! Applying the plan to disk lives with the `merge` command.

pub mod ancestry;

use crate::artifacts::diff::toc_diff::{Diff, FileStatus};
use crate::artifacts::index::index_entry::IndexEntry;
use std::collections::BTreeMap;

pub fn conflicted_paths(diff: &Diff) -> Vec<String> {
    diff.iter()
        .filter(|(_, entry)| entry.status == FileStatus::Conflict)
        .map(|(path, _)| path.clone())
        .collect()
}

pub fn has_conflicts(diff: &Diff) -> bool {
    diff.values()
        .any(|entry| entry.status == FileStatus::Conflict)
}

/// Index contents after a non-fast-forward merge
///
/// Deleted paths are left out, conflicted paths carry all their versions and
/// every other path is staged at its resolved version.
pub fn merged_index_entries(diff: &Diff) -> anyhow::Result<BTreeMap<String, IndexEntry>> {
    let mut entries = BTreeMap::new();

    for (path, entry) in diff {
        let index_entry = match entry.status {
            FileStatus::Conflict => match (&entry.receiver, &entry.giver) {
                (Some(receiver), Some(giver)) => IndexEntry::Conflicted {
                    base: entry.base.clone(),
                    receiver: receiver.clone(),
                    giver: giver.clone(),
                },
                _ => anyhow::bail!("conflict on {path} is missing a side"),
            },
            FileStatus::Delete => continue,
            FileStatus::Add | FileStatus::Modify | FileStatus::Same => {
                match entry.resolved_oid() {
                    Some(oid) => IndexEntry::Staged(oid.clone()),
                    // present only in the base, gone on both sides
                    None => continue,
                }
            }
        };
        entries.insert(path.clone(), index_entry);
    }

    Ok(entries)
}

pub fn merge_message(giver_ref: &str, branch: &str, diff: &Diff) -> String {
    let mut message = format!("Merge {giver_ref} into {branch}");

    let conflicts = conflicted_paths(diff);
    if !conflicts.is_empty() {
        message.push_str("\nConflicts:\n");
        message.push_str(&conflicts.join("\n"));
    }

    message
}

/// Working-copy content for a path both sides changed
pub fn conflict_markers(receiver: &[u8], giver: &[u8]) -> Vec<u8> {
    [
        b"<<<<<<\n".as_slice(),
        receiver,
        b"\n======\n",
        giver,
        b"\n>>>>>>\n",
    ]
    .concat()
}
