//! Gitlet commit object
//!
//! Commits represent snapshots of the repository at specific points in time.
//! They contain:
//! - A tree object ID (directory snapshot)
//! - Parent commit ID(s): none for the first commit, one normally, two for merges
//! - A UTC timestamp
//! - A free-text message
//!
//! ## Format
//!
//! ```text
//! commit <tree-sha>
//! parent <parent-sha>
//! Date:  <ISO-8601 UTC timestamp>
//!
//!     <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, Utc};

const MESSAGE_INDENT: &str = "    ";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Tree object ID representing the directory snapshot
    tree_oid: ObjectId,
    /// Parent commit IDs (empty for initial commit, two for merge commits)
    parents: Vec<ObjectId>,
    timestamp: DateTime<Utc>,
    message: String,
}

impl Commit {
    /// Create a new commit stamped with the current time
    pub fn new(tree_oid: ObjectId, parents: Vec<ObjectId>, message: String) -> Self {
        Self::new_with_timestamp(tree_oid, parents, message, Utc::now())
    }

    pub fn new_with_timestamp(
        tree_oid: ObjectId,
        parents: Vec<ObjectId>,
        message: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Commit {
            tree_oid,
            parents,
            timestamp,
            message,
        }
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn readable_timestamp(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Message with every line indented, as it appears in the stored object and in log
    pub fn indented_message(&self) -> String {
        if self.message.is_empty() {
            return MESSAGE_INDENT.to_string();
        }

        self.message
            .lines()
            .map(|message_line| format!("{MESSAGE_INDENT}{message_line}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![format!("commit {}", self.tree_oid)];
        for parent in &self.parents {
            lines.push(format!("parent {parent}"));
        }
        lines.push(format!("Date:  {}", self.readable_timestamp()));
        lines.push(String::new());

        lines.push(self.indented_message());

        Ok(Bytes::from(format!("{}\n", lines.join("\n"))))
    }
}

impl Unpackable for Commit {
    fn deserialize(content: &[u8]) -> anyhow::Result<Self> {
        let content = std::str::from_utf8(content).context("Invalid commit object: not UTF-8")?;
        let mut lines = content.lines();

        let tree_oid = lines
            .next()
            .and_then(|line| line.strip_prefix("commit "))
            .context("Invalid commit object: missing tree line")?;
        let tree_oid = ObjectId::try_parse(tree_oid.trim().to_string())?;

        // Parse all parent lines (there can be 0, 1, or 2 parents)
        let mut parents = Vec::new();
        let mut next_line = lines
            .next()
            .context("Invalid commit object: missing date line")?;

        while let Some(parent_oid) = next_line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent_oid.trim().to_string())?);
            next_line = lines
                .next()
                .context("Invalid commit object: missing date line")?;
        }

        let timestamp = next_line
            .strip_prefix("Date:")
            .context("Invalid commit object: invalid date line")?
            .trim();
        let timestamp = DateTime::parse_from_rfc3339(timestamp)
            .with_context(|| format!("Invalid commit object: invalid timestamp {timestamp}"))?
            .with_timezone(&Utc);

        // skip the empty line
        lines.next();

        let message = lines
            .map(|line| line.strip_prefix(MESSAGE_INDENT).unwrap_or(line))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(Self::new_with_timestamp(tree_oid, parents, message, timestamp))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
