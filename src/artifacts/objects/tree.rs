//! Gitlet tree object
//!
//! Trees represent directory snapshots. Each line names a child and the hash it
//! points at:
//!
//! ```text
//! blob <blob-hash> <name>
//! tree <tree-hash> <name>
//! ```
//!
//! Lines are newline-joined and the whole listing ends with a newline. A tree's
//! hash depends only on its entries' names and child hashes, so identical
//! subtrees collapse to one stored object.
//!
//! ## Tree Building
//!
//! Trees are built bottom-up from a [`Directory`], the nested form of a flat
//! table of contents. Reading goes the other way: a stored tree is expanded
//! back into a [`Directory`] and flattened.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;

/// Flat table of contents: repository-relative path mapped to blob hash
pub type Toc = BTreeMap<String, ObjectId>;

/// A single line of a stored tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntry {
    Blob(ObjectId),
    Tree(ObjectId),
}

impl TreeEntry {
    pub fn oid(&self) -> &ObjectId {
        match self {
            TreeEntry::Blob(oid) | TreeEntry::Tree(oid) => oid,
        }
    }

    fn object_type(&self) -> ObjectType {
        match self {
            TreeEntry::Blob(_) => ObjectType::Blob,
            TreeEntry::Tree(_) => ObjectType::Tree,
        }
    }
}

/// Node of a nested directory structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    File(ObjectId),
    Directory(Directory),
}

/// Nested view of a table of contents, keyed by path component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    children: BTreeMap<String, TreeNode>,
}

impl Directory {
    /// Turn a flat `{ "a/b.txt": hash }` table into nested directories
    pub fn nest(toc: &Toc) -> Self {
        let mut root = Directory::default();

        for (path, oid) in toc {
            let components = path.split('/').filter(|c| !c.is_empty()).collect::<Vec<_>>();
            root.insert(&components, oid.clone());
        }

        root
    }

    fn insert(&mut self, components: &[&str], oid: ObjectId) {
        match components {
            [] => {}
            [name] => {
                self.children
                    .insert(name.to_string(), TreeNode::File(oid));
            }
            [name, rest @ ..] => {
                let node = self
                    .children
                    .entry(name.to_string())
                    .or_insert_with(|| TreeNode::Directory(Directory::default()));

                // a file in the way of a directory is replaced by the directory
                if let TreeNode::File(_) = node {
                    *node = TreeNode::Directory(Directory::default());
                }

                if let TreeNode::Directory(directory) = node {
                    directory.insert(rest, oid);
                }
            }
        }
    }

    /// Flatten nested directories back into `{ "a/b.txt": hash }`
    pub fn flatten(&self) -> Toc {
        let mut toc = Toc::new();
        self.flatten_into("", &mut toc);
        toc
    }

    fn flatten_into(&self, prefix: &str, toc: &mut Toc) {
        for (name, node) in &self.children {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}/{name}")
            };

            match node {
                TreeNode::File(oid) => {
                    toc.insert(path, oid.clone());
                }
                TreeNode::Directory(directory) => directory.flatten_into(&path, toc),
            }
        }
    }

    pub fn add(&mut self, name: String, node: TreeNode) {
        self.children.insert(name, node);
    }

    pub fn children(&self) -> impl Iterator<Item = (&String, &TreeNode)> {
        self.children.iter()
    }
}

/// Gitlet tree object representing a directory snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, TreeEntry>,
}

impl Tree {
    /// Build a tree from a nested directory
    ///
    /// Subtrees are handed to `store` before their parent is assembled, since a
    /// parent line needs the child's hash.
    pub fn build<F>(directory: &Directory, store: &F) -> anyhow::Result<Self>
    where
        F: Fn(&Tree) -> anyhow::Result<ObjectId>,
    {
        let mut entries = BTreeMap::new();

        for (name, node) in directory.children() {
            let entry = match node {
                TreeNode::File(oid) => TreeEntry::Blob(oid.clone()),
                TreeNode::Directory(subdirectory) => {
                    let subtree = Tree::build(subdirectory, store)?;
                    TreeEntry::Tree(store(&subtree)?)
                }
            };
            entries.insert(name.clone(), entry);
        }

        Ok(Tree { entries })
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &TreeEntry)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, TreeEntry)> {
        self.entries.into_iter()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let lines = self
            .entries
            .iter()
            .map(|(name, entry)| format!("{} {} {}", entry.object_type(), entry.oid(), name))
            .collect::<Vec<_>>();

        Ok(Bytes::from(format!("{}\n", lines.join("\n"))))
    }
}

impl Unpackable for Tree {
    fn deserialize(content: &[u8]) -> anyhow::Result<Self> {
        let content = std::str::from_utf8(content).context("Invalid tree object: not UTF-8")?;
        let mut entries = BTreeMap::new();

        for line in content.lines().filter(|line| !line.trim().is_empty()) {
            let mut parts = line.splitn(3, ' ');
            let kind = parts.next().context("Invalid tree object: missing kind")?;
            let oid = parts.next().context("Invalid tree object: missing hash")?;
            let name = parts.next().context("Invalid tree object: missing name")?;
            let oid = ObjectId::try_parse(oid.to_string())?;

            let entry = match ObjectType::try_from(kind)? {
                ObjectType::Blob => TreeEntry::Blob(oid),
                ObjectType::Tree => TreeEntry::Tree(oid),
                ObjectType::Commit => {
                    anyhow::bail!("Invalid tree object: unexpected commit entry {}", name)
                }
            };
            entries.insert(name.to_string(), entry);
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}
