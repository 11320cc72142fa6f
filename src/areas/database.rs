//! Content-addressed object store
//!
//! Every object lives in `objects/<hash>`, holding exactly the serialized text
//! that was hashed. Objects are write-once: storing content that is already
//! present leaves the existing file untouched.

use crate::artifacts::merge::ancestry::Ancestry;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{Directory, Toc, Tree, TreeEntry, TreeNode};
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store raw content under its hash and return the hash
    pub fn write(&self, content: &[u8]) -> anyhow::Result<ObjectId> {
        let object_id = ObjectId::from_content(content);
        let object_path = self.path.join(object_id.to_path());

        if !object_path.exists() {
            self.write_object(object_path, content)?;
            tracing::debug!(oid = %object_id, size = content.len(), "stored object");
        }

        Ok(object_id)
    }

    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        self.write(&object.serialize()?)
    }

    /// Content stored under `object_id`, or `None` when there is no such object
    pub fn read(&self, object_id: &ObjectId) -> anyhow::Result<Option<Bytes>> {
        let object_path = self.path.join(object_id.to_path());

        if !object_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Ok(Some(Bytes::from(content)))
    }

    pub fn read_blob(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        self.read(object_id)?
            .with_context(|| format!("Object {object_id} not found"))
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Type of a stored object, as sniffed from its leading token
    pub fn object_type(&self, object_id: &ObjectId) -> anyhow::Result<Option<ObjectType>> {
        Ok(self
            .read(object_id)?
            .map(|content| ObjectType::sniff(&content)))
    }

    pub fn is_commit(&self, object_id: &ObjectId) -> anyhow::Result<bool> {
        Ok(self.object_type(object_id)? == Some(ObjectType::Commit))
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        let content = self
            .read(object_id)?
            .with_context(|| format!("Object {object_id} not found"))?;

        ObjectBox::parse(content)
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        match self.parse_object(object_id)? {
            ObjectBox::Commit(commit) => Ok(*commit),
            other => anyhow::bail!(
                "Object {} is a {}, not a commit",
                object_id,
                other.object_type()
            ),
        }
    }

    /// Parse an object the caller already knows to be a tree
    pub fn load_tree(&self, object_id: &ObjectId) -> anyhow::Result<Tree> {
        let content = self
            .read(object_id)?
            .with_context(|| format!("Tree {object_id} not found"))?;

        Tree::deserialize(&content)
    }

    /// Store a nested directory as trees, children before parents
    pub fn write_tree(&self, directory: &Directory) -> anyhow::Result<ObjectId> {
        let store_tree = |tree: &Tree| self.store(tree);
        let tree = Tree::build(directory, &store_tree)?;

        self.store(&tree)
    }

    /// Expand a stored tree back into nested directories
    pub fn file_tree(&self, tree_oid: &ObjectId) -> anyhow::Result<Directory> {
        let mut directory = Directory::default();

        for (name, entry) in self.load_tree(tree_oid)?.into_entries() {
            let node = match entry {
                TreeEntry::Blob(oid) => TreeNode::File(oid),
                TreeEntry::Tree(oid) => TreeNode::Directory(self.file_tree(&oid)?),
            };
            directory.add(name, node);
        }

        Ok(directory)
    }

    pub fn tree_hash(&self, commit_oid: &ObjectId) -> anyhow::Result<ObjectId> {
        Ok(self.load_commit(commit_oid)?.tree_oid().clone())
    }

    /// Flat `path -> blob` table of a commit's snapshot
    ///
    /// No commit, or a hash that names no stored object, gives an empty table.
    pub fn commit_toc(&self, commit_oid: Option<&ObjectId>) -> anyhow::Result<Toc> {
        match commit_oid {
            Some(commit_oid) if self.exists(commit_oid) => {
                let tree_oid = self.tree_hash(commit_oid)?;
                Ok(self.file_tree(&tree_oid)?.flatten())
            }
            _ => Ok(Toc::new()),
        }
    }

    /// Parents of a commit; empty for root commits and for hashes that are not commits here
    pub fn parent_hashes(&self, commit_oid: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
        if !self.is_commit(commit_oid)? {
            return Ok(vec![]);
        }

        Ok(self.load_commit(commit_oid)?.parents().to_vec())
    }

    pub fn ancestors(&self, commit_oid: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
        Ancestry::new(|oid| self.parent_hashes(oid)).ancestors(commit_oid)
    }

    pub fn is_ancestor(&self, descendant: &ObjectId, ancestor: &ObjectId) -> anyhow::Result<bool> {
        Ancestry::new(|oid| self.parent_hashes(oid)).is_ancestor(descendant, ancestor)
    }

    pub fn common_ancestor(
        &self,
        first: &ObjectId,
        second: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        Ancestry::new(|oid| self.parent_hashes(oid)).common_ancestor(first, second)
    }

    /// Whether merging `giver` into `receiver` would change nothing
    pub fn is_up_to_date(
        &self,
        receiver: Option<&ObjectId>,
        giver: &ObjectId,
    ) -> anyhow::Result<bool> {
        match receiver {
            Some(receiver) => Ok(receiver == giver || self.is_ancestor(receiver, giver)?),
            None => Ok(false),
        }
    }

    /// Whether `receiver` can move straight to `giver` without a merge commit
    pub fn can_fast_forward(
        &self,
        receiver: Option<&ObjectId>,
        giver: &ObjectId,
    ) -> anyhow::Result<bool> {
        match receiver {
            Some(receiver) => self.is_ancestor(giver, receiver),
            None => Ok(true),
        }
    }

    /// Whether moving a ref from `old` to `new` drops commits
    pub fn is_a_force_fetch(&self, old: Option<&ObjectId>, new: &ObjectId) -> anyhow::Result<bool> {
        match old {
            Some(old) if old != new => Ok(!self.is_ancestor(new, old)?),
            _ => Ok(false),
        }
    }

    pub fn write_commit(
        &self,
        tree_oid: ObjectId,
        message: String,
        parents: Vec<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        let commit = Commit::new(tree_oid, parents, message);
        self.store(&commit)
    }

    /// Content of every stored object
    pub fn all_objects(&self) -> anyhow::Result<Vec<Bytes>> {
        let mut object_ids = std::fs::read_dir(&self.path)
            .with_context(|| format!("Unable to list objects in {}", self.path.display()))?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|name| ObjectId::is_valid(name))
            .map(ObjectId::try_parse)
            .collect::<anyhow::Result<Vec<_>>>()?;
        object_ids.sort();

        object_ids
            .iter()
            .map(|object_id| self.read_blob(object_id))
            .collect()
    }

    fn write_object(&self, object_path: PathBuf, object_content: &[u8]) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.path).context(format!(
            "Unable to create object directory {}",
            self.path.display()
        ))?;
        let temp_object_path = self.path.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
