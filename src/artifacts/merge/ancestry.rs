//! Commit ancestry queries
//!
//! Ancestry walks the commit DAG through a caller-supplied parent loader, so
//! the same queries run against the object store or an in-memory graph.
//!
//! ## Common Ancestor
//!
//! The merge base of two commits is found by ordering the two hashes, taking
//! each commit's ancestor closure (the commit itself included) and returning the
//! first entry of the first closure that also appears in the second. Closures
//! are produced breadth-first, so the nearest shared commit comes first.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

pub struct Ancestry<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    parent_loader: ParentLoaderFn,
}

impl<ParentLoaderFn> Ancestry<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    /// # Arguments
    ///
    /// * `parent_loader` - Returns the parents of a commit, or an empty vector
    ///   for root commits and commits the loader does not know
    pub fn new(parent_loader: ParentLoaderFn) -> Self {
        Self { parent_loader }
    }

    /// Every commit reachable through parent links, excluding `commit_id` itself
    ///
    /// Both parents of a merge commit are followed. Each ancestor appears once,
    /// nearest generations first.
    pub fn ancestors(&self, commit_id: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
        let mut visited = HashSet::new();
        let mut ancestors = Vec::new();
        let mut queue = VecDeque::from((self.parent_loader)(commit_id)?);

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.clone()) {
                continue;
            }

            queue.extend((self.parent_loader)(&current)?);
            ancestors.push(current);
        }

        Ok(ancestors)
    }

    pub fn is_ancestor(&self, descendant: &ObjectId, ancestor: &ObjectId) -> anyhow::Result<bool> {
        Ok(self.ancestors(descendant)?.contains(ancestor))
    }

    pub fn common_ancestor(
        &self,
        first: &ObjectId,
        second: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let (first, second) = if first <= second {
            (first, second)
        } else {
            (second, first)
        };

        let first_closure = self.closure(first)?;
        let second_closure = self.closure(second)?.into_iter().collect::<HashSet<_>>();

        Ok(first_closure
            .into_iter()
            .find(|commit_id| second_closure.contains(commit_id)))
    }

    fn closure(&self, commit_id: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
        let mut closure = vec![commit_id.clone()];
        closure.extend(self.ancestors(commit_id)?);
        Ok(closure)
    }
}
