use crate::areas::refs::{HEAD, Refs};
use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;
use std::io::Write;

impl Repository {
    /// List local branches, or create `branch_name` at HEAD
    pub fn branch(&self, branch_name: Option<&str>) -> anyhow::Result<()> {
        let refs = self.refs();

        let Some(branch_name) = branch_name else {
            let head_branch = refs.head_branch_name()?;
            for branch in refs.local_heads()?.keys() {
                let marker = if head_branch.as_ref() == Some(branch) {
                    "* "
                } else {
                    "  "
                };
                writeln!(self.writer(), "{marker}{branch}")?;
            }
            return Ok(());
        };

        let Some(head) = refs.hash(HEAD, self.database())? else {
            let head_branch = refs.head_branch_name()?.unwrap_or_else(|| HEAD.to_string());
            anyhow::bail!(GitletError::InvalidRef(format!(
                "{head_branch} not a valid object name"
            )));
        };

        let branch_ref = Refs::to_local_ref(branch_name);
        if refs.exists(&branch_ref) {
            anyhow::bail!(GitletError::AlreadyExists(format!(
                "A branch named {branch_name} already exists"
            )));
        }

        self.update_ref(&branch_ref, head.as_ref())
    }
}
