use crate::areas::refs::HEAD;
use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;
use std::io::Write;

impl Repository {
    /// Print HEAD's history, newest first, following first parents
    pub fn log(&self) -> anyhow::Result<()> {
        let database = self.database();

        let Some(head) = self.refs().hash(HEAD, database)? else {
            let branch = self
                .refs()
                .head_branch_name()?
                .unwrap_or_else(|| HEAD.to_string());
            anyhow::bail!(GitletError::UnknownRevision(format!(
                "your current branch '{branch}' does not have any commits yet"
            )));
        };

        let mut blocks = Vec::new();
        let mut next = Some(head);
        while let Some(commit_oid) = next {
            let commit = database.load_commit(&commit_oid)?;

            blocks.push(format!(
                "commit {}\nDate:  {}\n\n{}\n",
                commit_oid,
                commit.readable_timestamp(),
                commit.indented_message()
            ));
            next = commit.parent().cloned();
        }

        write!(self.writer(), "{}", blocks.join("\n"))?;

        Ok(())
    }
}
