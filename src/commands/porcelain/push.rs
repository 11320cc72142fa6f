use crate::areas::refs::Refs;
use crate::areas::remote::RemoteRepository;
use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;
use std::io::Write;

impl Repository {
    /// Send `branch` to `remote`, refusing non-fast-forward updates unless `force`
    pub fn push(&self, remote: &str, branch: &str, force: bool) -> anyhow::Result<()> {
        let remote_repository = self.open_remote(remote)?;
        let database = self.database();

        if remote_repository.is_checked_out(branch)? {
            anyhow::bail!(GitletError::UnsupportedOperation(format!(
                "refusing to update checked out branch {branch}"
            )));
        }

        let branch_ref = Refs::to_local_ref(branch);
        let receiver = remote_repository.ref_hash(&branch_ref)?;
        let Some(giver) = self.refs().hash(&branch_ref, database)? else {
            anyhow::bail!(GitletError::UnknownRevision(format!(
                "src refspec {branch} does not match any"
            )));
        };

        if database.is_up_to_date(receiver.as_ref(), &giver)? {
            writeln!(self.writer(), "Already up-to-date")?;
            return Ok(());
        }

        if !force && !database.can_fast_forward(receiver.as_ref(), &giver)? {
            anyhow::bail!(GitletError::PushRejected {
                url: remote_repository.url().to_string()
            });
        }

        let objects = database.all_objects()?;
        for object in &objects {
            remote_repository.write_object(object)?;
        }
        tracing::info!(remote, branch, objects = objects.len(), force, "pushed objects");

        remote_repository.update_ref(&branch_ref, &giver)?;
        self.update_ref(&Refs::to_remote_ref(remote, branch), giver.as_ref())?;

        writeln!(
            self.writer(),
            "To {}\nCount {}\n{} -> {}",
            remote_repository.url(),
            objects.len(),
            branch,
            branch
        )?;

        Ok(())
    }
}
