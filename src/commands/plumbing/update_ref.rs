use crate::areas::refs::Refs;
use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;

impl Repository {
    /// Point `ref_to_update` at the commit `ref_to_update_to` resolves to
    ///
    /// HEAD is followed to its branch when attached.
    pub fn update_ref(&self, ref_to_update: &str, ref_to_update_to: &str) -> anyhow::Result<()> {
        let database = self.database();

        let Some(oid) = self
            .refs()
            .hash(ref_to_update_to, database)?
            .filter(|oid| database.exists(oid))
        else {
            anyhow::bail!(GitletError::UnknownRevision(format!(
                "{ref_to_update_to} not a valid SHA1"
            )));
        };

        if !Refs::is_ref(ref_to_update) {
            anyhow::bail!(GitletError::InvalidRef(format!(
                "cannot lock the ref {ref_to_update}"
            )));
        }

        let terminal_ref = self.refs().terminal_ref(ref_to_update)?;
        if !database.is_commit(&oid)? {
            anyhow::bail!(GitletError::InvalidRef(format!(
                "{terminal_ref} cannot refer to non-commit object {oid}\n"
            )));
        }

        self.refs().write(&terminal_ref, oid.as_ref())
    }
}
