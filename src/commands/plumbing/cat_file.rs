use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    pub fn cat_file(&self, object_id: &str) -> anyhow::Result<()> {
        let content = ObjectId::try_parse(object_id.to_string())
            .ok()
            .map(|oid| self.database().read(&oid))
            .transpose()?
            .flatten()
            .ok_or_else(|| {
                GitletError::UnknownRevision(format!("Not a valid object name {object_id}"))
            })?;

        self.writer().write_all(&content)?;

        Ok(())
    }
}
