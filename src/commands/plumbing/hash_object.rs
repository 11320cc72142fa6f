use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;

impl Repository {
    pub fn hash_object(&self, object_path: &str, write: bool) -> anyhow::Result<()> {
        let path = self.resolve_path(object_path);
        let content = std::fs::read(&path)
            .with_context(|| format!("could not open '{object_path}' for reading"))?;
        let blob = Blob::new(Bytes::from(content));

        let object_id = if write {
            self.database().store(&blob)?
        } else {
            blob.object_id()?
        };

        writeln!(self.writer(), "{}", object_id)?;

        Ok(())
    }
}
