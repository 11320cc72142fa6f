//! Repository config file
//!
//! Reads and rewrites `<gitlet-dir>/config`. The grammar itself lives in
//! `artifacts::config`.

use crate::artifacts::config::Config;
use anyhow::Context;
use fake::rand;
use std::path::Path;

#[derive(Debug)]
pub struct ConfigFile {
    path: Box<Path>,
}

impl ConfigFile {
    pub fn new(path: Box<Path>) -> Self {
        ConfigFile { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed config; a missing file reads as the defaults
    pub fn read(&self) -> anyhow::Result<Config> {
        if !self.path.is_file() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Unable to read config {}", self.path.display()))?;

        Config::parse(&content)
            .with_context(|| format!("Invalid config {}", self.path.display()))
    }

    pub fn write(&self, config: &Config) -> anyhow::Result<()> {
        let temp_path = self
            .path
            .with_file_name(format!("config-{}.tmp", rand::random::<u32>()));

        std::fs::write(&temp_path, config.serialize())
            .with_context(|| format!("Unable to write config {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Unable to replace config {}", self.path.display()))?;

        Ok(())
    }
}
