//! Repository config model and text grammar
//!
//! ## Format
//!
//! ```text
//! [core]
//!     bare = false
//! [remote "origin"]
//!     url = ../upstream
//! [branch "master"]
//!     remote = origin
//!     merge = refs/heads/master
//! ```
//!
//! Section headers are `[name]` or `[name "label"]`; settings are `key = value`.
//! Unknown sections and keys are skipped on read.

use crate::artifacts::errors::GitletError;
use regex::Regex;
use std::collections::BTreeMap;

/// Regex pattern for `[name]` and `[name "label"]` headers
const SECTION_REGEX: &str = r#"^\[([^\s\]"]+)(?:\s+"([^"]*)")?\]$"#;

/// Regex pattern for `key = value` settings
const SETTING_REGEX: &str = r"^([^=\s]+)\s*=\s*(.*)$";

const INDENT: &str = "    ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreSettings {
    pub repository_format_version: Option<String>,
    pub file_mode: Option<bool>,
    pub bare: bool,
    pub log_all_ref_updates: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteConfig {
    pub url: String,
    pub fetch: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchConfig {
    pub remote: Option<String>,
    pub merge: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub core: CoreSettings,
    pub remotes: BTreeMap<String, RemoteConfig>,
    pub branches: BTreeMap<String, BranchConfig>,
}

enum Section {
    Core,
    Remote(String),
    Branch(String),
    Unknown,
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => anyhow::bail!("invalid boolean config value {value}"),
    }
}

impl Config {
    pub fn new(bare: bool) -> Self {
        Config {
            core: CoreSettings {
                bare,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let section_regex = Regex::new(SECTION_REGEX)?;
        let setting_regex = Regex::new(SETTING_REGEX)?;
        let mut config = Config::default();
        let mut section = Section::Unknown;

        for line in content.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if let Some(captures) = section_regex.captures(line) {
                let label = captures.get(2).map(|label| label.as_str().to_string());
                section = match (&captures[1], label) {
                    ("core", None) => Section::Core,
                    ("remote", Some(name)) => Section::Remote(name),
                    ("branch", Some(name)) => Section::Branch(name),
                    _ => Section::Unknown,
                };
                continue;
            }

            let Some(captures) = setting_regex.captures(line) else {
                anyhow::bail!("invalid config line: {line}");
            };
            let (key, value) = (&captures[1], captures[2].trim());

            match &section {
                Section::Core => match key {
                    "repositoryformatversion" => {
                        config.core.repository_format_version = Some(value.to_string())
                    }
                    "filemode" => config.core.file_mode = Some(parse_bool(value)?),
                    "bare" => config.core.bare = parse_bool(value)?,
                    "logallrefupdates" => config.core.log_all_ref_updates = Some(parse_bool(value)?),
                    _ => {}
                },
                Section::Remote(name) => {
                    let remote = config.remotes.entry(name.clone()).or_default();
                    match key {
                        "url" => remote.url = value.to_string(),
                        "fetch" => remote.fetch = Some(value.to_string()),
                        _ => {}
                    }
                }
                Section::Branch(name) => {
                    let branch = config.branches.entry(name.clone()).or_default();
                    match key {
                        "remote" => branch.remote = Some(value.to_string()),
                        "merge" => branch.merge = Some(value.to_string()),
                        _ => {}
                    }
                }
                Section::Unknown => {}
            }
        }

        Ok(config)
    }

    pub fn serialize(&self) -> String {
        let mut lines = vec!["[core]".to_string()];

        if let Some(version) = &self.core.repository_format_version {
            lines.push(format!("{INDENT}repositoryformatversion = {version}"));
        }
        if let Some(file_mode) = self.core.file_mode {
            lines.push(format!("{INDENT}filemode = {file_mode}"));
        }
        lines.push(format!("{INDENT}bare = {}", self.core.bare));
        if let Some(log_all_ref_updates) = self.core.log_all_ref_updates {
            lines.push(format!("{INDENT}logallrefupdates = {log_all_ref_updates}"));
        }

        for (name, remote) in &self.remotes {
            lines.push(format!("[remote \"{name}\"]"));
            lines.push(format!("{INDENT}url = {}", remote.url));
            if let Some(fetch) = &remote.fetch {
                lines.push(format!("{INDENT}fetch = {fetch}"));
            }
        }

        for (name, branch) in &self.branches {
            lines.push(format!("[branch \"{name}\"]"));
            if let Some(remote) = &branch.remote {
                lines.push(format!("{INDENT}remote = {remote}"));
            }
            if let Some(merge) = &branch.merge {
                lines.push(format!("{INDENT}merge = {merge}"));
            }
        }

        format!("{}\n", lines.join("\n"))
    }

    pub fn assert_not_bare(&self) -> anyhow::Result<()> {
        if self.core.bare {
            anyhow::bail!(GitletError::BareRepositoryViolation);
        }
        Ok(())
    }

    pub fn remote(&self, name: &str) -> Option<&RemoteConfig> {
        self.remotes.get(name)
    }

    pub fn add_remote(&mut self, name: &str, url: &str) {
        self.remotes.insert(
            name.to_string(),
            RemoteConfig {
                url: url.to_string(),
                fetch: Some(format!("+refs/heads/*:refs/remotes/{name}/*")),
            },
        );
    }
}
