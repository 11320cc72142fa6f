use crate::areas::config::ConfigFile;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::{GITLET_DIR, Workspace};
use crate::artifacts::errors::GitletError;
use crate::artifacts::status::inspector::Inspector;
use crate::artifacts::status::status_info::Status;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Component, Path, PathBuf};

/// Where a repository keeps its data and whether it has a working copy
#[derive(Debug, Clone, PartialEq, Eq)]
struct Location {
    root: PathBuf,
    git_dir: PathBuf,
    bare: bool,
}

impl Location {
    fn new(root: PathBuf, bare: bool) -> Self {
        let git_dir = if bare {
            root.clone()
        } else {
            root.join(GITLET_DIR)
        };

        Location {
            root,
            git_dir,
            bare,
        }
    }

    /// Repository rooted exactly at `dir`, if any
    ///
    /// A directory holding a `config` that declares `bare = true` is a bare
    /// repository; a directory holding `.gitlet/` is a normal one.
    fn find(dir: &Path) -> anyhow::Result<Option<Self>> {
        let bare_config = ConfigFile::new(dir.join("config").into_boxed_path());
        if bare_config.path().is_file() && bare_config.read().is_ok_and(|c| c.core.bare) {
            return Ok(Some(Location::new(dir.to_path_buf(), true)));
        }

        if dir.join(GITLET_DIR).is_dir() {
            return Ok(Some(Location::new(dir.to_path_buf(), false)));
        }

        Ok(None)
    }
}

pub struct Repository {
    /// Working copy root, or the repository directory itself when bare
    root: Box<Path>,
    git_dir: Box<Path>,
    /// Directory command-line paths are relative to
    cwd: Box<Path>,
    bare: bool,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    refs: Refs,
    config: ConfigFile,
    workspace: Option<Workspace>,
}

impl Repository {
    /// Handle for a repository at `path`, which may not be initialized yet
    pub fn new(path: &Path, bare: bool, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
        }
        let root = path.canonicalize()?;

        let location = match Location::find(&root)? {
            Some(location) => location,
            None => Location::new(root.clone(), bare),
        };

        Ok(Self::from_location(location, root, writer))
    }

    /// Open the repository containing `start`, looking upward through its parents
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let start = start.canonicalize()?;

        for dir in start.ancestors() {
            if let Some(location) = Location::find(dir)? {
                tracing::debug!(root = %location.root.display(), bare = location.bare, "found repository");
                return Ok(Self::from_location(location, start.clone(), writer));
            }
        }

        anyhow::bail!(GitletError::NotInRepository)
    }

    /// Open the repository rooted exactly at `path`
    pub fn open(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !path.is_dir() {
            anyhow::bail!(GitletError::NotInRepository);
        }
        let root = path.canonicalize()?;

        match Location::find(&root)? {
            Some(location) => Ok(Self::from_location(location, root, writer)),
            None => anyhow::bail!(GitletError::NotInRepository),
        }
    }

    fn from_location(location: Location, cwd: PathBuf, writer: Box<dyn std::io::Write>) -> Self {
        let workspace = (!location.bare).then(|| Workspace::new(location.root.clone().into()));

        Repository {
            database: Database::new(location.git_dir.join("objects").into_boxed_path()),
            refs: Refs::new(location.git_dir.clone().into_boxed_path()),
            config: ConfigFile::new(location.git_dir.join("config").into_boxed_path()),
            workspace,
            root: location.root.into_boxed_path(),
            git_dir: location.git_dir.into_boxed_path(),
            cwd: cwd.into_boxed_path(),
            bare: location.bare,
            writer: RefCell::new(writer),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    pub fn is_bare(&self) -> bool {
        self.bare
    }

    pub fn is_initialized(&self) -> anyhow::Result<bool> {
        Ok(Location::find(&self.root)?.is_some())
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn assert_not_bare(&self) -> anyhow::Result<()> {
        self.config.read()?.assert_not_bare()
    }

    pub fn workspace(&self) -> anyhow::Result<&Workspace> {
        self.workspace
            .as_ref()
            .ok_or_else(|| GitletError::BareRepositoryViolation.into())
    }

    pub fn index_path(&self) -> PathBuf {
        self.git_dir.join("index")
    }

    pub fn merge_msg_path(&self) -> PathBuf {
        self.git_dir.join("MERGE_MSG")
    }

    /// Index as currently persisted
    pub fn load_index(&self) -> anyhow::Result<Index> {
        let mut index = Index::new(self.index_path().into_boxed_path());
        index.rehydrate()?;
        Ok(index)
    }

    pub fn inspector(&'_ self) -> Inspector<'_> {
        Inspector::new(self)
    }

    pub fn status_report(&'_ self) -> Status<'_> {
        Status::new(self)
    }

    /// Whether a non-bare repository has `branch` checked out
    pub fn is_checked_out(&self, branch: &str) -> anyhow::Result<bool> {
        Ok(!self.bare && self.refs.head_branch_name()?.as_deref() == Some(branch))
    }

    /// Repository-relative, `/`-separated form of a command-line path
    pub fn relative_path(&self, path: &str) -> anyhow::Result<String> {
        let absolute = normalize(&self.cwd.join(path));

        let relative = absolute.strip_prefix(&self.root).map_err(|_| {
            GitletError::UnsupportedOperation(format!("{path} is outside repository"))
        })?;

        Ok(relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join("/"))
    }

    /// Resolve `path` against the working directory the repository was opened from
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        normalize(&self.cwd.join(path))
    }
}

/// Lexically resolve `.` and `..` components
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}
