use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::ShaderStage;
use crate::constants::ALL_PROJECTS;

/// A shader source found under the language root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderFile {
    pub path: PathBuf,
    pub stage: ShaderStage,
    /// Name of the immediate parent directory
    pub project: String,
}

impl ShaderFile {
    /// Build a shader file, or `None` if the extension is not a known stage
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let stage = ShaderStage::from_path(&path)?;
        let project = parent_dir_name(&path).unwrap_or_default();
        Some(Self {
            path,
            stage,
            project,
        })
    }

    /// Input path with `.<suffix>` appended to the full file name
    pub fn artifact_path(&self, suffix: &str) -> PathBuf {
        append_suffix(&self.path, suffix)
    }
}

/// Which project directories discovery looks into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectFilter {
    All,
    Named(String),
}

impl ProjectFilter {
    /// Parse a project argument, where `all` disables filtering
    pub fn from_arg(arg: &str) -> Self {
        if arg == ALL_PROJECTS {
            ProjectFilter::All
        } else {
            ProjectFilter::Named(arg.to_string())
        }
    }

    pub fn matches(&self, dir_name: &str) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Named(name) => name == dir_name,
        }
    }
}

impl std::fmt::Display for ProjectFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectFilter::All => f.write_str(ALL_PROJECTS),
            ProjectFilter::Named(name) => f.write_str(name),
        }
    }
}

/// Recursive shader search rooted at one language directory
///
/// Entries are visited sorted by file name, so identical trees always yield
/// the same sequence. Every call to [`ShaderDiscovery::iter`] walks the tree
/// again from the start.
#[derive(Debug, Clone)]
pub struct ShaderDiscovery {
    root: PathBuf,
    filter: ProjectFilter,
}

impl ShaderDiscovery {
    pub fn new(root: impl Into<PathBuf>, filter: ProjectFilter) -> Self {
        Self {
            root: root.into(),
            filter,
        }
    }

    /// Lazily walk the tree, yielding recognized shaders in matching projects
    pub fn iter(&self) -> impl Iterator<Item = ShaderFile> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable entry under {}: {}", self.root.display(), e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(move |entry| {
                let dir_name = parent_dir_name(entry.path()).unwrap_or_default();
                self.filter.matches(&dir_name)
            })
            .filter_map(|entry| {
                let path = entry.into_path();
                if ShaderStage::from_path(&path).is_none() {
                    log::trace!("Skipping {}: not a shader stage", path.display());
                    return None;
                }
                ShaderFile::from_path(path)
            })
    }

    /// Collect the whole walk into a vector
    pub fn files(&self) -> Vec<ShaderFile> {
        self.iter().collect()
    }
}

fn parent_dir_name(path: &Path) -> Option<String> {
    path.parent()
        .and_then(|parent| parent.file_name())
        .map(|name| name.to_string_lossy().into_owned())
}

pub(crate) fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}
