//! Project configuration loaded from `project.toml`.
//!
//! ```toml
//! [project]
//! name = "Warehouse"
//!
//! [[mount]]
//! name = "assets"
//! path = "./assets"
//! default = true
//!
//! [cloner]
//! folder_name = "clone"
//! material_extension = "mat"
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use unshare_vfs::{FileSystemProvider, Vfs};

/// Top-level project configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub project: ProjectInfo,
    #[serde(default)]
    pub mount: Vec<MountConfig>,
    #[serde(default)]
    pub cloner: ClonerSettings,
}

/// General project information.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
}

/// A filesystem directory mounted into the [`Vfs`] under `name`.
#[derive(Debug, Clone, Deserialize)]
pub struct MountConfig {
    pub name: String,
    pub path: String,
    /// Paths that match no mount name resolve against this mount.
    #[serde(default)]
    pub default: bool,
}

/// Material cloner settings, the `[cloner]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClonerSettings {
    /// Name of the folder that receives duplicates, next to each source.
    pub folder_name: String,
    /// Material file extension, without the dot.
    pub material_extension: String,
}

impl Default for ClonerSettings {
    fn default() -> Self {
        Self {
            folder_name: "clone".into(),
            material_extension: "mat".into(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project: ProjectInfo {
                name: "Untitled".into(),
            },
            mount: vec![MountConfig {
                name: "assets".into(),
                path: "./assets".into(),
                default: true,
            }],
            cloner: ClonerSettings::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl ProjectConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Load a project config from a TOML file.
pub fn load_project(path: &Path) -> Result<ProjectConfig, ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProjectError::Read {
        path: path.display().to_string(),
        source,
    })?;
    ProjectConfig::from_toml(&content).map_err(|source| ProjectError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Build a [`Vfs`] from a project config.
///
/// Relative mount paths are resolved against `base_dir`.
pub fn build_vfs(config: &ProjectConfig, base_dir: &Path) -> Vfs {
    let mut vfs = Vfs::new();

    for mount in &config.mount {
        let root = base_dir.join(&mount.path);
        log::info!("VFS mount: \"{}\" -> {}", mount.name, root.display());
        vfs.mount(&mount.name, FileSystemProvider::new(root));
    }

    if let Some(default_mount) = config.mount.iter().find(|m| m.default) {
        vfs.set_default(&default_mount.name);
    }

    vfs
}

/// Load project config, falling back to defaults if the file is missing or
/// invalid. Mount paths are relative to the config file's directory.
pub fn load_or_default(path: &Path) -> (ProjectConfig, Vfs) {
    let config = match load_project(path) {
        Ok(config) => {
            log::info!(
                "Loaded project: {} ({} mounts)",
                config.project.name,
                config.mount.len()
            );
            config
        }
        Err(e) => {
            log::warn!("No usable project file ({e}), using defaults");
            ProjectConfig::default()
        }
    };

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let vfs = build_vfs(&config, base_dir);
    (config, vfs)
}
