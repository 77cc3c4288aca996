//! Workspace discovery and structure
//!
//! A workspace is a directory with a `.nexa/` marker and a `data/`
//! directory holding one YAML file per collection.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::identity::EntityKind;

/// Represents a Nexa workspace on disk
#[derive(Debug)]
pub struct Workspace {
    /// Root directory of the workspace (parent of .nexa/)
    root: PathBuf,
}

impl Workspace {
    /// Find the workspace root by walking up from the current directory
    pub fn discover() -> Result<Self, WorkspaceError> {
        let current =
            std::env::current_dir().map_err(|e| WorkspaceError::Io(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find the workspace root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, WorkspaceError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| WorkspaceError::Io(e.to_string()))?;

        loop {
            if current.join(".nexa").is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(WorkspaceError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Open a workspace at an explicit root, without walking up
    pub fn open(root: &Path) -> Result<Self, WorkspaceError> {
        if root.join(".nexa").is_dir() {
            Ok(Self {
                root: root.to_path_buf(),
            })
        } else {
            Err(WorkspaceError::NotFound {
                searched_from: root.to_path_buf(),
            })
        }
    }

    /// Create a new workspace structure at the given path
    pub fn init(path: &Path) -> Result<Self, WorkspaceError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let marker = root.join(".nexa");
        if marker.exists() {
            return Err(WorkspaceError::AlreadyExists(root));
        }

        std::fs::create_dir_all(&marker).map_err(|e| WorkspaceError::Io(e.to_string()))?;
        std::fs::create_dir_all(root.join("data"))
            .map_err(|e| WorkspaceError::Io(e.to_string()))?;

        Ok(Self { root })
    }

    /// Get the workspace root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the data file for a collection (e.g. `data/leads.yaml`)
    pub fn data_file(&self, kind: EntityKind) -> PathBuf {
        self.root
            .join("data")
            .join(format!("{}.yaml", kind.plural()))
    }

    /// Get the id-counter file (`data/counters.yaml`)
    pub fn counters_file(&self) -> PathBuf {
        self.root.join("data").join("counters.yaml")
    }
}

/// Errors that can occur during workspace operations
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("not a Nexa workspace (searched from {searched_from:?}). Run 'nexa init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("Nexa workspace already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    Io(String),
}
