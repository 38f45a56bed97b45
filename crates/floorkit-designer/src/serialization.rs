//! Project document format.
//!
//! The document is plain JSON:
//!
//! ```json
//! { "floors": [...], "walls": [...], "openings": [...],
//!   "units": "imperial", "activeFloorId": "floor-..." }
//! ```
//!
//! Parsing always validates the aggregate before a [`Project`] is produced.

use std::path::Path;

use anyhow::{Context, Result};
use floorkit_core::{DocumentError, Units};
use serde::{Deserialize, Serialize};

use crate::model::{Floor, FloorId, Opening, Project, Wall};

/// Serialized form of a [`Project`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub floors: Vec<Floor>,
    pub walls: Vec<Wall>,
    pub openings: Vec<Opening>,
    #[serde(default)]
    pub units: Units,
    pub active_floor_id: FloorId,
}

impl ProjectDocument {
    pub fn from_project(project: &Project) -> Self {
        Self {
            floors: project.floors().to_vec(),
            walls: project.walls().to_vec(),
            openings: project.openings().to_vec(),
            units: project.units(),
            active_floor_id: project.active_floor_id().clone(),
        }
    }

    /// Builds the project, rejecting documents that break an invariant.
    pub fn into_project(self) -> Result<Project, DocumentError> {
        Project::from_parts(
            self.floors,
            self.walls,
            self.openings,
            self.units,
            self.active_floor_id,
        )
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save document to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json().context("Failed to serialize project")?;
        std::fs::write(path.as_ref(), json).context("Failed to write project file")?;
        Ok(())
    }

    /// Load document from file. The contents are not validated here; use
    /// [`ProjectDocument::into_project`].
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read project file")?;
        Self::from_json(&content).context("Failed to parse project file")
    }
}

/// Serializes a project to pretty JSON.
pub fn project_to_json(project: &Project) -> Result<String, DocumentError> {
    ProjectDocument::from_project(project).to_json()
}

/// Parses and validates a project document.
pub fn project_from_json(json: &str) -> Result<Project, DocumentError> {
    ProjectDocument::from_json(json)?.into_project()
}

/// Reads and validates a project document from disk.
pub fn load_project(path: impl AsRef<Path>) -> Result<Project> {
    let path = path.as_ref();
    let project = ProjectDocument::load_from_file(path)?
        .into_project()
        .with_context(|| format!("Invalid project document {}", path.display()))?;
    Ok(project)
}
