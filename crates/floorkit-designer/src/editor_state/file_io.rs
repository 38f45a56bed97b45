//! File I/O operations (import, export, save, load) for editor state.

use std::path::Path;

use floorkit_core::{DocumentError, EditorEvent};
use floorkit_settings::LocalStorage;
use tracing::{info, warn};

use super::EditorState;
use crate::model::Project;
use crate::selection::Selection;
use crate::serialization::{project_from_json, project_to_json, ProjectDocument};

impl EditorState {
    /// Serializes the current project.
    pub fn export_json(&self) -> Result<String, DocumentError> {
        project_to_json(&self.project)
    }

    /// Replaces the project with a parsed document as one undo step.
    ///
    /// On any parse or validation error the current project is untouched.
    pub fn import_json(&mut self, json: &str) -> Result<(), DocumentError> {
        let project = project_from_json(json)?;
        self.cancel_gesture();
        let snapshot = self.history.begin_interaction(&self.project);
        self.project = project;
        self.history.commit_interaction(snapshot);
        self.replaced();
        self.notify_history();
        info!(
            "Imported project with {} floors and {} walls",
            self.project.floors().len(),
            self.project.walls().len()
        );
        Ok(())
    }

    /// Writes the project to the storage's default slot.
    pub fn save_local(&self, storage: &LocalStorage) -> bool {
        let json = match self.export_json() {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize project: {}", e);
                return false;
            }
        };
        match storage.save(&json) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to save project locally: {}", e);
                false
            }
        }
    }

    /// Loads the project from the storage's default slot.
    ///
    /// Returns `false` and keeps the current project when the slot is empty
    /// or unparsable. A successful load starts a fresh history.
    pub fn load_local(&mut self, storage: &LocalStorage) -> bool {
        let json = match storage.load() {
            Ok(Some(json)) => json,
            Ok(None) => return false,
            Err(e) => {
                warn!("Failed to read local project: {}", e);
                return false;
            }
        };
        match project_from_json(&json) {
            Ok(project) => {
                self.replace_project(project);
                info!("Loaded project from slot '{}'", storage.slot());
                true
            }
            Err(e) => {
                warn!("Ignoring unparsable local project: {}", e);
                false
            }
        }
    }

    /// Save project to file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        ProjectDocument::from_project(&self.project).save_to_file(&path)?;
        info!("Saved project to {}", path.as_ref().display());
        Ok(())
    }

    /// Load project from file, starting a fresh history.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let project = crate::serialization::load_project(&path)?;
        self.replace_project(project);
        info!("Loaded project from {}", path.as_ref().display());
        Ok(())
    }

    /// Starts over with an empty single-floor project.
    pub fn new_project(&mut self) {
        let mut project = Project::with_floor_height(self.config.defaults.floor_height);
        project.set_units(self.config.defaults.units);
        self.replace_project(project);
    }

    fn replace_project(&mut self, project: Project) {
        self.cancel_gesture();
        self.project = project;
        self.history.clear();
        self.replaced();
        self.notify_history();
    }

    fn replaced(&mut self) {
        self.set_selection(Selection::None);
        self.emit(EditorEvent::ProjectReplaced);
        self.emit(EditorEvent::ActiveFloorChanged {
            floor_id: self.project.active_floor_id().to_string(),
        });
    }
}
