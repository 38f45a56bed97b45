//! Editor state for UI integration.
//!
//! `EditorState` owns the project, its undo history, the transient selection,
//! tool, drag and draft state, and the stage view. UI bindings drive it with
//! plain input events and observe it through its [`EventBus`].
//!
//! This module is split into submodules:
//! - `tools`: tool modes and pointer/keyboard dispatch
//! - `drag`: live wall and viewport drags
//! - `commands`: history-recorded mutations
//! - `file_io`: document import/export and local save/load

mod commands;
mod drag;
mod file_io;
mod tools;

pub use drag::{Drag, DragKind};
pub use tools::{Tool, WallDraft};

use floorkit_core::{EditorEvent, EventBus, ModelError};
use floorkit_settings::EditorConfig;
use tracing::debug;

use crate::geometry::{snap_point, Point};
use crate::history::History;
use crate::model::{FloorId, Project};
use crate::selection::Selection;
use crate::viewport::StageView;

/// Interactive editor over one project.
#[derive(Debug)]
pub struct EditorState {
    pub(crate) project: Project,
    pub(crate) history: History,
    pub(crate) selection: Selection,
    pub(crate) tool: Tool,
    pub(crate) drag: Option<Drag>,
    pub(crate) draft: Option<WallDraft>,
    pub(crate) view: StageView,
    pub(crate) config: EditorConfig,
    events: EventBus,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// Creates an editor with a fresh single-floor project and default config.
    pub fn new() -> Self {
        Self::with_config(&EditorConfig::default())
    }

    pub fn with_config(config: &EditorConfig) -> Self {
        let mut project = Project::with_floor_height(config.defaults.floor_height);
        project.set_units(config.defaults.units);
        let interaction = &config.interaction;
        Self {
            project,
            history: History::new(config.history.max_depth),
            selection: Selection::None,
            tool: Tool::Select,
            drag: None,
            draft: None,
            view: StageView::new(
                interaction.min_scale,
                interaction.max_scale,
                interaction.zoom_step,
            ),
            config: config.clone(),
            events: EventBus::new(),
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn view(&self) -> &StageView {
        &self.view
    }

    pub fn draft(&self) -> Option<&WallDraft> {
        self.draft.as_ref()
    }

    pub fn drag(&self) -> Option<&Drag> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Change notifications for UI bindings.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn active_floor_id(&self) -> FloorId {
        self.project.active_floor_id().clone()
    }

    /// Undoes the last committed mutation. An in-progress gesture is
    /// cancelled first.
    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        if !self.history.undo(&mut self.project) {
            return false;
        }
        self.after_restore();
        true
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_gesture();
        if !self.history.redo(&mut self.project) {
            return false;
        }
        self.after_restore();
        true
    }

    /// Selects an element by id. Unknown ids clear the selection.
    pub fn select(&mut self, selection: Selection) {
        if selection.exists_in(&self.project) {
            self.set_selection(selection);
        } else {
            debug!("Ignoring selection of a missing element");
            self.set_selection(Selection::None);
        }
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(Selection::None);
    }

    /// Pans the stage by a screen delta. Never recorded in history.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.view.pan_by(dx, dy);
        self.notify_view();
    }

    /// Fits the active floor into a `width x height` canvas.
    pub fn fit_to_floor(&mut self, width: f64, height: f64) -> bool {
        let floor_id = self.active_floor_id();
        let points = self
            .project
            .walls_on_floor(&floor_id)
            .flat_map(|w| [w.a, w.b])
            .collect::<Vec<_>>();
        let fitted =
            self.view
                .fit_to_points(points, width, height, self.config.interaction.fit_margin_px);
        if fitted {
            self.notify_view();
        }
        fitted
    }

    pub(crate) fn snap(&self, p: Point) -> Point {
        snap_point(p, self.project.units())
    }

    /// Minimum hit radius converted to model units at the current scale.
    pub(crate) fn min_hit_radius(&self) -> f64 {
        self.view
            .pixels_to_model(self.config.interaction.min_hit_radius_px)
    }

    /// Runs a project mutation as one history step.
    ///
    /// An active drag is cancelled first so the snapshot never holds
    /// uncommitted drag state. The snapshot is taken before `mutate` runs and
    /// committed only when the mutation succeeded and actually changed the
    /// project. Model errors are logged and turned into `None`.
    pub(crate) fn apply<T>(
        &mut self,
        action: &str,
        mutate: impl FnOnce(&mut Project) -> Result<T, ModelError>,
    ) -> Option<T> {
        if self.cancel_drag() {
            debug!("Drag cancelled by {}", action);
        }
        let snapshot = self.history.begin_interaction(&self.project);
        match mutate(&mut self.project) {
            Ok(value) => {
                if &self.project != snapshot.project() {
                    self.history.commit_interaction(snapshot);
                    self.notify_project(false);
                    self.notify_history();
                }
                Some(value)
            }
            Err(e) => {
                debug!("{} rejected: {}", action, e);
                if &self.project != snapshot.project() {
                    self.project = snapshot.into_project();
                }
                None
            }
        }
    }

    pub(crate) fn set_selection(&mut self, selection: Selection) {
        if self.selection == selection {
            return;
        }
        self.selection = selection;
        self.emit(EditorEvent::SelectionChanged {
            kind: self.selection.kind().map(str::to_string),
            id: self.selection.id().map(str::to_string),
        });
    }

    fn after_restore(&mut self) {
        self.selection = Selection::None;
        self.emit(EditorEvent::SelectionChanged {
            kind: None,
            id: None,
        });
        self.emit(EditorEvent::ProjectReplaced);
        self.notify_history();
    }

    pub(crate) fn emit(&self, event: EditorEvent) {
        // publishing without listeners is fine
        let _ = self.events.publish(event);
    }

    pub(crate) fn notify_project(&self, live: bool) {
        self.emit(EditorEvent::ProjectChanged { live });
    }

    pub(crate) fn notify_history(&self) {
        self.emit(EditorEvent::HistoryChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        });
    }

    pub(crate) fn notify_view(&self) {
        let pan = self.view.pan();
        self.emit(EditorEvent::ViewChanged {
            pan_x: pan.x,
            pan_y: pan.y,
            scale: self.view.scale(),
        });
    }
}
