//! Live drag gestures.
//!
//! Wall drags mutate the project on every pointer move and are recorded as a
//! single history step on release. All moves are computed from the state
//! captured at press time, so the result depends only on the current pointer
//! position and not on how many move events arrived.

use floorkit_core::EditorEvent;
use tracing::debug;

use super::EditorState;
use crate::geometry::{snap_point, Point};
use crate::history::ProjectSnapshot;
use crate::input::PointerEvent;
use crate::model::{Opening, WallEnd, WallId};

#[derive(Debug, Clone, PartialEq)]
pub enum DragKind {
    /// Moves a whole wall by the pointer delta.
    WallBody {
        wall_id: WallId,
        /// Snapped pointer position at press time.
        origin: Point,
        start_a: Point,
        start_b: Point,
    },
    /// Moves one endpoint to the pointer.
    WallEndpoint {
        wall_id: WallId,
        end: WallEnd,
        start_a: Point,
        start_b: Point,
    },
    /// Pans the stage; touches no project state.
    ViewportPan { last_x: f64, last_y: f64 },
}

impl DragKind {
    pub fn name(&self) -> &'static str {
        match self {
            DragKind::WallBody { .. } => "wall-body",
            DragKind::WallEndpoint { .. } => "wall-endpoint",
            DragKind::ViewportPan { .. } => "viewport-pan",
        }
    }
}

/// An active drag and the state needed to commit or cancel it.
#[derive(Debug, Clone)]
pub struct Drag {
    kind: DragKind,
    snapshot: Option<ProjectSnapshot>,
    baseline: Vec<Opening>,
    baseline_length: f64,
}

impl Drag {
    pub fn kind(&self) -> &DragKind {
        &self.kind
    }
}

impl EditorState {
    pub(crate) fn start_pan(&mut self, ev: &PointerEvent) {
        self.drag = Some(Drag {
            kind: DragKind::ViewportPan {
                last_x: ev.x,
                last_y: ev.y,
            },
            snapshot: None,
            baseline: Vec::new(),
            baseline_length: 0.0,
        });
    }

    /// Starts a wall drag. `grab` is the snapped pointer position; `end`
    /// selects an endpoint drag, `None` a body drag.
    pub(crate) fn start_wall_drag(&mut self, wall_id: &WallId, end: Option<WallEnd>, grab: Point) {
        let Some(wall) = self.project.wall(wall_id) else {
            debug!("Drag start on missing wall {}", wall_id);
            return;
        };
        let (start_a, start_b) = (wall.a, wall.b);
        let baseline_length = wall.length();
        let baseline = self.project.openings_on_wall(wall_id).cloned().collect();
        let kind = match end {
            Some(end) => DragKind::WallEndpoint {
                wall_id: wall_id.clone(),
                end,
                start_a,
                start_b,
            },
            None => DragKind::WallBody {
                wall_id: wall_id.clone(),
                origin: grab,
                start_a,
                start_b,
            },
        };
        debug!("Starting {} drag on {}", kind.name(), wall_id);
        self.drag = Some(Drag {
            kind,
            snapshot: Some(self.history.begin_interaction(&self.project)),
            baseline,
            baseline_length,
        });
    }

    pub(crate) fn update_drag(&mut self, ev: &PointerEvent) {
        let units = self.project.units();
        let pointer = snap_point(self.view.screen_to_model(ev.x, ev.y), units);
        let Some(drag) = self.drag.as_mut() else {
            return;
        };

        let (wall_id, a, b) = match &mut drag.kind {
            DragKind::ViewportPan { last_x, last_y } => {
                let (dx, dy) = (ev.x - *last_x, ev.y - *last_y);
                *last_x = ev.x;
                *last_y = ev.y;
                self.view.pan_by(dx, dy);
                self.notify_view();
                return;
            }
            DragKind::WallBody {
                wall_id,
                origin,
                start_a,
                start_b,
            } => {
                let delta = pointer - *origin;
                (
                    wall_id.clone(),
                    snap_point(*start_a + delta, units),
                    snap_point(*start_b + delta, units),
                )
            }
            DragKind::WallEndpoint {
                wall_id,
                end,
                start_a,
                start_b,
            } => match end {
                WallEnd::A => (wall_id.clone(), pointer, *start_b),
                WallEnd::B => (wall_id.clone(), *start_a, pointer),
            },
        };
        let length = drag.baseline_length;
        let baseline = std::mem::take(&mut drag.baseline);

        let result = self.project.reshape_wall(&wall_id, a, b, length, &baseline);
        if let Some(drag) = self.drag.as_mut() {
            drag.baseline = baseline;
        }
        match result {
            Ok(()) => self.notify_project(true),
            Err(e) => debug!("Drag move ignored: {}", e),
        }
    }

    /// Ends the active drag, recording one history step when the project
    /// changed.
    pub(crate) fn finish_drag(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let Some(snapshot) = drag.snapshot else {
            return;
        };
        if &self.project != snapshot.project() {
            debug!("Committing {} drag", drag.kind.name());
            self.history.commit_interaction(snapshot);
            self.notify_project(false);
            self.notify_history();
        }
    }

    /// Aborts the active drag, restoring the press-time project.
    pub(crate) fn cancel_drag(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        if let Some(snapshot) = drag.snapshot {
            if &self.project != snapshot.project() {
                self.project = snapshot.into_project();
                self.emit(EditorEvent::ProjectReplaced);
            }
        }
        true
    }
}
