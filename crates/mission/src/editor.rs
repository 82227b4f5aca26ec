use model::{
    coordinate::Coordinate,
    polygon::{Anchor, ImportedPolygon, PendingPolygon, Polygon, Side},
    waypoint::Waypoint,
};
use schemars::JsonSchema;
use serde::Serialize;
use utility::id::Id;

use crate::{
    error::{EditorError, Result},
    sequence::WaypointSequence,
    snapshot::MissionSnapshot,
    staging::PolygonStaging,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, JsonSchema)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum EditorState {
    #[default]
    Idle,
    DrawingLine,
    DrawingPolygon {
        anchor: Anchor,
    },
    PolygonStaged,
}

impl EditorState {
    fn describe(&self) -> &'static str {
        match self {
            EditorState::Idle => "idle",
            EditorState::DrawingLine => "drawing a line",
            EditorState::DrawingPolygon { .. } => "drawing a polygon",
            EditorState::PolygonStaged => "a polygon is staged",
        }
    }
}

/// Everything the map and the mission list can ask of the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    BeginLineDraw,
    RequestInsertPolygon {
        waypoint_id: Id<Waypoint>,
        side: Side,
    },
    CoordinateAdded(Coordinate),
    DrawingCompleted,
    ImportPendingPolygon,
    CancelDrawing,
    RemoveWaypoint(Id<Waypoint>),
}

impl EditorEvent {
    fn describe(&self) -> &'static str {
        match self {
            EditorEvent::BeginLineDraw => "begin a line draw",
            EditorEvent::RequestInsertPolygon { .. } => "insert a polygon",
            EditorEvent::CoordinateAdded(_) => "add a coordinate",
            EditorEvent::DrawingCompleted => "finish drawing",
            EditorEvent::ImportPendingPolygon => "import the pending polygon",
            EditorEvent::CancelDrawing => "cancel drawing",
            EditorEvent::RemoveWaypoint(_) => "remove a waypoint",
        }
    }
}

/// What changed as the result of an event, for the display layer to redraw.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    StateChanged(EditorState),
    WaypointsChanged,
    RingExtended,
    PendingPolygonChanged,
    PolygonImported(Id<Polygon>),
}

/// Owns the mission: the waypoint sequence, the staged polygon and the list
/// of imported polygons. Events are applied one at a time; a rejected event
/// leaves everything as it was.
#[derive(Debug, Default)]
pub struct SequenceEditor {
    state: EditorState,
    waypoints: WaypointSequence,
    staging: PolygonStaging,
    imported: Vec<ImportedPolygon>,
}

impl SequenceEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn waypoints(&self) -> &WaypointSequence {
        &self.waypoints
    }

    pub fn pending_polygon(&self) -> Option<&PendingPolygon> {
        self.staging.pending()
    }

    /// Points of the polygon currently being drawn.
    pub fn ring_in_progress(&self) -> &[Coordinate] {
        self.staging.in_progress()
    }

    pub fn imported_polygons(&self) -> &[ImportedPolygon] {
        &self.imported
    }

    pub fn snapshot(&self) -> MissionSnapshot {
        MissionSnapshot::of(self)
    }

    pub fn handle(&mut self, event: EditorEvent) -> Result<Vec<Effect>> {
        log::debug!("{:?} in state {:?}", event, self.state);
        let request = event.describe();

        let result = match (self.state, event) {
            (EditorState::Idle, EditorEvent::BeginLineDraw) => {
                Ok(self.transition(EditorState::DrawingLine, vec![]))
            }
            (
                EditorState::Idle | EditorState::PolygonStaged,
                EditorEvent::RequestInsertPolygon { waypoint_id, side },
            ) => self.begin_polygon_draw(Anchor::new(waypoint_id, side)),
            (EditorState::DrawingLine, EditorEvent::CoordinateAdded(coordinates)) => {
                self.waypoints.append(coordinates);
                Ok(vec![Effect::WaypointsChanged])
            }
            (EditorState::DrawingPolygon { .. }, EditorEvent::CoordinateAdded(coordinates)) => {
                self.staging.append_point(coordinates);
                Ok(vec![Effect::RingExtended])
            }
            (EditorState::DrawingLine, EditorEvent::DrawingCompleted) => {
                Ok(self.transition(EditorState::Idle, vec![]))
            }
            (EditorState::DrawingPolygon { anchor }, EditorEvent::DrawingCompleted) => {
                self.finish_polygon(anchor)
            }
            (EditorState::PolygonStaged, EditorEvent::ImportPendingPolygon) => self.import(),
            (EditorState::DrawingLine, EditorEvent::CancelDrawing) => {
                Ok(self.transition(EditorState::Idle, vec![]))
            }
            (EditorState::DrawingPolygon { .. }, EditorEvent::CancelDrawing) => {
                self.staging.clear();
                Ok(self.transition(EditorState::Idle, vec![]))
            }
            (EditorState::PolygonStaged, EditorEvent::CancelDrawing) => {
                self.staging.clear();
                Ok(self.transition(EditorState::Idle, vec![Effect::PendingPolygonChanged]))
            }
            (
                EditorState::Idle | EditorState::PolygonStaged,
                EditorEvent::RemoveWaypoint(id),
            ) => self
                .waypoints
                .remove(id)
                .map(|_| vec![Effect::WaypointsChanged]),
            (state, _) => Err(EditorError::InvalidTransition {
                state: state.describe(),
                request,
            }),
        };

        if let Err(why) = &result {
            log::warn!("rejected request to {}: {}", request, why);
        }
        result
    }

    pub fn begin_line_draw(&mut self) -> Result<Vec<Effect>> {
        self.handle(EditorEvent::BeginLineDraw)
    }

    pub fn request_insert_polygon(
        &mut self,
        waypoint_id: Id<Waypoint>,
        side: Side,
    ) -> Result<Vec<Effect>> {
        self.handle(EditorEvent::RequestInsertPolygon { waypoint_id, side })
    }

    pub fn on_coordinate_add(&mut self, coordinates: Coordinate) -> Result<Vec<Effect>> {
        self.handle(EditorEvent::CoordinateAdded(coordinates))
    }

    pub fn on_drawing_complete(&mut self) -> Result<Vec<Effect>> {
        self.handle(EditorEvent::DrawingCompleted)
    }

    pub fn import_pending_polygon(&mut self) -> Result<Vec<Effect>> {
        self.handle(EditorEvent::ImportPendingPolygon)
    }

    pub fn cancel_drawing(&mut self) -> Result<Vec<Effect>> {
        self.handle(EditorEvent::CancelDrawing)
    }

    pub fn remove_waypoint(&mut self, id: Id<Waypoint>) -> Result<Vec<Effect>> {
        self.handle(EditorEvent::RemoveWaypoint(id))
    }

    fn transition(&mut self, next: EditorState, mut effects: Vec<Effect>) -> Vec<Effect> {
        log::debug!("{:?} -> {:?}", self.state, next);
        self.state = next;
        effects.push(Effect::StateChanged(next));
        effects
    }

    fn begin_polygon_draw(&mut self, anchor: Anchor) -> Result<Vec<Effect>> {
        if self.waypoints.index_of_id(anchor.waypoint_id).is_none() {
            return Err(EditorError::AnchorNotFound(anchor.waypoint_id));
        }
        let mut effects = vec![];
        if let Some(discarded) = self.staging.begin() {
            log::info!("discarding polygon {} that was never imported", discarded.id);
            effects.push(Effect::PendingPolygonChanged);
        }
        Ok(self.transition(EditorState::DrawingPolygon { anchor }, effects))
    }

    fn finish_polygon(&mut self, anchor: Anchor) -> Result<Vec<Effect>> {
        let pending = self.staging.finalize(anchor)?;
        log::debug!(
            "staged polygon {} with {} points",
            pending.id,
            pending.coordinates.len()
        );
        Ok(self.transition(EditorState::PolygonStaged, vec![Effect::PendingPolygonChanged]))
    }

    /// Splices the pending polygon's points into the sequence at its anchor.
    /// If the anchor is gone the polygon stays staged.
    fn import(&mut self) -> Result<Vec<Effect>> {
        let Some(pending) = self.staging.take() else {
            return Err(EditorError::InvalidTransition {
                state: self.state.describe(),
                request: EditorEvent::ImportPendingPolygon.describe(),
            });
        };
        let insert_index = match self.splice_polygon(&pending) {
            Ok(insert_index) => insert_index,
            Err(why) => {
                self.staging.restore(pending);
                return Err(why);
            }
        };

        log::info!(
            "imported polygon {} ({} points) at index {}",
            pending.id,
            pending.coordinates.len(),
            insert_index
        );
        let effects = vec![
            Effect::WaypointsChanged,
            Effect::PendingPolygonChanged,
            Effect::PolygonImported(pending.id),
        ];
        self.imported.push(pending.into());
        Ok(self.transition(EditorState::Idle, effects))
    }

    /// Inserts the polygon's ring at its anchor and returns where it starts.
    fn splice_polygon(&mut self, polygon: &PendingPolygon) -> Result<usize> {
        let anchor = polygon.anchor;
        let target_index = self
            .waypoints
            .index_of_id(anchor.waypoint_id)
            .ok_or(EditorError::AnchorNotFound(anchor.waypoint_id))?;
        let insert_index = anchor.insert_index(target_index);

        let block = self.waypoints.materialize(&polygon.coordinates);
        self.waypoints.splice_in(insert_index, block)?;
        Ok(insert_index)
    }
}
