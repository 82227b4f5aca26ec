use std::{error, fmt, result};

use model::waypoint::Waypoint;
use utility::id::Id;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorError {
    /// The request is not allowed in the editor's current state. Nothing changed.
    InvalidTransition {
        state: &'static str,
        request: &'static str,
    },
    /// The waypoint a polygon is anchored to is not part of the sequence.
    AnchorNotFound(Id<Waypoint>),
    /// A polygon draw was finished with too few points.
    EmptyPolygon { points: usize },
    WaypointNotFound(Id<Waypoint>),
    /// A waypoint id would appear twice in the sequence.
    DuplicateWaypoint(Id<Waypoint>),
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = result::Result<T, EditorError>;

impl error::Error for EditorError {}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EditorError::InvalidTransition { state, request } => {
                write!(f, "Can not {} while {}.", request, state)
            }
            EditorError::AnchorNotFound(id) => {
                write!(f, "Anchor waypoint {} does not exist.", id)
            }
            EditorError::EmptyPolygon { points } => write!(
                f,
                "A polygon needs at least {} points, got {}.",
                crate::MIN_POLYGON_POINTS,
                points
            ),
            EditorError::WaypointNotFound(id) => {
                write!(f, "Waypoint {} does not exist.", id)
            }
            EditorError::DuplicateWaypoint(id) => {
                write!(f, "Waypoint {} is already part of the sequence.", id)
            }
            EditorError::IndexOutOfRange { index, len } => {
                write!(f, "Index {} is out of range for {} waypoints.", index, len)
            }
        }
    }
}
