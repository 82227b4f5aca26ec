//! Waypoint/polygon sequence model of the mission planner.
//!
//! The [`editor::SequenceEditor`] owns the single live [`sequence::WaypointSequence`]
//! and the [`staging::PolygonStaging`] area, and turns drawing events coming
//! from a map into edits that keep every `distance_to_next` annotation in sync.

pub mod editor;
pub mod error;
pub mod sequence;
pub mod snapshot;
pub mod staging;

pub use editor::{EditorEvent, EditorState, Effect, SequenceEditor};
pub use error::{EditorError, Result};

/// Fewest points a polygon ring may have.
pub const MIN_POLYGON_POINTS: usize = 3;
