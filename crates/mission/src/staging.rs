use model::{
    coordinate::Coordinate,
    polygon::{Anchor, PendingPolygon, Polygon},
};
use utility::id::IdSequence;

use crate::{
    error::{EditorError, Result},
    MIN_POLYGON_POINTS,
};

/// Holds the ring of the polygon currently being drawn and at most one
/// finished polygon waiting to be imported.
#[derive(Debug, Default)]
pub struct PolygonStaging {
    ring: Vec<Coordinate>,
    pending: Option<PendingPolygon>,
    ids: IdSequence<Polygon>,
}

impl PolygonStaging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new ring. A polygon that was staged but never imported is
    /// dropped and returned.
    pub fn begin(&mut self) -> Option<PendingPolygon> {
        self.ring.clear();
        self.pending.take()
    }

    pub fn append_point(&mut self, coordinates: Coordinate) {
        self.ring.push(coordinates);
    }

    pub fn in_progress(&self) -> &[Coordinate] {
        &self.ring
    }

    /// Stages a polygon, replacing whatever was staged before.
    pub fn stage(&mut self, coordinates: Vec<Coordinate>, anchor: Anchor) -> &PendingPolygon {
        let mut coordinates = coordinates;
        let open_len = open_ring(&coordinates).len();
        coordinates.truncate(open_len);
        let polygon = PendingPolygon {
            id: self.ids.next_id(),
            coordinates,
            anchor,
        };
        self.pending.insert(polygon)
    }

    /// Turns the ring drawn so far into the pending polygon. With fewer than
    /// [`MIN_POLYGON_POINTS`] points the ring is kept and nothing is staged.
    pub fn finalize(&mut self, anchor: Anchor) -> Result<&PendingPolygon> {
        let points = open_ring(&self.ring).len();
        if points < MIN_POLYGON_POINTS {
            return Err(EditorError::EmptyPolygon { points });
        }
        let ring = std::mem::take(&mut self.ring);
        Ok(self.stage(ring, anchor))
    }

    pub fn pending(&self) -> Option<&PendingPolygon> {
        self.pending.as_ref()
    }

    pub fn take(&mut self) -> Option<PendingPolygon> {
        self.pending.take()
    }

    /// Puts a taken polygon back, e.g. after a failed import.
    pub fn restore(&mut self, polygon: PendingPolygon) {
        self.pending = Some(polygon);
    }

    /// Drops the ring and the pending polygon.
    pub fn clear(&mut self) {
        self.ring.clear();
        self.pending = None;
    }
}

/// Rings are kept open: a closing vertex repeating the first one is not
/// part of the polygon.
fn open_ring(ring: &[Coordinate]) -> &[Coordinate] {
    match ring {
        [first, rest @ .., last] if !rest.is_empty() && first == last => {
            &ring[..ring.len() - 1]
        }
        _ => ring,
    }
}
