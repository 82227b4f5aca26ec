use std::slice;

use itertools::Itertools;
use model::{coordinate::Coordinate, waypoint::Waypoint};
use utility::id::{Id, IdSequence};

use crate::error::{EditorError, Result};

/// Ordered waypoints in flight order.
///
/// Every waypoint but the last carries the distance to its successor, the
/// last one carries none. All mutating operations keep it that way.
#[derive(Debug, Clone, Default)]
pub struct WaypointSequence {
    waypoints: Vec<Waypoint>,
    ids: IdSequence<Waypoint>,
}

impl WaypointSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Waypoint> {
        self.waypoints.iter()
    }

    pub fn as_slice(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    pub fn index_of_id(&self, id: Id<Waypoint>) -> Option<usize> {
        self.waypoints.iter().position(|waypoint| waypoint.id == id)
    }

    pub fn allocate_id(&mut self) -> Id<Waypoint> {
        self.ids.next_id()
    }

    /// Appends a new waypoint and links the previous last waypoint to it.
    pub fn append(&mut self, coordinates: Coordinate) -> Waypoint {
        let waypoint = Waypoint::new(self.allocate_id(), coordinates);
        if let Some(last) = self.waypoints.last_mut() {
            last.link_to(Some(&waypoint));
        }
        self.waypoints.push(waypoint.clone());
        waypoint
    }

    /// Turns a coordinate ring into a block of waypoints with fresh ids. The
    /// distances inside the block are set, the last one is left absent.
    pub fn materialize(&mut self, ring: &[Coordinate]) -> Vec<Waypoint> {
        let mut block = ring
            .iter()
            .map(|coordinates| Waypoint::new(self.ids.next_id(), *coordinates))
            .collect::<Vec<_>>();
        let distances = ring
            .iter()
            .tuple_windows()
            .map(|(a, b)| a.distance_to(b));
        for (waypoint, distance) in block.iter_mut().zip(distances) {
            waypoint.distance_to_next = Some(distance);
        }
        block
    }

    /// Inserts `items` at `at_index` and recomputes the two distances at the
    /// block's borders. Distances inside the block are taken as they are.
    ///
    /// Fails without touching the sequence if the index is past the end or
    /// an id would appear twice.
    pub fn splice_in(&mut self, at_index: usize, items: Vec<Waypoint>) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        if at_index > self.waypoints.len() {
            return Err(EditorError::IndexOutOfRange {
                index: at_index,
                len: self.waypoints.len(),
            });
        }
        let duplicate = items
            .iter()
            .map(|item| item.id)
            .duplicates()
            .chain(
                items
                    .iter()
                    .map(|item| item.id)
                    .filter(|id| self.index_of_id(*id).is_some()),
            )
            .next();
        if let Some(id) = duplicate {
            return Err(EditorError::DuplicateWaypoint(id));
        }

        if let Some(highest) = items.iter().map(|item| item.id.raw()).max() {
            self.ids.skip_past(highest);
        }

        let last_inserted = at_index + items.len() - 1;
        self.waypoints.splice(at_index..at_index, items);

        if at_index > 0 {
            self.relink(at_index - 1);
        }
        self.relink(last_inserted);
        Ok(())
    }

    /// Removes a waypoint and links its predecessor to its successor.
    pub fn remove(&mut self, id: Id<Waypoint>) -> Result<Waypoint> {
        let index = self
            .index_of_id(id)
            .ok_or(EditorError::WaypointNotFound(id))?;
        let removed = self.waypoints.remove(index);
        if index > 0 {
            self.relink(index - 1);
        }
        Ok(removed)
    }

    /// Sum of all segment lengths in metres.
    pub fn total_distance(&self) -> f64 {
        self.waypoints
            .iter()
            .filter_map(|waypoint| waypoint.distance_to_next)
            .sum()
    }

    /// Whether every distance annotation matches the coordinates it spans.
    pub fn is_consistent(&self) -> bool {
        let linked = self.waypoints.iter().tuple_windows().all(|(a, b)| {
            a.distance_to_next == Some(a.coordinates.distance_to(&b.coordinates))
        });
        let terminated = self
            .waypoints
            .last()
            .map_or(true, |last| last.distance_to_next.is_none());
        linked && terminated
    }

    fn relink(&mut self, index: usize) {
        let (head, tail) = self.waypoints.split_at_mut(index + 1);
        if let Some(current) = head.last_mut() {
            current.link_to(tail.first());
        }
    }
}

impl<'a> IntoIterator for &'a WaypointSequence {
    type Item = &'a Waypoint;
    type IntoIter = slice::Iter<'a, Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
