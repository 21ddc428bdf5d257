//! Persistent track identities with bounded position histories.

use std::collections::VecDeque;

use nalgebra::Point2;

/// A persistent identity spanning frames.
///
/// Holds a bounded position history (oldest evicted first), the radius of the
/// most recent matching detection and the color label it was created with.
/// The label is sticky: matching is color-agnostic and never rewrites it.
#[derive(Debug, Clone)]
pub struct Track {
    id: u64,
    label: String,
    positions: VecDeque<Point2<f32>>,
    radius: f32,
    capacity: usize,
}

impl Track {
    pub(crate) fn new(
        id: u64,
        label: String,
        position: Point2<f32>,
        radius: f32,
        capacity: usize,
    ) -> Self {
        let mut positions = VecDeque::with_capacity(capacity.min(64));
        positions.push_back(position);
        Self {
            id,
            label,
            positions,
            radius,
            capacity,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Radius of the last matched detection, in pixels.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Maximum history length this track was created with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn history_len(&self) -> usize {
        self.positions.len()
    }

    /// Positions from oldest to newest.
    pub fn positions(&self) -> impl Iterator<Item = &Point2<f32>> {
        self.positions.iter()
    }

    pub fn last_position(&self) -> Point2<f32> {
        // A track always holds at least the position it was created from.
        self.positions[self.positions.len() - 1]
    }

    /// Position this track is expected at next frame.
    ///
    /// With two or more history points: constant-velocity extrapolation from
    /// the last pair. With a single point: the point itself.
    pub fn predicted_position(&self) -> Point2<f32> {
        let n = self.positions.len();
        let last = self.positions[n - 1];
        if n >= 2 {
            let prev = self.positions[n - 2];
            last + (last - prev)
        } else {
            last
        }
    }

    /// Record a matched detection: append its position (evicting the oldest
    /// at capacity) and replace the stored radius.
    pub(crate) fn observe(&mut self, position: Point2<f32>, radius: f32) {
        if self.positions.len() == self.capacity {
            self.positions.pop_front();
        }
        self.positions.push_back(position);
        self.radius = radius;
    }
}

/// The set of live tracks, in insertion order.
///
/// Owned and mutated exclusively by the associator, which replaces the whole
/// set each frame with the tracks touched in that frame.
#[derive(Debug, Clone, Default)]
pub struct TrackStore {
    tracks: Vec<Track>,
}

impl TrackStore {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Tracks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub(crate) fn push(&mut self, track: Track) -> usize {
        self.tracks.push(track);
        self.tracks.len() - 1
    }

    pub(crate) fn index(&self, i: usize) -> &Track {
        &self.tracks[i]
    }

    pub(crate) fn index_mut(&mut self, i: usize) -> &mut Track {
        &mut self.tracks[i]
    }

    pub(crate) fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(capacity: usize) -> Track {
        Track::new(7, "red".to_string(), Point2::new(0.0, 0.0), 12.0, capacity)
    }

    #[test]
    fn singleton_track_predicts_its_own_position() {
        let t = track(64);
        assert_eq!(t.predicted_position(), Point2::new(0.0, 0.0));
    }

    #[test]
    fn two_point_history_extrapolates_velocity() {
        let mut t = track(64);
        t.observe(Point2::new(10.0, 0.0), 12.0);
        assert_eq!(t.predicted_position(), Point2::new(20.0, 0.0));
    }

    #[test]
    fn history_is_bounded_fifo() {
        let mut t = track(3);
        t.observe(Point2::new(1.0, 0.0), 12.0);
        t.observe(Point2::new(2.0, 0.0), 12.0);
        t.observe(Point2::new(3.0, 0.0), 12.0);
        assert_eq!(t.history_len(), 3);
        let xs: Vec<f32> = t.positions().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn observe_replaces_radius() {
        let mut t = track(64);
        t.observe(Point2::new(1.0, 1.0), 17.5);
        assert_eq!(t.radius(), 17.5);
    }

    #[test]
    fn store_iterates_in_insertion_order() {
        let mut store = TrackStore::default();
        store.push(Track::new(2, "a".into(), Point2::new(0.0, 0.0), 1.0, 8));
        store.push(Track::new(0, "b".into(), Point2::new(1.0, 0.0), 1.0, 8));
        store.push(Track::new(1, "c".into(), Point2::new(2.0, 0.0), 1.0, 8));
        let ids: Vec<u64> = store.iter().map(Track::id).collect();
        assert_eq!(ids, vec![2, 0, 1]);
        assert_eq!(store.get(0).unwrap().label(), "b");
        assert!(store.get(9).is_none());
    }
}
