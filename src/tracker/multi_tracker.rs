//! Frame-to-frame association and track lifecycle management.

use ndarray::Array2;
use tracing::debug;

use crate::detect::Detection;
use crate::tracker::matching::{MatchingPolicy, min_cost_assignment};
use crate::tracker::track::{Track, TrackStore};

/// Configuration for the multi-object tracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Maximum trajectory points stored per track.
    pub buffer_size: usize,
    /// Maximum pixel distance between a detection and a track's predicted
    /// position for the two to match. Strict: equal distance does not match.
    pub max_distance: f32,
    /// Minimum source-contour area for a detection to be considered at all.
    pub min_area: f32,
    pub policy: MatchingPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            buffer_size: 64,
            max_distance: 50.0,
            min_area: 1000.0,
            policy: MatchingPolicy::default(),
        }
    }
}

/// Associates per-frame detections with persistent tracks.
///
/// The store is replaced wholesale each frame with exactly the tracks touched
/// in that frame — matched-and-updated or newly created. A track missed for a
/// single frame is gone; there is no grace period. Ids increase monotonically
/// over the tracker's lifetime and are never reused.
pub struct MultiBallTracker {
    config: TrackerConfig,
    store: TrackStore,
    next_id: u64,
}

impl MultiBallTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            store: TrackStore::default(),
            next_id: 0,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// The live track set after the most recent update.
    pub fn tracks(&self) -> &TrackStore {
        &self.store
    }

    /// Advance one frame. Detections are processed in their produced order;
    /// an empty list is valid and empties the store.
    pub fn update(&mut self, detections: &[Detection]) -> &TrackStore {
        match self.config.policy {
            MatchingPolicy::GreedyFirst => self.update_greedy(detections),
            MatchingPolicy::MinCost => self.update_min_cost(detections),
        }
        debug!(
            detections = detections.len(),
            tracks = self.store.len(),
            "tracker update"
        );
        &self.store
    }

    fn fresh_track(&mut self, detection: &Detection) -> Track {
        let id = self.next_id;
        self.next_id += 1;
        Track::new(
            id,
            detection.label.clone(),
            detection.position,
            detection.radius,
            self.config.buffer_size,
        )
    }

    /// Greedy-first association.
    ///
    /// Each detection scans the previous frame's tracks in store order and
    /// takes the first one predicted strictly within `max_distance`. The scan
    /// sees live state: a track already matched this frame predicts from its
    /// freshly appended position, and a second in-range detection appends to
    /// it again. Multiple detections competing for one track therefore
    /// resolve by processing order, not by total cost.
    fn update_greedy(&mut self, detections: &[Detection]) {
        // Previous tracks stay scannable in their old order; `moved` maps the
        // ones already carried over to their slot in the next store.
        let mut prev: Vec<Option<Track>> = std::mem::take(&mut self.store)
            .into_tracks()
            .into_iter()
            .map(Some)
            .collect();
        let mut moved: Vec<Option<usize>> = vec![None; prev.len()];
        let mut next = TrackStore::default();

        for detection in detections {
            if detection.contour_area() < self.config.min_area {
                continue;
            }

            let matched = (0..prev.len()).find(|&i| {
                let track = match moved[i] {
                    Some(j) => next.index(j),
                    None => match prev[i].as_ref() {
                        Some(track) => track,
                        None => return false,
                    },
                };
                (detection.position - track.predicted_position()).norm() < self.config.max_distance
            });

            match matched {
                Some(i) => {
                    let j = match moved[i] {
                        Some(j) => j,
                        None => {
                            let Some(track) = prev[i].take() else { continue };
                            let j = next.push(track);
                            moved[i] = Some(j);
                            j
                        }
                    };
                    next.index_mut(j).observe(detection.position, detection.radius);
                }
                None => {
                    let track = self.fresh_track(detection);
                    next.push(track);
                }
            }
        }

        self.store = next;
    }

    /// Minimum-total-distance association over the same threshold.
    ///
    /// All predictions come from the start-of-frame state and each track is
    /// matched at most once, so unlike the greedy policy the result does not
    /// depend on detection order.
    fn update_min_cost(&mut self, detections: &[Detection]) {
        let kept: Vec<&Detection> = detections
            .iter()
            .filter(|d| d.contour_area() >= self.config.min_area)
            .collect();
        let prev = std::mem::take(&mut self.store).into_tracks();

        let mut costs = Array2::<f32>::zeros((prev.len(), kept.len()));
        for (i, track) in prev.iter().enumerate() {
            let predicted = track.predicted_position();
            for (j, detection) in kept.iter().enumerate() {
                costs[[i, j]] = (detection.position - predicted).norm();
            }
        }

        let assignment = min_cost_assignment(&costs, self.config.max_distance);
        let mut detection_to_track: Vec<Option<usize>> = vec![None; kept.len()];
        for (track_idx, det_idx) in assignment.matches {
            detection_to_track[det_idx] = Some(track_idx);
        }

        let mut prev: Vec<Option<Track>> = prev.into_iter().map(Some).collect();
        let mut next = TrackStore::default();
        for (j, detection) in kept.iter().enumerate() {
            match detection_to_track[j].and_then(|i| prev[i].take()) {
                Some(mut track) => {
                    track.observe(detection.position, detection.radius);
                    next.push(track);
                }
                None => {
                    let track = self.fresh_track(detection);
                    next.push(track);
                }
            }
        }

        self.store = next;
    }
}
