mod matching;
mod multi_tracker;
mod track;

pub use matching::{AssignmentResult, MatchingPolicy, min_cost_assignment};
pub use multi_tracker::{MultiBallTracker, TrackerConfig};
pub use track::{Track, TrackStore};
