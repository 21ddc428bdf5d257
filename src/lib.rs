//! Multi-object color blob tracking.
//!
//! Segments frames by configured HSV color ranges, extracts near-circular
//! blobs, associates them frame-to-frame into persistent tracked identities
//! and renders each identity's bounded trajectory.
//!
//! Per frame: RGB frame -> [`FrameSegmenter`] -> per-label masks ->
//! [`clean_mask`](detect::clean_mask) -> [`BlobDetector`] -> detections ->
//! [`MultiBallTracker`] -> [`TrackStore`] -> [`TrajectoryRenderer`].
//!
//! All frame input is RGB; that convention is fixed at the segmentation
//! boundary and used everywhere.

pub mod config;
pub mod detect;
pub mod pipeline;
pub mod render;
pub mod tracker;

pub use config::{AppConfig, ColorRange, ConfigError, Profile, ProfileLibrary};
pub use detect::{BlobDetector, Detection, DetectorConfig, FrameSegmenter};
pub use pipeline::{FrameSource, TrackingPipeline};
pub use render::{RenderStyle, TrajectoryRenderer};
pub use tracker::{MatchingPolicy, MultiBallTracker, Track, TrackStore, TrackerConfig};
