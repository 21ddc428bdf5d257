//! End-to-end tracking pipeline: capture, detect, associate, render.

use image::RgbImage;

use crate::config::{AppConfig, Profile};
use crate::detect::BlobDetector;
use crate::pipeline::source::FrameSource;
use crate::render::TrajectoryRenderer;
use crate::tracker::{MultiBallTracker, TrackStore};

/// Bundles a frame source with detection, association and overlay rendering.
///
/// One call to [`process_next`](Self::process_next) runs a full frame step:
/// capture, segment/detect, update tracks, draw the overlay in place. The
/// pipeline is single-threaded and synchronous; the track store is owned by
/// the tracker and only ever mutated from the calling thread.
pub struct TrackingPipeline<S: FrameSource> {
    source: S,
    detector: BlobDetector,
    tracker: MultiBallTracker,
    renderer: TrajectoryRenderer,
}

impl<S: FrameSource> TrackingPipeline<S> {
    pub fn new(
        source: S,
        detector: BlobDetector,
        tracker: MultiBallTracker,
        renderer: TrajectoryRenderer,
    ) -> Self {
        Self {
            source,
            detector,
            tracker,
            renderer,
        }
    }

    /// Build a pipeline from a resolved color profile and application
    /// settings.
    pub fn from_config(source: S, profile: Profile, config: &AppConfig) -> Self {
        Self::new(
            source,
            BlobDetector::new(profile, config.detector.clone()),
            MultiBallTracker::new(config.tracker.clone()),
            TrajectoryRenderer::new(config.style.clone()),
        )
    }

    /// Capture and process one frame.
    ///
    /// Returns the frame with the overlay drawn onto it, or `Ok(None)` once
    /// the source is exhausted.
    pub fn process_next(&mut self) -> Result<Option<RgbImage>, S::Error> {
        let Some(mut frame) = self.source.next_frame()? else {
            return Ok(None);
        };
        self.step(&mut frame);
        Ok(Some(frame))
    }

    /// Process one externally supplied frame: detect, associate and draw the
    /// overlay in place. Returns the updated track store.
    pub fn step(&mut self, frame: &mut RgbImage) -> &TrackStore {
        let detections = self.detector.detect(frame);
        self.tracker.update(&detections);
        self.renderer.draw(frame, self.tracker.tracks());
        self.tracker.tracks()
    }

    pub fn detector(&self) -> &BlobDetector {
        &self.detector
    }

    pub fn tracker(&self) -> &MultiBallTracker {
        &self.tracker
    }

    pub fn renderer(&self) -> &TrajectoryRenderer {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorRange, Profile};
    use crate::detect::DetectorConfig;
    use crate::render::RenderStyle;
    use crate::tracker::TrackerConfig;
    use image::Rgb;
    use imageproc::drawing::draw_filled_circle_mut;
    use std::convert::Infallible;

    struct MockSource {
        frames: Vec<RgbImage>,
    }

    impl FrameSource for MockSource {
        type Error = Infallible;

        fn next_frame(&mut self) -> Result<Option<RgbImage>, Self::Error> {
            if self.frames.is_empty() {
                Ok(None)
            } else {
                Ok(Some(self.frames.remove(0)))
            }
        }
    }

    fn red_frame(cx: i32, cy: i32) -> RgbImage {
        let mut frame = RgbImage::new(200, 200);
        draw_filled_circle_mut(&mut frame, (cx, cy), 30, Rgb([200, 30, 30]));
        frame
    }

    fn red_profile() -> Profile {
        let mut profile = Profile::default();
        profile.insert(
            "red",
            ColorRange {
                h_lower: 0,
                h_upper: 10,
                s_lower: 100,
                s_upper: 255,
                v_lower: 100,
                v_upper: 255,
            },
        );
        profile
    }

    #[test]
    fn pipeline_tracks_across_frames_and_drains_the_source() {
        let source = MockSource {
            frames: vec![red_frame(100, 100), red_frame(105, 100)],
        };
        let mut pipeline = TrackingPipeline::new(
            source,
            BlobDetector::new(red_profile(), DetectorConfig::default()),
            MultiBallTracker::new(TrackerConfig::default()),
            TrajectoryRenderer::new(RenderStyle::default()),
        );

        let first = pipeline.process_next().unwrap().expect("first frame");
        assert_eq!(pipeline.tracker().tracks().len(), 1);
        let track = pipeline.tracker().tracks().iter().next().unwrap();
        assert_eq!(track.id(), 0);
        assert_eq!(track.history_len(), 1);
        // Overlay was drawn in place.
        assert_ne!(first, red_frame(100, 100));

        pipeline.process_next().unwrap().expect("second frame");
        let track = pipeline.tracker().tracks().iter().next().unwrap();
        assert_eq!(track.id(), 0, "identity persists across frames");
        assert_eq!(track.history_len(), 2);

        assert!(pipeline.process_next().unwrap().is_none());
    }
}
