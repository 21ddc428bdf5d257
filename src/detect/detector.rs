//! Blob extraction and shape filtering over cleaned masks.

use image::{GrayImage, RgbImage};
use imageproc::contours::{BorderType, find_contours};
use imageproc::geometry::{approximate_polygon_dp, arc_length};
use imageproc::point::Point;
use nalgebra::Point2;
use tracing::debug;

use crate::config::Profile;
use crate::detect::contour::{Moments, min_enclosing_circle};
use crate::detect::hsv::to_hsv;
use crate::detect::morph::clean_mask;
use crate::detect::segment::FrameSegmenter;

/// One candidate object observation in a single frame.
///
/// Detections are transient: produced, handed to the associator and dropped
/// within one frame's processing.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Contour centroid in pixels.
    pub position: Point2<f32>,
    /// Minimal enclosing circle radius in pixels.
    pub radius: f32,
    /// Color label the source mask was segmented for.
    pub label: String,
    /// Source contour, kept only so the associator can recompute its area.
    pub contour: Vec<Point<i32>>,
}

impl Detection {
    /// Area of the source contour polygon.
    pub fn contour_area(&self) -> f32 {
        Moments::of_polygon(&self.contour).area() as f32
    }
}

/// Shape-filter configuration.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Minimum enclosing-circle radius, in pixels, a blob must exceed.
    pub min_radius: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self { min_radius: 20.0 }
    }
}

/// Finds near-circular blobs per color label.
///
/// Per frame: segment once into per-label masks, clean each mask, extract its
/// external contours and keep the ones that pass the shape filter. Contour
/// area is deliberately not checked here — the associator applies the
/// `min_area` gate as a separate, later-stage check.
pub struct BlobDetector {
    segmenter: FrameSegmenter,
    config: DetectorConfig,
}

impl BlobDetector {
    pub fn new(profile: Profile, config: DetectorConfig) -> Self {
        Self {
            segmenter: FrameSegmenter::new(profile),
            config,
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn profile(&self) -> &Profile {
        self.segmenter.profile()
    }

    /// Detect blobs in an RGB frame, in label order then contour order.
    pub fn detect(&self, frame: &RgbImage) -> Vec<Detection> {
        let hsv = to_hsv(frame);
        let mut detections = Vec::new();
        for (label, mask) in self.segmenter.segment_hsv(&hsv) {
            let cleaned = clean_mask(&mask);
            self.detect_in_mask(&label, &cleaned, &mut detections);
        }
        debug!(count = detections.len(), "frame detections");
        detections
    }

    /// Extract detections from one cleaned mask.
    pub fn detect_in_mask(&self, label: &str, mask: &GrayImage, out: &mut Vec<Detection>) {
        for contour in find_contours::<i32>(mask) {
            // Holes belong to some outer contour already under consideration.
            if contour.border_type != BorderType::Outer {
                continue;
            }
            let points = contour.points;

            // Circularity proxy: a coarse polygon approximation of anything
            // near-circular keeps more than 5 vertices.
            let perimeter = arc_length(&points, true);
            let approx = approximate_polygon_dp(&points, 0.04 * perimeter, true);
            if approx.len() <= 5 {
                continue;
            }

            let Some((_, radius)) = min_enclosing_circle(&points) else {
                continue;
            };
            // Zero-area contours are a per-candidate skip, not an error.
            let Some(position) = Moments::of_polygon(&points).centroid() else {
                continue;
            };
            if radius <= self.config.min_radius {
                continue;
            }

            out.push(Detection {
                position,
                radius,
                label: label.to_string(),
                contour: points,
            });
        }
    }
}
