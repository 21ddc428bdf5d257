//! Per-label binary mask extraction from a single HSV conversion.

use std::collections::BTreeMap;

use image::{GrayImage, RgbImage};

use crate::config::Profile;
use crate::detect::hsv::{HsvImage, to_hsv};

/// Segments frames into one binary mask per configured color label.
///
/// Input frames are RGB; this is the one channel-order convention in the
/// crate, fixed at this boundary. Callers holding BGR data must swap channels
/// before segmenting — a mismatched order produces useless masks, not an
/// error.
#[derive(Debug, Clone)]
pub struct FrameSegmenter {
    profile: Profile,
}

impl FrameSegmenter {
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Produce a mask per label. The frame is converted to HSV once.
    pub fn segment(&self, frame: &RgbImage) -> BTreeMap<String, GrayImage> {
        self.segment_hsv(&to_hsv(frame))
    }

    /// Produce a mask per label from an already-converted HSV frame.
    ///
    /// A mask pixel is 255 when H, S and V all fall inside the label's
    /// inclusive bounds, 0 otherwise.
    pub fn segment_hsv(&self, hsv: &HsvImage) -> BTreeMap<String, GrayImage> {
        self.profile
            .iter()
            .map(|(label, range)| {
                let mut mask = GrayImage::new(hsv.width(), hsv.height());
                for (out, px) in mask.pixels_mut().zip(hsv.pixels()) {
                    if range.contains(px[0], px[1], px[2]) {
                        out.0[0] = 255;
                    }
                }
                (label.to_string(), mask)
            })
            .collect()
    }
}
