mod contour;
mod detector;
mod hsv;
mod morph;
mod segment;

pub use contour::{Moments, min_enclosing_circle};
pub use detector::{BlobDetector, Detection, DetectorConfig};
pub use hsv::{HsvImage, rgb_to_hsv, to_hsv};
pub use morph::clean_mask;
pub use segment::FrameSegmenter;
