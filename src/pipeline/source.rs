//! Trait for frame capture collaborators.

use image::RgbImage;

/// A source of RGB frames at the pipeline's working resolution.
///
/// Implement this to connect a camera, a video file or a synthetic feed to
/// the tracking pipeline. Blocking on frame acquisition is the source's
/// business; the pipeline has no internal timeout, and cancelling it is
/// simply ceasing to call it.
///
/// # Example
///
/// ```ignore
/// use huetrack_rs::{FrameSource};
/// use image::RgbImage;
///
/// struct Camera { /* your capture handle here */ }
///
/// impl FrameSource for Camera {
///     type Error = std::io::Error;
///
///     fn next_frame(&mut self) -> Result<Option<RgbImage>, Self::Error> {
///         // Read and convert a frame; Ok(None) once the stream ends.
///         Ok(None)
///     }
/// }
/// ```
pub trait FrameSource {
    /// Error type for acquisition failures.
    type Error;

    /// Produce the next frame, or `Ok(None)` at end of stream.
    fn next_frame(&mut self) -> Result<Option<RgbImage>, Self::Error>;
}
