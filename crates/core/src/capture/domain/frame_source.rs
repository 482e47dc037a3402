use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::SourceMetadata;

/// Reads frames from a capture device, video file, or image.
///
/// The pipeline holds exactly one open source per streaming session and
/// releases it on disable; a fresh source is acquired for every session.
/// `read` blocks until the next frame is available and returns `None` when
/// the source is exhausted.
pub trait FrameSource: Send {
    /// Opens the source and returns its properties.
    fn open(&mut self, path: &Path) -> Result<SourceMetadata, Box<dyn std::error::Error>>;

    /// Returns the next frame, or `None` at end of stream.
    fn read(&mut self) -> Option<Result<Frame, Box<dyn std::error::Error>>>;

    /// Releases the device or file handle.
    fn close(&mut self);
}
