use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::SourceMetadata;

/// Abstracts video encoding so the pipeline can persist annotated frames
/// without depending on a specific codec library.
pub trait VideoWriter: Send {
    fn open(
        &mut self,
        path: &Path,
        metadata: &SourceMetadata,
    ) -> Result<(), Box<dyn std::error::Error>>;

    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}
