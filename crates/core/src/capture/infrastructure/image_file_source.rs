use std::path::Path;

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::frame::Frame;
use crate::shared::video_metadata::SourceMetadata;

/// Adapts a single image file to the [`FrameSource`] interface.
///
/// The image becomes a one-frame source with `fps = 0`, letting the
/// pipeline process images and videos uniformly. Decoding goes through the
/// `image` crate; the frame is RGB regardless of the file's color type.
pub struct ImageFileSource {
    frame: Option<Frame>,
    metadata: Option<SourceMetadata>,
}

impl ImageFileSource {
    pub fn new() -> Self {
        Self {
            frame: None,
            metadata: None,
        }
    }
}

impl Default for ImageFileSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for ImageFileSource {
    fn open(&mut self, path: &Path) -> Result<SourceMetadata, Box<dyn std::error::Error>> {
        let image = image::open(path)?.into_rgb8();
        let (width, height) = image.dimensions();

        let codec = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let metadata = SourceMetadata {
            width,
            height,
            fps: 0.0,
            total_frames: 1,
            codec,
            source_path: Some(path.to_path_buf()),
        };

        self.frame = Some(Frame::new(image.into_raw(), width, height, 3, 0));
        self.metadata = Some(metadata.clone());
        Ok(metadata)
    }

    fn read(&mut self) -> Option<Result<Frame, Box<dyn std::error::Error>>> {
        self.frame.take().map(Ok)
    }

    fn close(&mut self) {
        self.frame = None;
        self.metadata = None;
    }
}
