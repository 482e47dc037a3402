use std::path::PathBuf;

/// Properties of an opened frame source.
///
/// Live capture devices report `total_frames = 0`; single images report
/// `total_frames = 1` with `fps = 0`.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

impl SourceMetadata {
    /// Whether the source has a known, finite frame count.
    pub fn is_finite(&self) -> bool {
        self.total_frames > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_metadata() {
        let meta = SourceMetadata {
            width: 1280,
            height: 720,
            fps: 30.0,
            total_frames: 300,
            codec: "h264".to_string(),
            source_path: Some(PathBuf::from("/tmp/clip.mp4")),
        };
        assert!(meta.is_finite());
        assert_eq!(meta.width, 1280);
    }

    #[test]
    fn test_live_device_metadata() {
        let meta = SourceMetadata {
            width: 640,
            height: 480,
            fps: 30.0,
            total_frames: 0,
            codec: "rawvideo".to_string(),
            source_path: Some(PathBuf::from("/dev/video0")),
        };
        assert!(!meta.is_finite());
    }

    #[test]
    fn test_image_metadata() {
        // Images are one-frame sources with fps = 0
        let meta = SourceMetadata {
            width: 800,
            height: 600,
            fps: 0.0,
            total_frames: 1,
            codec: "png".to_string(),
            source_path: None,
        };
        assert!(meta.is_finite());
    }
}
