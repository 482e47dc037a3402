use std::path::Path;

use crate::capture::domain::image_writer::ImageWriter;
use crate::shared::frame::Frame;

/// Writes a single frame to an image file using the `image` crate.
///
/// Supports optional resizing for thumbnails. RGBA frames are flattened to
/// RGB on the way out.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(
        &self,
        path: &Path,
        frame: &Frame,
        size: Option<(u32, u32)>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let rgb = match frame.channels() {
            3 => frame.data().to_vec(),
            _ => frame
                .data()
                .chunks_exact(frame.channels() as usize)
                .flat_map(|px| px[0..3].to_vec())
                .collect(),
        };

        let img = image::RgbImage::from_raw(frame.width(), frame.height(), rgb)
            .ok_or("Failed to create image from frame data")?;

        let img = if let Some((w, h)) = size {
            image::imageops::resize(&img, w, h, image::imageops::FilterType::Triangle)
        } else {
            img
        };

        img.save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(w: u32, h: u32, channels: u8) -> Frame {
        let mut data = Vec::new();
        for _ in 0..w * h {
            data.extend_from_slice(&[100, 150, 200, 255][..channels as usize]);
        }
        Frame::new(data, w, h, channels, 0)
    }

    #[test]
    fn test_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        ImageFileWriter::new()
            .write(&path, &solid_frame(4, 4, 3), None)
            .unwrap();

        let read_back = image::open(&path).unwrap().into_rgb8();
        assert_eq!(read_back.dimensions(), (4, 4));
        assert_eq!(read_back.get_pixel(0, 0).0, [100, 150, 200]);
    }

    #[test]
    fn test_resizes_when_requested() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thumb.png");

        ImageFileWriter::new()
            .write(&path, &solid_frame(16, 16, 3), Some((8, 8)))
            .unwrap();

        let read_back = image::open(&path).unwrap().into_rgb8();
        assert_eq!(read_back.dimensions(), (8, 8));
    }

    #[test]
    fn test_rgba_frame_flattened_to_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        ImageFileWriter::new()
            .write(&path, &solid_frame(2, 2, 4), None)
            .unwrap();

        let read_back = image::open(&path).unwrap().into_rgb8();
        assert_eq!(read_back.get_pixel(1, 1).0, [100, 150, 200]);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/out.png");

        ImageFileWriter::new()
            .write(&path, &solid_frame(2, 2, 3), None)
            .unwrap();
        assert!(path.exists());
    }
}
