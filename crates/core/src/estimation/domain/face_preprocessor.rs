use ndarray::Array4;

use crate::shared::constants::MODEL_INPUT_SIZE;
use crate::shared::error::AnnotateError;
use crate::shared::face_rect::FaceRect;
use crate::shared::frame::Frame;

/// Materializes the model input for one face crop region.
///
/// Channel conversion to RGB (alpha dropped) → sub-region crop → resize to
/// the model's square input resolution → scale into `[0, 1]` → batch-of-one
/// NHWC tensor.
///
/// The crop region is validated defensively: a degenerate or out-of-bounds
/// rectangle fails with [`AnnotateError::InvalidRegion`], which the
/// pipeline catches per face so one bad detection never drops the rest of
/// the frame's faces.
pub fn crop_and_normalize(frame: &Frame, rect: &FaceRect) -> Result<Array4<f32>, AnnotateError> {
    let fw = frame.width();
    let fh = frame.height();

    if !rect.fits_within(fw, fh) {
        return Err(AnnotateError::InvalidRegion {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            frame_width: fw,
            frame_height: fh,
        });
    }

    let x0 = rect.x.floor() as u32;
    let y0 = rect.y.floor() as u32;
    let x1 = (rect.right().ceil() as u32).min(fw);
    let y1 = (rect.bottom().ceil() as u32).min(fh);
    let crop_w = x1 - x0;
    let crop_h = y1 - y0;

    let crop = crop_rgb(frame, x0, y0, crop_w, crop_h);
    let image = image::RgbImage::from_raw(crop_w, crop_h, crop)
        .expect("crop buffer length matches crop dimensions");

    let resized = image::imageops::resize(
        &image,
        MODEL_INPUT_SIZE,
        MODEL_INPUT_SIZE,
        image::imageops::FilterType::Triangle,
    );

    let size = MODEL_INPUT_SIZE as usize;
    let mut tensor = Array4::<f32>::zeros((1, size, size, 3));
    for (x, y, pixel) in resized.enumerate_pixels() {
        for c in 0..3 {
            tensor[[0, y as usize, x as usize, c]] = pixel.0[c] as f32 / 255.0;
        }
    }

    Ok(tensor)
}

/// Extracts an RGB sub-region, dropping the alpha channel of RGBA frames.
fn crop_rgb(frame: &Frame, x0: u32, y0: u32, width: u32, height: u32) -> Vec<u8> {
    let src = frame.as_ndarray();
    let mut data = Vec::with_capacity((width * height * 3) as usize);

    for row in y0..y0 + height {
        for col in x0..x0 + width {
            for c in 0..3 {
                data.push(src[[row as usize, col as usize, c]]);
            }
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn solid_frame(w: u32, h: u32, rgb: [u8; 3]) -> Frame {
        let mut data = Vec::with_capacity((w * h * 3) as usize);
        for _ in 0..w * h {
            data.extend_from_slice(&rgb);
        }
        Frame::new(data, w, h, 3, 0)
    }

    #[test]
    fn test_output_shape_is_batch_of_one_nhwc() {
        let frame = solid_frame(64, 64, [10, 20, 30]);
        let tensor = crop_and_normalize(&frame, &FaceRect::new(0.0, 0.0, 64.0, 64.0)).unwrap();
        assert_eq!(tensor.shape(), &[1, 128, 128, 3]);
    }

    #[test]
    fn test_values_scaled_to_unit_range() {
        let frame = solid_frame(32, 32, [255, 0, 51]);
        let tensor = crop_and_normalize(&frame, &FaceRect::new(0.0, 0.0, 32.0, 32.0)).unwrap();
        assert_relative_eq!(tensor[[0, 64, 64, 0]], 1.0);
        assert_relative_eq!(tensor[[0, 64, 64, 1]], 0.0);
        assert_relative_eq!(tensor[[0, 64, 64, 2]], 0.2);
    }

    #[test]
    fn test_alpha_channel_dropped() {
        let mut data = Vec::new();
        for _ in 0..16 * 16 {
            data.extend_from_slice(&[100, 150, 200, 7]);
        }
        let frame = Frame::new(data, 16, 16, 4, 0);
        let tensor = crop_and_normalize(&frame, &FaceRect::new(0.0, 0.0, 16.0, 16.0)).unwrap();
        assert_eq!(tensor.shape(), &[1, 128, 128, 3]);
        assert_relative_eq!(tensor[[0, 0, 0, 0]], 100.0 / 255.0);
        assert_relative_eq!(tensor[[0, 0, 0, 2]], 200.0 / 255.0);
    }

    #[test]
    fn test_crop_takes_sub_region() {
        // Left half black, right half white; crop the right half.
        let w = 40u32;
        let h = 20u32;
        let mut data = Vec::with_capacity((w * h * 3) as usize);
        for _row in 0..h {
            for col in 0..w {
                let v = if col < w / 2 { 0u8 } else { 255u8 };
                data.extend_from_slice(&[v, v, v]);
            }
        }
        let frame = Frame::new(data, w, h, 3, 0);
        let tensor = crop_and_normalize(&frame, &FaceRect::new(20.0, 0.0, 20.0, 20.0)).unwrap();
        assert_relative_eq!(tensor[[0, 64, 64, 0]], 1.0);
        assert_relative_eq!(tensor[[0, 0, 0, 1]], 1.0);
    }

    #[rstest]
    #[case::zero_width(FaceRect::new(10.0, 10.0, 0.0, 20.0))]
    #[case::negative_height(FaceRect::new(10.0, 10.0, 20.0, -5.0))]
    #[case::negative_origin(FaceRect::new(-1.0, 10.0, 20.0, 20.0))]
    #[case::right_overflow(FaceRect::new(50.0, 10.0, 20.0, 20.0))]
    #[case::bottom_overflow(FaceRect::new(10.0, 50.0, 20.0, 20.0))]
    fn test_invalid_regions_rejected(#[case] rect: FaceRect) {
        let frame = solid_frame(64, 64, [1, 2, 3]);
        let result = crop_and_normalize(&frame, &rect);
        assert!(matches!(result, Err(AnnotateError::InvalidRegion { .. })));
    }

    #[test]
    fn test_fractional_rect_still_crops() {
        let frame = solid_frame(64, 64, [90, 90, 90]);
        let tensor = crop_and_normalize(&frame, &FaceRect::new(10.4, 10.6, 20.2, 20.1)).unwrap();
        assert_eq!(tensor.shape(), &[1, 128, 128, 3]);
        assert_relative_eq!(tensor[[0, 10, 10, 0]], 90.0 / 255.0);
    }
}
