use ndarray::ArrayView3;

/// A single captured frame: contiguous pixels in row-major order.
///
/// `channels` is 3 (RGB) or 4 (RGBA); capture backends convert at the I/O
/// boundary so the pipeline never touches codec-specific layouts. Frames
/// are transient, owned by one cycle and dropped when it ends.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(
            (
                self.height as usize,
                self.width as usize,
                self.channels as usize,
            ),
            &self.data,
        )
        .expect("Frame data length must match dimensions")
    }

    /// Luma conversion (ITU-R BT.601) for detection backends that take a
    /// single-channel image. Alpha, when present, is ignored.
    pub fn to_grayscale(&self) -> Vec<u8> {
        let step = self.channels as usize;
        let mut gray = Vec::with_capacity((self.width * self.height) as usize);
        for px in self.data.chunks_exact(step) {
            let y = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
            gray.push(y.round().min(255.0) as u8);
        }
        gray
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 7);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 7);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 3, 0);
    }

    #[test]
    fn test_as_ndarray_shape_and_access() {
        let mut data = vec![0u8; 24]; // 2x4x3
        data[12] = 255; // row=1, col=0, R
        let frame = Frame::new(data, 4, 2, 3, 0);
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[2, 4, 3]);
        assert_eq!(arr[[1, 0, 0]], 255);
        assert_eq!(arr[[1, 0, 1]], 0);
    }

    #[test]
    fn test_grayscale_white_pixel() {
        let frame = Frame::new(vec![255, 255, 255], 1, 1, 3, 0);
        assert_eq!(frame.to_grayscale(), vec![255]);
    }

    #[test]
    fn test_grayscale_weights() {
        // Pure red: 0.299 * 255 ≈ 76
        let frame = Frame::new(vec![255, 0, 0], 1, 1, 3, 0);
        assert_eq!(frame.to_grayscale(), vec![76]);
    }

    #[test]
    fn test_grayscale_ignores_alpha() {
        let rgb = Frame::new(vec![10, 200, 30], 1, 1, 3, 0);
        let rgba = Frame::new(vec![10, 200, 30, 0], 1, 1, 4, 0);
        assert_eq!(rgb.to_grayscale(), rgba.to_grayscale());
    }

    #[test]
    fn test_grayscale_length() {
        let frame = Frame::new(vec![50u8; 4 * 3 * 4], 4, 3, 4, 0);
        assert_eq!(frame.to_grayscale().len(), 12);
    }

    #[test]
    fn test_data_mut_allows_modification() {
        let mut frame = Frame::new(vec![0u8; 6], 2, 1, 3, 0);
        frame.data_mut()[0] = 9;
        assert_eq!(frame.data()[0], 9);
    }
}
