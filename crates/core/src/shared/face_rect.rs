/// An axis-aligned face rectangle in frame pixel coordinates.
///
/// Detectors emit rectangles that lie fully inside the frame; derived crop
/// regions (context-expanded rectangles) reuse the same type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FaceRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Whether the rectangle is a usable crop region for the given frame.
    pub fn fits_within(&self, frame_width: u32, frame_height: u32) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= frame_width as f64
            && self.bottom() <= frame_height as f64
    }

    /// Clamps the rectangle into `[0, frame_width] x [0, frame_height]`.
    ///
    /// A rectangle entirely outside the frame collapses to zero size.
    pub fn clamp_to(&self, frame_width: u32, frame_height: u32) -> FaceRect {
        let fw = frame_width as f64;
        let fh = frame_height as f64;
        let x = self.x.clamp(0.0, fw);
        let y = self.y.clamp(0.0, fh);
        let width = (self.right().min(fw) - x).max(0.0);
        let height = (self.bottom().min(fh) - y).max(0.0);
        FaceRect {
            x,
            y,
            width,
            height,
        }
    }
}
