use crate::shared::constants::{CONTEXT_HEIGHT_FRACTION, CONTEXT_WIDTH_FRACTION};
use crate::shared::face_rect::FaceRect;

/// Per-frame context margin used to enlarge detection boxes before cropping.
///
/// The margin gives the age model surrounding context (hair, jaw, ears) the
/// tight detection box lacks. It is a fraction of the *frame*, not of the
/// face box, so every face in a frame shares the same margin. Computed once
/// per frame and discarded with it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContextMargin {
    width: f64,
    height: f64,
}

impl ContextMargin {
    pub fn for_frame(frame_width: u32, frame_height: u32) -> Self {
        Self {
            width: frame_width as f64 * CONTEXT_WIDTH_FRACTION,
            height: frame_height as f64 * CONTEXT_HEIGHT_FRACTION,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Expands a detection box by the context margin, one direction at a time.
    ///
    /// Four sequential checks, each evaluated against the rectangle as
    /// already mutated by the previous ones — the order is load-bearing:
    /// the right-growth check sees the `x`/`width` the left-growth check
    /// produced, so a box with room on both sides grows by twice the margin
    /// while a box flush against an edge only grows away from it.
    ///
    /// A final clamp keeps the result a valid crop region even in the rare
    /// geometries where the sequential checks alone would overrun the
    /// right or bottom frame edge. The clamp never moves a box the checks
    /// kept in bounds.
    ///
    /// Not idempotent: re-expanding an expanded box grows it again.
    pub fn expand(&self, face: &FaceRect, frame_width: u32, frame_height: u32) -> FaceRect {
        let mut rect = *face;

        if rect.x - self.width >= 0.0 {
            rect.x -= self.width;
            rect.width += self.width;
        }
        if rect.y - self.height >= 0.0 {
            rect.y -= self.height;
            rect.height += self.height;
        }
        if rect.x + rect.width + self.width <= frame_width as f64 {
            rect.width += self.width;
        }
        if rect.y + rect.height + self.height <= frame_height as f64 {
            rect.height += self.height;
        }

        rect.clamp_to(frame_width, frame_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const FRAME_W: u32 = 640;
    const FRAME_H: u32 = 480;

    fn margin() -> ContextMargin {
        ContextMargin::for_frame(FRAME_W, FRAME_H)
    }

    fn expand(face: FaceRect) -> FaceRect {
        margin().expand(&face, FRAME_W, FRAME_H)
    }

    #[test]
    fn test_margin_fractions_of_frame() {
        let m = margin();
        assert_relative_eq!(m.width(), 32.0); // 640 * 0.05
        assert_relative_eq!(m.height(), 48.0); // 480 * 0.10
    }

    #[test]
    fn test_interior_face_grows_in_all_four_directions() {
        // {100,100,50,50} in 640x480, margins 32/48:
        // step 1: x=68, w=82   step 2: y=52, h=98
        // step 3: 68+82+32=182 <= 640 → w=114
        // step 4: 52+98+48=198 <= 480 → h=146
        let out = expand(FaceRect::new(100.0, 100.0, 50.0, 50.0));
        assert_relative_eq!(out.x, 68.0);
        assert_relative_eq!(out.y, 52.0);
        assert_relative_eq!(out.width, 114.0);
        assert_relative_eq!(out.height, 146.0);
    }

    #[test]
    fn test_corner_face_grows_only_right_and_down() {
        let out = expand(FaceRect::new(0.0, 0.0, 40.0, 40.0));
        assert_relative_eq!(out.x, 0.0);
        assert_relative_eq!(out.y, 0.0);
        assert_relative_eq!(out.width, 72.0); // 40 + 32
        assert_relative_eq!(out.height, 88.0); // 40 + 48
    }

    #[test]
    fn test_left_flush_face_never_goes_negative() {
        let out = expand(FaceRect::new(0.0, 100.0, 50.0, 50.0));
        assert_relative_eq!(out.x, 0.0);
        assert!(out.x >= 0.0 && out.y >= 0.0);
    }

    #[test]
    fn test_right_flush_face_keeps_width_on_right_check() {
        // x + width = frame width, and x < margin so the left check also
        // fails: the box cannot grow horizontally at all.
        let out = expand(FaceRect::new(610.0, 100.0, 30.0, 50.0));
        assert_relative_eq!(out.x, 610.0);
        assert_relative_eq!(out.width, 30.0);
    }

    #[test]
    fn test_right_flush_face_with_left_room_grows_left_only() {
        // x+width = 640: step 1 moves x to 558 and widens to 82; step 3 then
        // sees 558+82+32 = 672 > 640 and declines.
        let out = expand(FaceRect::new(590.0, 100.0, 50.0, 50.0));
        assert_relative_eq!(out.x, 558.0);
        assert_relative_eq!(out.width, 82.0);
    }

    #[test]
    fn test_full_frame_face_is_unchanged() {
        let out = expand(FaceRect::new(0.0, 0.0, 640.0, 480.0));
        assert_eq!(out, FaceRect::new(0.0, 0.0, 640.0, 480.0));
    }

    #[test]
    fn test_expansion_is_not_idempotent() {
        let once = expand(FaceRect::new(200.0, 200.0, 50.0, 50.0));
        let twice = expand(once);
        assert_ne!(once, twice);
        assert!(twice.area() > once.area());
    }

    #[test]
    fn test_result_always_fits_frame() {
        // Geometry where the order-dependent checks alone would overrun:
        // the final clamp must keep the crop region valid.
        for x in [0.0, 31.0, 32.0, 300.0, 558.0, 600.0] {
            for y in [0.0, 47.0, 48.0, 200.0, 380.0, 430.0] {
                let out = expand(FaceRect::new(x, y, 40.0, 40.0));
                assert!(
                    out.fits_within(FRAME_W, FRAME_H),
                    "expanded box {out:?} escapes frame for face at ({x},{y})"
                );
            }
        }
    }

    #[rstest]
    #[case::room_both_sides(FaceRect::new(300.0, 200.0, 40.0, 40.0), 104.0, 136.0)]
    #[case::top_left(FaceRect::new(10.0, 10.0, 40.0, 40.0), 72.0, 88.0)]
    fn test_expanded_dimensions(
        #[case] face: FaceRect,
        #[case] expected_w: f64,
        #[case] expected_h: f64,
    ) {
        let out = expand(face);
        assert_relative_eq!(out.width, expected_w);
        assert_relative_eq!(out.height, expected_h);
    }

    #[test]
    fn test_margin_shared_across_faces_of_one_frame() {
        let m = margin();
        let a = m.expand(&FaceRect::new(100.0, 100.0, 50.0, 50.0), FRAME_W, FRAME_H);
        let b = m.expand(&FaceRect::new(400.0, 150.0, 60.0, 60.0), FRAME_W, FRAME_H);
        // Both interior faces gain 2*margin on each axis
        assert_relative_eq!(a.width - 50.0, 64.0);
        assert_relative_eq!(b.width - 60.0, 64.0);
    }

    #[test]
    fn test_display_box_unaffected() {
        let face = FaceRect::new(100.0, 100.0, 50.0, 50.0);
        let _ = expand(face);
        assert_eq!(face, FaceRect::new(100.0, 100.0, 50.0, 50.0));
    }
}
