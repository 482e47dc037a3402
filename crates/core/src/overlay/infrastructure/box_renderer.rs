use crate::overlay::domain::annotation::Annotation;
use crate::overlay::domain::overlay_renderer::OverlayRenderer;
use crate::shared::frame::Frame;

/// Rectangle outline thickness in pixels.
const OUTLINE_THICKNESS: u32 = 2;

/// Glyph cell geometry of the embedded 5x7 font.
const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
const GLYPH_SCALE: u32 = 2;
const GLYPH_SPACING: u32 = 1;

/// Vertical gap between the label baseline and the box's top edge.
const LABEL_OFFSET: u32 = GLYPH_HEIGHT * GLYPH_SCALE + 4;

/// Draws annotations directly into the frame's pixel buffer.
///
/// The canvas-rendering strategy: a colored rectangle outline around each
/// display box and the label text above it, rasterized from an embedded
/// 5x7 bitmap font covering the label charset (`Age: `, digits, `.`, `-`).
pub struct BoxRenderer {
    color: [u8; 3],
}

impl BoxRenderer {
    pub fn new(color: [u8; 3]) -> Self {
        Self { color }
    }
}

impl Default for BoxRenderer {
    fn default() -> Self {
        Self::new([0, 220, 60])
    }
}

impl OverlayRenderer for BoxRenderer {
    fn render(
        &mut self,
        frame: &mut Frame,
        annotations: &[Annotation],
    ) -> Result<(), Box<dyn std::error::Error>> {
        for annotation in annotations {
            let b = &annotation.display_box;
            let x = b.x.round().max(0.0) as u32;
            let y = b.y.round().max(0.0) as u32;
            let w = b.width.round().max(0.0) as u32;
            let h = b.height.round().max(0.0) as u32;

            draw_outline(frame, x, y, w, h, self.color);

            // Label sits above the box when there is room, inside otherwise
            let label_y = y.saturating_sub(LABEL_OFFSET);
            draw_text(frame, &annotation.label, x, label_y, self.color);
        }
        Ok(())
    }
}

fn draw_outline(frame: &mut Frame, x: u32, y: u32, w: u32, h: u32, color: [u8; 3]) {
    for t in 0..OUTLINE_THICKNESS {
        for col in x..x.saturating_add(w) {
            put_pixel(frame, col, y.saturating_add(t), color);
            put_pixel(frame, col, (y + h).saturating_sub(t + 1), color);
        }
        for row in y..y.saturating_add(h) {
            put_pixel(frame, x.saturating_add(t), row, color);
            put_pixel(frame, (x + w).saturating_sub(t + 1), row, color);
        }
    }
}

fn draw_text(frame: &mut Frame, text: &str, x: u32, y: u32, color: [u8; 3]) {
    let advance = (GLYPH_WIDTH + GLYPH_SPACING) * GLYPH_SCALE;
    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else {
            continue;
        };
        let origin_x = x + i as u32 * advance;
        for (gy, row_bits) in rows.iter().enumerate() {
            for gx in 0..GLYPH_WIDTH {
                if row_bits & (0b10000 >> gx) == 0 {
                    continue;
                }
                for sy in 0..GLYPH_SCALE {
                    for sx in 0..GLYPH_SCALE {
                        put_pixel(
                            frame,
                            origin_x + gx * GLYPH_SCALE + sx,
                            y + gy as u32 * GLYPH_SCALE + sy,
                            color,
                        );
                    }
                }
            }
        }
    }
}

fn put_pixel(frame: &mut Frame, x: u32, y: u32, color: [u8; 3]) {
    if x >= frame.width() || y >= frame.height() {
        return;
    }
    let channels = frame.channels() as usize;
    let offset = (y as usize * frame.width() as usize + x as usize) * channels;
    let data = frame.data_mut();
    data[offset..offset + 3].copy_from_slice(&color);
}

/// 5x7 bitmaps for the label charset; rows are 5-bit masks, MSB leftmost.
fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'g' => [0b00000, 0b01111, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110],
        'e' => [0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b10001, 0b01110],
        ':' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        ' ' => [0b00000; 7],
        _ => return None,
    };
    Some(rows)
}
