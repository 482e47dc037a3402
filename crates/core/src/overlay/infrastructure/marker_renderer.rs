use crate::overlay::domain::annotation::Annotation;
use crate::overlay::domain::overlay_renderer::OverlayRenderer;
use crate::shared::frame::Frame;

/// A positioned overlay element for an external display surface.
///
/// Coordinates are frame pixels; the hosting view owns the mapping to its
/// own units. `label_y` places the text just above the box, mirroring the
/// live-view layout.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayMarker {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub label_y: f64,
}

/// Vertical offset of the label above the box top.
const LABEL_RAISE: f64 = 10.0;

/// The live-view rendering strategy: keeps a marker list the hosting
/// surface positions over the video, rebuilt from scratch every cycle so
/// stale markers from the previous frame never linger.
#[derive(Default)]
pub struct MarkerRenderer {
    markers: Vec<OverlayMarker>,
}

impl MarkerRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The markers produced by the most recent cycle.
    pub fn markers(&self) -> &[OverlayMarker] {
        &self.markers
    }

    /// Clears markers, e.g. when the stream is disabled.
    pub fn clear(&mut self) {
        self.markers.clear();
    }
}

impl OverlayRenderer for MarkerRenderer {
    fn render(
        &mut self,
        _frame: &mut Frame,
        annotations: &[Annotation],
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.markers = annotations
            .iter()
            .map(|a| OverlayMarker {
                x: a.display_box.x,
                y: a.display_box.y,
                width: a.display_box.width,
                height: a.display_box.height,
                label: a.label.clone(),
                label_y: a.display_box.y - LABEL_RAISE,
            })
            .collect();
        Ok(())
    }
}
