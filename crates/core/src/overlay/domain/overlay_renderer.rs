use crate::overlay::domain::annotation::Annotation;
use crate::shared::frame::Frame;

/// Renders one cycle's annotations on top of the live view.
///
/// Two interchangeable strategies exist in infrastructure: drawing into the
/// frame's pixel buffer, and maintaining a positioned marker list for an
/// external overlay surface. Which one runs is the deployment's choice,
/// not the pipeline's.
pub trait OverlayRenderer: Send {
    /// Replaces the previous cycle's annotations with this cycle's.
    fn render(
        &mut self,
        frame: &mut Frame,
        annotations: &[Annotation],
    ) -> Result<(), Box<dyn std::error::Error>>;
}
