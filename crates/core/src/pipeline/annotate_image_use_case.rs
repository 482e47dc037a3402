use std::path::Path;

use crate::capture::domain::frame_source::FrameSource;
use crate::capture::domain::image_writer::ImageWriter;
use crate::detection::domain::face_detector::FaceDetector;
use crate::estimation::domain::age_estimator::AgeEstimator;
use crate::overlay::domain::overlay_renderer::OverlayRenderer;
use crate::pipeline::frame_pipeline::annotate_frame;

/// Single-image annotation: read → detect → estimate → overlay → write.
pub struct AnnotateImageUseCase {
    source: Box<dyn FrameSource>,
    image_writer: Box<dyn ImageWriter>,
    detector: Box<dyn FaceDetector>,
    estimator: Box<dyn AgeEstimator>,
    renderer: Box<dyn OverlayRenderer>,
}

impl AnnotateImageUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        image_writer: Box<dyn ImageWriter>,
        detector: Box<dyn FaceDetector>,
        estimator: Box<dyn AgeEstimator>,
        renderer: Box<dyn OverlayRenderer>,
    ) -> Self {
        Self {
            source,
            image_writer,
            detector,
            estimator,
            renderer,
        }
    }

    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let _metadata = self.source.open(input_path)?;

        let mut frame = self.source.read().ok_or("No frames in image")??;
        self.source.close();

        let annotations =
            annotate_frame(&frame, self.detector.as_mut(), self.estimator.as_mut());
        log::info!(
            "{} face(s) annotated in {}",
            annotations.len(),
            input_path.display()
        );

        self.renderer.render(&mut frame, &annotations)?;
        self.image_writer.write(output_path, &frame, None)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::domain::annotation::Annotation;
    use crate::shared::face_rect::FaceRect;
    use crate::shared::frame::Frame;
    use crate::shared::video_metadata::SourceMetadata;
    use ndarray::Array4;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubImageSource {
        frame: Option<Frame>,
    }

    impl StubImageSource {
        fn new(frame: Frame) -> Self {
            Self { frame: Some(frame) }
        }
    }

    impl FrameSource for StubImageSource {
        fn open(&mut self, _path: &Path) -> Result<SourceMetadata, Box<dyn std::error::Error>> {
            let frame = self.frame.as_ref().ok_or("no frame")?;
            Ok(SourceMetadata {
                width: frame.width(),
                height: frame.height(),
                fps: 0.0,
                total_frames: 1,
                codec: String::new(),
                source_path: None,
            })
        }

        fn read(&mut self) -> Option<Result<Frame, Box<dyn std::error::Error>>> {
            self.frame.take().map(Ok)
        }

        fn close(&mut self) {
            self.frame = None;
        }
    }

    struct StubImageWriter {
        written: Arc<Mutex<Vec<(std::path::PathBuf, Frame)>>>,
    }

    impl StubImageWriter {
        fn new() -> Self {
            Self {
                written: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl ImageWriter for StubImageWriter {
        fn write(
            &self,
            path: &Path,
            frame: &Frame,
            _size: Option<(u32, u32)>,
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.written
                .lock()
                .unwrap()
                .push((path.to_path_buf(), frame.clone()));
            Ok(())
        }
    }

    struct StubDetector {
        faces: Vec<FaceRect>,
    }

    impl FaceDetector for StubDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<FaceRect>, Box<dyn std::error::Error>> {
            Ok(self.faces.clone())
        }
    }

    struct StubEstimator {
        age: f32,
    }

    impl AgeEstimator for StubEstimator {
        fn predict(&mut self, _input: &Array4<f32>) -> Result<f32, Box<dyn std::error::Error>> {
            Ok(self.age)
        }
    }

    struct RecordingRenderer {
        annotations: Arc<Mutex<Vec<Annotation>>>,
    }

    impl RecordingRenderer {
        fn new() -> Self {
            Self {
                annotations: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl OverlayRenderer for RecordingRenderer {
        fn render(
            &mut self,
            _frame: &mut Frame,
            annotations: &[Annotation],
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.annotations.lock().unwrap().extend_from_slice(annotations);
            Ok(())
        }
    }

    // --- Helpers ---

    fn make_frame(w: u32, h: u32) -> Frame {
        Frame::new(vec![128; (w * h * 3) as usize], w, h, 3, 0)
    }

    // --- Tests ---

    #[test]
    fn test_annotations_reach_renderer() {
        let renderer = RecordingRenderer::new();
        let annotations = renderer.annotations.clone();

        let mut uc = AnnotateImageUseCase::new(
            Box::new(StubImageSource::new(make_frame(640, 480))),
            Box::new(StubImageWriter::new()),
            Box::new(StubDetector {
                faces: vec![FaceRect::new(100.0, 100.0, 50.0, 50.0)],
            }),
            Box::new(StubEstimator { age: 27.4 }),
            Box::new(renderer),
        );

        uc.execute(Path::new("in.png"), Path::new("out.png"))
            .unwrap();

        let annotations = annotations.lock().unwrap();
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].label, "Age: 27.40");
        assert_eq!(
            annotations[0].display_box,
            FaceRect::new(100.0, 100.0, 50.0, 50.0)
        );
    }

    #[test]
    fn test_output_dimensions_preserved() {
        let img_writer = StubImageWriter::new();
        let written = img_writer.written.clone();

        let mut uc = AnnotateImageUseCase::new(
            Box::new(StubImageSource::new(make_frame(200, 150))),
            Box::new(img_writer),
            Box::new(StubDetector { faces: vec![] }),
            Box::new(StubEstimator { age: 30.0 }),
            Box::new(RecordingRenderer::new()),
        );

        uc.execute(Path::new("in.png"), Path::new("out.png"))
            .unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written[0].1.width(), 200);
        assert_eq!(written[0].1.height(), 150);
    }

    #[test]
    fn test_no_faces_still_writes_image() {
        let img_writer = StubImageWriter::new();
        let written = img_writer.written.clone();

        let mut uc = AnnotateImageUseCase::new(
            Box::new(StubImageSource::new(make_frame(100, 100))),
            Box::new(img_writer),
            Box::new(StubDetector { faces: vec![] }),
            Box::new(StubEstimator { age: 30.0 }),
            Box::new(RecordingRenderer::new()),
        );

        uc.execute(Path::new("in.png"), Path::new("out.png"))
            .unwrap();

        assert_eq!(written.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_output_path_forwarded_to_writer() {
        let img_writer = StubImageWriter::new();
        let written = img_writer.written.clone();

        let mut uc = AnnotateImageUseCase::new(
            Box::new(StubImageSource::new(make_frame(100, 100))),
            Box::new(img_writer),
            Box::new(StubDetector { faces: vec![] }),
            Box::new(StubEstimator { age: 30.0 }),
            Box::new(RecordingRenderer::new()),
        );

        uc.execute(Path::new("in.png"), Path::new("annotated/out.png"))
            .unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written[0].0, Path::new("annotated/out.png"));
    }
}
