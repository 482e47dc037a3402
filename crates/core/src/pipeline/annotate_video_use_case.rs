use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::capture::domain::frame_source::FrameSource;
use crate::capture::domain::video_writer::VideoWriter;
use crate::detection::domain::face_detector::FaceDetector;
use crate::estimation::domain::age_estimator::AgeEstimator;
use crate::overlay::domain::overlay_renderer::OverlayRenderer;
use crate::pipeline::frame_pipeline::annotate_frame;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::video_metadata::SourceMetadata;

/// Orchestrates the full video annotation run.
///
/// Takes an already-opened source (the caller needs the metadata to size
/// the writer anyway), walks it frame by frame through the shared
/// annotation pipeline, and encodes the result. Source and writer are
/// both closed no matter how the run ends.
pub struct AnnotateVideoUseCase {
    source: Box<dyn FrameSource>,
    writer: Box<dyn VideoWriter>,
    detector: Box<dyn FaceDetector>,
    estimator: Box<dyn AgeEstimator>,
    renderer: Box<dyn OverlayRenderer>,
    logger: Box<dyn PipelineLogger>,
    max_frames: Option<usize>,
    on_progress: Option<Box<dyn Fn(usize, usize) -> bool + Send>>,
    cancelled: Arc<AtomicBool>,
}

impl AnnotateVideoUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: Box<dyn FrameSource>,
        writer: Box<dyn VideoWriter>,
        detector: Box<dyn FaceDetector>,
        estimator: Box<dyn AgeEstimator>,
        renderer: Box<dyn OverlayRenderer>,
        logger: Box<dyn PipelineLogger>,
        max_frames: Option<usize>,
        on_progress: Option<Box<dyn Fn(usize, usize) -> bool + Send>>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            source,
            writer,
            detector,
            estimator,
            renderer,
            logger,
            max_frames,
            on_progress,
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    pub fn execute(
        &mut self,
        metadata: &SourceMetadata,
        output_path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.writer.open(output_path, metadata)?;

        let result = self.process(metadata);

        self.source.close();
        let close_result = self.writer.close();
        result?;
        close_result?;

        self.logger.summary();
        Ok(())
    }

    fn process(&mut self, metadata: &SourceMetadata) -> Result<(), Box<dyn std::error::Error>> {
        let total = match self.max_frames {
            Some(limit) => metadata.total_frames.min(limit),
            None => metadata.total_frames,
        };
        let mut processed = 0usize;

        loop {
            if self.cancelled.load(Ordering::Relaxed) {
                self.logger.info("Annotation cancelled");
                break;
            }
            if self.max_frames.is_some_and(|limit| processed >= limit) {
                break;
            }

            let start = Instant::now();
            let mut frame = match self.source.read() {
                Some(frame) => frame?,
                None => break,
            };
            self.logger
                .timing("decode", start.elapsed().as_secs_f64() * 1000.0);

            let start = Instant::now();
            let annotations =
                annotate_frame(&frame, self.detector.as_mut(), self.estimator.as_mut());
            self.logger
                .timing("annotate", start.elapsed().as_secs_f64() * 1000.0);

            let start = Instant::now();
            self.renderer.render(&mut frame, &annotations)?;
            self.logger
                .timing("render", start.elapsed().as_secs_f64() * 1000.0);

            let start = Instant::now();
            self.writer.write(&frame)?;
            self.logger
                .timing("encode", start.elapsed().as_secs_f64() * 1000.0);

            processed += 1;
            self.logger.progress(processed, total);

            if let Some(on_progress) = &self.on_progress {
                if !on_progress(processed, total) {
                    return Err("Cancelled".into());
                }
            }
        }

        Ok(())
    }
}
