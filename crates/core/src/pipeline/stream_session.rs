use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::capture::domain::frame_source::FrameSource;
use crate::detection::domain::face_detector::FaceDetector;
use crate::estimation::domain::age_estimator::AgeEstimator;
use crate::overlay::domain::overlay_renderer::OverlayRenderer;
use crate::pipeline::frame_pipeline::annotate_frame;
use crate::pipeline::scheduler::CycleScheduler;
use crate::shared::error::AnnotateError;
use crate::shared::frame::Frame;
use crate::shared::video_metadata::SourceMetadata;

/// Whether the age model is available for inference.
///
/// The model may still be downloading or loading when the host asks to
/// start streaming; the session refuses to start until it is `Ready`.
pub enum ModelState {
    NotReady,
    Ready(Box<dyn AgeEstimator>),
}

impl ModelState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ModelState::Ready(_))
    }
}

/// Result of one annotation cycle.
#[derive(Debug)]
pub enum CycleOutcome {
    /// The frame was annotated and rendered.
    Annotated(Frame),
    /// The source is exhausted (or the session is idle); streaming stopped.
    EndOfStream,
}

/// Live annotation loop over a frame source.
///
/// Two states: idle (no source held) and streaming (source open). `enable`
/// moves idle → streaming, `disable` the reverse; `cycle` runs one
/// read → annotate → render pass and falls back to idle when the source
/// ends or fails. The source is released exactly once no matter which
/// path stops the stream.
pub struct StreamSession {
    detector: Box<dyn FaceDetector>,
    model: ModelState,
    renderer: Box<dyn OverlayRenderer>,
    scheduler: Box<dyn CycleScheduler>,
    source: Option<Box<dyn FrameSource>>,
    metadata: Option<SourceMetadata>,
}

impl StreamSession {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        model: ModelState,
        renderer: Box<dyn OverlayRenderer>,
        scheduler: Box<dyn CycleScheduler>,
    ) -> Self {
        Self {
            detector,
            model,
            renderer,
            scheduler,
            source: None,
            metadata: None,
        }
    }

    /// Installs a loaded age model, making the session startable.
    pub fn set_model(&mut self, estimator: Box<dyn AgeEstimator>) {
        self.model = ModelState::Ready(estimator);
    }

    pub fn is_streaming(&self) -> bool {
        self.source.is_some()
    }

    pub fn metadata(&self) -> Option<&SourceMetadata> {
        self.metadata.as_ref()
    }

    /// Starts streaming from `path` via the given source.
    ///
    /// Returns `Ok(false)` without opening anything when the model is not
    /// ready yet, so a host can simply retry once loading completes. A
    /// source that fails to open is a device error.
    pub fn enable(
        &mut self,
        mut source: Box<dyn FrameSource>,
        path: &Path,
    ) -> Result<bool, AnnotateError> {
        if !self.model.is_ready() {
            log::info!("age model not loaded yet; stream start deferred");
            return Ok(false);
        }
        if self.source.is_some() {
            log::debug!("stream already running; enable ignored");
            return Ok(true);
        }

        let metadata = source
            .open(path)
            .map_err(|e| AnnotateError::Device(e.to_string()))?;
        log::info!(
            "streaming {}x{} from {}",
            metadata.width,
            metadata.height,
            path.display()
        );
        self.metadata = Some(metadata);
        self.source = Some(source);
        Ok(true)
    }

    /// Stops streaming and releases the source. Safe to call when idle.
    pub fn disable(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.close();
            log::info!("stream stopped");
        }
        self.metadata = None;
    }

    /// Runs one annotation cycle.
    ///
    /// An exhausted source ends the stream cleanly; a read failure ends it
    /// with a `Device` error. Either way the session is idle afterwards and
    /// can be enabled again.
    pub fn cycle(&mut self) -> Result<CycleOutcome, AnnotateError> {
        let Some(source) = self.source.as_mut() else {
            return Ok(CycleOutcome::EndOfStream);
        };

        let mut frame = match source.read() {
            Some(Ok(frame)) => frame,
            Some(Err(e)) => {
                let err = AnnotateError::Device(e.to_string());
                self.disable();
                return Err(err);
            }
            None => {
                self.disable();
                return Ok(CycleOutcome::EndOfStream);
            }
        };

        // Invariant: enable() never opens a source without a loaded model,
        // so a streaming session always holds one.
        let ModelState::Ready(estimator) = &mut self.model else {
            unreachable!("streaming session without a loaded model");
        };
        let annotations = annotate_frame(&frame, self.detector.as_mut(), estimator.as_mut());

        if let Err(e) = self.renderer.render(&mut frame, &annotations) {
            log::warn!("overlay render failed on frame {}: {e}", frame.index());
        }

        Ok(CycleOutcome::Annotated(frame))
    }

    /// Streams until the source ends, a device error occurs, or `cancelled`
    /// is set. Each annotated frame is handed to `on_frame`; returning
    /// `false` from the callback stops the stream.
    pub fn run(
        &mut self,
        cancelled: &AtomicBool,
        on_frame: &mut dyn FnMut(&Frame) -> bool,
    ) -> Result<(), AnnotateError> {
        while self.source.is_some() {
            if cancelled.load(Ordering::Relaxed) {
                self.disable();
                break;
            }
            match self.cycle()? {
                CycleOutcome::Annotated(frame) => {
                    if !on_frame(&frame) {
                        self.disable();
                        break;
                    }
                }
                CycleOutcome::EndOfStream => break,
            }
            self.scheduler.wait();
        }
        Ok(())
    }
}
