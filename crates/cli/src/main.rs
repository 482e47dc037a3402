use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use clap::Parser;

use agelens_core::capture::domain::frame_source::FrameSource;
use agelens_core::capture::domain::image_writer::ImageWriter;
use agelens_core::capture::domain::video_writer::VideoWriter;
use agelens_core::capture::infrastructure::ffmpeg_capture::FfmpegCapture;
use agelens_core::capture::infrastructure::ffmpeg_video_writer::FfmpegVideoWriter;
use agelens_core::capture::infrastructure::image_file_source::ImageFileSource;
use agelens_core::capture::infrastructure::image_file_writer::ImageFileWriter;
use agelens_core::detection::domain::face_detector::FaceDetector;
use agelens_core::detection::infrastructure::rustface_detector::RustfaceDetector;
use agelens_core::estimation::domain::age_estimator::AgeEstimator;
use agelens_core::estimation::infrastructure::onnx_age_estimator::OnnxAgeEstimator;
use agelens_core::overlay::domain::annotation::Annotation;
use agelens_core::overlay::domain::overlay_renderer::OverlayRenderer;
use agelens_core::overlay::infrastructure::box_renderer::BoxRenderer;
use agelens_core::overlay::infrastructure::marker_renderer::MarkerRenderer;
use agelens_core::pipeline::annotate_image_use_case::AnnotateImageUseCase;
use agelens_core::pipeline::annotate_video_use_case::AnnotateVideoUseCase;
use agelens_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use agelens_core::pipeline::scheduler::{CycleScheduler, FixedIntervalScheduler, FreeRunScheduler};
use agelens_core::pipeline::stream_session::{ModelState, StreamSession};
use agelens_core::shared::constants::{
    AGE_MODEL_NAME, AGE_MODEL_URL, FACE_MODEL_NAME, FACE_MODEL_URL, IMAGE_EXTENSIONS,
};
use agelens_core::shared::frame::Frame;
use agelens_core::shared::model_resolver;

/// Face detection and age annotation for videos and images.
#[derive(Parser)]
#[command(name = "agelens")]
struct Cli {
    /// Input video or image file.
    input: PathBuf,

    /// Output file (required unless --markers is used).
    output: Option<PathBuf>,

    /// Annotation cycle interval in milliseconds (0 = as fast as possible).
    #[arg(long, default_value = "0")]
    interval_ms: u64,

    /// Stop after this many frames.
    #[arg(long)]
    max_frames: Option<usize>,

    /// Print positioned overlay markers instead of drawing into frames.
    #[arg(long)]
    markers: bool,

    /// Directory holding pre-downloaded models.
    #[arg(long)]
    model_dir: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let detector = build_detector(cli.model_dir.as_deref())?;
    let estimator = build_estimator(cli.model_dir.as_deref())?;

    if cli.markers {
        run_markers(&cli, detector, estimator)?;
    } else if is_image(&cli.input) {
        run_image(&cli.input, cli.output.as_ref().unwrap(), detector, estimator)?;
    } else {
        run_video(&cli, cli.output.as_ref().unwrap(), detector, estimator)?;
    }

    Ok(())
}

fn run_image(
    input: &Path,
    output: &Path,
    detector: Box<dyn FaceDetector>,
    estimator: Box<dyn AgeEstimator>,
) -> Result<(), Box<dyn std::error::Error>> {
    let source: Box<dyn FrameSource> = Box::new(ImageFileSource::new());
    let image_writer: Box<dyn ImageWriter> = Box::new(ImageFileWriter::new());
    let renderer: Box<dyn OverlayRenderer> = Box::new(BoxRenderer::new(OVERLAY_COLOR));

    let mut use_case = AnnotateImageUseCase::new(source, image_writer, detector, estimator, renderer);
    use_case.execute(input, output)?;
    log::info!("Output written to {}", output.display());
    Ok(())
}

fn run_video(
    cli: &Cli,
    output: &Path,
    detector: Box<dyn FaceDetector>,
    estimator: Box<dyn AgeEstimator>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut source: Box<dyn FrameSource> = Box::new(FfmpegCapture::new());
    let metadata = source.open(&cli.input)?;
    let writer: Box<dyn VideoWriter> = Box::new(FfmpegVideoWriter::new());
    let renderer: Box<dyn OverlayRenderer> = Box::new(BoxRenderer::new(OVERLAY_COLOR));

    let progress: Box<dyn Fn(usize, usize) -> bool + Send> = Box::new(|current, total| {
        eprint!("\rAnnotating frame {current}/{total}");
        true
    });

    let mut use_case = AnnotateVideoUseCase::new(
        source,
        writer,
        detector,
        estimator,
        renderer,
        Box::new(StdoutPipelineLogger::default()),
        cli.max_frames,
        Some(progress),
        None,
    );
    use_case.execute(&metadata, output)?;
    eprintln!();
    log::info!("Output written to {}", output.display());
    Ok(())
}

/// Streams the input through the live session, printing each cycle's
/// markers to stdout instead of rasterizing them.
fn run_markers(
    cli: &Cli,
    detector: Box<dyn FaceDetector>,
    estimator: Box<dyn AgeEstimator>,
) -> Result<(), Box<dyn std::error::Error>> {
    let scheduler: Box<dyn CycleScheduler> = if cli.interval_ms > 0 {
        Box::new(FixedIntervalScheduler::new(Duration::from_millis(
            cli.interval_ms,
        )))
    } else {
        Box::new(FreeRunScheduler)
    };

    let mut session = StreamSession::new(
        detector,
        ModelState::Ready(estimator),
        Box::new(MarkerPrinter::default()),
        scheduler,
    );

    let source: Box<dyn FrameSource> = if is_image(&cli.input) {
        Box::new(ImageFileSource::new())
    } else {
        Box::new(FfmpegCapture::new())
    };
    session.enable(source, &cli.input)?;

    let cancelled = AtomicBool::new(false);
    let max_frames = cli.max_frames;
    let mut seen = 0usize;
    session.run(&cancelled, &mut |_frame: &Frame| {
        seen += 1;
        max_frames.map_or(true, |limit| seen < limit)
    })?;

    Ok(())
}

const OVERLAY_COLOR: [u8; 3] = [0, 255, 0];

/// Marker renderer that echoes each cycle's marker list to stdout.
#[derive(Default)]
struct MarkerPrinter {
    inner: MarkerRenderer,
}

impl OverlayRenderer for MarkerPrinter {
    fn render(
        &mut self,
        frame: &mut Frame,
        annotations: &[Annotation],
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.inner.render(frame, annotations)?;
        for marker in self.inner.markers() {
            println!(
                "frame {}: {:.0},{:.0} {:.0}x{:.0} {}",
                frame.index(),
                marker.x,
                marker.y,
                marker.width,
                marker.height,
                marker.label
            );
        }
        Ok(())
    }
}

fn build_detector(
    model_dir: Option<&Path>,
) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    let path = resolve_model(FACE_MODEL_NAME, FACE_MODEL_URL, model_dir, "face detection")?;
    Ok(Box::new(RustfaceDetector::new(&path)?))
}

fn build_estimator(
    model_dir: Option<&Path>,
) -> Result<Box<dyn AgeEstimator>, Box<dyn std::error::Error>> {
    let path = resolve_model(AGE_MODEL_NAME, AGE_MODEL_URL, model_dir, "age estimation")?;
    Ok(Box::new(OnnxAgeEstimator::new(&path)?))
}

/// Resolves a model file, honoring `--model-dir` as the authoritative
/// location: an explicitly requested directory is consulted (and filled on
/// a miss) instead of the user cache, so a stale cached copy can never
/// shadow the model the user pointed at.
fn resolve_model(
    name: &str,
    url: &str,
    model_dir: Option<&Path>,
    what: &'static str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {name}");
    let progress: model_resolver::ProgressFn = Box::new(move |d, t| download_progress(what, d, t));
    let path = match model_dir {
        Some(dir) => model_resolver::resolve_in(dir, name, url, None, Some(progress))?,
        None => model_resolver::resolve(name, url, None, Some(progress))?,
    };
    eprintln!();
    Ok(path)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !cli.markers && cli.output.is_none() {
        return Err("Output file is required unless --markers is used".into());
    }
    if let Some(dir) = &cli.model_dir {
        if !dir.is_dir() {
            return Err(format!("Model directory not found: {}", dir.display()).into());
        }
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn download_progress(what: &str, downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading {what} model... {pct}%");
    } else {
        eprint!("\rDownloading {what} model... {downloaded} bytes");
    }
}
