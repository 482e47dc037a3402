use std::path::Path;

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::frame::Frame;
use crate::shared::video_metadata::SourceMetadata;

/// Decodes frames via ffmpeg-next (libavformat + libavcodec).
///
/// Works for video files and, where libavformat supports the device path,
/// live capture devices. Every decoded frame is converted to RGB24 before
/// it crosses the [`FrameSource`] boundary.
pub struct FfmpegCapture {
    input_ctx: Option<ffmpeg_next::format::context::Input>,
    decoder: Option<ffmpeg_next::decoder::Video>,
    scaler: Option<ffmpeg_next::software::scaling::Context>,
    video_stream_index: usize,
    width: u32,
    height: u32,
    frame_index: usize,
    flushing: bool,
    done: bool,
}

// Safety: FfmpegCapture is only used from a single thread at a time.
// The raw pointers inside ffmpeg types are not shared across threads.
unsafe impl Send for FfmpegCapture {}

impl FfmpegCapture {
    pub fn new() -> Self {
        Self {
            input_ctx: None,
            decoder: None,
            scaler: None,
            video_stream_index: 0,
            width: 0,
            height: 0,
            frame_index: 0,
            flushing: false,
            done: false,
        }
    }

    fn receive_decoded(&mut self) -> Option<Result<Frame, Box<dyn std::error::Error>>> {
        let decoder = self.decoder.as_mut()?;
        let scaler = self.scaler.as_mut()?;

        let mut decoded = ffmpeg_next::util::frame::video::Video::empty();
        if decoder.receive_frame(&mut decoded).is_err() {
            return None;
        }

        let mut rgb_frame = ffmpeg_next::util::frame::video::Video::empty();
        if let Err(e) = scaler.run(&decoded, &mut rgb_frame) {
            return Some(Err(Box::new(e)));
        }

        let pixels = extract_rgb_pixels(&rgb_frame, self.width, self.height);
        let frame = Frame::new(pixels, self.width, self.height, 3, self.frame_index);
        self.frame_index += 1;
        Some(Ok(frame))
    }
}

impl Default for FfmpegCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for FfmpegCapture {
    fn open(&mut self, path: &Path) -> Result<SourceMetadata, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let ictx = ffmpeg_next::format::input(path)?;

        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or("No video stream found")?;

        let video_stream_index = stream.index();
        let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
        let decoder = codec_ctx.decoder().video()?;

        let rate = stream.rate();
        let fps = if rate.denominator() != 0 {
            rate.numerator() as f64 / rate.denominator() as f64
        } else {
            0.0
        };

        let width = decoder.width();
        let height = decoder.height();

        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGB24,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )?;

        let metadata = SourceMetadata {
            width,
            height,
            fps,
            total_frames: stream.frames().max(0) as usize,
            codec: decoder
                .codec()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
            source_path: Some(path.to_path_buf()),
        };

        self.video_stream_index = video_stream_index;
        self.width = width;
        self.height = height;
        self.frame_index = 0;
        self.flushing = false;
        self.done = false;
        self.decoder = Some(decoder);
        self.scaler = Some(scaler);
        self.input_ctx = Some(ictx);

        Ok(metadata)
    }

    fn read(&mut self) -> Option<Result<Frame, Box<dyn std::error::Error>>> {
        if self.done || self.input_ctx.is_none() {
            return None;
        }

        if let Some(result) = self.receive_decoded() {
            return Some(result);
        }

        if self.flushing {
            self.done = true;
            return None;
        }

        loop {
            let next = self
                .input_ctx
                .as_mut()?
                .packets()
                .next()
                .map(|(stream, packet)| (stream.index(), packet));

            let Some((stream_index, packet)) = next else {
                let _ = self.decoder.as_mut()?.send_eof();
                self.flushing = true;
                if let Some(result) = self.receive_decoded() {
                    return Some(result);
                }
                self.done = true;
                return None;
            };

            if stream_index != self.video_stream_index {
                continue;
            }

            if self.decoder.as_mut()?.send_packet(&packet).is_err() {
                continue;
            }

            if let Some(result) = self.receive_decoded() {
                return Some(result);
            }
        }
    }

    fn close(&mut self) {
        self.input_ctx = None;
        self.decoder = None;
        self.scaler = None;
        self.done = true;
    }
}

fn extract_rgb_pixels(
    rgb_frame: &ffmpeg_next::util::frame::video::Video,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let stride = rgb_frame.stride(0);
    let data = rgb_frame.data(0);
    let w = width as usize;
    let h = height as usize;

    let mut pixels = Vec::with_capacity(w * h * 3);
    for row in 0..h {
        let row_start = row * stride;
        pixels.extend_from_slice(&data[row_start..row_start + w * 3]);
    }
    pixels
}
