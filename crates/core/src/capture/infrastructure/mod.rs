pub mod ffmpeg_capture;
pub mod ffmpeg_video_writer;
pub mod image_file_source;
pub mod image_file_writer;
