use std::{
    io::Write as _,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use anyhow::{bail, Context as _};
use image::GrayImage;
use string_chord::{render, Float, Generation};

const FPS: u32 = 30;

/// Where the animation of `output` goes: `<stem>_animation.mp4`, or `<stem>_frames/` when
/// `ffmpeg` is unavailable.
pub fn target(output: &Path, video: bool) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let name = if video {
        format!("{stem}_animation.mp4")
    } else {
        format!("{stem}_frames")
    };
    output.with_file_name(name)
}

/// Draws the sequence chord by chord and stores the planned frames. Returns the path written.
pub fn save<S: Float>(
    generation: &Generation<S>,
    scale: u32,
    max_frames: usize,
    output: &Path,
) -> anyhow::Result<PathBuf> {
    let frames = render::render_frames(generation.pins(), generation.sequence(), scale, max_frames);
    tracing::debug!(stride = frames.plan().stride(), "planning animation frames");

    if is_ffmpeg_on_path() {
        let path = target(output, true);
        let side = generation.grid().width as u32 * scale;
        let mut encoder = FfmpegEncoder::new(&path, side)?;
        for frame in frames {
            encoder.encode_frame(&frame)?;
        }
        encoder.finish()?;
        Ok(path)
    } else {
        let dir = target(output, false);
        tracing::warn!("ffmpeg not found on PATH, writing frames as images to '{}'", dir.display());
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create frame directory '{}'", dir.display()))?;
        for (index, frame) in frames.enumerate() {
            let path = dir.join(format!("frame_{:04}.png", index + 1));
            frame
                .save(&path)
                .with_context(|| format!("failed to write frame '{}'", path.display()))?;
        }
        Ok(dir)
    }
}

fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Pipes raw grayscale frames into an `ffmpeg` child process.
struct FfmpegEncoder {
    side: u32,
    child: Child,
    stdin: Option<ChildStdin>,
}

impl FfmpegEncoder {
    fn new(path: &Path, side: u32) -> anyhow::Result<Self> {
        let mut child = Command::new("ffmpeg")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .args([
                "-y",
                "-loglevel",
                "error",
                "-f",
                "rawvideo",
                "-pix_fmt",
                "gray",
                "-s",
                &format!("{side}x{side}"),
                "-r",
                &FPS.to_string(),
                "-i",
                "pipe:0",
                "-an",
                // yuv420p needs even dimensions
                "-vf",
                "pad=ceil(iw/2)*2:ceil(ih/2)*2",
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
            ])
            .arg(path)
            .spawn()
            .context("failed to spawn ffmpeg")?;
        let stdin = child.stdin.take().context("failed to open ffmpeg stdin")?;
        Ok(Self {
            side,
            child,
            stdin: Some(stdin),
        })
    }

    fn encode_frame(&mut self, frame: &GrayImage) -> anyhow::Result<()> {
        if frame.width() != self.side || frame.height() != self.side {
            bail!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                self.side,
                self.side
            );
        }
        let Some(stdin) = self.stdin.as_mut() else {
            bail!("ffmpeg encoder is already finalized");
        };
        stdin
            .write_all(frame.as_raw())
            .context("failed to write frame to ffmpeg stdin")
    }

    fn finish(mut self) -> anyhow::Result<()> {
        drop(self.stdin.take());
        let output = self
            .child
            .wait_with_output()
            .context("failed to wait for ffmpeg to finish")?;
        if !output.status.success() {
            bail!(
                "ffmpeg exited with status {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_sit_next_to_the_output() {
        let output = Path::new("out/portrait.png");
        assert_eq!(target(output, true), Path::new("out/portrait_animation.mp4"));
        assert_eq!(target(output, false), Path::new("out/portrait_frames"));
    }
}
