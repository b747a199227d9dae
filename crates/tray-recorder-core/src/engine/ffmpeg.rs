//! Recording engine backed by an `ffmpeg` child process.
//!
//! macOS captures through `avfoundation`, which also enumerates every
//! microphone and screen. Linux uses `x11grab` with ALSA audio and Windows uses
//! `gdigrab` with DirectShow audio; on both, microphones come from cpal.

use crate::{
    CatalogSnapshot, Codec, CoreResult, Device, RecorderError, RecordingEngine, StartOptions,
};

use std::{
    panic::Location,
    path::PathBuf,
    process::Stdio,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use async_trait::async_trait;
use error_location::ErrorLocation;
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWriteExt},
    process::{Child, Command},
    sync::Mutex,
    task::JoinHandle,
};
use tracing::{debug, info, instrument, warn};

/// How long ffmpeg must survive after spawning before a start counts as
/// successful. Bad device ids and missing encoders fail well inside this.
const STARTUP_GRACE: Duration = Duration::from_millis(500);

/// Upper bound for ffmpeg to flush and close the container after `q`.
const STOP_TIMEOUT: Duration = Duration::from_secs(10);

/// Trailing bytes of ffmpeg's stderr kept for error messages.
pub(crate) const STDERR_TAIL_BYTES: usize = 8 * 1024;

const AVFOUNDATION_SCREEN_PREFIX: &str = "Capture screen";

/// Platform capture input used by ffmpeg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CaptureBackend {
    /// macOS screen and audio capture.
    AvFoundation,
    /// X11 screen grab with ALSA audio.
    X11Grab,
    /// Windows GDI screen grab with DirectShow audio.
    GdiGrab,
}

impl CaptureBackend {
    /// Backend for the platform this binary was built for.
    pub(crate) const fn native() -> Self {
        if cfg!(target_os = "macos") {
            Self::AvFoundation
        } else if cfg!(target_os = "windows") {
            Self::GdiGrab
        } else {
            Self::X11Grab
        }
    }
}

/// Devices found in an `avfoundation` device listing.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct AvFoundationDevices {
    pub(crate) microphones: Vec<Device>,
    pub(crate) screens: Vec<Device>,
}

struct ActiveCapture {
    child: Child,
    output: PathBuf,
    stderr: Option<JoinHandle<String>>,
}

/// Drives `ffmpeg` to capture the screen and, optionally, a microphone.
///
/// At most one capture runs at a time. The child process is killed if the
/// engine is dropped mid-recording.
pub struct FfmpegEngine {
    ffmpeg_path: PathBuf,
    backend: CaptureBackend,
    active: Mutex<Option<ActiveCapture>>,
}

impl FfmpegEngine {
    /// Create an engine that runs the given `ffmpeg` executable.
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            backend: CaptureBackend::native(),
            active: Mutex::new(None),
        }
    }

    async fn avfoundation_devices(&self) -> CoreResult<AvFoundationDevices> {
        let output = Command::new(&self.ffmpeg_path)
            .args(["-hide_banner", "-f", "avfoundation", "-list_devices", "true", "-i", ""])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| RecorderError::DeviceQueryFailed {
                reason: format!("Failed to run {:?}: {}", self.ffmpeg_path, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        // ffmpeg exits non-zero here since no input is opened; the listing
        // itself is written to stderr.
        let listing = String::from_utf8_lossy(&output.stderr);
        let devices = parse_avfoundation_devices(&listing);

        debug!(
            microphones = devices.microphones.len(),
            screens = devices.screens.len(),
            "Parsed avfoundation devices"
        );

        Ok(devices)
    }

    async fn resolve_screen(&self, options: &StartOptions) -> CoreResult<String> {
        if let Some(id) = &options.screen_id {
            return Ok(id.clone());
        }

        let screens = self
            .list_screens()
            .await
            .map_err(|e| RecorderError::RecordingStartFailed {
                reason: format!("No display selected and listing displays failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        screens
            .into_iter()
            .next()
            .map(|screen| screen.id)
            .ok_or_else(|| RecorderError::RecordingStartFailed {
                reason: "No display available to capture".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

#[async_trait]
impl RecordingEngine for FfmpegEngine {
    #[instrument(skip(self))]
    async fn list_audio_devices(&self) -> CoreResult<Vec<Device>> {
        match self.backend {
            CaptureBackend::AvFoundation => Ok(self.avfoundation_devices().await?.microphones),
            CaptureBackend::X11Grab | CaptureBackend::GdiGrab => system_microphones().await,
        }
    }

    #[instrument(skip(self))]
    async fn list_screens(&self) -> CoreResult<Vec<Device>> {
        match self.backend {
            CaptureBackend::AvFoundation => Ok(self.avfoundation_devices().await?.screens),
            CaptureBackend::X11Grab => {
                let display = std::env::var("DISPLAY").unwrap_or_else(|_| ":0".to_string());
                let name = format!("Display {}", display);
                Ok(vec![Device::display(display, name)])
            }
            CaptureBackend::GdiGrab => Ok(vec![Device::display("desktop", "Desktop")]),
        }
    }

    #[instrument(skip(self))]
    async fn list_devices(&self) -> CoreResult<CatalogSnapshot> {
        let (microphones, displays) = match self.backend {
            // One listing covers both kinds.
            CaptureBackend::AvFoundation => {
                let devices = self.avfoundation_devices().await?;
                (devices.microphones, devices.screens)
            }
            CaptureBackend::X11Grab | CaptureBackend::GdiGrab => {
                (self.list_audio_devices().await?, self.list_screens().await?)
            }
        };

        Ok(CatalogSnapshot {
            microphones,
            displays,
            codecs: self.supported_codecs(),
        })
    }

    #[instrument(skip(self))]
    async fn start_recording(&self, options: &StartOptions) -> CoreResult<()> {
        let mut active = self.active.lock().await;

        if active.is_some() {
            return Err(RecorderError::RecordingStartFailed {
                reason: "A capture is already running".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let screen = self.resolve_screen(options).await?;
        let output = output_path(options.codec);

        let mut args: Vec<String> = ["-hide_banner", "-loglevel", "error", "-y"]
            .into_iter()
            .map(String::from)
            .collect();
        args.extend(capture_args(self.backend, options, &screen));
        args.extend(encoder_args(options.codec, options.audio_device_id.is_some()));
        args.push(output.to_string_lossy().into_owned());

        debug!(args = ?args, "Spawning ffmpeg");

        let mut child = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RecorderError::RecordingStartFailed {
                reason: format!("Failed to spawn {:?}: {}", self.ffmpeg_path, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        // Drained for the whole capture so ffmpeg never blocks on a full pipe.
        let stderr = child.stderr.take().map(spawn_tail_reader);

        tokio::time::sleep(STARTUP_GRACE).await;

        let exited = child
            .try_wait()
            .map_err(|e| RecorderError::RecordingStartFailed {
                reason: format!("Failed to poll ffmpeg: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if let Some(status) = exited {
            let stderr = stderr_tail(stderr).await;
            return Err(RecorderError::RecordingStartFailed {
                reason: format!("ffmpeg exited early with {}: {}", status, stderr),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        info!(output = ?output, screen = %screen, "Capture started");

        *active = Some(ActiveCapture {
            child,
            output,
            stderr,
        });

        Ok(())
    }

    #[instrument(skip(self))]
    async fn stop_recording(&self) -> CoreResult<PathBuf> {
        let ActiveCapture {
            mut child,
            output,
            stderr,
        } =
            self.active
                .lock()
                .await
                .take()
                .ok_or_else(|| RecorderError::RecordingStopFailed {
                    reason: "No capture is running".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })?;

        // `q` on stdin makes ffmpeg finish the container cleanly.
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(b"q").await {
                warn!(error = ?e, "Failed to send quit to ffmpeg");
            }
            drop(stdin);
        }

        let status = match tokio::time::timeout(STOP_TIMEOUT, child.wait()).await {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                return Err(RecorderError::RecordingStopFailed {
                    reason: format!("Failed to wait for ffmpeg: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            Err(_) => {
                warn!(timeout_s = STOP_TIMEOUT.as_secs(), "ffmpeg did not exit, killing");
                if let Err(e) = child.kill().await {
                    warn!(error = ?e, "Failed to kill ffmpeg");
                }
                return Err(RecorderError::RecordingStopFailed {
                    reason: format!("ffmpeg did not finalize {:?} in time", output),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        if !status.success() {
            let stderr = stderr_tail(stderr).await;
            return Err(RecorderError::RecordingStopFailed {
                reason: format!("ffmpeg exited with {}: {}", status, stderr),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !tokio::fs::try_exists(&output).await.unwrap_or(false) {
            return Err(RecorderError::RecordingStopFailed {
                reason: format!("ffmpeg produced no file at {:?}", output),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        info!(output = ?output, "Capture finalized");

        Ok(output)
    }

    #[instrument(skip(self))]
    async fn abort_recording(&self) -> CoreResult<()> {
        let Some(ActiveCapture {
            mut child, output, ..
        }) = self.active.lock().await.take()
        else {
            return Ok(());
        };

        warn!(output = ?output, "Aborting capture, recording will not be finalized");

        // kill() also waits, so the process is gone when this returns.
        child
            .kill()
            .await
            .map_err(|e| RecorderError::RecordingStopFailed {
                reason: format!("Failed to kill ffmpeg: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

/// Parse the stderr of `ffmpeg -f avfoundation -list_devices true -i ""`.
///
/// Only video devices named `Capture screen N` are displays; cameras are
/// skipped. Device ids are the avfoundation indices.
pub(crate) fn parse_avfoundation_devices(listing: &str) -> AvFoundationDevices {
    #[derive(Clone, Copy)]
    enum Section {
        Preamble,
        Video,
        Audio,
    }

    let mut section = Section::Preamble;
    let mut devices = AvFoundationDevices::default();

    for line in listing.lines() {
        if line.contains("AVFoundation video devices") {
            section = Section::Video;
            continue;
        }
        if line.contains("AVFoundation audio devices") {
            section = Section::Audio;
            continue;
        }

        let Some((index, name)) = parse_device_line(line) else {
            continue;
        };

        match section {
            Section::Video if name.starts_with(AVFOUNDATION_SCREEN_PREFIX) => {
                devices.screens.push(Device::display(index, name));
            }
            Section::Audio => devices.microphones.push(Device::microphone(index, name)),
            _ => {}
        }
    }

    devices
}

/// Split `[AVFoundation indev @ 0x..] [3] Name` into `("3", "Name")`.
fn parse_device_line(line: &str) -> Option<(&str, &str)> {
    let (_, body) = line.split_once("] ")?;
    let (index, name) = body.strip_prefix('[')?.split_once("] ")?;
    index.parse::<u32>().ok()?;
    Some((index, name.trim()))
}

/// Input arguments for the given backend.
pub(crate) fn capture_args(
    backend: CaptureBackend,
    options: &StartOptions,
    screen: &str,
) -> Vec<String> {
    let fps = options.fps.to_string();
    let audio = options.audio_device_id.as_deref();

    let mut args: Vec<String> = Vec::new();
    match backend {
        CaptureBackend::AvFoundation => {
            let input = format!("{}:{}", screen, audio.unwrap_or("none"));
            args.extend(["-f", "avfoundation", "-capture_cursor", "1"].map(String::from));
            args.extend(["-framerate".to_string(), fps, "-i".to_string(), input]);
        }
        CaptureBackend::X11Grab => {
            args.extend(["-f", "x11grab", "-framerate"].map(String::from));
            args.extend([fps, "-i".to_string(), screen.to_string()]);
            if let Some(audio) = audio {
                args.extend(["-f", "alsa", "-i", audio].map(String::from));
            }
        }
        CaptureBackend::GdiGrab => {
            args.extend(["-f", "gdigrab", "-framerate"].map(String::from));
            args.extend([fps, "-i".to_string(), screen.to_string()]);
            if let Some(audio) = audio {
                args.extend(["-f".to_string(), "dshow".to_string(), "-i".to_string()]);
                args.push(format!("audio={}", audio));
            }
        }
    }
    args
}

/// Encoder arguments for `codec`, plus an audio encoder matching its container.
pub(crate) fn encoder_args(codec: Codec, with_audio: bool) -> Vec<String> {
    let video: &[&str] = match codec {
        Codec::H264 => &["-c:v", "libx264", "-preset", "veryfast", "-pix_fmt", "yuv420p"],
        Codec::Hevc => &[
            "-c:v", "libx265", "-preset", "veryfast", "-pix_fmt", "yuv420p", "-tag:v", "hvc1",
        ],
        Codec::ProRes422 => &["-c:v", "prores_ks", "-profile:v", "2"],
        Codec::ProRes4444 => &[
            "-c:v",
            "prores_ks",
            "-profile:v",
            "4",
            "-pix_fmt",
            "yuva444p10le",
        ],
    };

    let mut args: Vec<String> = video.iter().map(|s| s.to_string()).collect();

    if with_audio {
        let audio_codec = match codec {
            Codec::H264 | Codec::Hevc => "aac",
            Codec::ProRes422 | Codec::ProRes4444 => "pcm_s16le",
        };
        args.extend(["-c:a".to_string(), audio_codec.to_string()]);
    }

    args
}

fn output_path(codec: Codec) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    std::env::temp_dir().join(format!("recording-{}.{}", stamp, codec.extension()))
}

/// Read `reader` to the end on a task, keeping only the last
/// [`STDERR_TAIL_BYTES`].
pub(crate) fn spawn_tail_reader<R>(mut reader: R) -> JoinHandle<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut tail: Vec<u8> = Vec::new();
        let mut buf = [0u8; 4096];

        loop {
            match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => {
                    tail.extend_from_slice(&buf[..n]);
                    if tail.len() > STDERR_TAIL_BYTES {
                        let excess = tail.len() - STDERR_TAIL_BYTES;
                        tail.drain(..excess);
                    }
                }
                Err(e) => {
                    debug!(error = ?e, "Stopped reading ffmpeg stderr");
                    break;
                }
            }
        }

        String::from_utf8_lossy(&tail).trim().to_string()
    })
}

/// Collected stderr of an exited ffmpeg, or empty if it cannot be had quickly.
async fn stderr_tail(reader: Option<JoinHandle<String>>) -> String {
    let Some(reader) = reader else {
        return String::new();
    };

    match tokio::time::timeout(Duration::from_secs(1), reader).await {
        Ok(Ok(tail)) => tail,
        Ok(Err(e)) => {
            warn!(error = ?e, "stderr reader task failed");
            String::new()
        }
        Err(_) => String::new(),
    }
}

#[cfg(not(target_os = "macos"))]
async fn system_microphones() -> CoreResult<Vec<Device>> {
    use cpal::traits::{DeviceTrait, HostTrait};

    tokio::task::spawn_blocking(|| {
        let host = cpal::default_host();

        let devices = host
            .input_devices()
            .map_err(|e| RecorderError::DeviceQueryFailed {
                reason: format!("Failed to enumerate input devices: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let mut microphones = Vec::new();
        for device in devices {
            #[allow(deprecated)]
            let name = device.name();
            match name {
                Ok(name) => microphones.push(Device::microphone(name.clone(), name)),
                Err(e) => warn!(error = %e, "Skipping input device without a name"),
            }
        }

        Ok(microphones)
    })
    .await
    .map_err(|e| RecorderError::DeviceQueryFailed {
        reason: format!("Device query task panicked: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?
}

// macOS always lists through avfoundation.
#[cfg(target_os = "macos")]
async fn system_microphones() -> CoreResult<Vec<Device>> {
    Ok(Vec::new())
}
