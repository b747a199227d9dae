use crate::{
    Codec, DEFAULT_FPS, Device, PreferenceKind, Preferences, StartOptions,
    engine::{
        CaptureBackend, STDERR_TAIL_BYTES, capture_args, encoder_args,
        parse_avfoundation_devices, spawn_tail_reader,
    },
};

use std::io::Cursor;

const AVFOUNDATION_LISTING: &str = "\
[AVFoundation indev @ 0x7f9a2c004a00] AVFoundation video devices:
[AVFoundation indev @ 0x7f9a2c004a00] [0] FaceTime HD Camera
[AVFoundation indev @ 0x7f9a2c004a00] [1] Capture screen 0
[AVFoundation indev @ 0x7f9a2c004a00] [2] Capture screen 1
[AVFoundation indev @ 0x7f9a2c004a00] AVFoundation audio devices:
[AVFoundation indev @ 0x7f9a2c004a00] [0] MacBook Pro Microphone
[AVFoundation indev @ 0x7f9a2c004a00] [1] BlackHole 2ch
: Input/output error
";

fn options(audio: Option<&str>) -> StartOptions {
    StartOptions {
        fps: DEFAULT_FPS,
        audio_device_id: audio.map(String::from),
        screen_id: None,
        codec: Codec::H264,
    }
}

/// WHAT: avfoundation listing yields screens and microphones by index
/// WHY: Device ids must be the indices ffmpeg expects in `-i screen:audio`
#[test]
fn given_avfoundation_listing_when_parsing_then_screens_and_microphones_found() {
    // Given/When: Parsing a typical listing
    let devices = parse_avfoundation_devices(AVFOUNDATION_LISTING);

    // Then: Cameras are skipped, indices become ids
    assert_eq!(
        devices.screens,
        vec![
            Device::display("1", "Capture screen 0"),
            Device::display("2", "Capture screen 1"),
        ]
    );
    assert_eq!(
        devices.microphones,
        vec![
            Device::microphone("0", "MacBook Pro Microphone"),
            Device::microphone("1", "BlackHole 2ch"),
        ]
    );
}

/// WHAT: Unrelated ffmpeg output parses to no devices
/// WHY: A missing avfoundation input must degrade to an empty catalog, not garbage
#[test]
fn given_unrelated_output_when_parsing_then_no_devices() {
    // Given/When: Output without a device listing
    let devices = parse_avfoundation_devices("Unknown input format: 'avfoundation'\n");

    // Then: Empty
    assert!(devices.screens.is_empty());
    assert!(devices.microphones.is_empty());
}

/// WHAT: avfoundation input pairs screen and microphone indices
/// WHY: avfoundation takes both devices in a single `-i` argument
#[test]
fn given_avfoundation_with_microphone_when_building_args_then_combined_input() {
    // Given/When: Args with and without audio
    let with_audio = capture_args(CaptureBackend::AvFoundation, &options(Some("0")), "1");
    let without_audio = capture_args(CaptureBackend::AvFoundation, &options(None), "1");

    // Then: Combined input and fixed frame rate
    assert!(with_audio.windows(2).any(|w| w == ["-i", "1:0"]));
    assert!(with_audio.windows(2).any(|w| w == ["-framerate", "30"]));
    assert!(without_audio.windows(2).any(|w| w == ["-i", "1:none"]));
}

/// WHAT: x11grab adds a separate ALSA input only when a microphone is chosen
/// WHY: Recording without a microphone must not open an audio device
#[test]
fn given_x11grab_when_building_args_then_alsa_input_only_with_microphone() {
    // Given/When: Args with and without audio
    let with_audio = capture_args(CaptureBackend::X11Grab, &options(Some("default")), ":0");
    let without_audio = capture_args(CaptureBackend::X11Grab, &options(None), ":0");

    // Then: ALSA input appears only when requested
    assert!(with_audio.windows(2).any(|w| w == ["-i", ":0"]));
    assert!(with_audio.windows(4).any(|w| w == ["-f", "alsa", "-i", "default"]));
    assert!(!without_audio.iter().any(|arg| arg == "alsa"));
}

/// WHAT: gdigrab uses a DirectShow audio input
/// WHY: dshow addresses microphones as `audio=<name>`
#[test]
fn given_gdigrab_with_microphone_when_building_args_then_dshow_audio_input() {
    // Given/When: Windows args with a microphone
    let args = capture_args(CaptureBackend::GdiGrab, &options(Some("Microphone (USB)")), "desktop");

    // Then: Desktop capture plus dshow audio
    assert!(args.windows(2).any(|w| w == ["-i", "desktop"]));
    assert!(args.windows(2).any(|w| w == ["-i", "audio=Microphone (USB)"]));
}

/// WHAT: Encoder and audio codec follow the container
/// WHY: MP4 needs AAC while QuickTime ProRes carries PCM
#[test]
fn given_codecs_when_building_encoder_args_then_container_appropriate() {
    // Given/When: Encoder args per codec
    let h264 = encoder_args(Codec::H264, true);
    let prores = encoder_args(Codec::ProRes4444, true);
    let silent = encoder_args(Codec::Hevc, false);

    // Then: Matching encoders and audio codecs
    assert!(h264.windows(2).any(|w| w == ["-c:v", "libx264"]));
    assert!(h264.windows(2).any(|w| w == ["-c:a", "aac"]));
    assert!(prores.windows(2).any(|w| w == ["-profile:v", "4"]));
    assert!(prores.windows(2).any(|w| w == ["-c:a", "pcm_s16le"]));
    assert!(silent.windows(2).any(|w| w == ["-c:v", "libx265"]));
    assert!(!silent.iter().any(|arg| arg == "-c:a"));
}

/// WHAT: Codec ids and extensions are stable
/// WHY: Menu ids and output file names depend on them
#[test]
fn given_codecs_when_reading_ids_then_round_trip_and_extensions_match() {
    // Given/When/Then: Every codec parses back from its id
    for codec in Codec::ALL {
        assert_eq!(Codec::from_id(codec.as_str()), Some(codec));
    }
    assert_eq!(Codec::H264.extension(), "mp4");
    assert_eq!(Codec::ProRes422.extension(), "mov");
    assert_eq!(Codec::from_id("vp9"), None);
}

/// WHAT: Start options default to H.264 with no devices
/// WHY: An untouched menu must still produce a valid recording
#[test]
fn given_no_preferences_when_building_start_options_then_defaults() {
    // Given/When: Options from empty preferences
    let options = StartOptions::from_preferences(&Preferences::new());

    // Then: Defaults
    assert_eq!(options.fps, 30);
    assert_eq!(options.audio_device_id, None);
    assert_eq!(options.screen_id, None);
    assert_eq!(options.codec, Codec::H264);
}

/// WHAT: A display id is forwarded, a codec stored in the wrong slot is not
/// WHY: Typed getters decide what reaches the engine
#[test]
fn given_mismatched_preferences_when_building_start_options_then_only_typed_values_used() {
    // Given: A device stored as the codec preference
    let mut prefs = Preferences::new();
    prefs.set(PreferenceKind::Codec, Device::display("1", "Screen").into());
    prefs.set(PreferenceKind::Display, Device::display("3", "Capture screen 2").into());

    // When: Building options
    let options = StartOptions::from_preferences(&prefs);

    // Then: Codec falls back, display is forwarded
    assert_eq!(options.codec, Codec::H264);
    assert_eq!(options.screen_id.as_deref(), Some("3"));
}

/// WHAT: The stderr reader consumes everything but keeps only the tail
/// WHY: ffmpeg must never block on a full pipe during a long capture
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_stderr_larger_than_tail_when_drained_then_only_tail_kept() {
    // Given: Twice the tail size of early noise followed by the final error
    let mut output = vec![b'a'; STDERR_TAIL_BYTES * 2];
    output.extend_from_slice(b"\nError while finalizing the file");

    // When: Draining it to the end
    let tail = spawn_tail_reader(Cursor::new(output)).await.unwrap();

    // Then: Only the last bytes remain, ending with the final error
    assert!(tail.len() <= STDERR_TAIL_BYTES);
    assert!(tail.ends_with("Error while finalizing the file"));
}

/// WHAT: Empty stderr yields an empty tail
/// WHY: A clean ffmpeg exit has nothing to report
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_empty_stderr_when_drained_then_empty_tail() {
    // Given/When: Draining an empty stream
    let tail = spawn_tail_reader(Cursor::new(Vec::<u8>::new())).await.unwrap();

    // Then: Nothing is kept
    assert!(tail.is_empty());
}

/// WHAT: The real ffmpeg engine lists at least one display
/// WHY: Smoke test for the platform capture backend
#[tokio::test]
#[allow(clippy::unwrap_used)]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn given_installed_ffmpeg_when_listing_screens_then_at_least_one() {
    use crate::{FfmpegEngine, RecordingEngine};

    // Given: An engine over the ffmpeg on PATH
    let engine = FfmpegEngine::new("ffmpeg");

    // When: Listing screens
    let screens = engine.list_screens().await.unwrap();

    // Then: Something capturable exists
    assert!(!screens.is_empty());
}
