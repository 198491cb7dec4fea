//! Conversions between wall-clock time and timeline frames.

use crate::types::Overlay;

pub const DEFAULT_FPS: u32 = 30;

/// Milliseconds to the nearest frame, saturating at `u32::MAX`.
pub fn ms_to_frames(ms: u64, fps: u32) -> u32 {
    let frames = (ms as u128 * fps as u128 + 500) / 1000;
    u32::try_from(frames).unwrap_or(u32::MAX)
}

/// Milliseconds to the first frame boundary at or after `ms`, saturating at
/// `u32::MAX`. Used when an overlay must cover a whole caption range.
pub fn ms_to_frames_ceil(ms: u64, fps: u32) -> u32 {
    let frames = (ms as u128 * fps as u128).div_ceil(1000);
    u32::try_from(frames).unwrap_or(u32::MAX)
}

pub fn frames_to_ms(frames: u32, fps: u32) -> u64 {
    if fps == 0 {
        return 0;
    }
    ((frames as f64 * 1000.0) / fps as f64).round() as u64
}

pub fn seconds_to_frames(seconds: f64, fps: u32) -> u32 {
    (seconds.max(0.0) * fps as f64).round() as u32
}

pub fn frames_to_seconds(frames: u32, fps: u32) -> f64 {
    if fps == 0 {
        return 0.0;
    }
    frames as f64 / fps as f64
}

/// `HH:MM:SS:FF` timecode for a frame position.
pub fn format_timecode(frame: u32, fps: u32) -> String {
    let fps = fps.max(1);
    let ff = frame % fps;
    let total_secs = frame / fps;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;
    format!("{:02}:{:02}:{:02}:{:02}", hours, mins, secs, ff)
}

/// Exclusive end frame of the latest overlay, or 0 for an empty timeline.
pub fn content_end_frame(overlays: &[Overlay]) -> u32 {
    overlays
        .iter()
        .filter(|o| o.kind.has_timeline_footprint())
        .map(Overlay::end_frame)
        .max()
        .unwrap_or(0)
}

/// Composition length handed to the renderer: the content end, padded to
/// `min_frames`, and never zero.
pub fn composition_duration(overlays: &[Overlay], min_frames: u32) -> u32 {
    content_end_frame(overlays).max(min_frames).max(1)
}
