use trackline_core::time::ms_to_frames_ceil;
use trackline_core::{Bounds, Caption, CaptionOverlay, Overlay, OverlayKind, ProjectSettings};

/// Lower-third band used for new caption overlays.
pub fn caption_bounds(settings: &ProjectSettings) -> Bounds {
    let width = settings.width as f64;
    let height = settings.height as f64;
    Bounds::new(width / 10.0, height * 3.0 / 4.0, width * 4.0 / 5.0, height * 3.0 / 20.0)
}

/// Wrap captions in an overlay long enough to show the last one.
/// Caption times are relative to the overlay's start frame. Lengths past
/// the frame range saturate at `u32::MAX` frames.
pub fn caption_overlay(captions: Vec<Caption>, settings: &ProjectSettings) -> Overlay {
    let last_end_ms = captions.iter().map(|c| c.end_ms).max().unwrap_or(0);
    let duration = ms_to_frames_ceil(last_end_ms, settings.fps).max(1);
    Overlay::new(
        OverlayKind::Caption(CaptionOverlay {
            captions,
            template: None,
        }),
        duration,
        caption_bounds(settings),
    )
}
