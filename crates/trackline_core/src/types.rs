use serde::{Deserialize, Serialize};
use std::fmt;

/// Overlay identifier. Allocated by the store as `max(existing) + 1`.
pub type OverlayId = u32;

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Layout box of an overlay on the canvas, in pixels and degrees.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
            rotation: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Styles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectFit {
    #[default]
    Cover,
    Contain,
    Fill,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Crop rectangle expressed as percentages of the source frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaStyle {
    #[serde(default)]
    pub object_fit: ObjectFit,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<Crop>,
}

impl Default for MediaStyle {
    fn default() -> Self {
        Self {
            object_fit: ObjectFit::default(),
            opacity: default_opacity(),
            border_radius: None,
            crop: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: u16,
    pub color: String,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Inter".to_string(),
            font_size: 48.0,
            font_weight: 600,
            color: "#ffffff".to_string(),
            text_align: TextAlign::Center,
            scale: default_scale(),
        }
    }
}

fn default_opacity() -> f64 {
    1.0
}

fn default_scale() -> f64 {
    1.0
}

fn default_volume() -> f64 {
    1.0
}

// ---------------------------------------------------------------------------
// Caption
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaptionWord {
    pub word: String,
    pub start_ms: u64,
    pub end_ms: u64,
    pub confidence: f64,
}

/// One subtitle line with its per-word timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Caption {
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
    pub timestamp_ms: Option<u64>,
    pub confidence: f64,
    pub words: Vec<CaptionWord>,
}

impl Caption {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

// ---------------------------------------------------------------------------
// Overlay variants
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoOverlay {
    pub src: String,
    /// Frames skipped at the head of the source.
    #[serde(default)]
    pub trim_start: u32,
    #[serde(default)]
    pub style: MediaStyle,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageOverlay {
    pub src: String,
    #[serde(default)]
    pub style: MediaStyle,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextOverlay {
    pub content: String,
    #[serde(default)]
    pub style: TextStyle,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaptionOverlay {
    pub captions: Vec<Caption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StickerOverlay {
    pub template_id: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SoundOverlay {
    pub src: String,
    /// Display title of the track.
    #[serde(default)]
    pub content: String,
    /// Frames skipped at the head of the source.
    #[serde(default)]
    pub trim_start: u32,
    #[serde(default = "default_volume")]
    pub volume: f64,
}

// ---------------------------------------------------------------------------
// OverlayKind
// ---------------------------------------------------------------------------

/// Variant payload of an overlay, discriminated by `"type"` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OverlayKind {
    Video(VideoOverlay),
    Image(ImageOverlay),
    Text(TextOverlay),
    Caption(CaptionOverlay),
    Sticker(StickerOverlay),
    Sound(SoundOverlay),
    LocalDir,
    Template,
    Settings,
    Ai,
}

impl OverlayKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            OverlayKind::Video(_) => "video",
            OverlayKind::Image(_) => "image",
            OverlayKind::Text(_) => "text",
            OverlayKind::Caption(_) => "caption",
            OverlayKind::Sticker(_) => "sticker",
            OverlayKind::Sound(_) => "sound",
            OverlayKind::LocalDir => "local-dir",
            OverlayKind::Template => "template",
            OverlayKind::Settings => "settings",
            OverlayKind::Ai => "ai",
        }
    }

    /// Whether the overlay occupies frames on its row.
    /// Panel-only kinds (local-dir, template, settings, ai) do not.
    pub fn has_timeline_footprint(&self) -> bool {
        match self {
            OverlayKind::Video(_)
            | OverlayKind::Image(_)
            | OverlayKind::Text(_)
            | OverlayKind::Caption(_)
            | OverlayKind::Sticker(_)
            | OverlayKind::Sound(_) => true,
            OverlayKind::LocalDir
            | OverlayKind::Template
            | OverlayKind::Settings
            | OverlayKind::Ai => false,
        }
    }

    /// Source trim offset, for kinds that play a slice of a media file.
    pub fn trim_start(&self) -> Option<u32> {
        match self {
            OverlayKind::Video(v) => Some(v.trim_start),
            OverlayKind::Sound(s) => Some(s.trim_start),
            _ => None,
        }
    }

    pub fn set_trim_start(&mut self, frames: u32) {
        match self {
            OverlayKind::Video(v) => v.trim_start = frames,
            OverlayKind::Sound(s) => s.trim_start = frames,
            _ => {}
        }
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

/// A timed, positioned element on the editing timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    pub id: OverlayId,
    pub from: u32,
    pub duration_in_frames: u32,
    pub row: u32,
    #[serde(flatten)]
    pub bounds: Bounds,
    #[serde(default)]
    pub is_dragging: bool,
    #[serde(flatten)]
    pub kind: OverlayKind,
}

impl Overlay {
    /// A fresh overlay at frame 0 on row 0. The store assigns the real id
    /// and the positioning engine the real `from`/`row`.
    pub fn new(kind: OverlayKind, duration_in_frames: u32, bounds: Bounds) -> Self {
        Self {
            id: 0,
            from: 0,
            duration_in_frames: duration_in_frames.max(1),
            row: 0,
            bounds,
            is_dragging: false,
            kind,
        }
    }

    /// Exclusive end frame.
    pub fn end_frame(&self) -> u32 {
        self.from.saturating_add(self.duration_in_frames)
    }

    /// Whether `[from, from + duration)` on `row` intersects this overlay.
    pub fn occupies(&self, row: u32, from: u32, duration: u32) -> bool {
        self.kind.has_timeline_footprint()
            && self.row == row
            && self.from < from.saturating_add(duration)
            && from < self.end_frame()
    }
}

// ---------------------------------------------------------------------------
// ProjectSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        crate::project::preset_1080p()
    }
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// The persisted unit: settings plus the full overlay collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: uuid::Uuid,
    pub name: String,
    pub settings: ProjectSettings,
    pub overlays: Vec<Overlay>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
