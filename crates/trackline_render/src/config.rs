use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use trackline_core::time;
use trackline_core::types::*;

use crate::error::{RenderError, Result};

// ---------------------------------------------------------------------------
// Render configuration
// ---------------------------------------------------------------------------

/// Declarative composition description consumed by the renderer and stored
/// with saved projects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub duration_in_frames: u32,
    pub layers: Vec<Layer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: OverlayId,
    pub start_frame: u32,
    pub frame_count: u32,
    pub track: u32,
    pub frame: LayerFrame,
    #[serde(default, skip_serializing_if = "is_false")]
    pub dragging: bool,
    pub content: LayerContent,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LayerFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
    pub weight: u16,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PanelKind {
    LocalDir,
    Template,
    Settings,
    Ai,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LayerContent {
    #[serde(rename_all = "camelCase")]
    Clip {
        source: String,
        source_offset: u32,
        fit: ObjectFit,
        opacity: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        corner_radius: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        crop: Option<Crop>,
    },
    #[serde(rename_all = "camelCase")]
    Still {
        source: String,
        fit: ObjectFit,
        opacity: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        corner_radius: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        crop: Option<Crop>,
    },
    Text {
        text: String,
        font: FontSpec,
        color: String,
        align: TextAlign,
        scale: f64,
    },
    Subtitles {
        cues: Vec<Caption>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        template: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Sticker { sticker_id: String, category: String },
    #[serde(rename_all = "camelCase")]
    Audio {
        source: String,
        title: String,
        source_offset: u32,
        gain: f64,
    },
    /// Editor side panels carried through so a saved config restores them.
    Panel { panel: PanelKind },
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants a store relies on: positive frame rate and
    /// canvas, and one layer per id.
    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(RenderError::InvalidSettings("fps must be positive".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidSettings(format!(
                "canvas {}x{} is empty",
                self.width, self.height
            )));
        }
        let mut seen = HashSet::new();
        for layer in &self.layers {
            if !seen.insert(layer.id) {
                return Err(RenderError::DuplicateLayerId(layer.id));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Translation
// ---------------------------------------------------------------------------

/// Describe the overlay collection as a render configuration.
pub fn to_render_config(overlays: &[Overlay], settings: &ProjectSettings) -> RenderConfig {
    RenderConfig {
        width: settings.width,
        height: settings.height,
        fps: settings.fps,
        duration_in_frames: time::composition_duration(overlays, 1),
        layers: overlays.iter().map(Layer::from).collect(),
    }
}

/// Rebuild the overlay collection described by a saved configuration.
pub fn overlays_from_config(config: &RenderConfig) -> Result<Vec<Overlay>> {
    config.validate()?;
    Ok(config.layers.iter().map(Overlay::from).collect())
}

pub fn settings_from_config(config: &RenderConfig) -> ProjectSettings {
    ProjectSettings {
        width: config.width,
        height: config.height,
        fps: config.fps,
    }
}

impl From<&Overlay> for Layer {
    fn from(overlay: &Overlay) -> Self {
        let content = match &overlay.kind {
            OverlayKind::Video(v) => LayerContent::Clip {
                source: v.src.clone(),
                source_offset: v.trim_start,
                fit: v.style.object_fit,
                opacity: v.style.opacity,
                corner_radius: v.style.border_radius.clone(),
                crop: v.style.crop,
            },
            OverlayKind::Image(i) => LayerContent::Still {
                source: i.src.clone(),
                fit: i.style.object_fit,
                opacity: i.style.opacity,
                corner_radius: i.style.border_radius.clone(),
                crop: i.style.crop,
            },
            OverlayKind::Text(t) => LayerContent::Text {
                text: t.content.clone(),
                font: FontSpec {
                    family: t.style.font_family.clone(),
                    size: t.style.font_size,
                    weight: t.style.font_weight,
                },
                color: t.style.color.clone(),
                align: t.style.text_align,
                scale: t.style.scale,
            },
            OverlayKind::Caption(c) => LayerContent::Subtitles {
                cues: c.captions.clone(),
                template: c.template.clone(),
            },
            OverlayKind::Sticker(s) => LayerContent::Sticker {
                sticker_id: s.template_id.clone(),
                category: s.category.clone(),
            },
            OverlayKind::Sound(s) => LayerContent::Audio {
                source: s.src.clone(),
                title: s.content.clone(),
                source_offset: s.trim_start,
                gain: s.volume,
            },
            OverlayKind::LocalDir => LayerContent::Panel {
                panel: PanelKind::LocalDir,
            },
            OverlayKind::Template => LayerContent::Panel {
                panel: PanelKind::Template,
            },
            OverlayKind::Settings => LayerContent::Panel {
                panel: PanelKind::Settings,
            },
            OverlayKind::Ai => LayerContent::Panel {
                panel: PanelKind::Ai,
            },
        };

        Layer {
            id: overlay.id,
            start_frame: overlay.from,
            frame_count: overlay.duration_in_frames,
            track: overlay.row,
            frame: LayerFrame {
                x: overlay.bounds.left,
                y: overlay.bounds.top,
                width: overlay.bounds.width,
                height: overlay.bounds.height,
                rotation: overlay.bounds.rotation,
            },
            dragging: overlay.is_dragging,
            content,
        }
    }
}

impl From<&Layer> for Overlay {
    fn from(layer: &Layer) -> Self {
        let kind = match &layer.content {
            LayerContent::Clip {
                source,
                source_offset,
                fit,
                opacity,
                corner_radius,
                crop,
            } => OverlayKind::Video(VideoOverlay {
                src: source.clone(),
                trim_start: *source_offset,
                style: MediaStyle {
                    object_fit: *fit,
                    opacity: *opacity,
                    border_radius: corner_radius.clone(),
                    crop: *crop,
                },
            }),
            LayerContent::Still {
                source,
                fit,
                opacity,
                corner_radius,
                crop,
            } => OverlayKind::Image(ImageOverlay {
                src: source.clone(),
                style: MediaStyle {
                    object_fit: *fit,
                    opacity: *opacity,
                    border_radius: corner_radius.clone(),
                    crop: *crop,
                },
            }),
            LayerContent::Text {
                text,
                font,
                color,
                align,
                scale,
            } => OverlayKind::Text(TextOverlay {
                content: text.clone(),
                style: TextStyle {
                    font_family: font.family.clone(),
                    font_size: font.size,
                    font_weight: font.weight,
                    color: color.clone(),
                    text_align: *align,
                    scale: *scale,
                },
            }),
            LayerContent::Subtitles { cues, template } => OverlayKind::Caption(CaptionOverlay {
                captions: cues.clone(),
                template: template.clone(),
            }),
            LayerContent::Sticker {
                sticker_id,
                category,
            } => OverlayKind::Sticker(StickerOverlay {
                template_id: sticker_id.clone(),
                category: category.clone(),
            }),
            LayerContent::Audio {
                source,
                title,
                source_offset,
                gain,
            } => OverlayKind::Sound(SoundOverlay {
                src: source.clone(),
                content: title.clone(),
                trim_start: *source_offset,
                volume: *gain,
            }),
            LayerContent::Panel { panel } => match panel {
                PanelKind::LocalDir => OverlayKind::LocalDir,
                PanelKind::Template => OverlayKind::Template,
                PanelKind::Settings => OverlayKind::Settings,
                PanelKind::Ai => OverlayKind::Ai,
            },
        };

        Overlay {
            id: layer.id,
            from: layer.start_frame,
            duration_in_frames: layer.frame_count,
            row: layer.track,
            bounds: Bounds {
                left: layer.frame.x,
                top: layer.frame.y,
                width: layer.frame.width,
                height: layer.frame.height,
                rotation: layer.frame.rotation,
            },
            is_dragging: layer.dragging,
            kind,
        }
    }
}
