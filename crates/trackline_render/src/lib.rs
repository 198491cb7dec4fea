pub mod config;
pub mod emitter;
pub mod error;

pub use config::{
    overlays_from_config, settings_from_config, to_render_config, Layer, LayerContent, LayerFrame,
    PanelKind, RenderConfig,
};
pub use emitter::{ConfigEmitter, EmitterConfig, EmitterHandle};
pub use error::{RenderError, Result};
