use crate::error::Result;
use crate::store::OverlayStore;
use crate::types::*;
use std::path::Path;
use uuid::Uuid;

impl Project {
    /// Create a new empty project with the given name and settings.
    pub fn new(name: impl Into<String>, settings: ProjectSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            settings,
            overlays: vec![],
        }
    }

    /// Save project to a file as pretty-printed JSON.
    /// Automatically appends `.trackline` extension if not present.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = ensure_extension(path.as_ref());
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a project from a JSON file. A path that does not exist as given
    /// is retried with the `.trackline` extension, mirroring
    /// [`Self::save_to_file`].
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path = if path.exists() {
            path.to_path_buf()
        } else {
            ensure_extension(path)
        };
        let data = std::fs::read_to_string(path)?;
        let project: Project = serde_json::from_str(&data)?;
        Ok(project)
    }

    /// Open an editing session over this project's overlays.
    pub fn to_store(&self) -> OverlayStore {
        OverlayStore::with_overlays(self.overlays.clone()).with_fps(self.settings.fps)
    }

    /// Take the store's collection as the project's new content.
    pub fn sync_from_store(&mut self, store: &OverlayStore) {
        self.overlays = store.overlays().to_vec();
    }
}

/// 1920x1080 30fps preset.
pub fn preset_1080p() -> ProjectSettings {
    ProjectSettings {
        width: 1920,
        height: 1080,
        fps: 30,
    }
}

/// 1080x1920 30fps (vertical/shorts) preset.
pub fn preset_shorts() -> ProjectSettings {
    ProjectSettings {
        width: 1080,
        height: 1920,
        fps: 30,
    }
}

/// 1280x720 30fps preset.
pub fn preset_720p() -> ProjectSettings {
    ProjectSettings {
        width: 1280,
        height: 720,
        fps: 30,
    }
}

/// 3840x2160 30fps (4K) preset.
pub fn preset_4k() -> ProjectSettings {
    ProjectSettings {
        width: 3840,
        height: 2160,
        fps: 30,
    }
}

/// 1920x1080 60fps preset.
pub fn preset_1080p_60() -> ProjectSettings {
    ProjectSettings {
        width: 1920,
        height: 1080,
        fps: 60,
    }
}

/// Look a preset up by its CLI name.
pub fn preset_by_name(name: &str) -> Option<ProjectSettings> {
    match name {
        "1080p" => Some(preset_1080p()),
        "shorts" => Some(preset_shorts()),
        "720p" => Some(preset_720p()),
        "4k" => Some(preset_4k()),
        "1080p60" => Some(preset_1080p_60()),
        _ => None,
    }
}

fn ensure_extension(path: &Path) -> std::path::PathBuf {
    if path.extension().and_then(|e| e.to_str()) == Some("trackline") {
        path.to_path_buf()
    } else {
        let mut p = path.to_path_buf();
        let mut name = p.file_name().unwrap_or_default().to_os_string();
        name.push(".trackline");
        p.set_file_name(name);
        p
    }
}
