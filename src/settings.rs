//! Host preferences
//!
//! Gameplay tuning is fixed in `consts`; these only affect presentation and the
//! host loop. Persisted in LocalStorage on web, read from a JSON file on native.

use serde::{Deserialize, Serialize};

/// Line color presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Palette {
    /// White vectors on black
    #[default]
    Classic,
    /// Amber monochrome monitor
    Amber,
    /// Distinct colors per entity kind
    HighContrast,
}

impl Palette {
    pub fn as_str(&self) -> &'static str {
        match self {
            Palette::Classic => "Classic",
            Palette::Amber => "Amber",
            Palette::HighContrast => "HighContrast",
        }
    }

    /// Next palette in the cycle
    pub fn next(&self) -> Self {
        match self {
            Palette::Classic => Palette::Amber,
            Palette::Amber => Palette::HighContrast,
            Palette::HighContrast => Palette::Classic,
        }
    }

    pub fn ship(&self) -> [f32; 4] {
        match self {
            Palette::Classic => [1.0, 1.0, 1.0, 1.0],
            Palette::Amber => [1.0, 0.7, 0.1, 1.0],
            Palette::HighContrast => [0.3, 1.0, 0.4, 1.0],
        }
    }

    pub fn asteroid(&self) -> [f32; 4] {
        match self {
            Palette::Classic => [1.0, 1.0, 1.0, 1.0],
            Palette::Amber => [0.9, 0.6, 0.1, 1.0],
            Palette::HighContrast => [1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn bullet(&self) -> [f32; 4] {
        match self {
            Palette::Classic => [1.0, 1.0, 1.0, 1.0],
            Palette::Amber => [1.0, 0.8, 0.3, 1.0],
            Palette::HighContrast => [1.0, 0.3, 0.2, 1.0],
        }
    }
}

/// Host settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub palette: Palette,
    /// Log frames per second every second
    pub show_fps: bool,
    /// Release all held keys when the window loses focus
    pub release_keys_on_blur: bool,
    /// Frames the headless native loop runs before exiting
    pub demo_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            palette: Palette::Classic,
            show_fps: false,
            release_keys_on_blur: true,
            demo_frames: 60 * 60,
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "asteroids_demo_settings";

    /// Environment variable naming a settings file (native only)
    pub const PATH_ENV: &'static str = "ASTEROIDS_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `ASTEROIDS_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var(Self::PATH_ENV) {
            Ok(path) => Self::load_from_path(std::path::Path::new(&path)),
            Err(_) => Self::default(),
        }
    }

    /// Read settings from a JSON file, falling back to defaults if the file is
    /// missing or malformed
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
