//! Game settings and preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SMOOTHING;
use crate::tuning::{Difficulty, Tuning};

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Difficulty preset
    pub difficulty: Difficulty,
    /// Pose smoothing factor in (0, 1]; lower = steadier, laggier
    pub smoothing: f32,
    /// Show the performance readout (fps/confidence/latency)
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Standard,
            smoothing: DEFAULT_SMOOTHING,
            show_fps: true,
        }
    }
}

impl Settings {
    /// Resolve the session tuning: preset values plus the user's smoothing
    pub fn tuning(&self) -> Tuning {
        let mut tuning = self.difficulty.tuning();
        tuning.smoothing = self.smoothing.clamp(0.05, 1.0);
        tuning
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "flap_fit_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
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
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
