//! Best-score persistence port
//!
//! The ledger itself never touches storage; the host injects a
//! `ScoreStore` (one integer in, one integer out), loads it at session
//! start, and writes it when a run ends on a new record. Keeping the port
//! at this seam leaves the simulation fully testable.

/// Read/write access to the single persisted best score
pub trait ScoreStore {
    /// Best score from a previous session, if any
    fn load(&self) -> Option<u32>;
    /// Persist a new best score
    fn save(&self, score: u32);
}

/// LocalStorage-backed store on wasm; a no-op shell elsewhere
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalScoreStore;

impl LocalScoreStore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flap_fit_best_score";
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalScoreStore {
    fn load(&self) -> Option<u32> {
        let storage = web_sys::window()?.local_storage().ok()??;
        let raw = storage.get_item(Self::STORAGE_KEY).ok()??;
        match raw.parse() {
            Ok(best) => {
                log::info!("Loaded best score: {}", best);
                Some(best)
            }
            Err(_) => {
                log::warn!("Ignoring corrupt best score entry: {:?}", raw);
                None
            }
        }
    }

    fn save(&self, score: u32) {
        if let Some(storage) = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
        {
            let _ = storage.set_item(Self::STORAGE_KEY, &score.to_string());
            log::info!("Best score saved: {}", score);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for LocalScoreStore {
    fn load(&self) -> Option<u32> {
        None
    }

    fn save(&self, _score: u32) {
        // No-op for native
    }
}

/// In-memory store for native runs and tests
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    best: std::cell::Cell<Option<u32>>,
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Option<u32> {
        self.best.get()
    }

    fn save(&self, score: u32) {
        self.best.set(Some(score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryScoreStore::default();
        assert_eq!(store.load(), None);
        store.save(12);
        assert_eq!(store.load(), Some(12));
        store.save(30);
        assert_eq!(store.load(), Some(30));
    }
}
