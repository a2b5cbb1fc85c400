use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{ClothingItem, Wardrobe};
use crate::services::weather::{OpenWeatherProvider, WeatherProvider};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
    /// Resolves locations for weather outfits; `None` disables location lookups
    pub weather: Option<Arc<dyn WeatherProvider>>,
    /// Random source for outfit sampling
    pub rng: Arc<Mutex<StdRng>>,
}

/// Inner state that can be modified
pub struct AppStateInner {
    pub items: HashMap<Uuid, ClothingItem>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Empty wardrobe, entropy-seeded sampling, no weather provider
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner {
                items: HashMap::new(),
            })),
            weather: None,
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut state = Self::new();

        if let Some(seed) = config.outfit_rng_seed {
            state = state.with_rng_seed(seed);
        }

        match &config.openweather_api_key {
            Some(api_key) => {
                state = state.with_weather_provider(Arc::new(OpenWeatherProvider::new(
                    api_key.clone(),
                    config.openweather_api_url.clone(),
                )));
            }
            None => tracing::warn!("OPENWEATHER_API_KEY not set, location weather lookups disabled"),
        }

        state
    }

    pub fn with_weather_provider(mut self, provider: Arc<dyn WeatherProvider>) -> Self {
        tracing::info!(provider = provider.name(), "Weather provider configured");
        self.weather = Some(provider);
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = Arc::new(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    /// Snapshot of the stored items as a validated wardrobe.
    ///
    /// Items are ordered by creation time so a seeded random source yields
    /// repeatable outfits.
    pub async fn wardrobe(&self) -> AppResult<Wardrobe> {
        let inner = self.inner.read().await;
        let mut items: Vec<ClothingItem> = inner.items.values().cloned().collect();
        drop(inner);

        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Wardrobe::from_items(items).map_err(AppError::from)
    }

    /// Runs `f` with exclusive access to the random source
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> AppResult<T> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AppError::Internal("Random source lock poisoned".to_string()))?;
        Ok(f(&mut *rng))
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::models::Category;

    #[tokio::test]
    async fn test_wardrobe_snapshot_skips_unavailable() {
        let state = AppState::new();
        {
            let mut inner = state.inner.write().await;
            for item in [
                ClothingItem::top(),
                ClothingItem::shoes(),
                ClothingItem::bottom().with_unavailable(true),
            ] {
                inner.items.insert(item.id, item);
            }
        }

        let wardrobe = assert_ok!(state.wardrobe().await);
        assert_eq!(wardrobe.tops.len(), 1);
        assert_eq!(wardrobe.shoes.len(), 1);
        assert!(wardrobe.bottoms.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_item_surfaces_as_error() {
        let state = AppState::new();
        let mut item = ClothingItem::new(Category::Shoes);
        item.colors = Some(Vec::new());
        state.inner.write().await.items.insert(item.id, item);

        let err = assert_err!(state.wardrobe().await);
        assert_eq!(err.reason(), "malformed_item");
    }

    #[test]
    fn test_seeded_rng_is_repeatable() {
        use rand::Rng;

        let a = AppState::new().with_rng_seed(42);
        let b = AppState::new().with_rng_seed(42);
        let x: u64 = a.with_rng(|rng| rng.gen()).unwrap();
        let y: u64 = b.with_rng(|rng| rng.gen()).unwrap();
        assert_eq!(x, y);
    }

    #[test]
    fn test_from_config_without_key_has_no_provider() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        let state = AppState::from_config(&config);
        assert!(state.weather.is_none());
    }
}
