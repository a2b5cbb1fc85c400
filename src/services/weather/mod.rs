//! Weather resolution.
//!
//! The outfit engine only consumes a temperature and a condition; this module
//! turns a location into those via a [`WeatherProvider`] and derives dressing
//! guidance from them.

mod openweather;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::{TemperatureRange, WeatherCondition};

pub use openweather::OpenWeatherProvider;

/// Current weather for a location, already reduced to what outfit
/// generation needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedWeather {
    pub location: String,
    /// Rounded to the nearest degree
    pub temperature_f: i32,
    pub condition: WeatherCondition,
    pub observed_at: DateTime<Utc>,
}

impl WeatherCondition {
    /// Maps an OpenWeather condition id. Thunderstorms and drizzle count as
    /// rain, atmosphere codes (mist, fog) as cloudy.
    pub fn from_openweather_code(code: u32) -> Option<Self> {
        match code {
            200..=599 => Some(WeatherCondition::Rain),
            600..=699 => Some(WeatherCondition::Snow),
            700..=799 => Some(WeatherCondition::Cloudy),
            800 => Some(WeatherCondition::Sunny),
            801..=899 => Some(WeatherCondition::Cloudy),
            _ => None,
        }
    }
}

/// What to wear for the weather, independent of the wardrobe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutfitGuidance {
    pub temperature_range: TemperatureRange,
    pub layers: u8,
    pub characteristics: Vec<&'static str>,
}

impl OutfitGuidance {
    pub fn for_weather(temperature_f: i32, condition: WeatherCondition) -> Self {
        let temperature_range = TemperatureRange::from_fahrenheit(temperature_f);

        let (layers, mut characteristics) = match temperature_range {
            TemperatureRange::Cold => (3, vec!["warm", "insulated", "layered"]),
            TemperatureRange::Cool => (2, vec!["warm", "light layered"]),
            TemperatureRange::Warm => (1, vec!["comfortable", "breathable"]),
            TemperatureRange::Hot => (1, vec!["light", "breathable", "loose"]),
        };

        match condition {
            WeatherCondition::Rain => characteristics.extend(["waterproof", "rain-appropriate"]),
            WeatherCondition::Snow => {
                characteristics.extend(["snow-appropriate", "waterproof", "insulated"])
            }
            WeatherCondition::Sunny if temperature_f >= 80 => {
                characteristics.extend(["sun-protective", "light-colored"])
            }
            WeatherCondition::Cloudy if temperature_f <= 59 => characteristics.push("windproof"),
            _ => {}
        }

        Self {
            temperature_range,
            layers,
            characteristics,
        }
    }
}

/// Source of current weather conditions
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current weather for a city name or US zip code
    async fn current_weather(&self, location: &str) -> AppResult<ResolvedWeather>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_codes() {
        assert_eq!(
            WeatherCondition::from_openweather_code(211),
            Some(WeatherCondition::Rain)
        );
        assert_eq!(
            WeatherCondition::from_openweather_code(310),
            Some(WeatherCondition::Rain)
        );
        assert_eq!(
            WeatherCondition::from_openweather_code(601),
            Some(WeatherCondition::Snow)
        );
        assert_eq!(
            WeatherCondition::from_openweather_code(741),
            Some(WeatherCondition::Cloudy)
        );
        assert_eq!(
            WeatherCondition::from_openweather_code(800),
            Some(WeatherCondition::Sunny)
        );
        assert_eq!(
            WeatherCondition::from_openweather_code(804),
            Some(WeatherCondition::Cloudy)
        );
        assert_eq!(WeatherCondition::from_openweather_code(100), None);
        assert_eq!(WeatherCondition::from_openweather_code(950), None);
    }

    #[test]
    fn test_guidance_cold_snow() {
        let guidance = OutfitGuidance::for_weather(25, WeatherCondition::Snow);
        assert_eq!(guidance.temperature_range, TemperatureRange::Cold);
        assert_eq!(guidance.layers, 3);
        assert_eq!(
            guidance.characteristics,
            vec![
                "warm",
                "insulated",
                "layered",
                "snow-appropriate",
                "waterproof",
                "insulated"
            ]
        );
    }

    #[test]
    fn test_guidance_condition_thresholds() {
        let hot_sun = OutfitGuidance::for_weather(85, WeatherCondition::Sunny);
        assert!(hot_sun.characteristics.contains(&"sun-protective"));

        let warm_sun = OutfitGuidance::for_weather(75, WeatherCondition::Sunny);
        assert!(!warm_sun.characteristics.contains(&"sun-protective"));

        let cool_clouds = OutfitGuidance::for_weather(50, WeatherCondition::Cloudy);
        assert_eq!(cool_clouds.layers, 2);
        assert!(cool_clouds.characteristics.contains(&"windproof"));

        let warm_clouds = OutfitGuidance::for_weather(65, WeatherCondition::Cloudy);
        assert!(!warm_clouds.characteristics.contains(&"windproof"));
    }

    #[tokio::test]
    async fn test_mock_provider() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_current_weather()
            .times(1)
            .returning(|location| {
                Ok(ResolvedWeather {
                    location: location.to_string(),
                    temperature_f: 38,
                    condition: WeatherCondition::Snow,
                    observed_at: Utc::now(),
                })
            });

        let weather = provider.current_weather("10001").await.unwrap();
        assert_eq!(weather.location, "10001");
        assert_eq!(weather.temperature_f, 38);
    }
}
