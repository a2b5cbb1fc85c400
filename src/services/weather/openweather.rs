/// OpenWeather current-weather provider
///
/// Looks up `/data/2.5/weather` in imperial units. Five-digit numeric
/// locations are treated as US zip codes, anything else as a city name.
use chrono::{DateTime, Utc};
use reqwest::Client as HttpClient;
use serde::Deserialize;

use super::{ResolvedWeather, WeatherProvider};
use crate::{
    error::{AppError, AppResult},
    models::WeatherCondition,
};

#[derive(Clone)]
pub struct OpenWeatherProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    #[serde(default)]
    weather: Vec<WeatherEntry>,
    main: MainReadings,
    #[serde(default)]
    dt: Option<i64>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WeatherEntry {
    id: u32,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    /// Query parameter identifying the location
    fn location_query(location: &str) -> (&'static str, String) {
        let location = location.trim();
        if location.len() == 5 && location.chars().all(|c| c.is_ascii_digit()) {
            ("zip", format!("{},us", location))
        } else {
            ("q", location.to_string())
        }
    }

    fn resolve(location: &str, response: CurrentWeatherResponse) -> ResolvedWeather {
        let code = response.weather.first().map(|entry| entry.id);
        let condition = match code.and_then(WeatherCondition::from_openweather_code) {
            Some(condition) => condition,
            None => {
                tracing::warn!(code = ?code, "Unrecognised OpenWeather condition, assuming cloudy");
                WeatherCondition::Cloudy
            }
        };

        let observed_at = response
            .dt
            .and_then(|timestamp| DateTime::<Utc>::from_timestamp(timestamp, 0))
            .unwrap_or_else(Utc::now);

        ResolvedWeather {
            location: response.name.unwrap_or_else(|| location.to_string()),
            temperature_f: response.main.temp.round() as i32,
            condition,
            observed_at,
        }
    }
}

#[async_trait::async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, location: &str) -> AppResult<ResolvedWeather> {
        if location.trim().is_empty() {
            return Err(AppError::InvalidInput("Location must not be empty".to_string()));
        }

        let url = format!("{}/data/2.5/weather", self.api_url);
        let (key, value) = Self::location_query(location);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                (key, value.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "imperial"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OpenWeather API returned status {}: {}",
                status, body
            )));
        }

        let body: CurrentWeatherResponse = response.json().await?;
        let weather = Self::resolve(location, body);

        tracing::info!(
            location = %weather.location,
            temperature_f = weather.temperature_f,
            condition = %weather.condition,
            "Resolved current weather"
        );

        Ok(weather)
    }

    fn name(&self) -> &'static str {
        "openweather"
    }
}
