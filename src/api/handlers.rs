use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    Category, ClothingItem, ColorLabel, ColorSample, Occasion, Outfit, OutfitResponse, Rgb,
    Subcategory, TemperatureRange, WeatherCondition,
};
use crate::services::color;
use crate::services::outfit::{OutfitGenerator, OutfitRequest};
use crate::services::weather::{OutfitGuidance, ResolvedWeather};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct ListItemsQuery {
    pub category: Option<Category>,
}

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub category: Category,
    pub subcategory: Option<Subcategory>,
    /// Color names are always derived from `rgb`
    pub colors: Option<Vec<ColorSample>>,
    #[serde(default)]
    pub occasions: Vec<Occasion>,
    #[serde(default)]
    pub weather_conditions: Vec<WeatherCondition>,
    #[serde(default)]
    pub temperature_range: Vec<TemperatureRange>,
    #[serde(default)]
    pub unavailable: bool,
}

impl CreateItemRequest {
    fn into_item(self) -> ClothingItem {
        let mut item = ClothingItem::new(self.category)
            .with_occasions(&self.occasions)
            .with_weather_conditions(&self.weather_conditions)
            .with_temperature_range(&self.temperature_range)
            .with_unavailable(self.unavailable);

        item.subcategory = self.subcategory;
        if let Some(colors) = self.colors {
            item = item.with_colors(colors);
        }
        item
    }
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub unavailable: bool,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyColorRequest {
    pub rgb: Rgb,
}

#[derive(Debug, Serialize)]
pub struct ClassifyColorResponse {
    pub rgb: Rgb,
    pub name: ColorLabel,
    /// Classifier rule that produced `name`; absent for `unknown`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct ColorOutfitRequest {
    /// A color name, or `"random"`/`null` to let the anchor top decide
    #[serde(default)]
    pub base_color: Option<String>,
}

impl ColorOutfitRequest {
    fn base_color(&self) -> AppResult<Option<ColorLabel>> {
        match self.base_color.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(name) if name.eq_ignore_ascii_case("random") => Ok(None),
            Some(name) => name.parse().map(Some).map_err(AppError::InvalidInput),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OccasionOutfitRequest {
    pub occasion: Occasion,
}

/// Either explicit conditions or a location for the weather provider
#[derive(Debug, Deserialize)]
pub struct WeatherOutfitRequest {
    pub temperature_f: Option<i32>,
    pub condition: Option<WeatherCondition>,
    pub location: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// List wardrobe items, oldest first
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ListItemsQuery>,
) -> Json<Vec<ClothingItem>> {
    let inner = state.inner.read().await;
    let mut items: Vec<ClothingItem> = inner
        .items
        .values()
        .filter(|item| query.category.map_or(true, |category| item.category == category))
        .cloned()
        .collect();
    items.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Json(items)
}

/// Add an item to the wardrobe
pub async fn create_item(
    State(state): State<AppState>,
    Json(request): Json<CreateItemRequest>,
) -> AppResult<(StatusCode, Json<ClothingItem>)> {
    let item = request.into_item();
    item.validate()
        .map_err(|err| AppError::InvalidInput(err.to_string()))?;

    tracing::info!(
        item_id = %item.id,
        category = %item.category,
        colors = ?item.color_labels(),
        "Created wardrobe item"
    );

    let mut inner = state.inner.write().await;
    inner.items.insert(item.id, item.clone());

    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ClothingItem>> {
    let inner = state.inner.read().await;
    inner
        .items
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let mut inner = state.inner.write().await;
    match inner.items.remove(&id) {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(AppError::NotFound(format!("Item {} not found", id))),
    }
}

/// Mark an item as in the laundry / lent out, or back in rotation
pub async fn set_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AvailabilityRequest>,
) -> AppResult<Json<ClothingItem>> {
    let mut inner = state.inner.write().await;
    let item = inner
        .items
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))?;

    item.unavailable = request.unavailable;
    Ok(Json(item.clone()))
}

pub async fn classify_color(Json(request): Json<ClassifyColorRequest>) -> Json<ClassifyColorResponse> {
    Json(ClassifyColorResponse {
        rgb: request.rgb,
        name: color::classify(request.rgb),
        rule: color::matching_rule(request.rgb),
    })
}

pub async fn random_outfit(State(state): State<AppState>) -> AppResult<Json<OutfitResponse>> {
    let request = OutfitRequest::Random;
    let outfit = generate(&state, &request).await?;
    Ok(Json(respond(outfit, &request, None, None)))
}

pub async fn color_outfit(
    State(state): State<AppState>,
    Json(body): Json<ColorOutfitRequest>,
) -> AppResult<Json<OutfitResponse>> {
    let request = OutfitRequest::Color {
        base_color: body.base_color()?,
    };
    let outfit = generate(&state, &request).await?;
    Ok(Json(respond(outfit, &request, None, None)))
}

pub async fn occasion_outfit(
    State(state): State<AppState>,
    Json(body): Json<OccasionOutfitRequest>,
) -> AppResult<Json<OutfitResponse>> {
    let request = OutfitRequest::Occasion {
        occasion: body.occasion,
    };
    let outfit = generate(&state, &request).await?;
    Ok(Json(respond(outfit, &request, None, None)))
}

/// Outfit for explicit conditions, or for the current weather at a location
pub async fn weather_outfit(
    State(state): State<AppState>,
    Json(body): Json<WeatherOutfitRequest>,
) -> AppResult<Json<OutfitResponse>> {
    let (temperature_f, condition, resolved) = match body {
        WeatherOutfitRequest {
            temperature_f: Some(temperature_f),
            condition: Some(condition),
            ..
        } => (temperature_f, condition, None),
        WeatherOutfitRequest {
            location: Some(location),
            ..
        } => {
            let weather = resolve_weather(&state, &location).await?;
            (weather.temperature_f, weather.condition, Some(weather))
        }
        _ => {
            return Err(AppError::InvalidInput(
                "Provide either temperature_f and condition, or a location".to_string(),
            ))
        }
    };

    let request = OutfitRequest::Weather {
        temperature_f,
        condition,
    };
    let outfit = generate(&state, &request).await?;
    let guidance = OutfitGuidance::for_weather(temperature_f, condition);

    Ok(Json(respond(outfit, &request, resolved, Some(guidance))))
}

async fn resolve_weather(state: &AppState, location: &str) -> AppResult<ResolvedWeather> {
    let provider = state.weather.as_ref().ok_or_else(|| {
        AppError::InvalidInput("Weather lookup by location is not configured".to_string())
    })?;
    provider.current_weather(location).await
}

async fn generate(state: &AppState, request: &OutfitRequest) -> AppResult<Outfit> {
    let wardrobe = state.wardrobe().await?;
    tracing::debug!(mode = request.mode(), items = wardrobe.len(), "Generating outfit");
    let generator = OutfitGenerator::new(&wardrobe);
    let outfit = state.with_rng(|rng| generator.generate(request, rng))??;
    Ok(outfit)
}

fn respond(
    outfit: Outfit,
    request: &OutfitRequest,
    weather: Option<ResolvedWeather>,
    guidance: Option<OutfitGuidance>,
) -> OutfitResponse {
    OutfitResponse {
        outfit,
        mode: request.mode(),
        weather,
        guidance,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::services::weather::MockWeatherProvider;

    async fn seeded_state() -> AppState {
        let state = AppState::new().with_rng_seed(7);
        {
            let mut inner = state.inner.write().await;
            for item in [
                ClothingItem::top().with_rgb_colors(&[(200, 30, 30)]),
                ClothingItem::bottom().with_rgb_colors(&[(20, 20, 20)]),
                ClothingItem::shoes().with_rgb_colors(&[(20, 20, 20)]),
            ] {
                inner.items.insert(item.id, item);
            }
        }
        state
    }

    #[test]
    fn test_color_request_parsing() {
        let parse = |value: Option<&str>| {
            ColorOutfitRequest {
                base_color: value.map(str::to_string),
            }
            .base_color()
        };
        assert_eq!(parse(None).unwrap(), None);
        assert_eq!(parse(Some("random")).unwrap(), None);
        assert_eq!(parse(Some("Grey")).unwrap(), Some(ColorLabel::Gray));
        assert!(matches!(parse(Some("mauve")), Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_weather_outfit_by_location_uses_provider() {
        let mut provider = MockWeatherProvider::new();
        provider.expect_current_weather().times(1).returning(|location| {
            Ok(ResolvedWeather {
                location: location.to_string(),
                temperature_f: 30,
                condition: WeatherCondition::Snow,
                observed_at: Utc::now(),
            })
        });
        provider.expect_name().return_const("mock");

        let state = seeded_state()
            .await
            .with_weather_provider(Arc::new(provider));

        let Json(response) = weather_outfit(
            State(state),
            Json(WeatherOutfitRequest {
                temperature_f: None,
                condition: None,
                location: Some("Chicago".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.mode, "weather");
        let weather = response.weather.unwrap();
        assert_eq!(weather.location, "Chicago");
        let guidance = response.guidance.unwrap();
        assert_eq!(guidance.temperature_range, TemperatureRange::Cold);
        assert_eq!(guidance.layers, 3);
    }

    #[tokio::test]
    async fn test_weather_outfit_location_without_provider() {
        let state = seeded_state().await;
        let err = weather_outfit(
            State(state),
            Json(WeatherOutfitRequest {
                temperature_f: None,
                condition: None,
                location: Some("Chicago".to_string()),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_color_outfit_exact_match() {
        let state = seeded_state().await;
        let Json(response) = color_outfit(
            State(state),
            Json(ColorOutfitRequest {
                base_color: Some("red".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.mode, "color");
        assert_eq!(response.outfit.top.color_labels(), vec![ColorLabel::Red]);
        assert!(response.outfit.bottom.is_some());
        assert!(response.guidance.is_none());
    }
}
