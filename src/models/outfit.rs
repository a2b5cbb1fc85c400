use serde::{Deserialize, Serialize};

use super::ClothingItem;
use crate::services::weather::{OutfitGuidance, ResolvedWeather};

/// A generated outfit. `bottom` is `None` exactly when `top` is a complete top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outfit {
    pub top: ClothingItem,
    pub bottom: Option<ClothingItem>,
    pub shoes: ClothingItem,
}

/// Response body for the outfit endpoints
#[derive(Debug, Serialize)]
pub struct OutfitResponse {
    pub outfit: Outfit,
    /// Generation mode that produced the outfit
    pub mode: &'static str,
    /// Weather the outfit was generated for, when resolved from a provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<ResolvedWeather>,
    /// Dressing guidance for weather-driven requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<OutfitGuidance>,
}
