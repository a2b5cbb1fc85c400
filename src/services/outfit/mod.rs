//! Outfit recommendation engine.
//!
//! Pure, synchronous computation over an in-memory [`Wardrobe`]. The only
//! external input besides the wardrobe is a caller-supplied random source.
//!
//! [`Wardrobe`]: crate::models::Wardrobe

pub mod filters;
pub mod predicates;
pub mod sampling;
pub mod scoring;
mod selector;

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Category, ColorLabel, Occasion, WeatherCondition};

pub use selector::OutfitGenerator;

/// Why no outfit could be produced
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OutfitError {
    /// A structurally required category has no items
    #[error("Not enough items in the wardrobe: no {category} available")]
    InsufficientWardrobe { category: Category },

    /// Items exist but none satisfy the requested constraint
    #[error("No items match the requested {constraint}")]
    NoConstraintMatch { constraint: String },

    /// Item record violates the data model; a defect upstream, not a matching outcome
    #[error("Malformed item {id}: {reason}")]
    MalformedItem { id: Uuid, reason: String },
}

impl OutfitError {
    /// Stable machine-readable code for API clients
    pub fn reason_code(&self) -> &'static str {
        match self {
            OutfitError::InsufficientWardrobe { .. } => "insufficient_wardrobe",
            OutfitError::NoConstraintMatch { .. } => "no_constraint_match",
            OutfitError::MalformedItem { .. } => "malformed_item",
        }
    }

    pub(crate) fn insufficient(category: Category) -> Self {
        OutfitError::InsufficientWardrobe { category }
    }

    pub(crate) fn no_match(constraint: impl Into<String>) -> Self {
        OutfitError::NoConstraintMatch {
            constraint: constraint.into(),
        }
    }
}

/// What the outfit should be built around
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum OutfitRequest {
    /// Any top as anchor, base color derived from its dominant color
    Random,
    /// Anchor on a top carrying `base_color`; `None` behaves like `Random`
    Color { base_color: Option<ColorLabel> },
    Occasion { occasion: Occasion },
    Weather {
        temperature_f: i32,
        condition: WeatherCondition,
    },
}

impl OutfitRequest {
    pub fn mode(&self) -> &'static str {
        match self {
            OutfitRequest::Random => "random",
            OutfitRequest::Color { .. } => "color",
            OutfitRequest::Occasion { .. } => "occasion",
            OutfitRequest::Weather { .. } => "weather",
        }
    }
}
