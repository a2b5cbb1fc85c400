use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

use super::{ColorLabel, ColorSample, Rgb};
use crate::services::outfit::OutfitError;

/// Maximum number of color samples kept per item
pub const MAX_COLORS: usize = 3;

/// Maximum number of occasion tags per item
pub const MAX_OCCASIONS: usize = 2;

/// Top-level garment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Top,
    Bottom,
    Shoes,
    Accessory,
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Shoes => "shoes",
            Category::Accessory => "accessory",
        };
        write!(f, "{}", name)
    }
}

/// Category refinement. Tops are standard or complete (dresses, jumpsuits),
/// accessories use the remaining kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subcategory {
    Standard,
    Complete,
    Jewelry,
    Winter,
    Bags,
    Headwear,
    Other,
}

impl Subcategory {
    fn is_valid_for(&self, category: Category) -> bool {
        match category {
            Category::Top => matches!(self, Subcategory::Standard | Subcategory::Complete),
            Category::Accessory => matches!(
                self,
                Subcategory::Jewelry
                    | Subcategory::Winter
                    | Subcategory::Bags
                    | Subcategory::Headwear
                    | Subcategory::Other
            ),
            Category::Bottom | Category::Shoes => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occasion {
    #[serde(rename = "casual")]
    Casual,
    #[serde(rename = "work/professional")]
    Work,
    #[serde(rename = "formal")]
    Formal,
    #[serde(rename = "athletic/sport")]
    Athletic,
    #[serde(rename = "lounge/sleepwear")]
    Lounge,
}

impl Display for Occasion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Occasion::Casual => "casual",
            Occasion::Work => "work/professional",
            Occasion::Formal => "formal",
            Occasion::Athletic => "athletic/sport",
            Occasion::Lounge => "lounge/sleepwear",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Rain,
    Snow,
}

impl WeatherCondition {
    /// Conditions where weatherproof gear is preferred
    pub fn is_wet(&self) -> bool {
        matches!(self, WeatherCondition::Rain | WeatherCondition::Snow)
    }
}

impl Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WeatherCondition::Sunny => "sunny",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::Rain => "rain",
            WeatherCondition::Snow => "snow",
        };
        write!(f, "{}", name)
    }
}

/// Temperature band an item is suited for, ordered coldest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureRange {
    Cold,
    Cool,
    Warm,
    Hot,
}

impl TemperatureRange {
    /// Bands: cold <= 39°F, cool 40-59°F, warm 60-79°F, hot >= 80°F
    pub fn from_fahrenheit(temperature: i32) -> Self {
        if temperature <= 39 {
            TemperatureRange::Cold
        } else if temperature <= 59 {
            TemperatureRange::Cool
        } else if temperature <= 79 {
            TemperatureRange::Warm
        } else {
            TemperatureRange::Hot
        }
    }

    /// Neighbouring bands. Hot and cold are never adjacent.
    pub fn adjacent(&self) -> &'static [TemperatureRange] {
        match self {
            TemperatureRange::Cold => &[TemperatureRange::Cool],
            TemperatureRange::Cool => &[TemperatureRange::Cold, TemperatureRange::Warm],
            TemperatureRange::Warm => &[TemperatureRange::Cool, TemperatureRange::Hot],
            TemperatureRange::Hot => &[TemperatureRange::Warm],
        }
    }

    pub fn is_adjacent_to(&self, other: TemperatureRange) -> bool {
        self.adjacent().contains(&other)
    }
}

impl Display for TemperatureRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TemperatureRange::Cold => "cold",
            TemperatureRange::Cool => "cool",
            TemperatureRange::Warm => "warm",
            TemperatureRange::Hot => "hot",
        };
        write!(f, "{}", name)
    }
}

/// A clothing item as tagged by the upload pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub id: Uuid,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<Subcategory>,
    /// Detected colors, most prevalent first. `None` when color extraction
    /// never ran for this item.
    #[serde(default)]
    pub colors: Option<Vec<ColorSample>>,
    #[serde(default)]
    pub occasions: Vec<Occasion>,
    #[serde(default)]
    pub weather_conditions: Vec<WeatherCondition>,
    #[serde(default)]
    pub temperature_range: Vec<TemperatureRange>,
    #[serde(default)]
    pub unavailable: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl ClothingItem {
    /// Creates an untagged item of the given category
    pub fn new(category: Category) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            subcategory: None,
            colors: None,
            occasions: Vec::new(),
            weather_conditions: Vec::new(),
            temperature_range: Vec::new(),
            unavailable: false,
            created_at: Utc::now(),
        }
    }

    /// Standard (non-complete) top
    pub fn top() -> Self {
        Self::new(Category::Top).with_subcategory(Subcategory::Standard)
    }

    /// Dress, jumpsuit or romper
    pub fn complete_top() -> Self {
        Self::new(Category::Top).with_subcategory(Subcategory::Complete)
    }

    pub fn bottom() -> Self {
        Self::new(Category::Bottom)
    }

    pub fn shoes() -> Self {
        Self::new(Category::Shoes)
    }

    pub fn with_subcategory(mut self, subcategory: Subcategory) -> Self {
        self.subcategory = Some(subcategory);
        self
    }

    /// Sets colors from RGB triples listed most prevalent first
    pub fn with_rgb_colors(mut self, colors: &[(u8, u8, u8)]) -> Self {
        let count = colors.len().max(1) as f64;
        let samples = colors
            .iter()
            .enumerate()
            .map(|(rank, rgb)| {
                let share = (count - rank as f64) / (count * (count + 1.0) / 2.0);
                ColorSample::new(Rgb::from(*rgb), share, share)
            })
            .collect();
        self.colors = Some(samples);
        self
    }

    /// Sets colors from already classified samples, kept in the given order.
    /// [`validate`](Self::validate) rejects samples not ordered by descending score.
    pub fn with_colors(mut self, colors: Vec<ColorSample>) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn with_occasions(mut self, occasions: &[Occasion]) -> Self {
        self.occasions = dedup(occasions);
        self
    }

    pub fn with_weather_conditions(mut self, conditions: &[WeatherCondition]) -> Self {
        self.weather_conditions = dedup(conditions);
        self
    }

    pub fn with_temperature_range(mut self, ranges: &[TemperatureRange]) -> Self {
        self.temperature_range = dedup(ranges);
        self
    }

    pub fn with_unavailable(mut self, unavailable: bool) -> Self {
        self.unavailable = unavailable;
        self
    }

    /// Color labels in prevalence order; empty when the item has no colors
    pub fn color_labels(&self) -> Vec<ColorLabel> {
        self.colors
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|sample| sample.name)
            .collect()
    }

    /// True for dresses, jumpsuits and other tops that need no bottom
    pub fn is_complete_top(&self) -> bool {
        self.category == Category::Top && self.subcategory == Some(Subcategory::Complete)
    }

    /// Checks the record against the data-model invariants
    pub fn validate(&self) -> Result<(), OutfitError> {
        let malformed = |reason: String| OutfitError::MalformedItem {
            id: self.id,
            reason,
        };

        if let Some(subcategory) = self.subcategory {
            if !subcategory.is_valid_for(self.category) {
                return Err(malformed(format!(
                    "subcategory {:?} is not valid for category {}",
                    subcategory, self.category
                )));
            }
        }

        if let Some(colors) = &self.colors {
            if colors.is_empty() {
                return Err(malformed("colors present but empty".to_string()));
            }
            if colors.len() > MAX_COLORS {
                return Err(malformed(format!(
                    "{} colors exceeds the maximum of {}",
                    colors.len(),
                    MAX_COLORS
                )));
            }
            for sample in colors {
                if !(0.0..=1.0).contains(&sample.score)
                    || !(0.0..=1.0).contains(&sample.pixel_fraction)
                {
                    return Err(malformed(format!(
                        "color {:?} has score/pixel fraction outside [0, 1]",
                        sample.rgb
                    )));
                }
            }
            if colors.windows(2).any(|pair| pair[0].score < pair[1].score) {
                return Err(malformed(
                    "colors are not ordered by descending score".to_string(),
                ));
            }
        }

        if self.occasions.len() > MAX_OCCASIONS {
            return Err(malformed(format!(
                "{} occasion tags exceeds the maximum of {}",
                self.occasions.len(),
                MAX_OCCASIONS
            )));
        }

        Ok(())
    }
}

fn dedup<T: Copy + PartialEq>(values: &[T]) -> Vec<T> {
    let mut unique = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(value) {
            unique.push(*value);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Wardrobe;

    #[test]
    fn test_temperature_bands() {
        assert_eq!(TemperatureRange::from_fahrenheit(-5), TemperatureRange::Cold);
        assert_eq!(TemperatureRange::from_fahrenheit(39), TemperatureRange::Cold);
        assert_eq!(TemperatureRange::from_fahrenheit(40), TemperatureRange::Cool);
        assert_eq!(TemperatureRange::from_fahrenheit(59), TemperatureRange::Cool);
        assert_eq!(TemperatureRange::from_fahrenheit(60), TemperatureRange::Warm);
        assert_eq!(TemperatureRange::from_fahrenheit(79), TemperatureRange::Warm);
        assert_eq!(TemperatureRange::from_fahrenheit(80), TemperatureRange::Hot);
    }

    #[test]
    fn test_hot_and_cold_are_not_adjacent() {
        assert!(!TemperatureRange::Hot.is_adjacent_to(TemperatureRange::Cold));
        assert!(!TemperatureRange::Cold.is_adjacent_to(TemperatureRange::Hot));
        assert!(TemperatureRange::Cold.is_adjacent_to(TemperatureRange::Cool));
        assert!(TemperatureRange::Warm.is_adjacent_to(TemperatureRange::Hot));
    }

    #[test]
    fn test_occasion_serialization() {
        let json = serde_json::to_string(&Occasion::Work).unwrap();
        assert_eq!(json, "\"work/professional\"");

        let parsed: Occasion = serde_json::from_str("\"lounge/sleepwear\"").unwrap();
        assert_eq!(parsed, Occasion::Lounge);
    }

    #[test]
    fn test_item_deserialization_defaults() {
        let json = r#"{
            "id": "6f1c9a52-8d7e-4b8a-9b8e-0d6c7f3f2a11",
            "category": "bottom",
            "colors": [{"rgb": [10, 10, 120], "score": 0.8, "pixel_fraction": 0.6}]
        }"#;

        let item: ClothingItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.category, Category::Bottom);
        assert_eq!(item.subcategory, None);
        assert_eq!(item.color_labels(), vec![ColorLabel::Navy]);
        assert!(item.occasions.is_empty());
        assert!(!item.unavailable);
    }

    #[test]
    fn test_builder_dedups_tags() {
        let item = ClothingItem::top().with_occasions(&[Occasion::Casual, Occasion::Casual]);
        assert_eq!(item.occasions, vec![Occasion::Casual]);
    }

    #[test]
    fn test_with_rgb_colors_keeps_order() {
        let item = ClothingItem::top().with_rgb_colors(&[(200, 30, 30), (245, 245, 245)]);
        assert_eq!(item.color_labels(), vec![ColorLabel::Red, ColorLabel::White]);
        let colors = item.colors.unwrap();
        assert!(colors[0].score > colors[1].score);
    }

    #[test]
    fn test_complete_top() {
        assert!(ClothingItem::complete_top().is_complete_top());
        assert!(!ClothingItem::top().is_complete_top());
        assert!(!ClothingItem::bottom().is_complete_top());
    }

    #[test]
    fn test_validate_accepts_well_formed_item() {
        let item = ClothingItem::top()
            .with_rgb_colors(&[(200, 30, 30)])
            .with_occasions(&[Occasion::Casual, Occasion::Work]);
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_colors() {
        let mut item = ClothingItem::bottom();
        item.colors = Some(Vec::new());
        assert!(matches!(
            item.validate(),
            Err(OutfitError::MalformedItem { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_wrong_subcategory() {
        let item = ClothingItem::shoes().with_subcategory(Subcategory::Complete);
        assert!(matches!(
            item.validate(),
            Err(OutfitError::MalformedItem { .. })
        ));

        let item = ClothingItem::new(Category::Accessory).with_subcategory(Subcategory::Standard);
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_too_many_colors() {
        let item = ClothingItem::top().with_rgb_colors(&[
            (200, 30, 30),
            (245, 245, 245),
            (20, 20, 20),
            (10, 10, 120),
        ]);
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_score() {
        let item = ClothingItem::top().with_colors(vec![ColorSample::new((20, 20, 20), 1.5, 0.2)]);
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unordered_colors() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "category": "bottom",
            "colors": [
                {"rgb": [200, 30, 30], "score": 0.1, "pixel_fraction": 0.1},
                {"rgb": [20, 20, 20], "score": 0.9, "pixel_fraction": 0.8}
            ]
        }"#;
        let item: ClothingItem = serde_json::from_str(json).unwrap();

        let err = item.validate().unwrap_err();
        assert_eq!(err.reason_code(), "malformed_item");
        assert!(Wardrobe::from_items(vec![item]).is_err());
    }

    #[test]
    fn test_with_colors_keeps_given_order() {
        let item = ClothingItem::bottom().with_colors(vec![
            ColorSample::new((20, 20, 20), 0.9, 0.8),
            ColorSample::new((200, 30, 30), 0.9, 0.1),
            ColorSample::new((245, 245, 245), 0.2, 0.1),
        ]);
        assert_eq!(
            item.color_labels(),
            vec![ColorLabel::Black, ColorLabel::Red, ColorLabel::White]
        );
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_three_occasions() {
        let mut item = ClothingItem::top();
        item.occasions = vec![Occasion::Casual, Occasion::Work, Occasion::Formal];
        assert!(item.validate().is_err());
    }
}
