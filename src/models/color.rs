use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::services::color;

/// Discrete color name assigned to a detected color sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorLabel {
    Black,
    White,
    Gray,
    Red,
    Pink,
    Orange,
    Yellow,
    Green,
    Blue,
    Navy,
    Purple,
    Brown,
    Beige,
    Unknown,
}

impl ColorLabel {
    /// Every label, `Unknown` last
    pub const ALL: [ColorLabel; 14] = [
        ColorLabel::Black,
        ColorLabel::White,
        ColorLabel::Gray,
        ColorLabel::Red,
        ColorLabel::Pink,
        ColorLabel::Orange,
        ColorLabel::Yellow,
        ColorLabel::Green,
        ColorLabel::Blue,
        ColorLabel::Navy,
        ColorLabel::Purple,
        ColorLabel::Brown,
        ColorLabel::Beige,
        ColorLabel::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorLabel::Black => "black",
            ColorLabel::White => "white",
            ColorLabel::Gray => "gray",
            ColorLabel::Red => "red",
            ColorLabel::Pink => "pink",
            ColorLabel::Orange => "orange",
            ColorLabel::Yellow => "yellow",
            ColorLabel::Green => "green",
            ColorLabel::Blue => "blue",
            ColorLabel::Navy => "navy",
            ColorLabel::Purple => "purple",
            ColorLabel::Brown => "brown",
            ColorLabel::Beige => "beige",
            ColorLabel::Unknown => "unknown",
        }
    }
}

impl Display for ColorLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColorLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized == "grey" {
            return Ok(ColorLabel::Gray);
        }
        ColorLabel::ALL
            .iter()
            .find(|label| label.as_str() == normalized)
            .copied()
            .ok_or_else(|| format!("Unknown color name: {}", s))
    }
}

/// An RGB triple, serialized as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb(r, g, b)
    }
}

/// One detected color on a clothing photo
///
/// `name` is always derived from `rgb` by the classifier; any name supplied on
/// input is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ColorSampleInput")]
pub struct ColorSample {
    pub name: ColorLabel,
    pub rgb: Rgb,
    /// Relative prevalence used for ranking (0.0 - 1.0)
    pub score: f64,
    /// Share of the image covered by this color (0.0 - 1.0)
    pub pixel_fraction: f64,
}

impl ColorSample {
    pub fn new(rgb: impl Into<Rgb>, score: f64, pixel_fraction: f64) -> Self {
        let rgb = rgb.into();
        Self {
            name: color::classify(rgb),
            rgb,
            score,
            pixel_fraction,
        }
    }
}

/// Wire shape of a color sample as produced by the vision collaborator
#[derive(Debug, Clone, Deserialize)]
pub struct ColorSampleInput {
    pub rgb: Rgb,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub pixel_fraction: f64,
}

impl From<ColorSampleInput> for ColorSample {
    fn from(input: ColorSampleInput) -> Self {
        ColorSample::new(input.rgb, input.score, input.pixel_fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_label_serde() {
        let json = serde_json::to_string(&ColorLabel::Navy).unwrap();
        assert_eq!(json, "\"navy\"");

        let parsed: ColorLabel = serde_json::from_str("\"beige\"").unwrap();
        assert_eq!(parsed, ColorLabel::Beige);
    }

    #[test]
    fn test_color_label_from_str() {
        assert_eq!("Red".parse::<ColorLabel>(), Ok(ColorLabel::Red));
        assert_eq!("grey".parse::<ColorLabel>(), Ok(ColorLabel::Gray));
        assert!("teal".parse::<ColorLabel>().is_err());
    }

    #[test]
    fn test_sample_name_is_derived_from_rgb() {
        // The supplied name is ignored in favour of the classifier output
        let json = r#"{"name": "green", "rgb": [245, 245, 245], "score": 0.7, "pixel_fraction": 0.4}"#;
        let sample: ColorSample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.name, ColorLabel::White);
        assert_eq!(sample.rgb, Rgb(245, 245, 245));
        assert_eq!(sample.score, 0.7);
    }

    #[test]
    fn test_sample_serializes_name() {
        let sample = ColorSample::new((20, 20, 20), 0.9, 0.5);
        let value = serde_json::to_value(&sample).unwrap();
        assert_eq!(value["name"], "black");
        assert_eq!(value["rgb"], serde_json::json!([20, 20, 20]));
    }
}
