//! Stateless checks over item records.

use crate::models::{ClothingItem, ColorLabel};
use crate::services::color::{is_complementary, is_neutral, matching_colors};

/// True when the item carries `label`, or any of its colors lists `label`
/// as a match
pub fn has_color(item: &ClothingItem, label: ColorLabel) -> bool {
    item.color_labels()
        .into_iter()
        .any(|own| own == label || matching_colors(own).contains(&label))
}

/// Exact label check without the affinity table
pub fn has_exact_color(item: &ClothingItem, label: ColorLabel) -> bool {
    item.color_labels().contains(&label)
}

/// True only when every color on the item is neutral. Items without color
/// data are not neutral.
pub fn is_item_neutral(item: &ClothingItem) -> bool {
    let labels = item.color_labels();
    !labels.is_empty() && labels.into_iter().all(is_neutral)
}

pub fn dominant_color(item: &ClothingItem) -> Option<ColorLabel> {
    item.colors
        .as_ref()
        .and_then(|colors| colors.first())
        .map(|sample| sample.name)
}

/// Untagged items never share an occasion
pub fn shares_occasion(a: &ClothingItem, b: &ClothingItem) -> bool {
    a.occasions.iter().any(|occasion| b.occasions.contains(occasion))
}

pub fn shares_temperature_range(a: &ClothingItem, b: &ClothingItem) -> bool {
    a.temperature_range
        .iter()
        .any(|range| b.temperature_range.contains(range))
}

/// Whether a bottom of `bottom` color works under a top of `top` color.
/// Unknown colors on either side are permissive.
pub fn is_color_suitable(top: Option<ColorLabel>, bottom: Option<ColorLabel>) -> bool {
    match (top, bottom) {
        (Some(top), Some(bottom)) => {
            top == bottom || is_neutral(bottom) || is_complementary(top, bottom)
        }
        _ => true,
    }
}
