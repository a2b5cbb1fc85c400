//! Candidate filter stages.
//!
//! Every stage preserves input order and never returns an empty list for a
//! non-empty input: when a stage would eliminate every candidate it falls
//! back to a more permissive pass and finally to the unfiltered input.
//! Applying a stage twice gives the same result as applying it once.

use tracing::debug;

use super::predicates::{dominant_color, is_color_suitable, is_item_neutral};
use crate::models::{
    Category, ClothingItem, ColorLabel, Occasion, TemperatureRange, WeatherCondition,
};
use crate::services::color::{is_neutral, matching_colors};

/// Keep items tagged with `occasion`
pub fn by_occasion<'a>(items: &[&'a ClothingItem], occasion: Occasion) -> Vec<&'a ClothingItem> {
    let matched = keep(items, |item| item.occasions.contains(&occasion));
    or_unfiltered(matched, items, "occasion")
}

/// Drop items tagged with any of `excluded`
pub fn exclude_occasions<'a>(
    items: &[&'a ClothingItem],
    excluded: &[Occasion],
) -> Vec<&'a ClothingItem> {
    let kept = keep(items, |item| {
        !item.occasions.iter().any(|occasion| excluded.contains(occasion))
    });
    or_unfiltered(kept, items, "occasion exclusion")
}

/// Which pass of [`by_temperature`] produced the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperaturePass {
    /// Hot and raining: warm or hot rain gear
    RainGear,
    /// Items explicitly tagged for the target range
    Strict,
    /// Items tagged for a neighbouring range
    Adjacent,
    /// Items with no temperature tags
    Untagged,
    /// Nothing matched; the full input
    Unfiltered,
}

/// Temperature and weather filter used by weather-driven generation.
///
/// Passes, first non-empty wins:
/// 1. hot + rain only: rain-tagged items suited to hot or warm weather, or untagged
/// 2. strict: tagged for the target range. Hot items and cool tops also need a
///    matching or absent condition tag; warm items carrying the condition win
///    over other warm items.
/// 3. adjacency: tagged for a neighbouring range, never crossing hot and cold
/// 4. items with no temperature tags
/// 5. the full input
pub fn by_temperature<'a>(
    items: &[&'a ClothingItem],
    range: TemperatureRange,
    condition: WeatherCondition,
) -> Vec<&'a ClothingItem> {
    by_temperature_with_pass(items, range, condition).0
}

pub fn by_temperature_with_pass<'a>(
    items: &[&'a ClothingItem],
    range: TemperatureRange,
    condition: WeatherCondition,
) -> (Vec<&'a ClothingItem>, TemperaturePass) {
    if items.is_empty() {
        return (Vec::new(), TemperaturePass::Unfiltered);
    }

    if range == TemperatureRange::Hot && condition == WeatherCondition::Rain {
        let rain_gear = keep(items, |item| {
            item.weather_conditions.contains(&WeatherCondition::Rain)
                && (item.temperature_range.is_empty()
                    || item.temperature_range.contains(&TemperatureRange::Hot)
                    || item.temperature_range.contains(&TemperatureRange::Warm))
        });
        if !rain_gear.is_empty() {
            return (rain_gear, TemperaturePass::RainGear);
        }
    }

    let strict = keep(items, |item| is_strict_match(item, range, condition));
    if !strict.is_empty() {
        if range == TemperatureRange::Warm {
            let for_condition = keep(&strict, |item| item.weather_conditions.contains(&condition));
            if !for_condition.is_empty() {
                return (for_condition, TemperaturePass::Strict);
            }
        }
        return (strict, TemperaturePass::Strict);
    }

    let adjacent = keep(items, |item| is_adjacent_match(item, range));
    if !adjacent.is_empty() {
        debug!(target_range = %range, kept = adjacent.len(), "No strict temperature match, using adjacent ranges");
        return (adjacent, TemperaturePass::Adjacent);
    }

    let untagged = keep(items, |item| item.temperature_range.is_empty());
    if !untagged.is_empty() {
        debug!(target_range = %range, kept = untagged.len(), "Using items without temperature tags");
        return (untagged, TemperaturePass::Untagged);
    }

    debug!(target_range = %range, "Temperature filter matched nothing, falling back to unfiltered");
    (items.to_vec(), TemperaturePass::Unfiltered)
}

fn is_strict_match(item: &ClothingItem, range: TemperatureRange, condition: WeatherCondition) -> bool {
    if !item.temperature_range.contains(&range) {
        return false;
    }
    let condition_ok =
        item.weather_conditions.is_empty() || item.weather_conditions.contains(&condition);
    match range {
        TemperatureRange::Hot => condition_ok,
        TemperatureRange::Cool if item.category == Category::Top => condition_ok,
        _ => true,
    }
}

fn is_adjacent_match(item: &ClothingItem, range: TemperatureRange) -> bool {
    let opposite = match range {
        TemperatureRange::Hot => Some(TemperatureRange::Cold),
        TemperatureRange::Cold => Some(TemperatureRange::Hot),
        _ => None,
    };
    if let Some(opposite) = opposite {
        if item.temperature_range.contains(&opposite) {
            return false;
        }
    }
    item.temperature_range
        .iter()
        .any(|tagged| range.is_adjacent_to(*tagged))
}

/// Bottoms whose dominant color works with the top's dominant color.
///
/// Falls back to fully neutral bottoms, then to the unfiltered input.
pub fn by_color_suitability<'a>(
    bottoms: &[&'a ClothingItem],
    top_color: Option<ColorLabel>,
) -> Vec<&'a ClothingItem> {
    let suitable = keep(bottoms, |bottom| {
        is_color_suitable(top_color, dominant_color(bottom))
    });
    if !suitable.is_empty() {
        return suitable;
    }

    let neutral = keep(bottoms, |bottom| is_item_neutral(bottom));
    if !neutral.is_empty() {
        debug!(kept = neutral.len(), "No color-suitable bottoms, using neutral bottoms");
        return neutral;
    }

    or_unfiltered(Vec::new(), bottoms, "color suitability")
}

/// Shoes partitioned by how their colors relate to the top
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoeGroups<'a> {
    /// Share a color with the top; primary-to-primary matches first
    pub direct: Vec<&'a ClothingItem>,
    /// Carry a color the top's colors list as a match
    pub complementary: Vec<&'a ClothingItem>,
    /// Every color neutral
    pub neutral: Vec<&'a ClothingItem>,
    pub other: Vec<&'a ClothingItem>,
}

/// Group a chosen shoe pool relative to the top
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShoeGroup {
    Direct,
    Complementary,
    Neutral,
    Other,
}

impl<'a> ShoeGroups<'a> {
    pub fn get(&self, group: ShoeGroup) -> &[&'a ClothingItem] {
        match group {
            ShoeGroup::Direct => &self.direct,
            ShoeGroup::Complementary => &self.complementary,
            ShoeGroup::Neutral => &self.neutral,
            ShoeGroup::Other => &self.other,
        }
    }

    pub fn len(&self) -> usize {
        self.direct.len() + self.complementary.len() + self.neutral.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition shoes into direct, complementary, neutral and other groups
/// relative to `top`. Every shoe lands in exactly one group.
pub fn group_shoes_by_color<'a>(top: &ClothingItem, shoes: &[&'a ClothingItem]) -> ShoeGroups<'a> {
    let top_colors = top.color_labels();
    let top_primary = top_colors.first().copied();
    let top_affinity: Vec<ColorLabel> = top_colors
        .iter()
        .flat_map(|label| matching_colors(*label).iter().copied())
        .collect();

    let mut groups = ShoeGroups::default();
    let mut primary_matches = Vec::new();

    for shoe in shoes {
        let shoe_colors = shoe.color_labels();

        if shoe_colors.iter().any(|label| top_colors.contains(label)) {
            if top_primary.is_some() && shoe_colors.first().copied() == top_primary {
                primary_matches.push(*shoe);
            } else {
                groups.direct.push(*shoe);
            }
        } else if shoe_colors.iter().any(|label| top_affinity.contains(label)) {
            groups.complementary.push(*shoe);
        } else if !shoe_colors.is_empty() && shoe_colors.iter().all(|label| is_neutral(*label)) {
            groups.neutral.push(*shoe);
        } else {
            groups.other.push(*shoe);
        }
    }

    primary_matches.append(&mut groups.direct);
    groups.direct = primary_matches;

    debug!(
        direct = groups.direct.len(),
        complementary = groups.complementary.len(),
        neutral = groups.neutral.len(),
        other = groups.other.len(),
        "Grouped shoes by color"
    );

    groups
}

fn keep<'a, F>(items: &[&'a ClothingItem], predicate: F) -> Vec<&'a ClothingItem>
where
    F: Fn(&ClothingItem) -> bool,
{
    items.iter().copied().filter(|item| predicate(item)).collect()
}

fn or_unfiltered<'a>(
    filtered: Vec<&'a ClothingItem>,
    input: &[&'a ClothingItem],
    stage: &str,
) -> Vec<&'a ClothingItem> {
    if filtered.is_empty() && !input.is_empty() {
        debug!(stage, candidates = input.len(), "Filter eliminated every candidate, using unfiltered list");
        input.to_vec()
    } else {
        filtered
    }
}
