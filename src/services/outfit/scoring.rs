//! Candidate scoring.
//!
//! A candidate's score starts from its color harmony with the items already
//! chosen (the context, top first) and is scaled by a capped sum of bonuses:
//! `min(1, base * (1 + min(bonus_sum, cap)))`. Weather generation may then
//! subtract a temperature penalty.

use super::filters::ShoeGroup;
use super::predicates::{dominant_color, has_exact_color, shares_occasion, shares_temperature_range};
use crate::models::{ClothingItem, ColorLabel, Occasion, TemperatureRange, WeatherCondition};
use crate::services::color::{
    is_complementary, is_neutral, match_score, match_score_any, MISSING_COLOR_SCORE,
};

/// Slot the candidate is being scored for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateRole {
    Bottom,
    Shoes,
}

/// Generation mode as seen by the scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    Random,
    Color,
    Occasion(Occasion),
    Weather {
        range: TemperatureRange,
        condition: WeatherCondition,
    },
}

impl ScoringMode {
    /// Upper bound on the bonus sum for a role in this mode
    pub fn bonus_cap(&self, role: CandidateRole) -> f64 {
        match (self, role) {
            (ScoringMode::Random | ScoringMode::Color, CandidateRole::Bottom) => 0.6,
            (ScoringMode::Random | ScoringMode::Color, CandidateRole::Shoes) => 0.7,
            (ScoringMode::Occasion(_), CandidateRole::Bottom) => 0.7,
            (ScoringMode::Occasion(_), CandidateRole::Shoes) => 0.75,
            (ScoringMode::Weather { .. }, CandidateRole::Bottom) => 0.8,
            (ScoringMode::Weather { .. }, CandidateRole::Shoes) => 0.85,
        }
    }
}

// Occasion bonuses
const TARGET_OCCASION_BONUS: f64 = 0.2;
const TARGET_SHARED_BONUS: f64 = 0.1;
const SHARES_ALL_OCCASION_BONUS: f64 = 0.25;
const SHARES_SOME_OCCASION_BONUS: f64 = 0.1;

const SHARED_TEMPERATURE_BONUS: f64 = 0.1;

// Weather bonuses
const WEATHER_TAG_WEIGHT: f64 = 0.3;
const CURRENT_RANGE_BONUS: f64 = 0.15;
const WEATHERPROOF_SHOE_BONUS: f64 = 0.2;

// Color bonuses
const SHOE_DIRECT_BONUS: f64 = 0.5;
const SHOE_COMPLEMENTARY_BONUS: f64 = 0.2;
const SHOE_NEUTRAL_BONUS: f64 = 0.1;
const BOTTOM_SAME_BONUS: f64 = 0.15;
const BOTTOM_COMPLEMENTARY_BONUS: f64 = 0.1;
const BOTTOM_NEUTRAL_BONUS: f64 = 0.05;
const BASE_COLOR_BONUS: f64 = 0.05;

// Weather penalties
const COLD_PENALTY: f64 = 0.6;
const HOT_COLD_ONLY_PENALTY: f64 = 0.5;
const HOT_COOL_ONLY_PENALTY: f64 = 0.4;

/// Components of a candidate's score
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub occasion_bonus: f64,
    /// Shared temperature range outside weather mode, weather tag bonus inside it
    pub temperature_bonus: f64,
    pub color_bonus: f64,
    pub capped_bonus: f64,
    pub penalty: f64,
    pub total: f64,
}

/// Scores bottoms and shoes against the items already in the outfit
#[derive(Debug, Clone, Copy)]
pub struct OutfitScorer {
    mode: ScoringMode,
    base_color: Option<ColorLabel>,
}

impl OutfitScorer {
    pub fn new(mode: ScoringMode, base_color: Option<ColorLabel>) -> Self {
        Self { mode, base_color }
    }

    /// Scores `candidate` given the `context` items (top first).
    ///
    /// `shoe_group` is the color group the candidate was drawn from; it is
    /// ignored for bottoms.
    pub fn score(
        &self,
        candidate: &ClothingItem,
        role: CandidateRole,
        context: &[&ClothingItem],
        shoe_group: Option<ShoeGroup>,
    ) -> ScoreBreakdown {
        let base = base_color_score(candidate, role, context);
        let occasion_bonus = self.occasion_bonus(candidate, context);
        let temperature_bonus = self.temperature_bonus(candidate, role, context);
        let color_bonus = self.color_bonus(candidate, role, context, shoe_group);

        let capped_bonus =
            (occasion_bonus + temperature_bonus + color_bonus).min(self.mode.bonus_cap(role));
        let penalty = self.penalty(candidate);
        let total = ((base * (1.0 + capped_bonus)).min(1.0) - penalty).clamp(0.0, 1.0);

        ScoreBreakdown {
            base,
            occasion_bonus,
            temperature_bonus,
            color_bonus,
            capped_bonus,
            penalty,
            total,
        }
    }

    fn occasion_bonus(&self, candidate: &ClothingItem, context: &[&ClothingItem]) -> f64 {
        let shared_with_all =
            !context.is_empty() && context.iter().all(|item| shares_occasion(candidate, item));

        match self.mode {
            ScoringMode::Occasion(target) => {
                let mut bonus = 0.0;
                if candidate.occasions.contains(&target) {
                    bonus += TARGET_OCCASION_BONUS;
                }
                if shared_with_all {
                    bonus += TARGET_SHARED_BONUS;
                }
                bonus
            }
            _ => {
                if shared_with_all {
                    SHARES_ALL_OCCASION_BONUS
                } else if context.iter().any(|item| shares_occasion(candidate, item)) {
                    SHARES_SOME_OCCASION_BONUS
                } else {
                    0.0
                }
            }
        }
    }

    fn temperature_bonus(
        &self,
        candidate: &ClothingItem,
        role: CandidateRole,
        context: &[&ClothingItem],
    ) -> f64 {
        match self.mode {
            ScoringMode::Weather { range, condition } => {
                let tag_score = if context.is_empty() {
                    0.0
                } else {
                    context
                        .iter()
                        .map(|item| weather_tag_match_score(candidate, item, range, condition))
                        .sum::<f64>()
                        / context.len() as f64
                };

                let mut bonus = WEATHER_TAG_WEIGHT * tag_score;
                if candidate.temperature_range.contains(&range) {
                    bonus += CURRENT_RANGE_BONUS;
                }
                if role == CandidateRole::Shoes
                    && condition.is_wet()
                    && candidate.weather_conditions.contains(&condition)
                {
                    bonus += WEATHERPROOF_SHOE_BONUS;
                }
                bonus
            }
            _ => {
                let shared = !context.is_empty()
                    && context
                        .iter()
                        .all(|item| shares_temperature_range(candidate, item));
                if shared {
                    SHARED_TEMPERATURE_BONUS
                } else {
                    0.0
                }
            }
        }
    }

    fn color_bonus(
        &self,
        candidate: &ClothingItem,
        role: CandidateRole,
        context: &[&ClothingItem],
        shoe_group: Option<ShoeGroup>,
    ) -> f64 {
        let relation = match role {
            CandidateRole::Shoes => match shoe_group {
                Some(ShoeGroup::Direct) => SHOE_DIRECT_BONUS,
                Some(ShoeGroup::Complementary) => SHOE_COMPLEMENTARY_BONUS,
                Some(ShoeGroup::Neutral) => SHOE_NEUTRAL_BONUS,
                Some(ShoeGroup::Other) | None => 0.0,
            },
            CandidateRole::Bottom => {
                let top_color = context.first().and_then(|top| dominant_color(top));
                match (top_color, dominant_color(candidate)) {
                    (Some(top), Some(own)) if top == own => BOTTOM_SAME_BONUS,
                    (Some(top), Some(own)) if is_complementary(top, own) => {
                        BOTTOM_COMPLEMENTARY_BONUS
                    }
                    (Some(_), Some(own)) if is_neutral(own) => BOTTOM_NEUTRAL_BONUS,
                    _ => 0.0,
                }
            }
        };

        let base_color = match self.base_color {
            Some(label) if has_exact_color(candidate, label) => BASE_COLOR_BONUS,
            _ => 0.0,
        };

        relation + base_color
    }

    fn penalty(&self, candidate: &ClothingItem) -> f64 {
        match self.mode {
            ScoringMode::Weather { range, .. } => temperature_penalty(candidate, range),
            _ => 0.0,
        }
    }
}

/// Average dominant-color harmony with the context items
/// Average harmony with the context. Shoes are compared on all their colors,
/// matching how they are grouped; bottoms on dominant colors only.
fn base_color_score(candidate: &ClothingItem, role: CandidateRole, context: &[&ClothingItem]) -> f64 {
    if context.is_empty() {
        return MISSING_COLOR_SCORE;
    }
    let own = candidate.color_labels();
    let harmony: fn(&[ColorLabel], &[ColorLabel]) -> f64 = match role {
        CandidateRole::Bottom => match_score,
        CandidateRole::Shoes => match_score_any,
    };
    let sum: f64 = context
        .iter()
        .map(|item| harmony(&own, &item.color_labels()))
        .sum();
    sum / context.len() as f64
}

/// Penalty for items tagged only for the wrong end of the scale
pub fn temperature_penalty(item: &ClothingItem, range: TemperatureRange) -> f64 {
    let tags = &item.temperature_range;
    match range {
        TemperatureRange::Cold if !tags.is_empty() && !tags.contains(&TemperatureRange::Cold) => {
            COLD_PENALTY
        }
        TemperatureRange::Hot if tags.as_slice() == [TemperatureRange::Cold] => {
            HOT_COLD_ONLY_PENALTY
        }
        TemperatureRange::Hot if tags.as_slice() == [TemperatureRange::Cool] => {
            HOT_COOL_ONLY_PENALTY
        }
        _ => 0.0,
    }
}

/// How well two items' weather tags fit the current weather, in [0, 1].
/// Symmetric in `a` and `b`.
pub fn weather_tag_match_score(
    a: &ClothingItem,
    b: &ClothingItem,
    range: TemperatureRange,
    condition: WeatherCondition,
) -> f64 {
    let mut score = 0.5 - (weather_tag_penalty(a, range) + weather_tag_penalty(b, range));

    let a_condition = a.weather_conditions.contains(&condition);
    let b_condition = b.weather_conditions.contains(&condition);
    let a_range = a.temperature_range.contains(&range);
    let b_range = b.temperature_range.contains(&range);

    if a_condition && b_condition {
        score += 0.3;
    }
    if a_range && b_range {
        score += 0.3;
    }
    if shares_occasion(a, b) {
        score += 0.2;
    }

    let weatherproof_pair = condition.is_wet() && a_condition != b_condition;
    let layered_pair = matches!(range, TemperatureRange::Cold | TemperatureRange::Cool)
        && a_range != b_range;
    if weatherproof_pair || layered_pair {
        score += 0.1;
    }

    score.clamp(0.0, 1.0)
}

fn weather_tag_penalty(item: &ClothingItem, range: TemperatureRange) -> f64 {
    let tags = item.temperature_range.as_slice();
    match range {
        TemperatureRange::Cold => {
            let mut penalty = 0.0;
            if !tags.is_empty() && !tags.contains(&TemperatureRange::Cold) {
                penalty += COLD_PENALTY;
            }
            // single-range summer items are penalised twice
            if matches!(tags, [TemperatureRange::Warm] | [TemperatureRange::Hot]) {
                penalty += COLD_PENALTY;
            }
            penalty
        }
        TemperatureRange::Hot => match tags {
            [TemperatureRange::Cold] => HOT_COLD_ONLY_PENALTY,
            [TemperatureRange::Cool] => HOT_COOL_ONLY_PENALTY,
            _ => 0.0,
        },
        _ => 0.0,
    }
}
