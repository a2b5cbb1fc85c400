use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use super::filters::{self, ShoeGroups};
use super::predicates::{dominant_color, has_color, has_exact_color, shares_occasion};
use super::sampling::{choose_shoe_group, choose_uniform, choose_weighted_top_k};
use super::scoring::{CandidateRole, OutfitScorer, ScoringMode};
use super::{OutfitError, OutfitRequest};
use crate::models::{
    Category, ClothingItem, ColorLabel, Occasion, Outfit, TemperatureRange, Wardrobe,
};

/// Occasions that never suit a weather-driven outfit's tops and bottoms
const WEATHER_EXCLUDED_GARMENT_OCCASIONS: [Occasion; 2] = [Occasion::Formal, Occasion::Lounge];

/// Occasions that never suit a weather-driven outfit's shoes
const WEATHER_EXCLUDED_SHOE_OCCASIONS: [Occasion; 1] = [Occasion::Lounge];

/// Candidate pools for one generation run
struct Pools<'w> {
    tops: Vec<&'w ClothingItem>,
    bottoms: Vec<&'w ClothingItem>,
    shoes: Vec<&'w ClothingItem>,
}

/// Builds outfits from a wardrobe.
///
/// Each call to [`generate`](Self::generate) is an independent single pass:
/// anchor top, then bottom (skipped for complete tops), then shoes. The
/// wardrobe is never mutated.
pub struct OutfitGenerator<'w> {
    wardrobe: &'w Wardrobe,
}

impl<'w> OutfitGenerator<'w> {
    pub fn new(wardrobe: &'w Wardrobe) -> Self {
        Self { wardrobe }
    }

    /// Generates one outfit for `request`.
    ///
    /// Repeated calls with the same inputs vary with the random source.
    pub fn generate<R>(&self, request: &OutfitRequest, rng: &mut R) -> Result<Outfit, OutfitError>
    where
        R: Rng + ?Sized,
    {
        if self.wardrobe.tops.is_empty() {
            return Err(OutfitError::insufficient(Category::Top));
        }
        if self.wardrobe.shoes.is_empty() {
            return Err(OutfitError::insufficient(Category::Shoes));
        }

        let pools = self.pools(request);

        let (top, base_color) = self.choose_anchor(request, &pools, rng)?;
        debug!(
            top_id = %top.id,
            base_color = ?base_color,
            complete = top.is_complete_top(),
            "Selected anchor top"
        );

        let scorer = OutfitScorer::new(scoring_mode(request), base_color);

        let bottom = if top.is_complete_top() {
            None
        } else {
            Some(self.choose_bottom(request, &scorer, top, &pools.bottoms, rng)?)
        };

        let shoes = self.choose_shoes(request, &scorer, top, bottom, &pools.shoes, rng)?;

        info!(
            mode = request.mode(),
            top_id = %top.id,
            bottom_id = ?bottom.map(|item| item.id),
            shoes_id = %shoes.id,
            "Generated outfit"
        );

        Ok(Outfit {
            top: top.clone(),
            bottom: bottom.cloned(),
            shoes: shoes.clone(),
        })
    }

    /// Starting pools; weather requests are pre-filtered by occasion and temperature
    fn pools(&self, request: &OutfitRequest) -> Pools<'w> {
        let tops: Vec<&ClothingItem> = self.wardrobe.tops.iter().collect();
        let bottoms: Vec<&ClothingItem> = self.wardrobe.bottoms.iter().collect();
        let shoes: Vec<&ClothingItem> = self.wardrobe.shoes.iter().collect();

        match *request {
            OutfitRequest::Weather {
                temperature_f,
                condition,
            } => {
                let range = TemperatureRange::from_fahrenheit(temperature_f);
                let weather_pool = |items: Vec<&'w ClothingItem>, excluded: &[Occasion]| {
                    let suitable = filters::exclude_occasions(&items, excluded);
                    filters::by_temperature(&suitable, range, condition)
                };

                let pools = Pools {
                    tops: weather_pool(tops, &WEATHER_EXCLUDED_GARMENT_OCCASIONS[..]),
                    bottoms: weather_pool(bottoms, &WEATHER_EXCLUDED_GARMENT_OCCASIONS[..]),
                    shoes: weather_pool(shoes, &WEATHER_EXCLUDED_SHOE_OCCASIONS[..]),
                };
                debug!(
                    temperature_f,
                    range = %range,
                    condition = %condition,
                    tops = pools.tops.len(),
                    bottoms = pools.bottoms.len(),
                    shoes = pools.shoes.len(),
                    "Weather-filtered candidate pools"
                );
                pools
            }
            _ => Pools {
                tops,
                bottoms,
                shoes,
            },
        }
    }

    fn choose_anchor<R>(
        &self,
        request: &OutfitRequest,
        pools: &Pools<'w>,
        rng: &mut R,
    ) -> Result<(&'w ClothingItem, Option<ColorLabel>), OutfitError>
    where
        R: Rng + ?Sized,
    {
        let mut anchors = match request {
            OutfitRequest::Color {
                base_color: Some(color),
            } => {
                // exact carriers first, affinity matches otherwise
                let exact: Vec<&ClothingItem> = pools
                    .tops
                    .iter()
                    .copied()
                    .filter(|top| has_exact_color(top, *color))
                    .collect();
                if exact.is_empty() {
                    pools
                        .tops
                        .iter()
                        .copied()
                        .filter(|top| has_color(top, *color))
                        .collect()
                } else {
                    exact
                }
            }
            OutfitRequest::Occasion { occasion } => filters::by_occasion(&pools.tops, *occasion),
            _ => pools.tops.clone(),
        };

        if anchors.is_empty() {
            if let OutfitRequest::Color {
                base_color: Some(color),
            } = request
            {
                return Err(OutfitError::no_match(format!("color {}", color)));
            }
        }

        // without bottoms only complete tops can anchor an outfit
        if pools.bottoms.is_empty() {
            anchors.retain(|top| top.is_complete_top());
            if anchors.is_empty() {
                return Err(OutfitError::insufficient(Category::Bottom));
            }
        }

        let top = *choose_uniform(&anchors, rng)
            .ok_or_else(|| OutfitError::insufficient(Category::Top))?;

        let base_color = match request {
            OutfitRequest::Color {
                base_color: Some(color),
            } => Some(*color),
            _ => dominant_color(top),
        };

        Ok((top, base_color))
    }

    fn choose_bottom<R>(
        &self,
        request: &OutfitRequest,
        scorer: &OutfitScorer,
        top: &'w ClothingItem,
        bottoms: &[&'w ClothingItem],
        rng: &mut R,
    ) -> Result<&'w ClothingItem, OutfitError>
    where
        R: Rng + ?Sized,
    {
        if bottoms.is_empty() {
            return Err(OutfitError::insufficient(Category::Bottom));
        }

        let mut candidates = match request {
            OutfitRequest::Occasion { occasion } => filters::by_occasion(bottoms, *occasion),
            _ => bottoms.to_vec(),
        };

        let sharing: Vec<&ClothingItem> = candidates
            .iter()
            .copied()
            .filter(|bottom| shares_occasion(top, bottom))
            .collect();
        if !sharing.is_empty() {
            candidates = sharing;
        }

        let mut candidates = filters::by_color_suitability(&candidates, dominant_color(top));
        candidates.shuffle(rng);

        let context = [top];
        let scored: Vec<(&ClothingItem, f64)> = candidates
            .into_iter()
            .map(|bottom| {
                let breakdown = scorer.score(bottom, CandidateRole::Bottom, &context, None);
                (bottom, breakdown.total)
            })
            .collect();
        debug!(candidates = scored.len(), "Scored bottoms");

        choose_weighted_top_k(scored, rng).ok_or_else(|| OutfitError::insufficient(Category::Bottom))
    }

    fn choose_shoes<R>(
        &self,
        request: &OutfitRequest,
        scorer: &OutfitScorer,
        top: &'w ClothingItem,
        bottom: Option<&'w ClothingItem>,
        shoes: &[&'w ClothingItem],
        rng: &mut R,
    ) -> Result<&'w ClothingItem, OutfitError>
    where
        R: Rng + ?Sized,
    {
        let candidates = match request {
            OutfitRequest::Occasion { occasion } => filters::by_occasion(shoes, *occasion),
            _ => shoes.to_vec(),
        };
        let candidates = narrow_by_shared_occasion(top, bottom, candidates);

        let groups: ShoeGroups<'w> = filters::group_shoes_by_color(top, &candidates);
        let group = choose_shoe_group(&groups, rng)
            .ok_or_else(|| OutfitError::insufficient(Category::Shoes))?;

        let mut in_group = groups.get(group).to_vec();
        in_group.shuffle(rng);

        let context: Vec<&ClothingItem> = std::iter::once(top).chain(bottom).collect();
        let scored: Vec<(&ClothingItem, f64)> = in_group
            .into_iter()
            .map(|shoe| {
                let breakdown = scorer.score(shoe, CandidateRole::Shoes, &context, Some(group));
                (shoe, breakdown.total)
            })
            .collect();
        debug!(
            group = ?group,
            grouped = groups.len(),
            candidates = scored.len(),
            "Scored shoes"
        );

        choose_weighted_top_k(scored, rng).ok_or_else(|| OutfitError::insufficient(Category::Shoes))
    }
}

/// Shoes sharing an occasion with the top and bottom, else with the top,
/// else all of them
fn narrow_by_shared_occasion<'w>(
    top: &ClothingItem,
    bottom: Option<&ClothingItem>,
    shoes: Vec<&'w ClothingItem>,
) -> Vec<&'w ClothingItem> {
    if let Some(bottom) = bottom {
        let shared: Vec<_> = top
            .occasions
            .iter()
            .filter(|occasion| bottom.occasions.contains(occasion))
            .copied()
            .collect();
        let with_both: Vec<&ClothingItem> = shoes
            .iter()
            .copied()
            .filter(|shoe| shoe.occasions.iter().any(|occasion| shared.contains(occasion)))
            .collect();
        if !with_both.is_empty() {
            return with_both;
        }
    }

    let with_top: Vec<&ClothingItem> = shoes
        .iter()
        .copied()
        .filter(|shoe| shares_occasion(top, shoe))
        .collect();
    if !with_top.is_empty() {
        return with_top;
    }

    shoes
}

fn scoring_mode(request: &OutfitRequest) -> ScoringMode {
    match *request {
        OutfitRequest::Random => ScoringMode::Random,
        OutfitRequest::Color { .. } => ScoringMode::Color,
        OutfitRequest::Occasion { occasion } => ScoringMode::Occasion(occasion),
        OutfitRequest::Weather {
            temperature_f,
            condition,
        } => ScoringMode::Weather {
            range: TemperatureRange::from_fahrenheit(temperature_f),
            condition,
        },
    }
}
