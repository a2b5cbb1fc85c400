//! Randomised selection helpers. Callers own the random source.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

use super::filters::{ShoeGroup, ShoeGroups};

/// Number of best-scored candidates eligible for selection
pub const TOP_K: usize = 3;

/// Floor applied to scores used as sampling weights, so a zero-scored
/// candidate in the top K can still be drawn
pub const MIN_SAMPLING_WEIGHT: f64 = 0.1;

/// Probability mass for each shoe color group, before renormalising over
/// the non-empty groups
pub const SHOE_GROUP_WEIGHTS: [(ShoeGroup, f64); 4] = [
    (ShoeGroup::Direct, 0.55),
    (ShoeGroup::Complementary, 0.2),
    (ShoeGroup::Neutral, 0.15),
    (ShoeGroup::Other, 0.1),
];

/// Uniform pick
pub fn choose_uniform<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    items.choose(rng)
}

/// Keeps the [`TOP_K`] highest scores (ties keep input order) and draws one
/// with probability proportional to its score.
pub fn choose_weighted_top_k<T, R>(mut scored: Vec<(T, f64)>, rng: &mut R) -> Option<T>
where
    R: Rng + ?Sized,
{
    if scored.is_empty() {
        return None;
    }

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(TOP_K);

    let weights: Vec<f64> = scored
        .iter()
        .map(|(_, score)| score.max(MIN_SAMPLING_WEIGHT))
        .collect();

    let index = match WeightedIndex::new(&weights) {
        Ok(distribution) => distribution.sample(rng),
        Err(_) => 0,
    };

    Some(scored.swap_remove(index).0)
}

/// Draws a shoe color group, weighted towards direct color matches.
/// Empty groups are never drawn; `None` only when every group is empty.
pub fn choose_shoe_group<R>(groups: &ShoeGroups<'_>, rng: &mut R) -> Option<ShoeGroup>
where
    R: Rng + ?Sized,
{
    if groups.is_empty() {
        return None;
    }

    let available: Vec<(ShoeGroup, f64)> = SHOE_GROUP_WEIGHTS
        .into_iter()
        .filter(|(group, _)| !groups.get(*group).is_empty())
        .collect();

    let distribution = WeightedIndex::new(available.iter().map(|(_, weight)| *weight)).ok()?;
    Some(available[distribution.sample(rng)].0)
}
