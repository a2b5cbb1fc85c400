//! Color harmony between items, driven by a static affinity table.

use crate::models::ColorLabel;

/// Labels that pair with anything
pub const NEUTRAL_COLORS: [ColorLabel; 5] = [
    ColorLabel::Black,
    ColorLabel::White,
    ColorLabel::Gray,
    ColorLabel::Beige,
    ColorLabel::Brown,
];

pub const MISSING_COLOR_SCORE: f64 = 0.5;
pub const IDENTICAL_SCORE: f64 = 0.95;
pub const NEUTRAL_SCORE: f64 = 0.85;
pub const AFFINITY_SCORE: f64 = 0.8;
pub const CLASH_SCORE: f64 = 0.3;

pub fn is_neutral(label: ColorLabel) -> bool {
    NEUTRAL_COLORS.contains(&label)
}

/// Labels considered to go well with `label`.
///
/// The table is hand-authored and not symmetric; use [`is_complementary`]
/// for a two-way check. Labels without an entry match the basic neutrals.
pub fn matching_colors(label: ColorLabel) -> &'static [ColorLabel] {
    use ColorLabel::*;

    match label {
        Black => &[Black, White, Gray, Red, Blue, Green, Purple, Yellow, Navy],
        White => &[Black, Blue, Red, Brown, Gray, Purple, Green, Navy],
        Gray => &[Black, White, Blue, Purple, Red, Pink, Navy],
        Blue => &[Brown, Beige, Black, Gray, White],
        Navy => &[White, Gray, Orange, Pink, Beige, Black],
        Red => &[Black, White, Gray, Red, Beige],
        Green => &[White, Black, Brown, Gray, Beige],
        Brown => &[White, Beige, Black, Blue, Green, Red, Navy],
        Purple => &[White, Black, Gray, Pink],
        Yellow => &[Blue, Gray, Black, Purple, Navy],
        Pink => &[White, Gray, Navy, Black, Purple],
        Beige => &[Brown, Navy, Blue, Green, Black, Red],
        Orange => &[Blue, Navy, White, Gray, Black],
        Unknown => &[Black, White, Gray, Navy],
    }
}

/// Distinct labels where either one lists the other as a match
pub fn is_complementary(a: ColorLabel, b: ColorLabel) -> bool {
    a != b && (matching_colors(a).contains(&b) || matching_colors(b).contains(&a))
}

/// Harmony between two color lists using their dominant (first) labels
pub fn match_score(colors_a: &[ColorLabel], colors_b: &[ColorLabel]) -> f64 {
    match (colors_a.first(), colors_b.first()) {
        (Some(a), Some(b)) => pair_score(*a, *b),
        _ => MISSING_COLOR_SCORE,
    }
}

/// Harmony taking every label on both sides into account; the best pairing wins
pub fn match_score_any(colors_a: &[ColorLabel], colors_b: &[ColorLabel]) -> f64 {
    colors_a
        .iter()
        .flat_map(|a| colors_b.iter().map(move |b| pair_score(*a, *b)))
        .fold(None, |best: Option<f64>, score| {
            Some(best.map_or(score, |best| best.max(score)))
        })
        .unwrap_or(MISSING_COLOR_SCORE)
}

fn pair_score(a: ColorLabel, b: ColorLabel) -> f64 {
    if a == b {
        IDENTICAL_SCORE
    } else if is_neutral(a) || is_neutral(b) {
        NEUTRAL_SCORE
    } else if is_complementary(a, b) {
        AFFINITY_SCORE
    } else {
        CLASH_SCORE
    }
}
