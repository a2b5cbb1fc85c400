//! RGB to color-name classification.
//!
//! Classification is an ordered cascade of numeric rules evaluated first match
//! wins. Rule order is part of the contract: several rules overlap and the
//! earlier rule decides. Thresholds were tuned against clothing photography
//! and are kept as literal values.

use crate::models::{ColorLabel, Rgb};

/// Features derived once per triple and shared by every rule
#[derive(Debug, Clone, Copy)]
pub struct ChannelFeatures {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub total: f64,
    pub r_ratio: f64,
    pub g_ratio: f64,
    pub b_ratio: f64,
}

impl ChannelFeatures {
    pub fn new(rgb: Rgb) -> Self {
        let (r, g, b) = (rgb.0 as f64, rgb.1 as f64, rgb.2 as f64);
        let total = r + g + b;
        let ratio = |channel: f64| if total > 0.0 { channel / total } else { 0.0 };

        Self {
            r,
            g,
            b,
            total,
            r_ratio: ratio(r),
            g_ratio: ratio(g),
            b_ratio: ratio(b),
        }
    }

    /// True when every pair of channels differs by at most `tolerance`
    fn channels_within(&self, tolerance: f64) -> bool {
        (self.r - self.g).abs() <= tolerance
            && (self.r - self.b).abs() <= tolerance
            && (self.g - self.b).abs() <= tolerance
    }

    fn max_rg(&self) -> f64 {
        self.r.max(self.g)
    }

    fn blue_dominant(&self) -> bool {
        self.b > self.r && self.b > self.g
    }

    fn red_dominant(&self) -> bool {
        self.r > self.g && self.r > self.b
    }

    /// Red above green above blue
    fn warm_descending(&self) -> bool {
        self.r > self.g && self.g > self.b
    }
}

// Ratio thresholds shared by the band rules
const HIGH: f64 = 0.4;
const MID: f64 = 0.3;
const LOW: f64 = 0.2;

/// A single step of the cascade
pub struct ColorRule {
    pub name: &'static str,
    pub apply: fn(&ChannelFeatures) -> Option<ColorLabel>,
}

/// The cascade, in evaluation order
pub const RULES: &[ColorRule] = &[
    ColorRule { name: "near_black", apply: near_black },
    ColorRule { name: "very_dark", apply: very_dark },
    ColorRule { name: "bright_yellow", apply: bright_yellow },
    ColorRule { name: "bright_pink", apply: bright_pink },
    ColorRule { name: "bright_pink_soft", apply: bright_pink_soft },
    ColorRule { name: "navy_band", apply: navy_band },
    ColorRule { name: "dark_navy", apply: dark_navy },
    ColorRule { name: "grayscale", apply: grayscale },
    ColorRule { name: "deep_navy", apply: deep_navy },
    ColorRule { name: "pure_red", apply: pure_red },
    ColorRule { name: "red_dominant_pink", apply: red_dominant_pink },
    ColorRule { name: "purple", apply: purple },
    ColorRule { name: "olive_green", apply: olive_green },
    ColorRule { name: "coral_salmon", apply: coral_salmon },
    ColorRule { name: "orange", apply: orange },
    ColorRule { name: "light_beige", apply: light_beige },
    ColorRule { name: "orange_brown", apply: orange_brown },
    ColorRule { name: "warm_brown", apply: warm_brown },
    ColorRule { name: "red_family", apply: red_family },
    ColorRule { name: "brown_family", apply: brown_family },
    ColorRule { name: "yellow_family", apply: yellow_family },
    ColorRule { name: "green", apply: green },
    ColorRule { name: "teal", apply: teal },
    ColorRule { name: "blue", apply: blue },
    ColorRule { name: "slight_navy", apply: slight_navy },
    ColorRule { name: "pink_ratio", apply: pink_ratio },
    ColorRule { name: "tan", apply: tan },
    ColorRule { name: "pale_warm", apply: pale_warm },
    ColorRule { name: "taupe", apply: taupe },
    ColorRule { name: "rust", apply: rust },
    ColorRule { name: "tinted_gray", apply: tinted_gray },
    ColorRule { name: "final_navy", apply: final_navy },
];

/// Maps an RGB triple to a color label. Total and deterministic; returns
/// [`ColorLabel::Unknown`] when no rule matches.
pub fn classify(rgb: impl Into<Rgb>) -> ColorLabel {
    let features = ChannelFeatures::new(rgb.into());
    RULES
        .iter()
        .find_map(|rule| (rule.apply)(&features))
        .unwrap_or(ColorLabel::Unknown)
}

/// Name of the first rule that matches, `None` when the triple falls through
pub fn matching_rule(rgb: impl Into<Rgb>) -> Option<&'static str> {
    let features = ChannelFeatures::new(rgb.into());
    RULES
        .iter()
        .find(|rule| (rule.apply)(&features).is_some())
        .map(|rule| rule.name)
}

fn near_black(f: &ChannelFeatures) -> Option<ColorLabel> {
    (f.total < 90.0 && f.channels_within(8.0)).then_some(ColorLabel::Black)
}

fn very_dark(f: &ChannelFeatures) -> Option<ColorLabel> {
    (f.total < 60.0).then_some(ColorLabel::Black)
}

fn bright_yellow(f: &ChannelFeatures) -> Option<ColorLabel> {
    let bright = f.r > 180.0 && f.g > 150.0 && f.b < 100.0;
    let ratios = f.r_ratio > 0.4 && f.g_ratio > 0.35 && f.b_ratio < 0.15;
    (bright && ratios && (f.r - f.g).abs() < 80.0).then_some(ColorLabel::Yellow)
}

// e.g. (232, 108, 147)
fn bright_pink(f: &ChannelFeatures) -> Option<ColorLabel> {
    let matches = f.r > 200.0
        && f.g < 150.0
        && f.b > 80.0
        && f.b < 200.0
        && f.r > f.g + 80.0
        && f.r > f.b + 30.0;
    matches.then_some(ColorLabel::Pink)
}

fn bright_pink_soft(f: &ChannelFeatures) -> Option<ColorLabel> {
    let matches = f.r > 200.0
        && (100.0..=180.0).contains(&f.g)
        && (100.0..=180.0).contains(&f.b)
        && f.r > f.g + 50.0
        && f.r > f.b + 30.0;
    matches.then_some(ColorLabel::Pink)
}

/// Medium-dark blues only need a small blue lead to read as navy
fn navy_band(f: &ChannelFeatures) -> Option<ColorLabel> {
    let matches = f.blue_dominant()
        && (140.0..=180.0).contains(&f.total)
        && f.b > f.max_rg() * 1.15;
    matches.then_some(ColorLabel::Navy)
}

fn dark_navy(f: &ChannelFeatures) -> Option<ColorLabel> {
    let matches = f.total >= 60.0
        && f.total < 80.0
        && f.blue_dominant()
        && f.b > f.max_rg() * 1.3;
    matches.then_some(ColorLabel::Navy)
}

fn grayscale(f: &ChannelFeatures) -> Option<ColorLabel> {
    if !f.channels_within(15.0) {
        return None;
    }
    let label = if f.r < 50.0 {
        ColorLabel::Black
    } else if f.r < 230.0 {
        ColorLabel::Gray
    } else {
        ColorLabel::White
    };
    Some(label)
}

fn deep_navy(f: &ChannelFeatures) -> Option<ColorLabel> {
    let dark_blue = f.blue_dominant()
        && f.b <= 100.0
        && f.r < 70.0
        && f.g < 70.0
        && f.b > f.max_rg() * 1.2;
    let muted_blue = (30.0..=120.0).contains(&f.b)
        && f.r < 70.0
        && f.g < 80.0
        && f.b > f.max_rg() * 1.25;
    (dark_blue || muted_blue).then_some(ColorLabel::Navy)
}

fn pure_red(f: &ChannelFeatures) -> Option<ColorLabel> {
    let matches = f.r > 160.0
        && f.g < 80.0
        && f.b < 80.0
        && f.r > f.g * 2.0
        && f.r > f.b * 2.0;
    matches.then_some(ColorLabel::Red)
}

/// Light peach pinks and saturated pinks where blue keeps up with green
fn red_dominant_pink(f: &ChannelFeatures) -> Option<ColorLabel> {
    if !f.red_dominant() {
        return None;
    }
    let light_peach = f.r > 200.0
        && (170.0..=200.0).contains(&f.g)
        && (160.0..=190.0).contains(&f.b)
        && f.warm_descending();
    let saturated = f.r > 180.0
        && f.r > f.g + 60.0
        && f.r > f.b * 1.3
        && f.b >= f.g * 0.7;
    (light_peach || saturated).then_some(ColorLabel::Pink)
}

/// Red and blue both elevated with green suppressed. Red-leaning members
/// are pink.
fn purple(f: &ChannelFeatures) -> Option<ColorLabel> {
    let (r, g, b) = (f.r, f.g, f.b);
    if !(b > 70.0 && r > 50.0 && g < r * 0.9 && g < b * 0.9) {
        return None;
    }

    if r > 150.0 && r > b * 1.2 && r > g * 1.5 {
        return Some(ColorLabel::Pink);
    }
    if ((r > 50.0 && b > 100.0) || (b > r && b > 90.0 && g < 80.0)) && r <= b * 1.2 {
        return Some(ColorLabel::Purple);
    }
    // lavender
    if (140.0..180.0).contains(&r)
        && (120.0..160.0).contains(&g)
        && (180.0..230.0).contains(&b)
        && r <= b
    {
        return Some(ColorLabel::Purple);
    }
    // plum
    if (50.0..90.0).contains(&r) && (40.0..80.0).contains(&g) && (100.0..140.0).contains(&b) {
        return Some(ColorLabel::Purple);
    }
    if (r - b).abs() < 70.0 && b > g && r > g && r <= b * 1.2 {
        return Some(ColorLabel::Purple);
    }
    None
}

/// Army and olive greens sit close to brown on raw channels
fn olive_green(f: &ChannelFeatures) -> Option<ColorLabel> {
    let matches = (60.0..=90.0).contains(&f.r)
        && (59.0..=85.0).contains(&f.g)
        && (40.0..=65.0).contains(&f.b)
        && f.r / f.g > 0.9
        && f.r / f.g < 1.2;
    matches.then_some(ColorLabel::Green)
}

/// Coral and salmon tones: a strong green lead over blue reads orange,
/// otherwise pink
fn coral_salmon(f: &ChannelFeatures) -> Option<ColorLabel> {
    let matches = f.r > 200.0
        && f.r > f.g + 60.0
        && f.r > f.b + 60.0
        && (90.0..=170.0).contains(&f.g)
        && (60.0..=160.0).contains(&f.b);
    if !matches {
        return None;
    }
    if f.g >= f.b * 1.4 {
        Some(ColorLabel::Orange)
    } else {
        Some(ColorLabel::Pink)
    }
}

fn orange(f: &ChannelFeatures) -> Option<ColorLabel> {
    let matches = f.r >= 200.0
        && f.g >= f.r * 0.45
        && f.g <= f.r * 0.8
        && f.b < f.g * 0.4
        && f.b < 90.0;
    matches.then_some(ColorLabel::Orange)
}

/// Light warm neutrals with a moderate red-to-blue spread
fn light_beige(f: &ChannelFeatures) -> Option<ColorLabel> {
    if !(f.r > 170.0 && f.g > 140.0 && f.b > 110.0 && f.warm_descending()) {
        return None;
    }
    let spread = (f.r - f.b) / f.r;
    (0.1..=0.35).contains(&spread).then_some(ColorLabel::Beige)
}

// e.g. (213, 138, 66), (175, 95, 32)
fn orange_brown(f: &ChannelFeatures) -> Option<ColorLabel> {
    let matches = f.r > 150.0
        && (70.0..=150.0).contains(&f.g)
        && (30.0..=70.0).contains(&f.b)
        && f.warm_descending()
        && f.r / f.b > 2.5;
    matches.then_some(ColorLabel::Brown)
}

fn warm_brown(f: &ChannelFeatures) -> Option<ColorLabel> {
    let matches = f.r > 150.0
        && (90.0..=160.0).contains(&f.g)
        && (40.0..=90.0).contains(&f.b)
        && f.warm_descending()
        && f.g / f.b > 1.5;
    matches.then_some(ColorLabel::Brown)
}

fn red_family(f: &ChannelFeatures) -> Option<ColorLabel> {
    let (r, g, b) = (f.r, f.g, f.b);
    if !(f.r_ratio > MID && r > g + 30.0 && r > b + 10.0) {
        return None;
    }

    if r > 180.0 && g > 80.0 && b > 100.0 && r > g + 80.0 && r > b + 40.0 {
        return Some(ColorLabel::Pink);
    }
    // burgundy and maroon read as red
    if r > 75.0 && r > g * 1.8 && r > b * 1.5 && g < 100.0 && b < 100.0 {
        return Some(ColorLabel::Red);
    }

    let label = if r > 220.0 && g > 150.0 {
        if b > 150.0 {
            ColorLabel::Pink
        } else if g > 180.0 {
            ColorLabel::Orange
        } else {
            ColorLabel::Red
        }
    } else if (r > 160.0 && g < 80.0 && b < 80.0)
        || (r > 140.0 && g > 60.0 && g < 110.0 && b < 100.0)
    {
        ColorLabel::Red
    } else if r > 160.0 && g > 110.0 && b < 100.0 {
        if g > 130.0 {
            ColorLabel::Orange
        } else {
            ColorLabel::Red
        }
    } else {
        let strongest_other = g.max(b);
        let dominance = if strongest_other > 0.0 {
            r / strongest_other
        } else {
            2.0
        };
        if dominance > 1.8 {
            ColorLabel::Red
        } else {
            ColorLabel::Brown
        }
    };
    Some(label)
}

fn brown_family(f: &ChannelFeatures) -> Option<ColorLabel> {
    let (r, g, b) = (f.r, f.g, f.b);
    let in_band = f.r_ratio > MID && f.g_ratio > LOW && f.g_ratio < HIGH && f.b_ratio < MID;
    if !in_band {
        return None;
    }

    if r > 180.0 && g > 140.0 && b < 100.0 {
        if r > g * 1.5 && g > b * 1.5 {
            return Some(ColorLabel::Brown);
        }
        return Some(ColorLabel::Orange);
    }
    if r > 180.0 && g > 160.0 && b > 100.0 && g > 170.0 && b > 140.0 && r - b < 60.0 {
        return Some(ColorLabel::Beige);
    }
    Some(ColorLabel::Brown)
}

fn yellow_family(f: &ChannelFeatures) -> Option<ColorLabel> {
    let (r, g, b) = (f.r, f.g, f.b);
    if !(f.r_ratio > MID && f.g_ratio > MID && f.b_ratio < MID) {
        return None;
    }

    let label = if r > 180.0 && g > 180.0 && b < 120.0 {
        ColorLabel::Yellow
    } else if r > 190.0 && g > 170.0 && b > 130.0 {
        if f.warm_descending() && r - b < 60.0 {
            ColorLabel::Beige
        } else {
            ColorLabel::Pink
        }
    } else if r < 150.0 {
        ColorLabel::Brown
    } else {
        ColorLabel::Yellow
    };
    Some(label)
}

fn green(f: &ChannelFeatures) -> Option<ColorLabel> {
    (f.g_ratio > HIGH && f.r_ratio < HIGH && f.b_ratio < HIGH).then_some(ColorLabel::Green)
}

/// Teal and cyan resolve to whichever of green or blue leads
fn teal(f: &ChannelFeatures) -> Option<ColorLabel> {
    if !(f.g_ratio > MID && f.b_ratio > MID && f.r_ratio < MID) {
        return None;
    }
    let label = if f.g > f.b * 1.2 {
        ColorLabel::Green
    } else if f.b > f.g * 1.1 {
        ColorLabel::Blue
    } else if f.g > f.b {
        ColorLabel::Green
    } else {
        ColorLabel::Blue
    };
    Some(label)
}

fn blue(f: &ChannelFeatures) -> Option<ColorLabel> {
    if !(f.b_ratio > HIGH && f.r_ratio < HIGH && f.g_ratio < HIGH) {
        return None;
    }
    if f.b > 150.0 {
        if f.r < 80.0 && f.g < 80.0 && f.b < 170.0 {
            return Some(ColorLabel::Navy);
        }
        return Some(ColorLabel::Blue);
    }
    Some(ColorLabel::Navy)
}

fn slight_navy(f: &ChannelFeatures) -> Option<ColorLabel> {
    let matches = f.blue_dominant()
        && f.b < 120.0
        && f.max_rg() < 100.0
        && f.b > f.max_rg() * 1.1;
    matches.then_some(ColorLabel::Navy)
}

fn pink_ratio(f: &ChannelFeatures) -> Option<ColorLabel> {
    let (r, g, b) = (f.r, f.g, f.b);
    if !(f.r_ratio > MID && f.b_ratio > LOW && f.g_ratio < MID) {
        return None;
    }

    let typical = r > 180.0 && b > 140.0;
    let bright = r > 180.0
        && (80.0..=150.0).contains(&g)
        && (80.0..=180.0).contains(&b)
        && r > g + 60.0;
    let pink_leaning = r > b && r > 160.0 && b > 120.0;

    if typical || bright || pink_leaning {
        Some(ColorLabel::Pink)
    } else {
        Some(ColorLabel::Purple)
    }
}

/// Peachy tans with a wide red-to-blue spread are pink, the rest beige
fn tan(f: &ChannelFeatures) -> Option<ColorLabel> {
    if !(f.r > 180.0 && f.g > 150.0 && f.b > 120.0 && f.warm_descending()) {
        return None;
    }
    if f.r - f.b > 40.0 {
        Some(ColorLabel::Pink)
    } else {
        Some(ColorLabel::Beige)
    }
}

fn pale_warm(f: &ChannelFeatures) -> Option<ColorLabel> {
    if !(f.r > 190.0 && f.g > 170.0 && f.b > 140.0) {
        return None;
    }
    if f.r - f.b > 40.0 {
        Some(ColorLabel::Pink)
    } else {
        Some(ColorLabel::Beige)
    }
}

fn taupe(f: &ChannelFeatures) -> Option<ColorLabel> {
    let matches = f.warm_descending()
        && f.r > 120.0
        && f.r < 180.0
        && f.g > 100.0
        && f.g < 160.0
        && f.b > 90.0
        && f.b < 150.0;
    matches.then_some(ColorLabel::Brown)
}

fn rust(f: &ChannelFeatures) -> Option<ColorLabel> {
    let matches = f.r > 140.0
        && f.g > 70.0
        && f.g < 120.0
        && f.b > 10.0
        && f.b < 70.0
        && f.r > f.g + 40.0
        && f.g > f.b;
    matches.then_some(ColorLabel::Brown)
}

fn tinted_gray(f: &ChannelFeatures) -> Option<ColorLabel> {
    (f.channels_within(20.0) && f.r > 160.0 && f.r < 230.0).then_some(ColorLabel::Gray)
}

fn final_navy(f: &ChannelFeatures) -> Option<ColorLabel> {
    let max_rg = f.max_rg();
    if !(f.b > max_rg && f.b < 120.0 && f.r < 80.0 && f.g < 80.0) {
        return None;
    }
    let dominance = if max_rg > 0.0 { f.b / max_rg } else { 2.0 };
    (dominance > 1.1).then_some(ColorLabel::Navy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_label(rgb: (u8, u8, u8), expected: ColorLabel) {
        assert_eq!(
            classify(rgb),
            expected,
            "rgb {:?} matched rule {:?}",
            rgb,
            matching_rule(rgb)
        );
    }

    #[test]
    fn test_reference_fixtures() {
        assert_label((20, 20, 20), ColorLabel::Black);
        assert_label((245, 245, 245), ColorLabel::White);
        assert_label((200, 30, 30), ColorLabel::Red);
        assert_label((10, 10, 120), ColorLabel::Navy);
        assert_label((190, 164, 133), ColorLabel::Beige);
    }

    #[test]
    fn test_all_zero_is_black() {
        assert_label((0, 0, 0), ColorLabel::Black);
        assert_eq!(matching_rule((0, 0, 0)), Some("near_black"));
    }

    #[test]
    fn test_grayscale_by_brightness() {
        assert_label((40, 45, 42), ColorLabel::Black);
        assert_label((128, 128, 128), ColorLabel::Gray);
        assert_label((200, 205, 210), ColorLabel::Gray);
        assert_label((235, 232, 238), ColorLabel::White);
    }

    #[test]
    fn test_navy_versus_blue() {
        assert_label((20, 30, 90), ColorLabel::Navy);
        assert_label((30, 100, 220), ColorLabel::Blue);
    }

    #[test]
    fn test_red_orange_pink() {
        assert_label((255, 165, 0), ColorLabel::Orange);
        assert_label((240, 128, 80), ColorLabel::Orange);
        assert_label((232, 108, 147), ColorLabel::Pink);
        assert_label((250, 128, 114), ColorLabel::Pink);
        assert_label((255, 192, 203), ColorLabel::Pink);
    }

    #[test]
    fn test_other_hues() {
        assert_label((255, 255, 0), ColorLabel::Yellow);
        assert_label((0, 128, 0), ColorLabel::Green);
        assert_label((128, 0, 128), ColorLabel::Purple);
        assert_label((160, 110, 60), ColorLabel::Brown);
    }

    #[test]
    fn test_classification_is_deterministic() {
        for r in (0..=255u16).step_by(51) {
            for g in (0..=255u16).step_by(51) {
                for b in (0..=255u16).step_by(51) {
                    let rgb = (r as u8, g as u8, b as u8);
                    assert_eq!(classify(rgb), classify(rgb));
                }
            }
        }
    }

    #[test]
    fn test_rule_names_are_unique() {
        let mut names: Vec<&str> = RULES.iter().map(|rule| rule.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RULES.len());
    }
}
