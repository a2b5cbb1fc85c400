mod classifier;
mod harmony;

pub use classifier::{classify, matching_rule, ChannelFeatures, ColorRule, RULES};
pub use harmony::{
    is_complementary, is_neutral, match_score, match_score_any, matching_colors,
    AFFINITY_SCORE, CLASH_SCORE, IDENTICAL_SCORE, MISSING_COLOR_SCORE, NEUTRAL_COLORS,
    NEUTRAL_SCORE,
};
