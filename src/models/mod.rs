mod color;
mod item;
mod outfit;
mod wardrobe;

pub use color::{ColorLabel, ColorSample, ColorSampleInput, Rgb};
pub use item::{
    Category, ClothingItem, Occasion, Subcategory, TemperatureRange, WeatherCondition,
    MAX_COLORS, MAX_OCCASIONS,
};
pub use outfit::{Outfit, OutfitResponse};
pub use wardrobe::Wardrobe;
