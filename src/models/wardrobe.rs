use tracing::debug;

use super::{Category, ClothingItem};
use crate::services::outfit::OutfitError;

/// A user's items partitioned by category
///
/// Only available items are kept. Every kept item has passed
/// [`ClothingItem::validate`].
#[derive(Debug, Clone, Default)]
pub struct Wardrobe {
    pub tops: Vec<ClothingItem>,
    pub bottoms: Vec<ClothingItem>,
    pub shoes: Vec<ClothingItem>,
    pub accessories: Vec<ClothingItem>,
}

impl Wardrobe {
    /// Partitions items by category, dropping unavailable ones.
    ///
    /// Fails on the first item that violates the data-model invariants.
    pub fn from_items<I>(items: I) -> Result<Self, OutfitError>
    where
        I: IntoIterator<Item = ClothingItem>,
    {
        let mut wardrobe = Wardrobe::default();
        let mut skipped = 0usize;

        for item in items {
            item.validate()?;
            if item.unavailable {
                skipped += 1;
                continue;
            }
            match item.category {
                Category::Top => wardrobe.tops.push(item),
                Category::Bottom => wardrobe.bottoms.push(item),
                Category::Shoes => wardrobe.shoes.push(item),
                Category::Accessory => wardrobe.accessories.push(item),
            }
        }

        debug!(
            tops = wardrobe.tops.len(),
            bottoms = wardrobe.bottoms.len(),
            shoes = wardrobe.shoes.len(),
            accessories = wardrobe.accessories.len(),
            skipped_unavailable = skipped,
            "Built wardrobe"
        );

        Ok(wardrobe)
    }

    pub fn len(&self) -> usize {
        self.tops.len() + self.bottoms.len() + self.shoes.len() + self.accessories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
