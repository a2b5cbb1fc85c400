use rand::rngs::StdRng;
use rand::SeedableRng;

use wardrobe_api::models::{
    Category, ClothingItem, ColorLabel, Occasion, TemperatureRange, Wardrobe, WeatherCondition,
};
use wardrobe_api::services::color::{classify, match_score};
use wardrobe_api::services::outfit::filters::{
    by_color_suitability, by_occasion, by_temperature, exclude_occasions,
};
use wardrobe_api::services::outfit::predicates::is_item_neutral;
use wardrobe_api::services::outfit::{OutfitError, OutfitGenerator, OutfitRequest};

const RED: (u8, u8, u8) = (200, 30, 30);
const BLACK: (u8, u8, u8) = (20, 20, 20);
const WHITE: (u8, u8, u8) = (245, 245, 245);
const NAVY: (u8, u8, u8) = (10, 10, 120);
const BEIGE: (u8, u8, u8) = (190, 164, 133);

fn wardrobe(items: Vec<ClothingItem>) -> Wardrobe {
    Wardrobe::from_items(items).unwrap()
}

#[test]
fn test_classifier_fixtures() {
    assert_eq!(classify(BLACK), ColorLabel::Black);
    assert_eq!(classify(WHITE), ColorLabel::White);
    assert_eq!(classify(RED), ColorLabel::Red);
    assert_eq!(classify(NAVY), ColorLabel::Navy);
    assert_eq!(classify(BEIGE), ColorLabel::Beige);
    assert_eq!(classify((0, 0, 0)), ColorLabel::Black);
}

#[test]
fn test_classifier_is_total() {
    for r in (0..=255u8).step_by(15) {
        for g in (0..=255u8).step_by(15) {
            for b in (0..=255u8).step_by(15) {
                assert_eq!(classify((r, g, b)), classify((r, g, b)));
            }
        }
    }
}

#[test]
fn test_match_score_symmetric() {
    for a in ColorLabel::ALL {
        for b in ColorLabel::ALL {
            assert_eq!(
                match_score(&[a], &[b]),
                match_score(&[b], &[a]),
                "{} vs {}",
                a,
                b
            );
        }
        assert_eq!(match_score(&[a], &[a]), 0.95);
    }
    assert_eq!(match_score(&[], &[ColorLabel::Red]), 0.5);
}

#[test]
fn test_single_non_neutral_color_breaks_neutrality() {
    let neutral = ClothingItem::top().with_rgb_colors(&[BLACK, WHITE, BEIGE]);
    assert!(is_item_neutral(&neutral));

    let mixed = ClothingItem::top().with_rgb_colors(&[BLACK, WHITE, RED]);
    assert!(!is_item_neutral(&mixed));
}

#[test]
fn test_exact_color_outfit() {
    let top = ClothingItem::top().with_rgb_colors(&[RED]);
    let bottom = ClothingItem::bottom().with_rgb_colors(&[BLACK]);
    let shoes = ClothingItem::shoes().with_rgb_colors(&[RED]);
    let wardrobe = wardrobe(vec![top.clone(), bottom.clone(), shoes.clone()]);
    let generator = OutfitGenerator::new(&wardrobe);

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let outfit = generator
            .generate(
                &OutfitRequest::Color {
                    base_color: Some(ColorLabel::Red),
                },
                &mut rng,
            )
            .unwrap();

        assert_eq!(outfit.top.id, top.id);
        assert_eq!(outfit.bottom.as_ref().map(|b| b.id), Some(bottom.id));
        assert_eq!(outfit.shoes.id, shoes.id);
    }
}

#[test]
fn test_no_bottoms_with_standard_top_is_insufficient() {
    let wardrobe = wardrobe(vec![
        ClothingItem::top().with_rgb_colors(&[RED]),
        ClothingItem::shoes().with_rgb_colors(&[BLACK]),
    ]);
    let mut rng = StdRng::seed_from_u64(3);

    let err = OutfitGenerator::new(&wardrobe)
        .generate(&OutfitRequest::Random, &mut rng)
        .unwrap_err();
    assert_eq!(
        err,
        OutfitError::InsufficientWardrobe {
            category: Category::Bottom
        }
    );
}

#[test]
fn test_bottom_absent_iff_complete_top() {
    let wardrobe = wardrobe(vec![
        ClothingItem::top().with_rgb_colors(&[WHITE]),
        ClothingItem::complete_top().with_rgb_colors(&[NAVY]),
        ClothingItem::bottom().with_rgb_colors(&[BLACK]),
        ClothingItem::shoes().with_rgb_colors(&[WHITE]),
    ]);
    let generator = OutfitGenerator::new(&wardrobe);
    let mut rng = StdRng::seed_from_u64(99);

    let mut saw_complete = false;
    let mut saw_standard = false;
    for _ in 0..100 {
        let outfit = generator.generate(&OutfitRequest::Random, &mut rng).unwrap();
        assert_eq!(outfit.bottom.is_none(), outfit.top.is_complete_top());
        if outfit.top.is_complete_top() {
            saw_complete = true;
        } else {
            saw_standard = true;
        }
    }
    assert!(saw_complete && saw_standard);
}

#[test]
fn test_cold_weather_relaxes_to_cool_items() {
    let cool = [TemperatureRange::Cool];
    let wardrobe = wardrobe(vec![
        ClothingItem::top()
            .with_rgb_colors(&[NAVY])
            .with_temperature_range(&cool),
        ClothingItem::bottom()
            .with_rgb_colors(&[BLACK])
            .with_temperature_range(&cool),
        ClothingItem::bottom()
            .with_rgb_colors(&[BEIGE])
            .with_temperature_range(&cool),
        ClothingItem::shoes()
            .with_rgb_colors(&[BLACK])
            .with_temperature_range(&cool),
    ]);
    let mut rng = StdRng::seed_from_u64(5);

    let outfit = OutfitGenerator::new(&wardrobe)
        .generate(
            &OutfitRequest::Weather {
                temperature_f: 25,
                condition: WeatherCondition::Snow,
            },
            &mut rng,
        )
        .unwrap();
    assert!(outfit.bottom.is_some());
}

#[test]
fn test_occasion_intersection_holds_when_satisfiable() {
    let casual = Occasion::Casual;
    let wardrobe = wardrobe(vec![
        ClothingItem::top()
            .with_rgb_colors(&[WHITE])
            .with_occasions(&[casual, Occasion::Work]),
        ClothingItem::bottom()
            .with_rgb_colors(&[NAVY])
            .with_occasions(&[casual]),
        ClothingItem::bottom()
            .with_rgb_colors(&[BLACK])
            .with_occasions(&[Occasion::Formal]),
        ClothingItem::shoes()
            .with_rgb_colors(&[WHITE])
            .with_occasions(&[casual]),
        ClothingItem::shoes()
            .with_rgb_colors(&[BLACK])
            .with_occasions(&[Occasion::Athletic]),
    ]);
    let generator = OutfitGenerator::new(&wardrobe);

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        for request in [
            OutfitRequest::Random,
            OutfitRequest::Occasion { occasion: casual },
        ] {
            let outfit = generator.generate(&request, &mut rng).unwrap();
            let bottom = outfit.bottom.as_ref().unwrap();
            let shared = outfit.top.occasions.iter().any(|occasion| {
                bottom.occasions.contains(occasion) && outfit.shoes.occasions.contains(occasion)
            });
            assert!(shared, "seed {} request {:?}", seed, request);
        }
    }
}

#[test]
fn test_filters_are_idempotent() {
    let items = vec![
        ClothingItem::bottom()
            .with_rgb_colors(&[RED])
            .with_occasions(&[Occasion::Casual])
            .with_temperature_range(&[TemperatureRange::Hot]),
        ClothingItem::bottom()
            .with_rgb_colors(&[BLACK])
            .with_occasions(&[Occasion::Formal])
            .with_temperature_range(&[TemperatureRange::Cold]),
        ClothingItem::bottom()
            .with_rgb_colors(&[NAVY])
            .with_occasions(&[Occasion::Lounge]),
    ];
    let refs: Vec<&ClothingItem> = items.iter().collect();

    let once = by_occasion(&refs, Occasion::Casual);
    assert_eq!(by_occasion(&once, Occasion::Casual), once);

    let excluded = [Occasion::Formal, Occasion::Lounge];
    let once = exclude_occasions(&refs, &excluded);
    assert_eq!(exclude_occasions(&once, &excluded), once);

    let once = by_temperature(&refs, TemperatureRange::Cold, WeatherCondition::Snow);
    assert_eq!(
        by_temperature(&once, TemperatureRange::Cold, WeatherCondition::Snow),
        once
    );

    let once = by_color_suitability(&refs, Some(ColorLabel::Red));
    assert_eq!(by_color_suitability(&once, Some(ColorLabel::Red)), once);
}

#[test]
fn test_hot_rain_anchors_on_rain_gear() {
    let tank = ClothingItem::top()
        .with_rgb_colors(&[WHITE])
        .with_temperature_range(&[TemperatureRange::Hot]);
    let rain_jacket = ClothingItem::top()
        .with_rgb_colors(&[NAVY])
        .with_temperature_range(&[TemperatureRange::Warm])
        .with_weather_conditions(&[WeatherCondition::Rain]);
    let wardrobe = wardrobe(vec![
        tank,
        rain_jacket.clone(),
        ClothingItem::bottom().with_rgb_colors(&[BLACK]),
        ClothingItem::shoes().with_rgb_colors(&[BLACK]),
    ]);
    let generator = OutfitGenerator::new(&wardrobe);
    let request = OutfitRequest::Weather {
        temperature_f: 88,
        condition: WeatherCondition::Rain,
    };

    for seed in 0..30 {
        let mut rng = StdRng::seed_from_u64(seed);
        let outfit = generator.generate(&request, &mut rng).unwrap();
        assert_eq!(outfit.top.id, rain_jacket.id, "seed {}", seed);
        assert!(outfit.bottom.is_some());
    }
}
