use crate::domain::{Game, Source};
use crate::infrastructure::RawRecord;
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Category pool used when a feed omits the category entirely.
const CATEGORY_POOL: [&str; 14] = [
    "Action",
    "Puzzle",
    "Racing",
    "Sports",
    "Shooter",
    "Adventure",
    "Arcade",
    "Strategy",
    "Fighting",
    "Simulation",
    "Clicker",
    "Educational",
    "Platform",
    "RPG",
];

/// One extra tag gets appended to every tag list.
const MODIFIER_TAGS: [&str; 5] = [
    "Addictive",
    "Challenging",
    "Relaxing",
    "Multiplayer",
    "Single Player",
];

/// No feed exposes real traffic numbers, so the plays label is display
/// theater drawn from a fixed set of magnitudes.
const PLAYS_LABELS: [&str; 11] = [
    "125K", "250K", "500K", "750K", "1M", "1.5M", "2M", "2.5M", "3M", "4M", "5M",
];

static CATEGORY_TAGS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        ("action", &["Action", "Fast-paced", "Exciting"][..]),
        ("puzzle", &["Puzzle", "Logic", "Brain", "Strategy"][..]),
        ("racing", &["Racing", "Speed", "Cars", "Fast"][..]),
        ("shooter", &["Shooter", "Combat", "Action", "Weapons"][..]),
        ("sports", &["Sports", "Athletic", "Competition"][..]),
        ("adventure", &["Adventure", "Exploration", "Journey"][..]),
        ("arcade", &["Arcade", "Classic", "Retro", "Fun"][..]),
        ("fighting", &["Fighting", "Combat", "Battle"][..]),
        ("simulation", &["Simulation", "Realistic", "Strategy"][..]),
        ("clicker", &["Clicker", "Idle", "Incremental"][..]),
        ("educational", &["Educational", "Learning", "Knowledge"][..]),
    ])
});

const DEFAULT_TAGS: [&str; 3] = ["Game", "Fun", "Entertainment"];

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 600;

/// Maps raw feed records onto canonical games, filling gaps with
/// deterministic or randomized defaults.
///
/// The randomness source is owned here and seedable, so tests can pin the
/// choices for defaulted categories, modifier tags, and plays labels.
pub struct RecordNormalizer {
    rng: Mutex<StdRng>,
}

impl RecordNormalizer {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn normalize(&self, raw: RawRecord, source: Source) -> Game {
        let mut rng = self.rng();

        let title = raw.title.unwrap_or_default();
        let raw_category = raw.category.filter(|c| !c.trim().is_empty());
        let chosen_category = raw_category.clone().unwrap_or_else(|| {
            CATEGORY_POOL
                .choose(&mut *rng)
                .copied()
                .unwrap_or("Action")
                .to_string()
        });
        let category = capitalize_first(&chosen_category);

        let rating = match source {
            Source::GamePix => round1(raw.quality_score.unwrap_or(0.8) * 5.0).clamp(0.0, 5.0),
            _ => round1(rng.gen_range(3.5..=5.0)),
        };

        let description = raw
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| default_description(&title, &raw_category, source));

        let thumbnail_url = raw
            .thumbnail
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| default_thumbnail(&raw.namespace, source));

        let orientation = match source {
            Source::GamePix => raw.orientation.or_else(|| Some("landscape".to_string())),
            _ => raw.orientation,
        };

        Game {
            title,
            source,
            source_id: raw.source_id,
            play_url: raw.play_url.unwrap_or_default(),
            category: category.clone(),
            rating,
            plays_label: pick(&PLAYS_LABELS, &mut rng),
            description,
            tags: build_tags(&category, &mut rng),
            thumbnail_url,
            width: raw.width.unwrap_or(DEFAULT_WIDTH),
            height: raw.height.unwrap_or(DEFAULT_HEIGHT),
            orientation,
            game_type: raw.game_type,
            instructions: raw.instructions,
        }
    }
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Up to 3 tags from the category's fixed list plus one random modifier.
fn build_tags(category: &str, rng: &mut StdRng) -> Vec<String> {
    let base = CATEGORY_TAGS
        .get(category.to_lowercase().as_str())
        .copied()
        .unwrap_or(&DEFAULT_TAGS);

    let mut tags: Vec<String> = base.iter().take(3).map(|t| t.to_string()).collect();
    tags.push(pick(&MODIFIER_TAGS, rng));
    tags
}

fn default_description(title: &str, raw_category: &Option<String>, source: Source) -> String {
    match source {
        Source::GamePix => {
            let flavor = raw_category.as_deref().unwrap_or("action");
            format!("Play {title} - an exciting {flavor} game with amazing gameplay!")
        }
        _ => format!("Play {title} - an exciting HTML5 game with great graphics and smooth gameplay!"),
    }
}

fn default_thumbnail(namespace: &Option<String>, source: Source) -> String {
    match source {
        Source::GamePix => {
            let ns = namespace.as_deref().unwrap_or("default");
            format!("https://img.gamepix.com/games/{ns}/cover/{ns}.png?w=320")
        }
        _ => "https://img.gamemonetize.com/default/512x384.jpg".to_string(),
    }
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn pick(pool: &[&str], rng: &mut StdRng) -> String {
    pool.choose(rng).copied().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str) -> RawRecord {
        RawRecord {
            title: Some(title.to_string()),
            play_url: Some(format!("https://x/{}", title.to_lowercase())),
            ..RawRecord::default()
        }
    }

    #[test]
    fn missing_category_comes_from_the_fixed_pool() {
        let normalizer = RecordNormalizer::with_seed(7);
        for _ in 0..50 {
            let game = normalizer.normalize(raw("Foo"), Source::GamePix);
            // Capitalization folds e.g. "RPG" to "Rpg", so compare loosely
            assert!(
                CATEGORY_POOL
                    .iter()
                    .any(|c| c.eq_ignore_ascii_case(&game.category)),
                "unexpected category {}",
                game.category
            );
        }
    }

    #[test]
    fn category_is_capitalized() {
        let normalizer = RecordNormalizer::with_seed(1);
        let mut record = raw("Foo");
        record.category = Some("RACING".to_string());
        let game = normalizer.normalize(record, Source::GameMonetize);
        assert_eq!(game.category, "Racing");
    }

    #[test]
    fn tags_are_exactly_four_with_category_prefix() {
        let normalizer = RecordNormalizer::with_seed(42);
        let mut record = raw("Foo");
        record.category = Some("puzzle".to_string());
        let game = normalizer.normalize(record, Source::GamePix);

        assert_eq!(game.tags.len(), 4);
        assert_eq!(&game.tags[..3], &["Puzzle", "Logic", "Brain"]);
        assert!(MODIFIER_TAGS.contains(&game.tags[3].as_str()));
    }

    #[test]
    fn unknown_category_falls_back_to_generic_tags() {
        let normalizer = RecordNormalizer::with_seed(42);
        let mut record = raw("Foo");
        record.category = Some("RPG".to_string());
        let game = normalizer.normalize(record, Source::GamePix);
        assert_eq!(&game.tags[..3], &["Game", "Fun", "Entertainment"]);
    }

    #[test]
    fn gamepix_rating_scales_quality_score() {
        let normalizer = RecordNormalizer::with_seed(3);
        let mut record = raw("Foo");
        record.quality_score = Some(0.87);
        let game = normalizer.normalize(record, Source::GamePix);
        assert_eq!(game.rating, 4.4);
    }

    #[test]
    fn gamepix_rating_defaults_quality_to_point_eight() {
        let normalizer = RecordNormalizer::with_seed(3);
        let game = normalizer.normalize(raw("Foo"), Source::GamePix);
        assert_eq!(game.rating, 4.0);
    }

    #[test]
    fn gamemonetize_rating_stays_in_range_at_one_decimal() {
        let normalizer = RecordNormalizer::with_seed(11);
        for _ in 0..50 {
            let game = normalizer.normalize(raw("Foo"), Source::GameMonetize);
            assert!((3.5..=5.0).contains(&game.rating), "rating {}", game.rating);
            assert_eq!(round1(game.rating), game.rating);
        }
    }

    #[test]
    fn plays_label_comes_from_the_fixed_set() {
        let normalizer = RecordNormalizer::with_seed(5);
        let game = normalizer.normalize(raw("Foo"), Source::GamePix);
        assert!(PLAYS_LABELS.contains(&game.plays_label.as_str()));
    }

    #[test]
    fn thumbnail_falls_back_per_source() {
        let normalizer = RecordNormalizer::with_seed(5);

        let mut record = raw("Foo");
        record.namespace = Some("foo-run".to_string());
        let game = normalizer.normalize(record, Source::GamePix);
        assert_eq!(
            game.thumbnail_url,
            "https://img.gamepix.com/games/foo-run/cover/foo-run.png?w=320"
        );

        let game = normalizer.normalize(raw("Bar"), Source::GameMonetize);
        assert_eq!(
            game.thumbnail_url,
            "https://img.gamemonetize.com/default/512x384.jpg"
        );
    }

    #[test]
    fn description_defaults_are_templated_per_source() {
        let normalizer = RecordNormalizer::with_seed(5);

        let mut record = raw("Foo");
        record.category = Some("Racing".to_string());
        let game = normalizer.normalize(record, Source::GamePix);
        assert_eq!(
            game.description,
            "Play Foo - an exciting Racing game with amazing gameplay!"
        );

        let game = normalizer.normalize(raw("Bar"), Source::GameMonetize);
        assert_eq!(
            game.description,
            "Play Bar - an exciting HTML5 game with great graphics and smooth gameplay!"
        );
    }

    #[test]
    fn dimensions_default_to_800_by_600() {
        let normalizer = RecordNormalizer::with_seed(5);
        let game = normalizer.normalize(raw("Foo"), Source::GameMonetize);
        assert_eq!((game.width, game.height), (800, 600));
    }

    #[test]
    fn gamepix_orientation_defaults_to_landscape() {
        let normalizer = RecordNormalizer::with_seed(5);
        let game = normalizer.normalize(raw("Foo"), Source::GamePix);
        assert_eq!(game.orientation.as_deref(), Some("landscape"));

        let game = normalizer.normalize(raw("Bar"), Source::GameMonetize);
        assert_eq!(game.orientation, None);
    }

    #[test]
    fn seeded_normalizers_agree() {
        let a = RecordNormalizer::with_seed(99);
        let b = RecordNormalizer::with_seed(99);
        let left = a.normalize(raw("Foo"), Source::GameMonetize);
        let right = b.normalize(raw("Foo"), Source::GameMonetize);
        assert_eq!(left.category, right.category);
        assert_eq!(left.rating, right.rating);
        assert_eq!(left.tags, right.tags);
        assert_eq!(left.plays_label, right.plays_label);
    }

    #[test]
    fn capitalize_first_handles_edge_cases() {
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("a"), "A");
        assert_eq!(capitalize_first("aRcAdE"), "Arcade");
    }
}
