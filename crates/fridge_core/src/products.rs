//! crates/fridge_core/src/products.rs
//!
//! Best-effort product identification from a scanned barcode.
//!
//! Lookup order: exact demo barcode, then the three-character prefix table, then
//! whatever [`ShelfLifeFallback`] the catalog was built with.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

use crate::domain::{Category, ProductGuess};

/// Barcodes recognised exactly, used for demonstration data.
const DEMO_PRODUCTS: &[(&str, &str, Category, u32)] = &[
    ("012345678905", "Whole Milk", Category::Dairy, 7),
    ("036000291452", "Cheddar Cheese", Category::Dairy, 30),
    ("041220576289", "Baby Spinach", Category::Vegetable, 5),
    ("074175604128", "Chicken Breast", Category::Meat, 3),
    ("033383401195", "Gala Apples", Category::Fruit, 21),
    ("070038314315", "Ground Beef", Category::Meat, 2),
    ("011110421005", "Baby Carrots", Category::Vegetable, 14),
    ("049000028904", "Strawberries", Category::Fruit, 5),
];

/// Three-character barcode prefixes and the category and shelf life they suggest.
const PREFIX_TABLE: &[(&str, Category, u32)] = &[
    ("012", Category::Dairy, 7),
    ("036", Category::Dairy, 21),
    ("041", Category::Vegetable, 7),
    ("011", Category::Vegetable, 10),
    ("033", Category::Fruit, 10),
    ("049", Category::Fruit, 7),
    ("074", Category::Meat, 4),
    ("070", Category::Meat, 3),
];

/// Name keywords that identify a category when a product is named rather than scanned.
/// Checked in order, so more specific words come first.
const NAME_KEYWORDS: &[(&str, Category)] = &[
    ("eggplant", Category::Vegetable),
    ("milk", Category::Dairy),
    ("cheese", Category::Dairy),
    ("cheddar", Category::Dairy),
    ("yogurt", Category::Dairy),
    ("butter", Category::Dairy),
    ("cream", Category::Dairy),
    ("egg", Category::Dairy),
    ("chicken", Category::Meat),
    ("beef", Category::Meat),
    ("pork", Category::Meat),
    ("steak", Category::Meat),
    ("turkey", Category::Meat),
    ("ham", Category::Meat),
    ("bacon", Category::Meat),
    ("sausage", Category::Meat),
    ("fish", Category::Meat),
    ("salmon", Category::Meat),
    ("apple", Category::Fruit),
    ("banana", Category::Fruit),
    ("berr", Category::Fruit),
    ("orange", Category::Fruit),
    ("grape", Category::Fruit),
    ("lemon", Category::Fruit),
    ("lime", Category::Fruit),
    ("pear", Category::Fruit),
    ("peach", Category::Fruit),
    ("melon", Category::Fruit),
    ("mango", Category::Fruit),
];

pub const MIN_FALLBACK_SHELF_LIFE: u32 = 3;
pub const MAX_FALLBACK_SHELF_LIFE: u32 = 21;

/// Strategy for barcodes that neither table recognises.
pub trait ShelfLifeFallback: Send + Sync {
    fn guess(&self, barcode: &str) -> Option<(Category, u32)>;
}

/// Gives up on unknown barcodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl ShelfLifeFallback for NoFallback {
    fn guess(&self, _barcode: &str) -> Option<(Category, u32)> {
        None
    }
}

/// Picks a uniformly random category and a shelf life in
/// `MIN_FALLBACK_SHELF_LIFE..=MAX_FALLBACK_SHELF_LIFE` days.
///
/// Stands in for a real product database.
pub struct RandomFallback {
    rng: Mutex<StdRng>,
}

impl RandomFallback {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// A reproducible sequence of guesses.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomFallback {
    fn default() -> Self {
        Self::new()
    }
}

impl ShelfLifeFallback for RandomFallback {
    fn guess(&self, _barcode: &str) -> Option<(Category, u32)> {
        // StdRng state stays valid across a panic in another holder.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let category = Category::ALL[rng.gen_range(0..Category::ALL.len())];
        let days = rng.gen_range(MIN_FALLBACK_SHELF_LIFE..=MAX_FALLBACK_SHELF_LIFE);
        Some((category, days))
    }
}

/// Resolves barcodes into [`ProductGuess`]es.
pub struct ProductCatalog {
    fallback: Box<dyn ShelfLifeFallback>,
}

impl ProductCatalog {
    pub fn new(fallback: Box<dyn ShelfLifeFallback>) -> Self {
        Self { fallback }
    }

    /// A catalog that only answers for barcodes it knows.
    pub fn deterministic() -> Self {
        Self::new(Box::new(NoFallback))
    }

    pub fn lookup(&self, barcode: &str) -> Option<ProductGuess> {
        let barcode = barcode.trim();
        if barcode.chars().count() < 3 {
            return None;
        }

        if let Some(&(_, name, category, days)) =
            DEMO_PRODUCTS.iter().find(|(code, ..)| *code == barcode)
        {
            return Some(ProductGuess {
                name: name.to_string(),
                category,
                shelf_life_days: days,
            });
        }

        let prefix: String = barcode.chars().take(3).collect();
        let (category, shelf_life_days) = match PREFIX_TABLE.iter().find(|(p, ..)| *p == prefix) {
            Some(&(_, category, days)) => (category, days),
            None => {
                debug!(barcode, "Barcode prefix unknown, consulting fallback");
                self.fallback.guess(barcode)?
            }
        };

        Some(ProductGuess {
            name: generic_name(category),
            category,
            shelf_life_days,
        })
    }
}

/// Guesses a category from a spoken or typed product name, defaulting to vegetables.
pub fn guess_by_name(name: &str) -> ProductGuess {
    let lowered = name.to_lowercase();
    let category = NAME_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|&(_, category)| category)
        .unwrap_or(Category::Vegetable);
    ProductGuess {
        name: name.trim().to_string(),
        category,
        shelf_life_days: category.default_shelf_life_days(),
    }
}

fn generic_name(category: Category) -> String {
    match category {
        Category::Vegetable => "Fresh Vegetables",
        Category::Fruit => "Fresh Fruit",
        Category::Dairy => "Dairy Product",
        Category::Meat => "Meat Product",
    }
    .to_string()
}
