//! crates/fridge_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs carry no storage or transport concerns; derived values such as
//! days-until-expiry are computed on read against a caller-supplied "today".

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{require_at_least, require_non_empty, ValidationResult};

//=========================================================================================
// Categories
//=========================================================================================

/// The fixed set of product categories an inventory item can belong to.
///
/// Declaration order is the order used when sorting by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vegetable,
    Fruit,
    Dairy,
    Meat,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Vegetable,
        Category::Fruit,
        Category::Dairy,
        Category::Meat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vegetable => "vegetable",
            Category::Fruit => "fruit",
            Category::Dairy => "dairy",
            Category::Meat => "meat",
        }
    }

    /// Shelf life assumed when nothing more specific is known about a product.
    pub fn default_shelf_life_days(&self) -> u32 {
        match self {
            Category::Vegetable => 7,
            Category::Fruit => 7,
            Category::Dairy => 10,
            Category::Meat => 3,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vegetable" | "vegetables" => Ok(Category::Vegetable),
            "fruit" | "fruits" => Ok(Category::Fruit),
            "dairy" => Ok(Category::Dairy),
            "meat" => Ok(Category::Meat),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

//=========================================================================================
// Inventory
//=========================================================================================

/// Classification of an item's remaining shelf life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryStatus {
    Expired,
    Critical,
    Warning,
    Good,
}

impl ExpiryStatus {
    /// Buckets a days-until-expiry value.
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d < 0 => ExpiryStatus::Expired,
            d if d <= 1 => ExpiryStatus::Critical,
            d if d <= 3 => ExpiryStatus::Warning,
            _ => ExpiryStatus::Good,
        }
    }
}

/// A single product sitting in the fridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    pub expiration_date: NaiveDate,
    pub quantity: u32,
}

impl InventoryItem {
    pub fn new(name: impl Into<String>, category: Category, expiration_date: NaiveDate, quantity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            expiration_date,
            quantity,
        }
    }

    /// Whole days from `today` to the expiration date. Negative once expired.
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiration_date - today).num_days()
    }

    pub fn status(&self, today: NaiveDate) -> ExpiryStatus {
        ExpiryStatus::from_days(self.days_until_expiry(today))
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.days_until_expiry(today) < 0
    }

    /// Names must be non-blank and quantities positive.
    pub fn validate(&self) -> ValidationResult<()> {
        require_non_empty("name", &self.name)?;
        require_at_least("quantity", 1, i64::from(self.quantity))
    }
}

/// A best-effort guess about a scanned product, used once to pre-fill a new item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductGuess {
    pub name: String,
    pub category: Category,
    pub shelf_life_days: u32,
}

impl ProductGuess {
    /// Consumes the guess, producing an item that expires `shelf_life_days` after `today`.
    pub fn into_item(self, id: Uuid, today: NaiveDate) -> InventoryItem {
        InventoryItem {
            id,
            name: self.name,
            category: self.category,
            expiration_date: today + Duration::days(i64::from(self.shelf_life_days)),
            quantity: 1,
        }
    }
}

//=========================================================================================
// Recipes
//=========================================================================================

/// A recipe returned by an ingredient search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub image_url: Option<String>,
    pub used_ingredients: Vec<String>,
    pub missing_ingredients: Vec<String>,
}

//=========================================================================================
// Shopping list
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: u32,
    pub category: Option<Category>,
    pub checked: bool,
}

impl ShoppingItem {
    pub fn new(name: impl Into<String>, quantity: u32, category: Option<Category>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            quantity,
            category,
            checked: false,
        }
    }
}

//=========================================================================================
// Meal plan
//=========================================================================================

/// Meal slots within a day, declared in serving order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlanEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub slot: MealSlot,
    pub title: String,
    pub recipe_id: Option<i64>,
}

//=========================================================================================
// Budget
//=========================================================================================

/// A single grocery purchase. Amounts are held in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub amount_cents: i64,
    pub date: NaiveDate,
    pub category: Option<Category>,
}

//=========================================================================================
// Preferences
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub household_size: u32,
    /// Items expiring within this many days show up in the alerts list.
    pub expiry_alert_days: u32,
    pub dietary_restrictions: Vec<String>,
    pub monthly_budget_cents: Option<i64>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            household_size: 1,
            expiry_alert_days: 3,
            dietary_restrictions: Vec::new(),
            monthly_budget_cents: None,
        }
    }
}
