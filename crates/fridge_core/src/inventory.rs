//! crates/fridge_core/src/inventory.rs
//!
//! The authoritative in-memory list of fridge items.
//!
//! Items are kept in insertion order. Sorting is applied to the returned view only.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{Category, InventoryItem};

/// View orderings for inventory listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    NameAsc,
    NameDesc,
    ExpiryAsc,
    ExpiryDesc,
    Category,
}

impl SortOption {
    fn compare(&self, a: &InventoryItem, b: &InventoryItem) -> Ordering {
        match self {
            SortOption::NameAsc => cmp_names(a, b),
            SortOption::NameDesc => cmp_names(b, a),
            SortOption::ExpiryAsc => a.expiration_date.cmp(&b.expiration_date),
            SortOption::ExpiryDesc => b.expiration_date.cmp(&a.expiration_date),
            SortOption::Category => a.category.cmp(&b.category),
        }
    }
}

fn cmp_names(a: &InventoryItem, b: &InventoryItem) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

#[derive(Debug, Clone, Default)]
pub struct InventoryStore {
    items: Vec<InventoryItem>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with a handful of items spread across every expiry bucket.
    pub fn with_sample_items(today: NaiveDate) -> Self {
        let day = |n: i64| today + Duration::days(n);
        let mut store = Self::new();
        for item in [
            InventoryItem::new("Milk", Category::Dairy, day(5), 1),
            InventoryItem::new("Spinach", Category::Vegetable, day(1), 1),
            InventoryItem::new("Chicken Thighs", Category::Meat, day(2), 2),
            InventoryItem::new("Blueberries", Category::Fruit, day(-1), 1),
            InventoryItem::new("Greek Yogurt", Category::Dairy, day(12), 4),
            InventoryItem::new("Carrots", Category::Vegetable, day(20), 6),
        ] {
            store.add(item);
        }
        store
    }

    pub fn add(&mut self, item: InventoryItem) {
        debug!(id = %item.id, name = %item.name, "Adding inventory item");
        self.items.push(item);
    }

    /// Removes the item with `id`, returning it if it was present.
    pub fn remove(&mut self, id: Uuid) -> Option<InventoryItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        debug!(%id, "Removing inventory item");
        Some(self.items.remove(index))
    }

    /// Replaces the item with the same id in place. Returns `false` if no such item exists.
    pub fn update(&mut self, item: InventoryItem) -> bool {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                debug!(id = %item.id, "Updating inventory item");
                *existing = item;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self, sort: Option<SortOption>) -> Vec<InventoryItem> {
        sorted(self.items.iter().cloned().collect(), sort)
    }

    pub fn items_in(&self, category: Category, sort: Option<SortOption>) -> Vec<InventoryItem> {
        let matching = self
            .items
            .iter()
            .filter(|item| item.category == category)
            .cloned()
            .collect();
        sorted(matching, sort)
    }

    /// Case-insensitive substring match on item names.
    pub fn search(&self, query: &str, sort: Option<SortOption>) -> Vec<InventoryItem> {
        let needle = query.trim().to_lowercase();
        let matching = self
            .items
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        sorted(matching, sort)
    }

    /// Drops every item whose expiration date is before `today`, returning how many were removed.
    pub fn remove_expired(&mut self, today: NaiveDate) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.is_expired(today));
        let removed = before - self.items.len();
        debug!(removed, "Removed expired inventory items");
        removed
    }

    /// Items that have not expired yet but will within `days`, soonest first.
    pub fn expiring_within(&self, today: NaiveDate, days: u32) -> Vec<InventoryItem> {
        let limit = i64::from(days);
        let matching = self
            .items
            .iter()
            .filter(|item| (0..=limit).contains(&item.days_until_expiry(today)))
            .cloned()
            .collect();
        sorted(matching, Some(SortOption::ExpiryAsc))
    }

    /// Distinct names of non-expired items, soonest-expiring first.
    pub fn ingredient_names(&self, today: NaiveDate) -> Vec<String> {
        let mut seen = HashSet::new();
        self.items(Some(SortOption::ExpiryAsc))
            .into_iter()
            .filter(|item| !item.is_expired(today))
            .filter(|item| seen.insert(item.name.to_lowercase()))
            .map(|item| item.name)
            .collect()
    }
}

fn sorted(mut items: Vec<InventoryItem>, sort: Option<SortOption>) -> Vec<InventoryItem> {
    if let Some(option) = sort {
        // `sort_by` is stable, so ties keep insertion order.
        items.sort_by(|a, b| option.compare(a, b));
    }
    items
}
