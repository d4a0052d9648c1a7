//! crates/fridge_core/src/shopping.rs
//!
//! The shopping list. Unchecked entries with the same name (ignoring case) are merged.

use tracing::debug;
use uuid::Uuid;

use crate::domain::{RecipeSummary, ShoppingItem};
use crate::error::{require_at_least, require_at_most, require_non_empty, ValidationResult};

/// Largest quantity a single shopping list entry can hold.
pub const MAX_QUANTITY: u32 = 9_999;

#[derive(Debug, Clone, Default)]
pub struct ShoppingList {
    items: Vec<ShoppingItem>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `item`, or bumps the quantity of an unchecked entry with the same name.
    ///
    /// Returns the id of the entry that now holds the item.
    pub fn add(&mut self, item: ShoppingItem) -> ValidationResult<Uuid> {
        require_non_empty("name", &item.name)?;
        require_at_least("quantity", 1, i64::from(item.quantity))?;
        require_at_most("quantity", i64::from(MAX_QUANTITY), i64::from(item.quantity))?;

        if let Some(existing) = self.find_unchecked_mut(&item.name) {
            let merged = existing.quantity.saturating_add(item.quantity);
            require_at_most("quantity", i64::from(MAX_QUANTITY), i64::from(merged))?;
            existing.quantity = merged;
            if existing.category.is_none() {
                existing.category = item.category;
            }
            debug!(id = %existing.id, quantity = existing.quantity, "Merged shopping list entry");
            return Ok(existing.id);
        }

        let id = item.id;
        debug!(%id, name = %item.name, "Adding shopping list entry");
        self.items.push(item);
        Ok(id)
    }

    pub fn get(&self, id: Uuid) -> Option<&ShoppingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<ShoppingItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Flips the checked flag, returning the new value.
    pub fn toggle(&mut self, id: Uuid) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.checked = !item.checked;
        Some(item.checked)
    }

    /// Drops all checked entries, returning how many were removed.
    pub fn clear_checked(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.checked);
        before - self.items.len()
    }

    /// Puts every missing ingredient of `recipe` on the list. Returns the number of names added.
    pub fn add_missing_ingredients(&mut self, recipe: &RecipeSummary) -> usize {
        let mut added = 0;
        for name in &recipe.missing_ingredients {
            if name.trim().is_empty() {
                continue;
            }
            if self.find_unchecked_mut(name).is_some() {
                continue;
            }
            self.items.push(ShoppingItem::new(name.trim(), 1, None));
            added += 1;
        }
        debug!(recipe_id = recipe.id, added, "Added missing recipe ingredients");
        added
    }

    /// Unchecked entries first, then checked ones, each group in insertion order.
    pub fn items(&self) -> Vec<ShoppingItem> {
        let (mut open, done): (Vec<_>, Vec<_>) =
            self.items.iter().cloned().partition(|item| !item.checked);
        open.extend(done);
        open
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn find_unchecked_mut(&mut self, name: &str) -> Option<&mut ShoppingItem> {
        let needle = name.trim().to_lowercase();
        self.items
            .iter_mut()
            .find(|item| !item.checked && item.name.trim().to_lowercase() == needle)
    }
}
