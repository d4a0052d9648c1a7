//! crates/fridge_core/src/budget.rs
//!
//! Grocery spending, tracked in cents.

use chrono::Datelike;
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{Category, Expense};
use crate::error::{require_at_least, require_at_most, require_non_empty, ValidationResult};

/// Largest single expense accepted, in cents.
pub const MAX_EXPENSE_CENTS: i64 = 100_000_000;

#[derive(Debug, Clone, Default)]
pub struct BudgetTracker {
    expenses: Vec<Expense>,
}

impl BudgetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, expense: Expense) -> ValidationResult<Uuid> {
        require_non_empty("description", &expense.description)?;
        require_at_least("amount_cents", 1, expense.amount_cents)?;
        require_at_most("amount_cents", MAX_EXPENSE_CENTS, expense.amount_cents)?;
        let id = expense.id;
        debug!(%id, amount_cents = expense.amount_cents, "Recording expense");
        self.expenses.push(expense);
        Ok(id)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Expense> {
        let index = self.expenses.iter().position(|e| e.id == id)?;
        Some(self.expenses.remove(index))
    }

    /// Expenses in the given month, oldest first.
    pub fn expenses_in_month(&self, year: i32, month: u32) -> Vec<Expense> {
        let mut matching: Vec<_> = self.in_month(year, month).cloned().collect();
        matching.sort_by_key(|e| e.date);
        matching
    }

    pub fn spent_in_month(&self, year: i32, month: u32) -> i64 {
        self.in_month(year, month)
            .fold(0i64, |total, e| total.saturating_add(e.amount_cents))
    }

    /// Negative when the month is over budget.
    pub fn remaining_in_month(&self, limit_cents: i64, year: i32, month: u32) -> i64 {
        limit_cents.saturating_sub(self.spent_in_month(year, month))
    }

    /// Totals per category for the month. Uncategorized spending is keyed by `None`.
    pub fn by_category(&self, year: i32, month: u32) -> BTreeMap<Option<Category>, i64> {
        let mut totals = BTreeMap::new();
        for expense in self.in_month(year, month) {
            let total = totals.entry(expense.category).or_insert(0i64);
            *total = total.saturating_add(expense.amount_cents);
        }
        totals
    }

    fn in_month(&self, year: i32, month: u32) -> impl Iterator<Item = &Expense> {
        self.expenses
            .iter()
            .filter(move |e| e.date.year() == year && e.date.month() == month)
    }
}
