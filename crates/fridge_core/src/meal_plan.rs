//! crates/fridge_core/src/meal_plan.rs
//!
//! Meals scheduled by day and slot.

use chrono::{Duration, NaiveDate};
use tracing::debug;
use uuid::Uuid;

use crate::domain::MealPlanEntry;
use crate::error::{require_non_empty, ValidationResult};

#[derive(Debug, Clone, Default)]
pub struct MealPlan {
    entries: Vec<MealPlanEntry>,
}

impl MealPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, entry: MealPlanEntry) -> ValidationResult<Uuid> {
        require_non_empty("title", &entry.title)?;
        let id = entry.id;
        debug!(%id, date = %entry.date, slot = ?entry.slot, "Scheduling meal");
        self.entries.push(entry);
        Ok(id)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<MealPlanEntry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Meals on `date`, breakfast through snack.
    pub fn entries_on(&self, date: NaiveDate) -> Vec<MealPlanEntry> {
        self.entries_between(date, date)
    }

    /// Seven days starting at `start`, ordered by date then slot.
    /// The window is cut short at the end of the calendar.
    pub fn week_from(&self, start: NaiveDate) -> Vec<MealPlanEntry> {
        let last = start
            .checked_add_signed(Duration::days(6))
            .unwrap_or(NaiveDate::MAX);
        self.entries_between(start, last)
    }

    /// Forgets meals planned before `date`. Returns how many were dropped.
    pub fn clear_before(&mut self, date: NaiveDate) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.date >= date);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entries_between(&self, first: NaiveDate, last: NaiveDate) -> Vec<MealPlanEntry> {
        let mut matching: Vec<_> = self
            .entries
            .iter()
            .filter(|entry| entry.date >= first && entry.date <= last)
            .cloned()
            .collect();
        matching.sort_by_key(|entry| (entry.date, entry.slot));
        matching
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MealSlot;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(date: NaiveDate, slot: MealSlot, title: &str) -> MealPlanEntry {
        MealPlanEntry {
            id: Uuid::new_v4(),
            date,
            slot,
            title: title.to_string(),
            recipe_id: None,
        }
    }

    fn titles(entries: &[MealPlanEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn day_view_orders_by_slot() {
        let mut plan = MealPlan::new();
        let day = date(2025, 4, 2);
        plan.schedule(entry(day, MealSlot::Dinner, "Curry")).unwrap();
        plan.schedule(entry(day, MealSlot::Breakfast, "Oats")).unwrap();
        plan.schedule(entry(date(2025, 4, 3), MealSlot::Lunch, "Salad")).unwrap();

        assert_eq!(titles(&plan.entries_on(day)), vec!["Oats", "Curry"]);
    }

    #[test]
    fn week_view_spans_seven_days() {
        let mut plan = MealPlan::new();
        let start = date(2025, 4, 7);
        plan.schedule(entry(start + Duration::days(6), MealSlot::Lunch, "Sunday")).unwrap();
        plan.schedule(entry(start + Duration::days(7), MealSlot::Lunch, "Next Monday")).unwrap();
        plan.schedule(entry(start, MealSlot::Snack, "Monday")).unwrap();
        plan.schedule(entry(start - Duration::days(1), MealSlot::Lunch, "Last Sunday")).unwrap();

        assert_eq!(titles(&plan.week_from(start)), vec!["Monday", "Sunday"]);
    }

    #[test]
    fn week_view_stops_at_the_end_of_the_calendar() {
        let mut plan = MealPlan::new();
        plan.schedule(entry(NaiveDate::MAX, MealSlot::Dinner, "Last supper")).unwrap();

        assert_eq!(titles(&plan.week_from(NaiveDate::MAX)), vec!["Last supper"]);
        assert_eq!(
            titles(&plan.week_from(NaiveDate::MAX - Duration::days(2))),
            vec!["Last supper"]
        );
    }

    #[test]
    fn blank_titles_are_rejected() {
        let mut plan = MealPlan::new();
        assert!(plan.schedule(entry(date(2025, 4, 7), MealSlot::Lunch, " ")).is_err());
        assert!(plan.is_empty());
    }

    #[test]
    fn remove_and_clear_before() {
        let mut plan = MealPlan::new();
        let old = entry(date(2025, 3, 1), MealSlot::Dinner, "Old");
        let keep = entry(date(2025, 3, 9), MealSlot::Dinner, "Keep");
        let keep_id = keep.id;
        plan.schedule(old).unwrap();
        plan.schedule(keep).unwrap();

        assert_eq!(plan.clear_before(date(2025, 3, 5)), 1);
        assert_eq!(plan.remove(keep_id).map(|e| e.title), Some("Keep".to_string()));
        assert_eq!(plan.remove(keep_id), None);
    }
}
