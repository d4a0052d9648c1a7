//! crates/fridge_core/src/preferences.rs

use crate::domain::Preferences;
use crate::error::{require_at_least, ValidationError, ValidationResult};

pub const MAX_EXPIRY_ALERT_DAYS: u32 = 30;

/// Checks a candidate preferences record before it replaces the current one.
pub fn validate(prefs: &Preferences) -> ValidationResult<()> {
    require_at_least("household_size", 1, i64::from(prefs.household_size))?;
    if prefs.expiry_alert_days > MAX_EXPIRY_ALERT_DAYS {
        return Err(ValidationError::TooLarge {
            field: "expiry_alert_days",
            max: i64::from(MAX_EXPIRY_ALERT_DAYS),
            actual: i64::from(prefs.expiry_alert_days),
        });
    }
    if let Some(budget) = prefs.monthly_budget_cents {
        require_at_least("monthly_budget_cents", 0, budget)?;
    }
    Ok(())
}
