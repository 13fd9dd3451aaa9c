//! Student registry field rules.

use crate::error::CoreError;
use crate::types::Roll;

/// Minimum and maximum digit count for a parent mobile number.
const MOBILE_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;

/// Reject blank class, division or name labels.
pub fn validate_label(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

pub fn validate_roll(roll: Roll) -> Result<(), CoreError> {
    if roll < 1 {
        return Err(CoreError::Validation(
            "roll must be a positive number".into(),
        ));
    }
    Ok(())
}

/// A mobile number is digits with an optional leading `+`.
pub fn validate_mobile(mobile: &str) -> Result<(), CoreError> {
    let trimmed = mobile.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if !digits.chars().all(|c| c.is_ascii_digit()) || !MOBILE_DIGITS.contains(&digits.len()) {
        return Err(CoreError::Validation(format!(
            "mobile '{trimmed}' must be {}-{} digits",
            MOBILE_DIGITS.start(),
            MOBILE_DIGITS.end()
        )));
    }
    Ok(())
}
