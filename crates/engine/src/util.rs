//! Internal helpers for form validation.
//!
//! These utilities are **not** part of the public API. They centralize the
//! checks every operation applies to raw form values.

use crate::{EngineError, ResultEngine};

pub(crate) const USERNAME_MAX_LEN: usize = 15;
pub(crate) const PASSWORD_MAX_LEN: usize = 10;
pub(crate) const MEMBERSHIP_TIME_MAX_LEN: usize = 10;

/// Trim `value` and reject it when empty.
pub(crate) fn required<'a>(value: &'a str, label: &str) -> ResultEngine<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::MissingField(format!("{label} is required")));
    }
    Ok(trimmed)
}

/// Trim an optional value, treating blank input as absent.
pub(crate) fn optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Reject values longer than `max` characters.
pub(crate) fn max_len(value: &str, max: usize, label: &str) -> ResultEngine<()> {
    if value.chars().count() > max {
        return Err(EngineError::InvalidField(format!(
            "{label}: at most {max} characters"
        )));
    }
    Ok(())
}

/// Parse a member id coming from a form.
pub fn parse_member_id(raw: &str) -> ResultEngine<i32> {
    let raw = required(raw, "id")?;
    raw.parse()
        .map_err(|_| EngineError::InvalidField(format!("id: '{raw}' is not a number")))
}
