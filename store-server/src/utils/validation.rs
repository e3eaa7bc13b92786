//! Input validation helpers
//!
//! Centralized text length constants for fields that bypass the
//! `validator` derives on the shared payload types (free-form text
//! forwarded into the order lifecycle).

use shared::error::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Return reasons, comments, ticket follow-up notes
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: user ids, waybills, gateway ids
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank_and_oversized() {
        assert!(validate_required_text("defective screen", "reason", MAX_NOTE_LEN).is_ok());
        assert!(validate_required_text("   ", "reason", MAX_NOTE_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(MAX_NOTE_LEN + 1), "reason", MAX_NOTE_LEN).is_err());
    }

    #[test]
    fn optional_text_checks_only_when_present() {
        assert!(validate_optional_text(&None, "comments", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("ok".into()), "comments", MAX_NOTE_LEN).is_ok());
        assert!(
            validate_optional_text(&Some("y".repeat(MAX_NOTE_LEN + 1)), "comments", MAX_NOTE_LEN)
                .is_err()
        );
    }
}
