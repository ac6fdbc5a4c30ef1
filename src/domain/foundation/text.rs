//! Length-checked text helpers used by the entity constructors.

use super::ValidationError;

/// Trims `value` and checks its character count is within `min..=max`.
pub fn bounded_text(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() && min > 0 {
        return Err(ValidationError::empty_field(field));
    }
    let len = trimmed.chars().count();
    if len < min || len > max {
        return Err(ValidationError::invalid_length(field, min, max));
    }
    Ok(trimmed.to_string())
}

/// Like [`bounded_text`] but treats a blank value as absent.
pub fn optional_text(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => bounded_text(field, v, 1, max).map(Some),
    }
}

/// Lower-cases, trims and collapses inner whitespace.
pub fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_text_trims() {
        assert_eq!(bounded_text("title", "  Hola  ", 1, 10).unwrap(), "Hola");
    }

    #[test]
    fn bounded_text_rejects_blank() {
        assert_eq!(
            bounded_text("title", "   ", 1, 10),
            Err(ValidationError::empty_field("title"))
        );
    }

    #[test]
    fn bounded_text_counts_chars_not_bytes() {
        assert!(bounded_text("word", "ñandú", 1, 5).is_ok());
        assert!(bounded_text("word", "ñandúes", 1, 5).is_err());
    }

    #[test]
    fn optional_text_treats_blank_as_none() {
        assert_eq!(optional_text("bio", Some("  "), 10).unwrap(), None);
        assert_eq!(optional_text("bio", None, 10).unwrap(), None);
        assert_eq!(optional_text("bio", Some(" x "), 10).unwrap(), Some("x".to_string()));
    }

    #[test]
    fn normalize_collapses_whitespace_and_case() {
        assert_eq!(normalize("  El   Perro\tGrande "), "el perro grande");
    }
}
