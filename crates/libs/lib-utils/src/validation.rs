//! # Validation Utilities
//!
//! Required-field checks shared by request DTOs. Each helper returns the
//! message to show the client when the field is missing.

/// Validate that a string field is present and not blank.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("field {} is required", field_name))
    } else {
        Ok(())
    }
}

/// Validate that an integer field is present. Zero counts as missing.
pub fn validate_non_zero(value: i64, field_name: &str) -> Result<(), String> {
    if value == 0 {
        Err(format!("field {} is required", field_name))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Ada", "name").is_ok());
        assert_eq!(
            validate_not_empty("   ", "name"),
            Err("field name is required".to_string())
        );
    }

    #[test]
    fn test_validate_non_zero() {
        assert!(validate_non_zero(30, "age").is_ok());
        assert!(validate_non_zero(-1, "age").is_ok());
        assert_eq!(validate_non_zero(0, "age"), Err("field age is required".to_string()));
    }
}
