//! Form input validation for hierarchy names.

use crate::config::MAX_NAME_LEN;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
  Empty,
  TooLong,
}

impl std::fmt::Display for NameError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Empty => write!(f, "Name cannot be empty"),
      Self::TooLong => write!(f, "Name cannot exceed {} characters", MAX_NAME_LEN),
    }
  }
}

impl std::error::Error for NameError {}

/// Validate a user-supplied name, returning the trimmed form.
///
/// Whitespace-only input counts as empty; the length cap applies to
/// characters, not bytes, so multibyte names are not unfairly rejected.
pub fn validate_name(input: &str) -> Result<String, NameError> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(NameError::Empty);
  }
  if trimmed.chars().count() > MAX_NAME_LEN {
    return Err(NameError::TooLong);
  }
  Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_valid_name_is_trimmed() {
    assert_eq!(validate_name("  Linear Algebra  ").unwrap(), "Linear Algebra");
  }

  #[test]
  fn test_empty_name_rejected() {
    assert_eq!(validate_name("").unwrap_err(), NameError::Empty);
  }

  #[test]
  fn test_whitespace_only_rejected() {
    assert_eq!(validate_name("   \t ").unwrap_err(), NameError::Empty);
  }

  #[test]
  fn test_name_at_limit_accepted() {
    let name = "a".repeat(MAX_NAME_LEN);
    assert_eq!(validate_name(&name).unwrap(), name);
  }

  #[test]
  fn test_name_over_limit_rejected() {
    let name = "a".repeat(MAX_NAME_LEN + 1);
    assert_eq!(validate_name(&name).unwrap_err(), NameError::TooLong);
  }

  #[test]
  fn test_multibyte_names_counted_by_chars() {
    // 120 Hangul syllables are 360 bytes but still within the limit
    let name = "학".repeat(MAX_NAME_LEN);
    assert!(validate_name(&name).is_ok());
  }
}
