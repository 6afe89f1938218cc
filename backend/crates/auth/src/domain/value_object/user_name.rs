//! User Name Value Object
//!
//! ユーザー名はログインと表示に使う公開ハンドル。
//!
//! ## 設計方針
//! - ASCII 英数字と `_ . -` のみ許可
//! - 大文字入力は受け付けるが、一意性チェックは小文字の canonical で行う
//! - NFKC 正規化 → trim → 検証 の順で処理
//!
//! ## 不変条件
//! - 長さ: 3〜32文字（正規化後）

use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 32;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    Empty,
    TooShort { length: usize, min: usize },
    TooLong { length: usize, max: usize },
    InvalidCharacter { char: char, position: usize },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "User name cannot be empty"),
            Self::TooShort { length, min } => {
                write!(f, "User name is too short ({length} chars, minimum {min})")
            }
            Self::TooLong { length, max } => {
                write!(f, "User name is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => write!(
                f,
                "Invalid character '{char}' at position {position}. Only A-Z, a-z, 0-9, _, ., - are allowed"
            ),
        }
    }
}

impl std::error::Error for UserNameError {}

// ============================================================================
// UserName Value Object
// ============================================================================

/// Validated, normalized user name
///
/// # Storage
/// - `original`: trimmed, NFKC normalized, preserves case
/// - `canonical`: lowercase form for uniqueness checks and lookups
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    /// Create a new UserName from raw input
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let original = input.as_ref().nfkc().collect::<String>().trim().to_string();
        Self::validate(&original)?;
        let canonical = original.to_ascii_lowercase();
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(original: impl Into<String>) -> Self {
        let original = original.into();
        let canonical = original.to_ascii_lowercase();
        Self {
            original,
            canonical,
        }
    }

    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    fn validate(name: &str) -> Result<(), UserNameError> {
        if name.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = name.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort {
                length,
                min: USER_NAME_MIN_LENGTH,
            });
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if let Some((position, char)) = name
            .chars()
            .enumerate()
            .find(|(_, c)| !(c.is_ascii_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(c)))
        {
            return Err(UserNameError::InvalidCharacter { char, position });
        }

        Ok(())
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserName")
            .field("original", &self.original)
            .field("canonical", &self.canonical)
            .finish()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl TryFrom<&str> for UserName {
    type Error = UserNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(UserName::new("alice").is_ok());
        assert!(UserName::new("bob_smith").is_ok());
        assert!(UserName::new("j.doe-99").is_ok());
        assert!(UserName::new("abc").is_ok());
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_canonical_is_lowercase() {
        let name = UserName::new("  Alice ").unwrap();
        assert_eq!(name.original(), "Alice");
        assert_eq!(name.canonical(), "alice");
        assert_eq!(name.to_string(), "Alice");
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(UserName::new("   "), Err(UserNameError::Empty));
        assert!(matches!(
            UserName::new("ab"),
            Err(UserNameError::TooShort { length: 2, .. })
        ));
        assert!(matches!(
            UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)),
            Err(UserNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            UserName::new("al ice"),
            Err(UserNameError::InvalidCharacter {
                char: ' ',
                position: 2
            })
        );
        assert!(UserName::new("alice@x").is_err());
        assert!(UserName::new("アリス").is_err());
    }

    #[test]
    fn test_nfkc_fullwidth() {
        // Full-width ASCII folds to plain ASCII
        let name = UserName::new("ａｌｉｃｅ").unwrap();
        assert_eq!(name.canonical(), "alice");
    }
}
