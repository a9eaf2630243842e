//! Title validation applied by callers before dispatching `Add`.
//!
//! The store only refuses titles that are empty after trimming; the length
//! bounds here belong to the input surface.

use thiserror::Error;

/// Shortest accepted title, in characters after trimming
pub const MIN_TITLE_CHARS: usize = 3;

/// Longest accepted title, in characters after trimming
pub const MAX_TITLE_CHARS: usize = 200;

/// Why a title was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TitleError {
    /// Nothing left after trimming
    #[error("Please enter a todo title")]
    Empty,

    /// Fewer than [`MIN_TITLE_CHARS`] characters
    #[error("Todo title must be at least {min} characters long")]
    TooShort {
        /// Minimum length
        min: usize,
    },

    /// More than [`MAX_TITLE_CHARS`] characters
    #[error("Todo title must be at most {max} characters long")]
    TooLong {
        /// Maximum length
        max: usize,
    },
}

/// Trims `input` and checks it against the length bounds
///
/// Lengths count Unicode scalar values, not bytes.
///
/// # Errors
///
/// Returns a [`TitleError`] describing the first bound that fails.
pub fn validate_title(input: &str) -> Result<String, TitleError> {
    let trimmed = input.trim();
    let chars = trimmed.chars().count();

    if chars == 0 {
        return Err(TitleError::Empty);
    }
    if chars < MIN_TITLE_CHARS {
        return Err(TitleError::TooShort {
            min: MIN_TITLE_CHARS,
        });
    }
    if chars > MAX_TITLE_CHARS {
        return Err(TitleError::TooLong {
            max: MAX_TITLE_CHARS,
        });
    }

    Ok(trimmed.to_string())
}
