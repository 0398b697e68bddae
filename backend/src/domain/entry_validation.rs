//! Payload validation for entry creation and like updates.
//!
//! Validation is pure: it never touches storage, so a rejected payload can
//! never leave a partial write behind.

use serde_json::Value;

use crate::domain::{EntryContent, Error};

/// Entry payload failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryValidationError {
    /// `title` or `url` was absent or empty.
    #[error("title and url are required")]
    MissingRequiredField,
    /// `likes` was present, truthy, and not an integer.
    #[error("likes must be an integer")]
    InvalidLikes,
}

impl From<EntryValidationError> for Error {
    fn from(value: EntryValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

/// Unvalidated creation payload as received from a client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDraft {
    /// Requested title.
    pub title: Option<String>,
    /// Requested author name.
    pub author: Option<String>,
    /// Requested URL.
    pub url: Option<String>,
    /// Requested like count, any JSON value.
    pub likes: Option<Value>,
}

/// Creation payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEntry {
    content: EntryContent,
    likes: i64,
}

impl ValidEntry {
    /// Normalised text fields.
    pub fn content(&self) -> &EntryContent {
        &self.content
    }

    /// Normalised like count.
    pub fn likes(&self) -> i64 {
        self.likes
    }

    /// Split into parts for persistence.
    pub fn into_parts(self) -> (EntryContent, i64) {
        (self.content, self.likes)
    }
}

/// Validate a creation payload.
///
/// `title` and `url` must be non-empty; a missing `author` becomes `""`;
/// `likes` goes through [`normalize_likes`].
///
/// # Examples
/// ```
/// use bloglist::domain::{EntryDraft, validate_entry};
///
/// let draft = EntryDraft {
///     title: Some("X".into()),
///     url: Some("Y".into()),
///     ..EntryDraft::default()
/// };
/// let valid = validate_entry(draft).unwrap();
/// assert_eq!(valid.likes(), 0);
/// assert_eq!(valid.content().author, "");
/// ```
pub fn validate_entry(draft: EntryDraft) -> Result<ValidEntry, EntryValidationError> {
    let EntryDraft {
        title,
        author,
        url,
        likes,
    } = draft;

    let (Some(title), Some(url)) = (non_empty(title), non_empty(url)) else {
        return Err(EntryValidationError::MissingRequiredField);
    };
    let likes = normalize_likes(likes.as_ref())?;

    Ok(ValidEntry {
        content: EntryContent {
            title,
            author: author.unwrap_or_default(),
            url,
        },
        likes,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// Collapse a client-supplied like count to an integer.
///
/// Absent and falsy values (`null`, `false`, `0`, `""`) become `0`; that
/// folds an explicit zero and an omitted field into the same value. Integral
/// numbers pass through, as do `true` (one) and strings holding an integer.
/// Anything else is rejected.
pub fn normalize_likes(raw: Option<&Value>) -> Result<i64, EntryValidationError> {
    let Some(value) = raw else {
        return Ok(0);
    };
    match value {
        Value::Null | Value::Bool(false) => Ok(0),
        Value::Bool(true) => Ok(1),
        Value::Number(number) => number_to_likes(number),
        Value::String(text) if text.is_empty() => Ok(0),
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| EntryValidationError::InvalidLikes),
        Value::Array(_) | Value::Object(_) => Err(EntryValidationError::InvalidLikes),
    }
}

fn number_to_likes(number: &serde_json::Number) -> Result<i64, EntryValidationError> {
    if let Some(int) = number.as_i64() {
        return Ok(int);
    }
    match number.as_f64() {
        Some(float) if float.fract() == 0.0 && float.abs() < 9.0e15 => {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "integral value checked to be within the exact f64 range"
            )]
            let int = float as i64;
            Ok(int)
        }
        _ => Err(EntryValidationError::InvalidLikes),
    }
}
