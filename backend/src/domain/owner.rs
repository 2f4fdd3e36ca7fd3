//! Anonymous owner identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`OwnerId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OwnerIdValidationError {
    /// The identifier was empty or whitespace only.
    #[error("owner identifier must not be blank")]
    Blank,
}

/// Opaque client-minted identifier that scopes every note.
///
/// The server never registers or validates these beyond presence: any string
/// that is non-empty after trimming is accepted. Surrounding whitespace is
/// removed so `" u1 "` and `"u1"` address the same notes.
///
/// # Examples
/// ```
/// use notes_backend::domain::OwnerId;
///
/// let owner = OwnerId::new("  3f1c  ").expect("non-blank");
/// assert_eq!(owner.as_ref(), "3f1c");
/// assert!(OwnerId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerId(String);

impl OwnerId {
    /// Validate and construct an [`OwnerId`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, OwnerIdValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(OwnerIdValidationError::Blank);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for OwnerId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<OwnerId> for String {
    fn from(value: OwnerId) -> Self {
        value.0
    }
}

impl TryFrom<String> for OwnerId {
    type Error = OwnerIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
