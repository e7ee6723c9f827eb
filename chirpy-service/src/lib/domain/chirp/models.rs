use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::chirp::errors::ChirpBodyError;
use crate::chirp::errors::ChirpIdError;
use crate::user::models::UserId;

/// Words masked out of every chirp, compared case-insensitively.
const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];
const PROFANITY_MASK: &str = "****";

/// Short post authored by a user.
#[derive(Debug, Clone)]
pub struct Chirp {
    pub id: ChirpId,
    pub body: ChirpBody,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChirpId(pub Uuid);

impl ChirpId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, ChirpIdError> {
        Uuid::parse_str(s)
            .map(ChirpId)
            .map_err(|e| ChirpIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ChirpId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChirpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated, profanity-filtered chirp text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChirpBody(String);

impl ChirpBody {
    /// Maximum length in characters.
    pub const MAX_LENGTH: usize = 140;

    /// Validate and clean a chirp body.
    ///
    /// Length is checked on the raw input. Each space-separated word matching
    /// a profane word in any letter case is replaced by `****`; punctuation
    /// attached to a word prevents the match.
    ///
    /// # Errors
    /// * `Empty` - Body is empty or whitespace
    /// * `TooLong` - Body exceeds 140 characters
    pub fn new(body: String) -> Result<Self, ChirpBodyError> {
        if body.trim().is_empty() {
            return Err(ChirpBodyError::Empty);
        }

        let length = body.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(ChirpBodyError::TooLong {
                length,
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(mask_profanity(&body)))
    }

    /// Wrap a body read back from storage, already validated on the way in.
    pub fn from_persisted(body: String) -> Self {
        Self(body)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn mask_profanity(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            let lowered = word.to_lowercase();
            if PROFANE_WORDS.contains(&lowered.as_str()) {
                PROFANITY_MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ordering of chirp listings by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}
