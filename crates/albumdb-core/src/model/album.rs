use serde::{Deserialize, Serialize};

use crate::model::ids::AlbumId;

/// A stored album entry, keyed by its unique artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub artist: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub is_classic: bool,
}

/// The values needed to insert an album. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAlbum {
    pub artist: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub is_classic: bool,
}

impl NewAlbum {
    #[must_use]
    pub fn new(artist: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            genre: None,
            year: None,
            is_classic: false,
        }
    }

    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    #[must_use]
    pub const fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    #[must_use]
    pub const fn classic(mut self, is_classic: bool) -> Self {
        self.is_classic = is_classic;
        self
    }
}

/// Result of an insert attempt.
///
/// An artist that is already present is an expected outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(AlbumId),
    AlreadyExists,
}

impl InsertOutcome {
    #[must_use]
    pub const fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }
}
