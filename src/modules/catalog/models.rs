use serde::{Deserialize, Serialize};

use super::CatalogError;

/// Highest value `popularity` may take.
pub const MAX_POPULARITY: u8 = 100;

/// Genres offered when adding a book. Stored books may carry others.
pub const KNOWN_GENRES: [&str; 15] = [
    "Fiction",
    "Non-Fiction",
    "Science Fiction",
    "Fantasy",
    "Mystery",
    "Romance",
    "Thriller",
    "Biography",
    "History",
    "Science",
    "Philosophy",
    "Poetry",
    "Drama",
    "Adventure",
    "Horror",
];

/// Opaque book identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh time-ordered identifier for a newly added book.
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One catalog title.
///
/// `available_copies <= total_copies` and `popularity <= 100` hold for every
/// stored record; the store refuses mutations that would break them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub isbn: String,
    pub published_year: i32,
    pub available_copies: u32,
    pub total_copies: u32,
    pub cover_url: String,
    pub description: String,
    pub popularity: u8,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }

    /// Copies currently out on loan.
    pub fn borrowed_copies(&self) -> u32 {
        self.total_copies - self.available_copies
    }

    /// Popularity on a 0..=5 star scale, rounded half up.
    pub fn popularity_stars(&self) -> u8 {
        ((u16::from(self.popularity) + 10) / 20) as u8
    }
}

/// Fields supplied when adding a book; id and availability are assigned by
/// the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    #[serde(default)]
    pub isbn: String,
    pub published_year: i32,
    pub total_copies: u32,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "NewBook::default_popularity")]
    pub popularity: u8,
}

impl NewBook {
    fn default_popularity() -> u8 {
        50
    }

    /// Required-field checks the add form performs before submitting.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (field, value) in [
            ("title", &self.title),
            ("author", &self.author),
            ("genre", &self.genre),
        ] {
            if value.trim().is_empty() {
                return Err(CatalogError::invalid(field, "must not be blank"));
            }
        }
        if self.popularity > MAX_POPULARITY {
            return Err(CatalogError::invalid("popularity", "must be between 0 and 100"));
        }
        Ok(())
    }
}

/// Partial update of a stored book. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub isbn: Option<String>,
    pub published_year: Option<i32>,
    pub available_copies: Option<u32>,
    pub total_copies: Option<u32>,
    /// An empty string resets the cover to the default image.
    pub cover_url: Option<String>,
    pub description: Option<String>,
    pub popularity: Option<u8>,
}

impl BookPatch {
    pub fn available_copies(available_copies: u32) -> Self {
        Self {
            available_copies: Some(available_copies),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
