use serde::Serialize;

use super::models::{Book, BookId, BookPatch};
use super::store::CatalogStore;
use super::CatalogError;

/// Result of a borrow attempt on an existing book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "book", rename_all = "lowercase")]
pub enum BorrowOutcome {
    /// One copy was taken; carries the updated record.
    Borrowed(Book),
    /// No copy was available; carries the untouched record.
    Rejected(Book),
}

impl BorrowOutcome {
    pub fn is_borrowed(&self) -> bool {
        matches!(self, BorrowOutcome::Borrowed(_))
    }

    pub fn book(&self) -> &Book {
        match self {
            BorrowOutcome::Borrowed(book) | BorrowOutcome::Rejected(book) => book,
        }
    }
}

/// Take one copy of `id` out of the stock.
///
/// Availability is re-read from the store; the caller's copy of the record is
/// never trusted.
pub fn borrow(store: &mut CatalogStore, id: &BookId) -> Result<BorrowOutcome, CatalogError> {
    let book = store
        .find(id)
        .ok_or_else(|| CatalogError::NotFound(id.clone()))?;

    if !book.is_available() {
        tracing::info!(book_id = %id, "borrow rejected, no copies available");
        return Ok(BorrowOutcome::Rejected(book.clone()));
    }

    let remaining = book.available_copies - 1;
    let updated = store
        .update(id, BookPatch::available_copies(remaining))?
        .cloned()
        .ok_or_else(|| CatalogError::NotFound(id.clone()))?;

    tracing::info!(book_id = %id, remaining, "book borrowed");
    Ok(BorrowOutcome::Borrowed(updated))
}
