use std::collections::BTreeSet;

use super::models::{Book, BookId, BookPatch, NewBook, MAX_POPULARITY};
use super::CatalogError;

/// In-memory, insertion-ordered book collection.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    books: Vec<Book>,
    default_cover_url: String,
}

impl CatalogStore {
    pub fn new(default_cover_url: impl Into<String>) -> Self {
        Self {
            books: Vec::new(),
            default_cover_url: default_cover_url.into(),
        }
    }

    /// Store pre-built records as-is, keeping their ids.
    ///
    /// Records that break the inventory invariant are skipped.
    pub fn with_books(default_cover_url: impl Into<String>, books: Vec<Book>) -> Self {
        let mut store = Self::new(default_cover_url);
        for book in books {
            if let Err(e) = check_invariants(&book) {
                tracing::warn!(book_id = %book.id, error = %e, "skipping invalid seed record");
                continue;
            }
            store.books.push(book);
        }
        store
    }

    /// Append a new record with a fresh id and every copy available.
    pub fn add(&mut self, new_book: NewBook) -> Book {
        let cover_url = self.resolve_cover(new_book.cover_url);
        let book = Book {
            id: BookId::generate(),
            title: new_book.title,
            author: new_book.author,
            genre: new_book.genre,
            isbn: new_book.isbn,
            published_year: new_book.published_year,
            available_copies: new_book.total_copies,
            total_copies: new_book.total_copies,
            cover_url,
            description: new_book.description,
            popularity: new_book.popularity.min(MAX_POPULARITY),
        };

        tracing::info!(book_id = %book.id, title = %book.title, "book added");
        self.books.push(book.clone());
        book
    }

    /// Merge `patch` into the record with `id`.
    ///
    /// Returns `Ok(None)` without touching anything when `id` is unknown. A
    /// patch whose result would break the inventory invariant is refused and
    /// the record is left unchanged.
    pub fn update(&mut self, id: &BookId, patch: BookPatch) -> Result<Option<&Book>, CatalogError> {
        let default_cover_url = self.default_cover_url.clone();
        let Some(book) = self.books.iter_mut().find(|book| &book.id == id) else {
            tracing::debug!(book_id = %id, "update ignored, unknown book");
            return Ok(None);
        };

        let mut updated = book.clone();
        apply_patch(&mut updated, patch, &default_cover_url);
        check_invariants(&updated)?;

        *book = updated;
        tracing::debug!(book_id = %id, "book updated");
        Ok(Some(&*book))
    }

    /// Remove the record with `id`, returning it if it existed.
    pub fn remove(&mut self, id: &BookId) -> Option<Book> {
        let index = self.books.iter().position(|book| &book.id == id)?;
        let removed = self.books.remove(index);
        tracing::info!(book_id = %id, title = %removed.title, "book removed");
        Some(removed)
    }

    pub fn find(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|book| &book.id == id)
    }

    /// All records in insertion order.
    pub fn find_all(&self) -> &[Book] {
        &self.books
    }

    /// Distinct genres present in the collection, sorted.
    pub fn genres(&self) -> Vec<String> {
        self.books
            .iter()
            .map(|book| book.genre.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn resolve_cover(&self, cover_url: Option<String>) -> String {
        match cover_url {
            Some(url) if !url.trim().is_empty() => url,
            _ => self.default_cover_url.clone(),
        }
    }
}

fn apply_patch(book: &mut Book, patch: BookPatch, default_cover_url: &str) {
    let BookPatch {
        title,
        author,
        genre,
        isbn,
        published_year,
        available_copies,
        total_copies,
        cover_url,
        description,
        popularity,
    } = patch;

    if let Some(title) = title {
        book.title = title;
    }
    if let Some(author) = author {
        book.author = author;
    }
    if let Some(genre) = genre {
        book.genre = genre;
    }
    if let Some(isbn) = isbn {
        book.isbn = isbn;
    }
    if let Some(published_year) = published_year {
        book.published_year = published_year;
    }
    if let Some(available_copies) = available_copies {
        book.available_copies = available_copies;
    }
    if let Some(total_copies) = total_copies {
        book.total_copies = total_copies;
    }
    if let Some(cover_url) = cover_url {
        book.cover_url = if cover_url.trim().is_empty() {
            default_cover_url.to_string()
        } else {
            cover_url
        };
    }
    if let Some(description) = description {
        book.description = description;
    }
    if let Some(popularity) = popularity {
        book.popularity = popularity;
    }
}

fn check_invariants(book: &Book) -> Result<(), CatalogError> {
    if book.available_copies > book.total_copies {
        return Err(CatalogError::invalid(
            "availableCopies",
            format!(
                "{} available exceeds {} total",
                book.available_copies, book.total_copies
            ),
        ));
    }
    if book.popularity > MAX_POPULARITY {
        return Err(CatalogError::invalid("popularity", "must be between 0 and 100"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::seed::sample_books;

    const COVER: &str = "https://covers.test/default.jpg";

    fn sample_store() -> CatalogStore {
        CatalogStore::with_books(COVER, sample_books())
    }

    fn new_book(title: &str, total_copies: u32) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Ursula K. Le Guin".to_string(),
            genre: "Fantasy".to_string(),
            isbn: "978-0-547-77374-2".to_string(),
            published_year: 1968,
            total_copies,
            cover_url: None,
            description: "Wizardry on an archipelago.".to_string(),
            popularity: 80,
        }
    }

    fn ids(store: &CatalogStore) -> Vec<&str> {
        store.find_all().iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn add_assigns_id_and_full_availability() {
        let mut store = sample_store();
        let added = store.add(new_book("A Wizard of Earthsea", 4));

        assert!(!["1", "2", "3", "4", "5"].contains(&added.id.as_str()));
        assert_eq!(added.available_copies, 4);
        assert_eq!(added.total_copies, 4);
        assert_eq!(added.cover_url, COVER);

        let all = store.find_all();
        assert_eq!(all.len(), 6);
        assert_eq!(all.last(), Some(&added));
    }

    #[test]
    fn add_generates_distinct_ids() {
        let mut store = CatalogStore::new(COVER);
        let first = store.add(new_book("One", 1));
        let second = store.add(new_book("Two", 1));
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn add_keeps_explicit_cover() {
        let mut store = CatalogStore::new(COVER);
        let mut book = new_book("Covered", 1);
        book.cover_url = Some("https://covers.test/earthsea.jpg".to_string());
        assert_eq!(store.add(book).cover_url, "https://covers.test/earthsea.jpg");

        let mut blank = new_book("Blank cover", 1);
        blank.cover_url = Some("  ".to_string());
        assert_eq!(store.add(blank).cover_url, COVER);
    }

    #[test]
    fn update_merges_only_given_fields() {
        let mut store = sample_store();
        let before = store.find(&"2".into()).cloned().unwrap();

        let patch = BookPatch {
            title: Some("To Kill a Mockingbird (50th Anniversary)".to_string()),
            popularity: Some(99),
            ..BookPatch::default()
        };
        let updated = store.update(&"2".into(), patch).unwrap().cloned().unwrap();

        assert_eq!(updated.title, "To Kill a Mockingbird (50th Anniversary)");
        assert_eq!(updated.popularity, 99);
        assert_eq!(updated.author, before.author);
        assert_eq!(updated.available_copies, before.available_copies);
        assert_eq!(ids(&store), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut store = sample_store();
        let before = store.find_all().to_vec();

        let result = store.update(&"missing".into(), BookPatch::available_copies(0));
        assert_eq!(result, Ok(None));
        assert_eq!(store.find_all(), before.as_slice());
    }

    #[test]
    fn update_refuses_availability_above_total() {
        let mut store = sample_store();

        let err = store
            .update(&"3".into(), BookPatch::available_copies(4))
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Validation {
                field: "availableCopies",
                ..
            }
        ));
        assert_eq!(store.find(&"3".into()).unwrap().available_copies, 1);

        // Shrinking the total below what is available is refused the same way.
        let patch = BookPatch {
            total_copies: Some(2),
            ..BookPatch::default()
        };
        assert!(store.update(&"4".into(), patch).is_err());
        assert_eq!(store.find(&"4".into()).unwrap().total_copies, 6);
    }

    #[test]
    fn update_refuses_popularity_above_hundred() {
        let mut store = sample_store();
        let patch = BookPatch {
            popularity: Some(101),
            ..BookPatch::default()
        };
        assert!(store.update(&"1".into(), patch).is_err());
        assert_eq!(store.find(&"1".into()).unwrap().popularity, 95);
    }

    #[test]
    fn update_with_blank_cover_restores_default() {
        let mut store = sample_store();
        let patch = BookPatch {
            cover_url: Some(String::new()),
            ..BookPatch::default()
        };
        let book = store.update(&"1".into(), patch).unwrap().unwrap();
        assert_eq!(book.cover_url, COVER);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = sample_store();

        let removed = store.remove(&"3".into()).unwrap();
        assert_eq!(removed.title, "1984");
        assert_eq!(ids(&store), vec!["1", "2", "4", "5"]);

        assert!(store.remove(&"3".into()).is_none());
        assert_eq!(ids(&store), vec!["1", "2", "4", "5"]);
    }

    #[test]
    fn genres_are_distinct_and_sorted() {
        let store = sample_store();
        assert_eq!(store.genres(), vec!["Fiction", "Romance", "Science Fiction"]);
    }

    #[test]
    fn invalid_seed_records_are_skipped() {
        let mut books = sample_books();
        books[0].available_copies = books[0].total_copies + 1;

        let store = CatalogStore::with_books(COVER, books);
        assert_eq!(ids(&store), vec!["2", "3", "4", "5"]);
    }

    #[test]
    fn invariant_holds_for_every_record() {
        let mut store = sample_store();
        store.add(new_book("Zero copies", 0));
        for book in store.find_all() {
            assert!(book.available_copies <= book.total_copies, "{}", book.title);
        }
    }
}
