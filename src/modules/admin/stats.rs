use std::collections::BTreeSet;

use serde::Serialize;

use crate::modules::catalog::models::Book;

/// Dashboard figures derived from the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_books: usize,
    pub total_copies: u64,
    pub borrowed_copies: u64,
    pub available_copies: u64,
    pub genre_count: usize,
    /// Share of all copies currently on loan, rounded to a whole percent.
    pub borrowed_percent: u32,
}

impl CatalogStats {
    pub fn from_books(books: &[Book]) -> Self {
        let total_copies: u64 = books.iter().map(|b| u64::from(b.total_copies)).sum();
        let borrowed_copies: u64 = books.iter().map(|b| u64::from(b.borrowed_copies())).sum();
        let genre_count = books
            .iter()
            .map(|b| b.genre.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        Self {
            total_books: books.len(),
            total_copies,
            borrowed_copies,
            available_copies: total_copies - borrowed_copies,
            genre_count,
            borrowed_percent: percent(borrowed_copies, total_copies),
        }
    }
}

fn percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}
