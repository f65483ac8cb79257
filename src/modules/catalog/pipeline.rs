//! Catalog view: filter by search text and genre, then order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::models::Book;
use crate::utils::{contains_ignore_case, locale_cmp};

/// Sentinel genre value meaning "no restriction".
pub const ALL_GENRES: &str = "all";

/// Order applied to the visible list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Title, ascending.
    Title,
    /// Author, ascending.
    Author,
    /// Publication year, newest first.
    Year,
    /// Popularity, highest first.
    #[default]
    Popularity,
}

impl SortKey {
    /// Parse a sort key; anything unrecognised sorts by popularity.
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "title" => SortKey::Title,
            "author" => SortKey::Author,
            "year" => SortKey::Year,
            _ => SortKey::Popularity,
        }
    }

    fn compare(self, a: &Book, b: &Book) -> Ordering {
        match self {
            SortKey::Title => locale_cmp(&a.title, &b.title),
            SortKey::Author => locale_cmp(&a.author, &b.author),
            SortKey::Year => b.published_year.cmp(&a.published_year),
            SortKey::Popularity => b.popularity.cmp(&a.popularity),
        }
    }
}

/// Exact-match genre restriction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenreFilter {
    #[default]
    All,
    Only(String),
}

impl GenreFilter {
    pub fn parse(value: &str) -> Self {
        if value == ALL_GENRES {
            GenreFilter::All
        } else {
            GenreFilter::Only(value.to_string())
        }
    }

    fn matches(&self, book: &Book) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Only(genre) => &book.genre == genre,
        }
    }
}

/// Raw catalog query as it arrives from a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl CatalogQuery {
    pub fn genre_filter(&self) -> GenreFilter {
        self.genre
            .as_deref()
            .map(GenreFilter::parse)
            .unwrap_or_default()
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
            .as_deref()
            .map(SortKey::parse_lenient)
            .unwrap_or_default()
    }

    pub fn apply<'a>(&self, books: &'a [Book]) -> Vec<&'a Book> {
        visible(books, &self.search, &self.genre_filter(), self.sort_key())
    }
}

/// Books matching `search` (title or author, case-insensitive) and `genre`,
/// ordered by `sort`. Ties keep their input order.
pub fn visible<'a>(
    books: &'a [Book],
    search: &str,
    genre: &GenreFilter,
    sort: SortKey,
) -> Vec<&'a Book> {
    let mut matching: Vec<&Book> = books
        .iter()
        .filter(|book| {
            contains_ignore_case(&book.title, search) || contains_ignore_case(&book.author, search)
        })
        .filter(|book| genre.matches(book))
        .collect();

    // `sort_by` is stable.
    matching.sort_by(|a, b| sort.compare(a, b));
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::models::BookId;
    use crate::modules::catalog::seed::sample_books;

    fn titles(books: &[&Book]) -> Vec<String> {
        books.iter().map(|b| b.title.clone()).collect()
    }

    #[test]
    fn default_view_is_everything_by_popularity() {
        let books = sample_books();
        let result = visible(&books, "", &GenreFilter::All, SortKey::Popularity);

        assert_eq!(
            titles(&result),
            vec![
                "The Great Gatsby",
                "To Kill a Mockingbird",
                "1984",
                "Pride and Prejudice",
                "The Catcher in the Rye",
            ]
        );
    }

    #[test]
    fn popularity_ties_keep_insertion_order() {
        let mut books = sample_books();
        for book in &mut books {
            book.popularity = 50;
        }
        books[3].popularity = 60;

        let result = visible(&books, "", &GenreFilter::All, SortKey::Popularity);
        let ids: Vec<&BookId> = result.iter().map(|b| &b.id).collect();
        assert_eq!(
            ids,
            vec![
                &BookId::new("4"),
                &BookId::new("1"),
                &BookId::new("2"),
                &BookId::new("3"),
                &BookId::new("5"),
            ]
        );
    }

    #[test]
    fn search_matches_author_case_insensitively() {
        let books = sample_books();
        let result = visible(&books, "orwell", &GenreFilter::All, SortKey::Title);
        assert_eq!(titles(&result), vec!["1984"]);
    }

    #[test]
    fn search_matches_title_substring() {
        let books = sample_books();
        let result = visible(&books, "THE", &GenreFilter::All, SortKey::Title);
        assert_eq!(
            titles(&result),
            vec!["The Catcher in the Rye", "The Great Gatsby"]
        );
    }

    #[test]
    fn genre_filter_is_exact() {
        let books = sample_books();
        let result = visible(
            &books,
            "",
            &GenreFilter::Only("Romance".to_string()),
            SortKey::Year,
        );
        assert_eq!(titles(&result), vec!["Pride and Prejudice"]);

        let partial = visible(
            &books,
            "",
            &GenreFilter::Only("Fict".to_string()),
            SortKey::Year,
        );
        assert!(partial.is_empty());
    }

    #[test]
    fn only_all_is_the_wildcard_genre() {
        let books = sample_books();
        assert_eq!(GenreFilter::parse("all"), GenreFilter::All);
        assert_eq!(GenreFilter::parse(""), GenreFilter::Only(String::new()));
        assert_eq!(GenreFilter::parse("All"), GenreFilter::Only("All".to_string()));

        let query = CatalogQuery {
            genre: Some(String::new()),
            ..CatalogQuery::default()
        };
        assert!(query.apply(&books).is_empty());
    }

    #[test]
    fn year_sort_is_newest_first() {
        let books = sample_books();
        let result = visible(
            &books,
            "",
            &GenreFilter::Only("Fiction".to_string()),
            SortKey::Year,
        );
        assert_eq!(
            titles(&result),
            vec![
                "To Kill a Mockingbird",
                "The Catcher in the Rye",
                "The Great Gatsby",
            ]
        );
    }

    #[test]
    fn title_and_author_sorts_ascend() {
        let books = sample_books();

        let by_title = visible(&books, "", &GenreFilter::All, SortKey::Title);
        assert_eq!(
            titles(&by_title),
            vec![
                "1984",
                "Pride and Prejudice",
                "The Catcher in the Rye",
                "The Great Gatsby",
                "To Kill a Mockingbird",
            ]
        );

        let by_author = visible(&books, "", &GenreFilter::All, SortKey::Author);
        let authors: Vec<&str> = by_author.iter().map(|b| b.author.as_str()).collect();
        assert_eq!(
            authors,
            vec![
                "F. Scott Fitzgerald",
                "George Orwell",
                "Harper Lee",
                "J.D. Salinger",
                "Jane Austen",
            ]
        );
    }

    #[test]
    fn unknown_sort_key_falls_back_to_popularity() {
        assert_eq!(SortKey::parse_lenient("shelf"), SortKey::Popularity);
        assert_eq!(SortKey::parse_lenient(""), SortKey::Popularity);
        assert_eq!(SortKey::parse_lenient("year"), SortKey::Year);
    }

    #[test]
    fn query_defaults_to_all_and_popularity() {
        let books = sample_books();
        let query = CatalogQuery::default();

        assert_eq!(query.genre_filter(), GenreFilter::All);
        assert_eq!(query.sort_key(), SortKey::Popularity);
        assert_eq!(query.apply(&books).len(), 5);
    }

    #[test]
    fn no_match_yields_empty_list() {
        let books = sample_books();
        let result = visible(&books, "tolkien", &GenreFilter::All, SortKey::Title);
        assert!(result.is_empty());
    }
}
