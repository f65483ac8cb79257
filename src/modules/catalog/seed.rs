use super::models::{Book, BookId};

struct SampleBook {
    id: &'static str,
    title: &'static str,
    author: &'static str,
    genre: &'static str,
    isbn: &'static str,
    published_year: i32,
    available_copies: u32,
    total_copies: u32,
    cover_url: &'static str,
    description: &'static str,
    popularity: u8,
}

const SAMPLE: [SampleBook; 5] = [
    SampleBook {
        id: "1",
        title: "The Great Gatsby",
        author: "F. Scott Fitzgerald",
        genre: "Fiction",
        isbn: "978-0-7432-7356-5",
        published_year: 1925,
        available_copies: 3,
        total_copies: 5,
        cover_url: "https://images.unsplash.com/photo-1544947950-fa07a98d237f?auto=format&fit=crop&w=300&h=450",
        description: "A classic American novel set in the Jazz Age, exploring themes of wealth, love, and the American Dream.",
        popularity: 95,
    },
    SampleBook {
        id: "2",
        title: "To Kill a Mockingbird",
        author: "Harper Lee",
        genre: "Fiction",
        isbn: "978-0-06-112008-4",
        published_year: 1960,
        available_copies: 2,
        total_copies: 4,
        cover_url: "https://images.unsplash.com/photo-1481627834876-b7833e8f5570?auto=format&fit=crop&w=300&h=450",
        description: "A gripping tale of racial injustice and childhood innocence in the American South.",
        popularity: 92,
    },
    SampleBook {
        id: "3",
        title: "1984",
        author: "George Orwell",
        genre: "Science Fiction",
        isbn: "978-0-452-28423-4",
        published_year: 1949,
        available_copies: 1,
        total_copies: 3,
        cover_url: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?auto=format&fit=crop&w=300&h=450",
        description: "A dystopian social science fiction novel and cautionary tale about totalitarianism.",
        popularity: 90,
    },
    SampleBook {
        id: "4",
        title: "Pride and Prejudice",
        author: "Jane Austen",
        genre: "Romance",
        isbn: "978-0-14-143951-8",
        published_year: 1813,
        available_copies: 4,
        total_copies: 6,
        cover_url: "https://images.unsplash.com/photo-1543002588-bfa74002ed7e?auto=format&fit=crop&w=300&h=450",
        description: "A romantic novel of manners that critiques the British landed gentry of the early 19th century.",
        popularity: 88,
    },
    SampleBook {
        id: "5",
        title: "The Catcher in the Rye",
        author: "J.D. Salinger",
        genre: "Fiction",
        isbn: "978-0-316-76948-0",
        published_year: 1951,
        available_copies: 0,
        total_copies: 2,
        cover_url: "https://images.unsplash.com/photo-1589998059171-988d887df646?auto=format&fit=crop&w=300&h=450",
        description: "A controversial novel about teenage rebellion and alienation in post-war America.",
        popularity: 85,
    },
];

/// The five-title starter collection, ids `"1"` through `"5"`.
pub fn sample_books() -> Vec<Book> {
    SAMPLE
        .iter()
        .map(|sample| Book {
            id: BookId::new(sample.id),
            title: sample.title.to_string(),
            author: sample.author.to_string(),
            genre: sample.genre.to_string(),
            isbn: sample.isbn.to_string(),
            published_year: sample.published_year,
            available_copies: sample.available_copies,
            total_copies: sample.total_copies,
            cover_url: sample.cover_url.to_string(),
            description: sample.description.to_string(),
            popularity: sample.popularity,
        })
        .collect()
}
