pub mod error;
pub mod inventory;
pub mod models;
pub mod pipeline;
pub mod seed;
pub mod store;

pub use error::CatalogError;

use async_trait::async_trait;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use libraryhub_http::error::AppResult;
use libraryhub_kernel::{InitCtx, Module};
use serde::Serialize;
use serde_json::json;

use crate::library::SharedLibrary;
use crate::modules::session::access_denied;
use inventory::BorrowOutcome;
use models::{Book, BookId};
use pipeline::CatalogQuery;

/// Public catalog: browsing, searching and borrowing
pub struct CatalogModule {
    library: SharedLibrary,
}

impl CatalogModule {
    pub fn new(library: SharedLibrary) -> Self {
        Self { library }
    }
}

#[async_trait]
impl Module for CatalogModule {
    fn name(&self) -> &'static str {
        "catalog"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let books = self.library.read().await.catalog.len();
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books,
            "catalog module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/books", get(list_books))
            .route("/books/{id}", get(get_book))
            .route("/books/{id}/borrow", post(borrow_book))
            .route("/genres", get(list_genres))
            .route("/health", get(health_check))
            .with_state(self.library.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let id_param = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
        });

        Some(json!({
            "paths": {
                "/books": {
                    "get": {
                        "summary": "Search, filter and sort the catalog",
                        "tags": ["Catalog"],
                        "parameters": [
                            {
                                "name": "search",
                                "in": "query",
                                "required": false,
                                "description": "Case-insensitive match on title or author",
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "genre",
                                "in": "query",
                                "required": false,
                                "description": "Exact genre, or `all`",
                                "schema": { "type": "string", "default": "all" }
                            },
                            {
                                "name": "sort",
                                "in": "query",
                                "required": false,
                                "description": "Unrecognised values sort by popularity",
                                "schema": {
                                    "type": "string",
                                    "enum": ["popularity", "title", "author", "year"],
                                    "default": "popularity"
                                }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Visible books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/CatalogEntry" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/books/{id}": {
                    "get": {
                        "summary": "Get one book",
                        "tags": ["Catalog"],
                        "parameters": [id_param.clone()],
                        "responses": {
                            "200": {
                                "description": "The book",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/CatalogEntry" }
                                    }
                                }
                            },
                            "404": error("Unknown book")
                        }
                    }
                },
                "/books/{id}/borrow": {
                    "post": {
                        "summary": "Borrow one copy",
                        "tags": ["Catalog"],
                        "parameters": [id_param],
                        "responses": {
                            "200": {
                                "description": "Borrowed, or rejected when no copy is available",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/BorrowOutcome" }
                                    }
                                }
                            },
                            "401": error("Not signed in"),
                            "404": error("Unknown book")
                        }
                    }
                },
                "/genres": {
                    "get": {
                        "summary": "Genres present in the collection",
                        "tags": ["Catalog"],
                        "responses": {
                            "200": {
                                "description": "Sorted genre names",
                                "content": {
                                    "application/json": {
                                        "schema": { "type": "array", "items": { "type": "string" } }
                                    }
                                }
                            }
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Catalog health check",
                        "tags": ["Catalog"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": { "text/plain": { "schema": { "type": "string" } } }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "genre": { "type": "string" },
                            "isbn": { "type": "string" },
                            "publishedYear": { "type": "integer" },
                            "availableCopies": { "type": "integer", "minimum": 0 },
                            "totalCopies": { "type": "integer", "minimum": 0 },
                            "coverUrl": { "type": "string" },
                            "description": { "type": "string" },
                            "popularity": { "type": "integer", "minimum": 0, "maximum": 100 }
                        },
                        "required": [
                            "id", "title", "author", "genre", "isbn", "publishedYear",
                            "availableCopies", "totalCopies", "coverUrl", "description", "popularity"
                        ]
                    },
                    "CatalogEntry": {
                        "allOf": [
                            { "$ref": "#/components/schemas/Book" },
                            {
                                "type": "object",
                                "properties": {
                                    "available": { "type": "boolean" },
                                    "popularityStars": { "type": "integer", "minimum": 0, "maximum": 5 }
                                }
                            }
                        ]
                    },
                    "BorrowOutcome": {
                        "type": "object",
                        "properties": {
                            "outcome": { "type": "string", "enum": ["borrowed", "rejected"] },
                            "book": { "$ref": "#/components/schemas/Book" }
                        },
                        "required": ["outcome", "book"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "catalog module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "catalog module stopped");
        Ok(())
    }
}

/// A book as shown on a catalog card
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub book: Book,
    pub available: bool,
    pub popularity_stars: u8,
}

impl From<&Book> for CatalogEntry {
    fn from(book: &Book) -> Self {
        Self {
            available: book.is_available(),
            popularity_stars: book.popularity_stars(),
            book: book.clone(),
        }
    }
}

async fn health_check() -> &'static str {
    "catalog module is healthy"
}

async fn list_books(
    State(library): State<SharedLibrary>,
    Query(query): Query<CatalogQuery>,
) -> Json<Vec<CatalogEntry>> {
    let library = library.read().await;
    let entries = query
        .apply(library.catalog.find_all())
        .into_iter()
        .map(CatalogEntry::from)
        .collect();
    Json(entries)
}

async fn get_book(
    State(library): State<SharedLibrary>,
    Path(id): Path<BookId>,
) -> AppResult<Json<CatalogEntry>> {
    let library = library.read().await;
    let book = library
        .catalog
        .find(&id)
        .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
    Ok(Json(CatalogEntry::from(book)))
}

async fn borrow_book(
    State(library): State<SharedLibrary>,
    Path(id): Path<BookId>,
) -> AppResult<Json<BorrowOutcome>> {
    let mut library = library.write().await;
    let borrower = library.require_signed_in().map_err(access_denied)?.id.clone();

    let outcome = inventory::borrow(&mut library.catalog, &id)?;
    tracing::debug!(book_id = %id, user_id = %borrower, borrowed = outcome.is_borrowed(), "borrow handled");
    Ok(Json(outcome))
}

async fn list_genres(State(library): State<SharedLibrary>) -> Json<Vec<String>> {
    Json(library.read().await.catalog.genres())
}
