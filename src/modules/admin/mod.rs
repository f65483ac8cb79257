pub mod stats;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use libraryhub_http::{error::AppResult, extract::JsonBody};
use libraryhub_kernel::{InitCtx, Module};
use serde_json::json;

use crate::library::SharedLibrary;
use crate::modules::catalog::models::{Book, BookId, BookPatch, NewBook, KNOWN_GENRES};
use stats::CatalogStats;

/// Admin dashboard: collection management and inventory figures
pub struct AdminModule {
    library: SharedLibrary,
}

impl AdminModule {
    pub fn new(library: SharedLibrary) -> Self {
        Self { library }
    }
}

#[async_trait]
impl Module for AdminModule {
    fn name(&self) -> &'static str {
        "admin"
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/books", get(list_books).post(add_book))
            .route("/books/{id}", patch(update_book).delete(delete_book))
            .route("/stats", get(catalog_stats))
            .route("/genres", get(known_genres))
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
        let book = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Book" }
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
                        "summary": "All books in insertion order",
                        "tags": ["Admin"],
                        "responses": {
                            "200": {
                                "description": "Every stored book",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            },
                            "401": error("Not signed in"),
                            "403": error("Admin view not active")
                        }
                    },
                    "post": {
                        "summary": "Add a book; every copy starts available",
                        "tags": ["Admin"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/NewBook" }
                                }
                            }
                        },
                        "responses": {
                            "201": book("Stored book with its new id"),
                            "403": error("Admin view not active"),
                            "422": error("Missing required field")
                        }
                    }
                },
                "/books/{id}": {
                    "patch": {
                        "summary": "Update the given fields of a book",
                        "tags": ["Admin"],
                        "parameters": [id_param.clone()],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/BookPatch" }
                                }
                            }
                        },
                        "responses": {
                            "200": book("Updated book"),
                            "204": { "description": "Unknown id, nothing changed" },
                            "403": error("Admin view not active"),
                            "422": error("Update would break the inventory invariant")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book; unknown ids are ignored",
                        "tags": ["Admin"],
                        "parameters": [id_param],
                        "responses": {
                            "204": { "description": "Deleted or already absent" },
                            "403": error("Admin view not active")
                        }
                    }
                },
                "/stats": {
                    "get": {
                        "summary": "Inventory figures for the dashboard",
                        "tags": ["Admin"],
                        "responses": {
                            "200": {
                                "description": "Collection statistics",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/CatalogStats" }
                                    }
                                }
                            },
                            "403": error("Admin view not active")
                        }
                    }
                },
                "/genres": {
                    "get": {
                        "summary": "Genres offered by the add form",
                        "tags": ["Admin"],
                        "responses": {
                            "200": {
                                "description": "Genre vocabulary",
                                "content": {
                                    "application/json": {
                                        "schema": { "type": "array", "items": { "type": "string" } }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "NewBook": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "genre": { "type": "string" },
                            "isbn": { "type": "string" },
                            "publishedYear": { "type": "integer" },
                            "totalCopies": { "type": "integer", "minimum": 0 },
                            "coverUrl": { "type": "string" },
                            "description": { "type": "string" },
                            "popularity": { "type": "integer", "minimum": 0, "maximum": 100, "default": 50 }
                        },
                        "required": ["title", "author", "genre", "publishedYear", "totalCopies"]
                    },
                    "BookPatch": {
                        "type": "object",
                        "additionalProperties": false,
                        "properties": {
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
                        }
                    },
                    "CatalogStats": {
                        "type": "object",
                        "properties": {
                            "totalBooks": { "type": "integer" },
                            "totalCopies": { "type": "integer" },
                            "borrowedCopies": { "type": "integer" },
                            "availableCopies": { "type": "integer" },
                            "genreCount": { "type": "integer" },
                            "borrowedPercent": { "type": "integer" }
                        },
                        "required": [
                            "totalBooks", "totalCopies", "borrowedCopies",
                            "availableCopies", "genreCount", "borrowedPercent"
                        ]
                    }
                }
            }
        }))
    }

    async fn start(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "admin module started"
        );
        Ok(())
    }
}

async fn list_books(State(library): State<SharedLibrary>) -> AppResult<Json<Vec<Book>>> {
    let library = library.read().await;
    library.require_admin()?;
    Ok(Json(library.catalog.find_all().to_vec()))
}

async fn add_book(
    State(library): State<SharedLibrary>,
    JsonBody(new_book): JsonBody<NewBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let mut library = library.write().await;
    library.require_admin()?;
    new_book.validate()?;

    let book = library.catalog.add(new_book);
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book(
    State(library): State<SharedLibrary>,
    Path(id): Path<BookId>,
    JsonBody(patch): JsonBody<BookPatch>,
) -> AppResult<Response> {
    let mut library = library.write().await;
    library.require_admin()?;

    let response = match library.catalog.update(&id, patch)? {
        Some(book) => Json(book.clone()).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    };
    Ok(response)
}

async fn delete_book(
    State(library): State<SharedLibrary>,
    Path(id): Path<BookId>,
) -> AppResult<StatusCode> {
    let mut library = library.write().await;
    library.require_admin()?;

    if library.catalog.remove(&id).is_none() {
        tracing::debug!(book_id = %id, "delete ignored, unknown book");
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn catalog_stats(State(library): State<SharedLibrary>) -> AppResult<Json<CatalogStats>> {
    let library = library.read().await;
    library.require_admin()?;
    Ok(Json(CatalogStats::from_books(library.catalog.find_all())))
}

async fn known_genres() -> Json<Vec<&'static str>> {
    Json(KNOWN_GENRES.to_vec())
}
