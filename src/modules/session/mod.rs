pub mod models;
pub mod state;
pub mod view;

use async_trait::async_trait;
use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use libraryhub_authz::AccessError;
use libraryhub_http::{
    error::{AppError, AppResult},
    extract::JsonBody,
};
use libraryhub_kernel::{InitCtx, Module};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::library::{Library, SharedLibrary};
use models::{LoginRequest, User};
use view::View;

/// Map a failed role guard onto the HTTP error it should render as.
pub fn access_denied(err: AccessError) -> AppError {
    match err {
        AccessError::SignInRequired => AppError::unauthorized(err.to_string()),
        AccessError::RoleRequired { .. } => AppError::forbidden(err.to_string()),
    }
}

/// Mock sign-in plus the catalog/admin view switch
pub struct SessionModule {
    library: SharedLibrary,
}

impl SessionModule {
    pub fn new(library: SharedLibrary) -> Self {
        Self { library }
    }
}

#[async_trait]
impl Module for SessionModule {
    fn name(&self) -> &'static str {
        "session"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "session module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(current_session))
            .route("/login", post(login))
            .route("/logout", post(logout))
            .route("/view", put(switch_view))
            .with_state(self.library.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let snapshot = json!({
            "description": "Session after the operation",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/SessionSnapshot" }
                }
            }
        });
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

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "Current user and view",
                        "tags": ["Session"],
                        "responses": { "200": snapshot.clone() }
                    }
                },
                "/login": {
                    "post": {
                        "summary": "Sign in; any non-empty credentials are accepted",
                        "tags": ["Session"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/LoginRequest" }
                                }
                            }
                        },
                        "responses": {
                            "200": snapshot.clone(),
                            "422": error("Missing email or password")
                        }
                    }
                },
                "/logout": {
                    "post": {
                        "summary": "Sign out and return to the catalog view",
                        "tags": ["Session"],
                        "responses": { "200": snapshot.clone() }
                    }
                },
                "/view": {
                    "put": {
                        "summary": "Switch between catalog and admin views",
                        "tags": ["Session"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/ViewRequest" }
                                }
                            }
                        },
                        "responses": {
                            "200": snapshot,
                            "401": error("Not signed in"),
                            "403": error("Admin role required")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "User": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "name": { "type": "string" },
                            "email": { "type": "string", "format": "email" },
                            "role": { "type": "string", "enum": ["user", "admin"] },
                            "borrowedBooks": { "type": "array", "items": { "type": "string" } },
                            "joinDate": { "type": "string", "format": "date-time" }
                        },
                        "required": ["id", "name", "email", "role", "borrowedBooks", "joinDate"]
                    },
                    "LoginRequest": {
                        "type": "object",
                        "properties": {
                            "email": { "type": "string" },
                            "password": { "type": "string" },
                            "isAdmin": { "type": "boolean", "default": false }
                        },
                        "required": ["email", "password"]
                    },
                    "ViewRequest": {
                        "type": "object",
                        "properties": {
                            "view": { "type": "string", "enum": ["catalog", "admin"] }
                        },
                        "required": ["view"]
                    },
                    "SessionSnapshot": {
                        "type": "object",
                        "properties": {
                            "user": {
                                "oneOf": [
                                    { "$ref": "#/components/schemas/User" },
                                    { "type": "null" }
                                ]
                            },
                            "view": { "type": "string", "enum": ["catalog", "admin"] }
                        },
                        "required": ["user", "view"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        if let Some(user) = self.library.write().await.logout() {
            tracing::info!(module = self.name(), user_id = %user.id, "session closed on shutdown");
        }
        Ok(())
    }
}

/// Who is signed in and which view is active
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub view: View,
}

impl From<&Library> for SessionSnapshot {
    fn from(library: &Library) -> Self {
        Self {
            user: library.current_user().cloned(),
            view: library.views.current(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ViewRequest {
    pub view: View,
}

async fn current_session(State(library): State<SharedLibrary>) -> Json<SessionSnapshot> {
    Json(SessionSnapshot::from(&*library.read().await))
}

async fn login(
    State(library): State<SharedLibrary>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> AppResult<Json<SessionSnapshot>> {
    let mut library = library.write().await;
    library.login(&request.email, &request.password, request.is_admin)?;
    Ok(Json(SessionSnapshot::from(&*library)))
}

async fn logout(State(library): State<SharedLibrary>) -> Json<SessionSnapshot> {
    let mut library = library.write().await;
    library.logout();
    Json(SessionSnapshot::from(&*library))
}

async fn switch_view(
    State(library): State<SharedLibrary>,
    JsonBody(request): JsonBody<ViewRequest>,
) -> AppResult<Json<SessionSnapshot>> {
    let mut library = library.write().await;
    library.switch_view(request.view)?;
    Ok(Json(SessionSnapshot::from(&*library)))
}
