use async_trait::async_trait;
use axum::Router;

use crate::settings::Settings;

/// Handed to every module during the init and start phases.
pub struct InitCtx<'a> {
    pub settings: &'a Settings,
}

impl<'a> InitCtx<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }
}

/// A feature area of LibraryHub (catalog, session, admin) that owns a slice of
/// the HTTP surface under `/api/{name}`.
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name; also the mount prefix.
    fn name(&self) -> &'static str;

    /// Runs once at startup, in registration order, before any request is served.
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
    }

    /// OpenAPI fragment with `paths` relative to the mount prefix and optional
    /// `components.schemas`.
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Runs after every module has been initialized.
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs on shutdown, in reverse registration order.
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
