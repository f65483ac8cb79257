//! Application bootstrap: build the library, run the module lifecycle, serve.

use std::future::Future;

use anyhow::Context;
use libraryhub_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::library::{Library, SharedLibrary};
use crate::modules;

/// Build the shared state and a registry with every module registered.
pub fn assemble(settings: &Settings) -> anyhow::Result<(SharedLibrary, ModuleRegistry)> {
    let library = Library::from_settings(&settings.catalog).into_shared();

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &library).context("failed to register modules")?;

    Ok((library, registry))
}

/// Serve until Ctrl-C or SIGTERM.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    serve_until(settings, libraryhub_http::shutdown_signal()).await
}

/// Run the full lifecycle, serving HTTP until `shutdown` resolves.
pub async fn serve_until<F>(settings: Settings, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::info!(
        env = ?settings.environment,
        host = %settings.server.host,
        port = settings.server.port,
        "libraryhub bootstrap starting"
    );

    let (_library, registry) = assemble(&settings)?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;
    tracing::info!(modules = registry.module_count(), "libraryhub bootstrap complete");

    let served = libraryhub_http::start_server(&registry, &settings, shutdown).await;

    // Modules are stopped even when the server failed.
    registry.stop_modules().await?;
    served
}
