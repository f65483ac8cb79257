use anyhow::Context;
use libraryhub_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load LibraryHub settings")?;
    libraryhub_telemetry::init(&settings.telemetry)?;

    libraryhub_app::bootstrap::serve(settings).await
}
