//! libris application library.
//!
//! Wires the domain modules (books, borrowers) onto the kernel registry and
//! the HTTP facade.

pub mod modules;
pub mod validate;

use std::sync::Arc;

use anyhow::Context;
use libris_kernel::{InitCtx, ModuleRegistry};
use libris_store::MemoryStore;

/// Bootstrap and serve until the server exits.
pub async fn run() -> anyhow::Result<()> {
    let settings = libris_kernel::settings::Settings::load()
        .with_context(|| "failed to load libris settings")?;

    libris_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        "libris bootstrap starting"
    );

    let store = Arc::new(MemoryStore::new());

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    libris_http::start_server(&registry, &settings).await?;

    registry.stop_all().await?;

    tracing::info!("libris shutdown complete");
    Ok(())
}
