use anyhow::{Context, Result};
use cloudinary_images::{Connector, OptionStore, SizeRegistry, settings};

use super::format;

/// Sync transformations for every registered size and report failures.
///
/// Partial failure is reported but not fatal; the command only fails when
/// nothing could be applied.
pub async fn run(
    store: &dyn OptionStore,
    connector: &dyn Connector,
    registry: &dyn SizeRegistry,
) -> Result<()> {
    let total = registry.sizes().context("failed to read image sizes")?.len();
    println!("Syncing {total} transformations...");

    let errors = settings::sync_stored(store, connector, registry).await?;
    format::print_sync_errors(&errors);

    if total > 0 && errors.len() == total {
        anyhow::bail!("all {total} transformations failed to sync");
    }

    println!("Synced {} of {total} transformations.", total - errors.len());
    Ok(())
}
