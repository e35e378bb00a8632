use anyhow::{Context, Result};
use cloudinary_images::{Connector, OptionStore, Settings, SizeRegistry, settings};

use super::format;

/// Validate, store and (optionally) sync, like saving the settings form.
pub async fn run(
    input: &Settings,
    store: &dyn OptionStore,
    connector: &dyn Connector,
    registry: &dyn SizeRegistry,
) -> Result<()> {
    println!("Validating Cloudinary account...");

    let report = settings::save(input, store, connector, registry)
        .await
        .context("failed to save settings")?;

    format::print_feedback(&report.feedback);

    if !report.issues.is_empty() {
        let fields: Vec<&str> = report.issues.iter().map(|i| i.field()).collect();
        anyhow::bail!(
            "settings stored but not usable; fix: {}",
            fields.join(", ")
        );
    }

    Ok(())
}
