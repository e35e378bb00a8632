use anyhow::{Context, Result};
use cloudinary_images::settings;
use cloudinary_images_store::SqliteOptionStore;

use super::format;

pub fn run(store: &SqliteOptionStore) -> Result<()> {
    match settings::load(store).context("failed to read settings")? {
        Some(stored) => println!("{}", format::redacted_settings(&stored)),
        None => println!("No settings stored."),
    }

    let names = store.names().context("failed to list options")?;
    println!("\n{} stored options: {}", names.len(), names.join(", "));
    Ok(())
}
