use anyhow::{Context, Result};
use cloudinary_images::{OptionStore, settings};

pub fn run(store: &dyn OptionStore, confirmed: bool) -> Result<()> {
    if !confirmed {
        anyhow::bail!("refusing to delete stored settings without --yes");
    }

    settings::uninstall(store).context("failed to delete settings")?;
    println!("Deleted stored settings.");
    Ok(())
}
