use anyhow::{Context, Result};
use cloudinary_images::{Connector, Feedback, OptionStore, settings};

use super::format;

pub async fn run(store: &dyn OptionStore, connector: &dyn Connector) -> Result<()> {
    let stored = settings::load(store)
        .context("failed to read settings")?
        .context("no settings stored; run `cloudinary-images configure` first")?;

    let validation = settings::validate(&stored, connector).await;

    if validation.is_valid() {
        if let Some(account) = &validation.account {
            println!("Account OK (cloud: {}).", account.cloud_name());
        }
        return Ok(());
    }

    let feedback: Vec<Feedback> = validation.issues.iter().map(Feedback::from).collect();
    format::print_feedback(&feedback);
    anyhow::bail!("{} problem(s) with stored settings", validation.issues.len())
}
