use anyhow::{Context, Result};
use cloudinary_images::registry::{BUILTIN_SIZES, set_builtin_size};
use cloudinary_images::{
    Crop, HorizontalAnchor, ImageSizeSpec, OptionStore, SizeRegistry, VerticalAnchor,
};

use super::format;

pub fn list(registry: &dyn SizeRegistry) -> Result<()> {
    let sizes = registry.sizes().context("failed to read image sizes")?;
    format::print_size_table(&sizes);
    Ok(())
}

/// Change a built-in size. Additional sizes live in the config file.
pub fn set(store: &dyn OptionStore, spec: &ImageSizeSpec) -> Result<()> {
    if !BUILTIN_SIZES.contains(&spec.name.as_str()) {
        anyhow::bail!(
            "{} is not a built-in size ({}); add it under [[sizes]] in the config file",
            spec.name,
            BUILTIN_SIZES.join(", ")
        );
    }

    set_builtin_size(store, spec).context("failed to store image size")?;
    println!("Stored {spec}.");
    Ok(())
}

/// Parse `none`, `hard`, or an anchor pair such as `left,top`.
pub fn parse_crop(raw: &str) -> Result<Crop, String> {
    match raw.trim().to_lowercase().as_str() {
        "none" | "false" => Ok(Crop::None),
        "hard" | "true" => Ok(Crop::Hard),
        pair => {
            let (h, v) = pair
                .split_once(',')
                .ok_or_else(|| format!("expected none, hard or <h>,<v>; got {raw}"))?;
            Ok(Crop::Anchored(
                parse_horizontal(h.trim())?,
                parse_vertical(v.trim())?,
            ))
        }
    }
}

fn parse_horizontal(s: &str) -> Result<HorizontalAnchor, String> {
    match s {
        "left" => Ok(HorizontalAnchor::Left),
        "center" => Ok(HorizontalAnchor::Center),
        "right" => Ok(HorizontalAnchor::Right),
        other => Err(format!("horizontal anchor must be left, center or right; got {other}")),
    }
}

fn parse_vertical(s: &str) -> Result<VerticalAnchor, String> {
    match s {
        "top" => Ok(VerticalAnchor::Top),
        "center" => Ok(VerticalAnchor::Center),
        "bottom" => Ok(VerticalAnchor::Bottom),
        other => Err(format!("vertical anchor must be top, center or bottom; got {other}")),
    }
}
