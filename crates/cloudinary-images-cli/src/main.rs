mod commands;
mod config;
mod messages;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cloudinary_images::registry::seed_default_sizes;
use cloudinary_images::{Crop, ImageSizeSpec, OptionSizeRegistry, Settings};
use cloudinary_images_http::HttpConnector;
use cloudinary_images_store::SqliteOptionStore;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "cloudinary-images")]
#[command(about = "Keep Cloudinary named transformations in step with your image sizes")]
struct Cli {
    /// Config file (defaults to ~/.config/cloudinary-images/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate and store account settings, then sync transformations
    Configure {
        /// Connection string: cloudinary://<key>:<secret>@<cloud>
        /// (falls back to $CLOUDINARY_URL)
        #[arg(long)]
        url: Option<String>,
        /// Upload preset name
        #[arg(long, default_value = "")]
        preset: String,
        /// Store settings without building transformations
        #[arg(long)]
        skip_transforms: bool,
    },
    /// Check stored settings against Cloudinary
    Validate,
    /// Create or update a named transformation for every image size
    Sync,
    /// Inspect or change image sizes
    Sizes {
        #[command(subcommand)]
        action: SizesAction,
    },
    /// Show stored settings with the secret masked
    Show,
    /// Delete stored settings
    Uninstall {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SizesAction {
    /// List registered sizes and the transformation each maps to
    List,
    /// Change a built-in size (thumbnail, medium, large)
    Set {
        name: String,
        #[arg(long, default_value_t = 0)]
        width: u32,
        #[arg(long, default_value_t = 0)]
        height: u32,
        /// none, hard, or an anchor pair like left,top
        #[arg(long, default_value = "none", value_parser = commands::sizes::parse_crop)]
        crop: Crop,
    },
}

fn data_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("could not determine cache directory")?;
    let dir = base.join("cloudinary-images");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create data directory: {}", dir.display()))?;
    Ok(dir)
}

fn db_path(config: &AppConfig) -> Result<PathBuf> {
    match &config.database_path {
        Some(path) => Ok(path.clone()),
        None => Ok(data_dir()?.join("options.db")),
    }
}

fn open_store(config: &AppConfig) -> Result<Arc<SqliteOptionStore>> {
    let path = db_path(config)?;
    let store = SqliteOptionStore::open(&path).map_err(|e| anyhow::anyhow!("{e}"))?;

    let seeded = seed_default_sizes(&store).context("failed to seed image sizes")?;
    if !seeded.is_empty() {
        tracing::info!(sizes = ?seeded, "seeded default image sizes");
    }

    Ok(Arc::new(store))
}

fn cloudinary_url(flag: Option<String>) -> Option<String> {
    flag.or_else(|| std::env::var("CLOUDINARY_URL").ok())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app_config = config::load_config(cli.config.as_deref());

    let store = open_store(&app_config)?;
    let connector = HttpConnector::new(app_config.api_base_url.clone());
    let registry = OptionSizeRegistry::new(Arc::clone(&store), app_config.sizes.clone());

    match cli.command {
        Command::Configure {
            url,
            preset,
            skip_transforms,
        } => {
            let url = cloudinary_url(url)
                .context("no Cloudinary URL given; pass --url or set CLOUDINARY_URL")?;
            let input = Settings {
                url,
                preset,
                transforms: !skip_transforms,
                configured: false,
            };
            commands::configure::run(&input, store.as_ref(), &connector, &registry).await
        }
        Command::Validate => commands::validate::run(store.as_ref(), &connector).await,
        Command::Sync => commands::sync::run(store.as_ref(), &connector, &registry).await,
        Command::Sizes { action } => match action {
            SizesAction::List => commands::sizes::list(&registry),
            SizesAction::Set {
                name,
                width,
                height,
                crop,
            } => {
                let spec = ImageSizeSpec::new(name, width, height, crop);
                commands::sizes::set(store.as_ref(), &spec)
            }
        },
        Command::Show => commands::show::run(&store),
        Command::Uninstall { yes } => commands::uninstall::run(store.as_ref(), yes),
    }
}
