use std::sync::Arc;

use cloudinary_images::registry::{seed_default_sizes, set_builtin_size};
use cloudinary_images::settings::{self, OPTION_NAME};
use cloudinary_images::{Crop, ImageSizeSpec, OptionSizeRegistry, OptionStore, SizeRegistry};
use cloudinary_images_store::SqliteOptionStore;

fn create_store() -> SqliteOptionStore {
    SqliteOptionStore::open_in_memory().unwrap()
}

#[test]
fn missing_option_is_none() {
    let store = create_store();
    assert_eq!(store.get_option("absent").unwrap(), None);
    assert!(store.updated_at("absent").unwrap().is_none());
}

#[test]
fn set_then_get_returns_value() {
    let store = create_store();
    store.set_option("thumbnail_size_w", "150").unwrap();

    assert_eq!(
        store.get_option("thumbnail_size_w").unwrap().as_deref(),
        Some("150")
    );
    assert!(store.updated_at("thumbnail_size_w").unwrap().is_some());
}

#[test]
fn set_replaces_existing_value() {
    let store = create_store();
    store.set_option("medium_size_w", "300").unwrap();
    store.set_option("medium_size_w", "640").unwrap();

    assert_eq!(store.get_option("medium_size_w").unwrap().as_deref(), Some("640"));
    assert_eq!(store.names().unwrap(), vec!["medium_size_w"]);
}

#[test]
fn delete_removes_option_and_tolerates_missing() {
    let store = create_store();
    store.set_option("large_crop", "false").unwrap();

    store.delete_option("large_crop").unwrap();
    store.delete_option("large_crop").unwrap();

    assert_eq!(store.get_option("large_crop").unwrap(), None);
}

#[test]
fn names_are_sorted() {
    let store = create_store();
    store.set_option("b", "1").unwrap();
    store.set_option("a", "2").unwrap();
    store.set_option("c", "3").unwrap();

    assert_eq!(store.names().unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn settings_survive_reopening_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.db");

    {
        let store = SqliteOptionStore::open(&path).unwrap();
        store
            .set_option(OPTION_NAME, r#"{"url":"cloudinary://x","preset":"p"}"#)
            .unwrap();
    }

    let store = SqliteOptionStore::open(&path).unwrap();
    let loaded = settings::load(&store).unwrap().unwrap();
    assert_eq!(loaded.url, "cloudinary://x");
    assert_eq!(loaded.preset, "p");
}

#[test]
fn registry_reads_sizes_from_sqlite() {
    let store = Arc::new(create_store());
    seed_default_sizes(store.as_ref()).unwrap();
    set_builtin_size(
        store.as_ref(),
        &ImageSizeSpec::new("large", 2048, 0, Crop::None),
    )
    .unwrap();

    let registry = OptionSizeRegistry::new(store, vec![]);
    let sizes = registry.sizes().unwrap();

    assert_eq!(sizes[0], ImageSizeSpec::new("thumbnail", 150, 150, Crop::Hard));
    assert_eq!(sizes[2], ImageSizeSpec::new("large", 2048, 0, Crop::None));
}

#[test]
fn uninstall_leaves_sizes_alone() {
    let store = create_store();
    seed_default_sizes(&store).unwrap();
    store.set_option(OPTION_NAME, "{}").unwrap();

    settings::uninstall(&store).unwrap();

    assert!(store.get_option(OPTION_NAME).unwrap().is_none());
    assert!(store.get_option("thumbnail_size_w").unwrap().is_some());
}
