use crate::options::{self, OptionError, OptionStore};
use crate::size::{Crop, ImageSizeSpec};

/// Sizes every host registers, in registration order.
pub const BUILTIN_SIZES: [&str; 3] = ["thumbnail", "medium", "large"];

/// Supplies the ordered list of image sizes to mirror on Cloudinary.
pub trait SizeRegistry: Send + Sync {
    fn sizes(&self) -> Result<Vec<ImageSizeSpec>, OptionError>;
}

impl SizeRegistry for Vec<ImageSizeSpec> {
    fn sizes(&self) -> Result<Vec<ImageSizeSpec>, OptionError> {
        Ok(self.clone())
    }
}

/// Option names holding a built-in size's width, height and crop policy.
pub fn size_option_names(size: &str) -> [String; 3] {
    [
        format!("{size}_size_w"),
        format!("{size}_size_h"),
        format!("{size}_crop"),
    ]
}

/// Built-in sizes read from an option store, followed by additional sizes.
pub struct OptionSizeRegistry<S> {
    store: S,
    additional: Vec<ImageSizeSpec>,
}

impl<S: OptionStore> OptionSizeRegistry<S> {
    pub fn new(store: S, additional: Vec<ImageSizeSpec>) -> Self {
        Self { store, additional }
    }

    fn builtin(&self, size: &str) -> Result<ImageSizeSpec, OptionError> {
        let [w, h, crop] = size_option_names(size);

        Ok(ImageSizeSpec {
            name: size.to_owned(),
            width: options::get_json::<u32>(&self.store, &w)?.unwrap_or(0),
            height: options::get_json::<u32>(&self.store, &h)?.unwrap_or(0),
            crop: options::get_json::<Crop>(&self.store, &crop)?.unwrap_or_default(),
        })
    }
}

impl<S: OptionStore> SizeRegistry for OptionSizeRegistry<S> {
    fn sizes(&self) -> Result<Vec<ImageSizeSpec>, OptionError> {
        let mut sizes = BUILTIN_SIZES
            .iter()
            .map(|size| self.builtin(size))
            .collect::<Result<Vec<_>, _>>()?;

        for extra in &self.additional {
            match sizes.iter_mut().find(|s| s.name == extra.name) {
                Some(existing) => *existing = extra.clone(),
                None => sizes.push(extra.clone()),
            }
        }

        Ok(sizes)
    }
}

/// Write the host's stock dimensions for any built-in size not yet stored.
/// Returns the names that were seeded.
pub fn seed_default_sizes(store: &dyn OptionStore) -> Result<Vec<&'static str>, OptionError> {
    let defaults: [(&'static str, u32, u32, Crop); 3] = [
        ("thumbnail", 150, 150, Crop::Hard),
        ("medium", 300, 300, Crop::None),
        ("large", 1024, 1024, Crop::None),
    ];

    let mut seeded = Vec::new();
    for (size, width, height, crop) in defaults {
        let [w, h, c] = size_option_names(size);
        if store.get_option(&w)?.is_some() || store.get_option(&h)?.is_some() {
            continue;
        }
        options::set_json(store, &w, &width)?;
        options::set_json(store, &h, &height)?;
        options::set_json(store, &c, &crop)?;
        seeded.push(size);
    }

    Ok(seeded)
}

/// Store dimensions for a built-in size.
pub fn set_builtin_size(store: &dyn OptionStore, spec: &ImageSizeSpec) -> Result<(), OptionError> {
    let [w, h, c] = size_option_names(&spec.name);
    options::set_json(store, &w, &spec.width)?;
    options::set_json(store, &h, &spec.height)?;
    options::set_json(store, &c, &spec.crop)
}
