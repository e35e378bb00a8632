use std::fmt;

use serde::{Deserialize, Serialize};

/// Horizontal crop origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAnchor {
    Left,
    Center,
    Right,
}

/// Vertical crop origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAnchor {
    Top,
    Center,
    Bottom,
}

/// Crop policy of an image size.
///
/// Serialized the way the host stores it: `false`, `true`, or a
/// `["left", "top"]` style pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "CropRepr", into = "CropRepr")]
pub enum Crop {
    /// Scale only.
    #[default]
    None,
    /// Hard crop, square aspect.
    Hard,
    /// Crop anchored at the given origin.
    Anchored(HorizontalAnchor, VerticalAnchor),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CropRepr {
    Flag(bool),
    Anchors(HorizontalAnchor, VerticalAnchor),
}

impl From<CropRepr> for Crop {
    fn from(repr: CropRepr) -> Self {
        match repr {
            CropRepr::Flag(false) => Self::None,
            CropRepr::Flag(true) => Self::Hard,
            CropRepr::Anchors(h, v) => Self::Anchored(h, v),
        }
    }
}

impl From<Crop> for CropRepr {
    fn from(crop: Crop) -> Self {
        match crop {
            Crop::None => Self::Flag(false),
            Crop::Hard => Self::Flag(true),
            Crop::Anchored(h, v) => Self::Anchors(h, v),
        }
    }
}

/// A named image size registered with the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSizeSpec {
    pub name: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub crop: Crop,
}

impl ImageSizeSpec {
    pub fn new(name: impl Into<String>, width: u32, height: u32, crop: Crop) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            crop,
        }
    }

    /// True when neither dimension is set.
    pub fn is_unsized(&self) -> bool {
        self.width == 0 && self.height == 0
    }
}

impl fmt::Display for ImageSizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}x{}", self.name, self.width, self.height)?;
        match self.crop {
            Crop::None => write!(f, ")"),
            Crop::Hard => write!(f, ", crop)"),
            Crop::Anchored(h, v) => write!(f, ", crop {h:?}/{v:?})"),
        }
    }
}
