use std::fmt;

use crate::size::{Crop, HorizontalAnchor, ImageSizeSpec, VerticalAnchor};

/// Whether a named transformation is declared or overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Create,
    Update,
}

impl Method {
    /// Query parameter carrying the transformation value.
    ///
    /// Updates use `unsafe_update` so existing derived images are
    /// invalidated and regenerated at the new dimensions.
    pub fn parameter(self) -> &'static str {
        match self {
            Self::Create => "transformation",
            Self::Update => "unsafe_update",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
        }
    }
}

/// Cloudinary gravity token for a crop origin.
pub fn gravity(horizontal: HorizontalAnchor, vertical: VerticalAnchor) -> &'static str {
    use HorizontalAnchor as H;
    use VerticalAnchor as V;

    match (horizontal, vertical) {
        (H::Left, V::Top) => "g_north_west",
        (H::Center, V::Top) => "g_north",
        (H::Right, V::Top) => "g_north_east",
        (H::Left, V::Center) => "g_west",
        (H::Center, V::Center) => "g_center",
        (H::Right, V::Center) => "g_east",
        (H::Left, V::Bottom) => "g_south_west",
        (H::Center, V::Bottom) => "g_south",
        (H::Right, V::Bottom) => "g_south_east",
    }
}

/// Crop part of a transformation value; empty when the size does not crop.
pub fn crop_segment(spec: &ImageSizeSpec) -> String {
    match spec.crop {
        Crop::None => String::new(),
        Crop::Hard => "c_crop,ar_1".to_owned(),
        Crop::Anchored(h, v) => {
            // Aspect ratio is undefined with a missing dimension.
            if spec.width == 0 || spec.height == 0 {
                return format!("c_crop,{}", gravity(h, v));
            }
            // Half-up to two places: 100x800 is ar_0.13, not ar_0.12.
            let ratio = (f64::from(spec.width) * 100.0 / f64::from(spec.height)).round() / 100.0;
            format!("c_crop,ar_{ratio:.2},{}", gravity(h, v))
        }
    }
}

/// Size part of a transformation value, e.g. `w_300,h_200`.
pub fn size_segment(width: u32, height: u32) -> String {
    let mut tokens = Vec::with_capacity(2);
    if width > 0 {
        tokens.push(format!("w_{width}"));
    }
    if height > 0 {
        tokens.push(format!("h_{height}"));
    }
    tokens.join(",")
}

/// A create or update of one named transformation, rebuilt on every sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformationRequest {
    pub name: String,
    pub crop_segment: String,
    pub size_segment: String,
    pub method: Method,
}

impl TransformationRequest {
    pub fn new(spec: &ImageSizeSpec, method: Method) -> Self {
        Self {
            name: spec.name.clone(),
            crop_segment: crop_segment(spec),
            size_segment: size_segment(spec.width, spec.height),
            method,
        }
    }

    /// Value sent to Cloudinary: `<crop>/<size>`.
    /// The separator is kept even when the crop segment is empty.
    pub fn value(&self) -> String {
        format!("{}/{}", self.crop_segment, self.size_segment)
    }
}
