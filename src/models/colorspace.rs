use serde::{Deserialize, Serialize};
use std::fmt;

/// Colorspace in which per-channel quantization is performed.
///
/// A closed set: the UI layer offers exactly these choices, so selection
/// never fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colorspace {
    Rgb,
    Yuv,
    Yiq,
    Hsv,
    Grayscale,
}

impl Colorspace {
    /// Parse a UI tag ("rgb", "yuv", "yiq", "hsv", "grayscale").
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "rgb" => Some(Colorspace::Rgb),
            "yuv" => Some(Colorspace::Yuv),
            "yiq" => Some(Colorspace::Yiq),
            "hsv" => Some(Colorspace::Hsv),
            "grayscale" => Some(Colorspace::Grayscale),
            _ => None,
        }
    }
}

impl fmt::Display for Colorspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colorspace::Rgb => write!(f, "rgb"),
            Colorspace::Yuv => write!(f, "yuv"),
            Colorspace::Yiq => write!(f, "yiq"),
            Colorspace::Hsv => write!(f, "hsv"),
            Colorspace::Grayscale => write!(f, "grayscale"),
        }
    }
}

/// Validated quantization parameters: colorspace plus one positive level
/// count per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformParams {
    pub colorspace: Colorspace,
    pub levels: [u32; 3],
}
