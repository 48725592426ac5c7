//! Generation parameters encoded in the model name
//!
//! `gemini-3-pro-image-2k-9-16` asks for a 2K render at 9:16. The
//! resolution marker may appear anywhere in the name; the aspect ratio is
//! only recognised as a suffix.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Resolution {
    #[serde(rename = "1K")]
    OneK,
    #[serde(rename = "2K")]
    TwoK,
}

impl Resolution {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneK => "1K",
            Self::TwoK => "2K",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    ThreeFour,
    #[serde(rename = "4:3")]
    FourThree,
    #[serde(rename = "16:9")]
    SixteenNine,
    #[serde(rename = "9:16")]
    NineSixteen,
    #[serde(rename = "21:9")]
    TwentyOneNine,
    #[serde(rename = "9:21")]
    NineTwentyOne,
}

impl AspectRatio {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::ThreeFour => "3:4",
            Self::FourThree => "4:3",
            Self::SixteenNine => "16:9",
            Self::NineSixteen => "9:16",
            Self::TwentyOneNine => "21:9",
            Self::NineTwentyOne => "9:21",
        }
    }
}

/// Suffix markers, checked in this order; the first match wins
pub static RATIO_SUFFIXES: [(&str, AspectRatio); 7] = [
    ("-1-1", AspectRatio::Square),
    ("-3-4", AspectRatio::ThreeFour),
    ("-4-3", AspectRatio::FourThree),
    ("-16-9", AspectRatio::SixteenNine),
    ("-9-16", AspectRatio::NineSixteen),
    ("-21-9", AspectRatio::TwentyOneNine),
    ("-9-21", AspectRatio::NineTwentyOne),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParameters {
    pub resolution: Resolution,
    pub aspect_ratio: AspectRatio,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            resolution: Resolution::OneK,
            aspect_ratio: AspectRatio::TwentyOneNine,
        }
    }
}

impl fmt::Display for GenerationParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.resolution.as_str(), self.aspect_ratio.as_str())
    }
}

/// Decode generation parameters from a model identifier
///
/// Total and case-insensitive: unknown names yield the defaults
/// (`1K`, `21:9`).
pub fn decode(model: &str) -> GenerationParameters {
    let lower = model.to_ascii_lowercase();
    let defaults = GenerationParameters::default();

    let resolution = if lower.contains("2k") {
        Resolution::TwoK
    } else {
        defaults.resolution
    };

    let aspect_ratio = RATIO_SUFFIXES
        .iter()
        .find(|(suffix, _)| lower.ends_with(suffix))
        .map_or(defaults.aspect_ratio, |&(_, ratio)| ratio);

    GenerationParameters {
        resolution,
        aspect_ratio,
    }
}
