use tracing::warn;

use crate::color::{Hsl, Rgb, Rgba};
use crate::contrast::{ContrastConfig, contrasting_text_color};

/// A color and how many pixels carried it, with its HSL form cached.
#[derive(Clone, Copy, Debug)]
pub struct ColorInformation {
    rgb: Rgb,
    hsl: Hsl,
    population: u64,
}

impl ColorInformation {
    pub fn new(rgb: Rgb, population: u64) -> Self {
        Self {
            rgb,
            hsl: rgb.to_hsl(),
            population,
        }
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    pub fn hsl(&self) -> Hsl {
        self.hsl
    }

    pub fn population(&self) -> u64 {
        self.population
    }
}

impl PartialEq for ColorInformation {
    fn eq(&self, other: &Self) -> bool {
        self.rgb == other.rgb && self.population == other.population
    }
}

impl Eq for ColorInformation {}

/// One palette entry: a color, its population, and the overlay colors that
/// read over it as title and body text.
///
/// Two samples are equal when their RGB values and populations are equal;
/// the overlay colors are derived and do not take part.
#[derive(Clone, Copy, Debug)]
pub struct Sample {
    info: ColorInformation,
    title_text_color: Option<Rgba>,
    body_text_color: Option<Rgba>,
}

impl Sample {
    pub fn new(info: ColorInformation, contrast: &ContrastConfig) -> Self {
        let title_text_color = contrasting_text_color(info.rgb, contrast.title_min_ratio, contrast.search);
        let body_text_color = contrasting_text_color(info.rgb, contrast.body_min_ratio, contrast.search);
        if title_text_color.is_none() || body_text_color.is_none() {
            warn!(color = %info.rgb, "no overlay color reaches the configured contrast ratio");
        }
        Self {
            info,
            title_text_color,
            body_text_color,
        }
    }

    pub fn from_rgb(rgb: Rgb, population: u64, contrast: &ContrastConfig) -> Self {
        Self::new(ColorInformation::new(rgb, population), contrast)
    }

    pub fn info(&self) -> &ColorInformation {
        &self.info
    }

    pub fn rgb(&self) -> Rgb {
        self.info.rgb
    }

    pub fn hsl(&self) -> Hsl {
        self.info.hsl
    }

    pub fn population(&self) -> u64 {
        self.info.population
    }

    /// White or black at some alpha; `None` if neither reaches the title ratio.
    pub fn title_text_color(&self) -> Option<Rgba> {
        self.title_text_color
    }

    /// White or black at some alpha; `None` if neither reaches the body ratio.
    pub fn body_text_color(&self) -> Option<Rgba> {
        self.body_text_color
    }
}

impl PartialEq for Sample {
    fn eq(&self, other: &Self) -> bool {
        self.info == other.info
    }
}

impl Eq for Sample {}
