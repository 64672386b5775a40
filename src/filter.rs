//! Color filters applied before quantization.

use crate::color::{Hsl, Rgb};

/// Decides whether a color may take part in a palette.
pub trait Filter {
    fn is_allowed(&self, color: Rgb) -> bool;
}

impl<F> Filter for F
where
    F: Fn(Rgb) -> bool,
{
    fn is_allowed(&self, color: Rgb) -> bool {
        self(color)
    }
}

/// Thresholds used by [`DefaultFilter`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterConfig {
    /// At or below this luminance a color counts as black.
    pub black_max_luminance: f64,
    /// At or above this luminance a color counts as white.
    pub white_min_luminance: f64,
    pub red_band_min_hue: f64,
    pub red_band_max_hue: f64,
    /// Colors in the red hue band are rejected at or below this saturation.
    pub red_band_max_saturation: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            black_max_luminance: 0.05,
            white_min_luminance: 0.95,
            red_band_min_hue: 10.0 / 360.0,
            red_band_max_hue: 37.0 / 360.0,
            red_band_max_saturation: 0.82,
        }
    }
}

/// Rejects near-black, near-white, and desaturated orange-red colors.
///
/// The red band catches skin tones and sensor casts that dominate photos
/// without reading as a distinct color.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultFilter {
    config: FilterConfig,
}

impl DefaultFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    fn is_black(&self, hsl: Hsl) -> bool {
        hsl.luminance <= self.config.black_max_luminance
    }

    fn is_white(&self, hsl: Hsl) -> bool {
        hsl.luminance >= self.config.white_min_luminance
    }

    fn is_in_red_band(&self, hsl: Hsl) -> bool {
        (self.config.red_band_min_hue..=self.config.red_band_max_hue).contains(&hsl.hue)
            && hsl.saturation <= self.config.red_band_max_saturation
    }
}

impl Filter for DefaultFilter {
    fn is_allowed(&self, color: Rgb) -> bool {
        let hsl = color.to_hsl();
        !self.is_white(hsl) && !self.is_black(hsl) && !self.is_in_red_band(hsl)
    }
}

/// An ordered set of filters. A color passes only if every filter allows it.
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn Filter + Send + Sync>>,
}

impl FilterChain {
    /// A chain with no filters; every color passes.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push<F>(&mut self, filter: F)
    where
        F: Filter + Send + Sync + 'static,
    {
        self.filters.push(Box::new(filter));
    }

    pub fn with<F>(mut self, filter: F) -> Self
    where
        F: Filter + Send + Sync + 'static,
    {
        self.push(filter);
        self
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Filter for FilterChain {
    fn is_allowed(&self, color: Rgb) -> bool {
        self.filters.iter().all(|f| f.is_allowed(color))
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain").field("filters", &self.filters.len()).finish()
    }
}
