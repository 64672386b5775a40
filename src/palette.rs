//! Palette façade: sampling, quantization and variation mapping in one place.

use std::fmt;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use tracing::info;

use crate::color::Rgb;
use crate::contrast::ContrastConfig;
use crate::error::PaletteError;
use crate::filter::{DefaultFilter, Filter, FilterChain};
use crate::quantizer::{PaletteSize, PixelCounts, Quantizer, count_pixels, count_whole_pixels};
use crate::sample::Sample;
use crate::variation::{Variation, VariationProfiles};
use crate::variation_map::{DefaultVariationMap, VariationMap};

/// Longest side, in pixels, an image is sampled at by default.
pub const DEFAULT_MAX_DIMENSION: u32 = 192;

/// Quantized samples of an image and the variation slots they were mapped to.
pub struct ColorPalette {
    samples: Vec<Sample>,
    variations: Box<dyn VariationMap>,
}

impl ColorPalette {
    pub fn builder() -> PaletteBuilder {
        PaletteBuilder::new()
    }

    /// Palette of encoded image bytes with the default filters and mapping.
    pub fn from_image_bytes(input: &[u8], size: PaletteSize) -> Result<Self, PaletteError> {
        PaletteBuilder::new().size(size).from_image_bytes(input)
    }

    pub fn from_image(image: &DynamicImage, size: PaletteSize) -> Self {
        PaletteBuilder::new().size(size).from_image(image)
    }

    /// All samples, in the order the quantizer emitted them.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn variation(&self, variation: Variation) -> Option<&Sample> {
        self.variations.sample(variation)
    }

    pub fn vibrant(&self) -> Option<&Sample> {
        self.variations.vibrant()
    }

    pub fn muted(&self) -> Option<&Sample> {
        self.variations.muted()
    }

    pub fn light_vibrant(&self) -> Option<&Sample> {
        self.variations.light_vibrant()
    }

    pub fn light_muted(&self) -> Option<&Sample> {
        self.variations.light_muted()
    }

    pub fn dark_vibrant(&self) -> Option<&Sample> {
        self.variations.dark_vibrant()
    }

    pub fn dark_muted(&self) -> Option<&Sample> {
        self.variations.dark_muted()
    }

    /// Color of `variation`, or `default` if the slot is empty.
    pub fn color_or(&self, variation: Variation, default: Rgb) -> Rgb {
        self.variation(variation).map_or(default, Sample::rgb)
    }

    pub fn vibrant_color_or(&self, default: Rgb) -> Rgb {
        self.color_or(Variation::Vibrant, default)
    }

    pub fn muted_color_or(&self, default: Rgb) -> Rgb {
        self.color_or(Variation::Muted, default)
    }

    pub fn light_vibrant_color_or(&self, default: Rgb) -> Rgb {
        self.color_or(Variation::LightVibrant, default)
    }

    pub fn light_muted_color_or(&self, default: Rgb) -> Rgb {
        self.color_or(Variation::LightMuted, default)
    }

    pub fn dark_vibrant_color_or(&self, default: Rgb) -> Rgb {
        self.color_or(Variation::DarkVibrant, default)
    }

    pub fn dark_muted_color_or(&self, default: Rgb) -> Rgb {
        self.color_or(Variation::DarkMuted, default)
    }
}

impl fmt::Debug for ColorPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ColorPalette");
        s.field("samples", &self.samples);
        for variation in Variation::ALL {
            s.field(variation.name(), &self.variation(variation).map(Sample::rgb));
        }
        s.finish()
    }
}

// ------------------------------------------------------------
// Builder
// ------------------------------------------------------------

/// Configures and runs palette generation.
///
/// By default the palette holds 16 colors, the [`DefaultFilter`] is the only
/// filter, samples are mapped with [`DefaultVariationMap`], and images are
/// sampled at most [`DEFAULT_MAX_DIMENSION`] pixels on their longest side.
pub struct PaletteBuilder {
    size: PaletteSize,
    filters: FilterChain,
    variation_map: Option<Box<dyn VariationMap>>,
    profiles: VariationProfiles,
    contrast: ContrastConfig,
    max_dimension: u32,
}

impl Default for PaletteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteBuilder {
    pub fn new() -> Self {
        Self {
            size: PaletteSize::default(),
            filters: FilterChain::empty().with(DefaultFilter::default()),
            variation_map: None,
            profiles: VariationProfiles::default(),
            contrast: ContrastConfig::default(),
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }

    pub fn size(mut self, size: PaletteSize) -> Self {
        self.size = size;
        self
    }

    /// Remove every filter, including the default one.
    pub fn clear_filters(mut self) -> Self {
        self.filters.clear();
        self
    }

    pub fn add_filter<F>(mut self, filter: F) -> Self
    where
        F: Filter + Send + Sync + 'static,
    {
        self.filters.push(filter);
        self
    }

    /// Replace the default greedy matcher. Profiles set with
    /// [`variation_profiles`](Self::variation_profiles) do not apply to a
    /// custom map.
    pub fn variation_map<M>(mut self, map: M) -> Self
    where
        M: VariationMap + 'static,
    {
        self.variation_map = Some(Box::new(map));
        self
    }

    pub fn variation_profiles(mut self, profiles: VariationProfiles) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn contrast(mut self, contrast: ContrastConfig) -> Self {
        self.contrast = contrast;
        self
    }

    pub fn max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Quantize counted pixels and map the samples to variations.
    pub fn generate(self, counts: &PixelCounts) -> ColorPalette {
        // 1. Filter and median-cut the counted colors
        let quantizer = Quantizer::new(self.size, self.contrast);
        let samples = quantizer.quantize(counts, &self.filters);

        // 2. Assign samples to the variation slots
        let mut variations = self.variation_map.unwrap_or_else(|| {
            Box::new(DefaultVariationMap::new(self.profiles, self.contrast))
        });
        variations.map(&samples);

        info!(
            size = %self.size,
            colors = counts.len(),
            samples = samples.len(),
            "palette generated"
        );
        ColorPalette { samples, variations }
    }

    /// Palette of a raw RGBA8 buffer, sampled as-is.
    pub fn from_rgba(self, rgba: &[u8]) -> Result<ColorPalette, PaletteError> {
        let counts = count_pixels(rgba)?;
        Ok(self.generate(&counts))
    }

    /// Palette of a decoded image, downscaled first if its longest side
    /// exceeds the maximum dimension.
    pub fn from_image(self, image: &DynamicImage) -> ColorPalette {
        // 1. Downscale (nearest-neighbour) when larger than the max dimension
        let raw = match sampling_size(image.dimensions(), self.max_dimension) {
            Some((w, h)) => image::imageops::resize(image, w, h, FilterType::Nearest).into_raw(),
            None => image.to_rgba8().into_raw(),
        };

        // 2. Count opaque pixels and generate
        self.generate(&count_whole_pixels(&raw))
    }

    pub fn from_image_bytes(self, input: &[u8]) -> Result<ColorPalette, PaletteError> {
        let image = image::load_from_memory(input)?;
        Ok(self.from_image(&image))
    }
}

// ------------------------------------------------------------
// Sampling size
// ------------------------------------------------------------

/// Target size for sampling, or `None` if the image is already small enough.
fn sampling_size((width, height): (u32, u32), max_dimension: u32) -> Option<(u32, u32)> {
    let max_side = width.max(height);
    if max_side <= max_dimension {
        return None;
    }
    let ratio = max_dimension as f64 / max_side as f64;
    let w = (width as f64 * ratio).round().max(1.0) as u32;
    let h = (height as f64 * ratio).round().max(1.0) as u32;
    Some((w, h))
}
