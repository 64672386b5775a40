//! Pixel counting and median-cut quantization.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::color::Rgb;
use crate::color_space_box::ColorSpaceBox;
use crate::contrast::ContrastConfig;
use crate::error::PaletteError;
use crate::filter::Filter;
use crate::sample::{ColorInformation, Sample};

/// Upper bound on the number of samples a palette holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "native-bin", derive(clap::ValueEnum))]
pub enum PaletteSize {
    /// 2 colors; mostly useful in tests.
    Micro,
    /// 8 colors. Most colors get averaged together.
    Small,
    /// 16 colors. Good for landscapes.
    #[default]
    Default,
    /// 24 colors. Good for faces.
    Large,
}

impl PaletteSize {
    pub fn max_colors(self) -> usize {
        match self {
            PaletteSize::Micro => 2,
            PaletteSize::Small => 8,
            PaletteSize::Default => 16,
            PaletteSize::Large => 24,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaletteSize::Micro => "micro",
            PaletteSize::Small => "small",
            PaletteSize::Default => "default",
            PaletteSize::Large => "large",
        }
    }
}

impl fmt::Display for PaletteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteSize {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "micro" => Ok(PaletteSize::Micro),
            "small" => Ok(PaletteSize::Small),
            "default" => Ok(PaletteSize::Default),
            "large" => Ok(PaletteSize::Large),
            _ => Err(PaletteError::UnknownPaletteSize(s.to_string())),
        }
    }
}

/// Distinct colors and their pixel counts, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PixelCounts {
    entries: Vec<(Rgb, u64)>,
    index: HashMap<Rgb, usize>,
}

impl PixelCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `population` pixels of `color`.
    pub fn add(&mut self, color: Rgb, population: u64) {
        match self.index.get(&color) {
            Some(&i) => self.entries[i].1 += population,
            None => {
                self.index.insert(color, self.entries.len());
                self.entries.push((color, population));
            }
        }
    }

    pub fn get(&self, color: Rgb) -> Option<u64> {
        self.index.get(&color).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Rgb, u64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn total_population(&self) -> u64 {
        self.entries.iter().map(|&(_, p)| p).sum()
    }
}

impl FromIterator<(Rgb, u64)> for PixelCounts {
    fn from_iter<I: IntoIterator<Item = (Rgb, u64)>>(iter: I) -> Self {
        let mut counts = PixelCounts::new();
        for (color, population) in iter {
            counts.add(color, population);
        }
        counts
    }
}

/// Count identical colors in an RGBA8 buffer. Fully transparent pixels are
/// skipped.
pub fn count_pixels(rgba: &[u8]) -> Result<PixelCounts, PaletteError> {
    if rgba.len() % 4 != 0 {
        return Err(PaletteError::PixelBuffer { len: rgba.len() });
    }
    Ok(count_whole_pixels(rgba))
}

/// Like [`count_pixels`], ignoring a trailing partial pixel.
pub(crate) fn count_whole_pixels(rgba: &[u8]) -> PixelCounts {
    let mut counts = PixelCounts::new();
    for chunk in rgba.chunks_exact(4) {
        if chunk[3] == 0 {
            continue;
        }
        counts.add(Rgb::from_u8(chunk[0], chunk[1], chunk[2]), 1);
    }
    counts
}

/// Reduces counted colors to at most [`PaletteSize::max_colors`] samples.
#[derive(Clone, Copy, Debug, Default)]
pub struct Quantizer {
    size: PaletteSize,
    contrast: ContrastConfig,
}

impl Quantizer {
    pub fn new(size: PaletteSize, contrast: ContrastConfig) -> Self {
        Self { size, contrast }
    }

    pub fn size(&self) -> PaletteSize {
        self.size
    }

    /// Filter, then quantize.
    pub fn quantize(&self, counts: &PixelCounts, filter: &dyn Filter) -> Vec<Sample> {
        let entries = admitted_colors(counts, filter);
        self.quantize_colors(entries)
    }

    /// Median-cut a list of colors that has already been filtered.
    ///
    /// If there are no more entries than the palette allows, each entry is
    /// its own sample. Otherwise the box with the largest volume is split
    /// until the palette is full or that box cannot split. Boxes stay ordered
    /// by descending volume (stable, so ties keep discovery order) and the
    /// samples come out in that order.
    pub fn quantize_colors(&self, entries: Vec<ColorInformation>) -> Vec<Sample> {
        let max_colors = self.size.max_colors();
        debug!(entries = entries.len(), max_colors, "quantizing colors");

        if entries.len() <= max_colors {
            return entries
                .into_iter()
                .map(|info| Sample::new(info, &self.contrast))
                .collect();
        }

        let mut boxes = vec![ColorSpaceBox::new(entries)];
        while boxes.len() < max_colors {
            let Some(new_box) = boxes[0].split() else {
                debug!(boxes = boxes.len(), "largest box cannot split; stopping early");
                break;
            };
            boxes.push(new_box);
            boxes.sort_by(|a, b| b.volume().total_cmp(&a.volume()));
        }

        debug!(boxes = boxes.len(), "quantization finished");
        boxes
            .iter()
            .map(|cbox| cbox.average_color(&self.contrast))
            .collect()
    }
}

/// Colors in `counts` that pass `filter`, in first-seen order.
pub fn admitted_colors(counts: &PixelCounts, filter: &dyn Filter) -> Vec<ColorInformation> {
    counts
        .iter()
        .filter(|&(color, _)| filter.is_allowed(color))
        .map(|(color, population)| ColorInformation::new(color, population))
        .collect()
}
