//! Contrast ratio and readable overlay (text) color selection.
//!
//! The ratio here is computed on HSL luminance, `(L1 + 0.05) / (L2 + 0.05)`
//! with `L1 >= L2`, so it ranges over `[1, 21]`. Overlays are white or black
//! at the lowest alpha that still reaches a minimum ratio.

use crate::color::{Rgb, Rgba};
use crate::error::PaletteError;

/// Bounds on the binary search for a minimum overlay alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlphaSearch {
    pub max_iterations: usize,
    /// The search stops once `upper - lower` is at or below this width.
    pub precision: f64,
}

impl Default for AlphaSearch {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            precision: 10.0 / 255.0,
        }
    }
}

/// Minimum ratios for the two text overlays computed for every sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContrastConfig {
    pub title_min_ratio: f64,
    pub body_min_ratio: f64,
    pub search: AlphaSearch,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            title_min_ratio: 3.0,
            body_min_ratio: 3.5,
            search: AlphaSearch::default(),
        }
    }
}

/// Contrast ratio of `foreground` against an opaque `background`.
///
/// A translucent foreground is composited onto the background first.
pub fn opaque_contrast_ratio(foreground: Rgba, background: Rgb) -> f64 {
    let foreground = if foreground.is_opaque() {
        foreground.rgb
    } else {
        foreground.composite_over(background)
    };
    let fg = foreground.to_hsl().luminance + 0.05;
    let bg = background.to_hsl().luminance + 0.05;
    fg.max(bg) / fg.min(bg)
}

/// Contrast ratio between two colors, rejecting a translucent background.
pub fn contrast_ratio(foreground: Rgba, background: Rgba) -> Result<f64, PaletteError> {
    if !background.is_opaque() {
        return Err(PaletteError::TranslucentBackground {
            alpha: background.alpha,
        });
    }
    Ok(opaque_contrast_ratio(foreground, background.rgb))
}

/// Lowest alpha at which `overlay` reaches `min_ratio` over `background`.
///
/// Returns `None` when even the fully opaque overlay falls short. The value
/// returned is always the upper bound of the search window, so it is one
/// that was observed to pass.
pub fn minimum_contrasting_alpha(
    overlay: Rgb,
    background: Rgb,
    min_ratio: f64,
    search: AlphaSearch,
) -> Option<f64> {
    if opaque_contrast_ratio(Rgba::opaque(overlay), background) < min_ratio {
        return None;
    }

    let mut lower = 0.0_f64;
    let mut upper = 1.0_f64;
    for _ in 0..search.max_iterations {
        if upper - lower <= search.precision {
            break;
        }
        let alpha = (lower + upper) / 2.0;
        if opaque_contrast_ratio(Rgba::new(overlay, alpha), background) < min_ratio {
            lower = alpha;
        } else {
            upper = alpha;
        }
    }
    Some(upper)
}

/// Which of the two overlay colors can reach the ratio, and at what alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OverlayCandidates {
    Neither,
    WhiteOnly(f64),
    BlackOnly(f64),
    Both { white: f64, black: f64 },
}

impl OverlayCandidates {
    pub fn evaluate(background: Rgb, min_ratio: f64, search: AlphaSearch) -> Self {
        let white = minimum_contrasting_alpha(Rgb::WHITE, background, min_ratio, search);
        let black = minimum_contrasting_alpha(Rgb::BLACK, background, min_ratio, search);
        match (white, black) {
            (Some(white), Some(black)) => Self::Both { white, black },
            (Some(white), None) => Self::WhiteOnly(white),
            (None, Some(black)) => Self::BlackOnly(black),
            (None, None) => Self::Neither,
        }
    }

    /// The less obscuring overlay. Black wins an exact tie.
    pub fn winner(self) -> Option<Rgba> {
        match self {
            Self::Neither => None,
            Self::WhiteOnly(alpha) => Some(Rgba::new(Rgb::WHITE, alpha)),
            Self::BlackOnly(alpha) => Some(Rgba::new(Rgb::BLACK, alpha)),
            Self::Both { white, black } if white < black => Some(Rgba::new(Rgb::WHITE, white)),
            Self::Both { black, .. } => Some(Rgba::new(Rgb::BLACK, black)),
        }
    }
}

/// White or black at the smallest alpha that reads over `background`.
pub fn contrasting_text_color(background: Rgb, min_ratio: f64, search: AlphaSearch) -> Option<Rgba> {
    OverlayCandidates::evaluate(background, min_ratio, search).winner()
}
