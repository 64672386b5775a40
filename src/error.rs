use thiserror::Error;

/// Errors produced while building a palette.
///
/// Conditions that are a normal outcome of palette extraction (an empty
/// image, a slot nobody matched, an overlay that cannot reach a ratio) are
/// modelled as `Option`, not as variants here.
#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("Unable to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("RGBA buffer length {len} is not a multiple of 4")]
    PixelBuffer { len: usize },

    #[error("Contrast background must be opaque (alpha = {alpha})")]
    TranslucentBackground { alpha: f64 },

    #[error("Invalid hex color: {0}")]
    InvalidHex(String),

    #[error("Unknown palette size: {0} (expected micro, small, default or large)")]
    UnknownPaletteSize(String),
}
