use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

pub mod color;
pub mod color_space_box;
pub mod contrast;
pub mod error;
pub mod filter;
pub mod palette;
pub mod quantizer;
pub mod sample;
pub mod variation;
pub mod variation_map;

pub use color::{Hsl, Rgb, Rgba};
pub use contrast::{AlphaSearch, ContrastConfig, OverlayCandidates, contrast_ratio, contrasting_text_color};
pub use error::PaletteError;
pub use filter::{DefaultFilter, Filter, FilterChain, FilterConfig};
pub use palette::{ColorPalette, DEFAULT_MAX_DIMENSION, PaletteBuilder};
pub use quantizer::{PaletteSize, PixelCounts, Quantizer, count_pixels};
pub use sample::{ColorInformation, Sample};
pub use variation::{ColorVariation, Variation, VariationProfiles};
pub use variation_map::{DefaultVariationMap, VariationMap};

/// Extract a color palette from encoded image bytes (PNG, JPEG, ...).
///
/// `palette_size` is one of `micro`, `small`, `default` or `large`; it
/// defaults to `default` (16 colors).
///
/// Returns a JS object:
///
/// ```text
/// {
///   samples: [{ color: "RRGGBB", population, titleText: "RRGGBBAA" | null, bodyText: ... }],
///   variations: { vibrant: "RRGGBB" | null, muted, lightVibrant, lightMuted, darkVibrant, darkMuted }
/// }
/// ```
///
/// Samples keep the order the quantizer produced them in.
#[wasm_bindgen]
pub fn extract_palette(input: Vec<u8>, palette_size: Option<String>) -> Result<Object, JsValue> {
    // ----------------------
    // 1. Decode and quantize
    // ----------------------
    let size = match palette_size {
        Some(name) => name.parse::<PaletteSize>().map_err(to_js_error)?,
        None => PaletteSize::default(),
    };
    let palette = ColorPalette::from_image_bytes(&input, size).map_err(to_js_error)?;

    // ----------------------
    // 2. Samples with their text overlays
    // ----------------------
    let samples_js = Array::new();
    for sample in palette.samples() {
        let entry = Object::new();
        Reflect::set(&entry, &JsValue::from_str("color"), &JsValue::from_str(&sample.rgb().to_hex()))?;
        Reflect::set(&entry, &JsValue::from_str("population"), &JsValue::from_f64(sample.population() as f64))?;
        Reflect::set(&entry, &JsValue::from_str("titleText"), &optional_hex(sample.title_text_color().map(Rgba::to_hex)))?;
        Reflect::set(&entry, &JsValue::from_str("bodyText"), &optional_hex(sample.body_text_color().map(Rgba::to_hex)))?;
        samples_js.push(&entry);
    }

    // ----------------------
    // 3. Named variations, null when unmatched
    // ----------------------
    let variations_js = Object::new();
    for variation in Variation::ALL {
        let hex = palette.variation(variation).map(|s| s.rgb().to_hex());
        Reflect::set(&variations_js, &JsValue::from_str(variation.name()), &optional_hex(hex))?;
    }

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("samples"), &samples_js)?;
    Reflect::set(&result, &JsValue::from_str("variations"), &variations_js)?;

    Ok(result)
}

fn optional_hex(hex: Option<String>) -> JsValue {
    hex.map_or(JsValue::NULL, |h| JsValue::from_str(&h))
}

fn to_js_error(e: PaletteError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Native counterpart of [`extract_palette`].
#[cfg(not(target_arch = "wasm32"))]
pub fn extract_palette_bytes(input: &[u8], size: PaletteSize) -> Result<ColorPalette, PaletteError> {
    ColorPalette::from_image_bytes(input, size)
}
