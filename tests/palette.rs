use image_to_palette_wasm::{
    ColorPalette, PaletteBuilder, PaletteError, PaletteSize, PixelCounts, Rgb, Rgba, Sample, Variation,
    count_pixels, extract_palette_bytes,
};
use pretty_assertions::assert_eq;

/// Reds and grays spread over every variation, plus black and white.
const REFERENCE_COLORS: [[u8; 3]; 18] = [
    [255, 0, 0],
    [103, 50, 50],
    [255, 102, 102],
    [166, 89, 89],
    [76, 76, 76],
    [209, 148, 148],
    [255, 122, 122],
    [180, 100, 100],
    [255, 255, 255],
    [209, 169, 169],
    [140, 140, 140],
    [255, 255, 255],
    [133, 0, 0],
    [0, 0, 0],
    [230, 0, 0],
    [86, 46, 46],
    [0, 0, 0],
    [161, 69, 69],
];

fn rgba_buffer(colors: &[[u8; 3]]) -> Vec<u8> {
    colors.iter().flat_map(|&[r, g, b]| [r, g, b, 255]).collect()
}

fn hex_of(sample: Option<&Sample>) -> Option<String> {
    sample.map(|s| s.rgb().to_hex())
}

#[test]
fn reference_image_fills_every_variation() {
    let palette = PaletteBuilder::new()
        .from_rgba(&rgba_buffer(&REFERENCE_COLORS))
        .unwrap();

    // Black and white are filtered; every other color fits in a default palette.
    assert_eq!(palette.samples().len(), 14);
    assert_eq!(palette.vibrant().map(Sample::rgb), Some(Rgb::from_u8(255, 0, 0)));
    assert_eq!(hex_of(palette.light_vibrant()), Some("FF7A7A".to_string()));
    assert_eq!(hex_of(palette.dark_vibrant()), Some("850000".to_string()));
    assert_eq!(hex_of(palette.muted()), Some("A65959".to_string()));
    assert_eq!(hex_of(palette.light_muted()), Some("D1A9A9".to_string()));
    assert_eq!(hex_of(palette.dark_muted()), Some("562E2E".to_string()));
}

#[test]
fn generation_is_deterministic() {
    let buffer = rgba_buffer(&REFERENCE_COLORS);
    let first = PaletteBuilder::new().size(PaletteSize::Small).from_rgba(&buffer).unwrap();
    let second = PaletteBuilder::new().size(PaletteSize::Small).from_rgba(&buffer).unwrap();

    assert_eq!(first.samples(), second.samples());
    for variation in Variation::ALL {
        assert_eq!(first.variation(variation), second.variation(variation));
    }
}

#[test]
fn small_palette_stays_within_its_bound() {
    let palette = PaletteBuilder::new()
        .size(PaletteSize::Small)
        .from_rgba(&rgba_buffer(&REFERENCE_COLORS))
        .unwrap();
    assert_eq!(palette.samples().len(), 8);
    let population: u64 = palette.samples().iter().map(Sample::population).sum();
    assert_eq!(population, 14);
}

#[test]
fn micro_palette_of_black_white_and_red() {
    let mut pixels = Vec::new();
    for color in [[0, 0, 0], [255, 255, 255], [255, 0, 0]] {
        pixels.extend(std::iter::repeat_n(color, 50));
    }
    let palette = PaletteBuilder::new()
        .size(PaletteSize::Micro)
        .clear_filters()
        .from_rgba(&rgba_buffer(&pixels))
        .unwrap();

    let samples: Vec<(Rgb, u64)> = palette.samples().iter().map(|s| (s.rgb(), s.population())).collect();
    assert_eq!(samples, vec![(Rgb::new(0.5, 0.0, 0.0), 100), (Rgb::WHITE, 50)]);

    assert_eq!(palette.dark_vibrant().map(Sample::rgb), Some(Rgb::new(0.5, 0.0, 0.0)));
    assert_eq!(palette.light_muted().map(Sample::rgb), Some(Rgb::WHITE));

    // Vibrant is synthesized from dark vibrant.
    let vibrant = palette.vibrant().unwrap();
    assert_eq!(vibrant.population(), 0);
    assert_eq!(vibrant.rgb().to_u8(), [255, 0, 0]);
}

#[test]
fn empty_image_has_no_samples() {
    let palette = PaletteBuilder::new().from_rgba(&[]).unwrap();
    assert!(palette.samples().is_empty());
    for variation in Variation::ALL {
        assert_eq!(palette.variation(variation), None);
    }
}

#[test]
fn white_only_image_uses_defaults() {
    let palette = PaletteBuilder::new()
        .from_rgba(&rgba_buffer(&[[255, 255, 255]; 16]))
        .unwrap();
    let fallback = Rgb::from_u8(0x80, 0x80, 0x80);
    assert!(palette.samples().is_empty());
    assert_eq!(palette.vibrant_color_or(fallback), fallback);
    assert_eq!(palette.muted_color_or(fallback), fallback);
    assert_eq!(palette.light_vibrant_color_or(fallback), fallback);
    assert_eq!(palette.light_muted_color_or(fallback), fallback);
    assert_eq!(palette.dark_vibrant_color_or(fallback), fallback);
    assert_eq!(palette.dark_muted_color_or(fallback), fallback);
}

#[test]
fn samples_carry_readable_text_colors() {
    let palette = PaletteBuilder::new()
        .clear_filters()
        .from_rgba(&rgba_buffer(&[[0, 0, 0], [255, 255, 255]]))
        .unwrap();

    let black = palette.samples().iter().find(|s| s.rgb() == Rgb::BLACK).unwrap();
    assert_eq!(black.body_text_color(), Some(Rgba::new(Rgb::WHITE, 0.15625)));

    let white = palette.samples().iter().find(|s| s.rgb() == Rgb::WHITE).unwrap();
    assert_eq!(white.body_text_color(), Some(Rgba::new(Rgb::BLACK, 0.75)));
}

#[test]
fn counted_pixels_match_builder_input() {
    let buffer = rgba_buffer(&REFERENCE_COLORS);
    let counts = count_pixels(&buffer).unwrap();
    assert_eq!(counts.len(), 16);
    assert_eq!(counts.get(Rgb::WHITE), Some(2));

    let from_counts = PaletteBuilder::new().generate(&counts);
    let from_buffer = PaletteBuilder::new().from_rgba(&buffer).unwrap();
    assert_eq!(from_counts.samples(), from_buffer.samples());
}

#[test]
fn population_counts_feed_quantization() {
    let counts: PixelCounts = [(Rgb::from_u8(200, 30, 30), 7), (Rgb::from_u8(30, 30, 200), 3)]
        .into_iter()
        .collect();
    let palette = PaletteBuilder::new().generate(&counts);
    let populations: Vec<u64> = palette.samples().iter().map(Sample::population).collect();
    assert_eq!(populations, vec![7, 3]);
}

#[test]
fn malformed_input_is_rejected() {
    assert!(matches!(
        PaletteBuilder::new().from_rgba(&[1, 2, 3]),
        Err(PaletteError::PixelBuffer { len: 3 })
    ));
    assert!(matches!(
        ColorPalette::from_image_bytes(&[0, 1, 2, 3], PaletteSize::Default),
        Err(PaletteError::Decode(_))
    ));
    assert!(matches!(
        extract_palette_bytes(b"GIF89a", PaletteSize::Small),
        Err(PaletteError::Decode(_))
    ));
}
