use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use image_to_palette_wasm::{ColorPalette, DEFAULT_MAX_DIMENSION, PaletteBuilder, PaletteSize, Rgb, Variation};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

/// Extract a color palette and its named variations from images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Maximum number of palette colors
    #[arg(short, long, value_enum, default_value_t = PaletteSize::Default)]
    size: PaletteSize,

    /// Longest side, in pixels, images are downscaled to before sampling
    #[arg(short = 'm', long, default_value_t = DEFAULT_MAX_DIMENSION)]
    max_dimension: u32,

    /// Hex color printed for variations no sample matched (e.g. 808080)
    #[arg(short, long)]
    fallback: Option<String>,

    /// Print JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// Log palette generation
    #[arg(short, long)]
    verbose: bool,

    /// Log quantization and variation matching in detail
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.debug);

    let fallback = args
        .fallback
        .as_deref()
        .map(Rgb::from_hex)
        .transpose()
        .context("invalid --fallback color")?;

    let mut reports = Vec::new();
    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        let palette = PaletteBuilder::new()
            .size(args.size)
            .max_dimension(args.max_dimension)
            .from_image_bytes(&bytes)
            .with_context(|| format!("extracting palette from {}", input.display()))?;

        if args.json {
            reports.push(json_report(input, &palette, fallback));
        } else {
            print_report(input, &palette, fallback);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}

fn init_logging(verbose: bool, debug: bool) {
    let default_level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn variation_hex(palette: &ColorPalette, variation: Variation, fallback: Option<Rgb>) -> Option<String> {
    match fallback {
        Some(default) => Some(palette.color_or(variation, default).to_hex()),
        None => palette.variation(variation).map(|s| s.rgb().to_hex()),
    }
}

fn json_report(input: &Path, palette: &ColorPalette, fallback: Option<Rgb>) -> Value {
    let samples: Vec<Value> = palette
        .samples()
        .iter()
        .map(|s| {
            json!({
                "color": s.rgb().to_hex(),
                "population": s.population(),
                "titleText": s.title_text_color().map(|c| c.to_hex()),
                "bodyText": s.body_text_color().map(|c| c.to_hex()),
            })
        })
        .collect();

    let mut variations = serde_json::Map::new();
    for variation in Variation::ALL {
        variations.insert(
            variation.name().to_string(),
            json!(variation_hex(palette, variation, fallback)),
        );
    }

    json!({
        "input": input.display().to_string(),
        "samples": samples,
        "variations": variations,
    })
}

fn print_report(input: &Path, palette: &ColorPalette, fallback: Option<Rgb>) {
    println!("{}", input.display());
    for sample in palette.samples() {
        println!("  #{}  {:>7}", sample.rgb().to_hex(), sample.population());
    }
    for variation in Variation::ALL {
        let hex = variation_hex(palette, variation, fallback)
            .map_or_else(|| "-".to_string(), |h| format!("#{h}"));
        println!("  {:<12} {hex}", variation.name());
    }
}
