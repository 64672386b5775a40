//! Target profiles in luminance/saturation space and match scoring.

use std::fmt;

use crate::sample::Sample;

const SATURATION_WEIGHT: f64 = 3.0;
const LUMINANCE_WEIGHT: f64 = 6.0;
const POPULATION_WEIGHT: f64 = 1.0;

/// `Σ(value · weight) / Σ(weight)`, or 0 when the weights sum to nothing.
pub fn weighted_mean(values: &[(f64, f64)]) -> f64 {
    let (sum, weight) = values
        .iter()
        .fold((0.0, 0.0), |(s, w), &(value, weight)| (s + value * weight, w + weight));
    let mean = sum / weight;
    if mean.is_nan() { 0.0 } else { mean }
}

/// 1 when `value == target`, 0 when they are a full unit apart.
pub fn inverted_difference(value: f64, target: f64) -> f64 {
    1.0 - (value - target).abs()
}

/// The six named slots of a palette, in assignment order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variation {
    Vibrant,
    LightVibrant,
    DarkVibrant,
    Muted,
    LightMuted,
    DarkMuted,
}

impl Variation {
    /// Every slot, in the order slots claim samples.
    pub const ALL: [Variation; 6] = [
        Variation::Vibrant,
        Variation::LightVibrant,
        Variation::DarkVibrant,
        Variation::Muted,
        Variation::LightMuted,
        Variation::DarkMuted,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// camelCase name, as used in JSON output.
    pub fn name(self) -> &'static str {
        match self {
            Variation::Vibrant => "vibrant",
            Variation::LightVibrant => "lightVibrant",
            Variation::DarkVibrant => "darkVibrant",
            Variation::Muted => "muted",
            Variation::LightMuted => "lightMuted",
            Variation::DarkMuted => "darkMuted",
        }
    }
}

impl fmt::Display for Variation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A target region in luminance/saturation space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorVariation {
    pub target_luminance: f64,
    pub min_luminance: f64,
    pub max_luminance: f64,
    pub target_saturation: f64,
    pub min_saturation: f64,
    pub max_saturation: f64,
}

impl ColorVariation {
    pub const VIBRANT: ColorVariation = ColorVariation::new(0.5, 0.3, 0.7, 1.0, 0.35, 1.0);
    pub const MUTED: ColorVariation = ColorVariation::new(0.5, 0.3, 0.7, 0.3, 0.0, 0.4);
    pub const LIGHT_VIBRANT: ColorVariation = ColorVariation::new(0.74, 0.55, 1.0, 1.0, 0.35, 1.0);
    pub const LIGHT_MUTED: ColorVariation = ColorVariation::new(0.74, 0.55, 1.0, 0.3, 0.0, 0.4);
    pub const DARK_VIBRANT: ColorVariation = ColorVariation::new(0.26, 0.0, 0.45, 1.0, 0.35, 1.0);
    pub const DARK_MUTED: ColorVariation = ColorVariation::new(0.26, 0.0, 0.45, 0.3, 0.0, 0.4);

    pub const fn new(
        target_luminance: f64,
        min_luminance: f64,
        max_luminance: f64,
        target_saturation: f64,
        min_saturation: f64,
        max_saturation: f64,
    ) -> Self {
        Self {
            target_luminance,
            min_luminance,
            max_luminance,
            target_saturation,
            min_saturation,
            max_saturation,
        }
    }

    pub fn is_luminance_within_range(&self, luminance: f64) -> bool {
        (self.min_luminance..=self.max_luminance).contains(&luminance)
    }

    pub fn is_saturation_within_range(&self, saturation: f64) -> bool {
        (self.min_saturation..=self.max_saturation).contains(&saturation)
    }

    /// Score in `[0, 1]`, or `None` if the sample lies outside this profile.
    ///
    /// Luminance closeness carries the most weight, then saturation; the
    /// sample's share of `total_population` breaks near-ties.
    pub fn match_rating(&self, sample: &Sample, total_population: u64) -> Option<f64> {
        let hsl = sample.hsl();
        if !self.is_luminance_within_range(hsl.luminance) || !self.is_saturation_within_range(hsl.saturation) {
            return None;
        }

        let saturation = inverted_difference(hsl.saturation, self.target_saturation);
        let luminance = inverted_difference(hsl.luminance, self.target_luminance);
        let population = if total_population == 0 {
            0.0
        } else {
            sample.population() as f64 / total_population as f64
        };

        Some(weighted_mean(&[
            (saturation, SATURATION_WEIGHT),
            (luminance, LUMINANCE_WEIGHT),
            (population, POPULATION_WEIGHT),
        ]))
    }

    /// Index of the highest rated sample. The first of equally rated samples
    /// wins, so pool order matters.
    pub fn best_match_index(&self, samples: &[Sample]) -> Option<usize> {
        let total: u64 = samples.iter().map(Sample::population).sum();
        let mut best: Option<(usize, f64)> = None;
        for (i, sample) in samples.iter().enumerate() {
            let Some(rating) = self.match_rating(sample, total) else {
                continue;
            };
            if best.is_none_or(|(_, top)| rating > top) {
                best = Some((i, rating));
            }
        }
        best.map(|(i, _)| i)
    }

    pub fn locate_best_match<'a>(&self, samples: &'a [Sample]) -> Option<&'a Sample> {
        self.best_match_index(samples).map(|i| &samples[i])
    }
}

/// The profile used for each slot, plus the luminances used when the
/// vibrant / dark vibrant pair has to be synthesized from its partner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariationProfiles {
    pub vibrant: ColorVariation,
    pub muted: ColorVariation,
    pub light_vibrant: ColorVariation,
    pub light_muted: ColorVariation,
    pub dark_vibrant: ColorVariation,
    pub dark_muted: ColorVariation,
    pub vibrant_fallback_luminance: f64,
    pub dark_vibrant_fallback_luminance: f64,
}

impl VariationProfiles {
    pub fn profile(&self, variation: Variation) -> &ColorVariation {
        match variation {
            Variation::Vibrant => &self.vibrant,
            Variation::Muted => &self.muted,
            Variation::LightVibrant => &self.light_vibrant,
            Variation::LightMuted => &self.light_muted,
            Variation::DarkVibrant => &self.dark_vibrant,
            Variation::DarkMuted => &self.dark_muted,
        }
    }
}

impl Default for VariationProfiles {
    fn default() -> Self {
        Self {
            vibrant: ColorVariation::VIBRANT,
            muted: ColorVariation::MUTED,
            light_vibrant: ColorVariation::LIGHT_VIBRANT,
            light_muted: ColorVariation::LIGHT_MUTED,
            dark_vibrant: ColorVariation::DARK_VIBRANT,
            dark_muted: ColorVariation::DARK_MUTED,
            vibrant_fallback_luminance: 0.5,
            dark_vibrant_fallback_luminance: 0.26,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Hsl;
    use crate::contrast::ContrastConfig;

    fn sample(saturation: f64, luminance: f64, population: u64) -> Sample {
        let rgb = Hsl::new(1.0, saturation, luminance).to_rgb();
        Sample::from_rgb(rgb, population, &ContrastConfig::default())
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn inverted_difference_values() {
        assert_eq!(inverted_difference(1.0, 1.0), 1.0);
        assert_eq!(inverted_difference(1.0, 0.0), 0.0);
        assert_eq!(inverted_difference(0.0, 1.0), 0.0);
        assert_close(inverted_difference(0.65, 0.5), 0.85, 1e-12);
        assert_close(inverted_difference(0.5, 0.65), 0.85, 1e-12);
    }

    #[test]
    fn weighted_mean_values() {
        assert_eq!(weighted_mean(&[]), 0.0);
        assert_eq!(weighted_mean(&[(1.0, 2.0)]), 1.0);
        assert_eq!(weighted_mean(&[(1.0, 0.0)]), 0.0);
        assert_eq!(weighted_mean(&[(4.0, 5.0), (3.0, 4.0), (1.0, 20.0)]), 52.0 / 29.0);
    }

    #[test]
    fn range_checks_are_inclusive() {
        let variation = ColorVariation::new(0.3, 0.2, 0.4, 1.0, 0.5, 1.0);
        assert!(variation.is_luminance_within_range(0.2));
        assert!(variation.is_luminance_within_range(0.4));
        assert!(variation.is_luminance_within_range(0.3));
        assert!(!variation.is_luminance_within_range(0.2 - f64::EPSILON));
        assert!(!variation.is_luminance_within_range(0.41));
        assert!(variation.is_saturation_within_range(0.5));
        assert!(!variation.is_saturation_within_range(0.5 - f64::EPSILON));
        assert!(!variation.is_saturation_within_range(0.19));
    }

    #[test]
    fn out_of_range_samples_are_disqualified() {
        assert_eq!(ColorVariation::DARK_MUTED.match_rating(&sample(0.3, 0.46, 50), 50), None);
        assert_eq!(ColorVariation::DARK_VIBRANT.match_rating(&sample(0.34, 0.26, 50), 50), None);
    }

    #[test]
    fn rating_without_population() {
        let rating = ColorVariation::VIBRANT.match_rating(&sample(1.0, 0.5, 0), 0);
        assert_eq!(rating, Some(0.9));
    }

    #[test]
    fn exact_target_rates_one() {
        let rating = ColorVariation::MUTED.match_rating(&sample(0.3, 0.5, 50), 50).unwrap();
        assert_close(rating, 1.0, 1e-4);
    }

    #[test]
    fn ratings_at_profile_edges() {
        let cases = [
            (ColorVariation::LIGHT_VIBRANT, sample(1.0, 0.55, 50), 50, 0.886),
            (ColorVariation::LIGHT_MUTED, sample(0.0, 0.74, 50), 50, 0.91),
            (ColorVariation::VIBRANT, sample(1.0, 0.5, 1), 500, 0.9002),
            (ColorVariation::VIBRANT, sample(0.36, 0.31, 1), 500, 0.5942),
            (ColorVariation::LIGHT_VIBRANT, sample(0.99, 0.99, 50), 50, 0.847),
            (ColorVariation::LIGHT_MUTED, sample(0.399, 0.7399, 50), 50, 0.9702),
        ];
        for (variation, sample, total, expected) in cases {
            let rating = variation.match_rating(&sample, total).unwrap();
            assert_close(rating, expected, 1e-4);
        }
    }

    #[test]
    fn no_match_when_everything_is_disqualified() {
        let samples = [sample(0.34, 1.0, 500)];
        assert_eq!(ColorVariation::VIBRANT.locate_best_match(&samples), None);
    }

    #[test]
    fn best_match_picks_highest_rating() {
        let red = sample(1.0, 0.5, 50);
        let green = Sample::from_rgb(
            Hsl::new(120.0 / 360.0, 0.9, 0.49).to_rgb(),
            50,
            &ContrastConfig::default(),
        );
        let blue = Sample::from_rgb(
            Hsl::new(240.0 / 360.0, 0.34, 0.29).to_rgb(),
            50,
            &ContrastConfig::default(),
        );
        let samples = [blue, green, red];
        assert_eq!(ColorVariation::VIBRANT.locate_best_match(&samples), Some(&red));
    }

    #[test]
    fn first_of_tied_samples_wins() {
        let a = Sample::from_rgb(Hsl::new(0.0, 1.0, 0.5).to_rgb(), 10, &ContrastConfig::default());
        let b = Sample::from_rgb(Hsl::new(2.0 / 3.0, 1.0, 0.5).to_rgb(), 10, &ContrastConfig::default());
        assert_eq!(ColorVariation::VIBRANT.best_match_index(&[a, b]), Some(0));
        assert_eq!(ColorVariation::VIBRANT.best_match_index(&[b, a]), Some(0));
    }

    #[test]
    fn assignment_order() {
        let names: Vec<&str> = Variation::ALL.iter().map(|v| v.name()).collect();
        assert_eq!(
            names,
            ["vibrant", "lightVibrant", "darkVibrant", "muted", "lightMuted", "darkMuted"]
        );
    }
}
