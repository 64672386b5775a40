//! Assigning quantized samples to the six named variation slots.

use tracing::debug;

use crate::contrast::ContrastConfig;
use crate::sample::Sample;
use crate::variation::{Variation, VariationProfiles};

/// Maps a pool of samples onto the six [`Variation`] slots.
pub trait VariationMap {
    /// Replace the current assignment with one computed from `samples`.
    fn map(&mut self, samples: &[Sample]);

    fn sample(&self, variation: Variation) -> Option<&Sample>;

    fn vibrant(&self) -> Option<&Sample> {
        self.sample(Variation::Vibrant)
    }

    fn muted(&self) -> Option<&Sample> {
        self.sample(Variation::Muted)
    }

    fn light_vibrant(&self) -> Option<&Sample> {
        self.sample(Variation::LightVibrant)
    }

    fn light_muted(&self) -> Option<&Sample> {
        self.sample(Variation::LightMuted)
    }

    fn dark_vibrant(&self) -> Option<&Sample> {
        self.sample(Variation::DarkVibrant)
    }

    fn dark_muted(&self) -> Option<&Sample> {
        self.sample(Variation::DarkMuted)
    }
}

/// Greedy matcher: each slot, in [`Variation::ALL`] order, claims its best
/// rated sample, which then leaves the pool. A missing vibrant or dark
/// vibrant slot is synthesized from the other one when possible.
#[derive(Clone, Debug, Default)]
pub struct DefaultVariationMap {
    profiles: VariationProfiles,
    contrast: ContrastConfig,
    slots: [Option<Sample>; 6],
}

impl DefaultVariationMap {
    pub fn new(profiles: VariationProfiles, contrast: ContrastConfig) -> Self {
        Self {
            profiles,
            contrast,
            slots: [None; 6],
        }
    }

    pub fn set(&mut self, variation: Variation, sample: Option<Sample>) {
        self.slots[variation.index()] = sample;
    }

    pub fn clear(&mut self) {
        self.slots = [None; 6];
    }

    /// Exclusive greedy assignment. Slots with no qualifying sample are left
    /// unchanged.
    pub fn assign_variations(&mut self, samples: &[Sample]) {
        let mut pool = samples.to_vec();
        for variation in Variation::ALL {
            let profile = self.profiles.profile(variation);
            match profile.best_match_index(&pool) {
                Some(i) => {
                    let sample = pool.remove(i);
                    debug!(%variation, color = %sample.rgb(), population = sample.population(), "slot claimed");
                    self.set(variation, Some(sample));
                }
                None => debug!(%variation, "no qualifying sample"),
            }
        }
    }

    /// Fill vibrant from dark vibrant (or the reverse) by keeping hue and
    /// saturation and forcing the luminance. Synthesized samples have zero
    /// population.
    pub fn synthesize_missing(&mut self) {
        if self.vibrant().is_none()
            && let Some(dark) = self.dark_vibrant()
        {
            let hsl = dark.hsl().with_luminance(self.profiles.vibrant_fallback_luminance);
            let sample = Sample::from_rgb(hsl.to_rgb(), 0, &self.contrast);
            debug!(color = %sample.rgb(), "synthesized vibrant from dark vibrant");
            self.set(Variation::Vibrant, Some(sample));
        }

        if self.dark_vibrant().is_none()
            && let Some(vibrant) = self.vibrant()
        {
            let hsl = vibrant.hsl().with_luminance(self.profiles.dark_vibrant_fallback_luminance);
            let sample = Sample::from_rgb(hsl.to_rgb(), 0, &self.contrast);
            debug!(color = %sample.rgb(), "synthesized dark vibrant from vibrant");
            self.set(Variation::DarkVibrant, Some(sample));
        }
    }
}

impl VariationMap for DefaultVariationMap {
    fn map(&mut self, samples: &[Sample]) {
        self.clear();
        self.assign_variations(samples);
        self.synthesize_missing();
    }

    fn sample(&self, variation: Variation) -> Option<&Sample> {
        self.slots[variation.index()].as_ref()
    }
}
