//! Median-cut boxes over RGB space.
//!
//! A box owns a set of colors and keeps two things consistent after every
//! mutation: the per-channel bounds of its members, and the member order
//! (ascending along whichever channel currently has the widest span).

use crate::color::Rgb;
use crate::contrast::ContrastConfig;
use crate::sample::{ColorInformation, Sample};

/// One of the three RGB axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    Red,
    Green,
    Blue,
}

impl Dimension {
    pub fn value_of(self, rgb: Rgb) -> f64 {
        match self {
            Dimension::Red => rgb.red,
            Dimension::Green => rgb.green,
            Dimension::Blue => rgb.blue,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Bounds {
    min: Rgb,
    max: Rgb,
}

impl Bounds {
    fn of(members: &[ColorInformation]) -> Self {
        let mut min = Rgb::WHITE;
        let mut max = Rgb::BLACK;
        for rgb in members.iter().map(ColorInformation::rgb) {
            min.red = min.red.min(rgb.red);
            min.green = min.green.min(rgb.green);
            min.blue = min.blue.min(rgb.blue);
            max.red = max.red.max(rgb.red);
            max.green = max.green.max(rgb.green);
            max.blue = max.blue.max(rgb.blue);
        }
        Self { min, max }
    }

    fn span(&self, dimension: Dimension) -> f64 {
        dimension.value_of(self.max) - dimension.value_of(self.min)
    }

    /// Red only when strictly widest, then green, otherwise blue.
    fn longest_dimension(&self) -> Dimension {
        let red = self.span(Dimension::Red);
        let green = self.span(Dimension::Green);
        let blue = self.span(Dimension::Blue);

        if red > green && red > blue {
            Dimension::Red
        } else if green > red && green > blue {
            Dimension::Green
        } else {
            Dimension::Blue
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColorSpaceBox {
    members: Vec<ColorInformation>,
    bounds: Bounds,
    longest: Dimension,
}

impl ColorSpaceBox {
    pub fn new(members: Vec<ColorInformation>) -> Self {
        let mut cbox = Self {
            members,
            bounds: Bounds {
                min: Rgb::WHITE,
                max: Rgb::BLACK,
            },
            longest: Dimension::Blue,
        };
        cbox.refresh();
        cbox
    }

    /// Members, sorted ascending along [`Self::longest_dimension`].
    pub fn members(&self) -> &[ColorInformation] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn longest_dimension(&self) -> Dimension {
        self.longest
    }

    /// `(Δr + 1)(Δg + 1)(Δb + 1)`; 1 for a single color, 8 for the full cube.
    pub fn volume(&self) -> f64 {
        (self.bounds.span(Dimension::Red) + 1.0)
            * (self.bounds.span(Dimension::Green) + 1.0)
            * (self.bounds.span(Dimension::Blue) + 1.0)
    }

    pub fn can_split(&self) -> bool {
        self.members.len() > 1
    }

    /// Midpoint of the bounds along the longest dimension.
    pub fn middle_dimension_value(&self) -> f64 {
        let d = self.longest;
        (d.value_of(self.bounds.min) + d.value_of(self.bounds.max)) / 2.0
    }

    /// Index of the first member at or above the midpoint of the longest
    /// dimension.
    pub fn split_index(&self) -> Option<usize> {
        let middle = self.middle_dimension_value();
        self.members
            .iter()
            .position(|m| self.longest.value_of(m.rgb()) >= middle)
    }

    /// Move the members at or above the midpoint into a new box.
    ///
    /// Returns `None` when the box holds fewer than two members or when no
    /// index would leave both halves non-empty. Both boxes leave this call
    /// with fresh bounds and sort order.
    pub fn split(&mut self) -> Option<ColorSpaceBox> {
        if !self.can_split() {
            return None;
        }
        let new_box = match self.split_index() {
            Some(index) if index > 0 => Some(ColorSpaceBox::new(self.members.split_off(index))),
            _ => None,
        };
        self.refresh();
        new_box
    }

    /// Population-weighted mean color of the members.
    ///
    /// A box whose members all have zero population averages them with
    /// equal weight.
    pub fn average_color(&self, contrast: &ContrastConfig) -> Sample {
        let population: u64 = self.members.iter().map(ColorInformation::population).sum();
        let weight_of = |member: &ColorInformation| {
            if population == 0 { 1.0 } else { member.population() as f64 }
        };

        let mut red = 0.0;
        let mut green = 0.0;
        let mut blue = 0.0;
        let mut total = 0.0;
        for member in &self.members {
            let rgb = member.rgb();
            let weight = weight_of(member);
            red += weight * rgb.red;
            green += weight * rgb.green;
            blue += weight * rgb.blue;
            total += weight;
        }

        Sample::from_rgb(Rgb::new(red / total, green / total, blue / total), population, contrast)
    }

    fn refresh(&mut self) {
        self.bounds = Bounds::of(&self.members);
        self.longest = self.bounds.longest_dimension();
        let d = self.longest;
        self.members
            .sort_by(|a, b| d.value_of(a.rgb()).total_cmp(&d.value_of(b.rgb())));
    }
}
