use crate::constants::{PALETTE_AMPLITUDE, PALETTE_BASE, PALETTE_CHANNELS};

use image::Rgb as Rgb8;
use std::f64::consts::TAU;

/// RGB color with channels in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Multiplies every channel by `factor`
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    pub fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// 8-bit color for raster backends
    pub fn to_rgb8(self) -> Rgb8<u8> {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb8([q(self.r), q(self.g), q(self.b)])
    }
}

/// One color per centroid, indexed by cluster label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Evenly spaced hues: channel c of color i is
    /// `0.6 + 0.4 * sin(2π·i/n + (c/3)·2π)`, so every channel stays in [0.2, 1.0].
    pub fn generate(n: usize) -> Self {
        let colors = (0..n)
            .map(|i| {
                let phase = TAU * i as f64 / n as f64;
                let channel = |c: usize| {
                    PALETTE_BASE
                        + PALETTE_AMPLITUDE
                            * (phase + c as f64 / PALETTE_CHANNELS as f64 * TAU).sin()
                };
                Rgb::new(channel(0), channel(1), channel(2))
            })
            .collect();
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rgb> {
        self.colors.iter()
    }
}
