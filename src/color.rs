//! RGB colours as used by the canvas (`#rrggbb` strings)

use std::fmt;

use anyhow::anyhow;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{FOOD_CHANNEL_MAX, FOOD_CHANNEL_MIN};

/// An opaque RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xff);
    pub const RED: Color = Color::rgb(0xff, 0x00, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0xff, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Add `degree` to every channel, clamped to 0..=255
    pub fn shifted(&self, degree: i16) -> Self {
        let shift = |c: u8| (c as i16 + degree).clamp(0, 255) as u8;
        Self::rgb(shift(self.r), shift(self.g), shift(self.b))
    }

    /// Muted random colour for food particles
    pub fn random_food<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let range = FOOD_CHANNEL_MIN..FOOD_CHANNEL_MAX;
        Self::rgb(
            rng.random_range(range.clone()),
            rng.random_range(range.clone()),
            rng.random_range(range),
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::from_hex(&s).ok_or_else(|| anyhow!("invalid colour {s:?}, expected #rrggbb"))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}
