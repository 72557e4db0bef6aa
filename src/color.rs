//! ARGB color values as stored in card and person documents.
//!
//! The canonical wire form is a `"#AARRGGBB"` string. Older documents carry
//! integers instead, either a plain 32-bit ARGB value (possibly negative) or
//! a 64-bit packed value with the ARGB word in the high half. Both are
//! accepted on read and rewritten in the canonical form on the next save.

use std::fmt;
use std::str::FromStr;

use rand::seq::IndexedRandom;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba(pub u32);

/// Icon colors handed out to people added without an explicit color.
pub const PERSON_PALETTE: [Rgba; 15] = [
    Rgba(0xFFEF5350),
    Rgba(0xFFEC407A),
    Rgba(0xFFAB47BC),
    Rgba(0xFF7E57C2),
    Rgba(0xFF5C6BC0),
    Rgba(0xFF42A5F5),
    Rgba(0xFF29B6F6),
    Rgba(0xFF26C6DA),
    Rgba(0xFF26A69A),
    Rgba(0xFF66BB6A),
    Rgba(0xFF9CCC65),
    Rgba(0xFFFFEE58),
    Rgba(0xFFFFCA28),
    Rgba(0xFFFFA726),
    Rgba(0xFFFF7043),
];

impl Rgba {
    pub const WHITE: Rgba = Rgba(0xFFFFFFFF);
    pub const GREEN: Rgba = Rgba(0xFF00FF00);
    pub const YELLOW: Rgba = Rgba(0xFFFFFF00);
    pub const RED: Rgba = Rgba(0xFFFF0000);

    pub fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Rgba(u32::from_be_bytes([a, r, g, b]))
    }

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }

    pub fn random_person_color() -> Self {
        PERSON_PALETTE
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(Rgba::WHITE)
    }

    /// Interprets an integer color from a legacy document.
    fn from_legacy_int(value: i128) -> Option<Self> {
        if let Ok(signed) = i32::try_from(value) {
            return Some(Rgba(signed as u32));
        }
        if let Ok(unsigned) = u32::try_from(value) {
            return Some(Rgba(unsigned));
        }
        // Packed 64-bit form, ARGB in the upper word.
        if let Ok(packed) = i64::try_from(value) {
            return Some(Rgba(((packed as u64) >> 32) as u32));
        }
        u64::try_from(value).ok().map(|packed| Rgba((packed >> 32) as u32))
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::WHITE
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}', expected #RRGGBB or #AARRGGBB")]
pub struct ParseColorError(pub String);

impl FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let value = u32::from_str_radix(hex, 16).map_err(|_| ParseColorError(s.to_string()))?;
        match hex.len() {
            8 => Ok(Rgba(value)),
            6 => Ok(Rgba(0xFF00_0000 | value)),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct RgbaVisitor;

impl Visitor<'_> for RgbaVisitor {
    type Value = Rgba;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a \"#AARRGGBB\" string or an integer ARGB value")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Rgba, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Rgba, E> {
        Rgba::from_legacy_int(v.into())
            .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Rgba, E> {
        Rgba::from_legacy_int(v.into())
            .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RgbaVisitor)
    }
}
