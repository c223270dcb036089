//! RGB colours attached to images and queries.
//!
//! Channels are stored as `u8`, so a constructed [`Color`] is always inside
//! the `0..=255` cube. Range checks happen while parsing request strings.
//!
//! # Examples
//! ```
//! use tripai_core::{Color, parse_colors};
//!
//! let colors = parse_colors("255,0,0 | 0, 0, 255").expect("valid colours");
//! assert_eq!(colors, vec![Color::new(255, 0, 0), Color::new(0, 0, 255)]);
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between colour entries in a request string.
pub const COLOR_SEPARATOR: char = '|';

/// Separator between the channels of a single colour.
pub const CHANNEL_SEPARATOR: char = ',';

/// Squared length of the RGB cube diagonal, `3 × 255²`.
pub const MAX_DISTANCE_SQUARED: u32 = 3 * 255 * 255;

/// A colour in 8-bit RGB space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Construct a colour from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance to `other` in RGB space.
    ///
    /// The value is exact and bounded by [`MAX_DISTANCE_SQUARED`].
    ///
    /// # Examples
    /// ```
    /// use tripai_core::Color;
    ///
    /// let red = Color::new(255, 0, 0);
    /// assert_eq!(red.distance_squared(Color::new(252, 4, 0)), 25);
    /// ```
    #[must_use]
    pub const fn distance_squared(self, other: Self) -> u32 {
        channel_delta_squared(self.r, other.r)
            + channel_delta_squared(self.g, other.g)
            + channel_delta_squared(self.b, other.b)
    }

    /// Euclidean distance to `other` in RGB space.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        f64::from(self.distance_squared(other)).sqrt()
    }
}

const fn channel_delta_squared(left: u8, right: u8) -> u32 {
    let delta = left.abs_diff(right) as u32;
    delta * delta
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// Errors returned when parsing colour strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The entry did not contain exactly three channels.
    #[error("colour '{input}' must have 3 components, found {found}")]
    ComponentCount {
        /// Offending colour entry.
        input: String,
        /// Number of comma-separated components present.
        found: usize,
    },
    /// A channel was not a decimal integer.
    #[error("colour '{input}' has a non-numeric channel '{channel}'")]
    InvalidChannel {
        /// Offending colour entry.
        input: String,
        /// Channel text that failed to parse.
        channel: String,
    },
    /// A channel was outside `0..=255`.
    #[error("colour '{input}' has channel {value} outside 0..=255")]
    ChannelOutOfRange {
        /// Offending colour entry.
        input: String,
        /// Parsed channel value.
        value: i64,
    },
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parse a single `r,g,b` entry; whitespace around channels is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(CHANNEL_SEPARATOR).map(str::trim).collect();
        let [r, g, b] = parts.as_slice() else {
            return Err(ColorParseError::ComponentCount {
                input: s.trim().to_owned(),
                found: parts.len(),
            });
        };
        Ok(Self::new(
            parse_channel(s, r)?,
            parse_channel(s, g)?,
            parse_channel(s, b)?,
        ))
    }
}

fn parse_channel(input: &str, channel: &str) -> Result<u8, ColorParseError> {
    let value = channel
        .parse::<i64>()
        .map_err(|_| ColorParseError::InvalidChannel {
            input: input.trim().to_owned(),
            channel: channel.to_owned(),
        })?;
    u8::try_from(value).map_err(|_| ColorParseError::ChannelOutOfRange {
        input: input.trim().to_owned(),
        value,
    })
}

/// Parse a `|`-separated list of `r,g,b` entries.
///
/// An empty or whitespace-only string yields no colours.
///
/// # Errors
/// Returns the first [`ColorParseError`] encountered, in input order.
pub fn parse_colors(raw: &str) -> Result<Vec<Color>, ColorParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    trimmed.split(COLOR_SEPARATOR).map(Color::from_str).collect()
}
