//! Fixed-width binary digits and decimal/binary conversion.
//!
//! A [`BinaryDigit`] stores one decimal digit (or any value up to 63) as a
//! six-slot bit vector, most significant bit first. Only the first
//! `bit_count` slots are meaningful; the remaining slots are always `false`.
//!
//! Two conversion surfaces exist:
//!
//! - [`try_to_binary`] returns a [`ClockError`] for an invalid bit count.
//! - [`to_binary`] returns [`BinaryDigit::INVALID`] (`bit_count == 0`)
//!   instead, for callers that check the sentinel.
//!
//! Values wider than `bit_count` bits are truncated with a mask, never
//! rejected.

use crate::error::ClockError;

/// Largest supported bit count for a single digit.
pub const MAX_BIT_COUNT: u8 = 6;

/// Storage width of the bit vector.
const BIT_CAPACITY: usize = 6;

/// Glyph for a cleared bit in emoji output.
pub const EMOJI_OFF: &str = "🌚";

/// Glyph for a set bit in emoji output.
pub const EMOJI_ON: &str = "🌝";

/// A value encoded as a fixed-capacity, MSB-first bit vector.
///
/// Constructed only through [`try_to_binary`] / [`to_binary`], so
/// `decimal_value` always matches the significant bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BinaryDigit {
    bit_count: u8,
    bits: [bool; BIT_CAPACITY],
    decimal_value: u8,
}

impl BinaryDigit {
    /// The invalid marker: `bit_count == 0`, every other field zeroed.
    pub const INVALID: Self = Self {
        bit_count: 0,
        bits: [false; BIT_CAPACITY],
        decimal_value: 0,
    };

    /// Number of significant bits (1-6), or 0 for the invalid marker.
    pub const fn bit_count(&self) -> u8 {
        self.bit_count
    }

    /// The (possibly truncated) value this digit encodes.
    pub const fn decimal_value(&self) -> u8 {
        self.decimal_value
    }

    /// The full six-slot bit vector, MSB first.
    pub const fn bits(&self) -> &[bool; BIT_CAPACITY] {
        &self.bits
    }

    /// Only the `bit_count` meaningful bits, MSB first.
    pub fn significant_bits(&self) -> &[bool] {
        self.bits
            .get(..usize::from(self.bit_count))
            .unwrap_or_default()
    }

    /// Whether this digit is a real value rather than the invalid marker.
    pub const fn is_valid(&self) -> bool {
        self.bit_count != 0
    }

    /// Render the digit as text in the given format.
    ///
    /// Returns `None` for the invalid marker.
    pub fn render(&self, format: DigitFormat) -> Option<String> {
        if !self.is_valid() {
            return None;
        }
        let text = match format {
            DigitFormat::Decimal => self.decimal_value.to_string(),
            DigitFormat::Binary | DigitFormat::Emoji => self
                .significant_bits()
                .iter()
                .map(|&bit| format.bit_glyph(bit))
                .collect(),
        };
        Some(text)
    }
}

/// Text encodings for a single [`BinaryDigit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitFormat {
    /// One `0` / `1` character per bit.
    Binary,
    /// One moon glyph per bit.
    Emoji,
    /// The decimal value.
    Decimal,
}

impl DigitFormat {
    /// The glyph for one bit. [`DigitFormat::Decimal`] uses the binary glyphs.
    pub const fn bit_glyph(self, bit: bool) -> &'static str {
        match (self, bit) {
            (Self::Emoji, true) => EMOJI_ON,
            (Self::Emoji, false) => EMOJI_OFF,
            (Self::Binary | Self::Decimal, true) => "1",
            (Self::Binary | Self::Decimal, false) => "0",
        }
    }
}

/// Encode `value` in `bit_count` bits.
///
/// # Errors
///
/// Returns [`ClockError::InvalidBitCount`] if `bit_count` is outside
/// `1..=6`.
pub fn try_to_binary(value: u8, bit_count: u8) -> Result<BinaryDigit, ClockError> {
    if !(1..=MAX_BIT_COUNT).contains(&bit_count) {
        return Err(ClockError::InvalidBitCount { bit_count });
    }

    let value = value & mask(bit_count);
    let mut bits = [false; BIT_CAPACITY];
    let shifts = (0..u32::from(bit_count)).rev();
    for (bit, shift) in bits.iter_mut().zip(shifts) {
        *bit = value.checked_shr(shift).unwrap_or(0) & 1 == 1;
    }

    Ok(BinaryDigit {
        bit_count,
        bits,
        decimal_value: value,
    })
}

/// Encode `value` in `bit_count` bits, returning [`BinaryDigit::INVALID`]
/// for a bit count outside `1..=6`.
pub fn to_binary(value: u8, bit_count: u8) -> BinaryDigit {
    try_to_binary(value, bit_count).unwrap_or(BinaryDigit::INVALID)
}

/// Reconstruct the integer from a digit's significant bits.
///
/// Returns 0 for the invalid marker.
pub fn to_decimal(digit: &BinaryDigit) -> u8 {
    if !digit.is_valid() {
        return 0;
    }
    digit
        .significant_bits()
        .iter()
        .fold(0_u8, |acc, &bit| acc.wrapping_shl(1) | u8::from(bit))
}

/// `(1 << bit_count) - 1` for `bit_count` in `1..=6`.
fn mask(bit_count: u8) -> u8 {
    let unused = u8::BITS.saturating_sub(u32::from(bit_count));
    u8::MAX.checked_shr(unused).unwrap_or(0)
}
