//! Line-oriented text layouts: emoji, ASCII, compact, and raw.

use std::fmt::Write as _;

use crate::binary::{BinaryDigit, DigitFormat, EMOJI_OFF, EMOJI_ON};
use crate::state::{ClockState, TimeField};

/// Moon-glyph layout.
///
/// ```text
/// 🌝 Binary Clock 🌚
/// Time: 14:30:45
///
/// Hours   : 🌚🌚🌝 🌚🌝🌚🌚
/// Minutes : 🌚🌝🌝 🌚🌚🌚🌚
/// Seconds : 🌝🌚🌚 🌚🌝🌚🌝
/// ```
pub fn emoji(state: &ClockState) -> String {
    let header = format!("{EMOJI_ON} Binary Clock {EMOJI_OFF}");
    rows(state, &header, DigitFormat::Emoji)
}

/// The emoji layout with `0` / `1` characters.
pub fn ascii(state: &ClockState) -> String {
    rows(state, "Binary Clock (ASCII)", DigitFormat::Binary)
}

/// One line: `HH:MM:SS [ttt uuuu : ttt uuuu : ttt uuuu]`.
pub fn compact(state: &ClockState) -> String {
    let fields: Vec<String> = TimeField::ALL
        .iter()
        .map(|&field| pair(state, field, DigitFormat::Binary))
        .collect();
    format!("{} [{}]\n", state.time_string(), fields.join(" : "))
}

/// Field-by-field dump of every digit's `bit_count`, `decimal_value`, and
/// bits.
pub fn raw(state: &ClockState) -> String {
    let mut out = String::from("Binary Clock API Raw Data\n=========================\n");
    let _ = writeln!(out, "Timestamp: {}", state.timestamp());
    out.push('\n');
    for field in TimeField::ALL {
        let (tens, units) = state.digits(field);
        for (place, digit) in [("Tens", tens), ("Units", units)] {
            let label = format!("{} {place}:", field.label());
            let _ = writeln!(
                out,
                "{label:<14}bit_count={}, decimal_value={}, bits=[{}]",
                digit.bit_count(),
                digit.decimal_value(),
                bit_list(digit),
            );
        }
    }
    out
}

/// Shared layout of the emoji and ASCII modes.
fn rows(state: &ClockState, header: &str, format: DigitFormat) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out, "Time: {}", state.time_string());
    out.push('\n');
    for field in TimeField::ALL {
        let _ = writeln!(out, "{:<8}: {}", field.label(), pair(state, field, format));
    }
    out
}

/// `tens units` glyph runs for one field.
fn pair(state: &ClockState, field: TimeField, format: DigitFormat) -> String {
    let (tens, units) = state.digits(field);
    format!("{} {}", glyphs(tens, format), glyphs(units, format))
}

/// One glyph per significant bit; empty for the invalid marker.
fn glyphs(digit: &BinaryDigit, format: DigitFormat) -> String {
    digit.render(format).unwrap_or_default()
}

/// Comma-separated `0` / `1` list of the significant bits.
pub(super) fn bit_list(digit: &BinaryDigit) -> String {
    digit
        .significant_bits()
        .iter()
        .map(|&bit| DigitFormat::Binary.bit_glyph(bit))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::state::TimeComponents;

    fn state(hours: u8, minutes: u8, seconds: u8) -> ClockState {
        let time = TimeComponents::new(hours, minutes, seconds).unwrap();
        ClockState::encode(&time, 1_700_000_000).unwrap()
    }

    #[test]
    fn emoji_layout() {
        let expected = "🌝 Binary Clock 🌚\n\
                        Time: 14:30:45\n\
                        \n\
                        Hours   : 🌚🌚🌝 🌚🌝🌚🌚\n\
                        Minutes : 🌚🌝🌝 🌚🌚🌚🌚\n\
                        Seconds : 🌝🌚🌚 🌚🌝🌚🌝\n";
        assert_eq!(emoji(&state(14, 30, 45)), expected);
    }

    #[test]
    fn ascii_layout() {
        let expected = "Binary Clock (ASCII)\n\
                        Time: 23:59:59\n\
                        \n\
                        Hours   : 010 0011\n\
                        Minutes : 101 1001\n\
                        Seconds : 101 1001\n";
        assert_eq!(ascii(&state(23, 59, 59)), expected);
    }

    #[test]
    fn compact_layout() {
        assert_eq!(
            compact(&state(9, 5, 3)),
            "09:05:03 [000 1001 : 000 0101 : 000 0011]\n"
        );
    }

    #[test]
    fn raw_layout() {
        let expected = "Binary Clock API Raw Data\n\
                        =========================\n\
                        Timestamp: 1700000000\n\
                        \n\
                        Hours Tens:   bit_count=3, decimal_value=1, bits=[0,0,1]\n\
                        Hours Units:  bit_count=4, decimal_value=4, bits=[0,1,0,0]\n\
                        Minutes Tens: bit_count=3, decimal_value=3, bits=[0,1,1]\n\
                        Minutes Units:bit_count=4, decimal_value=0, bits=[0,0,0,0]\n\
                        Seconds Tens: bit_count=3, decimal_value=4, bits=[1,0,0]\n\
                        Seconds Units:bit_count=4, decimal_value=5, bits=[0,1,0,1]\n";
        assert_eq!(raw(&state(14, 30, 45)), expected);
    }

    #[test]
    fn failed_state_renders_empty_bit_runs() {
        let out = compact(&ClockState::FAILED);
        assert_eq!(out, "00:00:00 [  :   :  ]\n");
        assert!(raw(&ClockState::FAILED).contains("Hours Tens:   bit_count=0, decimal_value=0, bits=[]"));
    }
}
