//! Utility helpers.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static HAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Han}").expect("static regex"));

/// Normalize input strings (NFC) and trim whitespace.
pub fn normalize(s: &str) -> String {
    s.nfc().collect::<String>().trim().to_string()
}

/// NFC without trimming; used on conversion input where leading ASCII runs
/// and spacing are handled by the guard.
pub fn nfc(s: &str) -> String {
    s.nfc().collect()
}

/// True if `s` contains at least one Han-script character.
pub fn contains_han(s: &str) -> bool {
    HAN.is_match(s)
}

pub fn is_han(ch: char) -> bool {
    let mut buf = [0u8; 4];
    HAN.is_match(ch.encode_utf8(&mut buf))
}

/// Han characters of `s` in order of appearance.
pub fn han_chars(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().filter(|&c| is_han(c))
}
