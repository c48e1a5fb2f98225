//! Conversion result and its output views.

use std::fmt;

use hanpin_core::{Romanization, RomanizeReport};

use crate::tone::ToneCodec;

/// Immutable space-separated romanization of one input.
///
/// ```
/// use hanpin::{ConversionResult, Pinyin};
/// use hanpin_core::{DictionaryTable, TierSet};
///
/// let tiers = TierSet::new(
///     vec![DictionaryTable::from_pairs("t0", [("你好", "nǐ hǎo")])],
///     vec![],
/// );
/// let result: ConversionResult = Pinyin::from_tiers(tiers).result("你好");
/// assert_eq!(result.unicode(), vec!["nǐ", "hǎo"]);
/// assert_eq!(result.none(), vec!["ni", "hao"]);
/// assert_eq!(result.ascii(), vec!["ni3", "hao3"]);
/// assert_eq!(result.abbr("-"), "n-h");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    text: String,
    report: RomanizeReport,
}

impl ConversionResult {
    pub fn new(romanization: Romanization) -> Self {
        Self {
            text: romanization.text,
            report: romanization.report,
        }
    }

    /// The normalized diacritic string.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn report(&self) -> &RomanizeReport {
        &self.report
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn tokens(&self) -> impl Iterator<Item = &str> {
        self.text.split(' ').filter(|t| !t.is_empty())
    }

    /// Diacritic tokens: `[pīn, yīn]`.
    pub fn unicode(&self) -> Vec<String> {
        self.tokens().map(str::to_string).collect()
    }

    /// Tokens without tone: `[pin, yin]`.
    pub fn none(&self) -> Vec<String> {
        let codec = ToneCodec::standard();
        self.tokens().map(|t| codec.strip(t)).collect()
    }

    /// Tone-number tokens: `[pin1, yin1]`.
    pub fn ascii(&self) -> Vec<String> {
        let codec = ToneCodec::standard();
        self.tokens().map(|t| codec.to_tone_number(t)).collect()
    }

    /// Toneless tokens joined with `delimiter`.
    pub fn permalink(&self, delimiter: &str) -> String {
        self.none().join(delimiter)
    }

    /// First character of each toneless token, joined with `delimiter`.
    pub fn abbr(&self, delimiter: &str) -> String {
        initials(&self.none(), delimiter)
    }
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Join the first character of each token.
pub fn initials<S: AsRef<str>>(tokens: &[S], delimiter: &str) -> String {
    tokens
        .iter()
        .filter_map(|t| t.as_ref().chars().next())
        .map(String::from)
        .collect::<Vec<_>>()
        .join(delimiter)
}
