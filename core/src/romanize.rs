//! Romanization engine.
//!
//! Pipeline for one call:
//! 1. NFC-normalize, protect ASCII runs, strip stray symbols
//! 2. name mode only: surname tiers
//! 3. general tiers, in order
//! 4. punctuation
//! 5. whitespace normalization
//!
//! Steps 2 and 3 stop as soon as no Han character is left. Within a tier the
//! text is scanned once, left to right, and the longest key at the cursor is
//! replaced by its value padded with spaces. Han glyphs no tier covers are
//! left in place and listed in the report.

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::Config;
use crate::dictionary::DictionaryTable;
use crate::guard;
use crate::punctuation::PunctuationMap;
use crate::tiers::TierSet;
use crate::utils;

/// Diagnostics for one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RomanizeReport {
    pub surname_tiers_applied: usize,
    pub general_tiers_applied: usize,
    /// Dictionary keys replaced, over all tiers.
    pub substitutions: usize,
    /// Han glyphs left after every tier, in order of appearance.
    pub unresolved: Vec<char>,
}

/// Normalized, space-separated romanization plus its report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Romanization {
    pub text: String,
    pub report: RomanizeReport,
}

#[derive(Debug, Clone)]
pub struct Romanizer {
    tiers: TierSet,
    punctuation: PunctuationMap,
    strip_symbols: bool,
}

impl Romanizer {
    pub fn new(tiers: TierSet) -> Self {
        Self {
            tiers,
            punctuation: PunctuationMap::standard().clone(),
            strip_symbols: true,
        }
    }

    /// Load the tiers named by `config`. Unreadable tiers become empty.
    pub fn from_config(config: &Config) -> Self {
        Self::new(TierSet::from_config(config)).with_strip_symbols(config.strip_symbols)
    }

    pub fn with_strip_symbols(mut self, on: bool) -> Self {
        self.strip_symbols = on;
        self
    }

    pub fn tiers(&self) -> &TierSet {
        &self.tiers
    }

    pub fn punctuation(&self) -> &PunctuationMap {
        &self.punctuation
    }

    /// NFC, guard and (optionally) sanitize raw input.
    pub fn prepare(&self, text: &str) -> String {
        let s = guard::protect(&utils::nfc(text));
        if self.strip_symbols {
            guard::sanitize(&s, &self.punctuation)
        } else {
            s
        }
    }

    pub fn romanize(&self, text: &str, name_mode: bool) -> Romanization {
        let mut s = self.prepare(text);
        let mut report = RomanizeReport::default();

        if name_mode {
            report.surname_tiers_applied =
                apply_tiers(&mut s, self.tiers.surnames(), &mut report.substitutions);
        }
        if utils::contains_han(&s) {
            report.general_tiers_applied =
                apply_tiers(&mut s, self.tiers.general(), &mut report.substitutions);
        }
        report.unresolved = utils::han_chars(&s).collect();
        if !report.unresolved.is_empty() {
            debug!(unresolved = ?report.unresolved, "han glyphs without dictionary coverage");
        }

        let s = self.punctuation.apply(&s);
        Romanization {
            text: normalize_whitespace(&s),
            report,
        }
    }

    /// Punctuation pass plus whitespace normalization, no dictionaries.
    pub fn punctuations(&self, text: &str) -> String {
        normalize_whitespace(&self.punctuation.apply(&self.prepare(text)))
    }
}

/// Apply tiers in order until no Han remains. Returns how many ran.
fn apply_tiers(s: &mut String, tiers: &[DictionaryTable], substitutions: &mut usize) -> usize {
    let mut applied = 0;
    for table in tiers {
        if !utils::contains_han(s) {
            trace!(tier = table.id(), "no han left, stopping");
            break;
        }
        let (out, n) = substitute(s, table);
        debug!(tier = table.id(), substitutions = n, "tier applied");
        *s = out;
        *substitutions += n;
        applied += 1;
    }
    applied
}

/// One forward-maximum-matching pass of `table` over `s`.
///
/// Returns the new text and the number of replaced keys.
pub fn substitute(s: &str, table: &DictionaryTable) -> (String, usize) {
    let mut out = String::with_capacity(s.len() * 2);
    let mut count = 0;
    let mut pos = 0;
    while pos < s.len() {
        if let Some(end) = guard::protected_run_end(s, pos) {
            out.push_str(&s[pos..end]);
            pos = end;
            continue;
        }
        match table.longest_at(s, pos) {
            Some((len, value)) => {
                out.push(' ');
                out.push_str(value);
                out.push(' ');
                pos += len;
                count += 1;
            }
            None => {
                let ch = s[pos..].chars().next().unwrap_or_default();
                out.push(ch);
                pos += ch.len_utf8().max(1);
            }
        }
    }
    (out, count)
}

/// Trim, collapse whitespace runs (markers included) to one space.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Romanizer {
        let general = vec![
            DictionaryTable::from_pairs("t0", [("中国人", "zhōng guó rén")]),
            DictionaryTable::from_pairs("t1", [("中国", "zhōng guó"), ("你好", "nǐ hǎo")]),
            DictionaryTable::from_pairs(
                "t2",
                [("中", "zhōng"), ("国", "guó"), ("人", "rén"), ("王", "wàng"), ("小", "xiǎo")],
            ),
        ];
        let surnames = vec![DictionaryTable::from_pairs("s0", [("王", "wáng")])];
        Romanizer::new(TierSet::new(general, surnames))
    }

    #[test]
    fn earlier_tier_wins() {
        let r = engine().romanize("中国人", false);
        assert_eq!(r.text, "zhōng guó rén");
        assert_eq!(r.report.general_tiers_applied, 1);
        assert_eq!(r.report.substitutions, 1);
    }

    #[test]
    fn longest_key_within_tier() {
        let t = DictionaryTable::from_pairs("t", [("中", "zhōng"), ("中国", "zhōng guó")]);
        let (out, n) = substitute("中国", &t);
        assert_eq!(normalize_whitespace(&out), "zhōng guó");
        assert_eq!(n, 1);
    }

    #[test]
    fn protected_runs_are_opaque() {
        let t = DictionaryTable::from_pairs("t", [("abc", "XYZ"), ("中", "zhōng")]);
        let (out, _) = substitute(&guard::protect("abc中"), &t);
        assert_eq!(normalize_whitespace(&out), "abc zhōng");
    }

    #[test]
    fn unresolved_glyph_passes_through() {
        let r = engine().romanize("中龘国", false);
        assert_eq!(r.text, "zhōng 龘 guó");
        assert_eq!(r.report.unresolved, vec!['龘']);
    }

    #[test]
    fn name_mode_prefers_surname_tier() {
        let e = engine();
        assert_eq!(e.romanize("王小", true).text, "wáng xiǎo");
        assert_eq!(e.romanize("王小", false).text, "wàng xiǎo");
    }

    #[test]
    fn surname_miss_falls_through() {
        let r = engine().romanize("小中", true);
        assert_eq!(r.text, "xiǎo zhōng");
        assert_eq!(r.report.surname_tiers_applied, 1);
        assert!(r.report.general_tiers_applied >= 1);
    }

    #[test]
    fn short_circuit_without_han() {
        let r = engine().romanize("hello world", true);
        assert_eq!(r.text, "hello world");
        assert_eq!(r.report.surname_tiers_applied, 0);
        assert_eq!(r.report.general_tiers_applied, 0);
    }

    #[test]
    fn ascii_punctuation_breaks_words() {
        assert_eq!(engine().romanize("3.14 a.b", false).text, "3. 14 a. b");
    }

    #[test]
    fn punctuation_after_dictionaries() {
        let r = engine().romanize("你好，中国！", false);
        assert_eq!(r.text, "nǐ hǎo , zhōng guó !");
    }

    #[test]
    fn whitespace_normalization_is_idempotent() {
        let once = normalize_whitespace("  a\t\tb   c \t");
        assert_eq!(once, "a b c");
        assert_eq!(normalize_whitespace(&once), once);
    }

    #[test]
    fn stray_symbols_stripped_unless_disabled() {
        let e = engine();
        assert_eq!(e.romanize("中😀国", false).text, "zhōng guó");
        let e = engine().with_strip_symbols(false);
        assert_eq!(e.romanize("中😀国", false).text, "zhōng 😀 guó");
    }

    #[test]
    fn bare_punctuation_pass() {
        assert_eq!(engine().punctuations("好，abc。"), "好 , abc .");
    }
}
