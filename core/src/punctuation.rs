//! Chinese / full-width punctuation to ASCII.
//!
//! Each recognized glyph is replaced by its ASCII equivalent padded with a
//! space on both sides, so after whitespace normalization it is a token of
//! its own and never sticks to a pinyin syllable. Multi-glyph sources
//! (`……`, `——`) are matched before the single-glyph `—`.

use once_cell::sync::Lazy;

use crate::table::MatchTable;

/// Source glyph → ASCII target.
pub const PUNCTUATIONS: &[(&str, &str)] = &[
    ("，", ","),
    ("。", "."),
    ("！", "!"),
    ("？", "?"),
    ("：", ":"),
    ("；", ";"),
    ("\u{2018}", "'"),
    ("\u{2019}", "'"),
    ("\u{201C}", "\""),
    ("\u{201D}", "\""),
    ("「", "["),
    ("」", "]"),
    ("『", "["),
    ("』", "]"),
    ("（", "("),
    ("）", ")"),
    ("〔", "["),
    ("〕", "]"),
    ("【", "["),
    ("】", "]"),
    ("{", "{"),
    ("}", "}"),
    ("……", "..."),
    ("——", "-"),
    ("—", "-"),
    ("～", "~"),
    ("《", "<"),
    ("》", ">"),
    ("〈", "<"),
    ("〉", ">"),
    ("、", ","),
];

static DEFAULT_MAP: Lazy<PunctuationMap> = Lazy::new(PunctuationMap::new);

/// Longest-match punctuation table.
#[derive(Debug, Clone)]
pub struct PunctuationMap {
    table: MatchTable<&'static str>,
}

impl PunctuationMap {
    pub fn new() -> Self {
        Self {
            table: PUNCTUATIONS.iter().copied().collect(),
        }
    }

    /// Shared instance built from [`PUNCTUATIONS`].
    pub fn standard() -> &'static PunctuationMap {
        &DEFAULT_MAP
    }

    /// True if `glyph` is a source entry (single char or sequence).
    pub fn is_source(&self, glyph: &str) -> bool {
        self.table.contains_key(glyph)
    }

    pub fn target(&self, glyph: &str) -> Option<&'static str> {
        self.table.get(glyph).copied()
    }

    /// Replace every recognized glyph. Text inside protected ASCII runs is
    /// copied unchanged.
    pub fn apply(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len() + 8);
        let mut pos = 0;
        while pos < s.len() {
            if let Some(end) = crate::guard::protected_run_end(s, pos) {
                out.push_str(&s[pos..end]);
                pos = end;
                continue;
            }
            match self.table.longest_at(s, pos) {
                Some((len, target)) => {
                    out.push(' ');
                    out.push_str(target);
                    out.push(' ');
                    pos += len;
                }
                None => {
                    let ch = s[pos..].chars().next().unwrap_or_default();
                    out.push(ch);
                    pos += ch.len_utf8().max(1);
                }
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for PunctuationMap {
    fn default() -> Self {
        Self::new()
    }
}
