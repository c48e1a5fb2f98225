//! Tone codec: marked vowel glyph ↔ (base letters, tone digit).
//!
//! Tones 1–4 are flat, rising, falling-rising and falling. The neutral tone
//! carries no mark and gets no digit. `ǖ ǘ ǚ ǜ` decode to `v`; the
//! two-glyph sequences `üē üé üě üè` (as in `lüè`) decode to `ue`.

use std::borrow::Cow;

use once_cell::sync::Lazy;

use hanpin_core::MatchTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tone {
    Flat = 1,
    Rising = 2,
    FallingRising = 3,
    Falling = 4,
}

impl Tone {
    pub fn digit(self) -> char {
        match self {
            Tone::Flat => '1',
            Tone::Rising => '2',
            Tone::FallingRising => '3',
            Tone::Falling => '4',
        }
    }

    pub fn from_digit(c: char) -> Option<Tone> {
        match c {
            '1' => Some(Tone::Flat),
            '2' => Some(Tone::Rising),
            '3' => Some(Tone::FallingRising),
            '4' => Some(Tone::Falling),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneEntry {
    pub glyph: &'static str,
    pub base: &'static str,
    pub tone: Tone,
}

const fn entry(glyph: &'static str, base: &'static str, tone: Tone) -> ToneEntry {
    ToneEntry { glyph, base, tone }
}

pub const TONE_ENTRIES: &[ToneEntry] = &[
    entry("üē", "ue", Tone::Flat),
    entry("üé", "ue", Tone::Rising),
    entry("üě", "ue", Tone::FallingRising),
    entry("üè", "ue", Tone::Falling),
    entry("ā", "a", Tone::Flat),
    entry("ē", "e", Tone::Flat),
    entry("ī", "i", Tone::Flat),
    entry("ō", "o", Tone::Flat),
    entry("ū", "u", Tone::Flat),
    entry("ǖ", "v", Tone::Flat),
    entry("á", "a", Tone::Rising),
    entry("é", "e", Tone::Rising),
    entry("í", "i", Tone::Rising),
    entry("ó", "o", Tone::Rising),
    entry("ú", "u", Tone::Rising),
    entry("ǘ", "v", Tone::Rising),
    entry("ǎ", "a", Tone::FallingRising),
    entry("ě", "e", Tone::FallingRising),
    entry("ǐ", "i", Tone::FallingRising),
    entry("ǒ", "o", Tone::FallingRising),
    entry("ǔ", "u", Tone::FallingRising),
    entry("ǚ", "v", Tone::FallingRising),
    entry("à", "a", Tone::Falling),
    entry("è", "e", Tone::Falling),
    entry("ì", "i", Tone::Falling),
    entry("ò", "o", Tone::Falling),
    entry("ù", "u", Tone::Falling),
    entry("ǜ", "v", Tone::Falling),
];

static STANDARD: Lazy<ToneCodec> = Lazy::new(ToneCodec::new);

/// Longest-match codec over [`TONE_ENTRIES`].
#[derive(Debug, Clone)]
pub struct ToneCodec {
    table: MatchTable<ToneEntry>,
}

impl ToneCodec {
    pub fn new() -> Self {
        Self {
            table: TONE_ENTRIES.iter().map(|e| (e.glyph, *e)).collect(),
        }
    }

    pub fn standard() -> &'static ToneCodec {
        &STANDARD
    }

    /// Walk `s`, calling `on_mark` for every decoded glyph and copying
    /// everything else into the output.
    fn rewrite(&self, s: &str, mut on_mark: impl FnMut(&ToneEntry)) -> String {
        let mut out = String::with_capacity(s.len());
        let mut pos = 0;
        while pos < s.len() {
            match self.table.longest_at(s, pos) {
                Some((len, e)) => {
                    out.push_str(e.base);
                    on_mark(e);
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

    /// Replace every marked vowel with its base letter(s).
    pub fn strip(&self, s: &str) -> String {
        self.rewrite(s, |_| {})
    }

    /// Base letters and the tone of the first marked vowel. `None` when the
    /// token carries no mark.
    pub fn decompose(&self, token: &str) -> Option<(String, Tone)> {
        let mut tone = None;
        let base = self.rewrite(token, |e| {
            tone.get_or_insert(e.tone);
        });
        tone.map(|t| (base, t))
    }

    /// `hǎo` → `hao3`. Unmarked tokens (neutral tone, punctuation, ASCII
    /// words) come back unchanged. Only one digit is ever appended.
    pub fn to_tone_number(&self, token: &str) -> String {
        match self.decompose(token) {
            Some((mut base, tone)) => {
                base.push(tone.digit());
                base
            }
            None => token.to_string(),
        }
    }

    /// Marked glyph for a single base vowel (`a e i o u v`, `ü` = `v`).
    pub fn glyph(&self, base: char, tone: Tone) -> Option<&'static str> {
        let base = if base == 'ü' { 'v' } else { base };
        TONE_ENTRIES
            .iter()
            .find(|e| e.tone == tone && e.base.len() == 1 && e.base.starts_with(base))
            .map(|e| e.glyph)
    }

    /// `hao3` → `hǎo`, `lv4` → `lǜ`, `lue4` → `lüè`.
    ///
    /// The mark goes on `a` or `e` when present, on the `o` of `ou`,
    /// otherwise on the last vowel. Any remaining `v` is written `ü`, and so
    /// is the `u` of `lue`/`nue` (pinyin only spells those syllables `lüe`
    /// and `nüe`). A
    /// trailing `0` or `5` marks the neutral tone and is dropped. Tokens
    /// without a tone digit or without a vowel are returned as is.
    pub fn compose(&self, token: &str) -> String {
        let Some(last) = token.chars().last() else {
            return String::new();
        };
        let body = &token[..token.len() - last.len_utf8()];
        if body.is_empty() {
            return token.to_string();
        }
        let tone = match last {
            '0' | '5' => None,
            c => match Tone::from_digit(c) {
                Some(t) => Some(t),
                None => return token.to_string(),
            },
        };
        let body = restore_umlaut(body);
        let Some(at) = mark_position(&body) else {
            return token.to_string();
        };
        let mut out = String::with_capacity(body.len() + 2);
        for (i, ch) in body.char_indices() {
            if i == at {
                if let Some(glyph) = tone.and_then(|t| self.glyph(ch, t)) {
                    out.push_str(glyph);
                    continue;
                }
            }
            out.push(if ch == 'v' { 'ü' } else { ch });
        }
        out
    }
}

impl Default for ToneCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'v' | 'ü')
}

// `lue` / `nue` at a syllable start → `lve` / `nve`
fn restore_umlaut(body: &str) -> Cow<'_, str> {
    if !body.contains("ue") {
        return Cow::Borrowed(body);
    }
    let mut out = String::with_capacity(body.len());
    for (i, ch) in body.char_indices() {
        let umlaut = ch == 'u'
            && body[i + 1..].starts_with('e')
            && matches!(body[..i].chars().last(), Some('l' | 'n'))
            && !body[..i - 1]
                .chars()
                .last()
                .is_some_and(|c| c.is_ascii_alphabetic());
        out.push(if umlaut { 'v' } else { ch });
    }
    Cow::Owned(out)
}

// byte offset of the vowel that carries the tone mark
fn mark_position(body: &str) -> Option<usize> {
    if let Some(i) = body.find('a').or_else(|| body.find('e')) {
        return Some(i);
    }
    if let Some(i) = body.find("ou") {
        return Some(i);
    }
    body.char_indices()
        .filter(|&(_, c)| is_vowel(c))
        .map(|(i, _)| i)
        .last()
}
