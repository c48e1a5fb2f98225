//! Token guard.
//!
//! ASCII runs (`[A-Za-z0-9_-]+`) are prefixed with a protection marker
//! before any substitution pass. Every scanner in this crate copies a marked
//! run verbatim, and whitespace normalization turns the marker into a plain
//! token boundary.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::punctuation::PunctuationMap;

/// Protection marker inserted in front of ASCII runs.
pub const MARKER: char = '\t';

static ASCII_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_-]+").expect("static regex"));

// Non-ASCII characters outside Han, punctuation, separators, marks, numbers
// and letters: emoji, dingbats, other symbols.
static STRAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\p{Han}\p{P}\p{Z}\p{M}\p{N}\p{L}\x00-\x7F]").expect("static regex")
});

fn is_run_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

/// Prefix each ASCII run with [`MARKER`].
pub fn protect(s: &str) -> String {
    ASCII_RUN
        .replace_all(s, |caps: &Captures| format!("{MARKER}{}", &caps[0]))
        .into_owned()
}

/// Remove stray non-ASCII symbols. Glyphs the punctuation map knows (such as
/// the full-width tilde, a math symbol) are kept; ASCII is never touched.
pub fn sanitize(s: &str, punctuation: &PunctuationMap) -> String {
    STRAY
        .replace_all(s, |caps: &Captures| {
            let glyph = &caps[0];
            if punctuation.is_source(glyph) {
                glyph.to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

/// If a protected run starts at byte `pos`, return the byte offset where it
/// ends (marker plus run).
pub fn protected_run_end(s: &str, pos: usize) -> Option<usize> {
    let rest = s.get(pos..)?;
    let mut chars = rest.char_indices();
    match chars.next() {
        Some((_, MARKER)) => {}
        _ => return None,
    }
    let end = chars
        .find(|&(_, ch)| !is_run_char(ch))
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    Some(pos + end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protect_marks_ascii_runs() {
        assert_eq!(protect("iPhone15手机"), "\tiPhone15手机");
        assert_eq!(protect("用 rust_lang-2 写"), "用 \trust_lang-2 写");
        assert_eq!(protect("中文"), "中文");
    }

    #[test]
    fn ascii_punctuation_splits_runs() {
        assert_eq!(protect("3.14"), "\t3.\t14");
        assert_eq!(protect("a.b"), "\ta.\tb");
    }

    #[test]
    fn run_end_stops_at_non_run_char() {
        let s = "\tabc 中";
        assert_eq!(protected_run_end(s, 0), Some(4));
        assert_eq!(protected_run_end(s, 4), None);
        assert_eq!(protected_run_end("\t中", 0), Some(1));
        assert_eq!(protected_run_end("\tab", 0), Some(3));
    }

    #[test]
    fn sanitize_strips_symbols_only() {
        let p = PunctuationMap::new();
        assert_eq!(sanitize("你好😀！", &p), "你好！");
        assert_eq!(sanitize("价格 ￥5 $5 a+b", &p), "价格 5 $5 a+b");
        assert_eq!(sanitize("一～二", &p), "一～二");
        assert_eq!(sanitize("lǜ", &p), "lǜ");
    }
}
