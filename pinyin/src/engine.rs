//! Pinyin conversion engine.
//!
//! `Pinyin` owns a loaded `Romanizer` and exposes the conversion operations.
//! Dictionaries are read once, at construction or on `reload`; every call
//! after that works on the in-memory tiers. No state is changed by a
//! conversion, so one instance can be shared across threads.

use tracing::{debug, warn};

use hanpin_core::{Config, Romanization, Romanizer, TierSet};

use crate::result::ConversionResult;

#[derive(Debug, Clone)]
pub struct Pinyin {
    romanizer: Romanizer,
    config: Option<Config>,
}

impl Pinyin {
    pub fn new(romanizer: Romanizer) -> Self {
        Self {
            romanizer,
            config: None,
        }
    }

    /// Engine over pre-built tiers (tests, embedded dictionaries).
    pub fn from_tiers(tiers: TierSet) -> Self {
        Self::new(Romanizer::new(tiers))
    }

    /// Load the dictionaries named by `config`. Tiers that cannot be read
    /// are logged and left empty.
    pub fn from_config(config: Config) -> Self {
        let romanizer = Romanizer::from_config(&config);
        log_load(romanizer.tiers());
        Self {
            romanizer,
            config: Some(config),
        }
    }

    /// Re-read dictionaries from the configured locations. Engines built
    /// from in-memory tiers have nothing to reload.
    pub fn reload(&mut self) {
        match &self.config {
            Some(config) => {
                self.romanizer = Romanizer::from_config(config);
                log_load(self.romanizer.tiers());
            }
            None => debug!("reload requested on an engine without config"),
        }
    }

    pub fn config(&self) -> Option<&Config> {
        self.config.as_ref()
    }

    pub fn romanizer(&self) -> &Romanizer {
        &self.romanizer
    }

    /// Romanization plus diagnostics.
    pub fn romanize(&self, text: &str, surnames: bool) -> Romanization {
        self.romanizer.romanize(text, surnames)
    }

    /// General-tier conversion result with all views available.
    pub fn result(&self, text: &str) -> ConversionResult {
        ConversionResult::new(self.romanize(text, false))
    }

    /// Toneless tokens: `中国` → `[zhong, guo]`.
    pub fn convert(&self, text: &str) -> Vec<String> {
        self.result(text).none()
    }

    /// Diacritic tokens: `中国` → `[zhōng, guó]`.
    pub fn unicode_convert(&self, text: &str) -> Vec<String> {
        self.result(text).unicode()
    }

    /// Tone-number tokens: `中国` → `[zhong1, guo2]`.
    pub fn ascii_convert(&self, text: &str) -> Vec<String> {
        self.result(text).ascii()
    }

    /// Convert a personal name: surname tiers take precedence.
    pub fn name(&self, text: &str) -> ConversionResult {
        ConversionResult::new(self.romanize(text, true))
    }

    /// Toneless tokens joined with `delimiter`.
    pub fn permalink(&self, text: &str, delimiter: &str) -> String {
        self.result(text).permalink(delimiter)
    }

    /// Initials of the toneless tokens joined with `delimiter`.
    pub fn abbr(&self, text: &str, delimiter: &str) -> String {
        self.result(text).abbr(delimiter)
    }

    /// Punctuation pass only.
    pub fn punctuations(&self, text: &str) -> String {
        self.romanizer.punctuations(text)
    }
}

fn log_load(tiers: &TierSet) {
    for load in tiers.unavailable() {
        warn!(kind = ?load.kind, index = load.index, "tier unavailable");
    }
    debug!(
        general = tiers.general().len(),
        surnames = tiers.surnames().len(),
        malformed = tiers.malformed_count(),
        "dictionaries loaded"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanpin_core::DictionaryTable;

    fn engine() -> Pinyin {
        let general = vec![
            DictionaryTable::from_pairs("t0", [("你好", "nǐ hǎo"), ("世界", "shì jiè")]),
            DictionaryTable::from_pairs("t1", [("单", "dān"), ("小", "xiǎo"), ("明", "míng")]),
        ];
        let surnames = vec![DictionaryTable::from_pairs("s0", [("单", "shàn")])];
        Pinyin::from_tiers(TierSet::new(general, surnames))
    }

    #[test]
    fn three_views() {
        let p = engine();
        assert_eq!(p.convert("你好，世界！"), vec!["ni", "hao", ",", "shi", "jie", "!"]);
        assert_eq!(p.unicode_convert("你好"), vec!["nǐ", "hǎo"]);
        assert_eq!(p.ascii_convert("世界"), vec!["shi4", "jie4"]);
    }

    #[test]
    fn name_uses_surname_reading() {
        let p = engine();
        assert_eq!(p.name("单小明").unicode(), vec!["shàn", "xiǎo", "míng"]);
        assert_eq!(p.unicode_convert("单小明"), vec!["dān", "xiǎo", "míng"]);
        assert_eq!(p.name("单小明").ascii(), vec!["shan4", "xiao3", "ming2"]);
    }

    #[test]
    fn delimiter_is_per_call() {
        let p = engine();
        assert_eq!(p.permalink("你好世界", "-"), "ni-hao-shi-jie");
        assert_eq!(p.permalink("你好世界", "_"), "ni_hao_shi_jie");
        assert_eq!(p.abbr("你好", "-"), "n-h");
        assert_eq!(p.abbr("你好", ""), "nh");
    }

    #[test]
    fn reload_without_config_keeps_tiers() {
        let mut p = engine();
        p.reload();
        assert!(p.config().is_none());
        assert_eq!(p.convert("你好"), vec!["ni", "hao"]);
    }

    #[test]
    fn punctuation_only() {
        assert_eq!(engine().punctuations("你好，世界"), "你好 , 世界");
    }
}
