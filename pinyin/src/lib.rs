//! hanpin crate root
//!
//! Han text → pinyin. Built on the tiered substitution engine in
//! `hanpin-core`, this crate adds the tone codec, the three output views and
//! the join helpers.
//!
//! Public API exported here:
//! - `Pinyin` from `engine` - a loaded engine; all operations as methods
//! - `ConversionResult` from `result` - `none()`, `unicode()`, `ascii()` views
//! - `ToneCodec`, `Tone` from `tone`
//! - free functions `convert`, `unicode_convert`, `ascii_convert`, `name`,
//!   `permalink`, `abbr` backed by a process-wide default engine
//!
//! The default engine reads its dictionaries once, on first use, from
//! `Config::from_env()` (`./dict` unless `HANPIN_CONFIG` / `HANPIN_DICT_DIR`
//! say otherwise).

pub mod engine;
pub mod result;
pub mod tone;

use once_cell::sync::Lazy;
use tracing::warn;

pub use engine::Pinyin;
pub use hanpin_core::Config;
pub use result::{initials, ConversionResult};
pub use tone::{Tone, ToneCodec, ToneEntry, TONE_ENTRIES};

static DEFAULT: Lazy<Pinyin> = Lazy::new(|| {
    let config = Config::from_env().unwrap_or_else(|e| {
        warn!(error = %e, "falling back to default config");
        Config::default()
    });
    Pinyin::from_config(config)
});

/// The process-wide engine used by the free functions.
pub fn default_engine() -> &'static Pinyin {
    &DEFAULT
}

/// Toneless tokens: `[pin, yin]`.
pub fn convert(text: &str) -> Vec<String> {
    DEFAULT.convert(text)
}

/// Diacritic tokens: `[pīn, yīn]`.
pub fn unicode_convert(text: &str) -> Vec<String> {
    DEFAULT.unicode_convert(text)
}

/// Tone-number tokens: `[pin1, yin1]`.
pub fn ascii_convert(text: &str) -> Vec<String> {
    DEFAULT.ascii_convert(text)
}

/// Personal name conversion; pick a view on the result.
pub fn name(text: &str) -> ConversionResult {
    DEFAULT.name(text)
}

/// Toneless pinyin joined with `delimiter`.
pub fn permalink(text: &str, delimiter: &str) -> String {
    DEFAULT.permalink(text, delimiter)
}

/// Initials joined with `delimiter`.
pub fn abbr(text: &str, delimiter: &str) -> String {
    DEFAULT.abbr(text, delimiter)
}
