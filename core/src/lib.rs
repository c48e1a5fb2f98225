//! hanpin-core
//!
//! Language-agnostic romanization machinery used by the `hanpin` crate:
//! ordered dictionary tiers loaded from `key:value` resources, the ASCII
//! token guard, the punctuation map and the tiered substitution engine.
//!
//! Public API:
//! - `DictionaryTable`, `DictionarySource` - one substitution table and where it comes from
//! - `TierSet` - general + surname tiers in application order
//! - `Romanizer` - guard → surnames → tiers → punctuation → whitespace
//! - `PunctuationMap` - full-width punctuation to ASCII
//! - `Config` - dictionary locations and switches (TOML)
//! - `MatchTable` - longest-match lookup shared by the tables above

pub mod config;
pub mod dictionary;
pub mod error;
pub mod guard;
pub mod punctuation;
pub mod romanize;
pub mod table;
pub mod tiers;
pub mod utils;

pub use config::Config;
pub use dictionary::{
    DictionarySource, DictionaryTable, FileSource, LoadReport, MalformedLine, MemorySource,
};
pub use error::{Error, Result};
pub use punctuation::PunctuationMap;
pub use romanize::{Romanization, RomanizeReport, Romanizer};
pub use table::MatchTable;
pub use tiers::{TierKind, TierLoad, TierSet, TierStatus};
