//! Ordered tier collection.
//!
//! General tiers are applied in order: earlier tiers hold more specific
//! (longer) phrases and are never pre-empted by later ones. Surname tiers
//! run first, and only in name mode. Both lists have any length.

use serde::Serialize;
use tracing::warn;

use crate::config::Config;
use crate::dictionary::{DictionarySource, DictionaryTable, FileSource, LoadReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TierKind {
    General,
    Surname,
}

/// Load status of one tier.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TierStatus {
    Loaded(LoadReport),
    /// Resource could not be read; the tier is empty.
    Unavailable { id: String, reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct TierLoad {
    pub kind: TierKind,
    pub index: usize,
    pub status: TierStatus,
}

#[derive(Debug, Clone, Default)]
pub struct TierSet {
    general: Vec<DictionaryTable>,
    surnames: Vec<DictionaryTable>,
    loads: Vec<TierLoad>,
}

impl TierSet {
    /// Build from already loaded tables.
    pub fn new(general: Vec<DictionaryTable>, surnames: Vec<DictionaryTable>) -> Self {
        Self {
            general,
            surnames,
            loads: Vec::new(),
        }
    }

    /// Load every source. A source that cannot be read becomes an empty tier
    /// in its slot and is recorded in [`TierSet::loads`].
    pub fn load<G, S>(general: &[G], surnames: &[S]) -> Self
    where
        G: DictionarySource,
        S: DictionarySource,
    {
        let mut loads = Vec::with_capacity(general.len() + surnames.len());
        let general = general
            .iter()
            .enumerate()
            .map(|(i, src)| load_tier(src, TierKind::General, i, &mut loads))
            .collect();
        let surnames = surnames
            .iter()
            .enumerate()
            .map(|(i, src)| load_tier(src, TierKind::Surname, i, &mut loads))
            .collect();
        Self {
            general,
            surnames,
            loads,
        }
    }

    /// Load the dictionary files named by `config`.
    pub fn from_config(config: &Config) -> Self {
        let general: Vec<FileSource> = config.general_paths().into_iter().map(FileSource::new).collect();
        let surnames: Vec<FileSource> = config.surname_paths().into_iter().map(FileSource::new).collect();
        Self::load(&general, &surnames)
    }

    pub fn general(&self) -> &[DictionaryTable] {
        &self.general
    }

    pub fn surnames(&self) -> &[DictionaryTable] {
        &self.surnames
    }

    pub fn loads(&self) -> &[TierLoad] {
        &self.loads
    }

    /// Tiers whose resource could not be read.
    pub fn unavailable(&self) -> impl Iterator<Item = &TierLoad> {
        self.loads
            .iter()
            .filter(|l| matches!(l.status, TierStatus::Unavailable { .. }))
    }

    /// Total malformed lines skipped across all tiers.
    pub fn malformed_count(&self) -> usize {
        self.loads
            .iter()
            .map(|l| match &l.status {
                TierStatus::Loaded(r) => r.malformed.len(),
                TierStatus::Unavailable { .. } => 0,
            })
            .sum()
    }
}

fn load_tier<S: DictionarySource>(
    src: &S,
    kind: TierKind,
    index: usize,
    loads: &mut Vec<TierLoad>,
) -> DictionaryTable {
    match DictionaryTable::load(src) {
        Ok((table, report)) => {
            loads.push(TierLoad {
                kind,
                index,
                status: TierStatus::Loaded(report),
            });
            table
        }
        Err(e) => {
            let id = src.id();
            warn!(?kind, index, resource = %id, error = %e, "dictionary tier unavailable, continuing without it");
            loads.push(TierLoad {
                kind,
                index,
                status: TierStatus::Unavailable {
                    id: id.clone(),
                    reason: e.to_string(),
                },
            });
            DictionaryTable::new(id)
        }
    }
}
