//! Dictionary store.
//!
//! A dictionary resource is UTF-8 text with one `key:value` record per line,
//! for example `中国:zhōng guó`. The key is a literal Han string, the value
//! is its diacritic pinyin. Records are kept in file order; the first record
//! for a key wins.
//!
//! Public API:
//! - `DictionarySource` - where a table's bytes come from (`FileSource`, `MemorySource`)
//! - `DictionaryTable` - one loaded substitution table
//! - `LoadReport` - per-resource counts, including skipped malformed lines

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::table::MatchTable;
use crate::utils;

/// A readable dictionary resource.
pub trait DictionarySource {
    /// Identifier used in logs and reports (usually the path).
    fn id(&self) -> String;

    /// Open the resource for line-oriented reading.
    fn open(&self) -> Result<Box<dyn BufRead + '_>>;
}

/// Dictionary file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DictionarySource for FileSource {
    fn id(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&self) -> Result<Box<dyn BufRead + '_>> {
        let file = File::open(&self.path).map_err(|e| Error::unavailable(self.id(), e))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// In-memory dictionary text, mostly for tests and embedded tables.
#[derive(Debug, Clone)]
pub struct MemorySource {
    id: String,
    text: String,
}

impl MemorySource {
    pub fn new<I: Into<String>, T: Into<String>>(id: I, text: T) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

impl DictionarySource for MemorySource {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn open(&self) -> Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(Cursor::new(self.text.as_bytes())))
    }
}

/// A line that could not be parsed as `key:value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedLine {
    /// 1-based line number.
    pub line: usize,
    pub text: String,
}

/// Outcome of loading one resource.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub id: String,
    /// Records accepted into the table.
    pub records: usize,
    /// Records whose key was already present (ignored).
    pub duplicates: usize,
    pub malformed: Vec<MalformedLine>,
}

/// Classification of one record line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record<'a> {
    Entry(&'a str, &'a str),
    Blank,
    Malformed,
}

/// Parse one record line. Line terminators are stripped, so both `\n` and
/// `\r\n` files are accepted. The key ends at the first `:`.
pub fn parse_record(line: &str) -> Record<'_> {
    let line = line.trim_end_matches(['\n', '\r']);
    if line.trim().is_empty() {
        return Record::Blank;
    }
    match line.split_once(':') {
        Some((key, value)) => {
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                Record::Malformed
            } else {
                Record::Entry(key, value)
            }
        }
        None => Record::Malformed,
    }
}

/// One ordered substitution table.
#[derive(Debug, Clone, Default)]
pub struct DictionaryTable {
    id: String,
    entries: MatchTable<String>,
}

impl DictionaryTable {
    pub fn new<I: Into<String>>(id: I) -> Self {
        Self {
            id: id.into(),
            entries: MatchTable::new(),
        }
    }

    /// Build a table from literal pairs (first pair for a key wins).
    pub fn from_pairs<I, K, V>(id: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut table = Self::new(id);
        for (k, v) in pairs {
            table.insert(k.as_ref(), v.as_ref());
        }
        table
    }

    /// Load a table from a source.
    pub fn load(source: &dyn DictionarySource) -> Result<(Self, LoadReport)> {
        let reader = source.open()?;
        Self::from_reader(source.id(), reader)
    }

    /// Read `key:value` records until end of input.
    ///
    /// A line that is not valid UTF-8 is skipped and reported as malformed,
    /// like any other unparsable record. Only a failing read aborts the load.
    /// The reader is dropped on every return path.
    pub fn from_reader<R: BufRead>(id: String, mut reader: R) -> Result<(Self, LoadReport)> {
        let mut table = Self::new(id.clone());
        let mut report = LoadReport {
            id,
            ..LoadReport::default()
        };
        let mut buf = Vec::new();
        let mut line_no = 0usize;
        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| Error::unavailable(report.id.clone(), e))?;
            if n == 0 {
                break;
            }
            line_no += 1;
            let record = match std::str::from_utf8(&buf) {
                Ok(line) => {
                    let line = if line_no == 1 {
                        line.trim_start_matches('\u{FEFF}')
                    } else {
                        line
                    };
                    match parse_record(line) {
                        Record::Entry(key, value) => {
                            if table.insert(key, value) {
                                report.records += 1;
                            } else {
                                report.duplicates += 1;
                            }
                            continue;
                        }
                        Record::Blank => continue,
                        Record::Malformed => line.to_string(),
                    }
                }
                Err(_) => String::from_utf8_lossy(&buf).into_owned(),
            };
            let text = record.trim_end_matches(['\n', '\r']).to_string();
            debug!(resource = %report.id, line = line_no, %text, "skipping malformed record");
            report.malformed.push(MalformedLine {
                line: line_no,
                text,
            });
        }
        debug!(
            resource = %report.id,
            records = report.records,
            duplicates = report.duplicates,
            malformed = report.malformed.len(),
            "dictionary loaded"
        );
        Ok((table, report))
    }

    /// Insert a record. Key and value are NFC-normalized. Returns `false`
    /// when the key is already present.
    pub fn insert(&mut self, key: &str, value: &str) -> bool {
        let key = utils::normalize(key);
        let value = utils::normalize(value);
        if value.is_empty() {
            return false;
        }
        self.entries.insert(key, value)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Longest key at byte offset `start` of `text`: `(byte_len, value)`.
    pub fn longest_at(&self, text: &str, start: usize) -> Option<(usize, &str)> {
        self.entries
            .longest_at(text, start)
            .map(|(len, v)| (len, v.as_str()))
    }

    /// Records in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_record_variants() {
        assert_eq!(parse_record("中:zhōng\n"), Record::Entry("中", "zhōng"));
        assert_eq!(parse_record("中:zhōng\r\n"), Record::Entry("中", "zhōng"));
        assert_eq!(parse_record("中国: zhōng guó"), Record::Entry("中国", "zhōng guó"));
        assert_eq!(parse_record("   \r\n"), Record::Blank);
        assert_eq!(parse_record("no separator"), Record::Malformed);
        assert_eq!(parse_record(":zhōng"), Record::Malformed);
        assert_eq!(parse_record("中:"), Record::Malformed);
    }

    #[test]
    fn value_may_contain_separator() {
        assert_eq!(parse_record("比:bǐ:x"), Record::Entry("比", "bǐ:x"));
    }

    #[test]
    fn load_skips_malformed_and_counts_duplicates() {
        let src = MemorySource::new(
            "mem",
            "\u{FEFF}你:nǐ\r\nbroken line\n好:hǎo\n\n你:nì\n",
        );
        let (table, report) = DictionaryTable::load(&src).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("你"), Some("nǐ"));
        assert_eq!(report.records, 2);
        assert_eq!(report.duplicates, 1);
        assert_eq!(
            report.malformed,
            vec![MalformedLine {
                line: 2,
                text: "broken line".to_string()
            }]
        );
    }

    #[test]
    fn missing_file_is_unavailable() {
        let path = std::env::temp_dir().join(format!(
            "hanpin_missing_{}.dict",
            std::process::id()
        ));
        let err = DictionaryTable::load(&FileSource::new(&path)).unwrap_err();
        assert!(matches!(err, Error::ResourceUnavailable { .. }));
    }

    #[test]
    fn invalid_utf8_line_is_skipped() {
        let bytes: &[u8] = b"\xe4\xb8\xad:zh\xc5\x8dng\n\xff\xfe:bad\n\xe5\x9b\xbd:gu\xc3\xb3\n";
        let (table, report) = DictionaryTable::from_reader("bytes".into(), bytes).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("中"), Some("zhōng"));
        assert_eq!(table.get("国"), Some("guó"));
        assert_eq!(report.records, 2);
        assert_eq!(report.malformed.len(), 1);
        assert_eq!(report.malformed[0].line, 2);
        assert!(report.malformed[0].text.ends_with(":bad"));
    }

    #[test]
    fn read_failure_is_unavailable() {
        struct Broken;
        impl std::io::Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "device gone"))
            }
        }
        let err = DictionaryTable::from_reader("broken".into(), BufReader::new(Broken)).unwrap_err();
        assert!(matches!(err, Error::ResourceUnavailable { ref id, .. } if id == "broken"));
    }

    #[test]
    fn file_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "hanpin_dictionary_test_{}.dict",
            std::process::id()
        ));
        std::fs::write(&path, "中国:zhōng guó\n中:zhōng\n").unwrap();
        let (table, report) = DictionaryTable::load(&FileSource::new(&path)).unwrap();
        assert_eq!(report.records, 2);
        assert_eq!(table.longest_at("中国人", 0), Some(("中国".len(), "zhōng guó")));
        let _ = std::fs::remove_file(path);
    }
}
