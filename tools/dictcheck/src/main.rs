//! Validate dictionary tier files.
//!
//! Files are checked in the order given, which is the order they would be
//! applied as general tiers. A key that also appears in an earlier file is
//! reported as shadowed: the earlier tier always replaces it first.
//!
//! Usage:
//!   cargo run -p dictcheck -- dict/words_0.dict dict/words_1.dict
//!   cargo run -p dictcheck -- --format json --strict dict/*.dict

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use hanpin_core::{DictionaryTable, FileSource, LoadReport};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "dictcheck")]
#[command(about = "Check key:value dictionary files for malformed, duplicate and shadowed records")]
struct Args {
    /// Dictionary files, most specific tier first
    #[arg(required = true)]
    files: Vec<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Exit with an error if any file has malformed lines
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Serialize)]
struct FileCheck {
    #[serde(flatten)]
    load: LoadReport,
    /// Keys already defined by an earlier file, with that file's id.
    shadowed: Vec<(String, String)>,
}

fn check(tables: &[(DictionaryTable, LoadReport)]) -> Vec<FileCheck> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    let mut out = Vec::with_capacity(tables.len());
    for (table, report) in tables {
        let shadowed = table
            .iter()
            .filter_map(|(key, _)| seen.get(key).map(|id| (key.to_string(), id.to_string())))
            .collect();
        for (key, _) in table.iter() {
            seen.entry(key).or_insert(table.id());
        }
        out.push(FileCheck {
            load: report.clone(),
            shadowed,
        });
    }
    out
}

fn render_text(checks: &[FileCheck]) -> String {
    let mut s = String::new();
    for c in checks {
        s.push_str(&format!(
            "{}: {} records, {} duplicates, {} malformed, {} shadowed\n",
            c.load.id,
            c.load.records,
            c.load.duplicates,
            c.load.malformed.len(),
            c.shadowed.len()
        ));
        for m in &c.load.malformed {
            s.push_str(&format!("  line {}: {:?}\n", m.line, m.text));
        }
        for (key, by) in &c.shadowed {
            s.push_str(&format!("  {key} shadowed by {by}\n"));
        }
    }
    s
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut tables = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let loaded = DictionaryTable::load(&FileSource::new(path))
            .with_context(|| format!("reading {}", path.display()))?;
        tables.push(loaded);
    }
    let checks = check(&tables);

    match args.format {
        Format::Text => print!("{}", render_text(&checks)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&checks)?),
    }

    let malformed: usize = checks.iter().map(|c| c.load.malformed.len()).sum();
    if args.strict && malformed > 0 {
        anyhow::bail!("{malformed} malformed line(s)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanpin_core::MemorySource;

    fn load(id: &str, text: &str) -> (DictionaryTable, LoadReport) {
        DictionaryTable::load(&MemorySource::new(id, text)).unwrap()
    }

    #[test]
    fn reports_shadowed_keys() {
        let tables = vec![
            load("a", "中国:zhōng guó\n"),
            load("b", "中国:zhòng guó\n人:rén\nbad\n"),
        ];
        let checks = check(&tables);
        assert!(checks[0].shadowed.is_empty());
        assert_eq!(checks[1].shadowed, vec![("中国".to_string(), "a".to_string())]);
        assert_eq!(checks[1].load.malformed.len(), 1);

        let text = render_text(&checks);
        assert!(text.contains("b: 2 records, 0 duplicates, 1 malformed, 1 shadowed"));
    }

    #[test]
    fn json_output_has_flat_report_fields() {
        let checks = check(&[load("a", "中:zhōng\n")]);
        let v: serde_json::Value = serde_json::to_value(&checks).unwrap();
        assert_eq!(v[0]["id"], "a");
        assert_eq!(v[0]["records"], 1);
    }
}
