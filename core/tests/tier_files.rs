// Loading tiers from files on disk.

use std::path::PathBuf;

use hanpin_core::{Config, FileSource, Romanizer, TierSet, TierStatus};

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hanpin_core_{tag}_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn crlf_and_lf_files_load_the_same() {
    let dir = temp_dir("crlf");
    let lf = dir.join("lf.dict");
    let crlf = dir.join("crlf.dict");
    std::fs::write(&lf, "中国:zhōng guó\n人:rén\n").unwrap();
    std::fs::write(&crlf, "中国:zhōng guó\r\n人:rén\r\n").unwrap();

    let sources = vec![FileSource::new(&lf), FileSource::new(&crlf)];
    let none: Vec<FileSource> = vec![];
    let set = TierSet::load(&sources, &none);
    let a: Vec<_> = set.general()[0].iter().collect();
    let b: Vec<_> = set.general()[1].iter().collect();
    assert_eq!(a, b);
    assert_eq!(a, vec![("中国", "zhōng guó"), ("人", "rén")]);
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn config_with_partial_missing_tiers() {
    let dir = temp_dir("partial");
    std::fs::write(dir.join("phrases.dict"), "中国:zhōng guó\n").unwrap();
    let toml = r#"
general_tiers = ["phrases.dict", "absent.dict"]
surname_tiers = []
"#;
    let config = hanpin_core::Config::from_toml_str(toml)
        .unwrap()
        .with_dict_dir(&dir);
    let romanizer = Romanizer::from_config(&config);
    let loads = romanizer.tiers().loads();
    assert_eq!(loads.len(), 2);
    assert!(matches!(loads[0].status, TierStatus::Loaded(ref r) if r.records == 1));
    assert!(matches!(loads[1].status, TierStatus::Unavailable { .. }));

    let r = romanizer.romanize("中国人", false);
    assert_eq!(r.text, "zhōng guó 人");
    assert_eq!(r.report.unresolved, vec!['人']);
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn shipped_dictionaries_are_clean() {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../dict");
    let set = TierSet::from_config(&Config::default().with_dict_dir(dir));
    assert_eq!(set.unavailable().count(), 0);
    for load in set.loads() {
        match &load.status {
            TierStatus::Loaded(r) => {
                assert!(r.malformed.is_empty(), "{}", r.id);
                assert_eq!(r.duplicates, 0, "{}", r.id);
                assert!(r.records > 0, "{}", r.id);
            }
            TierStatus::Unavailable { id, .. } => panic!("{id} unavailable"),
        }
    }
}

#[test]
fn bad_byte_line_keeps_rest_of_tier() {
    let dir = temp_dir("badbyte");
    let path = dir.join("mixed.dict");
    let mut bytes = "中:zhōng\n".as_bytes().to_vec();
    bytes.extend_from_slice(b"\xff\xfe:bad\n");
    bytes.extend_from_slice("国:guó\n".as_bytes());
    std::fs::write(&path, bytes).unwrap();

    let none: Vec<FileSource> = vec![];
    let set = TierSet::load(&[FileSource::new(&path)], &none);
    assert_eq!(set.unavailable().count(), 0);
    assert_eq!(set.general()[0].len(), 2);
    assert_eq!(set.malformed_count(), 1);

    let r = Romanizer::new(set).romanize("中国", false);
    assert_eq!(r.text, "zhōng guó");
    let _ = std::fs::remove_dir_all(dir);
}
