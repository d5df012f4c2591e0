use super::{decode, encode};
use crate::document::{GroupingDocument, DEFAULT_HEADER};

fn persisted_keys(text: &str) -> Vec<String> {
    let root: serde_yaml::Value = serde_yaml::from_str(text).unwrap();
    root["file_groups"]
        .as_mapping()
        .unwrap()
        .keys()
        .map(|key| key.as_str().unwrap().to_string())
        .collect()
}

#[test]
fn decode_orders_sections_numerically() {
    let text = "file_groups:\n\
                \x20 '2':\n\
                \x20   header: Two\n\
                \x20   files: [b.txt]\n\
                \x20 top:\n\
                \x20   header: default section\n\
                \x20   files: [a.txt]\n\
                \x20 '10':\n\
                \x20   header: Ten\n\
                \x20   files: []\n";
    let sections = decode(text).unwrap();

    let headers: Vec<&str> = sections.iter().map(|(h, _)| h.as_str()).collect();
    assert_eq!(headers, vec!["default section", "Two", "Ten"]);
    assert_eq!(sections[0].1, vec!["a.txt"]);
}

#[test]
fn decode_accepts_unquoted_integer_keys() {
    let text = "file_groups:\n\
                \x20 top:\n\
                \x20   header: default section\n\
                \x20   files: []\n\
                \x20 1:\n\
                \x20   header: One\n\
                \x20   files: [a.txt]\n";
    let sections = decode(text).unwrap();

    assert_eq!(sections[1].0, "One");
    assert_eq!(sections[1].1, vec!["a.txt"]);
}

#[test]
fn decode_without_default_entry_synthesizes_an_empty_one() {
    let text = "file_groups:\n\
                \x20 '1':\n\
                \x20   header: Only\n\
                \x20   files: [a.txt]\n";
    let sections = decode(text).unwrap();

    assert_eq!(sections[0].0, DEFAULT_HEADER);
    assert!(sections[0].1.is_empty());
    assert_eq!(sections[1].0, "Only");
}

#[test]
fn decode_rejects_malformed_input() {
    // No file_groups root.
    assert!(decode("groups: {}").is_err());
    // Key that is neither reserved nor a positive integer.
    assert!(decode("file_groups:\n  misc:\n    header: X\n    files: []\n").is_err());
    // Zero is not a valid section key.
    assert!(decode("file_groups:\n  '0':\n    header: X\n    files: []\n").is_err());
    // Filenames must not carry path separators.
    assert!(decode("file_groups:\n  top:\n    header: d\n    files: [a/b.txt]\n").is_err());
    // Body missing the files list.
    assert!(decode("file_groups:\n  top:\n    header: d\n").is_err());
}

#[test]
fn decode_rejects_both_reserved_keys_at_once() {
    let text = "file_groups:\n\
                \x20 top:\n\
                \x20   header: d\n\
                \x20   files: []\n\
                \x20 default:\n\
                \x20   header: d2\n\
                \x20   files: []\n";
    assert!(decode(text).is_err());
}

#[test]
fn legacy_default_key_is_rewritten_on_save() {
    let text = "file_groups:\n\
                \x20 default:\n\
                \x20   header: default section\n\
                \x20   files: [a.txt]\n\
                \x20 '1':\n\
                \x20   header: One\n\
                \x20   files: []\n";
    let doc = GroupingDocument::from_sections(decode(text).unwrap());
    let out = encode(&doc).unwrap();

    assert_eq!(persisted_keys(&out), vec!["top", "1"]);
}

#[test]
fn encode_renumbers_gapped_keys_contiguously() {
    let text = "file_groups:\n\
                \x20 top:\n\
                \x20   header: default section\n\
                \x20   files: []\n\
                \x20 '3':\n\
                \x20   header: Three\n\
                \x20   files: []\n\
                \x20 '7':\n\
                \x20   header: Seven\n\
                \x20   files: []\n";
    let doc = GroupingDocument::from_sections(decode(text).unwrap());
    let out = encode(&doc).unwrap();

    assert_eq!(persisted_keys(&out), vec!["top", "1", "2"]);
    // Display order survives the renumbering.
    let sections = decode(&out).unwrap();
    let headers: Vec<&str> = sections.iter().map(|(h, _)| h.as_str()).collect();
    assert_eq!(headers, vec!["default section", "Three", "Seven"]);
}

#[test]
fn round_trip_preserves_headers_and_file_order() {
    let doc = GroupingDocument::from_sections(vec![
        (DEFAULT_HEADER.to_string(), vec!["z.txt".to_string(), "a.txt".to_string()]),
        ("Docs".to_string(), vec!["readme.md".to_string()]),
        ("Empty".to_string(), vec![]),
    ]);
    let sections = decode(&encode(&doc).unwrap()).unwrap();

    let expected: Vec<(String, Vec<String>)> = doc
        .sections()
        .iter()
        .map(|s| (s.header.clone(), s.files.clone()))
        .collect();
    assert_eq!(sections, expected);
}
