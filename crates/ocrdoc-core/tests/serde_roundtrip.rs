//! Serde serialization/deserialization round-trip tests.
//!
//! These tests verify that the plain value types can be serialized to JSON
//! and deserialized back, producing equal values.

#![cfg(feature = "serde")]

use ocrdoc_core::*;

/// Helper: serialize to JSON string, deserialize back, assert equality.
fn roundtrip<T>(value: &T)
where
    T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let json = serde_json::to_string(value).expect("serialize failed");
    let restored: T = serde_json::from_str(&json).expect("deserialize failed");
    assert_eq!(*value, restored, "round-trip mismatch for JSON: {json}");
}

#[test]
fn test_serde_geometry() {
    roundtrip(&BBox::new(10.0, 20.0, 300.0, 400.0));
    roundtrip(&Alignment::Left);
    roundtrip(&Orientation::Left);
    roundtrip(&Orientation::UpsideDown);
}

#[test]
fn test_serde_letter() {
    let letter = Letter::new("a", BBox::new(0.0, 0.0, 5.0, 9.0), 77.5).with_choice("o", 20.0);
    roundtrip(&letter);
}

#[test]
fn test_serde_options() {
    roundtrip(&LineStatsOptions::default());
    roundtrip(&PageStatsOptions::default());
    roundtrip(&QueryOptions::default());
    roundtrip(&GridOptions { step: 12 });
    roundtrip(&OutputDetail::Full);
}

#[test]
fn test_serde_output_detail_is_lowercase() {
    assert_eq!(serde_json::to_string(&OutputDetail::Basic).unwrap(), "\"basic\"");
}

#[test]
fn test_serde_statistics() {
    let letters = vec![
        Letter::new("H", BBox::new(0.0, 0.0, 8.0, 20.0), 90.0),
        Letter::new("a", BBox::new(8.0, 6.0, 15.0, 20.0), 90.0),
    ];
    let word = Word::from_letters(letters, 90.0);
    roundtrip(word.statistics());

    let line = Line::from_words(vec![word]);
    roundtrip(line.statistics());

    let mut page = Page::new();
    page.push_line(line);
    roundtrip(page.statistics());
}

#[test]
fn test_serde_word_flags() {
    let mut flags = WordFlags::default();
    flags.insert(WordFlags::WRAPPED_WORD);
    roundtrip(&flags);
    roundtrip(&WordKind::PageNumber);
    roundtrip(&ExpectedWord::Leftover);
}
