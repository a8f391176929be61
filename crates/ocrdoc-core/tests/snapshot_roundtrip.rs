//! Snapshot write/read cycles through the filesystem.

use ocrdoc_core::*;
use serde_json::json;

fn make_letter(text: &str, x0: f64) -> Letter {
    Letter::new(text, BBox::new(x0, 100.0, x0 + 10.0, 120.0), 88.5)
}

fn make_word(doc: &mut Document, text: &str, x0: f64) -> Word {
    let letters = text
        .chars()
        .enumerate()
        .map(|(i, c)| make_letter(&c.to_string(), x0 + i as f64 * 10.0))
        .collect();
    let mut word = Word::from_letters(letters, 91.25);
    word.id = doc.ids().next_id();
    word
}

fn make_doc() -> Document {
    let mut doc = Document::new();
    doc.time_start = "2024-01-01T00:00:00".to_string();
    doc.warning("low contrast");
    doc.set_info("engine", "test");
    doc.start_page();
    let mut first = make_word(&mut doc, "Total", 0.0);
    first.add_alt(Word::new("Tota1", first.bbox, 40.0));
    first.detail_mut().bold = true;
    first.kind = WordKind::Header;
    doc.add(first);
    let second = make_word(&mut doc, "42", 60.0);
    doc.add(second);
    doc.end_line();
    let third = make_word(&mut doc, "EUR", 0.0);
    doc.add(third);
    doc.end_page(91.25);

    let page = doc.page_mut(0).unwrap();
    page.bbox = BBox::new(0.0, 0.0, 600.0, 800.0);
    page.image_clip_bbox = page.bbox;
    page.rotation = 0;
    page.visual_elements
        .add(VisualElement::boxes("barcodes", vec![BBox::new(10.0, 10.0, 60.0, 30.0)]));
    doc
}

#[test]
fn full_snapshot_survives_disk_round_trip() {
    let doc = make_doc();
    let dir = std::env::temp_dir().join(format!("ocrdoc-core-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("full.json");
    doc.save(&path, OutputDetail::Full).unwrap();
    let loaded = Document::open(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded, doc);
    let word = &loaded.page(0).unwrap().lines()[0].words()[0];
    assert!(word.detail().bold);
    assert_eq!(word.kind, WordKind::Header);
    assert_eq!(word.alts()[0].text(), "Tota1");
}

#[test]
fn basic_snapshot_drops_detail() {
    let doc = make_doc();
    let loaded = Document::from_json(&doc.to_json(OutputDetail::Basic)).unwrap();
    let word = &loaded.page(0).unwrap().lines()[0].words()[0];
    assert_eq!(word.text(), "Total");
    assert!(word.letters().is_empty());
    assert!(word.alts().is_empty());
    assert_eq!(word.kind, WordKind::Normal);
    assert_eq!(loaded.page(0).unwrap().to_string(), doc.page(0).unwrap().to_string());
}

#[test]
fn normal_snapshot_drops_style_only() {
    let doc = make_doc();
    let loaded = Document::from_json(&doc.to_json(OutputDetail::Normal)).unwrap();
    let word = &loaded.page(0).unwrap().lines()[0].words()[0];
    assert!(!word.detail().bold);
    assert_eq!(word.letters().len(), 5);
    assert_eq!(word.kind, WordKind::Header);
}

#[test]
fn loaded_ids_continue_after_highest() {
    let doc = make_doc();
    let mut loaded = Document::from_json(&doc.to_json(OutputDetail::Normal)).unwrap();
    let word = loaded.new_word("x", BBox::default(), 1.0);
    assert_eq!(word.id, 3);
}

#[test]
fn legacy_snapshot_loads_with_defaults() {
    let value = json!({
        "pages": [{
            "skew": 0.25,
            "lines": [
                {},
                {"words": [{"text": "old", "original": {"text": "o1d", "confidence": 12}}]},
            ],
        }],
    });
    let doc = Document::from_json(&value).unwrap();
    let page = doc.page(0).unwrap();
    assert_eq!(page.deskew, 0.25);
    assert_eq!(page.rotation, -1);
    assert_eq!(page.lines().len(), 2);
    let word = &page.lines()[1].words()[0];
    assert_eq!(word.id, -1);
    assert_eq!(word.confidence, -1.0);
    assert_eq!(word.alts()[0].confidence, 12.0);
    assert!(doc.time_start.is_empty());
}

#[test]
fn malformed_files_are_errors() {
    assert!(matches!(
        Document::from_json(&json!("nope")),
        Err(DocError::Format(_))
    ));
    assert!(matches!(
        Document::open("/nonexistent/ocrdoc/snapshot.json"),
        Err(DocError::Io(_))
    ));
}
