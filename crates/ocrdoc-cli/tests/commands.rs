//! Subcommands driven against snapshots written to a temporary directory.

use assert_cmd::Command;
use ocrdoc_core::{BBox, Document, OutputDetail, Word, WordFlags};
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("ocrdoc").unwrap()
}

fn make_word(doc: &mut Document, text: &str, x0: f64, top: f64) -> Word {
    doc.new_word(text, BBox::new(x0, top, x0 + 40.0, top + 20.0), 90.0)
}

/// Two pages; the first has two lines, the second one line.
fn write_fixture(dir: &TempDir) -> std::path::PathBuf {
    let mut doc = Document::new();
    doc.start_page();
    let hello = make_word(&mut doc, "hello", 0.0, 0.0);
    doc.add(hello);
    let mut world = make_word(&mut doc, "world", 50.0, 0.0);
    world.add_alt(Word::new("wor1d", world.bbox, 85.0));
    doc.add(world);
    doc.end_line();
    let mut ignored = make_word(&mut doc, "noise", 0.0, 40.0);
    ignored.set_flag(WordFlags::IGNORE_WORD);
    doc.add(ignored);
    let second = make_word(&mut doc, "second", 50.0, 40.0);
    doc.add(second);
    doc.end_page(90.0);
    doc.page_mut(0).unwrap().bbox = BBox::new(0.0, 0.0, 120.0, 80.0);

    doc.start_page();
    let other = make_word(&mut doc, "other", 0.0, 0.0);
    doc.add(other);
    doc.end_page(80.0);

    let path = dir.path().join("doc.json");
    doc.save(&path, OutputDetail::Full).unwrap();
    path
}

#[test]
fn text_dumps_every_page() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir);
    cmd()
        .arg("text")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[02]: hello world"))
        .stdout(predicate::str::contains("[01]: other"));
}

#[test]
fn text_with_alternatives_and_page_range() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir);
    cmd()
        .arg("text")
        .arg(&path)
        .args(["--pages", "1", "--alts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello wor1d"))
        .stdout(predicate::str::contains("other").not());
}

#[test]
fn bad_page_range_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir);
    cmd()
        .arg("text")
        .arg(&path)
        .args(["--pages", "5"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("exceeds"));
}

#[test]
fn words_text_output() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir);
    cmd()
        .arg("words")
        .arg(&path)
        .args(["--bbox", "45,35,50,30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("line\tword\tid\ttext"))
        .stdout(predicate::str::contains("2\t2\t3\tsecond"));
}

#[test]
fn words_json_output() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir);
    let output = cmd()
        .arg("words")
        .arg(&path)
        .args(["--bbox", "0,0,40,20", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let words: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(words.as_array().unwrap().len(), 1);
    assert_eq!(words[0]["text"], "hello");
    assert_eq!(words[0]["line"], 1);
    assert_eq!(words[0]["bbox"]["w"], 40);
}

#[test]
fn words_rejects_tiny_overlap() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir);
    cmd()
        .arg("words")
        .arg(&path)
        .args(["--bbox", "0,0,40,20", "--min-overlap", "1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: inconsistent state"));
}

#[test]
fn words_rejects_malformed_bbox() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir);
    cmd()
        .arg("words")
        .arg(&path)
        .args(["--bbox", "0,0,40"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected X,Y,W,H"));
}

#[test]
fn stats_text_and_json() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir);
    cmd()
        .arg("stats")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("page 1: lines=2 words=4"))
        .stdout(predicate::str::contains("  line 1: words=2"));

    let output = cmd()
        .arg("stats")
        .arg(&path)
        .args(["--pages", "2", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats[0]["page"], 2);
    assert_eq!(stats[0]["statistics"]["counts"]["words"], 1);
}

#[test]
fn grid_dump() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir);
    cmd()
        .arg("grid")
        .arg(&path)
        .args(["--step", "40"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[3]: hello noise"));
}

#[test]
fn grid_page_zero_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir);
    cmd()
        .arg("grid")
        .arg(&path)
        .args(["--page", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page 0 is invalid"));
}

#[test]
fn normalize_writes_purged_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir);
    let out = dir.path().join("clean.json");
    cmd()
        .arg("normalize")
        .arg(&path)
        .arg("-o")
        .arg(&out)
        .args(["--detail", "basic"])
        .assert()
        .success();

    let doc = Document::open(&out).unwrap();
    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.page(0).unwrap().to_string(), "[02]: hello world\n[01]: second\n");
    assert!(doc.page(0).unwrap().words().all(|w| w.alts().is_empty()));
}

#[test]
fn normalize_to_stdout() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir);
    let output = cmd().arg("normalize").arg(&path).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["pages"].as_array().unwrap().len(), 2);
}
