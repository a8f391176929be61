use std::path::Path;

use ocrdoc_core::{OutputDetail, WordHit};

use crate::cli::OutputFormat;
use crate::shared::{open_document, parse_bbox, resolve_page};

pub fn run(
    file: &Path,
    bbox: &str,
    page: usize,
    min_overlap: f64,
    format: &OutputFormat,
) -> Result<(), i32> {
    let query = parse_bbox(bbox).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;
    let doc = open_document(file)?;
    let target = resolve_page(&doc, page)?;

    let hits = ocrdoc_core::words_at(target.lines(), &query, min_overlap).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    match format {
        OutputFormat::Text => write_text(&hits),
        OutputFormat::Json => write_json(&hits),
    }
}

fn write_text(hits: &[WordHit<'_>]) -> Result<(), i32> {
    println!("line\tword\tid\ttext\tx0\ttop\tx1\tbottom\tconfidence");
    for hit in hits {
        let w = hit.word;
        println!(
            "{}\t{}\t{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}",
            hit.line_index + 1,
            hit.word_index + 1,
            w.id,
            w.text(),
            w.bbox.x0,
            w.bbox.top,
            w.bbox.x1,
            w.bbox.bottom,
            w.confidence,
        );
    }
    Ok(())
}

fn write_json(hits: &[WordHit<'_>]) -> Result<(), i32> {
    let words: Vec<serde_json::Value> = hits
        .iter()
        .map(|hit| {
            let mut value = hit.word.to_json(OutputDetail::Basic);
            value["line"] = serde_json::Value::from(hit.line_index + 1);
            value["word"] = serde_json::Value::from(hit.word_index + 1);
            value
        })
        .collect();

    let json_str = serde_json::to_string(&words).map_err(|e| {
        eprintln!("Error: failed to encode JSON: {e}");
        1
    })?;
    println!("{json_str}");
    Ok(())
}
