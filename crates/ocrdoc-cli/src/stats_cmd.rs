use std::path::Path;

use ocrdoc_core::Page;

use crate::cli::OutputFormat;
use crate::shared::{open_document, resolve_pages};

pub fn run(file: &Path, pages: Option<&str>, format: &OutputFormat) -> Result<(), i32> {
    let doc = open_document(file)?;
    let page_indices = resolve_pages(pages, doc.page_count())?;
    let pages: Vec<(usize, &Page)> = page_indices
        .iter()
        .filter_map(|&idx| doc.pages().get(idx).map(|p| (idx, p)))
        .collect();

    match format {
        OutputFormat::Text => write_text(&pages),
        OutputFormat::Json => write_json(&pages),
    }
}

fn write_text(pages: &[(usize, &Page)]) -> Result<(), i32> {
    for &(idx, page) in pages {
        let stats = page.statistics();
        println!(
            "page {}: lines={} words={} chars={} from_dict={} h_line={:.2} h_word={:.2} w_letter={:.2} confidence={}",
            idx + 1,
            stats.counts.lines,
            stats.counts.words,
            stats.counts.chars,
            stats.counts.from_dict,
            stats.means.h_line,
            stats.means.h_word,
            stats.means.w_letter,
            stats.mean_confidence(),
        );
        for (i, line) in page.lines().iter().enumerate() {
            let ls = line.statistics();
            println!(
                "  line {}: words={} letters={} h_low={:.2} h_upper={:.2} y_baseline={} multi_visual={}",
                i + 1,
                ls.counts.words,
                ls.counts.letters,
                ls.means.h_low,
                ls.means.h_upper,
                ls.means.y_baseline,
                ls.multi_visual,
            );
        }
    }
    Ok(())
}

fn write_json(pages: &[(usize, &Page)]) -> Result<(), i32> {
    let mut out = Vec::with_capacity(pages.len());
    for &(idx, page) in pages {
        let lines = page
            .lines()
            .iter()
            .map(|l| serde_json::to_value(l.statistics()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(json_error)?;
        out.push(serde_json::json!({
            "page": idx + 1,
            "statistics": serde_json::to_value(page.statistics()).map_err(json_error)?,
            "lines": lines,
        }));
    }

    let json_str = serde_json::to_string(&out).map_err(json_error)?;
    println!("{json_str}");
    Ok(())
}

fn json_error(e: serde_json::Error) -> i32 {
    eprintln!("Error: failed to encode JSON: {e}");
    1
}
