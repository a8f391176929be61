use std::path::Path;

use ocrdoc_core::{Document, OutputDetail};

use crate::shared::open_document;

pub fn run(
    file: &Path,
    output: Option<&Path>,
    detail: OutputDetail,
    reset_orientation: bool,
) -> Result<(), i32> {
    let mut doc = open_document(file)?;
    let (words, lines) = normalize(&mut doc, reset_orientation).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;
    tracing::info!(words, lines, "normalized snapshot");

    match output {
        Some(path) => doc.save(path, detail).map_err(|e| {
            eprintln!("Error: failed to write {}: {e}", path.display());
            1
        }),
        None => {
            let json_str = serde_json::to_string_pretty(&doc.to_json(detail)).map_err(|e| {
                eprintln!("Error: failed to encode JSON: {e}");
                1
            })?;
            println!("{json_str}");
            Ok(())
        }
    }
}

/// Drop blank and ignored words, then empty lines. Returns how many words
/// and lines were removed.
fn normalize(doc: &mut Document, reset_orientation: bool) -> ocrdoc_core::Result<(usize, usize)> {
    let mut words = 0;
    let mut lines = 0;
    for idx in 0..doc.page_count() {
        let page = doc.page_mut(idx)?;
        let lines_before = page.lines().len();
        let words_before = page.word_count();
        for line in page.lines_mut() {
            line.remove_if(|w| w.is_empty(true));
            if reset_orientation {
                for word in line.words_mut() {
                    word.reset_orientation();
                }
            }
        }
        doc.remove_empty(idx)?;
        let page = doc.page(idx)?;
        words += words_before - page.word_count();
        lines += lines_before - page.lines().len();
    }
    Ok((words, lines))
}
