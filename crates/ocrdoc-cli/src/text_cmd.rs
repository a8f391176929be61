use std::path::Path;

use crate::shared::{open_document, resolve_pages};

pub fn run(file: &Path, pages: Option<&str>, alts: bool) -> Result<(), i32> {
    let doc = open_document(file)?;
    let page_indices = resolve_pages(pages, doc.page_count())?;

    for (i, &idx) in page_indices.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let page = doc.page(idx).map_err(|e| {
            eprintln!("Error reading page {}: {e}", idx + 1);
            1
        })?;

        if alts {
            for line in page.lines() {
                println!("[{:02}]: {}", line.len(), line.alt_text(None));
            }
        } else {
            print!("{page}");
        }
    }
    Ok(())
}
