use std::path::Path;

use ocrdoc_core::{GridOptions, Words2d};

use crate::shared::{open_document, page_area, resolve_page};

pub fn run(file: &Path, page: usize, step: u32) -> Result<(), i32> {
    if step == 0 {
        eprintln!("Error: grid step must be positive");
        return Err(1);
    }
    let doc = open_document(file)?;
    let target = resolve_page(&doc, page)?;

    let grid = Words2d::from_lines(&page_area(target), target.lines(), &GridOptions { step });
    print!("{grid}");
    Ok(())
}
