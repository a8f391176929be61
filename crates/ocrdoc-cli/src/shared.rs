use std::path::Path;

use ocrdoc_core::{BBox, Document, Page};

use crate::page_range::parse_page_range;

/// Load a snapshot, printing a user-facing message on failure.
pub fn open_document(file: &Path) -> Result<Document, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    Document::open(file).map_err(|e| {
        eprintln!("Error: failed to open snapshot: {e}");
        1
    })
}

/// Resolve an optional page range string into 0-based page indices.
///
/// Without a range every page is selected.
pub fn resolve_pages(pages: Option<&str>, page_count: usize) -> Result<Vec<usize>, i32> {
    match pages {
        Some(range) => parse_page_range(range, page_count).map_err(|e| {
            eprintln!("Error: {e}");
            1
        }),
        None => Ok((0..page_count).collect()),
    }
}

/// Look up a 1-based page.
pub fn resolve_page(doc: &Document, page: usize) -> Result<&Page, i32> {
    if page == 0 {
        eprintln!("Error: page 0 is invalid (pages start at 1)");
        return Err(1);
    }
    doc.page(page - 1).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })
}

/// Parse `X,Y,W,H` into a box.
pub fn parse_bbox(text: &str) -> Result<BBox, String> {
    let parts = text
        .split(',')
        .map(|p| {
            p.trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid box component: '{}'", p.trim()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    match parts[..] {
        [x, y, w, h] if w >= 0.0 && h >= 0.0 => Ok(BBox::from_xywh(x, y, w, h)),
        [_, _, _, _] => Err(format!("box size must not be negative: '{text}'")),
        _ => Err(format!("expected X,Y,W,H, got '{text}'")),
    }
}

/// Area a page covers: its own box, or the union of its lines when unset.
pub fn page_area(page: &Page) -> BBox {
    if page.bbox.width() > 0.0 && page.bbox.height() > 0.0 {
        return page.bbox;
    }
    let line_boxes: Vec<BBox> = page
        .lines()
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| l.bbox())
        .collect();
    BBox::merge_all(&line_boxes).unwrap_or_default()
}
