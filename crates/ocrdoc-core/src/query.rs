//! Spatial lookups over the lines of a page.

use std::fmt;

use crate::error::{DocError, Result};
use crate::geometry::BBox;
use crate::line::Line;
use crate::word::Word;

/// Tuning of [`words_at`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryOptions {
    /// Vertical overlap (percent of the shorter span) a line needs with the
    /// query box to be searched at all.
    pub min_line_overlap: f64,
    /// Lines starting more than this many query heights below the query box
    /// end the scan.
    pub lookahead_heights: f64,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            min_line_overlap: 10.0,
            lookahead_heights: 2.0,
        }
    }
}

/// A word found by [`words_at`] with its position on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordHit<'a> {
    pub line_index: usize,
    pub word_index: usize,
    pub word: &'a Word,
}

/// Words overlapping `bbox` by at least `min_overlap` percent.
///
/// Lines are scanned in order and are expected to be roughly sorted from
/// top to bottom; the scan stops at the first line that starts well below
/// the query box.
pub fn words_at<'a>(
    lines: &'a [Line],
    bbox: &BBox,
    min_overlap: f64,
) -> Result<Vec<WordHit<'a>>> {
    words_at_with(lines, bbox, min_overlap, &QueryOptions::default())
}

pub fn words_at_with<'a>(
    lines: &'a [Line],
    bbox: &BBox,
    min_overlap: f64,
    opts: &QueryOptions,
) -> Result<Vec<WordHit<'a>>> {
    if min_overlap <= 1.0 {
        return Err(DocError::inconsistent(format!(
            "minimal overlap must exceed 1%, got {min_overlap}"
        )));
    }
    let mut hits = Vec::new();
    let stop_below = bbox.bottom + opts.lookahead_heights * bbox.height();
    for (line_index, line) in lines.iter().enumerate() {
        let line_bbox = line.bbox();
        if bbox.intersects_y(&line_bbox) > opts.min_line_overlap {
            hits.extend(line.indices_at(bbox, min_overlap).into_iter().map(|word_index| {
                WordHit {
                    line_index,
                    word_index,
                    word: &line.words()[word_index],
                }
            }));
        }
        if line_bbox.top > stop_below {
            break;
        }
    }
    Ok(hits)
}

/// Cell size of [`Words2d`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridOptions {
    pub step: u32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self { step: 30 }
    }
}

/// Coarse column-major grid of words for debugging dumps.
///
/// Each cell keeps the first word that reached it; later words covering the
/// same cell are dropped.
#[derive(Debug, Clone)]
pub struct Words2d<'a> {
    columns: Vec<Vec<Option<&'a Word>>>,
    step: u32,
}

impl<'a> Words2d<'a> {
    /// Grid covering `bbox` with the words of `lines` that overlap it.
    pub fn from_lines(bbox: &BBox, lines: &'a [Line], opts: &GridOptions) -> Self {
        Self::from_words(bbox, lines.iter().flat_map(|l| l.words().iter()), opts)
    }

    pub fn from_words(
        bbox: &BBox,
        words: impl IntoIterator<Item = &'a Word>,
        opts: &GridOptions,
    ) -> Self {
        let step = opts.step.max(1);
        let step_f = f64::from(step);
        let cols = (bbox.x1 / step_f) as usize + 1;
        let rows = (bbox.bottom / step_f) as usize + 1;
        let mut grid = Self {
            columns: vec![vec![None; rows]; cols],
            step,
        };
        for word in words {
            if bbox.intersects(&word.bbox) > 0.0 {
                grid.add(word);
            }
        }
        grid
    }

    fn add(&mut self, word: &'a Word) {
        let step = f64::from(self.step);
        let b = &word.bbox;
        let mut x = b.x0;
        while x < b.x1 {
            let xi = (x / step) as i64;
            let mut y = b.top;
            while y < b.bottom {
                let yi = (y / step) as i64;
                y += step;
                let Some(cell) = usize::try_from(xi)
                    .ok()
                    .zip(usize::try_from(yi).ok())
                    .and_then(|(xi, yi)| self.columns.get_mut(xi)?.get_mut(yi))
                else {
                    continue;
                };
                if cell.is_none() {
                    *cell = Some(word);
                    break;
                }
            }
            x += step;
        }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, index: usize) -> Option<&[Option<&'a Word>]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    pub fn columns(&self) -> impl Iterator<Item = &[Option<&'a Word>]> {
        self.columns.iter().map(Vec::as_slice)
    }

    /// Left edge of column `index`.
    pub fn x_start(&self, index: usize) -> u64 {
        index as u64 * u64::from(self.step)
    }
}

impl fmt::Display for Words2d<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for column in &self.columns {
            write!(f, "[{}]: ", column.len())?;
            for word in column.iter().flatten() {
                write!(f, "{} ", word.text())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
