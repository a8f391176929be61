//! Document container and the page/line assembly API used by extractors.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{DocError, Result};
use crate::geometry::BBox;
use crate::line::Line;
use crate::num::to_int;
use crate::page::Page;
use crate::query::{WordHit, words_at};
use crate::snapshot::OutputDetail;
use crate::word::{IdGenerator, Word, WordFlags};

/// Default overlap for [`Document::words_remove`].
pub const WORDS_REMOVE_MIN_OVERLAP: f64 = 20.0;
/// Default overlap for [`Document::erase`].
pub const ERASE_MIN_OVERLAP: f64 = 30.0;

/// A recognized document: pages plus run metadata.
///
/// Assembly always targets the last page, which is created on demand.
/// Equality ignores the id generator.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub info: Map<String, Value>,
    pub warnings: Vec<String>,
    pub exceptions: Vec<String>,
    pub time_start: String,
    pub time_end: String,
    pub time_cpu: String,
    pages: Vec<Page>,
    ids: IdGenerator,
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.info == other.info
            && self.warnings == other.warnings
            && self.exceptions == other.exceptions
            && self.time_start == other.time_start
            && self.time_end == other.time_end
            && self.time_cpu == other.time_cpu
            && self.pages == other.pages
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON snapshot from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&data)?;
        Self::from_json(&value)
    }

    /// Write a pretty-printed JSON snapshot to disk.
    pub fn save(&self, path: impl AsRef<Path>, detail: OutputDetail) -> Result<()> {
        let data = serde_json::to_string_pretty(&self.to_json(detail))?;
        fs::write(path, data)?;
        Ok(())
    }

    /// Replace all pages; new ids continue after the highest one found.
    pub(crate) fn set_pages(&mut self, pages: Vec<Page>) {
        let max_id = pages
            .iter()
            .flat_map(Page::words)
            .map(|w| w.id)
            .max()
            .unwrap_or(-1);
        self.pages = pages;
        self.ids = IdGenerator::starting_at(max_id.max(-1) + 1);
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Result<&Page> {
        self.pages
            .get(index)
            .ok_or_else(|| DocError::out_of_range("page", index, self.pages.len()))
    }

    pub fn page_mut(&mut self, index: usize) -> Result<&mut Page> {
        let len = self.pages.len();
        self.pages
            .get_mut(index)
            .ok_or_else(|| DocError::out_of_range("page", index, len))
    }

    /// The last page, started if the document has none.
    pub fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.start_page();
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Source of fresh word ids for this document.
    pub fn ids(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }

    /// A new word carrying the next free id.
    pub fn new_word(&mut self, text: impl Into<String>, bbox: BBox, confidence: f64) -> Word {
        let mut word = Word::new(text, bbox, confidence);
        word.id = self.ids.next_id();
        word
    }

    pub fn warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn exception(&mut self, msg: impl Into<String>) {
        self.exceptions.push(msg.into());
    }

    pub fn set_info(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.info.insert(key.into(), value.into());
    }

    /// Open a new page holding one empty line.
    pub fn start_page(&mut self) {
        self.pages.push(Page::new());
        self.new_line();
    }

    /// Drop the last page and start it again.
    pub fn restart_page(&mut self) {
        self.pages.pop();
        self.start_page();
    }

    pub fn end_page(&mut self, confidence: f64) {
        self.current_page().confidence = confidence;
    }

    pub fn new_line(&mut self) {
        match self.pages.last_mut() {
            Some(page) => page.push_line(Line::new()),
            None => self.start_page(),
        }
    }

    pub fn end_line(&mut self) {
        self.new_line();
    }

    /// Push `word` to `line` unless it is empty after whitespace stripping.
    pub fn append_word(line: &mut Line, word: Word) -> bool {
        if word.is_empty(true) {
            #[cfg(feature = "tracing")]
            tracing::debug!(id = word.id, "dropping empty word");
            return false;
        }
        line.push_back(word);
        true
    }

    /// Push `word` to the last line of the current page.
    pub fn add(&mut self, word: Word) -> bool {
        if word.is_empty(true) {
            return false;
        }
        let page = self.current_page();
        if page.lines().is_empty() {
            page.push_line(Line::new());
        }
        if let Some(line) = page.lines_mut().last_mut() {
            line.push_back(word);
        }
        true
    }

    /// Remove and return the words of page `page_index` lying inside `bbox`.
    ///
    /// Lines must overlap `bbox` by `min_overlap` percent on both axes;
    /// words must overlap it by more than twice that.
    pub fn words_remove(
        &mut self,
        page_index: usize,
        bbox: &BBox,
        min_overlap: f64,
    ) -> Result<Vec<Word>> {
        let page = self.page_mut(page_index)?;
        let mut removed = Vec::new();
        for line in page.lines_mut() {
            let line_bbox = line.bbox();
            if line_bbox.intersects_y(bbox) < min_overlap
                || line_bbox.intersects_x(bbox) < min_overlap
            {
                continue;
            }
            let mut index = 0;
            while index < line.len() {
                let hit = line
                    .word(index)
                    .is_some_and(|w| bbox.intersects(&w.bbox) > 2.0 * min_overlap);
                if hit {
                    removed.push(line.erase(index)?);
                } else {
                    index += 1;
                }
            }
        }
        Ok(removed)
    }

    /// Remove the first word equal to `word` from a line of the current page
    /// that overlaps it by at least `min_overlap` percent.
    pub fn erase(&mut self, word: &Word, min_overlap: f64) -> Option<Word> {
        let page = self.current_page();
        for line in page.lines_mut() {
            if line.bbox().intersects(&word.bbox) < min_overlap {
                continue;
            }
            if let Some(index) = line.words().iter().position(|w| w == word) {
                return line.erase(index).ok();
            }
        }
        None
    }

    /// Remove line `index` of the current page.
    pub fn remove_line(&mut self, index: usize) -> Result<Line> {
        let lines = self.current_page().lines_mut();
        if index >= lines.len() {
            return Err(DocError::out_of_range("line", index, lines.len()));
        }
        Ok(lines.remove(index))
    }

    /// Insert `new_lines` into the current page before the first line that
    /// starts below the first new line.
    pub fn add_lines(&mut self, new_lines: Vec<Line>) {
        let Some(first) = new_lines.first() else {
            return;
        };
        let start_y = first.bbox().top;
        let lines = self.current_page().lines_mut();
        let at = lines
            .iter()
            .position(|l| l.bbox().top > start_y)
            .unwrap_or(lines.len());
        lines.splice(at..at, new_lines);
    }

    /// Purge ignored words from page `page_index`, then its empty lines.
    pub fn remove_empty(&mut self, page_index: usize) -> Result<()> {
        let lines = self.page_mut(page_index)?.lines_mut();
        for line in lines.iter_mut() {
            line.remove_if(|w| w.has_flag(WordFlags::IGNORE_WORD));
        }
        lines.retain(|l| !l.is_empty());
        Ok(())
    }

    /// Drop empty lines from every page.
    pub fn populate(&mut self) {
        for page in &mut self.pages {
            page.lines_mut().retain(|l| !l.is_empty());
        }
    }

    /// Move page `page_index` from clip coordinates to page coordinates.
    ///
    /// Returns the clip box when its corner already matches the page box and
    /// nothing had to move, `None` after translating.
    pub fn from_clip_to_document(&mut self, page_index: usize) -> Result<Option<BBox>> {
        let page = self.page_mut(page_index)?;
        let clip = page.image_clip_bbox;
        if clip.x0 == page.bbox.x0 && clip.top == page.bbox.top {
            return Ok(Some(clip));
        }
        page.translate(to_int(clip.x0) as f64, to_int(clip.top) as f64);
        Ok(None)
    }

    /// Words of page `page_index` overlapping `bbox`; see [`words_at`].
    pub fn words_at(
        &self,
        page_index: usize,
        bbox: &BBox,
        min_overlap: f64,
    ) -> Result<Vec<WordHit<'_>>> {
        words_at(self.page(page_index)?.lines(), bbox, min_overlap)
    }
}
