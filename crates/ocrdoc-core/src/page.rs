//! Pages, their lines and the visual elements detected on them.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::{DocError, Result};
use crate::geometry::BBox;
use crate::line::Line;
use crate::orientation::Orientation;
use crate::stats::{Cached, PageStatistics};
use crate::word::Word;

/// Snapshot key of [`VisualElement::Images`].
pub const IMAGES_KEY: &str = "images";

/// Non-text region sets found by layout analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualElement {
    /// Named set of boxes, such as barcodes or separators.
    Boxes { key: String, bboxes: Vec<BBox> },
    /// Picture regions.
    Images { bboxes: Vec<BBox> },
}

impl VisualElement {
    pub fn boxes(key: impl Into<String>, bboxes: Vec<BBox>) -> Self {
        let key = key.into();
        if key == IMAGES_KEY {
            VisualElement::Images { bboxes }
        } else {
            VisualElement::Boxes { key, bboxes }
        }
    }

    pub fn key(&self) -> &str {
        match self {
            VisualElement::Boxes { key, .. } => key,
            VisualElement::Images { .. } => IMAGES_KEY,
        }
    }

    pub fn bboxes(&self) -> &[BBox] {
        match self {
            VisualElement::Boxes { bboxes, .. } | VisualElement::Images { bboxes } => bboxes,
        }
    }

    pub fn add(&mut self, bbox: BBox) {
        match self {
            VisualElement::Boxes { bboxes, .. } | VisualElement::Images { bboxes } => {
                bboxes.push(bbox)
            }
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            VisualElement::Boxes { bboxes, .. } | VisualElement::Images { bboxes } => {
                for b in bboxes {
                    b.translate(dx, dy);
                }
            }
        }
    }
}

/// Visual elements of a page in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisualElements {
    elements: Vec<VisualElement>,
}

impl VisualElements {
    pub fn add(&mut self, element: VisualElement) {
        self.elements.push(element);
    }

    pub fn has(&self, key: &str) -> bool {
        self.elements.iter().any(|e| e.key() == key)
    }

    /// First element stored under `key`.
    pub fn get(&self, key: &str) -> Result<&VisualElement> {
        self.elements
            .iter()
            .find(|e| e.key() == key)
            .ok_or_else(|| DocError::NoSuchElement(key.to_string()))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut VisualElement> {
        self.elements
            .iter_mut()
            .find(|e| e.key() == key)
            .ok_or_else(|| DocError::NoSuchElement(key.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisualElement> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for element in &mut self.elements {
            element.translate(dx, dy);
        }
    }
}

/// One page of a document.
///
/// Numeric metadata (`confidence`, `scale`, `deskew`, `rotation`) is `-1`
/// when unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub bbox: BBox,
    pub image_clip_bbox: BBox,
    pub visual_elements: VisualElements,
    pub text: String,
    pub info: Map<String, Value>,
    pub images: Map<String, Value>,
    pub layout: Map<String, Value>,
    pub confidence: f64,
    pub scale: f64,
    pub deskew: f64,
    pub rotation: i64,
    lines: Vec<Line>,
    external_stats: Option<PageStatistics>,
    stats: Cached<PageStatistics>,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            bbox: BBox::default(),
            image_clip_bbox: BBox::default(),
            visual_elements: VisualElements::default(),
            text: String::new(),
            info: Map::new(),
            images: Map::new(),
            layout: Map::new(),
            confidence: -1.0,
            scale: -1.0,
            deskew: -1.0,
            rotation: -1,
            lines: Vec::new(),
            external_stats: None,
            stats: Cached::default(),
        }
    }
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn line_mut(&mut self, index: usize) -> Option<&mut Line> {
        self.stats.invalidate();
        self.lines.get_mut(index)
    }

    /// Mutable access to the lines; drops the cached statistics.
    pub fn lines_mut(&mut self) -> &mut Vec<Line> {
        self.stats.invalidate();
        &mut self.lines
    }

    pub fn push_line(&mut self, line: Line) {
        self.lines_mut().push(line);
    }

    /// Every word of the page in line order.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.lines.iter().flat_map(|l| l.words().iter())
    }

    pub fn word_count(&self) -> usize {
        self.lines.iter().map(Line::len).sum()
    }

    /// Page statistics.
    ///
    /// Computed from the lines and cached until the lines change. Once
    /// [`Page::set_statistics`] has been called the stored value is returned
    /// as-is; use [`Page::refresh_statistics`] to bring its counts and means
    /// back in line with the current lines.
    pub fn statistics(&self) -> &PageStatistics {
        match &self.external_stats {
            Some(stats) => stats,
            None => self.stats.get_or_init(|| PageStatistics::from_lines(&self.lines)),
        }
    }

    pub fn set_statistics(&mut self, stats: PageStatistics) {
        self.external_stats = Some(stats);
        self.stats.invalidate();
    }

    /// Recompute counts and means from the current lines.
    ///
    /// Confidences and `found_correct_rotation` of an externally set value
    /// are kept since the words cannot reproduce them.
    pub fn refresh_statistics(&mut self) {
        match self.external_stats.as_mut() {
            Some(stats) => stats.refresh(&self.lines),
            None => self.stats.invalidate(),
        }
    }

    /// Shift lines, words and visual elements.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for line in self.lines_mut() {
            line.translate(dx, dy);
        }
        self.visual_elements.translate(dx, dy);
    }

    /// Place every word, given in the local frame of `base`, into page coordinates.
    pub fn relative_to(&mut self, base: &BBox, orientation: Orientation) {
        for line in self.lines_mut() {
            line.relative_to(base, orientation);
        }
        self.visual_elements.translate(base.x0, base.top);
    }

    pub fn set_image(&mut self, key: &str, data: &str, format: &str) {
        let mut image = Map::new();
        image.insert("data".to_string(), Value::from(data));
        image.insert("format".to_string(), Value::from(format));
        self.images.insert(key.to_string(), Value::Object(image));
    }
}

impl fmt::Display for Page {
    /// One `[NN]: text` row per line, `NN` being the zero-padded word count.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "[{:02}]: {}", line.len(), line.text(None))?;
        }
        Ok(())
    }
}
