//! Lines of words.

use crate::error::{DocError, Result};
use crate::geometry::BBox;
use crate::orientation::Orientation;
use crate::stats::{Cached, LineStatistics};
use crate::word::Word;

/// Alternatives must exceed this share of the word confidence to be preferred.
const ALT_CONFIDENCE_RATIO: f64 = 0.9;

/// An ordered run of words.
///
/// `add` and `merge` keep words sorted by their left edge; `push_back`,
/// `push_front` and `insert` place words exactly where asked. The box is
/// the union of the word boxes. Every method taking `&mut self` drops the
/// cached statistics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    words: Vec<Word>,
    stats: Cached<LineStatistics>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line holding `words` in the given order.
    pub fn from_words(words: Vec<Word>) -> Self {
        Self {
            words,
            stats: Cached::default(),
        }
    }

    pub fn bbox(&self) -> BBox {
        BBox::merge_all(self.words.iter().map(|w| &w.bbox)).unwrap_or_default()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    pub fn word_mut(&mut self, index: usize) -> Option<&mut Word> {
        self.changed();
        self.words.get_mut(index)
    }

    pub fn words_mut(&mut self) -> &mut [Word] {
        self.changed();
        &mut self.words
    }

    pub fn into_words(self) -> Vec<Word> {
        self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn statistics(&self) -> &LineStatistics {
        self.stats.get_or_init(|| LineStatistics::from_words(&self.words))
    }

    pub fn has_cached_statistics(&self) -> bool {
        self.stats.is_cached()
    }

    fn changed(&mut self) {
        self.stats.invalidate();
    }

    /// Word texts joined by single spaces, stopping at the first word that
    /// starts right of `max_x`.
    pub fn text(&self, max_x: Option<f64>) -> String {
        self.words_until(max_x)
            .map(Word::text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Like [`Line::text`], but each word is replaced by its best alternative
    /// when that alternative is nearly as confident.
    pub fn alt_text(&self, max_x: Option<f64>) -> String {
        self.alt_words(max_x)
            .into_iter()
            .map(Word::text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The words chosen by [`Line::alt_text`].
    pub fn alt_words(&self, max_x: Option<f64>) -> Vec<&Word> {
        self.words_until(max_x)
            .map(|w| match w.best_alt() {
                Some(alt) if alt.confidence > w.confidence * ALT_CONFIDENCE_RATIO => alt,
                _ => w,
            })
            .collect()
    }

    fn words_until(&self, max_x: Option<f64>) -> impl Iterator<Item = &Word> {
        self.words
            .iter()
            .take_while(move |w| !matches!(max_x, Some(x) if x > 0.0 && x < w.bbox.x0))
    }

    /// Mean word confidence, `0.0` for an empty line.
    pub fn confidence(&self) -> f64 {
        if self.words.is_empty() {
            return 0.0;
        }
        self.words.iter().map(|w| w.confidence).sum::<f64>() / self.words.len() as f64
    }

    pub fn letter_count(&self) -> usize {
        self.words.iter().map(Word::letter_count).sum()
    }

    pub fn push_back(&mut self, word: Word) {
        self.words.push(word);
        self.changed();
    }

    pub fn push_front(&mut self, word: Word) {
        self.words.insert(0, word);
        self.changed();
    }

    pub fn pop_back(&mut self) -> Option<Word> {
        self.changed();
        self.words.pop()
    }

    pub fn pop_front(&mut self) -> Option<Word> {
        self.changed();
        if self.words.is_empty() {
            None
        } else {
            Some(self.words.remove(0))
        }
    }

    /// Append and re-sort by left edge.
    pub fn add(&mut self, word: Word) {
        self.words.push(word);
        self.words.sort_by(|a, b| a.bbox.x0.total_cmp(&b.bbox.x0));
        self.changed();
    }

    pub fn insert(&mut self, index: usize, word: Word) -> Result<()> {
        if index > self.words.len() {
            return Err(DocError::out_of_range("word", index, self.words.len()));
        }
        self.words.insert(index, word);
        self.changed();
        Ok(())
    }

    pub fn erase(&mut self, index: usize) -> Result<Word> {
        if index >= self.words.len() {
            return Err(DocError::out_of_range("word", index, self.words.len()));
        }
        self.changed();
        Ok(self.words.remove(index))
    }

    /// Drop the words matching `pred`; returns how many were removed.
    pub fn remove_if(&mut self, mut pred: impl FnMut(&Word) -> bool) -> usize {
        let before = self.words.len();
        self.words.retain(|w| !pred(w));
        self.changed();
        before - self.words.len()
    }

    pub fn clear(&mut self) {
        self.words.clear();
        self.changed();
    }

    /// Move the words from `index` on into a new line.
    pub fn split(&mut self, index: usize) -> Result<Line> {
        if index >= self.words.len() {
            return Err(DocError::out_of_range("word", index, self.words.len()));
        }
        let mut tail = Line::new();
        for word in self.words.drain(index..).rev() {
            tail.add(word);
        }
        self.changed();
        Ok(tail)
    }

    /// Move all words of `other` into this line, each placed before the
    /// first word that starts further right.
    pub fn merge(&mut self, other: &mut Line) {
        for word in other.words.drain(..) {
            match self.words.iter().position(|w| w.bbox.x0 > word.bbox.x0) {
                Some(pos) => self.words.insert(pos, word),
                None => self.words.push(word),
            }
        }
        other.changed();
        self.changed();
    }

    /// Words overlapping `bbox` by at least `min_overlap` percent.
    pub fn at(&self, bbox: &BBox, min_overlap: f64) -> Vec<&Word> {
        self.indices_at(bbox, min_overlap)
            .into_iter()
            .map(|i| &self.words[i])
            .collect()
    }

    /// Positions of the words returned by [`Line::at`].
    pub fn indices_at(&self, bbox: &BBox, min_overlap: f64) -> Vec<usize> {
        self.words
            .iter()
            .enumerate()
            .filter(|(_, w)| bbox.intersects(&w.bbox) >= min_overlap)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for word in &mut self.words {
            word.translate(dx, dy);
        }
        self.changed();
    }

    pub fn relative_to(&mut self, base: &BBox, orientation: Orientation) {
        for word in &mut self.words {
            word.relative_to(base, orientation);
        }
        self.changed();
    }
}
