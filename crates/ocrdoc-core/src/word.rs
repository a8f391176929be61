use std::collections::BTreeMap;
use std::ops::Range;

use crate::error::{DocError, Result};
use crate::geometry::BBox;
use crate::letter::Letter;
use crate::num::to_int;
use crate::orientation::{Orientation, OrientationTransform};
use crate::stats::{Cached, WordStatistics};
use crate::text;

/// Bit flags attached to a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordFlags(u32);

impl WordFlags {
    /// Letter boxes are known to be imprecise.
    pub const INACCURATE_BBOXES: WordFlags = WordFlags(1);
    /// The word is blanked and waits to be purged from its line.
    pub const IGNORE_WORD: WordFlags = WordFlags(1 << 2);
    /// The word continues on the next line.
    pub const WRAPPED_WORD: WordFlags = WordFlags(1 << 3);

    pub fn from_bits(bits: u32) -> Self {
        WordFlags(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: WordFlags) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, other: WordFlags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: WordFlags) {
        self.0 &= !other.0;
    }
}

/// Whether a word was predicted by a downstream corrector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExpectedWord {
    #[default]
    No,
    Ordinary,
    Leftover,
}

impl ExpectedWord {
    pub fn as_str(self) -> &'static str {
        match self {
            ExpectedWord::No => "NO",
            ExpectedWord::Ordinary => "ORDINARY",
            ExpectedWord::Leftover => "LEFTOVER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NO" => Some(ExpectedWord::No),
            "ORDINARY" => Some(ExpectedWord::Ordinary),
            "LEFTOVER" => Some(ExpectedWord::Leftover),
            _ => None,
        }
    }
}

/// Page region a word was segmented into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WordKind {
    #[default]
    Normal,
    Header,
    Footer,
    PageNumber,
}

impl WordKind {
    /// Snapshot name; empty for `Normal`.
    pub fn as_str(self) -> &'static str {
        match self {
            WordKind::Normal => "",
            WordKind::Header => "HEADER",
            WordKind::Footer => "FOOTER",
            WordKind::PageNumber => "PAGE_NUMBER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "" => Some(WordKind::Normal),
            "HEADER" => Some(WordKind::Header),
            "FOOTER" => Some(WordKind::Footer),
            "PAGE_NUMBER" => Some(WordKind::PageNumber),
            _ => None,
        }
    }
}

/// Font, style, baseline and letters of a word, plus free-form tags.
#[derive(Debug, Clone, PartialEq)]
pub struct WordDetail {
    /// Font size in points, `-1` when unknown.
    pub font_size: i32,
    pub bold: bool,
    pub italics: bool,
    pub monospace: bool,
    pub serif: bool,
    pub underline: bool,
    pub numeric: bool,
    pub from_dict: bool,
    pub small_caps: bool,
    pub font: String,
    pub baseline: BBox,
    pub letters: Vec<Letter>,
    /// Connected components the word was built from.
    pub ccs: Vec<BBox>,
    pub info: Vec<String>,
    pub updates: Vec<String>,
    pub warnings: Vec<String>,
}

impl Default for WordDetail {
    fn default() -> Self {
        Self {
            font_size: -1,
            bold: false,
            italics: false,
            monospace: false,
            serif: false,
            underline: false,
            numeric: false,
            from_dict: false,
            small_caps: false,
            font: String::new(),
            baseline: BBox::default(),
            letters: Vec::new(),
            ccs: Vec::new(),
            info: Vec::new(),
            updates: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl WordDetail {
    /// Mean letter confidence, `0.0` without letters.
    pub fn mean_letter_confidence(&self) -> f64 {
        if self.letters.is_empty() {
            return 0.0;
        }
        self.letters.iter().map(|l| l.confidence).sum::<f64>() / self.letters.len() as f64
    }
}

/// Monotonic source of word ids, owned by whoever assembles words.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next: i64,
}

impl IdGenerator {
    pub fn starting_at(first: i64) -> Self {
        Self { next: first }
    }

    pub fn next_id(&mut self) -> i64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// A recognized word: letters, consolidated text and box, and alternative readings.
///
/// The text is kept next to the letters and may carry whitespace that no
/// letter accounts for. Letter-based edits keep both in step; only
/// [`Word::update_from_letters`] rebuilds the text from scratch.
///
/// Statistics are cached and dropped by every method that can change the
/// letters, including [`Word::detail_mut`].
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    /// `-1` when unassigned.
    pub id: i64,
    pub bbox: BBox,
    /// `-1` when unknown.
    pub confidence: f64,
    pub orientation: Orientation,
    /// Id of the word this one was split from.
    pub derived_from: Option<i64>,
    pub arbitrary: BTreeMap<String, String>,
    pub expected: ExpectedWord,
    pub kind: WordKind,
    pub flags: WordFlags,
    text: String,
    detail: WordDetail,
    alts: Vec<Word>,
    stats: Cached<WordStatistics>,
}

impl Default for Word {
    fn default() -> Self {
        Self {
            id: -1,
            bbox: BBox::default(),
            confidence: -1.0,
            orientation: Orientation::Up,
            derived_from: None,
            arbitrary: BTreeMap::new(),
            expected: ExpectedWord::No,
            kind: WordKind::Normal,
            flags: WordFlags::default(),
            text: String::new(),
            detail: WordDetail::default(),
            alts: Vec::new(),
            stats: Cached::default(),
        }
    }
}

impl Word {
    pub fn new(text: impl Into<String>, bbox: BBox, confidence: f64) -> Self {
        Self {
            text: text.into(),
            bbox,
            confidence,
            ..Self::default()
        }
    }

    /// Build a word whose text and box are derived from `letters`.
    pub fn from_letters(letters: Vec<Letter>, confidence: f64) -> Self {
        let mut word = Self {
            confidence,
            ..Self::default()
        };
        word.detail.letters = letters;
        word.update_from_letters();
        word
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text without touching the letters.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn detail(&self) -> &WordDetail {
        &self.detail
    }

    /// Mutable access to the detail; drops the cached statistics.
    pub fn detail_mut(&mut self) -> &mut WordDetail {
        self.changed();
        &mut self.detail
    }

    pub fn letters(&self) -> &[Letter] {
        &self.detail.letters
    }

    pub fn letter_count(&self) -> usize {
        self.detail.letters.len()
    }

    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    pub fn alts(&self) -> &[Word] {
        &self.alts
    }

    pub fn statistics(&self) -> &WordStatistics {
        self.stats
            .get_or_init(|| WordStatistics::from_letters(&self.detail.letters))
    }

    pub fn has_cached_statistics(&self) -> bool {
        self.stats.is_cached()
    }

    fn changed(&mut self) {
        self.stats.invalidate();
    }

    /// Height as seen on the page, rounded; width and height swap for
    /// quarter-turn orientations.
    pub fn height(&self) -> i64 {
        if self.orientation.swaps_axes() {
            to_int(self.bbox.width())
        } else {
            to_int(self.bbox.height())
        }
    }

    /// Width as seen on the page, rounded.
    pub fn width(&self) -> i64 {
        if self.orientation.swaps_axes() {
            to_int(self.bbox.height())
        } else {
            to_int(self.bbox.width())
        }
    }

    /// Whether the text is empty, optionally ignoring whitespace.
    pub fn is_empty(&self, strip: bool) -> bool {
        if strip {
            self.text.trim().is_empty()
        } else {
            self.text.is_empty()
        }
    }

    pub fn is_single_char(&self) -> bool {
        self.text.len() == 1
    }

    pub fn contains_newline(&self) -> bool {
        self.text.contains(['\r', '\n'])
    }

    /// First code point of the letter at `pos`.
    pub fn letter_char(&self, pos: usize) -> Option<char> {
        self.detail.letters.get(pos)?.text.chars().next()
    }

    pub fn first_char(&self) -> Option<char> {
        self.text.chars().next()
    }

    pub fn last_char(&self) -> Option<char> {
        self.text.chars().next_back()
    }

    pub fn has_flag(&self, flag: WordFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn set_flag(&mut self, flag: WordFlags) {
        self.flags.insert(flag);
    }

    pub fn clear_flag(&mut self, flag: WordFlags) {
        self.flags.remove(flag);
    }

    /// Byte offset in the text where the letter at `pos` would start if no
    /// whitespace preceded it.
    ///
    /// Walks the first `pos` letters, skipping text whitespace that a letter
    /// does not itself start with. Positions past the end clamp to the text
    /// length.
    pub fn text_offset(&self, pos: usize) -> usize {
        let bytes = self.text.as_bytes();
        let mut offset = 0;
        for letter in self.detail.letters.iter().take(pos) {
            offset = skip_whitespace(bytes, offset, letter);
            offset += letter.text.len();
        }
        offset.min(self.text.len())
    }

    /// Byte range of the letter at `pos`, excluding leading whitespace.
    fn letter_span(&self, pos: usize) -> Range<usize> {
        let bytes = self.text.as_bytes();
        let start = match self.detail.letters.get(pos) {
            Some(letter) => skip_whitespace(bytes, self.text_offset(pos), letter),
            None => self.text.len(),
        };
        let len = self.detail.letters.get(pos).map_or(0, |l| l.text.len());
        start.min(self.text.len())..(start + len).min(self.text.len())
    }

    /// Byte range covering `len` letters from `pos`, including whitespace between them.
    fn letters_span(&self, pos: usize, len: usize) -> Range<usize> {
        let start = self.letter_span(pos).start;
        if len == 0 {
            return start..start;
        }
        start..self.letter_span(pos + len - 1).end
    }

    fn check_letter_range(&self, pos: usize, len: usize) -> Result<()> {
        let count = self.detail.letters.len();
        if pos.checked_add(len).is_none_or(|end| end > count) {
            return Err(DocError::out_of_range("letter", pos.saturating_add(len), count));
        }
        Ok(())
    }

    fn check_text_range(&self, range: &Range<usize>) -> Result<()> {
        if range.end > self.text.len() || range.start > range.end {
            return Err(DocError::out_of_range("text byte", range.end, self.text.len()));
        }
        if !self.text.is_char_boundary(range.start) || !self.text.is_char_boundary(range.end) {
            return Err(DocError::inconsistent(format!(
                "byte range {range:?} splits a character of {:?}",
                self.text
            )));
        }
        Ok(())
    }

    /// Remove `len` letters starting at `pos` together with their text.
    pub fn erase(&mut self, pos: usize, len: usize, tag: Option<&str>) -> Result<()> {
        self.check_letter_range(pos, len)?;
        let span = self.letters_span(pos, len);
        self.erase_range(span.start, span.len(), pos, len, tag)
    }

    /// Remove an explicit text byte range and letter range.
    pub fn erase_range(
        &mut self,
        text_pos: usize,
        text_len: usize,
        pos: usize,
        len: usize,
        tag: Option<&str>,
    ) -> Result<()> {
        self.check_letter_range(pos, len)?;
        let range = text_pos..text_pos + text_len;
        self.check_text_range(&range)?;
        self.mark_update_opt(tag);
        self.text.replace_range(range, "");
        self.detail.letters.drain(pos..pos + len);
        self.changed();
        Ok(())
    }

    /// Remove letters only; the text is left alone.
    pub fn erase_letters(&mut self, pos: usize, len: usize) -> Result<Vec<Letter>> {
        self.check_letter_range(pos, len)?;
        let removed = self.detail.letters.drain(pos..pos + len).collect();
        self.changed();
        Ok(removed)
    }

    /// Remove `remove_letters` letters at `pos`, then give the following
    /// letter the text `new_text`, updating the word text accordingly.
    pub fn replace_letter(
        &mut self,
        pos: usize,
        new_text: &str,
        remove_letters: usize,
        tag: Option<&str>,
    ) -> Result<()> {
        let count = self.detail.letters.len();
        let span_len = remove_letters
            .checked_add(1)
            .ok_or_else(|| DocError::out_of_range("letter", usize::MAX, count))?;
        self.check_letter_range(pos, span_len)?;
        let span = self.letters_span(pos, span_len);
        self.check_text_range(&span)?;
        self.mark_update_opt(tag);
        self.text.replace_range(span, new_text);
        self.detail.letters.drain(pos..pos + remove_letters);
        self.detail.letters[pos].text = new_text.to_string();
        self.changed();
        Ok(())
    }

    /// Replace `remove_text_len` bytes at `text_pos` with `new_text` and
    /// remove `remove_letters` letters at `pos`; the letter then at `pos`
    /// (if any) takes `new_text`.
    pub fn replace(
        &mut self,
        new_text: &str,
        text_pos: usize,
        remove_text_len: usize,
        pos: usize,
        remove_letters: usize,
        tag: Option<&str>,
    ) -> Result<()> {
        self.check_letter_range(pos, remove_letters)?;
        let end = text_pos
            .checked_add(remove_text_len)
            .ok_or_else(|| DocError::out_of_range("text byte", usize::MAX, self.text.len()))?;
        let range = text_pos..end;
        self.check_text_range(&range)?;
        self.mark_update_opt(tag);
        self.detail.letters.drain(pos..pos + remove_letters);
        if let Some(letter) = self.detail.letters.get_mut(pos) {
            letter.text = new_text.to_string();
        }
        self.text.replace_range(range, new_text);
        self.changed();
        Ok(())
    }

    /// Insert `new_text` at byte `text_pos` and `letter` before letter `pos`.
    pub fn insert(
        &mut self,
        new_text: &str,
        text_pos: usize,
        pos: usize,
        letter: Letter,
        tag: Option<&str>,
    ) -> Result<()> {
        if pos > self.detail.letters.len() {
            return Err(DocError::out_of_range("letter", pos, self.detail.letters.len()));
        }
        self.check_text_range(&(text_pos..text_pos))?;
        self.mark_update_opt(tag);
        self.text.insert_str(text_pos, new_text);
        self.detail.letters.insert(pos, letter);
        self.changed();
        Ok(())
    }

    /// Insert `letter` before letter `pos`, placing its text at the matching offset.
    pub fn insert_letter(&mut self, pos: usize, letter: Letter, tag: Option<&str>) -> Result<()> {
        let text_pos = self.text_offset(pos);
        let new_text = letter.text.clone();
        self.insert(&new_text, text_pos, pos, letter, tag)
    }

    /// Drop the letters matching `pred` and rebuild text and box from the rest.
    ///
    /// Returns the number of removed letters.
    pub fn remove_letters_if(
        &mut self,
        mut pred: impl FnMut(&Letter) -> bool,
        tag: Option<&str>,
    ) -> usize {
        let before = self.detail.letters.len();
        self.detail.letters.retain(|l| !pred(l));
        let removed = before - self.detail.letters.len();
        if removed > 0 {
            self.mark_update_opt(tag);
            self.update_from_letters();
        }
        removed
    }

    /// Rebuild text and box from the letters.
    ///
    /// The text becomes the plain concatenation of letter texts; the box is
    /// their union, or the default box when there are no letters.
    pub fn update_from_letters(&mut self) {
        self.changed();
        self.text = self.detail.letters.iter().map(|l| l.text.as_str()).collect();
        self.bbox =
            BBox::merge_all(self.detail.letters.iter().map(|l| &l.bbox)).unwrap_or_default();
    }

    /// Append `next` to this word, joined by `glue`.
    ///
    /// When `glue` is non-empty and both words have letters, a synthetic
    /// letter with the glue text spans the gap between them. The confidence
    /// becomes the plain average of both words.
    pub fn append(&mut self, next: &Word, glue: &str) {
        let gap = BBox::new(
            self.bbox.x1.min(next.bbox.x0),
            self.bbox.top.min(next.bbox.top),
            self.bbox.x1.max(next.bbox.x0),
            self.bbox.bottom.max(next.bbox.bottom),
        );
        self.bbox.merge(&next.bbox);
        self.text.push_str(glue);
        self.text.push_str(&next.text);
        self.detail.baseline.merge(&next.detail.baseline);

        if !glue.is_empty() && !next.detail.letters.is_empty() {
            if let Some(last) = self.detail.letters.last() {
                let mut glue_letter = last.clone();
                glue_letter.bbox = gap;
                glue_letter.text = glue.to_string();
                self.detail.letters.push(glue_letter);
            }
        }
        self.detail.letters.extend(next.detail.letters.iter().cloned());
        self.confidence = (self.confidence + next.confidence) / 2.0;
        self.detail.warnings.extend(next.detail.warnings.iter().cloned());
        self.detail.info.extend(next.detail.info.iter().cloned());
        self.changed();
    }

    /// Split the letters at `pos` into two new words.
    ///
    /// Both halves get fresh ids from `ids` and record this word's id in
    /// `derived_from`. Confidence, orientation and kind are copied; text and
    /// box are rebuilt from each half's letters.
    pub fn split(&self, pos: usize, ids: &mut IdGenerator) -> Result<(Word, Word)> {
        let count = self.detail.letters.len();
        if pos == 0 || pos >= count {
            return Err(DocError::inconsistent(format!(
                "cannot split a word of {count} letters at {pos}"
            )));
        }
        let (head, tail) = self.detail.letters.split_at(pos);
        let make = |letters: &[Letter], id: i64| {
            let mut w = Word::from_letters(letters.to_vec(), self.confidence);
            w.id = id;
            w.derived_from = Some(self.id);
            w.orientation = self.orientation;
            w.kind = self.kind;
            w
        };
        let first = make(head, ids.next_id());
        let second = make(tail, ids.next_id());
        Ok((first, second))
    }

    /// Map letter and baseline boxes from the visual frame of `orientation`
    /// to canonical horizontal coordinates.
    ///
    /// The frame is the union of the current letter boxes, so applying the
    /// inverse orientation afterwards restores the original boxes.
    pub fn rotate(&mut self, orientation: Orientation) {
        let Some(frame) = BBox::merge_all(self.detail.letters.iter().map(|l| &l.bbox)) else {
            return;
        };
        let t = OrientationTransform::new(orientation, frame);
        self.detail.baseline = t.to_canonical(&self.detail.baseline);
        for letter in &mut self.detail.letters {
            letter.bbox = t.to_canonical(&letter.bbox);
        }
        self.changed();
    }

    /// Undo the orientation of canonical letters and mark the word upright.
    pub fn reset_orientation(&mut self) {
        if self.orientation != Orientation::Up {
            self.rotate(self.orientation.inverse());
        }
        self.orientation = Orientation::Up;
    }

    /// Box of the letter at `pos` as seen on the page.
    ///
    /// Letters of quarter-turned words are stored canonically and are mapped
    /// back into the word box. `UpsideDown` words are not mapped: the stored
    /// box is returned unchanged.
    pub fn real_letter_bbox(&self, pos: usize) -> Result<BBox> {
        let letter = self
            .detail
            .letters
            .get(pos)
            .ok_or_else(|| DocError::out_of_range("letter", pos, self.detail.letters.len()))?;
        Ok(match self.orientation {
            Orientation::Right | Orientation::Left => {
                OrientationTransform::new(self.orientation, self.bbox).to_visual(&letter.bbox)
            }
            Orientation::Up | Orientation::UpsideDown => letter.bbox,
        })
    }

    /// Place a word given in the local frame of `base` into page coordinates.
    ///
    /// Only the word box honours `orientation`; baseline, letters and
    /// alternatives are offset by the rounded base corner.
    pub fn relative_to(&mut self, base: &BBox, orientation: Orientation) {
        self.bbox.relative_to(base, orientation);
        self.translate_rest(to_int(base.x0) as f64, to_int(base.top) as f64);
        self.changed();
    }

    /// Shift the word, its letters, baseline and alternatives.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.bbox.translate(dx, dy);
        self.translate_rest(dx, dy);
        self.changed();
    }

    fn translate_rest(&mut self, dx: f64, dy: f64) {
        self.detail.baseline.translate(dx, dy);
        for letter in &mut self.detail.letters {
            letter.bbox.translate(dx, dy);
        }
        for alt in &mut self.alts {
            alt.translate(dx, dy);
        }
    }

    /// Deskew the word by `angle_deg` around `(center_x, center_y)`.
    ///
    /// The word box is grown by one unit and kept in positive space; the
    /// alternatives are left alone.
    pub fn transpose(&mut self, angle_deg: f64, center_x: f64, center_y: f64) {
        const EXTEND: f64 = 1.0;
        let bounds = BBox::new(
            0.0,
            0.0,
            self.bbox.x1 + 100.0 * EXTEND,
            self.bbox.bottom + 100.0 * EXTEND,
        );
        self.bbox = self
            .bbox
            .transpose(angle_deg, center_x, center_y)
            .clip_to(EXTEND, &bounds);
        self.detail.baseline = self
            .detail
            .baseline
            .transpose(angle_deg, center_x, center_y);
        for letter in &mut self.detail.letters {
            letter.bbox = letter.bbox.transpose(angle_deg, center_x, center_y);
        }
        self.changed();
    }

    /// Take over the reading of `other`, keeping the higher confidence.
    pub fn overwrite(&mut self, other: &Word) {
        self.bbox = other.bbox;
        self.text = other.text.clone();
        self.detail.letters = other.detail.letters.clone();
        self.detail.from_dict = other.detail.from_dict;
        self.detail.baseline = other.detail.baseline;
        self.orientation = other.orientation;
        self.confidence = self.confidence.max(other.confidence);
        self.changed();
    }

    /// Add an alternative reading in front of the others.
    ///
    /// Alternatives equal in text to this word are rejected. The alternative's
    /// own alternatives are dropped, so alternatives never nest.
    pub fn add_alt(&mut self, mut alt: Word) -> bool {
        if alt.text == self.text {
            return false;
        }
        alt.clear_alts();
        self.alts.insert(0, alt);
        true
    }

    pub fn remove_alt(&mut self, index: usize) -> Result<Word> {
        if index >= self.alts.len() {
            return Err(DocError::out_of_range("alternative", index, self.alts.len()));
        }
        Ok(self.alts.remove(index))
    }

    pub fn clear_alts(&mut self) {
        self.alts.clear();
    }

    /// Alternative with the highest confidence.
    pub fn best_alt(&self) -> Option<&Word> {
        self.alts
            .iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    }

    /// Exchange box, text and detail with the alternative at `index`.
    ///
    /// The confidence becomes the higher of the two.
    pub fn swap_alt(&mut self, index: usize, tag: Option<&str>) -> Result<()> {
        let alts_len = self.alts.len();
        let alt = self
            .alts
            .get_mut(index)
            .ok_or_else(|| DocError::out_of_range("alternative", index, alts_len))?;
        std::mem::swap(&mut self.bbox, &mut alt.bbox);
        std::mem::swap(&mut self.text, &mut alt.text);
        std::mem::swap(&mut self.detail, &mut alt.detail);
        alt.changed();
        self.confidence = self.confidence.max(alt.confidence);
        self.changed();
        self.mark_update_opt(tag);
        Ok(())
    }

    /// Blank the word and flag it for removal by its line.
    pub fn clear(&mut self) {
        self.id = -1;
        self.bbox = BBox::default();
        self.text.clear();
        self.clear_alts();
        self.detail = WordDetail::default();
        self.update_from_letters();
        self.arbitrary.clear();
        self.flags = WordFlags::IGNORE_WORD;
    }

    pub fn mark_update(&mut self, tag: &str) {
        self.detail.updates.push(tag.to_string());
    }

    fn mark_update_opt(&mut self, tag: Option<&str>) {
        if let Some(tag) = tag {
            self.mark_update(tag);
        }
    }

    /// Record a warning and lower the confidence by `decrease`, but only
    /// while the confidence is above 40; it never drops below zero.
    pub fn mark_warning(&mut self, tag: &str, decrease: f64) {
        const MIN_VALID_CONF: f64 = 40.0;
        self.detail.warnings.push(tag.to_string());
        if self.confidence > MIN_VALID_CONF {
            self.confidence = (self.confidence - decrease).max(0.0);
        }
    }

    /// With a tag, whether that warning was recorded; without, whether any
    /// warning exists or the word is not a normal word.
    pub fn has_warning(&self, tag: Option<&str>) -> bool {
        match tag {
            Some(tag) => self.detail.warnings.iter().any(|w| w == tag),
            None => !self.detail.warnings.is_empty() || self.kind != WordKind::Normal,
        }
    }

    pub fn has_update(&self, tag: Option<&str>) -> bool {
        match tag {
            Some(tag) => self.detail.updates.iter().any(|u| u == tag),
            None => !self.detail.updates.is_empty(),
        }
    }

    pub fn add_info(&mut self, tag: &str) {
        self.detail.info.push(tag.to_string());
    }

    pub(crate) fn alts_mut_unchecked(&mut self) -> &mut Vec<Word> {
        &mut self.alts
    }
}

fn skip_whitespace(bytes: &[u8], mut offset: usize, letter: &Letter) -> usize {
    let letter_is_space = letter.first_byte().is_ascii_whitespace();
    while offset < bytes.len() && bytes[offset].is_ascii_whitespace() && !letter_is_space {
        offset += 1;
    }
    offset
}

/// Glue for joining two words when re-flowing text across a line break.
///
/// Empty when either word is empty or the boundary looks like a hyphenation
/// or a numeric range; a single space otherwise.
pub fn word_wrap_glue(w1: &Word, w2: &Word) -> &'static str {
    if w1.is_empty(false) || w2.is_empty(false) {
        return "";
    }
    let last = match w1.letters().last() {
        Some(l) => l.first_byte(),
        None => w1.text.as_bytes().last().copied().unwrap_or(0),
    };
    let first = match w2.letters().first() {
        Some(l) => l.first_byte(),
        None => text::first_byte(&w2.text),
    };
    text::wrap_glue(last, first)
}
