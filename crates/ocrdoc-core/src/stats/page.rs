use crate::line::Line;
use crate::num::rank;

/// Tuning of the page aggregates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageStatsOptions {
    /// Share of line heights trimmed before averaging, half from each end.
    pub line_height_trim: f64,
}

impl Default for PageStatsOptions {
    fn default() -> Self {
        Self {
            line_height_trim: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageMeans {
    /// Trimmed mean of line box heights.
    pub h_line: f64,
    pub h_word: f64,
    /// Word width per letter.
    pub w_letter: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageCounts {
    pub words: usize,
    pub from_dict: usize,
    pub lines: usize,
    /// Letter count; a letter may hold more than one character.
    pub chars: usize,
}

/// Confidences reported by the recognizer, kept across recomputation.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageConfidences {
    /// Working confidence, updated by later processing.
    pub current: f64,
    /// Recognizer confidence including the rotation boost.
    pub ocr: f64,
    /// Sum of word confidences.
    pub total_sum: f64,
    /// Boost from dictionary words.
    pub boost: f64,
}

/// Page-wide aggregate over lines and words.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageStatistics {
    pub means: PageMeans,
    pub counts: PageCounts,
    pub confs: PageConfidences,
    pub found_correct_rotation: bool,
}

impl PageStatistics {
    pub fn from_lines(lines: &[Line]) -> Self {
        let mut stats = Self::default();
        stats.refresh(lines);
        stats
    }

    /// Recompute counts and means; confidences are left untouched.
    pub fn refresh(&mut self, lines: &[Line]) {
        self.refresh_with(lines, &PageStatsOptions::default());
    }

    pub fn refresh_with(&mut self, lines: &[Line], opts: &PageStatsOptions) {
        self.counts = PageCounts::default();
        self.means = PageMeans::default();

        let mut heights = Vec::with_capacity(lines.len());
        for line in lines {
            self.counts.lines += 1;
            heights.push(line.bbox().height());
            for word in line.words() {
                self.counts.words += 1;
                self.means.h_word += word.height() as f64;
                self.means.w_letter += word.width() as f64;
                self.counts.chars += word.letter_count();
                if word.detail().from_dict {
                    self.counts.from_dict += 1;
                }
            }
        }

        if self.counts.lines > 0 {
            self.means.h_line = rank(&heights, opts.line_height_trim);
        }
        if self.counts.words > 0 {
            self.means.h_word /= self.counts.words as f64;
        }
        if self.counts.chars > 0 {
            self.means.w_letter /= self.counts.chars as f64;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            lines = self.counts.lines,
            words = self.counts.words,
            h_line = self.means.h_line,
            "page statistics refreshed"
        );
    }

    /// Mean word confidence truncated to an integer, `0` without words.
    pub fn mean_confidence(&self) -> i64 {
        if self.counts.words > 0 {
            (self.confs.total_sum / self.counts.words as f64) as i64
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BBox;
    use crate::letter::Letter;
    use crate::word::Word;

    fn make_word(x0: f64, top: f64, letters: usize, h: f64) -> Word {
        let letters = (0..letters)
            .map(|i| {
                let lx = x0 + i as f64 * 10.0;
                Letter::new("a", BBox::new(lx, top, lx + 10.0, top + h), 90.0)
            })
            .collect();
        Word::from_letters(letters, 90.0)
    }

    fn make_line(top: f64, h: f64) -> Line {
        let mut line = Line::new();
        line.add(make_word(0.0, top, 3, h));
        line.add(make_word(40.0, top, 2, h));
        line
    }

    #[test]
    fn empty_page() {
        let stats = PageStatistics::from_lines(&[]);
        assert_eq!(stats, PageStatistics::default());
        assert_eq!(stats.mean_confidence(), 0);
    }

    #[test]
    fn counts_and_means() {
        let mut lines = vec![make_line(0.0, 10.0), make_line(20.0, 20.0)];
        lines[0].word_mut(0).unwrap().detail_mut().from_dict = true;
        let stats = PageStatistics::from_lines(&lines);
        assert_eq!(stats.counts.lines, 2);
        assert_eq!(stats.counts.words, 4);
        assert_eq!(stats.counts.chars, 10);
        assert_eq!(stats.counts.from_dict, 1);
        assert_eq!(stats.means.h_line, 15.0);
        assert_eq!(stats.means.h_word, 15.0);
        // 2 * (30 + 20) width over 10 letters
        assert_eq!(stats.means.w_letter, 10.0);
    }

    #[test]
    fn refresh_keeps_confidences() {
        let lines = vec![make_line(0.0, 10.0)];
        let mut stats = PageStatistics::default();
        stats.confs.total_sum = 181.0;
        stats.confs.ocr = 77.0;
        stats.found_correct_rotation = true;
        stats.refresh(&lines);
        assert_eq!(stats.counts.words, 2);
        assert_eq!(stats.confs.ocr, 77.0);
        assert!(stats.found_correct_rotation);
        assert_eq!(stats.mean_confidence(), 90);
    }

    #[test]
    fn line_height_is_trimmed() {
        let mut lines: Vec<Line> = (0..19).map(|i| make_line(i as f64 * 30.0, 10.0)).collect();
        lines.push(make_line(700.0, 100.0));
        let stats = PageStatistics::from_lines(&lines);
        // 15% of 20 lines drops the tallest and one of the shortest
        assert_eq!(stats.means.h_line, 10.0);
    }
}
