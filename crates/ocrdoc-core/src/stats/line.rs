use crate::num::to_int;
use crate::word::Word;

/// Thresholds for which words of a line take part in its statistics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineStatsOptions {
    /// Words lower than this (in rounded units) are ignored.
    pub min_valid_height: i64,
    /// Words below this confidence are ignored.
    pub min_confidence: f64,
}

impl Default for LineStatsOptions {
    fn default() -> Self {
        Self {
            min_valid_height: 6,
            min_confidence: 45.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineMeans {
    pub y_low: f64,
    pub y_upper: f64,
    pub y_upper_accent: f64,
    pub h_low: f64,
    pub h_upper: f64,
    /// Mean rounded baseline midpoint, `-1` before any computation.
    pub y_baseline: i64,
    pub w_letter_normal: f64,
    /// Mean gap between letters over words with more than one letter.
    pub inter_letter_space: f64,
    /// Mean rounded word height over all words.
    pub h_word: f64,
}

impl Default for LineMeans {
    fn default() -> Self {
        Self {
            y_low: 0.0,
            y_upper: 0.0,
            y_upper_accent: 0.0,
            h_low: 0.0,
            h_upper: 0.0,
            y_baseline: -1,
            w_letter_normal: 0.0,
            inter_letter_space: 0.0,
            h_word: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineCounts {
    pub letters: usize,
    pub words: usize,
    /// Number of font size changes along the line, counting the first font.
    pub fonts: usize,
    pub lows: usize,
    pub uppers: usize,
    pub accented_upper: usize,
    pub w_normal: usize,
}

/// Aggregate of the word statistics of one line.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineStatistics {
    pub means: LineMeans,
    pub counts: LineCounts,
    /// Neighbouring words differ enough in height and baseline to belong to
    /// different visual lines.
    pub multi_visual: bool,
}

#[derive(Default)]
struct Sum {
    total: f64,
    count: usize,
}

impl Sum {
    fn add(&mut self, value: f64) {
        self.total += value;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        if self.count > 0 {
            self.total / self.count as f64
        } else {
            0.0
        }
    }
}

impl LineStatistics {
    pub fn from_words(words: &[Word]) -> Self {
        Self::from_words_with(words, &LineStatsOptions::default())
    }

    pub fn from_words_with(words: &[Word], opts: &LineStatsOptions) -> Self {
        let mut stats = LineStatistics::default();
        let mut h_low = Sum::default();
        let mut h_upper = Sum::default();
        let mut y_low = Sum::default();
        let mut y_upper = Sum::default();
        let mut y_upper_accent = Sum::default();
        let mut w_normal = Sum::default();
        let mut y_baseline: i64 = 0;
        let mut h_word = 0.0;
        let mut font_size = 0;

        for (i, word) in words.iter().enumerate() {
            if i > 0 {
                let prev = &words[i - 1];
                let baseline_diff =
                    (prev.detail().baseline.y_mid() - word.detail().baseline.y_mid()).abs();
                let height_diff = (prev.height() - word.height()).abs() as f64;
                let smaller_h = prev.height().min(word.height()) as f64;
                stats.multi_visual |=
                    height_diff > smaller_h / 2.0 && baseline_diff > smaller_h / 2.0;
            }
            h_word += word.height() as f64;

            if word.contains_newline() || word.confidence < opts.min_confidence {
                continue;
            }
            if word.height() < opts.min_valid_height {
                continue;
            }

            if stats.counts.words == 0 || font_size != word.detail().font_size {
                font_size = word.detail().font_size;
                stats.counts.fonts += 1;
            }

            let ws = word.statistics();
            if ws.means.h_low > 0.0 {
                h_low.add(ws.means.h_low);
                if ws.means.ylt_low != 0.0 {
                    y_low.add(ws.means.ylt_low);
                }
            }
            if ws.means.h_upper > 0.0 {
                h_upper.add(ws.means.h_upper);
                if ws.means.ylt_upper != 0.0 {
                    y_upper.add(ws.means.ylt_upper);
                }
            }
            if ws.means.ylt_upper_accent > 0.0 {
                y_upper_accent.add(ws.means.ylt_upper_accent);
            }
            if ws.means.w_letter_normal > 0.0 {
                w_normal.add(ws.means.w_letter_normal);
            }
            y_baseline += to_int(word.detail().baseline.y_mid());
            stats.counts.words += 1;
            stats.counts.letters += ws.counts.letters;
        }

        let means = &mut stats.means;
        means.h_low = h_low.mean();
        means.h_upper = h_upper.mean();
        means.y_low = y_low.mean();
        means.y_upper = y_upper.mean();
        means.y_upper_accent = y_upper_accent.mean();
        means.w_letter_normal = w_normal.mean();
        means.y_baseline = if stats.counts.words > 0 {
            y_baseline / stats.counts.words as i64
        } else {
            y_baseline
        };
        if !words.is_empty() {
            means.h_word = h_word / words.len() as f64;
        }

        stats.counts.lows = h_low.count;
        stats.counts.uppers = h_upper.count;
        stats.counts.accented_upper = y_upper_accent.count;
        stats.counts.w_normal = w_normal.count;

        // x-height must stay clearly below cap height
        if stats.counts.lows > 1
            && stats.counts.uppers > 1
            && stats.means.h_low * 1.2 > stats.means.h_upper + 1.0
        {
            stats.means.h_low *= 0.9;
            stats.means.h_upper = stats.means.h_upper.max(1.3 * stats.means.h_low);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                h_low = stats.means.h_low,
                h_upper = stats.means.h_upper,
                "line heights clamped"
            );
        }

        #[cfg(feature = "tracing")]
        if stats.multi_visual {
            tracing::debug!(words = words.len(), "line spans several visual lines");
        }

        let mut spaces = Sum::default();
        for word in words.iter().filter(|w| w.letter_count() > 1) {
            spaces.add(word.statistics().means.inter_letter_space);
        }
        stats.means.inter_letter_space = spaces.mean();

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BBox;
    use crate::letter::Letter;

    /// Word of `text` with letters of height `h` (x-height letters) or `1.4 * h`
    /// (capitals and ascenders) sitting on `baseline_y`.
    fn make_word(text: &str, x: f64, baseline_y: f64, h: f64, conf: f64) -> Word {
        let letters = text
            .chars()
            .enumerate()
            .map(|(i, c)| {
                let lh = if c.is_ascii_uppercase() || "bdfhklt".contains(c) {
                    h * 1.4
                } else {
                    h
                };
                let x0 = x + i as f64 * (h * 0.7);
                Letter::new(
                    c.to_string(),
                    BBox::new(x0, baseline_y - lh, x0 + h * 0.6, baseline_y),
                    conf,
                )
            })
            .collect();
        let mut w = Word::from_letters(letters, conf);
        w.detail_mut().baseline = BBox::new(w.bbox.x0, baseline_y, w.bbox.x1, baseline_y + 1.0);
        w
    }

    #[test]
    fn empty_line_has_zero_baseline() {
        let stats = LineStatistics::from_words(&[]);
        assert_eq!(stats.means.y_baseline, 0);
        assert_eq!(stats.counts.words, 0);
        assert!(!stats.multi_visual);
        assert_eq!(LineStatistics::default().means.y_baseline, -1);
    }

    #[test]
    fn aggregates_heights_of_valid_words() {
        let words = vec![
            make_word("Ham", 0.0, 100.0, 10.0, 90.0),
            make_word("and", 40.0, 100.0, 10.0, 90.0),
        ];
        let stats = LineStatistics::from_words(&words);
        assert_eq!(stats.counts.words, 2);
        assert_eq!(stats.counts.letters, 6);
        assert_eq!(stats.counts.fonts, 1);
        assert_eq!(stats.counts.lows, 2);
        assert_eq!(stats.counts.uppers, 2);
        assert!((stats.means.h_low - 10.0).abs() < 1e-9);
        assert!((stats.means.h_upper - 14.0).abs() < 1e-9);
        assert_eq!(stats.means.y_baseline, 101);
        assert!(!stats.multi_visual);
    }

    #[test]
    fn low_confidence_and_newline_words_are_skipped() {
        let mut broken = make_word("mean", 0.0, 100.0, 10.0, 90.0);
        broken.set_text("me\nan");
        let words = vec![
            make_word("name", 0.0, 100.0, 10.0, 30.0),
            broken,
            make_word("man", 60.0, 100.0, 10.0, 90.0),
        ];
        let stats = LineStatistics::from_words(&words);
        assert_eq!(stats.counts.words, 1);
        assert_eq!(stats.counts.letters, 3);
        // every word still counts towards the word height
        assert!((stats.means.h_word - 10.0).abs() < 1e-9);
    }

    #[test]
    fn short_words_are_ignored() {
        let words = vec![make_word("am", 0.0, 100.0, 4.0, 90.0)];
        let stats = LineStatistics::from_words(&words);
        assert_eq!(stats.counts.words, 0);
        assert_eq!(stats.means.y_baseline, 0);
        assert!((stats.means.h_word - 4.0).abs() < 1e-9);
    }

    #[test]
    fn font_changes_are_counted() {
        let mut words = vec![
            make_word("man", 0.0, 100.0, 10.0, 90.0),
            make_word("man", 40.0, 100.0, 10.0, 90.0),
            make_word("man", 80.0, 100.0, 10.0, 90.0),
        ];
        words[0].detail_mut().font_size = 10;
        words[1].detail_mut().font_size = 12;
        words[2].detail_mut().font_size = 12;
        let stats = LineStatistics::from_words(&words);
        assert_eq!(stats.counts.fonts, 2);
    }

    #[test]
    fn detects_multiple_visual_lines() {
        let words = vec![
            make_word("man", 0.0, 100.0, 10.0, 90.0),
            make_word("man", 40.0, 160.0, 30.0, 90.0),
        ];
        assert!(LineStatistics::from_words(&words).multi_visual);
    }

    #[test]
    fn inter_letter_space_over_multi_letter_words() {
        let words = vec![
            make_word("man", 0.0, 100.0, 10.0, 90.0),
            make_word("a", 40.0, 100.0, 10.0, 90.0),
        ];
        let stats = LineStatistics::from_words(&words);
        let expected = words[0].statistics().means.inter_letter_space;
        assert!((stats.means.inter_letter_space - expected).abs() < 1e-9);
    }

    #[test]
    fn custom_thresholds() {
        let words = vec![make_word("am", 0.0, 100.0, 4.0, 30.0)];
        let opts = LineStatsOptions {
            min_valid_height: 1,
            min_confidence: 10.0,
        };
        assert_eq!(LineStatistics::from_words_with(&words, &opts).counts.words, 1);
    }
}
