use crate::letter::Letter;
use crate::num::to_int;
use crate::text::{
    self, ASCII_SPECIAL, CaseClass, NORMAL_WIDTH, SMALL_INTERPUNCTION, SURE_LOWER,
    SURE_UPPER_ASCENDING, SURE_UPPER_DESCENDING, TOO_NARROW,
};

/// Mean heights and tops per height class, in page units.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordMeans {
    pub ylt_low: f64,
    pub ylt_upper: f64,
    pub ylt_upper_accent: f64,
    pub h_low: f64,
    pub h_upper: f64,
    pub ylt_low_sure: f64,
    pub ylt_low_similar: f64,
    pub ylt_upper_sure: f64,
    pub ylt_upper_similar: f64,
    pub ylt_digit: f64,
    pub h_low_sure: f64,
    pub h_low_similar: f64,
    pub h_upper_sure: f64,
    pub h_upper_similar: f64,
    pub h_digit: f64,
    pub w_letter_normal: f64,
    pub inter_letter_space: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordCounts {
    pub letters: usize,
    pub ascii_but_not_az: usize,
    pub lows: usize,
    pub uppers: usize,
    pub w_normal: usize,
    pub digits: usize,
    pub lows_sure: usize,
    pub lows_similar: usize,
    pub y_lows_sure: usize,
    pub uppers_sure: usize,
    pub uppers_similar: usize,
    pub uppers_diacritic: usize,
    pub small_interpunction: usize,
}

/// Extremes over all letters but the first, and inter-letter distances.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordMinMax {
    pub min_top_without_first: f64,
    pub max_bottom_without_first: f64,
    pub min_width_without_first: f64,
    pub max_height_without_first: f64,
    pub max_dist_between_letters: f64,
    pub max_dist_between_letter_centers: f64,
}

/// Height classification of the letters of one word.
///
/// Computed in four ordered passes: sure characters, extremes, similar
/// characters (classified against the sure means), and distances.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordStatistics {
    pub means: WordMeans,
    pub counts: WordCounts,
    pub min_max: WordMinMax,
}

impl WordStatistics {
    /// Ratio between x-height and cap height.
    pub const COEFFIC_FROM_SMALL_TO_UPPER: f64 = 1.3;
    /// Ratio between x-height and an accented capital.
    pub const COEFFIC_FROM_SMALL_TO_ACCENTED_UPPER: f64 = 1.5;
    /// Ratio between cap height and an accented capital.
    pub const COEFFIC_FROM_UPPER_TO_ACCENTED_UPPER: f64 = 1.15;
    /// Absolute height tolerance when matching a similar glyph to a class.
    pub const MAX_TOLERANCE_FOR_HEIGHT: f64 = 1.5;

    pub fn from_letters(letters: &[Letter]) -> Self {
        let mut stats = WordStatistics::default();
        stats.init_sure(letters);
        stats.init_min_max(letters);
        stats.init_similar(letters);
        stats.clamp_heights();
        stats.init_distances(letters);
        stats
    }

    fn init_sure(&mut self, letters: &[Letter]) {
        let m = &mut self.means;
        let c = &mut self.counts;
        let mut upper_sure_tops = 0usize;

        for letter in letters {
            c.letters += 1;
            let Some(ch) = text::single_byte(&letter.text) else {
                continue;
            };
            let height = letter.bbox.height();
            let top = letter.bbox.top;

            if ch.is_ascii_uppercase() {
                c.uppers += 1;
            } else if ch.is_ascii_lowercase() {
                c.lows += 1;
            } else {
                c.ascii_but_not_az += 1;
            }
            if text::is_in(ch, SMALL_INTERPUNCTION) {
                c.small_interpunction += 1;
            }

            if text::is_in(ch, SURE_LOWER) {
                m.h_low_sure += height;
                c.lows_sure += 1;
                m.ylt_low_sure += top;
                c.y_lows_sure += 1;
            } else if text::is_in(ch, SURE_UPPER_ASCENDING) {
                m.h_upper_sure += height;
                c.uppers_sure += 1;
                m.ylt_upper_sure += top;
                upper_sure_tops += 1;
            } else if text::is_in(ch, SURE_UPPER_DESCENDING) {
                // tall like a capital but its top is at x-height
                m.h_upper_sure += height;
                c.uppers_sure += 1;
                m.ylt_low_sure += top;
                c.y_lows_sure += 1;
            } else if ch.is_ascii_digit() {
                m.h_digit += height;
                c.digits += 1;
                m.ylt_digit += top;
            }

            if text::is_in(ch, NORMAL_WIDTH) {
                m.w_letter_normal += letter.bbox.width();
                c.w_normal += 1;
            }
        }

        if c.lows_sure > 0 {
            m.h_low_sure /= c.lows_sure as f64;
        }
        if c.y_lows_sure > 0 {
            m.ylt_low_sure /= c.y_lows_sure as f64;
        }
        if c.uppers_sure > 0 {
            m.h_upper_sure /= c.uppers_sure as f64;
        }
        if upper_sure_tops > 0 {
            m.ylt_upper_sure /= upper_sure_tops as f64;
        }
        if c.digits > 0 {
            // a lone tiny digit is an ordinal or superscript, not digit height
            if c.digits == 1 && c.uppers_sure > 0 && m.h_digit < m.h_upper_sure / 2.0 {
                m.h_digit = 0.0;
                m.ylt_digit = 0.0;
            } else {
                m.h_digit /= c.digits as f64;
                m.ylt_digit /= c.digits as f64;
            }
        }
        if c.w_normal > 0 {
            m.w_letter_normal /= c.w_normal as f64;
        }
    }

    fn init_min_max(&mut self, letters: &[Letter]) {
        let Some((_, rest)) = letters.split_first() else {
            return;
        };
        let mut mm = WordMinMax {
            min_top_without_first: f64::MAX,
            min_width_without_first: f64::MAX,
            ..WordMinMax::default()
        };
        for letter in rest {
            let b = &letter.bbox;
            mm.min_top_without_first = mm.min_top_without_first.min(b.top);
            mm.max_bottom_without_first = mm.max_bottom_without_first.max(b.bottom);
            mm.max_height_without_first = mm.max_height_without_first.max(b.height());
            if !text::is_in(letter.first_byte(), TOO_NARROW) {
                mm.min_width_without_first = mm.min_width_without_first.min(b.width());
            }
        }
        if mm.min_top_without_first == f64::MAX {
            mm.min_top_without_first = 0.0;
        }
        if mm.min_width_without_first == f64::MAX {
            mm.min_width_without_first = 0.0;
        }
        self.min_max = mm;
    }

    fn init_similar(&mut self, letters: &[Letter]) {
        let has_low = self.means.h_low_sure != 0.0;
        let has_upper = self.means.h_upper_sure != 0.0;
        let has_digit = self.means.h_digit != 0.0;

        for letter in letters {
            match text::single_byte(&letter.text) {
                Some(ch) if !text::is_in(ch, ASCII_SPECIAL) => {
                    if let Some(class) = text::similar_case(ch) {
                        self.update_similar(letter, class, (has_low, has_upper, has_digit));
                    }
                }
                Some(_) => {}
                None => {
                    if text::is_upper_first(&letter.text) {
                        self.means.ylt_upper_accent += letter.bbox.top;
                        self.counts.uppers_diacritic += 1;
                    }
                }
            }
        }

        let m = &mut self.means;
        let c = &self.counts;
        if c.lows_similar > 0 {
            m.h_low_similar /= c.lows_similar as f64;
            m.ylt_low_similar /= c.lows_similar as f64;
        }
        if c.uppers_similar > 0 {
            m.h_upper_similar /= c.uppers_similar as f64;
            m.ylt_upper_similar /= c.uppers_similar as f64;
        }
        if c.uppers_diacritic > 0 {
            m.ylt_upper_accent /= c.uppers_diacritic as f64;
        }

        let low_cnt = c.lows_similar + c.lows_sure;
        if low_cnt > 0 {
            m.h_low = (m.h_low_similar * c.lows_similar as f64
                + m.h_low_sure * c.lows_sure as f64)
                / low_cnt as f64;
        }

        // zero means carry no information, so only non-zero ones are averaged
        let y_low_cnt = [m.ylt_low_similar, m.ylt_low_sure]
            .iter()
            .filter(|v| **v > 0.0)
            .count();
        if y_low_cnt > 0 {
            m.ylt_low = (m.ylt_low_similar + m.ylt_low_sure) / y_low_cnt as f64;
        }

        let upper_cnt = [m.h_upper_similar, m.h_upper_sure, m.h_digit]
            .iter()
            .filter(|v| **v > 0.0)
            .count();
        if upper_cnt > 0 {
            m.h_upper = (m.h_upper_similar + m.h_upper_sure + m.h_digit) / upper_cnt as f64;
            m.ylt_upper =
                (m.ylt_upper_similar + m.ylt_upper_sure + m.ylt_digit) / upper_cnt as f64;
        }
    }

    /// Classify one visually similar glyph against whichever sure classes exist.
    fn update_similar(&mut self, letter: &Letter, class: CaseClass, present: (bool, bool, bool)) {
        const RATIO: f64 = WordStatistics::COEFFIC_FROM_SMALL_TO_UPPER;
        const TOL: f64 = WordStatistics::MAX_TOLERANCE_FOR_HEIGHT;

        let h = to_int(letter.bbox.height()) as f64;
        let low = self.means.h_low_sure;
        let upper = self.means.h_upper_sure;
        let digit = self.means.h_digit;

        let (is_lower, is_upper) = match present {
            (true, false, false) => (
                (low - h).abs() < TOL,
                h > (low * RATIO + low) / 2.0,
            ),
            (false, true, false) => (
                h < (upper / RATIO + upper) / 2.0,
                (upper - h).abs() < TOL,
            ),
            (false, false, true) => (
                h < (digit / RATIO + upper) / 2.0,
                (digit - h).abs() < TOL,
            ),
            (true, true, false) => {
                let mid = (low + upper) / 2.0;
                (h < mid, h > mid)
            }
            (true, false, true) => {
                let mid = (low + digit) / 2.0;
                (h < mid, h > mid)
            }
            (false, true, true) => {
                let u = (upper + digit) / 2.0;
                (h < (u + u / RATIO) / 2.0, (u - h).abs() < TOL)
            }
            (true, true, true) => {
                let mid = (low + (upper + digit) / 2.0) / 2.0;
                (h < mid, h > mid)
            }
            (false, false, false) => (false, false),
        };

        let top = to_int(letter.bbox.top) as f64;
        match class {
            CaseClass::Lower if is_lower => {
                self.means.h_low_similar += h;
                self.means.ylt_low_similar += top;
                self.counts.lows_similar += 1;
            }
            CaseClass::Upper if is_upper => {
                self.means.h_upper_similar += h;
                self.means.ylt_upper_similar += top;
                self.counts.uppers_similar += 1;
            }
            _ => {}
        }
    }

    /// Restore the x-height/cap-height separation when it collapsed.
    fn clamp_heights(&mut self) {
        let m = &mut self.means;
        if m.h_low > 0.0 && m.h_upper > 0.0 && m.h_low * 1.2 > m.h_upper + 1.0 {
            m.h_low *= 0.9;
            m.h_upper = m.h_upper.max(Self::COEFFIC_FROM_SMALL_TO_UPPER * m.h_low);
        }
    }

    fn init_distances(&mut self, letters: &[Letter]) {
        if letters.len() < 2 {
            return;
        }
        let mut gaps = 0.0;
        for pair in letters.windows(2) {
            let (prev, cur) = (&pair[0].bbox, &pair[1].bbox);
            let gap = cur.x0 - prev.x1;
            self.min_max.max_dist_between_letters = self.min_max.max_dist_between_letters.max(gap);
            gaps += gap;
            let center = cur.x_mid() - prev.x_mid();
            self.min_max.max_dist_between_letter_centers =
                self.min_max.max_dist_between_letter_centers.max(center);
        }
        self.means.inter_letter_space = gaps / (letters.len() - 1) as f64;
    }
}
