use crate::geometry::BBox;
use crate::text::first_byte;

/// An alternate reading of a letter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Choice {
    pub text: String,
    pub confidence: f64,
}

/// Smallest text unit of a word: one code point cluster with its own box.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Letter {
    /// UTF-8 text, usually a single code point.
    pub text: String,
    pub confidence: f64,
    pub bbox: BBox,
    pub superscript: bool,
    pub subscript: bool,
    /// Alternate readings reported by the recognizer.
    pub choices: Vec<Choice>,
}

impl Letter {
    pub fn new(text: impl Into<String>, bbox: BBox, confidence: f64) -> Self {
        Self {
            text: text.into(),
            confidence,
            bbox,
            ..Self::default()
        }
    }

    pub fn with_choice(mut self, text: impl Into<String>, confidence: f64) -> Self {
        self.choices.push(Choice {
            text: text.into(),
            confidence,
        });
        self
    }

    /// First byte of the text, `0` for an empty letter.
    pub fn first_byte(&self) -> u8 {
        first_byte(&self.text)
    }

    /// Highest-confidence choice that differs from the current text.
    pub fn best_choice(&self) -> Option<&Choice> {
        self.choices
            .iter()
            .filter(|c| c.text != self.text)
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_letter_has_no_choices() {
        let l = Letter::new("a", BBox::new(0.0, 0.0, 5.0, 8.0), 90.0);
        assert_eq!(l.text, "a");
        assert!(l.choices.is_empty());
        assert!(!l.superscript && !l.subscript);
    }

    #[test]
    fn best_choice_skips_current_text() {
        let l = Letter::new("o", BBox::default(), 70.0)
            .with_choice("o", 99.0)
            .with_choice("0", 40.0)
            .with_choice("O", 60.0);
        assert_eq!(l.best_choice().map(|c| c.text.as_str()), Some("O"));
    }

    #[test]
    fn first_byte_of_empty_letter() {
        assert_eq!(Letter::default().first_byte(), 0);
        assert_eq!(Letter::new("é", BBox::default(), 1.0).first_byte(), 0xc3);
    }
}
