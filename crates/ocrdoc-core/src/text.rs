//! Character classes used by the height classifier and text reflow.
//!
//! Classes are byte sets over ASCII. A letter takes part in a class only when
//! its whole text is a single byte, see [`single_byte`].

/// Small punctuation that sits between lowercase and uppercase height.
pub const SMALL_INTERPUNCTION: &str = "+*";
/// Glyphs that are reliably x-height.
pub const SURE_LOWER: &str = "aemnr:+";
/// Glyphs that reliably reach cap height (caps, ascenders, some punctuation).
pub const SURE_UPPER_ASCENDING: &str = "ABDEFGHIJKLMNPRTbdfhiklt!%?";
/// Descending glyphs as tall as capitals but anchored at x-height top.
pub const SURE_UPPER_DESCENDING: &str = "pyqg";
/// Glyphs with a regular advance width.
pub const NORMAL_WIDTH: &str = "AaBbCcDdEeFfGgHhKkLMmNnOoPpQqRrSsTtUuVvXxYyZz023456789";
/// Lower/upper pairs that differ only by scale; even index lower, odd upper.
pub const LOWER_UPPER_SIMILAR: &str = "cCoOsSuUvVxXzZwW";
/// ASCII characters skipped by the similar pass.
pub const ASCII_SPECIAL: &str = "\".,;-=_~`*";
/// Characters too narrow to bound the minimal letter width.
pub const TOO_NARROW: &str = ".:;,";

/// Boundary characters after which reflowed words join without a space.
const GLUE_NO_SPACE_AFTER: &str = "-/0123456789";
/// Boundary characters before which reflowed words join without a space.
const GLUE_NO_SPACE_BEFORE: &str = "-/";

/// Height class of a visually similar glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseClass {
    Lower,
    Upper,
}

/// The byte of a single-byte letter text.
pub fn single_byte(text: &str) -> Option<u8> {
    match text.as_bytes() {
        [b] => Some(*b),
        _ => None,
    }
}

/// First byte of `text`, `0` when empty.
pub fn first_byte(text: &str) -> u8 {
    text.as_bytes().first().copied().unwrap_or(0)
}

/// Whether `byte` is one of the ASCII characters in `set`.
pub fn is_in(byte: u8, set: &str) -> bool {
    byte != 0 && set.as_bytes().contains(&byte)
}

/// Case class of a visually similar glyph, `None` for all other bytes.
pub fn similar_case(byte: u8) -> Option<CaseClass> {
    let pos = LOWER_UPPER_SIMILAR.bytes().position(|b| b == byte)?;
    Some(if pos % 2 == 1 {
        CaseClass::Upper
    } else {
        CaseClass::Lower
    })
}

/// Whether the first code point is unchanged by uppercasing.
///
/// Caseless characters count as uppercase.
pub fn is_upper_first(text: &str) -> bool {
    match text.chars().next() {
        Some(c) => {
            let mut upper = c.to_uppercase();
            upper.next() == Some(c) && upper.next().is_none()
        }
        None => false,
    }
}

/// Glue for joining two reflowed words given the boundary characters.
///
/// No space after a hyphen, slash or digit, and none before a hyphen or
/// slash; a single space otherwise.
pub fn wrap_glue(last: u8, first: u8) -> &'static str {
    if is_in(last, GLUE_NO_SPACE_AFTER) || is_in(first, GLUE_NO_SPACE_BEFORE) {
        ""
    } else {
        " "
    }
}
