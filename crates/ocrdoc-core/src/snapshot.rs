//! Tree snapshots of documents as `serde_json::Value`.
//!
//! Every entity has a `to_json(detail)` and a `from_json(&Value)` pair.
//! Output rounds confidences to two decimals and boxes to whole pixels.
//! Loading is lenient: missing fields take the entity defaults (`-1` for ids,
//! confidences, font size, scale and rotation; `0` for orientation) and only
//! a top-level value of the wrong shape is an error.

use serde_json::{Map, Value, json};

use crate::document::Document;
use crate::error::{DocError, Result};
use crate::geometry::BBox;
use crate::letter::{Choice, Letter};
use crate::line::Line;
use crate::num::{round2, to_int};
use crate::orientation::Orientation;
use crate::page::{Page, VisualElement};
use crate::word::{ExpectedWord, Word, WordDetail, WordFlags, WordKind};

/// Letter choices written per letter.
const MAX_CHOICES: usize = 3;

/// How much of the model a snapshot carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutputDetail {
    /// Ids, boxes, text and confidences.
    Basic,
    /// Adds flags, letters, baselines, alternatives and side info.
    #[default]
    Normal,
    /// Adds font and style attributes.
    Full,
}

pub fn bbox_to_json(bbox: &BBox) -> Value {
    json!({
        "x": to_int(bbox.x0),
        "y": to_int(bbox.top),
        "w": to_int(bbox.width()),
        "h": to_int(bbox.height()),
    })
}

/// Box from `{x,y,w,h}`; missing members count as zero.
pub fn bbox_from_json(value: &Value) -> BBox {
    BBox::from_xywh(
        f64_or(value, "x", 0.0),
        f64_or(value, "y", 0.0),
        f64_or(value, "w", 0.0),
        f64_or(value, "h", 0.0),
    )
}

fn f64_or(value: &Value, key: &str, default: f64) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(default)
}

fn i64_or(value: &Value, key: &str, default: i64) -> i64 {
    value
        .get(key)
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(to_int)))
        .unwrap_or(default)
}

fn bool_or_false(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn str_or_empty(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn object_or_empty(value: &Value, key: &str) -> Map<String, Value> {
    value
        .get(key)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

fn strings(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn items<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn bboxes_to_json(bboxes: &[BBox]) -> Value {
    Value::Array(bboxes.iter().map(bbox_to_json).collect())
}

fn expect_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| DocError::Format(format!("{what} snapshot must be a JSON object")))
}

impl Letter {
    pub fn to_json(&self, detail: OutputDetail) -> Value {
        let choices: Vec<Value> = self
            .choices
            .iter()
            .filter(|c| c.text != self.text)
            .take(MAX_CHOICES)
            .map(|c| json!([c.text, round2(c.confidence)]))
            .collect();
        let mut out = json!({
            "text": self.text,
            "confidence": round2(self.confidence),
            "bbox": bbox_to_json(&self.bbox),
            "choices": choices,
        });
        if detail == OutputDetail::Full {
            out["sup"] = Value::Bool(self.superscript);
            out["sub"] = Value::Bool(self.subscript);
        }
        out
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        expect_object(value, "letter")?;
        let choices = items(value, "choices")
            .iter()
            .filter_map(|pair| {
                let text = pair.get(0)?.as_str()?;
                let confidence = pair.get(1).and_then(Value::as_f64).unwrap_or(-1.0);
                Some(Choice {
                    text: text.to_string(),
                    confidence,
                })
            })
            .collect();
        Ok(Letter {
            text: str_or_empty(value, "text"),
            confidence: f64_or(value, "confidence", -1.0),
            bbox: value.get("bbox").map(bbox_from_json).unwrap_or_default(),
            superscript: bool_or_false(value, "sup"),
            subscript: bool_or_false(value, "sub"),
            choices,
        })
    }
}

fn detail_to_json(word: &Word, detail: OutputDetail) -> Value {
    let d = word.detail();
    let mut out = Map::new();
    if detail == OutputDetail::Full {
        out.insert("font".into(), Value::from(d.font.as_str()));
        out.insert("font_size".into(), Value::from(d.font_size));
        out.insert("bold".into(), Value::from(d.bold));
        out.insert("italics".into(), Value::from(d.italics));
        out.insert("monospace".into(), Value::from(d.monospace));
        out.insert("serif".into(), Value::from(d.serif));
        out.insert("numeric".into(), Value::from(d.numeric));
        out.insert("underline".into(), Value::from(d.underline));
        out.insert("small".into(), Value::from(d.small_caps));
    }
    out.insert("from_dict".into(), Value::from(d.from_dict));
    out.insert("baseline".into(), bbox_to_json(&d.baseline));
    out.insert(
        "letters".into(),
        Value::Array(d.letters.iter().map(|l| l.to_json(detail)).collect()),
    );
    out.insert("expected".into(), Value::from(word.expected.as_str()));
    if word.kind != WordKind::Normal {
        out.insert("type".into(), Value::from(word.kind.as_str()));
    }
    if !d.ccs.is_empty() {
        out.insert("ccs".into(), bboxes_to_json(&d.ccs));
    }
    for (key, tags) in [
        ("updates", &d.updates),
        ("warnings", &d.warnings),
        ("info", &d.info),
    ] {
        if !tags.is_empty() {
            out.insert(key.into(), json!(tags));
        }
    }
    Value::Object(out)
}

fn detail_from_json(value: &Value, word: &mut Word) -> Result<()> {
    let letters = items(value, "letters")
        .iter()
        .map(Letter::from_json)
        .collect::<Result<Vec<_>>>()?;
    word.expected = ExpectedWord::parse(&str_or_empty(value, "expected")).unwrap_or_default();
    let kind = str_or_empty(value, "type");
    word.kind = WordKind::parse(&kind).unwrap_or_else(|| {
        #[cfg(feature = "tracing")]
        tracing::debug!(id = word.id, kind = %kind, "unknown word type, using normal");
        WordKind::Normal
    });
    *word.detail_mut() = WordDetail {
        font_size: i64_or(value, "font_size", -1) as i32,
        bold: bool_or_false(value, "bold"),
        italics: bool_or_false(value, "italics"),
        monospace: bool_or_false(value, "monospace"),
        serif: bool_or_false(value, "serif"),
        underline: bool_or_false(value, "underline"),
        numeric: bool_or_false(value, "numeric"),
        from_dict: bool_or_false(value, "from_dict"),
        small_caps: bool_or_false(value, "small"),
        font: str_or_empty(value, "font"),
        baseline: value.get("baseline").map(bbox_from_json).unwrap_or_default(),
        letters,
        ccs: items(value, "ccs").iter().map(bbox_from_json).collect(),
        info: strings(value, "info"),
        updates: strings(value, "updates"),
        warnings: strings(value, "warnings"),
    };
    Ok(())
}

impl Word {
    pub fn to_json(&self, detail: OutputDetail) -> Value {
        let mut out = json!({
            "id": self.id,
            "bbox": bbox_to_json(&self.bbox),
            "text": self.text(),
            "confidence": round2(self.confidence),
        });
        if detail == OutputDetail::Basic {
            return out;
        }
        out["orientation"] = Value::from(self.orientation.index());
        out["flags"] = Value::from(self.flags.bits());
        if let Some(parent) = self.derived_from {
            out["derived_from"] = Value::from(parent);
        }
        out["detail"] = detail_to_json(self, detail);
        if !self.alts().is_empty() {
            out["alts"] = Value::Array(self.alts().iter().map(|a| a.to_json(detail)).collect());
        }
        if !self.arbitrary.is_empty() {
            out["arbitrary"] = json!(self.arbitrary);
        }
        out
    }

    /// Load a word; a single `original` word is accepted in place of `alts`.
    pub fn from_json(value: &Value) -> Result<Self> {
        expect_object(value, "word")?;
        let mut word = Word::new(
            str_or_empty(value, "text"),
            value.get("bbox").map(bbox_from_json).unwrap_or_default(),
            f64_or(value, "confidence", -1.0),
        );
        word.id = i64_or(value, "id", -1);
        #[cfg(feature = "tracing")]
        if value.get("confidence").is_none() {
            tracing::debug!(id = word.id, "word confidence missing, using -1");
        }
        word.orientation = Orientation::from_index(i64_or(value, "orientation", 0))?;
        word.flags = WordFlags::from_bits(i64_or(value, "flags", 0) as u32);
        word.derived_from = value.get("derived_from").and_then(Value::as_i64);
        if let Some(detail) = value.get("detail") {
            detail_from_json(detail, &mut word)?;
        }

        let alts = match value.get("original") {
            Some(original) => vec![Word::from_json(original)?],
            None => items(value, "alts")
                .iter()
                .map(Word::from_json)
                .collect::<Result<Vec<_>>>()?,
        };
        for mut alt in alts {
            alt.clear_alts();
            word.alts_mut_unchecked().push(alt);
        }

        if let Some(arbitrary) = value.get("arbitrary").and_then(Value::as_object) {
            for (key, v) in arbitrary {
                let v = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                word.arbitrary.insert(key.clone(), v);
            }
        }
        Ok(word)
    }
}

impl Line {
    pub fn to_json(&self, detail: OutputDetail) -> Value {
        if self.is_empty() {
            return json!({});
        }
        json!({
            "bbox": bbox_to_json(&self.bbox()),
            "words": self.words().iter().map(|w| w.to_json(detail)).collect::<Vec<_>>(),
        })
    }

    /// The stored box is ignored; it always follows the words.
    pub fn from_json(value: &Value) -> Result<Self> {
        expect_object(value, "line")?;
        let words = items(value, "words")
            .iter()
            .map(Word::from_json)
            .collect::<Result<Vec<_>>>()?;
        Ok(Line::from_words(words))
    }
}

impl Page {
    pub fn to_json(&self, detail: OutputDetail) -> Value {
        let ia: Map<String, Value> = self
            .visual_elements
            .iter()
            .map(|e| (e.key().to_string(), bboxes_to_json(e.bboxes())))
            .collect();
        json!({
            "bbox": bbox_to_json(&self.bbox),
            "image_clip_bbox": bbox_to_json(&self.image_clip_bbox),
            "info": self.info,
            "text": self.text,
            "image": self.images,
            "layout": self.layout,
            "confidence": round2(self.confidence),
            "scale": self.scale,
            "deskew": self.deskew,
            "rotation": self.rotation,
            "ia": ia,
            "lines": self.lines().iter().map(|l| l.to_json(detail)).collect::<Vec<_>>(),
        })
    }

    /// Load a page; `skew` is read when `deskew` is absent.
    ///
    /// Visual element sets that are empty or hold no boxes are skipped.
    pub fn from_json(value: &Value) -> Result<Self> {
        expect_object(value, "page")?;
        let mut page = Page::new();
        page.bbox = value.get("bbox").map(bbox_from_json).unwrap_or_default();
        page.image_clip_bbox = value
            .get("image_clip_bbox")
            .map(bbox_from_json)
            .unwrap_or(page.bbox);
        page.info = object_or_empty(value, "info");
        page.images = object_or_empty(value, "image");
        page.layout = object_or_empty(value, "layout");
        page.text = str_or_empty(value, "text");
        page.confidence = f64_or(value, "confidence", -1.0);
        page.scale = f64_or(value, "scale", -1.0);
        page.deskew = value
            .get("deskew")
            .or_else(|| value.get("skew"))
            .and_then(Value::as_f64)
            .unwrap_or(-1.0);
        page.rotation = i64_or(value, "rotation", -1);

        if let Some(ia) = value.get("ia").and_then(Value::as_object) {
            for (key, boxes) in ia {
                let Some(boxes) = boxes.as_array() else {
                    continue;
                };
                if boxes.first().is_none_or(|b| b.get("w").is_none()) {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(key = %key, "skipping visual element without boxes");
                    continue;
                }
                page.visual_elements.add(VisualElement::boxes(
                    key.as_str(),
                    boxes.iter().map(bbox_from_json).collect(),
                ));
            }
        }

        let lines = items(value, "lines")
            .iter()
            .map(Line::from_json)
            .collect::<Result<Vec<_>>>()?;
        *page.lines_mut() = lines;
        Ok(page)
    }
}

impl Document {
    pub fn to_json(&self, detail: OutputDetail) -> Value {
        json!({
            "time_start": self.time_start,
            "time_end": self.time_end,
            "time_cpu": self.time_cpu,
            "exceptions": self.exceptions,
            "warnings": self.warnings,
            "info": self.info,
            "pages": self.pages().iter().map(|p| p.to_json(detail)).collect::<Vec<_>>(),
        })
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        expect_object(value, "document")?;
        let pages = items(value, "pages")
            .iter()
            .map(Page::from_json)
            .collect::<Result<Vec<_>>>()?;
        let mut doc = Document::new();
        doc.info = object_or_empty(value, "info");
        doc.warnings = strings(value, "warnings");
        doc.exceptions = strings(value, "exceptions");
        doc.time_start = str_or_empty(value, "time_start");
        doc.time_end = str_or_empty(value, "time_end");
        doc.time_cpu = str_or_empty(value, "time_cpu");
        doc.set_pages(pages);
        Ok(doc)
    }
}
