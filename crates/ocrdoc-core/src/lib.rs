//! ocrdoc-core: In-memory model of recognized documents.
//!
//! This crate provides the document hierarchy produced by an OCR engine
//! (Letter, Word, Line, Page, Document), the geometry kernel the model is
//! built on, cached letter-height statistics, spatial lookups and a JSON
//! snapshot codec.
//!
//! # Architecture
//!
//! - **geometry**, **orientation**, **num**, **text**: leaf helpers with no model knowledge
//! - **letter**, **word**, **line**, **page**, **document**: the owned hierarchy
//! - **stats**: statistics derived from the hierarchy and cached on each entity
//! - **query**: `words_at` and the `Words2d` grid
//! - **snapshot**: `to_json` / `from_json` for every entity
//!
//! # Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` on plain value types
//! - `tracing`: emit `debug` events from statistics, assembly and loading

pub mod document;
pub mod error;
pub mod geometry;
pub mod letter;
pub mod line;
pub mod num;
pub mod orientation;
pub mod page;
pub mod query;
pub mod snapshot;
pub mod stats;
pub mod text;
pub mod word;

pub use document::{Document, ERASE_MIN_OVERLAP, WORDS_REMOVE_MIN_OVERLAP};
pub use error::{DocError, Result};
pub use geometry::{Alignment, BBox};
pub use letter::{Choice, Letter};
pub use line::Line;
pub use orientation::{Orientation, OrientationTransform};
pub use page::{IMAGES_KEY, Page, VisualElement, VisualElements};
pub use query::{GridOptions, QueryOptions, WordHit, Words2d, words_at, words_at_with};
pub use snapshot::{OutputDetail, bbox_from_json, bbox_to_json};
pub use stats::{
    LineStatistics, LineStatsOptions, PageStatistics, PageStatsOptions, WordStatistics,
};
pub use word::{
    ExpectedWord, IdGenerator, Word, WordDetail, WordFlags, WordKind, word_wrap_glue,
};
