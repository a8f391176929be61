//! Word orientation and the quarter-turn mapping between visual and
//! canonical (horizontal) coordinates.

use crate::error::{DocError, Result};
use crate::geometry::BBox;

/// Rotation of a word's visual presentation relative to horizontal storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// 0°.
    #[default]
    Up,
    /// 90°, text runs top to bottom.
    Right,
    /// 180°.
    UpsideDown,
    /// 270°, text runs bottom to top.
    Left,
}

impl Orientation {
    pub fn from_index(index: i64) -> Result<Self> {
        match index {
            0 => Ok(Orientation::Up),
            1 => Ok(Orientation::Right),
            2 => Ok(Orientation::UpsideDown),
            3 => Ok(Orientation::Left),
            other => Err(DocError::InvalidOrientation(other)),
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Orientation::Up => 0,
            Orientation::Right => 1,
            Orientation::UpsideDown => 2,
            Orientation::Left => 3,
        }
    }

    /// Orientation that undoes `self`.
    pub fn inverse(self) -> Self {
        match self {
            Orientation::Right => Orientation::Left,
            Orientation::Left => Orientation::Right,
            other => other,
        }
    }

    /// Whether width and height trade places.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Orientation::Right | Orientation::Left)
    }
}

/// Quarter-turn map between a rotated frame and its canonical counterpart.
///
/// The visual frame is `frame`. The canonical frame shares its top-left
/// corner and has width and height swapped for `Right`/`Left`.
/// [`to_canonical`](Self::to_canonical) and [`to_visual`](Self::to_visual)
/// are exact inverses of each other for every orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationTransform {
    orientation: Orientation,
    frame: BBox,
}

impl OrientationTransform {
    pub fn new(orientation: Orientation, frame: BBox) -> Self {
        Self { orientation, frame }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn frame(&self) -> BBox {
        self.frame
    }

    /// Frame occupied by canonical boxes.
    pub fn canonical_frame(&self) -> BBox {
        let f = &self.frame;
        if self.orientation.swaps_axes() {
            BBox::from_xywh(f.x0, f.top, f.height(), f.width())
        } else {
            *f
        }
    }

    /// Map a box seen in the visual frame to canonical coordinates.
    pub fn to_canonical(&self, b: &BBox) -> BBox {
        let f = &self.frame;
        match self.orientation {
            Orientation::Up => *b,
            Orientation::Right => BBox::from_xywh(
                f.x0 + (b.top - f.top),
                f.top + (f.x1 - b.x1),
                b.height(),
                b.width(),
            ),
            Orientation::UpsideDown => BBox::from_xywh(
                f.x0 + (f.x1 - b.x1),
                f.top + (f.bottom - b.bottom),
                b.width(),
                b.height(),
            ),
            Orientation::Left => BBox::from_xywh(
                f.x0 + (f.bottom - b.bottom),
                f.top + (b.x0 - f.x0),
                b.height(),
                b.width(),
            ),
        }
    }

    /// Map a canonical box back into the visual frame.
    pub fn to_visual(&self, b: &BBox) -> BBox {
        OrientationTransform::new(self.orientation.inverse(), self.canonical_frame())
            .to_canonical(b)
    }
}
