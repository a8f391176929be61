use crate::num::is_in_range;
use crate::orientation::{Orientation, OrientationTransform};

/// Overlap of two 1-D spans as a percentage `[0, 100]` of the shorter span.
///
/// Returns `0.0` when the spans are disjoint.
pub fn span_overlap(l1: f64, r1: f64, l2: f64, r2: f64) -> f64 {
    if r1 < l2 || r2 < l1 {
        return 0.0;
    }
    let l = l1.max(l2);
    let r = r1.min(r2);
    100.0 * (r - l) / (r2 - l2).min(r1 - l1)
}

/// Bounding box with top-left origin coordinate system.
///
/// - `x0`: left edge
/// - `top`: top edge (distance from top of page)
/// - `x1`: right edge
/// - `bottom`: bottom edge (distance from top of page)
///
/// Callers are expected to keep `x0 <= x1` and `top <= bottom`; it is not
/// enforced. Width, height and midpoints are computed on read.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl BBox {
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    /// Build a box from its left/top corner and size.
    pub fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    /// Width of the bounding box.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn x_mid(&self) -> f64 {
        self.x0 + self.width() / 2.0
    }

    pub fn y_mid(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Compute the union of two bounding boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            top: self.top.min(other.top),
            x1: self.x1.max(other.x1),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Grow `self` in place to cover `other`.
    pub fn merge(&mut self, other: &BBox) {
        *self = self.union(other);
    }

    /// Union of all boxes, or `None` for an empty input.
    pub fn merge_all<'a>(boxes: impl IntoIterator<Item = &'a BBox>) -> Option<BBox> {
        boxes.into_iter().fold(None, |acc, b| match acc {
            None => Some(*b),
            Some(u) => Some(u.union(b)),
        })
    }

    /// Overlap as a percentage `[0, 100]` of the smaller area.
    ///
    /// Zero-area boxes divide by zero; callers must guard against them.
    pub fn intersects(&self, other: &BBox) -> f64 {
        self.intersects_with_margin(other, 0.0)
    }

    /// Like [`BBox::intersects`], but boxes must overlap by more than
    /// `min_pix` on both axes to count at all.
    pub fn intersects_with_margin(&self, other: &BBox, min_pix: f64) -> f64 {
        if self.top + min_pix > other.bottom || self.bottom - min_pix < other.top {
            return 0.0;
        }
        if self.x0 + min_pix > other.x1 || self.x1 - min_pix < other.x0 {
            return 0.0;
        }
        let inter_h = self.bottom.min(other.bottom) - self.top.max(other.top);
        let inter_w = self.x1.min(other.x1) - self.x0.max(other.x0);
        let min_area = self.area().min(other.area());
        100.0 * inter_w * inter_h / min_area
    }

    /// Horizontal overlap as a percentage of the narrower box.
    pub fn intersects_x(&self, other: &BBox) -> f64 {
        span_overlap(self.x0, self.x1, other.x0, other.x1)
    }

    /// Horizontal overlap in whole pixels.
    pub fn intersects_x_pixels(&self, other: &BBox) -> i64 {
        crate::num::to_int(self.intersects_x(other) / 100.0 * self.width().min(other.width()))
    }

    /// Vertical overlap as a percentage of the shorter box.
    pub fn intersects_y(&self, other: &BBox) -> f64 {
        span_overlap(self.top, self.bottom, other.top, other.bottom)
    }

    /// Strict containment with a `min_pix` margin on every side.
    pub fn contains(&self, other: &BBox, min_pix: f64) -> bool {
        self.top + min_pix < other.top
            && other.bottom < self.bottom - min_pix
            && self.x0 + min_pix < other.x0
            && other.x1 < self.x1 - min_pix
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.top <= y && y <= self.bottom && self.x0 <= x && x <= self.x1
    }

    /// Shift the box by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x0 += dx;
        self.top += dy;
        self.x1 += dx;
        self.bottom += dy;
    }

    /// Re-express a box given in the local coordinates of `base` (rotated
    /// by `orientation`) in the coordinates of `base`'s parent.
    ///
    /// - `Up`: offset by the base's top-left corner
    /// - `Right`: `top = base.top + x0`, `x0 = base.x0 + base.w - bottom`, axes swapped
    /// - `UpsideDown`: mirrored on both axes inside `base`
    /// - `Left`: `x0 = base.x0 + top`, `top = base.top + base.h - x1`, axes swapped
    pub fn relative_to(&mut self, base: &BBox, orientation: Orientation) {
        self.translate(base.x0, base.top);
        *self = OrientationTransform::new(orientation, *base).to_visual(self);
    }

    pub fn scale(&mut self, ratio: f64) {
        self.x0 *= ratio;
        self.top *= ratio;
        self.x1 *= ratio;
        self.bottom *= ratio;
    }

    /// Grow every side by `diff`; a negative `diff` shrinks the box.
    pub fn extend(&mut self, diff: f64) {
        self.x0 -= diff;
        self.top -= diff;
        self.x1 += diff;
        self.bottom += diff;
    }

    /// Clamp a negative left/top corner to zero.
    ///
    /// Returns `false` (and leaves the box untouched) when the box lies
    /// entirely in negative space.
    pub fn normalise(&mut self) -> bool {
        if self.x1 < 0.0 || self.bottom < 0.0 {
            return false;
        }
        self.x0 = self.x0.max(0.0);
        self.top = self.top.max(0.0);
        true
    }

    pub fn is_left_of(&self, other: &BBox) -> bool {
        self.x0 < other.x0
    }

    /// Rotate both corners by `angle_deg` around `(center_x, center_y)` and
    /// take the result as a new axis-aligned box.
    ///
    /// The rotated corners are re-ordered so that `x0 <= x1` and
    /// `top <= bottom` hold for any angle.
    ///
    /// Lossy: only suitable for small deskew corrections.
    pub fn transpose(&self, angle_deg: f64, center_x: f64, center_y: f64) -> BBox {
        let rad = angle_deg.to_radians();
        let (sin, cos) = rad.sin_cos();
        let rotate = |x: f64, y: f64| {
            let (xr, yr) = (x - center_x, y - center_y);
            (xr * cos - yr * sin + center_x, xr * sin + yr * cos + center_y)
        };
        let (ax, ay) = rotate(self.x0, self.top);
        let (bx, by) = rotate(self.x1, self.bottom);
        BBox::new(ax.min(bx), ay.min(by), ax.max(bx), ay.max(by))
    }

    /// Extend by `diff` and clamp to `bounds`.
    pub fn clip_to(&self, diff: f64, bounds: &BBox) -> BBox {
        self.clip_to_document(diff, diff, bounds)
    }

    /// Extend by `h_diff` horizontally and `v_diff` vertically, then clamp to `bounds`.
    pub fn clip_to_document(&self, h_diff: f64, v_diff: f64, bounds: &BBox) -> BBox {
        BBox::new(
            bounds.x0.max(self.x0 - h_diff),
            bounds.top.max(self.top - v_diff),
            bounds.x1.min(self.x1 + h_diff),
            bounds.bottom.min(self.bottom + v_diff),
        )
    }
}

/// Edge alignment of two boxes.
///
/// `Middle` is only reported when neither edge matched, so it does not
/// imply `Both`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    Left,
    Right,
    Both,
    Middle,
    None,
}

/// Classify the horizontal alignment of `a` and `b` within `range` pixels.
pub fn aligned(a: &BBox, b: &BBox, range: f64) -> Alignment {
    let left = is_in_range(a.x0, b.x0, range);
    let right = is_in_range(a.x1, b.x1, range);
    match (left, right) {
        (true, true) => Alignment::Both,
        (true, false) => Alignment::Left,
        (false, true) => Alignment::Right,
        (false, false) if is_in_range(a.x_mid(), b.x_mid(), range) => Alignment::Middle,
        _ => Alignment::None,
    }
}

/// Whether `a` and `b` describe roughly the same region.
///
/// Requires an overlap of at least `min_frac * 100` percent and width and
/// height ratios of at least `min_frac`. A non-negative `max_pix` also bounds
/// the absolute width and height differences.
pub fn similar(a: &BBox, b: &BBox, min_frac: f64, max_pix: f64) -> bool {
    if 100.0 * min_frac > a.intersects(b) {
        return false;
    }
    let w_frac = a.width().min(b.width()) / a.width().max(b.width());
    if min_frac > w_frac || (0.0 <= max_pix && max_pix < (a.width() - b.width()).abs()) {
        return false;
    }
    let h_frac = a.height().min(b.height()) / a.height().max(b.height());
    if min_frac > h_frac || (0.0 <= max_pix && max_pix < (a.height() - b.height()).abs()) {
        return false;
    }
    true
}

/// Distances between boxes.
pub mod distance {
    use super::BBox;

    pub fn euclidean(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
        ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
    }

    /// Shortest distance between the borders of `r1` and `r2`.
    ///
    /// Diagonal neighbours use the nearest corners, side neighbours the axis
    /// gap. Overlapping boxes yield `-intersects / 100`.
    pub fn euclidean_all(r1: &BBox, r2: &BBox) -> f64 {
        let r2_left = r2.x1 < r1.x0;
        let r2_right = r1.x1 < r2.x0;
        let r2_top = r2.bottom < r1.top;
        let r2_bottom = r1.bottom < r2.top;

        match (r2_left, r2_right, r2_top, r2_bottom) {
            (true, _, true, _) => euclidean(r2.x1, r2.bottom, r1.x0, r1.top),
            (true, _, _, true) => euclidean(r2.x1, r2.top, r1.x0, r1.bottom),
            (_, true, _, true) => euclidean(r1.x1, r1.bottom, r2.x0, r2.top),
            (_, true, true, _) => euclidean(r1.x1, r1.top, r2.x0, r2.bottom),
            (true, ..) => r1.x0 - r2.x1,
            (_, true, ..) => r2.x0 - r1.x1,
            (_, _, true, _) => r1.top - r2.bottom,
            (_, _, _, true) => r2.top - r1.bottom,
            _ => -r1.intersects(r2) / 100.0,
        }
    }

    /// Vertical gap between `r1` and `r2`; negative when they overlap.
    pub fn vertical(r1: &BBox, r2: &BBox) -> f64 {
        if r1.y_mid() > r2.y_mid() {
            r1.top - r2.bottom
        } else {
            r2.top - r1.bottom
        }
    }

    /// Horizontal gap between `r1` and `r2`; negative when they overlap.
    pub fn horizontal(r1: &BBox, r2: &BBox) -> f64 {
        if r1.is_left_of(r2) {
            r2.x0 - r1.x1
        } else {
            r1.x0 - r2.x1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_bbox_eq(a: BBox, b: BBox) {
        let eps = 1e-9;
        assert!(
            (a.x0 - b.x0).abs() < eps
                && (a.top - b.top).abs() < eps
                && (a.x1 - b.x1).abs() < eps
                && (a.bottom - b.bottom).abs() < eps,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn test_bbox_new() {
        let bbox = BBox::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(bbox.x0, 10.0);
        assert_eq!(bbox.top, 20.0);
        assert_eq!(bbox.x1, 30.0);
        assert_eq!(bbox.bottom, 40.0);
    }

    #[test]
    fn test_bbox_dimensions() {
        let bbox = BBox::new(10.0, 20.0, 50.0, 60.0);
        assert_eq!(bbox.width(), 40.0);
        assert_eq!(bbox.height(), 40.0);
        assert_eq!(bbox.x_mid(), 30.0);
        assert_eq!(bbox.y_mid(), 40.0);
    }

    #[test]
    fn test_bbox_union() {
        let a = BBox::new(10.0, 20.0, 30.0, 40.0);
        let b = BBox::new(5.0, 25.0, 35.0, 45.0);
        let u = a.union(&b);
        assert_eq!(u, BBox::new(5.0, 20.0, 35.0, 45.0));
    }

    #[test]
    fn test_merge_all() {
        let boxes = [BBox::new(0.0, 0.0, 1.0, 1.0), BBox::new(5.0, 5.0, 6.0, 7.0)];
        assert_eq!(BBox::merge_all(&boxes), Some(BBox::new(0.0, 0.0, 6.0, 7.0)));
        assert_eq!(BBox::merge_all(&[]), None);
    }

    #[test]
    fn test_self_intersection_is_full() {
        let b = BBox::new(3.0, 4.0, 17.0, 9.0);
        assert_eq!(b.intersects(&b), 100.0);
    }

    #[test]
    fn test_intersects_relative_to_smaller_area() {
        let big = BBox::new(0.0, 0.0, 100.0, 100.0);
        let small = BBox::new(50.0, 50.0, 150.0, 60.0);
        // overlap 50x10 = 500, small area 1000
        assert_eq!(big.intersects(&small), 50.0);
        assert_eq!(small.intersects(&big), 50.0);
    }

    #[test]
    fn test_disjoint_boxes_do_not_intersect() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(20.0, 0.0, 30.0, 10.0);
        assert_eq!(a.intersects(&b), 0.0);
        assert!(distance::euclidean_all(&a, &b) >= 0.0);
    }

    #[test]
    fn test_intersects_with_margin() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(9.0, 0.0, 19.0, 10.0);
        assert!(a.intersects(&b) > 0.0);
        assert_eq!(a.intersects_with_margin(&b, 2.0), 0.0);
    }

    #[test]
    fn test_axis_intersections() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(5.0, 8.0, 25.0, 30.0);
        assert_eq!(a.intersects_x(&b), 50.0);
        assert_eq!(a.intersects_x_pixels(&b), 5);
        assert_eq!(a.intersects_y(&b), 20.0);
    }

    #[test]
    fn test_contains() {
        let outer = BBox::new(0.0, 0.0, 100.0, 100.0);
        let inner = BBox::new(10.0, 10.0, 20.0, 20.0);
        assert!(outer.contains(&inner, 0.0));
        assert!(!outer.contains(&inner, 15.0));
        assert!(!outer.contains(&outer, 0.0));
        assert!(outer.contains_point(100.0, 0.0));
        assert!(!outer.contains_point(100.1, 0.0));
    }

    #[test]
    fn test_translate_scale_extend() {
        let mut b = BBox::new(1.0, 2.0, 3.0, 4.0);
        b.translate(10.0, 20.0);
        assert_eq!(b, BBox::new(11.0, 22.0, 13.0, 24.0));
        b.scale(2.0);
        assert_eq!(b, BBox::new(22.0, 44.0, 26.0, 48.0));
        b.extend(1.0);
        assert_eq!(b, BBox::new(21.0, 43.0, 27.0, 49.0));
    }

    #[test]
    fn test_normalise() {
        let mut b = BBox::new(-5.0, -1.0, 10.0, 10.0);
        assert!(b.normalise());
        assert_eq!(b, BBox::new(0.0, 0.0, 10.0, 10.0));
        let mut neg = BBox::new(-5.0, -5.0, -1.0, -1.0);
        assert!(!neg.normalise());
    }

    #[test]
    fn test_relative_to_up() {
        let base = BBox::new(100.0, 200.0, 140.0, 220.0);
        let mut b = BBox::new(1.0, 2.0, 5.0, 10.0);
        b.relative_to(&base, Orientation::Up);
        assert_bbox_eq(b, BBox::new(101.0, 202.0, 105.0, 210.0));
    }

    #[test]
    fn test_relative_to_right() {
        let base = BBox::new(100.0, 200.0, 140.0, 220.0);
        let mut b = BBox::new(1.0, 2.0, 5.0, 10.0);
        b.relative_to(&base, Orientation::Right);
        // top = 200 + 1; x0 = 100 + 40 - 10; w = 8, h = 4
        assert_bbox_eq(b, BBox::new(130.0, 201.0, 138.0, 205.0));
    }

    #[test]
    fn test_relative_to_upside_down() {
        let base = BBox::new(100.0, 200.0, 140.0, 220.0);
        let mut b = BBox::new(1.0, 2.0, 5.0, 10.0);
        b.relative_to(&base, Orientation::UpsideDown);
        // x0 = 100 + 40 - 5; top = 200 + 20 - 10
        assert_bbox_eq(b, BBox::new(135.0, 210.0, 139.0, 218.0));
    }

    #[test]
    fn test_relative_to_left() {
        let base = BBox::new(100.0, 200.0, 140.0, 220.0);
        let mut b = BBox::new(1.0, 2.0, 5.0, 10.0);
        b.relative_to(&base, Orientation::Left);
        // x0 = 100 + 2; top = 200 + 20 - 5; w = 8, h = 4
        assert_bbox_eq(b, BBox::new(102.0, 215.0, 110.0, 219.0));
    }

    #[test]
    fn test_transpose_quarter_turn() {
        let b = BBox::new(0.0, 0.0, 10.0, 20.0);
        let t = b.transpose(90.0, 0.0, 0.0);
        assert_bbox_eq(t, BBox::new(-20.0, 0.0, 0.0, 10.0));
    }

    #[test]
    fn test_transpose_zero_angle_is_identity() {
        let b = BBox::new(3.0, 4.0, 10.0, 20.0);
        assert_bbox_eq(b.transpose(0.0, 50.0, 50.0), b);
    }

    #[test]
    fn test_transpose_half_turn_stays_normalized() {
        let b = BBox::new(0.0, 0.0, 10.0, 20.0);
        let t = b.transpose(180.0, 5.0, 10.0);
        assert!(t.x0 <= t.x1 && t.top <= t.bottom);
        assert_bbox_eq(t, b);
    }

    #[test]
    fn test_clip_to() {
        let doc = BBox::new(0.0, 0.0, 100.0, 100.0);
        let b = BBox::new(1.0, 50.0, 99.0, 60.0);
        assert_eq!(b.clip_to(5.0, &doc), BBox::new(0.0, 45.0, 100.0, 65.0));
        assert_eq!(b.clip_to_document(0.0, 2.0, &doc), BBox::new(1.0, 48.0, 99.0, 62.0));
    }

    #[test]
    fn test_aligned() {
        let a = BBox::new(0.0, 0.0, 100.0, 10.0);
        assert_eq!(aligned(&a, &BBox::new(1.0, 20.0, 99.0, 30.0), 2.0), Alignment::Both);
        assert_eq!(aligned(&a, &BBox::new(1.0, 20.0, 50.0, 30.0), 2.0), Alignment::Left);
        assert_eq!(aligned(&a, &BBox::new(60.0, 20.0, 101.0, 30.0), 2.0), Alignment::Right);
        assert_eq!(aligned(&a, &BBox::new(40.0, 20.0, 60.0, 30.0), 2.0), Alignment::Middle);
        assert_eq!(aligned(&a, &BBox::new(70.0, 20.0, 80.0, 30.0), 2.0), Alignment::None);
    }

    #[test]
    fn test_similar() {
        let a = BBox::new(0.0, 0.0, 100.0, 50.0);
        let b = BBox::new(2.0, 1.0, 100.0, 50.0);
        assert!(similar(&a, &b, 0.9, -1.0));
        assert!(similar(&a, &b, 0.9, 2.0));
        assert!(!similar(&a, &b, 0.9, 1.0));
        let c = BBox::new(0.0, 0.0, 50.0, 50.0);
        assert!(!similar(&a, &c, 0.9, -1.0));
    }

    #[test]
    fn test_euclidean_all() {
        let a = BBox::new(10.0, 10.0, 20.0, 20.0);
        // diagonal: bottom-right of a to top-left of b
        let b = BBox::new(23.0, 24.0, 30.0, 30.0);
        assert_eq!(distance::euclidean_all(&a, &b), 5.0);
        // side neighbour
        let c = BBox::new(25.0, 12.0, 30.0, 18.0);
        assert_eq!(distance::euclidean_all(&a, &c), 5.0);
        // overlap
        let d = BBox::new(15.0, 10.0, 25.0, 20.0);
        assert_eq!(distance::euclidean_all(&a, &d), -0.5);
    }

    #[test]
    fn test_vertical_and_horizontal_distance() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(15.0, 30.0, 20.0, 40.0);
        assert_eq!(distance::vertical(&a, &b), 20.0);
        assert_eq!(distance::vertical(&b, &a), 20.0);
        assert_eq!(distance::horizontal(&a, &b), 5.0);
        assert_eq!(distance::horizontal(&b, &a), 5.0);
    }
}
