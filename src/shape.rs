//! Shape descriptors: bounding box and per-pixel hit test.
//!
//! Shapes carry no position. A layer places one at a center point, and the
//! renderer asks it whether a given pixel belongs to it.

use crate::geometry::{Region, Vec2};

/// Frame thickness of an outline unless one is given explicitly.
pub const DEFAULT_OUTLINE_BORDER: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shape {
    /// Filled rectangle spanning `center +/- half_size`.
    Rect { half_size: Vec2 },
    /// Filled disc.
    Circle { radius: i32 },
    /// Frame of width `border` drawn just inside `center +/- half_size`.
    RectOutline { half_size: Vec2, border: i32 },
}

impl Shape {
    pub const fn rect(half_w: i32, half_h: i32) -> Self {
        Shape::Rect {
            half_size: Vec2::new(half_w, half_h),
        }
    }

    pub const fn circle(radius: i32) -> Self {
        Shape::Circle { radius }
    }

    pub const fn rect_outline(half_w: i32, half_h: i32) -> Self {
        Shape::RectOutline {
            half_size: Vec2::new(half_w, half_h),
            border: DEFAULT_OUTLINE_BORDER,
        }
    }

    /// Bounding box of the shape centered on `origin`.
    pub fn bounds(&self, origin: Vec2) -> Region {
        match *self {
            Shape::Rect { half_size } | Shape::RectOutline { half_size, .. } => {
                Region::centered(origin, half_size)
            }
            Shape::Circle { radius } => Region::centered(origin, Vec2::new(radius, radius)),
        }
    }

    /// Whether `point` is part of the shape's painted area when centered on
    /// `origin`.
    pub fn contains(&self, origin: Vec2, point: Vec2) -> bool {
        match *self {
            Shape::Rect { half_size } => {
                let d = (point - origin).abs();
                let half = half_size.abs();
                d.x <= half.x && d.y <= half.y
            }
            Shape::Circle { radius } => {
                let dx = i64::from(point.x) - i64::from(origin.x);
                let dy = i64::from(point.y) - i64::from(origin.y);
                let r = i64::from(radius);
                dx * dx + dy * dy <= r * r
            }
            Shape::RectOutline { half_size, border } => {
                let outer = Region::centered(origin, half_size);
                if !outer.contains(point) {
                    return false;
                }
                match outer.inset(border.max(1)) {
                    Some(inner) => !inner.contains(point),
                    // Frame thicker than the box: solid.
                    None => true,
                }
            }
        }
    }
}
