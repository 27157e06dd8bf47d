//! Integer vectors and inclusive bounding boxes.

use core::ops::{Add, AddAssign, Mul, Neg, Sub};

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

/// Screen axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
}

/// 2D integer vector, used both for positions and velocities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn axis(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut i32 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    pub const fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        Point::new(v.x, v.y)
    }
}

/// Axis-aligned box with inclusive corners.
///
/// Every constructor normalizes its corners, so `top_left <= bot_right` holds
/// on both axes for any `Region` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Region {
    pub top_left: Vec2,
    pub bot_right: Vec2,
}

impl Region {
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            top_left: a.min(b),
            bot_right: a.max(b),
        }
    }

    /// Box spanning `center - half .. center + half`. Negative extents are
    /// taken by magnitude.
    pub fn centered(center: Vec2, half: Vec2) -> Self {
        let half = half.abs();
        Self {
            top_left: center - half,
            bot_right: center + half,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.top_left.x
            && p.x <= self.bot_right.x
            && p.y >= self.top_left.y
            && p.y <= self.bot_right.y
    }

    pub fn width(&self) -> u32 {
        (self.bot_right.x - self.top_left.x) as u32 + 1
    }

    pub fn height(&self) -> u32 {
        (self.bot_right.y - self.top_left.y) as u32 + 1
    }

    /// Smallest region covering both.
    pub fn union(&self, other: &Region) -> Region {
        Region {
            top_left: self.top_left.min(other.top_left),
            bot_right: self.bot_right.max(other.bot_right),
        }
    }

    pub fn intersection(&self, other: &Region) -> Option<Region> {
        let top_left = self.top_left.max(other.top_left);
        let bot_right = self.bot_right.min(other.bot_right);
        (top_left.x <= bot_right.x && top_left.y <= bot_right.y)
            .then_some(Region { top_left, bot_right })
    }

    /// Shrinks every side by `amount`; `None` once nothing is left.
    pub fn inset(&self, amount: i32) -> Option<Region> {
        let d = Vec2::new(amount, amount);
        let top_left = self.top_left + d;
        let bot_right = self.bot_right - d;
        (top_left.x <= bot_right.x && top_left.y <= bot_right.y)
            .then_some(Region { top_left, bot_right })
    }

    pub fn to_rectangle(&self) -> Rectangle {
        Rectangle::new(self.top_left.into(), Size::new(self.width(), self.height()))
    }

    /// `None` for zero-sized rectangles, which have no inclusive corners.
    pub fn from_rectangle(rect: &Rectangle) -> Option<Region> {
        let bot_right = rect.bottom_right()?;
        Some(Region {
            top_left: rect.top_left.into(),
            bot_right: bot_right.into(),
        })
    }
}
