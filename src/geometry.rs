//! Geometry value types for the drag engine.
//!
//! All coordinates are in a fixed client-space frame captured at measurement
//! time. `Position` doubles as an absolute point and a relative delta;
//! arithmetic is component-wise. `Axis` selects which component of a
//! `Position` is the "main axis" (the direction a list reorders in) versus
//! the "cross axis" (the direction of moving between parallel lists).

use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

/// A 2D offset or absolute point in client space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ZERO: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns true if both components are exactly zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Position {
    type Output = Position;

    fn neg(self) -> Position {
        Position::new(-self.x, -self.y)
    }
}

/// The direction a droppable reorders its draggables in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    /// The main-axis component of a position (y for vertical lists).
    #[inline]
    pub fn main(&self, p: Position) -> f32 {
        match self {
            Axis::Vertical => p.y,
            Axis::Horizontal => p.x,
        }
    }

    /// The cross-axis component of a position (x for vertical lists).
    #[inline]
    pub fn cross(&self, p: Position) -> f32 {
        match self {
            Axis::Vertical => p.x,
            Axis::Horizontal => p.y,
        }
    }
}

/// An axis-aligned rectangle in client space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_point_size(position: Position, width: f32, height: f32) -> Self {
        Self {
            left: position.x,
            top: position.y,
            right: position.x + width,
            bottom: position.y + height,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Position {
        Position::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    #[inline]
    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// Translate the whole rectangle by a delta.
    pub fn shift(&self, by: Position) -> Rect {
        Rect::new(
            self.left + by.x,
            self.top + by.y,
            self.right + by.x,
            self.bottom + by.y,
        )
    }

    /// Midpoint along the given main axis.
    #[inline]
    pub fn main_center(&self, axis: Axis) -> f32 {
        axis.main(self.center())
    }

    /// Midpoint along the cross axis of the given main axis.
    #[inline]
    pub fn cross_center(&self, axis: Axis) -> f32 {
        axis.cross(self.center())
    }
}
