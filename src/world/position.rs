use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Pixel edge length of one grid cell.
pub const TILE_SIZE: f32 = 64.0;

/// Grid cell inside a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TilePosition {
    pub x: i32,
    pub y: i32,
}

/// Pixel-space vector used for sprite positions, velocities and accelerations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Up,
    Right,
    #[default]
    Down,
    Left,
}

impl TilePosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Top-left pixel corner of this tile.
    pub fn to_pixels(self) -> Vec2 {
        Vec2::new(self.x as f32 * TILE_SIZE, self.y as f32 * TILE_SIZE)
    }

    /// Whether `other` lies within `radius` tiles of this one on both axes.
    pub fn within(self, other: TilePosition, radius: u32) -> bool {
        self.x.abs_diff(other.x) <= radius && self.y.abs_diff(other.y) <= radius
    }
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Facing {
    /// Offset, in tiles, from an actor's position to the point items leave its hands.
    pub fn hand_offset(self) -> Vec2 {
        match self {
            Facing::Up => Vec2::new(0.0, -1.5),
            Facing::Right => Vec2::new(0.5, -1.0),
            Facing::Left => Vec2::new(-0.5, -1.0),
            Facing::Down => Vec2::new(0.0, -1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_to_pixels_scales_by_tile_size() {
        let tile = TilePosition::new(3, -2);
        assert_eq!(tile.to_pixels(), Vec2::new(192.0, -128.0));
    }

    #[test]
    fn within_uses_both_axes() {
        let origin = TilePosition::new(10, 10);
        assert!(origin.within(TilePosition::new(15, 5), 5));
        assert!(!origin.within(TilePosition::new(16, 10), 5));
        assert!(!origin.within(TilePosition::new(10, 4), 5));
        assert!(origin.within(origin, 0));
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn facing_up_reaches_higher_than_down() {
        assert!(Facing::Up.hand_offset().y < Facing::Down.hand_offset().y);
        assert_eq!(Facing::Left.hand_offset().x, -Facing::Right.hand_offset().x);
    }
}
