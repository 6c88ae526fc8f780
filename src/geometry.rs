//! Small vector and extent types shared by the 2D and 3D layouts.
//!
//! Conventions:
//! - 2D: screen space, `y` grows downward, a square is addressed by its
//!   top-left corner.
//! - 3D: world space, `y` grows upward, a cube is addressed by its centre.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(self, o: Vec2) -> Vec2 {
        Vec2::new(self.x + o.x, self.y + o.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn add(self, o: Vec3) -> Vec3 {
        Vec3::new(self.x + o.x, self.y + o.y, self.z + o.z)
    }

    pub fn scale(self, k: f64) -> Vec3 {
        Vec3::new(self.x * k, self.y * k, self.z * k)
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    pub fn normalized(self) -> Option<Vec3> {
        let len = self.length();
        if len > 0.0 {
            Some(self.scale(1.0 / len))
        } else {
            None
        }
    }
}

/// Axis-aligned rectangle in 2D screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_min_size(min: Vec2, size: f64) -> Self {
        Self {
            min,
            max: Vec2::new(min.x + size, min.y + size),
        }
    }
    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.max.x, self.min.y)
    }
    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.max.x, self.max.y)
    }
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }
}

/// Axis-aligned box in 3D world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_size(center: Vec3, size: f64) -> Self {
        let h = size * 0.5;
        Self {
            min: Vec3::new(center.x - h, center.y - h, center.z - h),
            max: Vec3::new(center.x + h, center.y + h, center.z + h),
        }
    }
    /// Corner at `+x, +y, +z`.
    pub fn upper_corner(&self) -> Vec3 {
        self.max
    }
    /// Corner at `+x, -y, +z`.
    pub fn lower_corner(&self) -> Vec3 {
        Vec3::new(self.max.x, self.min.y, self.max.z)
    }
}
