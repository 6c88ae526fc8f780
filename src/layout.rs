//! Fractal nested-box layout.
//!
//! Walks a [`RankedSequence`] left to right. Box `i` has size
//! `base_size * decay^i` and sits flush in the corner of box `i - 1` chosen by
//! [`resolve_corner`]. Both projections share the recursion shape and differ
//! only in decay constant and placement:
//!
//! - `TwoD`: squares in screen space. Every child is right-aligned with its
//!   parent; `Upper` aligns the top edges, `Lower` the bottom edges. The
//!   root's top-left is the origin.
//! - `ThreeD`: cubes addressed by centre, `y` up. A child is pushed towards
//!   `+x, ±y, +z` until its corner meets the parent's, then nudged a further
//!   `epsilon` along the same direction to keep faces from being coplanar.

use crate::corner::{Corner, resolve_corner};
use crate::geometry::{Aabb, Rect, Vec2, Vec3};
use crate::model::{Polarity, PriceBox};
use crate::ranking::RankedSequence;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DECAY_2D: f64 = 0.86;
pub const DEFAULT_EPSILON_3D: f64 = 0.005;

/// `1 / sqrt(1.5)`: each cube has two thirds of its parent's face area.
pub fn default_decay_3d() -> f64 {
    1.0 / 1.5f64.sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Projection {
    #[default]
    #[serde(rename = "2d")]
    TwoD,
    #[serde(rename = "3d")]
    ThreeD,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub base_size: f64,
    pub decay_2d: f64,
    pub decay_3d: f64,
    pub epsilon_3d: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            base_size: 12.0,
            decay_2d: DEFAULT_DECAY_2D,
            decay_3d: default_decay_3d(),
            epsilon_3d: DEFAULT_EPSILON_3D,
        }
    }
}

impl LayoutParams {
    pub fn with_base_size(base_size: f64) -> Self {
        Self {
            base_size,
            ..Default::default()
        }
    }

    pub fn decay(&self, projection: Projection) -> f64 {
        match projection {
            Projection::TwoD => self.decay_2d,
            Projection::ThreeD => self.decay_3d,
        }
    }

    /// Edge length of the box at ranked index `index`.
    pub fn size_at(&self, projection: Projection, index: usize) -> f64 {
        self.base_size * self.decay(projection).powi(index as i32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Untagged on the wire; `Spatial` is tried first so a `z` is never dropped.
#[serde(untagged)]
pub enum Position {
    Spatial(Vec3),
    Planar(Vec2),
}

impl Position {
    pub fn origin(projection: Projection) -> Self {
        match projection {
            Projection::TwoD => Position::Planar(Vec2::ZERO),
            Projection::ThreeD => Position::Spatial(Vec3::ZERO),
        }
    }

    pub fn is_origin(&self) -> bool {
        match self {
            Position::Planar(p) => *p == Vec2::ZERO,
            Position::Spatial(p) => *p == Vec3::ZERO,
        }
    }

    pub fn as_planar(&self) -> Option<Vec2> {
        match self {
            Position::Planar(p) => Some(*p),
            Position::Spatial(_) => None,
        }
    }

    pub fn as_spatial(&self) -> Option<Vec3> {
        match self {
            Position::Spatial(p) => Some(*p),
            Position::Planar(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    pub index: usize,
    pub size: f64,
    /// Offset from the parent's position (zero for the root).
    pub offset: Position,
    /// Accumulated absolute position.
    pub position: Position,
    pub corner: Corner,
    pub is_first_different: bool,
    pub polarity: Polarity,
    #[serde(rename = "box")]
    pub price_box: PriceBox,
}

impl LayoutNode {
    /// Screen-space square covered by a 2D node.
    pub fn rect(&self) -> Option<Rect> {
        self.position
            .as_planar()
            .map(|p| Rect::from_min_size(p, self.size))
    }

    /// World-space cube covered by a 3D node.
    pub fn aabb(&self) -> Option<Aabb> {
        self.position
            .as_spatial()
            .map(|c| Aabb::from_center_size(c, self.size))
    }
}

fn planar_offset(parent_size: f64, size: f64, corner: Corner) -> Vec2 {
    let slack = parent_size - size;
    match corner {
        Corner::Upper => Vec2::new(slack, 0.0),
        Corner::Lower => Vec2::new(slack, slack),
    }
}

fn spatial_offset(parent_size: f64, size: f64, corner: Corner, epsilon: f64) -> Vec3 {
    let d = (parent_size - size) * 0.5;
    let raw = match corner {
        Corner::Upper => Vec3::new(d, d, d),
        Corner::Lower => Vec3::new(d, -d, d),
    };
    match raw.normalized() {
        Some(dir) => raw.add(dir.scale(epsilon)),
        None => raw,
    }
}

/// Lay out every box of `ranked`. Empty input yields an empty layout.
pub fn build_layout(
    ranked: &RankedSequence,
    projection: Projection,
    params: &LayoutParams,
) -> Vec<LayoutNode> {
    let mut nodes: Vec<LayoutNode> = Vec::with_capacity(ranked.len());
    for (index, price_box) in ranked.boxes.iter().enumerate() {
        let size = params.size_at(projection, index);
        let res = resolve_corner(price_box, ranked.predecessor(index));
        let (offset, position) = match nodes.last() {
            None => (Position::origin(projection), Position::origin(projection)),
            Some(parent) => match parent.position {
                Position::Planar(p) => {
                    let off = planar_offset(parent.size, size, res.corner);
                    (Position::Planar(off), Position::Planar(p.add(off)))
                }
                Position::Spatial(p) => {
                    let off = spatial_offset(parent.size, size, res.corner, params.epsilon_3d);
                    (Position::Spatial(off), Position::Spatial(p.add(off)))
                }
            },
        };
        nodes.push(LayoutNode {
            index,
            size,
            offset,
            position,
            corner: res.corner,
            is_first_different: res.is_first_different,
            polarity: price_box.polarity(),
            price_box: *price_box,
        });
    }
    nodes
}
