//! Sign-transition resolver.
//!
//! Decides which corner of its parent a box occupies. The same rule feeds
//! the 2D and 3D projections:
//!
//! - no predecessor (root): `Upper`, not a flip
//! - sign flip against the predecessor: the predecessor's sign picks the corner
//! - same sign run: the box's own sign picks the corner
//!
//! A flip requires strictly opposite signs. A zero magnitude never flips and,
//! when it drives the corner, resolves to `Upper`.

use crate::model::PriceBox;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Corner {
    Upper,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerResolution {
    pub corner: Corner,
    pub is_first_different: bool,
}

/// True when `a` and `b` have strictly opposite signs.
pub fn is_sign_flip(a: f64, b: f64) -> bool {
    (a > 0.0 && b < 0.0) || (a < 0.0 && b > 0.0)
}

pub fn resolve_corner(current: &PriceBox, predecessor: Option<&PriceBox>) -> CornerResolution {
    let Some(prev) = predecessor else {
        return CornerResolution {
            corner: Corner::Upper,
            is_first_different: false,
        };
    };
    let is_first_different = is_sign_flip(current.value, prev.value);
    let corner = if is_first_different {
        if prev.value > 0.0 {
            Corner::Upper
        } else {
            Corner::Lower
        }
    } else if current.value < 0.0 {
        Corner::Lower
    } else {
        Corner::Upper
    };
    CornerResolution {
        corner,
        is_first_different,
    }
}

/// Same rule phrased as "follow the current sign while signs agree,
/// otherwise fall back to the predecessor's sign".
pub fn resolve_corner_by_fallback(
    current: &PriceBox,
    predecessor: Option<&PriceBox>,
) -> CornerResolution {
    let Some(prev) = predecessor else {
        return CornerResolution {
            corner: Corner::Upper,
            is_first_different: false,
        };
    };
    let agree = !is_sign_flip(current.value, prev.value);
    let driver = if agree { current } else { prev };
    CornerResolution {
        corner: if driver.is_negative() {
            Corner::Lower
        } else {
            Corner::Upper
        },
        is_first_different: !agree,
    }
}
