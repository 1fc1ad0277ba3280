//! World → map conversion and display-time rotation / aspect squash.

use glam::{I64Vec2, IVec2, i64vec2};

use super::config::FRACTOMAPBITS;
use crate::math::{Angle, mul64};

/// Location in map space: world 16.16 shifted down to 20.12.
///
/// Kept 64-bit wide so rotated and scaled points never wrap.
pub type MapPoint = I64Vec2;

/// Undirected line in map space: a wall, grid line or glyph stroke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapSegment {
    pub a: MapPoint,
    pub b: MapPoint,
}

impl MapSegment {
    pub const fn new(a: MapPoint, b: MapPoint) -> Self {
        Self { a, b }
    }

    /// Apply `f` to both ends.
    #[inline]
    pub fn map(self, mut f: impl FnMut(MapPoint) -> MapPoint) -> Self {
        Self {
            a: f(self.a),
            b: f(self.b),
        }
    }
}

#[inline]
pub fn world_to_map(p: IVec2) -> MapPoint {
    i64vec2((p.x >> FRACTOMAPBITS) as i64, (p.y >> FRACTOMAPBITS) as i64)
}

/// Rotate about the origin.
#[inline]
pub fn rotate(p: MapPoint, a: Angle) -> MapPoint {
    let (sin, cos) = (a.sin() as i64, a.cos() as i64);
    i64vec2(
        mul64(p.x, cos) - mul64(p.y, sin),
        mul64(p.x, sin) + mul64(p.y, cos),
    )
}

/// Vertical 5/6 squash relative to `pivot_y`, truncating toward zero.
#[inline]
pub fn squash_y(y: i64, pivot_y: i64) -> i64 {
    pivot_y + 5 * (y - pivot_y) / 6
}

/// Per-frame display transform: optional rotation about the view centre,
/// then optional aspect squash about the same point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Projection {
    pub center: MapPoint,
    /// `Some` while rotate mode is on.
    pub angle: Option<Angle>,
    pub squash: bool,
}

impl Projection {
    /// Leaves every point where it is.
    pub const IDENTITY: Projection = Projection {
        center: I64Vec2::ZERO,
        angle: None,
        squash: false,
    };

    pub fn apply(&self, mut p: MapPoint) -> MapPoint {
        if let Some(angle) = self.angle {
            p = rotate(p - self.center, angle) + self.center;
        }
        if self.squash {
            p.y = squash_y(p.y, self.center.y);
        }
        p
    }

    #[inline]
    pub fn segment(&self, seg: MapSegment) -> MapSegment {
        seg.map(|p| self.apply(p))
    }
}
