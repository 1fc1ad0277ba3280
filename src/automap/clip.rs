//! Cohen–Sutherland clipping in two stages.
//!
//! The cheap stage runs on map coordinates and throws away anything fully
//! above/below, then fully left/right of the window. Survivors are
//! projected to the frame and clipped there, one out-of-bounds endpoint at
//! a time, with 64-bit intersection maths.

use bitflags::bitflags;
use glam::ivec2;

use super::transform::MapSegment;
use super::viewport::Viewport;
use crate::renderer::{FramePoint, FrameSegment};

bitflags! {
    /// Sides of the window a point lies beyond.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Outcode: u8 {
        const LEFT   = 1;
        const RIGHT  = 2;
        const BOTTOM = 4;
        const TOP    = 8;
    }
}

/// Stage that discarded a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reject {
    /// Trivially outside the map-space window; never projected.
    MapSpace,
    /// Outside the frame once projected, or clipped away entirely.
    FrameSpace,
}

/// Map-space outcode; Y bits are settled before X bits.
fn map_outcode_y(y: i64, vp: &Viewport) -> Outcode {
    if y > vp.map_max().y {
        Outcode::TOP
    } else if y < vp.map_min.y {
        Outcode::BOTTOM
    } else {
        Outcode::empty()
    }
}

fn map_outcode_x(x: i64, vp: &Viewport) -> Outcode {
    if x < vp.map_min.x {
        Outcode::LEFT
    } else if x > vp.map_max().x {
        Outcode::RIGHT
    } else {
        Outcode::empty()
    }
}

/// Frame outcode; the right and bottom edges are exclusive.
fn frame_outcode(p: FramePoint, vp: &Viewport) -> Outcode {
    let (lo, size) = (vp.frame_origin, vp.frame_size);
    let mut oc = Outcode::empty();
    if p.y < lo.y {
        oc |= Outcode::TOP;
    } else if p.y >= lo.y + size.y {
        oc |= Outcode::BOTTOM;
    }
    if p.x < lo.x {
        oc |= Outcode::LEFT;
    } else if p.x >= lo.x + size.x {
        oc |= Outcode::RIGHT;
    }
    oc
}

/// Where `a → b` crosses the edge named by `outside`.
fn intersect(a: FramePoint, b: FramePoint, outside: Outcode, vp: &Viewport) -> Option<FramePoint> {
    let (lo, size) = (vp.frame_origin, vp.frame_size);
    let (ax, ay) = (a.x as i64, a.y as i64);

    let p = if outside.contains(Outcode::TOP) {
        let (dy, dx) = (ay - b.y as i64, (b.x - a.x) as i64);
        if dy == 0 {
            return None;
        }
        ivec2((ax + dx * (ay - lo.y as i64) / dy) as i32, lo.y)
    } else if outside.contains(Outcode::BOTTOM) {
        let (dy, dx) = (ay - b.y as i64, (b.x - a.x) as i64);
        if dy == 0 {
            return None;
        }
        let edge = (lo.y + size.y) as i64;
        ivec2((ax + dx * (ay - edge) / dy) as i32, lo.y + size.y - 1)
    } else if outside.contains(Outcode::RIGHT) {
        let (dy, dx) = ((b.y - a.y) as i64, (b.x - a.x) as i64);
        if dx == 0 {
            return None;
        }
        let edge = (lo.x + size.x - 1) as i64;
        ivec2(lo.x + size.x - 1, (ay + dy * (edge - ax) / dx) as i32)
    } else if outside.contains(Outcode::LEFT) {
        let (dy, dx) = ((b.y - a.y) as i64, (b.x - a.x) as i64);
        if dx == 0 {
            return None;
        }
        ivec2(lo.x, (ay + dy * (lo.x as i64 - ax) / dx) as i32)
    } else {
        ivec2(lo.x, lo.y)
    };
    Some(p)
}

/// Project and clip `seg`, reporting which stage rejected it.
pub fn clip_staged(seg: &MapSegment, vp: &Viewport) -> Result<FrameSegment, Reject> {
    // trivial rejects, Y first
    let mut oc1 = map_outcode_y(seg.a.y, vp);
    let mut oc2 = map_outcode_y(seg.b.y, vp);
    if oc1.intersects(oc2) {
        return Err(Reject::MapSpace);
    }
    oc1 |= map_outcode_x(seg.a.x, vp);
    oc2 |= map_outcode_x(seg.b.x, vp);
    if oc1.intersects(oc2) {
        return Err(Reject::MapSpace);
    }

    let mut a = vp.to_frame(seg.a);
    let mut b = vp.to_frame(seg.b);

    oc1 = frame_outcode(a, vp);
    oc2 = frame_outcode(b, vp);
    if oc1.intersects(oc2) {
        return Err(Reject::FrameSpace);
    }

    while !(oc1 | oc2).is_empty() {
        // always the first endpoint while it is out
        let first = !oc1.is_empty();
        let outside = if first { oc1 } else { oc2 };

        let p = intersect(a, b, outside, vp).ok_or(Reject::FrameSpace)?;
        if first {
            a = p;
            oc1 = frame_outcode(a, vp);
        } else {
            b = p;
            oc2 = frame_outcode(b, vp);
        }

        if oc1.intersects(oc2) {
            return Err(Reject::FrameSpace);
        }
    }

    Ok(FrameSegment::new(a, b))
}

/// Project and clip `seg`; `None` when nothing of it is visible.
#[inline]
pub fn clip(seg: &MapSegment, vp: &Viewport) -> Option<FrameSegment> {
    clip_staged(seg, vp).ok()
}
