//! Wu antialiased lines over an 8-step colour ramp.
//!
//! The stepper walks the major axis one pixel at a time while a 16-bit
//! error accumulator tracks the sub-pixel position on the minor axis. The
//! top [`INTENSITY_BITS`] of the accumulator pick how far down the ramp the
//! pixel on the line goes; its neighbour on the minor axis gets the
//! complementary weight, so the pair always adds up to full coverage.

use super::{EDGE_FADE, Plotter};
use crate::renderer::{FrameSegment, INTENSITY_BITS, NUMLEVELS, Ramp, Surface};

const WEIGHT_MASK: u8 = (NUMLEVELS - 1) as u8;
const INTENSITY_SHIFT: u32 = 16 - INTENSITY_BITS;

/// Walk `seg` and report every pixel as `(x, y, weight, cap)`.
///
/// `weight` is the ramp index before edge fading; `cap` is the deepest
/// ramp index fading may reach (`None` lets it go six steps further).
pub fn wu_line<F>(seg: FrameSegment, mut plot: F)
where
    F: FnMut(i32, i32, u8, Option<u8>),
{
    let (mut x0, mut y0, mut x1, mut y1) = (seg.a.x, seg.a.y, seg.b.x, seg.b.y);

    // run top to bottom
    if y0 > y1 {
        std::mem::swap(&mut y0, &mut y1);
        std::mem::swap(&mut x0, &mut x1);
    }

    // the first pixel sits exactly on the line
    plot(x0, y0, 0, None);

    let mut dx = x1 - x0;
    let xdir = if dx >= 0 { 1 } else { -1 };
    dx = dx.abs();
    let mut dy = y1 - y0;

    // Horizontal, vertical and diagonal lines go through pixel centres.
    if dy == 0 {
        while dx != 0 {
            dx -= 1;
            x0 += xdir;
            plot(x0, y0, 0, None);
        }
        return;
    }
    if dx == 0 {
        while dy != 0 {
            dy -= 1;
            y0 += 1;
            plot(x0, y0, 0, None);
        }
        return;
    }
    if dx == dy {
        while dy != 0 {
            dy -= 1;
            x0 += xdir;
            y0 += 1;
            plot(x0, y0, 0, None);
        }
        return;
    }

    let cap = Some(WEIGHT_MASK);
    let mut acc: u16 = 0;

    if dy > dx {
        // y-major: x advances by dx/dy per row, truncated so we never
        // overrun the end point
        let adj = (((dx as u32) << 16) / dy as u32) as u16;
        for _ in 1..dy {
            let prev = acc;
            acc = acc.wrapping_add(adj);
            if acc <= prev {
                x0 += xdir;
            }
            y0 += 1;
            let w = (acc >> INTENSITY_SHIFT) as u8;
            plot(x0, y0, w, cap);
            plot(x0 + xdir, y0, w ^ WEIGHT_MASK, cap);
        }
    } else {
        // x-major
        let adj = (((dy as u32) << 16) / dx as u32) as u16;
        for _ in 1..dx {
            let prev = acc;
            acc = acc.wrapping_add(adj);
            if acc <= prev {
                y0 += 1;
            }
            x0 += xdir;
            let w = (acc >> INTENSITY_SHIFT) as u8;
            plot(x0, y0, w, cap);
            plot(x0, y0 + 1, w ^ WEIGHT_MASK, cap);
        }
    }

    // so does the last one
    plot(x1, y1, 0, None);
}

/// Final ramp index for a pixel: antialiasing weight plus edge fade.
///
/// Pixels within [`EDGE_FADE`] of the left, right, top or bottom edge are
/// pushed further down the ramp the closer they get to the edge.
pub fn fade_index(x: i32, y: i32, width: i32, height: i32, weight: u8, cap: Option<u8>) -> usize {
    let weight = weight as i32;
    let mut idx = weight;

    if x < EDGE_FADE {
        idx += 7 - (x >> 2);
    } else if x > width - EDGE_FADE {
        idx += 7 - ((width - x) >> 2);
    }

    if y < EDGE_FADE {
        idx += 7 - (y >> 2);
    } else if y > height - EDGE_FADE {
        idx += 7 - ((height - y) >> 2);
    }

    idx = match cap {
        Some(c) if idx > c as i32 => c as i32,
        _ if idx > weight + 6 => weight + 6,
        _ => idx,
    };
    idx.clamp(0, NUMLEVELS as i32 - 1) as usize
}

/// Rasterize a clipped segment with antialiasing through `ramp`.
pub fn draw_antialiased_line<S: Surface + ?Sized>(
    plot: &mut Plotter<'_, S>,
    seg: FrameSegment,
    ramp: &Ramp,
) {
    wu_line(seg, |x, y, w, cap| plot.faded_dot(x, y, ramp, w, cap));
}
