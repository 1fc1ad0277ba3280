use super::Plotter;
use crate::renderer::{ColorIndex, FrameSegment, Surface};

/// Classic integer Bresenham.
///
/// Input is expected to be clipped already; a segment with an endpoint
/// outside the frame is skipped as a whole.
pub fn draw_solid_line<S: Surface + ?Sized>(
    plot: &mut Plotter<'_, S>,
    line: FrameSegment,
    color: ColorIndex,
) {
    let FrameSegment { a, b } = line;
    if !plot.contains(a.x, a.y) || !plot.contains(b.x, b.y) {
        return;
    }

    let dx = b.x - a.x;
    let ax = 2 * dx.abs();
    let sx = if dx < 0 { -1 } else { 1 };

    let dy = b.y - a.y;
    let ay = 2 * dy.abs();
    let sy = if dy < 0 { -1 } else { 1 };

    let (mut x, mut y) = (a.x, a.y);

    if ax > ay {
        // x-major
        let mut d = ay - ax / 2;
        loop {
            plot.dot(x, y, color);
            if x == b.x {
                return;
            }
            if d >= 0 {
                y += sy;
                d -= ax;
            }
            x += sx;
            d += ay;
        }
    } else {
        // y-major
        let mut d = ax - ay / 2;
        loop {
            plot.dot(x, y, color);
            if y == b.y {
                return;
            }
            if d >= 0 {
                x += sx;
                d -= ay;
            }
            y += sy;
            d += ax;
        }
    }
}
