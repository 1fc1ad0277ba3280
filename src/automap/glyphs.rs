//! Vector glyphs in 16.16 units around their own origin, and the small
//! bitmap digits used to number marks.

use glam::I64Vec2;

use super::transform::MapSegment;
use crate::math::FRACUNIT;

const fn seg(ax: i64, ay: i64, bx: i64, by: i64) -> MapSegment {
    MapSegment::new(I64Vec2::new(ax, ay), I64Vec2::new(bx, by))
}

const fn frac(f: f64) -> i64 {
    (f * FRACUNIT as f64) as i64
}

const R: i64 = (8 * FRACUNIT as i64) / 7;

/// Player arrow, pointing east.
pub static PLAYER_ARROW: [MapSegment; 10] = [
    seg(-R + R / 4, 0, 0, 0), // shaft
    seg(-R + R / 4, R / 8, R, 0), // head
    seg(-R + R / 4, -R / 8, R, 0),
    seg(-R + R / 4, -R / 4, -R + R / 4, R / 4), // guard
    seg(-R + R / 8, -R / 4, -R + R / 8, R / 4),
    seg(-R + R / 8, -R / 4, -R + R / 4, -R / 4),
    seg(-R + R / 8, R / 4, -R + R / 4, R / 4),
    seg(-R - R / 4, R / 8, -R - R / 4, -R / 8), // pommel
    seg(-R - R / 4, R / 8, -R + R / 8, R / 8),
    seg(-R - R / 4, -R / 8, -R + R / 8, -R / 8),
];

/// Key hint for the easiest skill.
pub static KEY_SQUARE: [MapSegment; 8] = [
    seg(0, 0, R / 4, -R / 2),
    seg(R / 4, -R / 2, R / 2, -R / 2),
    seg(R / 2, -R / 2, R / 2, R / 2),
    seg(R / 2, R / 2, R / 4, R / 2),
    seg(R / 4, R / 2, 0, 0),
    seg(0, 0, -R, 0), // stem
    seg(-R, 0, -R, -R / 2), // bit
    seg(-3 * R / 4, 0, -3 * R / 4, -R / 4),
];

/// Equilateral triangle, unit radius.
pub static TRIANGLE: [MapSegment; 3] = [
    seg(frac(-0.867), frac(-0.5), frac(0.867), frac(-0.5)),
    seg(frac(0.867), frac(-0.5), 0, FRACUNIT as i64),
    seg(0, FRACUNIT as i64, frac(-0.867), frac(-0.5)),
];

/// Narrow triangle pointing east, scaled by an actor's radius.
pub static THIN_TRIANGLE: [MapSegment; 3] = [
    seg(frac(-0.5), frac(-0.7), FRACUNIT as i64, 0),
    seg(FRACUNIT as i64, 0, frac(-0.5), frac(0.7)),
    seg(frac(-0.5), frac(0.7), frac(-0.5), frac(-0.7)),
];

/*──────────────────────────── digits ───────────────────────────────*/

pub const DIGIT_W: i32 = 3;
pub const DIGIT_H: i32 = 5;

/// 3×5 bitmaps, one row per byte, bit 2 = leftmost column.
static DIGITS: [[u8; DIGIT_H as usize]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b011, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b010, 0b010, 0b010],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

/// Set pixels of digit `d` as offsets from its top-left corner.
pub fn digit_pixels(d: usize) -> impl Iterator<Item = (i32, i32)> {
    let rows = DIGITS[d % 10];
    (0..DIGIT_H).flat_map(move |y| {
        (0..DIGIT_W)
            .filter(move |x| rows[y as usize] & (0b100 >> x) != 0)
            .map(move |x| (x, y))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_tip_is_one_and_a_seventh_units_out() {
        assert_eq!(R, 74898);
        assert!(PLAYER_ARROW.iter().any(|s| s.b == I64Vec2::new(R, 0)));
    }

    #[test]
    fn triangles_are_closed() {
        for shape in [&TRIANGLE, &THIN_TRIANGLE] {
            for i in 0..3 {
                assert_eq!(shape[i].b, shape[(i + 1) % 3].a);
            }
        }
    }

    #[test]
    fn digit_one_is_narrower_than_eight() {
        assert_eq!(digit_pixels(1).count(), 8);
        assert_eq!(digit_pixels(8).count(), 13);
        assert!(digit_pixels(8).all(|(x, y)| x < DIGIT_W && y < DIGIT_H));
    }
}
