/// 16.16 signed fixed-point value.
pub type Fixed = i32;

pub const FRACBITS: u32 = 16;
pub const FRACUNIT: Fixed = 1 << FRACBITS;

/// `a * b` in 16.16 with a 64-bit intermediate.
#[inline]
pub fn fixed_mul(a: Fixed, b: Fixed) -> Fixed {
    ((a as i64 * b as i64) >> FRACBITS) as Fixed
}

/// Wide variant used on map-space coordinates, which live in `i64`.
#[inline]
pub fn mul64(a: i64, b: i64) -> i64 {
    (a * b) >> FRACBITS
}

/// `a / b` in 16.16.
///
/// Saturates to `i32::MAX` / `i32::MIN` when the quotient does not fit,
/// which also covers division by zero.
#[inline]
pub fn fixed_div(a: Fixed, b: Fixed) -> Fixed {
    if (a.unsigned_abs() >> 14) >= b.unsigned_abs() {
        if (a ^ b) < 0 { i32::MIN } else { i32::MAX }
    } else {
        (((a as i64) << FRACBITS) / b as i64) as Fixed
    }
}

/// Blend `old → new` by the tic fraction `frac` (0 ..= FRACUNIT).
#[inline]
pub fn lerp_fixed(old: Fixed, new: Fixed, frac: Fixed) -> Fixed {
    old.wrapping_add(fixed_mul(new.wrapping_sub(old), frac))
}
