//! Fixed-point arithmetic and binary angles shared by the automap.
//!
//! Everything here mirrors the integer maths of the original engine so the
//! automap stays pixel-exact: 16.16 fixed-point values, 32-bit binary angles
//! and a fine sine table indexed by the top 13 bits of an angle.

mod angle;
mod fixed;

pub use angle::{ANG90, ANG180, ANG270, ANGLETOFINESHIFT, Angle, FINEANGLES, lerp_angle};
pub use fixed::{FRACBITS, FRACUNIT, Fixed, fixed_div, fixed_mul, lerp_fixed, mul64};
