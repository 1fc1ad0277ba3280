use std::ops::{Add, Neg, Sub};

use once_cell::sync::Lazy;

use super::fixed::{FRACUNIT, Fixed};

/// Number of entries in one turn of the fine trig table.
pub const FINEANGLES: usize = 8192;
/// `angle >> ANGLETOFINESHIFT` yields a fine table index.
pub const ANGLETOFINESHIFT: u32 = 19;

/// Binary angle measurement: the full `u32` range is one turn,
/// counter-clockwise, 0 = east.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Angle(pub u32);

pub const ANG90: Angle = Angle(0x4000_0000);
pub const ANG180: Angle = Angle(0x8000_0000);
pub const ANG270: Angle = Angle(0xC000_0000);

/// Sine over 5/4 of a turn so that cosine is a plain offset lookup.
static FINESINE: Lazy<Vec<Fixed>> = Lazy::new(|| {
    (0..FINEANGLES * 5 / 4)
        .map(|i| {
            let rad = i as f64 * std::f64::consts::TAU / FINEANGLES as f64;
            (rad.sin() * FRACUNIT as f64).round() as Fixed
        })
        .collect()
});

impl Angle {
    pub const ZERO: Angle = Angle(0);

    /// Convert map-editor degrees (THINGS lump) into a binary angle.
    pub fn from_degrees(deg: f64) -> Self {
        let turns = deg.rem_euclid(360.0) / 360.0;
        Angle((turns * 4_294_967_296.0) as u64 as u32)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    fn fine(self) -> usize {
        (self.0 >> ANGLETOFINESHIFT) as usize
    }

    #[inline]
    pub fn sin(self) -> Fixed {
        FINESINE[self.fine()]
    }

    #[inline]
    pub fn cos(self) -> Fixed {
        FINESINE[self.fine() + FINEANGLES / 4]
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0.wrapping_sub(rhs.0))
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle(self.0.wrapping_neg())
    }
}

/// Blend two angles along the shortest arc by the tic fraction `frac`.
pub fn lerp_angle(old: Angle, new: Angle, frac: Fixed) -> Angle {
    let delta = new.0.wrapping_sub(old.0) as i32 as i64;
    Angle(old.0.wrapping_add(((delta * frac as i64) >> 16) as i32 as u32))
}
