//! hecs components describing actors as the automap sees them.
//!
//! The simulation owns and mutates these; the automap queries them
//! read-only during the draw phase.

use bitflags::bitflags;
use glam::IVec2;

use crate::math::{Angle, Fixed, FRACBITS, lerp_angle, lerp_fixed};

bitflags! {
    /// Subset of the runtime **mobj** flags the automap cares about.
    ///
    /// The numeric values are the ones from `info.h`.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct MobjFlags: u32 {
        const SPECIAL        = 0x0000_0001;
        const SOLID          = 0x0000_0002;
        const SHOOTABLE      = 0x0000_0004;
        const CORPSE         = 0x0010_0000;
        // Inter-mission counters
        const COUNTKILL      = 0x0040_0000;
        const COUNTITEM      = 0x0080_0000;
    }
}

/// World-space position for this tic and the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub cur: IVec2,
    pub old: IVec2,
}

impl Position {
    pub fn at(p: IVec2) -> Self {
        Self { cur: p, old: p }
    }

    /// Interpolated position; `None` means "no fraction, use this tic".
    #[inline]
    pub fn lerp(&self, frac: Option<Fixed>) -> IVec2 {
        match frac {
            Some(f) => IVec2::new(
                lerp_fixed(self.old.x, self.cur.x, f),
                lerp_fixed(self.old.y, self.cur.y, f),
            ),
            None => self.cur,
        }
    }
}

/// Orientation for this tic and the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Facing {
    pub cur: Angle,
    pub old: Angle,
}

impl Facing {
    pub fn toward(a: Angle) -> Self {
        Self { cur: a, old: a }
    }

    #[inline]
    pub fn lerp(&self, frac: Option<Fixed>) -> Angle {
        match frac {
            Some(f) => lerp_angle(self.old, self.cur, f),
            None => self.cur,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyColor {
    Yellow,
    Green,
    Blue,
}

/// What an actor is, as far as map colouring goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Player body; the index is the player slot.
    Player(usize),
    /// Explosive pod, has no kill flag but is drawn apart.
    Pod,
    Key(KeyColor),
    Other,
}

/// Physical attributes of a map object.
#[derive(Debug, Clone, Copy)]
pub struct Mobj {
    pub kind: Kind,
    pub flags: MobjFlags,
    pub radius: Fixed,
    pub health: i32,
}

impl Mobj {
    pub fn new(kind: Kind, flags: MobjFlags, radius_units: i32, health: i32) -> Self {
        Self {
            kind,
            flags,
            radius: radius_units << FRACBITS,
            health,
        }
    }
}

/// Marker component: the monster has a target and is hunting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Alert;

/// Per-slot player state read by the map.
#[derive(Debug, Clone, Copy, Default)]
pub struct Player {
    pub in_game: bool,
    pub mobj: Option<hecs::Entity>,
    pub invisible: bool,
    /// Map scroll power-up: unexplored lines are shown dimmed.
    pub has_map: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FRACUNIT;
    use glam::ivec2;

    #[test]
    fn position_lerp_uses_fraction() {
        let p = Position {
            cur: ivec2(200, 0),
            old: ivec2(100, 50),
        };
        assert_eq!(p.lerp(None), ivec2(200, 0));
        assert_eq!(p.lerp(Some(FRACUNIT / 2)), ivec2(150, 25));
        assert_eq!(p.lerp(Some(0)), ivec2(100, 50));
    }

    #[test]
    fn mobj_radius_is_fixed_point() {
        let m = Mobj::new(Kind::Other, MobjFlags::SOLID, 16, 100);
        assert_eq!(m.radius, 16 * FRACUNIT);
    }
}
