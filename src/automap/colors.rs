//! Line categories, their inks and the two antialiasing tables.
//!
//! Every stroke the map draws carries a [`DrawCategory`]. The category
//! picks an [`Ink`] from a flat table: either one palette index for the
//! Bresenham path or a row of the active ramp table for the Wu path.

use crate::renderer::{ColorIndex, NUMLEVELS, Ramp};

/// Rows in each antialiasing table.
pub const NUM_RAMPS: usize = 23;

pub type RampTable = [Ramp; NUM_RAMPS];

/*──────────────────────────── categories ───────────────────────────*/

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawCategory {
    Wall,
    FloorStep,
    CeilingStep,
    /// Line only a cheat reveals.
    CheatOnly,
    /// Unexplored line shown by the map power-up.
    Unexplored,
    YellowKey,
    GreenKey,
    BlueKey,
    Secret,
    FoundSecret,
    Exit,
    Teleporter,
    /// Secret door while cheating.
    SecretDoor,
    Grid,
    Crosshair,
    You,
    PlayerGreen,
    PlayerYellow,
    PlayerRed,
    PlayerBlue,
    InvisiblePlayer,
    Spectator,
    /// Live monster that is not hunting anything.
    MonsterIdle,
    MonsterAlert,
    MonsterDead,
    Pod,
    Item,
    Thing,
    Mark,
}

/// Player colours by slot.
pub const TEAM: [DrawCategory; 4] = [
    DrawCategory::PlayerGreen,
    DrawCategory::PlayerYellow,
    DrawCategory::PlayerRed,
    DrawCategory::PlayerBlue,
];

/// How a category reaches the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ink {
    Solid(ColorIndex),
    /// Row of the active ramp table.
    Ramp(usize),
    /// Ramp row that follows the idle-monster colour cycle.
    Pulse,
}

// Palette anchors.
const GRAYS: ColorIndex = 40;
const WHITE: ColorIndex = 32;
const BLOODRED: ColorIndex = 150;
const KEY_BLUE: ColorIndex = 197;
const KEY_YELLOW: ColorIndex = 144;
const KEY_GREEN: ColorIndex = 220;

/// Background fill when no page is loaded.
pub const PARCH: ColorIndex = 103;

static INKS: [Ink; 29] = [
    Ink::Ramp(0),              // Wall
    Ink::Ramp(1),              // FloorStep
    Ink::Ramp(2),              // CeilingStep
    Ink::Ramp(3),              // CheatOnly
    Ink::Ramp(4),              // Unexplored
    Ink::Ramp(5),              // YellowKey
    Ink::Ramp(6),              // GreenKey
    Ink::Ramp(7),              // BlueKey
    Ink::Ramp(8),              // Secret
    Ink::Ramp(9),              // FoundSecret
    Ink::Ramp(10),             // Exit
    Ink::Ramp(19),             // Teleporter
    Ink::Solid(0),             // SecretDoor
    Ink::Solid(GRAYS),         // Grid
    Ink::Solid(GRAYS),         // Crosshair
    Ink::Solid(WHITE),         // You
    Ink::Solid(KEY_GREEN),     // PlayerGreen
    Ink::Solid(KEY_YELLOW),    // PlayerYellow
    Ink::Solid(BLOODRED),      // PlayerRed
    Ink::Solid(KEY_BLUE),      // PlayerBlue
    Ink::Solid(102),           // InvisiblePlayer
    Ink::Solid(35),            // Spectator
    Ink::Pulse,                // MonsterIdle
    Ink::Ramp(13),             // MonsterAlert
    Ink::Solid(15),            // MonsterDead
    Ink::Ramp(12),             // Pod
    Ink::Ramp(11),             // Item
    Ink::Solid(GRAYS),         // Thing
    Ink::Ramp(11),             // Mark
];

impl DrawCategory {
    #[inline]
    pub fn ink(self) -> Ink {
        INKS[self as usize]
    }
}

/*──────────────────────────── ramp tables ──────────────────────────*/

/// Rows 13..=22: the red block `150..=159`, two steps per shade.
const fn red(k: u8) -> Ramp {
    let b = 150 + k;
    [b, b, b - 1, b - 1, b - 2, b - 2, b - 3, b - 3]
}

/// Full-screen map.
pub static NORMAL: RampTable = [
    [96, 97, 98, 99, 100, 101, 102, 103],         // walls
    [110, 109, 108, 107, 106, 105, 104, 103],     // floor steps
    [75, 76, 77, 78, 79, 80, 81, 103],            // ceiling steps
    [40, 40, 41, 41, 42, 42, 43, 43],             // cheat-only
    [40, 40, 41, 41, 42, 42, 43, 43],             // unexplored
    [143, 143, 142, 142, 141, 141, 141, 141],     // yellow
    [223, 223, 222, 222, 221, 221, 220, 220],     // green
    [197, 197, 197, 196, 196, 196, 195, 195],     // blue
    [173; NUMLEVELS],                             // secret
    [206; NUMLEVELS],                             // found secret
    [182, 182, 182, 182, 181, 181, 181, 181],     // exits
    [224, 224, 223, 223, 222, 222, 221, 221],     // items
    [142, 142, 141, 141, 141, 140, 140, 140],     // pods
    red(0),
    red(1),
    red(2),
    red(3),
    red(4),
    red(5),
    red(6), // teleporters too
    red(7),
    red(8),
    red(9),
];

/// Map drawn over the 3D view; darker ends so lines stay legible.
pub static OVERLAY: RampTable = [
    [100, 99, 98, 98, 97, 97, 96, 96],
    [106, 105, 104, 103, 102, 101, 100, 99],
    [75, 75, 74, 74, 73, 73, 72, 72],
    [40, 39, 39, 38, 38, 37, 37, 36],
    [43, 42, 41, 40, 39, 38, 37, 36],
    [143, 143, 142, 142, 141, 141, 140, 140],
    [223, 222, 221, 220, 219, 218, 217, 216],
    [198, 198, 197, 197, 196, 196, 195, 195],
    [175, 175, 174, 174, 173, 173, 172, 172],
    [206, 206, 206, 205, 205, 205, 204, 204],
    [182, 182, 181, 181, 180, 180, 179, 179],
    [224, 223, 222, 221, 220, 219, 218, 217],
    [142, 142, 141, 141, 140, 139, 138, 137],
    red(0),
    red(1),
    red(2),
    red(3),
    red(4),
    red(5),
    red(6),
    red(7),
    red(8),
    red(9),
];

#[inline]
pub fn ramp_table(overlay: bool) -> &'static RampTable {
    if overlay { &OVERLAY } else { &NORMAL }
}

/*──────────────────────────── pulse ────────────────────────────────*/

const PULSE_MIN: u8 = 152;
const PULSE_MAX: u8 = 159;

/// Idle-monster colour cycle, bouncing between `152` and `159`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pulse {
    value: u8,
    falling: bool,
}

impl Default for Pulse {
    fn default() -> Self {
        Self {
            value: PULSE_MIN,
            falling: false,
        }
    }
}

impl Pulse {
    /// Advance one step on odd tics.
    pub fn tick(&mut self, gametic: u32) {
        if gametic & 1 == 0 {
            return;
        }
        if !self.falling {
            self.value += 1;
            if self.value == PULSE_MAX {
                self.falling = true;
            }
        } else {
            self.value -= 1;
            if self.value == PULSE_MIN {
                self.falling = false;
            }
        }
    }

    #[inline]
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Ramp row matching the current colour.
    #[inline]
    pub fn row(&self) -> usize {
        13 + (self.value - BLOODRED) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_an_ink() {
        assert_eq!(DrawCategory::Mark.ink(), Ink::Ramp(11));
        assert_eq!(DrawCategory::Wall.ink(), Ink::Ramp(0));
        assert_eq!(DrawCategory::Teleporter.ink(), Ink::Ramp(19));
        assert_eq!(DrawCategory::MonsterDead.ink(), Ink::Solid(15));
        assert_eq!(INKS.len(), DrawCategory::Mark as usize + 1);
    }

    #[test]
    fn red_rows_step_down_in_pairs() {
        assert_eq!(NORMAL[13], [150, 150, 149, 149, 148, 148, 147, 147]);
        assert_eq!(NORMAL[22], [159, 159, 158, 158, 157, 157, 156, 156]);
        assert_eq!(NORMAL[19], OVERLAY[19]);
    }

    #[test]
    fn pulse_bounces_between_ends() {
        let mut p = Pulse::default();
        let mut seen = Vec::new();
        for tic in 0..40 {
            p.tick(tic);
            seen.push(p.value());
        }
        assert!(seen.iter().all(|v| (152..=159).contains(v)));
        // even tics do nothing
        assert_eq!(seen[0], 152);
        assert_eq!(seen[1], 153);
        // reaches the top after 7 odd tics, then turns around
        assert_eq!(seen[13], 159);
        assert_eq!(seen[15], 158);
        assert_eq!(seen[27], 152);
        assert_eq!(seen[29], 153);
    }

    #[test]
    fn pulse_row_tracks_value() {
        let mut p = Pulse::default();
        assert_eq!(p.row(), 15);
        p.tick(1);
        assert_eq!(NORMAL[p.row()][0], p.value());
    }
}
