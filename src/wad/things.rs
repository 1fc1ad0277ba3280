//! Editor-number table: what each THINGS entry spawns as, for map colouring.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::world::{KeyColor, Kind, MobjFlags};

/// Spawn template for one editor number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThingInfo {
    pub doomednum: i16,
    pub kind: Kind,
    pub flags: MobjFlags,
    /// World units.
    pub radius: i32,
    pub health: i32,
}

const MONSTER: MobjFlags = MobjFlags::SOLID
    .union(MobjFlags::SHOOTABLE)
    .union(MobjFlags::COUNTKILL);
const ARTIFACT: MobjFlags = MobjFlags::SPECIAL.union(MobjFlags::COUNTITEM);

const fn info(doomednum: i16, kind: Kind, flags: MobjFlags, radius: i32, health: i32) -> ThingInfo {
    ThingInfo {
        doomednum,
        kind,
        flags,
        radius,
        health,
    }
}

const fn monster(doomednum: i16, radius: i32, health: i32) -> ThingInfo {
    info(doomednum, Kind::Other, MONSTER, radius, health)
}

const fn artifact(doomednum: i16) -> ThingInfo {
    info(doomednum, Kind::Other, ARTIFACT, 16, 1000)
}

static THINGS: &[ThingInfo] = &[
    // monsters
    monster(66, 16, 40),   // gargoyle
    monster(5, 16, 80),    // fire gargoyle
    monster(68, 22, 80),   // golem
    monster(69, 22, 80),   // golem ghost
    monster(45, 22, 100),  // nitrogolem
    monster(46, 22, 100),  // nitrogolem ghost
    monster(90, 20, 150),  // sabreclaw
    monster(70, 32, 220),  // weredragon
    monster(92, 22, 280),  // ophidian
    monster(64, 24, 200),  // undead warrior
    monster(65, 24, 200),  // undead warrior ghost
    monster(15, 16, 180),  // disciple
    monster(6, 40, 700),   // iron lich
    monster(9, 28, 3000),  // maulotaur
    monster(7, 28, 2000),  // d'sparil
    // hazards
    info(2035, Kind::Pod, MobjFlags::SOLID.union(MobjFlags::SHOOTABLE), 16, 45),
    // keys
    info(73, Kind::Key(KeyColor::Green), MobjFlags::SPECIAL, 20, 1000),
    info(79, Kind::Key(KeyColor::Blue), MobjFlags::SPECIAL, 20, 1000),
    info(80, Kind::Key(KeyColor::Yellow), MobjFlags::SPECIAL, 20, 1000),
    // artifacts
    artifact(30),
    artifact(32),
    artifact(33),
    artifact(34),
    artifact(35),
    artifact(36),
    artifact(75),
    artifact(82),
    artifact(83),
    artifact(84),
    artifact(86),
    // plain pickups
    info(81, Kind::Other, MobjFlags::SPECIAL, 20, 1000),
    info(85, Kind::Other, MobjFlags::SPECIAL, 20, 1000),
    info(31, Kind::Other, MobjFlags::SPECIAL, 20, 1000),
    info(8, Kind::Other, MobjFlags::SPECIAL, 20, 1000),
];

static BY_DOOMEDNUM: Lazy<HashMap<i16, &'static ThingInfo>> =
    Lazy::new(|| THINGS.iter().map(|t| (t.doomednum, t)).collect());

/// Template for `doomednum`; unknown numbers become plain decorations.
pub fn by_doomednum(doomednum: i16) -> ThingInfo {
    BY_DOOMEDNUM
        .get(&doomednum)
        .map(|t| **t)
        .unwrap_or(info(doomednum, Kind::Other, MobjFlags::empty(), 16, 1000))
}

/// Player slot for a player-start editor number.
pub fn player_start(doomednum: i16) -> Option<usize> {
    (1..=4).contains(&doomednum).then(|| doomednum as usize - 1)
}

/// Deathmatch starts, teleport landings and sound markers: never drawn.
pub fn is_marker(doomednum: i16) -> bool {
    matches!(doomednum, 11 | 14 | 1200..=1299)
}
