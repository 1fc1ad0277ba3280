// ──────────────────────────────────────────────────────────────────────────
// wad/loader.rs
//
//  *   RawLevel   (wad::level)     ──╮
//  *   things table (wad::things)    │   --->  world::Level
//  *   Session (skill, netgame)      │         + hecs::World of actors
//                                    ╯         + per-slot Player state
// ──────────────────────────────────────────────────────────────────────────

use glam::ivec2;
use hecs::World;
use log::{debug, warn};
use thiserror::Error;

use crate::{
    math::{Angle, FRACBITS},
    renderer::{Colormap, Palette},
    wad::level::{LevelError, RawLevel},
    wad::raw::{Wad, WadError},
    wad::things,
    world::{
        Facing, Kind, Level, Line, LineFlags, Mobj, MobjFlags, Player, Position, Sector, SectorId,
        Session, Skill, Vertex,
    },
};

use crate::automap::{BACKGROUND_H, BACKGROUND_W};

/// Player slots in a game.
pub const MAXPLAYERS: usize = 4;

/// THINGS option bits.
const MTF_EASY: i16 = 0x0001;
const MTF_NORMAL: i16 = 0x0002;
const MTF_HARD: i16 = 0x0004;
const MTF_NOTSINGLE: i16 = 0x0010;

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Wad(#[from] WadError),

    #[error(transparent)]
    Level(#[from] LevelError),

    #[error("{what} {index} refers past the end of its table")]
    BadReference { what: &'static str, index: usize },

    #[error("map has no player 1 start")]
    NoPlayerStart,
}

/// Everything the automap reads for one map.
pub struct MapData {
    pub level: Level,
    pub world: World,
    pub players: Vec<Player>,
}

/*====================================================================*/
/*                       Public API                                   */
/*====================================================================*/

/// Load the `n`-th map of `wad` and spawn its things for `session`.
pub fn load_map(wad: &Wad, n: usize, session: &Session) -> Result<MapData, LoadError> {
    let raw = wad.parse_nth_level(n)?;
    let level = build_level(&raw)?;

    let mut world = World::new();
    let mut players = vec![Player::default(); MAXPLAYERS];
    let skill_bit = match session.skill {
        Skill::Baby | Skill::Easy => MTF_EASY,
        Skill::Medium => MTF_NORMAL,
        Skill::Hard | Skill::Nightmare => MTF_HARD,
    };

    for t in &raw.things {
        let pos = Position::at(ivec2((t.x as i32) << FRACBITS, (t.y as i32) << FRACBITS));
        let facing = Facing::toward(Angle::from_degrees(t.angle as f64));

        if let Some(slot) = things::player_start(t.type_) {
            if slot > 0 && !session.netgame {
                continue;
            }
            let body = world.spawn((
                pos,
                facing,
                Mobj::new(Kind::Player(slot), MobjFlags::SOLID | MobjFlags::SHOOTABLE, 16, 100),
            ));
            players[slot] = Player {
                in_game: true,
                mobj: Some(body),
                ..Default::default()
            };
            continue;
        }

        if things::is_marker(t.type_) {
            continue;
        }
        if t.options & skill_bit == 0 || (!session.netgame && t.options & MTF_NOTSINGLE != 0) {
            continue;
        }

        let info = things::by_doomednum(t.type_);
        world.spawn((
            pos,
            facing,
            Mobj::new(info.kind, info.flags, info.radius, info.health),
        ));
    }

    if !players[0].in_game {
        return Err(LoadError::NoPlayerStart);
    }

    debug!(
        "loaded {}: {} lines, {} sectors, {} actors",
        level.name,
        level.lines.len(),
        level.sectors.len(),
        world.len()
    );

    Ok(MapData {
        level,
        world,
        players,
    })
}

/// Convert raw lumps into the automap's level geometry.
pub fn build_level(raw: &RawLevel) -> Result<Level, LoadError> {
    let vertices: Vec<Vertex> = raw
        .vertices
        .iter()
        .map(|v| Vertex {
            pos: ivec2((v.x as i32) << FRACBITS, (v.y as i32) << FRACBITS),
        })
        .collect();

    let sectors: Vec<Sector> = raw
        .sectors
        .iter()
        .map(|s| Sector {
            floor_h: (s.floor_h as i32) << FRACBITS,
            ceil_h: (s.ceil_h as i32) << FRACBITS,
            special: s.special,
            old_special: 0,
        })
        .collect();

    let side_sector = |side: i16, line: usize| -> Result<Option<SectorId>, LoadError> {
        if side < 0 {
            return Ok(None);
        }
        let sd = raw.sidedefs.get(side as usize).ok_or(LoadError::BadReference {
            what: "linedef",
            index: line,
        })?;
        if sd.sector < 0 || sd.sector as usize >= sectors.len() {
            return Err(LoadError::BadReference {
                what: "sidedef",
                index: side as usize,
            });
        }
        Ok(Some(sd.sector as SectorId))
    };

    let mut lines = Vec::with_capacity(raw.linedefs.len());
    for (i, l) in raw.linedefs.iter().enumerate() {
        let bad_vertex = |v: i16| v < 0 || v as usize >= vertices.len();
        if bad_vertex(l.v1) || bad_vertex(l.v2) {
            return Err(LoadError::BadReference {
                what: "linedef",
                index: i,
            });
        }
        let Some(front) = side_sector(l.sidenum[0], i)? else {
            warn!("linedef {i} has no front side, skipped");
            continue;
        };
        lines.push(Line {
            v1: l.v1 as u16,
            v2: l.v2 as u16,
            flags: LineFlags::from_bits_truncate(l.flags as u16),
            special: l.special as u16,
            front,
            back: side_sector(l.sidenum[1], i)?,
        });
    }

    let mut level = Level {
        name: raw.name.clone(),
        vertices,
        lines,
        sectors,
        blockmap_origin: glam::IVec2::ZERO,
    };
    level.blockmap_origin = match raw.blockmap_origin {
        Some((x, y)) => ivec2((x as i32) << FRACBITS, (y as i32) << FRACBITS),
        None => level.bounds().map_or(glam::IVec2::ZERO, |(lo, _)| lo),
    };
    Ok(level)
}

/*====================================================================*/
/*                  Palette / colormap / background                   */
/*====================================================================*/

pub fn load_palette(wad: &Wad) -> Option<Palette> {
    Palette::from_playpal(wad.lump_by_name("PLAYPAL")?)
}

pub fn load_colormap(wad: &Wad) -> Option<Colormap> {
    Colormap::from_lump(wad.lump_by_name("COLORMAP")?)
}

/// Raw automap background page, when the file has one.
pub fn load_background(wad: &Wad) -> Option<Vec<u8>> {
    let bytes = wad.lump_by_name("AUTOPAGE")?;
    (bytes.len() >= BACKGROUND_W * BACKGROUND_H).then(|| bytes[..BACKGROUND_W * BACKGROUND_H].to_vec())
}

/*====================================================================*/
/*                               Tests                                */
/*====================================================================*/
