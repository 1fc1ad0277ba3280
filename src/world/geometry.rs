use bitflags::bitflags;
use glam::IVec2;

use crate::math::Fixed;

pub type LineId = u16;
pub type VertexId = u16;
pub type SectorId = u16;

/// Runtime snapshot of the parts of a map the automap draws.
///
/// Coordinates are world-space 16.16 fixed point.
#[derive(Debug, Default)]
pub struct Level {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub lines: Vec<Line>,
    pub sectors: Vec<Sector>,
    /// Lower-left corner of the blockmap, the grid is aligned to it.
    pub blockmap_origin: IVec2,
}

/*--------------------------- lines ---------------------------------*/

bitflags! {
    /// Linedef flags, values as stored in the LINEDEFS lump.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct LineFlags: u16 {
        const BLOCKING        = 0x0001;
        const BLOCK_MONSTERS  = 0x0002;
        const TWO_SIDED       = 0x0004;
        const UPPER_UNPEGGED  = 0x0008;
        const LOWER_UNPEGGED  = 0x0010;
        // Shown as a plain wall on the map.
        const SECRET          = 0x0020;
        const BLOCK_SOUND     = 0x0040;
        // Never shown unless cheating.
        const DONT_DRAW       = 0x0080;
        // Seen by the player at least once.
        const MAPPED          = 0x0100;
    }
}

#[derive(Clone, Debug)]
pub struct Line {
    pub v1: VertexId,
    pub v2: VertexId,
    pub flags: LineFlags,
    pub special: u16,
    pub front: SectorId,
    pub back: Option<SectorId>,
}

/*----------------------- simple primitives --------------------------*/

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Vertex {
    pub pos: IVec2,
}

#[derive(Clone, Debug, Default)]
pub struct Sector {
    pub floor_h: Fixed,
    pub ceil_h: Fixed,
    pub special: i16,
    /// Special before the player triggered it; secrets keep `9` here.
    pub old_special: i16,
}

impl Level {
    #[inline]
    pub fn line_ends(&self, line: &Line) -> (IVec2, IVec2) {
        (
            self.vertices[line.v1 as usize].pos,
            self.vertices[line.v2 as usize].pos,
        )
    }

    #[inline]
    pub fn front(&self, line: &Line) -> &Sector {
        &self.sectors[line.front as usize]
    }

    #[inline]
    pub fn back(&self, line: &Line) -> Option<&Sector> {
        line.back.map(|s| &self.sectors[s as usize])
    }

    /// Axis-aligned bounds of every vertex, `None` for an empty level.
    pub fn bounds(&self) -> Option<(IVec2, IVec2)> {
        let first = self.vertices.first()?.pos;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(lo, hi), v| (lo.min(v.pos), hi.max(v.pos))),
        )
    }

    /// Flag every line as seen. Deathmatch starts with the whole map known.
    pub fn reveal_all(&mut self) {
        for line in &mut self.lines {
            line.flags |= LineFlags::MAPPED;
        }
    }
}
