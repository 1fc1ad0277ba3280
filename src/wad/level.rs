use crate::wad::{Wad, WadError};
use bincode::Decode;
use once_cell::sync::Lazy;
use regex::Regex;

/*=======================================================================*/
/*                         Raw binary structs                            */
/*=======================================================================*/

#[repr(C)]
#[derive(Clone, Copy, Decode, Debug)]
pub struct RawThing {
    pub x: i16,
    pub y: i16,
    pub angle: i16,
    pub type_: i16,
    pub options: i16,
}

#[repr(C)]
#[derive(Clone, Copy, Decode, Debug)]
pub struct RawLinedef {
    pub v1: i16,
    pub v2: i16,
    pub flags: i16,
    pub special: i16,
    pub tag: i16,
    pub sidenum: [i16; 2],
}

#[repr(C)]
#[derive(Clone, Copy, Decode, Debug)]
pub struct RawSidedef {
    pub x_off: i16,
    pub y_off: i16,
    pub top_tex: [u8; 8],
    pub bottom_tex: [u8; 8],
    pub mid_tex: [u8; 8],
    pub sector: i16,
}

#[repr(C)]
#[derive(Clone, Copy, Decode, Debug)]
pub struct RawVertex {
    pub x: i16,
    pub y: i16,
}

#[repr(C)]
#[derive(Clone, Copy, Decode, Debug)]
pub struct RawSector {
    pub floor_h: i16,
    pub ceil_h: i16,
    pub floor_tex: [u8; 8],
    pub ceil_tex: [u8; 8],
    pub light: i16,
    pub special: i16,
    pub tag: i16,
}

/*=======================================================================*/
/*                     Aggregate returned by `parse_level`               */
/*=======================================================================*/

/// The lumps of one map that the automap needs.
#[derive(Debug)]
pub struct RawLevel {
    pub name: String,
    pub things: Vec<RawThing>,
    pub linedefs: Vec<RawLinedef>,
    pub sidedefs: Vec<RawSidedef>,
    pub vertices: Vec<RawVertex>,
    pub sectors: Vec<RawSector>,
    /// Lower-left corner of the blockmap in map units, when present.
    pub blockmap_origin: Option<(i16, i16)>,
}

/*=======================================================================*/
/*                                Errors                                 */
/*=======================================================================*/

#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("marker index {0} out of bounds")]
    MarkerOob(usize),

    #[error("expected lump `{0}` not found after level marker")]
    Missing(&'static str),

    #[error("no map numbered {0} in this file")]
    NoSuchMap(usize),

    #[error(transparent)]
    Wad(#[from] WadError),
}

/// Lumps that may follow a map marker, in file order.
const MAP_LUMPS: usize = 10;

/*=======================================================================*/
/*                     Convenience helpers on `Wad`                      */
/*=======================================================================*/
impl Wad {
    /// Directory indices of every map marker (`E#M#`, `MAP##`).
    pub fn level_indices(&self) -> Vec<usize> {
        static RE: Lazy<Option<Regex>> =
            Lazy::new(|| Regex::new(r"^(E[1-6]M[1-9]|MAP[0-3][0-9])$").ok());
        let Some(re) = RE.as_ref() else {
            return Vec::new();
        };

        self.lumps()
            .iter()
            .enumerate()
            .filter(|(_, l)| l.size == 0 && re.is_match(Self::lump_name_str(&l.name)))
            .map(|(i, _)| i)
            .collect()
    }

    /// Index of `name` among the lumps that belong to the map at `marker`.
    fn map_lump(&self, marker: usize, name: &'static str) -> Option<usize> {
        self.lumps()
            .iter()
            .enumerate()
            .skip(marker + 1)
            .take(MAP_LUMPS)
            .find(|(_, l)| Self::lump_name_str(&l.name) == name)
            .map(|(i, _)| i)
    }

    fn required(&self, marker: usize, name: &'static str) -> Result<usize, LevelError> {
        self.map_lump(marker, name).ok_or(LevelError::Missing(name))
    }

    /// Decode the lumps of the map whose marker sits at `marker_idx`.
    pub fn parse_level(&self, marker_idx: usize) -> Result<RawLevel, LevelError> {
        if marker_idx >= self.lumps().len() {
            return Err(LevelError::MarkerOob(marker_idx));
        }

        let things = self.lump_to_vec::<RawThing>(self.required(marker_idx, "THINGS")?)?;
        let linedefs = self.lump_to_vec::<RawLinedef>(self.required(marker_idx, "LINEDEFS")?)?;
        let sidedefs = self.lump_to_vec::<RawSidedef>(self.required(marker_idx, "SIDEDEFS")?)?;
        let vertices = self.lump_to_vec::<RawVertex>(self.required(marker_idx, "VERTEXES")?)?;
        let sectors = self.lump_to_vec::<RawSector>(self.required(marker_idx, "SECTORS")?)?;

        // BLOCKMAP header: origin x, origin y, columns, rows
        let blockmap_origin = self
            .map_lump(marker_idx, "BLOCKMAP")
            .and_then(|i| self.lump_bytes(i).ok())
            .filter(|b| b.len() >= 4)
            .map(|b| (i16::from_le_bytes([b[0], b[1]]), i16::from_le_bytes([b[2], b[3]])));

        Ok(RawLevel {
            name: Self::lump_name_str(&self.lumps()[marker_idx].name).into(),
            things,
            linedefs,
            sidedefs,
            vertices,
            sectors,
            blockmap_origin,
        })
    }

    /// Parse the `n`-th map in directory order.
    pub fn parse_nth_level(&self, n: usize) -> Result<RawLevel, LevelError> {
        let marker = *self.level_indices().get(n).ok_or(LevelError::NoSuchMap(n))?;
        self.parse_level(marker)
    }
}

/*=======================================================================*/
/*                                Tests                                  */
/*=======================================================================*/
#[cfg(test)]
pub(crate) mod testing {
    //! Byte builders for hand-made maps.

    pub fn i16s(v: &[i16]) -> Vec<u8> {
        v.iter().flat_map(|x| x.to_le_bytes()).collect()
    }

    pub fn thing(x: i16, y: i16, angle: i16, kind: i16) -> Vec<u8> {
        i16s(&[x, y, angle, kind, 7])
    }

    pub fn linedef(v1: i16, v2: i16, flags: i16, special: i16, front: i16, back: i16) -> Vec<u8> {
        i16s(&[v1, v2, flags, special, 0, front, back])
    }

    pub fn sidedef(sector: i16) -> Vec<u8> {
        let mut out = i16s(&[0, 0]);
        for tex in [b"-\0\0\0\0\0\0\0", b"-\0\0\0\0\0\0\0", b"STARTAN3"] {
            out.extend_from_slice(tex);
        }
        out.extend(i16s(&[sector]));
        out
    }

    pub fn sector(floor: i16, ceil: i16, special: i16) -> Vec<u8> {
        let mut out = i16s(&[floor, ceil]);
        out.extend_from_slice(b"FLOOR4_8");
        out.extend_from_slice(b"CEIL3_5\0");
        out.extend(i16s(&[160, special, 0]));
        out
    }

    /// 128-unit square room: one sector, four one-sided walls,
    /// player 1 start in the middle, plus `extra` things.
    pub fn square_map(name: &str, extra: &[Vec<u8>]) -> Vec<(String, Vec<u8>)> {
        let mut things = thing(64, 64, 90, 1);
        for t in extra {
            things.extend(t);
        }
        let lines = (0..4i16)
            .flat_map(|i| linedef(i, (i + 1) % 4, 1, 0, i, -1))
            .collect();
        let sides = (0..4).flat_map(|_| sidedef(0)).collect();
        let verts = i16s(&[0, 0, 128, 0, 128, 128, 0, 128]);
        vec![
            (name.to_owned(), vec![]),
            ("THINGS".into(), things),
            ("LINEDEFS".into(), lines),
            ("SIDEDEFS".into(), sides),
            ("VERTEXES".into(), verts),
            ("SEGS".into(), vec![]),
            ("SSECTORS".into(), vec![]),
            ("NODES".into(), vec![]),
            ("SECTORS".into(), sector(0, 128, 0)),
            ("REJECT".into(), vec![]),
            ("BLOCKMAP".into(), i16s(&[-8, -8, 2, 2])),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::wad::raw::build_wad;

    fn wad_of(lumps: Vec<(String, Vec<u8>)>) -> Wad {
        let refs: Vec<(&str, Vec<u8>)> = lumps.iter().map(|(n, d)| (n.as_str(), d.clone())).collect();
        Wad::from_bytes(build_wad(&refs)).unwrap()
    }

    #[test]
    fn markers_are_found_by_name() {
        let mut lumps = square_map("E1M1", &[]);
        lumps.extend(square_map("E2M3", &[]));
        lumps.push(("E1M10".into(), vec![]));
        let wad = wad_of(lumps);
        let found: Vec<_> = wad
            .level_indices()
            .into_iter()
            .map(|i| Wad::lump_name_str(&wad.lumps()[i].name).to_owned())
            .collect();
        assert_eq!(found, ["E1M1", "E2M3"]);
    }

    #[test]
    fn first_map_parses() {
        let wad = wad_of(square_map("E1M1", &[thing(32, 32, 0, 2035)]));
        let lvl = wad.parse_nth_level(0).expect("level decode");
        assert_eq!(lvl.name, "E1M1");
        assert_eq!(lvl.vertices.len(), 4);
        assert_eq!(lvl.linedefs.len(), 4);
        assert_eq!(lvl.sidedefs[3].sector, 0);
        assert_eq!(lvl.sectors[0].ceil_h, 128);
        assert_eq!(lvl.things.len(), 2);
        assert_eq!(lvl.things[0].type_, 1);
        assert_eq!(lvl.blockmap_origin, Some((-8, -8)));
    }

    #[test]
    fn bad_marker_oob() {
        let wad = wad_of(square_map("E1M1", &[]));
        let err = wad.parse_level(wad.lumps().len() + 10).unwrap_err();
        assert!(matches!(err, LevelError::MarkerOob(_)));
        assert!(matches!(wad.parse_nth_level(1).unwrap_err(), LevelError::NoSuchMap(1)));
    }

    #[test]
    fn missing_lump_is_named() {
        let mut lumps = square_map("E1M1", &[]);
        lumps.retain(|(n, _)| n != "SECTORS");
        let wad = wad_of(lumps);
        let err = wad.parse_nth_level(0).unwrap_err();
        assert!(matches!(err, LevelError::Missing("SECTORS")));
    }
}
