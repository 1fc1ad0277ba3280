//! Minimal WAD reader for the map viewer: directory, map lumps, palette.

mod level;
mod loader;
mod raw;
mod things;

pub use level::{LevelError, RawLevel, RawLinedef, RawSector, RawSidedef, RawThing, RawVertex};
pub use loader::{
    LoadError, MAXPLAYERS, MapData, build_level, load_background, load_colormap, load_map,
    load_palette,
};
pub use raw::{LumpInfo, Wad, WadError};
pub use things::{ThingInfo, by_doomednum};
