//! Heretic-style automap for Yet Another Doom in Rust.
//!
//! * [`automap`] – viewport, clipper, scene composer and input handling.
//! * [`renderer`] – surfaces and the line rasterizers.
//! * [`world`] – the read-only game state the map draws.
//! * [`wad`] – just enough WAD reading to feed the viewer.

pub mod automap;
pub mod math;
pub mod renderer;
pub mod wad;
pub mod world;
