//! Read-only game state the automap consumes every frame.
//!
//! Level geometry, actors and the session flags are owned by other
//! subsystems; the automap only ever borrows them.

mod actors;
mod camera;
mod geometry;
mod session;

pub use actors::{Alert, Facing, KeyColor, Kind, MobjFlags, Mobj, Player, Position};
pub use camera::Camera;
pub use geometry::{Level, Line, LineFlags, LineId, Sector, SectorId, Vertex, VertexId};
pub use session::{CheatLevel, Session, Skill};
