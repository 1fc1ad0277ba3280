//! ---------------------------------------------------------------------------
//! The automap: a top-down, scrollable, zoomable view of the current level.
//!
//! * [`Automap`] owns everything the map needs between frames: viewport,
//!   pan/zoom motion, toggles, marks and the colour cycle.
//! * The game hands over a read-only [`GameView`] for each tic, frame and
//!   input event; nothing in the level or the ECS world is mutated here
//!   except the "seen" flags set by [`Automap::level_init`] in deathmatch.
//!
//! Pipeline per stroke: world → map ([`world_to_map`]) → rotation / aspect
//! ([`Projection`]) → [`clip`] → Bresenham or Wu rasterizer.
//! ---------------------------------------------------------------------------

mod clip;
mod colors;
mod config;
mod glyphs;
mod input;
mod marks;
mod names;
mod scene;
mod transform;
mod viewport;

pub use clip::{Outcode, Reject, clip, clip_staged};
pub use colors::{DrawCategory, Ink, NORMAL, OVERLAY, Pulse, RampTable, ramp_table};
pub use config::{
    AutomapConfig, BACKGROUND_H, BACKGROUND_W, FAST, FRACTOMAPBITS, MAPBITS, SLOW, Screen,
    SecretReveal, Speed,
};
pub use input::{Command, Direction, Response};
pub use marks::{Mark, MarkError, decode_marks, encode_marks};
pub use names::level_name;
pub use scene::{LineLayer, classify_line, grid_segments, thing_category};
pub use transform::{MapPoint, MapSegment, Projection, rotate, world_to_map};
pub use viewport::{Viewport, ZoomLimit};

use glam::IVec2;
use hecs::{Entity, World};
use log::{debug, info};
use thiserror::Error;

use crate::math::{ANG90, Angle, FRACUNIT, Fixed, mul64};
use crate::world::{Camera, Facing, Kind, Level, Mobj, Player, Position, Session, Skill};

/*──────────────────────────── errors ───────────────────────────────*/

#[derive(Debug, Error)]
pub enum AutomapError {
    #[error("level bounds are degenerate ({width} x {height} map units)")]
    DegenerateBounds { width: i64, height: i64 },
}

/*──────────────────────────── game view ────────────────────────────*/

/// Read-only game state for one tic, frame or input event.
#[derive(Clone, Copy)]
pub struct GameView<'a> {
    pub level: &'a Level,
    pub world: &'a World,
    pub players: &'a [Player],
    pub display_player: usize,
    /// Interpolated view of the display player.
    pub camera: Camera,
    pub session: &'a Session,
    /// Tic fraction from the frame pacer; `None` when not interpolating.
    pub frac: Option<Fixed>,
}

impl GameView<'_> {
    pub fn display(&self) -> Option<&Player> {
        self.players.get(self.display_player)
    }

    /// Body of the display player with its position and facing.
    pub fn body(&self) -> Option<(Entity, Position, Facing)> {
        let entity = self.display()?.mobj?;
        let mut q = self.world.query_one::<(&Position, &Facing)>(entity).ok()?;
        let (pos, facing) = q.get()?;
        Some((entity, *pos, *facing))
    }

    /// Where the display player stands this tic.
    pub fn body_pos(&self) -> IVec2 {
        self.body().map_or(self.camera.pos, |(_, p, _)| p.cur)
    }

    pub fn body_angle(&self) -> Angle {
        self.body().map_or(self.camera.angle, |(_, _, f)| f.cur)
    }
}

/*──────────────────────────── state ────────────────────────────────*/

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ZoomDir {
    In,
    Out,
}

/// What the player is holding down.
#[derive(Clone, Copy, Debug)]
struct Motion {
    /// Map units per tic.
    pan: MapPoint,
    mtof_mul: Fixed,
    ftom_mul: Fixed,
    /// Key zoom in progress; wheel zoom leaves this `None`.
    key_zoom: Option<ZoomDir>,
    wheel: bool,
    speed: Speed,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            pan: MapPoint::ZERO,
            mtof_mul: FRACUNIT,
            ftom_mul: FRACUNIT,
            key_zoom: None,
            wheel: false,
            speed: SLOW,
        }
    }
}

pub struct Automap {
    cfg: AutomapConfig,
    screen: Screen,
    phase: Phase,
    view: Viewport,
    follow: bool,
    grid: bool,
    /// Max-zoom toggle, the previous window is saved in the viewport.
    big: bool,
    motion: Motion,
    pulse: Pulse,
    marks: Vec<Mark>,
    /// Yellow, green, blue key locations for the easiest skill.
    keys: [Option<MapPoint>; 3],
    projection: Projection,
    /// Rotation that puts the player heading up, frozen while panning
    /// the overlay.
    map_angle: Angle,
    /// One-sided walls, drawn after everything else in the wall pass.
    solid_walls: Vec<(MapSegment, DrawCategory)>,
    level_key: Option<(u32, u32)>,
    fitted_frame_h: Option<i32>,
    background: Option<Vec<u8>>,
}

impl Automap {
    pub fn new(cfg: AutomapConfig, screen: Screen) -> Self {
        let cfg = cfg.sanitized();
        Self {
            follow: cfg.follow,
            grid: cfg.grid,
            cfg,
            screen,
            phase: Phase::Idle,
            view: Viewport::new(screen),
            big: false,
            motion: Motion::default(),
            pulse: Pulse::default(),
            marks: Vec::new(),
            keys: [None; 3],
            projection: Projection::IDENTITY,
            map_angle: Angle::ZERO,
            solid_walls: Vec::with_capacity(500),
            level_key: None,
            fitted_frame_h: None,
            background: None,
        }
    }

    /// Raw 320×158 page tiled behind the map when not in overlay mode.
    pub fn with_background(mut self, raw: Vec<u8>) -> Self {
        self.background = Some(raw);
        self
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn config(&self) -> &AutomapConfig {
        &self.cfg
    }

    pub fn viewport(&self) -> &Viewport {
        &self.view
    }

    pub fn following(&self) -> bool {
        self.follow
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Replace the marks, e.g. after loading a save.
    pub fn set_marks(&mut self, marks: Vec<Mark>) {
        self.marks = marks;
    }

    pub fn clear_marks(&mut self) {
        self.marks.clear();
    }

    /*──────────────────────── lifecycle ───────────────────────────*/

    /// Measure a freshly loaded level.
    ///
    /// `reinit` keeps the current zoom (adjusted for a new frame height)
    /// instead of starting from the default. In deathmatch every line
    /// starts out as seen.
    pub fn level_init(
        &mut self,
        level: &mut Level,
        session: &Session,
        reinit: bool,
    ) -> Result<(), AutomapError> {
        self.fit(level, reinit)?;
        if session.deathmatch {
            level.reveal_all();
        }
        self.level_key = Some((session.episode, session.map));
        Ok(())
    }

    fn fit(&mut self, level: &Level, reinit: bool) -> Result<(), AutomapError> {
        let (lo, hi) = level
            .bounds()
            .ok_or(AutomapError::DegenerateBounds { width: 0, height: 0 })?;

        self.view.frame_size = IVec2::new(self.screen.width.max(1), self.screen.frame_height());
        let prev = if reinit { self.fitted_frame_h } else { None };
        self.view
            .fit_level(world_to_map(lo), world_to_map(hi), prev)?;
        self.fitted_frame_h = Some(self.view.frame_size.y);

        info!(
            "automap: level {:?} spans {}..{}, scale {}..{}",
            level.name, self.view.level_min, self.view.level_max,
            self.view.min_scale_mtof, self.view.max_scale_mtof
        );
        Ok(())
    }

    /// New screen geometry; keeps the zoom proportional.
    pub fn resize(&mut self, screen: Screen, level: &Level) -> Result<(), AutomapError> {
        self.screen = screen;
        self.fit(level, true)?;
        if self.is_active() {
            self.view.activate_new_scale();
        }
        Ok(())
    }

    /// Open the map on the display player.
    pub fn start(&mut self, game: &GameView<'_>) -> Result<(), AutomapError> {
        if self.is_active() {
            self.stop();
        }

        let key = (game.session.episode, game.session.map);
        if self.level_key != Some(key) {
            self.fit(game.level, false)?;
            self.level_key = Some(key);
        }

        self.phase = Phase::Active;
        self.motion = Motion::default();

        self.view.open_at(world_to_map(game.body_pos()));
        self.tick(game.session.gametic);
        self.view.pan(MapPoint::ZERO);
        self.view.save();

        self.keys = [None; 3];
        if game.session.skill == Skill::Baby {
            for (_, (pos, mobj)) in game.world.query::<(&Position, &Mobj)>().iter() {
                if let Kind::Key(color) = mobj.kind {
                    self.keys[color as usize] = Some(world_to_map(pos.cur));
                }
            }
        }

        info!("automap: on");
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.is_active() {
            info!("automap: off");
        }
        self.phase = Phase::Idle;
    }

    /// Per-tic bookkeeping: remember the window for interpolation and
    /// advance the colour cycle.
    pub fn tick(&mut self, gametic: u32) {
        if !self.is_active() {
            return;
        }
        self.view.begin_tic();
        self.pulse.tick(gametic);
    }

    /*──────────────────────── motion ──────────────────────────────*/

    fn follow_camera(&mut self, camera: &Camera) {
        let p = self.view.snap(world_to_map(camera.pos));
        self.view.center_on(p);
    }

    fn change_window_scale(&mut self, frac: Option<Fixed>) {
        if let (Some(f), Some(dir)) = (frac, self.motion.key_zoom) {
            let smooth = (self.motion.speed.pan_zoom as f32 / FRACUNIT as f32 * f as f32).max(0.01);
            let step = 1.0 + smooth / 200.0;
            let (up, down) = (
                (FRACUNIT as f32 * step) as Fixed,
                (FRACUNIT as f32 / step) as Fixed,
            );
            self.view.set_scale(self.view.tic_scale());
            (self.motion.mtof_mul, self.motion.ftom_mul) = match dir {
                ZoomDir::In => (up, down),
                ZoomDir::Out => (down, up),
            };
        }

        let limit = self.view.zoom(self.motion.mtof_mul);

        if self.motion.wheel {
            self.motion.mtof_mul = FRACUNIT;
            self.motion.ftom_mul = FRACUNIT;
            self.motion.wheel = false;
        }
        if limit != ZoomLimit::Free {
            debug!("automap: zoom clamped at {limit:?}");
        }
    }

    fn change_window_loc(&mut self, frac: Option<Fixed>) {
        // any manual pan ends follow mode
        self.follow = false;

        let mut inc = self.motion.pan;
        if let Some(f) = frac {
            inc = MapPoint::new(mul64(inc.x, f as i64), mul64(inc.y, f as i64));
        }
        if self.cfg.rotate {
            inc = rotate(inc, -self.map_angle);
        }
        self.view.pan(inc);
    }

    /// Pivot and angles for this frame's display transform.
    fn update_projection(&mut self, game: &GameView<'_>) {
        let frozen = !self.follow && self.cfg.overlay;
        if self.cfg.rotate || self.cfg.square_aspect {
            self.projection.center = self.view.center();
            if !frozen {
                self.map_angle = ANG90 - game.body_angle();
            }
        }
        self.projection.angle = self.cfg.rotate.then(|| {
            if frozen { self.map_angle } else { game.camera.heading_up() }
        });
        self.projection.squash = self.cfg.square_aspect;
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fixtures shared by the automap tests.

    use glam::{IVec2, ivec2};
    use hecs::World;

    use super::*;
    use crate::math::FRACBITS;
    use crate::world::{LineFlags, Line, Sector, Vertex};

    /// World-unit square from `(0, 0)` to `(size, size)`, one-sided walls.
    pub fn square_level(size: i32) -> Level {
        let s = size << FRACBITS;
        let v = |x, y| Vertex { pos: ivec2(x, y) };
        Level {
            name: "TEST".into(),
            vertices: vec![v(0, 0), v(s, 0), v(s, s), v(0, s)],
            lines: (0..4)
                .map(|i| Line {
                    v1: i,
                    v2: (i + 1) % 4,
                    flags: LineFlags::BLOCKING | LineFlags::MAPPED,
                    special: 0,
                    front: 0,
                    back: None,
                })
                .collect(),
            sectors: vec![Sector::default()],
            blockmap_origin: IVec2::ZERO,
        }
    }

    pub struct Game {
        pub level: Level,
        pub world: World,
        pub players: Vec<Player>,
        pub session: Session,
        pub camera: Camera,
    }

    impl Game {
        /// One player standing in the middle of a 1000-unit square.
        pub fn new() -> Self {
            let mut world = World::new();
            let center = ivec2(500 << FRACBITS, 500 << FRACBITS);
            let body = world.spawn((
                Position::at(center),
                Facing::toward(ANG90),
                Mobj::new(Kind::Player(0), crate::world::MobjFlags::SOLID, 16, 100),
            ));
            Self {
                level: square_level(1000),
                world,
                players: vec![Player {
                    in_game: true,
                    mobj: Some(body),
                    ..Default::default()
                }],
                session: Session {
                    episode: 1,
                    map: 1,
                    ..Default::default()
                },
                camera: Camera::new(center, ANG90),
            }
        }

        pub fn view(&self) -> GameView<'_> {
            GameView {
                level: &self.level,
                world: &self.world,
                players: &self.players,
                display_player: 0,
                camera: self.camera,
                session: &self.session,
                frac: None,
            }
        }
    }

    pub fn started(cfg: AutomapConfig, game: &mut Game) -> Automap {
        let mut am = Automap::new(cfg, Screen::default());
        am.level_init(&mut game.level, &game.session, false).unwrap();
        am.start(&game.view()).unwrap();
        am
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::math::FRACBITS;
    use crate::world::LineFlags;
    use glam::ivec2;

    #[test]
    fn start_centres_on_the_player() {
        let mut game = Game::new();
        let am = started(AutomapConfig::default(), &mut game);
        assert!(am.is_active());
        let c = am.viewport().center();
        let want = world_to_map(game.camera.pos);
        assert!((c - want).abs().max_element() <= 1, "{c} vs {want}");
    }

    #[test]
    fn stop_then_tick_is_inert() {
        let mut game = Game::new();
        let mut am = started(AutomapConfig::default(), &mut game);
        am.stop();
        let before = *am.viewport();
        am.tick(1);
        assert!(!am.is_active());
        assert_eq!(*am.viewport(), before);
    }

    #[test]
    fn deathmatch_reveals_every_line() {
        let mut game = Game::new();
        for l in &mut game.level.lines {
            l.flags.remove(LineFlags::MAPPED);
        }
        game.session.deathmatch = true;
        let mut am = Automap::new(AutomapConfig::default(), Screen::default());
        am.level_init(&mut game.level, &game.session, false).unwrap();
        assert!(game.level.lines.iter().all(|l| l.flags.contains(LineFlags::MAPPED)));
    }

    #[test]
    fn empty_level_is_an_error() {
        let mut am = Automap::new(AutomapConfig::default(), Screen::default());
        let mut level = Level::default();
        let err = am.level_init(&mut level, &Session::default(), false);
        assert!(matches!(err, Err(AutomapError::DegenerateBounds { .. })));
    }

    #[test]
    fn reinit_keeps_zoom_proportional_to_frame_height() {
        let mut game = Game::new();
        let mut am = started(AutomapConfig::default(), &mut game);
        let before = am.viewport().scale_mtof;
        let tall = Screen {
            width: 320,
            height: 200 + 158,
            status_bar: 42,
        };
        am.resize(tall, &game.level).unwrap();
        assert_eq!(am.viewport().scale_mtof, before * 2);
    }

    #[test]
    fn baby_skill_remembers_keys() {
        let mut game = Game::new();
        game.session.skill = Skill::Baby;
        let spot = ivec2(100 << FRACBITS, 200 << FRACBITS);
        game.world.spawn((
            Position::at(spot),
            Facing::default(),
            Mobj::new(Kind::Key(crate::world::KeyColor::Blue), Default::default(), 8, 0),
        ));
        let am = started(AutomapConfig::default(), &mut game);
        assert_eq!(am.keys[2], Some(world_to_map(spot)));
        assert_eq!(am.keys[0], None);
    }

    #[test]
    fn interpolated_pan_moves_a_fraction_of_the_step() {
        let mut game = Game::new();
        let mut am = started(
            AutomapConfig {
                follow: false,
                ..Default::default()
            },
            &mut game,
        );
        let start = am.viewport().map_min;
        am.motion.pan = MapPoint::new(1000, 0);
        am.change_window_loc(Some(FRACUNIT / 4));
        assert_eq!(am.viewport().map_min.x - start.x, 250);
        // a second frame in the same tic restarts from the tic origin
        am.change_window_loc(Some(FRACUNIT / 2));
        assert_eq!(am.viewport().map_min.x - start.x, 500);
    }
    #[test]
    fn interpolated_key_zoom_restarts_from_the_tic_scale() {
        let mut game = Game::new();
        let mut am = started(AutomapConfig::default(), &mut game);
        am.motion.key_zoom = Some(ZoomDir::In);
        am.motion.mtof_mul = SLOW.zoom_in;
        am.motion.ftom_mul = SLOW.zoom_out;
        let s0 = am.viewport().scale_mtof;

        am.change_window_scale(Some(FRACUNIT / 2));
        let s1 = am.viewport().scale_mtof;
        am.change_window_scale(Some(FRACUNIT / 2));
        let s2 = am.viewport().scale_mtof;
        assert!(s1 > s0);
        assert_eq!(s1, s2, "same fraction, same scale");

        am.change_window_scale(Some(FRACUNIT));
        assert!(am.viewport().scale_mtof > s2);
    }

    #[test]
    fn overlay_rotation_freezes_while_not_following() {
        let mut game = Game::new();
        let cfg = AutomapConfig {
            rotate: true,
            overlay: true,
            follow: false,
            ..Default::default()
        };
        let mut am = started(cfg, &mut game);
        let mut rec = crate::renderer::software::testing::Recorder::new(320, 200);
        am.draw(&game.view(), &mut rec);
        let before = am.projection.angle;

        game.camera.angle = crate::math::ANG180;
        am.draw(&game.view(), &mut rec);
        assert_eq!(am.projection.angle, before);
        assert_ne!(Some(game.camera.heading_up()), before);
    }
}
