//! Input handling: abstract commands in, consumed flag and HUD message out.
//!
//! Key bindings live with the caller; the map only sees [`Command`]s.

use log::{debug, info};

use super::marks::Mark;
use super::transform::{MapPoint, world_to_map};
use super::{Automap, AutomapError, GameView, ZoomDir};
use crate::math::FRACUNIT;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Open or close the map.
    Toggle,
    /// Pan key pressed or released.
    Pan { dir: Direction, pressed: bool },
    ZoomIn { pressed: bool },
    ZoomOut { pressed: bool },
    /// One wheel notch.
    WheelIn,
    WheelOut,
    /// Jump between whole-level and the previous zoom.
    MaxZoom,
    Follow,
    Grid,
    Mark,
    /// Drop the newest mark, or every mark with the run modifier.
    ClearMark,
    Rotate,
    Overlay,
}

/// What the game loop should do with an event after the map saw it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Response {
    /// The event must not reach any other handler.
    pub consumed: bool,
    /// Line for the HUD message area.
    pub message: Option<String>,
}

impl Response {
    fn ignored() -> Self {
        Self::default()
    }

    fn eaten() -> Self {
        Self {
            consumed: true,
            message: None,
        }
    }

    fn say(text: impl Into<String>) -> Self {
        Self {
            consumed: true,
            message: Some(text.into()),
        }
    }
}

fn on_off(label: &str, on: bool) -> String {
    format!("{label} {}", if on { "ON" } else { "OFF" })
}

impl Automap {
    /// Feed one input event. `run` is the state of the run modifier.
    pub fn respond(
        &mut self,
        cmd: Command,
        run: bool,
        game: &GameView<'_>,
    ) -> Result<Response, AutomapError> {
        self.motion.speed = super::Speed::pick(run);

        if !self.is_active() {
            if cmd == Command::Toggle {
                self.start(game)?;
                return Ok(Response::eaten());
            }
            return Ok(Response::ignored());
        }

        let speed = self.motion.speed;
        let rsp = match cmd {
            Command::Toggle => {
                self.big = false;
                self.stop();
                Response::eaten()
            }

            Command::WheelIn | Command::WheelOut => {
                let (mtof, ftom) = if cmd == Command::WheelIn {
                    (speed.wheel_in, speed.wheel_out)
                } else {
                    (speed.wheel_out, speed.wheel_in)
                };
                self.motion.mtof_mul = mtof;
                self.motion.ftom_mul = ftom;
                self.motion.key_zoom = None;
                self.motion.wheel = true;
                Response::eaten()
            }

            Command::Pan { dir, pressed: true } => {
                if self.follow {
                    return Ok(Response::ignored());
                }
                let step = self.view.ftom(speed.pan as i64);
                let east = if self.cfg.flip_levels { -step } else { step };
                match dir {
                    Direction::East => self.motion.pan.x = east,
                    Direction::West => self.motion.pan.x = -east,
                    Direction::North => self.motion.pan.y = step,
                    Direction::South => self.motion.pan.y = -step,
                }
                Response::eaten()
            }

            Command::Pan { dir, pressed: false } => {
                if !self.follow {
                    match dir {
                        Direction::East | Direction::West => self.motion.pan.x = 0,
                        Direction::North | Direction::South => self.motion.pan.y = 0,
                    }
                }
                Response::ignored()
            }

            Command::ZoomIn { pressed: true } => {
                self.motion.mtof_mul = speed.zoom_in;
                self.motion.ftom_mul = speed.zoom_out;
                self.motion.key_zoom = Some(ZoomDir::In);
                Response::eaten()
            }

            Command::ZoomOut { pressed: true } => {
                self.motion.mtof_mul = speed.zoom_out;
                self.motion.ftom_mul = speed.zoom_in;
                self.motion.key_zoom = Some(ZoomDir::Out);
                Response::eaten()
            }

            Command::ZoomIn { pressed: false } | Command::ZoomOut { pressed: false } => {
                self.motion.mtof_mul = FRACUNIT;
                self.motion.ftom_mul = FRACUNIT;
                self.motion.key_zoom = None;
                Response::ignored()
            }

            Command::MaxZoom => {
                self.big = !self.big;
                if self.big {
                    self.view.save();
                    self.view.min_out();
                } else {
                    let on = self.follow.then(|| world_to_map(game.body_pos()));
                    self.view.restore(on);
                }
                debug!("automap: max zoom {}", self.big);
                Response::eaten()
            }

            Command::Follow => {
                self.follow = !self.follow;
                self.motion.pan = MapPoint::ZERO;
                Response::say(on_off("FOLLOW MODE", self.follow))
            }

            Command::Grid => {
                self.grid = !self.grid;
                Response::say(on_off("GRID", self.grid))
            }

            Command::Mark => {
                let n = self.marks.len();
                let at = if self.follow {
                    world_to_map(game.body_pos())
                } else {
                    self.view.center()
                };
                self.marks.push(Mark::at(at));
                info!("automap: mark {n} at {at}");
                Response::say(format!("MARKED SPOT {n}"))
            }

            Command::ClearMark => {
                if self.marks.is_empty() {
                    return Ok(Response::ignored());
                }
                if run {
                    self.marks.clear();
                    info!("automap: marks cleared");
                    Response::say("ALL MARKS CLEARED")
                } else {
                    self.marks.pop();
                    Response::say(format!("CLEARED SPOT {}", self.marks.len()))
                }
            }

            Command::Rotate => {
                self.cfg.rotate = !self.cfg.rotate;
                Response::say(on_off("ROTATE MODE", self.cfg.rotate))
            }

            Command::Overlay => {
                self.cfg.overlay = !self.cfg.overlay;
                Response::say(on_off("OVERLAY MODE", self.cfg.overlay))
            }
        };
        Ok(rsp)
    }
}
