//! Interactive automap viewer.
//!
//! ```bash
//! cargo run --release -- <heretic.wad> [--map 0] [--rotate] [--overlay]
//! ```
//!
//! W/S walk, A/D turn, Tab opens the map. While the map is open the
//! arrows pan (follow off), `-`/`=` zoom, `0` toggles whole-level zoom,
//! F/G/M/C/R/O toggle follow, grid, mark, clear, rotate and overlay.

use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use glam::IVec2;
use log::info;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use yadoom_automap::{
    automap::{Automap, AutomapConfig, Command, Direction, GameView, Screen, SecretReveal},
    math::{ANG90, Angle},
    renderer::TrueColorFrame,
    wad::{MapData, Wad, load_background, load_map, load_palette},
    world::{Camera, CheatLevel, Facing, Position, Session, Skill},
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SkillArg {
    Baby,
    Easy,
    Medium,
    Hard,
    Nightmare,
}

impl From<SkillArg> for Skill {
    fn from(s: SkillArg) -> Self {
        match s {
            SkillArg::Baby => Skill::Baby,
            SkillArg::Easy => Skill::Easy,
            SkillArg::Medium => Skill::Medium,
            SkillArg::Hard => Skill::Hard,
            SkillArg::Nightmare => Skill::Nightmare,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CheatArg {
    Off,
    Lines,
    Things,
}

impl From<CheatArg> for CheatLevel {
    fn from(c: CheatArg) -> Self {
        match c {
            CheatArg::Off => CheatLevel::Off,
            CheatArg::Lines => CheatLevel::Lines,
            CheatArg::Things => CheatLevel::Things,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Heretic-style automap viewer")]
struct Args {
    /// IWAD or PWAD to read.
    wad: std::path::PathBuf,
    /// Map number in directory order.
    #[arg(long, default_value_t = 0)]
    map: usize,
    #[arg(long, default_value_t = 960)]
    width: i32,
    #[arg(long, default_value_t = 600)]
    height: i32,
    #[arg(long, value_enum, default_value_t = SkillArg::Medium)]
    skill: SkillArg,
    /// How much of the map is shown before it is explored.
    #[arg(long, value_enum, default_value_t = CheatArg::Lines)]
    cheat: CheatArg,
    #[arg(long)]
    rotate: bool,
    #[arg(long)]
    overlay: bool,
    #[arg(long)]
    grid: bool,
    /// Squash the map vertically for non-square pixels.
    #[arg(long)]
    aspect: bool,
    #[arg(long)]
    secrets: bool,
}

/// World units per tic.
const WALK: i32 = 8;
const TURN: Angle = Angle(ANG90.0 / 16);

const TIC: Duration = Duration::from_nanos(1_000_000_000 / 35);

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let wad = Wad::from_file(&args.wad)
        .with_context(|| format!("reading {}", args.wad.display()))?;

    let mut session = Session {
        skill: args.skill.into(),
        cheat: args.cheat.into(),
        episode: 1,
        map: args.map as u32 + 1,
        ..Default::default()
    };
    let MapData {
        mut level,
        mut world,
        players,
    } = load_map(&wad, args.map, &session)?;
    info!("{}: {} lines", level.name, level.lines.len());

    let palette = load_palette(&wad).unwrap_or_default();
    let screen = Screen {
        width: args.width,
        height: args.height,
        status_bar: args.height * 42 / 200,
    };
    let cfg = AutomapConfig {
        rotate: args.rotate,
        overlay: args.overlay,
        square_aspect: args.aspect,
        grid: args.grid,
        secrets: if args.secrets {
            SecretReveal::Always
        } else {
            SecretReveal::Off
        },
        ..Default::default()
    };

    let mut automap = Automap::new(cfg, screen);
    if let Some(page) = load_background(&wad) {
        automap = automap.with_background(page);
    }
    automap.level_init(&mut level, &session, false)?;

    let body = players[0].mobj.context("player 1 has no body")?;
    let mut frame = TrueColorFrame::new(args.width as usize, args.height as usize, palette);

    let mut win = Window::new(
        "Automap",
        args.width as usize,
        args.height as usize,
        WindowOptions::default(),
    )?;
    win.set_target_fps(35);

    let mut camera = match world.query_one_mut::<(&Position, &Facing)>(body) {
        Ok((pos, facing)) => Camera::new(pos.cur, facing.cur),
        Err(_) => Camera::default(),
    };
    automap.start(&GameView {
        level: &level,
        world: &world,
        players: &players,
        display_player: 0,
        camera,
        session: &session,
        frac: None,
    })?;
    let mut next_tic = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        /* ------------------------- game tics --------------------------- */
        while Instant::now() >= next_tic {
            next_tic += TIC;
            session.gametic += 1;

            let run = win.is_key_down(Key::LeftShift) || win.is_key_down(Key::RightShift);
            let step = if run { WALK * 2 } else { WALK };

            if let Ok((pos, facing)) = world.query_one_mut::<(&mut Position, &mut Facing)>(body) {
                pos.old = pos.cur;
                facing.old = facing.cur;
                if win.is_key_down(Key::A) {
                    facing.cur = facing.cur + TURN;
                }
                if win.is_key_down(Key::D) {
                    facing.cur = facing.cur - TURN;
                }
                // fixed-point unit vector times whole units
                let stride = IVec2::new(facing.cur.cos(), facing.cur.sin()) * step;
                if win.is_key_down(Key::W) {
                    pos.cur += stride;
                }
                if win.is_key_down(Key::S) {
                    pos.cur -= stride;
                }
                camera = Camera::new(pos.cur, facing.cur);
            }

            automap.tick(session.gametic);
        }

        /* ------------------------- map input --------------------------- */
        let run = win.is_key_down(Key::LeftShift) || win.is_key_down(Key::RightShift);
        let mut cmds = Vec::new();
        for key in win.get_keys_pressed(KeyRepeat::No) {
            cmds.extend(command_for(key, true));
        }
        for key in win.get_keys_released() {
            cmds.extend(command_for(key, false));
        }
        if let Some((_, dy)) = win.get_scroll_wheel() {
            if dy > 0.0 {
                cmds.push(Command::WheelIn);
            } else if dy < 0.0 {
                cmds.push(Command::WheelOut);
            }
        }

        let game = GameView {
            level: &level,
            world: &world,
            players: &players,
            display_player: 0,
            camera,
            session: &session,
            frac: None,
        };
        for cmd in cmds {
            let rsp = automap.respond(cmd, run, &game)?;
            if let Some(msg) = rsp.message {
                info!("{msg}");
                win.set_title(&msg);
            }
        }

        /* ---------------------------- draw ----------------------------- */
        frame.begin_frame(args.width as usize, args.height as usize);
        automap.draw(&game, &mut frame);

        let mut shown = Ok(());
        frame.present(|fb, w, h| shown = win.update_with_buffer(fb, w, h));
        shown?;
    }
    Ok(())
}

fn command_for(key: Key, pressed: bool) -> Option<Command> {
    let pan = |dir| Some(Command::Pan { dir, pressed });
    match key {
        Key::Up => pan(Direction::North),
        Key::Down => pan(Direction::South),
        Key::Left => pan(Direction::West),
        Key::Right => pan(Direction::East),
        Key::Minus => Some(Command::ZoomOut { pressed }),
        Key::Equal => Some(Command::ZoomIn { pressed }),
        _ if !pressed => None,
        Key::Tab => Some(Command::Toggle),
        Key::Key0 => Some(Command::MaxZoom),
        Key::F => Some(Command::Follow),
        Key::G => Some(Command::Grid),
        Key::M => Some(Command::Mark),
        Key::C => Some(Command::ClearMark),
        Key::R => Some(Command::Rotate),
        Key::O => Some(Command::Overlay),
        _ => None,
    }
}
