//! Frame composition: what gets drawn, in which colour, in which order.
//!
//! Order: background or shade, grid, walls (two-sided first, one-sided
//! on top), players, things, spectator body, crosshair, marks, keys,
//! level name.

use super::clip::clip;
use super::colors::{DrawCategory, Ink, PARCH, RampTable, TEAM, ramp_table};
use super::config::{
    BACKGROUND_H, BACKGROUND_W, GRID_BLOCK_UNITS, MAPBITS, FRACTOMAPBITS, MARK_W, SecretReveal,
};
use super::glyphs::{DIGIT_H, KEY_SQUARE, PLAYER_ARROW, THIN_TRIANGLE, digit_pixels};
use super::transform::{MapPoint, MapSegment, Projection, rotate, world_to_map};
use super::viewport::Viewport;
use super::{Automap, GameView};
use crate::math::{ANG90, Angle, Fixed, mul64};
use crate::renderer::software::{Plotter, draw_antialiased_line, draw_solid_line};
use crate::renderer::{ColorIndex, FrameSegment, Surface};
use crate::world::{Alert, CheatLevel, Facing, Kind, Level, Line, LineFlags, Mobj, MobjFlags, Position, Sector, Skill};

/// Sector special of an undiscovered secret.
const SECRET_SECTOR: i16 = 9;

/// Where a line goes in the wall pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineLayer {
    /// Drawn immediately.
    Under,
    /// One-sided wall, drawn after every other line.
    Over,
}

fn secret_now(s: &Sector, reveal: SecretReveal) -> bool {
    reveal == SecretReveal::Always && s.special == SECRET_SECTOR
}

fn secret_found(s: &Sector, reveal: SecretReveal) -> bool {
    reveal != SecretReveal::Off && s.old_special == SECRET_SECTOR
}

/// Category and layer of a line, `None` when it stays hidden.
///
/// `cheat` is any map cheat, `allmap` the map power-up.
pub fn classify_line(
    level: &Level,
    line: &Line,
    cheat: bool,
    reveal: SecretReveal,
    allmap: bool,
) -> Option<(DrawCategory, LineLayer)> {
    use DrawCategory as C;

    let hidden = line.flags.contains(LineFlags::DONT_DRAW);
    if !cheat && !line.flags.contains(LineFlags::MAPPED) {
        return (allmap && !hidden).then_some((C::Unexplored, LineLayer::Under));
    }
    if hidden && !cheat {
        return None;
    }

    let front = level.front(line);
    let Some(back) = level.back(line) else {
        let cat = match line.special {
            11 | 51 => C::Exit,
            _ if secret_now(front, reveal) => C::Secret,
            _ if secret_found(front, reveal) => C::FoundSecret,
            _ => C::Wall,
        };
        return Some((cat, LineLayer::Over));
    };

    let either = |f: fn(&Sector, SecretReveal) -> bool| f(front, reveal) || f(back, reveal);

    let cat = if line.flags.contains(LineFlags::SECRET) {
        if either(secret_now) {
            C::Secret
        } else if either(secret_found) {
            C::FoundSecret
        } else if cheat {
            C::SecretDoor
        } else {
            C::Wall
        }
    } else {
        match line.special {
            26 | 32 => C::BlueKey,
            27 | 34 => C::YellowKey,
            28 | 33 => C::GreenKey,
            39 | 97 => C::Teleporter,
            11 | 51 | 52 | 105 => C::Exit,
            _ if either(secret_now) => C::Secret,
            _ if either(secret_found) => C::FoundSecret,
            _ if back.floor_h != front.floor_h => C::FloorStep,
            _ if back.ceil_h != front.ceil_h => C::CeilingStep,
            _ if cheat => C::CheatOnly,
            _ => return None,
        }
    };
    Some((cat, LineLayer::Under))
}

/// Colour class of an actor on the thing cheat.
pub fn thing_category(mobj: &Mobj, alert: bool) -> DrawCategory {
    if mobj.flags.contains(MobjFlags::COUNTKILL) {
        if mobj.health <= 0 {
            DrawCategory::MonsterDead
        } else if alert {
            DrawCategory::MonsterAlert
        } else {
            DrawCategory::MonsterIdle
        }
    } else if mobj.kind == Kind::Pod {
        DrawCategory::Pod
    } else if mobj.flags.contains(MobjFlags::COUNTITEM) {
        DrawCategory::Item
    } else {
        DrawCategory::Thing
    }
}

/// Grid lines covering the window, aligned to the blockmap origin.
///
/// Rotated or squashed views get extra margin so the corners stay filled.
pub fn grid_segments(view: &Viewport, origin: MapPoint, rotated: bool, squashed: bool) -> Vec<MapSegment> {
    let step = GRID_BLOCK_UNITS << MAPBITS;
    let (min, size) = (view.map_min, view.map_size);
    let wide = rotated || squashed;
    let mut out = Vec::new();

    let align = |v: i64, org: i64| {
        let r = (v - org) % step;
        if r != 0 { v - r } else { v }
    };

    // vertical lines
    let mut x = align(if rotated { min.x - size.y / 2 } else { min.x }, origin.x);
    let end = min.x + size.x + if rotated { size.y / 2 } else { 0 };
    let (mut y0, mut y1) = (min.y, min.y + size.y);
    if wide {
        y0 -= size.x / 2;
        y1 += size.x / 2;
    }
    while x < end {
        out.push(MapSegment::new(MapPoint::new(x, y0), MapPoint::new(x, y1)));
        x += step;
    }

    // horizontal lines
    let mut y = align(if wide { min.y - size.x / 2 } else { min.y }, origin.y);
    let end = min.y + size.y + if wide { size.x / 2 } else { 0 };
    let (mut x0, mut x1) = (min.x, min.x + size.x);
    if rotated {
        x0 -= size.y / 2;
        x1 += size.y / 2;
    }
    while y < end {
        out.push(MapSegment::new(MapPoint::new(x0, y), MapPoint::new(x1, y)));
        y += step;
    }
    out
}

/*──────────────────────────── canvas ───────────────────────────────*/

/// Per-frame drawing context: plotter plus everything needed to turn a
/// map stroke into pixels.
struct Canvas<'a, S: Surface + ?Sized> {
    plot: Plotter<'a, S>,
    view: Viewport,
    proj: Projection,
    table: &'static RampTable,
    pulse_row: usize,
    /// Extra glyph rotation while the map turns with the player.
    turn: Option<Angle>,
    squash: bool,
}

impl<S: Surface + ?Sized> Canvas<'_, S> {
    /// Clip, project and draw a map-space stroke.
    fn mline(&mut self, seg: MapSegment, cat: DrawCategory) {
        if let Some(f) = clip(&seg, &self.view) {
            self.fline(f, cat);
        }
    }

    fn fline(&mut self, seg: FrameSegment, cat: DrawCategory) {
        match cat.ink() {
            Ink::Solid(c) => draw_solid_line(&mut self.plot, seg, c),
            Ink::Ramp(row) => draw_antialiased_line(&mut self.plot, seg, &self.table[row]),
            Ink::Pulse => draw_antialiased_line(&mut self.plot, seg, &self.table[self.pulse_row]),
        }
    }

    /// Single palette index for a category, for bitmap stamps.
    fn solid(&self, cat: DrawCategory) -> ColorIndex {
        match cat.ink() {
            Ink::Solid(c) => c,
            Ink::Ramp(row) => self.table[row][0],
            Ink::Pulse => self.table[self.pulse_row][0],
        }
    }

    /// Vector glyph at `at` (already projected): scale, turn, squash,
    /// translate. A zero `scale` keeps the glyph's own size.
    fn glyph(&mut self, lines: &[MapSegment], scale: Fixed, angle: Angle, cat: DrawCategory, at: MapPoint) {
        let angle = self.turn.map_or(angle, |t| angle + t);
        let squash = self.squash;
        for seg in lines {
            let seg = seg.map(|mut p| {
                if scale != 0 {
                    p = MapPoint::new(mul64(p.x, scale as i64), mul64(p.y, scale as i64));
                }
                if !angle.is_zero() {
                    p = rotate(p, angle);
                }
                if squash {
                    p.y = 5 * p.y / 6;
                }
                p + at
            });
            self.mline(seg, cat);
        }
    }
}

/*──────────────────────────── frame ────────────────────────────────*/

impl Automap {
    /// Render one frame into `surface`. Does nothing while closed.
    pub fn draw<S: Surface + ?Sized>(&mut self, game: &GameView<'_>, surface: &mut S) {
        if !self.is_active() {
            return;
        }

        if self.follow {
            self.follow_camera(&game.camera);
        }
        if self.motion.ftom_mul != crate::math::FRACUNIT {
            self.change_window_scale(game.frac);
        }
        if self.motion.pan != MapPoint::ZERO {
            self.change_window_loc(game.frac);
        }
        self.update_projection(game);

        let rows = self.view.frame_size.y.max(0) as usize;
        if !self.cfg.overlay {
            match &self.background {
                Some(page) => surface.tile(page, BACKGROUND_W, BACKGROUND_H, rows),
                None => surface.tile(&[PARCH], 1, 1, rows),
            }
        } else if self.cfg.shading > 0 {
            surface.shade(rows, self.cfg.shading);
        }

        let mut canvas = Canvas {
            plot: Plotter::new(&mut *surface, self.view.frame_size.y, self.cfg.flip_levels),
            view: self.view,
            proj: self.projection,
            table: ramp_table(self.cfg.overlay),
            pulse_row: self.pulse.row(),
            turn: self.cfg.rotate.then_some(self.map_angle),
            squash: self.cfg.square_aspect,
        };

        if self.grid {
            self.draw_grid(&mut canvas, game.level);
        }
        self.draw_walls(&mut canvas, game);
        self.draw_players(&mut canvas, game);
        if game.session.cheat == CheatLevel::Things {
            self.draw_things(&mut canvas, game);
        }
        if game.session.spectating {
            self.draw_spectator(&mut canvas, game);
        }
        if !self.follow {
            self.draw_crosshair(&mut canvas);
        }
        self.draw_marks(&mut canvas);
        if game.session.skill == Skill::Baby {
            self.draw_keys(&mut canvas);
        }
        drop(canvas);

        if self.cfg.show_level_name {
            if let Some(name) = super::level_name(game.session) {
                surface.label(20, self.view.frame_size.y - 12, name);
            }
        }
    }

    fn draw_grid<S: Surface + ?Sized>(&self, canvas: &mut Canvas<'_, S>, level: &Level) {
        let origin = world_to_map(level.blockmap_origin);
        for seg in grid_segments(&self.view, origin, self.cfg.rotate, self.cfg.square_aspect) {
            let seg = canvas.proj.segment(seg);
            canvas.mline(seg, DrawCategory::Grid);
        }
    }

    fn draw_walls<S: Surface + ?Sized>(&mut self, canvas: &mut Canvas<'_, S>, game: &GameView<'_>) {
        let level = game.level;
        let cheat = game.session.cheat != CheatLevel::Off;
        let allmap = game.display().is_some_and(|p| p.has_map);

        self.solid_walls.clear();
        for line in &level.lines {
            let Some((cat, layer)) = classify_line(level, line, cheat, self.cfg.secrets, allmap) else {
                continue;
            };
            let (a, b) = level.line_ends(line);
            let seg = canvas
                .proj
                .segment(MapSegment::new(world_to_map(a), world_to_map(b)));
            match layer {
                LineLayer::Under => canvas.mline(seg, cat),
                LineLayer::Over => self.solid_walls.push((seg, cat)),
            }
        }
        for (seg, cat) in self.solid_walls.drain(..) {
            canvas.mline(seg, cat);
        }
    }

    fn draw_players<S: Surface + ?Sized>(&self, canvas: &mut Canvas<'_, S>, game: &GameView<'_>) {
        let session = game.session;

        if !session.netgame {
            let angle = if self.cfg.rotate { game.body_angle() } else { game.camera.angle };
            let at = canvas.proj.apply(self.view.snap(world_to_map(game.camera.pos)));
            canvas.glyph(&PLAYER_ARROW, 0, angle, DrawCategory::You, at);
            return;
        }

        for (i, player) in game.players.iter().enumerate() {
            if session.deathmatch && !session.single_demo && i != game.display_player {
                continue;
            }
            if !player.in_game {
                continue;
            }
            let Some(body) = player.mobj else { continue };
            let Ok(mut q) = game.world.query_one::<(&Position, &Facing)>(body) else {
                continue;
            };
            let Some((pos, facing)) = q.get() else { continue };

            let cat = if player.invisible {
                DrawCategory::InvisiblePlayer
            } else {
                TEAM[i % TEAM.len()]
            };
            let at = canvas.proj.apply(self.view.snap(world_to_map(pos.lerp(game.frac))));
            let angle = if self.cfg.rotate { facing.cur } else { facing.lerp(game.frac) };
            canvas.glyph(&PLAYER_ARROW, 0, angle, cat, at);
        }
    }

    fn draw_things<S: Surface + ?Sized>(&self, canvas: &mut Canvas<'_, S>, game: &GameView<'_>) {
        let own = game.display().and_then(|p| p.mobj);
        let turn_back = game.session.spectating && self.cfg.rotate;

        let mut q = game
            .world
            .query::<(&Position, &Facing, &Mobj, Option<&Alert>)>();
        for (e, (pos, facing, mobj, alert)) in q.iter() {
            if Some(e) == own {
                continue;
            }
            let angle = if turn_back {
                facing.cur - self.map_angle - game.camera.angle + ANG90
            } else {
                facing.lerp(game.frac)
            };
            let at = canvas.proj.apply(world_to_map(pos.lerp(game.frac)));
            let cat = thing_category(mobj, alert.is_some());
            canvas.glyph(&THIN_TRIANGLE, mobj.radius >> FRACTOMAPBITS, angle, cat, at);
        }
    }

    /// The player's own body while the camera is detached from it.
    fn draw_spectator<S: Surface + ?Sized>(&self, canvas: &mut Canvas<'_, S>, game: &GameView<'_>) {
        let Some((body, pos, facing)) = game.body() else { return };
        let radius = game
            .world
            .get::<&Mobj>(body)
            .map_or(0, |m| m.radius >> FRACTOMAPBITS);

        let mut angle = facing.lerp(game.frac);
        if self.cfg.rotate {
            angle = facing.cur - self.map_angle - game.camera.angle + ANG90;
        }
        let at = canvas.proj.apply(world_to_map(pos.lerp(game.frac)));
        canvas.glyph(&THIN_TRIANGLE, radius, angle, DrawCategory::Spectator, at);
    }

    fn draw_crosshair<S: Surface + ?Sized>(&self, canvas: &mut Canvas<'_, S>) {
        let c = self.view.frame_origin + self.view.frame_size / 2;
        let (dx, dy) = (glam::ivec2(2, 0), glam::ivec2(0, 2));
        canvas.fline(FrameSegment::new(c - dx, c + dx), DrawCategory::Crosshair);
        canvas.fline(FrameSegment::new(c - dy, c + dy), DrawCategory::Crosshair);
    }

    /// Mark numbers as small bitmaps, least significant digit first,
    /// growing leftward. On mirrored levels the digits stay readable.
    fn draw_marks<S: Surface + ?Sized>(&self, canvas: &mut Canvas<'_, S>) {
        let color = canvas.solid(DrawCategory::Mark);
        let flip = self.cfg.flip_levels;
        let (f0, fs) = (self.view.frame_origin, self.view.frame_size);
        let step = if flip { -(MARK_W - 1) } else { MARK_W - 1 };

        for (i, mark) in self.marks.iter().enumerate() {
            let at = canvas.proj.apply(mark.point());
            let mut fx = self.view.cxmtof(at.x) - 1;
            let fy = self.view.cymtof(at.y) - 2;

            let mut n = i;
            loop {
                let d = n % 10;
                if d == 1 {
                    fx += if flip { -1 } else { 1 };
                }
                let inside = (f0.x..=fs.x - MARK_W).contains(&fx) && (f0.y..=fs.y - DIGIT_H - 1).contains(&fy);
                if inside {
                    let x0 = if flip { canvas.plot.mirror_x(fx) - (super::glyphs::DIGIT_W - 1) } else { fx };
                    for (x, y) in digit_pixels(d) {
                        canvas.plot.stamp(x0 + x, fy + y, color);
                    }
                }
                fx -= step;
                n /= 10;
                if n == 0 {
                    break;
                }
            }
        }
    }

    fn draw_keys<S: Surface + ?Sized>(&self, canvas: &mut Canvas<'_, S>) {
        const KEYS: [DrawCategory; 3] = [DrawCategory::YellowKey, DrawCategory::GreenKey, DrawCategory::BlueKey];
        for (spot, cat) in self.keys.iter().zip(KEYS) {
            if let Some(p) = spot {
                let at = canvas.proj.apply(*p);
                canvas.glyph(&KEY_SQUARE, 0, Angle::ZERO, cat, at);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use crate::automap::{AutomapConfig, NORMAL, OVERLAY, Screen};
    use crate::math::FRACBITS;
    use crate::renderer::software::testing::Recorder;
    use crate::world::{Player, Vertex};
    use glam::ivec2;

    /// Two sectors split by a two-sided line 0-1.
    fn split_level(front: Sector, back: Sector, special: u16, flags: LineFlags) -> (Level, Line) {
        let v = |x, y| Vertex { pos: ivec2(x << FRACBITS, y << FRACBITS) };
        let line = Line {
            v1: 0,
            v2: 1,
            flags: flags | LineFlags::TWO_SIDED,
            special,
            front: 0,
            back: Some(1),
        };
        let level = Level {
            vertices: vec![v(0, 0), v(0, 64)],
            lines: vec![line.clone()],
            sectors: vec![front, back],
            ..Default::default()
        };
        (level, line)
    }

    fn floor(h: i32) -> Sector {
        Sector {
            floor_h: h << FRACBITS,
            ..Default::default()
        }
    }

    fn secret() -> Sector {
        Sector {
            special: SECRET_SECTOR,
            old_special: SECRET_SECTOR,
            ..Default::default()
        }
    }

    fn found() -> Sector {
        Sector {
            old_special: SECRET_SECTOR,
            ..Default::default()
        }
    }

    #[test]
    fn one_sided_walls_go_on_top() {
        let level = square_level(64);
        let got = classify_line(&level, &level.lines[0], false, SecretReveal::Off, false);
        assert_eq!(got, Some((DrawCategory::Wall, LineLayer::Over)));

        let mut exit = level.lines[0].clone();
        exit.special = 51;
        let got = classify_line(&level, &exit, false, SecretReveal::Off, false);
        assert_eq!(got, Some((DrawCategory::Exit, LineLayer::Over)));
    }

    #[test]
    fn unseen_lines_need_the_power_up() {
        let (level, mut line) = split_level(floor(0), floor(8), 0, LineFlags::empty());
        assert_eq!(classify_line(&level, &line, false, SecretReveal::Off, false), None);
        assert_eq!(
            classify_line(&level, &line, false, SecretReveal::Off, true),
            Some((DrawCategory::Unexplored, LineLayer::Under))
        );
        line.flags |= LineFlags::DONT_DRAW;
        assert_eq!(classify_line(&level, &line, false, SecretReveal::Off, true), None);
        // the cheat shows it with its real colour
        assert_eq!(
            classify_line(&level, &line, true, SecretReveal::Off, false),
            Some((DrawCategory::FloorStep, LineLayer::Under))
        );
    }

    #[test]
    fn two_sided_lines_by_special_and_height() {
        let seen = LineFlags::MAPPED;
        let cases = [
            (26, DrawCategory::BlueKey),
            (34, DrawCategory::YellowKey),
            (28, DrawCategory::GreenKey),
            (97, DrawCategory::Teleporter),
            (105, DrawCategory::Exit),
        ];
        for (special, want) in cases {
            let (level, line) = split_level(floor(0), floor(0), special, seen);
            let got = classify_line(&level, &line, false, SecretReveal::Off, false);
            assert_eq!(got, Some((want, LineLayer::Under)), "special {special}");
        }

        let (level, line) = split_level(floor(0), floor(0), 0, seen);
        assert_eq!(classify_line(&level, &line, false, SecretReveal::Off, false), None);
        assert_eq!(
            classify_line(&level, &line, true, SecretReveal::Off, false),
            Some((DrawCategory::CheatOnly, LineLayer::Under))
        );

        let ceiling = Sector {
            ceil_h: 128 << FRACBITS,
            ..Default::default()
        };
        let (level, line) = split_level(floor(0), ceiling, 0, seen);
        assert_eq!(
            classify_line(&level, &line, false, SecretReveal::Off, false).map(|c| c.0),
            Some(DrawCategory::CeilingStep)
        );
    }

    #[test]
    fn secrets_follow_the_reveal_setting() {
        let seen = LineFlags::MAPPED;
        let (level, line) = split_level(floor(0), secret(), 0, seen);
        let cat = |r| classify_line(&level, &line, false, r, false).map(|c| c.0);
        assert_eq!(cat(SecretReveal::Always), Some(DrawCategory::Secret));
        // undiscovered secret with old special set counts as found
        assert_eq!(cat(SecretReveal::Revealed), Some(DrawCategory::FoundSecret));
        assert_eq!(cat(SecretReveal::Off), None);

        let (level, line) = split_level(found(), floor(0), 0, seen);
        assert_eq!(
            classify_line(&level, &line, false, SecretReveal::Revealed, false).map(|c| c.0),
            Some(DrawCategory::FoundSecret)
        );
    }

    #[test]
    fn secret_doors_look_like_walls_unless_cheating() {
        let flags = LineFlags::MAPPED | LineFlags::SECRET;
        let (level, line) = split_level(floor(0), floor(24), 0, flags);
        assert_eq!(
            classify_line(&level, &line, false, SecretReveal::Off, false).map(|c| c.0),
            Some(DrawCategory::Wall)
        );
        assert_eq!(
            classify_line(&level, &line, true, SecretReveal::Off, false).map(|c| c.0),
            Some(DrawCategory::SecretDoor)
        );
    }

    #[test]
    fn things_by_flags() {
        let monster = Mobj::new(Kind::Other, MobjFlags::COUNTKILL | MobjFlags::SOLID, 20, 50);
        assert_eq!(thing_category(&monster, false), DrawCategory::MonsterIdle);
        assert_eq!(thing_category(&monster, true), DrawCategory::MonsterAlert);
        let corpse = Mobj { health: 0, ..monster };
        assert_eq!(thing_category(&corpse, true), DrawCategory::MonsterDead);

        let pod = Mobj::new(Kind::Pod, MobjFlags::SOLID | MobjFlags::SHOOTABLE, 16, 45);
        assert_eq!(thing_category(&pod, false), DrawCategory::Pod);
        let item = Mobj::new(Kind::Other, MobjFlags::SPECIAL | MobjFlags::COUNTITEM, 20, 0);
        assert_eq!(thing_category(&item, false), DrawCategory::Item);
        let lamp = Mobj::new(Kind::Other, MobjFlags::SOLID, 16, 0);
        assert_eq!(thing_category(&lamp, false), DrawCategory::Thing);
    }

    #[test]
    fn grid_is_aligned_to_the_blockmap() {
        let mut game = Game::new();
        let am = started(AutomapConfig::default(), &mut game);
        let origin = MapPoint::new(-8 << MAPBITS, 16 << MAPBITS);
        let step = GRID_BLOCK_UNITS << MAPBITS;
        let segs = grid_segments(am.viewport(), origin, false, false);
        assert!(!segs.is_empty());
        let (vertical, horizontal): (Vec<&MapSegment>, Vec<&MapSegment>) =
            segs.iter().partition(|s| s.a.x == s.b.x);
        for s in &vertical {
            assert_eq!((s.a.x - origin.x) % step, 0);
        }
        for s in &horizontal {
            assert_eq!((s.a.y - origin.y) % step, 0);
        }
        // rotation widens the covered area
        let wide = grid_segments(am.viewport(), origin, true, false);
        assert!(wide.len() > segs.len());
    }

    #[test]
    fn one_sided_wall_is_painted_over_a_step_on_the_same_spot() {
        let mut game = Game::new();
        let lvl = &mut game.level;
        let base = lvl.vertices.len() as u16;
        lvl.vertices.push(Vertex { pos: ivec2(400 << FRACBITS, 600 << FRACBITS) });
        lvl.vertices.push(Vertex { pos: ivec2(600 << FRACBITS, 600 << FRACBITS) });
        lvl.sectors.push(floor(8));
        // wall listed first, step second
        lvl.lines.push(Line {
            v1: base,
            v2: base + 1,
            flags: LineFlags::BLOCKING | LineFlags::MAPPED,
            special: 0,
            front: 0,
            back: None,
        });
        lvl.lines.push(Line {
            v1: base,
            v2: base + 1,
            flags: LineFlags::TWO_SIDED | LineFlags::MAPPED,
            special: 0,
            front: 0,
            back: Some(1),
        });

        let mut am = started(AutomapConfig::default(), &mut game);
        let mut rec = Recorder::new(320, 200);
        am.draw(&game.view(), &mut rec);

        let wall_only = |c: &ColorIndex| NORMAL[0].contains(c) && !NORMAL[1].contains(c);
        let step_only = |c: &ColorIndex| NORMAL[1].contains(c) && !NORMAL[0].contains(c);
        let stepped: Vec<_> = rec.puts.iter().filter(|p| step_only(&p.2)).collect();
        assert!(!stepped.is_empty(), "the step was drawn");
        for p in stepped {
            let last = rec.color_at(p.0, p.1);
            assert!(last.as_ref().is_some_and(wall_only), "({}, {}) ends as {last:?}", p.0, p.1);
        }
    }

    #[test]
    fn spectator_body_is_a_thin_triangle() {
        let mut game = Game::new();
        game.session.spectating = true;
        game.camera.pos = ivec2(700 << FRACBITS, 500 << FRACBITS);
        let body = game.players[0].mobj.unwrap();
        game.world.get::<&mut Mobj>(body).unwrap().radius = 200 << FRACBITS;
        *game.world.get::<&mut Facing>(body).unwrap() = Facing::toward(Angle::ZERO);

        let mut am = started(overlay_cfg(), &mut game);
        let mut rec = Recorder::new(320, 200);
        am.draw(&game.view(), &mut rec);

        let cx = am.viewport().cxmtof(world_to_map(ivec2(500 << FRACBITS, 0)).x);
        let xs: Vec<i32> = rec.puts.iter().filter(|p| p.2 == 35).map(|p| p.0 as i32).collect();
        assert!(!xs.is_empty());
        let east = xs.iter().max().unwrap() - cx;
        let west = cx - xs.iter().min().unwrap();
        // tip one radius east, tail half a radius west
        assert!(east > west * 3 / 2, "east {east} west {west}");
    }

    fn overlay_cfg() -> AutomapConfig {
        AutomapConfig {
            overlay: true,
            follow: false,
            show_level_name: false,
            ..Default::default()
        }
    }

    #[test]
    fn closed_map_draws_nothing() {
        let mut game = Game::new();
        let mut am = started(AutomapConfig::default(), &mut game);
        am.stop();
        let mut rec = Recorder::new(320, 200);
        am.draw(&game.view(), &mut rec);
        assert!(rec.puts.is_empty());
    }

    #[test]
    fn full_screen_map_starts_with_parchment() {
        let mut game = Game::new();
        let mut am = started(AutomapConfig::default(), &mut game);
        let mut rec = Recorder::new(320, 200);
        am.draw(&game.view(), &mut rec);
        assert_eq!(rec.puts[0], (0, 0, PARCH));
        // parchment covers the frame only, not the status bar
        assert!(rec.puts.iter().all(|p| p.1 < 158));
    }

    #[test]
    fn walls_and_crosshair_reach_the_frame() {
        let mut game = Game::new();
        let mut am = started(overlay_cfg(), &mut game);
        let mut rec = Recorder::new(320, 200);
        am.draw(&game.view(), &mut rec);

        assert!(rec.puts.iter().any(|p| OVERLAY[0].contains(&p.2)));
        assert_eq!(rec.color_at(160, 79), Some(40));
        assert_eq!(rec.color_at(158, 79), Some(40));
        assert_eq!(rec.color_at(160, 81), Some(40));
    }

    #[test]
    fn following_hides_the_crosshair() {
        let mut game = Game::new();
        let mut am = started(
            AutomapConfig {
                follow: true,
                ..overlay_cfg()
            },
            &mut game,
        );
        let mut rec = Recorder::new(320, 200);
        am.draw(&game.view(), &mut rec);
        // the player arrow sits in the middle instead, drawn in white
        assert!(rec.puts.iter().any(|p| p.2 == 32));
        assert_ne!(rec.color_at(158, 79), Some(40));
    }

    #[test]
    fn marks_are_stamped_with_their_number() {
        let mut game = Game::new();
        let mut am = started(overlay_cfg(), &mut game);
        let c = am.viewport().center();
        am.set_marks(vec![crate::automap::Mark::at(c)]);

        let mut rec = Recorder::new(320, 200);
        am.draw(&game.view(), &mut rec);

        let fx = am.viewport().cxmtof(c.x) - 1;
        let fy = am.viewport().cymtof(c.y) - 2;
        let color = NORMAL[11][0];
        // top row of a zero is solid
        for dx in 0..3 {
            assert_eq!(rec.color_at((fx + dx) as usize, fy as usize), Some(color));
        }
        // its middle is hollow
        assert_ne!(rec.color_at((fx + 1) as usize, (fy + 2) as usize), Some(color));
    }

    #[test]
    fn thing_cheat_adds_strokes() {
        let count = |cheat| {
            let mut game = Game::new();
            game.world.spawn((
                Position::at(ivec2(560 << FRACBITS, 520 << FRACBITS)),
                Facing::default(),
                Mobj::new(Kind::Other, MobjFlags::COUNTKILL | MobjFlags::SOLID, 20, 60),
            ));
            game.session.cheat = cheat;
            let mut am = started(overlay_cfg(), &mut game);
            let mut rec = Recorder::new(320, 200);
            am.draw(&game.view(), &mut rec);
            rec.puts.len()
        };
        assert!(count(CheatLevel::Things) > count(CheatLevel::Off));
    }

    #[test]
    fn netgame_colours_players_by_slot() {
        let mut game = Game::new();
        game.session.netgame = true;
        let other = game.world.spawn((
            Position::at(ivec2(600 << FRACBITS, 500 << FRACBITS)),
            Facing::default(),
            Mobj::new(Kind::Player(1), MobjFlags::SOLID, 16, 100),
        ));
        game.players.push(Player {
            in_game: true,
            mobj: Some(other),
            ..Default::default()
        });

        let mut am = started(overlay_cfg(), &mut game);
        let mut rec = Recorder::new(320, 200);
        am.draw(&game.view(), &mut rec);
        let has = |c: ColorIndex| rec.puts.iter().any(|p| p.2 == c);
        assert!(has(220), "slot 0 is green");
        assert!(has(144), "slot 1 is yellow");

        // deathmatch hides everyone but the display player
        game.session.deathmatch = true;
        let mut rec = Recorder::new(320, 200);
        am.draw(&game.view(), &mut rec);
        assert!(!rec.puts.iter().any(|p| p.2 == 144));
    }

    #[test]
    fn rotation_keeps_the_player_centred() {
        let mut game = Game::new();
        game.camera.angle = Angle::ZERO;
        let cfg = AutomapConfig {
            rotate: true,
            follow: true,
            overlay: true,
            ..Default::default()
        };
        let mut am = started(cfg, &mut game);
        let mut rec = Recorder::new(320, 200);
        am.draw(&game.view(), &mut rec);
        assert_eq!(am.projection.center, am.viewport().center());
        assert_eq!(am.projection.angle, Some(ANG90));
        // the body still faces north
        assert!(am.map_angle.is_zero());
    }

    #[test]
    fn resized_screen_changes_frame() {
        let mut game = Game::new();
        let mut am = started(overlay_cfg(), &mut game);
        am.resize(
            Screen {
                width: 640,
                height: 400,
                status_bar: 84,
            },
            &game.level,
        )
        .unwrap();
        let mut rec = Recorder::new(640, 400);
        am.draw(&game.view(), &mut rec);
        assert!(rec.puts.iter().any(|p| p.0 >= 320));
        assert!(rec.puts.iter().all(|p| p.1 < 316));
    }
}
