//! Visible window in map space, the frame rectangle it maps onto and the
//! scale factors between them.
//!
//! Map → frame goes through `scale_mtof`, frame → map through
//! `scale_ftom`; the two are kept reciprocal by [`Viewport::set_scale`].
//! Both conversions widen to 64 bits before multiplying.

use glam::{IVec2, ivec2};

use super::AutomapError;
use super::config::{INIT_SCALE_MTOF, INIT_ZOOM_FRACTION, Screen};
use super::transform::MapPoint;
use crate::math::{FRACBITS, FRACUNIT, Fixed, fixed_div, fixed_mul};
use crate::renderer::FramePoint;

/// Outcome of a zoom step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomLimit {
    Free,
    /// Hit the whole-level scale.
    Min,
    /// Hit the closest zoom.
    Max,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// Frame rectangle in pixels.
    pub frame_origin: IVec2,
    pub frame_size: IVec2,

    /// Lower-left corner of the window in map space.
    pub map_min: MapPoint,
    pub map_size: MapPoint,

    pub scale_mtof: Fixed,
    pub scale_ftom: Fixed,

    pub min_scale_mtof: Fixed,
    pub max_scale_mtof: Fixed,

    /// Level bounding box, the window centre is kept inside it.
    pub level_min: MapPoint,
    pub level_max: MapPoint,

    // values at the start of the current tic, for interpolation
    prev_scale_mtof: Fixed,
    prev_map_min: MapPoint,

    // max-zoom toggle
    saved_min: MapPoint,
    saved_size: MapPoint,
}

impl Viewport {
    pub fn new(screen: Screen) -> Self {
        let mut vp = Self {
            frame_origin: IVec2::ZERO,
            frame_size: ivec2(screen.width.max(1), screen.frame_height()),
            map_min: MapPoint::ZERO,
            map_size: MapPoint::ZERO,
            scale_mtof: INIT_SCALE_MTOF,
            scale_ftom: 0,
            min_scale_mtof: INIT_SCALE_MTOF,
            max_scale_mtof: INIT_SCALE_MTOF,
            level_min: MapPoint::ZERO,
            level_max: MapPoint::ZERO,
            prev_scale_mtof: INIT_SCALE_MTOF,
            prev_map_min: MapPoint::ZERO,
            saved_min: MapPoint::ZERO,
            saved_size: MapPoint::ZERO,
        };
        vp.set_scale(INIT_SCALE_MTOF);
        vp.map_size = vp.frame_extent();
        vp
    }

    /*──────────────────────── conversions ─────────────────────────*/

    /// Frame pixels → map units.
    #[inline]
    pub fn ftom(&self, px: i64) -> i64 {
        ((px << FRACBITS) * self.scale_ftom as i64) >> FRACBITS
    }

    /// Map units → frame pixels.
    #[inline]
    pub fn mtof(&self, m: i64) -> i64 {
        ((m * self.scale_mtof as i64) >> FRACBITS) >> FRACBITS
    }

    #[inline]
    pub fn cxmtof(&self, x: i64) -> i32 {
        self.frame_origin.x + self.mtof(x - self.map_min.x) as i32
    }

    #[inline]
    pub fn cymtof(&self, y: i64) -> i32 {
        self.frame_origin.y + (self.frame_size.y - self.mtof(y - self.map_min.y) as i32)
    }

    /// Map point → frame pixel (y grows downward on screen).
    #[inline]
    pub fn to_frame(&self, p: MapPoint) -> FramePoint {
        ivec2(self.cxmtof(p.x), self.cymtof(p.y))
    }

    /// Frame pixel → map point.
    pub fn to_map(&self, f: FramePoint) -> MapPoint {
        let dx = (f.x - self.frame_origin.x) as i64;
        let dy = (self.frame_size.y - (f.y - self.frame_origin.y)) as i64;
        MapPoint::new(self.map_min.x + self.ftom(dx), self.map_min.y + self.ftom(dy))
    }

    /// Snap a map point to the pixel grid so followed objects do not jitter.
    #[inline]
    pub fn snap(&self, p: MapPoint) -> MapPoint {
        MapPoint::new(self.ftom(self.mtof(p.x)), self.ftom(self.mtof(p.y)))
    }

    /// Map-space size of the whole frame at the current scale.
    #[inline]
    fn frame_extent(&self) -> MapPoint {
        MapPoint::new(
            self.ftom(self.frame_size.x as i64),
            self.ftom(self.frame_size.y as i64),
        )
    }

    /*──────────────────────── geometry ────────────────────────────*/

    #[inline]
    pub fn map_max(&self) -> MapPoint {
        self.map_min + self.map_size
    }

    #[inline]
    pub fn center(&self) -> MapPoint {
        self.map_min + self.map_size / 2
    }

    pub fn center_on(&mut self, p: MapPoint) {
        self.map_min = p - self.map_size / 2;
    }

    /*──────────────────────── scale ───────────────────────────────*/

    pub fn set_scale(&mut self, mtof: Fixed) {
        self.scale_mtof = mtof;
        self.scale_ftom = fixed_div(FRACUNIT, mtof);
    }

    /// Re-derive the window size after a scale change, keeping the centre.
    pub fn activate_new_scale(&mut self) {
        let c = self.center();
        self.map_size = self.frame_extent();
        self.center_on(c);
    }

    /// Zoom all the way out.
    pub fn min_out(&mut self) {
        self.set_scale(self.min_scale_mtof);
        self.activate_new_scale();
    }

    /// Zoom all the way in.
    pub fn max_out(&mut self) {
        self.set_scale(self.max_scale_mtof);
        self.activate_new_scale();
    }

    /// Multiply the scale by `mul`, clamped to the level's zoom range.
    pub fn zoom(&mut self, mul: Fixed) -> ZoomLimit {
        self.set_scale(fixed_mul(self.scale_mtof, mul));
        if self.scale_mtof < self.min_scale_mtof {
            self.min_out();
            ZoomLimit::Min
        } else if self.scale_mtof > self.max_scale_mtof {
            self.max_out();
            ZoomLimit::Max
        } else {
            self.activate_new_scale();
            ZoomLimit::Free
        }
    }

    /// Measure a level and derive the zoom range from it.
    ///
    /// With `prev_frame_h` set the current scale is carried over,
    /// proportionally to the new frame height.
    pub fn fit_level(
        &mut self,
        lo: MapPoint,
        hi: MapPoint,
        prev_frame_h: Option<i32>,
    ) -> Result<(), AutomapError> {
        let span = hi - lo;
        if span.x <= 0 || span.y <= 0 || span.x > i32::MAX as i64 || span.y > i32::MAX as i64 {
            return Err(AutomapError::DegenerateBounds {
                width: span.x,
                height: span.y,
            });
        }
        self.level_min = lo;
        self.level_max = hi;

        let fw = self.frame_size.x << FRACBITS;
        let fh = self.frame_size.y << FRACBITS;
        let a = fixed_div(fw, span.x as Fixed);
        let b = fixed_div(fh, span.y as Fixed);
        self.min_scale_mtof = a.min(b);
        self.max_scale_mtof = fixed_div(fh, 2 * FRACUNIT);

        let mut scale = match prev_frame_h {
            Some(old) if old > 0 => {
                (self.scale_mtof as i64 * self.frame_size.y as i64 / old as i64) as Fixed
            }
            _ => fixed_div(self.min_scale_mtof, INIT_ZOOM_FRACTION),
        };
        if scale > self.max_scale_mtof {
            scale = self.min_scale_mtof;
        }
        self.set_scale(scale);
        Ok(())
    }

    /// Window size at the current scale, centred on `p`.
    pub fn open_at(&mut self, p: MapPoint) {
        self.map_size = self.frame_extent();
        self.center_on(p);
    }

    /*──────────────────────── pan ─────────────────────────────────*/

    /// Move the window to `prev + inc`, keeping its centre inside the level.
    pub fn pan(&mut self, inc: MapPoint) {
        let half = self.map_size / 2;
        let mut min = self.prev_map_min + inc;

        if min.x + half.x > self.level_max.x {
            min.x = self.level_max.x - half.x;
        } else if min.x + half.x < self.level_min.x {
            min.x = self.level_min.x - half.x;
        }

        if min.y + half.y > self.level_max.y {
            min.y = self.level_max.y - half.y;
        } else if min.y + half.y < self.level_min.y {
            min.y = self.level_min.y - half.y;
        }

        self.map_min = min;
    }

    /*──────────────────────── tic bookkeeping ─────────────────────*/

    /// Remember where this tic starts.
    pub fn begin_tic(&mut self) {
        self.prev_scale_mtof = self.scale_mtof;
        self.prev_map_min = self.map_min;
    }

    /// Scale at the start of the tic; interpolated zoom restarts from it.
    #[inline]
    pub fn tic_scale(&self) -> Fixed {
        self.prev_scale_mtof
    }

    pub fn save(&mut self) {
        self.saved_min = self.map_min;
        self.saved_size = self.map_size;
    }

    /// Bring back the saved window. When following, re-centre on `follow`.
    pub fn restore(&mut self, follow: Option<MapPoint>) {
        self.map_size = self.saved_size;
        match follow {
            Some(p) => self.center_on(p),
            None => self.map_min = self.saved_min,
        }
        self.set_scale(fixed_div(
            self.frame_size.x << FRACBITS,
            self.map_size.x.clamp(1, i32::MAX as i64) as Fixed,
        ));
    }
}
