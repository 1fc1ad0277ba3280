//! ---------------------------------------------------------------------------
//! Software line rasterizers for the automap
//!
//! * [`draw_solid_line`] – integer Bresenham, one palette index per pixel.
//! * [`draw_antialiased_line`] – Wu stepper blending through an 8-entry ramp,
//!   with the map fading out near the frame edges.
//!
//! Both write through [`Plotter`], which owns the horizontal flip used by
//! mirrored levels and the final bounds check.
//! ---------------------------------------------------------------------------

mod bresenham;
mod wu;

pub use bresenham::draw_solid_line;
pub use wu::{draw_antialiased_line, fade_index, wu_line};

use super::{ColorIndex, Ramp, Surface};

/// Width in pixels of the fade band along the frame edges.
pub const EDGE_FADE: i32 = 32;

/// Pixel writer bound to one surface for the duration of a frame.
pub struct Plotter<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    width: i32,
    height: i32,
    flip: bool,
}

impl<'a, S: Surface + ?Sized> Plotter<'a, S> {
    /// `height` is the automap frame height, which may stop short of the
    /// surface (status bar below).
    pub fn new(surface: &'a mut S, height: i32, flip: bool) -> Self {
        let width = surface.width() as i32;
        let height = height.min(surface.height() as i32);
        Self {
            surface,
            width,
            height,
            flip,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    /// Write one pixel, mirrored when levels are flipped.
    /// Anything outside the frame is dropped.
    #[inline]
    pub fn dot(&mut self, x: i32, y: i32, color: ColorIndex) {
        if !self.contains(x, y) {
            return;
        }
        let x = self.mirror_x(x);
        self.surface.put(x as usize, y as usize, color);
    }

    /// Column `x` lands on once the flip is applied.
    #[inline]
    pub fn mirror_x(&self, x: i32) -> i32 {
        if self.flip { self.width - 1 - x } else { x }
    }

    /// Write one pixel at its final column, bypassing the flip.
    /// Used for bitmaps that must read the same way on mirrored levels.
    #[inline]
    pub fn stamp(&mut self, x: i32, y: i32, color: ColorIndex) {
        if self.contains(x, y) {
            self.surface.put(x as usize, y as usize, color);
        }
    }

    /// Ramp-weighted write with edge fade applied on top of `weight`.
    #[inline]
    pub fn faded_dot(&mut self, x: i32, y: i32, ramp: &Ramp, weight: u8, cap: Option<u8>) {
        let idx = fade_index(x, y, self.width, self.height, weight, cap);
        self.dot(x, y, ramp[idx]);
    }

    /// Direct access for glyph stamping and background passes.
    pub fn surface(&mut self) -> &mut S {
        &mut *self.surface
    }
}
