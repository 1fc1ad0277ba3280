//! Rendering abstraction layer.
//!
//! *The automap never touches a pixel buffer directly.*
//! It resolves every stroke to a palette index and hands it to a type that
//! implements [`Surface`].
//!
//! * [`IndexedFrame`] keeps 8-bit palette indices, like the original video
//!   buffer, and shades through a [`Colormap`].
//! * [`TrueColorFrame`] resolves indices through a [`Palette`] on write and
//!   can be handed straight to a window.
//!
//! The line rasterizers in [`software`] sit on top of this trait.

use glam::IVec2;

mod frame;
mod palette;
pub mod software;

pub use frame::{IndexedFrame, TrueColorFrame};
pub use palette::{COLORMAP_TABLES, Colormap, Palette};

/// Pixel format of the true-colour frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Logical colour: an index into the game palette.
pub type ColorIndex = u8;

/// Number of intensity steps in an antialiasing ramp.
pub const NUMLEVELS: usize = 8;
/// `log2(NUMLEVELS)`.
pub const INTENSITY_BITS: u32 = 3;

/// Colour ramp from full intensity (0) to background (7).
pub type Ramp = [ColorIndex; NUMLEVELS];

/// Integer pixel position inside the frame.
pub type FramePoint = IVec2;

/// A projected, clipped line ready for rasterization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameSegment {
    pub a: FramePoint,
    pub b: FramePoint,
}

impl FrameSegment {
    pub fn new(a: FramePoint, b: FramePoint) -> Self {
        Self { a, b }
    }
}

/// A linear pixel buffer owned by the display layer.
///
/// `put` is only ever called with coordinates inside
/// `0..width() × 0..height()`.
pub trait Surface {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Write one palette index.
    fn put(&mut self, x: usize, y: usize, color: ColorIndex);

    /// Darken the top `rows` rows by `level` steps; 0 leaves them untouched.
    fn shade(&mut self, rows: usize, level: u8);

    /// Repeat a raw `tile_w × tile_h` image over the top `rows` rows.
    fn tile(&mut self, raw: &[ColorIndex], tile_w: usize, tile_h: usize, rows: usize) {
        if tile_w == 0 || tile_h == 0 || raw.len() < tile_w * tile_h {
            return;
        }
        let rows = rows.min(self.height());
        for y in 0..rows {
            let src = &raw[(y % tile_h) * tile_w..][..tile_w];
            for x in 0..self.width() {
                self.put(x, y, src[x % tile_w]);
            }
        }
    }

    /// Draw a text label; surfaces without a font ignore it.
    fn label(&mut self, _x: i32, _y: i32, _text: &str) {}
}
