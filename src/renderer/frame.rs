//! Owned frame-buffers implementing [`Surface`].

use super::{ColorIndex, Colormap, Palette, Rgba, Surface};

/// Colormap row used for overlay shading step `level` (1 ..= 12).
#[inline]
fn shade_table(level: u8) -> usize {
    (level as usize + 3) * 2
}

/// 8-bit palette-indexed frame, the classic video buffer layout.
#[derive(Default)]
pub struct IndexedFrame {
    pub pixels: Vec<ColorIndex>,
    width: usize,
    height: usize,
    colormap: Option<Colormap>,
}

impl IndexedFrame {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height],
            width,
            height,
            colormap: None,
        }
    }

    pub fn with_colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = Some(colormap);
        self
    }

    #[inline]
    pub fn at(&self, x: usize, y: usize) -> ColorIndex {
        self.pixels[y * self.width + x]
    }

    pub fn fill(&mut self, color: ColorIndex) {
        self.pixels.fill(color);
    }
}

impl Surface for IndexedFrame {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn put(&mut self, x: usize, y: usize, color: ColorIndex) {
        self.pixels[y * self.width + x] = color;
    }

    fn shade(&mut self, rows: usize, level: u8) {
        let Some(cm) = &self.colormap else { return };
        if level == 0 {
            return;
        }
        let table = &cm[shade_table(level).min(cm.0.len() - 1)];
        let end = rows.min(self.height) * self.width;
        for px in &mut self.pixels[..end] {
            *px = table[*px as usize];
        }
    }
}

/// 0x00RRGGBB frame; indices are resolved through the palette on write.
#[derive(Default)]
pub struct TrueColorFrame {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
    palette: Palette,
}

impl TrueColorFrame {
    pub fn new(width: usize, height: usize, palette: Palette) -> Self {
        Self {
            scratch: vec![0; width * height],
            width,
            height,
            palette,
        }
    }

    /// (Re)allocate for the requested resolution and clear to black.
    pub fn begin_frame(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.scratch.resize(width * height, 0);
        }
        self.scratch.fill(0);
    }

    /// Loan the finished buffer to `submit`, e.g. a window update.
    pub fn present<F>(&self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }

    #[inline]
    pub fn at(&self, x: usize, y: usize) -> Rgba {
        self.scratch[y * self.width + x]
    }
}

impl Surface for TrueColorFrame {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn put(&mut self, x: usize, y: usize, color: ColorIndex) {
        self.scratch[y * self.width + x] = self.palette[color as usize];
    }

    fn shade(&mut self, rows: usize, level: u8) {
        if level == 0 {
            return;
        }
        // same light step as the colormap row, out of 32
        let keep = 32u32.saturating_sub(shade_table(level) as u32);
        let end = rows.min(self.height) * self.width;
        for px in &mut self.scratch[..end] {
            let c = *px;
            let r = ((c >> 16) & 0xFF) * keep / 32;
            let g = ((c >> 8) & 0xFF) * keep / 32;
            let b = (c & 0xFF) * keep / 32;
            *px = r << 16 | g << 8 | b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_shade_goes_through_colormap() {
        let mut cm = Colormap::default();
        cm[shade_table(2)][7] = 99;
        let mut fb = IndexedFrame::new(4, 4).with_colormap(cm);
        fb.fill(7);
        fb.shade(2, 2);
        assert_eq!(fb.at(3, 1), 99);
        assert_eq!(fb.at(0, 2), 7, "rows below the limit stay untouched");
    }

    #[test]
    fn truecolor_put_resolves_palette() {
        let mut pal = Palette::default();
        pal[9] = 0x00_FF_00_00;
        let mut fb = TrueColorFrame::new(2, 2, pal);
        fb.put(1, 1, 9);
        assert_eq!(fb.at(1, 1), 0x00_FF_00_00);
        fb.shade(2, 1);
        assert_eq!(fb.at(1, 1), (0xFF * 24 / 32) << 16);
    }

    #[test]
    fn tile_repeats_source() {
        let mut fb = IndexedFrame::new(5, 3);
        fb.tile(&[1, 2, 3, 4], 2, 2, 3);
        assert_eq!(fb.pixels, vec![1, 2, 1, 2, 1, 3, 4, 3, 4, 3, 1, 2, 1, 2, 1]);
    }

    #[test]
    fn present_hands_out_whole_buffer() {
        let mut fb = TrueColorFrame::default();
        fb.begin_frame(3, 2);
        let mut seen = 0;
        fb.present(|px, w, h| seen = px.len() + w + h);
        assert_eq!(seen, 6 + 3 + 2);
    }
}
