use std::ops::{Index, IndexMut};

use super::{ColorIndex, Rgba};

/// Number of light tables in a COLORMAP lump we keep.
pub const COLORMAP_TABLES: usize = 34;

/// Palette index → 0x00RRGGBB.
#[derive(Clone)]
pub struct Palette(pub [Rgba; 256]);

impl Default for Palette {
    /// Grey ramp, handy when no PLAYPAL is around.
    fn default() -> Self {
        let mut pal = [0u32; 256];
        for (i, c) in pal.iter_mut().enumerate() {
            let v = i as u32;
            *c = v << 16 | v << 8 | v;
        }
        Palette(pal)
    }
}

impl Palette {
    /// Build from the first 768 bytes of a PLAYPAL lump.
    pub fn from_playpal(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 256 * 3 {
            return None;
        }
        let mut pal = Palette([0; 256]);
        for (i, rgb) in bytes.chunks_exact(3).take(256).enumerate() {
            pal[i] = (rgb[0] as u32) << 16 | (rgb[1] as u32) << 8 | rgb[2] as u32;
        }
        Some(pal)
    }
}

impl Index<usize> for Palette {
    type Output = Rgba;
    fn index(&self, idx: usize) -> &Rgba {
        &self.0[idx]
    }
}

impl IndexMut<usize> for Palette {
    fn index_mut(&mut self, idx: usize) -> &mut Rgba {
        &mut self.0[idx]
    }
}

/// Light-diminishing tables: `cm[level][index]` is `index` seen at `level`.
#[derive(Clone)]
pub struct Colormap(pub Box<[[ColorIndex; 256]; COLORMAP_TABLES]>);

impl Default for Colormap {
    /// Identity tables.
    fn default() -> Self {
        let mut row = [0u8; 256];
        for (i, c) in row.iter_mut().enumerate() {
            *c = i as u8;
        }
        Colormap(Box::new([row; COLORMAP_TABLES]))
    }
}

impl Colormap {
    /// Build from a COLORMAP lump (at least 34 × 256 bytes).
    pub fn from_lump(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < COLORMAP_TABLES * 256 {
            return None;
        }
        let mut cm = Colormap::default();
        for (table, src) in cm.0.iter_mut().zip(bytes.chunks_exact(256)) {
            table.copy_from_slice(src);
        }
        Some(cm)
    }
}

impl Index<usize> for Colormap {
    type Output = [ColorIndex; 256];
    fn index(&self, idx: usize) -> &Self::Output {
        &self.0[idx]
    }
}

impl IndexMut<usize> for Colormap {
    fn index_mut(&mut self, idx: usize) -> &mut [ColorIndex; 256] {
        &mut self.0[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playpal_packs_rgb() {
        let mut raw = vec![0u8; 768];
        raw[3..6].copy_from_slice(&[0x12, 0x34, 0x56]);
        let pal = Palette::from_playpal(&raw).unwrap();
        assert_eq!(pal[1], 0x12_34_56);
        assert!(Palette::from_playpal(&raw[..700]).is_none());
    }

    #[test]
    fn colormap_needs_full_lump() {
        let raw: Vec<u8> = (0..COLORMAP_TABLES * 256).map(|i| (i / 256) as u8).collect();
        let cm = Colormap::from_lump(&raw).unwrap();
        assert_eq!(cm[5][200], 5);
        assert!(Colormap::from_lump(&raw[..256]).is_none());
    }
}
