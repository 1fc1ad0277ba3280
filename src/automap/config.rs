//! User settings, screen geometry and the fixed tuning constants.

use bincode::{Decode, Encode};

use crate::math::{FRACBITS, FRACUNIT, Fixed};

/*──────────────────────────── constants ────────────────────────────*/

/// Fractional bits kept in map space.
pub const MAPBITS: u32 = 12;
/// World → map shift.
pub const FRACTOMAPBITS: u32 = FRACBITS - MAPBITS;

/// Scale the map opens with before a level has been measured.
pub const INIT_SCALE_MTOF: Fixed = (0.2 * FRACUNIT as f64) as Fixed;
/// Initial zoom is this fraction of the whole-level scale.
pub const INIT_ZOOM_FRACTION: Fixed = (0.7 * FRACUNIT as f64) as Fixed;

/// Grid spacing in world units (one blockmap cell).
pub const GRID_BLOCK_UNITS: i64 = 128;

/// Width of a mark digit cell in pixels.
pub const MARK_W: i32 = 5;

/// Height of the original background page.
pub const BACKGROUND_W: usize = 320;
pub const BACKGROUND_H: usize = 158;

/// Pan and zoom rates picked by the run modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Speed {
    /// Frame pixels panned per tic.
    pub pan: i32,
    /// Rate fed into the smoothed zoom when the pacer interpolates.
    pub pan_zoom: i32,
    pub zoom_in: Fixed,
    pub zoom_out: Fixed,
    pub wheel_in: Fixed,
    pub wheel_out: Fixed,
}

const fn ratio(r: f64) -> Fixed {
    (r * FRACUNIT as f64) as Fixed
}

const fn inverse(r: f64) -> Fixed {
    (FRACUNIT as f64 / r) as Fixed
}

pub const SLOW: Speed = Speed {
    pan: 4,
    pan_zoom: 8,
    zoom_in: ratio(1.04),
    zoom_out: inverse(1.04),
    wheel_in: ratio(1.08),
    wheel_out: inverse(1.08),
};

pub const FAST: Speed = Speed {
    pan: 8,
    pan_zoom: 16,
    zoom_in: ratio(1.08),
    zoom_out: inverse(1.08),
    wheel_in: ratio(1.5),
    wheel_out: inverse(1.5),
};

impl Speed {
    #[inline]
    pub fn pick(run: bool) -> Self {
        if run { FAST } else { SLOW }
    }
}

/*──────────────────────────── settings ─────────────────────────────*/

/// How much the map gives away about secret sectors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Encode, Decode)]
pub enum SecretReveal {
    #[default]
    Off,
    /// Secrets the player already found.
    Revealed,
    /// Every secret, found or not.
    Always,
}

/// Persistent automap options, owned by the settings layer.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct AutomapConfig {
    /// Keep the player heading pointing up.
    pub rotate: bool,
    /// Draw over the 3D view instead of the background page.
    pub overlay: bool,
    /// Squash map y by 5/6 to undo non-square pixels.
    pub square_aspect: bool,
    pub secrets: SecretReveal,
    /// Overlay darkening, 0 (off) ..= 12.
    pub shading: u8,
    /// Levels are mirrored horizontally.
    pub flip_levels: bool,
    pub show_level_name: bool,
    pub grid: bool,
    pub follow: bool,
}

impl Default for AutomapConfig {
    fn default() -> Self {
        Self {
            rotate: false,
            overlay: false,
            square_aspect: false,
            secrets: SecretReveal::Off,
            shading: 0,
            flip_levels: false,
            show_level_name: true,
            grid: false,
            follow: true,
        }
    }
}

impl AutomapConfig {
    pub const MAX_SHADING: u8 = 12;

    /// Clamp values coming from an untrusted settings file.
    pub fn sanitized(mut self) -> Self {
        self.shading = self.shading.min(Self::MAX_SHADING);
        self
    }

    pub fn encode(&self) -> Result<Vec<u8>, bincode::error::EncodeError> {
        bincode::encode_to_vec(self, bincode::config::standard())
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, bincode::error::DecodeError> {
        let (cfg, _): (Self, usize) = bincode::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(cfg.sanitized())
    }
}

/// Screen the automap draws into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Screen {
    pub width: i32,
    pub height: i32,
    /// Rows at the bottom reserved for the status bar.
    pub status_bar: i32,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            width: 320,
            height: 200,
            status_bar: 42,
        }
    }
}

impl Screen {
    /// Height of the map frame above the status bar.
    #[inline]
    pub fn frame_height(&self) -> i32 {
        (self.height - self.status_bar).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_factors_match_fixed_point_ratios() {
        assert_eq!(SLOW.zoom_in, 68157);
        assert_eq!(SLOW.zoom_out, 63015);
        assert_eq!(FAST.zoom_in, 70778);
        assert_eq!(FAST.zoom_out, 60681);
        assert_eq!(FAST.wheel_in, 98304);
        assert_eq!(INIT_SCALE_MTOF, 13107);
    }

    #[test]
    fn config_survives_bincode() {
        let cfg = AutomapConfig {
            rotate: true,
            secrets: SecretReveal::Always,
            shading: 40,
            ..Default::default()
        };
        let bytes = cfg.encode().unwrap();
        let back = AutomapConfig::decode(&bytes).unwrap();
        assert!(back.rotate);
        assert_eq!(back.secrets, SecretReveal::Always);
        assert_eq!(back.shading, AutomapConfig::MAX_SHADING);
    }

    #[test]
    fn frame_excludes_status_bar() {
        assert_eq!(Screen::default().frame_height(), 158);
    }
}
