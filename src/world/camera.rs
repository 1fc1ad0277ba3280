use glam::IVec2;

use crate::math::{ANG90, Angle};

/// Interpolated view point handed over by the frame pacer.
///
/// * `pos` is world-space 16.16 fixed point.
/// * `angle` is the view heading (0 = east, counter-clockwise).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Camera {
    pub pos: IVec2,
    pub angle: Angle,
}

impl Camera {
    pub fn new(pos: IVec2, angle: Angle) -> Self {
        Self { pos, angle }
    }

    /// Rotation that turns the map so the view heading points up.
    #[inline]
    pub fn heading_up(&self) -> Angle {
        ANG90 - self.angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{ANG180, ANG270};
    use glam::ivec2;

    #[test]
    fn facing_north_needs_no_rotation() {
        let cam = Camera::new(ivec2(0, 0), ANG90);
        assert!(cam.heading_up().is_zero());
    }

    #[test]
    fn facing_east_rotates_quarter_turn() {
        assert_eq!(Camera::new(IVec2::ZERO, Angle::ZERO).heading_up(), ANG90);
        assert_eq!(Camera::new(IVec2::ZERO, ANG180).heading_up(), ANG270);
    }
}
