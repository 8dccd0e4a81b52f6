//! Turning a pointer position into a shot.
//!
//! The gun sits in front of the camera and swivels toward the pointer. The
//! pointer is mapped into world units (`1/20` per pixel, with height clamped
//! to `0..=15`), and two aim angles are measured against a target plane 40
//! units away. From those angles a projectile gets a start point just behind
//! the muzzle and an end point far downrange.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Vec3};

const PIXELS_PER_UNIT: f32 = 20.0;
const MAX_HEIGHT: f32 = 15.0;
const TARGET_DISTANCE: f32 = 40.0;

/// Where the player is aiming, in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aim {
    pub x: f32,
    pub y: f32,
}

impl Aim {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Aim from a pointer position in pixels, clamping height to the playfield.
    ///
    /// ```
    /// use duck_hunt::Aim;
    ///
    /// let aim = Aim::from_pointer(100.0, 1000.0);
    /// assert_eq!(aim.x, 5.0);
    /// assert_eq!(aim.y, 15.0);
    /// ```
    pub fn from_pointer(px: f32, py: f32) -> Self {
        Self {
            x: px / PIXELS_PER_UNIT,
            y: (py / PIXELS_PER_UNIT).clamp(0.0, MAX_HEIGHT),
        }
    }

    /// Horizontal aim angle.
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.x.atan2(TARGET_DISTANCE)
    }

    /// Vertical aim angle.
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.y.atan2(TARGET_DISTANCE)
    }

    /// Start and end points of a shot fired with this aim.
    pub fn launch_points(&self) -> (Vec3, Vec3) {
        let (sin_yaw, sin_pitch) = (self.yaw().sin(), self.pitch().sin());
        let start = Vec3::new(self.x - sin_yaw * 25.0, self.y - sin_pitch * 25.0, 50.0);
        let end = Vec3::new(
            self.x + sin_yaw * 220.0,
            self.y + sin_pitch * 245.0 - 20.0,
            -50.0,
        );
        (start, end)
    }

    /// Where to draw the gun model for this aim.
    pub fn weapon_transform(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(self.x / 10.0, 5.0 + self.y / 5.0, 40.0))
            * Mat4::from_rotation_x(-FRAC_PI_2)
            * Mat4::from_rotation_z(PI - 2.0 * self.yaw())
            * Mat4::from_rotation_x(-2.0 * self.pitch())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_aim_fires_straight_downrange() {
        let (start, end) = Aim::default().launch_points();
        assert_eq!(start, Vec3::new(0.0, 0.0, 50.0));
        assert_eq!(end, Vec3::new(0.0, -20.0, -50.0));
    }

    #[test]
    fn pointer_below_playfield_is_clamped() {
        assert_eq!(Aim::from_pointer(-40.0, -60.0), Aim::new(-2.0, 0.0));
    }

    #[test]
    fn aiming_right_moves_shot_right() {
        let (start, end) = Aim::new(10.0, 5.0).launch_points();
        assert!(end.x > 10.0);
        assert!(start.x < 10.0);
        assert!(end.y > -20.0);
    }

    #[test]
    fn weapon_sits_in_front_of_camera() {
        let muzzle = Aim::new(10.0, 5.0).weapon_transform().transform_point3(Vec3::ZERO);
        assert!(muzzle.abs_diff_eq(Vec3::new(1.0, 6.0, 40.0), 1e-5));
    }
}
