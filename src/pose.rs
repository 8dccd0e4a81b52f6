//! Procedural pose of an articulated bird.
//!
//! A bird is rigged as seven rigid parts hanging off one shared model frame.
//! Each tick the model frame bobs vertically and the wings flap about the
//! forward (z) axis; every other part is a fixed offset. The resulting
//! [`BirdPose`] is consumed both by drawing and by capsule extraction, so what
//! is shown and what can be hit always agree within a tick.
//!
//! # Example
//!
//! ```
//! use duck_hunt::{BirdPose, FlapAnimation, Mat4};
//!
//! let pose = BirdPose::solve(Mat4::IDENTITY, 0.0, &FlapAnimation::default());
//! // At age zero there is no bob, so the model frame is the bird's position.
//! assert_eq!(pose.model, Mat4::IDENTITY);
//! ```

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

/// Scale applied to both wings before they flap.
const WING_SCALE: f32 = 1.2;
/// Wing root offset, in the scaled and rotated wing frame.
const WING_OFFSET: Vec3 = Vec3::new(-2.0, 0.6, 0.8);
const BODY_SCALE: f32 = 1.1;
const BODY_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -1.0);
const NECK_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 2.0);
const HEAD_OFFSET: Vec3 = Vec3::new(0.0, -0.5, 3.75);
const BEAK_OFFSET: Vec3 = Vec3::new(0.0, -0.65, 4.7);
const BEAK_SCALE: f32 = 0.45;
const EYES_OFFSET: Vec3 = Vec3::new(0.0, -0.23, 4.0);
const HALF: f32 = 0.5;

/// Bobbing and flapping parameters shared by every bird in a scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlapAnimation {
    /// Peak vertical displacement of the whole bird.
    pub bob_height: f32,
    /// Angular frequency (radians per second) of both bob and flap.
    pub frequency: f32,
    /// Peak wing rotation in radians.
    pub amplitude: f32,
}

impl Default for FlapAnimation {
    fn default() -> Self {
        Self {
            bob_height: 1.0,
            frequency: 2.0,
            amplitude: 0.6,
        }
    }
}

impl FlapAnimation {
    /// Phase of the shared oscillation, `sin(frequency * age)`.
    #[inline]
    pub fn phase(&self, age: f32) -> f32 {
        (self.frequency * age).sin()
    }

    /// Current wing angle; the left wing uses it as is, the right wing negated.
    #[inline]
    pub fn wing_angle(&self, age: f32) -> f32 {
        self.amplitude * self.phase(age)
    }
}

/// Identifies one rigid part of a bird.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BirdPart {
    Body,
    LeftWing,
    RightWing,
    Neck,
    Head,
    Beak,
    Eyes,
}

impl BirdPart {
    /// All parts, in draw order.
    pub const ALL: [BirdPart; 7] = [
        BirdPart::Body,
        BirdPart::LeftWing,
        BirdPart::RightWing,
        BirdPart::Neck,
        BirdPart::Head,
        BirdPart::Beak,
        BirdPart::Eyes,
    ];
}

/// World transforms of every part of one bird for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BirdPose {
    /// The bobbing frame every part hangs off.
    pub model: Mat4,
    pub body: Mat4,
    pub left_wing: Mat4,
    pub right_wing: Mat4,
    pub neck: Mat4,
    pub head: Mat4,
    pub beak: Mat4,
    pub eyes: Mat4,
}

impl BirdPose {
    /// Solve the pose for a bird at `position` that has been alive for `age` seconds.
    ///
    /// `position` must already include this tick's movement.
    pub fn solve(position: Mat4, age: f32, animation: &FlapAnimation) -> Self {
        let bob = animation.bob_height * animation.phase(age);
        let model = Mat4::from_translation(Vec3::new(0.0, bob, 0.0)) * position;

        let angle = animation.wing_angle(age);
        let wing_base = model * Mat4::from_scale(Vec3::splat(WING_SCALE));
        let wing_root = Mat4::from_translation(WING_OFFSET);
        let left_wing = wing_base * Mat4::from_rotation_z(angle) * wing_root;
        let right_wing = wing_base
            * Mat4::from_rotation_z(-angle)
            * Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0))
            * wing_root;

        let body = model
            * Mat4::from_scale(Vec3::splat(BODY_SCALE))
            * Mat4::from_translation(BODY_OFFSET);
        let neck =
            model * Mat4::from_translation(NECK_OFFSET) * Mat4::from_scale(Vec3::splat(HALF));
        let head = model
            * Mat4::from_translation(HEAD_OFFSET)
            * Mat4::from_scale(Vec3::splat(HALF))
            * Mat4::from_rotation_x(FRAC_PI_2);
        let beak = model
            * Mat4::from_translation(BEAK_OFFSET)
            * Mat4::from_scale(Vec3::splat(BEAK_SCALE));
        let eyes =
            model * Mat4::from_translation(EYES_OFFSET) * Mat4::from_scale(Vec3::splat(HALF));

        Self {
            model,
            body,
            left_wing,
            right_wing,
            neck,
            head,
            beak,
            eyes,
        }
    }

    /// Transform of a single part.
    pub fn part(&self, part: BirdPart) -> Mat4 {
        match part {
            BirdPart::Body => self.body,
            BirdPart::LeftWing => self.left_wing,
            BirdPart::RightWing => self.right_wing,
            BirdPart::Neck => self.neck,
            BirdPart::Head => self.head,
            BirdPart::Beak => self.beak,
            BirdPart::Eyes => self.eyes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin(m: Mat4) -> Vec3 {
        m.transform_point3(Vec3::ZERO)
    }

    #[test]
    fn rest_pose_offsets() {
        let pose = BirdPose::solve(Mat4::IDENTITY, 0.0, &FlapAnimation::default());

        assert!(origin(pose.body).abs_diff_eq(Vec3::new(0.0, 0.0, -1.1), 1e-6));
        assert!(origin(pose.beak).abs_diff_eq(BEAK_OFFSET, 1e-6));
        assert!(origin(pose.neck).abs_diff_eq(NECK_OFFSET, 1e-6));
        // No flap at rest: the wings mirror each other across x = 0.
        let left = origin(pose.left_wing);
        let right = origin(pose.right_wing);
        assert!(left.abs_diff_eq(Vec3::new(-2.4, 0.72, 0.96), 1e-5));
        assert!(right.abs_diff_eq(Vec3::new(2.4, 0.72, 0.96), 1e-5));
    }

    #[test]
    fn bob_moves_every_part_together() {
        let anim = FlapAnimation::default();
        let age = std::f32::consts::FRAC_PI_4; // sin(2 * age) == 1
        let rest = BirdPose::solve(Mat4::IDENTITY, 0.0, &anim);
        let peak = BirdPose::solve(Mat4::IDENTITY, age, &anim);

        let lift = origin(peak.beak) - origin(rest.beak);
        assert!(lift.abs_diff_eq(Vec3::Y, 1e-5));
        let lift = origin(peak.body) - origin(rest.body);
        assert!(lift.abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn wings_flap_in_opposite_directions() {
        let anim = FlapAnimation::default();
        let pose = BirdPose::solve(Mat4::IDENTITY, std::f32::consts::FRAC_PI_4, &anim);
        let left = origin(pose.left_wing) - origin(pose.model);
        let right = origin(pose.right_wing) - origin(pose.model);

        // Mirror images across the body plane.
        assert!((left.x + right.x).abs() < 1e-5);
        assert!((left.y - right.y).abs() < 1e-5);
        // Positive flap tilts the left wing tip downward.
        assert!(left.y < 0.72);
    }

    #[test]
    fn follows_position() {
        let position = Mat4::from_translation(Vec3::new(10.0, 5.0, -3.0));
        let pose = BirdPose::solve(position, 0.0, &FlapAnimation::default());
        assert!(origin(pose.beak).abs_diff_eq(Vec3::new(10.0, 4.35, 1.7), 1e-5));
        assert_eq!(pose.part(BirdPart::Eyes), pose.eyes);
    }
}
