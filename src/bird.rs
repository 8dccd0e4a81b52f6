//! Birds crossing the scene.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

use crate::capsule::origin_of;
use crate::pose::{BirdPose, FlapAnimation};

/// Which way along world x a bird flies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Toward -x.
    Left,
    /// Toward +x.
    Right,
}

impl Heading {
    /// `-1.0` for [`Heading::Left`], `1.0` for [`Heading::Right`].
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Heading::Left => -1.0,
            Heading::Right => 1.0,
        }
    }
}

/// A live bird.
///
/// Stored as an ECS component next to the [`BirdPose`] and
/// [`BirdCapsules`](crate::BirdCapsules) recomputed for it every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bird {
    /// Origin of the bird's local frame, without the animation bob.
    pub position: Mat4,
    /// Scene time at which the bird appeared.
    pub creation_time: f32,
    /// World-space displacement applied each tick.
    pub velocity: Vec3,
    pub heading: Heading,
}

impl Bird {
    pub fn new(position: Mat4, creation_time: f32, heading: Heading, speed: f32) -> Self {
        Self {
            position,
            creation_time,
            velocity: Vec3::new(heading.sign() * speed, 0.0, 0.0),
            heading,
        }
    }

    /// Place a bird `lateral_offset` units behind the line x = 0, facing along its heading.
    ///
    /// ```
    /// use duck_hunt::{Bird, Heading};
    ///
    /// let bird = Bird::entering(Heading::Right, 80.0, 10.0, -5.0, 0.0, 0.05);
    /// assert_eq!(bird.world_position().x, -80.0);
    /// ```
    pub fn entering(
        heading: Heading,
        lateral_offset: f32,
        height: f32,
        depth: f32,
        creation_time: f32,
        speed: f32,
    ) -> Self {
        let start = Vec3::new(-lateral_offset * heading.sign(), height, depth);
        let position =
            Mat4::from_translation(start) * Mat4::from_rotation_y(heading.sign() * FRAC_PI_2);
        Self::new(position, creation_time, heading, speed)
    }

    /// Seconds since the bird appeared.
    #[inline]
    pub fn age(&self, now: f32) -> f32 {
        now - self.creation_time
    }

    /// Move one tick along `velocity`.
    pub fn advance(&mut self) {
        self.position = Mat4::from_translation(self.velocity) * self.position;
    }

    /// Pose for the current position at scene time `now`.
    pub fn pose(&self, now: f32, animation: &FlapAnimation) -> BirdPose {
        BirdPose::solve(self.position, self.age(now), animation)
    }

    /// World origin of the bird's frame.
    #[inline]
    pub fn world_position(&self) -> Vec3 {
        origin_of(self.position)
    }

    /// Whether the bird has flown past `limit` in its direction of travel.
    pub fn has_escaped(&self, limit: f32) -> bool {
        self.world_position().x * self.heading.sign() > limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entering_bird_faces_its_heading() {
        for heading in [Heading::Left, Heading::Right] {
            let bird = Bird::entering(heading, 80.0, 7.0, -3.0, 0.0, 0.05);
            let pose = bird.pose(0.0, &FlapAnimation::default());
            let nose = origin_of(pose.beak) - origin_of(pose.body);
            assert_eq!(nose.x.signum(), heading.sign());
            assert_eq!(bird.velocity.x.signum(), heading.sign());
        }
    }

    #[test]
    fn fresh_bird_is_in_bounds() {
        for heading in [Heading::Left, Heading::Right] {
            let bird = Bird::entering(heading, 80.0, 7.0, -3.0, 2.0, 0.05);
            assert!(!bird.has_escaped(68.0));
        }
    }

    #[test]
    fn advance_translates_in_world_space() {
        let mut bird = Bird::entering(Heading::Left, 80.0, 7.0, -3.0, 0.0, 0.05);
        for _ in 0..100 {
            bird.advance();
        }
        let expected = Vec3::new(80.0 - 5.0, 7.0, -3.0);
        assert!(bird.world_position().abs_diff_eq(expected, 1e-3));
    }
}
