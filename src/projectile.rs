//! Projectiles fired at the birds.
//!
//! Two motion models exist. [`ProjectileMotion::Interpolated`] is closed-form:
//! the position at any age is a linear blend of fixed start and end points, so
//! it does not depend on frame rate. [`ProjectileMotion::Ballistic`] integrates
//! a launch velocity under a constant downward pull, one step per tick.

use glam::{Mat4, Vec3};

use crate::capsule::origin_of;
use crate::collision::Sphere;

/// How a projectile travels after launch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProjectileMotion {
    /// `start * (1 - rate * age) + end * rate * age`.
    ///
    /// Arrives at `end` when `age == 1 / rate` and keeps extrapolating past it.
    Interpolated { rate: f32 },
    /// Per tick, translate by `launch_velocity - (0, gravity * age, 0)`.
    Ballistic { launch_velocity: Vec3, gravity: f32 },
}

/// A live projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    pub start_point: Vec3,
    pub end_point: Vec3,
    pub creation_time: f32,
    pub diameter: f32,
    pub motion: ProjectileMotion,
    /// Frame the flight path is expressed in.
    pub frame: Mat4,
    /// Current world transform.
    pub position: Mat4,
}

impl Projectile {
    /// Launch a projectile at scene time `now`, already placed at its start point.
    pub fn launch(
        start_point: Vec3,
        end_point: Vec3,
        now: f32,
        diameter: f32,
        motion: ProjectileMotion,
        frame: Mat4,
    ) -> Self {
        Self {
            start_point,
            end_point,
            creation_time: now,
            diameter,
            motion,
            frame,
            position: frame * Mat4::from_translation(start_point),
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.diameter / 2.0
    }

    #[inline]
    pub fn age(&self, now: f32) -> f32 {
        now - self.creation_time
    }

    /// Point on the flight path at `age`.
    ///
    /// Only interpolated motion has a closed-form path; ballistic flight
    /// depends on every tick so far and yields `None`.
    pub fn path_point(&self, age: f32) -> Option<Vec3> {
        match self.motion {
            ProjectileMotion::Interpolated { rate } => Some(self.interpolate(rate, age)),
            ProjectileMotion::Ballistic { .. } => None,
        }
    }

    fn interpolate(&self, rate: f32, age: f32) -> Vec3 {
        let s = rate * age;
        self.start_point * (1.0 - s) + self.end_point * s
    }

    /// Bring the projectile to scene time `now`.
    pub fn update_position(&mut self, now: f32) {
        let age = self.age(now);
        match self.motion {
            ProjectileMotion::Interpolated { rate } => {
                self.position = self.frame * Mat4::from_translation(self.interpolate(rate, age));
            }
            ProjectileMotion::Ballistic {
                launch_velocity,
                gravity,
            } => {
                let velocity = launch_velocity - Vec3::new(0.0, gravity * age, 0.0);
                self.position = Mat4::from_translation(velocity) * self.position;
            }
        }
    }

    /// World-space center.
    #[inline]
    pub fn center(&self) -> Vec3 {
        origin_of(self.position)
    }

    /// Hit volume at the current position.
    pub fn sphere(&self) -> Sphere {
        Sphere::new(self.center(), self.radius())
    }

    /// Whether the projectile has outlived `lifetime` at scene time `now`.
    pub fn has_expired(&self, now: f32, lifetime: f32) -> bool {
        self.age(now) >= lifetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_shot() -> Projectile {
        Projectile::launch(
            Vec3::new(0.0, 0.0, 50.0),
            Vec3::new(0.0, 0.0, -50.0),
            1.0,
            0.5,
            ProjectileMotion::Interpolated { rate: 3.0 },
            Mat4::IDENTITY,
        )
    }

    #[test]
    fn arrives_at_end_after_a_third_of_a_second() {
        let mut shot = straight_shot();
        shot.update_position(1.0 + 1.0 / 3.0);
        assert!(shot.center().abs_diff_eq(Vec3::new(0.0, 0.0, -50.0), 1e-3));
        assert_eq!(shot.radius(), 0.25);
        assert_eq!(shot.path_point(0.0), Some(Vec3::new(0.0, 0.0, 50.0)));
    }

    #[test]
    fn keeps_flying_past_the_end_point() {
        let mut shot = straight_shot();
        shot.update_position(1.5);
        assert!(shot.center().z < -50.0);
    }

    #[test]
    fn expires_at_lifetime() {
        let shot = straight_shot();
        assert!(!shot.has_expired(2.79, 1.8));
        assert!(shot.has_expired(2.85, 1.8));
    }

    #[test]
    fn launch_frame_scales_the_path() {
        let mut shot = straight_shot();
        shot.frame = Mat4::from_scale(Vec3::splat(0.5));
        shot.update_position(1.0);
        assert!(shot.center().abs_diff_eq(Vec3::new(0.0, 0.0, 25.0), 1e-5));
    }

    #[test]
    fn ballistic_shot_drops() {
        let mut shot = Projectile::launch(
            Vec3::ZERO,
            Vec3::ZERO,
            0.0,
            0.8,
            ProjectileMotion::Ballistic {
                launch_velocity: Vec3::new(0.0, 0.05, -0.5),
                gravity: 0.2,
            },
            Mat4::IDENTITY,
        );
        shot.update_position(0.0);
        assert!(shot.center().abs_diff_eq(Vec3::new(0.0, 0.05, -0.5), 1e-6));
        assert_eq!(shot.path_point(0.0), None);

        for step in 1..=120 {
            shot.update_position(step as f32 / 60.0);
        }
        assert!(shot.center().y < 0.0);
        assert!(shot.center().z < -60.0);
    }
}
