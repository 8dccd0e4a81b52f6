//! Sphere-versus-bird hit testing.
//!
//! A projectile is a sphere; a bird is three [`Capsule`]s. The test runs in
//! two phases:
//!
//! 1. **Broad phase**: reject spheres farther from the bird's chest than the
//!    body length plus both radii.
//! 2. **Narrow phase**: measure the sphere center's distance to each capsule
//!    axis and compare it against that capsule's radius plus the sphere radius.
//!
//! Distances are measured to the *infinite line* through each axis by default.
//! A sphere beyond a wing tip but close to the wing's extension therefore still
//! counts as a hit. Switch to [`DistanceMetric::Segment`] to clamp to the
//! actual segment.
//!
//! # Example
//!
//! ```
//! use duck_hunt::{
//!     BirdCapsules, BirdPose, CollisionSettings, FlapAnimation, HitRadii, Mat4, Sphere,
//! };
//!
//! let pose = BirdPose::solve(Mat4::IDENTITY, 0.0, &FlapAnimation::default());
//! let capsules = BirdCapsules::from_pose(&pose);
//! let shot = Sphere::new(capsules.center_point, 0.25);
//!
//! let settings = CollisionSettings::default();
//! assert!(settings.sphere_hits_bird(&capsules, HitRadii::default(), shot));
//! ```

use glam::Vec3;

use crate::capsule::{BirdCapsules, Capsule};

/// Axes shorter than this are treated as degenerate and never collide.
const MIN_AXIS_LENGTH_SQUARED: f32 = 1e-12;

/// A sphere in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Capsule radii of a bird.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitRadii {
    pub body: f32,
    pub wing: f32,
}

impl Default for HitRadii {
    fn default() -> Self {
        Self {
            body: 0.5,
            wing: 0.3,
        }
    }
}

/// How the distance from a point to a capsule axis is measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DistanceMetric {
    /// Distance to the infinite line through the axis.
    #[default]
    Line,
    /// Distance to the finite segment from anchor to tip.
    Segment,
}

impl DistanceMetric {
    /// Distance from `point` to the axis `anchor + t * axis`.
    ///
    /// Returns `None` for a zero-length axis.
    pub fn distance(self, point: Vec3, anchor: Vec3, axis: Vec3) -> Option<f32> {
        match self {
            DistanceMetric::Line => distance_point_to_line(point, anchor, axis),
            DistanceMetric::Segment => distance_point_to_segment(point, anchor, axis),
        }
    }
}

/// Collision test tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionSettings {
    pub metric: DistanceMetric,
    /// Run the cheap chest-distance rejection before the per-capsule test.
    pub broad_phase: bool,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            metric: DistanceMetric::Line,
            broad_phase: true,
        }
    }
}

impl CollisionSettings {
    /// Whether `sphere` touches any of the bird's three capsules.
    ///
    /// Pure: identical inputs always give identical answers.
    pub fn sphere_hits_bird(
        &self,
        capsules: &BirdCapsules,
        radii: HitRadii,
        sphere: Sphere,
    ) -> bool {
        if self.broad_phase && !within_reach(capsules, radii, sphere) {
            return false;
        }

        [
            capsules.body(radii.body),
            capsules.left_wing(radii.wing),
            capsules.right_wing(radii.wing),
        ]
        .iter()
        .any(|capsule| capsule.touches(sphere, self.metric))
    }
}

impl Capsule {
    /// Distance from `point` to this capsule's axis, or `None` if the axis is degenerate.
    pub fn axis_distance(&self, point: Vec3, metric: DistanceMetric) -> Option<f32> {
        metric.distance(point, self.anchor, self.axis)
    }

    /// Whether `sphere` overlaps this capsule. A degenerate axis never does.
    pub fn touches(&self, sphere: Sphere, metric: DistanceMetric) -> bool {
        self.axis_distance(sphere.center, metric)
            .is_some_and(|d| d < self.radius + sphere.radius)
    }
}

/// Broad phase: can `sphere` possibly reach the bird at all?
pub fn within_reach(capsules: &BirdCapsules, radii: HitRadii, sphere: Sphere) -> bool {
    let reach = capsules.body_vector.length() + radii.body + sphere.radius;
    sphere.center.distance(capsules.center_point) <= reach
}

/// Distance from `point` to the infinite line through `anchor` along `axis`.
///
/// Uses `|(anchor - point) × axis| / |axis|`. Returns `None` when `axis` has
/// zero length.
///
/// ```
/// use duck_hunt::{Vec3, distance_point_to_line};
///
/// let d = distance_point_to_line(Vec3::new(0.0, 2.0, 9.0), Vec3::ZERO, Vec3::Z);
/// assert_eq!(d, Some(2.0));
/// ```
pub fn distance_point_to_line(point: Vec3, anchor: Vec3, axis: Vec3) -> Option<f32> {
    let length_squared = axis.length_squared();
    if length_squared <= MIN_AXIS_LENGTH_SQUARED {
        return None;
    }
    Some((anchor - point).cross(axis).length() / length_squared.sqrt())
}

/// Distance from `point` to the segment from `anchor` to `anchor + axis`.
///
/// Returns `None` when `axis` has zero length, matching
/// [`distance_point_to_line`].
pub fn distance_point_to_segment(point: Vec3, anchor: Vec3, axis: Vec3) -> Option<f32> {
    let length_squared = axis.length_squared();
    if length_squared <= MIN_AXIS_LENGTH_SQUARED {
        return None;
    }
    let t = ((point - anchor).dot(axis) / length_squared).clamp(0.0, 1.0);
    Some(point.distance(anchor + axis * t))
}
