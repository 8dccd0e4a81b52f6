//! Collision capsules derived from a bird pose.
//!
//! A bird is hit-tested as three capsules: one along the body from tail to
//! beak, and one per wing. Both wing capsules are anchored at a single chest
//! point, a 30/70 blend of beak and tail, rather than at the true wing roots.

use glam::{Mat4, Vec3};

use crate::pose::BirdPose;

/// Weight of the beak in the chest anchor blend; the tail gets the rest.
pub const CHEST_BEAK_WEIGHT: f32 = 0.3;

/// A line segment with a hit radius.
///
/// The segment starts at `anchor` and spans `axis`. Whether a point is inside
/// is decided by [`Capsule::touches`] under a
/// [`DistanceMetric`](crate::DistanceMetric).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capsule {
    pub anchor: Vec3,
    pub axis: Vec3,
    pub radius: f32,
}

impl Capsule {
    pub fn new(anchor: Vec3, axis: Vec3, radius: f32) -> Self {
        Self {
            anchor,
            axis,
            radius,
        }
    }

    /// The far end of the segment.
    #[inline]
    pub fn tip(&self) -> Vec3 {
        self.anchor + self.axis
    }
}

/// Per-tick collision geometry of one bird.
///
/// Only valid for the tick whose pose it was extracted from; the simulation
/// recomputes it right after every pose update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BirdCapsules {
    /// Body anchor (the body part's origin).
    pub tail_point: Vec3,
    /// Tail to beak.
    pub body_vector: Vec3,
    /// Shared anchor for both wings.
    pub center_point: Vec3,
    /// Chest to left wing root.
    pub left_wing_vector: Vec3,
    /// Chest to right wing root.
    pub right_wing_vector: Vec3,
}

impl BirdCapsules {
    /// Extract the capsule axes from a solved pose.
    pub fn from_pose(pose: &BirdPose) -> Self {
        let tail_point = origin_of(pose.body);
        let beak_point = origin_of(pose.beak);
        let center_point = tail_point.lerp(beak_point, CHEST_BEAK_WEIGHT);

        Self {
            tail_point,
            body_vector: beak_point - tail_point,
            center_point,
            left_wing_vector: origin_of(pose.left_wing) - center_point,
            right_wing_vector: origin_of(pose.right_wing) - center_point,
        }
    }

    /// Where the beak sits this tick.
    #[inline]
    pub fn beak_point(&self) -> Vec3 {
        self.tail_point + self.body_vector
    }

    pub fn body(&self, radius: f32) -> Capsule {
        Capsule::new(self.tail_point, self.body_vector, radius)
    }

    pub fn left_wing(&self, radius: f32) -> Capsule {
        Capsule::new(self.center_point, self.left_wing_vector, radius)
    }

    pub fn right_wing(&self, radius: f32) -> Capsule {
        Capsule::new(self.center_point, self.right_wing_vector, radius)
    }
}

/// Image of the local origin under `transform`.
#[inline]
pub fn origin_of(transform: Mat4) -> Vec3 {
    transform.transform_point3(Vec3::ZERO)
}
