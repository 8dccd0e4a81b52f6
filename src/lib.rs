//! # Duck Hunt
//!
//! **Birds, bullets and capsule collision for a shooting-gallery scene.**
//!
//! Birds flap across the sky on straight paths. Projectiles fly from the gun
//! toward wherever the player aims. Every frame, each bird's body and wings are
//! rebuilt as capsules and tested against every projectile. The crate owns the
//! simulation only. Rendering goes through the small [`Drawable`] trait, so any
//! renderer can draw the scene.
//!
//! ## Quick Start
//!
//! ```
//! use duck_hunt::*;
//!
//! let mut sim = Simulation::with_seed(SimConfig::duck_hunt(), 42).unwrap();
//! let aim = Aim::from_pointer(0.0, 200.0);
//!
//! for frame in 0..600 {
//!     if frame % 90 == 0 {
//!         sim.request_shoot();
//!     }
//!     let report = sim.tick(frame as f32 / 60.0, aim);
//!     for hit in &report.hits {
//!         println!("bird {:?} down", hit.bird);
//!     }
//! }
//!
//! println!("Birds Hit: {}", sim.birds_hit());
//! assert!(sim.bird_count() <= sim.config().spawn.max_birds);
//! ```
//!
//! ## Layout
//!
//! - [`Bird`] and [`BirdPose`]: flight and the articulated pose solved from it
//! - [`BirdCapsules`]: the three collision capsules derived from a pose
//! - [`Projectile`]: interpolated or ballistic flight with a lifetime
//! - [`CollisionSettings`]: sphere-against-capsule tests with a choice of metric
//! - [`Simulation`]: the per-frame lifecycle tying them together
//! - [`Meadow`]: decorative grass with amortized updates
//!
//! Entities live in a [`hecs::World`]. Handles returned by the simulation are
//! plain [`Entity`] values.

mod aim;
mod bird;
mod capsule;
mod collision;
mod config;
mod draw;
mod error;
mod grass;
mod pose;
mod projectile;
mod simulation;

pub use aim::Aim;
pub use bird::{Bird, Heading};
pub use capsule::{BirdCapsules, CHEST_BEAK_WEIGHT, Capsule, origin_of};
pub use collision::{
    CollisionSettings, DistanceMetric, HitRadii, Sphere, distance_point_to_line,
    distance_point_to_segment, within_reach,
};
pub use config::{BirdConfig, GameRules, ProjectileConfig, SimConfig, SpawnConfig};
pub use draw::{
    BirdModel, Color, Drawable, InstanceQueue, InstanceUniforms, Part, Pending, QueuedShape,
    ShapeId,
};
pub use error::ConfigError;
pub use grass::{Blade, Meadow, MeadowConfig};
pub use pose::{BirdPart, BirdPose, FlapAnimation};
pub use projectile::{Projectile, ProjectileMotion};
pub use simulation::{Hit, ShotOutcome, Simulation, TickReport};

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, Vec3};

// Entity storage
pub use hecs::{Entity, World};
