//! Tunable parameters for a hunting scene.
//!
//! Every scene shares the same bird, projectile and collision code; what differs
//! between them (spawn bounds, radii, speeds, ammo rules) lives here. Two presets
//! reproduce the shipped scenes:
//!
//! - [`SimConfig::duck_hunt`]: the scored game with limited ammo
//! - [`SimConfig::bird_demo`]: the free-play demo with ballistic shots
//!
//! # Example
//!
//! ```
//! use duck_hunt::SimConfig;
//!
//! let config = SimConfig::duck_hunt()
//!     .max_birds(3)
//!     .cooldown(0.5)
//!     .starting_ammo(Some(20));
//!
//! assert!(config.validate().is_ok());
//! ```

use glam::{Mat4, Vec3};

use crate::collision::CollisionSettings;
use crate::error::{
    ConfigError, check_all_finite, check_duration, check_finite, check_range, check_size,
};
use crate::pose::FlapAnimation;
use crate::projectile::ProjectileMotion;

/// Per-bird motion, animation and hit volume settings.
#[derive(Clone, Copy, Debug)]
pub struct BirdConfig {
    /// Distance travelled along world x each tick.
    pub speed: f32,
    /// Capsule radius around the beak-to-tail axis.
    pub body_radius: f32,
    /// Capsule radius around each wing axis.
    pub wing_radius: f32,
    /// Bobbing and wing-flap parameters.
    pub flap: FlapAnimation,
}

impl Default for BirdConfig {
    fn default() -> Self {
        Self {
            speed: 0.05,
            body_radius: 0.5,
            wing_radius: 0.3,
            flap: FlapAnimation::default(),
        }
    }
}

/// Where, how often and how many birds appear, and when they leave.
#[derive(Clone, Copy, Debug)]
pub struct SpawnConfig {
    /// Probability of a spawn attempt on any given tick.
    pub chance: f64,
    /// No spawn happens while this many birds are alive.
    pub max_birds: usize,
    /// Birds start this far along x, on the side opposite to their heading.
    pub lateral_offset: f32,
    /// `(min, max)` spawn height.
    pub height: (f32, f32),
    /// `(min, max)` spawn depth along z.
    pub depth: (f32, f32),
    /// Force a spawn on the first tick regardless of `chance`.
    pub spawn_immediately: bool,
    /// A bird is removed once `x * heading` exceeds this. `None` keeps birds forever.
    pub escape_distance: Option<f32>,
}

/// Shot cadence, lifetime, size and motion of projectiles.
#[derive(Clone, Copy, Debug)]
pub struct ProjectileConfig {
    /// Sphere diameter; the collision radius is half of it.
    pub diameter: f32,
    /// Seconds before a projectile is removed.
    pub lifetime: f32,
    /// Minimum seconds between accepted shots.
    pub cooldown: f32,
    /// How a projectile moves after launch.
    pub motion: ProjectileMotion,
    /// Frame the flight path is expressed in.
    pub launch_frame: Mat4,
    /// Remove a projectile when it hits a bird. Off in both shipped scenes.
    pub consume_on_hit: bool,
}

/// Scoring and ammunition rules.
#[derive(Clone, Copy, Debug)]
pub struct GameRules {
    /// Shots available at the start. `None` means unlimited and no lose condition.
    pub starting_ammo: Option<u32>,
    /// Shots given back for each bird hit.
    pub hit_refund: u32,
}

/// Complete configuration for a [`Simulation`](crate::Simulation).
#[derive(Clone, Copy, Debug)]
pub struct SimConfig {
    pub bird: BirdConfig,
    pub spawn: SpawnConfig,
    pub projectile: ProjectileConfig,
    pub rules: GameRules,
    pub collision: CollisionSettings,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::duck_hunt()
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The scored game: ten shots, two back per hit, birds crossing at a distance.
    pub fn duck_hunt() -> Self {
        Self {
            bird: BirdConfig::default(),
            spawn: SpawnConfig {
                chance: 0.003,
                max_birds: 7,
                lateral_offset: 80.0,
                height: (5.0, 15.0),
                depth: (-20.0, 0.0),
                spawn_immediately: true,
                escape_distance: Some(68.0),
            },
            projectile: ProjectileConfig {
                diameter: 0.5,
                lifetime: 1.8,
                cooldown: 1.5,
                motion: ProjectileMotion::Interpolated { rate: 3.0 },
                launch_frame: Mat4::from_scale(Vec3::splat(0.5)),
                consume_on_hit: false,
            },
            rules: GameRules {
                starting_ammo: Some(10),
                hit_refund: 2,
            },
            collision: CollisionSettings::default(),
        }
    }

    /// The free-play demo: unlimited shots that arc under gravity, birds close by.
    pub fn bird_demo() -> Self {
        Self {
            bird: BirdConfig::default(),
            spawn: SpawnConfig {
                chance: 0.003,
                max_birds: 5,
                lateral_offset: 10.0,
                height: (-10.0, 10.0),
                depth: (0.0, 30.0),
                spawn_immediately: true,
                escape_distance: None,
            },
            projectile: ProjectileConfig {
                diameter: 0.8,
                lifetime: 3.5,
                cooldown: 2.5,
                motion: ProjectileMotion::Ballistic {
                    launch_velocity: Vec3::new(0.0, 0.05, -0.5),
                    gravity: 0.2,
                },
                launch_frame: Mat4::IDENTITY,
                consume_on_hit: false,
            },
            rules: GameRules {
                starting_ammo: None,
                hit_refund: 0,
            },
            collision: CollisionSettings::default(),
        }
    }

    pub fn max_birds(mut self, max_birds: usize) -> Self {
        self.spawn.max_birds = max_birds;
        self
    }

    pub fn spawn_chance(mut self, chance: f64) -> Self {
        self.spawn.chance = chance;
        self
    }

    pub fn spawn_immediately(mut self, spawn_immediately: bool) -> Self {
        self.spawn.spawn_immediately = spawn_immediately;
        self
    }

    pub fn escape_distance(mut self, distance: Option<f32>) -> Self {
        self.spawn.escape_distance = distance;
        self
    }

    pub fn cooldown(mut self, seconds: f32) -> Self {
        self.projectile.cooldown = seconds;
        self
    }

    pub fn lifetime(mut self, seconds: f32) -> Self {
        self.projectile.lifetime = seconds;
        self
    }

    pub fn diameter(mut self, diameter: f32) -> Self {
        self.projectile.diameter = diameter;
        self
    }

    pub fn motion(mut self, motion: ProjectileMotion) -> Self {
        self.projectile.motion = motion;
        self
    }

    pub fn launch_frame(mut self, frame: Mat4) -> Self {
        self.projectile.launch_frame = frame;
        self
    }

    pub fn consume_on_hit(mut self, consume: bool) -> Self {
        self.projectile.consume_on_hit = consume;
        self
    }

    pub fn starting_ammo(mut self, ammo: Option<u32>) -> Self {
        self.rules.starting_ammo = ammo;
        self
    }

    pub fn hit_refund(mut self, refund: u32) -> Self {
        self.rules.hit_refund = refund;
        self
    }

    pub fn collision(mut self, collision: CollisionSettings) -> Self {
        self.collision = collision;
        self
    }

    /// Check every setting the simulation relies on.
    ///
    /// Called by [`Simulation::new`](crate::Simulation::new); exposed so callers
    /// can reject a configuration before building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_size("body_radius", self.bird.body_radius)?;
        check_size("wing_radius", self.bird.wing_radius)?;
        check_size("diameter", self.projectile.diameter)?;
        check_duration("lifetime", self.projectile.lifetime)?;
        check_duration("cooldown", self.projectile.cooldown)?;
        if !(0.0..=1.0).contains(&self.spawn.chance) {
            return Err(ConfigError::InvalidProbability(self.spawn.chance as f32));
        }
        check_range("height", self.spawn.height)?;
        check_range("depth", self.spawn.depth)?;

        check_finite("speed", self.bird.speed)?;
        check_finite("bob_height", self.bird.flap.bob_height)?;
        check_finite("frequency", self.bird.flap.frequency)?;
        check_finite("amplitude", self.bird.flap.amplitude)?;
        check_size("lateral_offset", self.spawn.lateral_offset)?;
        if let Some(escape_distance) = self.spawn.escape_distance {
            check_finite("escape_distance", escape_distance)?;
            // Position along the heading after the first tick's move.
            if self.bird.speed - self.spawn.lateral_offset > escape_distance {
                return Err(ConfigError::SpawnBeyondEscape {
                    lateral_offset: self.spawn.lateral_offset,
                    escape_distance,
                });
            }
        }

        match self.projectile.motion {
            ProjectileMotion::Interpolated { rate } => check_size("rate", rate)?,
            ProjectileMotion::Ballistic {
                launch_velocity,
                gravity,
            } => {
                check_all_finite("launch_velocity", launch_velocity.to_array())?;
                check_finite("gravity", gravity)?;
            }
        }
        check_all_finite("launch_frame", self.projectile.launch_frame.to_cols_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        assert!(SimConfig::duck_hunt().validate().is_ok());
        assert!(SimConfig::bird_demo().validate().is_ok());
    }

    #[test]
    fn builder_overrides_preset() {
        let config = SimConfig::new().max_birds(2).cooldown(0.25).starting_ammo(None);
        assert_eq!(config.spawn.max_birds, 2);
        assert_eq!(config.projectile.cooldown, 0.25);
        assert!(config.rules.starting_ammo.is_none());
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            SimConfig::new().spawn_chance(1.5).validate(),
            Err(ConfigError::InvalidProbability(1.5))
        );
        assert!(matches!(
            SimConfig::new().diameter(0.0).validate(),
            Err(ConfigError::NonPositiveSize { field: "diameter", .. })
        ));
        assert!(matches!(
            SimConfig::new().cooldown(-1.0).validate(),
            Err(ConfigError::InvalidDuration { field: "cooldown", .. })
        ));

        let mut inverted = SimConfig::new();
        inverted.spawn.depth = (0.0, -20.0);
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::InvertedRange { field: "depth", .. })
        ));
    }

    #[test]
    fn rejects_non_finite_motion() {
        let mut config = SimConfig::new();
        config.bird.speed = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "speed", .. })
        ));

        let mut config = SimConfig::new();
        config.bird.flap.frequency = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "frequency", .. })
        ));

        let config = SimConfig::new().motion(ProjectileMotion::Interpolated { rate: 0.0 });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveSize { field: "rate", .. })
        ));

        let config = SimConfig::bird_demo().motion(ProjectileMotion::Ballistic {
            launch_velocity: Vec3::new(0.0, f32::NAN, -0.5),
            gravity: 0.2,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "launch_velocity", .. })
        ));

        let config = SimConfig::bird_demo().motion(ProjectileMotion::Ballistic {
            launch_velocity: Vec3::ZERO,
            gravity: f32::NEG_INFINITY,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "gravity", .. })
        ));

        let config = SimConfig::new().launch_frame(Mat4::from_scale(Vec3::splat(f32::NAN)));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "launch_frame", .. })
        ));
    }

    #[test]
    fn birds_must_enter_inside_the_escape_bounds() {
        let mut config = SimConfig::new();
        config.spawn.lateral_offset = -70.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveSize { field: "lateral_offset", .. })
        ));

        let config = SimConfig::new().escape_distance(Some(-90.0));
        assert_eq!(
            config.validate(),
            Err(ConfigError::SpawnBeyondEscape {
                lateral_offset: 80.0,
                escape_distance: -90.0,
            })
        );

        let config = SimConfig::new().escape_distance(Some(f32::NAN));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "escape_distance", .. })
        ));

        // After one tick a duck-hunt bird sits at -79.95 along its heading.
        assert!(SimConfig::new().escape_distance(Some(-79.0)).validate().is_ok());
        assert!(SimConfig::new().escape_distance(Some(-80.0)).validate().is_err());
        assert!(SimConfig::bird_demo().escape_distance(None).validate().is_ok());
    }
}
