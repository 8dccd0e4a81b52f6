//! The per-frame lifecycle of birds and projectiles.
//!
//! A [`Simulation`] owns every live entity in a [`hecs::World`] and advances
//! them once per rendered frame. Each [`Simulation::tick`] runs these steps in
//! order:
//!
//! 1. Consume a pending shoot request (cooldown and ammo permitting)
//! 2. Move projectiles, dropping those past their lifetime
//! 3. Possibly spawn a bird
//! 4. Move birds, solve their poses and rebuild their capsules
//! 5. Test every bird against every projectile
//! 6. Remove hit and escaped birds, update score and ammo
//!
//! Capsules are always rebuilt in step 4 before step 5 reads them, so a
//! collision is never tested against last frame's geometry. Removals are
//! collected while scanning and applied afterwards.
//!
//! # Example
//!
//! ```
//! use duck_hunt::{Aim, SimConfig, Simulation};
//!
//! let mut sim = Simulation::with_seed(SimConfig::duck_hunt(), 7).unwrap();
//!
//! // First frame always brings a bird in.
//! let report = sim.tick(0.0, Aim::default());
//! assert_eq!(report.spawned.len(), 1);
//!
//! sim.request_shoot();
//! let report = sim.tick(1.0 / 60.0, Aim::default());
//! assert!(report.shot.is_some_and(|shot| shot.fired()));
//! assert_eq!(sim.ammo_remaining(), Some(9));
//! ```

use glam::Vec3;
use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::aim::Aim;
use crate::bird::{Bird, Heading};
use crate::capsule::BirdCapsules;
use crate::collision::HitRadii;
use crate::config::SimConfig;
use crate::draw::{BirdModel, Drawable, Part};
use crate::error::ConfigError;
use crate::pose::BirdPose;
use crate::projectile::Projectile;

/// What became of a shoot request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShotOutcome {
    /// A projectile was launched.
    Fired(Entity),
    /// The previous shot was too recent.
    CoolingDown,
    /// No ammunition left.
    OutOfAmmo,
}

impl ShotOutcome {
    pub fn fired(self) -> bool {
        matches!(self, ShotOutcome::Fired(_))
    }
}

/// A bird struck by a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub bird: Entity,
    pub projectile: Entity,
}

/// Everything that happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Result of the shoot request, if one was pending.
    pub shot: Option<ShotOutcome>,
    pub spawned: Vec<Entity>,
    pub hits: Vec<Hit>,
    /// Birds that flew out of range.
    pub escaped: Vec<Entity>,
    /// Projectiles removed for exceeding their lifetime.
    pub expired: Vec<Entity>,
}

/// Birds, projectiles and the score of one hunting scene.
pub struct Simulation {
    config: SimConfig,
    world: World,
    rng: StdRng,
    time: f32,
    spawn_pending: bool,
    shoot_requested: bool,
    last_shot: Option<f32>,
    birds_hit: u32,
    ammo: Option<u32>,
    lost: bool,
}

impl Simulation {
    /// Create an empty scene with an entropy-seeded random source.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an empty scene whose spawns are reproducible from `seed`.
    pub fn with_seed(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            world: World::new(),
            rng,
            time: 0.0,
            spawn_pending: config.spawn.spawn_immediately,
            shoot_requested: false,
            last_shot: None,
            birds_hit: 0,
            ammo: config.rules.starting_ammo,
            lost: false,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Scene time of the latest tick.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Read-only access to the entity store.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn birds_hit(&self) -> u32 {
        self.birds_hit
    }

    /// Shots left, or `None` when ammunition is unlimited.
    pub fn ammo_remaining(&self) -> Option<u32> {
        self.ammo
    }

    /// Out of ammo with nothing left in flight. Stays set until [`restart`](Self::restart).
    pub fn lose_condition_reached(&self) -> bool {
        self.lost
    }

    pub fn bird_count(&self) -> usize {
        self.world.query::<&Bird>().iter().count()
    }

    pub fn projectile_count(&self) -> usize {
        self.world.query::<&Projectile>().iter().count()
    }

    pub fn bird(&self, entity: Entity) -> Option<Bird> {
        self.world.get::<&Bird>(entity).ok().map(|bird| *bird)
    }

    /// Collision geometry of a bird as of the latest tick.
    pub fn capsules(&self, entity: Entity) -> Option<BirdCapsules> {
        self.world.get::<&BirdCapsules>(entity).ok().map(|caps| *caps)
    }

    pub fn pose(&self, entity: Entity) -> Option<BirdPose> {
        self.world.get::<&BirdPose>(entity).ok().map(|pose| *pose)
    }

    pub fn projectile(&self, entity: Entity) -> Option<Projectile> {
        self.world.get::<&Projectile>(entity).ok().map(|p| *p)
    }

    /// Handles of all live birds, in no particular order.
    pub fn birds(&self) -> Vec<Entity> {
        self.world.query::<&Bird>().iter().map(|(entity, _)| entity).collect()
    }

    /// Handles of all live projectiles, in no particular order.
    pub fn projectiles(&self) -> Vec<Entity> {
        self.world
            .query::<&Projectile>()
            .iter()
            .map(|(entity, _)| entity)
            .collect()
    }

    /// Ask for a shot on the next tick. Repeated requests before then collapse into one.
    pub fn request_shoot(&mut self) {
        self.shoot_requested = true;
    }

    /// Add a bird entering from the side opposite to `heading`, at the current time.
    ///
    /// Ignores the spawn cap; [`tick`](Self::tick) applies it to random spawns.
    pub fn spawn_bird(&mut self, heading: Heading, height: f32, depth: f32) -> Entity {
        let bird = Bird::entering(
            heading,
            self.config.spawn.lateral_offset,
            height,
            depth,
            self.time,
            self.config.bird.speed,
        );
        let pose = bird.pose(self.time, &self.config.bird.flap);
        let capsules = BirdCapsules::from_pose(&pose);
        let entity = self.world.spawn((bird, pose, capsules));
        log::debug!(
            "bird {:?} spawned heading {:?} at {:?}",
            entity,
            heading,
            bird.world_position()
        );
        entity
    }

    /// Launch a projectile between two waypoints at the current time.
    ///
    /// Bypasses cooldown and ammo; [`request_shoot`](Self::request_shoot) is the gated path.
    pub fn spawn_projectile(&mut self, start: Vec3, end: Vec3) -> Entity {
        let settings = &self.config.projectile;
        let projectile = Projectile::launch(
            start,
            end,
            self.time,
            settings.diameter,
            settings.motion,
            settings.launch_frame,
        );
        let entity = self.world.spawn((projectile,));
        log::debug!("projectile {:?} launched from {:?} toward {:?}", entity, start, end);
        entity
    }

    /// Fire with `aim` if the cooldown has passed and ammunition remains.
    pub fn try_shoot(&mut self, aim: Aim) -> ShotOutcome {
        if let Some(last) = self.last_shot {
            if self.time - last <= self.config.projectile.cooldown {
                return ShotOutcome::CoolingDown;
            }
        }
        if self.ammo == Some(0) {
            return ShotOutcome::OutOfAmmo;
        }

        self.last_shot = Some(self.time);
        if let Some(ammo) = self.ammo.as_mut() {
            *ammo -= 1;
        }
        let (start, end) = aim.launch_points();
        ShotOutcome::Fired(self.spawn_projectile(start, end))
    }

    /// Advance the scene to time `now`.
    ///
    /// `now` is seconds since scene start and should never decrease; an earlier
    /// value is treated as no time passing.
    pub fn tick(&mut self, now: f32, aim: Aim) -> TickReport {
        self.advance_clock(now);
        let now = self.time;
        let mut report = TickReport::default();

        if std::mem::take(&mut self.shoot_requested) {
            report.shot = Some(self.try_shoot(aim));
        }

        let lifetime = self.config.projectile.lifetime;
        for (entity, projectile) in self.world.query_mut::<&mut Projectile>() {
            projectile.update_position(now);
            if projectile.has_expired(now, lifetime) {
                report.expired.push(entity);
            }
        }
        for &entity in &report.expired {
            if self.world.despawn(entity).is_ok() {
                log::debug!("projectile {:?} expired", entity);
            }
        }

        if let Some(entity) = self.maybe_spawn_bird() {
            report.spawned.push(entity);
        }

        let animation = self.config.bird.flap;
        let moving = self
            .world
            .query_mut::<(&mut Bird, &mut BirdPose, &mut BirdCapsules)>();
        for (_, (bird, pose, capsules)) in moving {
            bird.advance();
            *pose = bird.pose(now, &animation);
            *capsules = BirdCapsules::from_pose(pose);
        }

        self.detect(&mut report);
        self.apply(&report);
        report
    }

    /// Back to a fresh game: score and ammo reset, birds cleared.
    ///
    /// Projectiles already in flight keep flying.
    pub fn restart(&mut self) {
        let birds = self.birds();
        for entity in birds {
            let _ = self.world.despawn(entity);
        }
        self.birds_hit = 0;
        self.ammo = self.config.rules.starting_ammo;
        self.lost = false;
        self.spawn_pending = self.config.spawn.spawn_immediately;
        log::info!("game restarted");
    }

    /// Draw every bird part and every projectile with the given drawables.
    pub fn draw<D: Drawable>(&self, bird_model: &mut BirdModel<D>, projectile: &mut Part<D>) {
        for (_, pose) in self.world.query::<&BirdPose>().iter() {
            bird_model.draw(pose);
        }
        for (_, shot) in self.world.query::<&Projectile>().iter() {
            projectile.draw(shot.position);
        }
    }

    fn advance_clock(&mut self, now: f32) {
        if now < self.time {
            log::warn!("clock went backwards ({} < {}), holding time", now, self.time);
        } else {
            self.time = now;
        }
    }

    fn maybe_spawn_bird(&mut self) -> Option<Entity> {
        let spawn = self.config.spawn;
        let roll = self.rng.gen_bool(spawn.chance);
        if !(roll || self.spawn_pending) || self.bird_count() >= spawn.max_birds {
            return None;
        }

        self.spawn_pending = false;
        let heading = if self.rng.gen_bool(0.5) {
            Heading::Left
        } else {
            Heading::Right
        };
        let height = self.rng.gen_range(spawn.height.0..=spawn.height.1);
        let depth = self.rng.gen_range(spawn.depth.0..=spawn.depth.1);
        Some(self.spawn_bird(heading, height, depth))
    }

    fn detect(&self, report: &mut TickReport) {
        let settings = self.config.collision;
        let consume = self.config.projectile.consume_on_hit;
        let escape = self.config.spawn.escape_distance;
        let radii = HitRadii {
            body: self.config.bird.body_radius,
            wing: self.config.bird.wing_radius,
        };

        let shots: Vec<_> = self
            .world
            .query::<&Projectile>()
            .iter()
            .map(|(entity, projectile)| (entity, projectile.sphere()))
            .collect();
        let mut spent: Vec<Entity> = Vec::new();

        for (bird_entity, (bird, capsules)) in self.world.query::<(&Bird, &BirdCapsules)>().iter() {
            let hit = shots
                .iter()
                .filter(|(shot, _)| !spent.contains(shot))
                .find(|(_, sphere)| settings.sphere_hits_bird(capsules, radii, *sphere));

            if let Some(&(projectile, _)) = hit {
                report.hits.push(Hit {
                    bird: bird_entity,
                    projectile,
                });
                if consume {
                    spent.push(projectile);
                }
            } else if escape.is_some_and(|limit| bird.has_escaped(limit)) {
                report.escaped.push(bird_entity);
            }
        }
    }

    fn apply(&mut self, report: &TickReport) {
        for hit in &report.hits {
            if self.world.despawn(hit.bird).is_err() {
                continue;
            }
            self.birds_hit += 1;
            if let Some(ammo) = self.ammo.as_mut() {
                *ammo = ammo.saturating_add(self.config.rules.hit_refund);
            }
            if self.config.projectile.consume_on_hit {
                let _ = self.world.despawn(hit.projectile);
            }
            log::debug!("bird {:?} hit by projectile {:?}", hit.bird, hit.projectile);
        }
        for &entity in &report.escaped {
            if self.world.despawn(entity).is_ok() {
                log::debug!("bird {:?} escaped", entity);
            }
        }

        if !self.lost && self.ammo == Some(0) && self.projectile_count() == 0 {
            self.lost = true;
            log::info!("out of ammo with {} birds hit", self.birds_hit);
        }
    }
}
