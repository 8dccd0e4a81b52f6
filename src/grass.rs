//! Swaying grass that refreshes only a fraction of its blades per frame.
//!
//! Grass is decorative and never collides, so its transforms are cached. Each
//! blade recomputes its sway on every `update_every`-th frame, at a random
//! phase, so the work is spread evenly across frames. Only the first few
//! blades (the leaders) compute their own sway; every other blade copies the
//! rotation of a randomly chosen leader and keeps its own position.

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec3};
use rand::Rng;

use crate::draw::{Color, Drawable};
use crate::error::{ConfigError, check_all_finite, check_size};

/// Blade pivot height, applied before scaling.
const PIVOT: Vec3 = Vec3::new(0.0, 1.4, 0.0);

/// Layout and motion of a patch of grass.
#[derive(Clone, Copy, Debug)]
pub struct MeadowConfig {
    /// World `(x, z)` of grid cell `(0, 0)`.
    pub origin: (f32, f32),
    /// Cell size along x and z.
    pub cell: (f32, f32),
    /// Grid columns, as a half-open range of indices.
    pub columns: (i32, i32),
    /// Grid rows, as a half-open range of indices.
    pub rows: (i32, i32),
    /// Seconds per sway cycle.
    pub period: f32,
    /// Peak sway angle in radians.
    pub amplitude: f32,
    /// Blades with their own sway; the rest copy one of these.
    pub leaders: usize,
    /// A blade refreshes once every this many frames.
    pub update_every: u64,
}

impl Default for MeadowConfig {
    fn default() -> Self {
        Self {
            origin: (0.0, 32.4),
            cell: (0.45, 0.8),
            columns: (-45, 45),
            rows: (-3, 2),
            period: 10.0,
            amplitude: PI / 30.0,
            leaders: 11,
            update_every: 5,
        }
    }
}

impl MeadowConfig {
    /// Reject layouts and sway settings that cannot be sampled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_all_finite("origin", [self.origin.0, self.origin.1])?;
        check_size("cell", self.cell.0)?;
        check_size("cell", self.cell.1)?;
        check_size("period", self.period)?;
        check_size("amplitude", self.amplitude)
    }
}

/// One blade of grass.
#[derive(Clone, Copy, Debug)]
pub struct Blade {
    pub position: Vec3,
    pub color: Color,
    amplitude: f32,
    period: f32,
    angle_offset: f32,
    phase_offset: f32,
    update_every: u64,
    update_slot: u64,
    /// Index of the blade whose rotation this one copies.
    leader: Option<usize>,
    scale: Mat4,
    rotation: Option<Mat4>,
    transform: Option<Mat4>,
}

impl Blade {
    fn new(
        position: Vec3,
        config: &MeadowConfig,
        leader: Option<usize>,
        rng: &mut impl Rng,
    ) -> Self {
        let width = rng.gen_range(1.0..=1.3);
        let height = rng.gen_range(1.2..=1.6);
        let update_every = config.update_every.max(1);
        Self {
            position,
            color: Color::rgb(
                0.05 + rng.gen_range(-0.05..=0.05),
                0.5 + rng.gen_range(-0.1..=0.1),
                0.1 + rng.gen_range(-0.1..=0.1),
            ),
            amplitude: config.amplitude,
            period: config.period,
            angle_offset: rng.gen_range(-config.amplitude..=config.amplitude),
            phase_offset: rng.gen_range(-config.period / 7.0..=config.period / 7.0),
            update_every,
            update_slot: rng.gen_range(0..update_every),
            leader,
            scale: Mat4::from_scale(Vec3::new(width, height, 1.0)) * Mat4::from_translation(PIVOT),
            rotation: None,
            transform: None,
        }
    }

    /// Sway angle at scene time `t`.
    pub fn angle(&self, t: f32) -> f32 {
        self.amplitude * ((TAU / self.period * t + self.phase_offset).sin() + self.angle_offset)
    }

    /// Whether this blade is due for a refresh on `frame`.
    pub fn should_update(&self, frame: u64) -> bool {
        self.transform.is_none() || frame % self.update_every == self.update_slot
    }

    /// Transform from the most recent refresh.
    pub fn cached_transform(&self) -> Option<Mat4> {
        self.transform
    }

    pub fn is_leader(&self) -> bool {
        self.leader.is_none()
    }

    fn own_rotation(&self, t: f32) -> Mat4 {
        Mat4::from_rotation_z(self.angle(t)) * self.scale
    }

    fn place(&mut self, rotation: Mat4) {
        self.rotation = Some(rotation);
        self.transform = Some(Mat4::from_translation(self.position) * rotation);
    }
}

/// A grid of grass blades.
pub struct Meadow {
    blades: Vec<Blade>,
}

impl Meadow {
    pub fn new(config: &MeadowConfig, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        config.validate()?;
        let (cell_x, cell_z) = config.cell;
        let mut blades: Vec<Blade> = Vec::new();

        for i in config.columns.0..config.columns.1 {
            for j in config.rows.0..config.rows.1 {
                let jitter_x = rng.gen_range(-cell_x / 3.0..=cell_x / 3.0);
                let jitter_z = rng.gen_range(-cell_z / 3.0..=cell_z / 3.0);
                let position = Vec3::new(
                    config.origin.0 + jitter_x + cell_x * i as f32,
                    0.0,
                    config.origin.1 + jitter_z + cell_z * j as f32,
                );
                let leader = if blades.len() < config.leaders.max(1) {
                    None
                } else {
                    Some(rng.gen_range(0..config.leaders.max(1)))
                };
                blades.push(Blade::new(position, config, leader, rng));
            }
        }

        Ok(Self { blades })
    }

    pub fn blades(&self) -> &[Blade] {
        &self.blades
    }

    /// Refresh the blades due on `frame`. Returns how many were refreshed.
    pub fn update(&mut self, frame: u64, t: f32) -> usize {
        let mut refreshed = 0;
        for index in 0..self.blades.len() {
            let blade = self.blades[index];
            if !blade.should_update(frame) {
                continue;
            }
            let rotation = match blade.leader {
                None => blade.own_rotation(t),
                Some(leader) => self.blades[leader]
                    .rotation
                    .unwrap_or_else(|| blade.own_rotation(t)),
            };
            self.blades[index].place(rotation);
            refreshed += 1;
        }
        refreshed
    }

    /// Draw every blade that has been placed at least once, in its own color.
    pub fn draw<D: Drawable<Material = Color>>(&self, shape: &mut D) {
        for blade in &self.blades {
            if let Some(transform) = blade.transform {
                shape.draw(transform, &blade.color);
            }
        }
    }
}
