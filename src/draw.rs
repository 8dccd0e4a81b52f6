//! Handing transforms to whatever renders them.
//!
//! The simulation never talks to a GPU. It produces one transform per bird part
//! and per projectile each frame and passes it to a [`Drawable`]. Anything that
//! can draw a shape with a transform and a material qualifies.
//!
//! For batched rendering, [`InstanceQueue`] collects draw calls as plain
//! `#[repr(C)]` instance data that can be uploaded in one go, and
//! [`QueuedShape`] is the matching drawable.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use duck_hunt::*;
//!
//! let queue = Rc::new(RefCell::new(InstanceQueue::new()));
//! let shape = |id| QueuedShape::new(ShapeId(id), queue.clone());
//!
//! let mut bird = BirdModel::uniform(
//!     [shape(0), shape(1), shape(2), shape(3), shape(4), shape(5)],
//!     Color::rgb(0.6, 0.4, 0.2),
//! );
//! let mut shot = Part::new(shape(6), Color::BLACK);
//!
//! let mut sim = Simulation::with_seed(SimConfig::duck_hunt(), 1).unwrap();
//! sim.tick(0.0, Aim::default());
//! sim.draw(&mut bird, &mut shot);
//!
//! // One bird, seven parts.
//! assert_eq!(queue.borrow().len(), 7);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use glam::Mat4;

use crate::pose::{BirdPart, BirdPose};

/// Something that can be drawn at a transform with a material.
pub trait Drawable {
    type Material;

    fn draw(&mut self, transform: Mat4, material: &Self::Material);
}

/// A drawable whose backing resource may not be available yet.
///
/// Draws are silently dropped until [`resolve`](Self::resolve) supplies the
/// resource, so callers never need to check readiness.
pub struct Pending<D> {
    inner: Option<D>,
}

impl<D> Pending<D> {
    pub fn new() -> Self {
        Self { inner: None }
    }

    pub fn ready(drawable: D) -> Self {
        Self {
            inner: Some(drawable),
        }
    }

    pub fn resolve(&mut self, drawable: D) {
        self.inner = Some(drawable);
    }

    pub fn is_ready(&self) -> bool {
        self.inner.is_some()
    }
}

impl<D> Default for Pending<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Drawable> Drawable for Pending<D> {
    type Material = D::Material;

    fn draw(&mut self, transform: Mat4, material: &Self::Material) {
        if let Some(inner) = self.inner.as_mut() {
            inner.draw(transform, material);
        }
    }
}

/// A shape paired with the material it is drawn with.
pub struct Part<D: Drawable> {
    pub shape: D,
    pub material: D::Material,
}

impl<D: Drawable> Part<D> {
    pub fn new(shape: D, material: D::Material) -> Self {
        Self { shape, material }
    }

    pub fn draw(&mut self, transform: Mat4) {
        self.shape.draw(transform, &self.material);
    }
}

/// The shapes that make up a bird. Both wings share one shape.
pub struct BirdModel<D: Drawable> {
    pub body: Part<D>,
    pub wing: Part<D>,
    pub neck: Part<D>,
    pub head: Part<D>,
    pub beak: Part<D>,
    pub eyes: Part<D>,
}

impl<D: Drawable> BirdModel<D>
where
    D::Material: Clone,
{
    /// Build a model from `[body, wing, neck, head, beak, eyes]` sharing one material.
    pub fn uniform(shapes: [D; 6], material: D::Material) -> Self {
        let [body, wing, neck, head, beak, eyes] = shapes;
        Self {
            body: Part::new(body, material.clone()),
            wing: Part::new(wing, material.clone()),
            neck: Part::new(neck, material.clone()),
            head: Part::new(head, material.clone()),
            beak: Part::new(beak, material.clone()),
            eyes: Part::new(eyes, material),
        }
    }
}

impl<D: Drawable> BirdModel<D> {
    /// Draw every part of one bird, wing shape twice.
    pub fn draw(&mut self, pose: &BirdPose) {
        for part in BirdPart::ALL {
            let transform = pose.part(part);
            match part {
                BirdPart::Body => self.body.draw(transform),
                BirdPart::LeftWing | BirdPart::RightWing => self.wing.draw(transform),
                BirdPart::Neck => self.neck.draw(transform),
                BirdPart::Head => self.head.draw(transform),
                BirdPart::Beak => self.beak.draw(transform),
                BirdPart::Eyes => self.eyes.draw(transform),
            }
        }
    }
}

/// RGBA color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
        )
    }

    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Type-safe index of a shape registered with the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShapeId(pub u32);

/// Per-instance data for one queued draw.
///
/// 96 bytes, laid out for direct upload as an instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceUniforms {
    /// Model matrix (object to world).
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub shape: u32,
    pub _padding: [u32; 3],
}

/// Draw calls accumulated during one frame.
///
/// Shared between shapes through `Rc<RefCell<_>>`; clear it once the frame
/// has been submitted.
#[derive(Debug, Default)]
pub struct InstanceQueue {
    instances: Vec<InstanceUniforms>,
}

impl InstanceQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, shape: ShapeId, transform: Mat4, color: Color) {
        self.instances.push(InstanceUniforms {
            model: transform.to_cols_array_2d(),
            color: color.to_array(),
            shape: shape.0,
            _padding: [0; 3],
        });
    }

    pub fn instances(&self) -> &[InstanceUniforms] {
        &self.instances
    }

    /// The queued instances as raw bytes for buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Number of queued draws of `shape`.
    pub fn count(&self, shape: ShapeId) -> usize {
        self.instances.iter().filter(|i| i.shape == shape.0).count()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }
}

/// A registered shape that draws into a shared [`InstanceQueue`].
#[derive(Clone, Debug)]
pub struct QueuedShape {
    pub shape: ShapeId,
    queue: Rc<RefCell<InstanceQueue>>,
}

impl QueuedShape {
    pub fn new(shape: ShapeId, queue: Rc<RefCell<InstanceQueue>>) -> Self {
        Self { shape, queue }
    }
}

impl Drawable for QueuedShape {
    type Material = Color;

    fn draw(&mut self, transform: Mat4, material: &Color) {
        self.queue.borrow_mut().push(self.shape, transform, *material);
    }
}
