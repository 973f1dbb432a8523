//! Short-lived drawables and the engine that owns them.

use std::num::NonZeroU32;

use log::debug;

use crate::collision::{Bounds, Collidable, Members};
use crate::entities::GameObject;
use crate::error::ArcadeError;
use crate::shapes::Shape;
use crate::state::GameState;
use crate::surface::Surface;
use crate::vector::Vector2;

/// A self-animating drawable that dies once `age` reaches `lifespan`.
#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vector2,
    pub size: Vector2,
    /// Added to `position` every tick.
    pub velocity: Vector2,
    pub shape: Shape,
    /// Hits left before `damage` removes the particle.
    pub health: u32,
    /// Points awarded when gameplay code destroys it.
    pub value: u32,
    age: u32,
    lifespan: u32,
}

impl Particle {
    pub fn new(position: Vector2, size: Vector2, shape: Shape, lifespan: NonZeroU32) -> Self {
        Particle {
            position,
            size,
            velocity: Vector2::ZERO,
            shape,
            health: 1,
            value: 0,
            age: 0,
            lifespan: lifespan.get(),
        }
    }

    /// Like [`Particle::new`] but rejects a zero lifespan at runtime.
    pub fn try_new(
        position: Vector2,
        size: Vector2,
        shape: Shape,
        lifespan: u32,
    ) -> Result<Self, ArcadeError> {
        let lifespan = NonZeroU32::new(lifespan).ok_or(ArcadeError::ZeroLifespan)?;
        Ok(Self::new(position, size, shape, lifespan))
    }

    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health;
        self
    }

    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn lifespan(&self) -> u32 {
        self.lifespan
    }

    pub fn is_dead(&self) -> bool {
        self.age >= self.lifespan
    }

    /// Age by one tick and move.
    pub fn advance(&mut self) {
        self.age = self.age.saturating_add(1);
        self.position += self.velocity;
    }

    /// Force the particle to its end of life.
    pub fn remove(&mut self) {
        self.age = self.lifespan;
    }

    /// Take `amount` damage. Returns `true` if this destroyed the particle.
    pub fn damage(&mut self, amount: u32) -> bool {
        if self.is_dead() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.remove();
            return true;
        }
        false
    }

    pub fn center(&self) -> Vector2 {
        match self.shape {
            Shape::Circle { .. } => self.position,
            _ => self.position + self.size / 2.0,
        }
    }
}

impl GameObject for Particle {
    fn update(&mut self, _state: &mut GameState) {
        self.advance();
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.shape.draw_at_size(surface, self.position, self.size);
    }

    fn is_dead(&self) -> bool {
        Particle::is_dead(self)
    }
}

impl Collidable for Particle {
    fn bounds(&self) -> Bounds {
        self.shape.bounds_at(self.position, self.size)
    }

    fn is_collidable(&self) -> bool {
        !self.is_dead()
    }
}

// ── Engine ───────────────────────────────────────────────────────────────────

/// Owns an insertion-ordered list of particles.
///
/// A particle is removed in the same `step` in which its age reaches its
/// lifespan, so it never gets drawn past the end of its life.
#[derive(Clone, Debug, Default)]
pub struct ParticleEngine {
    particles: Vec<Particle>,
    capacity: Option<usize>,
}

impl ParticleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine that refuses new particles once `limit` are alive.
    pub fn with_limit(limit: usize) -> Self {
        ParticleEngine {
            particles: Vec::new(),
            capacity: Some(limit),
        }
    }

    /// Add a particle; returns `false` if the engine is full.
    pub fn push(&mut self, particle: Particle) -> bool {
        if let Some(limit) = self.capacity {
            if self.particles.len() >= limit {
                debug!("particle limit {} reached, dropping spawn", limit);
                return false;
            }
        }
        self.particles.push(particle);
        true
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Advance every particle back to front, dropping the dead ones.
    pub fn step(&mut self) {
        for i in (0..self.particles.len()).rev() {
            let particle = &mut self.particles[i];
            if !particle.is_dead() {
                particle.advance();
            }
            if particle.is_dead() {
                self.particles.remove(i);
            }
        }
    }
}

impl GameObject for ParticleEngine {
    fn update(&mut self, _state: &mut GameState) {
        self.step();
    }

    fn draw(&self, surface: &mut dyn Surface) {
        for particle in &self.particles {
            GameObject::draw(particle, surface);
        }
    }
}

impl Members for ParticleEngine {
    type Member = Particle;

    fn members_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}
