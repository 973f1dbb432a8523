//! Timer-driven factory invocation.

use std::cell::RefCell;
use std::rc::Weak;

use log::{debug, warn};
use rand::Rng;

use crate::entities::GameObject;
use crate::error::ArcadeError;
use crate::particles::{Particle, ParticleEngine};
use crate::state::GameState;
use crate::surface::Surface;

/// Builds one entity and registers it wherever it belongs.
pub type EntityFactory = Box<dyn FnMut(&mut GameState)>;

/// Every `delay` ticks, invokes its factory a random number of times in
/// `[min_count, max_count]`.
///
/// The spawner never sees the collection it fills; that is the factory's
/// business.
pub struct Spawner {
    delay: u32,
    elapsed: u32,
    min_count: u32,
    max_count: u32,
    factory: EntityFactory,
}

impl Spawner {
    pub fn new(
        delay: u32,
        min_count: u32,
        max_count: u32,
        factory: impl FnMut(&mut GameState) + 'static,
    ) -> Result<Self, ArcadeError> {
        if min_count > max_count {
            return Err(ArcadeError::InvalidSpawnRange {
                min: min_count,
                max: max_count,
            });
        }
        Ok(Spawner {
            delay,
            elapsed: 0,
            min_count,
            max_count,
            factory: Box::new(factory),
        })
    }

    pub fn delay(&self) -> u32 {
        self.delay
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Advance the timer one tick. Returns how many entities were spawned.
    pub fn step(&mut self, state: &mut GameState) -> u32 {
        self.elapsed += 1;
        if self.elapsed < self.delay {
            return 0;
        }
        let count = state.rng.gen_range(self.min_count..=self.max_count);
        for _ in 0..count {
            (self.factory)(state);
        }
        self.elapsed = 0;
        debug!("spawner fired {} time(s)", count);
        count
    }
}

impl GameObject for Spawner {
    fn update(&mut self, state: &mut GameState) {
        self.step(state);
    }

    fn draw(&self, _surface: &mut dyn Surface) {}
}

/// Wrap a particle constructor into a factory that pushes into `target`.
///
/// Once the engine is gone the factory stops building particles.
pub fn into_engine(
    target: Weak<RefCell<ParticleEngine>>,
    mut make: impl FnMut(&mut GameState) -> Particle + 'static,
) -> EntityFactory {
    Box::new(move |state| {
        let Some(engine) = target.upgrade() else {
            return;
        };
        let particle = make(state);
        let Ok(mut engine) = engine.try_borrow_mut() else {
            warn!("target engine is busy, dropping spawned particle");
            return;
        };
        engine.push(particle);
    })
}
