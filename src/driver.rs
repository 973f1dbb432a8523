//! The fixed two-phase game loop.

use crate::entities::GameObject;
use crate::state::GameState;
use crate::surface::Surface;

/// Owns the top-level objects and the game state; the external scheduler
/// calls [`GameLoop::tick`] once per frame.
pub struct GameLoop {
    objects: Vec<Box<dyn GameObject>>,
    state: GameState,
}

impl GameLoop {
    pub fn new(state: GameState) -> Self {
        GameLoop {
            objects: Vec::new(),
            state,
        }
    }

    pub fn add(&mut self, object: impl GameObject + 'static) {
        self.objects.push(Box::new(object));
    }

    /// Swap in a new scene, dropping every object and anything still queued.
    pub fn replace_objects(&mut self, objects: Vec<Box<dyn GameObject>>) {
        self.objects = objects;
        self.state.take_pending();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn running(&self) -> bool {
        self.state.running()
    }

    pub fn stop(&mut self) {
        self.state.stop();
    }

    /// Run one frame: prune dead objects, update the rest in insertion
    /// order, then clear and redraw.
    ///
    /// Objects spawned during the update pass are admitted after drawing,
    /// so they first take part on the next tick. Returns `false` without
    /// doing anything once the loop has been stopped.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> bool {
        if !self.state.running() {
            return false;
        }
        self.state.frame += 1;

        for i in (0..self.objects.len()).rev() {
            if self.objects[i].is_dead() {
                self.objects.remove(i);
            }
        }

        for object in self.objects.iter_mut() {
            object.update(&mut self.state);
        }

        surface.clear();
        for object in &self.objects {
            object.draw(surface);
        }

        let spawned = self.state.take_pending();
        self.objects.extend(spawned);
        true
    }
}
