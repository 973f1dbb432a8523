//! The player ship: damped, soft-bounded movement with roll and a fire cooldown.

use serde::Deserialize;

use crate::collision::{Bounds, Collidable, Members};
use crate::compute;
use crate::entities::GameObject;
use crate::error::ArcadeError;
use crate::input::Key;
use crate::state::GameState;
use crate::surface::{Color, Surface};
use crate::vector::Vector2;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Velocity added per tick along each held direction.
    pub acceleration: f32,
    /// Per-tick velocity multiplier, strictly between 0 and 1.
    pub damping: f32,
    /// Constant part of the boundary counter-force.
    pub push_back: f32,
    /// Velocity components below this snap to zero.
    pub velocity_epsilon: f32,
    pub roll_rate: f32,
    pub roll_damping: f32,
    pub max_roll: f32,
    /// Ticks between shots while Fire is held.
    pub fire_delay: u32,
    pub size: Vector2,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            acceleration: 0.5,
            damping: 0.95,
            push_back: 0.5,
            velocity_epsilon: 0.02,
            roll_rate: 0.05,
            roll_damping: 0.8,
            max_roll: 0.5,
            fire_delay: 8,
            size: Vector2::new(24.0, 24.0),
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ArcadeError> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(ArcadeError::InvalidDamping(self.damping));
        }
        Ok(())
    }
}

/// Called with the muzzle position when the player fires.
pub type FireAction = Box<dyn FnMut(Vector2, &mut GameState)>;

pub struct Player {
    pub position: Vector2,
    pub velocity: Vector2,
    /// Tilt in radians, positive when banking right.
    pub roll: f32,
    pub color: Color,
    config: PlayerConfig,
    area_min: Vector2,
    area_max: Vector2,
    fire_cooldown: u32,
    on_fire: Option<FireAction>,
}

impl Player {
    /// A player that stays (softly) within `[area_min, area_max]`, measured
    /// on its top-left corner.
    pub fn new(
        position: Vector2,
        config: PlayerConfig,
        area_min: Vector2,
        area_max: Vector2,
    ) -> Result<Self, ArcadeError> {
        config.validate()?;
        Ok(Player {
            position,
            velocity: Vector2::ZERO,
            roll: 0.0,
            color: Color::WHITE,
            config,
            area_min,
            area_max,
            fire_cooldown: 0,
            on_fire: None,
        })
    }

    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_fire(mut self, action: impl FnMut(Vector2, &mut GameState) + 'static) -> Self {
        self.on_fire = Some(Box::new(action));
        self
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn size(&self) -> Vector2 {
        self.config.size
    }

    pub fn fire_cooldown(&self) -> u32 {
        self.fire_cooldown
    }

    /// Top centre of the ship.
    pub fn muzzle(&self) -> Vector2 {
        Vector2::new(self.position.x + self.config.size.x / 2.0, self.position.y)
    }

    fn step_motion(&mut self, state: &GameState) {
        let c = &self.config;
        self.velocity += compute::thrust(&state.input, c.acceleration);
        self.position = compute::integrate(self.position, self.velocity);
        self.velocity = compute::push_back(
            self.position,
            self.velocity,
            self.area_min,
            self.area_max,
            c.push_back,
            c.acceleration,
        );
        self.velocity = compute::damp(self.velocity, c.damping, c.velocity_epsilon);
        self.roll = compute::update_roll(
            self.roll,
            state.input.axis(Key::Left, Key::Right),
            c.roll_rate,
            c.roll_damping,
            c.max_roll,
        );
    }

    fn step_weapon(&mut self, state: &mut GameState) {
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        if self.fire_cooldown > 0 || !state.input.is_pressed(Key::Fire) {
            return;
        }
        let muzzle = self.muzzle();
        if let Some(fire) = self.on_fire.as_mut() {
            fire(muzzle, state);
            self.fire_cooldown = self.config.fire_delay;
        }
    }
}

impl GameObject for Player {
    fn update(&mut self, state: &mut GameState) {
        self.step_motion(state);
        self.step_weapon(state);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        // banking narrows the silhouette
        let size = self.config.size;
        let width = size.x * self.roll.cos();
        let left = self.position.x + (size.x - width) / 2.0;
        surface.fill_triangle(
            Vector2::new(left + width / 2.0, self.position.y),
            Vector2::new(left + width, self.position.y + size.y),
            Vector2::new(left, self.position.y + size.y),
            self.color,
        );
    }
}

impl Collidable for Player {
    fn bounds(&self) -> Bounds {
        Bounds::Rect {
            position: self.position,
            size: self.config.size,
        }
    }
}

impl Members for Player {
    type Member = Player;

    fn members_mut(&mut self) -> &mut [Player] {
        std::slice::from_mut(self)
    }
}
