//! Particle arcade: a small fixed-timestep 2D game core.
//!
//! - `driver`: the two-phase (update, draw) loop over top-level objects
//! - `entities`: the `GameObject` capability and simple object kinds
//! - `particles`, `spawner`, `collision`, `player`: the gameplay building blocks
//! - `surface`, `shapes`: drawing primitives behind a backend-neutral trait
//! - `display`: the crossterm terminal backend
//! - `scenes`: the asteroids shooter assembled from the pieces above

pub mod collision;
pub mod compute;
pub mod config;
pub mod display;
pub mod driver;
pub mod entities;
pub mod error;
pub mod input;
pub mod particles;
pub mod player;
pub mod scenes;
pub mod shapes;
pub mod spawner;
pub mod state;
pub mod surface;
pub mod vector;

pub use config::GameConfig;
pub use driver::GameLoop;
pub use entities::{GameObject, Shared};
pub use error::{ArcadeError, ConfigError};
pub use state::{GameState, GameStatus};
pub use vector::Vector2;
