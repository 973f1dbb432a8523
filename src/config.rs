//! Game tuning, loaded from a TOML file.

use std::num::NonZeroU32;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::{ArcadeError, ConfigError};
use crate::player::PlayerConfig;
use crate::vector::Vector2;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            width: 640.0,
            height: 480.0,
        }
    }
}

impl CanvasConfig {
    pub fn validate(&self) -> Result<(), ArcadeError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !(positive(self.width) && positive(self.height)) {
            return Err(ArcadeError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Cadence and lifetime of one kind of spawned particle.
#[derive(Clone, Debug)]
pub struct SpawnConfig {
    pub delay: u32,
    pub min_count: u32,
    pub max_count: u32,
    pub lifespan: NonZeroU32,
}

/// A spawn table as written in the file; absent keys keep the table's
/// own defaults.
#[derive(Debug, Deserialize)]
struct SpawnTable {
    delay: Option<u32>,
    min_count: Option<u32>,
    max_count: Option<u32>,
    lifespan: Option<NonZeroU32>,
}

impl SpawnTable {
    fn over(self, base: SpawnConfig) -> SpawnConfig {
        SpawnConfig {
            delay: self.delay.unwrap_or(base.delay),
            min_count: self.min_count.unwrap_or(base.min_count),
            max_count: self.max_count.unwrap_or(base.max_count),
            lifespan: self.lifespan.unwrap_or(base.lifespan),
        }
    }
}

fn asteroid_table<'de, D: Deserializer<'de>>(d: D) -> Result<SpawnConfig, D::Error> {
    Ok(SpawnTable::deserialize(d)?.over(SpawnConfig::asteroids()))
}

fn star_table<'de, D: Deserializer<'de>>(d: D) -> Result<SpawnConfig, D::Error> {
    Ok(SpawnTable::deserialize(d)?.over(SpawnConfig::stars()))
}

impl SpawnConfig {
    fn new(delay: u32, min_count: u32, max_count: u32, lifespan: u32) -> Self {
        SpawnConfig {
            delay,
            min_count,
            max_count,
            lifespan: NonZeroU32::new(lifespan).unwrap_or(NonZeroU32::MIN),
        }
    }

    pub fn asteroids() -> Self {
        Self::new(40, 1, 3, 600)
    }

    pub fn stars() -> Self {
        Self::new(3, 1, 2, 240)
    }

    pub fn validate(&self) -> Result<(), ArcadeError> {
        check_range(self.min_count, self.max_count)
    }
}

fn check_range(min: u32, max: u32) -> Result<(), ArcadeError> {
    if min > max {
        return Err(ArcadeError::InvalidSpawnRange { min, max });
    }
    Ok(())
}

/// Fragments thrown out by each explosion.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BlastConfig {
    pub min_count: u32,
    pub max_count: u32,
    pub lifespan: NonZeroU32,
}

impl Default for BlastConfig {
    fn default() -> Self {
        BlastConfig {
            min_count: 6,
            max_count: 10,
            lifespan: NonZeroU32::new(20).unwrap_or(NonZeroU32::MIN),
        }
    }
}

impl BlastConfig {
    pub fn validate(&self) -> Result<(), ArcadeError> {
        check_range(self.min_count, self.max_count)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub speed: f32,
    pub lifespan: NonZeroU32,
    pub size: Vector2,
}

impl Default for BulletConfig {
    fn default() -> Self {
        BulletConfig {
            speed: 8.0,
            lifespan: NonZeroU32::new(60).unwrap_or(NonZeroU32::MIN),
            size: Vector2::new(3.0, 8.0),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas: CanvasConfig,
    pub fps: u32,
    /// Fixed RNG seed; random when absent.
    pub seed: Option<u64>,
    pub lives: u32,
    /// Cap per particle engine.
    pub max_particles: usize,
    pub player: PlayerConfig,
    #[serde(deserialize_with = "asteroid_table")]
    pub asteroids: SpawnConfig,
    #[serde(deserialize_with = "star_table")]
    pub stars: SpawnConfig,
    pub explosion: BlastConfig,
    pub bullets: BulletConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            canvas: CanvasConfig::default(),
            fps: 60,
            seed: None,
            lives: 3,
            max_particles: 500,
            player: PlayerConfig::default(),
            asteroids: SpawnConfig::asteroids(),
            stars: SpawnConfig::stars(),
            explosion: BlastConfig::default(),
            bullets: BulletConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ArcadeError> {
        self.canvas.validate()?;
        self.player.validate()?;
        self.asteroids.validate()?;
        self.stars.validate()?;
        self.explosion.validate()?;
        Ok(())
    }

    pub fn canvas_size(&self) -> Vector2 {
        Vector2::new(self.canvas.width, self.canvas.height)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}
