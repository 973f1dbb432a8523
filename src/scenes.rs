//! Scene wiring for the asteroids shooter: splash screen, play field and
//! game-over screen, plus the director that switches between them.

use std::cell::RefCell;
use std::rc::Weak;

use log::{info, warn};
use rand::Rng;

use crate::collision::CollisionHandler;
use crate::config::{BlastConfig, BulletConfig, GameConfig};
use crate::driver::GameLoop;
use crate::entities::{GameObject, HudField, HudLabel, Overlay, Shared};
use crate::error::ArcadeError;
use crate::particles::{Particle, ParticleEngine};
use crate::player::Player;
use crate::shapes::Shape;
use crate::spawner::{into_engine, Spawner};
use crate::state::{GameState, GameStatus};
use crate::surface::{Align, Color, TextStyle};
use crate::vector::Vector2;

pub type Scene = Vec<Box<dyn GameObject>>;

const TITLE_FONT: &str = "bold 48px monospace";
const TEXT_FONT: &str = "20px monospace";
const HUD_FONT: &str = "16px monospace";

const SCORE_SQUARE: u32 = 100;
const SCORE_ROUND: u32 = 150;

// ── Shared pieces ─────────────────────────────────────────────────────────────

/// Background stars drifting down the screen.
fn starfield(config: &GameConfig) -> Result<Scene, ArcadeError> {
    let stars = Shared::new(ParticleEngine::with_limit(config.max_particles));
    let canvas = config.canvas_size();
    let lifespan = config.stars.lifespan;
    let factory = into_engine(stars.downgrade(), move |state: &mut GameState| {
        let x = state.rng.gen_range(0.0..canvas.x);
        let speed: f32 = state.rng.gen_range(1.0..3.0);
        let side = if speed > 2.0 { 2.0 } else { 1.0 };
        Particle::new(
            Vector2::new(x, 0.0),
            Vector2::splat(side),
            Shape::point(Vector2::ZERO, Color::GREY),
            lifespan,
        )
        .with_velocity(Vector2::new(0.0, speed))
    });
    let spawner = Spawner::new(
        config.stars.delay,
        config.stars.min_count,
        config.stars.max_count,
        factory,
    )?;
    let mut scene: Scene = Vec::new();
    scene.push(Box::new(stars));
    scene.push(Box::new(spawner));
    Ok(scene)
}

/// Throw a ring of short-lived fragments out of `center`.
fn explode(
    state: &mut GameState,
    target: &Weak<RefCell<ParticleEngine>>,
    center: Vector2,
    blast: &BlastConfig,
) {
    let Some(engine) = target.upgrade() else {
        return;
    };
    let Ok(mut engine) = engine.try_borrow_mut() else {
        return;
    };
    let count = state.rng.gen_range(blast.min_count..=blast.max_count);
    for _ in 0..count {
        let angle: f32 = state.rng.gen_range(0.0..std::f32::consts::TAU);
        let speed: f32 = state.rng.gen_range(1.0..3.0);
        let fragment = Particle::new(
            center,
            Vector2::splat(4.0),
            Shape::circle(Vector2::ZERO, 2.0, Color::ORANGE),
            blast.lifespan,
        )
        .with_velocity(Vector2::from_angle(angle) * speed);
        engine.push(fragment);
    }
    state.play_sound("explosion");
}

/// Fire action that launches one bullet from the muzzle into `target`.
///
/// A full or busy engine drops the shot and no sound is played.
pub fn shoot_into(
    target: Weak<RefCell<ParticleEngine>>,
    bullet: BulletConfig,
) -> impl FnMut(Vector2, &mut GameState) + 'static {
    move |muzzle: Vector2, state: &mut GameState| {
        let Some(engine) = target.upgrade() else {
            return;
        };
        let Ok(mut engine) = engine.try_borrow_mut() else {
            warn!("bullet engine is busy, dropping shot");
            return;
        };
        let shot = Particle::new(
            muzzle - Vector2::new(bullet.size.x / 2.0, bullet.size.y),
            bullet.size,
            Shape::rectangle(Vector2::ZERO, bullet.size, Color::CYAN),
            bullet.lifespan,
        )
        .with_velocity(Vector2::new(0.0, -bullet.speed));
        if engine.push(shot) {
            state.play_sound("shoot");
        }
    }
}

// ── Scenes ────────────────────────────────────────────────────────────────────

pub fn splash(state: &GameState, config: &GameConfig) -> Result<Scene, ArcadeError> {
    let canvas = config.canvas_size();
    let mut scene = starfield(config)?;
    let mut overlay = Overlay::new(canvas, Color::BLACK, GameStatus::Playing)
        .with_line("ASTEROIDS", canvas.y * 0.3, TITLE_FONT, Color::CYAN)
        .with_line("Press ENTER to start", canvas.y * 0.55, TEXT_FONT, Color::WHITE)
        .with_line("Arrows: move   Space: fire   Q: quit", canvas.y * 0.65, TEXT_FONT, Color::GREY);
    if state.high_score > 0 {
        overlay = overlay.with_line(
            format!("Best Score: {}", state.high_score),
            canvas.y * 0.42,
            TEXT_FONT,
            Color::YELLOW,
        );
    }
    // overlay first so the stars show through
    scene.insert(0, Box::new(overlay));
    Ok(scene)
}

pub fn game_over(state: &GameState, config: &GameConfig) -> Result<Scene, ArcadeError> {
    let canvas = config.canvas_size();
    let mut scene = starfield(config)?;
    let overlay = Overlay::new(canvas, Color::BLACK, GameStatus::Splash)
        .with_line("GAME OVER", canvas.y * 0.3, TITLE_FONT, Color::RED)
        .with_line(format!("Final Score: {}", state.score), canvas.y * 0.45, TEXT_FONT, Color::YELLOW)
        .with_line("Press ENTER to continue", canvas.y * 0.6, TEXT_FONT, Color::WHITE);
    scene.insert(0, Box::new(overlay));
    Ok(scene)
}

/// The play field. Resets score and lives for a new round.
pub fn playing(state: &mut GameState, config: &GameConfig) -> Result<Scene, ArcadeError> {
    state.start_round(config.lives);
    let canvas = config.canvas_size();
    let mut scene = starfield(config)?;

    let asteroids = Shared::new(ParticleEngine::with_limit(config.max_particles));
    let bullets = Shared::new(ParticleEngine::with_limit(config.max_particles));
    let explosions = Shared::new(ParticleEngine::with_limit(config.max_particles));

    let lifespan = config.asteroids.lifespan;
    let asteroid_factory = into_engine(asteroids.downgrade(), move |state: &mut GameState| {
        let side: f32 = state.rng.gen_range(20.0..48.0);
        let x = state.rng.gen_range(0.0..(canvas.x - side).max(1.0));
        let velocity = Vector2::new(state.rng.gen_range(-1.0..1.0), state.rng.gen_range(1.0..2.5));
        let health = ((side / 16.0) as u32).max(1);
        let (position, shape, value) = if state.rng.gen_bool(0.5) {
            (
                Vector2::new(x + side / 2.0, -side / 2.0),
                Shape::circle(Vector2::ZERO, side / 2.0, Color::BROWN),
                SCORE_ROUND,
            )
        } else {
            (
                Vector2::new(x, -side),
                Shape::rectangle(Vector2::ZERO, Vector2::splat(side), Color::BROWN),
                SCORE_SQUARE,
            )
        };
        Particle::new(position, Vector2::splat(side), shape, lifespan)
            .with_velocity(velocity)
            .with_health(health)
            .with_value(value)
    });
    let asteroid_spawner = Spawner::new(
        config.asteroids.delay,
        config.asteroids.min_count,
        config.asteroids.max_count,
        asteroid_factory,
    )?;

    let size = config.player.size;
    let start = Vector2::new((canvas.x - size.x) / 2.0, canvas.y - size.y - 16.0);
    let player = Player::new(start, config.player.clone(), Vector2::ZERO, canvas - size)?
        .with_fire(shoot_into(bullets.downgrade(), config.bullets.clone()));
    let player = Shared::new(player);

    let debris = explosions.downgrade();
    let blast = config.explosion.clone();
    let bullet_hits = CollisionHandler::new(
        bullets.downgrade(),
        asteroids.downgrade(),
        move |shot: &mut Particle, rock: &mut Particle, state: &mut GameState| {
            shot.remove();
            if rock.damage(1) {
                state.add_score(rock.value);
                explode(state, &debris, rock.center(), &blast);
            }
        },
    );

    let debris = explosions.downgrade();
    let blast = config.explosion.clone();
    let ship_hits = CollisionHandler::new(
        player.downgrade(),
        asteroids.downgrade(),
        move |_ship: &mut Player, rock: &mut Particle, state: &mut GameState| {
            rock.remove();
            explode(state, &debris, rock.center(), &blast);
            if state.lose_life() {
                state.play_sound("game_over");
            }
        },
    );

    let hud = TextStyle::new(HUD_FONT, Color::YELLOW, Align::Left);
    let lives_style = TextStyle::new(HUD_FONT, Color::RED, Align::Right);
    let best_style = TextStyle::new(HUD_FONT, Color::WHITE, Align::Center);

    scene.push(Box::new(asteroids));
    scene.push(Box::new(asteroid_spawner));
    scene.push(Box::new(bullets));
    scene.push(Box::new(explosions));
    scene.push(Box::new(player));
    scene.push(Box::new(bullet_hits));
    scene.push(Box::new(ship_hits));
    scene.push(Box::new(HudLabel::new(HudField::Score, "Score: ", Vector2::new(8.0, 4.0), hud)));
    scene.push(Box::new(HudLabel::new(
        HudField::HighScore,
        "Best: ",
        Vector2::new(canvas.x / 2.0, 4.0),
        best_style,
    )));
    scene.push(Box::new(HudLabel::new(
        HudField::Lives,
        "Lives: ",
        Vector2::new(canvas.x - 8.0, 4.0),
        lives_style,
    )));
    Ok(scene)
}

// ── Director ──────────────────────────────────────────────────────────────────

/// Rebuilds the loop's objects whenever the game status changes.
pub struct Director {
    config: GameConfig,
    current: Option<GameStatus>,
}

impl Director {
    pub fn new(config: GameConfig) -> Self {
        Director {
            config,
            current: None,
        }
    }

    pub fn current(&self) -> Option<GameStatus> {
        self.current
    }

    /// Returns `true` if a new scene was installed.
    pub fn sync(&mut self, driver: &mut GameLoop) -> Result<bool, ArcadeError> {
        let status = driver.state().status;
        if self.current == Some(status) {
            return Ok(false);
        }
        self.config.validate()?;
        let scene = match status {
            GameStatus::Splash => splash(driver.state(), &self.config)?,
            GameStatus::Playing => playing(driver.state_mut(), &self.config)?,
            GameStatus::GameOver => game_over(driver.state(), &self.config)?,
        };
        info!("switching to {:?} ({} objects)", status, scene.len());
        driver.replace_objects(scene);
        // a key held across the switch should not carry into the new scene
        driver.state_mut().input.release_all();
        self.current = Some(status);
        Ok(true)
    }
}
