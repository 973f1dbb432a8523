//! Shared per-game state handed to every object during `update`.

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::entities::GameObject;
use crate::input::Input;
use crate::vector::Vector2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Splash,
    Playing,
    GameOver,
}

pub struct GameState {
    pub input: Input,
    /// Seeded so a run can be replayed.
    pub rng: StdRng,
    pub score: u32,
    /// The highest score seen so far (updated live during play).
    pub high_score: u32,
    pub lives: u32,
    pub status: GameStatus,
    pub frame: u64,
    /// Drawing area in world units.
    pub canvas: Vector2,
    running: bool,
    pending: Vec<Box<dyn GameObject>>,
    sounds: Vec<String>,
}

impl GameState {
    pub fn new(canvas: Vector2, seed: u64) -> Self {
        GameState {
            input: Input::new(),
            rng: StdRng::seed_from_u64(seed),
            score: 0,
            high_score: 0,
            lives: 0,
            status: GameStatus::Splash,
            frame: 0,
            canvas,
            running: true,
            pending: Vec::new(),
            sounds: Vec::new(),
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    /// Stop the loop; no further ticks run.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Queue a top-level object. It becomes live on the next tick.
    pub fn spawn(&mut self, object: impl GameObject + 'static) {
        self.pending.push(Box::new(object));
    }

    pub fn take_pending(&mut self) -> Vec<Box<dyn GameObject>> {
        std::mem::take(&mut self.pending)
    }

    /// Fire-and-forget sound request, drained by the frontend.
    pub fn play_sound(&mut self, name: impl Into<String>) {
        self.sounds.push(name.into());
    }

    pub fn drain_sounds(&mut self) -> Vec<String> {
        std::mem::take(&mut self.sounds)
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
        self.high_score = self.high_score.max(self.score);
    }

    /// Reset score and lives for a fresh round.
    pub fn start_round(&mut self, lives: u32) {
        self.score = 0;
        self.lives = lives;
        self.status = GameStatus::Playing;
    }

    /// Take one life. Returns `true` when this exhausted the last one, in
    /// which case the status switches to `GameOver`.
    pub fn lose_life(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            info!("game over with score {}", self.score);
            self.status = GameStatus::GameOver;
            return true;
        }
        false
    }
}
