use particle_arcade::config::{BulletConfig, CanvasConfig};
use particle_arcade::entities::Shared;
use particle_arcade::error::ArcadeError;
use particle_arcade::input::Key;
use particle_arcade::particles::ParticleEngine;
use particle_arcade::scenes::{shoot_into, Director};
use particle_arcade::surface::RecordingSurface;
use particle_arcade::{GameConfig, GameLoop, GameState, GameStatus, Vector2};

struct Harness {
    driver: GameLoop,
    director: Director,
    surface: RecordingSurface,
}

impl Harness {
    fn new(seed: u64) -> Self {
        let config = GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        };
        Harness {
            driver: GameLoop::new(GameState::new(config.canvas_size(), seed)),
            director: Director::new(config),
            surface: RecordingSurface::new(),
        }
    }

    /// One scheduler frame with `keys` held.
    fn frame(&mut self, keys: &[Key]) {
        self.driver.state_mut().input.set_held(keys.iter().copied());
        self.director.sync(&mut self.driver).unwrap();
        assert!(self.driver.tick(&mut self.surface));
    }

    fn status(&self) -> GameStatus {
        self.driver.state().status
    }

    fn start_playing(&mut self) {
        while self.status() != GameStatus::Playing {
            self.frame(&[Key::Confirm]);
        }
        self.frame(&[]);
    }
}

#[test]
fn starts_on_the_splash_screen() {
    let mut game = Harness::new(1);
    game.frame(&[]);

    assert_eq!(game.director.current(), Some(GameStatus::Splash));
    let texts = game.surface.texts();
    assert!(texts.contains(&"ASTEROIDS"));
    assert!(texts.contains(&"Press ENTER to start"));
    assert!(!texts.iter().any(|t| t.starts_with("Best Score")));
}

#[test]
fn splash_shows_best_score_when_known() {
    let mut game = Harness::new(1);
    game.driver.state_mut().high_score = 1200;
    game.frame(&[]);

    assert!(game.surface.texts().contains(&"Best Score: 1200"));
}

#[test]
fn confirm_is_ignored_until_splash_is_armed() {
    let mut game = Harness::new(1);

    for _ in 0..15 {
        game.frame(&[Key::Confirm]);
        assert_eq!(game.status(), GameStatus::Splash);
    }
    game.frame(&[Key::Confirm]);
    assert_eq!(game.status(), GameStatus::Playing);
}

#[test]
fn new_round_resets_score_and_lives() {
    let mut game = Harness::new(1);
    game.driver.state_mut().score = 999;
    game.start_playing();

    assert_eq!(game.director.current(), Some(GameStatus::Playing));
    assert_eq!(game.driver.state().lives, 3);
    assert_eq!(game.driver.state().score, 0);

    let texts = game.surface.texts();
    assert!(texts.contains(&"Score: 0"));
    assert!(texts.contains(&"Lives: 3"));
    assert!(texts.contains(&"Best: 0"));
}

#[test]
fn holding_fire_shoots() {
    let mut game = Harness::new(1);
    game.start_playing();
    game.driver.state_mut().drain_sounds();

    game.frame(&[Key::Fire]);
    assert_eq!(game.driver.state_mut().drain_sounds(), vec!["shoot"]);
}

#[test]
fn game_over_screen_reports_final_score() {
    let mut game = Harness::new(1);
    game.start_playing();
    game.driver.state_mut().add_score(450);
    game.driver.state_mut().status = GameStatus::GameOver;
    game.frame(&[]);

    assert_eq!(game.director.current(), Some(GameStatus::GameOver));
    let texts = game.surface.texts();
    assert!(texts.contains(&"GAME OVER"));
    assert!(texts.contains(&"Final Score: 450"));

    // confirm leads back to the splash screen, which now knows the best score
    while game.status() != GameStatus::Splash {
        game.frame(&[Key::Confirm]);
    }
    game.frame(&[]);
    assert!(game.surface.texts().contains(&"Best Score: 450"));
}

#[test]
fn same_seed_plays_out_identically() {
    let play = |seed: u64| {
        let mut game = Harness::new(seed);
        game.start_playing();
        for tick in 0..600 {
            let keys: &[Key] = if tick % 120 < 60 {
                &[Key::Fire, Key::Left]
            } else {
                &[Key::Fire, Key::Right]
            };
            if game.status() != GameStatus::Playing {
                break;
            }
            game.frame(keys);
        }
        let state = game.driver.state();
        (state.score, state.lives, state.frame, game.driver.len())
    };

    assert_eq!(play(2024), play(2024));
}

#[test]
fn director_refuses_a_canvas_without_area() {
    let config = GameConfig {
        canvas: CanvasConfig {
            width: 0.0,
            height: 480.0,
        },
        ..GameConfig::default()
    };
    let mut driver = GameLoop::new(GameState::new(config.canvas_size(), 1));
    let mut director = Director::new(config);

    let result = director.sync(&mut driver);
    assert!(matches!(result, Err(ArcadeError::InvalidCanvas { .. })));
    assert!(driver.is_empty());
    assert_eq!(director.current(), None);
}

#[test]
fn shot_goes_into_the_bullet_engine() {
    let mut state = GameState::new(Vector2::new(640.0, 480.0), 1);
    let bullets = Shared::new(ParticleEngine::new());
    let mut fire = shoot_into(bullets.downgrade(), BulletConfig::default());

    fire(Vector2::new(100.0, 200.0), &mut state);

    let engine = bullets.borrow();
    assert_eq!(engine.len(), 1);
    let shot = &engine.particles()[0];
    assert_eq!(shot.position, Vector2::new(98.5, 192.0));
    assert_eq!(shot.velocity, Vector2::new(0.0, -8.0));
    assert_eq!(state.drain_sounds(), vec!["shoot"]);
}

#[test]
fn shot_into_a_busy_engine_is_dropped() {
    let mut state = GameState::new(Vector2::new(640.0, 480.0), 1);
    let bullets = Shared::new(ParticleEngine::new());
    let mut fire = shoot_into(bullets.downgrade(), BulletConfig::default());

    {
        let _held = bullets.borrow_mut();
        fire(Vector2::new(100.0, 200.0), &mut state);
    }

    assert!(bullets.borrow().is_empty());
    assert!(state.drain_sounds().is_empty());
}
