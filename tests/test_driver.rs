use std::cell::{Cell, RefCell};
use std::rc::Rc;

use particle_arcade::entities::GameObject;
use particle_arcade::surface::{Color, DrawCommand, RecordingSurface, Surface};
use particle_arcade::{GameLoop, GameState, Vector2};

type Log = Rc<RefCell<Vec<String>>>;

/// Records every update/draw call into a shared log.
struct Tracer {
    name: &'static str,
    log: Log,
    dead: Rc<Cell<bool>>,
}

impl Tracer {
    fn new(name: &'static str, log: &Log) -> Self {
        Tracer {
            name,
            log: Rc::clone(log),
            dead: Rc::new(Cell::new(false)),
        }
    }
}

impl GameObject for Tracer {
    fn update(&mut self, _state: &mut GameState) {
        self.log.borrow_mut().push(format!("update {}", self.name));
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.log.borrow_mut().push(format!("draw {}", self.name));
        surface.fill_rect(Vector2::ZERO, Vector2::ONE, Color::WHITE);
    }

    fn is_dead(&self) -> bool {
        self.dead.get()
    }
}

/// Queues a tracer the first time it is updated.
struct Breeder {
    log: Log,
    bred: bool,
}

impl GameObject for Breeder {
    fn update(&mut self, state: &mut GameState) {
        if !self.bred {
            state.spawn(Tracer::new("child", &self.log));
            self.bred = true;
        }
    }

    fn draw(&self, _surface: &mut dyn Surface) {}
}

fn make_loop() -> GameLoop {
    GameLoop::new(GameState::new(Vector2::new(640.0, 480.0), 0))
}

fn take(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.borrow_mut())
}

#[test]
fn updates_all_before_drawing_any() {
    let log: Log = Rc::default();
    let mut driver = make_loop();
    driver.add(Tracer::new("a", &log));
    driver.add(Tracer::new("b", &log));
    let mut surface = RecordingSurface::new();

    assert!(driver.tick(&mut surface));

    assert_eq!(take(&log), vec!["update a", "update b", "draw a", "draw b"]);
    assert_eq!(surface.commands[0], DrawCommand::Clear);
    assert_eq!(surface.commands.len(), 3);
    assert_eq!(driver.state().frame, 1);
}

#[test]
fn dead_objects_are_pruned_before_update() {
    let log: Log = Rc::default();
    let mut driver = make_loop();
    let doomed = Tracer::new("doomed", &log);
    let kill = Rc::clone(&doomed.dead);
    driver.add(Tracer::new("a", &log));
    driver.add(doomed);
    driver.add(Tracer::new("c", &log));
    let mut surface = RecordingSurface::new();

    driver.tick(&mut surface);
    take(&log);

    kill.set(true);
    driver.tick(&mut surface);

    assert_eq!(take(&log), vec!["update a", "update c", "draw a", "draw c"]);
    assert_eq!(driver.len(), 2);
}

#[test]
fn spawned_objects_join_on_next_tick() {
    let log: Log = Rc::default();
    let mut driver = make_loop();
    driver.add(Breeder {
        log: Rc::clone(&log),
        bred: false,
    });
    let mut surface = RecordingSurface::new();

    driver.tick(&mut surface);
    assert!(take(&log).is_empty());
    assert_eq!(driver.len(), 2);

    driver.tick(&mut surface);
    assert_eq!(take(&log), vec!["update child", "draw child"]);
}

#[test]
fn stopped_loop_does_nothing() {
    let log: Log = Rc::default();
    let mut driver = make_loop();
    driver.add(Tracer::new("a", &log));
    driver.stop();
    let mut surface = RecordingSurface::new();

    assert!(!driver.running());
    assert!(!driver.tick(&mut surface));
    assert!(take(&log).is_empty());
    assert!(surface.commands.is_empty());
    assert_eq!(driver.state().frame, 0);
}

#[test]
fn empty_loop_still_clears() {
    let mut driver = make_loop();
    let mut surface = RecordingSurface::new();

    assert!(driver.is_empty());
    assert!(driver.tick(&mut surface));
    assert_eq!(surface.commands, vec![DrawCommand::Clear]);
}

#[test]
fn replacing_objects_drops_queued_spawns() {
    let log: Log = Rc::default();
    let mut driver = make_loop();
    driver.add(Tracer::new("old", &log));
    driver.state_mut().spawn(Tracer::new("queued", &log));

    let mut scene: Vec<Box<dyn GameObject>> = Vec::new();
    scene.push(Box::new(Tracer::new("new", &log)));
    driver.replace_objects(scene);
    let mut surface = RecordingSurface::new();
    driver.tick(&mut surface);

    assert_eq!(take(&log), vec!["update new", "draw new"]);
    assert_eq!(driver.len(), 1);
}
