/// Game object capability and the simple object kinds: static drawables,
/// text labels, HUD counters and full-screen overlays.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

use crate::input::Key;
use crate::shapes::Shape;
use crate::state::{GameState, GameStatus};
use crate::surface::{Align, Color, Surface, TextStyle};
use crate::vector::Vector2;

/// Anything the loop advances once per tick and then draws.
pub trait GameObject {
    fn update(&mut self, _state: &mut GameState) {}

    fn draw(&self, surface: &mut dyn Surface);

    /// Dead objects are pruned by their owner at the start of the next pass.
    fn is_dead(&self) -> bool {
        false
    }
}

impl<T: GameObject + ?Sized> GameObject for Box<T> {
    fn update(&mut self, state: &mut GameState) {
        (**self).update(state);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        (**self).draw(surface);
    }

    fn is_dead(&self) -> bool {
        (**self).is_dead()
    }
}

// ── Shared handles ────────────────────────────────────────────────────────────

/// Owning handle to an object that other objects need to reach.
///
/// The loop keeps the `Shared` itself; spawners and collision handlers only
/// get the `Weak` from [`Shared::downgrade`].
pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Shared(Rc::new(RefCell::new(value)))
    }

    pub fn downgrade(&self) -> Weak<RefCell<T>> {
        Rc::downgrade(&self.0)
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Shared(Rc::clone(&self.0))
    }
}

impl<T: GameObject> GameObject for Shared<T> {
    fn update(&mut self, state: &mut GameState) {
        if let Ok(mut inner) = self.0.try_borrow_mut() {
            inner.update(state);
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if let Ok(inner) = self.0.try_borrow() {
            inner.draw(surface);
        }
    }

    fn is_dead(&self) -> bool {
        self.0.try_borrow().map(|inner| inner.is_dead()).unwrap_or(false)
    }
}

// ── Static drawables ─────────────────────────────────────────────────────────

/// A shape that never changes.
pub struct Decoration {
    pub shape: Shape,
}

impl Decoration {
    pub fn new(shape: Shape) -> Self {
        Decoration { shape }
    }
}

impl GameObject for Decoration {
    fn draw(&self, surface: &mut dyn Surface) {
        self.shape.draw(surface);
    }
}

#[derive(Clone, Debug)]
pub struct Label {
    pub text: String,
    pub position: Vector2,
    pub style: TextStyle,
}

impl Label {
    pub fn new(text: impl Into<String>, position: Vector2, style: TextStyle) -> Self {
        Label {
            text: text.into(),
            position,
            style,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl GameObject for Label {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_text(&self.text, self.position, &self.style);
    }
}

// ── HUD ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HudField {
    Score,
    HighScore,
    Lives,
}

/// A label that mirrors one counter from the game state.
pub struct HudLabel {
    label: Label,
    field: HudField,
    prefix: String,
}

impl HudLabel {
    pub fn new(field: HudField, prefix: impl Into<String>, position: Vector2, style: TextStyle) -> Self {
        HudLabel {
            label: Label::new("", position, style),
            field,
            prefix: prefix.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.label.text
    }
}

impl GameObject for HudLabel {
    fn update(&mut self, state: &mut GameState) {
        let value = match self.field {
            HudField::Score => state.score,
            HudField::HighScore => state.high_score,
            HudField::Lives => state.lives,
        };
        self.label.set_text(format!("{}{}", self.prefix, value));
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.label.draw(surface);
    }
}

// ── Screen overlay ────────────────────────────────────────────────────────────

/// Full-screen panel (splash, game over) that moves the game to `next`
/// when Confirm is pressed.
///
/// Confirm is ignored for the first `arm_delay` ticks so a key still held
/// from the previous screen does not skip straight through.
pub struct Overlay {
    background: Shape,
    lines: Vec<Label>,
    next: GameStatus,
    arm_delay: u32,
    age: u32,
}

impl Overlay {
    pub const ARM_DELAY: u32 = 15;

    pub fn new(canvas: Vector2, background: Color, next: GameStatus) -> Self {
        Overlay {
            background: Shape::rectangle(Vector2::ZERO, canvas, background),
            lines: Vec::new(),
            next,
            arm_delay: Self::ARM_DELAY,
            age: 0,
        }
    }

    /// Append a line of centred text at height `y`.
    pub fn with_line(mut self, text: impl Into<String>, y: f32, font: &str, color: Color) -> Self {
        let x = self.background.size().x / 2.0;
        self.lines.push(Label::new(
            text,
            Vector2::new(x, y),
            TextStyle::new(font, color, Align::Center),
        ));
        self
    }

    pub fn with_arm_delay(mut self, ticks: u32) -> Self {
        self.arm_delay = ticks;
        self
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }
}

impl GameObject for Overlay {
    fn update(&mut self, state: &mut GameState) {
        self.age = self.age.saturating_add(1);
        if self.age > self.arm_delay && state.input.is_pressed(Key::Confirm) {
            state.status = self.next;
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.background.draw(surface);
        for line in &self.lines {
            line.draw(surface);
        }
    }
}
