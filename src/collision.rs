//! Bounding-shape tests and the pairwise collision handler.
//!
//! All tests are inclusive: touching edges count as a hit.

use std::cell::RefCell;
use std::rc::Weak;

use log::warn;

use crate::entities::GameObject;
use crate::state::GameState;
use crate::surface::Surface;
use crate::vector::Vector2;

// ── Primitive tests ──────────────────────────────────────────────────────────

pub fn rect_contains_point(position: Vector2, size: Vector2, point: Vector2) -> bool {
    point.x >= position.x
        && point.x <= position.x + size.x
        && point.y >= position.y
        && point.y <= position.y + size.y
}

pub fn circle_contains_point(center: Vector2, radius: f32, point: Vector2) -> bool {
    center.distance(point) <= radius
}

/// Axis-aligned overlap; only a strict gap on either axis separates two rectangles.
pub fn rects_overlap(a_pos: Vector2, a_size: Vector2, b_pos: Vector2, b_size: Vector2) -> bool {
    if a_pos.x > b_pos.x + b_size.x || b_pos.x > a_pos.x + a_size.x {
        return false;
    }
    if a_pos.y > b_pos.y + b_size.y || b_pos.y > a_pos.y + a_size.y {
        return false;
    }
    true
}

pub fn circles_overlap(a_center: Vector2, a_radius: f32, b_center: Vector2, b_radius: f32) -> bool {
    a_center.distance(b_center) <= a_radius + b_radius
}

/// Closest point on the rectangle to the circle centre, compared against the radius.
pub fn rect_circle_overlap(position: Vector2, size: Vector2, center: Vector2, radius: f32) -> bool {
    let closest = center.clamp(position, position + size);
    closest.distance(center) <= radius
}

// ── Bounds ───────────────────────────────────────────────────────────────────

/// The region an entity occupies for hit testing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bounds {
    Rect { position: Vector2, size: Vector2 },
    Circle { center: Vector2, radius: f32 },
}

impl Bounds {
    pub fn contains(&self, point: Vector2) -> bool {
        match *self {
            Bounds::Rect { position, size } => rect_contains_point(position, size, point),
            Bounds::Circle { center, radius } => circle_contains_point(center, radius, point),
        }
    }

    pub fn overlaps(&self, other: &Bounds) -> bool {
        match (*self, *other) {
            (
                Bounds::Rect { position: a, size: sa },
                Bounds::Rect { position: b, size: sb },
            ) => rects_overlap(a, sa, b, sb),
            (
                Bounds::Circle { center: a, radius: ra },
                Bounds::Circle { center: b, radius: rb },
            ) => circles_overlap(a, ra, b, rb),
            (Bounds::Rect { position, size }, Bounds::Circle { center, radius })
            | (Bounds::Circle { center, radius }, Bounds::Rect { position, size }) => {
                rect_circle_overlap(position, size, center, radius)
            }
        }
    }
}

// ── Collision groups ─────────────────────────────────────────────────────────

/// Anything that can take part in a hit test.
pub trait Collidable {
    fn bounds(&self) -> Bounds;

    /// Members that return `false` (e.g. already consumed) are skipped.
    fn is_collidable(&self) -> bool {
        true
    }
}

/// A collection whose members are tested by a [`CollisionHandler`].
pub trait Members {
    type Member: Collidable;

    fn members_mut(&mut self) -> &mut [Self::Member];
}

pub type HitCallback<A, B> = Box<dyn FnMut(&mut A, &mut B, &mut GameState)>;

/// Tests every live member of one group against every live member of
/// another each tick and reports overlapping pairs to `on_hit`.
///
/// The handler only holds weak references; once either group is dropped
/// it does nothing.
pub struct CollisionHandler<A: Members, B: Members> {
    left: Weak<RefCell<A>>,
    right: Weak<RefCell<B>>,
    on_hit: HitCallback<A::Member, B::Member>,
}

impl<A: Members, B: Members> CollisionHandler<A, B> {
    pub fn new(
        left: Weak<RefCell<A>>,
        right: Weak<RefCell<B>>,
        on_hit: impl FnMut(&mut A::Member, &mut B::Member, &mut GameState) + 'static,
    ) -> Self {
        CollisionHandler {
            left,
            right,
            on_hit: Box::new(on_hit),
        }
    }

    /// Run one exhaustive pass; returns the number of hits dispatched.
    pub fn check(&mut self, state: &mut GameState) -> usize {
        let (Some(left_rc), Some(right_rc)) = (self.left.upgrade(), self.right.upgrade()) else {
            return 0;
        };
        let (Ok(mut left), Ok(mut right)) = (left_rc.try_borrow_mut(), right_rc.try_borrow_mut())
        else {
            warn!("collision groups are already borrowed, skipping pass");
            return 0;
        };

        let mut hits = 0;
        for a in left.members_mut().iter_mut() {
            for b in right.members_mut().iter_mut() {
                // a hit may have consumed `a`
                if !a.is_collidable() {
                    break;
                }
                if !b.is_collidable() {
                    continue;
                }
                if a.bounds().overlaps(&b.bounds()) {
                    (self.on_hit)(a, b, state);
                    hits += 1;
                }
            }
        }
        hits
    }
}

impl<A: Members + 'static, B: Members + 'static> GameObject for CollisionHandler<A, B> {
    fn update(&mut self, state: &mut GameState) {
        self.check(state);
    }

    fn draw(&self, _surface: &mut dyn Surface) {}

    fn is_dead(&self) -> bool {
        self.left.strong_count() == 0 || self.right.strong_count() == 0
    }
}
