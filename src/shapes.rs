//! Drawable primitives.

use crate::collision::Bounds;
use crate::surface::{Color, ImageId, Surface};
use crate::vector::{Vector2, Vector2Ext};

/// A primitive that can render itself at its own placement or at any
/// position, size and colour supplied by the caller.
///
/// Sizes are clamped to be non-negative on construction. Circles are
/// placed by their centre; every other variant by its top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Point {
        position: Vector2,
        color: Color,
    },
    Rectangle {
        position: Vector2,
        size: Vector2,
        color: Color,
    },
    Circle {
        center: Vector2,
        radius: f32,
        color: Color,
    },
    /// Isosceles triangle with its apex at the top centre of its box.
    Triangle {
        position: Vector2,
        size: Vector2,
        color: Color,
    },
    Sprite {
        image: ImageId,
        position: Vector2,
        size: Vector2,
    },
}

impl Shape {
    pub fn point(position: Vector2, color: Color) -> Self {
        Shape::Point { position, color }
    }

    pub fn rectangle(position: Vector2, size: Vector2, color: Color) -> Self {
        Shape::Rectangle {
            position,
            size: size.non_negative(),
            color,
        }
    }

    pub fn circle(center: Vector2, radius: f32, color: Color) -> Self {
        Shape::Circle {
            center,
            radius: radius.max(0.0),
            color,
        }
    }

    pub fn triangle(position: Vector2, size: Vector2, color: Color) -> Self {
        Shape::Triangle {
            position,
            size: size.non_negative(),
            color,
        }
    }

    pub fn sprite(image: ImageId, position: Vector2, size: Vector2) -> Self {
        Shape::Sprite {
            image,
            position,
            size: size.non_negative(),
        }
    }

    pub fn position(&self) -> Vector2 {
        match self {
            Shape::Point { position, .. }
            | Shape::Rectangle { position, .. }
            | Shape::Triangle { position, .. }
            | Shape::Sprite { position, .. } => *position,
            Shape::Circle { center, .. } => *center,
        }
    }

    /// Extent of the shape; a circle reports its diameter on both axes.
    pub fn size(&self) -> Vector2 {
        match self {
            Shape::Point { .. } => Vector2::ONE,
            Shape::Rectangle { size, .. }
            | Shape::Triangle { size, .. }
            | Shape::Sprite { size, .. } => *size,
            Shape::Circle { radius, .. } => Vector2::splat(radius * 2.0),
        }
    }

    /// Sprites carry no colour of their own.
    pub fn color(&self) -> Option<Color> {
        match self {
            Shape::Point { color, .. }
            | Shape::Rectangle { color, .. }
            | Shape::Circle { color, .. }
            | Shape::Triangle { color, .. } => Some(*color),
            Shape::Sprite { .. } => None,
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.draw_at(surface, self.position());
    }

    pub fn draw_at(&self, surface: &mut dyn Surface, position: Vector2) {
        self.draw_at_size(surface, position, self.size());
    }

    pub fn draw_at_size(&self, surface: &mut dyn Surface, position: Vector2, size: Vector2) {
        let color = self.color().unwrap_or(Color::WHITE);
        self.draw_at_size_color(surface, position, size, color);
    }

    pub fn draw_at_size_color(
        &self,
        surface: &mut dyn Surface,
        position: Vector2,
        size: Vector2,
        color: Color,
    ) {
        let size = size.non_negative();
        match self {
            Shape::Point { .. } => surface.fill_rect(position, Vector2::ONE, color),
            Shape::Rectangle { .. } => surface.fill_rect(position, size, color),
            Shape::Circle { .. } => surface.fill_circle(position, size.x / 2.0, color),
            Shape::Triangle { .. } => surface.fill_triangle(
                Vector2::new(position.x + size.x / 2.0, position.y),
                Vector2::new(position.x + size.x, position.y + size.y),
                Vector2::new(position.x, position.y + size.y),
                color,
            ),
            Shape::Sprite { image, .. } => surface.draw_image(image, position, size),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds_at(self.position(), self.size())
    }

    /// Hit region of this shape when placed at `position` with `size`.
    pub fn bounds_at(&self, position: Vector2, size: Vector2) -> Bounds {
        let size = size.non_negative();
        match self {
            Shape::Circle { .. } => Bounds::Circle {
                center: position,
                radius: size.x / 2.0,
            },
            Shape::Point { .. } => Bounds::Rect {
                position,
                size: Vector2::ZERO,
            },
            _ => Bounds::Rect { position, size },
        }
    }

    pub fn contains(&self, point: Vector2) -> bool {
        self.bounds().contains(point)
    }

    pub fn intersects(&self, other: &Shape) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}
