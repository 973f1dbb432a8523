//! Rendering surface abstraction.
//!
//! Game objects only ever talk to a `Surface`; the terminal backend lives in
//! `display` and tests use [`RecordingSurface`].

use crate::vector::Vector2;

/// 24-bit RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREY: Color = Color::rgb(128, 128, 128);
    pub const RED: Color = Color::rgb(220, 40, 40);
    pub const GREEN: Color = Color::rgb(60, 200, 80);
    pub const BLUE: Color = Color::rgb(40, 80, 220);
    pub const YELLOW: Color = Color::rgb(240, 220, 60);
    pub const CYAN: Color = Color::rgb(60, 220, 230);
    pub const ORANGE: Color = Color::rgb(250, 150, 40);
    pub const BROWN: Color = Color::rgb(140, 100, 60);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

/// Horizontal anchoring of a text string relative to its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font: String,
    pub color: Color,
    pub align: Align,
}

impl TextStyle {
    pub fn new(font: impl Into<String>, color: Color, align: Align) -> Self {
        TextStyle {
            font: font.into(),
            color,
            align,
        }
    }
}

/// Opaque handle to an image owned by the rendering backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub String);

impl ImageId {
    pub fn new(name: impl Into<String>) -> Self {
        ImageId(name.into())
    }
}

/// Primitive drawing operations at floating-point world coordinates.
pub trait Surface {
    /// Wipe the whole drawing area.
    fn clear(&mut self);
    fn fill_rect(&mut self, position: Vector2, size: Vector2, color: Color);
    fn fill_triangle(&mut self, a: Vector2, b: Vector2, c: Vector2, color: Color);
    fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color);
    fn draw_image(&mut self, image: &ImageId, position: Vector2, size: Vector2);
    /// Text is drawn with a top baseline.
    fn fill_text(&mut self, text: &str, position: Vector2, style: &TextStyle);
}

/// One recorded call on a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Rect {
        position: Vector2,
        size: Vector2,
        color: Color,
    },
    Triangle {
        points: [Vector2; 3],
        color: Color,
    },
    Circle {
        center: Vector2,
        radius: f32,
        color: Color,
    },
    Image {
        image: ImageId,
        position: Vector2,
        size: Vector2,
    },
    Text {
        text: String,
        position: Vector2,
        style: TextStyle,
    },
}

/// Surface that stores every call instead of drawing it.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands issued since the most recent `clear`.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| *c == DrawCommand::Clear)
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn texts(&self) -> Vec<&str> {
        self.last_frame()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, position: Vector2, size: Vector2, color: Color) {
        self.commands.push(DrawCommand::Rect {
            position,
            size,
            color,
        });
    }

    fn fill_triangle(&mut self, a: Vector2, b: Vector2, c: Vector2, color: Color) {
        self.commands.push(DrawCommand::Triangle {
            points: [a, b, c],
            color,
        });
    }

    fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_image(&mut self, image: &ImageId, position: Vector2, size: Vector2) {
        self.commands.push(DrawCommand::Image {
            image: image.clone(),
            position,
            size,
        });
    }

    fn fill_text(&mut self, text: &str, position: Vector2, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            style: style.clone(),
        });
    }
}
