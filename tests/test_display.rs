use particle_arcade::display::TerminalSurface;
use particle_arcade::surface::{Align, Color, ImageId, Surface, TextStyle};
use particle_arcade::Vector2;

/// One cell per 10×10 world units.
fn make_surface() -> TerminalSurface {
    TerminalSurface::new(64, 48, Vector2::new(640.0, 480.0))
}

#[test]
fn rect_fills_cells_whose_centres_it_covers() {
    let mut surface = make_surface();
    surface.fill_rect(Vector2::new(100.0, 100.0), Vector2::new(50.0, 30.0), Color::RED);

    assert_eq!(surface.glyph_at(10, 10), Some('█'));
    assert_eq!(surface.glyph_at(14, 12), Some('█'));
    assert_eq!(surface.glyph_at(15, 10), Some(' '));
    assert_eq!(surface.glyph_at(9, 10), Some(' '));
    assert_eq!(surface.glyph_at(10, 13), Some(' '));
}

#[test]
fn centred_text_straddles_its_anchor() {
    let mut surface = make_surface();
    let style = TextStyle::new("16px monospace", Color::WHITE, Align::Center);
    surface.fill_text("HI", Vector2::new(320.0, 0.0), &style);

    assert_eq!(surface.glyph_at(31, 0), Some('H'));
    assert_eq!(surface.glyph_at(32, 0), Some('I'));
}

#[test]
fn right_aligned_text_ends_at_its_anchor() {
    let mut surface = make_surface();
    let style = TextStyle::new("16px monospace", Color::WHITE, Align::Right);
    surface.fill_text("AB", Vector2::new(100.0, 20.0), &style);

    assert_eq!(surface.glyph_at(8, 2), Some('A'));
    assert_eq!(surface.glyph_at(9, 2), Some('B'));
    assert_eq!(surface.glyph_at(10, 2), Some(' '));
}

#[test]
fn tiny_shapes_still_leave_a_mark() {
    let mut surface = make_surface();
    surface.fill_circle(Vector2::new(2.0, 2.0), 0.5, Color::ORANGE);
    assert_eq!(surface.glyph_at(0, 0), Some('•'));
}

#[test]
fn off_screen_drawing_is_clipped() {
    let mut surface = make_surface();
    surface.fill_rect(Vector2::new(-500.0, -500.0), Vector2::new(100.0, 100.0), Color::RED);
    surface.fill_text("far away", Vector2::new(10_000.0, 10_000.0), &TextStyle::new("", Color::WHITE, Align::Left));
    assert_eq!(surface.glyph_at(0, 0), Some(' '));
    assert_eq!(surface.glyph_at(64, 0), None);
}

#[test]
fn registered_images_use_their_glyph() {
    let mut surface = make_surface();
    surface.register_image(ImageId::new("ship"), '^', Color::CYAN);
    surface.draw_image(&ImageId::new("ship"), Vector2::new(0.0, 0.0), Vector2::new(20.0, 20.0));
    assert_eq!(surface.glyph_at(0, 0), Some('^'));
    assert_eq!(surface.glyph_at(1, 1), Some('^'));
}

#[test]
fn clear_blanks_every_cell() {
    let mut surface = make_surface();
    surface.fill_rect(Vector2::ZERO, Vector2::new(640.0, 480.0), Color::BLUE);
    assert_eq!(surface.glyph_at(5, 5), Some('█'));

    surface.clear();
    assert_eq!(surface.glyph_at(5, 5), Some(' '));
}

#[test]
fn present_writes_the_grid() {
    let mut surface = TerminalSurface::new(16, 4, Vector2::new(160.0, 40.0));
    let style = TextStyle::new("16px monospace", Color::WHITE, Align::Left);
    surface.fill_text("HELLO", Vector2::new(10.0, 10.0), &style);

    let mut out: Vec<u8> = Vec::new();
    surface.present(&mut out).unwrap();

    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("HELLO"));
}

#[test]
fn resize_keeps_the_world_mapping() {
    let mut surface = make_surface();
    surface.resize(32, 24);
    surface.fill_rect(Vector2::new(320.0, 240.0), Vector2::new(20.0, 20.0), Color::GREEN);
    assert_eq!(surface.glyph_at(16, 12), Some('█'));
    assert_eq!(surface.glyph_at(63, 0), None);
}
