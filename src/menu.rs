//! Mouse-driven menu screens: a centered title, a column of buttons and an
//! optional footer line.

use macroquad::prelude::*;

const BUTTON_WIDTH: f32 = 300.0;
const BUTTON_HEIGHT: f32 = 50.0;
const BUTTON_SPACING: f32 = 70.0;
const BUTTONS_TOP: f32 = 200.0;
const TITLE_Y: f32 = 100.0;

const BUTTON_COLOR: Color = Color::new(0.27, 0.51, 0.71, 1.0);
const BUTTON_HOVER_COLOR: Color = Color::new(0.39, 0.59, 0.78, 1.0);

fn button_rect(index: usize) -> Rect {
    Rect::new(
        (screen_width() - BUTTON_WIDTH) * 0.5,
        BUTTONS_TOP + index as f32 * BUTTON_SPACING,
        BUTTON_WIDTH,
        BUTTON_HEIGHT,
    )
}

fn draw_button(rect: Rect, label: &str, hovered: bool) {
    let fill = if hovered { BUTTON_HOVER_COLOR } else { BUTTON_COLOR };
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, fill);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, WHITE);

    let m = measure_text(label, None, 30, 1.0);
    draw_text(
        label,
        rect.x + (rect.w - m.width) * 0.5,
        rect.y + (rect.h + m.offset_y) * 0.5,
        30.0,
        WHITE,
    );
}

/// Draws a full menu screen and reports which button was clicked this
/// frame, if any.
pub fn draw_menu(title: &str, labels: &[&str], footer: Option<&str>) -> Option<usize> {
    let t = measure_text(title, None, 30, 1.0);
    draw_text(title, (screen_width() - t.width) * 0.5, TITLE_Y, 30.0, WHITE);

    if let Some(footer) = footer {
        let f = measure_text(footer, None, 15, 1.0);
        draw_text(
            footer,
            (screen_width() - f.width) * 0.5,
            screen_height() - 50.0,
            15.0,
            WHITE,
        );
    }

    let mouse = Vec2::from(mouse_position());
    let mut clicked = None;
    for (i, label) in labels.iter().enumerate() {
        let rect = button_rect(i);
        let hovered = rect.contains(mouse);
        draw_button(rect, label, hovered);
        if hovered && is_mouse_button_pressed(MouseButton::Left) {
            clicked = Some(i);
        }
    }
    clicked
}
