//! Immediate-mode rendering of the play field and HUD.

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use crate::game::{BLOCK, Cell, Mode, SnakeGame};
use crate::lang::{Language, Text};

const BOUNDARY_GREEN: Color = Color::new(0.0, 0.34, 0.13, 1.0);
const HEART_RED: Color = Color::new(0.9, 0.1, 0.15, 1.0);

// Food and bonus cycle through this palette in Modern Hard.
const PALETTE: [Color; 7] = [WHITE, RED, BOUNDARY_GREEN, BLUE, SKYBLUE, MAGENTA, YELLOW];

fn random_palette_color() -> Color {
    PALETTE[gen_range(0, PALETTE.len())]
}

fn cell_center(c: Cell) -> Vec2 {
    vec2(
        (c.x * BLOCK) as f32 + BLOCK as f32 * 0.5,
        (c.y * BLOCK) as f32 + BLOCK as f32 * 0.5,
    )
}

fn draw_snake(game: &SnakeGame) {
    for segment in &game.snake {
        draw_rectangle(
            (segment.x * BLOCK) as f32,
            (segment.y * BLOCK) as f32,
            BLOCK as f32,
            BLOCK as f32,
            WHITE,
        );
    }
}

fn draw_food(game: &SnakeGame) {
    let center = cell_center(game.food);
    match game.mode {
        Mode::ClassicEasy => {
            draw_circle(center.x, center.y, BLOCK as f32 * 0.5, WHITE);
        }
        Mode::ModernHard => {
            draw_circle(center.x, center.y, BLOCK as f32 / 1.5, random_palette_color());
        }
    }
}

fn draw_bonus(game: &SnakeGame) {
    let Some(bonus) = game.bonus else { return };
    let center = cell_center(bonus);
    let radius = BLOCK as f32 * 1.25;
    match game.mode {
        Mode::ClassicEasy => {
            draw_circle(center.x, center.y, radius, random_palette_color());
        }
        Mode::ModernHard => {
            // Diamond.
            let color = random_palette_color();
            let top = vec2(center.x, center.y - radius);
            let right = vec2(center.x + radius, center.y);
            let bottom = vec2(center.x, center.y + radius);
            let left = vec2(center.x - radius, center.y);
            draw_triangle(top, right, bottom, color);
            draw_triangle(top, bottom, left, color);
        }
    }
}

/// Green strips along all four edges; Modern Hard only, where touching
/// them is fatal.
fn draw_boundaries(game: &SnakeGame) {
    let (grid_w, grid_h) = game.grid_size();
    let w = (grid_w * BLOCK) as f32;
    let h = (grid_h * BLOCK) as f32;
    let b = BLOCK as f32;
    draw_rectangle(0.0, 0.0, w, b, BOUNDARY_GREEN);
    draw_rectangle(0.0, h - b, w, b, BOUNDARY_GREEN);
    draw_rectangle(0.0, 0.0, b, h, BOUNDARY_GREEN);
    draw_rectangle(w - b, 0.0, b, h, BOUNDARY_GREEN);
}

fn draw_heart(x: f32, y: f32, size: f32) {
    let r = size * 0.27;
    draw_circle(x + r, y + r, r, HEART_RED);
    draw_circle(x + size - r, y + r, r, HEART_RED);
    draw_triangle(
        vec2(x, y + r * 1.2),
        vec2(x + size, y + r * 1.2),
        vec2(x + size * 0.5, y + size),
        HEART_RED,
    );
}

/// Remaining lives, centered near the bottom; Classic Easy only.
fn draw_hearts(game: &SnakeGame) {
    let size = 25.0;
    let spacing = 5.0;
    let hearts = game.hearts as f32;
    let total = hearts * (size + spacing) - spacing;
    let start_x = (screen_width() - total) * 0.5;
    let y = screen_height() - 50.0;
    for i in 0..game.hearts {
        draw_heart(start_x + i as f32 * (size + spacing), y, size);
    }
}

pub fn draw_hud(game: &SnakeGame, lang: Language) {
    let score = format!("{}{}", lang.text(Text::ScorePrefix), game.score);
    draw_text(&score, 25.0, 25.0, 25.0, WHITE);

    let high = format!("{}{}", lang.text(Text::HighScorePrefix), game.high_score);
    let m = measure_text(&high, None, 25, 1.0);
    draw_text(&high, screen_width() - m.width - 25.0, 25.0, 25.0, WHITE);
}

pub fn draw_game(game: &SnakeGame, lang: Language) {
    match game.mode {
        Mode::ClassicEasy => draw_hearts(game),
        Mode::ModernHard => draw_boundaries(game),
    }
    draw_food(game);
    draw_bonus(game);
    draw_snake(game);
    draw_hud(game, lang);
}
