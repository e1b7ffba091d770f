#![warn(clippy::all, rust_2018_idioms)]

use std::path::Path;

use macroquad::prelude::*;
use snake_arcade::settings::{SETTINGS_FILE, Settings};
use snake_arcade::{SnakeApp, Sounds};

fn window_conf() -> Conf {
    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let (w, h) = settings.resolution.dims();
    Conf {
        window_title: "Snake".to_owned(),
        window_width: w,
        window_height: h,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() -> Result<(), String> {
    env_logger::init();

    // Wall-clock seed; the default quad-rand state is identical every
    // launch and would replay the same food placements.
    macroquad::rand::srand((macroquad::miniquad::date::now() * 1_000_000.0) as u64);

    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let sounds = Sounds::load(settings.volume).await?;
    let mut app = SnakeApp::new(settings, sounds);

    loop {
        clear_background(BLACK);
        app.frame();
        if app.should_quit() {
            break;
        }
        next_frame().await;
    }
    Ok(())
}
