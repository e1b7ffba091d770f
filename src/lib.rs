#![warn(clippy::all, rust_2018_idioms)]

mod app;
mod audio;
mod draw;
pub mod game;
pub mod highscore;
pub mod lang;
mod menu;
pub mod settings;

pub use app::SnakeApp;
pub use audio::Sounds;
