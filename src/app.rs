//! Screen state machine: menus, the play loop, pause and game over.

use std::path::Path;

use log::info;
use macroquad::prelude::*;

use crate::audio::Sounds;
use crate::draw::{draw_game, draw_hud};
use crate::game::{BLOCK, Direction, GameEvent, Mode, SnakeGame};
use crate::highscore;
use crate::lang::{Language, Text};
use crate::menu::draw_menu;
use crate::settings::{Resolution, SETTINGS_FILE, Settings, VOLUME_LEVELS, volume_label};

enum Screen {
    MainMenu,
    ModeSelect,
    SettingsMenu,
    ResolutionMenu,
    LanguageMenu,
    VolumeMenu,
    Playing { game: SnakeGame, last_tick: f64 },
    Paused { game: SnakeGame },
    GameOver { game: SnakeGame },
}

pub struct SnakeApp {
    screen: Screen,
    settings: Settings,
    sounds: Sounds,
    quit: bool,
}

impl SnakeApp {
    pub fn new(settings: Settings, sounds: Sounds) -> SnakeApp {
        SnakeApp {
            screen: Screen::MainMenu,
            settings,
            sounds,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// One frame: input, simulation and drawing for the current screen.
    pub fn frame(&mut self) {
        if is_key_pressed(KeyCode::Q) {
            self.quit = true;
            return;
        }

        let screen = std::mem::replace(&mut self.screen, Screen::MainMenu);
        self.screen = match screen {
            Screen::MainMenu => self.main_menu(),
            Screen::ModeSelect => self.mode_select(),
            Screen::SettingsMenu => self.settings_menu(),
            Screen::ResolutionMenu => self.resolution_menu(),
            Screen::LanguageMenu => self.language_menu(),
            Screen::VolumeMenu => self.volume_menu(),
            Screen::Playing { game, last_tick } => self.playing(game, last_tick),
            Screen::Paused { game } => self.paused(game),
            Screen::GameOver { game } => self.game_over(game),
        };
    }

    fn save_settings(&self) {
        self.settings.save(Path::new(SETTINGS_FILE));
    }

    fn start_run(&mut self, mode: Mode) -> Screen {
        let (w, h) = self.settings.resolution.dims();
        let high_score = highscore::load(Path::new("."), mode);
        let game = SnakeGame::new(mode, w / BLOCK, h / BLOCK, high_score);
        self.sounds.start_music(mode);
        info!("starting {:?} run, high score to beat: {}", mode, high_score);
        Screen::Playing {
            game,
            last_tick: get_time(),
        }
    }

    fn apply_resolution(&mut self, resolution: Resolution) {
        self.settings.resolution = resolution;
        let (w, h) = resolution.dims();
        request_new_screen_size(w as f32, h as f32);
        self.save_settings();
    }

    /// Button clicks get the activation beep.
    fn clicked(&self, choice: Option<usize>) -> Option<usize> {
        if choice.is_some() {
            self.sounds.play_start();
        }
        choice
    }

    fn main_menu(&mut self) -> Screen {
        let lang = self.settings.language;
        let labels = [
            lang.text(Text::StartGame),
            lang.text(Text::SettingsItem),
            lang.text(Text::ExitToDesktop),
        ];
        let footer = concat!("snake_arcade v", env!("CARGO_PKG_VERSION"));
        match self.clicked(draw_menu(lang.text(Text::Title), &labels, Some(footer))) {
            Some(0) => Screen::ModeSelect,
            Some(1) => Screen::SettingsMenu,
            Some(2) => {
                self.quit = true;
                Screen::MainMenu
            }
            _ => Screen::MainMenu,
        }
    }

    fn mode_select(&mut self) -> Screen {
        let lang = self.settings.language;
        let labels = [
            lang.text(Text::ClassicEasy),
            lang.text(Text::ModernHard),
            lang.text(Text::Back),
        ];
        let choice = self.clicked(draw_menu(lang.text(Text::SelectMode), &labels, None));
        if is_key_pressed(KeyCode::Escape) {
            return Screen::MainMenu;
        }
        match choice {
            Some(0) => self.start_run(Mode::ClassicEasy),
            Some(1) => self.start_run(Mode::ModernHard),
            Some(2) => Screen::MainMenu,
            _ => Screen::ModeSelect,
        }
    }

    fn settings_menu(&mut self) -> Screen {
        let lang = self.settings.language;
        let labels = [
            lang.text(Text::ResolutionItem),
            lang.text(Text::LanguageItem),
            lang.text(Text::VolumeItem),
            lang.text(Text::Back),
        ];
        let choice = self.clicked(draw_menu(lang.text(Text::SettingsItem), &labels, None));
        if is_key_pressed(KeyCode::Escape) {
            return Screen::MainMenu;
        }
        match choice {
            Some(0) => Screen::ResolutionMenu,
            Some(1) => Screen::LanguageMenu,
            Some(2) => Screen::VolumeMenu,
            Some(3) => Screen::MainMenu,
            _ => Screen::SettingsMenu,
        }
    }

    fn resolution_menu(&mut self) -> Screen {
        let lang = self.settings.language;
        let labels = [
            Resolution::ALL[0].label(),
            Resolution::ALL[1].label(),
            Resolution::ALL[2].label(),
            lang.text(Text::Back),
        ];
        let choice = self.clicked(draw_menu(lang.text(Text::ResolutionItem), &labels, None));
        if is_key_pressed(KeyCode::Escape) {
            return Screen::SettingsMenu;
        }
        match choice {
            Some(i @ 0..=2) => {
                self.apply_resolution(Resolution::ALL[i]);
                Screen::ResolutionMenu
            }
            Some(_) => Screen::SettingsMenu,
            None => Screen::ResolutionMenu,
        }
    }

    fn language_menu(&mut self) -> Screen {
        let lang = self.settings.language;
        let labels = ["Русский", "English", lang.text(Text::Back)];
        let choice = self.clicked(draw_menu(lang.text(Text::LanguageItem), &labels, None));
        if is_key_pressed(KeyCode::Escape) {
            return Screen::SettingsMenu;
        }
        match choice {
            Some(0) => {
                self.settings.language = Language::Russian;
                self.save_settings();
                Screen::LanguageMenu
            }
            Some(1) => {
                self.settings.language = Language::English;
                self.save_settings();
                Screen::LanguageMenu
            }
            Some(_) => Screen::SettingsMenu,
            None => Screen::LanguageMenu,
        }
    }

    fn volume_menu(&mut self) -> Screen {
        let lang = self.settings.language;
        let level_labels: Vec<String> = VOLUME_LEVELS.iter().map(|&v| volume_label(v)).collect();
        let mut labels: Vec<&str> = level_labels.iter().map(String::as_str).collect();
        labels.push(lang.text(Text::Back));
        let choice = draw_menu(lang.text(Text::VolumeItem), &labels, None);
        if is_key_pressed(KeyCode::Escape) {
            return Screen::SettingsMenu;
        }
        match choice {
            Some(i) if i < VOLUME_LEVELS.len() => {
                self.settings.volume = VOLUME_LEVELS[i];
                self.sounds.set_volume(VOLUME_LEVELS[i]);
                self.save_settings();
                // Beep at the new volume so the choice is audible.
                self.sounds.play_start();
                Screen::VolumeMenu
            }
            Some(_) => {
                self.sounds.play_start();
                Screen::SettingsMenu
            }
            None => Screen::VolumeMenu,
        }
    }

    fn playing(&mut self, mut game: SnakeGame, mut last_tick: f64) -> Screen {
        steer_from_keyboard(&mut game);

        if is_key_pressed(KeyCode::Space)
            || is_key_pressed(KeyCode::Escape)
            || is_mouse_button_pressed(MouseButton::Left)
        {
            self.sounds.set_music_muted(true);
            return Screen::Paused { game };
        }

        let mut dead = false;
        for event in run_due_ticks(&mut game, &mut last_tick, get_time()) {
            match event {
                GameEvent::AteFood => self.sounds.play_eat(game.mode),
                GameEvent::AteBonus => {}
                GameEvent::NewHighScore(score) => {
                    if let Err(err) = highscore::save(Path::new("."), game.mode, score) {
                        log::warn!("could not save high score: {}", err);
                    } else {
                        info!("new {:?} high score: {}", game.mode, score);
                    }
                }
                GameEvent::Died => {
                    self.sounds.play_death();
                    dead = true;
                }
            }
        }

        draw_game(&game, self.settings.language);

        if dead {
            self.sounds.stop_music();
            return Screen::GameOver { game };
        }
        Screen::Playing { game, last_tick }
    }

    fn paused(&mut self, game: SnakeGame) -> Screen {
        let lang = self.settings.language;

        draw_game(&game, lang);
        draw_rectangle(
            0.0,
            0.0,
            screen_width(),
            screen_height(),
            Color::new(0.0, 0.0, 0.0, 0.5),
        );

        let title = lang.text(Text::Paused);
        let t = measure_text(title, None, 40, 1.0);
        draw_text(
            title,
            (screen_width() - t.width) * 0.5,
            screen_height() * 0.5,
            40.0,
            WHITE,
        );
        let hint = lang.text(Text::PauseHint);
        let h = measure_text(hint, None, 20, 1.0);
        draw_text(
            hint,
            (screen_width() - h.width) * 0.5,
            screen_height() * 0.5 + 30.0,
            20.0,
            GRAY,
        );

        if is_key_pressed(KeyCode::Space)
            || is_key_pressed(KeyCode::Escape)
            || is_mouse_button_pressed(MouseButton::Left)
        {
            self.sounds.set_music_muted(false);
            // Resume with a fresh tick deadline so time spent paused does
            // not turn into an instant move.
            return Screen::Playing {
                game,
                last_tick: get_time(),
            };
        }
        Screen::Paused { game }
    }

    fn game_over(&mut self, game: SnakeGame) -> Screen {
        let lang = self.settings.language;
        let mode = game.mode;

        let title = if game.record {
            lang.new_high_score_title(game.high_score)
        } else {
            lang.text(Text::YouLost).to_string()
        };
        let labels = [
            lang.text(Text::Restart),
            lang.text(Text::ExitToMenu),
            lang.text(Text::ExitToDesktop),
        ];
        draw_hud(&game, lang);
        match self.clicked(draw_menu(&title, &labels, None)) {
            Some(0) => self.start_run(mode),
            Some(1) => Screen::MainMenu,
            Some(2) => {
                self.quit = true;
                Screen::GameOver { game }
            }
            _ => Screen::GameOver { game },
        }
    }
}

/// Longest stall the tick loop will replay; anything older is dropped so a
/// window drag or focus loss does not dump a burst of moves on the snake.
const MAX_CATCHUP: f64 = 0.25;

/// Runs every simulation step that has come due by `now`. One rendered
/// frame can owe several steps once the speed passes the display refresh
/// rate, so this catches up in a loop rather than stepping once per frame.
fn run_due_ticks(game: &mut SnakeGame, last_tick: &mut f64, now: f64) -> Vec<GameEvent> {
    if now - *last_tick > MAX_CATCHUP {
        *last_tick = now - MAX_CATCHUP;
    }
    let mut events = Vec::new();
    while now - *last_tick >= game.tick_interval() {
        *last_tick += game.tick_interval();
        let step = game.tick();
        let died = step.contains(&GameEvent::Died);
        events.extend(step);
        if died {
            break;
        }
    }
    events
}

/// Arrows, WASD and the numpad all steer.
fn steer_from_keyboard(game: &mut SnakeGame) {
    if is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A) || is_key_pressed(KeyCode::Kp4) {
        game.steer(Direction::Left);
    }
    if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D) || is_key_pressed(KeyCode::Kp6) {
        game.steer(Direction::Right);
    }
    if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W) || is_key_pressed(KeyCode::Kp8) {
        game.steer(Direction::Up);
    }
    if is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S) || is_key_pressed(KeyCode::Kp2) {
        game.steer(Direction::Down);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;
    use serial_test::serial;

    fn fast_game() -> SnakeGame {
        macroquad::rand::srand(5);
        let mut game = SnakeGame::new(Mode::ModernHard, 40, 30, 0);
        game.food = Cell { x: 1, y: 1 };
        game.bonus = None;
        game
    }

    #[test]
    #[serial]
    fn one_frame_runs_every_due_tick() {
        let mut game = fast_game();
        game.speed = 600.0;
        game.steer(Direction::Right);
        let start_x = game.snake[0].x;
        let mut last_tick = 0.0;
        // A ~60 fps frame owes ten 600 ticks/s steps (10.5 intervals, so
        // the count does not ride on float equality).
        run_due_ticks(&mut game, &mut last_tick, 10.5 / 600.0);
        assert_eq!(game.snake[0].x, start_x + 10);
        assert!((last_tick - 10.0 / 600.0).abs() < 1e-9);
    }

    #[test]
    #[serial]
    fn long_stall_does_not_replay_missed_ticks() {
        let mut game = fast_game();
        game.steer(Direction::Right);
        let start_x = game.snake[0].x;
        let mut last_tick = 0.0;
        // Ten seconds of backlog at 5 ticks/s; only the capped window runs.
        run_due_ticks(&mut game, &mut last_tick, 10.0);
        assert_eq!(game.snake[0].x, start_x + 1);
    }

    #[test]
    #[serial]
    fn catch_up_stops_at_death() {
        let mut game = fast_game();
        game.speed = 600.0;
        game.snake = vec![Cell { x: 39, y: 15 }];
        game.steer(Direction::Right);
        let mut last_tick = 0.0;
        let events = run_due_ticks(&mut game, &mut last_tick, 0.1);
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::Died).count(),
            1
        );
        assert!(!game.alive);
        assert_eq!(game.snake[0], Cell { x: 39, y: 15 });
    }
}
