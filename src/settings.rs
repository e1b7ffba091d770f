//! Player settings persisted between runs as JSON.

use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::lang::Language;

pub const SETTINGS_FILE: &str = "snake_settings.json";

#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Debug)]
pub enum Resolution {
    R640x480,
    R800x600,
    R1280x720,
}

impl Resolution {
    pub const ALL: [Resolution; 3] =
        [Resolution::R640x480, Resolution::R800x600, Resolution::R1280x720];

    pub fn dims(self) -> (i32, i32) {
        match self {
            Resolution::R640x480 => (640, 480),
            Resolution::R800x600 => (800, 600),
            Resolution::R1280x720 => (1280, 720),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Resolution::R640x480 => "640x480",
            Resolution::R800x600 => "800x600",
            Resolution::R1280x720 => "1280x720",
        }
    }
}

/// Volume steps offered by the settings menu.
pub const VOLUME_LEVELS: [f32; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

pub fn volume_label(volume: f32) -> String {
    format!("{}%", (volume * 100.0).round() as i32)
}

#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Debug)]
pub struct Settings {
    pub language: Language,
    pub resolution: Resolution,
    pub volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::English,
            resolution: Resolution::R800x600,
            volume: 1.0,
        }
    }
}

impl Settings {
    /// Defaults apply when the file is absent or unreadable.
    pub fn load(path: &Path) -> Settings {
        match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
                warn!("ignoring malformed settings in {}: {}", path.display(), err);
                Settings::default()
            }),
            Err(_) => Settings::default(),
        }
    }

    pub fn save(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                warn!("could not serialize settings: {}", err);
                return;
            }
        };
        if let Err(err) = fs::write(path, json) {
            warn!("could not write {}: {}", path.display(), err);
        }
    }
}
