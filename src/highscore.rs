//! Per-mode high scores, stored as a bare decimal integer in a text file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;

use crate::game::Mode;

const SAVE_DIR: &str = "saves";

fn score_path(base: &Path, mode: Mode) -> PathBuf {
    let file = match mode {
        Mode::ClassicEasy => "highscore_ce.txt",
        Mode::ModernHard => "highscore_mh.txt",
    };
    base.join(SAVE_DIR).join(file)
}

/// A missing file is a fresh install; a malformed one is treated the same
/// way after a warning.
pub fn load(base: &Path, mode: Mode) -> u32 {
    let path = score_path(base, mode);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return 0,
        Err(err) => {
            warn!("could not read {}: {}", path.display(), err);
            return 0;
        }
    };
    match text.trim().parse() {
        Ok(score) => score,
        Err(_) => {
            warn!("ignoring malformed high score in {}", path.display());
            0
        }
    }
}

pub fn save(base: &Path, mode: Mode, score: u32) -> io::Result<()> {
    let path = score_path(base, mode);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(&path, score.to_string())
}
