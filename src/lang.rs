//! Localized UI strings, English and Russian.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Debug)]
pub enum Language {
    English,
    Russian,
}

/// Every piece of text the menus and HUD can display.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Text {
    Title,
    StartGame,
    SettingsItem,
    ExitToDesktop,
    SelectMode,
    ClassicEasy,
    ModernHard,
    Back,
    ResolutionItem,
    LanguageItem,
    VolumeItem,
    YouLost,
    Restart,
    ExitToMenu,
    ScorePrefix,
    HighScorePrefix,
    Paused,
    PauseHint,
}

impl Language {
    pub fn text(self, t: Text) -> &'static str {
        match self {
            Language::English => match t {
                Text::Title => "Snake: The Game",
                Text::StartGame => "Start the Game",
                Text::SettingsItem => "Settings",
                Text::ExitToDesktop => "Exit to Desktop",
                Text::SelectMode => "Select the game mode",
                Text::ClassicEasy => "Classic Easy",
                Text::ModernHard => "Modern Hard",
                Text::Back => "Back",
                Text::ResolutionItem => "Resolution",
                Text::LanguageItem => "Language",
                Text::VolumeItem => "Volume",
                Text::YouLost => "You lost",
                Text::Restart => "Restart",
                Text::ExitToMenu => "Exit to Menu",
                Text::ScorePrefix => "Your score: ",
                Text::HighScorePrefix => "High score: ",
                Text::Paused => "Paused",
                Text::PauseHint => "Space/Esc: continue   Q: quit",
            },
            Language::Russian => match t {
                Text::Title => "Змейка",
                Text::StartGame => "Начать игру",
                Text::SettingsItem => "Настройки",
                Text::ExitToDesktop => "Выйти из игры",
                Text::SelectMode => "Выберите режим игры",
                Text::ClassicEasy => "Классический",
                Text::ModernHard => "Современный",
                Text::Back => "Назад",
                Text::ResolutionItem => "Разрешение",
                Text::LanguageItem => "Язык",
                Text::VolumeItem => "Громкость",
                Text::YouLost => "Вы проиграли",
                Text::Restart => "Начать заново",
                Text::ExitToMenu => "Выйти в меню",
                Text::ScorePrefix => "Счёт: ",
                Text::HighScorePrefix => "Рекорд: ",
                Text::Paused => "Пауза",
                Text::PauseHint => "Пробел/Esc: продолжить   Q: выход",
            },
        }
    }

    /// Game-over title when the run set a record.
    pub fn new_high_score_title(self, score: u32) -> String {
        match self {
            Language::English => format!("New High Score: {}", score),
            Language::Russian => format!("Новый рекорд: {}", score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_languages_cover_every_text() {
        let all = [
            Text::Title,
            Text::StartGame,
            Text::SettingsItem,
            Text::ExitToDesktop,
            Text::SelectMode,
            Text::ClassicEasy,
            Text::ModernHard,
            Text::Back,
            Text::ResolutionItem,
            Text::LanguageItem,
            Text::VolumeItem,
            Text::YouLost,
            Text::Restart,
            Text::ExitToMenu,
            Text::ScorePrefix,
            Text::HighScorePrefix,
            Text::Paused,
            Text::PauseHint,
        ];
        for t in all {
            assert!(!Language::English.text(t).is_empty());
            assert!(!Language::Russian.text(t).is_empty());
        }
    }

    #[test]
    fn record_title_includes_the_score() {
        assert!(Language::English.new_high_score_title(42).contains("42"));
        assert!(Language::Russian.new_high_score_title(42).contains("42"));
    }
}
