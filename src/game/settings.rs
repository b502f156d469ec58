use std::fmt;

use crate::{error::ParseKindError, generators::GeneratorKind};

/// Presentation theme. Front-ends map it to colors; the game rules ignore it.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeKind {
    Adventure,
    Mysterious,
    RetroArcade,
    #[default]
    EpicQuest,
    Chill,
    SpeedRun,
    BossBattle,
}

impl ThemeKind {
    pub const ALL: [ThemeKind; 7] = [
        ThemeKind::Adventure,
        ThemeKind::Mysterious,
        ThemeKind::RetroArcade,
        ThemeKind::EpicQuest,
        ThemeKind::Chill,
        ThemeKind::SpeedRun,
        ThemeKind::BossBattle,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ThemeKind::Adventure => "adventure",
            ThemeKind::Mysterious => "mysterious",
            ThemeKind::RetroArcade => "retro-arcade",
            ThemeKind::EpicQuest => "epic-quest",
            ThemeKind::Chill => "chill",
            ThemeKind::SpeedRun => "speed-run",
            ThemeKind::BossBattle => "boss-battle",
        }
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeKind::Adventure => write!(f, "Adventure"),
            ThemeKind::Mysterious => write!(f, "Mysterious"),
            ThemeKind::RetroArcade => write!(f, "Retro Arcade"),
            ThemeKind::EpicQuest => write!(f, "Epic Quest"),
            ThemeKind::Chill => write!(f, "Chill"),
            ThemeKind::SpeedRun => write!(f, "Speed Run"),
            ThemeKind::BossBattle => write!(f, "Boss Battle"),
        }
    }
}

impl std::str::FromStr for ThemeKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeKind::ALL
            .into_iter()
            .find(|theme| theme.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseKindError::Theme(s.to_string()))
    }
}

/// Everything needed to start a session. Passed explicitly; there is no global selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub width: u16,
    pub height: u16,
    pub generator: GeneratorKind,
    pub theme: ThemeKind,
    /// Seed for maze generation. `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            width: 20,
            height: 15,
            generator: GeneratorKind::default(),
            theme: ThemeKind::default(),
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = GameSettings::default();
        assert_eq!((settings.width, settings.height), (20, 15));
        assert_eq!(settings.generator, GeneratorKind::Prim);
        assert_eq!(settings.theme, ThemeKind::EpicQuest);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!("Boss-Battle".parse::<ThemeKind>(), Ok(ThemeKind::BossBattle));
        assert!("disco".parse::<ThemeKind>().is_err());
        for theme in ThemeKind::ALL {
            assert_eq!(theme.slug().parse::<ThemeKind>(), Ok(theme));
        }
    }
}
