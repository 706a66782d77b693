use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
};

pub struct SharedComponentsPlugin;

impl Plugin for SharedComponentsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<GameKind>();
        app.register_type::<DisplayName>();
    }
}

/// The mini-game protocols a guardian can run. Closed set: objective
/// tracking, drop tables and session rules all match on it exhaustively.
#[derive(
    Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum GameKind {
    Decontaminate,
    DataStream,
    BioForge,
    RecycleSort,
    WildlifePatrol,
}

impl GameKind {
    pub const ALL: [GameKind; 5] = [
        GameKind::Decontaminate,
        GameKind::DataStream,
        GameKind::BioForge,
        GameKind::RecycleSort,
        GameKind::WildlifePatrol,
    ];
}

#[derive(Component, Reflect, Default, Debug, Clone, PartialEq, Deref, DerefMut)]
#[reflect(Component, Default)]
pub struct DisplayName(pub String);

impl From<&str> for DisplayName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DisplayName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_deref() {
        let name = DisplayName("Bio-Enhancer".to_string());
        assert_eq!(*name, "Bio-Enhancer");
    }

    #[test]
    fn test_game_kind_all_is_exhaustive() {
        assert_eq!(GameKind::ALL.len(), 5);
    }
}
