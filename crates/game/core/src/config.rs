/// Gameplay rules that are tunable per deployment.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Whether area skills may hit player-type entities (PvP in area effects).
    ///
    /// When disabled, players are filtered out of area results and out of the
    /// explicit extra target.
    pub area_skill_hits_players: bool,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Upper bound on the range of any area skill, in tiles.
    pub const MAX_SKILL_RANGE: u8 = 20;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_AREA_SKILL_HITS_PLAYERS: bool = false;

    pub fn new() -> Self {
        Self {
            area_skill_hits_players: Self::DEFAULT_AREA_SKILL_HITS_PLAYERS,
        }
    }

    pub fn with_area_skill_hits_players(area_skill_hits_players: bool) -> Self {
        Self {
            area_skill_hits_players,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
