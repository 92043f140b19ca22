//! Engine configuration and fixed rule constants.

use serde::{Deserialize, Serialize};

/// Gold awarded to the side that captures the enemy flag.
pub const FLAG_CAPTURE_BONUS: u32 = 10;

/// Consecutive turns on a goldmine needed for one gold.
pub const GOLDMINE_REWARD_TURNS: u32 = 3;

/// Default number of move/attack actions granted each turn.
pub const DEFAULT_ACTIONS_PER_TURN: u8 = 2;

/// Name of the single autosave slot.
pub const SAVE_SLOT_NAME: &str = "autosave";

/// Encoding used for persisted snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveFormat {
    /// Self-describing JSON document.
    #[default]
    Json,
    /// Compact bincode encoding.
    Binary,
}

impl SaveFormat {
    /// File extension used by `FileStore` for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            SaveFormat::Json => "json",
            SaveFormat::Binary => "bin",
        }
    }
}

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for the shared RNG (tile layout, AI placement, AI choices).
    pub seed: u64,

    /// Move/attack actions granted at the start of every turn.
    pub max_actions_per_turn: u8,

    /// Whether the scripted opponent plays its turns.
    /// When disabled the AI turn passes immediately.
    pub ai_enabled: bool,

    /// Per-unit chance that the AI activates an unused special ability
    /// during an iteration without an attack.
    pub ai_ability_chance: f64,

    /// Write the autosave slot at turn boundaries and on game over.
    pub autosave: bool,

    /// Snapshot encoding for the autosave slot.
    pub save_format: SaveFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_actions_per_turn: DEFAULT_ACTIONS_PER_TURN,
            ai_enabled: true,
            ai_ability_chance: 0.3,
            autosave: true,
            save_format: SaveFormat::Json,
        }
    }
}

impl EngineConfig {
    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with a custom action budget.
    ///
    /// A budget of zero is raised to one.
    pub fn with_actions_per_turn(mut self, actions: u8) -> Self {
        self.max_actions_per_turn = actions.max(1);
        self
    }

    /// Create a new config with the AI opponent on or off.
    pub fn with_ai(mut self, enabled: bool) -> Self {
        self.ai_enabled = enabled;
        self
    }

    /// Create a new config with a custom AI ability chance.
    pub fn with_ai_ability_chance(mut self, chance: f64) -> Self {
        self.ai_ability_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Create a new config with autosave on or off.
    pub fn with_autosave(mut self, enabled: bool) -> Self {
        self.autosave = enabled;
        self
    }

    /// Create a new config with a custom save format.
    pub fn with_save_format(mut self, format: SaveFormat) -> Self {
        self.save_format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.max_actions_per_turn, 2);
        assert!(config.ai_enabled);
        assert!((config.ai_ability_chance - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.save_format, SaveFormat::Json);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::default()
            .with_seed(123)
            .with_actions_per_turn(0)
            .with_ai(false)
            .with_ai_ability_chance(4.0)
            .with_save_format(SaveFormat::Binary);

        assert_eq!(config.seed, 123);
        assert_eq!(config.max_actions_per_turn, 1);
        assert!(!config.ai_enabled);
        assert!((config.ai_ability_chance - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.save_format.extension(), "bin");
    }

    #[test]
    fn test_serialization() {
        let config = EngineConfig::default().with_seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
