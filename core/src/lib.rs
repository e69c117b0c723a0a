pub mod combat;
pub mod config;
pub mod events;
pub mod game_data;

// Re-exports for convenience
pub use combat::summary::{FightSnapshot, PlayerMetrics, TICK_SECONDS};
pub use combat::{DamageEntry, Fight, FightTracker, OVERALL_FIGHT_NAME, PlayerStats};
pub use config::{ConfigError, TrackerConfig, TrackerConfigExt};
pub use events::GameEvent;
pub use game_data::{
    AttackStyle, BossInfo, BossOverride, BossRegistry, DamageType, GameDataError, lookup_boss,
    style_for_animation,
};
