pub mod fight;
pub mod player_stats;
pub mod summary;
pub mod tracker;


pub use fight::{Fight, OVERALL_FIGHT_NAME};
pub use player_stats::{DamageEntry, PlayerStats};
pub use tracker::FightTracker;
