//! Shared configuration types for tickmeter
//!
//! This crate contains serializable configuration types that are shared between
//! the tracking engine (tickmeter-core) and any frontend driving it.

use serde::{Deserialize, Serialize};

fn default_min_fight_duration() -> u32 {
    5
}

fn default_max_history() -> usize {
    10
}

fn default_true() -> bool {
    true
}

/// Behavior settings for the fight tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Fights shorter than this many ticks are discarded instead of archived.
    #[serde(default = "default_min_fight_duration")]
    pub min_fight_duration_ticks: u32,

    /// Maximum number of completed fights kept in history (oldest evicted).
    #[serde(default = "default_max_history")]
    pub max_history_size: usize,

    /// End the current fight when its target dies (enabled by default).
    #[serde(default = "default_true")]
    pub end_on_target_death: bool,

    /// Reset the Overall aggregate when the player logs out.
    #[serde(default)]
    pub reset_overall_on_logout: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            min_fight_duration_ticks: default_min_fight_duration(),
            max_history_size: default_max_history(),
            end_on_target_death: true,
            reset_overall_on_logout: false,
        }
    }
}
