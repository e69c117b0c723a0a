//! External event contract for the tracker.
//!
//! The host environment (game client plugin layer) observes hitsplats,
//! animations, and deaths, and translates them into these events. The tracker
//! consumes them serially on a single thread; there is no async delivery and
//! no reordering.

use crate::game_data::{AttackStyle, DamageType};

/// Discrete events delivered by the host, one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// One game tick elapsed (~0.6s). Delivered exactly once per tick.
    Tick,

    /// A hitsplat landed on a monster. Amount may be 0 (splash/miss),
    /// which still counts as fight activity.
    DamageDealt {
        player: String,
        amount: u32,
        target_name: String,
        target_npc_id: i32,
    },

    /// An attack animation was observed. Weapon speed is the attack cooldown
    /// in ticks, resolved by the host from the weapon in use.
    AttackPerformed {
        player: String,
        weapon_speed: i32,
        style: AttackStyle,
    },

    /// The host produced a damage estimate for an attack (used for the
    /// expected-damage average alongside the real hitsplat).
    ExpectedDamage { player: String, expected: f64 },

    /// A hitsplat landed on a player. The damage classification and the
    /// instantaneous lethal probability are computed by the host.
    DamageTaken {
        player: String,
        amount: u32,
        damage_type: DamageType,
        /// Probability this hit was lethal, in [0, 1).
        death_probability: f64,
    },

    /// The fight target died.
    TargetDied { npc_id: i32 },

    /// A tracked player died.
    PlayerDied { player: String },

    /// Explicit end-fight command from the user.
    FightEnded,

    /// The local player logged out.
    LoggedOut,
}
