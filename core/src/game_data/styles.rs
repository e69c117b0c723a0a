//! Closed attack-style and damage-type classifications.
//!
//! These replace the host's loosely-typed string tags with closed enums so
//! classification mistakes fail at compile time rather than on a string
//! comparison.

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Combat style of an observed attack animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttackStyle {
    Melee,
    Ranged,
    Magic,
    /// Damage with no protecting prayer (e.g. recoil, environmental).
    Typeless,
    #[default]
    Unknown,
}

/// Classification of damage taken by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DamageType {
    /// Avoidable by movement or mechanics.
    Avoidable,
    /// Blockable with the correct protection prayer.
    Prayable,
    /// Unavoidable by any player action.
    Unavoidable,
    #[default]
    Unknown,
}

/// Attack animation id to combat style.
static ANIMATION_STYLES: phf::Map<i32, AttackStyle> = phf_map! {
    // Melee
    386i32 => AttackStyle::Melee,  // stab
    390i32 => AttackStyle::Melee,  // slash
    422i32 => AttackStyle::Melee,  // punch
    423i32 => AttackStyle::Melee,  // kick
    428i32 => AttackStyle::Melee,  // spear stab
    1658i32 => AttackStyle::Melee, // whip
    7045i32 => AttackStyle::Melee, // godsword slash
    8056i32 => AttackStyle::Melee, // scythe swing

    // Ranged
    426i32 => AttackStyle::Ranged,  // bow
    5061i32 => AttackStyle::Ranged, // blowpipe
    7552i32 => AttackStyle::Ranged, // crossbow
    7618i32 => AttackStyle::Ranged, // chinchompa

    // Magic
    711i32 => AttackStyle::Magic,  // standard cast
    1167i32 => AttackStyle::Magic, // trident
    1979i32 => AttackStyle::Magic, // barrage
};

/// Resolve the combat style for an attack animation id.
pub fn style_for_animation(animation_id: i32) -> AttackStyle {
    ANIMATION_STYLES
        .get(&animation_id)
        .copied()
        .unwrap_or(AttackStyle::Unknown)
}
