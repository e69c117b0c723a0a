mod bosses;
mod registry;
mod styles;

pub use bosses::{BossInfo, lookup_boss};
pub use registry::{BossOverride, BossRegistry, GameDataError};
pub use styles::{AttackStyle, DamageType, style_for_animation};
