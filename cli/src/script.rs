//! TOML event scripts for replaying combat through the tracker.

use serde::Deserialize;

use tickmeter_core::{AttackStyle, DamageType, GameEvent, style_for_animation};

fn default_tick_count() -> u32 {
    1
}

/// One scripted event. Mirrors `GameEvent`, with script conveniences:
/// ticks can repeat, and attacks may carry an animation id for style
/// resolution instead of a style.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptEvent {
    Tick {
        #[serde(default = "default_tick_count")]
        count: u32,
    },
    DamageDealt {
        player: String,
        amount: u32,
        target_name: String,
        target_npc_id: i32,
    },
    Attack {
        player: String,
        weapon_speed: i32,
        #[serde(default)]
        animation_id: Option<i32>,
    },
    ExpectedDamage {
        player: String,
        expected: f64,
    },
    DamageTaken {
        player: String,
        amount: u32,
        #[serde(default)]
        damage_type: DamageType,
        #[serde(default)]
        death_probability: f64,
    },
    TargetDied {
        npc_id: i32,
    },
    PlayerDied {
        player: String,
    },
    FightEnded,
    LoggedOut,
}

#[derive(Debug, Default, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

impl ScriptEvent {
    /// Expand into the tracker events this entry stands for.
    pub fn to_events(&self) -> Vec<GameEvent> {
        match self {
            ScriptEvent::Tick { count } => vec![GameEvent::Tick; *count as usize],
            ScriptEvent::DamageDealt {
                player,
                amount,
                target_name,
                target_npc_id,
            } => vec![GameEvent::DamageDealt {
                player: player.clone(),
                amount: *amount,
                target_name: target_name.clone(),
                target_npc_id: *target_npc_id,
            }],
            ScriptEvent::Attack {
                player,
                weapon_speed,
                animation_id,
            } => {
                let style = animation_id
                    .map(style_for_animation)
                    .unwrap_or(AttackStyle::Unknown);
                vec![GameEvent::AttackPerformed {
                    player: player.clone(),
                    weapon_speed: *weapon_speed,
                    style,
                }]
            }
            ScriptEvent::ExpectedDamage { player, expected } => vec![GameEvent::ExpectedDamage {
                player: player.clone(),
                expected: *expected,
            }],
            ScriptEvent::DamageTaken {
                player,
                amount,
                damage_type,
                death_probability,
            } => vec![GameEvent::DamageTaken {
                player: player.clone(),
                amount: *amount,
                damage_type: *damage_type,
                death_probability: *death_probability,
            }],
            ScriptEvent::TargetDied { npc_id } => vec![GameEvent::TargetDied { npc_id: *npc_id }],
            ScriptEvent::PlayerDied { player } => vec![GameEvent::PlayerDied {
                player: player.clone(),
            }],
            ScriptEvent::FightEnded => vec![GameEvent::FightEnded],
            ScriptEvent::LoggedOut => vec![GameEvent::LoggedOut],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = Script::parse(
            r#"
            [[events]]
            kind = "damage_dealt"
            player = "A"
            amount = 23
            target_name = "Vorkath"
            target_npc_id = 8061

            [[events]]
            kind = "tick"
            count = 4

            [[events]]
            kind = "fight_ended"
            "#,
        )
        .expect("script should parse");

        assert_eq!(script.events.len(), 3);
        assert_eq!(script.events[1].to_events(), vec![GameEvent::Tick; 4]);
        assert_eq!(script.events[2].to_events(), vec![GameEvent::FightEnded]);
    }

    #[test]
    fn test_attack_resolves_style_from_animation() {
        let script = Script::parse(
            r#"
            [[events]]
            kind = "attack"
            player = "A"
            weapon_speed = 2
            animation_id = 5061
            "#,
        )
        .expect("script should parse");

        let events = script.events[0].to_events();
        assert_eq!(
            events,
            vec![GameEvent::AttackPerformed {
                player: "A".to_string(),
                weapon_speed: 2,
                style: AttackStyle::Ranged,
            }]
        );
    }

    #[test]
    fn test_damage_taken_defaults() {
        let script = Script::parse(
            r#"
            [[events]]
            kind = "damage_taken"
            player = "A"
            amount = 12
            "#,
        )
        .expect("script should parse");

        let events = script.events[0].to_events();
        assert_eq!(
            events,
            vec![GameEvent::DamageTaken {
                player: "A".to_string(),
                amount: 12,
                damage_type: DamageType::Unknown,
                death_probability: 0.0,
            }]
        );
    }

    #[test]
    fn test_empty_script() {
        let script = Script::parse("").expect("empty script should parse");
        assert!(script.events.is_empty());
    }
}
