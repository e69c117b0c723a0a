//! Fight orchestration state machine.
//!
//! Routes host events into the current fight and the persistent Overall
//! aggregate. Every tick that a fight is active, the Overall copies are
//! re-synced to base + current; the instant a fight ends its finalized stats
//! are locked into the base exactly once. All operations are total: events
//! with no matching fight degrade to no-ops, never errors.

use std::collections::VecDeque;

use tickmeter_types::TrackerConfig;

use crate::events::GameEvent;
use crate::game_data::{BossRegistry, DamageType};

use super::fight::Fight;
use super::summary::FightSnapshot;

#[derive(Debug)]
pub struct FightTracker {
    config: TrackerConfig,
    registry: BossRegistry,
    current_fight: Option<Fight>,
    overall_fight: Fight,
    /// Completed fights, newest first, bounded by config.
    history: VecDeque<Fight>,
    current_tick: i32,
    next_fight_id: u64,
}

impl FightTracker {
    pub fn new(config: TrackerConfig, registry: BossRegistry) -> Self {
        Self {
            config,
            registry,
            current_fight: None,
            overall_fight: Fight::overall(0, 0),
            history: VecDeque::new(),
            current_tick: 0,
            next_fight_id: 1,
        }
    }

    /// Single entry point for host events. Delivered serially on one thread.
    pub fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::Tick => self.on_tick(),
            GameEvent::DamageDealt {
                player,
                amount,
                target_name,
                target_npc_id,
            } => self.on_damage_dealt(&player, amount, &target_name, target_npc_id),
            GameEvent::AttackPerformed {
                player,
                weapon_speed,
                style,
            } => {
                tracing::trace!(player = %player, weapon_speed, ?style, "attack observed");
                self.on_attack(&player, weapon_speed);
            }
            GameEvent::ExpectedDamage { player, expected } => {
                self.on_expected_damage(&player, expected)
            }
            GameEvent::DamageTaken {
                player,
                amount,
                damage_type,
                death_probability,
            } => self.on_damage_taken(&player, amount, damage_type, death_probability),
            GameEvent::TargetDied { npc_id } => self.on_target_died(npc_id),
            GameEvent::PlayerDied { player } => {
                tracing::debug!(player = %player, tick = self.current_tick, "player died");
                self.end_current_fight();
            }
            GameEvent::FightEnded => self.end_current_fight(),
            GameEvent::LoggedOut => self.on_logout(),
        }
    }

    // ─── Event Handling ─────────────────────────────────────────────────────

    fn on_tick(&mut self) {
        self.current_tick += 1;

        let fight_active = self.current_fight.as_ref().is_some_and(Fight::is_active);
        self.overall_fight.set_in_combat(fight_active);
        self.overall_fight.update_current_tick(self.current_tick);

        if let Some(fight) = self.current_fight.as_mut()
            && fight.is_active()
        {
            fight.update_current_tick(self.current_tick);
        }

        // Keep Overall at base + current in real time
        let current_tick = self.current_tick;
        if let Some(fight) = self.current_fight.as_ref().filter(|f| f.is_active()) {
            for stats in fight.players() {
                self.overall_fight
                    .player_stats_mut(stats.name())
                    .sync_with_current_fight(stats, current_tick);
            }
        }
    }

    fn on_damage_dealt(&mut self, player: &str, amount: u32, target_name: &str, target_npc_id: i32) {
        if self.should_start_new_fight(target_npc_id) {
            self.start_fight(target_name, target_npc_id);
        }

        let current_tick = self.current_tick;
        let Some(fight) = self.current_fight.as_mut().filter(|f| f.is_active()) else {
            return;
        };
        fight
            .player_stats_mut(player)
            .record_damage_dealt(current_tick, amount, target_name);
    }

    fn on_attack(&mut self, player: &str, weapon_speed: i32) {
        let current_tick = self.current_tick;
        let Some(fight) = self.current_fight.as_mut().filter(|f| f.is_active()) else {
            return;
        };
        fight
            .player_stats_mut(player)
            .record_attack(weapon_speed, current_tick);
    }

    fn on_expected_damage(&mut self, player: &str, expected: f64) {
        let Some(fight) = self.current_fight.as_mut().filter(|f| f.is_active()) else {
            return;
        };
        fight.player_stats_mut(player).add_expected_damage(expected);
    }

    /// Damage taken applies to both the current fight and the Overall copy
    /// directly; it has no base fields and is outside the sync/lock path.
    /// Death chance goes to the current fight only and reaches Overall
    /// through sync and lock-in.
    fn on_damage_taken(
        &mut self,
        player: &str,
        amount: u32,
        damage_type: DamageType,
        death_probability: f64,
    ) {
        let current_tick = self.current_tick;
        let Some(fight) = self.current_fight.as_mut().filter(|f| f.is_active()) else {
            return;
        };
        let source = fight.boss_name().to_string();

        let stats = fight.player_stats_mut(player);
        stats.record_damage_taken(current_tick, amount, &source, damage_type);
        stats.add_death_chance(death_probability);

        self.overall_fight
            .player_stats_mut(player)
            .record_damage_taken(current_tick, amount, &source, damage_type);
    }

    fn on_target_died(&mut self, npc_id: i32) {
        if !self.config.end_on_target_death {
            return;
        }
        if self
            .current_fight
            .as_ref()
            .is_some_and(|f| f.is_active() && f.boss_npc_id() == npc_id)
        {
            tracing::debug!(npc_id, tick = self.current_tick, "fight target died");
            self.end_current_fight();
        }
    }

    fn on_logout(&mut self) {
        self.end_current_fight();
        if self.config.reset_overall_on_logout {
            self.reset_overall_tracking();
        }
    }

    // ─── Fight Lifecycle ────────────────────────────────────────────────────

    /// A fight starts when damage lands with no active fight, or when a boss
    /// target shows up while a non-boss fight is being tracked. The switch
    /// test compares the fight currently being tracked against the registry,
    /// not the incoming NPC twice.
    fn should_start_new_fight(&self, target_npc_id: i32) -> bool {
        match self.current_fight.as_ref().filter(|f| f.is_active()) {
            Some(fight) => {
                self.registry.is_boss(target_npc_id) && !self.registry.is_boss(fight.boss_npc_id())
            }
            None => true,
        }
    }

    fn start_fight(&mut self, target_name: &str, target_npc_id: i32) {
        self.end_current_fight();

        if !self.overall_fight.is_active() {
            self.overall_fight = Fight::overall(self.next_id(), self.current_tick);
        }

        let boss_name = self
            .registry
            .boss_name(target_npc_id)
            .unwrap_or(target_name)
            .to_string();
        tracing::debug!(boss = %boss_name, npc_id = target_npc_id, tick = self.current_tick, "starting fight");

        let id = self.next_id();
        self.current_fight = Some(Fight::new(id, boss_name, target_npc_id, self.current_tick));
    }

    /// End the current fight: finalize it, lock its stats into Overall, and
    /// archive it unless the duration/activity policy rejects it.
    pub fn end_current_fight(&mut self) {
        let Some(mut fight) = self.current_fight.take() else {
            return;
        };
        if !fight.is_active() {
            return;
        }

        fight.end_fight(self.current_tick);

        for stats in fight.players() {
            self.overall_fight
                .player_stats_mut(stats.name())
                .lock_in_fight_stats(stats);
        }

        let min_duration = self.config.min_fight_duration_ticks as i32;
        if fight.has_activity() && fight.duration_ticks() >= min_duration {
            tracing::debug!(
                boss = %fight.boss_name(),
                ticks = fight.duration_ticks(),
                "archiving fight"
            );
            self.history.push_front(fight);
            self.history.truncate(self.config.max_history_size);
        } else {
            tracing::debug!(
                boss = %fight.boss_name(),
                ticks = fight.duration_ticks(),
                "discarding fight: too short or no activity"
            );
        }
    }

    /// Discard the Overall aggregate and the fight history. Manual only
    /// (or on logout when configured).
    pub fn reset_overall_tracking(&mut self) {
        tracing::debug!(tick = self.current_tick, "overall tracking reset");
        self.history.clear();
        self.overall_fight = Fight::overall(self.next_id(), self.current_tick);
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_fight_id;
        self.next_fight_id += 1;
        id
    }

    // ─── Read Access ────────────────────────────────────────────────────────

    pub fn current_tick(&self) -> i32 {
        self.current_tick
    }

    pub fn current_fight(&self) -> Option<&Fight> {
        self.current_fight.as_ref()
    }

    pub fn overall_fight(&self) -> &Fight {
        &self.overall_fight
    }

    pub fn fight_history(&self) -> impl Iterator<Item = &Fight> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // Snapshot accessors: point-in-time copies safe to hand to a UI thread.

    pub fn current_snapshot(&self) -> Option<FightSnapshot> {
        self.current_fight.as_ref().map(Fight::snapshot)
    }

    pub fn overall_snapshot(&self) -> FightSnapshot {
        self.overall_fight.snapshot()
    }

    pub fn history_snapshots(&self) -> Vec<FightSnapshot> {
        self.history.iter().map(Fight::snapshot).collect()
    }
}
