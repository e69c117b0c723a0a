//! A bounded fight-tracking window.

use chrono::NaiveDateTime;
use hashbrown::HashMap;

use super::player_stats::PlayerStats;

/// Name of the persistent aggregate fight spanning many encounters.
pub const OVERALL_FIGHT_NAME: &str = "Overall";

/// One boss encounter (or the singleton Overall aggregate). Exclusively owns
/// its per-player stats; UI consumers only ever see snapshots.
#[derive(Debug, Clone)]
pub struct Fight {
    id: u64,
    boss_name: String,
    boss_npc_id: i32,
    started_at: NaiveDateTime,
    start_tick: i32,
    end_tick: i32,
    active: bool,
    /// Ticks spent in actual combat. Only meaningful for the Overall fight,
    /// where idle gaps between fights are excluded from the duration.
    active_combat_ticks: i32,
    currently_in_combat: bool,
    players: HashMap<String, PlayerStats>,
}

impl Fight {
    pub fn new(id: u64, boss_name: String, boss_npc_id: i32, start_tick: i32) -> Self {
        Self {
            id,
            boss_name,
            boss_npc_id,
            started_at: chrono::offset::Local::now().naive_local(),
            start_tick,
            end_tick: start_tick,
            active: true,
            active_combat_ticks: 0,
            currently_in_combat: false,
            players: HashMap::new(),
        }
    }

    pub fn overall(id: u64, start_tick: i32) -> Self {
        Self::new(id, OVERALL_FIGHT_NAME.to_string(), -1, start_tick)
    }

    pub fn is_overall(&self) -> bool {
        self.boss_name == OVERALL_FIGHT_NAME
    }

    // ─── Player Stats ───────────────────────────────────────────────────────

    /// Stats for a player, created lazily on first reference.
    pub fn player_stats_mut(&mut self, name: &str) -> &mut PlayerStats {
        self.players
            .entry_ref(name)
            .or_insert_with(|| PlayerStats::new(name))
    }

    pub fn player_stats(&self, name: &str) -> Option<&PlayerStats> {
        self.players.get(name)
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerStats> {
        self.players.values()
    }

    /// True once any player has been referenced. Zero-damage splashes count.
    pub fn has_activity(&self) -> bool {
        !self.players.is_empty()
    }

    // ─── Lifecycle ──────────────────────────────────────────────────────────

    /// Advance the tick window. Called at most once per game tick, and only
    /// has effect while the fight is active.
    pub fn update_current_tick(&mut self, current_tick: i32) {
        if !self.active {
            return;
        }
        self.end_tick = current_tick;
        if self.currently_in_combat {
            self.active_combat_ticks += 1;
        }
    }

    /// Mark whether combat is occurring right now (Overall idle tracking).
    pub fn set_in_combat(&mut self, in_combat: bool) {
        self.currently_in_combat = in_combat;
    }

    /// End the fight: freeze the tick window and finalize tick-loss
    /// accounting for every player. No-op on an already-ended fight, since
    /// finalize must run exactly once.
    pub fn end_fight(&mut self, current_tick: i32) {
        if !self.active {
            return;
        }
        self.active = false;
        self.end_tick = current_tick;
        for stats in self.players.values_mut() {
            stats.finalize_fight(current_tick);
        }
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn boss_name(&self) -> &str {
        &self.boss_name
    }

    pub fn boss_npc_id(&self) -> i32 {
        self.boss_npc_id
    }

    pub fn started_at(&self) -> NaiveDateTime {
        self.started_at
    }

    pub fn start_tick(&self) -> i32 {
        self.start_tick
    }

    pub fn end_tick(&self) -> i32 {
        self.end_tick
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Fight duration in ticks. The Overall fight reports only its combat
    /// ticks once any have been recorded, excluding idle gaps.
    pub fn duration_ticks(&self) -> i32 {
        if self.is_overall() && self.active_combat_ticks > 0 {
            self.active_combat_ticks
        } else {
            self.end_tick - self.start_tick
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_regular_fight() {
        let mut fight = Fight::new(1, "Vorkath".to_string(), 8061, 100);
        for tick in 101..=130 {
            fight.update_current_tick(tick);
        }
        assert_eq!(fight.duration_ticks(), 30);

        fight.end_fight(130);
        // Ticks after the end are ignored
        fight.update_current_tick(200);
        assert_eq!(fight.duration_ticks(), 30);
    }

    #[test]
    fn test_overall_duration_excludes_idle() {
        let mut overall = Fight::overall(0, 0);

        overall.set_in_combat(true);
        for tick in 1..=10 {
            overall.update_current_tick(tick);
        }
        overall.set_in_combat(false);
        for tick in 11..=60 {
            overall.update_current_tick(tick);
        }
        overall.set_in_combat(true);
        for tick in 61..=70 {
            overall.update_current_tick(tick);
        }

        assert_eq!(overall.duration_ticks(), 20);
    }

    #[test]
    fn test_overall_duration_before_combat() {
        let mut overall = Fight::overall(0, 5);
        overall.update_current_tick(6);
        overall.update_current_tick(7);
        // No combat ticks recorded yet: falls back to the tick window
        assert_eq!(overall.duration_ticks(), 2);
    }

    #[test]
    fn test_activity_counts_splash() {
        let mut fight = Fight::new(1, "Zulrah".to_string(), 2042, 0);
        assert!(!fight.has_activity());
        fight.player_stats_mut("A").record_damage_dealt(0, 0, "Zulrah");
        assert!(fight.has_activity());
    }

    #[test]
    fn test_end_fight_is_idempotent() {
        let mut fight = Fight::new(1, "Cerberus".to_string(), 5862, 0);
        fight.player_stats_mut("A").record_attack(4, 0);
        for tick in 1..=10 {
            fight.update_current_tick(tick);
        }

        fight.end_fight(10);
        let lost = fight.player_stats("A").map(|s| s.attacking_ticks_lost());
        assert_eq!(lost, Some(6));

        // Second end must not re-finalize or move the window
        fight.end_fight(20);
        let lost = fight.player_stats("A").map(|s| s.attacking_ticks_lost());
        assert_eq!(lost, Some(6));
        assert_eq!(fight.end_tick(), 10);
    }
}
