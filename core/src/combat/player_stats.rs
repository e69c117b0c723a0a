//! Per-player combat accumulator.
//!
//! One `PlayerStats` lives in each fight per player name. The "base" fields
//! exist only on the Overall fight's copies: they hold the locked-in
//! contribution of every completed fight, while the live fields are recomputed
//! each tick as base + the in-progress fight (`sync_with_current_fight`).
//! When a fight ends, its finalized values are folded into the base exactly
//! once (`lock_in_fight_stats`).

use serde::Serialize;

use crate::game_data::DamageType;

/// Cap on a single hit's lethal probability. Keeps the cumulative value
/// strictly below 1 even for a hostile input of 1.0.
const MAX_HIT_DEATH_CHANCE: f64 = 0.9999;

/// One damage instance, kept for analysis/export only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DamageEntry {
    pub tick: i32,
    pub amount: u32,
    /// Target name for damage dealt; source name for damage taken.
    pub target: String,
    pub damage_type: Option<DamageType>,
}

/// Survival-law composition of two independent lethal probabilities.
/// Commutative and associative, so base/current merge order never matters.
fn compose_death_chance(a: f64, b: f64) -> f64 {
    1.0 - (1.0 - a) * (1.0 - b)
}

#[derive(Debug, Clone, Default)]
pub struct PlayerStats {
    player_name: String,

    // Offense
    damage_dealt: u64,
    total_attacks: u32,
    successful_hits: u32,
    expected_damage_dealt: f64,
    expected_damage_calculations: u32,

    // Tick-loss accounting
    last_attack_tick: Option<i32>,
    current_weapon_speed: i32,
    total_attacking_ticks: i32,
    attacking_ticks_lost: i32,

    // Defense (partition invariant: the three buckets sum to damage_taken)
    damage_taken: u64,
    avoidable_damage_taken: u64,
    prayable_damage_taken: u64,
    unavoidable_damage_taken: u64,

    // Death probability
    chances_of_death: u32,
    cumulative_death_chance: f64,

    // Locked-in contribution of completed fights (Overall copies only)
    base_damage_dealt: u64,
    base_total_attacks: u32,
    base_successful_hits: u32,
    base_expected_damage_dealt: f64,
    base_expected_damage_calculations: u32,
    base_total_attacking_ticks: i32,
    base_attacking_ticks_lost: i32,
    base_chances_of_death: u32,
    base_cumulative_death_chance: f64,

    // Detail logs, append-only
    damage_dealt_log: Vec<DamageEntry>,
    damage_taken_log: Vec<DamageEntry>,
}

impl PlayerStats {
    pub fn new(player_name: &str) -> Self {
        Self {
            player_name: player_name.to_string(),
            current_weapon_speed: 1,
            ..Default::default()
        }
    }

    // ─── Offense ────────────────────────────────────────────────────────────

    /// Record a hitsplat dealt to a monster. Amount 0 is a splash: it still
    /// produces a detail entry but is not a successful hit.
    pub fn record_damage_dealt(&mut self, tick: i32, amount: u32, target: &str) {
        self.damage_dealt += u64::from(amount);
        if amount > 0 {
            self.successful_hits += 1;
        }
        self.damage_dealt_log.push(DamageEntry {
            tick,
            amount,
            target: target.to_string(),
            damage_type: None,
        });
    }

    /// Record an observed attack. Tick loss since the previous attack is
    /// committed first, measured against the *previous* weapon's speed: the
    /// new weapon's cooldown has not been running yet.
    pub fn record_attack(&mut self, weapon_speed: i32, current_tick: i32) {
        let weapon_speed = weapon_speed.max(1);

        if let Some(last) = self.last_attack_tick {
            let elapsed = current_tick - last;
            // >= so the loss starts the tick the cooldown elapses
            if elapsed >= self.current_weapon_speed {
                self.attacking_ticks_lost += elapsed - self.current_weapon_speed;
            }
        }

        self.total_attacks += 1;
        self.total_attacking_ticks += weapon_speed;
        self.last_attack_tick = Some(current_tick);
        self.current_weapon_speed = weapon_speed;
    }

    pub fn add_expected_damage(&mut self, expected: f64) {
        self.expected_damage_dealt += expected;
        self.expected_damage_calculations += 1;
    }

    pub fn average_expected_damage(&self) -> f64 {
        if self.expected_damage_calculations == 0 {
            return 0.0;
        }
        self.expected_damage_dealt / f64::from(self.expected_damage_calculations)
    }

    /// Ticks lost as of `current_tick`. While the fight is active this
    /// includes loss accrued since the last attack's cooldown elapsed,
    /// without committing it; the stored counter only moves on the next
    /// attack or at fight end.
    pub fn calculate_ticks_lost(&self, current_tick: i32, fight_active: bool) -> i32 {
        if !fight_active {
            return self.attacking_ticks_lost;
        }
        let Some(last) = self.last_attack_tick else {
            return 0;
        };
        let elapsed = current_tick - last;
        if elapsed < self.current_weapon_speed {
            self.attacking_ticks_lost
        } else {
            self.attacking_ticks_lost + (elapsed - self.current_weapon_speed)
        }
    }

    /// Commit trailing tick loss between the last attack and the fight's end
    /// tick. Called exactly once, from `Fight::end_fight`.
    pub(crate) fn finalize_fight(&mut self, end_tick: i32) {
        if let Some(last) = self.last_attack_tick {
            let elapsed = end_tick - last;
            if elapsed >= self.current_weapon_speed {
                self.attacking_ticks_lost += elapsed - self.current_weapon_speed;
            }
        }
    }

    // ─── Defense ────────────────────────────────────────────────────────────

    /// Record a hitsplat taken. `Unknown` damage folds into the unavoidable
    /// bucket so the partition always sums to the total.
    pub fn record_damage_taken(
        &mut self,
        tick: i32,
        amount: u32,
        source: &str,
        damage_type: DamageType,
    ) {
        let amount64 = u64::from(amount);
        self.damage_taken += amount64;
        match damage_type {
            DamageType::Avoidable => self.avoidable_damage_taken += amount64,
            DamageType::Prayable => self.prayable_damage_taken += amount64,
            DamageType::Unavoidable | DamageType::Unknown => {
                self.unavoidable_damage_taken += amount64
            }
        }
        self.damage_taken_log.push(DamageEntry {
            tick,
            amount,
            target: source.to_string(),
            damage_type: Some(damage_type),
        });
    }

    /// Fold one hit's lethal probability into the running cumulative chance.
    /// No-op for p <= 0.
    pub fn add_death_chance(&mut self, probability: f64) {
        if probability <= 0.0 {
            return;
        }
        let probability = probability.min(MAX_HIT_DEATH_CHANCE);
        self.chances_of_death += 1;
        self.cumulative_death_chance =
            compose_death_chance(self.cumulative_death_chance, probability);
    }

    // ─── Base/current split (Overall aggregation) ───────────────────────────

    /// Recompute every live field as base + the in-progress fight. Called on
    /// the Overall copy once per tick while a fight is active; never after
    /// that fight has been locked in.
    pub fn sync_with_current_fight(&mut self, current: &PlayerStats, current_tick: i32) {
        self.damage_dealt = self.base_damage_dealt + current.damage_dealt;
        self.total_attacks = self.base_total_attacks + current.total_attacks;
        self.successful_hits = self.base_successful_hits + current.successful_hits;
        self.expected_damage_dealt =
            self.base_expected_damage_dealt + current.expected_damage_dealt;
        self.expected_damage_calculations =
            self.base_expected_damage_calculations + current.expected_damage_calculations;
        self.total_attacking_ticks =
            self.base_total_attacking_ticks + current.total_attacking_ticks;
        self.attacking_ticks_lost =
            self.base_attacking_ticks_lost + current.calculate_ticks_lost(current_tick, true);
        self.chances_of_death = self.base_chances_of_death + current.chances_of_death;
        self.cumulative_death_chance = compose_death_chance(
            self.base_cumulative_death_chance,
            current.cumulative_death_chance,
        );
    }

    /// Permanently fold a finalized fight's values into the base, then set
    /// the live fields to the new base so the display holds steady once the
    /// fight goes inactive.
    pub fn lock_in_fight_stats(&mut self, current: &PlayerStats) {
        self.base_damage_dealt += current.damage_dealt;
        self.base_total_attacks += current.total_attacks;
        self.base_successful_hits += current.successful_hits;
        self.base_expected_damage_dealt += current.expected_damage_dealt;
        self.base_expected_damage_calculations += current.expected_damage_calculations;
        self.base_total_attacking_ticks += current.total_attacking_ticks;
        self.base_attacking_ticks_lost += current.attacking_ticks_lost;
        self.base_chances_of_death += current.chances_of_death;
        self.base_cumulative_death_chance = compose_death_chance(
            self.base_cumulative_death_chance,
            current.cumulative_death_chance,
        );

        self.damage_dealt = self.base_damage_dealt;
        self.total_attacks = self.base_total_attacks;
        self.successful_hits = self.base_successful_hits;
        self.expected_damage_dealt = self.base_expected_damage_dealt;
        self.expected_damage_calculations = self.base_expected_damage_calculations;
        self.total_attacking_ticks = self.base_total_attacking_ticks;
        self.attacking_ticks_lost = self.base_attacking_ticks_lost;
        self.chances_of_death = self.base_chances_of_death;
        self.cumulative_death_chance = self.base_cumulative_death_chance;

        // No attack in progress once the fight is folded in
        self.last_attack_tick = None;
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.player_name
    }

    pub fn damage_dealt(&self) -> u64 {
        self.damage_dealt
    }

    pub fn total_attacks(&self) -> u32 {
        self.total_attacks
    }

    pub fn successful_hits(&self) -> u32 {
        self.successful_hits
    }

    pub fn total_attacking_ticks(&self) -> i32 {
        self.total_attacking_ticks
    }

    pub fn attacking_ticks_lost(&self) -> i32 {
        self.attacking_ticks_lost
    }

    pub fn last_attack_tick(&self) -> Option<i32> {
        self.last_attack_tick
    }

    pub fn damage_taken(&self) -> u64 {
        self.damage_taken
    }

    pub fn avoidable_damage_taken(&self) -> u64 {
        self.avoidable_damage_taken
    }

    pub fn prayable_damage_taken(&self) -> u64 {
        self.prayable_damage_taken
    }

    pub fn unavoidable_damage_taken(&self) -> u64 {
        self.unavoidable_damage_taken
    }

    pub fn chances_of_death(&self) -> u32 {
        self.chances_of_death
    }

    pub fn cumulative_death_chance(&self) -> f64 {
        self.cumulative_death_chance
    }

    pub fn damage_dealt_log(&self) -> &[DamageEntry] {
        &self.damage_dealt_log
    }

    pub fn damage_taken_log(&self) -> &[DamageEntry] {
        &self.damage_taken_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_damage_taken_partition_invariant() {
        let mut stats = PlayerStats::new("A");
        let hits = [
            (5, DamageType::Avoidable),
            (0, DamageType::Prayable),
            (12, DamageType::Unavoidable),
            (7, DamageType::Unknown),
            (3, DamageType::Prayable),
        ];
        for (i, (amount, damage_type)) in hits.iter().enumerate() {
            stats.record_damage_taken(i as i32, *amount, "Boss", *damage_type);
            assert_eq!(
                stats.damage_taken(),
                stats.avoidable_damage_taken()
                    + stats.prayable_damage_taken()
                    + stats.unavoidable_damage_taken()
            );
        }
        assert_eq!(stats.damage_taken(), 27);
        // Unknown folds into the unavoidable bucket
        assert_eq!(stats.unavoidable_damage_taken(), 19);
        assert_eq!(stats.damage_taken_log().len(), 5);
    }

    #[test]
    fn test_death_chance_bounded_and_monotonic() {
        let mut stats = PlayerStats::new("A");
        let mut previous = 0.0;
        for p in [0.0, 0.1, 0.5, 0.9, 0.99, 1.0] {
            stats.add_death_chance(p);
            let cumulative = stats.cumulative_death_chance();
            assert!((0.0..1.0).contains(&cumulative), "out of bounds: {cumulative}");
            assert!(cumulative >= previous);
            previous = cumulative;
        }
        // p = 0 never counts as a lethal-risk hit
        assert_eq!(stats.chances_of_death(), 5);
    }

    #[test]
    fn test_death_chance_composition_commutes() {
        let mut ab = PlayerStats::new("A");
        ab.add_death_chance(0.25);
        ab.add_death_chance(0.4);

        let mut ba = PlayerStats::new("A");
        ba.add_death_chance(0.4);
        ba.add_death_chance(0.25);

        assert!((ab.cumulative_death_chance() - ba.cumulative_death_chance()).abs() < EPSILON);
        // 1 - 0.75 * 0.6
        assert!((ab.cumulative_death_chance() - 0.55).abs() < EPSILON);
    }

    #[test]
    fn test_tick_loss_zero_when_on_schedule() {
        let mut stats = PlayerStats::new("A");
        for tick in (0..40).step_by(4) {
            stats.record_attack(4, tick);
        }
        assert_eq!(stats.attacking_ticks_lost(), 0);
    }

    #[test]
    fn test_tick_loss_accrues_past_cooldown() {
        let mut stats = PlayerStats::new("A");
        stats.record_attack(4, 0);
        stats.record_attack(4, 7);
        // 7 elapsed, 7 >= 4, so 3 ticks lost
        assert_eq!(stats.attacking_ticks_lost(), 3);
    }

    #[test]
    fn test_tick_loss_uses_previous_weapon_speed() {
        let mut stats = PlayerStats::new("A");
        stats.record_attack(5, 0);
        stats.record_attack(4, 7);
        // Loss measured against the speed of the weapon that was cooling down
        assert_eq!(stats.attacking_ticks_lost(), 2);
    }

    #[test]
    fn test_calculate_ticks_lost_live_window() {
        let mut stats = PlayerStats::new("A");
        assert_eq!(stats.calculate_ticks_lost(10, true), 0);

        stats.record_attack(4, 0);
        // Inside the cooldown window: nothing lost yet
        assert_eq!(stats.calculate_ticks_lost(3, true), 0);
        // The instant the cooldown elapses the boundary counts (>=, not >)
        assert_eq!(stats.calculate_ticks_lost(4, true), 0);
        assert_eq!(stats.calculate_ticks_lost(6, true), 2);
        // Live loss is not committed to the stored counter
        assert_eq!(stats.attacking_ticks_lost, 0);
    }

    #[test]
    fn test_finalize_commits_trailing_loss() {
        let mut stats = PlayerStats::new("A");
        stats.record_attack(4, 0);
        stats.finalize_fight(10);
        assert_eq!(stats.attacking_ticks_lost(), 6);
        // Frozen after fight end
        assert_eq!(stats.calculate_ticks_lost(50, false), 6);
    }

    #[test]
    fn test_splash_counts_entry_but_not_hit() {
        let mut stats = PlayerStats::new("A");
        stats.record_damage_dealt(1, 0, "Boss");
        stats.record_damage_dealt(2, 15, "Boss");
        assert_eq!(stats.damage_dealt(), 15);
        assert_eq!(stats.successful_hits(), 1);
        assert_eq!(stats.damage_dealt_log().len(), 2);
    }

    #[test]
    fn test_expected_damage_average() {
        let mut stats = PlayerStats::new("A");
        assert_eq!(stats.average_expected_damage(), 0.0);
        stats.add_expected_damage(10.0);
        stats.add_expected_damage(20.0);
        assert!((stats.average_expected_damage() - 15.0).abs() < EPSILON);
    }

    #[test]
    fn test_lock_in_transfers_to_base() {
        let mut current = PlayerStats::new("A");
        current.record_damage_dealt(0, 30, "Boss");
        current.record_attack(4, 0);
        current.record_attack(4, 9); // 5 ticks lost
        current.add_death_chance(0.2);
        current.finalize_fight(13);

        let mut overall = PlayerStats::new("A");
        overall.lock_in_fight_stats(&current);

        assert_eq!(overall.damage_dealt(), 30);
        assert_eq!(overall.damage_dealt, overall.base_damage_dealt);
        assert_eq!(overall.attacking_ticks_lost, overall.base_attacking_ticks_lost);
        assert!(
            (overall.cumulative_death_chance - overall.base_cumulative_death_chance).abs()
                < EPSILON
        );
        assert_eq!(overall.last_attack_tick(), None);
    }

    #[test]
    fn test_sync_is_non_destructive() {
        let mut first = PlayerStats::new("A");
        first.record_damage_dealt(0, 50, "Boss");
        first.add_death_chance(0.1);
        first.finalize_fight(10);

        let mut overall = PlayerStats::new("A");
        overall.lock_in_fight_stats(&first);

        let mut second = PlayerStats::new("A");
        second.record_damage_dealt(20, 25, "Boss");
        second.record_attack(4, 20);
        second.add_death_chance(0.5);

        overall.sync_with_current_fight(&second, 22);
        assert_eq!(overall.damage_dealt(), 75);
        let expected = 1.0 - 0.9 * 0.5;
        assert!((overall.cumulative_death_chance() - expected).abs() < EPSILON);

        // Re-syncing recomputes from base; nothing double-counts
        overall.sync_with_current_fight(&second, 23);
        assert_eq!(overall.damage_dealt(), 75);
        assert_eq!(overall.base_damage_dealt, 50);
        assert!((overall.cumulative_death_chance() - expected).abs() < EPSILON);
    }

    #[test]
    fn test_lock_in_after_sync_matches_final_sync() {
        let mut overall = PlayerStats::new("A");

        let mut current = PlayerStats::new("A");
        current.record_damage_dealt(0, 40, "Boss");
        current.record_attack(3, 0);
        current.add_death_chance(0.3);

        overall.sync_with_current_fight(&current, 2);
        let synced_damage = overall.damage_dealt();
        let synced_chance = overall.cumulative_death_chance();

        current.finalize_fight(2);
        overall.lock_in_fight_stats(&current);

        assert_eq!(overall.damage_dealt(), synced_damage);
        assert!((overall.cumulative_death_chance() - synced_chance).abs() < EPSILON);
    }
}
