//! Immutable snapshots for UI consumers.
//!
//! Everything handed outward is a point-in-time copy; the tracker's own
//! fights and stats are never exposed mutably. Snapshots are serializable so
//! a frontend can export or persist them as-is.

use serde::Serialize;

use super::fight::Fight;

/// Duration of one game tick in seconds.
pub const TICK_SECONDS: f64 = 0.6;

/// Computed per-player display metrics.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub name: String,

    // Offense
    pub damage_dealt: u64,
    pub dps: f64,
    pub total_attacks: u32,
    pub successful_hits: u32,
    pub accuracy_pct: f32,
    pub expected_damage_avg: f64,

    // Tick efficiency
    pub attacking_ticks_lost: i32,
    pub tick_efficiency_pct: f32,

    // Defense
    pub damage_taken: u64,
    pub avoidable_damage_taken: u64,
    pub prayable_damage_taken: u64,
    pub unavoidable_damage_taken: u64,

    // Death probability
    pub chances_of_death: u32,
    pub cumulative_death_chance: f64,
}

/// Point-in-time copy of a fight with computed metrics, sorted by DPS.
#[derive(Debug, Clone, Serialize)]
pub struct FightSnapshot {
    pub id: u64,
    pub boss_name: String,
    pub boss_npc_id: i32,
    /// ISO 8601 formatted start time
    pub start_time: String,
    pub duration_ticks: i32,
    pub duration_seconds: f64,
    pub active: bool,
    pub player_metrics: Vec<PlayerMetrics>,
}

impl Fight {
    pub fn snapshot(&self) -> FightSnapshot {
        let duration_ticks = self.duration_ticks();
        let duration_seconds = duration_ticks as f64 * TICK_SECONDS;

        let mut player_metrics: Vec<PlayerMetrics> = self
            .players()
            .map(|stats| {
                // The Overall copies never record attacks themselves; their
                // tick-loss field is maintained by sync/lock-in, so read it
                // directly rather than recomputing from attack state.
                let attacking_ticks_lost = if self.is_overall() {
                    stats.attacking_ticks_lost()
                } else {
                    stats.calculate_ticks_lost(self.end_tick(), self.is_active())
                };

                let dps = if duration_seconds > 0.0 {
                    stats.damage_dealt() as f64 / duration_seconds
                } else {
                    0.0
                };

                let accuracy_pct = if stats.total_attacks() > 0 {
                    (stats.successful_hits() as f32 / stats.total_attacks() as f32) * 100.0
                } else {
                    0.0
                };

                let attacking_ticks = stats.total_attacking_ticks();
                let potential_ticks = attacking_ticks + attacking_ticks_lost;
                let tick_efficiency_pct = if potential_ticks > 0 {
                    (attacking_ticks as f32 / potential_ticks as f32) * 100.0
                } else {
                    100.0
                };

                PlayerMetrics {
                    name: stats.name().to_string(),
                    damage_dealt: stats.damage_dealt(),
                    dps,
                    total_attacks: stats.total_attacks(),
                    successful_hits: stats.successful_hits(),
                    accuracy_pct,
                    expected_damage_avg: stats.average_expected_damage(),
                    attacking_ticks_lost,
                    tick_efficiency_pct,
                    damage_taken: stats.damage_taken(),
                    avoidable_damage_taken: stats.avoidable_damage_taken(),
                    prayable_damage_taken: stats.prayable_damage_taken(),
                    unavoidable_damage_taken: stats.unavoidable_damage_taken(),
                    chances_of_death: stats.chances_of_death(),
                    cumulative_death_chance: stats.cumulative_death_chance(),
                }
            })
            .collect();

        player_metrics.sort_by(|a, b| b.dps.total_cmp(&a.dps));

        FightSnapshot {
            id: self.id(),
            boss_name: self.boss_name().to_string(),
            boss_npc_id: self.boss_npc_id(),
            start_time: self.started_at().format("%Y-%m-%dT%H:%M:%S").to_string(),
            duration_ticks,
            duration_seconds,
            active: self.is_active(),
            player_metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_metrics() {
        let mut fight = Fight::new(1, "Vorkath".to_string(), 8061, 0);
        {
            let stats = fight.player_stats_mut("A");
            stats.record_attack(4, 0);
            stats.record_damage_dealt(0, 20, "Vorkath");
            stats.record_attack(4, 4);
            stats.record_damage_dealt(4, 0, "Vorkath");
        }
        for tick in 1..=10 {
            fight.update_current_tick(tick);
        }
        fight.end_fight(10);

        let snapshot = fight.snapshot();
        assert_eq!(snapshot.duration_ticks, 10);
        assert!((snapshot.duration_seconds - 6.0).abs() < 1e-9);
        assert!(!snapshot.active);

        let metrics = &snapshot.player_metrics[0];
        assert_eq!(metrics.damage_dealt, 20);
        assert_eq!(metrics.total_attacks, 2);
        assert_eq!(metrics.successful_hits, 1);
        assert!((metrics.accuracy_pct - 50.0).abs() < 1e-3);
        assert!((metrics.dps - 20.0 / 6.0).abs() < 1e-9);
        // Last attack at tick 4, fight ended at 10: 2 trailing ticks lost
        assert_eq!(metrics.attacking_ticks_lost, 2);
        assert!((metrics.tick_efficiency_pct - 80.0).abs() < 1e-3);
    }

    #[test]
    fn test_snapshot_sorted_by_dps() {
        let mut fight = Fight::new(1, "Zulrah".to_string(), 2042, 0);
        fight.player_stats_mut("low").record_damage_dealt(0, 10, "Zulrah");
        fight.player_stats_mut("high").record_damage_dealt(0, 90, "Zulrah");
        for tick in 1..=10 {
            fight.update_current_tick(tick);
        }

        let snapshot = fight.snapshot();
        assert_eq!(snapshot.player_metrics[0].name, "high");
        assert_eq!(snapshot.player_metrics[1].name, "low");
    }

    #[test]
    fn test_zero_duration_has_zero_dps() {
        let mut fight = Fight::new(1, "Zulrah".to_string(), 2042, 0);
        fight.player_stats_mut("A").record_damage_dealt(0, 50, "Zulrah");
        let snapshot = fight.snapshot();
        assert_eq!(snapshot.duration_ticks, 0);
        assert_eq!(snapshot.player_metrics[0].dps, 0.0);
    }
}
