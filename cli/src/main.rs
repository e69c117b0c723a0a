mod script;

use std::path::PathBuf;

use clap::Parser;

use script::Script;
use tickmeter_core::{
    BossRegistry, FightSnapshot, FightTracker, TrackerConfig, TrackerConfigExt,
};

#[derive(Parser)]
#[command(version, about = "Replay a combat event script through the fight tracker")]
struct Cli {
    /// Path to a TOML event script
    script: PathBuf,

    /// Boss override file (TOML, [[bosses]] entries with npc_id and name)
    #[arg(long)]
    boss_overrides: Option<PathBuf>,

    /// Override the minimum archived fight duration, in ticks
    #[arg(long)]
    min_duration: Option<u32>,

    /// Override the maximum history size
    #[arg(long)]
    max_history: Option<usize>,
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = TrackerConfig::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "using default configuration");
        TrackerConfig::default()
    });
    if let Some(min) = cli.min_duration {
        config.min_fight_duration_ticks = min;
    }
    if let Some(max) = cli.max_history {
        config.max_history_size = max;
    }

    let registry = match &cli.boss_overrides {
        Some(path) => BossRegistry::with_overrides(path).map_err(|e| e.to_string())?,
        None => BossRegistry::new(),
    };

    let content = std::fs::read_to_string(&cli.script)
        .map_err(|e| format!("failed to read {}: {e}", cli.script.display()))?;
    let script = Script::parse(&content)
        .map_err(|e| format!("failed to parse {}: {e}", cli.script.display()))?;

    let mut tracker = FightTracker::new(config, registry);
    for entry in &script.events {
        for event in entry.to_events() {
            tracker.handle_event(event);
        }
    }
    // Close out any fight the script left running
    tracker.end_current_fight();

    println!("Fight history ({} fights):", tracker.history_len());
    for snapshot in tracker.history_snapshots() {
        print_snapshot(&snapshot);
    }
    println!();
    println!("Overall:");
    print_snapshot(&tracker.overall_snapshot());

    Ok(())
}

fn print_snapshot(snapshot: &FightSnapshot) {
    println!(
        "  {} - {} ticks ({:.1}s)",
        snapshot.boss_name, snapshot.duration_ticks, snapshot.duration_seconds
    );
    for m in &snapshot.player_metrics {
        println!(
            "      [{}: {} dmg | {:.1} dps | {}/{} hits ({:.0}%) | {} ticks lost ({:.0}% eff) | {} taken | {:.2}% death] ",
            m.name,
            m.damage_dealt,
            m.dps,
            m.successful_hits,
            m.total_attacks,
            m.accuracy_pct,
            m.attacking_ticks_lost,
            m.tick_efficiency_pct,
            m.damage_taken,
            m.cumulative_death_chance * 100.0
        );
    }
}
