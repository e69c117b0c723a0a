//! Static boss NPC data.
//!
//! Maps NPC ids to boss metadata for fight-start detection and display
//! naming. Multi-form bosses list one entry per form id.

use hashbrown::HashMap;
use std::sync::LazyLock;

/// Metadata for a known boss NPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossInfo {
    pub name: &'static str,
    pub area: &'static str,
}

pub static BOSS_DATA: &[(i32, BossInfo)] = &[
    // ─────────────────────────────────────────────────────────────────────────
    // God Wars Dungeon
    // ─────────────────────────────────────────────────────────────────────────
    (2205, BossInfo { name: "Commander Zilyana", area: "God Wars Dungeon" }),
    (2215, BossInfo { name: "General Graardor", area: "God Wars Dungeon" }),
    (3129, BossInfo { name: "K'ril Tsutsaroth", area: "God Wars Dungeon" }),
    (3162, BossInfo { name: "Kree'arra", area: "God Wars Dungeon" }),
    // ─────────────────────────────────────────────────────────────────────────
    // Wilderness
    // ─────────────────────────────────────────────────────────────────────────
    (239, BossInfo { name: "King Black Dragon", area: "Wilderness" }),
    (319, BossInfo { name: "Corporeal Beast", area: "Wilderness" }),
    (6503, BossInfo { name: "Callisto", area: "Wilderness" }),
    (6504, BossInfo { name: "Venenatis", area: "Wilderness" }),
    (6611, BossInfo { name: "Vet'ion", area: "Wilderness" }),
    (6612, BossInfo { name: "Vet'ion", area: "Wilderness" }),
    (6615, BossInfo { name: "Scorpia", area: "Wilderness" }),
    // ─────────────────────────────────────────────────────────────────────────
    // Slayer
    // ─────────────────────────────────────────────────────────────────────────
    (494, BossInfo { name: "Kraken", area: "Kraken Cove" }),
    (499, BossInfo { name: "Thermonuclear Smoke Devil", area: "Smoke Devil Dungeon" }),
    (5862, BossInfo { name: "Cerberus", area: "Taverley Dungeon" }),
    (5886, BossInfo { name: "Abyssal Sire", area: "Abyssal Nexus" }),
    (5887, BossInfo { name: "Abyssal Sire", area: "Abyssal Nexus" }),
    (5888, BossInfo { name: "Abyssal Sire", area: "Abyssal Nexus" }),
    (7851, BossInfo { name: "Dusk", area: "Slayer Tower" }),
    (7852, BossInfo { name: "Dawn", area: "Slayer Tower" }),
    (8615, BossInfo { name: "Alchemical Hydra", area: "Karuulm Slayer Dungeon" }),
    // ─────────────────────────────────────────────────────────────────────────
    // Solo bosses
    // ─────────────────────────────────────────────────────────────────────────
    (2042, BossInfo { name: "Zulrah", area: "Zul-Andra" }),
    (2043, BossInfo { name: "Zulrah", area: "Zul-Andra" }),
    (2044, BossInfo { name: "Zulrah", area: "Zul-Andra" }),
    (3127, BossInfo { name: "TzTok-Jad", area: "Fight Cave" }),
    (8059, BossInfo { name: "Vorkath", area: "Ungael" }),
    (8061, BossInfo { name: "Vorkath", area: "Ungael" }),
    (8583, BossInfo { name: "Hespori", area: "Farming Guild" }),
    (9021, BossInfo { name: "Crystalline Hunllef", area: "The Gauntlet" }),
    (9049, BossInfo { name: "Zalcano", area: "Prifddinas" }),
    (12077, BossInfo { name: "Phantom Muspah", area: "Ghorrock Prison" }),
    // ─────────────────────────────────────────────────────────────────────────
    // Group bosses
    // ─────────────────────────────────────────────────────────────────────────
    (963, BossInfo { name: "Kalphite Queen", area: "Kalphite Lair" }),
    (965, BossInfo { name: "Kalphite Queen", area: "Kalphite Lair" }),
    (2265, BossInfo { name: "Dagannoth Supreme", area: "Waterbirth Island" }),
    (2266, BossInfo { name: "Dagannoth Prime", area: "Waterbirth Island" }),
    (2267, BossInfo { name: "Dagannoth Rex", area: "Waterbirth Island" }),
    (5779, BossInfo { name: "Giant Mole", area: "Falador Mole Lair" }),
    (7286, BossInfo { name: "Skotizo", area: "Catacombs of Kourend" }),
    (8388, BossInfo { name: "Sarachnis", area: "Forthos Dungeon" }),
    (9425, BossInfo { name: "The Nightmare", area: "Sisterhood Sanctuary" }),
];

static BOSS_INDEX: LazyLock<HashMap<i32, &'static BossInfo>> =
    LazyLock::new(|| BOSS_DATA.iter().map(|(id, info)| (*id, info)).collect());

/// Look up boss metadata by NPC id.
pub fn lookup_boss(npc_id: i32) -> Option<&'static BossInfo> {
    BOSS_INDEX.get(&npc_id).copied()
}
