// ═══════════════════════════════════════════════════════════════════════
// Card catalog — static data: identities, categories, supply counts,
// damage table and hazard/remedy/safety lookup tables
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

// ── Card identity ──────────────────────────────────────────────────────

/// Every distinct card in the game. Cards are interchangeable within a
/// name — no per-instance identity exists beyond this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Card {
    // Offense
    Fire,
    CoaxialMg,
    // Munitions
    He,
    Heat,
    Sabot,
    // Hazards
    Tracked,
    JammedBreech,
    CommsJammed,
    // Remedies
    FieldRepair,
    ClearBreech,
    ReestablishComms,
    // Defenses
    SmokeLaunchers,
    AblativeArmor,
    // Safeties
    ReinforcedTreads,
    AdvancedTargeting,
    EncryptedComms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardCategory {
    Offense,
    Munition,
    Hazard,
    Remedy,
    Defense,
    Safety,
}

impl Card {
    pub const ALL: [Card; 16] = [
        Card::Fire,
        Card::CoaxialMg,
        Card::He,
        Card::Heat,
        Card::Sabot,
        Card::Tracked,
        Card::JammedBreech,
        Card::CommsJammed,
        Card::FieldRepair,
        Card::ClearBreech,
        Card::ReestablishComms,
        Card::SmokeLaunchers,
        Card::AblativeArmor,
        Card::ReinforcedTreads,
        Card::AdvancedTargeting,
        Card::EncryptedComms,
    ];

    pub fn category(self) -> CardCategory {
        match self {
            Card::Fire | Card::CoaxialMg => CardCategory::Offense,
            Card::He | Card::Heat | Card::Sabot => CardCategory::Munition,
            Card::Tracked | Card::JammedBreech | Card::CommsJammed => CardCategory::Hazard,
            Card::FieldRepair | Card::ClearBreech | Card::ReestablishComms => CardCategory::Remedy,
            Card::SmokeLaunchers | Card::AblativeArmor => CardCategory::Defense,
            Card::ReinforcedTreads | Card::AdvancedTargeting | Card::EncryptedComms => {
                CardCategory::Safety
            }
        }
    }

    /// How many copies of this card the starting deck contains.
    pub fn supply_count(self) -> usize {
        match self {
            Card::Fire => 15,
            Card::CoaxialMg => 10,
            Card::He => 12,
            Card::Heat => 6,
            Card::Sabot => 2,
            Card::Tracked => 6,
            Card::JammedBreech => 6,
            Card::CommsJammed => 6,
            Card::FieldRepair => 6,
            Card::ClearBreech => 6,
            Card::ReestablishComms => 6,
            Card::SmokeLaunchers => 10,
            Card::AblativeArmor => 6,
            Card::ReinforcedTreads => 1,
            Card::AdvancedTargeting => 1,
            Card::EncryptedComms => 1,
        }
    }

    /// Base damage dealt when this card lands as a munition (or as the
    /// secondary weapon). Zero for everything else.
    pub fn munition_damage(self) -> i32 {
        match self {
            Card::He => 25,
            Card::Heat => 50,
            Card::Sabot => 75,
            Card::CoaxialMg => 10,
            _ => 0,
        }
    }

    /// The safety that preemptively counters this hazard (coup fourré).
    pub fn countering_safety(self) -> Option<Card> {
        match self {
            Card::Tracked => Some(Card::ReinforcedTreads),
            Card::JammedBreech => Some(Card::AdvancedTargeting),
            Card::CommsJammed => Some(Card::EncryptedComms),
            _ => None,
        }
    }

    /// The hazard a remedy card cures.
    pub fn cured_hazard(self) -> Option<Card> {
        match self {
            Card::FieldRepair => Some(Card::Tracked),
            Card::ClearBreech => Some(Card::JammedBreech),
            Card::ReestablishComms => Some(Card::CommsJammed),
            _ => None,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Card::Fire => "fire",
            Card::CoaxialMg => "coaxial_mg",
            Card::He => "he",
            Card::Heat => "heat",
            Card::Sabot => "sabot",
            Card::Tracked => "tracked",
            Card::JammedBreech => "jammed_breech",
            Card::CommsJammed => "comms_jammed",
            Card::FieldRepair => "field_repair",
            Card::ClearBreech => "clear_breech",
            Card::ReestablishComms => "reestablish_comms",
            Card::SmokeLaunchers => "smoke_launchers",
            Card::AblativeArmor => "ablative_armor",
            Card::ReinforcedTreads => "reinforced_treads",
            Card::AdvancedTargeting => "advanced_targeting",
            Card::EncryptedComms => "encrypted_comms",
        };
        write!(f, "{}", name)
    }
}

// ── Deck construction ──────────────────────────────────────────────────

/// Size of the full starting deck.
pub const DECK_SIZE: usize = 100;

/// Build the fixed 100-card starting multiset, unshuffled.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for card in Card::ALL {
        for _ in 0..card.supply_count() {
            deck.push(card);
        }
    }
    debug_assert_eq!(deck.len(), DECK_SIZE);
    deck
}
