// ═══════════════════════════════════════════════════════════════════════
// Structured event log — append-only record of everything that happened
// in a game. External reporting derives every figure from this; the
// engine itself never reads it back.
// ═══════════════════════════════════════════════════════════════════════

use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// One entry in the game log. Serializes to one JSON object per record,
/// tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogRecord {
    Action {
        actor: usize,
        #[serde(flatten)]
        action: ActionRecord,
    },
    Interrupt {
        actor: usize,
        #[serde(flatten)]
        interrupt: InterruptRecord,
    },
    Damage {
        target: usize,
        amount: i32,
        munition: Card,
        /// Pipeline step annotations (base value, armor interactions).
        steps: Vec<String>,
    },
    Event {
        #[serde(flatten)]
        event: GameEvent,
    },
}

/// The primary effect of a main or bonus action, as logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionRecord {
    Load { munition: Card },
    Fire { munition: Card, target: usize, smoked: bool },
    Quickfire { target: usize, smoked: bool },
    Sabotage { hazard: Card, target: usize },
    Repair { remedy: Card, target: usize },
    Equip { card: Card },
    Discard { card: Card },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "interrupt", rename_all = "snake_case")]
pub enum InterruptRecord {
    /// A smoke evasion negated an attack. `actor` is whoever played the
    /// smoke card, which may not be the target being protected.
    SmokeLaunchers { protects: usize, against: usize },
    /// Counter-safety reversal of a sabotage.
    CoupFourre { safety: Card, against: usize, hazard: Card },
}

/// Lifecycle events outside the action/interrupt/damage flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    StartTurn { player: usize },
    /// Medium free action: one card exchanged at no action cost.
    MediumPassive { player: usize, discarded: Card },
    Adrenaline { player: usize, cleared: Vec<Card> },
    Kill { attacker: usize, target: usize, kill_marks: u32 },
    Respawn { player: usize },
    BonusTurn { player: usize },
    DiscardExcess { player: usize, card: Card },
    SkipAction { player: usize },
    /// Mandatory discard imposed by a Light combatant's active ability.
    ForcedDiscard { player: usize, card: Card },
}

/// Number of turns taken, derived from the log.
pub fn count_turns(log: &[LogRecord]) -> usize {
    log.iter()
        .filter(|r| matches!(r, LogRecord::Event { event: GameEvent::StartTurn { .. } }))
        .count()
}

/// Number of cards meaningfully played: every non-discard action plus
/// every interrupt.
pub fn count_cards_played(log: &[LogRecord]) -> usize {
    log.iter()
        .filter(|r| match r {
            LogRecord::Action { action, .. } => !matches!(action, ActionRecord::Discard { .. }),
            LogRecord::Interrupt { .. } => true,
            _ => false,
        })
        .count()
}
