// ═══════════════════════════════════════════════════════════════════════
// Turn controller — orchestrates one full turn:
//   StartOfTurn → FreeAction → MainAction → BonusAction → EndOfTurn
//   → Advance
// The loop aborts the instant any step sets the terminal flag.
// ═══════════════════════════════════════════════════════════════════════

use crate::actions::{self, ActionKind};
use crate::deck;
use crate::log::{GameEvent, LogRecord};
use crate::policy::Policy;
use crate::types::{GameState, TankClass};

/// Play one complete turn for the current actor. `policies` is indexed
/// by seat; the engine only ever talks to them through the trait.
pub fn play_turn(state: &mut GameState, policies: &mut [Box<dyn Policy>]) {
    if state.game_over {
        return;
    }

    let seat = state.current_actor();
    state.push_log(LogRecord::Event { event: GameEvent::StartTurn { player: seat } });

    // ── Start of turn ──────────────────────────────────────────────────
    state.combatants[seat].spawn_shield = false;
    deck::draw_to_hand_size(state, seat);
    if state.game_over {
        return;
    }

    // ── Free action: Medium passive ────────────────────────────────────
    free_action(state, seat, policies);
    if state.game_over {
        return;
    }

    // ── Main action ────────────────────────────────────────────────────
    let legal = actions::legal_actions(state, seat);
    let mut bonus_turn_seat = None;
    let mut main_action_kind = None;

    if legal.is_empty() {
        state.push_log(LogRecord::Event { event: GameEvent::SkipAction { player: seat } });
    } else {
        let mut idx = policies[seat].choose_action(state, seat, &legal);
        if idx >= legal.len() {
            idx = 0; // documented fallback: first legal action
        }
        let action = legal[idx];
        main_action_kind = Some(action.kind());
        bonus_turn_seat = actions::execute_action(state, seat, &action, policies);
    }
    if state.game_over {
        return;
    }

    // ── Bonus action: Medium autoloader ────────────────────────────────
    // A Medium with adrenaline that spent its main action loading may
    // now fire, or vice versa. Skipped if a coup fourré already granted
    // a bonus turn this turn.
    let player = state.combatant(seat);
    if player.class == TankClass::Medium && player.adrenaline && bonus_turn_seat.is_none() {
        let wanted = match main_action_kind {
            Some(ActionKind::Load) => Some(ActionKind::Fire),
            Some(ActionKind::Fire) => Some(ActionKind::Load),
            _ => None,
        };
        if let Some(wanted) = wanted {
            let restricted: Vec<_> = actions::legal_actions(state, seat)
                .into_iter()
                .filter(|a| a.kind() == wanted)
                .collect();
            if !restricted.is_empty() {
                let mut idx = policies[seat].choose_action(state, seat, &restricted);
                if idx >= restricted.len() {
                    idx = 0;
                }
                let action = restricted[idx];
                if let Some(bonus) = actions::execute_action(state, seat, &action, policies) {
                    bonus_turn_seat = Some(bonus);
                }
            }
        }
    }
    if state.game_over {
        return;
    }

    // ── End of turn: discard down to hand size ─────────────────────────
    let hand_size = state.combatant(seat).class.hand_size();
    while state.combatants[seat].hand.len() > hand_size {
        let mut idx = policies[seat].forced_discard(state, seat);
        if idx >= state.combatants[seat].hand.len() {
            idx = 0;
        }
        let card = state.combatants[seat].hand.remove(idx);
        state.discard_pile.push(card);
        state.push_log(LogRecord::Event {
            event: GameEvent::DiscardExcess { player: seat, card },
        });
    }

    // ── Advance ────────────────────────────────────────────────────────
    match bonus_turn_seat {
        Some(bonus) => {
            // The coup fourré beneficiary plays next; normal rotation
            // resumes after their turn.
            state.turn_index = bonus;
            state.push_log(LogRecord::Event { event: GameEvent::BonusTurn { player: bonus } });
        }
        None => {
            state.turn_index = (state.turn_index + 1) % state.player_count();
        }
    }
}

/// Mediums without adrenaline may exchange one card for a fresh draw at
/// no action cost.
fn free_action(state: &mut GameState, seat: usize, policies: &mut [Box<dyn Policy>]) {
    let player = state.combatant(seat);
    if player.class != TankClass::Medium || player.adrenaline || player.hand.is_empty() {
        return;
    }
    let Some(idx) = policies[seat].free_exchange(state, seat) else {
        return;
    };
    // An out-of-range answer counts as declining.
    if idx >= state.combatants[seat].hand.len() {
        return;
    }
    let card = state.combatants[seat].hand.remove(idx);
    state.discard_pile.push(card);
    if let Some(drawn) = deck::draw(state) {
        state.combatants[seat].hand.push(drawn);
    }
    state.push_log(LogRecord::Event {
        event: GameEvent::MediumPassive { player: seat, discarded: card },
    });
}
