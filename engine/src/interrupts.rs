// ═══════════════════════════════════════════════════════════════════════
// Interrupt resolver — the two defensive counter-play protocols that
// fire mid-action: smoke evasion and the coup fourré counter-safety.
// ═══════════════════════════════════════════════════════════════════════

use crate::cards::Card;
use crate::deck;
use crate::log::{InterruptRecord, LogRecord};
use crate::policy::Policy;
use crate::types::{GameState, TankClass};
use rand::Rng;

/// Poll order for an interrupt: the target first, then every other seat
/// in ascending order wrapping around. The attacker is not explicitly
/// excluded — the shot has already been resolved off them, and they may
/// legally hold the defensive card.
fn interrupt_order(state: &GameState, target: usize) -> Vec<usize> {
    let n = state.player_count();
    let mut order = Vec::with_capacity(n);
    order.push(target);
    let mut idx = (target + 1) % n;
    while idx != target {
        order.push(idx);
        idx = (idx + 1) % n;
    }
    order
}

/// Offer every eligible combatant the chance to negate an incoming
/// attack with a smoke card. Returns true if the attack was evaded.
pub fn try_smoke_interrupt(
    state: &mut GameState,
    attacker: usize,
    target: usize,
    policies: &mut [Box<dyn Policy>],
) -> bool {
    // A Heavy with adrenaline punches straight through smoke.
    let a = state.combatant(attacker);
    if a.class == TankClass::Heavy && a.adrenaline {
        return false;
    }

    for seat in interrupt_order(state, target) {
        let candidate = state.combatant(seat);
        if !candidate.alive {
            continue;
        }
        let Some(smoke_index) = candidate.hand_index_of(Card::SmokeLaunchers) else {
            continue;
        };
        // Jammed communications: can only smoke for yourself.
        if candidate.has_hazard(Card::CommsJammed) && seat != target {
            continue;
        }

        if policies[seat].play_smoke(state, seat, attacker, target) {
            let smoke = state.combatants[seat].hand.remove(smoke_index);
            state.discard_pile.push(smoke);
            state.push_log(LogRecord::Interrupt {
                actor: seat,
                interrupt: InterruptRecord::SmokeLaunchers {
                    protects: target,
                    against: attacker,
                },
            });
            return true;
        }
    }

    false
}

/// Counter-safety check for a sabotage. If the target's hand holds the
/// exact safety countering `hazard`, the coup fourré always fires — the
/// policy is never consulted. Returns the seat granted the bonus turn.
///
/// Effects: the safety moves from the target's hand into their tableau,
/// the attacker discards one uniformly-random card, the target draws a
/// replacement, and the target plays next. The hazard card itself is
/// discarded by the caller.
pub fn try_coup_fourre(
    state: &mut GameState,
    attacker: usize,
    target: usize,
    hazard: Card,
) -> Option<usize> {
    let safety = hazard.countering_safety()?;
    let safety_index = state.combatant(target).hand_index_of(safety)?;

    let safety_card = state.combatants[target].hand.remove(safety_index);
    state.combatants[target].tableau.safeties.push(safety_card);

    if !state.combatants[attacker].hand.is_empty() {
        let idx = state.rng.gen_range(0..state.combatants[attacker].hand.len());
        let discarded = state.combatants[attacker].hand.remove(idx);
        state.discard_pile.push(discarded);
    }

    if let Some(drawn) = deck::draw(state) {
        state.combatants[target].hand.push(drawn);
    }

    state.push_log(LogRecord::Interrupt {
        actor: target,
        interrupt: InterruptRecord::CoupFourre { safety, against: attacker, hazard },
    });

    Some(target)
}
