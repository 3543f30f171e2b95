// ═══════════════════════════════════════════════════════════════════════
// Deck manager — the single gate to the shared draw/discard piles.
// Every component draws through here so the card-conservation invariant
// is enforced in one place.
// ═══════════════════════════════════════════════════════════════════════

use crate::cards::Card;
use crate::types::GameState;
use rand::seq::SliceRandom;

/// Draw the top card of the draw pile.
///
/// If the draw pile is empty the discard pile is shuffled in as the new
/// draw pile. If both piles are empty the game is marked terminal with
/// no winner (a draw) and `None` is returned — exhaustion is a
/// first-class terminal condition, not an error.
pub fn draw(state: &mut GameState) -> Option<Card> {
    if state.draw_pile.is_empty() {
        if state.discard_pile.is_empty() {
            state.game_over = true;
            state.winner = None;
            return None;
        }
        let mut reshuffled = std::mem::take(&mut state.discard_pile);
        reshuffled.shuffle(&mut state.rng);
        state.draw_pile = reshuffled;
    }
    state.draw_pile.pop()
}

/// Refill a combatant's hand up to its class hand size, stopping
/// silently if the deck exhausts mid-draw.
pub fn draw_to_hand_size(state: &mut GameState, seat: usize) {
    let target = state.combatants[seat].class.hand_size();
    while state.combatants[seat].hand.len() < target {
        match draw(state) {
            Some(card) => state.combatants[seat].hand.push(card),
            None => break,
        }
    }
}
