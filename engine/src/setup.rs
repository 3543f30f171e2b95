// ═══════════════════════════════════════════════════════════════════════
// Game setup — validates a lineup and creates a fresh GameState:
// shuffled deck, dealt opening hands, random starting seat
// ═══════════════════════════════════════════════════════════════════════

use crate::cards;
use crate::deck;
use crate::types::{Combatant, ConfigError, GameState, Mode, TankClass};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Validate that a lineup fits the requested mode.
pub fn validate_lineup(classes: &[TankClass], mode: Mode) -> Result<(), ConfigError> {
    match mode {
        Mode::Duel if classes.len() != 2 => Err(ConfigError::DuelArity(classes.len())),
        Mode::Deathmatch if classes.len() < 3 => Err(ConfigError::DeathmatchArity(classes.len())),
        _ => Ok(()),
    }
}

/// Create a fresh, ready-to-play game: combatants seated in lineup
/// order, a shuffled 100-card deck, opening hands dealt, and a starting
/// seat chosen from the game's own seeded RNG.
pub fn new_game(classes: &[TankClass], mode: Mode, seed: u64) -> Result<GameState, ConfigError> {
    validate_lineup(classes, mode)?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut draw_pile = cards::full_deck();
    draw_pile.shuffle(&mut rng);
    let turn_index = rng.gen_range(0..classes.len());

    let combatants: Vec<Combatant> = classes
        .iter()
        .enumerate()
        .map(|(seat, &class)| Combatant::new(seat, class))
        .collect();

    let mut state = GameState {
        draw_pile,
        discard_pile: Vec::new(),
        combatants,
        turn_index,
        mode,
        game_over: false,
        winner: None,
        log: Vec::new(),
        rng,
    };

    // Opening hands. A full 100-card deck cannot exhaust here for any
    // sane lineup, but the deck manager handles it gracefully anyway.
    for seat in 0..state.player_count() {
        deck::draw_to_hand_size(&mut state, seat);
    }

    Ok(state)
}

/// Parse class names into a lineup, failing fast on an unknown name.
pub fn parse_lineup(names: &[String]) -> Result<Vec<TankClass>, ConfigError> {
    names.iter().map(|n| n.parse()).collect()
}
