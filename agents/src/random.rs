// ═══════════════════════════════════════════════════════════════════════
// Random policy — makes all decisions uniformly at random.
// Serves as baseline and for testing engine stability.
// ═══════════════════════════════════════════════════════════════════════

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tank_engine::actions::ActionChoice;
use tank_engine::types::GameState;
use tank_engine::Policy;

pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        RandomPolicy { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_action(
        &mut self,
        _state: &GameState,
        _seat: usize,
        actions: &[ActionChoice],
    ) -> usize {
        self.rng.gen_range(0..actions.len())
    }

    fn play_smoke(
        &mut self,
        _state: &GameState,
        _seat: usize,
        _attacker: usize,
        _target: usize,
    ) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn forced_discard(&mut self, state: &GameState, seat: usize) -> usize {
        let len = state.combatant(seat).hand.len();
        self.rng.gen_range(0..len.max(1))
    }

    fn free_exchange(&mut self, state: &GameState, seat: usize) -> Option<usize> {
        let len = state.combatant(seat).hand.len();
        if len == 0 || self.rng.gen_bool(0.5) {
            None
        } else {
            Some(self.rng.gen_range(0..len))
        }
    }
}
