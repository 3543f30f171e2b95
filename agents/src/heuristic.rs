// ═══════════════════════════════════════════════════════════════════════
// Heuristic policy — the reference decision policy. Plays to secure
// kills, keeps itself repaired, and discards by a static card-value
// table. Significantly stronger than RandomPolicy.
// ═══════════════════════════════════════════════════════════════════════

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tank_engine::actions::{ActionChoice, ActionKind};
use tank_engine::cards::{Card, CardCategory};
use tank_engine::types::{Combatant, GameState};
use tank_engine::Policy;

pub struct HeuristicPolicy {
    rng: ChaCha8Rng,
}

impl HeuristicPolicy {
    pub fn new(seed: u64) -> Self {
        HeuristicPolicy { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

/// How useful a card is to this combatant right now. Lower value means
/// a better candidate for discarding.
pub fn card_value(card: Card, player: &Combatant) -> i32 {
    match card.category() {
        CardCategory::Safety => {
            // Worthless once the copy is already on the tableau.
            if player.has_safety(card) {
                0
            } else {
                90
            }
        }
        CardCategory::Remedy => match card.cured_hazard() {
            // Critical while the matching hazard is active on us.
            Some(hazard) if player.has_hazard(hazard) => 100,
            _ => 20,
        },
        CardCategory::Hazard => 75,
        CardCategory::Defense => match card {
            Card::SmokeLaunchers => 65,
            Card::AblativeArmor => 55,
            _ => 50,
        },
        CardCategory::Munition => match card {
            Card::Sabot => 80,
            Card::Heat => 60,
            Card::He => 50,
            _ => 40,
        },
        CardCategory::Offense => match card {
            Card::Fire => 70,
            Card::CoaxialMg => 40,
            _ => 50,
        },
    }
}

/// Index of the lowest-value card in hand.
fn worst_card_index(player: &Combatant) -> usize {
    let mut worst_idx = 0;
    let mut worst_val = i32::MAX;
    for (i, &card) in player.hand.iter().enumerate() {
        let val = card_value(card, player);
        if val < worst_val {
            worst_val = val;
            worst_idx = i;
        }
    }
    worst_idx
}

impl Policy for HeuristicPolicy {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn choose_action(
        &mut self,
        state: &GameState,
        seat: usize,
        actions: &[ActionChoice],
    ) -> usize {
        let player = state.combatant(seat);

        // 1. Attack, preferring the lowest-HP target to secure kills.
        let attacks: Vec<usize> = actions
            .iter()
            .enumerate()
            .filter(|(_, a)| matches!(a.kind(), ActionKind::Fire | ActionKind::QuickFire))
            .map(|(i, _)| i)
            .collect();
        if !attacks.is_empty() {
            let hp_of = |i: &usize| {
                actions[*i]
                    .target()
                    .map(|t| state.combatant(t).current_hp)
                    .unwrap_or(i32::MAX)
            };
            let min_hp = attacks.iter().map(hp_of).min().unwrap_or(i32::MAX);
            let best: Vec<usize> =
                attacks.into_iter().filter(|i| hp_of(i) == min_hp).collect();
            if let Some(&i) = best.choose(&mut self.rng) {
                return i;
            }
        }

        // 2. Repair an active hazard.
        let repairs: Vec<usize> = actions
            .iter()
            .enumerate()
            .filter(|(_, a)| a.kind() == ActionKind::Repair)
            .map(|(i, _)| i)
            .collect();
        if let Some(&i) = repairs.choose(&mut self.rng) {
            return i;
        }

        // 3. Load the best available munition, but only if strictly
        // better than what's in the breech.
        let best_load = actions
            .iter()
            .enumerate()
            .filter(|(_, a)| a.kind() == ActionKind::Load)
            .max_by_key(|(_, a)| a.card().map(Card::munition_damage).unwrap_or(0));
        if let Some((i, a)) = best_load {
            let loaded = a.card().map(Card::munition_damage).unwrap_or(0);
            let current = player.tableau.breech.map(Card::munition_damage).unwrap_or(-1);
            if loaded > current {
                return i;
            }
        }

        // 4. Equip.
        let equips: Vec<usize> = actions
            .iter()
            .enumerate()
            .filter(|(_, a)| a.kind() == ActionKind::Equip)
            .map(|(i, _)| i)
            .collect();
        if let Some(&i) = equips.choose(&mut self.rng) {
            return i;
        }

        // 5. Sabotage.
        let sabotages: Vec<usize> = actions
            .iter()
            .enumerate()
            .filter(|(_, a)| a.kind() == ActionKind::Sabotage)
            .map(|(i, _)| i)
            .collect();
        if let Some(&i) = sabotages.choose(&mut self.rng) {
            return i;
        }

        // 6. Discard the least valuable card.
        actions
            .iter()
            .enumerate()
            .filter(|(_, a)| a.kind() == ActionKind::Discard)
            .min_by_key(|(_, a)| a.card().map(|c| card_value(c, player)).unwrap_or(i32::MAX))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn play_smoke(
        &mut self,
        _state: &GameState,
        _seat: usize,
        _attacker: usize,
        _target: usize,
    ) -> bool {
        // Always evade when eligible.
        true
    }

    fn forced_discard(&mut self, state: &GameState, seat: usize) -> usize {
        worst_card_index(state.combatant(seat))
    }

    fn free_exchange(&mut self, state: &GameState, seat: usize) -> Option<usize> {
        let player = state.combatant(seat);
        if player.hand.is_empty() {
            return None;
        }
        let worst = worst_card_index(player);
        let worst_val = card_value(player.hand[worst], player);
        // Exchange when the hand is plentiful or its worst card is poor.
        if player.hand.len() >= 4 || worst_val <= 40 {
            Some(worst)
        } else {
            None
        }
    }
}
