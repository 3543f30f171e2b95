// ═══════════════════════════════════════════════════════════════════════
// Damage resolver — the ordered pipeline applying one munition to one
// target, plus the post-damage transitions it can trigger: adrenaline
// activation, death, respawn, game end.
// ═══════════════════════════════════════════════════════════════════════

use crate::cards::Card;
use crate::deck;
use crate::log::{GameEvent, LogRecord};
use crate::types::{GameState, Mode, TankClass, DEATHMATCH_KILL_TARGET};

/// Resolve a single attack of `munition` by `attacker` against `target`.
/// Returns true if the game ended as a result.
///
/// Step order is fixed: base damage, armor interaction, clamp at zero,
/// HP subtraction, adrenaline check, death check. Armor consumption
/// happens before the clamp; adrenaline only if the target survived;
/// death is checked last regardless of activation.
pub fn resolve_damage(
    state: &mut GameState,
    attacker: usize,
    target: usize,
    munition: Card,
) -> bool {
    let mut damage = munition.munition_damage();
    let mut steps = vec![format!("base={}", damage)];

    let a = state.combatant(attacker);
    let attacker_heavy_adrenaline = a.class == TankClass::Heavy && a.adrenaline;

    let armor = state.combatants[target].tableau.ablative_armor;
    if munition == Card::Sabot && armor > 0 {
        // The penetrating round destroys a charge but loses no damage.
        // Mutually exclusive with the half-reduction below.
        state.combatants[target].tableau.ablative_armor -= 1;
        state.discard_pile.push(Card::AblativeArmor);
        steps.push("sabot_destroyed_armor".to_string());
    } else if armor > 0 && !attacker_heavy_adrenaline {
        // A Heavy-adrenaline attacker ignores armor's damage reduction
        // for every munition type.
        let reduction = (damage + 1) / 2; // ceil(damage / 2)
        damage -= reduction;
        state.combatants[target].tableau.ablative_armor -= 1;
        state.discard_pile.push(Card::AblativeArmor);
        steps.push(format!("ablative_reduced={}", reduction));
    }

    damage = damage.max(0);

    state.combatants[target].current_hp -= damage;
    state.push_log(LogRecord::Damage { target, amount: damage, munition, steps });

    check_adrenaline(state, target);
    check_death(state, attacker, target)
}

/// One-time, sticky per-life transition: at or below the class threshold
/// (and still alive) the ability activates and every active hazard is
/// cleansed.
pub fn check_adrenaline(state: &mut GameState, seat: usize) {
    let player = state.combatant(seat);
    if player.adrenaline
        || player.current_hp <= 0
        || player.current_hp > player.class.adrenaline_threshold()
    {
        return;
    }

    state.combatants[seat].adrenaline = true;
    let cleared: Vec<Card> = state.combatants[seat].tableau.hazards.drain(..).collect();
    state.discard_pile.extend(cleared.iter().copied());
    state.push_log(LogRecord::Event {
        event: GameEvent::Adrenaline { player: seat, cleared },
    });
}

/// Kill bookkeeping and mode-dependent termination. Returns true if the
/// game ended.
pub fn check_death(state: &mut GameState, attacker: usize, target: usize) -> bool {
    if state.combatant(target).current_hp > 0 {
        return false;
    }

    state.combatants[attacker].kill_marks += 1;
    let kill_marks = state.combatants[attacker].kill_marks;
    state.push_log(LogRecord::Event { event: GameEvent::Kill { attacker, target, kill_marks } });

    if state.mode == Mode::Duel {
        state.game_over = true;
        state.winner = Some(attacker);
        return true;
    }

    if kill_marks >= DEATHMATCH_KILL_TARGET {
        state.game_over = true;
        state.winner = Some(attacker);
        return true;
    }

    respawn(state, target);
    false
}

/// Deathmatch respawn: everything the dying combatant held goes to the
/// discard pile (each armor charge converted back into a placeholder
/// defense card so the total card count is conserved), then HP, flags
/// and hand are reset to a fresh life with a one-turn spawn shield.
pub fn respawn(state: &mut GameState, seat: usize) {
    {
        let player = &mut state.combatants[seat];
        let tableau = &mut player.tableau;
        state.discard_pile.extend(player.hand.drain(..));
        if let Some(munition) = tableau.breech.take() {
            state.discard_pile.push(munition);
        }
        state.discard_pile.extend(tableau.hazards.drain(..));
        state.discard_pile.extend(tableau.safeties.drain(..));
        for _ in 0..tableau.ablative_armor {
            state.discard_pile.push(Card::AblativeArmor);
        }
        tableau.ablative_armor = 0;

        player.current_hp = player.class.max_hp();
        player.adrenaline = false;
        player.spawn_shield = true;
    }

    deck::draw_to_hand_size(state, seat);
    state.push_log(LogRecord::Event { event: GameEvent::Respawn { player: seat } });
}
