// ═══════════════════════════════════════════════════════════════════════
// Action enumerator and executor.
//
// `legal_actions` is a pure function of (state, seat): it produces every
// currently-legal action tagged with the data needed to execute it.
// `execute_action` applies a chosen action's primary effect, invoking
// the interrupt resolver and the damage pipeline as needed.
// ═══════════════════════════════════════════════════════════════════════

use crate::cards::{Card, CardCategory};
use crate::damage;
use crate::interrupts;
use crate::log::{ActionRecord, GameEvent, LogRecord};
use crate::policy::Policy;
use crate::types::{GameState, TankClass};

// ── Action descriptors ─────────────────────────────────────────────────

/// A single legal action, tagged with exactly the fields its type needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionChoice {
    /// Load a munition into the breech (replacing any current load).
    Load { hand_index: usize, card: Card },
    /// Fire the loaded munition at an opponent.
    Fire { hand_index: usize, target: usize },
    /// Fire the secondary weapon; needs no loaded breech.
    QuickFire { hand_index: usize, target: usize },
    /// Play a hazard on an opponent.
    Sabotage { hand_index: usize, target: usize, card: Card },
    /// Cure a matching hazard on any living combatant (self included).
    Repair { hand_index: usize, target: usize, card: Card },
    /// Equip ablative armor or a safety.
    Equip { hand_index: usize, card: Card },
    /// The universal fallback: discard any card.
    Discard { hand_index: usize, card: Card },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Load,
    Fire,
    QuickFire,
    Sabotage,
    Repair,
    Equip,
    Discard,
}

impl ActionChoice {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionChoice::Load { .. } => ActionKind::Load,
            ActionChoice::Fire { .. } => ActionKind::Fire,
            ActionChoice::QuickFire { .. } => ActionKind::QuickFire,
            ActionChoice::Sabotage { .. } => ActionKind::Sabotage,
            ActionChoice::Repair { .. } => ActionKind::Repair,
            ActionChoice::Equip { .. } => ActionKind::Equip,
            ActionChoice::Discard { .. } => ActionKind::Discard,
        }
    }

    /// Seat this action is aimed at, for targeted actions.
    pub fn target(&self) -> Option<usize> {
        match self {
            ActionChoice::Fire { target, .. }
            | ActionChoice::QuickFire { target, .. }
            | ActionChoice::Sabotage { target, .. }
            | ActionChoice::Repair { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// The card this action plays, where one is fixed at enumeration time.
    pub fn card(&self) -> Option<Card> {
        match self {
            ActionChoice::Load { card, .. }
            | ActionChoice::Sabotage { card, .. }
            | ActionChoice::Repair { card, .. }
            | ActionChoice::Equip { card, .. }
            | ActionChoice::Discard { card, .. } => Some(*card),
            ActionChoice::Fire { .. } => Some(Card::Fire),
            ActionChoice::QuickFire { .. } => Some(Card::CoaxialMg),
        }
    }
}

// ── Enumerator ─────────────────────────────────────────────────────────

/// Eligibility of an attack on an adrenaline Light: the attacker must be
/// able to pay the mandatory one-card toll without starving itself of
/// its own attack card. The arithmetic is kept in its original
/// double-counted form deliberately; see the boundary tests.
fn can_target_ghost(hand: &[Card], attack_card: Card) -> bool {
    let attack_count = hand.iter().filter(|&&c| c == attack_card).count();
    !(hand.len() - attack_count < 1 && attack_count <= 1)
}

/// Every currently-legal action for the combatant at `seat`.
pub fn legal_actions(state: &GameState, seat: usize) -> Vec<ActionChoice> {
    let player = state.combatant(seat);
    let mut actions = Vec::new();

    let has_tracked = player.has_hazard(Card::Tracked);
    let has_jammed_breech = player.has_hazard(Card::JammedBreech);

    let opponents: Vec<usize> = state
        .combatants
        .iter()
        .filter(|p| p.seat != seat && p.alive && !p.spawn_shield)
        .map(|p| p.seat)
        .collect();

    // Load: a munition in hand, no jammed breech.
    if !has_jammed_breech {
        for (i, &card) in player.hand.iter().enumerate() {
            if card.category() == CardCategory::Munition {
                actions.push(ActionChoice::Load { hand_index: i, card });
            }
        }
    }

    // Fire: a fire card, loaded breech, no tracked hazard, a target.
    // All fire cards are equivalent, so only the first one is offered.
    if !has_tracked && player.tableau.breech.is_some() && !opponents.is_empty() {
        if let Some(i) = player.hand_index_of(Card::Fire) {
            for &opp in &opponents {
                let target = state.combatant(opp);
                if target.class == TankClass::Light
                    && target.adrenaline
                    && !can_target_ghost(&player.hand, Card::Fire)
                {
                    continue;
                }
                actions.push(ActionChoice::Fire { hand_index: i, target: opp });
            }
        }
    }

    // Quick fire: same shape keyed on the secondary weapon, no breech.
    if !has_tracked && !opponents.is_empty() {
        if let Some(i) = player.hand_index_of(Card::CoaxialMg) {
            for &opp in &opponents {
                let target = state.combatant(opp);
                if target.class == TankClass::Light
                    && target.adrenaline
                    && !can_target_ghost(&player.hand, Card::CoaxialMg)
                {
                    continue;
                }
                actions.push(ActionChoice::QuickFire { hand_index: i, target: opp });
            }
        }
    }

    // Sabotage: a hazard card against anyone not already afflicted by it.
    // A countering safety on the target does not block the offer — it
    // only changes the outcome (coup fourré).
    for (i, &card) in player.hand.iter().enumerate() {
        if card.category() == CardCategory::Hazard {
            for &opp in &opponents {
                if state.combatant(opp).has_hazard(card) {
                    continue;
                }
                actions.push(ActionChoice::Sabotage { hand_index: i, target: opp, card });
            }
        }
    }

    // Repair: a remedy against any living combatant with the hazard.
    for (i, &card) in player.hand.iter().enumerate() {
        if let Some(hazard) = card.cured_hazard() {
            for ally in state.combatants.iter().filter(|p| p.alive) {
                if ally.has_hazard(hazard) {
                    actions.push(ActionChoice::Repair { hand_index: i, target: ally.seat, card });
                }
            }
        }
    }

    // Equip: ablative armor unconditionally; a safety only if not
    // already active.
    for (i, &card) in player.hand.iter().enumerate() {
        if card == Card::AblativeArmor
            || (card.category() == CardCategory::Safety && !player.has_safety(card))
        {
            actions.push(ActionChoice::Equip { hand_index: i, card });
        }
    }

    // Discard: always legal, one per card in hand.
    for (i, &card) in player.hand.iter().enumerate() {
        actions.push(ActionChoice::Discard { hand_index: i, card });
    }

    actions
}

// ── Executor ───────────────────────────────────────────────────────────

/// Apply a chosen action. Returns the seat granted an immediate bonus
/// turn, if a coup fourré fired.
pub fn execute_action(
    state: &mut GameState,
    seat: usize,
    action: &ActionChoice,
    policies: &mut [Box<dyn Policy>],
) -> Option<usize> {
    match *action {
        ActionChoice::Load { hand_index, .. } => {
            let card = state.combatants[seat].hand.remove(hand_index);
            if let Some(old) = state.combatants[seat].tableau.breech.replace(card) {
                state.discard_pile.push(old);
            }
            state.push_log(LogRecord::Action {
                actor: seat,
                action: ActionRecord::Load { munition: card },
            });
            None
        }

        ActionChoice::Fire { hand_index, target } => {
            let fire_card = state.combatants[seat].hand.remove(hand_index);
            pay_ghost_toll(state, seat, target, policies);

            let Some(munition) = state.combatants[seat].tableau.breech.take() else {
                // Unreachable off a legal action; treat as a no-op fire.
                state.combatants[seat].hand.push(fire_card);
                return None;
            };

            let smoked = interrupts::try_smoke_interrupt(state, seat, target, policies);
            state.discard_pile.push(fire_card);
            state.discard_pile.push(munition);
            state.push_log(LogRecord::Action {
                actor: seat,
                action: ActionRecord::Fire { munition, target, smoked },
            });
            if !smoked {
                damage::resolve_damage(state, seat, target, munition);
            }
            None
        }

        ActionChoice::QuickFire { hand_index, target } => {
            let mg_card = state.combatants[seat].hand.remove(hand_index);
            pay_ghost_toll(state, seat, target, policies);

            let smoked = interrupts::try_smoke_interrupt(state, seat, target, policies);
            state.discard_pile.push(mg_card);
            state.push_log(LogRecord::Action {
                actor: seat,
                action: ActionRecord::Quickfire { target, smoked },
            });
            if !smoked {
                damage::resolve_damage(state, seat, target, Card::CoaxialMg);
            }
            None
        }

        ActionChoice::Sabotage { hand_index, target, .. } => {
            let hazard = state.combatants[seat].hand.remove(hand_index);
            match interrupts::try_coup_fourre(state, seat, target, hazard) {
                Some(bonus_seat) => {
                    state.discard_pile.push(hazard);
                    Some(bonus_seat)
                }
                None => {
                    state.combatants[target].tableau.hazards.push(hazard);
                    state.push_log(LogRecord::Action {
                        actor: seat,
                        action: ActionRecord::Sabotage { hazard, target },
                    });
                    None
                }
            }
        }

        ActionChoice::Repair { hand_index, target, .. } => {
            let remedy = state.combatants[seat].hand.remove(hand_index);
            if let Some(hazard) = remedy.cured_hazard() {
                let hazards = &mut state.combatants[target].tableau.hazards;
                if let Some(pos) = hazards.iter().position(|&h| h == hazard) {
                    let removed = hazards.remove(pos);
                    state.discard_pile.push(removed);
                }
            }
            state.discard_pile.push(remedy);
            state.push_log(LogRecord::Action {
                actor: seat,
                action: ActionRecord::Repair { remedy, target },
            });
            None
        }

        ActionChoice::Equip { hand_index, .. } => {
            let card = state.combatants[seat].hand.remove(hand_index);
            if card == Card::AblativeArmor {
                state.combatants[seat].tableau.ablative_armor += 1;
            } else {
                state.combatants[seat].tableau.safeties.push(card);
            }
            state.push_log(LogRecord::Action { actor: seat, action: ActionRecord::Equip { card } });
            None
        }

        ActionChoice::Discard { hand_index, .. } => {
            let card = state.combatants[seat].hand.remove(hand_index);
            state.discard_pile.push(card);
            state.push_log(LogRecord::Action {
                actor: seat,
                action: ActionRecord::Discard { card },
            });
            None
        }
    }
}

/// The toll for attacking an adrenaline Light: the attacker discards one
/// card of its choice before the shot resolves.
fn pay_ghost_toll(
    state: &mut GameState,
    attacker: usize,
    target: usize,
    policies: &mut [Box<dyn Policy>],
) {
    let t = state.combatant(target);
    if t.class != TankClass::Light || !t.adrenaline {
        return;
    }
    if state.combatants[attacker].hand.is_empty() {
        return;
    }
    let mut idx = policies[attacker].forced_discard(state, attacker);
    if idx >= state.combatants[attacker].hand.len() {
        idx = 0;
    }
    let card = state.combatants[attacker].hand.remove(idx);
    state.discard_pile.push(card);
    state.push_log(LogRecord::Event {
        event: GameEvent::ForcedDiscard { player: attacker, card },
    });
}
