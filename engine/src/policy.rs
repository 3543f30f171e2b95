// ═══════════════════════════════════════════════════════════════════════
// Decision policy — the capability interface the engine consults
// whenever a choice must be made. Implementations live outside the
// engine and are swappable without touching any game logic.
//
// Contract: every answer must come from the offered legal set. On an
// invalid or out-of-range answer the engine applies a documented
// fallback (first legal option / index 0) instead of failing.
// ═══════════════════════════════════════════════════════════════════════

use crate::actions::ActionChoice;
use crate::types::GameState;

pub trait Policy: Send {
    /// Human-readable name for this policy (e.g. "heuristic", "random").
    fn name(&self) -> &str;

    /// Choose a main or bonus action. Returns an index into `actions`,
    /// which is never empty when this is called.
    fn choose_action(&mut self, state: &GameState, seat: usize, actions: &[ActionChoice])
        -> usize;

    /// Asked when this seat holds a smoke card and is eligible to negate
    /// an incoming attack on `target` by `attacker`.
    fn play_smoke(&mut self, state: &GameState, seat: usize, attacker: usize, target: usize)
        -> bool;

    /// Choose a hand index to discard under a forced-discard condition
    /// (end-of-turn overflow, or the toll for targeting an adrenaline
    /// Light). The hand is never empty when this is called.
    fn forced_discard(&mut self, state: &GameState, seat: usize) -> usize;

    /// Medium free action: optionally pick one hand index to discard and
    /// replace at no action cost. `None` declines.
    fn free_exchange(&mut self, state: &GameState, seat: usize) -> Option<usize>;
}
