// ═══════════════════════════════════════════════════════════════════════
// Core types — classes, combatants, tableau, game state
// ═══════════════════════════════════════════════════════════════════════

use crate::cards::Card;
use crate::log::LogRecord;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

// ── Tank classes ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TankClass {
    Heavy,
    Medium,
    Light,
}

impl TankClass {
    pub const ALL: [TankClass; 3] = [TankClass::Heavy, TankClass::Medium, TankClass::Light];

    pub fn max_hp(self) -> i32 {
        match self {
            TankClass::Heavy => 100,
            TankClass::Medium => 85,
            TankClass::Light => 80,
        }
    }

    /// HP at or below which the class ability ("adrenaline") activates.
    pub fn adrenaline_threshold(self) -> i32 {
        match self {
            TankClass::Heavy => 25,
            TankClass::Medium => 21,
            TankClass::Light => 20,
        }
    }

    /// Target hand size drawn up to at the start of each turn.
    pub fn hand_size(self) -> usize {
        match self {
            TankClass::Heavy => 6,
            TankClass::Medium => 6,
            TankClass::Light => 10,
        }
    }
}

impl std::fmt::Display for TankClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TankClass::Heavy => write!(f, "heavy"),
            TankClass::Medium => write!(f, "medium"),
            TankClass::Light => write!(f, "light"),
        }
    }
}

impl std::str::FromStr for TankClass {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heavy" => Ok(TankClass::Heavy),
            "medium" => Ok(TankClass::Medium),
            "light" => Ok(TankClass::Light),
            other => Err(ConfigError::UnknownClass(other.to_string())),
        }
    }
}

// ── Game mode ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Exactly 2 combatants, single life, first kill ends the game.
    Duel,
    /// 3+ combatants, deaths respawn, first to 3 kill marks wins.
    Deathmatch,
}

impl Mode {
    /// Infer the mode from a lineup length (2 → duel, 3+ → deathmatch).
    pub fn for_player_count(count: usize) -> Result<Mode, ConfigError> {
        match count {
            0 | 1 => Err(ConfigError::TooFewPlayers(count)),
            2 => Ok(Mode::Duel),
            _ => Ok(Mode::Deathmatch),
        }
    }
}

/// Kill marks needed to win a deathmatch.
pub const DEATHMATCH_KILL_TARGET: u32 = 3;

// ── Configuration errors ───────────────────────────────────────────────

/// Errors detected before any game starts. These abort the configuration
/// entirely; nothing in-game is ever reported through this type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown tank class: {0}")]
    UnknownClass(String),
    #[error("a game needs at least 2 combatants, got {0}")]
    TooFewPlayers(usize),
    #[error("duel mode requires exactly 2 combatants, got {0}")]
    DuelArity(usize),
    #[error("deathmatch mode requires 3+ combatants, got {0}")]
    DeathmatchArity(usize),
}

// ── Tableau ────────────────────────────────────────────────────────────

/// A combatant's persistent equipped state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tableau {
    /// The single loaded munition slot.
    pub breech: Option<Card>,
    /// Active hazards; each hazard name unique within the set.
    pub hazards: Vec<Card>,
    /// Active safeties; each safety name unique within the set.
    pub safeties: Vec<Card>,
    /// Ablative armor charges. Each counts as one card-equivalent.
    pub ablative_armor: u32,
}

// ── Combatant ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    /// Seat index into `GameState::combatants`.
    pub seat: usize,
    pub class: TankClass,
    /// May go negative transiently before the death check.
    pub current_hp: i32,
    pub kill_marks: u32,
    pub alive: bool,
    /// Set on respawn, cleared at the start of this combatant's next turn.
    pub spawn_shield: bool,
    /// Sticky once set; cleared only by respawn.
    pub adrenaline: bool,
    /// Unordered bag of cards; order of draw is irrelevant to the rules.
    pub hand: Vec<Card>,
    pub tableau: Tableau,
}

impl Combatant {
    pub fn new(seat: usize, class: TankClass) -> Self {
        Combatant {
            seat,
            class,
            current_hp: class.max_hp(),
            kill_marks: 0,
            alive: true,
            spawn_shield: false,
            adrenaline: false,
            hand: Vec::new(),
            tableau: Tableau::default(),
        }
    }

    pub fn has_hazard(&self, hazard: Card) -> bool {
        self.tableau.hazards.contains(&hazard)
    }

    pub fn has_safety(&self, safety: Card) -> bool {
        self.tableau.safeties.contains(&safety)
    }

    /// Position of the first copy of `card` in hand, if any.
    pub fn hand_index_of(&self, card: Card) -> Option<usize> {
        self.hand.iter().position(|&c| c == card)
    }
}

// ── Game state ─────────────────────────────────────────────────────────

/// The complete mutable state of one simulated game. Created fresh per
/// game, mutated in place for its duration, discarded once terminal.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Draw pile; the top of the pile is the end of the vec.
    pub draw_pile: Vec<Card>,
    pub discard_pile: Vec<Card>,
    pub combatants: Vec<Combatant>,
    pub turn_index: usize,
    pub mode: Mode,
    pub game_over: bool,
    /// `None` once the game is over means a draw.
    pub winner: Option<usize>,
    /// Append-only structured event log. Written by every component,
    /// never read back by the engine itself.
    pub log: Vec<LogRecord>,
    /// Explicitly owned random source; all shuffles and random
    /// tie-breaks inside the engine draw from it.
    pub rng: ChaCha8Rng,
}

impl GameState {
    pub fn player_count(&self) -> usize {
        self.combatants.len()
    }

    pub fn combatant(&self, seat: usize) -> &Combatant {
        &self.combatants[seat]
    }

    pub fn combatant_mut(&mut self, seat: usize) -> &mut Combatant {
        &mut self.combatants[seat]
    }

    /// The combatant whose turn it currently is.
    pub fn current_actor(&self) -> usize {
        self.turn_index
    }

    pub fn push_log(&mut self, record: LogRecord) {
        self.log.push(record);
    }
}
