// ═══════════════════════════════════════════════════════════════════════
// Simulation driver — runs complete headless games and aggregates
// win-rate statistics across a batch.
//
// Games are mutually independent: each owns its state and its RNG
// stream, so the batch fans out over rayon when nobody is watching
// (verbose runs stay sequential to keep transcripts ordered).
// One game's failure never aborts the batch — it is caught at this
// boundary and tallied as degenerate.
// ═══════════════════════════════════════════════════════════════════════

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tank_agents::{HeuristicPolicy, RandomPolicy};
use tank_engine::log::{self, LogRecord};
use tank_engine::types::{ConfigError, Mode, TankClass};
use tank_engine::{setup, turn, Policy};

// ── Configuration ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyChoice {
    Heuristic,
    Random,
    /// Alternate heuristic and random seats, for sanity-checking that
    /// the heuristic actually beats the baseline.
    Mixed,
}

impl std::str::FromStr for PolicyChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heuristic" => Ok(PolicyChoice::Heuristic),
            "random" => Ok(PolicyChoice::Random),
            "mixed" => Ok(PolicyChoice::Mixed),
            other => Err(format!("unknown policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub games: u32,
    pub classes: Vec<TankClass>,
    pub mode: Mode,
    pub seed: u64,
    /// Turn cap: a game still running after this many turns is forced
    /// to a draw and tallied as degenerate.
    pub max_turns: u32,
    pub verbose: bool,
    pub policy: PolicyChoice,
}

impl SimConfig {
    /// Standard configuration for a lineup, mode inferred from its
    /// length.
    pub fn for_lineup(classes: Vec<TankClass>, games: u32) -> Result<SimConfig, ConfigError> {
        let mode = Mode::for_player_count(classes.len())?;
        Ok(SimConfig {
            games,
            classes,
            mode,
            seed: 42,
            max_turns: 1000,
            verbose: false,
            policy: PolicyChoice::Heuristic,
        })
    }
}

pub fn make_policies(choice: PolicyChoice, seed: u64, seats: usize) -> Vec<Box<dyn Policy>> {
    (0..seats)
        .map(|i| -> Box<dyn Policy> {
            let policy_seed = seed.wrapping_add(i as u64);
            match choice {
                PolicyChoice::Heuristic => Box::new(HeuristicPolicy::new(policy_seed)),
                PolicyChoice::Random => Box::new(RandomPolicy::new(policy_seed)),
                PolicyChoice::Mixed => {
                    if i % 2 == 0 {
                        Box::new(HeuristicPolicy::new(policy_seed))
                    } else {
                        Box::new(RandomPolicy::new(policy_seed))
                    }
                }
            }
        })
        .collect()
}

// ── Per-game outcome ───────────────────────────────────────────────────

/// Result of one completed game.
#[derive(Debug, Clone, Serialize)]
pub struct GameOutcome {
    pub seed: u64,
    /// Winning seat; `None` means a draw.
    pub winner: Option<usize>,
    pub winner_class: Option<TankClass>,
    /// Ended by the turn cap or by total card exhaustion.
    pub degenerate: bool,
    pub turns: usize,
    pub cards_played: usize,
    /// Kill marks per seat at game end.
    pub kills_by_seat: Vec<u32>,
    /// Full structured event log, for transcripts.
    pub log: Vec<LogRecord>,
}

/// Run a single game to completion (or the turn cap).
pub fn run_game(
    classes: &[TankClass],
    mode: Mode,
    seed: u64,
    max_turns: u32,
    policy: PolicyChoice,
) -> Result<GameOutcome, String> {
    let mut state = setup::new_game(classes, mode, seed).map_err(|e| e.to_string())?;
    let mut policies = make_policies(policy, seed, classes.len());

    let mut turn_count = 0u32;
    while !state.game_over && turn_count < max_turns {
        turn::play_turn(&mut state, &mut policies);
        turn_count += 1;
    }

    let mut degenerate = false;
    if !state.game_over {
        // Turn cap breached: force termination as a draw.
        state.game_over = true;
        state.winner = None;
        degenerate = true;
    }
    if state.winner.is_none() && state.draw_pile.is_empty() && state.discard_pile.is_empty() {
        // Total card exhaustion is a degenerate outcome too.
        degenerate = true;
    }

    Ok(GameOutcome {
        seed,
        winner: state.winner,
        winner_class: state.winner.map(|w| state.combatant(w).class),
        degenerate,
        turns: log::count_turns(&state.log),
        cards_played: log::count_cards_played(&state.log),
        kills_by_seat: state.combatants.iter().map(|p| p.kill_marks).collect(),
        log: state.log,
    })
}

// ── Aggregate statistics ───────────────────────────────────────────────

/// The aggregate result contract of a simulation batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimStats {
    pub games_played: u32,
    pub draws: u32,
    pub degenerate_games: u32,
    pub total_turns: u64,
    pub total_cards_played: u64,
    pub wins_by_class: HashMap<TankClass, u32>,
    pub wins_by_seat: HashMap<usize, u32>,
    pub kills_by_class: HashMap<TankClass, u32>,
}

impl SimStats {
    /// Zeroed stats with every class/seat of the lineup present, so
    /// reporting never has missing keys.
    pub fn for_lineup(classes: &[TankClass]) -> SimStats {
        let mut stats = SimStats::default();
        for (seat, &class) in classes.iter().enumerate() {
            stats.wins_by_class.entry(class).or_insert(0);
            stats.kills_by_class.entry(class).or_insert(0);
            stats.wins_by_seat.entry(seat).or_insert(0);
        }
        stats
    }

    fn record(&mut self, outcome: &GameOutcome, classes: &[TankClass]) {
        self.games_played += 1;
        self.total_turns += outcome.turns as u64;
        self.total_cards_played += outcome.cards_played as u64;
        if outcome.degenerate {
            self.degenerate_games += 1;
        }
        for (seat, &kills) in outcome.kills_by_seat.iter().enumerate() {
            *self.kills_by_class.entry(classes[seat]).or_insert(0) += kills;
        }
        match outcome.winner {
            Some(seat) => {
                *self.wins_by_class.entry(classes[seat]).or_insert(0) += 1;
                *self.wins_by_seat.entry(seat).or_insert(0) += 1;
            }
            None => self.draws += 1,
        }
    }

    /// Tally a game that crashed mid-simulation: it counts as
    /// degenerate and contributes nothing else.
    fn record_crash(&mut self) {
        self.degenerate_games += 1;
    }

    fn merge(mut self, other: SimStats) -> SimStats {
        self.games_played += other.games_played;
        self.draws += other.draws;
        self.degenerate_games += other.degenerate_games;
        self.total_turns += other.total_turns;
        self.total_cards_played += other.total_cards_played;
        for (k, v) in other.wins_by_class {
            *self.wins_by_class.entry(k).or_insert(0) += v;
        }
        for (k, v) in other.wins_by_seat {
            *self.wins_by_seat.entry(k).or_insert(0) += v;
        }
        for (k, v) in other.kills_by_class {
            *self.kills_by_class.entry(k).or_insert(0) += v;
        }
        self
    }

    pub fn average_turns(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games_played as f64
        }
    }

    pub fn average_cards_played(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_cards_played as f64 / self.games_played as f64
        }
    }
}

// ── Batch driver ───────────────────────────────────────────────────────

/// Run the configured batch, invoking `observer` with each completed
/// game (in order when verbose, else from worker threads).
pub fn run_simulation_with<F>(config: &SimConfig, observer: F) -> Result<SimStats, ConfigError>
where
    F: Fn(u32, &GameOutcome) + Sync,
{
    setup::validate_lineup(&config.classes, config.mode)?;

    // Independent per-game seeds drawn from one master stream.
    let mut seed_rng = ChaCha8Rng::seed_from_u64(config.seed);
    let seeds: Vec<u64> = (0..config.games).map(|_| seed_rng.gen()).collect();

    let run_one = |stats: &mut SimStats, game_index: u32, game_seed: u64| {
        let result = catch_unwind(AssertUnwindSafe(|| {
            run_game(&config.classes, config.mode, game_seed, config.max_turns, config.policy)
        }));
        match result {
            Ok(Ok(outcome)) => {
                observer(game_index, &outcome);
                stats.record(&outcome, &config.classes);
            }
            // Engine-reported failure or a panic: the game is
            // abandoned, the batch continues.
            Ok(Err(_)) | Err(_) => stats.record_crash(),
        }
    };

    if config.verbose {
        let mut stats = SimStats::for_lineup(&config.classes);
        for (i, &game_seed) in seeds.iter().enumerate() {
            run_one(&mut stats, i as u32, game_seed);
        }
        Ok(stats)
    } else {
        let stats = seeds
            .par_iter()
            .enumerate()
            .map(|(i, &game_seed)| {
                let mut stats = SimStats::for_lineup(&config.classes);
                run_one(&mut stats, i as u32, game_seed);
                stats
            })
            .reduce(|| SimStats::for_lineup(&config.classes), SimStats::merge);
        Ok(stats)
    }
}

/// Run the configured batch with no per-game observation.
pub fn run_simulation(config: &SimConfig) -> Result<SimStats, ConfigError> {
    run_simulation_with(config, |_, _| {})
}
